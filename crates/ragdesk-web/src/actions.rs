//! The two user actions: initialize the backend with chapter files, and ask
//! it a question. Each action makes one backend call at most and turns every
//! failure into a banner; nothing here returns an error to the handler.

use ragdesk_common::{ChapterFile, QueryResult};
use ragdesk_config::CleanupPolicy;
use tracing::{info, warn};

use crate::render::Notice;
use crate::staging::StagedFiles;
use crate::state::AppState;

pub const INIT_SUCCESS: &str = "System initialized successfully!";
pub const NO_FILES_WARNING: &str = "Upload at least one chapter file (JSON).";
pub const EMPTY_QUESTION_WARNING: &str = "Please enter a question.";

/// Outcome of one initialize action.
#[derive(Debug)]
pub struct InitializeOutcome {
    pub notices: Vec<Notice>,
    /// Number of files written to the upload directory
    pub staged: usize,
    /// Number of those removed afterwards
    pub removed: usize,
}

impl InitializeOutcome {
    fn notice_only(notice: Notice) -> Self {
        Self { notices: vec![notice], staged: 0, removed: 0 }
    }
}

/// Stage `files`, send their names to the backend, then clean up according to
/// the configured policy.
pub async fn initialize(state: &AppState, files: Vec<ChapterFile>) -> InitializeOutcome {
    if files.is_empty() {
        return InitializeOutcome::notice_only(Notice::warning(NO_FILES_WARNING));
    }

    let _guard = state.initialize_lock.lock().await;
    let staged = match StagedFiles::write(&state.ui.upload_dir, &files).await {
        Ok(s) => s,
        Err(e) if e.is_user_error() => return InitializeOutcome::notice_only(Notice::warning(e.to_string())),
        Err(e) => {
            warn!("Staging chapter files failed: {}", e);
            return InitializeOutcome::notice_only(Notice::error(format!(
                "Error saving chapter files: {e}"
            )));
        }
    };
    let staged_count = staged.count();

    let (notice, succeeded) = match state.backend.initialize(staged.names()).await {
        Ok(()) => {
            info!("Backend initialized with {} chapter file(s)", staged_count);
            (Notice::success(INIT_SUCCESS), true)
        }
        Err(e) => {
            warn!("Backend initialize failed: {}", e);
            (Notice::error(format!("Error initializing RAG system: {e}")), false)
        }
    };

    let removed = if succeeded || state.ui.cleanup == CleanupPolicy::Always {
        staged.remove().await
    } else {
        staged.keep();
        0
    };

    InitializeOutcome { notices: vec![notice], staged: staged_count, removed }
}

/// Outcome of one query action.
#[derive(Debug, Default)]
pub struct QueryOutcome {
    pub notices: Vec<Notice>,
    pub result: Option<QueryResult>,
}

/// Forward `question` to the backend. An empty question never reaches it.
pub async fn query(state: &AppState, question: &str) -> QueryOutcome {
    if question.is_empty() {
        return QueryOutcome { notices: vec![Notice::warning(EMPTY_QUESTION_WARNING)], result: None };
    }

    match state.backend.query(question).await {
        Ok(result) => {
            info!("Query answered with {} source(s)", result.sources.len());
            QueryOutcome { notices: Vec::new(), result: Some(result) }
        }
        Err(e) => {
            warn!("Backend query failed: {}", e);
            QueryOutcome {
                notices: vec![Notice::error(format!("Error querying RAG system: {e}"))],
                result: None,
            }
        }
    }
}
