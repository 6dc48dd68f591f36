//! Chapter upload → stage to disk → backend `/initialize`.

use axum::{
    extract::{multipart::MultipartError, Multipart, State},
    response::Html,
};
use ragdesk_common::{ChapterFile, RagdeskError};
use tracing::{debug, warn};
use crate::actions;
use crate::render::{Notice, PageView, RenderError};
use crate::state::SharedState;

/// Multipart field carrying the chapter files.
pub const FILES_FIELD: &str = "files";

pub async fn initialize_submit(
    State(state): State<SharedState>,
    multipart: Multipart,
) -> Result<Html<String>, RenderError> {
    let notices = match read_chapter_files(multipart).await {
        Ok(files) => {
            let outcome = actions::initialize(&state, files).await;
            debug!("Initialize staged {} file(s), removed {}", outcome.staged, outcome.removed);
            outcome.notices
        }
        Err(UploadError::Rejected(e)) => vec![Notice::warning(e.to_string())],
        Err(UploadError::Multipart(e)) => {
            warn!("Malformed upload: {}", e);
            vec![Notice::error(format!("Error reading upload: {}", e.body_text()))]
        }
    };

    state.pages.render(&PageView {
        backend_url: state.backend.base_url(),
        sidebar_notices: notices,
        ..Default::default()
    })
}

enum UploadError {
    Rejected(RagdeskError),
    Multipart(MultipartError),
}

/// Collect every non-empty `files` part. Browsers send one empty, unnamed part
/// when no file was chosen; that part is skipped, not rejected. Every name is
/// validated before any file is written.
async fn read_chapter_files(mut multipart: Multipart) -> Result<Vec<ChapterFile>, UploadError> {
    let mut files = Vec::new();
    while let Some(field) = multipart.next_field().await.map_err(UploadError::Multipart)? {
        if field.name() != Some(FILES_FIELD) {
            continue;
        }
        let name = field.file_name().unwrap_or_default().to_string();
        let bytes = field.bytes().await.map_err(UploadError::Multipart)?;
        if name.is_empty() && bytes.is_empty() {
            continue;
        }
        debug!("Received upload {} ({} bytes)", name, bytes.len());
        files.push(ChapterFile::new(name, bytes.to_vec()).map_err(UploadError::Rejected)?);
    }
    Ok(files)
}
