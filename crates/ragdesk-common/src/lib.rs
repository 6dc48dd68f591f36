//! ragdesk-common — Shared types and errors used across all ragdesk crates.

pub mod error;
pub mod chapter;
pub mod types;

// Re-export commonly used types
pub use chapter::ChapterFile;
pub use error::{RagdeskError, Result};
pub use types::{QueryRequest, QueryResult, Source, SourceMetadata};
