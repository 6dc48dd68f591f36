//! ragdesk-web — Browser front end for an external RAG backend.
//! Provides a single page with:
//!   - Chapter file upload and backend initialization (sidebar)
//!   - Question form with answer and cited sources (main panel)

pub mod router;
pub mod handlers;
pub mod state;
pub mod render;
pub mod staging;
pub mod actions;
