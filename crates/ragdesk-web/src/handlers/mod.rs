//! HTTP handlers for all web routes.

pub mod page;
pub mod initialize;
pub mod query;
pub mod health;
pub mod assets;
