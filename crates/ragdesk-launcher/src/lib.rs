//! ragdesk-launcher — Starts the UI server as a child process and answers two
//! fixed status endpoints.
//!
//! The child runs under a [`supervisor::Supervisor`]. With the default
//! `never` restart policy it is spawned once and left alone; `on_failure`
//! restarts it after a failed exit, up to a configured limit.

pub mod supervisor;
pub mod router;
