//! Bridge between the UI thread and the backend worker that performs requests.

pub mod commands;
pub mod runtime;
