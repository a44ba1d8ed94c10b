//! Failure reporting collaborator.
//!
//! # Design
//! `FetchUtility` calls the logger once per failed request with the error
//! text, its own component name and the operation. The default sink is the
//! `log` facade; tests and hosts can plug in their own.

/// Receives failures from `FetchUtility` along with where they happened.
pub trait ErrorLogger: Send + Sync {
    fn log(&self, message: &str, component: &str, operation: &str);
}

/// Forwards failures to the `log` facade at error level.
#[derive(Debug, Clone, Copy, Default)]
pub struct LogErrorLogger;

impl ErrorLogger for LogErrorLogger {
    fn log(&self, message: &str, component: &str, operation: &str) {
        log::error!(target: "fetch_util", "[{component}::{operation}] {message}");
    }
}
