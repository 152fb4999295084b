//! Error types for the console host.
//!
//! [`EngineError`] wraps every failure that can end the process, so
//! `main` can propagate with `?`.

/// Top-level error for the console host.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: farmnav_core::config::ConfigError,
    },

    /// The session could not be created.
    #[error("session error: {source}")]
    Session {
        /// The underlying session error.
        #[from]
        source: farmnav_core::SessionError,
    },

    /// The session loop failed.
    #[error("runner error: {source}")]
    Runner {
        /// The underlying runner error.
        #[from]
        source: farmnav_core::runner::RunnerError,
    },
}
