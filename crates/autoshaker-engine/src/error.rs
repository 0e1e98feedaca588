//! Error types for the harness binary.
//!
//! [`EngineError`] wraps every failure mode during startup and the run, so
//! `main` can propagate with `?`.

/// Top-level error for the harness.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// Shaker configuration loading failed.
    #[error("config error: {source}")]
    Config {
        /// The underlying config error.
        #[from]
        source: autoshaker_core::ConfigError,
    },

    /// The `harness` section could not be read.
    #[error("harness config error: {message}")]
    Harness {
        /// Description of the failure.
        message: String,
    },

    /// Building the farm failed.
    #[error("world error: {source}")]
    World {
        /// The underlying world error.
        #[from]
        source: autoshaker_world::WorldError,
    },

    /// The calendar could not be advanced or the start date is invalid.
    #[error("calendar error: {source}")]
    Calendar {
        /// The underlying calendar error.
        #[from]
        source: autoshaker_types::CalendarError,
    },
}
