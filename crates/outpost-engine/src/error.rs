//! Error types for the engine binary.

/// Errors raised by the engine's own plumbing.
#[derive(Debug, thiserror::Error)]
pub enum EngineError {
    /// An HTTP exchange with the decision server failed.
    #[error("decision server transport error: {0}")]
    Transport(#[from] reqwest::Error),

    /// The decision server answered with something unparsable.
    #[error("decision server protocol error: {message}")]
    Protocol {
        /// What was wrong with the response.
        message: String,
    },

    /// The initial world could not be built.
    #[error("world setup error: {message}")]
    Setup {
        /// What failed during setup.
        message: String,
    },
}
