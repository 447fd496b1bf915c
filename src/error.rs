use thiserror::Error;

/// Type alias for Result with AutomationError
pub type Result<T> = std::result::Result<T, AutomationError>;

/// Error types for the email automation pipeline
#[derive(Error, Debug)]
pub enum AutomationError {
    /// LLM backend failed (transport failure or retries exhausted)
    #[error("LLM backend error: {0}")]
    Backend(String),

    /// Classification failed (backend error or category outside the closed set)
    #[error("Classification error: {0}")]
    Classification(String),

    /// Response generation failed
    #[error("Response generation error: {0}")]
    Response(String),

    /// A category handler failed during dispatch, carrying the underlying cause
    #[error("Handler error: {0}")]
    Handler(String),

    /// An external collaborator (ticketing, messaging, feedback) failed
    #[error("Service error: {0}")]
    Service(String),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),

    /// IO error (file operations, etc.)
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// JSON serialization/deserialization error
    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}
