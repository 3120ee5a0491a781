use thiserror::Error;

/// Failures surfaced to the user. Each one is terminal for the single
/// action that triggered it; there is no retry path.
#[derive(Debug, Clone, Error)]
pub enum ScribeError {
    #[error("pdf engine unavailable: {0}")]
    EngineInit(String),

    #[error("could not open document: {0}")]
    DocumentOpen(String),

    #[error("could not save document: {0}")]
    DocumentSave(String),

    #[error("could not render page {page}: {reason}")]
    Render { page: usize, reason: String },
}
