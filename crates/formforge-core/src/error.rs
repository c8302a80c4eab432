use thiserror::Error;

#[derive(Error, Debug)]
pub enum FormForgeError {
    #[error("Failed to parse PDF: {0}")]
    ParseError(String),

    #[error("Page {page} not found (document has {page_count} pages)")]
    PageNotFound { page: u32, page_count: u32 },

    #[error("A form field named '{0}' already exists")]
    DuplicateName(String),

    #[error("No form field named '{0}'")]
    FieldNotFound(String),

    #[error("Invalid field geometry: {0}")]
    InvalidGeometry(String),

    #[error("Invalid layout: {0}")]
    InvalidLayout(String),

    #[error("PDF operation failed: {0}")]
    OperationError(String),

    #[error("Serialization error: {0}")]
    SerializationError(String),
}

impl From<lopdf::Error> for FormForgeError {
    fn from(err: lopdf::Error) -> Self {
        FormForgeError::OperationError(err.to_string())
    }
}
