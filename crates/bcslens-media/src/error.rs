//! Validation errors for the photo pipeline.

/// Rejection reasons produced by policy checks, content verification, and
/// retrieval-name guarding. Each carries enough detail for an accurate client
/// error; the HTTP layer maps them onto the response taxonomy.
#[derive(Debug, thiserror::Error)]
pub enum MediaError {
    #[error("File too large ({size} bytes, max {max} bytes)")]
    FileTooLarge { size: usize, max: usize },

    #[error("Invalid file extension: {extension} (allowed: {allowed:?})")]
    InvalidExtension {
        extension: String,
        allowed: Vec<String>,
    },

    #[error("Invalid content type: {content_type} (allowed: {allowed:?})")]
    InvalidContentType {
        content_type: String,
        allowed: Vec<String>,
    },

    #[error("No file uploaded")]
    MissingFile,

    #[error("Multiple file fields are not allowed")]
    MultipleFiles,

    #[error("Cannot determine type from content")]
    UndeterminedContent,

    #[error("Declared type {declared} does not match detected type {detected}")]
    ContentMismatch { declared: String, detected: String },

    #[error("Invalid filename format: {0}")]
    InvalidNameFormat(String),

    #[error("Malicious filename pattern: {0}")]
    MaliciousName(String),
}

impl MediaError {
    /// Client-facing message. Sizes are reported in whole megabytes and
    /// malicious input is never echoed back.
    pub fn client_message(&self) -> String {
        match self {
            MediaError::FileTooLarge { max, .. } => {
                format!("File too large (max {}MB)", max / 1024 / 1024)
            }
            MediaError::InvalidExtension { allowed, .. } => {
                format!("Invalid file extension. Allowed extensions: {}", allowed.join(", "))
            }
            MediaError::InvalidContentType { allowed, .. } => {
                format!("Invalid content type. Allowed types: {}", allowed.join(", "))
            }
            MediaError::MissingFile => "No file uploaded.".to_string(),
            MediaError::MultipleFiles => {
                "Multiple file fields are not allowed; send exactly one field named 'file'"
                    .to_string()
            }
            MediaError::UndeterminedContent => "Cannot determine file type from content".to_string(),
            MediaError::ContentMismatch { declared, detected } => {
                format!("File content ({}) does not match declared type ({})", detected, declared)
            }
            MediaError::InvalidNameFormat(_) => "Invalid filename format".to_string(),
            MediaError::MaliciousName(_) => "Forbidden".to_string(),
        }
    }
}
