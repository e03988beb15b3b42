use thiserror::Error;

/// Errors surfaced by the upload admission checks and the boundary
/// normalization layer. Display strings for admission failures are the
/// exact user-facing messages.
#[derive(Debug, Error)]
pub enum ScopeError {
    #[error("Please select an APK file.")]
    NoFileSelected,

    #[error("Please upload a valid APK file.")]
    NotAnApk { name: String },

    #[error("File size exceeds {limit_mb}MB limit.")]
    FileTooLarge { size: u64, limit_mb: u64 },

    #[error("upload failed ({status}): {message}")]
    UploadRejected { status: u16, message: String },

    #[error("malformed '{event}' payload: {source}")]
    MalformedPayload {
        event: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("unknown server event: {0}")]
    UnknownEvent(String),
}

pub type Result<T> = std::result::Result<T, ScopeError>;

impl ScopeError {
    pub fn malformed_payload<S: Into<String>>(event: S, source: serde_json::Error) -> Self {
        Self::MalformedPayload {
            event: event.into(),
            source,
        }
    }
}
