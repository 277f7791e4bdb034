use thiserror::Error;

#[derive(Debug, Error)]
pub enum BackendError {
    /// Transport failure: connection refused, timeout, TLS.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("Not found: {0}")]
    NotFound(String),

    /// Non-2xx response; `message` is the backend's `error` field when present.
    #[error("{message}")]
    Status { status: u16, message: String },

    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    #[error("Invalid client configuration: {0}")]
    Config(String),
}

pub type BackendResult<T> = Result<T, BackendError>;

impl BackendError {
    /// Builds the error for a failed response from its status and raw body.
    pub fn from_response(status: u16, body: &str) -> Self {
        let message = error_message(body)
            .unwrap_or_else(|| format!("Request failed with status {status}"));
        if status == 404 {
            BackendError::NotFound(message)
        } else {
            BackendError::Status { status, message }
        }
    }

    /// Text suitable for an error banner.
    pub fn user_message(&self) -> String {
        match self {
            BackendError::Http(_) => "Could not reach the store server".to_string(),
            BackendError::NotFound(message) | BackendError::Status { message, .. } => {
                message.clone()
            }
            BackendError::InvalidResponse(_) | BackendError::Config(_) => {
                "Unexpected response from the store server".to_string()
            }
        }
    }
}

/// Extracts `{"error": "..."}` from a JSON error body.
fn error_message(body: &str) -> Option<String> {
    let value: serde_json::Value = serde_json::from_str(body).ok()?;
    value
        .get("error")
        .and_then(serde_json::Value::as_str)
        .map(str::to_string)
        .filter(|message| !message.is_empty())
}
