use reqwest::StatusCode;
use serde_json::Value as JsonValue;

pub type Result<T> = std::result::Result<T, Error>;

#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Bad request: {0}")]
    BadRequest(String),

    #[error("Unauthorized: {0}")]
    Unauthorized(String),

    #[error("Forbidden: {0}")]
    Forbidden(String),

    #[error("Not found: {0}")]
    NotFound(String),

    #[error("Server returned {status}: {message}")]
    Api { status: StatusCode, message: String },

    #[error("Validation error: {0}")]
    Validation(#[from] validator::ValidationErrors),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Request cancelled")]
    Cancelled,

    #[error("Completion is locked until proof and OTP are verified")]
    NotVerified,

    #[error("Cannot {action} a job that is {status}")]
    InvalidTransition { action: String, status: String },

    #[error("Internal error: {0}")]
    Internal(String),
}

impl Error {
    /// Maps a non-success response to an error, pulling the server's message
    /// out of `error`/`message` JSON fields or falling back to the raw body.
    pub fn from_status(status: StatusCode, body: &str) -> Self {
        let message = extract_message(body)
            .unwrap_or_else(|| status.canonical_reason().unwrap_or("request failed").to_string());

        match status {
            StatusCode::BAD_REQUEST | StatusCode::UNPROCESSABLE_ENTITY => Error::BadRequest(message),
            StatusCode::UNAUTHORIZED => Error::Unauthorized(message),
            StatusCode::FORBIDDEN => Error::Forbidden(message),
            StatusCode::NOT_FOUND => Error::NotFound(message),
            status => Error::Api { status, message },
        }
    }

    /// Timeouts, connection failures and 5xx/429 responses may succeed on a
    /// later attempt; everything else is terminal.
    pub fn is_retriable(&self) -> bool {
        match self {
            Error::Http(err) => err.is_timeout() || err.is_connect(),
            Error::Api { status, .. } => {
                status.is_server_error() || *status == StatusCode::TOO_MANY_REQUESTS
            }
            _ => false,
        }
    }

    pub fn is_unauthorized(&self) -> bool {
        matches!(self, Error::Unauthorized(_))
    }
}

fn extract_message(body: &str) -> Option<String> {
    let trimmed = body.trim();
    if trimmed.is_empty() {
        return None;
    }
    match serde_json::from_str::<JsonValue>(trimmed) {
        Ok(json) => ["error", "message"]
            .iter()
            .find_map(|key| json.get(*key).and_then(|v| v.as_str()))
            .map(str::to_string)
            .or_else(|| json.as_str().map(str::to_string)),
        Err(_) => Some(trimmed.to_string()),
    }
}
