use crate::transport::TransportError;

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[derive(thiserror::Error, Debug)]
pub enum Error {
    #[error("request_timeout")]
    Timeout,
    #[error("transport_error: {0}")]
    Transport(String),
    #[error("session_terminated")]
    SessionTerminated,
    #[error("error_page_{status}")]
    ErrorPage { status: u16 },
    #[error("unexpected_status_{status}")]
    UnexpectedStatus { status: u16, body: String },
    #[error("api_error: {message}")]
    Api { code: u16, message: String },
    #[error("missing_results")]
    MissingResults,
    #[error("decode_error")]
    Decode(#[from] serde_json::Error),
    #[error("invalid_url")]
    InvalidUrl(#[from] url::ParseError),
    #[error("storage_error: {0}")]
    Storage(String),
}

impl From<TransportError> for Error {
    fn from(value: TransportError) -> Self {
        match value {
            TransportError::Timeout => Error::Timeout,
            TransportError::Network(details) => Error::Transport(details),
        }
    }
}

impl Error {
    /// Human readable message carried by the failure, preferring the
    /// backend's own `message` when the body has one.
    pub fn message(&self) -> String {
        match self {
            Error::Api { message, .. } => message.clone(),
            Error::UnexpectedStatus { body, .. } => serde_json::from_str::<serde_json::Value>(body)
                .ok()
                .and_then(|value| value.get("message").and_then(|m| m.as_str()).map(str::to_owned))
                .unwrap_or_else(|| body.clone()),
            other => other.to_string(),
        }
    }
}
