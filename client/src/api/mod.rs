use std::str::FromStr;

use shared::{AuthMessage, MessageResponse};

use crate::error::{Error, Result};
use crate::pipeline::{ApiClient, ApiRequest};

pub mod auth_api;
pub mod surveys_api;
pub mod users_api;

pub const USER_ALREADY_EXISTS: &str = "userAlreadyExists";

/// Validation failure attached to one form field. `message` is either a
/// message key or text the backend sent.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldError {
    pub field: &'static str,
    pub message: String,
}

impl FieldError {
    pub fn new(field: &'static str, message: impl Into<String>) -> Self {
        FieldError {
            field,
            message: message.into(),
        }
    }

    pub fn auth(field: &'static str, message: AuthMessage) -> Self {
        Self::new(field, message.as_ref())
    }

    /// Display text for the message key, or the message itself.
    pub fn text(&self) -> String {
        if let Ok(message) = AuthMessage::from_str(&self.message) {
            return message.description().to_owned();
        }
        match self.message.as_str() {
            USER_ALREADY_EXISTS => "A user with this email already exists".to_owned(),
            other => other.to_owned(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Accepted,
    Rejected(FieldError),
}

/// Enveloped call whose `results` are not needed. A failed envelope becomes
/// [`Error::Api`].
pub(crate) async fn acknowledged(client: &ApiClient, request: ApiRequest) -> Result<MessageResponse> {
    let envelope: MessageResponse = client.json(request).await?;
    if !envelope.is_success() {
        return Err(Error::Api {
            code: envelope.code,
            message: envelope.message,
        });
    }
    Ok(envelope)
}
