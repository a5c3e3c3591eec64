use secrecy::SecretString;
use shared::{
    AuthMessage, AuthResults, AuthUserResponse, ChangePasswordRequest, ChangeTemporaryPasswordRequest,
    CheckForgotPasswordCodeRequest, ConfirmForgotPasswordRequest, ForgotPasswordRequest, SignInRequest,
};
use tracing::{info, warn};

use super::{FieldError, FormOutcome};
use crate::error::{Error, Result};
use crate::pipeline::{ApiClient, ApiRequest};

#[derive(Debug, Clone, PartialEq)]
pub enum LoginOutcome {
    SignedIn,
    /// The account still has a temporary password to replace.
    PasswordChangeRequired(AuthResults),
    Rejected(FieldError),
}

fn password_error(message: AuthMessage) -> FieldError {
    FieldError::auth("password", message)
}

/// Signs in. Rejections never touch the session.
pub async fn login(client: &ApiClient, request: &SignInRequest) -> LoginOutcome {
    let response = match ApiRequest::post("auth/signIn").json(request) {
        Ok(request) => client.execute(request).await,
        Err(error) => Err(error),
    };
    let response = match response {
        Ok(response) => response,
        Err(error) => {
            warn!(%error, "Sign-in request failed");
            return LoginOutcome::Rejected(password_error(AuthMessage::IncorrectEmailOrPassword));
        }
    };
    match response.status {
        200 => {}
        403 => return LoginOutcome::Rejected(password_error(AuthMessage::InactiveUser)),
        429 => return LoginOutcome::Rejected(password_error(AuthMessage::TooManyRequests)),
        _ => return LoginOutcome::Rejected(password_error(AuthMessage::IncorrectEmailOrPassword)),
    }
    let envelope: AuthUserResponse = match response.json() {
        Ok(envelope) => envelope,
        Err(error) => {
            warn!(%error, "Unreadable sign-in response");
            return LoginOutcome::Rejected(password_error(AuthMessage::IncorrectEmailOrPassword));
        }
    };
    match envelope.results {
        Some(results) if envelope.is_success() => {
            if results.user.password_reset_token.is_some() {
                info!(user_id = %results.user.id, "Temporary password must be changed");
                return LoginOutcome::PasswordChangeRequired(results);
            }
            client.complete_sign_in(&results);
            LoginOutcome::SignedIn
        }
        _ if !envelope.message.is_empty() => {
            LoginOutcome::Rejected(FieldError::new("password", envelope.message))
        }
        _ => LoginOutcome::Rejected(password_error(AuthMessage::IncorrectEmailOrPassword)),
    }
}

/// Replaces a temporary password and signs in with the returned session.
pub async fn change_temporary_password(
    client: &ApiClient,
    pending: &AuthResults,
    new_password: SecretString,
) -> Result<FormOutcome> {
    let user = &pending.user;
    let request = ChangeTemporaryPasswordRequest {
        new_password,
        password_reset_token: user.password_reset_token.clone().unwrap_or_default(),
        user_name: user.user_name.clone().unwrap_or_else(|| user.email.clone()),
    };
    let response = client
        .execute(ApiRequest::post("auth/change-temporary-password").json(&request)?)
        .await?;
    match response.status {
        409 => Ok(FormOutcome::Rejected(FieldError::auth(
            "newPassword",
            AuthMessage::HistoryValidPassword,
        ))),
        status if (200..300).contains(&status) => {
            let envelope: AuthUserResponse = response.json()?;
            let results = envelope.results.ok_or(Error::MissingResults)?;
            client.complete_sign_in(&results);
            Ok(FormOutcome::Accepted)
        }
        status => Err(Error::UnexpectedStatus {
            status,
            body: response.text(),
        }),
    }
}

/// Changes the signed-in user's password, re-signing in with the returned
/// payload.
pub async fn change_password(client: &ApiClient, request: &ChangePasswordRequest) -> Result<FormOutcome> {
    let response = client
        .execute(ApiRequest::post("auth/change-password").json(request)?)
        .await?;
    match response.status {
        200 => {
            let envelope: AuthUserResponse = response.json()?;
            let results = envelope.results.ok_or(Error::MissingResults)?;
            client.complete_sign_in(&results);
            Ok(FormOutcome::Accepted)
        }
        400 | 404 => Ok(FormOutcome::Rejected(FieldError::auth(
            "currentPassword",
            AuthMessage::IncorrectPassword,
        ))),
        409 => Ok(FormOutcome::Rejected(FieldError::auth(
            "currentPassword",
            AuthMessage::HistoryValidPassword,
        ))),
        status => Err(Error::UnexpectedStatus {
            status,
            body: response.text(),
        }),
    }
}

/// Requests a reset code. An unknown email reads as success so the form
/// does not reveal which accounts exist.
pub async fn send_forgot_password_email(client: &ApiClient, email: &str) -> Result<bool> {
    let request = ForgotPasswordRequest {
        email: email.to_owned(),
    };
    let response = client
        .execute(ApiRequest::post("users/forgot-password").json(&request)?)
        .await?;
    Ok(response.is_success() || response.status == 404)
}

pub async fn check_forgot_password_code(client: &ApiClient, email: &str, code: &str) -> Result<FormOutcome> {
    let request = CheckForgotPasswordCodeRequest {
        email: email.to_owned(),
        confirmation_code: code.to_owned(),
    };
    let response = client
        .execute(ApiRequest::post("users/check-forgot-password-code").json(&request)?)
        .await?;
    Ok(match response.status {
        status if (200..300).contains(&status) => FormOutcome::Accepted,
        429 => FormOutcome::Rejected(FieldError::auth("code", AuthMessage::TooManyIncorrectAttempts)),
        _ => FormOutcome::Rejected(FieldError::auth("code", AuthMessage::WrongCode)),
    })
}

pub async fn confirm_forgot_password(client: &ApiClient, request: &ConfirmForgotPasswordRequest) -> Result<bool> {
    let response = client
        .execute(ApiRequest::post("users/confirm-forgot-password").json(request)?)
        .await?;
    Ok(response.is_success())
}
