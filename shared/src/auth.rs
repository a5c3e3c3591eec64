use secrecy::{ExposeSecret, SecretString};
use serde::{Deserialize, Serialize, Serializer};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::user::{CountingPost, RoleRef};
use crate::ApiEnvelope;

fn expose_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

#[derive(Debug, Serialize)]
pub struct SignInRequest {
    pub email: String,
    #[serde(serialize_with = "expose_secret")]
    pub password: SecretString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthUser {
    #[serde(rename = "_id", alias = "id")]
    pub id: String,
    pub email: String,
    #[serde(default)]
    pub full_name: String,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub role: Option<RoleRef>,
    #[serde(default, rename = "countingPost")]
    pub counting_post: Option<CountingPost>,
    #[serde(default, rename = "passwordResetToken")]
    pub password_reset_token: Option<String>,
    #[serde(default, rename = "userName")]
    pub user_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct AuthResults {
    pub token: String,
    #[serde(default, alias = "refreshToken")]
    pub refresh_token: Option<String>,
    #[serde(default)]
    pub expires_at: Option<String>,
    pub user: AuthUser,
}

pub type AuthUserResponse = ApiEnvelope<AuthResults>;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RefreshTokenRequest {
    pub refresh_token: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TokenResponse {
    pub access_token: String,
    #[serde(default)]
    pub refresh_token: Option<String>,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangeTemporaryPasswordRequest {
    #[serde(serialize_with = "expose_secret")]
    pub new_password: SecretString,
    pub password_reset_token: String,
    pub user_name: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ChangePasswordRequest {
    #[serde(serialize_with = "expose_secret")]
    pub current_password: SecretString,
    #[serde(serialize_with = "expose_secret")]
    pub new_password: SecretString,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForgotPasswordRequest {
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckForgotPasswordCodeRequest {
    pub email: String,
    pub confirmation_code: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConfirmForgotPasswordRequest {
    pub email: String,
    pub confirmation_code: String,
    #[serde(serialize_with = "expose_secret")]
    pub new_password: SecretString,
}

/// Role classification used to gate routes and menus.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum UserType {
    Admin,
    Agent,
    User,
    #[default]
    Unknown,
}

impl UserType {
    /// Case-insensitive match on the backend role name.
    pub fn from_role(role: Option<&str>) -> Self {
        let Some(role) = role else {
            return UserType::Unknown;
        };
        match role.trim().to_lowercase().as_str() {
            "admin" | "super admin" => UserType::Admin,
            "agent" => UserType::Agent,
            "user" => UserType::User,
            _ => UserType::Unknown,
        }
    }

    pub fn has_elevated_privileges(&self) -> bool {
        matches!(self, UserType::Admin | UserType::Agent)
    }
}

/// Signed-in user as kept in the client session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: String,
    pub email: String,
    pub full_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub role: Option<String>,
    #[serde(default, rename = "countingPost", skip_serializing_if = "Option::is_none")]
    pub counting_post: Option<CountingPost>,
}

impl UserProfile {
    pub fn user_type(&self) -> UserType {
        UserType::from_role(self.role.as_deref())
    }

    pub fn apply(&mut self, patch: UserProfilePatch) {
        if let Some(email) = patch.email {
            self.email = email;
        }
        if let Some(full_name) = patch.full_name {
            self.full_name = full_name;
        }
        if let Some(phone) = patch.phone {
            self.phone = Some(phone);
        }
        if let Some(role) = patch.role {
            self.role = Some(role);
        }
        if let Some(counting_post) = patch.counting_post {
            self.counting_post = Some(counting_post);
        }
    }
}

impl From<AuthUser> for UserProfile {
    fn from(value: AuthUser) -> Self {
        UserProfile {
            id: value.id,
            email: value.email,
            full_name: value.full_name,
            phone: value.phone,
            role: value.role.map(|role| role.name().to_owned()),
            counting_post: value.counting_post,
        }
    }
}

/// Partial profile update, fields left `None` are untouched.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserProfilePatch {
    pub email: Option<String>,
    pub full_name: Option<String>,
    pub phone: Option<String>,
    pub role: Option<String>,
    pub counting_post: Option<CountingPost>,
}

/// Field-level message keys the login and password forms display.
#[derive(Debug, Clone, Copy, PartialEq, Eq, AsRefStr, EnumString)]
#[strum(serialize_all = "camelCase")]
pub enum AuthMessage {
    IncorrectEmailOrPassword,
    InactiveUser,
    #[strum(serialize = "toManyRequest")]
    TooManyRequests,
    IncorrectPassword,
    HistoryValidPassword,
    TooManyIncorrectAttempts,
    WrongCode,
}

impl AuthMessage {
    pub fn description(&self) -> &'static str {
        match self {
            AuthMessage::IncorrectEmailOrPassword => "Incorrect email or password",
            AuthMessage::InactiveUser => "This user is inactive, please contact an administrator",
            AuthMessage::TooManyRequests => "Too many requests, please try again later",
            AuthMessage::IncorrectPassword => "Incorrect password",
            AuthMessage::HistoryValidPassword => "The new password was used recently, please choose another one",
            AuthMessage::TooManyIncorrectAttempts => "Too many incorrect attempts, please request a new code",
            AuthMessage::WrongCode => "The code is not valid",
        }
    }
}
