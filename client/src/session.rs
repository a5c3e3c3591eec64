use serde::{Deserialize, Serialize};
use shared::{UserProfile, UserType};

/// Client authentication state.
///
/// Authorization is derived from the presence of both an access token and a
/// user, so a session can never claim to be authorized without them.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(from = "PersistedSession", into = "PersistedSession")]
pub struct Session {
    access_token: Option<String>,
    refresh_token: Option<String>,
    user: Option<UserProfile>,
}

impl Session {
    pub fn authorized(access_token: String, refresh_token: Option<String>, user: UserProfile) -> Self {
        Session {
            access_token: Some(access_token),
            refresh_token,
            user: Some(user),
        }
    }

    pub fn is_authorized(&self) -> bool {
        self.access_token.is_some() && self.user.is_some()
    }

    pub fn access_token(&self) -> Option<&str> {
        self.access_token.as_deref()
    }

    pub fn refresh_token(&self) -> Option<&str> {
        self.refresh_token.as_deref()
    }

    pub fn user(&self) -> Option<&UserProfile> {
        self.user.as_ref()
    }

    pub fn user_type(&self) -> UserType {
        self.user
            .as_ref()
            .map(UserProfile::user_type)
            .unwrap_or_default()
    }

    pub(crate) fn set_access_token(&mut self, token: String) {
        self.access_token = Some(token);
    }

    pub(crate) fn user_mut(&mut self) -> Option<&mut UserProfile> {
        self.user.as_mut()
    }
}

/// Shape written under the durable storage key.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PersistedSession {
    #[serde(default)]
    is_authorized: bool,
    #[serde(default)]
    access_token: Option<String>,
    #[serde(default)]
    refresh_token: Option<String>,
    #[serde(default)]
    user: Option<UserProfile>,
}

impl From<PersistedSession> for Session {
    fn from(value: PersistedSession) -> Self {
        let session = Session {
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            user: value.user,
        };
        if session.is_authorized() == value.is_authorized {
            session
        } else {
            Session::default()
        }
    }
}

impl From<Session> for PersistedSession {
    fn from(value: Session) -> Self {
        PersistedSession {
            is_authorized: value.is_authorized(),
            access_token: value.access_token,
            refresh_token: value.refresh_token,
            user: value.user,
        }
    }
}
