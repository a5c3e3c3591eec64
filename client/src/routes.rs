use shared::UserType;

use crate::session::Session;

pub const HOME_PATH: &str = "/";
pub const LOGIN_PATH: &str = "/login";
pub const RESET_PASSWORD_PATH: &str = "/reset-password";
pub const CHANGE_PASSWORD_PATH: &str = "/change-password";
pub const ERROR_PATH: &str = "/error/:errorCode";
pub const SURVEYS_PATH: &str = "/surveys";
pub const USERS_PATH: &str = "/users";
pub const COUNTING_PATH: &str = "/counting";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RouteDefinition {
    pub path: &'static str,
    pub authorization_required: bool,
    /// Empty means any signed-in user.
    pub allowed_roles: &'static [UserType],
}

pub const ROUTES: &[RouteDefinition] = &[
    RouteDefinition {
        path: LOGIN_PATH,
        authorization_required: false,
        allowed_roles: &[],
    },
    RouteDefinition {
        path: RESET_PASSWORD_PATH,
        authorization_required: false,
        allowed_roles: &[],
    },
    RouteDefinition {
        path: ERROR_PATH,
        authorization_required: false,
        allowed_roles: &[],
    },
    RouteDefinition {
        path: HOME_PATH,
        authorization_required: true,
        allowed_roles: &[],
    },
    RouteDefinition {
        path: CHANGE_PASSWORD_PATH,
        authorization_required: true,
        allowed_roles: &[],
    },
    RouteDefinition {
        path: SURVEYS_PATH,
        authorization_required: true,
        allowed_roles: &[],
    },
    RouteDefinition {
        path: USERS_PATH,
        authorization_required: true,
        allowed_roles: &[UserType::Admin],
    },
    RouteDefinition {
        path: COUNTING_PATH,
        authorization_required: true,
        allowed_roles: &[UserType::Agent],
    },
];

impl RouteDefinition {
    /// Segment-wise match where `:name` segments accept any value.
    pub fn matches(&self, path: &str) -> bool {
        let pattern: Vec<&str> = segments(self.path).collect();
        let actual: Vec<&str> = segments(path).collect();
        pattern.len() == actual.len()
            && pattern
                .iter()
                .zip(&actual)
                .all(|(p, a)| p.starts_with(':') || p == a)
    }

    /// Whether `session` may see this route at all.
    pub fn permits(&self, session: &Session) -> bool {
        if self.authorization_required && !session.is_authorized() {
            return false;
        }
        self.allowed_roles.is_empty() || self.allowed_roles.contains(&session.user_type())
    }
}

fn segments(path: &str) -> impl Iterator<Item = &str> {
    let path = path.split(['?', '#']).next().unwrap_or_default();
    path.split('/').filter(|segment| !segment.is_empty())
}

pub fn find_route(path: &str) -> Option<&'static RouteDefinition> {
    ROUTES.iter().find(|route| route.matches(path))
}

/// Routes reachable with the given session. Authenticated routes are only
/// offered to authorized sessions, public ones to everybody.
pub fn available_routes(session: &Session) -> Vec<&'static RouteDefinition> {
    ROUTES.iter().filter(|route| route.permits(session)).collect()
}

/// Redirect target for `path`, or `None` when it can be rendered as is.
/// Signed-in users are sent home from the login page.
pub fn guard(path: &str, session: &Session) -> Option<&'static str> {
    if session.is_authorized() && find_route(path).is_some_and(|route| route.path == LOGIN_PATH) {
        return Some(HOME_PATH);
    }
    if available_routes(session).iter().any(|route| route.matches(path)) {
        return None;
    }
    Some(if session.is_authorized() {
        HOME_PATH
    } else {
        LOGIN_PATH
    })
}

pub fn error_page_path(status: u16) -> String {
    format!("/error/{status}")
}

/// Error code segment of an `/error/:errorCode` path.
pub fn error_code(path: &str) -> Option<&str> {
    let mut parts = segments(path);
    match (parts.next(), parts.next(), parts.next()) {
        (Some("error"), Some(code), None) => Some(code),
        _ => None,
    }
}

/// Card shown on the home page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct HomeEntry {
    pub title: &'static str,
    pub description: &'static str,
    pub path: &'static str,
}

const SURVEYS_ENTRY: HomeEntry = HomeEntry {
    title: "Surveys",
    description: "Plan traffic surveys and follow their counts",
    path: SURVEYS_PATH,
};

const USERS_ENTRY: HomeEntry = HomeEntry {
    title: "Users",
    description: "Manage agents and their counting posts",
    path: USERS_PATH,
};

const COUNTING_ENTRY: HomeEntry = HomeEntry {
    title: "Counting",
    description: "Continue the survey you are counting",
    path: COUNTING_PATH,
};

pub fn home_entries(user_type: UserType) -> Vec<HomeEntry> {
    match user_type {
        UserType::Admin => vec![SURVEYS_ENTRY, USERS_ENTRY],
        UserType::Agent => vec![SURVEYS_ENTRY, COUNTING_ENTRY],
        UserType::User | UserType::Unknown => vec![SURVEYS_ENTRY],
    }
}
