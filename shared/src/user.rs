use serde::{Deserialize, Serialize};
use strum_macros::{AsRefStr, Display, EnumString};

use crate::{push_query, ApiEnvelope, PaginatedResponse};

/// Role as returned by the backend: either a bare name or a role object.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RoleRef {
    Name(String),
    Object { name: String },
}

impl RoleRef {
    pub fn name(&self) -> &str {
        match self {
            RoleRef::Name(name) => name,
            RoleRef::Object { name } => name,
        }
    }
}

/// Which end of a survey an agent counts at.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Default, Display, AsRefStr, EnumString, Serialize, Deserialize,
)]
#[strum(serialize_all = "lowercase")]
#[serde(rename_all = "lowercase")]
pub enum CountingPost {
    #[default]
    Start,
    End,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct User {
    #[serde(alias = "_id")]
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
    #[serde(default)]
    pub picture: Option<String>,
}

impl User {
    pub fn role_name(&self) -> &str {
        self.role.as_ref().map(RoleRef::name).unwrap_or("-")
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UserFilter {
    pub role: Option<String>,
}

impl UserFilter {
    pub fn applied_count(&self) -> usize {
        usize::from(self.role.as_deref().is_some_and(|r| !r.is_empty()))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct UserListQuery {
    pub page: Option<u32>,
    pub limit: Option<u32>,
    pub search: Option<String>,
    pub filter: UserFilter,
}

impl UserListQuery {
    pub fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut pairs = Vec::new();
        push_query(&mut pairs, "page", self.page.map(|p| p.to_string()));
        push_query(&mut pairs, "limit", self.limit.map(|l| l.to_string()));
        push_query(&mut pairs, "search", self.search.clone());
        push_query(&mut pairs, "role", self.filter.role.clone());
        pairs
    }
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct CreateUserRequest {
    pub full_name: String,
    pub email: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct UpdateUserRequest {
    pub id: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub full_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub phone: Option<String>,
    #[serde(rename = "countingPost", skip_serializing_if = "Option::is_none")]
    pub counting_post: Option<CountingPost>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub picture: Option<String>,
}

pub type UserResponse = ApiEnvelope<User>;
pub type PaginatedUsersResponse = PaginatedResponse<User>;
