use serde::{Deserialize, Serialize};

pub mod auth;
pub mod survey;
pub mod user;

pub use auth::*;
pub use survey::*;
pub use user::*;

fn default_code() -> u16 {
    200
}

/// Envelope wrapping most backend responses.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ApiEnvelope<T> {
    #[serde(default)]
    pub message: String,
    #[serde(default)]
    pub error: bool,
    #[serde(default = "default_code")]
    pub code: u16,
    #[serde(default = "Option::default")]
    pub results: Option<T>,
}

impl<T> ApiEnvelope<T> {
    pub fn is_success(&self) -> bool {
        !self.error && (200..300).contains(&self.code)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Paginated<T> {
    #[serde(default = "Vec::new")]
    pub docs: Vec<T>,
    #[serde(default)]
    pub total_docs: u64,
    #[serde(default = "first_page")]
    pub page: u32,
    #[serde(default)]
    pub limit: u32,
    #[serde(default = "first_page")]
    pub total_pages: u32,
    #[serde(default)]
    pub has_prev_page: bool,
    #[serde(default)]
    pub has_next_page: bool,
    #[serde(default)]
    pub prev_page: Option<u32>,
    #[serde(default)]
    pub next_page: Option<u32>,
}

fn first_page() -> u32 {
    1
}

pub type PaginatedResponse<T> = ApiEnvelope<Paginated<T>>;

/// Envelope for endpoints whose `results` carry nothing the client reads.
pub type MessageResponse = ApiEnvelope<serde_json::Value>;

/// Query string pairs for list endpoints. Empty values are skipped.
pub(crate) fn push_query(pairs: &mut Vec<(&'static str, String)>, key: &'static str, value: Option<String>) {
    if let Some(value) = value.filter(|v| !v.is_empty()) {
        pairs.push((key, value));
    }
}
