use std::time::Duration;

use url::Url;

pub mod api;
pub mod countdown;
pub mod counting;
pub mod download;
pub mod error;
pub mod error_page;
pub mod format;
pub mod grid;
pub mod navigator;
pub mod password;
pub mod pipeline;
pub mod routes;
pub mod session;
pub mod storage;
pub mod store;
pub mod transport;

pub use error::{Error, Result};
pub use navigator::Navigator;
pub use pipeline::{ApiClient, ApiRequest};
pub use session::Session;
pub use storage::{KeyValueStorage, MemoryStorage};
pub use store::{AuthStore, Subscription};
pub use transport::{HttpRequest, HttpResponse, Method, Transport, TransportError};

pub const DEFAULT_API_BASE_URL: &str = "http://localhost:5000/api";
pub const DEFAULT_CLIENT_ID: &str = "road-traffic-survey-ui";
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(15);

#[derive(Debug, Clone, PartialEq)]
pub struct ClientConfig {
    pub api_base_url: Url,
    pub client_id: Option<String>,
    pub timeout: Duration,
}

impl ClientConfig {
    pub fn new(mut api_base_url: Url) -> Self {
        // Url::join drops the last segment unless the base ends with '/'
        if !api_base_url.path().ends_with('/') {
            let path = format!("{}/", api_base_url.path());
            api_base_url.set_path(&path);
        }
        ClientConfig {
            api_base_url,
            client_id: Some(DEFAULT_CLIENT_ID.to_owned()),
            timeout: DEFAULT_TIMEOUT,
        }
    }

    pub fn parse(api_base_url: &str) -> Result<Self> {
        Ok(Self::new(Url::parse(api_base_url)?))
    }

    pub fn with_client_id(mut self, client_id: Option<String>) -> Self {
        self.client_id = client_id.filter(|id| !id.is_empty());
        self
    }

    pub fn with_timeout(mut self, timeout: Duration) -> Self {
        self.timeout = timeout;
        self
    }

    pub fn endpoint(&self, path: &str) -> Result<Url> {
        Ok(self.api_base_url.join(path.trim_start_matches('/'))?)
    }
}
