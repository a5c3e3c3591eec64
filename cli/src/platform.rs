use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use async_trait::async_trait;
use client::{HttpRequest, HttpResponse, KeyValueStorage, Method, Navigator, Transport, TransportError};
use tracing::{info, warn};

/// `reqwest` transport. The timeout covers the whole exchange.
pub struct ReqwestTransport {
    http: reqwest::Client,
}

impl ReqwestTransport {
    pub fn new(timeout: Duration) -> anyhow::Result<Self> {
        let http = reqwest::Client::builder().timeout(timeout).build()?;
        Ok(ReqwestTransport { http })
    }
}

fn transport_error(error: reqwest::Error) -> TransportError {
    if error.is_timeout() {
        TransportError::Timeout
    } else {
        TransportError::Network(error.to_string())
    }
}

#[async_trait(?Send)]
impl Transport for ReqwestTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let method = match request.method {
            Method::Get => reqwest::Method::GET,
            Method::Post => reqwest::Method::POST,
            Method::Put => reqwest::Method::PUT,
            Method::Delete => reqwest::Method::DELETE,
        };
        let mut builder = self.http.request(method, request.url);
        for (name, value) in &request.headers {
            builder = builder.header(name, value);
        }
        if let Some(body) = request.body {
            builder = builder.body(body);
        }
        let response = builder.send().await.map_err(transport_error)?;
        let status = response.status().as_u16();
        let headers = response
            .headers()
            .iter()
            .filter_map(|(name, value)| Some((name.to_string(), value.to_str().ok()?.to_owned())))
            .collect();
        let body = response.bytes().await.map_err(transport_error)?.to_vec();
        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

/// Key-value storage kept as one JSON object in a file. Holds the session
/// and the survey being counted between invocations.
pub struct FileStorage {
    path: PathBuf,
}

impl FileStorage {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        FileStorage { path: path.into() }
    }

    /// `~/.traffic-survey/session.json`
    pub fn default_path() -> anyhow::Result<PathBuf> {
        let home = home::home_dir().ok_or_else(|| anyhow::anyhow!("Fail to resolve the home directory"))?;
        Ok(home.join(".traffic-survey").join("session.json"))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    fn read(&self) -> BTreeMap<String, String> {
        let Ok(raw) = fs::read_to_string(&self.path) else {
            return BTreeMap::new();
        };
        serde_json::from_str(&raw).unwrap_or_else(|error| {
            warn!(%error, path = %self.path.display(), "Ignoring unreadable session file");
            BTreeMap::new()
        })
    }

    fn write(&self, entries: &BTreeMap<String, String>) -> client::Result<()> {
        let storage_error = |error: std::io::Error| client::Error::Storage(error.to_string());
        if let Some(parent) = self.path.parent() {
            fs::create_dir_all(parent).map_err(storage_error)?;
        }
        fs::write(&self.path, serde_json::to_string_pretty(entries)?).map_err(storage_error)
    }
}

impl KeyValueStorage for FileStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.read().remove(key)
    }

    fn set(&self, key: &str, value: &str) -> client::Result<()> {
        let mut entries = self.read();
        entries.insert(key.to_owned(), value.to_owned());
        self.write(&entries)
    }

    fn remove(&self, key: &str) {
        let mut entries = self.read();
        if entries.remove(key).is_some() {
            if let Err(error) = self.write(&entries) {
                warn!(%error, key, "Fail to remove stored value");
            }
        }
    }
}

/// Tracks the location the web app would be on. Alerts go to stderr.
pub struct CliNavigator {
    location: RefCell<String>,
}

impl CliNavigator {
    pub fn new(location: impl Into<String>) -> Self {
        CliNavigator {
            location: RefCell::new(location.into()),
        }
    }
}

impl Navigator for CliNavigator {
    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        info!(path, "Navigate");
        *self.location.borrow_mut() = path.to_owned();
    }

    fn alert(&self, message: &str) {
        eprintln!("{message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn file_storage_round_trips_and_removes_keys() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let storage = FileStorage::new(dir.path().join("nested").join("session.json"));
        assert_eq!(storage.get("user-storage"), None);

        storage.set("user-storage", "{\"isAuthorized\":false}")?;
        storage.set("currentSurvey", "{}")?;
        assert_eq!(storage.get("user-storage").as_deref(), Some("{\"isAuthorized\":false}"));

        storage.remove("currentSurvey");
        assert_eq!(storage.get("currentSurvey"), None);
        assert!(storage.get("user-storage").is_some());
        Ok(())
    }

    #[test]
    fn corrupt_file_reads_as_empty() -> anyhow::Result<()> {
        let dir = tempfile::tempdir()?;
        let path = dir.path().join("session.json");
        fs::write(&path, "not json")?;
        let storage = FileStorage::new(&path);
        assert_eq!(storage.get("user-storage"), None);

        storage.set("user-storage", "value")?;
        assert_eq!(storage.get("user-storage").as_deref(), Some("value"));
        Ok(())
    }

    #[test]
    fn navigator_follows_navigation() {
        let navigator = CliNavigator::new("/login");
        assert!(navigator.is_on_login_page());
        navigator.navigate("/surveys");
        assert_eq!(navigator.location(), "/surveys");
        assert!(!navigator.is_on_login_page());
    }
}
