use std::fmt;
use std::rc::Rc;

use serde::de::DeserializeOwned;
use serde::Serialize;
use shared::{ApiEnvelope, AuthResults, RefreshTokenRequest, TokenResponse};
use tracing::{debug, info, warn};

use crate::download::{self, Download};
use crate::error::{Error, Result};
use crate::navigator::Navigator;
use crate::routes::{error_page_path, LOGIN_PATH};
use crate::store::AuthStore;
use crate::transport::{HttpRequest, HttpResponse, Method, Transport};
use crate::ClientConfig;

pub const CLIENT_ID_HEADER: &str = "ClientId";
const AUTHORIZATION_HEADER: &str = "Authorization";
const CONTENT_TYPE_HEADER: &str = "Content-Type";
const JSON_CONTENT_TYPE: &str = "application/json";
const REFRESH_TOKEN_PATH: &str = "auth/refresh-token";

/// Statuses that send the user to the error page when they are not on the
/// login page.
pub const ERROR_PAGE_STATUSES: [u16; 5] = [403, 500, 502, 503, 504];

/// Request relative to the API base URL.
#[derive(Debug, Clone, PartialEq)]
pub struct ApiRequest {
    pub method: Method,
    pub path: String,
    pub query: Vec<(String, String)>,
    pub body: Option<String>,
}

impl ApiRequest {
    pub fn new(method: Method, path: impl Into<String>) -> Self {
        ApiRequest {
            method,
            path: path.into(),
            query: Vec::new(),
            body: None,
        }
    }

    pub fn get(path: impl Into<String>) -> Self {
        Self::new(Method::Get, path)
    }

    pub fn post(path: impl Into<String>) -> Self {
        Self::new(Method::Post, path)
    }

    pub fn put(path: impl Into<String>) -> Self {
        Self::new(Method::Put, path)
    }

    pub fn delete(path: impl Into<String>) -> Self {
        Self::new(Method::Delete, path)
    }

    pub fn query<K, V>(mut self, pairs: impl IntoIterator<Item = (K, V)>) -> Self
    where
        K: Into<String>,
        V: Into<String>,
    {
        self.query
            .extend(pairs.into_iter().map(|(k, v)| (k.into(), v.into())));
        self
    }

    pub fn json<B: Serialize + ?Sized>(mut self, body: &B) -> Result<Self> {
        self.body = Some(serde_json::to_string(body)?);
        Ok(self)
    }
}

/// Authenticated HTTP pipeline shared by every API call.
///
/// Attaches the bearer token, recovers from an expired access token with a
/// single refresh-and-retry and escalates server failures to the error page.
#[derive(Clone)]
pub struct ApiClient {
    config: Rc<ClientConfig>,
    store: AuthStore,
    transport: Rc<dyn Transport>,
    navigator: Rc<dyn Navigator>,
}

impl PartialEq for ApiClient {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.config, &other.config) && self.store == other.store
    }
}

impl fmt::Debug for ApiClient {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("ApiClient")
            .field("config", &self.config)
            .field("store", &self.store)
            .finish()
    }
}

impl ApiClient {
    pub fn new(
        config: ClientConfig,
        store: AuthStore,
        transport: Rc<dyn Transport>,
        navigator: Rc<dyn Navigator>,
    ) -> Self {
        ApiClient {
            config: Rc::new(config),
            store,
            transport,
            navigator,
        }
    }

    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    pub fn store(&self) -> &AuthStore {
        &self.store
    }

    pub fn navigator(&self) -> &dyn Navigator {
        self.navigator.as_ref()
    }

    /// Sends `request` through the pipeline and hands back the response the
    /// caller should interpret. Errors mean the pipeline already reacted.
    pub async fn execute(&self, request: ApiRequest) -> Result<HttpResponse> {
        let mut http = self.prepare(&request)?;
        if self.store.is_authorized() {
            if let Some(token) = self.store.access_token() {
                http.set_header(AUTHORIZATION_HEADER, format!("Bearer {token}"));
            }
        }
        debug!(method = %http.method, url = %http.url, "Dispatching request");
        let response = self.transport.send(http.clone()).await?;
        if response.status == 401 {
            return self.recover_unauthorized(http, response).await;
        }
        self.escalate(response)
    }

    /// Executes `request`, requires a 2xx status and decodes the body.
    pub async fn json<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(Error::UnexpectedStatus {
                status: response.status,
                body: response.text(),
            });
        }
        response.json()
    }

    /// Like [`ApiClient::json`] for enveloped endpoints: a failed envelope
    /// becomes [`Error::Api`] and the `results` are returned.
    pub async fn results<T: DeserializeOwned>(&self, request: ApiRequest) -> Result<T> {
        let envelope: ApiEnvelope<T> = self.json(request).await?;
        if !envelope.is_success() {
            return Err(Error::Api {
                code: envelope.code,
                message: envelope.message,
            });
        }
        envelope.results.ok_or(Error::MissingResults)
    }

    /// Fetches a binary body. The file name comes from `Content-Disposition`
    /// unless one is given.
    pub async fn download(&self, request: ApiRequest, file_name: Option<String>) -> Result<Download> {
        let response = self.execute(request).await?;
        if !response.is_success() {
            return Err(Error::UnexpectedStatus {
                status: response.status,
                body: response.text(),
            });
        }
        let file_name = file_name
            .filter(|name| !name.is_empty())
            .or_else(|| {
                response
                    .header("Content-Disposition")
                    .and_then(download::file_name_from_disposition)
            })
            .unwrap_or_else(|| download::DEFAULT_FILE_NAME.to_owned());
        Ok(Download {
            file_name,
            content_type: response.header(CONTENT_TYPE_HEADER).map(str::to_owned),
            bytes: response.body,
        })
    }

    /// Stores a successful sign-in and enters the application.
    pub fn complete_sign_in(&self, results: &AuthResults) {
        self.store.sign_in_with_credentials(results);
        self.navigator.navigate(crate::routes::HOME_PATH);
    }

    /// Ends the session on the client, optionally telling the user why.
    pub fn force_logout(&self, reason: Option<&str>) {
        if let Some(reason) = reason {
            self.navigator.alert(reason);
        }
        self.store.logout();
        self.navigator.navigate(LOGIN_PATH);
    }

    fn prepare(&self, request: &ApiRequest) -> Result<HttpRequest> {
        let mut url = self.config.endpoint(&request.path)?;
        if !request.query.is_empty() {
            url.query_pairs_mut().extend_pairs(request.query.iter());
        }
        let mut http = HttpRequest::new(request.method, url);
        if let Some(client_id) = &self.config.client_id {
            http.set_header(CLIENT_ID_HEADER, client_id.clone());
        }
        if let Some(body) = &request.body {
            http.set_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);
            http.body = Some(body.clone());
        }
        Ok(http)
    }

    async fn recover_unauthorized(
        &self,
        mut request: HttpRequest,
        response: HttpResponse,
    ) -> Result<HttpResponse> {
        if requests_forced_logout(&response) {
            info!(url = %request.url, "Backend ended the session");
            return Err(self.terminate_session());
        }
        let Some(refresh_token) = self.store.refresh_token() else {
            warn!(url = %request.url, "Unauthorized without a refresh token");
            return Err(self.terminate_session());
        };
        match self.refresh_access_token(&refresh_token).await {
            Ok(access_token) => {
                self.store.update_access_token(access_token.clone());
                request.set_header(AUTHORIZATION_HEADER, format!("Bearer {access_token}"));
                info!(url = %request.url, "Access token refreshed, retrying request");
                Ok(self.transport.send(request).await?)
            }
            Err(error) => {
                warn!(%error, "Token refresh failed");
                Err(self.terminate_session())
            }
        }
    }

    /// Exchanges the refresh token for a new access token. Bypasses the
    /// pipeline so a failing refresh cannot recurse.
    pub async fn refresh_access_token(&self, refresh_token: &str) -> Result<String> {
        let mut request = HttpRequest::new(Method::Post, self.config.endpoint(REFRESH_TOKEN_PATH)?);
        if let Some(client_id) = &self.config.client_id {
            request.set_header(CLIENT_ID_HEADER, client_id.clone());
        }
        request.set_header(CONTENT_TYPE_HEADER, JSON_CONTENT_TYPE);
        request.body = Some(serde_json::to_string(&RefreshTokenRequest {
            refresh_token: refresh_token.to_owned(),
        })?);
        let response = self.transport.send(request).await?;
        if !response.is_success() {
            return Err(Error::UnexpectedStatus {
                status: response.status,
                body: response.text(),
            });
        }
        let tokens: TokenResponse = response.json()?;
        Ok(tokens.access_token)
    }

    fn terminate_session(&self) -> Error {
        self.store.logout();
        self.navigator.navigate(LOGIN_PATH);
        Error::SessionTerminated
    }

    fn escalate(&self, response: HttpResponse) -> Result<HttpResponse> {
        let status = response.status;
        if status == 403 {
            if let Some(message) = response
                .message()
                .filter(|message| message.to_lowercase().contains("permission"))
            {
                self.navigator.alert(&message);
            }
        }
        if ERROR_PAGE_STATUSES.contains(&status) && !self.navigator.is_on_login_page() {
            warn!(status, "Redirecting to error page");
            self.navigator.navigate(&error_page_path(status));
            return Err(Error::ErrorPage { status });
        }
        Ok(response)
    }
}

fn requests_forced_logout(response: &HttpResponse) -> bool {
    let Ok(body) = serde_json::from_slice::<serde_json::Value>(&response.body) else {
        return false;
    };
    let forced = body.get("error").and_then(|e| e.as_str()) == Some("force_logout");
    let invalid_token = body
        .get("message")
        .and_then(|m| m.as_str())
        .is_some_and(|m| m.contains("Invalid login token"));
    forced || invalid_token
}
