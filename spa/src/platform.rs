use std::time::Duration;

use async_trait::async_trait;
use client::download::Download;
use client::{
    ClientConfig, HttpRequest, HttpResponse, KeyValueStorage, Method, Navigator, Transport, TransportError,
};
use futures::future::{select, Either};
use gloo_net::http::Request;
use wasm_bindgen::{JsCast, JsValue};
use web_sys::{js_sys, Blob, BlobPropertyBag, HtmlAnchorElement, Url};
use yew::platform::time::sleep;
use yew::Callback;

/// Client settings baked in at build time.
pub fn client_config() -> client::Result<ClientConfig> {
    let config = ClientConfig::parse(option_env!("API_BASE_URL").unwrap_or(client::DEFAULT_API_BASE_URL))?;
    Ok(config.with_client_id(Some(
        option_env!("CLIENT_ID")
            .unwrap_or(client::DEFAULT_CLIENT_ID)
            .to_string(),
    )))
}

/// `fetch` based transport with a per-request timeout.
pub struct FetchTransport {
    timeout: Duration,
}

impl FetchTransport {
    pub fn new(timeout: Duration) -> Self {
        FetchTransport { timeout }
    }
}

fn network_error(error: gloo_net::Error) -> TransportError {
    TransportError::Network(error.to_string())
}

async fn dispatch(request: HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = request.url.as_str();
    let mut builder = match request.method {
        Method::Get => Request::get(url),
        Method::Post => Request::post(url),
        Method::Put => Request::put(url),
        Method::Delete => Request::delete(url),
    };
    for (name, value) in &request.headers {
        builder = builder.header(name, value);
    }
    let prepared = match request.body {
        Some(body) => builder.body(body),
        None => builder.build(),
    }
    .map_err(network_error)?;

    let response = prepared.send().await.map_err(network_error)?;
    let status = response.status();
    let headers = response.headers().entries().collect();
    let body = response.binary().await.map_err(network_error)?;
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}

#[async_trait(?Send)]
impl Transport for FetchTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        match select(Box::pin(dispatch(request)), Box::pin(sleep(self.timeout))).await {
            Either::Left((result, _)) => result,
            Either::Right(_) => Err(TransportError::Timeout),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum WebStorage {
    Local,
    Session,
}

impl WebStorage {
    fn storage(&self) -> Option<web_sys::Storage> {
        let window = web_sys::window()?;
        match self {
            WebStorage::Local => window.local_storage().ok().flatten(),
            WebStorage::Session => window.session_storage().ok().flatten(),
        }
    }
}

impl KeyValueStorage for WebStorage {
    fn get(&self, key: &str) -> Option<String> {
        self.storage()?.get_item(key).ok().flatten()
    }

    fn set(&self, key: &str, value: &str) -> client::Result<()> {
        let storage = self
            .storage()
            .ok_or_else(|| client::Error::Storage("web storage unavailable".to_string()))?;
        storage
            .set_item(key, value)
            .map_err(|error| client::Error::Storage(format!("{error:?}")))
    }

    fn remove(&self, key: &str) {
        if let Some(storage) = self.storage() {
            let _ = storage.remove_item(key);
        }
    }
}

pub fn current_path() -> String {
    web_sys::window()
        .and_then(|window| window.location().pathname().ok())
        .unwrap_or_else(|| "/".to_string())
}

/// History API navigation. `on_change` keeps the rendered route in sync.
pub struct BrowserNavigator {
    on_change: Callback<String>,
}

impl BrowserNavigator {
    pub fn new(on_change: Callback<String>) -> Self {
        BrowserNavigator { on_change }
    }
}

impl Navigator for BrowserNavigator {
    fn location(&self) -> String {
        current_path()
    }

    fn navigate(&self, path: &str) {
        if let Some(window) = web_sys::window() {
            if let Ok(history) = window.history() {
                if let Err(error) = history.push_state_with_url(&JsValue::NULL, "", Some(path)) {
                    log::warn!("Fail to push history state, path={path}, error={error:?}");
                }
            }
        }
        self.on_change.emit(path.to_string());
    }

    fn alert(&self, message: &str) {
        if let Some(window) = web_sys::window() {
            let _ = window.alert_with_message(message);
        }
    }
}

/// Hands a downloaded file to the browser through a temporary link.
pub fn save_download(download: &Download) -> Result<(), JsValue> {
    let window = web_sys::window().ok_or_else(|| JsValue::from_str("no window"))?;
    let document = window
        .document()
        .ok_or_else(|| JsValue::from_str("no document"))?;
    let body = document.body().ok_or_else(|| JsValue::from_str("no body"))?;

    let bytes = js_sys::Uint8Array::from(download.bytes.as_slice());
    let options = BlobPropertyBag::new();
    if let Some(content_type) = &download.content_type {
        options.set_type(content_type);
    }
    let blob = Blob::new_with_u8_array_sequence_and_options(&js_sys::Array::of1(&bytes), &options)?;
    let blob_url = Url::create_object_url_with_blob(&blob)?;

    let anchor: HtmlAnchorElement = document.create_element("a")?.dyn_into()?;
    anchor.set_href(&blob_url);
    anchor.set_download(&download.file_name);
    body.append_child(&anchor)?;
    anchor.click();
    body.remove_child(&anchor)?;
    Url::revoke_object_url(&blob_url)
}
