#![allow(dead_code)]

use std::cell::{Cell, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use async_trait::async_trait;
use client::{
    ApiClient, AuthStore, ClientConfig, HttpRequest, HttpResponse, MemoryStorage, Navigator, Transport,
    TransportError,
};

use super::auth_results;

/// Transport answering from a queue of canned responses and recording
/// every request it sees.
#[derive(Default)]
pub struct ScriptedTransport {
    responses: RefCell<VecDeque<Result<HttpResponse, TransportError>>>,
    requests: RefCell<Vec<HttpRequest>>,
    interleave: Cell<bool>,
}

impl ScriptedTransport {
    pub fn push(&self, response: HttpResponse) {
        self.responses.borrow_mut().push_back(Ok(response));
    }

    pub fn push_error(&self, error: TransportError) {
        self.responses.borrow_mut().push_back(Err(error));
    }

    /// Yield to the runtime after taking each response, so that joined
    /// requests take turns instead of running one after the other.
    pub fn interleave(&self) {
        self.interleave.set(true);
    }

    pub fn requests(&self) -> Vec<HttpRequest> {
        self.requests.borrow().clone()
    }

    /// Request paths relative to the test base URL.
    pub fn paths(&self) -> Vec<String> {
        self.requests
            .borrow()
            .iter()
            .map(|request| request.url.path().trim_start_matches("/api/").to_string())
            .collect()
    }

    pub fn pending(&self) -> usize {
        self.responses.borrow().len()
    }
}

#[async_trait(?Send)]
impl Transport for ScriptedTransport {
    async fn send(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        let path = request.url.path().to_string();
        self.requests.borrow_mut().push(request);
        let response = self
            .responses
            .borrow_mut()
            .pop_front()
            .unwrap_or_else(|| panic!("No scripted response for {path}"));
        if self.interleave.get() {
            tokio::task::yield_now().await;
        }
        response
    }
}

#[derive(Default)]
pub struct RecordingNavigator {
    location: RefCell<String>,
    visited: RefCell<Vec<String>>,
    alerts: RefCell<Vec<String>>,
}

impl RecordingNavigator {
    pub fn set_location(&self, path: &str) {
        *self.location.borrow_mut() = path.to_string();
    }

    pub fn visited(&self) -> Vec<String> {
        self.visited.borrow().clone()
    }

    pub fn alerts(&self) -> Vec<String> {
        self.alerts.borrow().clone()
    }
}

impl Navigator for RecordingNavigator {
    fn location(&self) -> String {
        self.location.borrow().clone()
    }

    fn navigate(&self, path: &str) {
        self.set_location(path);
        self.visited.borrow_mut().push(path.to_string());
    }

    fn alert(&self, message: &str) {
        self.alerts.borrow_mut().push(message.to_string());
    }
}

/// A client wired to scripted collaborators.
pub struct TestBackend {
    pub transport: Rc<ScriptedTransport>,
    pub navigator: Rc<RecordingNavigator>,
    pub storage: MemoryStorage,
    pub client: ApiClient,
}

impl TestBackend {
    pub fn anonymous() -> Self {
        Self::with_storage(MemoryStorage::new(), "/login")
    }

    /// Signed in as a user with `role`, browsing `/surveys`.
    pub fn signed_in(role: &str) -> Self {
        let backend = Self::anonymous();
        backend.client.store().sign_in_with_credentials(&auth_results(role));
        backend.navigator.set_location("/surveys");
        backend
    }

    pub fn with_storage(storage: MemoryStorage, location: &str) -> Self {
        let transport = Rc::new(ScriptedTransport::default());
        let navigator = Rc::new(RecordingNavigator::default());
        navigator.set_location(location);
        let store = AuthStore::load(Rc::new(storage.clone()));
        let config = ClientConfig::parse("http://backend.test/api").expect("valid test url");
        let client = ApiClient::new(config, store, transport.clone(), navigator.clone());
        TestBackend {
            transport,
            navigator,
            storage,
            client,
        }
    }
}
