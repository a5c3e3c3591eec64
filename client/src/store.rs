use std::cell::{Cell, RefCell};
use std::fmt;
use std::rc::{Rc, Weak};

use shared::{AuthResults, UserProfile, UserProfilePatch, UserType};
use tracing::{debug, info, warn};

use crate::session::Session;
use crate::storage::{KeyValueStorage, MemoryStorage, SESSION_STORAGE_KEY};

type Listener = Rc<dyn Fn(&Session)>;

struct Inner {
    session: RefCell<Session>,
    storage: Rc<dyn KeyValueStorage>,
    listeners: RefCell<Vec<(u64, Listener)>>,
    next_listener: Cell<u64>,
}

/// Shared handle over the client session.
///
/// Every mutation is persisted under [`SESSION_STORAGE_KEY`] and then
/// broadcast to subscribers.
#[derive(Clone)]
pub struct AuthStore {
    inner: Rc<Inner>,
}

impl PartialEq for AuthStore {
    fn eq(&self, other: &Self) -> bool {
        Rc::ptr_eq(&self.inner, &other.inner)
    }
}

impl fmt::Debug for AuthStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AuthStore")
            .field("is_authorized", &self.is_authorized())
            .field("user_type", &self.user_type())
            .finish()
    }
}

impl AuthStore {
    /// Restores the session persisted in `storage`. Missing or unreadable
    /// state yields an anonymous session.
    pub fn load(storage: Rc<dyn KeyValueStorage>) -> Self {
        let session = match storage.get(SESSION_STORAGE_KEY) {
            Some(raw) => serde_json::from_str::<Session>(&raw).unwrap_or_else(|error| {
                warn!(%error, "Discarding unreadable persisted session");
                Session::default()
            }),
            None => Session::default(),
        };
        debug!(is_authorized = session.is_authorized(), "Session restored");
        AuthStore {
            inner: Rc::new(Inner {
                session: RefCell::new(session),
                storage,
                listeners: RefCell::new(Vec::new()),
                next_listener: Cell::new(0),
            }),
        }
    }

    pub fn in_memory() -> Self {
        Self::load(Rc::new(MemoryStorage::new()))
    }

    pub fn snapshot(&self) -> Session {
        self.inner.session.borrow().clone()
    }

    pub fn is_authorized(&self) -> bool {
        self.inner.session.borrow().is_authorized()
    }

    pub fn access_token(&self) -> Option<String> {
        self.inner.session.borrow().access_token().map(str::to_owned)
    }

    pub fn refresh_token(&self) -> Option<String> {
        self.inner.session.borrow().refresh_token().map(str::to_owned)
    }

    pub fn user(&self) -> Option<UserProfile> {
        self.inner.session.borrow().user().cloned()
    }

    pub fn user_type(&self) -> UserType {
        self.inner.session.borrow().user_type()
    }

    /// Stores the tokens and user of a successful sign-in. A backend that
    /// issues no refresh token gets the access token reused in its place.
    pub fn sign_in_with_credentials(&self, results: &AuthResults) {
        let refresh_token = results
            .refresh_token
            .clone()
            .filter(|token| !token.is_empty())
            .unwrap_or_else(|| results.token.clone());
        let user = UserProfile::from(results.user.clone());
        info!(user_id = %user.id, role = ?user.role, "Signed in");
        self.replace(Session::authorized(results.token.clone(), Some(refresh_token), user));
    }

    pub fn logout(&self) {
        info!("Session cleared");
        self.replace(Session::default());
    }

    pub fn update_access_token(&self, token: impl Into<String>) {
        self.mutate(|session| session.set_access_token(token.into()));
    }

    /// Patches the signed-in user. No-op when nobody is signed in.
    pub fn update_user_data(&self, patch: UserProfilePatch) {
        self.mutate(|session| {
            if let Some(user) = session.user_mut() {
                user.apply(patch);
            }
        });
    }

    /// Registers `listener` for every later change. Dropping the returned
    /// [`Subscription`] unregisters it.
    pub fn subscribe(&self, listener: impl Fn(&Session) + 'static) -> Subscription {
        let id = self.inner.next_listener.get();
        self.inner.next_listener.set(id + 1);
        self.inner
            .listeners
            .borrow_mut()
            .push((id, Rc::new(listener)));
        Subscription {
            id,
            inner: Rc::downgrade(&self.inner),
        }
    }

    fn replace(&self, session: Session) {
        self.mutate(|current| *current = session);
    }

    fn mutate(&self, change: impl FnOnce(&mut Session)) {
        let snapshot = {
            let mut session = self.inner.session.borrow_mut();
            change(&mut session);
            session.clone()
        };
        self.persist(&snapshot);
        // listeners may call back into the store, so run them on a copy
        let listeners: Vec<Listener> = self
            .inner
            .listeners
            .borrow()
            .iter()
            .map(|(_, listener)| listener.clone())
            .collect();
        for listener in listeners {
            listener(&snapshot);
        }
    }

    fn persist(&self, session: &Session) {
        let result = serde_json::to_string(session)
            .map_err(crate::Error::from)
            .and_then(|raw| self.inner.storage.set(SESSION_STORAGE_KEY, &raw));
        if let Err(error) = result {
            warn!(%error, "Failed to persist session");
        }
    }
}

#[must_use = "dropping a subscription unregisters the listener"]
pub struct Subscription {
    id: u64,
    inner: Weak<Inner>,
}

impl Drop for Subscription {
    fn drop(&mut self) {
        if let Some(inner) = self.inner.upgrade() {
            inner
                .listeners
                .borrow_mut()
                .retain(|(id, _)| *id != self.id);
        }
    }
}
