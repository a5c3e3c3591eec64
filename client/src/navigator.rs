use crate::routes::LOGIN_PATH;

/// Where the client is and how it moves, as seen by the request pipeline.
pub trait Navigator {
    /// Current path, e.g. `/surveys`.
    fn location(&self) -> String;
    fn navigate(&self, path: &str);
    /// Blocking user-facing notice.
    fn alert(&self, message: &str);

    fn is_on_login_page(&self) -> bool {
        self.location().contains(LOGIN_PATH)
    }
}
