use client::routes::{
    error_code, find_route, CHANGE_PASSWORD_PATH, COUNTING_PATH, ERROR_PATH, HOME_PATH, LOGIN_PATH,
    RESET_PASSWORD_PATH, SURVEYS_PATH, USERS_PATH,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Login,
    ResetPassword,
    Error { code: String },
    Home,
    ChangePassword,
    Surveys,
    Users,
    Counting,
    NotFound,
}

impl Route {
    pub fn from_path(path: &str) -> Self {
        let Some(route) = find_route(path) else {
            return Route::NotFound;
        };
        match route.path {
            LOGIN_PATH => Route::Login,
            RESET_PASSWORD_PATH => Route::ResetPassword,
            ERROR_PATH => Route::Error {
                code: error_code(path).unwrap_or_default().to_string(),
            },
            HOME_PATH => Route::Home,
            CHANGE_PASSWORD_PATH => Route::ChangePassword,
            SURVEYS_PATH => Route::Surveys,
            USERS_PATH => Route::Users,
            COUNTING_PATH => Route::Counting,
            _ => Route::NotFound,
        }
    }
}
