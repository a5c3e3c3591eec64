/// Text shown on the `/error/:errorCode` page.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ErrorPageCopy {
    pub code: u16,
    pub title: &'static str,
    pub headline: &'static str,
    pub description: &'static str,
}

const UNAUTHORIZED: ErrorPageCopy = ErrorPageCopy {
    code: 401,
    title: "Unauthorized",
    headline: "You need to sign in",
    description: "Your session is missing or has expired. Please sign in again to continue.",
};

const FORBIDDEN: ErrorPageCopy = ErrorPageCopy {
    code: 403,
    title: "Forbidden",
    headline: "Access denied",
    description: "You do not have permission to view this page.",
};

const NOT_FOUND: ErrorPageCopy = ErrorPageCopy {
    code: 404,
    title: "Not found",
    headline: "Page not found",
    description: "The page you are looking for does not exist or has been moved.",
};

const SERVER_ERROR: ErrorPageCopy = ErrorPageCopy {
    code: 500,
    title: "Server error",
    headline: "Something went wrong",
    description: "The server could not complete your request. Please try again later.",
};

/// Copy for an error code taken from the URL. `None` means the page should
/// redirect home instead.
pub fn error_page_copy(code: &str) -> Option<ErrorPageCopy> {
    match code.parse::<u16>().ok()? {
        401 => Some(UNAUTHORIZED),
        403 => Some(FORBIDDEN),
        404 => Some(NOT_FOUND),
        500..=599 => Some(SERVER_ERROR),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn server_errors_share_copy() {
        assert_eq!(error_page_copy("502"), error_page_copy("500"));
        assert_eq!(error_page_copy("503").map(|c| c.code), Some(500));
    }

    #[test]
    fn unknown_codes_have_no_copy() {
        assert_eq!(error_page_copy("418"), None);
        assert_eq!(error_page_copy("abc"), None);
        assert_eq!(error_page_copy("404").map(|c| c.title), Some("Not found"));
    }
}
