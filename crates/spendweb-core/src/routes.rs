//! Page paths

pub const HOME: &str = "/";
pub const LOGIN: &str = "/login";
pub const NEW_CATEGORY: &str = "/category/new";
pub const NEW_PAYMENT: &str = "/payment/new";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Route {
    Home,
    NewCategory,
    NewPayment,
    NotFound,
}

impl Route {
    /// Match a request path; a trailing slash is ignored
    pub fn resolve(path: &str) -> Route {
        let path = match path.trim_end_matches('/') {
            "" => HOME,
            trimmed => trimmed,
        };
        match path {
            HOME => Route::Home,
            NEW_CATEGORY => Route::NewCategory,
            NEW_PAYMENT => Route::NewPayment,
            _ => Route::NotFound,
        }
    }

    pub fn path(&self) -> Option<&'static str> {
        match self {
            Route::Home => Some(HOME),
            Route::NewCategory => Some(NEW_CATEGORY),
            Route::NewPayment => Some(NEW_PAYMENT),
            Route::NotFound => None,
        }
    }

    pub fn title(&self) -> &'static str {
        match self {
            Route::Home => "Home",
            Route::NewCategory => "Create Category",
            Route::NewPayment => "Add Transaction",
            Route::NotFound => "Not Found",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_resolve() {
        assert_eq!(Route::resolve("/"), Route::Home);
        assert_eq!(Route::resolve(""), Route::Home);
        assert_eq!(Route::resolve("/category/new"), Route::NewCategory);
        assert_eq!(Route::resolve("/payment/new/"), Route::NewPayment);
        assert_eq!(Route::resolve(LOGIN), Route::NotFound);
        assert_eq!(Route::resolve("/reports"), Route::NotFound);
    }

    #[test]
    fn test_path_round_trip() {
        for route in [Route::Home, Route::NewCategory, Route::NewPayment] {
            assert_eq!(route.path().map(Route::resolve), Some(route));
        }
        assert_eq!(Route::NotFound.path(), None);
    }
}
