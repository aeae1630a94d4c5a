use std::fmt;

use crate::id::DeedId;

/// Client-side navigation targets.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Route {
    Home,
    Profile,
    Submit,
    Validate,
    DeedDetail(DeedId),
    NotFound(String),
}

impl Route {
    /// Parse a path such as `/nft/3`. Unknown paths become
    /// [`Route::NotFound`] rather than an error.
    pub fn parse(path: &str) -> Self {
        let trimmed = path.trim().trim_end_matches('/');
        let segments: Vec<&str> = trimmed
            .split('/')
            .filter(|segment| !segment.is_empty())
            .collect();
        match segments.as_slice() {
            [] => Route::Home,
            ["profile"] => Route::Profile,
            ["submit"] => Route::Submit,
            ["validate"] => Route::Validate,
            ["nft", id] => Route::DeedDetail(DeedId::from(*id)),
            _ => Route::NotFound(path.to_owned()),
        }
    }
}

impl fmt::Display for Route {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Route::Home => f.write_str("/"),
            Route::Profile => f.write_str("/profile"),
            Route::Submit => f.write_str("/submit"),
            Route::Validate => f.write_str("/validate"),
            Route::DeedDetail(id) => write!(f, "/nft/{}", id),
            Route::NotFound(path) => f.write_str(path),
        }
    }
}
