//! Request → cache key mapping for `/content`.

use axum::http::HeaderMap;

use crate::cache::CacheKey;

pub const SCREEN_WIDTH_HEADER: &str = "x-screen-width";

/// Column bucket for a client-reported screen width. Missing or
/// unparseable widths get the narrowest layout.
pub fn columns_for_width(width: Option<&str>) -> usize {
    let width: i64 = width.and_then(|w| w.parse().ok()).unwrap_or(1);
    if width > 1400 {
        4
    } else if width > 1000 {
        3
    } else if width > 600 {
        2
    } else {
        1
    }
}

/// `sort=rev` selects descending order; anything else is ascending.
pub fn is_reversed(sort: Option<&str>) -> bool {
    sort == Some("rev")
}

/// First value for `name` in a decoded query string. Repeated keys are
/// allowed; later values are ignored.
pub fn first_param<'a>(params: &'a [(String, String)], name: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == name)
        .map(|(_, v)| v.as_str())
}

pub fn cache_key(headers: &HeaderMap, sort: Option<&str>) -> CacheKey {
    let width = headers
        .get(SCREEN_WIDTH_HEADER)
        .and_then(|v| v.to_str().ok());
    CacheKey::new(columns_for_width(width), is_reversed(sort))
}
