//! Location handling that does not need a browser, so it can be unit-tested
//! on the host.

/// Turn `location.pathname` into a route key.
///
/// An empty pathname reads as `/`. A single trailing slash is dropped
/// (`/nav/` → `/nav`) since static servers commonly append one when falling
/// back to the index document.
pub fn route_key(pathname: &str) -> &str {
    if pathname.is_empty() {
        return "/";
    }
    match pathname.strip_suffix('/') {
        Some(rest) if !rest.is_empty() => rest,
        _ => pathname,
    }
}
