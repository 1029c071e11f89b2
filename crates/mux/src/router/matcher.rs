//! Matches request path segments against route patterns.
//!
//! Both matchers compare segment by segment:
//! - two empty segments (leading or trailing slash) match
//! - a pattern segment starting with `:` matches any request segment, even an empty one
//! - anything else must be equal byte for byte

use super::route::{Route, RouteMethod};
use crate::PathParams;
use http::Method;
use tracing::trace;

/// Exact matching for method routes.
///
/// The method and the number of segments must be equal. On success returns the
/// placeholder bindings, empty when the pattern has no placeholder.
pub fn is_match(method: &Method, segments: &[&str], route: &Route) -> Option<PathParams> {
    let RouteMethod::Exact(route_method) = route.method() else {
        return None;
    };

    if route_method != method {
        trace!(got = %method, expected = %route_method, "different method");
        return None;
    }

    if route.segment_count() != segments.len() {
        trace!(got = segments.len(), expected = route.segment_count(), "different path length");
        return None;
    }

    let mut params = PathParams::empty();

    for (pattern, &segment) in route.segments().iter().zip(segments) {
        if pattern.is_empty() && segment.is_empty() {
            continue;
        }

        if let Some(name) = pattern.strip_prefix(':') {
            params.insert(name, segment);
            continue;
        }

        if pattern != segment {
            return None;
        }
    }

    Some(params)
}

/// Prefix matching for `USE` routes.
///
/// The pattern `/` matches every path. Otherwise the request must have at least
/// as many segments as the pattern and the pattern's segments must match the
/// leading request segments; the remaining request segments are ignored.
/// Placeholders match anything but are not bound.
///
/// A pattern ending with a slash covers everything below it: `/admin/` matches
/// `/admin/` and `/admin/dashboard`, but not `/admin`.
pub fn is_prefix_match(segments: &[&str], route: &Route) -> bool {
    let patterns = route.segments();

    if patterns.len() == 1 && patterns[0].is_empty() {
        return true;
    }

    if patterns.len() > segments.len() {
        trace!(got = segments.len(), prefix = patterns.len(), "path shorter than prefix");
        return false;
    }

    let last = patterns.len() - 1;
    for (index, (pattern, &segment)) in patterns.iter().zip(segments).enumerate() {
        if pattern.is_empty() && (segment.is_empty() || index == last) {
            continue;
        }

        if pattern.starts_with(':') {
            continue;
        }

        if pattern != segment {
            return false;
        }
    }

    true
}

#[cfg(test)]
mod tests {
    use super::{is_match, is_prefix_match};
    use crate::router::route::{Route, RouteItem, RouteMethod};
    use http::Method;

    fn route(method: RouteMethod, path: &str) -> Route {
        Route::new(method, path.to_string(), Vec::<RouteItem>::new()).unwrap()
    }

    fn get(path: &str) -> Route {
        route(RouteMethod::Exact(Method::GET), path)
    }

    fn prefix(path: &str) -> Route {
        route(RouteMethod::Use, path)
    }

    fn segments(path: &str) -> Vec<&str> {
        path.split('/').skip(1).collect()
    }

    #[test]
    fn test_exact_literal() {
        assert!(is_match(&Method::GET, &segments("/"), &get("/")).is_some());
        assert!(is_match(&Method::GET, &segments("/a/b"), &get("/a/b")).is_some());
        assert!(is_match(&Method::GET, &segments("/a/c"), &get("/a/b")).is_none());
        assert!(is_match(&Method::GET, &segments("/a/b/"), &get("/a/b")).is_none());
        assert!(is_match(&Method::GET, &segments("/a/b/"), &get("/a/b/")).is_some());
    }

    #[test]
    fn test_exact_method() {
        assert!(is_match(&Method::POST, &segments("/a"), &get("/a")).is_none());
        assert!(is_match(&Method::GET, &segments("/a"), &prefix("/a")).is_none());
    }

    #[test]
    fn test_exact_binds_placeholders() {
        let params = is_match(&Method::GET, &segments("/users/42/posts/7"), &get("/users/:id/posts/:post")).unwrap();
        assert_eq!(params.len(), 2);
        assert_eq!(params.get("id"), Some("42"));
        assert_eq!(params.get("post"), Some("7"));

        let params = is_match(&Method::GET, &segments("/users"), &get("/users")).unwrap();
        assert!(params.is_empty());
    }

    #[test]
    fn test_placeholder_accepts_empty_segment() {
        let params = is_match(&Method::GET, &segments("/users/"), &get("/users/:id")).unwrap();
        assert_eq!(params.get("id"), Some(""));
    }

    #[test]
    fn test_exact_length_mismatch() {
        let route = get("/users/:id");
        assert!(is_match(&Method::GET, &segments("/users/42/extra"), &route).is_none());
        assert!(is_match(&Method::GET, &segments("/users"), &route).is_none());
    }

    #[test]
    fn test_prefix_root_matches_everything() {
        let route = prefix("/");
        for path in ["/", "/a", "/a/b/c", "/a/"] {
            assert!(is_prefix_match(&segments(path), &route), "{path}");
        }
    }

    #[test]
    fn test_prefix() {
        let route = prefix("/admin");
        assert!(is_prefix_match(&segments("/admin"), &route));
        assert!(is_prefix_match(&segments("/admin/"), &route));
        assert!(is_prefix_match(&segments("/admin/users/1"), &route));
        assert!(!is_prefix_match(&segments("/administrator"), &route));
        assert!(!is_prefix_match(&segments("/"), &route));
    }

    #[test]
    fn test_prefix_with_trailing_slash() {
        let route = prefix("/admin/");
        assert!(is_prefix_match(&segments("/admin/"), &route));
        assert!(is_prefix_match(&segments("/admin/dashboard"), &route));
        assert!(is_prefix_match(&segments("/admin/a/path/to/"), &route));
        assert!(!is_prefix_match(&segments("/admin"), &route));
        assert!(!is_prefix_match(&segments("/public/dashboard"), &route));
    }

    #[test]
    fn test_prefix_placeholder() {
        let route = prefix("/users/:id/settings");
        assert!(is_prefix_match(&segments("/users/42/settings"), &route));
        assert!(is_prefix_match(&segments("/users/42/settings/email"), &route));
        assert!(!is_prefix_match(&segments("/users/42/profile"), &route));
        assert!(!is_prefix_match(&segments("/users/42"), &route));
    }
}
