//! Lexical path normalization.
//!
//! The router only ever looks at the *shape* of a path: nothing here touches a
//! file system or decodes percent-escapes. [`clean`] resolves `.` and `..`
//! elements and collapses repeated slashes, [`normalize`] additionally keeps a
//! trailing slash the caller asked for.

/// Returns the shortest path name lexically equivalent to `path`.
///
/// The rules, applied until nothing changes:
///
/// 1. replace multiple slashes with a single slash
/// 2. eliminate each `.` element
/// 3. eliminate each inner `..` element and the non-`..` element preceding it
/// 4. eliminate `..` elements that begin a rooted path
///
/// A trailing slash is dropped unless the result is the root `/`. An empty
/// input cleans to `/`; a relative path that cleans to nothing becomes `.`.
///
/// ```
/// use micro_mux::path::clean;
///
/// assert_eq!(clean("/a/../b"), "/b");
/// assert_eq!(clean("//a/./b/"), "/a/b");
/// assert_eq!(clean("/../a"), "/a");
/// ```
pub fn clean(path: &str) -> String {
    if path.is_empty() {
        return "/".to_string();
    }

    let rooted = path.starts_with('/');
    let mut elements: Vec<&str> = Vec::with_capacity(8);

    for element in path.split('/') {
        match element {
            "" | "." => {}
            ".." => match elements.last() {
                Some(&last) if last != ".." => {
                    elements.pop();
                }
                // a rooted path can't climb above `/`
                _ if rooted => {}
                _ => elements.push(".."),
            },
            _ => elements.push(element),
        }
    }

    let joined = elements.join("/");
    match (rooted, joined.is_empty()) {
        (true, _) => format!("/{joined}"),
        (false, true) => ".".to_string(),
        (false, false) => joined,
    }
}

/// Cleans a request path while preserving an intentional trailing slash.
///
/// `"/a/b/"` stays `"/a/b/"`, but `"/a/b//"` becomes `"/a/b/"` and `"/"` stays
/// `"/"`.
pub fn normalize(path: &str) -> String {
    let mut cleaned = clean(path);
    if cleaned != "/" && path.ends_with('/') {
        cleaned.push('/');
    }
    cleaned
}

#[cfg(test)]
mod tests {
    use super::{clean, normalize};

    #[test]
    fn test_clean_rooted() {
        let cases = [
            ("/", "/"),
            ("/abc", "/abc"),
            ("/abc/def", "/abc/def"),
            ("/abc/", "/abc"),
            ("//abc", "/abc"),
            ("/abc//def//ghi", "/abc/def/ghi"),
            ("/./abc", "/abc"),
            ("/abc/.", "/abc"),
            ("/abc/def/..", "/abc"),
            ("/abc/def/../..", "/"),
            ("/abc/def/../../..", "/"),
            ("/abc/def/../../../ghi/jkl/../../../mno", "/mno"),
            ("/../abc", "/abc"),
            ("/a/../b", "/b"),
        ];

        for (input, expected) in cases {
            assert_eq!(clean(input), expected, "clean({input:?})");
        }
    }

    #[test]
    fn test_clean_relative() {
        assert_eq!(clean("abc/../.."), "..");
        assert_eq!(clean("../../abc"), "../../abc");
        assert_eq!(clean("abc/.."), ".");
        assert_eq!(clean("./"), ".");
    }

    #[test]
    fn test_clean_empty() {
        assert_eq!(clean(""), "/");
    }

    #[test]
    fn test_normalize_keeps_trailing_slash() {
        assert_eq!(normalize("/a/b/"), "/a/b/");
        assert_eq!(normalize("/a/b"), "/a/b");
        assert_eq!(normalize("/a//b//"), "/a/b/");
        assert_eq!(normalize("/a/../b/"), "/b/");
    }

    #[test]
    fn test_normalize_root() {
        assert_eq!(normalize("/"), "/");
        assert_eq!(normalize("//"), "/");
        assert_eq!(normalize("/a/../"), "/");
    }
}
