//! Canonical payload construction shared by the verifier and the signer.
//!
//! ```text
//! payload = METHOD + CANONICAL_PATH + TIMESTAMP + BODY
//! ```
//!
//! - `METHOD` is the ASCII-uppercased HTTP verb.
//! - `CANONICAL_PATH` is the request path without the server mount prefix.
//!   A query string, if any, is appended as `?` followed by its `&`-separated
//!   pairs stably sorted by key. Keys and values are compared and emitted
//!   exactly as transmitted (no percent decoding or re-encoding).
//! - `TIMESTAMP` is the `X-Timestamp` header text as received.
//! - `BODY` is the raw request body; an absent body is the empty string.
//!   The server reads it through actix's payload decoder, so a body sent
//!   with `Content-Encoding` (gzip, br, ...) is signed in decoded form.

/// Uppercase an HTTP method for signing.
pub fn canonical_method(method: &str) -> String {
    method.to_ascii_uppercase()
}

/// Remove the server mount prefix from `path`.
///
/// The prefix is only removed when it is a whole leading segment, so with
/// prefix `/api` the path `/apiary` is left alone. A bare `/api` maps to `/`.
pub fn strip_route_prefix<'a>(path: &'a str, prefix: &str) -> &'a str {
    let prefix = prefix.trim_end_matches('/');
    if prefix.is_empty() {
        return path;
    }

    match path.strip_prefix(prefix) {
        Some("") => "/",
        Some(rest) if rest.starts_with('/') => rest,
        _ => path,
    }
}

/// Sort query pairs by key, keeping the original order for equal keys.
pub fn canonical_query(query: &str) -> String {
    let mut pairs: Vec<&str> = query.split('&').filter(|pair| !pair.is_empty()).collect();
    pairs.sort_by(|a, b| query_key(a).cmp(query_key(b)));
    pairs.join("&")
}

fn query_key(pair: &str) -> &str {
    pair.split_once('=').map_or(pair, |(key, _)| key)
}

/// Build the canonical path from the raw path and query string.
pub fn canonical_path(path: &str, query: &str, prefix: &str) -> String {
    let path = strip_route_prefix(path, prefix);
    let query = canonical_query(query);
    if query.is_empty() {
        path.to_string()
    } else {
        format!("{path}?{query}")
    }
}

/// Concatenate the signed fields into the exact bytes that get MACed.
pub fn canonical_payload(method: &str, path: &str, timestamp: &str, body: &[u8]) -> Vec<u8> {
    let method = canonical_method(method);
    let mut payload =
        Vec::with_capacity(method.len() + path.len() + timestamp.len() + body.len());
    payload.extend_from_slice(method.as_bytes());
    payload.extend_from_slice(path.as_bytes());
    payload.extend_from_slice(timestamp.as_bytes());
    payload.extend_from_slice(body);
    payload
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn method_is_uppercased() {
        assert_eq!(canonical_method("post"), "POST");
        assert_eq!(canonical_method("Delete"), "DELETE");
    }

    #[test]
    fn prefix_is_stripped_only_on_segment_boundary() {
        assert_eq!(strip_route_prefix("/api/users", "/api"), "/users");
        assert_eq!(strip_route_prefix("/api/users/3", "/api/"), "/users/3");
        assert_eq!(strip_route_prefix("/api", "/api"), "/");
        assert_eq!(strip_route_prefix("/apiary", "/api"), "/apiary");
        assert_eq!(strip_route_prefix("/users", "/api"), "/users");
        assert_eq!(strip_route_prefix("/users/api", "/api"), "/users/api");
        assert_eq!(strip_route_prefix("/users", ""), "/users");
    }

    #[test]
    fn query_pairs_sorted_by_key() {
        assert_eq!(canonical_query("b=2&a=1"), "a=1&b=2");
        assert_eq!(canonical_query("a=2&b=1&a=1"), "a=2&a=1&b=1");
        assert_eq!(canonical_query("flag&a=1"), "a=1&flag");
        assert_eq!(canonical_query("&&b=1&"), "b=1");
        assert_eq!(canonical_query(""), "");
    }

    #[test]
    fn query_text_is_not_reencoded() {
        assert_eq!(canonical_query("q=caf%C3%A9&a=%20"), "a=%20&q=caf%C3%A9");
    }

    #[test]
    fn canonical_path_omits_empty_query() {
        assert_eq!(canonical_path("/api/users", "", "/api"), "/users");
        assert_eq!(canonical_path("/api/users", "b=2&a=1", "/api"), "/users?a=1&b=2");
    }

    #[test]
    fn payload_concatenates_without_separators() {
        let payload = canonical_payload("post", "/users", "1700000000000", b"");
        assert_eq!(payload, b"POST/users1700000000000");

        let payload = canonical_payload("PUT", "/users/1", "5", br#"{"a":1}"#);
        assert_eq!(payload, br#"PUT/users/15{"a":1}"#);
    }

    #[test]
    fn body_bytes_are_taken_verbatim() {
        let spaced = canonical_payload("POST", "/users", "1", br#"{ "a": 1 }"#);
        let compact = canonical_payload("POST", "/users", "1", br#"{"a":1}"#);
        assert_ne!(spaced, compact);
    }
}
