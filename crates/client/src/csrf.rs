//! CSRF token handling
//!
//! The backend hands out its CSRF token in a `csrftoken` cookie and
//! expects it echoed back in an `X-CSRFToken` header on every
//! unsafe-method request from the same origin. The token is never sent
//! cross-origin, and a missing token is silently omitted rather than
//! treated as an error; the server answers 403 on its own.

use reqwest::Url;

/// Cookie the backend stores its CSRF token in
pub const CSRF_COOKIE: &str = "csrftoken";

/// Header the token is echoed back in
pub const CSRF_HEADER: &str = "X-CSRFToken";

/// Extract the CSRF token from one `Set-Cookie` header value.
///
/// Returns `None` when the header sets a different cookie.
pub fn token_from_set_cookie(header_value: &str) -> Option<String> {
    let pair = header_value.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    if name.trim() != CSRF_COOKIE {
        return None;
    }
    let value = value.trim();
    if value.is_empty() {
        return None;
    }
    Some(value.to_string())
}

/// Whether two URLs share an origin (scheme, host, and port).
pub fn same_origin(base: &Url, target: &Url) -> bool {
    base.scheme() == target.scheme()
        && base.host_str() == target.host_str()
        && base.port_or_known_default() == target.port_or_known_default()
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_token_from_set_cookie() {
        assert_eq!(
            token_from_set_cookie("csrftoken=abc123; Path=/; SameSite=Lax"),
            Some("abc123".to_string())
        );
        assert_eq!(token_from_set_cookie("csrftoken=xyz"), Some("xyz".to_string()));
        assert_eq!(token_from_set_cookie("sessionid=abc123; Path=/"), None);
        assert_eq!(token_from_set_cookie("csrftoken=; Path=/"), None);
        assert_eq!(token_from_set_cookie("garbage"), None);
    }

    #[test]
    fn test_same_origin() {
        let base = Url::parse("http://127.0.0.1:8000").unwrap();

        let same = Url::parse("http://127.0.0.1:8000/panel/users/data/").unwrap();
        assert!(same_origin(&base, &same));

        let other_port = Url::parse("http://127.0.0.1:9000/panel/").unwrap();
        assert!(!same_origin(&base, &other_port));

        let other_host = Url::parse("http://example.com/panel/").unwrap();
        assert!(!same_origin(&base, &other_host));

        let other_scheme = Url::parse("https://127.0.0.1:8000/panel/").unwrap();
        assert!(!same_origin(&base, &other_scheme));
    }

    #[test]
    fn test_same_origin_default_ports() {
        let base = Url::parse("https://admin.example.com").unwrap();
        let explicit = Url::parse("https://admin.example.com:443/panel/").unwrap();
        assert!(same_origin(&base, &explicit));
    }
}
