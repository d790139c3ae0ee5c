//! Response cookie capture
//!
//! Frappe answers a session login with several cookies (`sid`, `user_id`,
//! `full_name`, `system_user`, `user_image`). Callers that cannot rely on a
//! cookie jar keep them individually.

use std::collections::BTreeMap;

use reqwest::header::HeaderMap;
use reqwest::header::SET_COOKIE;

/// Cookies captured from a response, keyed by name.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SessionCookies {
    values: BTreeMap<String, String>,
}

impl SessionCookies {
    /// Creates an empty cookie set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Collects every `Set-Cookie` header of a response.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let mut cookies = Self::new();
        for value in headers.get_all(SET_COOKIE) {
            if let Some((name, value)) = value.to_str().ok().and_then(parse_set_cookie) {
                cookies.values.insert(name, value);
            }
        }
        cookies
    }

    /// Returns a cookie value by name.
    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    /// Inserts or replaces a cookie.
    pub fn insert(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    /// The `sid` session cookie, unless it is the guest placeholder.
    pub fn sid(&self) -> Option<&str> {
        self.get("sid").filter(|sid| !sid.is_empty() && *sid != "Guest")
    }

    /// Iterates over all captured cookies.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Number of captured cookies.
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns `true` if nothing was captured.
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}

impl FromIterator<(String, String)> for SessionCookies {
    fn from_iter<I: IntoIterator<Item = (String, String)>>(iter: I) -> Self {
        Self {
            values: iter.into_iter().collect(),
        }
    }
}

/// Parses the `name=value` pair at the front of a `Set-Cookie` header.
///
/// Values are percent-decoded; Frappe encodes `full_name` that way.
pub(crate) fn parse_set_cookie(header: &str) -> Option<(String, String)> {
    let pair = header.split(';').next()?.trim();
    let (name, value) = pair.split_once('=')?;
    let name = name.trim();
    if name.is_empty() {
        return None;
    }
    let value = value.trim().trim_matches('"');
    let value = urlencoding::decode(value)
        .map(|v| v.into_owned())
        .unwrap_or_else(|_| value.to_string());
    Some((name.to_string(), value))
}

#[cfg(test)]
mod tests {
    use reqwest::header::HeaderValue;

    use super::*;

    #[test]
    fn test_parse_set_cookie() {
        assert_eq!(
            parse_set_cookie("sid=abc123; Expires=Wed, 21 Oct 2026 07:28:00 GMT; Path=/; HttpOnly"),
            Some(("sid".to_string(), "abc123".to_string()))
        );
        assert_eq!(
            parse_set_cookie("full_name=Ahmed%20Ali; Path=/"),
            Some(("full_name".to_string(), "Ahmed Ali".to_string()))
        );
        assert_eq!(parse_set_cookie("=nothing"), None);
        assert_eq!(parse_set_cookie("garbage"), None);
    }

    #[test]
    fn test_from_headers_collects_all() {
        let mut headers = HeaderMap::new();
        headers.append(SET_COOKIE, HeaderValue::from_static("sid=s1; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("user_id=admin%40qswr.sa; Path=/"));
        headers.append(SET_COOKIE, HeaderValue::from_static("system_user=yes; Path=/"));

        let cookies = SessionCookies::from_headers(&headers);
        assert_eq!(cookies.len(), 3);
        assert_eq!(cookies.sid(), Some("s1"));
        assert_eq!(cookies.get("user_id"), Some("admin@qswr.sa"));
    }

    #[test]
    fn test_guest_sid_is_ignored() {
        let mut cookies = SessionCookies::new();
        cookies.insert("sid", "Guest");
        assert_eq!(cookies.sid(), None);
    }
}
