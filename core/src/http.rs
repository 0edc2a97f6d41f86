//! HTTP data types exchanged between the requester and its transport.
//!
//! # Design
//! Requests and responses are plain owned data. The requester builds an
//! `HttpRequest`, a `Transport` turns it into an `HttpResponse`, and the
//! response carries everything about the exchange (status line, headers,
//! body) so no caller has to look anywhere else for it.

use std::fmt;

/// HTTP method for a request.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HttpMethod {
    Get,
    Post,
    Put,
    Patch,
    Delete,
}

impl HttpMethod {
    pub fn as_str(self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
            HttpMethod::Put => "PUT",
            HttpMethod::Patch => "PATCH",
            HttpMethod::Delete => "DELETE",
        }
    }

    /// Whether requests with this method carry a body on the wire.
    pub fn has_body(self) -> bool {
        matches!(self, HttpMethod::Post | HttpMethod::Put | HttpMethod::Patch)
    }
}

impl fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Ordered, case-sensitive header map with unique keys.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeaderMap {
    entries: Vec<(String, String)>,
}

impl HeaderMap {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace. A replaced entry keeps its original position.
    ///
    /// Keys are stored unvalidated. On the wire a line is split at its first
    /// `:`, so a key containing `:` reaches the server as a different name
    /// (`"A:B"` / `"v"` is sent as `A: B:v`), and an empty key makes the
    /// transport reject the request.
    pub fn set(&mut self, key: &str, value: &str) {
        match self.entries.iter_mut().find(|(k, _)| k == key) {
            Some((_, v)) => *v = value.to_string(),
            None => self.entries.push((key.to_string(), value.to_string())),
        }
    }

    pub fn remove(&mut self, key: &str) -> Option<String> {
        let index = self.entries.iter().position(|(k, _)| k == key)?;
        Some(self.entries.remove(index).1)
    }

    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries
            .iter()
            .find(|(k, _)| k == key)
            .map(|(_, v)| v.as_str())
    }

    pub fn contains_key(&self, key: &str) -> bool {
        self.get(key).is_some()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    /// Serialize to `"key:value"` lines in map order.
    pub fn wire_lines(&self) -> Vec<String> {
        self.entries
            .iter()
            .map(|(k, v)| format!("{k}:{v}"))
            .collect()
    }
}

/// An HTTP request described as plain data.
///
/// Built by `HttpRequester::build_request`. `headers` holds wire lines as
/// produced by `HeaderMap::wire_lines`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpRequest {
    pub method: HttpMethod,
    pub url: String,
    pub headers: Vec<String>,
    pub body: Option<String>,
    /// Legacy lookup option handed through to the transport untouched.
    pub use_include_path: bool,
}

/// The outcome of one exchange.
///
/// `headers` are raw lines; the first is the status line
/// (`HTTP/<version> <code> <reason>`). `body` is `None` when the exchange
/// produced no usable body.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct HttpResponse {
    pub headers: Vec<String>,
    pub body: Option<String>,
}

impl HttpResponse {
    pub fn status_line(&self) -> Option<&str> {
        self.headers.first().map(String::as_str)
    }

    pub fn status_code(&self) -> Option<u16> {
        self.status_line().and_then(parse_status_code)
    }
}

/// Extract the status code from a status line.
///
/// Tokenizes on whitespace, so the version token may be any length
/// (`HTTP/1.1`, `HTTP/2`). The code must be exactly three ASCII digits.
pub fn parse_status_code(status_line: &str) -> Option<u16> {
    let mut tokens = status_line.split_whitespace();
    let version = tokens.next()?;
    if !version.starts_with("HTTP/") {
        return None;
    }
    let code = tokens.next()?;
    if code.len() != 3 || !code.bytes().all(|b| b.is_ascii_digit()) {
        return None;
    }
    code.parse().ok()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn set_then_get_returns_value() {
        let mut headers = HeaderMap::new();
        headers.set("Authorization", "token");
        assert_eq!(headers.get("Authorization"), Some("token"));
    }

    #[test]
    fn set_existing_key_replaces_in_place() {
        let mut headers = HeaderMap::new();
        headers.set("A", "1");
        headers.set("B", "2");
        headers.set("A", "3");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.wire_lines(), vec!["A:3", "B:2"]);
    }

    #[test]
    fn keys_are_case_sensitive() {
        let mut headers = HeaderMap::new();
        headers.set("Accept", "text/plain");
        headers.set("accept", "application/json");
        assert_eq!(headers.len(), 2);
        assert_eq!(headers.get("ACCEPT"), None);
    }

    #[test]
    fn remove_deletes_entry() {
        let mut headers = HeaderMap::new();
        headers.set("X-Trace", "abc");
        assert_eq!(headers.remove("X-Trace").as_deref(), Some("abc"));
        assert!(headers.get("X-Trace").is_none());
        assert!(headers.remove("X-Trace").is_none());
        assert!(headers.is_empty());
    }

    #[test]
    fn wire_lines_one_per_entry_in_order() {
        let mut headers = HeaderMap::new();
        headers.set("Content-Type", "application/json");
        headers.set("Authorization", "token");
        headers.set("X-Empty", "");

        let lines = headers.wire_lines();
        assert_eq!(lines.len(), headers.len());
        for (line, (key, value)) in lines.iter().zip(headers.iter()) {
            let (k, v) = line.split_once(':').unwrap();
            assert_eq!(k, key);
            assert_eq!(v, value);
        }
    }

    #[test]
    fn parse_status_code_http_1_1() {
        assert_eq!(parse_status_code("HTTP/1.1 200 OK"), Some(200));
        assert_eq!(parse_status_code("HTTP/1.0 204 No Content"), Some(204));
    }

    #[test]
    fn parse_status_code_short_version_token() {
        assert_eq!(parse_status_code("HTTP/2 201 Created"), Some(201));
        assert_eq!(parse_status_code("HTTP/2 404"), Some(404));
    }

    #[test]
    fn parse_status_code_rejects_malformed_lines() {
        assert_eq!(parse_status_code(""), None);
        assert_eq!(parse_status_code("HTTP/1.1"), None);
        assert_eq!(parse_status_code("Content-Type: application/json"), None);
        assert_eq!(parse_status_code("HTTP/1.1 20 OK"), None);
        assert_eq!(parse_status_code("HTTP/1.1 2000 OK"), None);
        assert_eq!(parse_status_code("HTTP/1.1 +20 OK"), None);
    }

    #[test]
    fn response_status_code_uses_first_line() {
        let response = HttpResponse {
            headers: vec![
                "HTTP/1.1 201 Created".to_string(),
                "content-type: application/json".to_string(),
            ],
            body: Some("{}".to_string()),
        };
        assert_eq!(response.status_line(), Some("HTTP/1.1 201 Created"));
        assert_eq!(response.status_code(), Some(201));

        let empty = HttpResponse {
            headers: Vec::new(),
            body: None,
        };
        assert_eq!(empty.status_code(), None);
    }

    #[test]
    fn method_body_and_name() {
        assert!(!HttpMethod::Get.has_body());
        assert!(!HttpMethod::Delete.has_body());
        assert!(HttpMethod::Post.has_body());
        assert!(HttpMethod::Put.has_body());
        assert!(HttpMethod::Patch.has_body());
        assert_eq!(HttpMethod::Patch.to_string(), "PATCH");
    }
}
