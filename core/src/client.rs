//! Blocking HTTP requester for the comment API.
//!
//! # Design
//! `HttpRequester` owns a header map, two flags and a `Transport`. Each
//! `send_*` call builds an `HttpRequest`, hands it to the transport, and
//! keeps the returned header lines so `last_response_code` can report on
//! the most recent exchange. Callers that want per-call metadata instead
//! use `build_request` + `execute`, which never touch instance state.

use serde::de::DeserializeOwned;
use serde::Serialize;
use serde_json::Value;

use crate::error::{ApiError, TransportError};
use crate::http::{parse_status_code, HeaderMap, HttpMethod, HttpRequest, HttpResponse};
use crate::transport::{Transport, UreqTransport};

/// Header map and flags a requester starts from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequesterConfig {
    pub headers: HeaderMap,
    pub decode_responses: bool,
    pub use_include_path: bool,
}

impl Default for RequesterConfig {
    fn default() -> Self {
        let mut headers = HeaderMap::new();
        headers.set("Content-Type", "application/json");
        Self {
            headers,
            decode_responses: true,
            use_include_path: false,
        }
    }
}

/// A response body as handed to the caller.
#[derive(Debug, Clone, PartialEq)]
pub enum ResponseBody {
    /// Body text exactly as received (decoding disabled).
    Raw(String),
    /// Body parsed as JSON. An empty body decodes to `Value::Null`.
    Decoded(Value),
}

impl ResponseBody {
    pub fn as_raw(&self) -> Option<&str> {
        match self {
            ResponseBody::Raw(text) => Some(text),
            ResponseBody::Decoded(_) => None,
        }
    }

    pub fn as_decoded(&self) -> Option<&Value> {
        match self {
            ResponseBody::Raw(_) => None,
            ResponseBody::Decoded(value) => Some(value),
        }
    }

    /// Convert into a typed payload, whichever form the body is in.
    pub fn json<T: DeserializeOwned>(self) -> Result<T, ApiError> {
        match self {
            ResponseBody::Raw(text) => serde_json::from_str(&text),
            ResponseBody::Decoded(value) => serde_json::from_value(value),
        }
        .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}

/// Synchronous requester with a mutable header map.
///
/// `send_*` return `Ok(None)` when the transport fails or the server answers
/// with an error status; `last_response_code` tells the two apart.
#[derive(Debug)]
pub struct HttpRequester<T = UreqTransport> {
    headers: HeaderMap,
    decode_responses: bool,
    use_include_path: bool,
    transport: T,
    last_response_headers: Vec<String>,
}

impl HttpRequester<UreqTransport> {
    pub fn new() -> Self {
        Self::with_transport(UreqTransport::new())
    }
}

impl Default for HttpRequester<UreqTransport> {
    fn default() -> Self {
        Self::new()
    }
}

impl<T: Transport> HttpRequester<T> {
    pub fn with_transport(transport: T) -> Self {
        Self::with_config(RequesterConfig::default(), transport)
    }

    pub fn with_config(config: RequesterConfig, transport: T) -> Self {
        Self {
            headers: config.headers,
            decode_responses: config.decode_responses,
            use_include_path: config.use_include_path,
            transport,
            last_response_headers: Vec::new(),
        }
    }

    pub fn transport(&self) -> &T {
        &self.transport
    }

    /// Stored as given. An empty key or one the transport cannot send makes
    /// every following `send_*` fail as a transport error (`Ok(None)`, no
    /// last response code) until the header is deleted.
    pub fn set_header(&mut self, key: &str, value: &str) {
        self.headers.set(key, value);
    }

    pub fn delete_header(&mut self, key: &str) {
        self.headers.remove(key);
    }

    pub fn header(&self, key: &str) -> Option<&str> {
        self.headers.get(key)
    }

    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }

    pub fn set_decode_responses(&mut self, value: bool) {
        self.decode_responses = value;
    }

    pub fn is_decoding_responses(&self) -> bool {
        self.decode_responses
    }

    pub fn set_use_include_path(&mut self, value: bool) {
        self.use_include_path = value;
    }

    pub fn is_using_include_path(&self) -> bool {
        self.use_include_path
    }

    /// Raw header lines of the last exchange, status line first. Empty
    /// before the first request and after a transport failure.
    pub fn last_response_headers(&self) -> &[String] {
        &self.last_response_headers
    }

    pub fn last_response_code(&self) -> Option<u16> {
        self.last_response_headers
            .first()
            .and_then(|line| parse_status_code(line))
    }

    pub fn build_request(
        &self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
    ) -> HttpRequest {
        HttpRequest {
            method,
            url: url.to_string(),
            headers: self.headers.wire_lines(),
            body,
            use_include_path: self.use_include_path,
        }
    }

    /// Run one exchange without recording it.
    pub fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        self.transport.execute(request)
    }

    pub fn send_get(&mut self, url: &str) -> Result<Option<ResponseBody>, ApiError> {
        self.send_empty(HttpMethod::Get, url)
    }

    pub fn send_post<B: Serialize + ?Sized>(
        &mut self,
        url: &str,
        body: &B,
    ) -> Result<Option<ResponseBody>, ApiError> {
        self.send(HttpMethod::Post, url, body)
    }

    pub fn send_put<B: Serialize + ?Sized>(
        &mut self,
        url: &str,
        body: &B,
    ) -> Result<Option<ResponseBody>, ApiError> {
        self.send(HttpMethod::Put, url, body)
    }

    pub fn send_patch<B: Serialize + ?Sized>(
        &mut self,
        url: &str,
        body: &B,
    ) -> Result<Option<ResponseBody>, ApiError> {
        self.send(HttpMethod::Patch, url, body)
    }

    pub fn send_delete(&mut self, url: &str) -> Result<Option<ResponseBody>, ApiError> {
        self.send_empty(HttpMethod::Delete, url)
    }

    /// Serialize `body` to JSON and send it with `method`.
    pub fn send<B: Serialize + ?Sized>(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: &B,
    ) -> Result<Option<ResponseBody>, ApiError> {
        let body =
            serde_json::to_string(body).map_err(|e| ApiError::Serialization(e.to_string()))?;
        self.dispatch(method, url, Some(body))
    }

    pub fn send_empty(
        &mut self,
        method: HttpMethod,
        url: &str,
    ) -> Result<Option<ResponseBody>, ApiError> {
        self.dispatch(method, url, None)
    }

    fn dispatch(
        &mut self,
        method: HttpMethod,
        url: &str,
        body: Option<String>,
    ) -> Result<Option<ResponseBody>, ApiError> {
        let request = self.build_request(method, url, body);
        tracing::debug!(%method, url, headers = request.headers.len(), "sending request");

        let response = match self.transport.execute(&request) {
            Ok(response) => response,
            Err(err) => {
                tracing::warn!(%method, url, error = %err, "request failed");
                self.last_response_headers.clear();
                return Ok(None);
            }
        };

        let status = response.status_code();
        tracing::debug!(%method, url, status, "received response");
        self.last_response_headers = response.headers;

        if let Some(code) = status.filter(|code| *code >= 400) {
            tracing::warn!(%method, url, status = code, "server answered with an error status");
            return Ok(None);
        }

        match response.body {
            Some(text) => self.read_body(text).map(Some),
            None => Ok(None),
        }
    }

    fn read_body(&self, text: String) -> Result<ResponseBody, ApiError> {
        if !self.decode_responses {
            return Ok(ResponseBody::Raw(text));
        }
        if text.trim().is_empty() {
            return Ok(ResponseBody::Decoded(Value::Null));
        }
        serde_json::from_str(&text)
            .map(ResponseBody::Decoded)
            .map_err(|e| ApiError::Deserialization(e.to_string()))
    }
}
