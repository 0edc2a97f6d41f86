//! The transport seam: one call that turns an `HttpRequest` into an
//! `HttpResponse`.
//!
//! `UreqTransport` is the blocking network implementation. Tests swap in
//! their own `Transport` to observe requests without a server.

use ureq::http::Response;
use ureq::typestate::{WithBody, WithoutBody};
use ureq::{Agent, Body, RequestBuilder};

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Executes a single HTTP exchange.
///
/// Implementations return every response they receive as data, whatever its
/// status. `Err` means no response was obtained at all.
pub trait Transport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError>;
}

impl<T: Transport + ?Sized> Transport for Box<T> {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        (**self).execute(request)
    }
}

/// Blocking transport backed by a `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqTransport {
    agent: Agent,
}

impl UreqTransport {
    pub fn new() -> Self {
        // 4xx/5xx come back as responses so the status line stays observable.
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .build()
            .new_agent();
        Self { agent }
    }
}

impl Default for UreqTransport {
    fn default() -> Self {
        Self::new()
    }
}

impl Transport for UreqTransport {
    fn execute(&self, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
        // Include-path lookup only applies to local resources, never to URLs.
        tracing::trace!(
            use_include_path = request.use_include_path,
            "include path flag ignored for network URLs"
        );

        let url = request.url.as_str();
        let mut response = match request.method {
            HttpMethod::Get => call_without_body(self.agent.get(url), request)?,
            HttpMethod::Delete => call_without_body(self.agent.delete(url), request)?,
            HttpMethod::Post => send_with_body(self.agent.post(url), request)?,
            HttpMethod::Put => send_with_body(self.agent.put(url), request)?,
            HttpMethod::Patch => send_with_body(self.agent.patch(url), request)?,
        };

        let status = response.status();
        let mut headers = Vec::with_capacity(response.headers().len() + 1);
        headers.push(format!(
            "{:?} {} {}",
            response.version(),
            status.as_u16(),
            status.canonical_reason().unwrap_or("")
        ));
        for (name, value) in response.headers() {
            headers.push(format!(
                "{}: {}",
                name.as_str(),
                String::from_utf8_lossy(value.as_bytes())
            ));
        }

        // A response arrived, so keep it even when its body cannot be read.
        let body = match response.body_mut().read_to_vec() {
            Ok(bytes) => Some(String::from_utf8_lossy(&bytes).into_owned()),
            Err(err) => {
                tracing::warn!(error = %err, "response body could not be read");
                None
            }
        };

        Ok(HttpResponse { headers, body })
    }
}

/// Split a `"name:value"` wire line. Leading whitespace of the value is
/// dropped so `"name: value"` is accepted too.
fn split_wire_line(line: &str) -> Result<(&str, &str), TransportError> {
    let (name, value) = line
        .split_once(':')
        .ok_or_else(|| TransportError::InvalidHeader(line.to_string()))?;
    if name.is_empty() {
        return Err(TransportError::InvalidHeader(line.to_string()));
    }
    Ok((name, value.trim_start()))
}

fn apply_headers<B>(
    mut builder: RequestBuilder<B>,
    lines: &[String],
) -> Result<RequestBuilder<B>, TransportError> {
    for line in lines {
        let (name, value) = split_wire_line(line)?;
        builder = builder.header(name, value);
    }
    Ok(builder)
}

fn call_without_body(
    builder: RequestBuilder<WithoutBody>,
    request: &HttpRequest,
) -> Result<Response<Body>, TransportError> {
    if request.body.is_some() {
        tracing::debug!(method = %request.method, "dropping body for bodyless method");
    }
    let builder = apply_headers(builder, &request.headers)?;
    Ok(builder.call()?)
}

fn send_with_body(
    builder: RequestBuilder<WithBody>,
    request: &HttpRequest,
) -> Result<Response<Body>, TransportError> {
    let builder = apply_headers(builder, &request.headers)?;
    let response = match request.body.as_deref() {
        Some(body) => builder.send(body.as_bytes())?,
        None => builder.send_empty()?,
    };
    Ok(response)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_wire_line_without_space() {
        let (name, value) = split_wire_line("Content-Type:application/json").unwrap();
        assert_eq!(name, "Content-Type");
        assert_eq!(value, "application/json");
    }

    #[test]
    fn split_wire_line_keeps_colons_in_value() {
        let (name, value) = split_wire_line("Referer: http://localhost:3000/").unwrap();
        assert_eq!(name, "Referer");
        assert_eq!(value, "http://localhost:3000/");
    }

    #[test]
    fn split_wire_line_splits_at_first_colon_of_key() {
        let (name, value) = split_wire_line("A:B:v").unwrap();
        assert_eq!(name, "A");
        assert_eq!(value, "B:v");
    }

    #[test]
    fn split_wire_line_allows_empty_value() {
        let (name, value) = split_wire_line("X-Empty:").unwrap();
        assert_eq!(name, "X-Empty");
        assert_eq!(value, "");
    }

    #[test]
    fn split_wire_line_rejects_missing_colon() {
        let err = split_wire_line("no colon here").unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader(_)));
    }

    #[test]
    fn split_wire_line_rejects_empty_name() {
        let err = split_wire_line(":value").unwrap_err();
        assert!(matches!(err, TransportError::InvalidHeader(_)));
    }

    #[test]
    fn unreachable_host_is_a_transport_error() {
        let request = HttpRequest {
            method: HttpMethod::Get,
            url: "http://127.0.0.1:1/".to_string(),
            headers: Vec::new(),
            body: None,
            use_include_path: false,
        };
        let err = UreqTransport::new().execute(&request).unwrap_err();
        assert!(matches!(err, TransportError::Request(_)));
    }
}
