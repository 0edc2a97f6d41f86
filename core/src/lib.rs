//! Blocking HTTP client for the JSON comment API.
//!
//! # Overview
//! `HttpRequester` keeps a mutable header map, a decode flag and a legacy
//! include-path flag, and sends GET/POST/PUT (plus PATCH/DELETE) requests
//! through a pluggable `Transport`. The default transport is `ureq`.
//!
//! # Design
//! - The transport returns status line, headers and body as one
//!   `HttpResponse`; the requester only keeps a copy to answer
//!   `last_response_code` / `last_response_headers`.
//! - The status code is read by tokenizing the status line, so any HTTP
//!   version token works.
//! - Methods are an `HttpMethod` enum; `send` / `send_empty` cover any verb.
//! - DTOs are defined independently from the comment-server crate;
//!   integration tests catch schema drift.

pub mod client;
pub mod error;
pub mod http;
pub mod transport;
pub mod types;

pub use client::{HttpRequester, RequesterConfig, ResponseBody};
pub use error::{ApiError, TransportError};
pub use http::{parse_status_code, HeaderMap, HttpMethod, HttpRequest, HttpResponse};
pub use transport::{Transport, UreqTransport};
pub use types::{
    Comment, CommentList, CommentUpdate, CreatedComment, ErrorMessage, MethodError, NewComment,
};
