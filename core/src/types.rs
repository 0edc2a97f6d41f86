//! Domain DTOs for the comment API.
//!
//! # Design
//! These types mirror the fixture server's payloads but are defined
//! independently; the integration tests catch any drift between the two.

use serde::{Deserialize, Serialize};

/// A stored comment.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub text: String,
}

/// POST payload. `id` is sent as `null`; the server assigns one.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct NewComment {
    pub id: Option<i64>,
    pub name: String,
    pub text: String,
}

impl NewComment {
    pub fn new(name: &str, text: &str) -> Self {
        Self {
            id: None,
            name: name.to_string(),
            text: text.to_string(),
        }
    }
}

/// PUT payload. The target id travels in the query string.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentUpdate {
    pub name: String,
    pub text: String,
}

/// GET response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CommentList {
    pub method: String,
    pub comments: Vec<Comment>,
}

/// POST response envelope.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct CreatedComment {
    pub method: String,
    pub comment: Comment,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ErrorMessage {
    pub message: String,
}

/// Returned for any method the server does not handle.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MethodError {
    pub method: String,
    pub error: ErrorMessage,
}
