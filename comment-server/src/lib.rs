use axum::{
    body::Bytes,
    extract::RawQuery,
    http::{header, Method, StatusCode},
    response::{IntoResponse, Response},
    routing::any,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};
use tokio::net::TcpListener;

/// Id the fixture pretends to assign to every created comment.
pub const CREATED_COMMENT_ID: i64 = 102;

pub const UNDEFINED_METHOD_MESSAGE: &str = "Request method is undefined";

#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Comment {
    pub id: i64,
    pub name: String,
    pub text: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct CommentList {
    pub method: String,
    pub comments: Vec<Comment>,
}

/// POST echo. `comment` keeps every field the caller sent, with `id` replaced.
#[derive(Debug, Serialize, Deserialize)]
pub struct CreatedComment {
    pub method: String,
    pub comment: Map<String, Value>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorMessage {
    pub message: String,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct MethodError {
    pub method: String,
    pub error: ErrorMessage,
}

/// The two comments every GET returns.
pub fn stored_comments() -> Vec<Comment> {
    vec![
        Comment {
            id: 100,
            name: "Bob".to_string(),
            text: "Hello, World".to_string(),
        },
        Comment {
            id: 101,
            name: "Alice".to_string(),
            text: "Hi, everyone".to_string(),
        },
    ]
}

/// The fixture answers on every path; only the method matters.
pub fn app() -> Router {
    Router::new()
        .route("/", any(handle_comments))
        .fallback(handle_comments)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

async fn handle_comments(method: Method, RawQuery(query): RawQuery, body: Bytes) -> Response {
    tracing::info!(%method, query = query.as_deref().unwrap_or(""), "handling comment request");

    match method {
        Method::GET => Json(CommentList {
            method: method.to_string(),
            comments: stored_comments(),
        })
        .into_response(),
        Method::POST => create_comment(method, &body),
        // The id to update arrives in the query string; nothing is stored.
        Method::PUT => (
            StatusCode::NO_CONTENT,
            [(header::CONTENT_TYPE, "application/json")],
        )
            .into_response(),
        other => Json(MethodError {
            method: other.to_string(),
            error: ErrorMessage {
                message: UNDEFINED_METHOD_MESSAGE.to_string(),
            },
        })
        .into_response(),
    }
}

fn create_comment(method: Method, body: &[u8]) -> Response {
    let mut comment: Map<String, Value> = match serde_json::from_slice(body) {
        Ok(comment) => comment,
        Err(err) => {
            // Undecodable input produces an empty 200, not an error payload.
            tracing::warn!(error = %err, "POST body is not a JSON object");
            return StatusCode::OK.into_response();
        }
    };
    comment.insert("id".to_string(), Value::from(CREATED_COMMENT_ID));

    (
        StatusCode::CREATED,
        Json(CreatedComment {
            method: method.to_string(),
            comment,
        }),
    )
        .into_response()
}
