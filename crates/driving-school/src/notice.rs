use axum::{
    extract::rejection::JsonRejection,
    response::{IntoResponse, Response},
};
use serde::{Deserialize, Serialize};
use serde_json::json;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NoticeKind {
    Success,
    Error,
}

/// Message for the site's toast surface; rendering is left to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Notice {
    pub kind: NoticeKind,
    pub title: String,
    pub message: String,
}

impl Notice {
    pub fn success(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Success,
            title: title.into(),
            message: message.into(),
        }
    }

    pub fn error(title: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind: NoticeKind::Error,
            title: title.into(),
            message: message.into(),
        }
    }
}

/// Maps a body the form endpoints could not read into the same `{notice, error}` payload
/// their validation failures use.
pub(crate) fn rejected_body(rejection: JsonRejection) -> Response {
    let detail = rejection.body_text();
    tracing::debug!(%detail, "rejected form body");
    let payload = json!({
        "notice": Notice::error(
            "Error",
            "We could not read the submitted form. Please check your entries and try again.",
        ),
        "error": detail,
    });
    (rejection.status(), axum::Json(payload)).into_response()
}
