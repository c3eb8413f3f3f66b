use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde::Deserialize;
use serde_json::json;

use super::catalog::CourseKey;
use super::domain::{RegistrationRequest, SessionCount};
use super::gateway::PaymentGateway;
use super::service::{RegistrationError, RegistrationForm, RegistrationFormProcessor};
use crate::notice::rejected_body;

/// Router builder exposing the course catalog, quotes, and registration intake.
pub fn registration_router<G>(processor: Arc<RegistrationFormProcessor<G>>) -> Router
where
    G: PaymentGateway + 'static,
{
    Router::new()
        .route("/api/v1/courses", get(catalog_handler::<G>))
        .route("/api/v1/courses/quote", get(quote_handler::<G>))
        .route("/api/v1/registrations", post(register_handler::<G>))
        .with_state(processor)
}

#[derive(Debug, Deserialize)]
pub(crate) struct QuoteParams {
    pub(crate) course: String,
    #[serde(default)]
    pub(crate) sessions: Option<u32>,
}

pub(crate) async fn catalog_handler<G>(
    State(processor): State<Arc<RegistrationFormProcessor<G>>>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    let courses = processor.catalog().entries().to_vec();
    (StatusCode::OK, axum::Json(json!({ "courses": courses }))).into_response()
}

pub(crate) async fn quote_handler<G>(
    State(processor): State<Arc<RegistrationFormProcessor<G>>>,
    Query(params): Query<QuoteParams>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    let sessions = match params.sessions.map(SessionCount::try_from).transpose() {
        Ok(sessions) => sessions.unwrap_or_default(),
        Err(message) => {
            return (StatusCode::BAD_REQUEST, axum::Json(json!({ "error": message })))
                .into_response();
        }
    };

    let quote = CourseKey::from_code(&params.course)
        .and_then(|course| processor.quote(course, sessions));
    match quote {
        Some(quote) => (StatusCode::OK, axum::Json(quote)).into_response(),
        None => {
            let payload = json!({
                "error": format!("unknown course '{}'", params.course),
            });
            (StatusCode::NOT_FOUND, axum::Json(payload)).into_response()
        }
    }
}

pub(crate) async fn register_handler<G>(
    State(processor): State<Arc<RegistrationFormProcessor<G>>>,
    payload: Result<axum::Json<RegistrationRequest>, JsonRejection>,
) -> Response
where
    G: PaymentGateway + 'static,
{
    let request = match payload {
        Ok(axum::Json(request)) => request,
        Err(rejection) => return rejected_body(rejection),
    };

    let mut form = RegistrationForm::new(request);
    match processor.submit(&mut form).await {
        Ok(confirmation) => {
            let payload = json!({
                "notice": confirmation.notice(),
                "confirmation": confirmation,
            });
            (StatusCode::CREATED, axum::Json(payload)).into_response()
        }
        Err(error) => {
            let status = match error {
                RegistrationError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                RegistrationError::Submission(_) => StatusCode::BAD_GATEWAY,
            };
            let payload = json!({
                "notice": error.notice(),
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}
