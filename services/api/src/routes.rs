use crate::infra::AppState;
use axum::http::{header, StatusCode};
use axum::response::IntoResponse;
use axum::{Extension, Json};
use driving_school::registration::{
    registration_router, PaymentGateway, RegistrationFormProcessor,
};
use driving_school::site::{site_router, ContactDesk, ContactInbox, SchoolProfile};
use serde_json::json;
use std::sync::Arc;

pub(crate) fn with_site_routes<G, I>(
    processor: Arc<RegistrationFormProcessor<G>>,
    desk: Arc<ContactDesk<I>>,
    profile: Arc<SchoolProfile>,
) -> axum::Router
where
    G: PaymentGateway + 'static,
    I: ContactInbox + 'static,
{
    registration_router(processor)
        .merge(site_router(desk, profile))
        .route("/health", axum::routing::get(healthcheck))
        .route("/ready", axum::routing::get(readiness_endpoint))
        .route("/metrics", axum::routing::get(metrics_endpoint))
}

pub(crate) async fn healthcheck() -> Json<serde_json::Value> {
    Json(json!({ "status": "ok" }))
}

pub(crate) async fn readiness_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    let ready = state.readiness.load(std::sync::atomic::Ordering::Relaxed);
    let status = if ready {
        StatusCode::OK
    } else {
        StatusCode::SERVICE_UNAVAILABLE
    };

    let payload = if ready {
        json!({ "status": "ready" })
    } else {
        json!({ "status": "initializing" })
    };

    (status, Json(payload))
}

pub(crate) async fn metrics_endpoint(Extension(state): Extension<AppState>) -> impl IntoResponse {
    (
        StatusCode::OK,
        [(header::CONTENT_TYPE, "text/plain; version=0.0.4")],
        state.metrics.render(),
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infra::InMemoryContactInbox;
    use axum::body::Body;
    use axum::http::Request;
    use driving_school::registration::{CourseCatalog, SimulatedGateway};
    use metrics_exporter_prometheus::PrometheusBuilder;
    use std::sync::atomic::{AtomicBool, Ordering};
    use std::time::Duration;
    use tower::ServiceExt;

    fn app(ready: bool) -> (axum::Router, InMemoryContactInbox) {
        let processor = Arc::new(RegistrationFormProcessor::new(
            Arc::new(CourseCatalog::standard()),
            Arc::new(SimulatedGateway::new(Duration::ZERO)),
        ));
        let inbox = InMemoryContactInbox::default();
        let desk = Arc::new(ContactDesk::new(Arc::new(inbox.clone())));
        let state = AppState {
            readiness: Arc::new(AtomicBool::new(ready)),
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let router = with_site_routes(processor, desk, Arc::new(SchoolProfile::standard()))
            .layer(Extension(state));
        (router, inbox)
    }

    #[tokio::test]
    async fn healthcheck_reports_ok() {
        let Json(body) = healthcheck().await;
        assert_eq!(body, json!({ "status": "ok" }));
    }

    #[tokio::test]
    async fn readiness_tracks_flag() {
        let (router, _) = app(false);
        let response = router
            .oneshot(Request::get("/ready").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);

        let flag = Arc::new(AtomicBool::new(false));
        flag.store(true, Ordering::Release);
        let state = AppState {
            readiness: flag,
            metrics: Arc::new(PrometheusBuilder::new().build_recorder().handle()),
        };
        let response = readiness_endpoint(Extension(state)).await.into_response();
        assert_eq!(response.status(), StatusCode::OK);
    }

    #[tokio::test]
    async fn site_routes_are_mounted_alongside_registration() {
        let (router, inbox) = app(true);

        let courses = router
            .clone()
            .oneshot(Request::get("/api/v1/courses").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(courses.status(), StatusCode::OK);

        let contact = router
            .oneshot(
                Request::post("/api/v1/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(
                        json!({
                            "name": "Morgan Lee",
                            "email": "morgan@example.com",
                            "phone": "(703) 555-0123",
                            "subject": "Gift certificate",
                            "message": "Can I buy lessons for my son?",
                        })
                        .to_string(),
                    ))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(contact.status(), StatusCode::ACCEPTED);
        assert_eq!(inbox.messages().len(), 1);
    }
}
