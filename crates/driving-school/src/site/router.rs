use std::sync::Arc;

use axum::{
    extract::{rejection::JsonRejection, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use serde_json::json;

use super::contact::{ContactDesk, ContactError, ContactInbox, ContactMessage};
use super::profile::SchoolProfile;
use crate::notice::rejected_body;

pub struct SiteState<I> {
    pub desk: Arc<ContactDesk<I>>,
    pub profile: Arc<SchoolProfile>,
}

impl<I> Clone for SiteState<I> {
    fn clone(&self) -> Self {
        Self {
            desk: Arc::clone(&self.desk),
            profile: Arc::clone(&self.profile),
        }
    }
}

/// Router builder for the school profile and contact form.
pub fn site_router<I>(desk: Arc<ContactDesk<I>>, profile: Arc<SchoolProfile>) -> Router
where
    I: ContactInbox + 'static,
{
    Router::new()
        .route("/api/v1/school", get(profile_handler::<I>))
        .route("/api/v1/contact", post(contact_handler::<I>))
        .with_state(SiteState { desk, profile })
}

pub(crate) async fn profile_handler<I>(State(state): State<SiteState<I>>) -> Response
where
    I: ContactInbox + 'static,
{
    (StatusCode::OK, axum::Json(state.profile.as_ref().clone())).into_response()
}

pub(crate) async fn contact_handler<I>(
    State(state): State<SiteState<I>>,
    payload: Result<axum::Json<ContactMessage>, JsonRejection>,
) -> Response
where
    I: ContactInbox + 'static,
{
    let message = match payload {
        Ok(axum::Json(message)) => message,
        Err(rejection) => return rejected_body(rejection),
    };

    match state.desk.submit(message) {
        Ok(notice) => {
            (StatusCode::ACCEPTED, axum::Json(json!({ "notice": notice }))).into_response()
        }
        Err(error) => {
            let status = match error {
                ContactError::Validation(_) => StatusCode::UNPROCESSABLE_ENTITY,
                ContactError::Inbox(_) => StatusCode::SERVICE_UNAVAILABLE,
            };
            let payload = json!({
                "notice": error.notice(),
                "error": error.to_string(),
            });
            (status, axum::Json(payload)).into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::site::contact::{ContactValidationError, InboxError};
    use axum::body::Body;
    use axum::http::{header, Request};
    use std::sync::Mutex;
    use tower::ServiceExt;

    #[derive(Default)]
    struct MemoryInbox {
        messages: Mutex<Vec<ContactMessage>>,
    }

    impl ContactInbox for MemoryInbox {
        fn deliver(&self, message: ContactMessage) -> Result<(), InboxError> {
            self.messages
                .lock()
                .expect("inbox mutex poisoned")
                .push(message);
            Ok(())
        }
    }

    struct OfflineInbox;

    impl ContactInbox for OfflineInbox {
        fn deliver(&self, _message: ContactMessage) -> Result<(), InboxError> {
            Err(InboxError::Unavailable("relay offline".to_string()))
        }
    }

    fn message() -> ContactMessage {
        ContactMessage {
            name: "Avery Chen".to_string(),
            email: "avery@example.com".to_string(),
            phone: "(571) 555-0100".to_string(),
            subject: "Road test scheduling".to_string(),
            message: "Do you offer Saturday road tests?".to_string(),
        }
    }

    fn post_contact(message: &ContactMessage) -> Request<Body> {
        Request::post("/api/v1/contact")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(serde_json::to_vec(message).unwrap()))
            .unwrap()
    }

    async fn read_json_body(response: Response) -> serde_json::Value {
        let body = axum::body::to_bytes(response.into_body(), 8 * 1024)
            .await
            .expect("read body");
        serde_json::from_slice(&body).expect("json payload")
    }

    #[test]
    fn contact_validation_stops_at_first_missing_field() {
        let mut incomplete = message();
        incomplete.subject.clear();
        incomplete.message = "  ".to_string();
        assert_eq!(
            incomplete.validate(),
            Err(ContactValidationError::MissingSubject)
        );

        let blank = ContactMessage::default();
        assert_eq!(blank.validate(), Err(ContactValidationError::MissingName));
    }

    #[test]
    fn contact_phone_is_required_before_email() {
        let mut no_phone = message();
        no_phone.phone = "   ".to_string();
        no_phone.email = "not-an-email".to_string();
        assert_eq!(no_phone.validate(), Err(ContactValidationError::MissingPhone));
        assert_eq!(
            ContactError::Validation(ContactValidationError::MissingPhone)
                .notice()
                .message,
            "Please enter your phone number"
        );
    }

    #[test]
    fn desk_delivers_valid_messages() {
        let inbox = Arc::new(MemoryInbox::default());
        let desk = ContactDesk::new(inbox.clone());

        let notice = desk.submit(message()).expect("message accepted");
        assert_eq!(notice.title, "Message Sent!");
        assert_eq!(inbox.messages.lock().unwrap().len(), 1);

        let mut invalid = message();
        invalid.email = "avery@example".to_string();
        assert_eq!(
            desk.submit(invalid),
            Err(ContactError::Validation(ContactValidationError::InvalidEmail))
        );
        assert_eq!(inbox.messages.lock().unwrap().len(), 1);
    }

    #[tokio::test]
    async fn contact_route_accepts_and_rejects() {
        let desk = Arc::new(ContactDesk::new(Arc::new(MemoryInbox::default())));
        let router = site_router(desk, Arc::new(SchoolProfile::standard()));

        let accepted = router
            .clone()
            .oneshot(post_contact(&message()))
            .await
            .expect("route executes");
        assert_eq!(accepted.status(), StatusCode::ACCEPTED);
        let body = read_json_body(accepted).await;
        assert_eq!(body["notice"]["kind"], "success");

        let mut unnamed = message();
        unnamed.name.clear();
        let rejected = router
            .oneshot(post_contact(&unnamed))
            .await
            .expect("route executes");
        assert_eq!(rejected.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json_body(rejected).await;
        assert_eq!(body["notice"]["message"], "Please enter your name");
    }

    #[tokio::test]
    async fn contact_route_answers_unreadable_bodies_with_a_notice() {
        let inbox = Arc::new(MemoryInbox::default());
        let desk = Arc::new(ContactDesk::new(inbox.clone()));
        let router = site_router(desk, Arc::new(SchoolProfile::standard()));

        let response = router
            .oneshot(
                Request::post("/api/v1/contact")
                    .header(header::CONTENT_TYPE, "application/json")
                    .body(Body::from(r#"{"name": 5}"#))
                    .unwrap(),
            )
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
        let body = read_json_body(response).await;
        assert_eq!(body["notice"]["kind"], "error");
        assert!(body["error"].as_str().is_some());
        assert!(inbox.messages.lock().unwrap().is_empty());
    }

    #[tokio::test]
    async fn contact_route_reports_unavailable_inbox() {
        let desk = Arc::new(ContactDesk::new(Arc::new(OfflineInbox)));
        let router = site_router(desk, Arc::new(SchoolProfile::standard()));

        let response = router
            .oneshot(post_contact(&message()))
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::SERVICE_UNAVAILABLE);
    }

    #[tokio::test]
    async fn school_route_publishes_profile() {
        let desk = Arc::new(ContactDesk::new(Arc::new(MemoryInbox::default())));
        let router = site_router(desk, Arc::new(SchoolProfile::standard()));

        let response = router
            .oneshot(Request::get("/api/v1/school").body(Body::empty()).unwrap())
            .await
            .expect("route executes");
        assert_eq!(response.status(), StatusCode::OK);
        let body = read_json_body(response).await;
        assert_eq!(body["phone"], "(703) 982-1400");
        assert_eq!(body["services"].as_array().map(Vec::len), Some(3));
    }
}
