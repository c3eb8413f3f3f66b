use std::sync::{Arc, Mutex};

use axum::response::Response;
use chrono::NaiveDate;
use serde_json::Value;

use crate::registration::catalog::{CourseCatalog, CourseEntry, CourseKey, PricingBasis};
use crate::registration::domain::{RegistrationRequest, SessionCount};
use crate::registration::gateway::{ChargeReceipt, GatewayError, Order, PaymentGateway};
use crate::registration::service::{FixedClock, RegistrationFormProcessor};

pub(super) fn today() -> NaiveDate {
    NaiveDate::from_ymd_opt(2026, 10, 16).expect("valid date")
}

pub(super) fn born_in(year: i32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, 12, 31).expect("valid date")
}

pub(super) fn valid_request() -> RegistrationRequest {
    RegistrationRequest {
        first_name: "Jordan".to_string(),
        last_name: "Rivera".to_string(),
        email: "jordan.rivera@example.com".to_string(),
        phone: "(703) 982-1400".to_string(),
        date_of_birth: Some(born_in(2009)),
        course: Some(CourseKey::DrivingLessons),
        number_of_sessions: SessionCount::Five,
        comments: "Weekend mornings preferred".to_string(),
        card_name: "Jordan Rivera".to_string(),
        card_number: "4111 1111 1111 1111".to_string(),
        expiry: "09/28".to_string(),
        cvv: "123".to_string(),
    }
}

/// Catalog whose road test price is unlisted, reaching the "contact us" path.
pub(super) fn contact_us_catalog() -> CourseCatalog {
    let entries = CourseCatalog::standard()
        .entries()
        .iter()
        .cloned()
        .map(|entry| match entry.key {
            CourseKey::RoadTest => CourseEntry {
                unit_price: None,
                ..entry
            },
            _ => entry,
        })
        .collect();
    CourseCatalog::new(entries)
}

pub(super) fn unlisted_lessons_catalog() -> CourseCatalog {
    CourseCatalog::new(vec![CourseEntry {
        key: CourseKey::DrivingLessons,
        name: "Individual Driving Lessons".to_string(),
        description: "Per hour of instruction".to_string(),
        unit_price: None,
        pricing: PricingBasis::PerSession,
    }])
}

#[derive(Default, Clone)]
pub(super) struct RecordingGateway {
    orders: Arc<Mutex<Vec<Order>>>,
}

impl RecordingGateway {
    pub(super) fn orders(&self) -> Vec<Order> {
        self.orders.lock().expect("gateway mutex poisoned").clone()
    }
}

#[async_trait::async_trait]
impl PaymentGateway for RecordingGateway {
    async fn charge(&self, order: &Order) -> Result<ChargeReceipt, GatewayError> {
        let mut guard = self.orders.lock().expect("gateway mutex poisoned");
        guard.push(order.clone());
        Ok(ChargeReceipt {
            reference: format!("test-{:03}", guard.len()),
        })
    }
}

pub(super) struct DecliningGateway;

#[async_trait::async_trait]
impl PaymentGateway for DecliningGateway {
    async fn charge(&self, _order: &Order) -> Result<ChargeReceipt, GatewayError> {
        Err(GatewayError::Unavailable("connection reset".to_string()))
    }
}

pub(super) fn processor_with<G>(
    catalog: CourseCatalog,
    gateway: Arc<G>,
) -> RegistrationFormProcessor<G>
where
    G: PaymentGateway + 'static,
{
    RegistrationFormProcessor::with_clock(
        Arc::new(catalog),
        gateway,
        Arc::new(FixedClock(today())),
    )
}

pub(super) fn build_processor() -> (
    RegistrationFormProcessor<RecordingGateway>,
    RecordingGateway,
) {
    let gateway = RecordingGateway::default();
    let processor = processor_with(CourseCatalog::standard(), Arc::new(gateway.clone()));
    (processor, gateway)
}

pub(super) async fn read_json_body(response: Response) -> Value {
    let body = axum::body::to_bytes(response.into_body(), 8 * 1024)
        .await
        .expect("read body");
    serde_json::from_slice(&body).expect("json payload")
}
