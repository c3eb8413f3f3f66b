use std::sync::Arc;

use chrono::{Local, NaiveDate};
use serde::Serialize;

use super::catalog::{CourseCatalog, CourseEntry, CourseKey};
use super::domain::{CourseTotal, RegistrationRequest, SessionCount};
use super::gateway::{GatewayError, Order, PaymentGateway};
use super::validation::{self, ValidationError};
use crate::notice::Notice;

/// Source of "today" for age checks.
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

#[derive(Debug, Clone, Copy, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// Where a form sits in its submit cycle.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum FormPhase {
    #[default]
    Idle,
    Validating,
    Submitting,
}

/// Terminal result of the most recent submit; the form is back to `Idle` once one is recorded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormOutcome {
    Rejected(ValidationError),
    Failed(SubmissionError),
    Confirmed(Confirmation),
}

/// Registration form state owned by a single caller.
#[derive(Debug, Clone, Default)]
pub struct RegistrationForm {
    request: RegistrationRequest,
    phase: FormPhase,
    last_outcome: Option<FormOutcome>,
}

impl RegistrationForm {
    pub fn new(request: RegistrationRequest) -> Self {
        Self {
            request,
            phase: FormPhase::Idle,
            last_outcome: None,
        }
    }

    pub fn request(&self) -> &RegistrationRequest {
        &self.request
    }

    pub fn request_mut(&mut self) -> &mut RegistrationRequest {
        &mut self.request
    }

    pub fn phase(&self) -> FormPhase {
        self.phase
    }

    pub fn last_outcome(&self) -> Option<&FormOutcome> {
        self.last_outcome.as_ref()
    }

    /// Replace the entered data with an empty form.
    pub fn reset(&mut self) {
        self.request = RegistrationRequest::default();
    }

    fn enter(&mut self, phase: FormPhase) {
        tracing::debug!(from = ?self.phase, to = ?phase, "registration form transition");
        self.phase = phase;
    }

    fn finish(&mut self, outcome: FormOutcome) {
        self.enter(FormPhase::Idle);
        self.last_outcome = Some(outcome);
    }
}

/// Successful registration acknowledgement.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Confirmation {
    pub reference: String,
    pub email: String,
    pub course: CourseKey,
    pub total: CourseTotal,
    pub message: String,
}

impl Confirmation {
    pub fn notice(&self) -> Notice {
        Notice::success("Registration Successful!", self.message.clone())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("There was an error processing your payment. Please try again.")]
pub struct SubmissionError {
    #[from]
    pub cause: GatewayError,
}

/// Error raised by the registration processor.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistrationError {
    #[error(transparent)]
    Validation(#[from] ValidationError),
    #[error(transparent)]
    Submission(#[from] SubmissionError),
}

impl RegistrationError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(error) => Notice::error("Error", error.to_string()),
            Self::Submission(error) => Notice::error("Payment Failed", error.to_string()),
        }
    }
}

/// Price breakdown for a single course selection.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Quote {
    pub course: CourseEntry,
    pub sessions: u32,
    pub total: CourseTotal,
    pub display_total: String,
    pub submit_label: &'static str,
}

/// Prices, validates, and submits registration forms.
pub struct RegistrationFormProcessor<G> {
    catalog: Arc<CourseCatalog>,
    gateway: Arc<G>,
    clock: Arc<dyn Clock>,
}

impl<G> RegistrationFormProcessor<G>
where
    G: PaymentGateway + 'static,
{
    pub fn new(catalog: Arc<CourseCatalog>, gateway: Arc<G>) -> Self {
        Self::with_clock(catalog, gateway, Arc::new(SystemClock))
    }

    pub fn with_clock(
        catalog: Arc<CourseCatalog>,
        gateway: Arc<G>,
        clock: Arc<dyn Clock>,
    ) -> Self {
        Self {
            catalog,
            gateway,
            clock,
        }
    }

    pub fn catalog(&self) -> &CourseCatalog {
        &self.catalog
    }

    pub fn compute_total(&self, course: Option<CourseKey>, sessions: SessionCount) -> CourseTotal {
        self.catalog.compute_total(course, sessions)
    }

    /// Quote a course, or `None` when the key is not in the catalog.
    pub fn quote(&self, course: CourseKey, sessions: SessionCount) -> Option<Quote> {
        let entry = self.catalog.get(course)?.clone();
        let total = self.compute_total(Some(course), sessions);
        let sessions = if entry.is_per_session() {
            sessions.count()
        } else {
            1
        };

        Some(Quote {
            course: entry,
            sessions,
            total,
            display_total: total.to_string(),
            submit_label: total.submit_label(),
        })
    }

    pub fn validate(&self, request: &RegistrationRequest) -> Result<(), ValidationError> {
        validation::validate(&self.catalog, request, self.clock.today())
    }

    /// Validate the form, charge the gateway, and reset the form on success.
    ///
    /// Failed attempts leave the entered data in place so the student can correct and retry.
    pub async fn submit(
        &self,
        form: &mut RegistrationForm,
    ) -> Result<Confirmation, RegistrationError> {
        form.enter(FormPhase::Validating);
        let prepared = self.validate(&form.request).and_then(|()| {
            let request = &form.request;
            let total = self.compute_total(request.course, request.number_of_sessions);
            self.order_for(request, total).map(|order| (order, total))
        });
        let (order, total) = match prepared {
            Ok(prepared) => prepared,
            Err(error) => {
                tracing::warn!(%error, "registration rejected");
                form.finish(FormOutcome::Rejected(error.clone()));
                return Err(error.into());
            }
        };

        form.enter(FormPhase::Submitting);
        let receipt = match self.gateway.charge(&order).await {
            Ok(receipt) => receipt,
            Err(cause) => {
                let error = SubmissionError::from(cause);
                tracing::warn!(
                    course = order.course.code(),
                    cause = %error.cause,
                    "registration payment failed"
                );
                form.finish(FormOutcome::Failed(error.clone()));
                return Err(error.into());
            }
        };

        let confirmation = Confirmation {
            reference: receipt.reference,
            email: order.email.clone(),
            course: order.course,
            total,
            message: format!(
                "Thank you for registering. We've sent a confirmation email to {}",
                order.email
            ),
        };
        tracing::info!(
            course = confirmation.course.code(),
            reference = %confirmation.reference,
            total = %confirmation.total,
            "registration confirmed"
        );

        form.reset();
        form.finish(FormOutcome::Confirmed(confirmation.clone()));
        Ok(confirmation)
    }

    fn order_for(
        &self,
        request: &RegistrationRequest,
        total: CourseTotal,
    ) -> Result<Order, ValidationError> {
        let course = request.course.ok_or(ValidationError::MissingCourse)?;
        let course_name = self
            .catalog
            .get(course)
            .map(|entry| entry.name.clone())
            .unwrap_or_else(|| course.code().to_string());

        Ok(Order {
            course,
            course_name,
            amount: total.amount(),
            payer_name: request.full_name(),
            email: request.email.clone(),
            phone: request.phone.clone(),
            comments: request.comments.clone(),
            card: total.requires_payment().then(|| request.card()),
        })
    }
}
