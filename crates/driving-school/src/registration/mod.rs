//! Course pricing and registration intake.
//!
//! `RegistrationFormProcessor` prices a course selection against the [`CourseCatalog`],
//! validates the submitted form rule by rule, and hands accepted orders to a
//! [`PaymentGateway`]. The form value is owned by the caller and reset after a confirmed
//! registration.

pub mod catalog;
pub mod domain;
pub mod gateway;
pub mod router;
pub mod service;
pub mod validation;

#[cfg(test)]
mod tests;

pub use catalog::{CourseCatalog, CourseEntry, CourseKey, PricingBasis};
pub use domain::{CardDetails, CourseTotal, RegistrationRequest, SessionCount};
pub use gateway::{ChargeReceipt, GatewayError, Order, PaymentGateway, SimulatedGateway};
pub use router::registration_router;
pub use service::{
    Clock, Confirmation, FixedClock, FormOutcome, FormPhase, Quote, RegistrationError,
    RegistrationForm, RegistrationFormProcessor, SubmissionError, SystemClock,
};
pub use validation::{ValidationError, MINIMUM_AGE};
