use std::sync::OnceLock;

use chrono::{Datelike, NaiveDate};
use regex::Regex;

use super::catalog::CourseCatalog;
use super::domain::RegistrationRequest;

/// Youngest age accepted, measured in calendar years.
pub const MINIMUM_AGE: i32 = 15;

/// First rule a registration violated; the message is shown to the student verbatim.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("Please select a course")]
    MissingCourse,
    #[error("Please enter your full name")]
    MissingName,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a valid phone number format: (XXX) XXX-XXXX")]
    InvalidPhone,
    #[error("You must be at least 15 years old to register")]
    Underage,
    #[error("Please enter the name on your card")]
    MissingCardName,
    #[error("Please enter a valid 16-digit card number")]
    InvalidCardNumber,
    #[error("Please enter a valid expiry date (MM/YY)")]
    InvalidExpiry,
    #[error("Please enter a valid CVV")]
    InvalidCvv,
}

fn compiled(cell: &'static OnceLock<Regex>, source: &str) -> &'static Regex {
    cell.get_or_init(|| Regex::new(source).expect("static validation pattern compiles"))
}

fn email_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compiled(&PATTERN, r"^[^\s@]+@[^\s@]+\.[^\s@]+$")
}

fn phone_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compiled(&PATTERN, r"^\([0-9]{3}\) [0-9]{3}-[0-9]{4}$")
}

fn card_number_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compiled(&PATTERN, r"^[0-9]{16}$")
}

fn expiry_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compiled(&PATTERN, r"^[0-9]{2}/[0-9]{2}$")
}

fn cvv_pattern() -> &'static Regex {
    static PATTERN: OnceLock<Regex> = OnceLock::new();
    compiled(&PATTERN, r"^[0-9]{3,4}$")
}

pub fn is_valid_email(raw: &str) -> bool {
    email_pattern().is_match(raw)
}

pub fn is_valid_phone(raw: &str) -> bool {
    phone_pattern().is_match(raw)
}

/// Age as the difference between calendar years, ignoring month and day.
pub fn age_in_years(date_of_birth: NaiveDate, today: NaiveDate) -> i32 {
    today.year() - date_of_birth.year()
}

/// Check a registration in form order, stopping at the first failure.
pub fn validate(
    catalog: &CourseCatalog,
    request: &RegistrationRequest,
    today: NaiveDate,
) -> Result<(), ValidationError> {
    if request.course.is_none() {
        return Err(ValidationError::MissingCourse);
    }

    if request.first_name.trim().is_empty() || request.last_name.trim().is_empty() {
        return Err(ValidationError::MissingName);
    }

    if !is_valid_email(&request.email) {
        return Err(ValidationError::InvalidEmail);
    }

    if !is_valid_phone(&request.phone) {
        return Err(ValidationError::InvalidPhone);
    }

    match request.date_of_birth {
        Some(born) if age_in_years(born, today) >= MINIMUM_AGE => {}
        _ => return Err(ValidationError::Underage),
    }

    let total = catalog.compute_total(request.course, request.number_of_sessions);
    if total.requires_payment() {
        validate_card(request)?;
    }

    Ok(())
}

fn validate_card(request: &RegistrationRequest) -> Result<(), ValidationError> {
    if request.card_name.trim().is_empty() {
        return Err(ValidationError::MissingCardName);
    }

    let digits: String = request
        .card_number
        .chars()
        .filter(|ch| !ch.is_whitespace())
        .collect();
    if !card_number_pattern().is_match(&digits) {
        return Err(ValidationError::InvalidCardNumber);
    }

    if !expiry_pattern().is_match(&request.expiry) {
        return Err(ValidationError::InvalidExpiry);
    }

    if !cvv_pattern().is_match(&request.cvv) {
        return Err(ValidationError::InvalidCvv);
    }

    Ok(())
}
