use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

use super::catalog::CourseKey;

/// Session counts offered for the per-session course.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(try_from = "u32", into = "u32")]
pub enum SessionCount {
    #[default]
    One,
    Five,
    Ten,
}

impl SessionCount {
    pub const fn ordered() -> [Self; 3] {
        [Self::One, Self::Five, Self::Ten]
    }

    pub const fn count(self) -> u32 {
        match self {
            Self::One => 1,
            Self::Five => 5,
            Self::Ten => 10,
        }
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::One => "1 Session",
            Self::Five => "5 Sessions",
            Self::Ten => "10 Sessions",
        }
    }
}

impl TryFrom<u32> for SessionCount {
    type Error = String;

    fn try_from(value: u32) -> Result<Self, Self::Error> {
        Self::ordered()
            .into_iter()
            .find(|sessions| sessions.count() == value)
            .ok_or_else(|| format!("number_of_sessions must be one of 1, 5, or 10 (found {value})"))
    }
}

impl From<SessionCount> for u32 {
    fn from(value: SessionCount) -> Self {
        value.count()
    }
}

/// Result of pricing a course selection.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", content = "amount", rename_all = "snake_case")]
pub enum CourseTotal {
    NoCourse,
    Amount(u32),
    ContactUs,
}

impl CourseTotal {
    pub fn amount(self) -> Option<u32> {
        match self {
            Self::Amount(amount) => Some(amount),
            Self::NoCourse | Self::ContactUs => None,
        }
    }

    /// Card details are collected for everything except the "contact us" path.
    pub fn requires_payment(self) -> bool {
        !matches!(self, Self::ContactUs)
    }

    pub fn submit_label(self) -> &'static str {
        match self {
            Self::ContactUs => "Submit Inquiry",
            Self::NoCourse | Self::Amount(_) => "Complete Registration",
        }
    }
}

impl fmt::Display for CourseTotal {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoCourse => Ok(()),
            Self::Amount(amount) => write!(f, "${amount}"),
            Self::ContactUs => f.write_str("Contact Us"),
        }
    }
}

/// Everything a student enters on the registration form.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct RegistrationRequest {
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default, deserialize_with = "deserialize_optional_date")]
    pub date_of_birth: Option<NaiveDate>,
    #[serde(default, deserialize_with = "deserialize_optional_course")]
    pub course: Option<CourseKey>,
    #[serde(default)]
    pub number_of_sessions: SessionCount,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub card_name: String,
    #[serde(default)]
    pub card_number: String,
    #[serde(default)]
    pub expiry: String,
    #[serde(default)]
    pub cvv: String,
}

impl RegistrationRequest {
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name.trim(), self.last_name.trim())
    }

    pub(crate) fn card(&self) -> CardDetails {
        CardDetails {
            name: self.card_name.trim().to_string(),
            number: self.card_number.split_whitespace().collect(),
            expiry: self.expiry.clone(),
            cvv: self.cvv.clone(),
        }
    }
}

/// Card fields as handed to the gateway.
#[derive(Clone, PartialEq, Eq)]
pub struct CardDetails {
    pub name: String,
    pub number: String,
    pub expiry: String,
    pub cvv: String,
}

impl CardDetails {
    pub fn last_four(&self) -> &str {
        let start = self.number.len().saturating_sub(4);
        self.number.get(start..).unwrap_or_default()
    }
}

// Hand-written so card numbers and CVVs never reach logs.
impl fmt::Debug for CardDetails {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CardDetails")
            .field("name", &self.name)
            .field("last_four", &self.last_four())
            .finish_non_exhaustive()
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}

// An unreadable birth date is kept as missing so it fails the age rule in form order.
fn deserialize_optional_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.and_then(|value| match parse_date(&value) {
        Ok(date) => Some(date),
        Err(reason) => {
            if !value.trim().is_empty() {
                tracing::debug!(%reason, "ignoring unreadable date_of_birth");
            }
            None
        }
    }))
}

fn deserialize_optional_course<'de, D>(deserializer: D) -> Result<Option<CourseKey>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    opt.filter(|value| !value.trim().is_empty())
        .map(|value| {
            CourseKey::from_code(&value)
                .ok_or_else(|| serde::de::Error::custom(format!("unknown course '{value}'")))
        })
        .transpose()
}
