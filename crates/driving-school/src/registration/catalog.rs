use serde::{Deserialize, Serialize};

use super::domain::{CourseTotal, SessionCount};

/// Closed set of course codes offered on the registration form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum CourseKey {
    TeenLicense,
    DrivingLessons,
    DriverImprovement,
    RoadTest,
}

impl CourseKey {
    pub const fn ordered() -> [Self; 4] {
        [
            Self::TeenLicense,
            Self::DrivingLessons,
            Self::DriverImprovement,
            Self::RoadTest,
        ]
    }

    pub const fn code(self) -> &'static str {
        match self {
            Self::TeenLicense => "teen-license",
            Self::DrivingLessons => "driving-lessons",
            Self::DriverImprovement => "driver-improvement",
            Self::RoadTest => "road-test",
        }
    }

    /// Exact kebab-case code, as sent by the registration form.
    pub fn from_code(raw: &str) -> Option<Self> {
        Self::ordered().into_iter().find(|key| key.code() == raw)
    }

    /// Forgiving lookup for hand-typed input: ignores case and surrounding whitespace.
    pub fn from_code_lenient(raw: &str) -> Option<Self> {
        Self::ordered()
            .into_iter()
            .find(|key| key.code().eq_ignore_ascii_case(raw.trim()))
    }
}

/// How a catalog price turns into a total.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PricingBasis {
    Flat,
    PerSession,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CourseEntry {
    pub key: CourseKey,
    pub name: String,
    pub description: String,
    /// Whole dollars; `None` means the price is not listed ("contact us").
    pub unit_price: Option<u32>,
    pub pricing: PricingBasis,
}

impl CourseEntry {
    pub fn is_per_session(&self) -> bool {
        self.pricing == PricingBasis::PerSession
    }
}

/// Immutable table of purchasable offerings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CourseCatalog {
    entries: Vec<CourseEntry>,
}

impl CourseCatalog {
    pub fn new(entries: Vec<CourseEntry>) -> Self {
        Self { entries }
    }

    /// The offerings published on the registration page.
    pub fn standard() -> Self {
        Self::new(vec![
            entry(
                CourseKey::TeenLicense,
                "Teen License Behind the Wheel",
                "Complete driver's education program",
                Some(495),
                PricingBasis::Flat,
            ),
            entry(
                CourseKey::DrivingLessons,
                "Individual Driving Lessons",
                "Per hour of instruction",
                Some(65),
                PricingBasis::PerSession,
            ),
            entry(
                CourseKey::DriverImprovement,
                "Driver Improvement Program",
                "8-hour course",
                Some(89),
                PricingBasis::Flat,
            ),
            entry(
                CourseKey::RoadTest,
                "Road Test Package",
                "Vehicle rental and test supervision",
                Some(120),
                PricingBasis::Flat,
            ),
        ])
    }

    pub fn entries(&self) -> &[CourseEntry] {
        &self.entries
    }

    pub fn get(&self, key: CourseKey) -> Option<&CourseEntry> {
        self.entries.iter().find(|entry| entry.key == key)
    }

    /// Total owed for a course selection.
    ///
    /// A key missing from the catalog is treated like an unlisted price, so the caller is
    /// routed to the "contact us" path instead of being charged.
    pub fn compute_total(&self, course: Option<CourseKey>, sessions: SessionCount) -> CourseTotal {
        let Some(key) = course else {
            return CourseTotal::NoCourse;
        };

        let Some(entry) = self.get(key) else {
            return CourseTotal::ContactUs;
        };

        match (entry.unit_price, entry.pricing) {
            (None, _) => CourseTotal::ContactUs,
            (Some(price), PricingBasis::PerSession) => {
                CourseTotal::Amount(price.saturating_mul(sessions.count()))
            }
            (Some(price), PricingBasis::Flat) => CourseTotal::Amount(price),
        }
    }
}

impl Default for CourseCatalog {
    fn default() -> Self {
        Self::standard()
    }
}

fn entry(
    key: CourseKey,
    name: &str,
    description: &str,
    unit_price: Option<u32>,
    pricing: PricingBasis,
) -> CourseEntry {
    CourseEntry {
        key,
        name: name.to_string(),
        description: description.to_string(),
        unit_price,
        pricing,
    }
}
