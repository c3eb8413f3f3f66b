use serde::Serialize;

use crate::registration::CourseKey;

/// Phone, email, and address published on the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContactChannel {
    pub title: String,
    pub content: String,
    pub description: String,
}

/// A service card on the home page, linking to its detail page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ServiceSummary {
    pub title: String,
    pub description: String,
    pub path: String,
    pub course: CourseKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SchoolProfile {
    pub name: String,
    pub phone: String,
    pub email: String,
    pub address: String,
    pub channels: Vec<ContactChannel>,
    pub services: Vec<ServiceSummary>,
    pub highlights: Vec<String>,
}

impl SchoolProfile {
    pub fn standard() -> Self {
        let phone = "(703) 982-1400";
        let email = "info@sadriving.com";
        let address = "43521 Old Ryan Rd, Ashburn, VA 20148";

        Self {
            name: "SA Driving School".to_string(),
            phone: phone.to_string(),
            email: email.to_string(),
            address: address.to_string(),
            channels: vec![
                channel("Phone", phone, "Mon-Fri 8AM-6PM, Sat 9AM-4PM"),
                channel("Email", email, "We'll respond within 24 hours"),
                channel("Location", address, "Serving all of Northern Virginia"),
                channel("Business Hours", "Mon-Fri: 8AM-6PM", "Sat: 9AM-4PM, Sun: Closed"),
            ],
            services: vec![
                service(
                    "Teen License Program",
                    "Complete behind-the-wheel training for teens.",
                    "/teen-license",
                    CourseKey::TeenLicense,
                ),
                service(
                    "Driving Lessons",
                    "Individual lessons for all skill levels.",
                    "/driving-lessons",
                    CourseKey::DrivingLessons,
                ),
                service(
                    "Driver Improvement",
                    "Online courses to enhance skills and reduce points.",
                    "/driver-improvement",
                    CourseKey::DriverImprovement,
                ),
            ],
            highlights: ["DMV Certified", "Personalized", "Flexible Hours", "High Pass Rate"]
                .into_iter()
                .map(str::to_string)
                .collect(),
        }
    }

    pub fn service_for(&self, course: CourseKey) -> Option<&ServiceSummary> {
        self.services.iter().find(|service| service.course == course)
    }
}

impl Default for SchoolProfile {
    fn default() -> Self {
        Self::standard()
    }
}

fn channel(title: &str, content: &str, description: &str) -> ContactChannel {
    ContactChannel {
        title: title.to_string(),
        content: content.to_string(),
        description: description.to_string(),
    }
}

fn service(title: &str, description: &str, path: &str, course: CourseKey) -> ServiceSummary {
    ServiceSummary {
        title: title.to_string(),
        description: description.to_string(),
        path: path.to_string(),
        course,
    }
}
