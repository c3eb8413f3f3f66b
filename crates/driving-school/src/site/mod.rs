//! School profile and contact form.

pub mod contact;
pub mod profile;
pub mod router;

pub use contact::{
    ContactDesk, ContactError, ContactInbox, ContactMessage, ContactValidationError, InboxError,
};
pub use profile::{ContactChannel, SchoolProfile, ServiceSummary};
pub use router::site_router;
