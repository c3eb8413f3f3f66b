use std::sync::Arc;

use serde::{Deserialize, Serialize};

use crate::notice::Notice;
use crate::registration::validation::is_valid_email;

/// Message submitted through the contact page.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct ContactMessage {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub email: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub subject: String,
    #[serde(default)]
    pub message: String,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactValidationError {
    #[error("Please enter your name")]
    MissingName,
    #[error("Please enter your phone number")]
    MissingPhone,
    #[error("Please enter a valid email address")]
    InvalidEmail,
    #[error("Please enter a subject")]
    MissingSubject,
    #[error("Please enter a message")]
    MissingMessage,
}

impl ContactMessage {
    pub fn validate(&self) -> Result<(), ContactValidationError> {
        if self.name.trim().is_empty() {
            return Err(ContactValidationError::MissingName);
        }
        if self.phone.trim().is_empty() {
            return Err(ContactValidationError::MissingPhone);
        }
        if !is_valid_email(&self.email) {
            return Err(ContactValidationError::InvalidEmail);
        }
        if self.subject.trim().is_empty() {
            return Err(ContactValidationError::MissingSubject);
        }
        if self.message.trim().is_empty() {
            return Err(ContactValidationError::MissingMessage);
        }
        Ok(())
    }
}

/// Destination for accepted contact messages (e-mail relay, CRM, ...).
pub trait ContactInbox: Send + Sync {
    fn deliver(&self, message: ContactMessage) -> Result<(), InboxError>;
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InboxError {
    #[error("contact inbox unavailable: {0}")]
    Unavailable(String),
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ContactError {
    #[error(transparent)]
    Validation(#[from] ContactValidationError),
    #[error(transparent)]
    Inbox(#[from] InboxError),
}

impl ContactError {
    pub fn notice(&self) -> Notice {
        match self {
            Self::Validation(error) => Notice::error("Error", error.to_string()),
            Self::Inbox(_) => Notice::error(
                "Message Not Sent",
                "We couldn't send your message. Please call us or try again later.",
            ),
        }
    }
}

/// Front desk for the contact form.
pub struct ContactDesk<I> {
    inbox: Arc<I>,
}

impl<I> ContactDesk<I>
where
    I: ContactInbox + 'static,
{
    pub fn new(inbox: Arc<I>) -> Self {
        Self { inbox }
    }

    pub fn submit(&self, message: ContactMessage) -> Result<Notice, ContactError> {
        message.validate()?;
        let subject = message.subject.trim().to_string();
        self.inbox.deliver(message)?;
        tracing::info!(%subject, "contact message accepted");
        Ok(Notice::success(
            "Message Sent!",
            "We'll get back to you as soon as possible.",
        ))
    }
}
