//! Course pricing, registration, and contact workflows for the SA Driving school site.

pub mod config;
pub mod error;
pub mod notice;
pub mod registration;
pub mod site;
pub mod telemetry;
