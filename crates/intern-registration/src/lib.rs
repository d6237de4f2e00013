//! Internship Registration - form intake service.
//!
//! Accepts internship registration forms over HTTP, validates each field
//! against fixed rules, and appends accepted registrations to a JSON document.

pub mod api;
pub mod config;
pub mod error;
pub mod registry;
pub mod validation;

pub use config::Config;
pub use error::RegistrationError;
pub use registry::{Mode, Program, Registration, RegistrationRecord, Store};
pub use validation::{validate, RegistrationRequest, ValidationError};
