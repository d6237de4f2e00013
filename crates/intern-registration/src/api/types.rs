//! API response types.
//!
//! The registration body itself is [`crate::validation::RegistrationRequest`].

use serde::Serialize;

/// Message returned once a registration has been stored.
pub const REGISTRATION_SUCCESSFUL: &str = "Registration successful";

/// Plain success response.
#[derive(Debug, Serialize)]
pub struct MessageResponse {
    pub message: String,
}

impl MessageResponse {
    pub fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

/// Health check response.
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub registrations: usize,
}
