// ============================================================================
// P24-PAYMENTS - Error Types
// ============================================================================

use thiserror::Error;

#[derive(Error, Debug)]
pub enum PaymentError {
    // ==================== Local Contract Errors ====================
    #[error("{field} value {constraint}")]
    Validation {
        field: &'static str,
        constraint: String,
    },

    #[error("{0} field is missing")]
    MissingField(&'static str),

    // ==================== Gateway Errors ====================
    #[error("Gateway error: {0}")]
    Gateway(String),

    #[error("No response from server")]
    NoResponse,

    #[error("Invalid notification: {0}")]
    InvalidNotification(String),

    // ==================== Transport Errors ====================
    #[error(transparent)]
    Transport(#[from] reqwest::Error),

    // ==================== Configuration Errors ====================
    #[error("Configuration error: {0}")]
    Config(String),
}

impl PaymentError {
    /// Wire name of the field this error is about, if any
    pub fn field(&self) -> Option<&'static str> {
        match self {
            PaymentError::Validation { field, .. } => Some(*field),
            PaymentError::MissingField(field) => Some(*field),
            _ => None,
        }
    }

    /// Message the gateway attached to a rejection
    pub fn gateway_message(&self) -> Option<&str> {
        match self {
            PaymentError::Gateway(message) => Some(message.as_str()),
            _ => None,
        }
    }
}
