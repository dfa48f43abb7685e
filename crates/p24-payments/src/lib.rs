// ============================================================================
// P24-PAYMENTS - Przelewy24 Integration
// ============================================================================
// Client for the Przelewy24 transaction API (v3.2).
//
// Features:
// - Validated setters for every transaction form field
// - Shopping cart products sent as positional form fields
// - MD5 request signatures
// - Register a transaction and build the pay-by-link URL
// - Parse and check status notifications
// - Verify a completed transaction
// ============================================================================

pub mod config;
pub mod error;
pub mod field;
pub mod form;
pub mod sign;
pub mod response;
pub mod notification;
pub mod client;

pub use config::{P24Config, Environment, API_VERSION, HOST_LIVE, HOST_SANDBOX};
pub use error::PaymentError;
pub use field::{Field, FieldRule};
pub use form::{Product, TransactionForm};
pub use response::GatewayResponse;
pub use notification::Notification;
pub use client::TransactionClient;

/// Re-export for convenience
pub type Result<T> = std::result::Result<T, PaymentError>;
