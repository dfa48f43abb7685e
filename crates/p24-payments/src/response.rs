// ============================================================================
// P24-PAYMENTS - Gateway Responses
// ============================================================================
// The gateway answers with URL-encoded query strings, not JSON:
//
//   error=0&token=ABC123
//   error=err00&errorMessage=Bad+merchant
// ============================================================================

use crate::error::PaymentError;
use crate::Result;
use std::collections::HashMap;

/// Decoded gateway reply
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct GatewayResponse {
    fields: HashMap<String, String>,
}

impl GatewayResponse {
    /// Decode a raw body; an empty body means the gateway did not answer
    pub fn parse(body: &str) -> Result<Self> {
        let body = body.trim();
        if body.is_empty() {
            return Err(PaymentError::NoResponse);
        }

        let fields = url::form_urlencoded::parse(body.as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self { fields })
    }

    /// Raw field lookup
    pub fn get(&self, key: &str) -> Option<&str> {
        self.fields.get(key).map(String::as_str)
    }

    /// Registration token, if one was issued
    pub fn token(&self) -> Option<&str> {
        self.get("token").filter(|t| !t.is_empty())
    }

    /// Error code (`"0"` on success)
    pub fn error_code(&self) -> Option<&str> {
        self.get("error")
    }

    /// Human-readable error text
    pub fn error_message(&self) -> Option<&str> {
        self.get("errorMessage")
    }

    /// Whether the gateway reported `error=0`
    pub fn is_ok(&self) -> bool {
        self.error_code() == Some("0")
    }

    /// Turn this reply into a gateway error
    ///
    /// `fallback` is used when the reply carries neither a message nor a code.
    pub fn into_error(self, fallback: &str) -> PaymentError {
        let message = match (self.error_message(), self.error_code()) {
            (Some(message), _) => message.to_string(),
            (None, Some(code)) => format!("gateway returned error {}", code),
            (None, None) => fallback.to_string(),
        };
        PaymentError::Gateway(message)
    }
}
