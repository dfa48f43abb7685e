// ============================================================================
// P24-PAYMENTS - Status Notifications
// ============================================================================
// After the payer completes checkout, the gateway POSTs a URL-encoded status
// callback to `p24_url_status`. The merchant checks its signature, then calls
// `trnVerify` with the reported order id to confirm the payment.
// ============================================================================

use crate::error::PaymentError;
use crate::sign::notification_sign;
use crate::Result;
use std::collections::HashMap;
use subtle::ConstantTimeEq;

/// Status callback sent by the gateway
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Notification {
    pub merchant_id: u32,
    pub pos_id: u32,
    pub session_id: String,
    pub amount: u64,
    pub currency: String,
    pub order_id: u64,
    pub method: Option<u32>,
    pub statement: Option<String>,
    pub sign: String,
}

impl Notification {
    /// Decode a callback body
    pub fn parse(body: &str) -> Result<Self> {
        let fields: HashMap<String, String> = url::form_urlencoded::parse(body.trim().as_bytes())
            .map(|(k, v)| (k.into_owned(), v.into_owned()))
            .collect();

        Ok(Self {
            merchant_id: number(&fields, "p24_merchant_id")?,
            pos_id: number(&fields, "p24_pos_id")?,
            session_id: text(&fields, "p24_session_id")?,
            amount: number(&fields, "p24_amount")?,
            currency: text(&fields, "p24_currency")?,
            order_id: number(&fields, "p24_order_id")?,
            method: fields.get("p24_method").and_then(|v| v.parse().ok()),
            statement: fields.get("p24_statement").cloned(),
            sign: text(&fields, "p24_sign")?,
        })
    }

    /// Expected signature for this callback
    pub fn expected_sign(&self, crc: &str) -> String {
        notification_sign(
            &self.session_id,
            self.order_id,
            self.amount,
            &self.currency,
            crc,
        )
    }

    /// Check the callback was signed with the merchant's CRC key
    pub fn verify_sign(&self, crc: &str) -> Result<()> {
        let received = self.sign.to_ascii_lowercase();
        let expected = self.expected_sign(crc);
        if bool::from(received.as_bytes().ct_eq(expected.as_bytes())) {
            Ok(())
        } else {
            Err(PaymentError::InvalidNotification(
                "signature mismatch".to_string(),
            ))
        }
    }
}

fn text(fields: &HashMap<String, String>, key: &str) -> Result<String> {
    fields
        .get(key)
        .filter(|v| !v.is_empty())
        .cloned()
        .ok_or_else(|| PaymentError::InvalidNotification(format!("{} is missing", key)))
}

fn number<T: std::str::FromStr>(fields: &HashMap<String, String>, key: &str) -> Result<T> {
    text(fields, key)?
        .parse::<T>()
        .map_err(|_| PaymentError::InvalidNotification(format!("{} is not a number", key)))
}
