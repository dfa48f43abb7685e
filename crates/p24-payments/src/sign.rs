// ============================================================================
// P24-PAYMENTS - Request Signatures
// ============================================================================
// The gateway authenticates requests with an MD5 digest over a pipe-joined
// list of form values followed by the merchant CRC key. Signatures are
// recomputed for every request and never cached.
// ============================================================================

use md5::{Digest, Md5};

/// Lowercase hex MD5 of the values joined with `|`
pub fn digest(parts: &[&str]) -> String {
    let mut hasher = Md5::new();
    for (i, part) in parts.iter().enumerate() {
        if i > 0 {
            hasher.update(b"|");
        }
        hasher.update(part.as_bytes());
    }
    hex::encode(hasher.finalize())
}

/// Sign for `trnRegister` / `trnVerify`: `session_id|pos_id|amount|currency|crc`
pub fn transaction_sign(session_id: &str, pos_id: u32, amount: u64, currency: &str, crc: &str) -> String {
    digest(&[
        session_id,
        &pos_id.to_string(),
        &amount.to_string(),
        currency,
        crc,
    ])
}

/// Sign for `testConnection`: `pos_id|crc`
pub fn connection_sign(pos_id: u32, crc: &str) -> String {
    digest(&[&pos_id.to_string(), crc])
}

/// Sign carried by status notifications: `session_id|order_id|amount|currency|crc`
pub fn notification_sign(
    session_id: &str,
    order_id: u64,
    amount: u64,
    currency: &str,
    crc: &str,
) -> String {
    digest(&[
        session_id,
        &order_id.to_string(),
        &amount.to_string(),
        currency,
        crc,
    ])
}
