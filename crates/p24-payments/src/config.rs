// ============================================================================
// P24-PAYMENTS - Configuration
// ============================================================================
// Merchant credentials and environment selection (live vs sandbox).

use crate::error::PaymentError;
use crate::Result;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Protocol version sent with every request
pub const API_VERSION: &str = "3.2";

/// Live gateway host
pub const HOST_LIVE: &str = "https://secure.przelewy24.pl/";

/// Sandbox gateway host
pub const HOST_SANDBOX: &str = "https://sandbox.przelewy24.pl/";

/// Default HTTP timeout in seconds
pub const DEFAULT_TIMEOUT_SECS: u64 = 30;

/// Gateway environment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum Environment {
    #[default]
    Live,
    Sandbox,
}

impl Environment {
    /// Resolve from the test-mode flag
    pub fn from_test_mode(test_mode: bool) -> Self {
        if test_mode {
            Environment::Sandbox
        } else {
            Environment::Live
        }
    }

    /// Base host URL, always ending with `/`
    pub fn host(&self) -> &'static str {
        match self {
            Environment::Live => HOST_LIVE,
            Environment::Sandbox => HOST_SANDBOX,
        }
    }
}

/// Merchant configuration, fixed once the client is built
#[derive(Clone, Serialize, Deserialize)]
pub struct P24Config {
    /// Merchant identifier
    pub merchant_id: u32,

    /// Point-of-sale identifier (equal to the merchant id for single-shop accounts)
    pub pos_id: u32,

    /// Shared secret ("CRC key"), only ever used as signature input
    pub crc: String,

    /// Protocol version
    pub api_version: String,

    /// Live or sandbox
    pub environment: Environment,

    /// Base host URL
    pub host: String,

    /// HTTP request timeout in seconds
    pub timeout_secs: u64,
}

impl P24Config {
    /// Create configuration, picking the sandbox host in test mode
    pub fn new(merchant_id: u32, pos_id: u32, crc: impl Into<String>, test_mode: bool) -> Self {
        let environment = Environment::from_test_mode(test_mode);
        Self {
            merchant_id,
            pos_id,
            crc: crc.into(),
            api_version: API_VERSION.to_string(),
            environment,
            host: environment.host().to_string(),
            timeout_secs: DEFAULT_TIMEOUT_SECS,
        }
    }

    /// Create live configuration
    pub fn live(merchant_id: u32, pos_id: u32, crc: impl Into<String>) -> Self {
        Self::new(merchant_id, pos_id, crc, false)
    }

    /// Create sandbox configuration
    pub fn sandbox(merchant_id: u32, pos_id: u32, crc: impl Into<String>) -> Self {
        Self::new(merchant_id, pos_id, crc, true)
    }

    /// Override the base host (a trailing `/` is added when missing)
    pub fn with_host(mut self, host: impl Into<String>) -> Self {
        let mut host = host.into();
        if !host.ends_with('/') {
            host.push('/');
        }
        self.host = host;
        self
    }

    /// Override the HTTP timeout
    pub fn with_timeout_secs(mut self, timeout_secs: u64) -> Self {
        self.timeout_secs = timeout_secs;
        self
    }

    /// Load configuration from `P24_*` environment variables
    ///
    /// Required: `P24_MERCHANT_ID`, `P24_CRC`.
    /// Optional: `P24_POS_ID` (defaults to the merchant id), `P24_SANDBOX`
    /// (`1`/`true`), `P24_HOST`.
    pub fn from_env() -> Result<Self> {
        Self::from_lookup(|key| std::env::var(key).ok())
    }

    fn from_lookup<F>(lookup: F) -> Result<Self>
    where
        F: Fn(&str) -> Option<String>,
    {
        let merchant_id = parse_id(&lookup, "P24_MERCHANT_ID")?
            .ok_or_else(|| PaymentError::Config("P24_MERCHANT_ID is not set".to_string()))?;
        let pos_id = parse_id(&lookup, "P24_POS_ID")?.unwrap_or(merchant_id);
        let crc = lookup("P24_CRC")
            .filter(|v| !v.is_empty())
            .ok_or_else(|| PaymentError::Config("P24_CRC is not set".to_string()))?;
        let test_mode = lookup("P24_SANDBOX")
            .map(|v| matches!(v.trim().to_ascii_lowercase().as_str(), "1" | "true" | "yes"))
            .unwrap_or(false);

        let config = Self::new(merchant_id, pos_id, crc, test_mode);
        Ok(match lookup("P24_HOST") {
            Some(host) if !host.is_empty() => config.with_host(host),
            _ => config,
        })
    }

    /// Check if this is the live gateway
    pub fn is_live(&self) -> bool {
        self.environment == Environment::Live
    }

    /// Full URL of a gateway endpoint
    pub fn endpoint(&self, name: &str) -> String {
        format!("{}{}", self.host, name)
    }

    /// Checkout page the payer is redirected to after registration
    pub fn pay_by_link_url(&self, token: &str) -> String {
        format!("{}trnRequest/{}", self.host, token)
    }
}

impl fmt::Debug for P24Config {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("P24Config")
            .field("merchant_id", &self.merchant_id)
            .field("pos_id", &self.pos_id)
            .field("crc", &"<redacted>")
            .field("api_version", &self.api_version)
            .field("environment", &self.environment)
            .field("host", &self.host)
            .field("timeout_secs", &self.timeout_secs)
            .finish()
    }
}

fn parse_id<F>(lookup: &F, key: &str) -> Result<Option<u32>>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(key) {
        None => Ok(None),
        Some(raw) => raw
            .trim()
            .parse()
            .map(Some)
            .map_err(|_| PaymentError::Config(format!("{} is not a valid id: {:?}", key, raw))),
    }
}
