// ============================================================================
// P24-PAYMENTS - Transaction Client
// ============================================================================
// Main API of the crate.
//
// Flow:
//   configure -> set fields -> (add products) -> register -> redirect payer
//   -> status notification -> verify
//
// register and verify are independent: each checks its required fields,
// recomputes the signature and performs exactly one POST. Nothing is retried.
// ============================================================================

use crate::config::P24Config;
use crate::error::PaymentError;
use crate::field::{validate, Field, REQUIRED_FOR_REGISTER, REQUIRED_FOR_VERIFY};
use crate::form::{Product, TransactionForm};
use crate::notification::Notification;
use crate::response::GatewayResponse;
use crate::sign::{connection_sign, transaction_sign};
use crate::Result;
use reqwest::Client;
use std::time::Duration;
use tracing::{debug, info, warn};

/// Register endpoint
pub const ENDPOINT_REGISTER: &str = "trnRegister";

/// Verify endpoint
pub const ENDPOINT_VERIFY: &str = "trnVerify";

/// Credentials check endpoint
pub const ENDPOINT_TEST_CONNECTION: &str = "testConnection";

/// Client for one payment session
///
/// Not meant for concurrent mutation; callers serialize their own use
/// of a single instance.
pub struct TransactionClient {
    config: P24Config,
    http: Client,
    form: TransactionForm,
    products: Vec<Product>,
}

impl TransactionClient {
    /// Create a client; `test_mode` selects the sandbox host
    pub fn new(merchant_id: u32, pos_id: u32, crc: impl Into<String>, test_mode: bool) -> Result<Self> {
        Self::with_config(P24Config::new(merchant_id, pos_id, crc, test_mode))
    }

    /// Create a client from an existing configuration
    pub fn with_config(config: P24Config) -> Result<Self> {
        let http = Client::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .build()?;

        Ok(Self::with_http_client(config, http))
    }

    /// Create a client reusing a caller-provided HTTP client
    pub fn with_http_client(config: P24Config, http: Client) -> Self {
        let form = TransactionForm::new(&config);
        Self {
            config,
            http,
            form,
            products: Vec::new(),
        }
    }

    /// Get configuration
    pub fn config(&self) -> &P24Config {
        &self.config
    }

    /// Current form contents
    pub fn form(&self) -> &TransactionForm {
        &self.form
    }

    /// Products added so far
    pub fn products(&self) -> &[Product] {
        &self.products
    }

    // ==================== Field Setters ====================

    fn checked(field: Field, value: impl Into<String>) -> Result<String> {
        let value = value.into();
        validate(field, &value)?;
        Ok(value)
    }

    /// Merchant's unique id of this payment attempt (1-100 chars)
    pub fn set_session_id(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.session_id = Some(Self::checked(Field::SessionId, value)?);
        Ok(())
    }

    /// Amount in minor units (grosze)
    pub fn set_amount(&mut self, value: u64) {
        self.form.amount = Some(value);
    }

    /// ISO 4217 currency code (exactly 3 chars)
    pub fn set_currency(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.currency = Some(Self::checked(Field::Currency, value)?);
        Ok(())
    }

    /// Transaction description (1-1024 chars)
    pub fn set_description(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.description = Some(Self::checked(Field::Description, value)?);
        Ok(())
    }

    /// Payer's email (1-50 chars)
    pub fn set_email(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.email = Some(Self::checked(Field::Email, value)?);
        Ok(())
    }

    /// Payer's name (1-50 chars)
    pub fn set_client(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.client = Some(Self::checked(Field::Client, value)?);
        Ok(())
    }

    /// Payer's street address (1-80 chars)
    pub fn set_address(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.address = Some(Self::checked(Field::Address, value)?);
        Ok(())
    }

    /// Postal code (1-10 chars)
    pub fn set_zip(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.zip = Some(Self::checked(Field::Zip, value)?);
        Ok(())
    }

    /// City (1-50 chars)
    pub fn set_city(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.city = Some(Self::checked(Field::City, value)?);
        Ok(())
    }

    /// Country code (1-2 chars)
    pub fn set_country(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.country = Some(Self::checked(Field::Country, value)?);
        Ok(())
    }

    /// Phone number (1-12 chars)
    pub fn set_phone(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.phone = Some(Self::checked(Field::Phone, value)?);
        Ok(())
    }

    /// Checkout page language (exactly 2 chars)
    pub fn set_language(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.language = Some(Self::checked(Field::Language, value)?);
        Ok(())
    }

    /// Preselected payment method id
    pub fn set_method(&mut self, value: u32) {
        self.form.method = Some(value);
    }

    /// Where the payer lands after checkout (1-250 chars)
    pub fn set_url_return(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.url_return = Some(Self::checked(Field::UrlReturn, value)?);
        Ok(())
    }

    /// Where the gateway POSTs the status notification (1-250 chars)
    pub fn set_url_status(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.url_status = Some(Self::checked(Field::UrlStatus, value)?);
        Ok(())
    }

    /// Payment time limit in minutes (0 = none)
    pub fn set_time_limit(&mut self, value: u32) {
        self.form.time_limit = Some(value);
    }

    /// Keep the payer on the checkout page until the result is known
    pub fn set_wait_for_result(&mut self, value: bool) {
        self.form.wait_for_result = Some(value);
    }

    /// Bitmask of allowed payment channels
    pub fn set_channel(&mut self, value: u32) {
        self.form.channel = Some(value);
    }

    /// Shipping cost in minor units
    pub fn set_shipping(&mut self, value: u64) {
        self.form.shipping = Some(value);
    }

    /// Label shown on the payer's bank transfer (1-20 chars)
    pub fn set_transfer_label(&mut self, value: impl Into<String>) -> Result<()> {
        self.form.transfer_label = Some(Self::checked(Field::TransferLabel, value)?);
        Ok(())
    }

    /// Gateway-assigned order id, needed for verification
    pub fn set_order_id(&mut self, value: u64) {
        self.form.order_id = Some(value);
    }

    // ==================== Products ====================

    /// Append one product
    pub fn add_product(
        &mut self,
        name: impl Into<String>,
        description: Option<String>,
        quantity: u32,
        price: u64,
        number: Option<String>,
    ) {
        self.products.push(Product {
            name: name.into(),
            description,
            quantity,
            price,
            number,
        });
    }

    /// Append a list of products
    pub fn add_products(&mut self, products: impl IntoIterator<Item = Product>) {
        self.products.extend(products);
    }

    /// Write the current product list into the form
    pub fn materialize_products(&mut self) {
        self.form.load_products(&self.products);
    }

    // ==================== Signing ====================

    /// Signature over the current session id, pos id, amount and currency
    ///
    /// Unset values sign as empty strings; register and verify refuse to
    /// send before those fields are present.
    pub fn compute_sign(&self) -> String {
        transaction_sign(
            self.form.session_id.as_deref().unwrap_or_default(),
            self.form.pos_id,
            self.form.amount.unwrap_or_default(),
            self.form.currency.as_deref().unwrap_or_default(),
            &self.config.crc,
        )
    }

    fn ensure_fields(&self, required: &[Field]) -> Result<()> {
        match self.form.first_missing(required) {
            Some(field) => Err(PaymentError::MissingField(field.wire_name())),
            None => Ok(()),
        }
    }

    // ==================== Gateway Operations ====================

    /// Register the transaction and return the checkout token
    pub async fn register(&mut self) -> Result<String> {
        self.ensure_fields(REQUIRED_FOR_REGISTER)?;

        self.form.sign = Some(self.compute_sign());
        self.materialize_products();

        debug!(
            "Registering transaction: session={:?} products={}",
            self.form.session_id,
            self.products.len()
        );

        let response = self.post(ENDPOINT_REGISTER, self.form.to_pairs()).await?;

        if let Some(token) = response.token() {
            info!("Transaction registered: session={:?}", self.form.session_id);
            return Ok(token.to_string());
        }

        let err = response.into_error("gateway returned no token");
        warn!("Transaction registration rejected: {}", err);
        Err(err)
    }

    /// Confirm a completed transaction
    pub async fn verify(&mut self) -> Result<()> {
        self.ensure_fields(REQUIRED_FOR_VERIFY)?;

        self.form.sign = Some(self.compute_sign());

        debug!(
            "Verifying transaction: session={:?} order={:?}",
            self.form.session_id, self.form.order_id
        );

        let response = self.post(ENDPOINT_VERIFY, self.form.to_pairs()).await?;

        if response.is_ok() {
            info!("Transaction verified: order={:?}", self.form.order_id);
            Ok(())
        } else {
            let err = response.into_error("transaction verification failed");
            warn!("Transaction verification rejected: {}", err);
            Err(err)
        }
    }

    /// Check merchant credentials against the gateway
    pub async fn test_connection(&self) -> Result<()> {
        let pairs = vec![
            (
                Field::MerchantId.wire_name().to_string(),
                self.form.merchant_id.to_string(),
            ),
            (
                Field::PosId.wire_name().to_string(),
                self.form.pos_id.to_string(),
            ),
            (
                Field::Sign.wire_name().to_string(),
                connection_sign(self.form.pos_id, &self.config.crc),
            ),
        ];

        let response = self.post(ENDPOINT_TEST_CONNECTION, pairs).await?;

        if response.is_ok() {
            Ok(())
        } else {
            let err = response.into_error("connection test failed");
            warn!("Connection test failed: {}", err);
            Err(err)
        }
    }

    /// Checkout page URL for a registered token
    pub fn pay_by_link_url(&self, token: &str) -> String {
        self.config.pay_by_link_url(token)
    }

    // ==================== Notifications ====================

    /// Check a status callback and load its values for `verify`
    pub fn apply_notification(&mut self, notification: &Notification) -> Result<()> {
        notification.verify_sign(&self.config.crc)?;

        if notification.merchant_id != self.form.merchant_id || notification.pos_id != self.form.pos_id {
            return Err(PaymentError::InvalidNotification(format!(
                "notification for merchant {}/{} does not match this client",
                notification.merchant_id, notification.pos_id
            )));
        }

        validate(Field::SessionId, &notification.session_id)?;
        validate(Field::Currency, &notification.currency)?;

        self.form.session_id = Some(notification.session_id.clone());
        self.form.currency = Some(notification.currency.clone());
        self.form.amount = Some(notification.amount);
        self.form.order_id = Some(notification.order_id);
        Ok(())
    }

    // ==================== Transport ====================

    async fn post(&self, endpoint: &str, pairs: Vec<(String, String)>) -> Result<GatewayResponse> {
        let url = self.config.endpoint(endpoint);

        let body = self
            .http
            .post(&url)
            .form(&pairs)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;

        GatewayResponse::parse(&body)
    }
}
