// ============================================================================
// P24-PAYMENTS - Transaction Form
// ============================================================================
// Structured form sent to the gateway. Each protocol field is a named
// optional value; serialization turns it into `p24_*` key/value pairs.
//
// Products are kept apart and written in under positional keys
// (`p24_name_1`, `p24_quantity_1`, ...) right before registration.
// ============================================================================

use crate::config::P24Config;
use crate::field::Field;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

// ============================================================================
// PRODUCTS
// ============================================================================

/// One line of the shopping cart
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub name: String,

    #[serde(default)]
    pub description: Option<String>,

    pub quantity: u32,

    /// Unit price in minor units (grosze)
    pub price: u64,

    /// Merchant's own product number
    #[serde(default)]
    pub number: Option<String>,
}

impl Product {
    /// Create a product without a number
    pub fn new(
        name: impl Into<String>,
        description: Option<String>,
        quantity: u32,
        price: u64,
    ) -> Self {
        Self {
            name: name.into(),
            description,
            quantity,
            price,
            number: None,
        }
    }

    /// Attach the merchant's product number
    pub fn with_number(mut self, number: impl Into<String>) -> Self {
        self.number = Some(number.into());
        self
    }

    /// Form pairs for this product at 1-based `position`
    fn form_fields(&self, position: usize) -> Vec<(String, String)> {
        let mut fields = vec![
            (format!("p24_name_{}", position), self.name.clone()),
            (format!("p24_quantity_{}", position), self.quantity.to_string()),
            (format!("p24_price_{}", position), self.price.to_string()),
        ];
        if let Some(description) = &self.description {
            fields.push((format!("p24_description_{}", position), description.clone()));
        }
        if let Some(number) = &self.number {
            fields.push((format!("p24_number_{}", position), number.clone()));
        }
        fields
    }
}

// ============================================================================
// FORM
// ============================================================================

/// Transaction form with exact wire names as serialization keys
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TransactionForm {
    pub(crate) merchant_id: u32,
    pub(crate) pos_id: u32,
    pub(crate) api_version: String,
    pub(crate) sign: Option<String>,

    pub(crate) session_id: Option<String>,
    pub(crate) amount: Option<u64>,
    pub(crate) currency: Option<String>,
    pub(crate) description: Option<String>,
    pub(crate) email: Option<String>,
    pub(crate) client: Option<String>,
    pub(crate) address: Option<String>,
    pub(crate) zip: Option<String>,
    pub(crate) city: Option<String>,
    pub(crate) country: Option<String>,
    pub(crate) phone: Option<String>,
    pub(crate) language: Option<String>,
    pub(crate) method: Option<u32>,
    pub(crate) url_return: Option<String>,
    pub(crate) url_status: Option<String>,
    pub(crate) time_limit: Option<u32>,
    pub(crate) wait_for_result: Option<bool>,
    pub(crate) channel: Option<u32>,
    pub(crate) shipping: Option<u64>,
    pub(crate) transfer_label: Option<String>,
    pub(crate) order_id: Option<u64>,

    /// Materialized product fields, keyed by positional wire name
    pub(crate) product_fields: BTreeMap<String, String>,
}

impl TransactionForm {
    /// Seed a form with the merchant identity and protocol version
    pub fn new(config: &P24Config) -> Self {
        Self {
            merchant_id: config.merchant_id,
            pos_id: config.pos_id,
            api_version: config.api_version.clone(),
            ..Default::default()
        }
    }

    /// Serialized value of a protocol field, if set
    pub fn value(&self, field: Field) -> Option<String> {
        match field {
            Field::MerchantId => Some(self.merchant_id.to_string()),
            Field::PosId => Some(self.pos_id.to_string()),
            Field::ApiVersion => Some(self.api_version.clone()),
            Field::Sign => self.sign.clone(),
            Field::SessionId => self.session_id.clone(),
            Field::Amount => self.amount.map(|v| v.to_string()),
            Field::Currency => self.currency.clone(),
            Field::Description => self.description.clone(),
            Field::Email => self.email.clone(),
            Field::Client => self.client.clone(),
            Field::Address => self.address.clone(),
            Field::Zip => self.zip.clone(),
            Field::City => self.city.clone(),
            Field::Country => self.country.clone(),
            Field::Phone => self.phone.clone(),
            Field::Language => self.language.clone(),
            Field::Method => self.method.map(|v| v.to_string()),
            Field::UrlReturn => self.url_return.clone(),
            Field::UrlStatus => self.url_status.clone(),
            Field::TimeLimit => self.time_limit.map(|v| v.to_string()),
            Field::WaitForResult => self.wait_for_result.map(|v| u8::from(v).to_string()),
            Field::Channel => self.channel.map(|v| v.to_string()),
            Field::Shipping => self.shipping.map(|v| v.to_string()),
            Field::TransferLabel => self.transfer_label.clone(),
            Field::OrderId => self.order_id.map(|v| v.to_string()),
        }
    }

    /// Look up any serialized field by wire name, product fields included
    pub fn get(&self, key: &str) -> Option<String> {
        match Field::from_wire_name(key) {
            Some(field) => self.value(field),
            None => self.product_fields.get(key).cloned(),
        }
    }

    /// First field from `required` that has no value
    pub fn first_missing(&self, required: &[Field]) -> Option<Field> {
        required.iter().copied().find(|f| self.value(*f).is_none())
    }

    /// Write every product into the form under 1-based positional keys
    ///
    /// Existing keys for the same positions are overwritten.
    pub fn load_products(&mut self, products: &[Product]) {
        for (i, product) in products.iter().enumerate() {
            for (key, value) in product.form_fields(i + 1) {
                self.product_fields.insert(key, value);
            }
        }
    }

    /// Number of materialized product fields
    pub fn product_field_count(&self) -> usize {
        self.product_fields.len()
    }

    /// Key/value pairs sent as the `application/x-www-form-urlencoded` body
    pub fn to_pairs(&self) -> Vec<(String, String)> {
        let mut pairs: Vec<(String, String)> = Field::ALL
            .iter()
            .filter_map(|f| self.value(*f).map(|v| (f.wire_name().to_string(), v)))
            .collect();
        pairs.extend(
            self.product_fields
                .iter()
                .map(|(k, v)| (k.clone(), v.clone())),
        );
        pairs
    }
}
