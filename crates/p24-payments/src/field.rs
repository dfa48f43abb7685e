// ============================================================================
// P24-PAYMENTS - Form Fields
// ============================================================================
// Wire names of the transaction form and the length rule each one carries.
// Every setter goes through `validate`, so the bounds live in one table.
// ============================================================================

use crate::error::PaymentError;
use crate::Result;

/// Length rule for a text field
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldRule {
    /// Inclusive character-count range
    Length { min: usize, max: usize },
    /// Exact character count
    Exact(usize),
    /// Stored as-is
    Unchecked,
}

impl FieldRule {
    /// Check a value, returning the violated constraint on failure
    pub fn check(&self, value: &str) -> std::result::Result<(), String> {
        let len = value.chars().count();
        match *self {
            FieldRule::Length { min, max } if len < min || len > max => {
                Err(format!("must have from {} to {} characters", min, max))
            }
            FieldRule::Exact(n) if len != n => Err(format!("must have exactly {} characters", n)),
            _ => Ok(()),
        }
    }
}

/// A protocol field of the transaction form
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    MerchantId,
    PosId,
    ApiVersion,
    Sign,
    SessionId,
    Amount,
    Currency,
    Description,
    Email,
    Client,
    Address,
    Zip,
    City,
    Country,
    Phone,
    Language,
    Method,
    UrlReturn,
    UrlStatus,
    TimeLimit,
    WaitForResult,
    Channel,
    Shipping,
    TransferLabel,
    OrderId,
}

impl Field {
    /// Every field, in the order it is serialized
    pub const ALL: [Field; 25] = [
        Field::MerchantId,
        Field::PosId,
        Field::SessionId,
        Field::Amount,
        Field::Currency,
        Field::Description,
        Field::Email,
        Field::Client,
        Field::Address,
        Field::Zip,
        Field::City,
        Field::Country,
        Field::Phone,
        Field::Language,
        Field::Method,
        Field::UrlReturn,
        Field::UrlStatus,
        Field::TimeLimit,
        Field::WaitForResult,
        Field::Channel,
        Field::Shipping,
        Field::TransferLabel,
        Field::OrderId,
        Field::ApiVersion,
        Field::Sign,
    ];

    /// Look a field up by its wire name
    pub fn from_wire_name(name: &str) -> Option<Field> {
        Field::ALL.iter().copied().find(|f| f.wire_name() == name)
    }

    /// Key used on the wire
    pub const fn wire_name(self) -> &'static str {
        match self {
            Field::MerchantId => "p24_merchant_id",
            Field::PosId => "p24_pos_id",
            Field::ApiVersion => "p24_api_version",
            Field::Sign => "p24_sign",
            Field::SessionId => "p24_session_id",
            Field::Amount => "p24_amount",
            Field::Currency => "p24_currency",
            Field::Description => "p24_description",
            Field::Email => "p24_email",
            Field::Client => "p24_client",
            Field::Address => "p24_address",
            Field::Zip => "p24_zip",
            Field::City => "p24_city",
            Field::Country => "p24_country",
            Field::Phone => "p24_phone",
            Field::Language => "p24_language",
            Field::Method => "p24_method",
            Field::UrlReturn => "p24_url_return",
            Field::UrlStatus => "p24_url_status",
            Field::TimeLimit => "p24_time_limit",
            Field::WaitForResult => "p24_wait_for_result",
            Field::Channel => "p24_channel",
            Field::Shipping => "p24_shipping",
            Field::TransferLabel => "p24_transfer_label",
            Field::OrderId => "p24_order_id",
        }
    }

    /// Length rule enforced by the setter
    pub const fn rule(self) -> FieldRule {
        match self {
            Field::SessionId => FieldRule::Length { min: 1, max: 100 },
            Field::Currency => FieldRule::Exact(3),
            Field::Description => FieldRule::Length { min: 1, max: 1024 },
            Field::Email | Field::Client | Field::City => FieldRule::Length { min: 1, max: 50 },
            Field::Address => FieldRule::Length { min: 1, max: 80 },
            Field::Zip => FieldRule::Length { min: 1, max: 10 },
            Field::Country => FieldRule::Length { min: 1, max: 2 },
            Field::Phone => FieldRule::Length { min: 1, max: 12 },
            Field::Language => FieldRule::Exact(2),
            Field::UrlReturn | Field::UrlStatus => FieldRule::Length { min: 1, max: 250 },
            Field::TransferLabel => FieldRule::Length { min: 1, max: 20 },
            _ => FieldRule::Unchecked,
        }
    }
}

/// Fields that must be set before `trnRegister`
pub const REQUIRED_FOR_REGISTER: &[Field] = &[
    Field::MerchantId,
    Field::PosId,
    Field::SessionId,
    Field::Amount,
    Field::Currency,
    Field::Description,
    Field::Email,
    Field::Country,
    Field::UrlReturn,
];

/// Fields that must be set before `trnVerify`
pub const REQUIRED_FOR_VERIFY: &[Field] = &[
    Field::MerchantId,
    Field::PosId,
    Field::SessionId,
    Field::Amount,
    Field::Currency,
    Field::OrderId,
];

/// Validate a value against the field's rule
pub fn validate(field: Field, value: &str) -> Result<()> {
    field
        .rule()
        .check(value)
        .map_err(|constraint| PaymentError::Validation {
            field: field.wire_name(),
            constraint,
        })
}
