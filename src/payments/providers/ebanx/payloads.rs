//! EBANX request bodies

use crate::payments::options::GatewayOptions;
use crate::payments::types::{CardBrand, CreditCard, PaymentInstrument};
use secrecy::{ExposeSecret, SecretString};
use serde::{Serialize, Serializer};

/// Request body for any EBANX operation
#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum Payload {
    /// Purchase and authorize
    Charge(ChargePayload),
    Capture(CapturePayload),
    Refund(RefundPayload),
    Void(VoidPayload),
    Store(StorePayload),
}

impl Payload {
    /// Merchant options, carried only by charge payloads
    pub fn options(&self) -> Option<&GatewayOptions> {
        match self {
            Payload::Charge(charge) => Some(&charge.options),
            _ => None,
        }
    }

    /// Brand of the card being stored
    pub fn store_brand(&self) -> Option<CardBrand> {
        match self {
            Payload::Store(store) => Some(store.card.brand),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct ChargePayload {
    /// Amount in minor currency units
    pub amount: u64,
    /// Merchant options with `currency` merged in
    pub options: GatewayOptions,
    pub creditcard: CardBlock,
}

/// Card-or-token block of a charge payload
#[derive(Debug, Clone, Serialize)]
pub struct CardBlock {
    #[serde(flatten)]
    pub details: PaymentDetails,
    /// Processor brand code
    #[serde(skip_serializing_if = "Option::is_none")]
    pub brand: Option<String>,
    /// Only ever set, to `false`, for authorizations
    #[serde(skip_serializing_if = "Option::is_none")]
    pub auto_capture: Option<bool>,
}

impl From<PaymentInstrument> for CardBlock {
    fn from(payment: PaymentInstrument) -> Self {
        match payment {
            PaymentInstrument::Token { token, brand } => CardBlock {
                details: PaymentDetails::Token { token },
                brand,
                auto_capture: None,
            },
            PaymentInstrument::Card(card) => CardBlock {
                details: PaymentDetails::from(&card),
                brand: Some(card.brand.code().to_string()),
                auto_capture: None,
            },
        }
    }
}

#[derive(Debug, Clone, Serialize)]
#[serde(untagged)]
pub enum PaymentDetails {
    Token {
        token: String,
    },
    Card {
        #[serde(serialize_with = "serialize_secret")]
        number: SecretString,
        first_name: String,
        last_name: String,
        month: u8,
        year: u16,
        #[serde(
            skip_serializing_if = "Option::is_none",
            serialize_with = "serialize_optional_secret"
        )]
        verification_value: Option<SecretString>,
    },
}

impl From<&CreditCard> for PaymentDetails {
    fn from(card: &CreditCard) -> Self {
        PaymentDetails::Card {
            number: card.number.clone(),
            first_name: card.first_name.clone(),
            last_name: card.last_name.clone(),
            month: card.month,
            year: card.year,
            verification_value: card.verification_value.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct CapturePayload {
    pub authorization: String,
    /// Present only for partial captures
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amount: Option<u64>,
}

#[derive(Debug, Clone, Serialize)]
pub struct RefundPayload {
    pub authorization: String,
    pub amount: u64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct VoidPayload {
    pub authorization: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct StorePayload {
    pub card: StoreCard,
    /// Lower-cased customer country
    #[serde(skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct StoreCard {
    #[serde(flatten)]
    pub details: PaymentDetails,
    #[serde(serialize_with = "serialize_brand_code")]
    pub brand: CardBrand,
}

impl From<&CreditCard> for StoreCard {
    fn from(card: &CreditCard) -> Self {
        StoreCard {
            details: PaymentDetails::from(card),
            brand: card.brand,
        }
    }
}

// Card secrets leave their wrapper only on the way into a request body.
fn serialize_secret<S: Serializer>(secret: &SecretString, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(secret.expose_secret())
}

fn serialize_optional_secret<S: Serializer>(
    secret: &Option<SecretString>,
    serializer: S,
) -> Result<S::Ok, S::Error> {
    match secret {
        Some(secret) => serializer.serialize_str(secret.expose_secret()),
        None => serializer.serialize_none(),
    }
}

fn serialize_brand_code<S: Serializer>(brand: &CardBrand, serializer: S) -> Result<S::Ok, S::Error> {
    serializer.serialize_str(brand.code())
}
