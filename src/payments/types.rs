//! Payment types shared by the gateway adapters
//!
//! Instruments, brands and operations are closed enumerations, resolved once
//! when input is deserialized.

use crate::payments::options::GatewayOptions;
use http::{HeaderMap, Method};
use secrecy::SecretString;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Card networks accepted by the processor
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CardBrand {
    Visa,
    #[serde(alias = "mastercard", alias = "master_card")]
    Master,
    #[serde(alias = "amex")]
    AmericanExpress,
    Discover,
    #[serde(alias = "diners")]
    DinersClub,
}

impl CardBrand {
    /// Processor-specific brand code
    pub fn code(self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Master => "master_card",
            CardBrand::AmericanExpress => "amex",
            CardBrand::Discover => "discover",
            CardBrand::DinersClub => "diners",
        }
    }

    /// Generic brand name used by callers
    pub fn name(self) -> &'static str {
        match self {
            CardBrand::Visa => "visa",
            CardBrand::Master => "master",
            CardBrand::AmericanExpress => "american_express",
            CardBrand::Discover => "discover",
            CardBrand::DinersClub => "diners_club",
        }
    }
}

impl fmt::Display for CardBrand {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Structured card details supplied by the caller
#[derive(Debug, Clone, Deserialize)]
pub struct CreditCard {
    /// Primary account number
    pub number: SecretString,
    /// Cardholder first name
    pub first_name: String,
    /// Cardholder last name
    pub last_name: String,
    /// Expiry month (1-12)
    pub month: u8,
    /// Four-digit expiry year
    pub year: u16,
    /// CVV/CVC, when collected
    #[serde(default)]
    pub verification_value: Option<SecretString>,
    /// Card network
    pub brand: CardBrand,
}

/// Payment instrument for charge operations
///
/// A previously stored reference arrives as `token[|brand_code]` and is split
/// on the first pipe when deserialized or built with [`PaymentInstrument::from_stored`].
#[derive(Debug, Clone, Deserialize)]
#[serde(from = "RawInstrument")]
pub enum PaymentInstrument {
    /// Opaque token issued by a previous store, with the processor brand code
    Token {
        token: String,
        brand: Option<String>,
    },
    /// Raw card details
    Card(CreditCard),
}

impl PaymentInstrument {
    /// Parse a stored authorization reference of the form `token[|brand_code]`.
    ///
    /// The brand half is already in processor code form and is kept verbatim.
    pub fn from_stored(reference: &str) -> Self {
        match reference.split_once('|') {
            Some((token, brand)) => PaymentInstrument::Token {
                token: token.to_string(),
                brand: (!brand.is_empty()).then(|| brand.to_string()),
            },
            None => PaymentInstrument::Token {
                token: reference.to_string(),
                brand: None,
            },
        }
    }
}

impl From<CreditCard> for PaymentInstrument {
    fn from(card: CreditCard) -> Self {
        PaymentInstrument::Card(card)
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum RawInstrument {
    Stored(String),
    Card(CreditCard),
}

impl From<RawInstrument> for PaymentInstrument {
    fn from(raw: RawInstrument) -> Self {
        match raw {
            RawInstrument::Stored(reference) => PaymentInstrument::from_stored(&reference),
            RawInstrument::Card(card) => PaymentInstrument::Card(card),
        }
    }
}

/// Operations supported by the adapter
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Operation {
    Purchase,
    Authorize,
    Capture,
    Refund,
    Void,
    Store,
}

/// Static routing data for one operation
#[derive(Debug)]
pub struct OperationDescriptor {
    /// Path segment appended to the base URL
    pub path: &'static str,
    /// HTTP verb used for the request
    pub method: Method,
}

// Indexed by `Operation as usize`.
static DESCRIPTORS: [OperationDescriptor; 6] = [
    OperationDescriptor {
        path: "charge",
        method: Method::POST,
    },
    OperationDescriptor {
        path: "charge",
        method: Method::POST,
    },
    OperationDescriptor {
        path: "capture",
        method: Method::POST,
    },
    OperationDescriptor {
        path: "refund",
        method: Method::POST,
    },
    OperationDescriptor {
        path: "void",
        method: Method::POST,
    },
    OperationDescriptor {
        path: "store",
        method: Method::POST,
    },
];

impl Operation {
    pub const ALL: [Operation; 6] = [
        Operation::Purchase,
        Operation::Authorize,
        Operation::Capture,
        Operation::Refund,
        Operation::Void,
        Operation::Store,
    ];

    pub fn descriptor(self) -> &'static OperationDescriptor {
        &DESCRIPTORS[self as usize]
    }

    pub fn path(self) -> &'static str {
        self.descriptor().path
    }

    pub fn method(self) -> Method {
        self.descriptor().method.clone()
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Operation::Purchase => "purchase",
            Operation::Authorize => "authorize",
            Operation::Capture => "capture",
            Operation::Refund => "refund",
            Operation::Void => "void",
            Operation::Store => "store",
        }
    }
}

impl fmt::Display for Operation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Inputs for a single gateway operation
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "operation", rename_all = "snake_case")]
pub enum OperationRequest {
    Purchase {
        /// Amount in minor currency units
        amount: u64,
        currency: String,
        payment: PaymentInstrument,
        #[serde(default)]
        options: GatewayOptions,
    },
    Authorize {
        amount: u64,
        currency: String,
        payment: PaymentInstrument,
        #[serde(default)]
        options: GatewayOptions,
    },
    Capture {
        amount: u64,
        authorization: String,
        #[serde(default)]
        options: GatewayOptions,
    },
    Refund {
        amount: u64,
        authorization: String,
        #[serde(default)]
        options: GatewayOptions,
    },
    Void {
        authorization: String,
        #[serde(default)]
        options: GatewayOptions,
    },
    Store {
        card: CreditCard,
        #[serde(default)]
        options: GatewayOptions,
    },
}

impl OperationRequest {
    pub fn operation(&self) -> Operation {
        match self {
            OperationRequest::Purchase { .. } => Operation::Purchase,
            OperationRequest::Authorize { .. } => Operation::Authorize,
            OperationRequest::Capture { .. } => Operation::Capture,
            OperationRequest::Refund { .. } => Operation::Refund,
            OperationRequest::Void { .. } => Operation::Void,
            OperationRequest::Store { .. } => Operation::Store,
        }
    }
}

/// A fully resolved request, ready for a transport to send
#[derive(Debug, Clone)]
pub struct PreparedRequest {
    pub operation: Operation,
    pub url: String,
    pub method: Method,
    pub headers: HeaderMap,
    /// JSON request body
    pub body: String,
}

#[cfg(test)]
mod tests {
    use super::*;
    use secrecy::ExposeSecret;

    fn visa_card() -> CreditCard {
        CreditCard {
            number: "4111111111111111".into(),
            first_name: "Jose".to_string(),
            last_name: "Silva".to_string(),
            month: 9,
            year: 2030,
            verification_value: Some("123".into()),
            brand: CardBrand::Visa,
        }
    }

    fn token_parts(instrument: &PaymentInstrument) -> Option<(&str, Option<&str>)> {
        match instrument {
            PaymentInstrument::Token { token, brand } => Some((token.as_str(), brand.as_deref())),
            PaymentInstrument::Card(_) => None,
        }
    }

    #[test]
    fn test_brand_codes() {
        assert_eq!(CardBrand::Visa.code(), "visa");
        assert_eq!(CardBrand::Master.code(), "master_card");
        assert_eq!(CardBrand::AmericanExpress.code(), "amex");
        assert_eq!(CardBrand::Discover.code(), "discover");
        assert_eq!(CardBrand::DinersClub.code(), "diners");
    }

    #[test]
    fn test_brand_accepts_caller_aliases() {
        let brand: CardBrand = serde_json::from_str("\"mastercard\"").unwrap();
        assert_eq!(brand, CardBrand::Master);
        let brand: CardBrand = serde_json::from_str("\"american_express\"").unwrap();
        assert_eq!(brand, CardBrand::AmericanExpress);
        assert!(serde_json::from_str::<CardBrand>("\"elo\"").is_err());
    }

    #[test]
    fn test_stored_reference_splits_on_first_pipe() {
        assert_eq!(
            token_parts(&PaymentInstrument::from_stored("tok_abc|visa")),
            Some(("tok_abc", Some("visa")))
        );
        assert_eq!(
            token_parts(&PaymentInstrument::from_stored("tok_abc|master_card|x")),
            Some(("tok_abc", Some("master_card|x")))
        );
    }

    #[test]
    fn test_stored_reference_without_brand() {
        for reference in ["tok_abc", "tok_abc|"] {
            assert_eq!(
                token_parts(&PaymentInstrument::from_stored(reference)),
                Some(("tok_abc", None))
            );
        }
    }

    #[test]
    fn test_instrument_deserializes_string_or_card() {
        let token: PaymentInstrument = serde_json::from_str("\"tok_1|amex\"").unwrap();
        assert_eq!(token_parts(&token), Some(("tok_1", Some("amex"))));

        let card: PaymentInstrument = serde_json::from_value(serde_json::json!({
            "number": "4111111111111111",
            "first_name": "Jose",
            "last_name": "Silva",
            "month": 9,
            "year": 2030,
            "verification_value": "123",
            "brand": "visa"
        }))
        .unwrap();
        let PaymentInstrument::Card(card) = card else {
            panic!("expected a card instrument");
        };
        assert_eq!(card.number.expose_secret(), "4111111111111111");
        assert_eq!(
            card.verification_value.as_ref().map(|cvv| cvv.expose_secret()),
            Some("123")
        );
        assert_eq!(card.brand, CardBrand::Visa);
        assert_eq!((card.month, card.year), (9, 2030));
    }

    #[test]
    fn test_card_debug_redacts_secrets() {
        let rendered = format!("{:?}", visa_card());
        assert!(!rendered.contains("4111111111111111"));
        assert!(!rendered.contains("\"123\""));
        assert!(rendered.contains("REDACTED"));
        assert!(rendered.contains("Jose"));
    }

    #[test]
    fn test_operation_descriptors() {
        assert_eq!(Operation::Purchase.path(), "charge");
        assert_eq!(Operation::Authorize.path(), "charge");
        assert_eq!(Operation::Capture.path(), "capture");
        assert_eq!(Operation::Refund.path(), "refund");
        assert_eq!(Operation::Void.path(), "void");
        assert_eq!(Operation::Store.path(), "store");
        for operation in Operation::ALL {
            assert_eq!(operation.method(), Method::POST);
        }
    }

    #[test]
    fn test_operation_request_tag() {
        let request: OperationRequest = serde_json::from_value(serde_json::json!({
            "operation": "void",
            "authorization": "hash_1"
        }))
        .unwrap();
        assert_eq!(request.operation(), Operation::Void);
    }
}
