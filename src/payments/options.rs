//! Free-form merchant options
//!
//! Options are an open JSON object forwarded into charge payloads. Only a few
//! keys are interpreted; lookups on missing or mistyped keys yield `None`.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

pub const CURRENCY: &str = "currency";
pub const INCLUDE_CAPTURE_AMOUNT: &str = "include_capture_amount";
pub const DESCRIPTION: &str = "description";
pub const COUNTRY: &str = "country";
pub const BILLING_ADDRESS: &str = "billing_address";
pub const PROCESSING_TYPE: &str = "processing_type";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct GatewayOptions(Map<String, Value>);

impl GatewayOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Builder-style insert
    pub fn with(mut self, key: impl Into<String>, value: impl Into<Value>) -> Self {
        self.0.insert(key.into(), value.into());
        self
    }

    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) -> Option<Value> {
        self.0.insert(key.into(), value.into())
    }

    /// String value for `key`; non-string values are treated as absent.
    pub fn string(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// True when the value renders as the literal `true`, either as a JSON
    /// boolean or as a string.
    pub fn is_true(&self, key: &str) -> bool {
        match self.0.get(key) {
            Some(Value::Bool(flag)) => *flag,
            Some(Value::String(s)) => s == "true",
            _ => false,
        }
    }

    pub fn include_capture_amount(&self) -> bool {
        self.is_true(INCLUDE_CAPTURE_AMOUNT)
    }

    pub fn description(&self) -> Option<&str> {
        self.string(DESCRIPTION)
    }

    pub fn processing_type(&self) -> Option<&str> {
        self.string(PROCESSING_TYPE).filter(|s| !s.is_empty())
    }

    /// Lower-cased customer country.
    ///
    /// An explicit `country` wins over `billing_address.country`. A blank or
    /// whitespace-only explicit `country` is treated as unset, so the billing
    /// address is consulted instead of yielding an empty string. A blank
    /// billing country, or a missing or non-object billing address, yields
    /// `None`, and the store payload then omits `country`.
    pub fn customer_country(&self) -> Option<String> {
        let explicit = self.string(COUNTRY).filter(|c| !c.trim().is_empty());
        let billing = || {
            self.0
                .get(BILLING_ADDRESS)
                .and_then(|address| address.get(COUNTRY))
                .and_then(Value::as_str)
                .filter(|c| !c.trim().is_empty())
        };

        explicit.or_else(billing).map(str::to_lowercase)
    }
}
