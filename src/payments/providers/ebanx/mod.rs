//! EBANX payment gateway implementation
//!
//! Builds request bodies, URLs and headers for EBANX's card channel and reads
//! authorization references out of its responses. Sending the request is left
//! to the caller.

pub mod payloads;

use crate::error::{GatewayError, GatewayResult};
use crate::payments::options::{GatewayOptions, CURRENCY};
use crate::payments::traits::PaymentGateway;
use crate::payments::types::{CardBrand, CreditCard, Operation, PaymentInstrument};
use http::header::{AUTHORIZATION, CONTENT_TYPE};
use http::{HeaderMap, HeaderName, HeaderValue};
use secrecy::{ExposeSecret, SecretString};
use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, info, warn};

pub use payloads::{
    CapturePayload, CardBlock, ChargePayload, Payload, PaymentDetails, RefundPayload, StoreCard,
    StorePayload, VoidPayload,
};

pub const DEFAULT_TEST_URL: &str = "https://sandbox.ebanxpay.com/channels/spreedly/";
pub const DEFAULT_LIVE_URL: &str = "https://api.ebanxpay.com/channels/spreedly/";

pub const CLIENT_USER_AGENT_HEADER: HeaderName =
    HeaderName::from_static("x-ebanx-client-user-agent");
pub const PROCESSING_TYPE_HEADER: HeaderName =
    HeaderName::from_static("x-ebanx-api-processing-type");

const LOCAL_PROCESSING: &str = "local";
const CLIENT_USER_AGENT: &str = concat!(env!("CARGO_PKG_NAME"), "/", env!("CARGO_PKG_VERSION"));

/// EBANX gateway configuration
#[derive(Debug, Clone, Deserialize)]
pub struct EbanxConfig {
    /// Merchant integration key, sent verbatim as the `authorization` header
    pub integration_key: SecretString,
    /// Sandbox base URL, ending with `/`
    #[serde(default = "default_test_url")]
    pub test_url: String,
    /// Production base URL, ending with `/`
    #[serde(default = "default_live_url")]
    pub live_url: String,
    /// Route requests to the sandbox
    #[serde(default)]
    pub test_mode: bool,
}

fn default_test_url() -> String {
    DEFAULT_TEST_URL.to_string()
}

fn default_live_url() -> String {
    DEFAULT_LIVE_URL.to_string()
}

impl Default for EbanxConfig {
    fn default() -> Self {
        Self {
            integration_key: SecretString::from(""),
            test_url: default_test_url(),
            live_url: default_live_url(),
            test_mode: false,
        }
    }
}

impl EbanxConfig {
    pub fn new(integration_key: impl Into<String>) -> Self {
        Self {
            integration_key: SecretString::from(integration_key.into()),
            ..Default::default()
        }
    }

    pub fn validate(&self) -> GatewayResult<()> {
        if self.integration_key.expose_secret().trim().is_empty() {
            return Err(GatewayError::configuration(
                "EBANX integration key cannot be empty",
            ));
        }

        for (name, url) in [("test_url", &self.test_url), ("live_url", &self.live_url)] {
            if !(url.starts_with("https://") || url.starts_with("http://")) {
                return Err(GatewayError::configuration(format!(
                    "{} must be an http(s) URL, got {}",
                    name, url
                )));
            }
            if !url.ends_with('/') {
                return Err(GatewayError::configuration(format!(
                    "{} must end with '/', got {}",
                    name, url
                )));
            }
        }

        Ok(())
    }
}

/// EBANX request builder
pub struct EbanxGateway {
    integration_key: HeaderValue,
    test_url: String,
    live_url: String,
    test_mode: bool,
}

impl EbanxGateway {
    /// Create a gateway from a validated configuration
    pub fn new(config: EbanxConfig) -> GatewayResult<Self> {
        config.validate()?;

        let mut integration_key = HeaderValue::from_str(config.integration_key.expose_secret())?;
        integration_key.set_sensitive(true);

        info!(
            "EBANX gateway initialized: test_mode={}, test_url={}, live_url={}",
            config.test_mode, config.test_url, config.live_url
        );

        Ok(Self {
            integration_key,
            test_url: config.test_url,
            live_url: config.live_url,
            test_mode: config.test_mode,
        })
    }

    /// Whether the configuration routes to the sandbox by default
    pub fn is_test(&self) -> bool {
        self.test_mode
    }

    /// Authorization reference carried by a decoded response
    ///
    /// Store references need the brand of the stored card; every other
    /// operation reads `payment.hash`. Missing fields yield `None`.
    pub fn reference_from(
        &self,
        operation: Operation,
        store_brand: Option<CardBrand>,
        response: &Value,
    ) -> Option<String> {
        if operation == Operation::Store {
            let Some(brand) = store_brand else {
                warn!("Store authorization requested without a card brand");
                return None;
            };
            let token = response.get("token").and_then(Value::as_str)?;
            return Some(format!("{}|{}", token, brand.code()));
        }

        response
            .get("payment")
            .and_then(|payment| payment.get("hash"))
            .and_then(Value::as_str)
            .map(str::to_string)
    }

    fn charge(
        &self,
        amount: u64,
        currency: &str,
        payment: PaymentInstrument,
        mut options: GatewayOptions,
    ) -> ChargePayload {
        options.insert(CURRENCY, currency);

        ChargePayload {
            amount,
            options,
            creditcard: CardBlock::from(payment),
        }
    }
}

impl PaymentGateway for EbanxGateway {
    type Payload = Payload;

    fn purchase(
        &self,
        amount: u64,
        currency: &str,
        payment: PaymentInstrument,
        options: GatewayOptions,
    ) -> Payload {
        debug!("Building EBANX purchase: amount={} currency={}", amount, currency);
        Payload::Charge(self.charge(amount, currency, payment, options))
    }

    fn authorize(
        &self,
        amount: u64,
        currency: &str,
        payment: PaymentInstrument,
        options: GatewayOptions,
    ) -> Payload {
        debug!("Building EBANX authorize: amount={} currency={}", amount, currency);
        let mut payload = self.charge(amount, currency, payment, options);
        payload.creditcard.auto_capture = Some(false);
        Payload::Charge(payload)
    }

    fn capture(&self, amount: u64, authorization: &str, options: &GatewayOptions) -> Payload {
        // The processor reads a present amount as a partial capture request.
        let amount = options.include_capture_amount().then_some(amount);
        debug!("Building EBANX capture: partial={}", amount.is_some());

        Payload::Capture(CapturePayload {
            authorization: authorization.to_string(),
            amount,
        })
    }

    fn refund(&self, amount: u64, authorization: &str, options: &GatewayOptions) -> Payload {
        debug!("Building EBANX refund: amount={}", amount);
        Payload::Refund(RefundPayload {
            authorization: authorization.to_string(),
            amount,
            description: options.description().map(str::to_string),
        })
    }

    fn void(&self, authorization: &str, _options: &GatewayOptions) -> Payload {
        debug!("Building EBANX void");
        Payload::Void(VoidPayload {
            authorization: authorization.to_string(),
        })
    }

    fn store(&self, card: &CreditCard, options: &GatewayOptions) -> Payload {
        let country = options.customer_country();
        debug!(
            "Building EBANX store: brand={} country={:?}",
            card.brand, country
        );

        Payload::Store(StorePayload {
            card: StoreCard::from(card),
            country,
        })
    }

    fn url_for(&self, is_test: bool, operation: Operation) -> String {
        let base = if is_test { &self.test_url } else { &self.live_url };
        format!("{}{}", base, operation.path())
    }

    fn headers(&self, payload: &Payload) -> HeaderMap {
        let mut headers = HeaderMap::new();
        headers.insert(
            CLIENT_USER_AGENT_HEADER,
            HeaderValue::from_static(CLIENT_USER_AGENT),
        );
        headers.insert(AUTHORIZATION, self.integration_key.clone());
        headers.insert(CONTENT_TYPE, HeaderValue::from_static("application/json"));

        let local = payload
            .options()
            .and_then(GatewayOptions::processing_type)
            .is_some_and(|processing_type| processing_type == LOCAL_PROCESSING);
        if local {
            headers.insert(
                PROCESSING_TYPE_HEADER,
                HeaderValue::from_static(LOCAL_PROCESSING),
            );
        }

        headers
    }

    fn authorization_from(
        &self,
        operation: Operation,
        payload: &Payload,
        response: &Value,
    ) -> Option<String> {
        self.reference_from(operation, payload.store_brand(), response)
    }
}
