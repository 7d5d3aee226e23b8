//! Payment gateway trait definitions
//!
//! Defines the interface a transport collaborator drives: build a payload,
//! resolve where and how to send it, then pull the authorization reference
//! out of the decoded response.

use crate::error::GatewayResult;
use crate::payments::options::GatewayOptions;
use crate::payments::types::{
    CreditCard, Operation, OperationRequest, PaymentInstrument, PreparedRequest,
};
use http::{HeaderMap, Method};
use serde::Serialize;
use serde_json::Value;
use tracing::info;

/// Request builder for a single processor integration
///
/// Every method is a pure function of its arguments and the gateway's
/// immutable configuration, so one instance can be shared between callers.
pub trait PaymentGateway: Send + Sync {
    /// Processor-specific request body
    type Payload: Serialize;

    /// Charge the instrument immediately
    ///
    /// Builds a sale that is captured as soon as the processor approves it.
    ///
    /// # Arguments
    /// * `amount` - Amount in minor currency units
    /// * `currency` - ISO 4217 code, merged into the forwarded options
    /// * `payment` - Raw card or a stored `token[|brand_code]` reference
    /// * `options` - Merchant options forwarded verbatim
    ///
    /// # Returns
    /// * `Self::Payload` - Charge body for the processor's charge endpoint
    fn purchase(
        &self,
        amount: u64,
        currency: &str,
        payment: PaymentInstrument,
        options: GatewayOptions,
    ) -> Self::Payload;

    /// Place a hold on the instrument without capturing it
    ///
    /// # Arguments
    /// * `amount` - Amount in minor currency units
    /// * `currency` - ISO 4217 code, merged into the forwarded options
    /// * `payment` - Raw card or a stored `token[|brand_code]` reference
    /// * `options` - Merchant options forwarded verbatim
    ///
    /// # Returns
    /// * `Self::Payload` - Charge body with auto-capture disabled
    fn authorize(
        &self,
        amount: u64,
        currency: &str,
        payment: PaymentInstrument,
        options: GatewayOptions,
    ) -> Self::Payload;

    /// Capture a previous authorization
    ///
    /// # Arguments
    /// * `amount` - Amount to capture, sent only when `include_capture_amount` is set
    /// * `authorization` - Reference returned by `authorize`
    /// * `options` - Merchant options; only read, never forwarded
    ///
    /// # Returns
    /// * `Self::Payload` - Capture body
    fn capture(&self, amount: u64, authorization: &str, options: &GatewayOptions) -> Self::Payload;

    /// Refund a previous charge
    ///
    /// # Arguments
    /// * `amount` - Amount to refund in minor currency units
    /// * `authorization` - Reference of the charge being refunded
    /// * `options` - Merchant options; `description` is carried when present
    ///
    /// # Returns
    /// * `Self::Payload` - Refund body
    fn refund(&self, amount: u64, authorization: &str, options: &GatewayOptions) -> Self::Payload;

    /// Cancel a previous authorization
    ///
    /// # Arguments
    /// * `authorization` - Reference of the authorization being voided
    /// * `options` - Merchant options; unused by the void body
    ///
    /// # Returns
    /// * `Self::Payload` - Void body
    fn void(&self, authorization: &str, options: &GatewayOptions) -> Self::Payload;

    /// Tokenize a card for later use
    ///
    /// # Arguments
    /// * `card` - Card details to store
    /// * `options` - Merchant options; the customer country is resolved from them
    ///
    /// # Returns
    /// * `Self::Payload` - Store body carrying the card and its brand code
    fn store(&self, card: &CreditCard, options: &GatewayOptions) -> Self::Payload;

    /// Destination URL for `operation` in the test or live environment
    ///
    /// # Arguments
    /// * `is_test` - Selects the sandbox base URL instead of the live one
    /// * `operation` - Operation whose path is appended to the base URL
    ///
    /// # Returns
    /// * `String` - Absolute endpoint URL
    fn url_for(&self, is_test: bool, operation: Operation) -> String;

    /// Request headers for `payload`
    ///
    /// # Arguments
    /// * `payload` - Body being sent; charge options may add headers
    ///
    /// # Returns
    /// * `HeaderMap` - Authorization, content type and client headers
    fn headers(&self, payload: &Self::Payload) -> HeaderMap;

    /// Authorization reference carried by `response`, if any
    ///
    /// # Arguments
    /// * `operation` - Operation the response belongs to
    /// * `payload` - Payload that was sent, consulted for store brands
    /// * `response` - Decoded processor response
    ///
    /// # Returns
    /// * `Option<String>` - Reference for follow-up operations, `None` when absent
    fn authorization_from(
        &self,
        operation: Operation,
        payload: &Self::Payload,
        response: &Value,
    ) -> Option<String>;

    /// HTTP verb for `operation`
    ///
    /// # Arguments
    /// * `operation` - Operation being sent
    ///
    /// # Returns
    /// * `Method` - Verb from the operation's descriptor
    fn http_method(&self, operation: Operation) -> Method {
        operation.method()
    }

    /// JSON request body for `payload`
    ///
    /// # Arguments
    /// * `payload` - Body to serialize
    ///
    /// # Returns
    /// * `String` - Compact JSON, or a serialization error
    fn post_data(&self, payload: &Self::Payload) -> GatewayResult<String> {
        Ok(serde_json::to_string(payload)?)
    }

    /// Dispatch `request` to the matching builder
    fn build(&self, request: OperationRequest) -> Self::Payload {
        match request {
            OperationRequest::Purchase {
                amount,
                currency,
                payment,
                options,
            } => self.purchase(amount, &currency, payment, options),
            OperationRequest::Authorize {
                amount,
                currency,
                payment,
                options,
            } => self.authorize(amount, &currency, payment, options),
            OperationRequest::Capture {
                amount,
                authorization,
                options,
            } => self.capture(amount, &authorization, &options),
            OperationRequest::Refund {
                amount,
                authorization,
                options,
            } => self.refund(amount, &authorization, &options),
            OperationRequest::Void {
                authorization,
                options,
            } => self.void(&authorization, &options),
            OperationRequest::Store { card, options } => self.store(&card, &options),
        }
    }

    /// Build the payload for `request` and resolve URL, verb, headers and body
    ///
    /// # Arguments
    /// * `is_test` - Selects the sandbox environment
    /// * `request` - Operation and its inputs
    ///
    /// # Returns
    /// * `PreparedRequest` - Everything a transport needs to send the request
    fn prepare(&self, is_test: bool, request: OperationRequest) -> GatewayResult<PreparedRequest> {
        let operation = request.operation();
        let payload = self.build(request);

        let prepared = PreparedRequest {
            operation,
            url: self.url_for(is_test, operation),
            method: self.http_method(operation),
            headers: self.headers(&payload),
            body: self.post_data(&payload)?,
        };

        info!(
            "Prepared {} request: {} {}",
            operation, prepared.method, prepared.url
        );

        Ok(prepared)
    }
}
