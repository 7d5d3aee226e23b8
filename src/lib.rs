//! Request payload adapter for the EBANX card API.
//!
//! Builds request bodies, URLs, verbs and headers for purchase, authorize,
//! capture, refund, void and store, and extracts authorization references
//! from decoded responses. Transport is left to the caller.

pub mod error;
pub mod payments;

#[cfg(feature = "server")]
pub mod api;
#[cfg(feature = "server")]
pub mod config;

pub use error::{GatewayError, GatewayResult};
pub use payments::options::GatewayOptions;
pub use payments::providers::{EbanxConfig, EbanxGateway};
pub use payments::traits::PaymentGateway;
pub use payments::types::{
    CardBrand, CreditCard, Operation, OperationRequest, PaymentInstrument, PreparedRequest,
};
