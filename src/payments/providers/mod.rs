//! Payment gateway implementations
//!
//! Concrete implementations of the PaymentGateway trait for different processors.

pub mod ebanx;

pub use ebanx::{EbanxConfig, EbanxGateway};
