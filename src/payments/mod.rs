//! Payment gateway integration module
//!
//! This module turns normalized payment inputs into processor requests and
//! reads authorization references back out of processor responses.

pub mod options;
pub mod providers;
pub mod traits;
pub mod types;
