use thiserror::Error;

pub type GatewayResult<T> = Result<T, GatewayError>;

/// Errors raised at the edges of the adapter.
///
/// Payload builders never fail; these only surface while constructing a
/// gateway, loading configuration or rendering a payload as JSON.
#[derive(Debug, Error)]
pub enum GatewayError {
    #[error("Integration key is not a valid header value")]
    InvalidIntegrationKey,

    #[error("Configuration error: {message}")]
    Configuration { message: String },

    #[error("Serialization error: {message}")]
    Serialization { message: String },
}

impl GatewayError {
    pub fn configuration(message: impl Into<String>) -> Self {
        Self::Configuration {
            message: message.into(),
        }
    }

    pub fn serialization(message: impl Into<String>) -> Self {
        Self::Serialization {
            message: message.into(),
        }
    }
}

impl From<serde_json::Error> for GatewayError {
    fn from(err: serde_json::Error) -> Self {
        GatewayError::serialization(format!("JSON error: {}", err))
    }
}

impl From<http::header::InvalidHeaderValue> for GatewayError {
    fn from(_: http::header::InvalidHeaderValue) -> Self {
        GatewayError::InvalidIntegrationKey
    }
}
