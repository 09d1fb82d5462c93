//! Seam between the lifecycle controller and the external model.

use async_trait::async_trait;
use thiserror::Error;

use crate::domain::{credential::ApiKey, preferences::Preferences};

/// Fallback description when the model rejects a request without saying why.
pub const GENERIC_GENERATION_FAILURE: &str = "Failed to generate business plan.";

/// Failure raised by a [`StrategyGenerator`].
///
/// `Display` renders only the human-readable description so it can be shown
/// to the user as is.
#[derive(Debug, Error)]
pub enum GenerationError {
    #[error("{message}")]
    Transport { message: String },
    #[error("{message}")]
    Model {
        status: Option<u16>,
        message: String,
    },
    #[error("{message}")]
    Decode { message: String },
}

impl GenerationError {
    pub fn transport(message: impl Into<String>) -> Self {
        Self::Transport {
            message: message.into(),
        }
    }

    /// Model rejection; an empty description is replaced by the generic one.
    pub fn model(status: Option<u16>, message: impl Into<String>) -> Self {
        let message = message.into();
        let message = if message.trim().is_empty() {
            GENERIC_GENERATION_FAILURE.to_string()
        } else {
            message
        };
        Self::Model { status, message }
    }

    pub fn decode(message: impl Into<String>) -> Self {
        Self::Decode {
            message: message.into(),
        }
    }

    pub fn kind(&self) -> &'static str {
        match self {
            GenerationError::Transport { .. } => "transport",
            GenerationError::Model { .. } => "model",
            GenerationError::Decode { .. } => "decode",
        }
    }
}

/// Produces a strategy document for a set of preferences.
///
/// `Ok(None)` and `Ok(Some(""))` both mean the model answered with no text;
/// the caller decides how to present that.
#[async_trait]
pub trait StrategyGenerator: Send + Sync {
    async fn generate(
        &self,
        api_key: &ApiKey,
        preferences: &Preferences,
    ) -> Result<Option<String>, GenerationError>;
}
