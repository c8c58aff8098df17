use serde::{Deserialize, Serialize};
use thiserror::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ErrorCode {
    InvalidConfiguration,
}

#[derive(Debug, Error)]
pub enum CarouselError {
    #[error("invalid carousel configuration: {reason}")]
    InvalidConfiguration { reason: String },
    #[error("failed to load carousel settings: {source}")]
    Settings {
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

impl CarouselError {
    pub fn invalid_configuration(reason: impl Into<String>) -> Self {
        Self::InvalidConfiguration {
            reason: reason.into(),
        }
    }

    pub fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidConfiguration { .. } | Self::Settings { .. } => {
                ErrorCode::InvalidConfiguration
            }
        }
    }
}

/// Serializable view of a [`CarouselError`] for hosts that report errors as data.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ErrorReport {
    pub code: ErrorCode,
    pub message: String,
}

impl From<&CarouselError> for ErrorReport {
    fn from(value: &CarouselError) -> Self {
        Self {
            code: value.code(),
            message: value.to_string(),
        }
    }
}
