//! Error types for the document model

use thiserror::Error;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum ModelError {
    #[error("Unknown element type: {0}")]
    UnknownElementType(String),

    #[error("Invalid settings for {element_type}: {reason}")]
    InvalidSettings {
        element_type: String,
        reason: String,
    },

    #[error("Invalid page address: {0}")]
    InvalidPageAddress(String),
}

impl ModelError {
    pub(crate) fn invalid_settings(element_type: impl Into<String>, reason: impl ToString) -> Self {
        ModelError::InvalidSettings {
            element_type: element_type.into(),
            reason: reason.to_string(),
        }
    }
}
