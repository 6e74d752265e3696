//! The unified error type of the client.
//!
//! # Example
//!
//! ```rust,ignore
//! use amazon_product::{ApiError, AwsErrorKind};
//!
//! match api.item_lookup("9780747532743", &[("IdType", "ISBN")]).await {
//!     Ok(envelope) => { /* navigate the envelope */ }
//!     Err(e) if e.aws_kind() == Some(AwsErrorKind::NotEnoughParameters) => {
//!         println!("add a SearchIndex: {}", e);
//!     }
//!     Err(e) => return Err(e),
//! }
//! ```

use thiserror::Error;

use crate::api::cart::CartItemsError;
use crate::clients::HttpError;
use crate::error::ConfigError;
use crate::operations::{Operation, UnknownOperationError};
use crate::response::{AwsError, AwsErrorKind};
use crate::xml::XmlError;

/// Every way a call can fail.
///
/// Client-side checks (`Config`, `Cart`, `UnknownOperation`,
/// `DeprecatedOperation`, `MissingParameter`) fail before anything is sent.
/// Nothing is retried.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Invalid configuration.
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Transport failure or a non-2xx response without an error envelope.
    #[error(transparent)]
    Http(#[from] HttpError),

    /// The response body could not be parsed.
    #[error("Failed to parse response: {0}")]
    Xml(#[from] XmlError),

    /// The service reported an error.
    #[error(transparent)]
    Aws(#[from] AwsError),

    /// Cart items failed validation.
    #[error(transparent)]
    Cart(#[from] CartItemsError),

    /// The operation name is not in the registry.
    #[error(transparent)]
    UnknownOperation(#[from] UnknownOperationError),

    /// The operation has been retired by the service.
    #[error("Operation '{operation}' has been retired by the service and can no longer be called.")]
    DeprecatedOperation {
        /// The retired operation.
        operation: Operation,
    },

    /// A required parameter is missing or blank.
    #[error("Operation '{operation}' requires the '{param}' parameter.")]
    MissingParameter {
        /// The operation being called.
        operation: Operation,
        /// The missing parameter.
        param: &'static str,
    },
}

impl ApiError {
    /// Returns the vendor error code, for service-reported errors.
    #[must_use]
    pub fn aws_code(&self) -> Option<&str> {
        match self {
            Self::Aws(e) => Some(&e.code),
            _ => None,
        }
    }

    /// Returns the classified kind, for service-reported errors.
    #[must_use]
    pub const fn aws_kind(&self) -> Option<AwsErrorKind> {
        match self {
            Self::Aws(e) => Some(e.kind),
            _ => None,
        }
    }

    /// Returns `true` if the error was raised before any request was sent.
    #[must_use]
    pub const fn is_client_side(&self) -> bool {
        matches!(
            self,
            Self::Config(_)
                | Self::Cart(_)
                | Self::UnknownOperation(_)
                | Self::DeprecatedOperation { .. }
                | Self::MissingParameter { .. }
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::response::classify;

    #[test]
    fn test_aws_accessors() {
        let error: ApiError = classify(None, "AWS.InvalidResponseGroup", "bad group").into();
        assert_eq!(error.aws_code(), Some("AWS.InvalidResponseGroup"));
        assert_eq!(error.aws_kind(), Some(AwsErrorKind::InvalidResponseGroup));
        assert!(!error.is_client_side());
        assert_eq!(
            error.to_string(),
            "InvalidResponseGroup (AWS.InvalidResponseGroup): bad group"
        );
    }

    #[test]
    fn test_deprecated_operation_message() {
        let error = ApiError::DeprecatedOperation {
            operation: Operation::ListLookup,
        };
        assert!(error.to_string().contains("'ListLookup'"));
        assert!(error.is_client_side());
        assert_eq!(error.aws_code(), None);
    }

    #[test]
    fn test_missing_parameter_message() {
        let error = ApiError::MissingParameter {
            operation: Operation::ItemSearch,
            param: "SearchIndex",
        };
        assert_eq!(
            error.to_string(),
            "Operation 'ItemSearch' requires the 'SearchIndex' parameter."
        );
    }

    #[test]
    fn test_config_error_converts() {
        let error: ApiError = ConfigError::EmptySecretKey.into();
        assert!(matches!(error, ApiError::Config(ConfigError::EmptySecretKey)));
    }
}
