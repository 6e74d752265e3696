//! Response envelopes, error classification and response processing.
//!
//! # Overview
//!
//! - [`Envelope`]: A parsed response document
//! - [`classify`] and [`AwsErrorKind`]: The vendor error code table
//! - [`process_response`], [`process_response_for`], [`process_http_response`]:
//!   Parse a body and either return the envelope or fail with a typed error
//!
//! A caller never receives both a fatal error and a payload: if any error
//! entry is fatal for the operation, the envelope is discarded.

mod envelope;
mod errors;
mod processor;

pub use envelope::{Envelope, ErrorEntry};
pub use errors::{classify, kind_for_code, AwsError, AwsErrorKind, ERROR_CODES};
pub use processor::{process_http_response, process_response, process_response_for};
