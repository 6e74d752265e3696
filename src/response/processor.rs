//! Turning raw response bodies into envelopes or typed errors.

use crate::api::ApiError;
use crate::clients::{HttpError, HttpResponse, HttpResponseError};
use crate::operations::Operation;
use crate::response::{classify, Envelope};
use crate::xml::XPath;

/// Parses a response body and fails on any error entry.
///
/// # Errors
///
/// Returns [`ApiError::Xml`] if the body cannot be parsed, or
/// [`ApiError::Aws`] for the first error entry.
///
/// # Example
///
/// ```rust
/// use amazon_product::response::{process_response, AwsErrorKind};
///
/// let result = process_response(br#"
///     <ItemSearchResponse><Items><Request><Errors>
///       <Error><Code>AWS.ECommerceService.NoExactMatches</Code><Message>none</Message></Error>
///     </Errors></Request></Items></ItemSearchResponse>"#);
///
/// assert_eq!(result.unwrap_err().aws_kind(), Some(AwsErrorKind::NoExactMatchesFound));
/// ```
pub fn process_response(bytes: &[u8]) -> Result<Envelope, ApiError> {
    let envelope = Envelope::parse(bytes)?;
    check_errors(None, &envelope)?;
    Ok(envelope)
}

/// Parses a response body for `operation`, applying its tolerance.
///
/// Error entries the operation tolerates are logged at `warn` and left in
/// the envelope; the first entry it does not tolerate fails the call.
///
/// # Errors
///
/// Returns [`ApiError::Xml`] if the body cannot be parsed, or
/// [`ApiError::Aws`] for the first fatal error entry.
pub fn process_response_for(operation: Operation, bytes: &[u8]) -> Result<Envelope, ApiError> {
    let envelope = Envelope::parse(bytes)?;
    check_errors(Some(operation), &envelope)?;
    Ok(envelope)
}

/// Processes a transport response for `operation`.
///
/// Non-2xx responses usually still carry an error envelope (a bad signature
/// comes back as 403 with `SignatureDoesNotMatch`); those are classified
/// like any other. A non-2xx body that is not an error envelope becomes
/// [`HttpError::Response`].
///
/// # Errors
///
/// Returns [`ApiError`] as described above.
pub fn process_http_response(
    operation: Operation,
    response: &HttpResponse,
) -> Result<Envelope, ApiError> {
    if response.is_ok() {
        return process_response_for(operation, &response.body);
    }

    if let Ok(envelope) = Envelope::parse(&response.body) {
        if let Some(entry) = envelope.errors().into_iter().next() {
            return Err(classify(Some(operation), &entry.code, &entry.message).into());
        }
    }

    Err(HttpError::Response(HttpResponseError {
        code: response.code,
        message: response.body_text(),
        error_reference: response.request_id().map(str::to_string),
    })
    .into())
}

fn check_errors(operation: Option<Operation>, envelope: &Envelope) -> Result<(), ApiError> {
    let entries = envelope.errors();
    if entries.is_empty() {
        return Ok(());
    }

    let tolerance = operation.and_then(Operation::tolerance);
    let payload_present = tolerance.map_or(false, |t| {
        t.payload_path
            .parse::<XPath>()
            .map_or(false, |path| !envelope.select(&path).is_empty())
    });

    for entry in entries {
        let tolerated = payload_present
            && tolerance.map_or(false, |t| t.covers(&entry.code, &entry.message));
        if tolerated {
            tracing::warn!(
                operation = ?operation,
                code = %entry.code,
                message = %entry.message,
                "Ignoring per-item error in otherwise usable response"
            );
            continue;
        }
        return Err(classify(operation, &entry.code, &entry.message).into());
    }
    Ok(())
}
