//! Error types for the network layer and the fetch pipelines.
//!
//! # Design
//! Errors come in three tiers. `NetworkError` describes what went wrong on
//! the wire, `ParseError` says a payload could not be decoded, and each
//! pipeline owns its own small enum. Pipelines remap the lower tiers at their
//! boundary, so callers of `image` or `description` only ever see the three
//! kinds that pipeline documents. The profile loader collapses everything
//! into a single `ProfileError` and logs the specific cause instead.

use thiserror::Error;

use crate::http::ResponseStatus;

/// Failure raised by a `NetworkSession` before any HTTP status was seen.
#[derive(Debug, Error)]
pub enum TransportError {
    #[error("HTTP transport failed: {0}")]
    Http(#[from] ureq::Error),

    #[error("I/O failed: {0}")]
    Io(#[from] std::io::Error),

    /// The blocking task running the exchange panicked or was cancelled.
    #[error("transport task did not complete: {0}")]
    Join(#[from] tokio::task::JoinError),
}

/// Errors returned by the network worker.
#[derive(Debug, Error)]
pub enum NetworkError {
    /// The request URL could not be resolved.
    #[error("request has no valid URL")]
    MissingUrl,

    /// The server answered 2xx with an empty body.
    #[error("response contained no data")]
    NoData,

    /// The server answered with a non-2xx status.
    #[error("unsuccessful response: {0}")]
    ResponseIssue(ResponseStatus),

    #[error("unknown network error: {0}")]
    Unknown(#[from] TransportError),
}

/// A payload could not be decoded into the requested shape.
#[derive(Debug, Error)]
#[error("failed to decode payload: {0}")]
pub struct ParseError(#[from] serde_json::Error);

/// Errors returned by the image pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ImageError {
    /// The creature record has no usable sprite URL.
    #[error("no image available")]
    MissingImage,

    #[error("network request failed")]
    NetworkFailure,

    #[error("response could not be parsed")]
    ParsingFailure,
}

impl From<NetworkError> for ImageError {
    fn from(_: NetworkError) -> Self {
        ImageError::NetworkFailure
    }
}

impl From<ParseError> for ImageError {
    fn from(_: ParseError) -> Self {
        ImageError::ParsingFailure
    }
}

/// Errors returned by the description pipeline.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DescriptionError {
    /// No flavor text exists in the requested language.
    #[error("no description available in the requested language")]
    MissingTranslation,

    #[error("network request failed")]
    NetworkFailure,

    #[error("response could not be parsed")]
    ParsingFailure,
}

impl From<NetworkError> for DescriptionError {
    fn from(_: NetworkError) -> Self {
        DescriptionError::NetworkFailure
    }
}

impl From<ParseError> for DescriptionError {
    fn from(_: ParseError) -> Self {
        DescriptionError::ParsingFailure
    }
}

/// The combined profile could not be loaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ProfileError {
    #[error("Failed to load Pokémon data.")]
    LoadFailed,
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse_error() -> ParseError {
        serde_json::from_str::<serde_json::Value>("{").unwrap_err().into()
    }

    #[test]
    fn network_errors_remap_to_network_failure() {
        assert_eq!(ImageError::from(NetworkError::NoData), ImageError::NetworkFailure);
        assert_eq!(
            DescriptionError::from(NetworkError::ResponseIssue(ResponseStatus::NotFound)),
            DescriptionError::NetworkFailure
        );
    }

    #[test]
    fn parse_errors_remap_to_parsing_failure() {
        assert_eq!(ImageError::from(parse_error()), ImageError::ParsingFailure);
        assert_eq!(DescriptionError::from(parse_error()), DescriptionError::ParsingFailure);
    }

    #[test]
    fn response_issue_message_names_the_status() {
        let err = NetworkError::ResponseIssue(ResponseStatus::ServerError);
        assert_eq!(err.to_string(), "unsuccessful response: server error");
    }

    #[test]
    fn profile_error_message_is_generic() {
        assert_eq!(ProfileError::LoadFailed.to_string(), "Failed to load Pokémon data.");
    }
}
