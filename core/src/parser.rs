//! Decoding of raw payloads into response models.

use std::sync::Arc;

use serde::de::DeserializeOwned;

use crate::error::ParseError;

/// Decodes raw bytes into a structured response.
pub trait Parser: Send + Sync {
    fn parse<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError>;
}

/// `Parser` backed by serde_json.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonParser;

impl Parser for JsonParser {
    fn parse<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError> {
        Ok(serde_json::from_slice(data)?)
    }
}

impl<P: Parser> Parser for Arc<P> {
    fn parse<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError> {
        (**self).parse(data)
    }
}
