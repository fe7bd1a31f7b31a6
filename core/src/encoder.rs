//! Query-string encoding of endpoint parameters.

use percent_encoding::{utf8_percent_encode, AsciiSet, NON_ALPHANUMERIC};
use url::Url;

use crate::endpoint::Parameters;
use crate::error::NetworkError;
use crate::http::HttpRequest;

pub const CONTENT_TYPE: &str = "Content-Type";
pub const FORM_URLENCODED: &str = "application/x-www-form-urlencoded; charset=utf-8";

/// Bytes left untouched inside a query key or value: RFC 3986 unreserved.
const QUERY_COMPONENT: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'-')
    .remove(b'.')
    .remove(b'_')
    .remove(b'~');

/// Writes parameters into a pending request.
///
/// Encoding appends, so calling `encode` twice with the same parameters
/// duplicates every query item. Encode exactly once per request.
pub trait ParameterEncoder: Send + Sync {
    fn encode(
        &self,
        request: &mut HttpRequest,
        parameters: Option<&Parameters>,
    ) -> Result<(), NetworkError>;
}

/// Appends parameters to the request URL as a percent-encoded query string.
#[derive(Debug, Clone, Copy, Default)]
pub struct UrlParameterEncoder;

impl ParameterEncoder for UrlParameterEncoder {
    fn encode(
        &self,
        request: &mut HttpRequest,
        parameters: Option<&Parameters>,
    ) -> Result<(), NetworkError> {
        let mut url = Url::parse(&request.url).map_err(|_| NetworkError::MissingUrl)?;
        let Some(parameters) = parameters else {
            return Ok(());
        };

        if !parameters.is_empty() {
            let mut items: Vec<String> = url
                .query()
                .filter(|query| !query.is_empty())
                .map(|query| vec![query.to_string()])
                .unwrap_or_default();
            items.extend(parameters.iter().map(|(key, value)| {
                let key = utf8_percent_encode(key, QUERY_COMPONENT);
                match value {
                    Some(value) => {
                        let value = value.to_string();
                        format!("{key}={}", utf8_percent_encode(&value, QUERY_COMPONENT))
                    }
                    None => key.to_string(),
                }
            }));
            url.set_query(Some(&items.join("&")));
            request.url = url.into();
        }

        if request.header(CONTENT_TYPE).is_none() {
            request.set_header(CONTENT_TYPE, FORM_URLENCODED);
        }
        Ok(())
    }
}
