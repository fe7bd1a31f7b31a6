//! Request execution and response classification.
//!
//! # Design
//! `NetworkWorker` turns an `Endpoint` into an `HttpRequest`, hands it to a
//! `NetworkSession`, and classifies what comes back. A response is only
//! returned as bytes if its status is 2xx and its body is non-empty;
//! everything else becomes a `NetworkError`. Pipelines depend on the
//! `NetworkLayer` trait rather than the worker so they can be tested
//! against canned payloads.

use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use url::Url;

use crate::encoder::{ParameterEncoder, UrlParameterEncoder};
use crate::endpoint::Endpoint;
use crate::error::NetworkError;
use crate::http::{HttpRequest, HttpResponse, ResponseStatus};
use crate::session::{NetworkSession, UreqSession, NO_CACHE};

pub const REQUEST_TIMEOUT: Duration = Duration::from_secs(10);

/// Fetches raw payloads for the pipelines.
#[async_trait]
pub trait NetworkLayer: Send + Sync {
    /// Execute the request described by `endpoint`.
    async fn request(&self, endpoint: &Endpoint) -> Result<Vec<u8>, NetworkError>;

    /// Fetch a binary resource directly, without building a request.
    async fn fetch_data(&self, url: &Url) -> Result<Vec<u8>, NetworkError>;
}

pub struct NetworkWorker {
    session: Arc<dyn NetworkSession>,
    encoder: Arc<dyn ParameterEncoder>,
}

impl NetworkWorker {
    pub fn new(session: Arc<dyn NetworkSession>) -> Self {
        Self::with_encoder(session, Arc::new(UrlParameterEncoder))
    }

    pub fn with_encoder(
        session: Arc<dyn NetworkSession>,
        encoder: Arc<dyn ParameterEncoder>,
    ) -> Self {
        Self { session, encoder }
    }

    /// Build the request for `endpoint` with parameters already encoded.
    pub fn build_request(&self, endpoint: &Endpoint) -> Result<HttpRequest, NetworkError> {
        let mut request = HttpRequest::new(endpoint.method, endpoint.url(), REQUEST_TIMEOUT);
        for (name, value) in NO_CACHE {
            request.set_header(name, *value);
        }
        self.encoder.encode(&mut request, endpoint.parameters.as_ref())?;
        Ok(request)
    }
}

impl Default for NetworkWorker {
    fn default() -> Self {
        Self::new(Arc::new(UreqSession::new(REQUEST_TIMEOUT)))
    }
}

#[async_trait]
impl NetworkLayer for NetworkWorker {
    async fn request(&self, endpoint: &Endpoint) -> Result<Vec<u8>, NetworkError> {
        let request = self.build_request(endpoint)?;
        let response = self.session.execute(request).await?;
        handle_response(response)
    }

    async fn fetch_data(&self, url: &Url) -> Result<Vec<u8>, NetworkError> {
        let response = self.session.fetch(url).await?;
        handle_response(response)
    }
}

/// Return the body of a successful, non-empty response.
fn handle_response(response: HttpResponse) -> Result<Vec<u8>, NetworkError> {
    match ResponseStatus::classify(response.status) {
        ResponseStatus::Success if response.body.is_empty() => Err(NetworkError::NoData),
        ResponseStatus::Success => Ok(response.body),
        status => Err(NetworkError::ResponseIssue(status)),
    }
}
