//! Byte-level HTTP exchange.
//!
//! # Design
//! `NetworkSession` is the seam between the worker and the wire: the worker
//! never interprets transport details and the session never interprets HTTP
//! statuses. `UreqSession` disables ureq's status-as-error behavior so 4xx
//! and 5xx responses come back as data for the classifier. ureq is blocking,
//! so each exchange runs on tokio's blocking pool; the agent is shared and
//! holds no per-call state.

use std::time::Duration;

use async_trait::async_trait;
use tracing::debug;
use ureq::http::Response;
use ureq::{Agent, Body, RequestBuilder};
use url::Url;

use crate::error::TransportError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};

/// Headers asking every cache on the way to revalidate.
pub(crate) const NO_CACHE: &[(&str, &str)] = &[("Cache-Control", "no-cache"), ("Pragma", "no-cache")];

/// Executes HTTP exchanges on behalf of the network worker.
///
/// Implementations must be safe to share across concurrent calls.
#[async_trait]
pub trait NetworkSession: Send + Sync {
    /// Execute a fully built request.
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError>;

    /// GET a bare URL with no parameters, bypassing caches.
    async fn fetch(&self, url: &Url) -> Result<HttpResponse, TransportError>;
}

/// `NetworkSession` backed by a shared `ureq::Agent`.
#[derive(Debug, Clone)]
pub struct UreqSession {
    agent: Agent,
}

impl UreqSession {
    pub fn new(timeout: Duration) -> Self {
        let agent = Agent::config_builder()
            .http_status_as_error(false)
            .timeout_global(Some(timeout))
            .build()
            .new_agent();
        Self { agent }
    }
}

#[async_trait]
impl NetworkSession for UreqSession {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        debug!(method = %request.method, url = %request.url, "calling");
        let agent = self.agent.clone();
        tokio::task::spawn_blocking(move || execute_blocking(&agent, &request)).await?
    }

    async fn fetch(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        debug!(url = %url, "calling");
        let agent = self.agent.clone();
        let url = url.to_string();
        tokio::task::spawn_blocking(move || {
            let response = NO_CACHE
                .iter()
                .fold(agent.get(&url), |builder, (name, value)| builder.header(*name, *value))
                .call()?;
            read_response(response)
        })
        .await?
    }
}

fn execute_blocking(agent: &Agent, request: &HttpRequest) -> Result<HttpResponse, TransportError> {
    let url = request.url.as_str();
    let response = match request.method {
        HttpMethod::Get => configure(agent.get(url), request).call(),
        HttpMethod::Delete => configure(agent.delete(url), request).call(),
        HttpMethod::Post => configure(agent.post(url), request).send_empty(),
        HttpMethod::Put => configure(agent.put(url), request).send_empty(),
        HttpMethod::Patch => configure(agent.patch(url), request).send_empty(),
    }?;
    read_response(response)
}

fn configure<B>(builder: RequestBuilder<B>, request: &HttpRequest) -> RequestBuilder<B> {
    request
        .headers
        .iter()
        .fold(builder, |builder, (name, value)| builder.header(name.as_str(), value.as_str()))
        .config()
        .timeout_global(Some(request.timeout))
        .build()
}

fn read_response(mut response: Response<Body>) -> Result<HttpResponse, TransportError> {
    let status = response.status().as_u16();
    let headers = response
        .headers()
        .iter()
        .filter_map(|(name, value)| {
            value
                .to_str()
                .ok()
                .map(|value| (name.as_str().to_string(), value.to_string()))
        })
        .collect();
    let body = response.body_mut().read_to_vec()?;
    Ok(HttpResponse {
        status,
        headers,
        body,
    })
}
