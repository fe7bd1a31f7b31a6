//! Hand-written test doubles that record how they were called.

use std::collections::VecDeque;
use std::io;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Mutex;

use async_trait::async_trait;
use serde::de::DeserializeOwned;
use url::Url;

use crate::endpoint::Endpoint;
use crate::error::{NetworkError, ParseError, TransportError};
use crate::http::{HttpRequest, HttpResponse};
use crate::parser::{JsonParser, Parser};
use crate::session::NetworkSession;
use crate::worker::NetworkLayer;

fn refused() -> TransportError {
    TransportError::Io(io::Error::new(io::ErrorKind::ConnectionRefused, "refused"))
}

/// Session answering from a queue of canned responses.
#[derive(Default)]
pub(crate) struct MockSession {
    responses: Mutex<VecDeque<Option<HttpResponse>>>,
    executed: Mutex<Vec<HttpRequest>>,
    fetched: Mutex<Vec<String>>,
}

impl MockSession {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn push_response(&self, response: HttpResponse) {
        self.responses.lock().unwrap().push_back(Some(response));
    }

    pub(crate) fn push_failure(&self) {
        self.responses.lock().unwrap().push_back(None);
    }

    pub(crate) fn executed(&self) -> Vec<HttpRequest> {
        self.executed.lock().unwrap().clone()
    }

    pub(crate) fn fetched(&self) -> Vec<String> {
        self.fetched.lock().unwrap().clone()
    }

    fn next(&self) -> Result<HttpResponse, TransportError> {
        self.responses
            .lock()
            .unwrap()
            .pop_front()
            .flatten()
            .ok_or_else(refused)
    }
}

#[async_trait]
impl NetworkSession for MockSession {
    async fn execute(&self, request: HttpRequest) -> Result<HttpResponse, TransportError> {
        self.executed.lock().unwrap().push(request);
        self.next()
    }

    async fn fetch(&self, url: &Url) -> Result<HttpResponse, TransportError> {
        self.fetched.lock().unwrap().push(url.to_string());
        self.next()
    }
}

/// Network layer answering from queues of canned payloads.
#[derive(Default)]
pub(crate) struct MockNetworkLayer {
    request_results: Mutex<VecDeque<Result<Vec<u8>, NetworkError>>>,
    fetch_results: Mutex<VecDeque<Result<Vec<u8>, NetworkError>>>,
    requests: Mutex<Vec<Endpoint>>,
    fetches: Mutex<Vec<String>>,
}

impl MockNetworkLayer {
    pub(crate) fn new() -> Self {
        Self::default()
    }

    pub(crate) fn on_request(&self, result: Result<Vec<u8>, NetworkError>) -> &Self {
        self.request_results.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn on_fetch(&self, result: Result<Vec<u8>, NetworkError>) -> &Self {
        self.fetch_results.lock().unwrap().push_back(result);
        self
    }

    pub(crate) fn requests(&self) -> Vec<Endpoint> {
        self.requests.lock().unwrap().clone()
    }

    pub(crate) fn fetches(&self) -> Vec<String> {
        self.fetches.lock().unwrap().clone()
    }
}

#[async_trait]
impl NetworkLayer for MockNetworkLayer {
    async fn request(&self, endpoint: &Endpoint) -> Result<Vec<u8>, NetworkError> {
        self.requests.lock().unwrap().push(endpoint.clone());
        self.request_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(NetworkError::NoData))
    }

    async fn fetch_data(&self, url: &Url) -> Result<Vec<u8>, NetworkError> {
        self.fetches.lock().unwrap().push(url.to_string());
        self.fetch_results
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or(Err(NetworkError::NoData))
    }
}

/// JSON parser that counts its invocations.
#[derive(Default)]
pub(crate) struct CountingParser {
    calls: AtomicUsize,
}

impl CountingParser {
    pub(crate) fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

impl Parser for CountingParser {
    fn parse<T: DeserializeOwned>(&self, data: &[u8]) -> Result<T, ParseError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        JsonParser.parse(data)
    }
}
