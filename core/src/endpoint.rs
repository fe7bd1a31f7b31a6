//! Endpoint descriptors for the upstream services.
//!
//! # Design
//! Each upstream is a closed enum of operations implementing `Service`. A
//! service knows its path, method and query parameters; the base URL comes
//! from `ApiConfig` so the same operations can target the public APIs or a
//! local mock. `Service::endpoint` folds both into an immutable `Endpoint`
//! that the network worker consumes.

use std::fmt;

use percent_encoding::{utf8_percent_encode, AsciiSet, CONTROLS};

use crate::http::HttpMethod;

/// Bytes escaped inside a single path segment.
const PATH_SEGMENT: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'%')
    .add(b'/')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// `value` escaped so it stays one path segment.
fn path_segment(value: &str) -> String {
    utf8_percent_encode(value, PATH_SEGMENT).to_string()
}

/// A scalar query parameter value.
#[derive(Debug, Clone, PartialEq)]
pub enum ParamValue {
    Str(String),
    Int(i64),
    Float(f64),
    Bool(bool),
}

impl fmt::Display for ParamValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ParamValue::Str(value) => f.write_str(value),
            ParamValue::Int(value) => write!(f, "{value}"),
            ParamValue::Float(value) => write!(f, "{value}"),
            ParamValue::Bool(value) => write!(f, "{value}"),
        }
    }
}

impl From<&str> for ParamValue {
    fn from(value: &str) -> Self {
        ParamValue::Str(value.to_string())
    }
}

impl From<String> for ParamValue {
    fn from(value: String) -> Self {
        ParamValue::Str(value)
    }
}

impl From<i64> for ParamValue {
    fn from(value: i64) -> Self {
        ParamValue::Int(value)
    }
}

impl From<i32> for ParamValue {
    fn from(value: i32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<u32> for ParamValue {
    fn from(value: u32) -> Self {
        ParamValue::Int(value.into())
    }
}

impl From<f64> for ParamValue {
    fn from(value: f64) -> Self {
        ParamValue::Float(value)
    }
}

impl From<bool> for ParamValue {
    fn from(value: bool) -> Self {
        ParamValue::Bool(value)
    }
}

/// Insertion-ordered query parameters. A `None` value encodes as a bare key.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Parameters(Vec<(String, Option<ParamValue>)>);

impl Parameters {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert or replace `key`. Replacing keeps the key's original position.
    pub fn insert(&mut self, key: impl Into<String>, value: Option<ParamValue>) {
        let key = key.into();
        match self.0.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.0.push((key, value)),
        }
    }

    pub fn with(mut self, key: impl Into<String>, value: impl Into<ParamValue>) -> Self {
        self.insert(key, Some(value.into()));
        self
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.insert(key, None);
        self
    }

    pub fn get(&self, key: &str) -> Option<&Option<ParamValue>> {
        self.0.iter().find(|(existing, _)| existing == key).map(|(_, value)| value)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Option<&ParamValue>)> {
        self.0.iter().map(|(key, value)| (key.as_str(), value.as_ref()))
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl<K: Into<String>> FromIterator<(K, Option<ParamValue>)> for Parameters {
    fn from_iter<I: IntoIterator<Item = (K, Option<ParamValue>)>>(iter: I) -> Self {
        let mut params = Parameters::new();
        for (key, value) in iter {
            params.insert(key, value);
        }
        params
    }
}

/// Everything the network worker needs to build one request.
#[derive(Debug, Clone, PartialEq)]
pub struct Endpoint {
    pub base_url: String,
    pub path: String,
    pub method: HttpMethod,
    pub parameters: Option<Parameters>,
}

impl Endpoint {
    /// Base URL and path joined with exactly one `/` between them.
    pub fn url(&self) -> String {
        let base = self.base_url.trim_end_matches('/');
        let path = self.path.trim_start_matches('/');
        if path.is_empty() {
            base.to_string()
        } else {
            format!("{base}/{path}")
        }
    }
}

/// A logical family of operations against one upstream.
pub trait Service {
    fn path(&self) -> String;

    fn method(&self) -> HttpMethod;

    fn parameters(&self) -> Option<Parameters>;

    fn endpoint(&self, base_url: &str) -> Endpoint {
        Endpoint {
            base_url: base_url.to_string(),
            path: self.path(),
            method: self.method(),
            parameters: self.parameters(),
        }
    }
}

/// Operations on the creature database.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum PokeApiService {
    Pokemon { name: String },
    PokemonSpecies { name: String },
}

impl Service for PokeApiService {
    fn path(&self) -> String {
        match self {
            PokeApiService::Pokemon { name } => format!("/pokemon/{}", path_segment(name)),
            PokeApiService::PokemonSpecies { name } => {
                format!("/pokemon-species/{}", path_segment(name))
            }
        }
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn parameters(&self) -> Option<Parameters> {
        None
    }
}

/// Operations on the stylistic translation service.
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum FunTranslationService {
    Shakespeare { text: String },
}

impl Service for FunTranslationService {
    fn path(&self) -> String {
        match self {
            FunTranslationService::Shakespeare { .. } => "/shakespeare.json".to_string(),
        }
    }

    fn method(&self) -> HttpMethod {
        HttpMethod::Get
    }

    fn parameters(&self) -> Option<Parameters> {
        match self {
            FunTranslationService::Shakespeare { text } => {
                Some(Parameters::new().with("text", text.as_str()))
            }
        }
    }
}
