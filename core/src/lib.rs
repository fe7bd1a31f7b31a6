//! Async client core for Shakespearean creature profiles.
//!
//! # Overview
//! Fetches a creature's sprite and a localized flavor text, runs the text
//! through a Shakespeare translation service, and returns both together.
//!
//! # Design
//! - `Endpoint` values describe each upstream call; `UrlParameterEncoder`
//!   turns their parameters into a query string.
//! - `NetworkWorker` builds requests, hands them to a `NetworkSession`, and
//!   classifies the HTTP status before any payload is parsed.
//! - `PokemonImageProvider` and `ShakespeareanDescriptor` are the two fetch
//!   pipelines. Each remaps lower-level failures into its own error enum.
//! - `ProfileLoader` runs both pipelines concurrently and reports a single
//!   success or failure.
//! - Response DTOs are defined independently from the mock-server crate;
//!   integration tests catch schema drift.

pub mod config;
pub mod description;
pub mod encoder;
pub mod endpoint;
pub mod error;
pub mod http;
pub mod image;
pub mod parser;
pub mod profile;
pub mod session;
pub mod types;
pub mod worker;

#[cfg(test)]
mod testing;

pub use config::ApiConfig;
pub use description::{Descriptor, ShakespeareanDescriptor};
pub use encoder::{ParameterEncoder, UrlParameterEncoder};
pub use endpoint::{Endpoint, FunTranslationService, ParamValue, Parameters, PokeApiService, Service};
pub use error::{DescriptionError, ImageError, NetworkError, ParseError, ProfileError, TransportError};
pub use http::{HttpMethod, HttpRequest, HttpResponse, ResponseStatus};
pub use image::{ImageProvider, PokemonImageProvider};
pub use parser::{JsonParser, Parser};
pub use profile::{Profile, ProfileLoader};
pub use session::{NetworkSession, UreqSession};
pub use types::{LanguageCode, PokemonResponse, PokemonSpeciesResponse, ShakespeareTranslation, SupportedLanguage};
pub use worker::{NetworkLayer, NetworkWorker, REQUEST_TIMEOUT};
