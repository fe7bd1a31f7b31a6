//! Sprite image pipeline.
//!
//! Looks up the creature record, takes its front sprite URL and downloads
//! the image bytes. A record without a usable URL stops before the second
//! request.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;
use url::Url;

use crate::config::ApiConfig;
use crate::endpoint::{PokeApiService, Service};
use crate::error::ImageError;
use crate::parser::{JsonParser, Parser};
use crate::types::PokemonResponse;
use crate::worker::{NetworkLayer, NetworkWorker};

/// Retrieves sprite image data for a creature.
#[async_trait]
pub trait ImageProvider: Send + Sync {
    async fn image(&self, pokemon: &str) -> Result<Vec<u8>, ImageError>;
}

pub struct PokemonImageProvider<P = JsonParser> {
    worker: Arc<dyn NetworkLayer>,
    parser: P,
    base_url: String,
}

impl PokemonImageProvider {
    /// Provider talking to the configured upstream through a default worker.
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_worker(Arc::new(NetworkWorker::default()), config)
    }

    pub fn with_worker(worker: Arc<dyn NetworkLayer>, config: &ApiConfig) -> Self {
        Self::with_parser(worker, JsonParser, config)
    }
}

impl<P: Parser> PokemonImageProvider<P> {
    pub fn with_parser(worker: Arc<dyn NetworkLayer>, parser: P, config: &ApiConfig) -> Self {
        Self {
            worker,
            parser,
            base_url: config.pokeapi_base_url.clone(),
        }
    }
}

#[async_trait]
impl<P: Parser> ImageProvider for PokemonImageProvider<P> {
    async fn image(&self, pokemon: &str) -> Result<Vec<u8>, ImageError> {
        let endpoint = PokeApiService::Pokemon {
            name: pokemon.to_string(),
        }
        .endpoint(&self.base_url);
        let data = self
            .worker
            .request(&endpoint)
            .await
            .inspect_err(|err| debug!(pokemon, error = %err, "creature lookup failed"))?;
        let record: PokemonResponse = self
            .parser
            .parse(&data)
            .inspect_err(|err| debug!(pokemon, error = %err, "creature record unreadable"))?;

        let url = record
            .sprite_front_url()
            .and_then(|raw| Url::parse(raw).ok())
            .ok_or(ImageError::MissingImage)?;

        let image = self
            .worker
            .fetch_data(&url)
            .await
            .inspect_err(|err| debug!(pokemon, %url, error = %err, "sprite download failed"))?;
        Ok(image)
    }
}
