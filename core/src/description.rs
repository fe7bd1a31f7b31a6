//! Translated description pipeline.
//!
//! # Design
//! Two dependent hops: the species record is fetched and parsed first, the
//! first flavor text in the requested language is picked, and only then is
//! the translation service called with that text. The species API and the
//! translation API fail independently, and each stage maps onto its own
//! `DescriptionError` kind. A missing language stops the pipeline before
//! the translation service is contacted; no fallback language is tried.

use std::sync::Arc;

use async_trait::async_trait;
use tracing::debug;

use crate::config::ApiConfig;
use crate::endpoint::{FunTranslationService, PokeApiService, Service};
use crate::error::DescriptionError;
use crate::parser::{JsonParser, Parser};
use crate::types::{PokemonSpeciesResponse, ShakespeareTranslation, SupportedLanguage};
use crate::worker::{NetworkLayer, NetworkWorker};

/// Produces a translated description of a creature.
#[async_trait]
pub trait Descriptor: Send + Sync {
    async fn description(
        &self,
        pokemon: &str,
        language: SupportedLanguage,
    ) -> Result<String, DescriptionError>;
}

pub struct ShakespeareanDescriptor<P = JsonParser> {
    worker: Arc<dyn NetworkLayer>,
    parser: P,
    pokeapi_base_url: String,
    translation_base_url: String,
}

impl ShakespeareanDescriptor {
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_worker(Arc::new(NetworkWorker::default()), config)
    }

    pub fn with_worker(worker: Arc<dyn NetworkLayer>, config: &ApiConfig) -> Self {
        Self::with_parser(worker, JsonParser, config)
    }
}

impl<P: Parser> ShakespeareanDescriptor<P> {
    pub fn with_parser(worker: Arc<dyn NetworkLayer>, parser: P, config: &ApiConfig) -> Self {
        Self {
            worker,
            parser,
            pokeapi_base_url: config.pokeapi_base_url.clone(),
            translation_base_url: config.translation_base_url.clone(),
        }
    }

    async fn species(&self, pokemon: &str) -> Result<PokemonSpeciesResponse, DescriptionError> {
        let endpoint = PokeApiService::PokemonSpecies {
            name: pokemon.to_string(),
        }
        .endpoint(&self.pokeapi_base_url);
        let data = self
            .worker
            .request(&endpoint)
            .await
            .inspect_err(|err| debug!(pokemon, error = %err, "species lookup failed"))?;
        let species = self
            .parser
            .parse(&data)
            .inspect_err(|err| debug!(pokemon, error = %err, "species record unreadable"))?;
        Ok(species)
    }

    async fn translate(&self, text: &str) -> Result<String, DescriptionError> {
        let endpoint = FunTranslationService::Shakespeare {
            text: text.to_string(),
        }
        .endpoint(&self.translation_base_url);
        let data = self
            .worker
            .request(&endpoint)
            .await
            .inspect_err(|err| debug!(error = %err, "translation request failed"))?;
        let translation: ShakespeareTranslation = self
            .parser
            .parse(&data)
            .inspect_err(|err| debug!(error = %err, "translation unreadable"))?;
        Ok(translation.translated)
    }
}

#[async_trait]
impl<P: Parser> Descriptor for ShakespeareanDescriptor<P> {
    async fn description(
        &self,
        pokemon: &str,
        language: SupportedLanguage,
    ) -> Result<String, DescriptionError> {
        let species = self.species(pokemon).await?;
        let text = species
            .flavor_text(language.into())
            .ok_or(DescriptionError::MissingTranslation)?;
        self.translate(text).await
    }
}
