//! Concurrent loading of a creature's sprite and translated description.
//!
//! # Design
//! `ProfileLoader::load` starts both pipelines before awaiting either, so
//! the two network chains overlap. Both must succeed; the first failure
//! drops the other pipeline and collapses into `ProfileError::LoadFailed`,
//! with the specific cause only logged. Everything runs inside the returned
//! future, so dropping it cancels both pipelines and neither produces a
//! result.

use std::sync::Arc;

use tracing::{info, warn};

use crate::config::ApiConfig;
use crate::description::{Descriptor, ShakespeareanDescriptor};
use crate::error::ProfileError;
use crate::image::{ImageProvider, PokemonImageProvider};
use crate::types::SupportedLanguage;
use crate::worker::{NetworkLayer, NetworkWorker};

/// Image bytes and description for one creature.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Profile {
    pub image: Vec<u8>,
    pub description: String,
}

pub struct ProfileLoader {
    image_provider: Arc<dyn ImageProvider>,
    descriptor: Arc<dyn Descriptor>,
    language: SupportedLanguage,
}

impl ProfileLoader {
    /// Loader whose pipelines share one worker and session.
    pub fn new(config: &ApiConfig) -> Self {
        Self::with_worker(Arc::new(NetworkWorker::default()), config)
    }

    pub fn with_worker(worker: Arc<dyn NetworkLayer>, config: &ApiConfig) -> Self {
        Self::with_providers(
            Arc::new(PokemonImageProvider::with_worker(worker.clone(), config)),
            Arc::new(ShakespeareanDescriptor::with_worker(worker, config)),
        )
    }

    pub fn with_providers(
        image_provider: Arc<dyn ImageProvider>,
        descriptor: Arc<dyn Descriptor>,
    ) -> Self {
        Self {
            image_provider,
            descriptor,
            language: SupportedLanguage::English,
        }
    }

    /// Request descriptions in `language` instead of English.
    pub fn language(mut self, language: SupportedLanguage) -> Self {
        self.language = language;
        self
    }

    pub async fn load(&self, name: &str) -> Result<Profile, ProfileError> {
        let image = async {
            self.image_provider
                .image(name)
                .await
                .inspect_err(|err| warn!(pokemon = name, error = %err, "image pipeline failed"))
                .map_err(|_| ProfileError::LoadFailed)
        };
        let description = async {
            self.descriptor
                .description(name, self.language)
                .await
                .inspect_err(|err| warn!(pokemon = name, error = %err, "description pipeline failed"))
                .map_err(|_| ProfileError::LoadFailed)
        };

        let (image, description) = tokio::try_join!(image, description)?;
        info!(pokemon = name, bytes = image.len(), "profile loaded");
        Ok(Profile { image, description })
    }
}
