//! Upstream base URLs.

use std::env;

pub const DEFAULT_POKEAPI_BASE_URL: &str = "https://pokeapi.co/api/v2";
pub const DEFAULT_TRANSLATION_BASE_URL: &str = "https://api.funtranslations.com/translate";

pub const POKEAPI_BASE_URL_VAR: &str = "POKEAPI_BASE_URL";
pub const TRANSLATION_BASE_URL_VAR: &str = "FUNTRANSLATIONS_BASE_URL";

/// Where the pipelines send their requests.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ApiConfig {
    pub pokeapi_base_url: String,
    pub translation_base_url: String,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            pokeapi_base_url: DEFAULT_POKEAPI_BASE_URL.to_string(),
            translation_base_url: DEFAULT_TRANSLATION_BASE_URL.to_string(),
        }
    }
}

impl ApiConfig {
    pub fn new(pokeapi_base_url: &str, translation_base_url: &str) -> Self {
        Self {
            pokeapi_base_url: pokeapi_base_url.to_string(),
            translation_base_url: translation_base_url.to_string(),
        }
    }

    /// Defaults overridden by `POKEAPI_BASE_URL` and `FUNTRANSLATIONS_BASE_URL`.
    /// Unset or empty variables keep the default.
    pub fn from_env() -> Self {
        Self::from_lookup(|key| env::var(key).ok())
    }

    fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Self {
        let var = |key: &str, default: &str| {
            lookup(key)
                .filter(|value| !value.trim().is_empty())
                .unwrap_or_else(|| default.to_string())
        };
        Self {
            pokeapi_base_url: var(POKEAPI_BASE_URL_VAR, DEFAULT_POKEAPI_BASE_URL),
            translation_base_url: var(TRANSLATION_BASE_URL_VAR, DEFAULT_TRANSLATION_BASE_URL),
        }
    }
}
