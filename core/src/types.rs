//! Response models for the creature, species and translation endpoints.
//!
//! # Design
//! These types mirror the upstream JSON but are defined independently of the
//! mock-server crate; integration tests catch any schema drift. Only the
//! fields the pipelines read are modelled, and serde ignores the rest.

use percent_encoding::percent_decode_str;
use serde::Deserialize;

/// A creature record from the `pokemon/{name}` endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PokemonResponse {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Sprites {
    /// Upstream sends `null` for creatures without artwork.
    #[serde(rename = "front_default")]
    pub front: Option<String>,
}

impl PokemonResponse {
    pub fn sprite_front_url(&self) -> Option<&str> {
        self.sprites.front.as_deref()
    }
}

/// A species record from the `pokemon-species/{name}` endpoint.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct PokemonSpeciesResponse {
    pub id: u32,
    pub name: String,
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

impl PokemonSpeciesResponse {
    /// First flavor text, in upstream order, written in `language`.
    pub fn flavor_text(&self, language: LanguageCode) -> Option<&str> {
        self.flavor_text_entries
            .iter()
            .find(|entry| entry.language.code == language)
            .map(|entry| entry.text.as_str())
    }
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct FlavorTextEntry {
    #[serde(rename = "flavor_text")]
    pub text: String,
    pub language: Language,
}

#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
pub struct Language {
    #[serde(rename = "name")]
    pub code: LanguageCode,
}

/// Language tag of a flavor text entry.
#[derive(Debug, Clone, Copy, Deserialize, PartialEq, Eq, Hash)]
#[serde(from = "String")]
pub enum LanguageCode {
    English,
    Italian,
    Unknown,
}

impl From<String> for LanguageCode {
    fn from(code: String) -> Self {
        match code.as_str() {
            "en" => LanguageCode::English,
            "it" => LanguageCode::Italian,
            _ => LanguageCode::Unknown,
        }
    }
}

/// A language a caller may request a description in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum SupportedLanguage {
    #[default]
    English,
    Italian,
}

impl From<SupportedLanguage> for LanguageCode {
    fn from(language: SupportedLanguage) -> Self {
        match language {
            SupportedLanguage::English => LanguageCode::English,
            SupportedLanguage::Italian => LanguageCode::Italian,
        }
    }
}

/// Translated text from the `shakespeare.json` endpoint.
///
/// The upstream nests the text under `contents.translated`. The value is
/// percent-decoded when it holds valid escapes and kept verbatim otherwise.
#[derive(Debug, Clone, Deserialize, PartialEq, Eq)]
#[serde(from = "TranslationEnvelope")]
pub struct ShakespeareTranslation {
    pub translated: String,
}

#[derive(Deserialize)]
struct TranslationEnvelope {
    contents: TranslationContents,
}

#[derive(Deserialize)]
struct TranslationContents {
    translated: String,
}

impl From<TranslationEnvelope> for ShakespeareTranslation {
    fn from(envelope: TranslationEnvelope) -> Self {
        let raw = envelope.contents.translated;
        let translated = remove_percent_encoding(&raw).unwrap_or(raw);
        Self { translated }
    }
}

/// Decode `%XX` escapes. Returns `None` for a stray `%` or non-UTF-8 output.
fn remove_percent_encoding(text: &str) -> Option<String> {
    let bytes = text.as_bytes();
    let mut i = 0;
    while i < bytes.len() {
        if bytes[i] == b'%' {
            let escape = bytes.get(i + 1..i + 3)?;
            if !escape.iter().all(u8::is_ascii_hexdigit) {
                return None;
            }
            i += 3;
        } else {
            i += 1;
        }
    }
    percent_decode_str(text)
        .decode_utf8()
        .ok()
        .map(|decoded| decoded.into_owned())
}
