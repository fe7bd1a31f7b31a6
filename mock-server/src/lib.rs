use std::{collections::HashMap, sync::Arc};

use axum::{
    extract::{Path, Query, State},
    http::{header, HeaderMap, StatusCode},
    response::{IntoResponse, Response},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::net::TcpListener;

/// Bytes served for every sprite: a PNG signature followed by a marker.
pub const SPRITE_BYTES: &[u8] = &[0x89, b'P', b'N', b'G', 0x0d, 0x0a, 0x1a, 0x0a, b'm', b'o', b'c', b'k'];

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Pokemon {
    pub id: u32,
    pub name: String,
    pub sprites: Sprites,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Sprites {
    pub front_default: Option<String>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PokemonSpecies {
    pub id: u32,
    pub name: String,
    pub flavor_text_entries: Vec<FlavorTextEntry>,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct FlavorTextEntry {
    pub flavor_text: String,
    pub language: NamedResource,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct NamedResource {
    pub name: String,
    pub url: String,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct Translation {
    pub success: TranslationSuccess,
    pub contents: TranslationContents,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslationSuccess {
    pub total: u32,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct TranslationContents {
    pub translated: String,
    pub text: String,
    pub translation: String,
}

#[derive(Deserialize)]
pub struct TranslateQuery {
    pub text: Option<String>,
}

/// A creature known to the mock upstream.
#[derive(Clone, Debug)]
pub struct Creature {
    pub id: u32,
    pub name: &'static str,
    /// `None` serves a `null` sprite, `Some(false)` an empty string.
    pub has_sprite: Option<bool>,
    pub entries: Vec<(&'static str, &'static str)>,
}

pub type Catalog = Arc<HashMap<&'static str, Creature>>;

pub fn catalog() -> Catalog {
    let creatures = [
        Creature {
            id: 25,
            name: "pikachu",
            has_sprite: Some(true),
            entries: vec![
                ("ja", "ほっぺたの りょうがわに ちいさい でんきぶくろを もつ。"),
                (
                    "en",
                    "When several of these Pokémon gather, their electricity could build and cause lightning storms.",
                ),
                (
                    "it",
                    "Quando si radunano, la loro elettricità può causare tempeste di fulmini.",
                ),
                ("en", "It keeps its tail raised to monitor its surroundings."),
            ],
        },
        Creature {
            id: 1,
            name: "bulbasaur",
            has_sprite: Some(true),
            entries: vec![(
                "en",
                "A strange seed was planted on its back at birth. The plant sprouts and grows with this Pokémon.",
            )],
        },
        Creature {
            id: 0,
            name: "missingno",
            has_sprite: Some(false),
            entries: vec![("ja", "けつばん")],
        },
        Creature {
            id: 201,
            name: "unown",
            has_sprite: None,
            entries: vec![("en", "Their shapes look like hieroglyphs. Are you able to read them?")],
        },
    ];
    Arc::new(creatures.into_iter().map(|c| (c.name, c)).collect())
}

pub fn app() -> Router {
    Router::new()
        .route("/pokemon/{name}", get(get_pokemon))
        .route("/pokemon-species/{name}", get(get_species))
        .route("/sprites/{file}", get(get_sprite))
        .route("/translate/shakespeare.json", get(translate))
        .with_state(catalog())
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    axum::serve(listener, app()).await
}

fn not_found() -> Response {
    (StatusCode::NOT_FOUND, "Not Found").into_response()
}

async fn get_pokemon(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
    headers: HeaderMap,
) -> Result<Json<Pokemon>, Response> {
    let creature = catalog.get(name.as_str()).ok_or_else(not_found)?;
    let host = headers
        .get(header::HOST)
        .and_then(|value| value.to_str().ok())
        .unwrap_or("localhost:3000");
    let front_default = creature.has_sprite.map(|has_sprite| {
        if has_sprite {
            format!("http://{host}/sprites/{}.png", creature.id)
        } else {
            String::new()
        }
    });
    Ok(Json(Pokemon {
        id: creature.id,
        name: creature.name.to_string(),
        sprites: Sprites { front_default },
    }))
}

async fn get_species(
    State(catalog): State<Catalog>,
    Path(name): Path<String>,
) -> Result<Json<PokemonSpecies>, Response> {
    let creature = catalog.get(name.as_str()).ok_or_else(not_found)?;
    let flavor_text_entries = creature
        .entries
        .iter()
        .map(|(language, text)| FlavorTextEntry {
            flavor_text: text.to_string(),
            language: NamedResource {
                name: language.to_string(),
                url: format!("https://pokeapi.co/api/v2/language/{language}/"),
            },
        })
        .collect();
    Ok(Json(PokemonSpecies {
        id: creature.id,
        name: creature.name.to_string(),
        flavor_text_entries,
    }))
}

async fn get_sprite(State(catalog): State<Catalog>, Path(file): Path<String>) -> Response {
    let id = file.strip_suffix(".png").and_then(|id| id.parse::<u32>().ok());
    let known = id.is_some_and(|id| {
        catalog
            .values()
            .any(|creature| creature.id == id && creature.has_sprite == Some(true))
    });
    if !known {
        return not_found();
    }
    ([(header::CONTENT_TYPE, "image/png")], SPRITE_BYTES).into_response()
}

async fn translate(Query(query): Query<TranslateQuery>) -> Response {
    let Some(text) = query.text.filter(|text| !text.is_empty()) else {
        let body = serde_json::json!({
            "error": {"code": 400, "message": "Bad Request: text is missing."}
        });
        return (StatusCode::BAD_REQUEST, Json(body)).into_response();
    };
    tracing::info!(chars = text.len(), "translating");
    Json(Translation {
        success: TranslationSuccess { total: 1 },
        contents: TranslationContents {
            translated: shakespeare(&text),
            text,
            translation: "shakespeare".to_string(),
        },
    })
    .into_response()
}

const GLOSSARY: &[(&str, &str)] = &[
    ("are", "art"),
    ("does", "doth"),
    ("has", "hath"),
    ("it", "'t"),
    ("its", "its"),
    ("their", "thine"),
    ("these", "these"),
    ("when", "at which hour"),
    ("you", "thee"),
    ("your", "thy"),
];

/// Deterministic stand-in for the real translator: swaps a few common words
/// for their Early Modern English forms, keeping capitalization.
pub fn shakespeare(text: &str) -> String {
    text.split_whitespace()
        .map(translate_word)
        .collect::<Vec<_>>()
        .join(" ")
}

fn translate_word(word: &str) -> String {
    let end = word
        .find(|c: char| !c.is_alphabetic())
        .unwrap_or(word.len());
    let (stem, rest) = word.split_at(end);
    let lower = stem.to_lowercase();
    let Some((_, replacement)) = GLOSSARY.iter().find(|(from, _)| *from == lower) else {
        return word.to_string();
    };
    let capitalized = stem.chars().next().is_some_and(char::is_uppercase);
    if capitalized {
        let mut chars = replacement.chars();
        let first = chars.next().map(|c| c.to_uppercase().to_string()).unwrap_or_default();
        format!("{first}{}{rest}", chars.as_str())
    } else {
        format!("{replacement}{rest}")
    }
}
