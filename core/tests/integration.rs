//! End-to-end pipelines against the live mock server.
//!
//! # Design
//! Starts the mock server on a random port, points `ApiConfig` at it and
//! drives every pipeline over real HTTP through `UreqSession`. Validates
//! that request building, status classification and response parsing agree
//! with the server's schema.

use std::io::{Read, Write};
use std::sync::Arc;

use pokespeare_core::{
    ApiConfig, DescriptionError, Descriptor, Endpoint, HttpMethod, ImageError, ImageProvider,
    NetworkError, NetworkLayer, NetworkSession, NetworkWorker, PokeApiService,
    PokemonImageProvider, ProfileError, ProfileLoader, ResponseStatus, Service,
    ShakespeareanDescriptor, SupportedLanguage, UreqSession, REQUEST_TIMEOUT,
};

async fn start_server() -> ApiConfig {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(mock_server::run(listener));
    ApiConfig::new(&format!("http://{addr}"), &format!("http://{addr}/translate"))
}

#[tokio::test(flavor = "multi_thread")]
async fn image_pipeline_downloads_sprite() {
    let config = start_server().await;
    let provider = PokemonImageProvider::new(&config);

    let image = provider.image("pikachu").await.unwrap();
    assert_eq!(image, mock_server::SPRITE_BYTES);

    let err = provider.image("missingno").await.unwrap_err();
    assert_eq!(err, ImageError::MissingImage);

    let err = provider.image("unown").await.unwrap_err();
    assert_eq!(err, ImageError::MissingImage);

    let err = provider.image("agumon").await.unwrap_err();
    assert_eq!(err, ImageError::NetworkFailure);
}

#[tokio::test(flavor = "multi_thread")]
async fn names_cannot_reach_other_resources() {
    let config = start_server().await;
    let provider = PokemonImageProvider::new(&config);
    let descriptor = ShakespeareanDescriptor::new(&config);

    for name in ["pikachu#evil", "pikachu?x=1", "pikachu/../bulbasaur", "mr mime"] {
        let err = provider.image(name).await.unwrap_err();
        assert_eq!(err, ImageError::NetworkFailure, "{name}");
        let err = descriptor
            .description(name, SupportedLanguage::English)
            .await
            .unwrap_err();
        assert_eq!(err, DescriptionError::NetworkFailure, "{name}");
    }
}

#[tokio::test(flavor = "multi_thread")]
async fn description_pipeline_translates_first_entry() {
    let config = start_server().await;
    let descriptor = ShakespeareanDescriptor::new(&config);

    let text = descriptor
        .description("pikachu", SupportedLanguage::English)
        .await
        .unwrap();
    assert_eq!(
        text,
        "At which hour several of these Pokémon gather, thine electricity could build and cause lightning storms."
    );

    let text = descriptor
        .description("pikachu", SupportedLanguage::Italian)
        .await
        .unwrap();
    assert_eq!(
        text,
        "Quando si radunano, la loro elettricità può causare tempeste di fulmini."
    );

    let err = descriptor
        .description("missingno", SupportedLanguage::English)
        .await
        .unwrap_err();
    assert_eq!(err, DescriptionError::MissingTranslation);

    let err = descriptor
        .description("agumon", SupportedLanguage::English)
        .await
        .unwrap_err();
    assert_eq!(err, DescriptionError::NetworkFailure);
}

#[tokio::test(flavor = "multi_thread")]
async fn profile_loader_combines_pipelines() {
    let config = start_server().await;
    let loader = ProfileLoader::new(&config);

    let profile = loader.load("bulbasaur").await.unwrap();
    assert_eq!(profile.image, mock_server::SPRITE_BYTES);
    assert_eq!(
        profile.description,
        "A strange seed was planted on its back at birth. The plant sprouts and grows with this Pokémon."
    );

    // Description succeeds but the sprite is null.
    let err = loader.load("unown").await.unwrap_err();
    assert_eq!(err, ProfileError::LoadFailed);
}

#[tokio::test(flavor = "multi_thread")]
async fn worker_classifies_live_statuses() {
    let config = start_server().await;
    let worker = NetworkWorker::default();

    let missing = PokeApiService::Pokemon {
        name: "agumon".to_string(),
    }
    .endpoint(&config.pokeapi_base_url);
    let err = worker.request(&missing).await.unwrap_err();
    assert!(matches!(err, NetworkError::ResponseIssue(ResponseStatus::NotFound)));

    let bad_request = Endpoint {
        base_url: config.translation_base_url.clone(),
        path: "/shakespeare.json".to_string(),
        method: HttpMethod::Get,
        parameters: None,
    };
    let err = worker.request(&bad_request).await.unwrap_err();
    assert!(matches!(err, NetworkError::ResponseIssue(ResponseStatus::BadRequest)));
}

#[tokio::test(flavor = "multi_thread")]
async fn unreachable_host_is_unknown_error() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let worker: Arc<dyn NetworkLayer> = Arc::new(NetworkWorker::default());
    let endpoint = PokeApiService::Pokemon {
        name: "pikachu".to_string(),
    }
    .endpoint(&format!("http://{addr}"));
    let err = worker.request(&endpoint).await.unwrap_err();
    assert!(matches!(err, NetworkError::Unknown(_)));

    let provider = PokemonImageProvider::with_worker(worker, &ApiConfig::new(&format!("http://{addr}"), ""));
    assert_eq!(provider.image("pikachu").await.unwrap_err(), ImageError::NetworkFailure);
}

#[tokio::test(flavor = "multi_thread")]
async fn bare_fetch_bypasses_caches() {
    let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
    let addr = listener.local_addr().unwrap();
    let server = std::thread::spawn(move || {
        let (mut stream, _) = listener.accept().unwrap();
        let mut head: Vec<u8> = Vec::new();
        let mut buf = [0u8; 1024];
        while !head.windows(4).any(|window| window == b"\r\n\r\n") {
            let n = stream.read(&mut buf).unwrap();
            if n == 0 {
                break;
            }
            head.extend_from_slice(&buf[..n]);
        }
        stream
            .write_all(b"HTTP/1.1 200 OK\r\ncontent-length: 3\r\nconnection: close\r\n\r\nabc")
            .unwrap();
        String::from_utf8_lossy(&head).to_lowercase()
    });

    let session = UreqSession::new(REQUEST_TIMEOUT);
    let url = url::Url::parse(&format!("http://{addr}/sprites/25.png")).unwrap();
    let response = session.fetch(&url).await.unwrap();
    assert_eq!(response.status, 200);
    assert_eq!(response.body, b"abc");

    let head = server.join().unwrap();
    assert!(head.contains("cache-control: no-cache"), "{head}");
    assert!(head.contains("pragma: no-cache"), "{head}");
}
