use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

use pokespeare_engine::{
    CatalogClient, CatalogError, HttpResponse, HttpTransport, ReqwestTransport, TransportError,
    TransportFailure, TransportSettings,
};
use pretty_assertions::assert_eq;
use serde_json::json;
use url::Url;
use wiremock::matchers::{method, path, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

const SPRITE: &str = "https://img.example.com/sprites/25.png";
const ARTWORK: &str = "https://img.example.com/official-artwork/25.png";

fn transport() -> Arc<dyn HttpTransport> {
    Arc::new(ReqwestTransport::new(TransportSettings::default()).unwrap())
}

fn pokemon_body() -> serde_json::Value {
    json!({
        "name": "pikachu",
        "sprites": {
            "front_default": SPRITE,
            "other": {
                "official-artwork": { "front_default": ARTWORK }
            }
        }
    })
}

fn species_body() -> serde_json::Value {
    json!({
        "flavor_text_entries": [
            { "flavor_text": "Il stocke l'electricite.", "language": { "name": "fr" } },
            {
                "flavor_text": "When several of\nthese POKéMON\u{c}gather, lightning.",
                "language": { "name": "en" }
            },
            { "flavor_text": "Second english entry.", "language": { "name": "en" } }
        ]
    })
}

async fn mount_pikachu(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(pokemon_body()))
        .mount(server)
        .await;
}

async fn requests_to(server: &MockServer, route: &str) -> usize {
    server
        .received_requests()
        .await
        .unwrap_or_default()
        .iter()
        .filter(|request| request.url.path() == route)
        .count()
}

/// Fails every request with an unknown error carrying no detail.
#[derive(Default)]
struct SilentFailureTransport {
    calls: AtomicUsize,
}

#[async_trait::async_trait]
impl HttpTransport for SilentFailureTransport {
    async fn get(&self, _url: &Url) -> Result<HttpResponse, TransportError> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Err(TransportError::new(TransportFailure::Unknown, ""))
    }
}

#[tokio::test]
async fn sprite_then_artwork_hits_catalog_once() {
    let server = MockServer::start().await;
    mount_pikachu(&server).await;
    let client = CatalogClient::new(transport(), server.uri());

    let sprite = client.fetch_sprite("pikachu").await.unwrap();
    let artwork = client.fetch_artwork("pikachu").await.unwrap();

    assert_eq!(sprite, Some(Url::parse(SPRITE).unwrap()));
    assert_eq!(artwork, Some(Url::parse(ARTWORK).unwrap()));
    assert_eq!(requests_to(&server, "/pokemon/pikachu").await, 1);
}

#[tokio::test]
async fn cache_key_is_lowercased_name() {
    let server = MockServer::start().await;
    mount_pikachu(&server).await;
    let client = CatalogClient::new(transport(), server.uri());

    client.fetch_sprite("PIKACHU").await.unwrap();
    client.fetch_artwork("Pikachu").await.unwrap();

    assert_eq!(requests_to(&server, "/pokemon/pikachu").await, 1);
    assert!(client.cache().get("pikachu").is_some());
}

#[tokio::test]
async fn cache_population_is_order_independent() {
    let server = MockServer::start().await;
    mount_pikachu(&server).await;

    let artwork_first = CatalogClient::new(transport(), server.uri());
    artwork_first.fetch_artwork("pikachu").await.unwrap();
    artwork_first.fetch_sprite("pikachu").await.unwrap();

    let sprite_first = CatalogClient::new(transport(), server.uri());
    sprite_first.fetch_sprite("pikachu").await.unwrap();
    sprite_first.fetch_artwork("pikachu").await.unwrap();

    let cached = artwork_first.cache().get("pikachu").expect("cached record");
    assert_eq!(Some(cached.clone()), sprite_first.cache().get("pikachu"));
    assert_eq!(cached.name, "pikachu");
    assert_eq!(cached.sprite, Some(Url::parse(SPRITE).unwrap()));
}

#[tokio::test]
async fn invalidated_name_is_fetched_again() {
    let server = MockServer::start().await;
    mount_pikachu(&server).await;
    let client = CatalogClient::new(transport(), server.uri());

    client.fetch_sprite("pikachu").await.unwrap();
    assert!(client.cache().invalidate("pikachu"));
    client.fetch_sprite("pikachu").await.unwrap();

    assert_eq!(requests_to(&server, "/pokemon/pikachu").await, 2);
}

#[tokio::test]
async fn concurrent_lookups_share_one_request() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(100))
                .set_body_json(pokemon_body()),
        )
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    let (sprite, artwork) = tokio::join!(
        client.fetch_sprite("pikachu"),
        client.fetch_artwork("pikachu")
    );

    assert!(sprite.unwrap().is_some());
    assert!(artwork.unwrap().is_some());
    assert_eq!(requests_to(&server, "/pokemon/pikachu").await, 1);
}

#[tokio::test]
async fn description_picks_first_english_entry_and_is_not_cached() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon-species/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(species_body()))
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    let first = client.fetch_description("pikachu").await.unwrap();
    let second = client.fetch_description("pikachu").await.unwrap();

    assert_eq!(
        first.as_deref(),
        Some("When several of these POKéMON gather, lightning.")
    );
    assert_eq!(first, second);
    assert_eq!(requests_to(&server, "/pokemon-species/pikachu").await, 2);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn description_without_english_entry_is_none() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon-species/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "flavor_text_entries": [
                { "flavor_text": "Nur Deutsch.", "language": { "name": "de" } }
            ]
        })))
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    assert_eq!(client.fetch_description("pikachu").await.unwrap(), None);
}

#[tokio::test]
async fn http_404_maps_to_not_found() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/notapokemon"))
        .respond_with(ResponseTemplate::new(404).set_body_string("Not Found"))
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    let err = client.fetch_sprite("notapokemon").await.unwrap_err();
    assert_eq!(err, CatalogError::NotFound);
    assert!(client.cache().is_empty());
}

#[tokio::test]
async fn server_error_maps_to_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(503))
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    let err = client.fetch_artwork("pikachu").await.unwrap_err();
    assert_eq!(err, CatalogError::Network("http status 503".to_string()));
}

#[tokio::test]
async fn malformed_record_maps_to_network_error() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon/pikachu"))
        .respond_with(ResponseTemplate::new(200).set_body_string("<html>oops</html>"))
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    let err = client.fetch_sprite("pikachu").await.unwrap_err();
    assert!(matches!(err, CatalogError::Network(_)));
}

#[tokio::test]
async fn empty_unknown_transport_failure_maps_to_not_found() {
    let transport = Arc::new(SilentFailureTransport::default());
    let client = CatalogClient::new(transport.clone(), "https://catalog.test/api/v2/");

    assert_eq!(
        client.fetch_sprite("notapokemon").await,
        Err(CatalogError::NotFound)
    );
    assert_eq!(
        client.fetch_description("notapokemon").await,
        Err(CatalogError::NotFound)
    );
    assert_eq!(transport.calls.load(Ordering::SeqCst), 2);
}

#[tokio::test]
async fn blank_name_is_not_found_without_request() {
    let transport = Arc::new(SilentFailureTransport::default());
    let client = CatalogClient::new(transport.clone(), "https://catalog.test/api/v2/");

    assert_eq!(client.fetch_sprite("   ").await, Err(CatalogError::NotFound));
    assert_eq!(client.fetch_description("").await, Err(CatalogError::NotFound));
    assert_eq!(transport.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test]
async fn invalid_base_url_is_reported() {
    let client = CatalogClient::new(transport(), "not a url");
    assert_eq!(
        client.fetch_sprite("pikachu").await,
        Err(CatalogError::InvalidUrl("not a url".to_string()))
    );
}

#[tokio::test]
async fn names_are_listed_once() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/pokemon"))
        .and(query_param("limit", "2000"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "count": 2,
            "next": null,
            "previous": null,
            "results": [
                { "name": "bulbasaur", "url": "https://pokeapi.co/api/v2/pokemon/1/" },
                { "name": "ivysaur", "url": "https://pokeapi.co/api/v2/pokemon/2/" }
            ]
        })))
        .mount(&server)
        .await;
    let client = CatalogClient::new(transport(), server.uri());

    let names = client.fetch_names().await.unwrap();
    let again = client.fetch_names().await.unwrap();

    assert_eq!(names, vec!["bulbasaur".to_string(), "ivysaur".to_string()]);
    assert_eq!(names, again);
    assert_eq!(requests_to(&server, "/pokemon").await, 1);
}
