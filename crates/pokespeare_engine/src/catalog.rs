use std::sync::Arc;

use engine_logging::{engine_debug, engine_info, engine_warn};
use serde::de::DeserializeOwned;
use serde::Deserialize;
use tokio::sync::OnceCell;
use url::Url;

use crate::cache::cache_key;
use crate::{CatalogError, CreatureRecord, HttpResponse, HttpTransport, RecordCache, TransportError};

pub const DEFAULT_CATALOG_BASE_URL: &str = "https://pokeapi.co/api/v2/";

/// Large enough to list every creature in a single page.
const NAMES_PAGE_LIMIT: u32 = 2000;

/// Client for the creature catalog service.
///
/// Sprite and artwork lookups go through the record cache; the species text
/// lookup always hits the network.
pub struct CatalogClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    cache: RecordCache,
    names: OnceCell<Vec<String>>,
}

impl CatalogClient {
    pub fn new(transport: Arc<dyn HttpTransport>, base_url: impl Into<String>) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            cache: RecordCache::new(),
            names: OnceCell::new(),
        }
    }

    pub fn cache(&self) -> &RecordCache {
        &self.cache
    }

    pub async fn fetch_sprite(&self, name: &str) -> Result<Option<Url>, CatalogError> {
        Ok(self.record(name).await?.sprite)
    }

    pub async fn fetch_artwork(&self, name: &str) -> Result<Option<Url>, CatalogError> {
        Ok(self.record(name).await?.artwork)
    }

    /// Full record for `name`, fetched at most once while cached.
    pub async fn record(&self, name: &str) -> Result<CreatureRecord, CatalogError> {
        let key = cache_key(name);
        if key.is_empty() {
            return Err(CatalogError::NotFound);
        }
        self.cache
            .get_or_fetch(&key, || self.fetch_record(&key))
            .await
    }

    /// First English flavor text of the species, with line and form feeds flattened.
    pub async fn fetch_description(&self, name: &str) -> Result<Option<String>, CatalogError> {
        let key = cache_key(name);
        if key.is_empty() {
            return Err(CatalogError::NotFound);
        }
        let url = self.endpoint(&["pokemon-species", &key])?;
        let species: SpeciesDto = self.get_json(&url).await?;
        let text = species
            .flavor_text_entries
            .into_iter()
            .find(|entry| entry.language.name == "en")
            .map(|entry| normalize_flavor_text(&entry.flavor_text));
        if text.is_none() {
            engine_warn!("No english flavor text for {}", key);
        }
        Ok(text)
    }

    /// Every creature name known to the catalog, cached after the first success.
    pub async fn fetch_names(&self) -> Result<Vec<String>, CatalogError> {
        let names = self
            .names
            .get_or_try_init(|| async {
                let mut url = self.endpoint(&["pokemon"])?;
                url.query_pairs_mut()
                    .append_pair("limit", &NAMES_PAGE_LIMIT.to_string());
                let list: NameListDto = self.get_json(&url).await?;
                engine_info!("Catalog lists {} names", list.results.len());
                Ok::<_, CatalogError>(list.results.into_iter().map(|entry| entry.name).collect())
            })
            .await?;
        Ok(names.clone())
    }

    async fn fetch_record(&self, key: &str) -> Result<CreatureRecord, CatalogError> {
        let url = self.endpoint(&["pokemon", key])?;
        engine_debug!("Catalog miss for {}, fetching {}", key, url);
        let dto: PokemonDto = self.get_json(&url).await?;
        Ok(CreatureRecord {
            name: key.to_string(),
            sprite: dto.sprites.front_default,
            artwork: dto.sprites.other.official_artwork.front_default,
        })
    }

    fn endpoint(&self, segments: &[&str]) -> Result<Url, CatalogError> {
        let invalid = || CatalogError::InvalidUrl(self.base_url.clone());
        let mut url = Url::parse(&self.base_url).map_err(|_| invalid())?;
        url.path_segments_mut()
            .map_err(|_| invalid())?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    async fn get_json<T: DeserializeOwned>(&self, url: &Url) -> Result<T, CatalogError> {
        let response = classify(self.transport.get(url).await)?;
        serde_json::from_slice(&response.body)
            .map_err(|err| CatalogError::Network(format!("malformed catalog response: {err}")))
    }
}

/// Maps transport outcomes onto catalog errors. Absence is decided here, not downstream.
fn classify(outcome: Result<HttpResponse, TransportError>) -> Result<HttpResponse, CatalogError> {
    match outcome {
        Ok(response) if response.is_success() => Ok(response),
        Ok(response) if response.status == 404 => Err(CatalogError::NotFound),
        Ok(response) => Err(CatalogError::Network(format!(
            "http status {}",
            response.status
        ))),
        Err(err) if err.is_empty_unknown() => Err(CatalogError::NotFound),
        Err(err) => Err(CatalogError::Network(err.to_string())),
    }
}

fn normalize_flavor_text(text: &str) -> String {
    text.replace(['\n', '\u{c}'], " ")
}

#[derive(Debug, Deserialize)]
struct PokemonDto {
    sprites: SpritesDto,
}

#[derive(Debug, Deserialize)]
struct SpritesDto {
    front_default: Option<Url>,
    other: OtherSpritesDto,
}

#[derive(Debug, Deserialize)]
struct OtherSpritesDto {
    #[serde(rename = "official-artwork")]
    official_artwork: ArtworkDto,
}

#[derive(Debug, Deserialize)]
struct ArtworkDto {
    front_default: Option<Url>,
}

#[derive(Debug, Deserialize)]
struct SpeciesDto {
    flavor_text_entries: Vec<FlavorTextEntryDto>,
}

#[derive(Debug, Deserialize)]
struct FlavorTextEntryDto {
    flavor_text: String,
    language: LanguageDto,
}

#[derive(Debug, Deserialize)]
struct LanguageDto {
    name: String,
}

#[derive(Debug, Deserialize)]
struct NameListDto {
    results: Vec<NameEntryDto>,
}

#[derive(Debug, Deserialize)]
struct NameEntryDto {
    name: String,
}
