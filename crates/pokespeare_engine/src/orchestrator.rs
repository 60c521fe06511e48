use std::future::Future;
use std::sync::Arc;

use engine_logging::{engine_info, engine_warn};
use pokespeare_core::{ComposedResult, ErrorKind};
use tokio::task::JoinHandle;

use crate::catalog::DEFAULT_CATALOG_BASE_URL;
use crate::translate::{DEFAULT_TRANSLATION_BASE_URL, DEFAULT_TRANSLATION_STYLE};
use crate::{
    CatalogClient, HttpTransport, ReqwestTransport, TransportError, TransportSettings,
    TranslationClient,
};

#[derive(Debug, Clone)]
pub struct ClientSettings {
    pub catalog_base_url: String,
    pub translation_base_url: String,
    pub translation_style: String,
    pub transport: TransportSettings,
}

impl Default for ClientSettings {
    fn default() -> Self {
        Self {
            catalog_base_url: DEFAULT_CATALOG_BASE_URL.to_string(),
            translation_base_url: DEFAULT_TRANSLATION_BASE_URL.to_string(),
            translation_style: DEFAULT_TRANSLATION_STYLE.to_string(),
            transport: TransportSettings::default(),
        }
    }
}

/// Composes catalog and translation lookups into display-ready results.
///
/// Every client error leaving this type is an [`ErrorKind`].
#[derive(Clone)]
pub struct Orchestrator {
    catalog: Arc<CatalogClient>,
    translator: Arc<TranslationClient>,
}

impl Orchestrator {
    pub fn new(catalog: Arc<CatalogClient>, translator: Arc<TranslationClient>) -> Self {
        Self {
            catalog,
            translator,
        }
    }

    /// Production wiring: one shared reqwest transport for both services.
    pub fn live(settings: &ClientSettings) -> Result<Self, TransportError> {
        let transport: Arc<dyn HttpTransport> =
            Arc::new(ReqwestTransport::new(settings.transport.clone())?);
        Ok(Self::with_transports(settings, transport.clone(), transport))
    }

    pub fn with_transports(
        settings: &ClientSettings,
        catalog_transport: Arc<dyn HttpTransport>,
        translation_transport: Arc<dyn HttpTransport>,
    ) -> Self {
        let catalog = CatalogClient::new(catalog_transport, settings.catalog_base_url.clone());
        let translator = TranslationClient::new(
            translation_transport,
            settings.translation_base_url.clone(),
            settings.translation_style.clone(),
        );
        Self::new(Arc::new(catalog), Arc::new(translator))
    }

    pub fn catalog(&self) -> &CatalogClient {
        &self.catalog
    }

    /// Looks up `name`, translating its description while sprite and artwork
    /// are fetched concurrently. The first failure wins; branches still running
    /// are left to finish on their own.
    pub async fn compose(&self, name: &str) -> Result<ComposedResult, ErrorKind> {
        let description = {
            let catalog = self.catalog.clone();
            let translator = self.translator.clone();
            let name = name.to_string();
            spawn_branch(async move {
                let text = catalog.fetch_description(&name).await?;
                let translated = translator.translate(text.as_deref().unwrap_or("")).await?;
                Ok::<_, ErrorKind>(translated)
            })
        };
        let sprite = {
            let catalog = self.catalog.clone();
            let name = name.to_string();
            spawn_branch(async move { Ok::<_, ErrorKind>(catalog.fetch_sprite(&name).await?) })
        };
        let artwork = {
            let catalog = self.catalog.clone();
            let name = name.to_string();
            spawn_branch(async move { Ok::<_, ErrorKind>(catalog.fetch_artwork(&name).await?) })
        };

        let outcome = tokio::try_join!(joined(description), joined(sprite), joined(artwork));
        match outcome {
            Ok((description, sprite, artwork)) => {
                engine_info!("Composed {}", name);
                Ok(ComposedResult::from_query(name, artwork, description, sprite))
            }
            Err(err) => {
                engine_warn!("Compose {} failed: {:?}", name, err);
                Err(err)
            }
        }
    }

    /// All names known to the catalog.
    pub async fn names(&self) -> Result<Vec<String>, ErrorKind> {
        Ok(self.catalog.fetch_names().await?)
    }
}

fn spawn_branch<T, F>(branch: F) -> JoinHandle<Result<T, ErrorKind>>
where
    T: Send + 'static,
    F: Future<Output = Result<T, ErrorKind>> + Send + 'static,
{
    tokio::spawn(branch)
}

async fn joined<T>(handle: JoinHandle<Result<T, ErrorKind>>) -> Result<T, ErrorKind> {
    handle
        .await
        .map_err(|err| ErrorKind::Network(format!("lookup task failed: {err}")))?
}
