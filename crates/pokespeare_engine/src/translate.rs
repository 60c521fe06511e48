use std::sync::Arc;

use engine_logging::{engine_debug, engine_warn};
use serde::Deserialize;
use url::Url;

use crate::{HttpTransport, TranslationError};

pub const DEFAULT_TRANSLATION_BASE_URL: &str = "https://api.funtranslations.com/";
pub const DEFAULT_TRANSLATION_STYLE: &str = "shakespeare";

const STATUS_TOO_MANY_REQUESTS: u16 = 429;

/// Client for the text stylization service.
pub struct TranslationClient {
    transport: Arc<dyn HttpTransport>,
    base_url: String,
    style: String,
}

impl TranslationClient {
    pub fn new(
        transport: Arc<dyn HttpTransport>,
        base_url: impl Into<String>,
        style: impl Into<String>,
    ) -> Self {
        Self {
            transport,
            base_url: base_url.into(),
            style: style.into(),
        }
    }

    /// Rewrites `text` in the configured style. Empty text is sent like any other.
    pub async fn translate(&self, text: &str) -> Result<String, TranslationError> {
        let url = self.request_url(text)?;
        engine_debug!("Translating {} chars via {}", text.len(), self.style);

        let response = self
            .transport
            .get(&url)
            .await
            .map_err(|err| TranslationError::Network(err.to_string()))?;

        if response.status == STATUS_TOO_MANY_REQUESTS {
            engine_warn!("Translation service rate limit hit");
            return Err(TranslationError::RateLimited);
        }
        if !response.is_success() {
            return Err(TranslationError::Network(format!(
                "http status {}",
                response.status
            )));
        }

        let decoded: TranslationDto = serde_json::from_slice(&response.body)
            .map_err(|err| TranslationError::InvalidTranslation(err.to_string()))?;
        engine_debug!(
            "Translated {} of {} as {}",
            decoded.success.total,
            decoded.contents.text.len(),
            decoded.contents.translation
        );
        Ok(decoded.contents.translated)
    }

    fn request_url(&self, text: &str) -> Result<Url, TranslationError> {
        let encoded = encode_query_text(text);
        let raw = format!(
            "{}/translate/{}.json?text={}",
            self.base_url.trim_end_matches('/'),
            self.style,
            encoded
        );
        Url::parse(&raw).map_err(|_| TranslationError::InvalidUrl(raw))
    }
}

/// Percent-encodes `text` for the query string, control characters included.
fn encode_query_text(text: &str) -> String {
    urlencoding::encode(text).into_owned()
}

#[derive(Debug, Deserialize)]
struct TranslationDto {
    success: SuccessDto,
    contents: ContentsDto,
}

#[derive(Debug, Deserialize)]
struct SuccessDto {
    total: u32,
}

#[derive(Debug, Deserialize)]
struct ContentsDto {
    translated: String,
    text: String,
    translation: String,
}
