use super::{ProviderError, TranslationProvider, Usage};
use serde::{Deserialize, Serialize};
use std::time::Duration;

const FREE_API_URL: &str = "https://api-free.deepl.com";
const PRO_API_URL: &str = "https://api.deepl.com";
const FREE_KEY_SUFFIX: &str = ":fx";

/// DeepL REST API client.
#[derive(Clone, Debug)]
pub struct DeepLProvider {
    agent: ureq::Agent,
    api_key: String,
    base_url: String,
}

#[derive(Serialize)]
struct TranslateRequest<'a> {
    text: &'a [&'a str],
    source_lang: String,
    target_lang: String,
}

#[derive(Deserialize)]
struct TranslateResponse {
    translations: Vec<Translation>,
}

#[derive(Deserialize)]
struct Translation {
    text: String,
}

#[derive(Deserialize)]
struct ErrorResponse {
    message: String,
}

impl DeepLProvider {
    /// Create a client. Without `base_url` the endpoint follows the key type.
    pub fn new(api_key: impl Into<String>, base_url: Option<String>) -> Self {
        let api_key = api_key.into();
        let base_url = base_url
            .map(|url| url.trim_end_matches('/').to_string())
            .unwrap_or_else(|| default_base_url(&api_key).to_string());
        let agent = ureq::AgentBuilder::new()
            .timeout_read(Duration::from_secs(60))
            .timeout_write(Duration::from_secs(30))
            .build();

        Self {
            agent,
            api_key,
            base_url,
        }
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    fn authorization(&self) -> String {
        format!("DeepL-Auth-Key {}", self.api_key)
    }
}

impl TranslationProvider for DeepLProvider {
    fn name(&self) -> &str {
        "DeepL"
    }

    fn translate_batch(
        &self,
        texts: &[&str],
        source_locale: &str,
        target_locale: &str,
    ) -> Result<Vec<String>, ProviderError> {
        let url = format!("{}/v2/translate", self.base_url);
        let request = TranslateRequest {
            text: texts,
            source_lang: source_lang(source_locale),
            target_lang: target_lang(target_locale),
        };
        tracing::debug!(
            "POST {url} with {} text(s), {} -> {}",
            texts.len(),
            request.source_lang,
            request.target_lang
        );

        let body = self
            .agent
            .post(&url)
            .set("Authorization", &self.authorization())
            .send_json(&request)
            .map_err(map_ureq_error)?
            .into_string()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        let response: TranslateResponse =
            serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))?;

        if response.translations.len() != texts.len() {
            return Err(ProviderError::LengthMismatch {
                expected: texts.len(),
                received: response.translations.len(),
            });
        }

        Ok(response.translations.into_iter().map(|t| t.text).collect())
    }

    fn usage(&self) -> Result<Usage, ProviderError> {
        let url = format!("{}/v2/usage", self.base_url);
        let body = self
            .agent
            .get(&url)
            .set("Authorization", &self.authorization())
            .call()
            .map_err(map_ureq_error)?
            .into_string()
            .map_err(|e| ProviderError::Transport(e.to_string()))?;

        serde_json::from_str(&body).map_err(|e| ProviderError::Malformed(e.to_string()))
    }
}

/// Free-tier keys end in `:fx` and only work against the free endpoint.
fn default_base_url(api_key: &str) -> &'static str {
    if api_key.ends_with(FREE_KEY_SUFFIX) {
        FREE_API_URL
    } else {
        PRO_API_URL
    }
}

/// Source languages are accepted without a region.
fn source_lang(locale: &str) -> String {
    locale
        .split(['-', '_'])
        .next()
        .unwrap_or(locale)
        .to_uppercase()
}

fn target_lang(locale: &str) -> String {
    locale.replace('_', "-").to_uppercase()
}

fn map_ureq_error(err: ureq::Error) -> ProviderError {
    match err {
        ureq::Error::Status(status, response) => {
            let body = response.into_string().unwrap_or_default();
            let detail = serde_json::from_str::<ErrorResponse>(&body)
                .map(|e| e.message)
                .unwrap_or(body);
            let message = match status {
                403 => format!("authorization failed, check the API key ({detail})"),
                456 => format!("quota exceeded ({detail})"),
                429 => format!("too many requests ({detail})"),
                _ => detail,
            };
            ProviderError::Status { status, message }
        },
        ureq::Error::Transport(transport) => ProviderError::Transport(transport.to_string()),
    }
}
