pub mod pool;
pub mod providers;

pub use pool::TranslatorPool;
pub use providers::{BaiduTranslator, BingTranslator, DeepLTranslator, GoogleTranslator, OpenAiTranslator};

pub type LanguageCode = String;

/// Translation provider interface
#[async_trait::async_trait]
pub trait Translator: Send + Sync {
    /// Translate text from source to target language. `from` may be `auto`.
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError>;

    /// Provider metadata
    fn metadata(&self) -> ProviderMetadata;
}

#[derive(Debug, Clone, PartialEq)]
pub struct Translation {
    pub text: String,
    /// Source language as reported by the provider, or the requested one
    pub from: LanguageCode,
    pub to: LanguageCode,
    /// Display name of the service that produced the text
    pub provider: String,
}

#[derive(Debug, Clone)]
pub struct ProviderMetadata {
    pub name: String,
}

#[derive(Debug, thiserror::Error)]
pub enum TranslateError {
    #[error("API error: {0}")]
    ApiError(String),

    #[error("Network error: {0}")]
    NetworkError(#[from] reqwest::Error),

    #[error("Parse error: {0}")]
    ParseError(String),

    #[error("{0} not configured")]
    NotConfigured(&'static str),

    #[error("Error {code}: {message}")]
    Provider { code: String, message: String },

    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    #[error("Authentication error")]
    AuthenticationError,
}

/// Read a response body as JSON, reporting decode failures as parse errors
pub(crate) async fn read_json(response: reqwest::Response) -> Result<serde_json::Value, TranslateError> {
    if response.status() == 429 {
        return Err(TranslateError::RateLimitExceeded);
    }

    if response.status() == 401 || response.status() == 403 {
        return Err(TranslateError::AuthenticationError);
    }

    if !response.status().is_success() {
        return Err(TranslateError::ApiError(format!("HTTP {}", response.status())));
    }

    response
        .json::<serde_json::Value>()
        .await
        .map_err(|e| TranslateError::ParseError(e.to_string()))
}
