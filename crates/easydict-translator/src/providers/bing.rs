use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, read_json};

const ENDPOINT: &str = "https://api.cognitive.microsofttranslator.com/translate";

#[derive(Clone)]
pub struct BingTranslator {
    client: reqwest::Client,
}

impl BingTranslator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// Bing names Chinese scripts instead of regions. `auto` maps to no `from` at all.
fn bing_code(code: &str) -> Option<&str> {
    match code {
        "auto" => None,
        "zh-CN" => Some("zh-Hans"),
        "zh-TW" => Some("zh-Hant"),
        other => Some(other),
    }
}

#[async_trait]
impl Translator for BingTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let mut query = vec![("api-version", "3.0")];
        if let Some(source) = bing_code(&from) {
            query.push(("from", source));
        }
        query.push(("to", bing_code(&to).unwrap_or("en")));

        let response = self
            .client
            .post(ENDPOINT)
            .query(&query)
            .json(&serde_json::json!([{ "Text": text }]))
            .send()
            .await?;

        let json = read_json(response).await?;

        let translated = json[0]["translations"][0]["text"]
            .as_str()
            .unwrap_or_default()
            .to_string();
        let detected = json[0]["detectedLanguage"]["language"]
            .as_str()
            .unwrap_or(&from)
            .to_string();

        Ok(Translation {
            text: translated,
            from: detected,
            to,
            provider: self.metadata().name,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Bing".to_string(),
        }
    }
}
