use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, read_json};

const ENDPOINT: &str = "https://translate.googleapis.com/translate_a/single";

/// Keyless Google endpoint used by the browser extension
#[derive(Clone)]
pub struct GoogleTranslator {
    client: reqwest::Client,
}

impl GoogleTranslator {
    pub fn new(client: reqwest::Client) -> Self {
        Self { client }
    }
}

/// The response is a nested array: `[[[sentence, original, ...], ...], null, detected]`
fn parse_response(json: &serde_json::Value, fallback_source: &str) -> (String, String) {
    let translated = json[0]
        .as_array()
        .map(|sentences| {
            sentences
                .iter()
                .filter_map(|sentence| sentence[0].as_str())
                .collect::<String>()
        })
        .unwrap_or_default();

    let detected = json[2].as_str().unwrap_or(fallback_source).to_string();

    (translated, detected)
}

#[async_trait]
impl Translator for GoogleTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        let response = self
            .client
            .get(ENDPOINT)
            .query(&[
                ("client", "gtx"),
                ("sl", from.as_str()),
                ("tl", to.as_str()),
                ("dt", "t"),
                ("q", text),
            ])
            .send()
            .await?;

        let json = read_json(response).await?;
        let (translated, detected) = parse_response(&json, &from);

        Ok(Translation {
            text: translated,
            from: detected,
            to,
            provider: self.metadata().name,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Google".to_string(),
        }
    }
}
