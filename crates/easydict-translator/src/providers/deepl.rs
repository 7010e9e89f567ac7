use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, read_json};

const FREE_URL: &str = "https://api-free.deepl.com/v2/translate";
const PRO_URL: &str = "https://api.deepl.com/v2/translate";

#[derive(Clone)]
pub struct DeepLTranslator {
    client: reqwest::Client,
    api_key: String,
}

impl DeepLTranslator {
    pub fn new(client: reqwest::Client, api_key: String) -> Self {
        Self { client, api_key }
    }

    /// Free-tier keys carry a `:fx` suffix and live on a separate host
    fn api_url(&self) -> &'static str {
        if self.api_key.ends_with(":fx") {
            FREE_URL
        } else {
            PRO_URL
        }
    }
}

fn deepl_code(code: &str) -> String {
    match code {
        "zh-CN" | "zh-TW" => "ZH".to_string(),
        other => other.to_uppercase(),
    }
}

#[async_trait]
impl Translator for DeepLTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::NotConfigured("API key"));
        }

        let target = deepl_code(&to);
        let mut params = vec![("text", text.to_string()), ("target_lang", target)];
        if from != "auto" {
            params.push(("source_lang", deepl_code(&from)));
        }

        let response = self
            .client
            .post(self.api_url())
            .header("Authorization", format!("DeepL-Auth-Key {}", self.api_key))
            .form(&params)
            .send()
            .await?;

        let json = read_json(response).await?;

        let translation = json["translations"]
            .get(0)
            .ok_or_else(|| TranslateError::ApiError("No translation in response".to_string()))?;

        let translated = translation["text"].as_str().unwrap_or_default().to_string();
        let detected = translation["detected_source_language"]
            .as_str()
            .map(str::to_lowercase)
            .unwrap_or(from);

        Ok(Translation {
            text: translated,
            from: detected,
            to,
            provider: self.metadata().name,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "DeepL".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn free_keys_use_the_free_host() {
        let client = reqwest::Client::new();
        assert_eq!(DeepLTranslator::new(client.clone(), "abc:fx".into()).api_url(), FREE_URL);
        assert_eq!(DeepLTranslator::new(client, "abc".into()).api_url(), PRO_URL);
    }

    #[test]
    fn codes_are_upper_case() {
        assert_eq!(deepl_code("zh-CN"), "ZH");
        assert_eq!(deepl_code("zh-TW"), "ZH");
        assert_eq!(deepl_code("en"), "EN");
        assert_eq!(deepl_code("ja"), "JA");
    }

    #[tokio::test]
    async fn missing_key_fails_without_a_request() {
        let translator = DeepLTranslator::new(reqwest::Client::new(), String::new());
        let err = translator
            .translate("hello", "auto".into(), "de".into())
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "API key not configured");
    }
}
