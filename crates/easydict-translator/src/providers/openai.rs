use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, read_json};

/// Any OpenAI-compatible chat completions endpoint
#[derive(Clone)]
pub struct OpenAiTranslator {
    client: reqwest::Client,
    api_key: String,
    api_url: String,
    model: String,
}

impl OpenAiTranslator {
    pub fn new(client: reqwest::Client, api_key: String, api_url: String, model: String) -> Self {
        Self {
            client,
            api_key,
            api_url,
            model,
        }
    }
}

fn language_name(code: &str) -> &str {
    match code {
        "zh-CN" => "Simplified Chinese",
        "zh-TW" => "Traditional Chinese",
        "en" => "English",
        "ja" => "Japanese",
        "ko" => "Korean",
        "fr" => "French",
        "de" => "German",
        "es" => "Spanish",
        "ru" => "Russian",
        other => other,
    }
}

fn system_prompt(from: &str, to: &str) -> String {
    let source = if from == "auto" {
        "auto-detected language"
    } else {
        language_name(from)
    };

    format!(
        "You are a professional translator. Translate the following text from {} to {}. \
         Only output the translation, no explanations or extra text.",
        source,
        language_name(to)
    )
}

#[async_trait]
impl Translator for OpenAiTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.api_key.is_empty() {
            return Err(TranslateError::NotConfigured("API key"));
        }

        let body = serde_json::json!({
            "model": self.model,
            "messages": [
                { "role": "system", "content": system_prompt(&from, &to) },
                { "role": "user", "content": text }
            ],
            "temperature": 0.3,
            "max_tokens": 4096
        });

        let response = self
            .client
            .post(&self.api_url)
            .bearer_auth(&self.api_key)
            .json(&body)
            .send()
            .await?;

        let json = read_json(response).await?;

        let translated = json["choices"][0]["message"]["content"]
            .as_str()
            .unwrap_or_default()
            .trim()
            .to_string();

        Ok(Translation {
            text: translated,
            from,
            to,
            provider: format!("AI ({})", self.model),
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "AI".to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn prompt_names_both_languages() {
        let prompt = system_prompt("auto", "zh-CN");
        assert!(prompt.contains("from auto-detected language to Simplified Chinese"));

        let prompt = system_prompt("ja", "pt");
        assert!(prompt.contains("from Japanese to pt"));
    }
}
