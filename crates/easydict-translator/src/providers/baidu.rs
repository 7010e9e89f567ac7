use async_trait::async_trait;

use crate::{LanguageCode, ProviderMetadata, TranslateError, Translation, Translator, read_json};

const ENDPOINT: &str = "https://fanyi-api.baidu.com/api/trans/vip/translate";

#[derive(Clone)]
pub struct BaiduTranslator {
    client: reqwest::Client,
    app_id: String,
    secret_key: String,
}

impl BaiduTranslator {
    pub fn new(client: reqwest::Client, app_id: String, secret_key: String) -> Self {
        Self {
            client,
            app_id,
            secret_key,
        }
    }

    /// `md5(appid + q + salt + secret)` as lowercase hex
    fn sign(&self, text: &str, salt: u32) -> String {
        let raw = format!("{}{}{}{}", self.app_id, text, salt, self.secret_key);
        format!("{:x}", md5::compute(raw.as_bytes()))
    }
}

fn baidu_code(code: &str) -> &str {
    match code {
        "zh-CN" | "zh-TW" => "zh",
        "ja" => "jp",
        "ko" => "kor",
        "fr" => "fra",
        "es" => "spa",
        other => other,
    }
}

/// Multi-paragraph input comes back as one `trans_result` entry per line
fn join_results(json: &serde_json::Value) -> String {
    json["trans_result"]
        .as_array()
        .map(|entries| {
            entries
                .iter()
                .filter_map(|entry| entry["dst"].as_str())
                .collect::<Vec<_>>()
                .join("\n")
        })
        .unwrap_or_default()
}

#[async_trait]
impl Translator for BaiduTranslator {
    async fn translate(
        &self,
        text: &str,
        from: LanguageCode,
        to: LanguageCode,
    ) -> Result<Translation, TranslateError> {
        if self.app_id.is_empty() || self.secret_key.is_empty() {
            return Err(TranslateError::NotConfigured("API credentials"));
        }

        let salt = uuid::Uuid::new_v4().as_u128() as u32;
        let sign = self.sign(text, salt);
        let salt = salt.to_string();

        let params = [
            ("q", text),
            ("from", baidu_code(&from)),
            ("to", baidu_code(&to)),
            ("appid", self.app_id.as_str()),
            ("salt", salt.as_str()),
            ("sign", sign.as_str()),
        ];

        let response = self.client.post(ENDPOINT).form(&params).send().await?;
        let json = read_json(response).await?;

        if let Some(code) = json.get("error_code") {
            let code = code
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| code.to_string());
            return Err(TranslateError::Provider {
                code,
                message: json["error_msg"].as_str().unwrap_or("Unknown").to_string(),
            });
        }

        let detected = json["from"].as_str().unwrap_or(&from).to_string();

        Ok(Translation {
            text: join_results(&json),
            from: detected,
            to,
            provider: self.metadata().name,
        })
    }

    fn metadata(&self) -> ProviderMetadata {
        ProviderMetadata {
            name: "Baidu".to_string(),
        }
    }
}
