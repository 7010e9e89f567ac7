use serde::{Deserialize, Serialize};

fn default_openai_url() -> String {
    "https://api.openai.com/v1/chat/completions".to_string()
}

fn default_openai_model() -> String {
    "gpt-4o-mini".to_string()
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServiceEntry {
    pub enabled: bool,
    pub api_key: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BaiduServiceEntry {
    pub enabled: bool,
    pub app_id: String,
    pub secret_key: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct OpenAiServiceEntry {
    pub enabled: bool,
    pub api_key: String,
    /// Any OpenAI-compatible chat completions endpoint
    #[serde(default = "default_openai_url")]
    pub api_url: String,
    #[serde(default = "default_openai_model")]
    pub model: String,
}

impl Default for OpenAiServiceEntry {
    fn default() -> Self {
        Self {
            enabled: false,
            api_key: String::new(),
            api_url: default_openai_url(),
            model: default_openai_model(),
        }
    }
}

fn enabled_free() -> ServiceEntry {
    ServiceEntry {
        enabled: true,
        api_key: String::new(),
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ServicesConfig {
    #[serde(default = "enabled_free")]
    pub google: ServiceEntry,
    pub deepl: ServiceEntry,
    #[serde(default = "enabled_free")]
    pub bing: ServiceEntry,
    pub baidu: BaiduServiceEntry,
    pub openai: OpenAiServiceEntry,
}

impl Default for ServicesConfig {
    fn default() -> Self {
        Self {
            google: enabled_free(),
            deepl: ServiceEntry::default(),
            bing: enabled_free(),
            baidu: BaiduServiceEntry::default(),
            openai: OpenAiServiceEntry::default(),
        }
    }
}
