use std::collections::HashMap;
use std::sync::Arc;

use easydict_config::services::ServicesConfig;
use easydict_core::language::{self, AUTO};
use easydict_types::TranslationResult;
use tokio::task::JoinSet;

use crate::{
    BaiduTranslator, BingTranslator, DeepLTranslator, GoogleTranslator, OpenAiTranslator, Translator,
};

/// Fans one text out to every enabled service and collects the answers in
/// configuration order. A failing service only fails its own entry.
#[derive(Clone, Default)]
pub struct TranslatorPool {
    providers: Vec<Arc<dyn Translator>>,
}

impl TranslatorPool {
    pub fn new(providers: Vec<Arc<dyn Translator>>) -> Self {
        Self { providers }
    }

    /// Enabled services in display order: Google, Bing, DeepL, Baidu, AI
    pub fn from_config(services: &ServicesConfig, client: reqwest::Client) -> Self {
        let mut providers: Vec<Arc<dyn Translator>> = Vec::new();

        if services.google.enabled {
            providers.push(Arc::new(GoogleTranslator::new(client.clone())));
        }
        if services.bing.enabled {
            providers.push(Arc::new(BingTranslator::new(client.clone())));
        }
        if services.deepl.enabled {
            providers.push(Arc::new(DeepLTranslator::new(
                client.clone(),
                services.deepl.api_key.clone(),
            )));
        }
        if services.baidu.enabled {
            providers.push(Arc::new(BaiduTranslator::new(
                client.clone(),
                services.baidu.app_id.clone(),
                services.baidu.secret_key.clone(),
            )));
        }
        if services.openai.enabled {
            providers.push(Arc::new(OpenAiTranslator::new(
                client,
                services.openai.api_key.clone(),
                services.openai.api_url.clone(),
                services.openai.model.clone(),
            )));
        }

        Self { providers }
    }

    pub fn len(&self) -> usize {
        self.providers.len()
    }

    pub fn is_empty(&self) -> bool {
        self.providers.is_empty()
    }

    pub async fn translate_all(
        &self,
        text: &str,
        source: &str,
        target: &str,
        default_target: &str,
    ) -> Vec<TranslationResult> {
        let target = resolve_target(text, source, target, default_target);
        tracing::debug!(
            "Translating {} chars with {} services: {} -> {}",
            text.len(),
            self.providers.len(),
            source,
            target
        );

        // Dropping the set aborts every call still in flight
        let mut calls = JoinSet::new();
        let mut names = HashMap::with_capacity(self.providers.len());

        for (index, provider) in self.providers.iter().enumerate() {
            let provider = provider.clone();
            let text = text.to_string();
            let source = source.to_string();
            let target = target.clone();
            let name = provider.metadata().name;

            let call = calls.spawn(async move {
                let result = match provider.translate(&text, source.clone(), target.clone()).await {
                    Ok(translation) => TranslationResult::success(
                        translation.provider,
                        translation.text,
                        translation.from,
                        translation.to,
                    ),
                    Err(e) => {
                        let name = provider.metadata().name;
                        tracing::warn!("{} translation failed: {}", name, e);
                        TranslationResult::failure(name, e.to_string(), source, target)
                    }
                };
                (index, result)
            });
            names.insert(call.id(), (index, name));
        }

        let mut slots: Vec<Option<TranslationResult>> = vec![None; self.providers.len()];
        while let Some(joined) = calls.join_next().await {
            match joined {
                Ok((index, result)) => slots[index] = Some(result),
                Err(e) => {
                    let Some((index, name)) = names.get(&e.id()) else {
                        tracing::error!("Unknown translation task failed: {}", e);
                        continue;
                    };
                    tracing::error!("{} translation task failed: {}", name, e);
                    slots[*index] = Some(TranslationResult::failure(
                        "Unknown",
                        format!("Task error: {e}"),
                        source,
                        target.clone(),
                    ));
                }
            }
        }

        slots.into_iter().flatten().collect()
    }
}

/// An `auto` target is derived from the (detected) source language
fn resolve_target(text: &str, source: &str, target: &str, default_target: &str) -> String {
    if target != AUTO {
        return target.to_string();
    }

    let source = if source == AUTO {
        language::detect_language(text)
    } else {
        source
    };
    language::auto_target_lang(source, default_target)
}
