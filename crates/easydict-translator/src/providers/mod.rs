mod baidu;
mod bing;
mod deepl;
mod google;
mod openai;

pub use baidu::BaiduTranslator;
pub use bing::BingTranslator;
pub use deepl::DeepLTranslator;
pub use google::GoogleTranslator;
pub use openai::OpenAiTranslator;
