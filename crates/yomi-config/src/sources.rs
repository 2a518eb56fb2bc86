use serde::{Deserialize, Serialize};

fn default_dictionary_url() -> String {
    "https://jisho.org/api/v1/search/words".to_string()
}

fn default_sentence_url() -> String {
    "https://tatoeba.org/en/api_v0/search".to_string()
}

fn default_sentence_lang() -> String {
    "jpn".to_string()
}

fn default_translate_url() -> String {
    "https://libretranslate.de/translate".to_string()
}

fn default_translate_fallback_url() -> String {
    "https://libretranslate.com/translate".to_string()
}

fn default_translate_source() -> String {
    "en".to_string()
}

fn default_translate_target() -> String {
    "zh".to_string()
}

/// Remote source endpoints. The translation fallback must honor the same
/// contract as the primary endpoint.
#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct SourcesConfig {
    #[serde(default = "default_dictionary_url")]
    pub dictionary_url: String,
    #[serde(default = "default_sentence_url")]
    pub sentence_url: String,
    #[serde(default = "default_sentence_lang")]
    pub sentence_lang: String,
    #[serde(default = "default_translate_url")]
    pub translate_url: String,
    #[serde(default = "default_translate_fallback_url")]
    pub translate_fallback_url: String,
    #[serde(default = "default_translate_source")]
    pub translate_source: String,
    #[serde(default = "default_translate_target")]
    pub translate_target: String,
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            dictionary_url: default_dictionary_url(),
            sentence_url: default_sentence_url(),
            sentence_lang: default_sentence_lang(),
            translate_url: default_translate_url(),
            translate_fallback_url: default_translate_fallback_url(),
            translate_source: default_translate_source(),
            translate_target: default_translate_target(),
        }
    }
}
