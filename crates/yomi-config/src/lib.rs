use std::env;

use serde::{Deserialize, Serialize};

use self::agent::AgentConfig;
use self::sources::SourcesConfig;
use self::storage::StorageConfig;

pub mod agent;
pub mod sources;
pub mod storage;

#[derive(Serialize, Deserialize, Clone, Default)]
#[serde(default)]
pub struct Config {
    pub sources: SourcesConfig,
    pub storage: StorageConfig,
    pub agent: AgentConfig,
}

impl Config {
    /// Defaults with environment overrides for the deploy-specific knobs.
    pub fn new() -> Self {
        let mut config = Config::default();

        if let Ok(path) = env::var("YOMI_DATA_PATH") {
            config.storage.data_path = path;
        }

        if let Ok(url) = env::var("YOMI_WS_URL") {
            config.agent.ws_url = url;
        }

        if let Some(timeout) = env::var("YOMI_AGENT_TIMEOUT_MS")
            .ok()
            .and_then(|v| v.parse().ok())
        {
            config.agent.request_timeout_ms = timeout;
        }

        config
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_document_yields_full_defaults() {
        let config: Config = serde_json::from_str("{}").expect("parse");
        assert_eq!(config.sources.translate_source, "en");
        assert_eq!(config.sources.translate_target, "zh");
        assert_eq!(config.storage.data_path, "yomi-data.json");
        assert_eq!(config.agent.request_timeout_ms, 3000);
    }

    #[test]
    fn partial_section_keeps_sibling_defaults() {
        let config: Config =
            serde_json::from_str(r#"{"sources":{"translate_target":"fr"}}"#).expect("parse");
        assert_eq!(config.sources.translate_target, "fr");
        assert_eq!(config.sources.translate_source, "en");
        assert_eq!(config.storage.data_path, "yomi-data.json");
    }
}
