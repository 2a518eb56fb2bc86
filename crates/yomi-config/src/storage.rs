use serde::{Deserialize, Serialize};

fn default_data_path() -> String {
    "yomi-data.json".to_string()
}

#[derive(Serialize, Deserialize, Clone)]
#[serde(default)]
pub struct StorageConfig {
    /// Path of the JSON record store holding cache, vocabulary and settings.
    #[serde(default = "default_data_path")]
    pub data_path: String,
}

impl Default for StorageConfig {
    fn default() -> Self {
        Self {
            data_path: default_data_path(),
        }
    }
}
