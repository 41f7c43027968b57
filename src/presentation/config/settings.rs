use std::path::{Path, PathBuf};

use config::{Config, ConfigError, Environment as EnvironmentSource, File};
use serde::Deserialize;

use super::Environment;
use crate::infrastructure::embeddings::Pooling;
use crate::infrastructure::observability::TracingConfig;
use crate::infrastructure::persistence::PineconeOptions;

/// Non-secret tunables. Layered from built-in defaults, `ana.toml`,
/// `ana.<env>.toml`, an explicit `--config` file and `ANA__SECTION__KEY`
/// variables, later sources winning.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct Settings {
    pub paths: PathSettings,
    pub chunking: ChunkingSettings,
    pub embeddings: EmbeddingsSettings,
    pub pinecone: PineconeSettings,
    pub search: SearchSettings,
    pub logging: LoggingSettings,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PathSettings {
    pub data_dir: PathBuf,
    pub fragments_file: PathBuf,
    pub embeddings_file: PathBuf,
}

impl Default for PathSettings {
    fn default() -> Self {
        Self {
            data_dir: PathBuf::from("data"),
            fragments_file: PathBuf::from("data/fragmentos.json"),
            embeddings_file: PathBuf::from("embeddings.json"),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ChunkingSettings {
    pub max_tokens: usize,
    pub overlap_ratio: f32,
    pub tokens_per_word: f32,
}

impl Default for ChunkingSettings {
    fn default() -> Self {
        Self {
            max_tokens: 800,
            overlap_ratio: 0.2,
            tokens_per_word: 1.3,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct EmbeddingsSettings {
    pub model: String,
    pub pooling: Pooling,
    pub dimension: usize,
    pub batch_size: usize,
}

impl Default for EmbeddingsSettings {
    fn default() -> Self {
        Self {
            model: "BAAI/bge-large-en-v1.5".to_string(),
            pooling: Pooling::Cls,
            dimension: 1024,
            batch_size: 32,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct PineconeSettings {
    pub control_plane_url: String,
    pub api_version: String,
    pub namespace: String,
    pub upsert_batch_size: usize,
}

impl Default for PineconeSettings {
    fn default() -> Self {
        Self {
            control_plane_url: "https://api.pinecone.io".to_string(),
            api_version: "2025-01".to_string(),
            namespace: String::new(),
            upsert_batch_size: 50,
        }
    }
}

impl PineconeSettings {
    pub fn options(&self) -> PineconeOptions {
        PineconeOptions {
            control_plane_url: self.control_plane_url.clone(),
            api_version: self.api_version.clone(),
            namespace: self.namespace.clone(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct SearchSettings {
    pub top_k: usize,
    pub source_sample_k: usize,
}

impl Default for SearchSettings {
    fn default() -> Self {
        Self {
            top_k: 3,
            source_sample_k: 100,
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LoggingSettings {
    pub level: String,
    pub json: bool,
}

impl Default for LoggingSettings {
    fn default() -> Self {
        Self {
            level: "info".to_string(),
            json: false,
        }
    }
}

impl LoggingSettings {
    pub fn tracing_config(&self, environment: Environment) -> TracingConfig {
        TracingConfig::new(environment.as_str(), self.json, &self.level)
    }
}

impl Settings {
    pub fn load(environment: Environment, explicit: Option<&Path>) -> Result<Self, ConfigError> {
        let mut builder = Config::builder()
            .add_source(File::with_name("ana").required(false))
            .add_source(File::with_name(&environment.settings_file()).required(false));

        if let Some(path) = explicit {
            builder = builder.add_source(File::from(path).required(true));
        }

        builder
            .add_source(
                EnvironmentSource::with_prefix("ANA")
                    .prefix_separator("__")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?
            .try_deserialize()
    }
}
