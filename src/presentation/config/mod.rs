mod credentials;
mod environment;
mod settings;

pub use credentials::{CredentialError, credentials_from_env_file, load_credentials};
pub use environment::{ENVIRONMENT_VAR, Environment};
pub use settings::{
    ChunkingSettings, EmbeddingsSettings, LoggingSettings, PathSettings, PineconeSettings,
    SearchSettings, Settings,
};
