use std::collections::HashMap;
use std::path::Path;

use crate::domain::{API_KEY_VAR, CredentialSet, HOST_VAR, INDEX_NAME_VAR};

#[derive(Debug, thiserror::Error)]
pub enum CredentialError {
    #[error("missing credential: {0} is not set or empty")]
    MissingCredential(&'static str),
    #[error("failed to read environment file {path}: {message}")]
    EnvFile { path: String, message: String },
}

/// Builds the credential set from any key lookup. Values are trimmed and a
/// blank value counts as missing.
pub fn load_credentials<F>(lookup: F) -> Result<CredentialSet, CredentialError>
where
    F: Fn(&str) -> Option<String>,
{
    let required = |key: &'static str| {
        lookup(key)
            .map(|value| value.trim().to_string())
            .filter(|value| !value.is_empty())
            .ok_or(CredentialError::MissingCredential(key))
    };

    Ok(CredentialSet::new(
        required(API_KEY_VAR)?,
        required(HOST_VAR)?,
        required(INDEX_NAME_VAR)?,
    ))
}

/// Reads one `.env` file without touching the process environment.
pub fn credentials_from_env_file(path: &Path) -> Result<CredentialSet, CredentialError> {
    let env_file_error = |e: dotenvy::Error| CredentialError::EnvFile {
        path: path.display().to_string(),
        message: e.to_string(),
    };

    let vars: HashMap<String, String> = dotenvy::from_path_iter(path)
        .map_err(env_file_error)?
        .collect::<Result<_, _>>()
        .map_err(env_file_error)?;

    load_credentials(|key| vars.get(key).cloned())
}
