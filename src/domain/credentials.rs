use std::fmt;

pub const API_KEY_VAR: &str = "PINECONE_API_KEY";
pub const HOST_VAR: &str = "PINECONE_HOST";
pub const INDEX_NAME_VAR: &str = "PINECONE_INDEX_NAME";

/// Everything needed to reach the index. Immutable once loaded.
#[derive(Clone, PartialEq, Eq)]
pub struct CredentialSet {
    api_key: String,
    host: String,
    index_name: String,
}

impl CredentialSet {
    pub fn new(api_key: String, host: String, index_name: String) -> Self {
        Self {
            api_key,
            host,
            index_name,
        }
    }

    pub fn api_key(&self) -> &str {
        &self.api_key
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn index_name(&self) -> &str {
        &self.index_name
    }
}

impl fmt::Debug for CredentialSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CredentialSet")
            .field("api_key", &"[REDACTED]")
            .field("host", &self.host)
            .field("index_name", &self.index_name)
            .finish()
    }
}
