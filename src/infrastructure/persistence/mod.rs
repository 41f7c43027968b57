mod pinecone_adapter;

pub use pinecone_adapter::{PineconeAdapter, PineconeOptions, normalize_base_url};
