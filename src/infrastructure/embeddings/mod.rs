mod local_candle_embedder;

pub use local_candle_embedder::{LocalCandleEmbedder, Pooling};
