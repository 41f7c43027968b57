use async_trait::async_trait;
use candle_core::{DType, Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig};
use hf_hub::api::sync::Api;
use hf_hub::{Repo, RepoType};
use serde::Deserialize;
use tokenizers::{PaddingParams, Tokenizer, TruncationParams};

use crate::application::ports::{Embedder, EmbedderError};
use crate::domain::Embedding;

/// How token states are reduced to one sentence vector. BGE models are
/// trained for the `[CLS]` state; most sentence-transformers use the mean.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Pooling {
    Cls,
    Mean,
}

/// BERT-family encoder run in-process with Candle, weights pulled from the
/// Hugging Face hub cache.
pub struct LocalCandleEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
    model_id: String,
    pooling: Pooling,
}

fn load_err(what: &str, e: impl std::fmt::Display) -> EmbedderError {
    EmbedderError::ModelLoadFailed(format!("{what}: {e}"))
}

fn infer<T>(result: candle_core::Result<T>) -> Result<T, EmbedderError> {
    result.map_err(|e| EmbedderError::InferenceFailed(e.to_string()))
}

impl LocalCandleEmbedder {
    pub fn new(model_id: &str, pooling: Pooling) -> Result<Self, EmbedderError> {
        let device = Device::new_metal(0)
            .or_else(|_| Device::new_cuda(0))
            .unwrap_or(Device::Cpu);

        tracing::info!(device = ?device, model = model_id, pooling = ?pooling, "loading embedding model");

        let api = Api::new().map_err(|e| load_err("hub", e))?;
        let repo = api.repo(Repo::new(model_id.to_string(), RepoType::Model));

        let config_path = repo
            .get("config.json")
            .map_err(|e| load_err("config.json", e))?;
        let tokenizer_path = repo
            .get("tokenizer.json")
            .map_err(|e| load_err("tokenizer.json", e))?;
        let weights_path = repo
            .get("model.safetensors")
            .map_err(|e| load_err("model.safetensors", e))?;

        let config: BertConfig = std::fs::read_to_string(&config_path)
            .map_err(|e| load_err("read config", e))
            .and_then(|raw| {
                serde_json::from_str(&raw).map_err(|e| load_err("parse config", e))
            })?;

        let mut tokenizer =
            Tokenizer::from_file(&tokenizer_path).map_err(|e| load_err("tokenizer", e))?;
        tokenizer
            .with_truncation(Some(TruncationParams {
                max_length: config.max_position_embeddings,
                ..Default::default()
            }))
            .map_err(|e| load_err("truncation", e))?;
        tokenizer.with_padding(Some(PaddingParams::default()));

        let dtype = if device.is_cpu() { DType::F32 } else { DType::F16 };

        // SAFETY: safetensors files are memory-mapped read-only
        let vb = unsafe {
            VarBuilder::from_mmaped_safetensors(&[weights_path], dtype, &device)
                .map_err(|e| load_err("weights", e))?
        };
        let model =
            BertModel::load(vb, &config).map_err(|e| load_err("model", e))?;

        tracing::info!(model = model_id, "embedding model loaded");

        Ok(Self {
            model,
            tokenizer,
            device,
            model_id: model_id.to_string(),
            pooling,
        })
    }

    fn encode_texts(&self, texts: &[&str]) -> Result<Vec<Vec<f32>>, EmbedderError> {
        let encodings = self
            .tokenizer
            .encode_batch(texts.to_vec(), true)
            .map_err(|e| EmbedderError::InferenceFailed(format!("tokenization: {e}")))?;

        let batch_size = encodings.len();
        let seq_len = encodings.first().map(|e| e.get_ids().len()).unwrap_or(0);

        let flatten = |field: fn(&tokenizers::Encoding) -> &[u32]| -> Vec<u32> {
            encodings.iter().flat_map(|e| field(e).iter().copied()).collect()
        };

        let input_ids = infer(Tensor::from_vec(
            flatten(tokenizers::Encoding::get_ids),
            (batch_size, seq_len),
            &self.device,
        ))?;
        let token_type_ids = infer(Tensor::from_vec(
            flatten(tokenizers::Encoding::get_type_ids),
            (batch_size, seq_len),
            &self.device,
        ))?;
        let attention_mask = infer(Tensor::from_vec(
            flatten(tokenizers::Encoding::get_attention_mask),
            (batch_size, seq_len),
            &self.device,
        ))?;

        let hidden = infer(
            self.model
                .forward(&input_ids, &token_type_ids, Some(&attention_mask))
                .and_then(|t| t.to_dtype(DType::F32)),
        )?;

        let pooled = match self.pooling {
            Pooling::Cls => infer(hidden.narrow(1, 0, 1).and_then(|t| t.squeeze(1)))?,
            Pooling::Mean => {
                let mask = infer(attention_mask.to_dtype(DType::F32))?;
                let summed = infer(
                    mask.unsqueeze(2)
                        .and_then(|m| hidden.broadcast_mul(&m))
                        .and_then(|t| t.sum(1)),
                )?;
                let counts = infer(mask.sum(1).and_then(|c| c.unsqueeze(1)))?;
                infer(summed.broadcast_div(&counts))?
            }
        };

        let mut vectors: Vec<Vec<f32>> = infer(pooled.to_vec2())?;
        vectors.iter_mut().for_each(|v| l2_normalize(v));
        Ok(vectors)
    }
}

fn l2_normalize(v: &mut [f32]) {
    let length: f32 = v.iter().map(|x| x * x).sum::<f32>().sqrt();
    if length > 0.0 {
        v.iter_mut().for_each(|x| *x /= length);
    }
}

#[async_trait]
impl Embedder for LocalCandleEmbedder {
    async fn embed(&self, text: &str) -> Result<Embedding, EmbedderError> {
        self.encode_texts(&[text])?
            .into_iter()
            .next()
            .map(Embedding::new)
            .ok_or_else(|| EmbedderError::InferenceFailed("empty result".to_string()))
    }

    async fn embed_batch(&self, texts: &[&str]) -> Result<Vec<Embedding>, EmbedderError> {
        if texts.is_empty() {
            return Ok(Vec::new());
        }
        let vectors = self.encode_texts(texts)?;
        Ok(vectors.into_iter().map(Embedding::new).collect())
    }

    fn model_name(&self) -> &str {
        &self.model_id
    }
}
