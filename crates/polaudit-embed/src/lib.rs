//! Embedding backends.
//!
//! `MiniLmEmbedder` runs the all-MiniLM-L6-v2 sentence transformer locally
//! through candle (384-dim, mean-pooled, L2-normalized). `HashEmbedder`
//! produces deterministic token-hash vectors in the same shape for tests
//! and offline runs. Backend choice is explicit via `EmbedderConfig`; both
//! sides of a run (index build and query) must use the same instance.

use anyhow::{anyhow, Result};
use std::path::{Path, PathBuf};

use candle_core::{Device, Tensor};
use candle_nn::VarBuilder;
use candle_transformers::models::bert::{BertModel, Config as BertConfig, DTYPE};
use tokenizers::Tokenizer;

use polaudit_core::config::{EmbedderBackend, EmbedderConfig};
use polaudit_core::traits::Embedder;

pub mod device;
pub mod pool;
pub mod tokenize;

pub use device::select_device;
pub use pool::mean_pool_l2;
pub use tokenize::tokenize_on_device;

pub const EMBEDDING_DIM: usize = 384;

const MAX_SEQ_LEN: usize = 256;
const BERT_PAD_ID: u32 = 0;

pub struct MiniLmEmbedder {
    model: BertModel,
    tokenizer: Tokenizer,
    device: Device,
}

impl MiniLmEmbedder {
    /// Load tokenizer, config and weights from `model_dir`
    /// (`tokenizer.json`, `config.json`, and either `model.safetensors`
    /// or `pytorch_model.bin`).
    pub fn load(model_dir: &Path) -> Result<Self> {
        let device = select_device();
        tracing::info!(dir = %model_dir.display(), "loading MiniLM embedding model");

        let tokenizer_path = model_dir.join("tokenizer.json");
        let tokenizer = Tokenizer::from_file(&tokenizer_path)
            .map_err(|e| anyhow!("Failed to load tokenizer from {}: {}", tokenizer_path.display(), e))?;

        let config_path = model_dir.join("config.json");
        let config: BertConfig = serde_json::from_str(&std::fs::read_to_string(&config_path)?)?;

        let safetensors_path = model_dir.join("model.safetensors");
        let vb = if safetensors_path.exists() {
            unsafe { VarBuilder::from_mmaped_safetensors(&[safetensors_path], DTYPE, &device)? }
        } else {
            let weights_path = model_dir.join("pytorch_model.bin");
            let weights = candle_core::pickle::read_all(&weights_path)?;
            let weights_map: std::collections::HashMap<String, Tensor> =
                weights.into_iter().collect();
            VarBuilder::from_tensors(weights_map, DTYPE, &device)
        };
        let model = BertModel::load(vb, &config)?;
        tracing::info!("MiniLM model ready");
        Ok(Self { model, tokenizer, device })
    }

    fn embed_one(&self, text: &str) -> Result<Vec<f32>> {
        let (input_ids, attention_mask) =
            tokenize_on_device(&self.tokenizer, text, MAX_SEQ_LEN, BERT_PAD_ID, &self.device)?;
        let token_type_ids = input_ids.zeros_like()?;
        let hidden = self
            .model
            .forward(&input_ids, &token_type_ids, Some(&attention_mask))?;
        let pooled = mean_pool_l2(&hidden, &attention_mask)?;
        let vector: Vec<f32> = pooled.to_device(&Device::Cpu)?.squeeze(0)?.to_vec1()?;
        if vector.len() != EMBEDDING_DIM {
            return Err(anyhow!(
                "unexpected embedding width {} (wanted {})",
                vector.len(),
                EMBEDDING_DIM
            ));
        }
        Ok(vector)
    }
}

impl Embedder for MiniLmEmbedder {
    fn dim(&self) -> usize {
        EMBEDDING_DIM
    }

    fn max_len(&self) -> usize {
        MAX_SEQ_LEN
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        texts.iter().map(|t| self.embed_one(t)).collect()
    }
}

/// Deterministic stand-in embedder: each whitespace token hashes into a
/// bucket, the result is L2-normalized. Same text always maps to the same
/// vector, so retrieval tests are reproducible without model weights.
pub struct HashEmbedder {
    dim: usize,
}

impl HashEmbedder {
    pub fn new(dim: usize) -> Self {
        Self { dim }
    }
}

impl Default for HashEmbedder {
    fn default() -> Self {
        Self::new(EMBEDDING_DIM)
    }
}

impl Embedder for HashEmbedder {
    fn dim(&self) -> usize {
        self.dim
    }

    fn max_len(&self) -> usize {
        usize::MAX
    }

    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        use std::hash::{Hash, Hasher};
        use twox_hash::XxHash64;

        let mut out = Vec::with_capacity(texts.len());
        for text in texts {
            let mut v = vec![0f32; self.dim];
            for (i, token) in text.split_whitespace().enumerate() {
                let token = token.to_lowercase();
                let mut hasher = XxHash64::with_seed(0);
                token.hash(&mut hasher);
                let h = hasher.finish();
                let idx = (h as usize) % self.dim;
                let val = (((h >> 32) as u32) as f32) / (u32::MAX as f32);
                v[idx] += val + (i as f32 % 3.0) * 0.01;
            }
            let norm = (v.iter().map(|x| x * x).sum::<f32>()).sqrt().max(1e-6);
            for x in &mut v {
                *x /= norm;
            }
            out.push(v);
        }
        Ok(out)
    }
}

/// Build the embedder named by `config`. The MiniLM backend needs a model
/// directory; `models/all-MiniLM-L6-v2` is tried when none is configured.
pub fn embedder_from_config(config: &EmbedderConfig) -> Result<Box<dyn Embedder>> {
    match config.backend {
        EmbedderBackend::Hash => {
            tracing::info!("using deterministic hash embedder");
            Ok(Box::new(HashEmbedder::default()))
        }
        EmbedderBackend::MiniLm => {
            let model_dir = resolve_model_dir(config.model_dir.as_deref())?;
            Ok(Box::new(MiniLmEmbedder::load(&model_dir)?))
        }
    }
}

fn resolve_model_dir(configured: Option<&Path>) -> Result<PathBuf> {
    if let Some(dir) = configured {
        if dir.exists() {
            return Ok(dir.to_path_buf());
        }
        return Err(anyhow!("configured model_dir does not exist: {}", dir.display()));
    }
    for candidate in ["models/all-MiniLM-L6-v2", "../models/all-MiniLM-L6-v2"] {
        let p = Path::new(candidate);
        if p.exists() {
            return Ok(p.to_path_buf());
        }
    }
    Err(anyhow!(
        "could not locate the MiniLM model directory; set pipeline.embedding.model_dir"
    ))
}
