use crate::{
    config::Config,
    error::{ApiError, Result},
    ml::Embedder,
};
use log::info;
use rust_bert::pipelines::sentence_embeddings::{
    SentenceEmbeddingsBuilder, SentenceEmbeddingsModel, SentenceEmbeddingsModelType,
};
use std::sync::{Mutex, MutexGuard, PoisonError};
use tch::Device;
use tracing::{debug, warn};

const HUB_PREFIX: &str = "sentence-transformers/";
const MAX_TEXT_PREVIEW_LENGTH: usize = 100;

/// Sentence embeddings computed locally by a pretrained transformer
pub struct SentenceEmbedder {
    // The torch module is not `Sync`; one inference runs at a time.
    model: Mutex<SentenceEmbeddingsModel>,
    model_name: String,
}

impl SentenceEmbedder {
    /// Loads the configured model, downloading the pretrained weights into the
    /// local cache on first use.
    ///
    /// This blocks for the duration of the download and must not be called
    /// from an async task.
    pub fn load(config: &Config) -> Result<Self> {
        let device = if config.use_gpu {
            Device::cuda_if_available()
        } else {
            Device::Cpu
        };

        let (model, model_name) = match &config.model_path {
            Some(path) => {
                info!("Loading sentence embedding model from {} on {:?}", path, device);
                let model = SentenceEmbeddingsBuilder::local(path)
                    .with_device(device)
                    .create_model()
                    .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", path, e)))?;
                (model, path.clone())
            }
            None => {
                let model_type = parse_model_type(&config.model)?;
                info!(
                    "Loading pretrained sentence embedding model '{}' on {:?} (this might take a moment the first time it downloads)",
                    config.model, device
                );
                let model = SentenceEmbeddingsBuilder::remote(model_type)
                    .with_device(device)
                    .create_model()
                    .map_err(|e| ApiError::ModelLoadError(format!("{}: {}", config.model, e)))?;
                (model, config.model.clone())
            }
        };

        info!("Sentence embedding model '{}' loaded", model_name);

        Ok(Self {
            model: Mutex::new(model),
            model_name,
        })
    }
}

impl Embedder for SentenceEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if let Some(first) = texts.first() {
            debug!(
                "Encoding {} text(s), first: '{}'",
                texts.len(),
                preview(first)
            );
        }

        let model = lock_recovering(&self.model);
        Ok(model.encode(texts)?)
    }

    fn model_name(&self) -> &str {
        &self.model_name
    }
}

/// Resolves a configured model name to one of the pretrained
/// sentence-embedding models, ignoring case and the hub namespace.
pub fn parse_model_type(name: &str) -> Result<SentenceEmbeddingsModelType> {
    let normalized = name.trim().to_lowercase();
    let normalized = normalized
        .strip_prefix(HUB_PREFIX)
        .unwrap_or(&normalized);

    match normalized {
        "all-minilm-l6-v2" => Ok(SentenceEmbeddingsModelType::AllMiniLmL6V2),
        "all-minilm-l12-v2" => Ok(SentenceEmbeddingsModelType::AllMiniLmL12V2),
        "all-distilroberta-v1" => Ok(SentenceEmbeddingsModelType::AllDistilrobertaV1),
        "paraphrase-albert-small-v2" => Ok(SentenceEmbeddingsModelType::ParaphraseAlbertSmallV2),
        "bert-base-nli-mean-tokens" => Ok(SentenceEmbeddingsModelType::BertBaseNliMeanTokens),
        "distiluse-base-multilingual-cased" => {
            Ok(SentenceEmbeddingsModelType::DistiluseBaseMultilingualCased)
        }
        "sentence-t5-base" => Ok(SentenceEmbeddingsModelType::SentenceT5Base),
        _ => Err(ApiError::ModelLoadError(format!(
            "Unknown sentence embedding model: {}",
            name
        ))),
    }
}

/// Inference leaves the model untouched, so a panic in an earlier call does
/// not invalidate it; take the guard back instead of failing every request.
fn lock_recovering<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| {
        warn!("Model lock was poisoned by a panicked inference; recovering");
        PoisonError::into_inner(poisoned)
    })
}

fn preview(text: &str) -> &str {
    match text.char_indices().nth(MAX_TEXT_PREVIEW_LENGTH) {
        Some((end, _)) => &text[..end],
        None => text,
    }
}
