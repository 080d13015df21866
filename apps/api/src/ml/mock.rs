//! Deterministic embedders for tests.

use crate::{
    error::{ApiError, Result},
    ml::Embedder,
};

const DIMENSION: usize = 64;

/// Bag-of-words embedder: each lowercase alphanumeric token is hashed into
/// one of a fixed number of buckets. Identical texts map to identical vectors.
#[derive(Debug, Default)]
pub struct KeywordEmbedder;

impl KeywordEmbedder {
    fn vectorize(text: &str) -> Vec<f32> {
        let mut vector = vec![0.0; DIMENSION];
        for token in text
            .split(|c: char| !c.is_alphanumeric())
            .filter(|token| !token.is_empty())
        {
            vector[bucket(&token.to_lowercase())] += 1.0;
        }
        vector
    }
}

impl Embedder for KeywordEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|text| Self::vectorize(text)).collect())
    }

    fn model_name(&self) -> &str {
        "keyword-test"
    }
}

/// Embeds every text to the same vector, so all items tie.
#[derive(Debug, Default)]
pub struct ConstantEmbedder;

impl Embedder for ConstantEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        Ok(texts.iter().map(|_| vec![1.0, 1.0, 1.0]).collect())
    }

    fn model_name(&self) -> &str {
        "constant-test"
    }
}

/// Embeds the catalog, then fails every later call.
#[derive(Debug, Default)]
pub struct FailingEmbedder {
    calls: std::sync::atomic::AtomicUsize,
}

impl Embedder for FailingEmbedder {
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>> {
        if self.calls.fetch_add(1, std::sync::atomic::Ordering::SeqCst) == 0 {
            return KeywordEmbedder.embed_batch(texts);
        }
        Err(ApiError::ModelInferenceError("inference unavailable".to_string()))
    }

    fn model_name(&self) -> &str {
        "failing-test"
    }
}

// FNV-1a
fn bucket(token: &str) -> usize {
    let mut hash: u64 = 0xcbf2_9ce4_8422_2325;
    for byte in token.bytes() {
        hash ^= u64::from(byte);
        hash = hash.wrapping_mul(0x0100_0000_01b3);
    }
    (hash % DIMENSION as u64) as usize
}
