use crate::error::{ApiError, Result};

/// Maps text to a fixed-length semantic vector.
///
/// Implementations are shared across actix workers behind an `Arc`, so they
/// must be `Send + Sync`. Calls are blocking and should run off the async
/// executor.
pub trait Embedder: Send + Sync {
    /// Embed every text, returning one vector per input in the same order.
    fn embed_batch(&self, texts: &[String]) -> Result<Vec<Vec<f32>>>;

    /// Embed a single text.
    fn embed(&self, text: &str) -> Result<Vec<f32>> {
        self.embed_batch(&[text.to_string()])?
            .into_iter()
            .next()
            .ok_or_else(|| ApiError::ModelInferenceError("Embedder returned no vector".to_string()))
    }

    /// Name of the underlying model, for logging.
    fn model_name(&self) -> &str;
}
