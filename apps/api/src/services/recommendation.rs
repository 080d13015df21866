use crate::{
    error::{ApiError, Result},
    ml::Embedder,
    models::{Item, ScoredItem},
    services::{catalog::Catalog, similarity::cosine_similarity},
};
use ndarray::{Array2, ArrayView1};
use std::sync::Arc;
use tracing::{debug, info};

/// Ranks catalog items against free-text preferences.
///
/// Catalog embeddings are computed once on construction and stored as the
/// rows of a matrix, row `i` belonging to `catalog.items()[i]`. Nothing is
/// mutated afterwards, so one instance is shared by every worker.
pub struct RecommendationService {
    embedder: Arc<dyn Embedder>,
    catalog: Catalog,
    embeddings: Array2<f32>,
    top_n: usize,
}

impl RecommendationService {
    /// Embeds every catalog description in one batch.
    ///
    /// Blocking: runs the embedding model.
    pub fn new(embedder: Arc<dyn Embedder>, catalog: Catalog, top_n: usize) -> Result<Self> {
        info!(
            "Embedding {} catalog descriptions with {}",
            catalog.len(),
            embedder.model_name()
        );

        let vectors = embedder.embed_batch(&catalog.descriptions())?;
        let embeddings = stack_rows(vectors, catalog.len())?;

        info!(
            "Catalog embeddings ready: {} x {}",
            embeddings.nrows(),
            embeddings.ncols()
        );

        Ok(Self {
            embedder,
            catalog,
            embeddings,
            top_n,
        })
    }

    pub fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    pub fn dimension(&self) -> usize {
        self.embeddings.ncols()
    }

    /// Returns the `top_n` catalog items most similar to `preferences`.
    ///
    /// Blocking: runs the embedding model.
    pub fn recommend(&self, preferences: &str) -> Result<Vec<Item>> {
        let query = self.embedder.embed(preferences)?;
        let ranked = self.rank(&query)?;

        let recommended: Vec<Item> = ranked
            .into_iter()
            .take(self.top_n)
            .map(|scored| scored.item.clone())
            .collect();

        info!(
            "Recommended {} items: {:?}",
            recommended.len(),
            recommended.iter().map(|item| item.id.as_str()).collect::<Vec<_>>()
        );

        Ok(recommended)
    }

    /// Scores every catalog item against `query`, best first.
    ///
    /// Equal scores keep catalog order.
    pub fn rank(&self, query: &[f32]) -> Result<Vec<ScoredItem<'_>>> {
        if query.len() != self.dimension() {
            return Err(ApiError::ModelInferenceError(format!(
                "Embedding dimension mismatch: expected {}, got {}",
                self.dimension(),
                query.len()
            )));
        }

        let query = ArrayView1::from(query);
        let mut scored: Vec<ScoredItem<'_>> = self
            .catalog
            .items()
            .iter()
            .zip(self.embeddings.outer_iter())
            .map(|(item, row)| ScoredItem {
                item,
                score: cosine_similarity(query, row),
            })
            .collect();

        // sort_by is stable
        scored.sort_by(|a, b| b.score.total_cmp(&a.score));

        for scored_item in &scored {
            debug!("{} scored {:.4}", scored_item.item.id, scored_item.score);
        }

        Ok(scored)
    }
}

fn stack_rows(vectors: Vec<Vec<f32>>, rows: usize) -> Result<Array2<f32>> {
    if vectors.len() != rows {
        return Err(ApiError::ModelInferenceError(format!(
            "Expected {} catalog embeddings, got {}",
            rows,
            vectors.len()
        )));
    }

    let dimension = vectors.first().map_or(0, Vec::len);
    if let Some(bad) = vectors.iter().position(|v| v.len() != dimension) {
        return Err(ApiError::ModelInferenceError(format!(
            "Catalog embedding {} has dimension {}, expected {}",
            bad,
            vectors[bad].len(),
            dimension
        )));
    }

    let flat: Vec<f32> = vectors.into_iter().flatten().collect();
    Ok(Array2::from_shape_vec((rows, dimension), flat)?)
}
