pub mod embedder;
#[cfg(test)]
pub mod mock;
pub mod sentence_embedder;

pub use embedder::Embedder;
pub use sentence_embedder::SentenceEmbedder;
