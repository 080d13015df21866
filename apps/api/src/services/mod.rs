pub mod catalog;
pub mod recommendation;
pub mod similarity;

// Re-export public types
pub use catalog::Catalog;
pub use recommendation::RecommendationService;
pub use similarity::cosine_similarity;
