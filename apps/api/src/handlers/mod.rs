pub mod index;
pub mod process_data;
pub mod recommendations;

pub use index::index as index_endpoint;
pub use process_data::process_data_config;
pub use recommendations::recommendations_config;

/// Body rejected by the JSON extractor: wrong content type, malformed JSON,
/// or a value that does not fit the request shape.
pub(crate) const NOT_JSON: &str = "Request must be JSON";
