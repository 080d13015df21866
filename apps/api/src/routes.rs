use actix_web::web;

use crate::handlers::{index_endpoint, process_data_config, recommendations_config};

/// Configure all routes for the API
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.service(index_endpoint)
        .configure(process_data_config)
        .configure(recommendations_config);
}
