use crate::{
    error::{ApiError, Result},
    handlers::NOT_JSON,
    models::RecommendationRequest,
    services::RecommendationService,
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use log::{debug, info};

const NO_PREFERENCES: &str = "No preferences provided for recommendation";

pub fn recommendations_config(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!("Rejected /recommend body: {}", err);
        ApiError::InvalidInput(NOT_JSON.to_string()).into()
    });

    cfg.service(
        web::resource("/recommend")
            .app_data(json_config)
            .route(web::post().to(recommend)),
    );
}

/// Recommends the catalog items closest to the free-text `preferences`.
///
/// Responds with a JSON array of full item objects, best match first.
pub async fn recommend(
    request: Json<RecommendationRequest>,
    recommendation_service: web::Data<RecommendationService>,
) -> Result<HttpResponse> {
    // Whitespace-only text is still a preference; only "" is rejected.
    let preferences = request
        .preferences_text()
        .ok_or_else(|| ApiError::InvalidInput(NO_PREFERENCES.to_string()))?
        .to_string();
    info!("Received user preferences: '{}'", preferences);

    // Embedding is CPU-bound; keep it off the worker's event loop.
    let items = web::block(move || recommendation_service.recommend(&preferences)).await??;

    Ok(HttpResponse::Ok().json(items))
}
