use crate::{
    config::Config,
    error::Result,
    ml::SentenceEmbedder,
    routes,
    services::{Catalog, RecommendationService},
};
use actix_cors::Cors;
use actix_web::{middleware::Logger, web, App, HttpServer};
use anyhow::Context;
use log::info;
use std::{net::TcpListener, sync::Arc};

pub struct Application {
    config: Config,
}

impl Application {
    /// Create a new application instance
    pub fn new(config: &Config) -> Self {
        Self {
            config: config.clone(),
        }
    }

    /// Loads the catalog and the embedding model, then embeds the catalog.
    ///
    /// Any failure here is fatal: the service never starts without a model.
    pub async fn build_service(&self) -> Result<RecommendationService> {
        let catalog = Catalog::load(&self.config)?;
        let config = self.config.clone();

        // Model download and inference block; run them on the blocking pool.
        let service = tokio::task::spawn_blocking(move || {
            let embedder = SentenceEmbedder::load(&config)?;
            RecommendationService::new(Arc::new(embedder), catalog, config.top_n)
        })
        .await
        .context("Model initialization task failed")??;

        Ok(service)
    }

    /// Build and run the server
    pub async fn run(&self) -> Result<()> {
        let service = self.build_service().await?;

        let bind_address = format!("{}:{}", self.config.host, self.config.port);
        let listener = TcpListener::bind(&bind_address)?;
        info!("Starting server at http://{}", bind_address);

        self.run_with_listener(listener, service).await
    }

    /// Run the server with a specific TCP listener
    /// This is useful for testing where we want to use a random port
    pub async fn run_with_listener(
        &self,
        listener: TcpListener,
        service: RecommendationService,
    ) -> Result<()> {
        let recommendation_service = web::Data::new(service);

        HttpServer::new(move || {
            let cors = Cors::default()
                .allow_any_origin()
                .allow_any_method()
                .allow_any_header();

            App::new()
                .wrap(cors)
                .wrap(Logger::default())
                .app_data(recommendation_service.clone())
                .configure(routes::configure)
        })
        .listen(listener)?
        .run()
        .await?;

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ApiError;

    fn config() -> Config {
        Config {
            host: "127.0.0.1".to_string(),
            port: 0,
            model: "all-MiniLM-L6-v2".to_string(),
            model_path: None,
            use_gpu: false,
            catalog_path: None,
            top_n: 3,
        }
    }

    #[actix_web::test]
    async fn test_bad_catalog_aborts_before_model_load() {
        let config = Config {
            catalog_path: Some("/nonexistent/items.json".to_string()),
            ..config()
        };

        let result = Application::new(&config).build_service().await;
        assert!(matches!(result, Err(ApiError::CatalogError(_))));
    }

    #[actix_web::test]
    async fn test_unknown_model_is_fatal() {
        let config = Config {
            model: "not-a-real-model".to_string(),
            ..config()
        };

        let result = Application::new(&config).build_service().await;
        assert!(matches!(result, Err(ApiError::ModelLoadError(_))));
    }
}
