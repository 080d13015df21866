use crate::{
    error::{ApiError, Result},
    handlers::NOT_JSON,
    models::{ProcessDataRequest, ProcessDataResponse},
};
use actix_web::{
    web::{self, Json},
    HttpResponse,
};
use log::{debug, info};

const DEFAULT_MESSAGE: &str = "No message provided";

pub fn process_data_config(cfg: &mut web::ServiceConfig) {
    let json_config = web::JsonConfig::default().error_handler(|err, _req| {
        debug!("Rejected /process_data body: {}", err);
        ApiError::InvalidProcessRequest(NOT_JSON.to_string()).into()
    });

    cfg.service(
        web::resource("/process_data")
            .app_data(json_config)
            .route(web::post().to(process_data)),
    );
}

/// Echoes `message` back inside a greeting; used for connectivity checks.
pub async fn process_data(request: Json<ProcessDataRequest>) -> Result<HttpResponse> {
    let message = request.message_text(DEFAULT_MESSAGE);
    info!("Received message for process_data: '{}'", message);

    Ok(HttpResponse::Ok().json(ProcessDataResponse::success(format!(
        "Python processed: '{}'. Sending back a greeting!",
        message
    ))))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{http::header, http::StatusCode, test, App};
    use serde_json::{json, Value};

    async fn post(req: test::TestRequest) -> (StatusCode, Value) {
        let app = test::init_service(App::new().configure(process_data_config)).await;
        let resp = test::call_service(&app, req.uri("/process_data").to_request()).await;
        let status = resp.status();
        (status, test::read_body_json(resp).await)
    }

    #[actix_web::test]
    async fn test_echoes_message() {
        let (status, body) =
            post(test::TestRequest::post().set_json(json!({"message": "hi"}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body,
            json!({
                "status": "success",
                "processed_message": "Python processed: 'hi'. Sending back a greeting!"
            })
        );
    }

    #[actix_web::test]
    async fn test_missing_message_uses_default() {
        let (status, body) = post(test::TestRequest::post().set_json(json!({}))).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["processed_message"],
            "Python processed: 'No message provided'. Sending back a greeting!"
        );
    }

    #[actix_web::test]
    async fn test_non_string_message_rendered_as_json() {
        let (_, body) = post(test::TestRequest::post().set_json(json!({"message": 42}))).await;
        assert_eq!(
            body["processed_message"],
            "Python processed: '42'. Sending back a greeting!"
        );
    }

    #[actix_web::test]
    async fn test_rejects_non_json_body() {
        let (status, body) = post(
            test::TestRequest::post()
                .insert_header((header::CONTENT_TYPE, "text/plain"))
                .set_payload("hi"),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Request must be JSON"})
        );
    }

    #[actix_web::test]
    async fn test_rejects_missing_content_type() {
        let (status, body) =
            post(test::TestRequest::post().set_payload(r#"{"message": "hi"}"#)).await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], "error");
    }

    #[actix_web::test]
    async fn test_rejects_malformed_json() {
        let (status, body) = post(
            test::TestRequest::post()
                .insert_header(header::ContentType::json())
                .set_payload("{\"message\": "),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body,
            json!({"status": "error", "message": "Request must be JSON"})
        );
    }
}
