pub mod health;

use axum::{
    http::Uri,
    routing::{get, post},
    Router,
};

use crate::errors::AppError;
use crate::export::handlers as export;
use crate::latex::handlers as latex;
use crate::state::AppState;

async fn not_found(uri: Uri) -> AppError {
    AppError::NotFound(format!("No route for {}", uri.path()))
}

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/templates", get(latex::handle_list_templates))
        .route("/api/v1/resumes/latex", post(latex::handle_generate_latex))
        .route("/api/v1/resumes/pdf", post(export::handle_export_pdf))
        .fallback(not_found)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::time::Duration;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
        response::Response,
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::export::metric_surface::MetricLayoutSurface;

    fn app() -> Router {
        let config = Config {
            settle_delay: Duration::ZERO,
            raster_scale: 0.5,
            ..Config::default()
        };
        build_router(AppState::new(config, Arc::new(MetricLayoutSurface::new())))
    }

    fn valid_record() -> Value {
        json!({
            "personalInfo": {
                "name": "Jane Doe",
                "email": "jane@x.com",
                "phone": "555-0100",
                "github": "https://github.com/janedoe"
            },
            "experience": [{
                "id": "exp-1",
                "company": "Acme & Co",
                "title": "Engineer",
                "startDate": "Jan 2020",
                "endDate": "Present",
                "description": "• Cut costs by 50%"
            }]
        })
    }

    fn post_json(uri: &str, body: &Value) -> Request<Body> {
        Request::builder()
            .method("POST")
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    async fn body_bytes(response: Response) -> Vec<u8> {
        to_bytes(response.into_body(), usize::MAX).await.unwrap().to_vec()
    }

    async fn body_json(response: Response) -> Value {
        serde_json::from_slice(&body_bytes(response).await).unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let response = app()
            .oneshot(Request::get("/health").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(body_json(response).await["status"], "ok");
    }

    #[tokio::test]
    async fn test_list_templates_in_registry_order() {
        let response = app()
            .oneshot(Request::get("/api/v1/templates").body(Body::empty()).unwrap())
            .await
            .unwrap();
        let body = body_json(response).await;
        let ids: Vec<&str> = body
            .as_array()
            .unwrap()
            .iter()
            .map(|t| t["id"].as_str().unwrap())
            .collect();
        assert_eq!(ids, vec!["classic", "modern", "elegant"]);
        assert_eq!(body[0]["label"], "Classic");
    }

    #[tokio::test]
    async fn test_latex_download_defaults_to_classic() {
        let response = app()
            .oneshot(post_json("/api/v1/resumes/latex", &valid_record()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/x-tex");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.tex\""
        );

        let tex = String::from_utf8(body_bytes(response).await).unwrap();
        assert!(tex.contains("Acme \\& Co"));
        assert!(tex.contains("50\\%"));
        assert!(tex.contains("\\resumeSubheading"));
    }

    #[tokio::test]
    async fn test_latex_unknown_template_is_404() {
        let response = app()
            .oneshot(post_json("/api/v1/resumes/latex?template=fancy", &valid_record()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "TEMPLATE_NOT_FOUND");
    }

    #[tokio::test]
    async fn test_latex_invalid_record_lists_fields() {
        let mut record = valid_record();
        record["personalInfo"]["name"] = json!("  ");
        record["personalInfo"]["email"] = json!("not-an-email");

        let response = app()
            .oneshot(post_json("/api/v1/resumes/latex?template=modern", &record))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);

        let body = body_json(response).await;
        assert_eq!(
            body["error"]["message"],
            "Please go back and fill all required fields correctly."
        );
        let fields: Vec<&str> = body["error"]["details"]
            .as_array()
            .unwrap()
            .iter()
            .map(|f| f["field"].as_str().unwrap())
            .collect();
        assert!(fields.contains(&"personalInfo.name"));
        assert!(fields.contains(&"personalInfo.email"));
    }

    #[tokio::test]
    async fn test_malformed_json_is_validation_error() {
        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/resumes/latex")
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from("{not json"))
            .unwrap();
        let response = app().oneshot(request).await.unwrap();
        assert_eq!(response.status(), StatusCode::BAD_REQUEST);
        assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR");
    }

    #[tokio::test]
    async fn test_pdf_download_has_link_annotations() {
        let response = app()
            .oneshot(post_json("/api/v1/resumes/pdf?template=elegant", &valid_record()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(response.headers()[header::CONTENT_TYPE], "application/pdf");
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"resume.pdf\""
        );

        let pdf = body_bytes(response).await;
        assert!(pdf.starts_with(b"%PDF"));
        // email + GitHub
        let links = pdf.windows(5).filter(|w| *w == b"/Link").count();
        assert_eq!(links, 2);
    }

    #[tokio::test]
    async fn test_pdf_unknown_template_is_404() {
        let response = app()
            .oneshot(post_json("/api/v1/resumes/pdf?template=fancy", &valid_record()))
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_invalid_record_with_unknown_template_is_400_on_both_routes() {
        let mut record = valid_record();
        record["personalInfo"]["name"] = json!("");

        for uri in ["/api/v1/resumes/latex?template=fancy", "/api/v1/resumes/pdf?template=fancy"] {
            let response = app().oneshot(post_json(uri, &record)).await.unwrap();
            assert_eq!(response.status(), StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body_json(response).await["error"]["code"], "VALIDATION_ERROR", "{uri}");
        }
    }

    #[tokio::test]
    async fn test_unknown_route_is_json_404() {
        let response = app()
            .oneshot(Request::get("/api/v1/nope").body(Body::empty()).unwrap())
            .await
            .unwrap();
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
        assert_eq!(body_json(response).await["error"]["code"], "NOT_FOUND");
    }
}
