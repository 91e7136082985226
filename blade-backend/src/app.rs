//! The full application: state, middleware stack, routes and static files.
//! Shared by the server and the end-to-end tests.

use actix_cors::Cors;
use actix_files::Files;
use actix_web::body::MessageBody;
use actix_web::dev::{ServiceFactory, ServiceRequest, ServiceResponse};
use actix_web::middleware::{from_fn, Logger};
use actix_web::{web, App};

use crate::controllers;
use crate::middleware::{self, RateLimiter};
use crate::AppState;

pub fn build_app(
    state: web::Data<AppState>,
    limiter: web::Data<RateLimiter>,
    public_dir: String,
) -> App<
    impl ServiceFactory<
        ServiceRequest,
        Config = (),
        Response = ServiceResponse<impl MessageBody>,
        Error = actix_web::Error,
        InitError = (),
    >,
> {
    let cors = Cors::default()
        .allow_any_origin()
        .allow_any_method()
        .allow_any_header()
        .max_age(3600);

    App::new()
        .app_data(state)
        .app_data(limiter)
        .app_data(controllers::json_config())
        .wrap(from_fn(middleware::limit_requests))
        .wrap(middleware::security_headers())
        .wrap(Logger::default())
        .wrap(cors)
        .configure(controllers::health::config)
        .configure(controllers::pages::config)
        .configure(controllers::admin::config)
        .configure(controllers::chat::config)
        .configure(controllers::assist::config)
        .configure(controllers::content::config)
        .configure(controllers::rewards::config)
        .configure(controllers::checkout::config)
        .service(Files::new("/", public_dir))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::test_support;
    use actix_web::http::StatusCode;
    use actix_web::test;
    use serde_json::json;
    use std::time::Duration;

    fn header<B>(resp: &ServiceResponse<B>, name: &str) -> String {
        resp.headers()
            .get(name)
            .map(|v| v.to_str().unwrap().to_string())
            .unwrap_or_default()
    }

    #[actix_web::test]
    async fn test_full_app_serves_api_pages_and_files() {
        let (state, dir) = test_support::state(None);
        let public = dir.path().join("public");
        std::fs::create_dir_all(public.join("css")).unwrap();
        std::fs::write(public.join("css/style.css"), "body { color: #111; }").unwrap();

        let limiter = web::Data::new(RateLimiter::new(0, Duration::from_secs(60)));
        let public_dir = state.config.public_dir.clone();
        let app = test::init_service(build_app(state, limiter, public_dir)).await;

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert_eq!(header(&resp, "x-content-type-options"), "nosniff");
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["ok"], true);

        let req = test::TestRequest::get().uri("/").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(header(&resp, "content-type").starts_with("text/html"));
        assert_eq!(header(&resp, "x-frame-options"), "SAMEORIGIN");
        assert_eq!(header(&resp, "referrer-policy"), "same-origin");
        let body = test::read_body(resp).await;
        assert!(std::str::from_utf8(&body).unwrap().contains(r##"content="#0b0b0b""##));

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .set_json(json!({ "message": "razor" }))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert!(body["reply"].as_str().unwrap().contains("Precision Razor"));

        let req = test::TestRequest::get().uri("/css/style.css").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::OK);
        assert!(header(&resp, "content-type").starts_with("text/css"));
        assert_eq!(header(&resp, "x-content-type-options"), "nosniff");
    }

    #[actix_web::test]
    async fn test_full_app_maps_malformed_json_and_rate_limit() {
        let (state, _dir) = test_support::state(None);
        let limiter = web::Data::new(RateLimiter::new(2, Duration::from_secs(60)));
        let public_dir = state.config.public_dir.clone();
        let app = test::init_service(build_app(state, limiter, public_dir)).await;

        let req = test::TestRequest::post()
            .uri("/api/chat")
            .insert_header(("content-type", "application/json"))
            .set_payload("{not json")
            .to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let body: serde_json::Value = test::read_body_json(resp).await;
        assert_eq!(body["message"], "Invalid JSON body.");

        let req = test::TestRequest::get().uri("/health").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::OK);

        let req = test::TestRequest::get().uri("/health").to_request();
        let resp = test::call_service(&app, req).await;
        assert_eq!(resp.status(), StatusCode::TOO_MANY_REQUESTS);
        assert_eq!(header(&resp, "x-content-type-options"), "nosniff");
    }
}
