use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::require_admin;
use crate::error::ApiError;
use crate::models::SiteContent;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/site-content").route(web::get().to(get_content)));
    cfg.service(web::resource("/api/site-update").route(web::post().to(update_content)));
}

async fn get_content(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &req)?;
    Ok(HttpResponse::Ok().json(state.content.read().await))
}

/// Replace the whole document. The body must carry a `sections` array.
async fn update_content(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<serde_json::Value>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &req)?;

    if !body.get("sections").map(|s| s.is_array()).unwrap_or(false) {
        return Err(ApiError::BadRequest("Sections array required.".to_string()));
    }
    let content: SiteContent = serde_json::from_value(body.into_inner())
        .map_err(|e| ApiError::BadRequest(format!("Invalid section: {}", e)))?;

    state.content.replace(&content).await?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Site content updated." })))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::controllers::json_config;
    use crate::controllers::test_support::{self, ADMIN_TOKEN};
    use actix_web::http::StatusCode;
    use actix_web::{test, App};
    use serde_json::json;

    #[actix_web::test]
    async fn test_update_then_read() {
        let (state, _dir) = test_support::state(None);
        let app = test::init_service(
            App::new().app_data(state.clone()).app_data(json_config()).configure(config),
        )
        .await;

        let doc = json!({
            "sections": [
                { "id": "gift", "title": "Gift cards", "summary": "Any amount.", "keywords": ["gift"] }
            ]
        });
        let req = test::TestRequest::post()
            .uri("/api/site-update")
            .insert_header(("x-blade-token", ADMIN_TOKEN))
            .set_json(&doc)
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body["message"], "Site content updated.");

        let req = test::TestRequest::get()
            .uri("/api/site-content")
            .insert_header(("x-blade-token", ADMIN_TOKEN))
            .to_request();
        let body: serde_json::Value = test::call_and_read_body_json(&app, req).await;
        assert_eq!(body, doc);
        assert_eq!(state.content.read().await.sections[0].id, "gift");
    }

    #[actix_web::test]
    async fn test_update_requires_sections_array() {
        let (state, _dir) = test_support::state(None);
        let app = test::init_service(
            App::new().app_data(state).app_data(json_config()).configure(config),
        )
        .await;

        for doc in [json!({}), json!({ "sections": "nope" })] {
            let req = test::TestRequest::post()
                .uri("/api/site-update")
                .insert_header(("x-blade-token", ADMIN_TOKEN))
                .set_json(&doc)
                .to_request();
            let resp = test::call_service(&app, req).await;
            assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
            let body: serde_json::Value = test::read_body_json(resp).await;
            assert_eq!(body["message"], "Sections array required.");
        }
    }

    #[actix_web::test]
    async fn test_content_is_admin_only() {
        let (state, _dir) = test_support::state(None);
        let app = test::init_service(
            App::new().app_data(state).app_data(json_config()).configure(config),
        )
        .await;

        let req = test::TestRequest::get().uri("/api/site-content").to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);

        let req = test::TestRequest::post()
            .uri("/api/site-update")
            .set_json(json!({ "sections": [] }))
            .to_request();
        assert_eq!(test::call_service(&app, req).await.status(), StatusCode::FORBIDDEN);
    }
}
