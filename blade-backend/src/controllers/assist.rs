use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::require_admin;
use crate::error::ApiError;
use crate::responder;
use crate::AppState;

/// Rows returned by the analytics endpoint
const ANALYTICS_LIMIT: i64 = 40;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/assist").route(web::post().to(assist)));
    cfg.service(web::resource("/api/analytics").route(web::get().to(analytics)));
}

#[derive(Deserialize)]
struct AssistRequest {
    #[serde(default)]
    query: Option<String>,
}

async fn assist(
    state: web::Data<AppState>,
    body: web::Json<AssistRequest>,
) -> Result<HttpResponse, ApiError> {
    let content = state.content.read().await;
    let query = body.query.as_deref().unwrap_or_default();
    let reply = responder::assist(&state.db, &content, query)?;
    Ok(HttpResponse::Ok().json(reply))
}

async fn analytics(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &req)?;
    let results = state.db.list_searches(ANALYTICS_LIMIT)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "results": results })))
}
