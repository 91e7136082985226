use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::assistant::{self, PUBLIC_USER_KEY};
use crate::auth::{require_admin, VISITOR_COOKIE};
use crate::error::ApiError;
use crate::responder;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/chat").route(web::post().to(chat)));
    cfg.service(web::resource("/api/learn").route(web::post().to(learn)));
    cfg.service(web::resource("/ai/chat").route(web::post().to(assistant_chat)));
}

#[derive(Deserialize)]
struct ChatRequest {
    #[serde(default)]
    message: Option<String>,
}

#[derive(Deserialize)]
struct LearnRequest {
    #[serde(default)]
    keyword: Option<String>,
    #[serde(default)]
    response: Option<String>,
}

#[derive(Deserialize)]
struct AssistantRequest {
    #[serde(default)]
    prompt: Option<String>,
}

async fn chat(
    state: web::Data<AppState>,
    body: web::Json<ChatRequest>,
) -> Result<HttpResponse, ApiError> {
    let message = body.message.as_deref().unwrap_or_default();
    let reply = responder::respond(&state.db, message)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "reply": reply })))
}

async fn learn(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<LearnRequest>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &req)?;

    let (keyword, response) = responder::prepare_learn(
        body.keyword.as_deref().unwrap_or_default(),
        body.response.as_deref().unwrap_or_default(),
    )
    .map_err(|e| ApiError::BadRequest(e.to_string()))?;

    let entry = state.db.insert_knowledge(&keyword, &response)?;
    log::info!("[KNOWLEDGE] Learned keyword {:?} (#{})", entry.keyword, entry.id);
    Ok(HttpResponse::Ok().json(serde_json::json!({ "message": "Learned." })))
}

async fn assistant_chat(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AssistantRequest>,
) -> Result<HttpResponse, ApiError> {
    let prompt = super::required(&body.prompt)
        .ok_or_else(|| ApiError::BadRequest("Missing prompt".to_string()))?;

    let user_key = req
        .cookie(VISITOR_COOKIE)
        .map(|c| c.value().to_string())
        .filter(|v| !v.is_empty())
        .unwrap_or_else(|| PUBLIC_USER_KEY.to_string());

    let response = assistant::chat(&state.db, &user_key, prompt)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "response": response })))
}
