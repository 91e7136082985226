use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::require_admin;
use crate::error::ApiError;
use crate::models::{MemberEnvelope, PointsUpdate};
use crate::rewards;
use crate::AppState;

/// Rows returned by the member list endpoint
const MEMBER_LIST_LIMIT: i64 = 80;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope("/api/rewards")
            .route("/signup", web::post().to(signup))
            .route("/login", web::post().to(login))
            .route("/list", web::get().to(list_members))
            .route("/add-points", web::post().to(add_points)),
    );
}

#[derive(Deserialize)]
struct SignupRequest {
    #[serde(default)]
    name: Option<String>,
    #[serde(default)]
    email: Option<String>,
}

#[derive(Deserialize)]
struct LoginRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    code: Option<String>,
}

#[derive(Deserialize)]
struct AddPointsRequest {
    #[serde(default)]
    email: Option<String>,
    #[serde(default)]
    points: Option<serde_json::Value>,
}

async fn signup(
    state: web::Data<AppState>,
    body: web::Json<SignupRequest>,
) -> Result<HttpResponse, ApiError> {
    let (Some(name), Some(email)) = (super::required(&body.name), super::required(&body.email)) else {
        return Err(ApiError::BadRequest("Name and email are required.".to_string()));
    };

    let enrollment = rewards::enroll(&state.db, name, email)?;
    let message = enrollment.message();
    Ok(HttpResponse::Ok().json(MemberEnvelope::ok(enrollment.member, Some(message))))
}

async fn login(
    state: web::Data<AppState>,
    body: web::Json<LoginRequest>,
) -> Result<HttpResponse, ApiError> {
    let (Some(email), Some(code)) = (super::required(&body.email), super::required(&body.code)) else {
        return Err(ApiError::BadRequest("Email and member code are required.".to_string()));
    };

    match rewards::login(&state.db, email, code)? {
        Some(member) => Ok(HttpResponse::Ok().json(MemberEnvelope::ok(member, None))),
        None => Err(ApiError::Unauthorized(rewards::INVALID_CODE.to_string())),
    }
}

async fn list_members(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &req)?;
    let members = state.db.list_members(MEMBER_LIST_LIMIT)?;
    Ok(HttpResponse::Ok().json(serde_json::json!({ "members": members })))
}

async fn add_points(
    state: web::Data<AppState>,
    req: HttpRequest,
    body: web::Json<AddPointsRequest>,
) -> Result<HttpResponse, ApiError> {
    require_admin(&state, &req)?;

    let email = super::required(&body.email);
    let points = rewards::parse_points(body.points.as_ref());
    let (Some(email), Some(points)) = (email, points) else {
        return Err(ApiError::BadRequest("Email and points are required.".to_string()));
    };

    match rewards::add_points(&state.db, email, points)? {
        PointsUpdate::Updated(member) => Ok(HttpResponse::Ok().json(MemberEnvelope::ok(member, None))),
        PointsUpdate::NotFound => Err(ApiError::NotFound(rewards::MEMBER_NOT_FOUND.to_string())),
        PointsUpdate::OutOfRange => Err(ApiError::BadRequest(rewards::POINTS_OUT_OF_RANGE.to_string())),
    }
}
