//! Admin panel pages and the password login that backs the session cookie.

use actix_web::http::header;
use actix_web::{web, HttpRequest, HttpResponse};
use serde::Deserialize;

use crate::auth::{self, ADMIN_COOKIE};
use crate::error::ApiError;
use crate::views;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/admin").route(web::get().to(admin_panel)));
    cfg.service(
        web::resource("/admin/login")
            .route(web::get().to(login_form))
            .route(web::post().to(login)),
    );
    cfg.service(web::resource("/admin/logout").route(web::get().to(logout)));
}

#[derive(Deserialize)]
struct LoginForm {
    #[serde(default)]
    email: String,
    #[serde(default)]
    password: String,
}

fn redirect(location: &str) -> HttpResponse {
    HttpResponse::Found()
        .insert_header((header::LOCATION, location))
        .finish()
}

async fn admin_panel(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    match auth::session_admin(&state, &req)? {
        Some(user) => Ok(super::pages::html(views::admin_page(&user.email))),
        None => Ok(redirect("/admin/login")),
    }
}

async fn login_form() -> HttpResponse {
    super::pages::html(views::admin_login_page(None))
}

async fn login(
    state: web::Data<AppState>,
    form: web::Form<LoginForm>,
) -> Result<HttpResponse, ApiError> {
    let Some(session) = auth::login_admin(&state, &form.email, &form.password)? else {
        log::warn!("[ADMIN] Failed login attempt");
        return Ok(HttpResponse::Unauthorized()
            .content_type("text/html; charset=utf-8")
            .body(views::admin_login_page(Some("Invalid login"))));
    };

    let cookie = auth::admin_cookie(&session, state.config.cookie_secure);
    Ok(HttpResponse::SeeOther()
        .insert_header((header::LOCATION, "/admin"))
        .cookie(cookie)
        .finish())
}

async fn logout(state: web::Data<AppState>, req: HttpRequest) -> Result<HttpResponse, ApiError> {
    if let Some(cookie) = req.cookie(ADMIN_COOKIE) {
        state.db.delete_admin_session(cookie.value())?;
    }
    let mut resp = redirect("/");
    if let Err(e) = resp.add_cookie(&auth::expired_admin_cookie(state.config.cookie_secure)) {
        log::warn!("Failed to clear admin cookie: {}", e);
    }
    Ok(resp)
}
