use actix_web::{web, HttpRequest, HttpResponse};

use crate::auth::{visitor_cookie, VISITOR_COOKIE};
use crate::catalog::PRODUCTS;
use crate::views;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/").route(web::get().to(home)));
    cfg.service(web::resource("/products").route(web::get().to(products)));
    cfg.service(web::resource("/ai").route(web::get().to(ai)));
}

pub fn html(body: String) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(body)
}

async fn home() -> HttpResponse {
    html(views::home_page(PRODUCTS))
}

async fn products() -> HttpResponse {
    html(views::products_page(PRODUCTS))
}

/// Assistant page. First visit gets a visitor cookie keying the chat log.
async fn ai(state: web::Data<AppState>, req: HttpRequest) -> HttpResponse {
    let mut resp = html(views::ai_page());
    if req.cookie(VISITOR_COOKIE).is_none() {
        let key = uuid::Uuid::new_v4().to_string();
        if let Err(e) = resp.add_cookie(&visitor_cookie(&key, state.config.cookie_secure)) {
            log::warn!("Failed to set visitor cookie: {}", e);
        }
    }
    resp
}
