use actix_web::{web, HttpResponse};
use serde::Deserialize;

use crate::catalog;
use crate::error::ApiError;
use crate::AppState;

pub fn config(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/api/checkout").route(web::post().to(create_checkout)));
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CheckoutRequest {
    #[serde(default)]
    product_id: Option<String>,
}

async fn create_checkout(
    state: web::Data<AppState>,
    body: web::Json<CheckoutRequest>,
) -> Result<HttpResponse, ApiError> {
    let Some(provider) = &state.checkout else {
        return Err(ApiError::NotConfigured("Stripe is not configured.".to_string()));
    };

    let product = super::required(&body.product_id)
        .and_then(catalog::find_product)
        .ok_or_else(|| ApiError::NotFound("Product not found.".to_string()))?;

    match provider.create_session(product).await {
        Ok(url) => {
            log::info!("[CHECKOUT] Session created for {}", product.id);
            Ok(HttpResponse::Ok().json(serde_json::json!({ "url": url })))
        }
        Err(e) => {
            log::error!("[CHECKOUT] {} failed: {}", product.id, e);
            Err(ApiError::Failed("Checkout failed.".to_string()))
        }
    }
}
