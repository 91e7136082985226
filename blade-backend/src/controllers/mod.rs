pub mod admin;
pub mod assist;
pub mod chat;
pub mod checkout;
pub mod content;
pub mod health;
pub mod pages;
pub mod rewards;

use actix_web::web;

use crate::error::ApiError;

/// Largest accepted JSON body
pub const JSON_LIMIT: usize = 1024 * 1024;

/// JSON extractor settings shared by every API route. Malformed or oversized
/// bodies become a 400 `{message}` instead of actix's plain-text error.
pub fn json_config() -> web::JsonConfig {
    web::JsonConfig::default()
        .limit(JSON_LIMIT)
        .error_handler(|err, _req| {
            log::debug!("Rejected JSON body: {}", err);
            ApiError::BadRequest("Invalid JSON body.".to_string()).into()
        })
}

/// Trimmed value of an optional text field; None when missing or blank.
pub fn required(field: &Option<String>) -> Option<&str> {
    field.as_deref().map(str::trim).filter(|v| !v.is_empty())
}
