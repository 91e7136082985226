//! Admin authentication: shared-token header, password login, session cookies.

use actix_web::cookie::{time::Duration as CookieDuration, Cookie, SameSite};
use actix_web::{web, HttpRequest};
use chrono::Utc;
use rand::RngCore;
use sha2::{Digest, Sha256};

use crate::db::{Database, DbResult};
use crate::error::ApiError;
use crate::models::{AdminSession, AdminUser};
use crate::AppState;

pub const ADMIN_TOKEN_HEADER: &str = "x-blade-token";
pub const ADMIN_COOKIE: &str = "blade_admin";
pub const VISITOR_COOKIE: &str = "blade_visitor";

/// Rounds of SHA-256 applied on top of the salted password.
const PASSWORD_HASH_ROUNDS: u32 = 10_000;

/// Constant-time byte comparison to prevent timing attacks
pub fn constant_time_eq(a: &[u8], b: &[u8]) -> bool {
    if a.len() != b.len() {
        return false;
    }
    let mut result: u8 = 0;
    for (x, y) in a.iter().zip(b.iter()) {
        result |= x ^ y;
    }
    result == 0
}

pub fn generate_salt() -> String {
    let mut bytes = [0u8; 16];
    rand::thread_rng().fill_bytes(&mut bytes);
    hex::encode(bytes)
}

/// Salted, iterated SHA-256, hex encoded.
pub fn hash_password(password: &str, salt: &str) -> String {
    let mut digest = Sha256::new()
        .chain_update(salt.as_bytes())
        .chain_update(password.as_bytes())
        .finalize();
    for _ in 1..PASSWORD_HASH_ROUNDS {
        digest = Sha256::new()
            .chain_update(digest)
            .chain_update(salt.as_bytes())
            .finalize();
    }
    hex::encode(digest)
}

pub fn verify_password(password: &str, salt: &str, expected_hash: &str) -> bool {
    constant_time_eq(hash_password(password, salt).as_bytes(), expected_hash.as_bytes())
}

/// True when the header carries the configured shared token.
/// With no token configured this always denies.
pub fn token_matches(configured: Option<&str>, presented: Option<&str>) -> bool {
    match (configured, presented) {
        (Some(expected), Some(given)) if !expected.is_empty() => {
            constant_time_eq(expected.as_bytes(), given.as_bytes())
        }
        _ => false,
    }
}

/// Create or refresh the configured admin account at startup.
pub fn seed_admin_user(db: &Database, email: &str, password: &str) -> DbResult<()> {
    let salt = generate_salt();
    let hash = hash_password(password, &salt);
    db.upsert_admin_user(&email.trim().to_lowercase(), &hash, &salt)
}

/// Check email + password and open a session. None on bad credentials.
pub fn login_admin(
    state: &AppState,
    email: &str,
    password: &str,
) -> DbResult<Option<AdminSession>> {
    let email = email.trim().to_lowercase();
    let Some(user) = state.db.get_admin_user_by_email(&email)? else {
        // Same hashing work as a known email
        let _ = hash_password(password, "unknown-user");
        return Ok(None);
    };

    if !verify_password(password, &user.salt, &user.password_hash) {
        return Ok(None);
    }

    let session = state.db.create_admin_session(user.id, state.config.session_ttl_hours)?;
    log::info!(
        "[ADMIN] {} logged in (session #{}, expires {})",
        user.email,
        session.id,
        session.expires_at.to_rfc3339()
    );
    Ok(Some(session))
}

/// True if the request carries a live admin session cookie.
pub fn has_admin_session(state: &AppState, req: &HttpRequest) -> Result<bool, ApiError> {
    let Some(cookie) = req.cookie(ADMIN_COOKIE) else {
        return Ok(false);
    };
    Ok(state.db.validate_admin_session(cookie.value())?.is_some())
}

/// Admin user behind the request's session cookie, if the session is live.
pub fn session_admin(state: &AppState, req: &HttpRequest) -> Result<Option<AdminUser>, ApiError> {
    let Some(cookie) = req.cookie(ADMIN_COOKIE) else {
        return Ok(None);
    };
    let Some(session) = state.db.validate_admin_session(cookie.value())? else {
        return Ok(None);
    };
    Ok(state.db.get_admin_user(session.user_id)?)
}

/// Gate for admin API endpoints: `x-blade-token` header or an admin session.
pub fn require_admin(state: &web::Data<AppState>, req: &HttpRequest) -> Result<(), ApiError> {
    let presented = req
        .headers()
        .get(ADMIN_TOKEN_HEADER)
        .and_then(|h| h.to_str().ok());

    if token_matches(state.config.admin_token.as_deref(), presented) {
        return Ok(());
    }
    if has_admin_session(state, req)? {
        return Ok(());
    }
    Err(ApiError::Forbidden)
}

fn base_cookie(name: &'static str, value: String, secure: bool) -> Cookie<'static> {
    Cookie::build(name, value)
        .path("/")
        .http_only(true)
        .same_site(SameSite::Lax)
        .secure(secure)
        .finish()
}

/// Session cookie that lapses together with the server-side session.
pub fn admin_cookie(session: &AdminSession, secure: bool) -> Cookie<'static> {
    let remaining = (session.expires_at - Utc::now()).num_seconds().max(0);
    let mut cookie = base_cookie(ADMIN_COOKIE, session.token.clone(), secure);
    cookie.set_max_age(CookieDuration::seconds(remaining));
    cookie
}

pub fn expired_admin_cookie(secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(ADMIN_COOKIE, String::new(), secure);
    cookie.make_removal();
    cookie
}

pub fn visitor_cookie(key: &str, secure: bool) -> Cookie<'static> {
    let mut cookie = base_cookie(VISITOR_COOKIE, key.to_string(), secure);
    cookie.set_max_age(CookieDuration::days(365));
    cookie
}
