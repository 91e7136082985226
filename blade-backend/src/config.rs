use std::env;

/// Environment variable names - single source of truth
pub mod env_vars {
    pub const PORT: &str = "PORT";
    pub const BIND_ADDRESS: &str = "BIND_ADDRESS";
    pub const DATABASE_URL: &str = "DATABASE_URL";
    pub const SITE_CONTENT_PATH: &str = "SITE_CONTENT_PATH";
    pub const PUBLIC_DIR: &str = "PUBLIC_DIR";
    pub const ADMIN_TOKEN: &str = "BLADE_ADMIN_TOKEN";
    pub const ADMIN_EMAIL: &str = "ADMIN_EMAIL";
    pub const ADMIN_PASSWORD: &str = "ADMIN_PASSWORD";
    pub const SESSION_TTL_HOURS: &str = "SESSION_TTL_HOURS";
    pub const COOKIE_SECURE: &str = "COOKIE_SECURE";
    // Stripe hosted checkout
    pub const STRIPE_SECRET_KEY: &str = "STRIPE_SECRET_KEY";
    pub const STRIPE_API_BASE: &str = "STRIPE_API_BASE";
    pub const STRIPE_SUCCESS_URL: &str = "STRIPE_SUCCESS_URL";
    pub const STRIPE_CANCEL_URL: &str = "STRIPE_CANCEL_URL";
    // Per-IP fixed window limiter (0 = disabled)
    pub const RATE_LIMIT_MAX: &str = "RATE_LIMIT_MAX";
    pub const RATE_LIMIT_WINDOW_SECS: &str = "RATE_LIMIT_WINDOW_SECS";
}

/// Default values
pub mod defaults {
    pub const PORT: u16 = 3000;
    pub const BIND_ADDRESS: &str = "0.0.0.0";
    pub const DATABASE_URL: &str = "./data/blade.db";
    pub const SITE_CONTENT_PATH: &str = "./data/site-content.json";
    pub const PUBLIC_DIR: &str = "./public";
    pub const SESSION_TTL_HOURS: i64 = 24;
    pub const STRIPE_API_BASE: &str = "https://api.stripe.com";
    pub const STRIPE_SUCCESS_URL: &str = "http://localhost:3000/#checkout-success";
    pub const STRIPE_CANCEL_URL: &str = "http://localhost:3000/#shop";
    pub const RATE_LIMIT_MAX: u32 = 300;
    pub const RATE_LIMIT_WINDOW_SECS: u64 = 15 * 60;
}

/// Read an env var, treating empty strings as unset
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

fn flag_var(name: &str) -> bool {
    env::var(name)
        .map(|v| v == "1" || v.eq_ignore_ascii_case("true"))
        .unwrap_or(false)
}

fn parsed_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    match env::var(name) {
        Ok(raw) => raw.trim().parse().unwrap_or_else(|_| {
            log::warn!("Ignoring invalid value for {}: {:?}", name, raw);
            default
        }),
        Err(_) => default,
    }
}

/// Stripe hosted-checkout settings. Present only when a secret key is set.
#[derive(Clone)]
pub struct StripeConfig {
    pub secret_key: String,
    pub api_base: String,
    pub success_url: String,
    pub cancel_url: String,
}

#[derive(Clone)]
pub struct Config {
    pub port: u16,
    pub bind_address: String,
    pub database_url: String,
    pub site_content_path: String,
    pub public_dir: String,
    /// Shared secret for the `x-blade-token` header. None = header auth always denies.
    pub admin_token: Option<String>,
    pub admin_email: Option<String>,
    pub admin_password: Option<String>,
    pub session_ttl_hours: i64,
    pub cookie_secure: bool,
    pub stripe: Option<StripeConfig>,
    pub rate_limit_max: u32,
    pub rate_limit_window_secs: u64,
}

impl Config {
    pub fn from_env() -> Self {
        let stripe = non_empty_var(env_vars::STRIPE_SECRET_KEY).map(|secret_key| StripeConfig {
            secret_key,
            api_base: non_empty_var(env_vars::STRIPE_API_BASE)
                .unwrap_or_else(|| defaults::STRIPE_API_BASE.to_string()),
            success_url: non_empty_var(env_vars::STRIPE_SUCCESS_URL)
                .unwrap_or_else(|| defaults::STRIPE_SUCCESS_URL.to_string()),
            cancel_url: non_empty_var(env_vars::STRIPE_CANCEL_URL)
                .unwrap_or_else(|| defaults::STRIPE_CANCEL_URL.to_string()),
        });

        Self {
            port: parsed_var(env_vars::PORT, defaults::PORT),
            bind_address: non_empty_var(env_vars::BIND_ADDRESS)
                .unwrap_or_else(|| defaults::BIND_ADDRESS.to_string()),
            database_url: non_empty_var(env_vars::DATABASE_URL)
                .unwrap_or_else(|| defaults::DATABASE_URL.to_string()),
            site_content_path: non_empty_var(env_vars::SITE_CONTENT_PATH)
                .unwrap_or_else(|| defaults::SITE_CONTENT_PATH.to_string()),
            public_dir: non_empty_var(env_vars::PUBLIC_DIR)
                .unwrap_or_else(|| defaults::PUBLIC_DIR.to_string()),
            admin_token: non_empty_var(env_vars::ADMIN_TOKEN),
            admin_email: non_empty_var(env_vars::ADMIN_EMAIL),
            admin_password: non_empty_var(env_vars::ADMIN_PASSWORD),
            session_ttl_hours: parsed_var(env_vars::SESSION_TTL_HOURS, defaults::SESSION_TTL_HOURS),
            cookie_secure: flag_var(env_vars::COOKIE_SECURE),
            stripe,
            rate_limit_max: parsed_var(env_vars::RATE_LIMIT_MAX, defaults::RATE_LIMIT_MAX),
            rate_limit_window_secs: parsed_var(
                env_vars::RATE_LIMIT_WINDOW_SECS,
                defaults::RATE_LIMIT_WINDOW_SECS,
            ),
        }
    }
}

#[cfg(test)]
impl Config {
    /// Config rooted in a scratch directory, with no env lookups.
    pub fn for_tests(dir: &std::path::Path) -> Self {
        Self {
            port: defaults::PORT,
            bind_address: "127.0.0.1".to_string(),
            database_url: dir.join("blade.db").to_string_lossy().to_string(),
            site_content_path: dir.join("site-content.json").to_string_lossy().to_string(),
            public_dir: dir.join("public").to_string_lossy().to_string(),
            admin_token: Some("test-token".to_string()),
            admin_email: None,
            admin_password: None,
            session_ttl_hours: defaults::SESSION_TTL_HOURS,
            cookie_secure: false,
            stripe: None,
            rate_limit_max: 0,
            rate_limit_window_secs: defaults::RATE_LIMIT_WINDOW_SECS,
        }
    }
}
