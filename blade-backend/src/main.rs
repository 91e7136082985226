use actix_web::{web, HttpServer};
use dotenv::dotenv;
use std::sync::Arc;
use std::time::Duration;

mod app;
mod assistant;
mod auth;
mod catalog;
mod checkout;
mod config;
mod content_store;
mod controllers;
mod db;
mod error;
mod middleware;
mod models;
mod responder;
mod rewards;
mod views;

use checkout::{CheckoutProvider, StripeCheckout};
use config::Config;
use content_store::ContentStore;
use db::Database;
use middleware::RateLimiter;
use models::SiteContent;

pub struct AppState {
    pub db: Arc<Database>,
    pub config: Config,
    pub content: Arc<ContentStore>,
    /// None when no Stripe key is configured
    pub checkout: Option<Arc<dyn CheckoutProvider>>,
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    dotenv().ok();
    env_logger::init();

    let config = Config::from_env();
    let port = config.port;
    let bind_address = config.bind_address.clone();

    log::info!("Initializing database at {}", config.database_url);
    let db = Database::new(&config.database_url).map_err(std::io::Error::other)?;
    let db = Arc::new(db);

    match db.purge_expired_admin_sessions() {
        Ok(0) => {}
        Ok(n) => log::info!("Purged {} expired admin sessions", n),
        Err(e) => log::warn!("Failed to purge admin sessions: {}", e),
    }

    match (&config.admin_email, &config.admin_password) {
        (Some(email), Some(password)) => {
            auth::seed_admin_user(&db, email, password).map_err(std::io::Error::other)?;
            log::info!("Admin login enabled for {}", email);
        }
        _ => log::warn!("ADMIN_EMAIL/ADMIN_PASSWORD not set - admin login disabled"),
    }
    if config.admin_token.is_none() {
        log::warn!("BLADE_ADMIN_TOKEN not set - token access to admin endpoints disabled");
    }

    log::info!("Site content at {}", config.site_content_path);
    let content = Arc::new(ContentStore::new(&config.site_content_path));
    if !content.path().exists() {
        content.replace(&SiteContent::starter()).await?;
        log::info!("Wrote starter site content");
    }

    let checkout: Option<Arc<dyn CheckoutProvider>> = match &config.stripe {
        Some(stripe) => {
            log::info!("Stripe checkout enabled ({})", stripe.api_base);
            let provider: Arc<dyn CheckoutProvider> = Arc::new(StripeCheckout::new(stripe.clone()));
            Some(provider)
        }
        None => {
            log::warn!("STRIPE_SECRET_KEY not set - checkout disabled");
            None
        }
    };

    let limiter = web::Data::new(RateLimiter::new(
        config.rate_limit_max,
        Duration::from_secs(config.rate_limit_window_secs),
    ));
    if limiter.is_enabled() {
        log::info!(
            "Rate limit: {} requests per {}s per client",
            config.rate_limit_max,
            config.rate_limit_window_secs
        );
    }

    let public_dir = config.public_dir.clone();
    log::info!("Serving static files from {}", public_dir);
    log::info!("Starting server on {}:{}", bind_address, port);

    HttpServer::new(move || {
        let state = web::Data::new(AppState {
            db: Arc::clone(&db),
            config: config.clone(),
            content: Arc::clone(&content),
            checkout: checkout.clone(),
        });
        app::build_app(state, limiter.clone(), public_dir.clone())
    })
    .bind((bind_address.as_str(), port))?
    .run()
    .await
}
