//! Request middleware: per-client fixed-window rate limit and security headers.

use actix_web::body::MessageBody;
use actix_web::dev::{ServiceRequest, ServiceResponse};
use actix_web::middleware::{DefaultHeaders, Next};
use actix_web::{web, ResponseError};
use dashmap::DashMap;
use std::time::{Duration, Instant};

use crate::error::ApiError;

/// Prune stale buckets once the map grows past this
const PRUNE_THRESHOLD: usize = 10_000;

pub struct RateLimiter {
    max_requests: u32,
    window: Duration,
    buckets: DashMap<String, (Instant, u32)>,
}

impl RateLimiter {
    /// `max_requests == 0` disables limiting.
    pub fn new(max_requests: u32, window: Duration) -> Self {
        Self {
            max_requests,
            window,
            buckets: DashMap::new(),
        }
    }

    pub fn is_enabled(&self) -> bool {
        self.max_requests > 0
    }

    /// Count one request for `client`. False once the window's budget is spent.
    pub fn check(&self, client: &str) -> bool {
        self.check_at(client, Instant::now())
    }

    fn check_at(&self, client: &str, now: Instant) -> bool {
        if !self.is_enabled() {
            return true;
        }
        if self.buckets.len() > PRUNE_THRESHOLD {
            self.prune(now);
        }

        let mut bucket = self.buckets.entry(client.to_string()).or_insert((now, 0));
        if now.duration_since(bucket.0) >= self.window {
            *bucket = (now, 0);
        }
        if bucket.1 >= self.max_requests {
            return false;
        }
        bucket.1 += 1;
        true
    }

    fn prune(&self, now: Instant) {
        let window = self.window;
        self.buckets
            .retain(|_, (started, _)| now.duration_since(*started) < window);
    }
}

/// Rejects with 429 when the client's window is exhausted.
pub async fn limit_requests(
    req: ServiceRequest,
    next: Next<impl MessageBody + 'static>,
) -> Result<ServiceResponse<impl MessageBody>, actix_web::Error> {
    let client = req
        .peer_addr()
        .map(|addr| addr.ip().to_string())
        .unwrap_or_else(|| "unknown".to_string());
    let allowed = match req.app_data::<web::Data<RateLimiter>>() {
        Some(limiter) => limiter.check(&client),
        None => true,
    };

    if !allowed {
        log::warn!("Rate limit exceeded for {}", client);
        let resp = ApiError::TooManyRequests.error_response();
        return Ok(req.into_response(resp).map_into_right_body());
    }
    next.call(req).await.map(ServiceResponse::map_into_left_body)
}

pub fn security_headers() -> DefaultHeaders {
    DefaultHeaders::new()
        .add(("X-Content-Type-Options", "nosniff"))
        .add(("X-Frame-Options", "SAMEORIGIN"))
        .add(("Referrer-Policy", "same-origin"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::middleware::from_fn;
    use actix_web::test as actix_test;
    use actix_web::{App, HttpResponse};

    #[test]
    fn test_budget_per_client() {
        let limiter = RateLimiter::new(2, Duration::from_secs(60));
        assert!(limiter.check("a"));
        assert!(limiter.check("a"));
        assert!(!limiter.check("a"));
        assert!(limiter.check("b"));
    }

    #[test]
    fn test_window_resets() {
        let limiter = RateLimiter::new(1, Duration::from_secs(10));
        let start = Instant::now();
        assert!(limiter.check_at("a", start));
        assert!(!limiter.check_at("a", start + Duration::from_secs(5)));
        assert!(limiter.check_at("a", start + Duration::from_secs(11)));
    }

    #[test]
    fn test_zero_disables() {
        let limiter = RateLimiter::new(0, Duration::from_secs(1));
        assert!(!limiter.is_enabled());
        for _ in 0..100 {
            assert!(limiter.check("a"));
        }
    }

    #[actix_web::test]
    async fn test_middleware_returns_429() {
        let limiter = web::Data::new(RateLimiter::new(1, Duration::from_secs(60)));
        let app = actix_test::init_service(
            App::new()
                .app_data(limiter)
                .wrap(from_fn(limit_requests))
                .wrap(security_headers())
                .route("/", web::get().to(|| async { HttpResponse::Ok().finish() })),
        )
        .await;

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert!(resp.status().is_success());
        assert_eq!(resp.headers().get("X-Content-Type-Options").unwrap(), "nosniff");

        let resp = actix_test::call_service(&app, actix_test::TestRequest::get().uri("/").to_request()).await;
        assert_eq!(resp.status(), actix_web::http::StatusCode::TOO_MANY_REQUESTS);
    }
}
