//! Hosted checkout. The provider owns all payment state; we only create a
//! session and hand the redirect URL back to the browser.

use async_trait::async_trait;
use serde::Deserialize;
use std::fmt;
use std::time::Duration;

use crate::catalog::Product;
use crate::config::StripeConfig;

const CURRENCY: &str = "usd";

#[derive(Debug)]
pub enum CheckoutError {
    /// Network or TLS failure talking to the provider
    Request(String),
    /// Provider answered with a non-success status
    Provider { status: u16, message: String },
    /// Success response without a redirect URL
    MissingUrl,
}

impl fmt::Display for CheckoutError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CheckoutError::Request(e) => write!(f, "Checkout request failed: {}", e),
            CheckoutError::Provider { status, message } => {
                write!(f, "Checkout provider returned {}: {}", status, message)
            }
            CheckoutError::MissingUrl => write!(f, "Checkout provider returned no redirect URL"),
        }
    }
}

impl std::error::Error for CheckoutError {}

#[async_trait]
pub trait CheckoutProvider: Send + Sync {
    /// Create a one-item checkout session and return the URL to redirect to.
    async fn create_session(&self, product: &Product) -> Result<String, CheckoutError>;
}

/// Stripe Checkout Sessions API client.
pub struct StripeCheckout {
    client: reqwest::Client,
    config: StripeConfig,
}

#[derive(Deserialize)]
struct StripeSession {
    url: Option<String>,
}

#[derive(Deserialize)]
struct StripeErrorBody {
    error: StripeErrorDetail,
}

#[derive(Deserialize)]
struct StripeErrorDetail {
    message: Option<String>,
}

impl StripeCheckout {
    pub fn new(config: StripeConfig) -> Self {
        let client = reqwest::Client::builder()
            .timeout(Duration::from_secs(20))
            .build()
            .unwrap_or_default();
        Self { client, config }
    }

    /// Form fields for a single-product, single-quantity payment session.
    fn session_form(&self, product: &Product) -> Vec<(&'static str, String)> {
        vec![
            ("mode", "payment".to_string()),
            ("payment_method_types[0]", "card".to_string()),
            ("line_items[0][quantity]", "1".to_string()),
            ("line_items[0][price_data][currency]", CURRENCY.to_string()),
            (
                "line_items[0][price_data][unit_amount]",
                product.unit_amount_cents().to_string(),
            ),
            ("line_items[0][price_data][product_data][name]", product.name.to_string()),
            (
                "line_items[0][price_data][product_data][description]",
                product.description.to_string(),
            ),
            ("metadata[product_id]", product.id.to_string()),
            ("success_url", self.config.success_url.clone()),
            ("cancel_url", self.config.cancel_url.clone()),
        ]
    }
}

#[async_trait]
impl CheckoutProvider for StripeCheckout {
    async fn create_session(&self, product: &Product) -> Result<String, CheckoutError> {
        let url = format!(
            "{}/v1/checkout/sessions",
            self.config.api_base.trim_end_matches('/')
        );

        let resp = self
            .client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .form(&self.session_form(product))
            .send()
            .await
            .map_err(|e| CheckoutError::Request(e.to_string()))?;

        let status = resp.status();
        let body = resp
            .text()
            .await
            .map_err(|e| CheckoutError::Request(e.to_string()))?;

        if !status.is_success() {
            let message = serde_json::from_str::<StripeErrorBody>(&body)
                .ok()
                .and_then(|b| b.error.message)
                .unwrap_or_else(|| "unknown error".to_string());
            return Err(CheckoutError::Provider {
                status: status.as_u16(),
                message,
            });
        }

        let session: StripeSession = serde_json::from_str(&body)
            .map_err(|e| CheckoutError::Request(format!("invalid response: {}", e)))?;
        session.url.ok_or(CheckoutError::MissingUrl)
    }
}
