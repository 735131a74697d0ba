//! HTTP client for the payment provider's REST API.
//!
//! Wraps intent creation using [`reqwest`]. The [`PaymentProvider`] trait is
//! the seam that lets integration tests substitute a stub provider without
//! a network.

use serde::Deserialize;
use staybook_core::types::DbId;

use crate::config::PaymentConfig;

/// A payment intent created at the provider.
#[derive(Debug, Clone, Deserialize)]
pub struct PaymentIntent {
    /// Provider-assigned intent identifier.
    pub id: String,
    /// Secret handed to the browser to complete the payment.
    pub client_secret: String,
    /// Provider-side status string (e.g. `requires_payment_method`).
    pub status: String,
}

/// Errors from the payment provider API layer.
#[derive(Debug, thiserror::Error)]
pub enum PaymentApiError {
    /// The HTTP request itself failed (network, DNS, TLS, etc.).
    #[error("HTTP request failed: {0}")]
    Request(#[from] reqwest::Error),

    /// The provider returned a non-2xx status code.
    #[error("Payment provider error ({status}): {body}")]
    ApiError {
        /// HTTP status code.
        status: u16,
        /// Raw response body for debugging.
        body: String,
    },
}

/// Abstraction over the payment provider, implemented by [`PaymentClient`]
/// in production and by stubs in tests.
#[async_trait::async_trait]
pub trait PaymentProvider: Send + Sync {
    /// Create a payment intent for a booking.
    ///
    /// The booking id travels in the intent metadata and comes back in the
    /// confirmation webhook.
    async fn create_intent(
        &self,
        amount_cents: i64,
        booking_id: DbId,
    ) -> Result<PaymentIntent, PaymentApiError>;
}

/// Production payment client.
pub struct PaymentClient {
    client: reqwest::Client,
    config: PaymentConfig,
}

impl PaymentClient {
    /// Create a new client from configuration.
    pub fn new(config: PaymentConfig) -> Self {
        Self {
            client: reqwest::Client::new(),
            config,
        }
    }
}

#[async_trait::async_trait]
impl PaymentProvider for PaymentClient {
    async fn create_intent(
        &self,
        amount_cents: i64,
        booking_id: DbId,
    ) -> Result<PaymentIntent, PaymentApiError> {
        let url = format!("{}/v1/payment_intents", self.config.api_url);
        let body = serde_json::json!({
            "amount": amount_cents,
            "currency": self.config.currency,
            "metadata": { "booking_id": booking_id.to_string() },
        });

        let response = self
            .client
            .post(&url)
            .bearer_auth(&self.config.secret_key)
            .json(&body)
            .send()
            .await?;

        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            return Err(PaymentApiError::ApiError {
                status: status.as_u16(),
                body,
            });
        }

        let intent: PaymentIntent = response.json().await?;
        tracing::info!(
            booking_id,
            intent_id = %intent.id,
            amount_cents,
            "Payment intent created",
        );
        Ok(intent)
    }
}
