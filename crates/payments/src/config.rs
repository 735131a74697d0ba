//! Payment provider configuration.

/// Configuration for the payment provider integration.
#[derive(Debug, Clone)]
pub struct PaymentConfig {
    /// Base URL of the provider's HTTP API.
    pub api_url: String,
    /// Secret API key sent as a Bearer token.
    pub secret_key: String,
    /// Shared secret used to verify webhook signatures.
    pub webhook_secret: String,
    /// ISO 4217 currency code for created intents (default: `eur`).
    pub currency: String,
}

impl PaymentConfig {
    /// Load configuration from environment variables.
    ///
    /// | Env Var                  | Required | Default |
    /// |--------------------------|----------|---------|
    /// | `PAYMENT_API_URL`        | **yes**  | --      |
    /// | `PAYMENT_SECRET_KEY`     | **yes**  | --      |
    /// | `PAYMENT_WEBHOOK_SECRET` | **yes**  | --      |
    /// | `PAYMENT_CURRENCY`       | no       | `eur`   |
    ///
    /// # Panics
    ///
    /// Panics if a required variable is not set; the server must not start
    /// with a partially configured payment integration.
    pub fn from_env() -> Self {
        let api_url =
            std::env::var("PAYMENT_API_URL").expect("PAYMENT_API_URL must be set");
        let secret_key =
            std::env::var("PAYMENT_SECRET_KEY").expect("PAYMENT_SECRET_KEY must be set");
        let webhook_secret =
            std::env::var("PAYMENT_WEBHOOK_SECRET").expect("PAYMENT_WEBHOOK_SECRET must be set");
        let currency = std::env::var("PAYMENT_CURRENCY").unwrap_or_else(|_| "eur".into());

        Self {
            api_url,
            secret_key,
            webhook_secret,
            currency,
        }
    }
}
