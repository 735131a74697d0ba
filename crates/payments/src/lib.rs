//! Client for the external payment provider.
//!
//! - [`client`] -- payment-intent creation over the provider's HTTP API.
//! - [`webhook`] -- signed event envelope parsing and signature verification.
//! - [`config`] -- environment-based configuration.

pub mod client;
pub mod config;
pub mod webhook;

pub use client::{PaymentApiError, PaymentClient, PaymentIntent, PaymentProvider};
pub use config::PaymentConfig;
pub use webhook::{sign_body, verify_signature, WebhookEvent, EVENT_INTENT_SUCCEEDED};
