use std::sync::Arc;

use staybook_mail::Mailer;
use staybook_payments::PaymentProvider;

use crate::config::ServerConfig;

/// Shared application state available to all Axum handlers via `State<AppState>`.
///
/// This is cheaply cloneable (inner data is behind `Arc` or is already `Clone`).
#[derive(Clone)]
pub struct AppState {
    /// Database connection pool.
    pub pool: staybook_db::DbPool,
    /// Server configuration (accessed by middleware and handlers).
    pub config: Arc<ServerConfig>,
    /// Payment provider client. Trait object so tests can stub the provider.
    pub payments: Arc<dyn PaymentProvider>,
    /// SMTP mailer; `None` when SMTP is unconfigured (tokens are logged instead).
    pub mailer: Option<Arc<Mailer>>,
}
