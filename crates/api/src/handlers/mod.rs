//! HTTP request handlers, one module per resource.

pub mod auth;
pub mod bookings;
pub mod cities;
pub mod countries;
pub mod lodgings;
pub mod payments;
pub mod reviews;
pub mod users;

use staybook_mail::MailMessage;

use crate::state::AppState;

/// Deliver a transactional email, best effort.
///
/// Delivery failures never fail the request; they are logged and the caller
/// proceeds. When SMTP is unconfigured the message is logged at DEBUG so the
/// embedded token stays reachable in local development.
pub(crate) async fn deliver_mail(state: &AppState, to: &str, message: MailMessage) {
    match &state.mailer {
        Some(mailer) => {
            if let Err(e) = mailer.send(to, &message).await {
                tracing::warn!(to, error = %e, "Email delivery failed");
            }
        }
        None => {
            tracing::debug!(to, message = ?message, "SMTP not configured, skipping delivery");
        }
    }
}
