//! Payment provider webhook handler.
//!
//! The provider signs every delivery with HMAC-SHA256 over the raw body.
//! Signature verification therefore runs against the raw [`Bytes`] before
//! any JSON parsing. Unknown event types and events for bookings that can
//! no longer transition are acknowledged with 200 so the provider does not
//! retry deliveries we will never act on.

use axum::body::Bytes;
use axum::extract::State;
use axum::http::{HeaderMap, StatusCode};
use staybook_core::error::DomainError;
use staybook_db::models::booking::BookingStatus;
use staybook_db::repositories::{BookingRepo, UserRepo};
use staybook_mail::MailMessage;
use staybook_payments::webhook::{verify_signature, WebhookEvent, EVENT_INTENT_SUCCEEDED};

use crate::error::{AppError, AppResult};
use crate::handlers::deliver_mail;
use crate::state::AppState;

/// Header carrying the hex HMAC-SHA256 signature of the raw body.
pub const SIGNATURE_HEADER: &str = "x-payment-signature";

/// POST /api/v1/payments/webhook
pub async fn webhook(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> AppResult<StatusCode> {
    let signature = headers
        .get(SIGNATURE_HEADER)
        .and_then(|v| v.to_str().ok())
        .ok_or_else(|| {
            AppError::Domain(DomainError::Unauthorized(
                "Missing webhook signature".into(),
            ))
        })?;

    if !verify_signature(&state.config.payment_webhook_secret, &body, signature) {
        return Err(AppError::Domain(DomainError::Unauthorized(
            "Invalid webhook signature".into(),
        )));
    }

    let event: WebhookEvent = serde_json::from_slice(&body)
        .map_err(|e| AppError::BadRequest(format!("Malformed webhook payload: {e}")))?;

    if event.event_type != EVENT_INTENT_SUCCEEDED {
        tracing::debug!(event_type = %event.event_type, "Ignoring webhook event");
        return Ok(StatusCode::OK);
    }

    let Some(booking_id) = event.data.booking_id() else {
        // Our own metadata is missing or garbled; retrying will not fix it.
        tracing::warn!(intent_id = %event.data.id, "Webhook intent lacks a booking id");
        return Ok(StatusCode::OK);
    };

    match BookingRepo::mark_paid(&state.pool, booking_id).await? {
        Some(booking) => {
            tracing::info!(
                booking_id = booking.id,
                intent_id = %event.data.id,
                "Booking marked paid",
            );
            if let Some(user) = UserRepo::find_by_id(&state.pool, booking.user_id).await? {
                deliver_mail(
                    &state,
                    &user.email,
                    MailMessage::BookingPaid {
                        reference_code: booking.reference_code.clone(),
                    },
                )
                .await;
            }
        }
        None => match BookingRepo::find_by_id(&state.pool, booking_id).await? {
            // Duplicate delivery; the first one already flipped the status.
            Some(b) if b.status == BookingStatus::Paid => {
                tracing::debug!(booking_id, "Booking already paid, webhook is a duplicate");
            }
            Some(b) if b.status == BookingStatus::Canceled => {
                tracing::warn!(
                    booking_id,
                    intent_id = %event.data.id,
                    "Payment succeeded for a canceled booking",
                );
            }
            Some(_) => {}
            None => {
                tracing::warn!(booking_id, "Webhook references an unknown booking");
            }
        },
    }

    Ok(StatusCode::OK)
}
