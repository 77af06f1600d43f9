//! HTTP routes: registration and the delivery-notification webhook.

use crate::error::ApiError;
use crate::state::AppState;
use axum::body::Bytes;
use axum::extract::State;
use axum::http::StatusCode;
use axum::routing::post;
use axum::{Json, Router};
use deskrelay_provision::{Registration, RegistrationRequest};
use deskrelay_transcript::DeliveryNotification;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;

/// Builds the application router.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/registrations", post(register))
        .route("/webhooks", post(webhook))
        .layer(ServiceBuilder::new().layer(TraceLayer::new_for_http()))
        .with_state(state)
}

/// Registers a customer: CRM contact, chat identities, channel, token.
async fn register(
    State(state): State<Arc<AppState>>,
    Json(request): Json<RegistrationRequest>,
) -> Result<Json<Registration>, ApiError> {
    let registration = state.provisioner.register(request).await?;
    Ok(Json(registration))
}

/// Receives delivery notifications from the chat platform.
///
/// The source treats anything but 200 as "redeliver", so this handler
/// acknowledges everything it receives; the body is parsed by hand so
/// even a malformed payload is acknowledged rather than rejected by the
/// extractor.
async fn webhook(State(state): State<Arc<AppState>>, body: Bytes) -> StatusCode {
    match serde_json::from_slice::<DeliveryNotification>(&body) {
        Ok(notification) => {
            let outcome = state.synchronizer.handle(&notification).await;
            tracing::debug!(?outcome, channel = %notification.channel_id, "delivery notification processed");
        }
        Err(e) => {
            tracing::warn!(error = %e, "unparseable delivery notification");
        }
    }
    StatusCode::OK
}
