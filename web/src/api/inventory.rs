//! Inventory update API endpoint.
//!
//! - POST /api/store/inventory - Record one sale against a product
//!
//! This is the endpoint a payment webhook calls after a checkout
//! completes. Concurrent deliveries are serialized by the storage layer's
//! path-keyed gate, so the last unit of a product is sold at most once.

use crate::error::AppError;
use crate::state::AppState;
use atelier_core::{Product, SaleOutcome};
use axum::{Json, extract::State, http::StatusCode};
use serde::{Deserialize, Serialize};

// ============================================================================
// Request/Response Types
// ============================================================================

/// Request to record one sale.
#[derive(Debug, Deserialize)]
pub struct UpdateInventoryRequest {
    /// Product identifier, present in at least one locale list
    pub id: String,
    /// Identifier of the payment event that triggered the sale; appended
    /// to the product's audit log when provided
    #[serde(default)]
    pub payment_event_id: Option<String>,
}

/// Response for an inventory update attempt.
#[derive(Debug, Serialize)]
pub struct UpdateInventoryResponse {
    /// Whether stock was decremented
    pub success: bool,
    /// Human-readable outcome message
    pub message: String,
    /// The matched product (mutated on success, unmodified when the
    /// product was already sold out)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub product: Option<Product>,
    /// Lower-level diagnostic, for operational visibility only
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

// ============================================================================
// Handler
// ============================================================================

/// Record one sale against a product.
///
/// Returns `200` with the mutated product when stock was decremented, and
/// `400` with a distinct message when the product is unknown, already sold
/// out, or the catalog could not be read or persisted.
///
/// # Example
///
/// ```bash
/// curl -X POST http://localhost:8080/api/store/inventory \
///   -H "Content-Type: application/json" \
///   -d '{"id": "urban-portrait-7", "payment_event_id": "evt_123"}'
/// ```
///
/// # Errors
///
/// `AppError` only for a blank `id`; every other failure is reported in
/// the response body.
pub async fn update_inventory(
    State(state): State<AppState>,
    Json(request): Json<UpdateInventoryRequest>,
) -> Result<(StatusCode, Json<UpdateInventoryResponse>), AppError> {
    if request.id.trim().is_empty() {
        return Err(AppError::bad_request("id must not be empty"));
    }

    let outcome = state
        .inventory
        .update_inventory_item(&request.id, request.payment_event_id.as_deref())
        .await;

    let (status, response) = match outcome {
        Ok(SaleOutcome::Sold(product)) => (
            StatusCode::OK,
            UpdateInventoryResponse {
                success: true,
                message: "Inventory updated successfully".to_string(),
                product: Some(product),
                error: None,
            },
        ),
        Ok(SaleOutcome::AlreadySold(product)) => (
            StatusCode::BAD_REQUEST,
            UpdateInventoryResponse {
                success: false,
                message: "Product already sold".to_string(),
                product: Some(product),
                error: None,
            },
        ),
        Ok(SaleOutcome::NotFound) => (
            StatusCode::BAD_REQUEST,
            UpdateInventoryResponse {
                success: false,
                message: "Product not found".to_string(),
                product: None,
                error: Some(format!("No product found with ID: {}", request.id)),
            },
        ),
        Err(err) => {
            tracing::error!(
                error = %err,
                product_id = %request.id,
                "inventory update failed"
            );
            // Infrastructure faults share the domain-failure status; the
            // payload carries the diagnostic.
            (
                StatusCode::BAD_REQUEST,
                UpdateInventoryResponse {
                    success: false,
                    message: "Failed to update inventory".to_string(),
                    product: None,
                    error: Some(err.to_string()),
                },
            )
        }
    };

    Ok((status, Json(response)))
}
