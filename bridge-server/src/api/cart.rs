//! Cart API handlers
//!
//! Thin HTTP layer over the reconciliation engine. Validation happens here
//! at the boundary so the engine only ever sees well-formed intents.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde::Deserialize;

use shared::ApiResponse;
use shared::cart::{Cart, CartItemInput};
use shared::error::{ApiError, ApiResult};

use crate::cart::CartOp;
use crate::state::AppState;

#[derive(Debug, Deserialize)]
pub struct CreateCartRequest {
    #[serde(default)]
    pub line_items: Vec<CartItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct AddItemsRequest {
    #[serde(rename = "checkoutId")]
    pub checkout_id: String,
    pub line_items: Vec<CartItemInput>,
}

#[derive(Debug, Deserialize)]
pub struct UpdateItemRequest {
    /// New absolute quantity; 0 removes the line
    pub quantity: u32,
}

#[derive(Debug, Deserialize)]
pub struct CartQuery {
    #[serde(rename = "checkoutId")]
    pub checkout_id: String,
}

/// Positive quantities and non-zero variant ids, checked before any remote
/// call.
fn validate_items(items: &[CartItemInput]) -> ApiResult<()> {
    for item in items {
        if item.variant_id <= 0 || item.quantity == 0 {
            return Err(ApiError::validation(
                "Each line item must include a valid variant_id and a positive quantity",
            ));
        }
    }
    Ok(())
}

/// POST /api/cart — create a new cart, optionally seeded with items
pub async fn create_cart(
    State(state): State<AppState>,
    Json(req): Json<CreateCartRequest>,
) -> ApiResult<(StatusCode, Json<ApiResponse<Cart>>)> {
    validate_items(&req.line_items)?;

    let cart = state.cart_service()?.create_cart(req.line_items).await?;
    Ok((StatusCode::CREATED, Json(ApiResponse::ok(cart))))
}

/// GET /api/cart?checkoutId=… — current snapshot
pub async fn get_cart(
    State(state): State<AppState>,
    Query(query): Query<CartQuery>,
) -> ApiResult<Json<ApiResponse<Cart>>> {
    let cart = state.cart_service()?.get_cart(&query.checkout_id).await?;
    Ok(Json(ApiResponse::ok(cart)))
}

/// POST /api/cart/items — add items to an existing cart
pub async fn add_items(
    State(state): State<AppState>,
    Json(req): Json<AddItemsRequest>,
) -> ApiResult<Json<ApiResponse<Cart>>> {
    if req.line_items.is_empty() {
        return Err(ApiError::validation("line_items must be a non-empty array"));
    }
    validate_items(&req.line_items)?;

    let cart = state
        .cart_service()?
        .apply_mutation(&req.checkout_id, CartOp::AddItems(req.line_items))
        .await?;
    Ok(Json(ApiResponse::ok(cart)))
}

/// PUT /api/cart/{checkout_id}/items/{line_item_id} — set a line's quantity
pub async fn update_item(
    State(state): State<AppState>,
    Path((checkout_id, line_item_id)): Path<(String, String)>,
    Json(req): Json<UpdateItemRequest>,
) -> ApiResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service()?
        .apply_mutation(
            &checkout_id,
            CartOp::SetQuantity {
                line_item_id,
                quantity: req.quantity,
            },
        )
        .await?;
    Ok(Json(ApiResponse::ok(cart)))
}

/// DELETE /api/cart/{checkout_id}/items/{line_item_id}
pub async fn remove_item(
    State(state): State<AppState>,
    Path((checkout_id, line_item_id)): Path<(String, String)>,
) -> ApiResult<Json<ApiResponse<Cart>>> {
    let cart = state
        .cart_service()?
        .apply_mutation(&checkout_id, CartOp::RemoveItem { line_item_id })
        .await?;
    Ok(Json(ApiResponse::ok(cart)))
}
