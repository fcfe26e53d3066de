//! Cart reconciliation engine
//!
//! Every logical operation runs the same cycle: fetch the full snapshot,
//! compute the complete next line-item list, write it back as one
//! replacement. The remote service owns all state; nothing is cached
//! between requests.

use std::sync::Arc;

use shared::cart::{Cart, CartItemInput, CartLine};
use shared::error::{ApiError, ApiResult};

use super::{CartBackend, CartLocks};

/// A logical cart mutation
#[derive(Debug, Clone)]
pub enum CartOp {
    /// Merge items into the cart by canonical key, accumulating quantities.
    /// Replaying the same AddItems accumulates again — intentional, callers
    /// wanting an absolute quantity use `SetQuantity`.
    AddItems(Vec<CartItemInput>),
    /// Set the quantity of one existing line, addressed by its remote
    /// line-item id. Zero removes the line.
    SetQuantity { line_item_id: String, quantity: u32 },
    /// Remove one existing line by its remote line-item id
    RemoveItem { line_item_id: String },
}

/// Cart service: reconciliation engine + per-cart serialization over an
/// injected backend.
#[derive(Clone)]
pub struct CartService {
    backend: Arc<dyn CartBackend>,
    locks: CartLocks,
}

impl CartService {
    pub fn new(backend: Arc<dyn CartBackend>) -> Self {
        Self {
            backend,
            locks: CartLocks::new(),
        }
    }

    /// Create a new cart, merging duplicate inputs the same way `AddItems`
    /// would.
    pub async fn create_cart(&self, items: Vec<CartItemInput>) -> ApiResult<Cart> {
        let lines = next_line_items(&[], &CartOp::AddItems(items))?;
        self.backend.create(&lines).await
    }

    /// Fetch the current snapshot (read-only, no lock needed)
    pub async fn get_cart(&self, cart_id: &str) -> ApiResult<Cart> {
        self.backend.get(cart_id).await
    }

    /// Apply one mutation under the cart's lock.
    ///
    /// The lock covers the whole read-compute-replace cycle; without it two
    /// overlapping mutations for the same cart id could both read the same
    /// snapshot and the second write would erase the first.
    pub async fn apply_mutation(&self, cart_id: &str, op: CartOp) -> ApiResult<Cart> {
        let _guard = self.locks.acquire(cart_id).await?;

        let snapshot = self.backend.get(cart_id).await?;
        let next = next_line_items(&snapshot.line_items, &op)?;

        tracing::debug!(
            cart_id = cart_id,
            before = snapshot.line_items.len(),
            after = next.len(),
            "Writing full cart replacement"
        );
        self.backend.replace(cart_id, &next).await
    }
}

/// Compute the complete next line-item list for one mutation.
///
/// Invariants on the output: every quantity is > 0 (zero-quantity lines are
/// dropped, never written), and every line that survived from `current`
/// keeps its remote id untouched — regenerating or dropping an id would make
/// the remote service create a spurious new line.
fn next_line_items(current: &[CartLine], op: &CartOp) -> ApiResult<Vec<CartLine>> {
    let mut lines: Vec<CartLine> = current.to_vec();

    match op {
        CartOp::AddItems(items) => {
            for input in items {
                let incoming: CartLine = input.clone().into();
                let key = incoming.canonical_key();
                match lines.iter_mut().find(|l| l.canonical_key() == key) {
                    Some(existing) => {
                        // Saturate rather than wrap: a wrap to zero would make
                        // the line vanish through the retain below.
                        existing.quantity = existing.quantity.saturating_add(incoming.quantity);
                    }
                    None => lines.push(incoming),
                }
            }
        }
        CartOp::SetQuantity {
            line_item_id,
            quantity,
        } => {
            let line = lines
                .iter_mut()
                .find(|l| l.id.as_deref() == Some(line_item_id.as_str()))
                .ok_or_else(|| ApiError::not_found("Line item"))?;
            line.quantity = *quantity;
        }
        CartOp::RemoveItem { line_item_id } => {
            let before = lines.len();
            lines.retain(|l| l.id.as_deref() != Some(line_item_id.as_str()));
            if lines.len() == before {
                return Err(ApiError::not_found("Line item"));
            }
        }
    }

    lines.retain(|l| l.quantity > 0);
    Ok(lines)
}
