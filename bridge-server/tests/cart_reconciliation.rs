//! Cart reconciliation integration tests
//!
//! Run the engine against an in-memory cart backend that mimics the remote
//! service's contract: it assigns line-item ids on write, rejects
//! zero-quantity lines, and only ever replaces the full line-item list.

use std::collections::HashMap;
use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::Duration;

use async_trait::async_trait;
use tokio::sync::Mutex;

use bridge_server::cart::{CartBackend, CartOp, CartService};
use shared::cart::{Cart, CartItemInput, CartLine};
use shared::error::{ApiError, ApiResult};

struct InMemoryCartBackend {
    carts: Mutex<HashMap<String, Cart>>,
    next_id: AtomicU64,
    /// Artificial per-call latency, to widen read-modify-write race windows
    latency: Duration,
}

impl InMemoryCartBackend {
    fn new() -> Self {
        Self::with_latency(Duration::ZERO)
    }

    fn with_latency(latency: Duration) -> Self {
        Self {
            carts: Mutex::new(HashMap::new()),
            next_id: AtomicU64::new(1),
            latency,
        }
    }

    /// The remote service assigns ids to new lines and refuses zero
    /// quantities outright.
    fn admit_lines(&self, items: &[CartLine]) -> ApiResult<Vec<CartLine>> {
        items
            .iter()
            .map(|l| {
                if l.quantity == 0 {
                    return Err(ApiError::validation("quantity must be positive"));
                }
                let mut line = l.clone();
                if line.id.is_none() {
                    line.id = Some(format!("li-{}", self.next_id.fetch_add(1, Ordering::Relaxed)));
                }
                Ok(line)
            })
            .collect()
    }
}

#[async_trait]
impl CartBackend for InMemoryCartBackend {
    async fn create(&self, items: &[CartLine]) -> ApiResult<Cart> {
        tokio::time::sleep(self.latency).await;
        let cart = Cart {
            id: format!("cart-{}", self.next_id.fetch_add(1, Ordering::Relaxed)),
            line_items: self.admit_lines(items)?,
            subtotal_price: None,
            total_tax: None,
            total_price: None,
            checkout_url: None,
        };
        self.carts.lock().await.insert(cart.id.clone(), cart.clone());
        Ok(cart)
    }

    async fn get(&self, cart_id: &str) -> ApiResult<Cart> {
        tokio::time::sleep(self.latency).await;
        self.carts
            .lock()
            .await
            .get(cart_id)
            .cloned()
            .ok_or_else(|| ApiError::not_found("Cart"))
    }

    async fn replace(&self, cart_id: &str, items: &[CartLine]) -> ApiResult<Cart> {
        tokio::time::sleep(self.latency).await;
        let lines = self.admit_lines(items)?;
        let mut carts = self.carts.lock().await;
        let cart = carts
            .get_mut(cart_id)
            .ok_or_else(|| ApiError::not_found("Cart"))?;
        cart.line_items = lines;
        Ok(cart.clone())
    }
}

fn service() -> (CartService, Arc<InMemoryCartBackend>) {
    let backend = Arc::new(InMemoryCartBackend::new());
    (CartService::new(backend.clone()), backend)
}

fn item(variant_id: i64, quantity: u32) -> CartItemInput {
    CartItemInput {
        variant_id,
        quantity,
        properties: Default::default(),
    }
}

#[tokio::test]
async fn add_items_merges_duplicates_into_one_line() {
    let (service, _) = service();
    let cart = service.create_cart(vec![]).await.unwrap();

    service
        .apply_mutation(&cart.id, CartOp::AddItems(vec![item(10, 1)]))
        .await
        .unwrap();
    let cart = service
        .apply_mutation(&cart.id, CartOp::AddItems(vec![item(10, 2)]))
        .await
        .unwrap();

    assert_eq!(cart.line_items.len(), 1, "same variant must merge, not duplicate");
    assert_eq!(cart.line_items[0].quantity, 3);
}

#[tokio::test]
async fn create_cart_merges_duplicate_inputs() {
    let (service, _) = service();
    let cart = service
        .create_cart(vec![item(10, 1), item(10, 2), item(11, 1)])
        .await
        .unwrap();

    assert_eq!(cart.line_items.len(), 2);
    assert_eq!(cart.line_items[0].quantity, 3);
}

#[tokio::test]
async fn set_quantity_zero_removes_line_and_preserves_other_ids() {
    let (service, _) = service();
    let cart = service
        .create_cart(vec![item(10, 2), item(11, 1)])
        .await
        .unwrap();

    let target = cart.line_items[0].id.clone().unwrap();
    let keeper = cart.line_items[1].id.clone().unwrap();

    let cart = service
        .apply_mutation(
            &cart.id,
            CartOp::SetQuantity {
                line_item_id: target,
                quantity: 0,
            },
        )
        .await
        .unwrap();

    assert_eq!(cart.line_items.len(), 1);
    // The surviving line kept the id the remote service assigned it
    assert_eq!(cart.line_items[0].id.as_deref(), Some(keeper.as_str()));
}

#[tokio::test]
async fn remove_item_by_line_id() {
    let (service, _) = service();
    let cart = service
        .create_cart(vec![item(10, 1), item(11, 1)])
        .await
        .unwrap();
    let target = cart.line_items[0].id.clone().unwrap();

    let cart = service
        .apply_mutation(&cart.id, CartOp::RemoveItem { line_item_id: target })
        .await
        .unwrap();

    assert_eq!(cart.line_items.len(), 1);
    assert_eq!(cart.line_items[0].variant_id, 11);
}

#[tokio::test]
async fn unknown_cart_is_not_found() {
    let (service, _) = service();
    let result = service
        .apply_mutation("cart-404", CartOp::AddItems(vec![item(10, 1)]))
        .await;
    assert!(matches!(result, Err(ApiError::NotFound { .. })));
}

/// Replaying the same AddItems sequence accumulates quantities. That is the
/// designed behavior, not a bug: AddItems is a relative intent. Callers
/// needing an absolute quantity use SetQuantity.
#[tokio::test]
async fn add_items_replay_accumulates_by_design() {
    let (service, _) = service();
    let cart = service.create_cart(vec![]).await.unwrap();

    let ops = vec![item(10, 1), item(11, 2)];
    service
        .apply_mutation(&cart.id, CartOp::AddItems(ops.clone()))
        .await
        .unwrap();
    let cart = service
        .apply_mutation(&cart.id, CartOp::AddItems(ops))
        .await
        .unwrap();

    let quantities: Vec<u32> = cart.line_items.iter().map(|l| l.quantity).collect();
    assert_eq!(quantities, vec![2, 4]);
}

#[tokio::test]
async fn add_items_at_quantity_ceiling_saturates() {
    let (service, _) = service();
    let cart = service.create_cart(vec![item(10, u32::MAX)]).await.unwrap();

    let cart = service
        .apply_mutation(&cart.id, CartOp::AddItems(vec![item(10, 1)]))
        .await
        .unwrap();

    assert_eq!(cart.line_items.len(), 1);
    assert_eq!(cart.line_items[0].quantity, u32::MAX);
}

/// Two concurrent AddItems for the same cart must both land. The backend's
/// artificial latency makes the read-modify-write windows overlap, so
/// without the per-cart lock one write would erase the other.
#[tokio::test]
async fn concurrent_add_items_do_not_lose_updates() {
    let backend = Arc::new(InMemoryCartBackend::with_latency(Duration::from_millis(20)));
    let service = CartService::new(backend.clone());
    let cart = service.create_cart(vec![]).await.unwrap();

    let (a, b) = {
        let (s1, s2) = (service.clone(), service.clone());
        let (id1, id2) = (cart.id.clone(), cart.id.clone());
        tokio::join!(
            tokio::spawn(async move {
                s1.apply_mutation(&id1, CartOp::AddItems(vec![item(10, 1)]))
                    .await
            }),
            tokio::spawn(async move {
                s2.apply_mutation(&id2, CartOp::AddItems(vec![item(10, 1)]))
                    .await
            }),
        )
    };
    a.unwrap().unwrap();
    b.unwrap().unwrap();

    let cart = service.get_cart(&cart.id).await.unwrap();
    assert_eq!(cart.line_items.len(), 1);
    assert_eq!(
        cart.line_items[0].quantity, 2,
        "a lost update means the per-cart lock is broken"
    );
}
