//! Per-cart mutation serialization
//!
//! The remote cart resource offers no optimistic concurrency token, so an
//! unguarded read-modify-write cycle loses updates under concurrent
//! mutations of the same cart. Every mutation must hold the cart's lock for
//! its whole fetch-compute-replace cycle.

use std::sync::Arc;
use std::time::Duration;

use dashmap::DashMap;
use tokio::sync::{Mutex, OwnedMutexGuard};

use shared::error::{ApiError, ApiResult};

/// How long a mutation waits for the cart lock before giving up
const LOCK_WAIT: Duration = Duration::from_secs(10);

/// One mutex per cart id.
///
/// Entries are never removed: cart ids are session-scoped and the map stays
/// small for the lifetime of a deployment.
#[derive(Clone, Default)]
pub struct CartLocks {
    inner: Arc<DashMap<String, Arc<Mutex<()>>>>,
}

impl CartLocks {
    pub fn new() -> Self {
        Self::default()
    }

    /// Acquire the lock for `cart_id`, waiting up to the default bound.
    pub async fn acquire(&self, cart_id: &str) -> ApiResult<OwnedMutexGuard<()>> {
        self.acquire_with_timeout(cart_id, LOCK_WAIT).await
    }

    /// Acquire with an explicit wait bound. Exceeding it surfaces as a
    /// retryable conflict, not a hang.
    pub async fn acquire_with_timeout(
        &self,
        cart_id: &str,
        wait: Duration,
    ) -> ApiResult<OwnedMutexGuard<()>> {
        let lock = self
            .inner
            .entry(cart_id.to_owned())
            .or_insert_with(|| Arc::new(Mutex::new(())))
            .clone();

        tokio::time::timeout(wait, lock.lock_owned())
            .await
            .map_err(|_| ApiError::MutationRace {
                cart_id: cart_id.to_owned(),
            })
    }
}
