use std::num::NonZeroU32;

use shared::{
    domain::{CartItem, Product, ProductId},
    error::{RejectReason, Rejected},
};
use tracing::{debug, info, warn};

use crate::{
    notify::{Notifier, Severity},
    reconcile::reconcile,
    store::CartStore,
};

/// Whether adding an item already in the cart is allowed.
///
/// "Add to Cart" buttons use `PreventDuplicate`; quantity controls in the cart
/// use `AllowUpdate`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum AddPolicy {
    PreventDuplicate,
    #[default]
    AllowUpdate,
}

pub fn is_in_cart(items: &[CartItem], product_id: &ProductId) -> bool {
    items.iter().any(|item| &item.product_id == product_id)
}

pub struct CartMutator<'a, S: ?Sized, N: ?Sized> {
    store: &'a S,
    notifier: &'a N,
}

impl<'a, S, N> CartMutator<'a, S, N>
where
    S: CartStore + ?Sized,
    N: Notifier + ?Sized,
{
    pub fn new(store: &'a S, notifier: &'a N) -> Self {
        Self { store, notifier }
    }

    /// Sets `product_id` to `qty` in the cart of the `token` owner.
    ///
    /// Local validation failures are returned as [`Rejected`] without a
    /// request being made. A failed request is reported through the notifier
    /// and resolves to `current_items` unchanged.
    pub async fn add_or_update(
        &self,
        token: Option<&str>,
        current_items: &[CartItem],
        catalog: &[Product],
        product_id: &ProductId,
        qty: u32,
        policy: AddPolicy,
    ) -> Result<Vec<CartItem>, Rejected> {
        let Some(token) = token.filter(|token| !token.is_empty()) else {
            return Err(self.reject(RejectReason::NotAuthenticated));
        };
        if policy == AddPolicy::PreventDuplicate && is_in_cart(current_items, product_id) {
            return Err(self.reject(RejectReason::DuplicateItem));
        }
        let Some(qty) = NonZeroU32::new(qty) else {
            return Err(self.reject(RejectReason::InvalidQuantity));
        };

        match self.store.upsert_item(token, product_id, qty).await {
            Ok(records) => {
                info!(%product_id, qty = qty.get(), lines = records.len(), "cart: updated");
                Ok(reconcile(Some(records.as_slice()), catalog))
            }
            Err(error) => {
                warn!(%product_id, kind = ?error.kind, %error, "cart: update failed");
                self.notifier.notify(&error.message, Severity::Error);
                Ok(current_items.to_vec())
            }
        }
    }

    fn reject(&self, reason: RejectReason) -> Rejected {
        debug!(?reason, "cart: update rejected locally");
        let severity = match reason {
            RejectReason::NotAuthenticated => Severity::Error,
            RejectReason::DuplicateItem | RejectReason::InvalidQuantity => Severity::Warning,
        };
        self.notifier.notify(reason.message(), severity);
        Rejected::from(reason)
    }
}

#[cfg(test)]
#[path = "tests/mutator_tests.rs"]
mod tests;
