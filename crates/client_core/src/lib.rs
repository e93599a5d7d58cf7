use shared::{
    domain::{CartItem, Product, ProductId},
    error::Rejected,
};
use tracing::warn;

mod auth;
pub mod catalog;
pub mod http;
pub mod mutator;
pub mod notify;
pub mod reconcile;
pub mod store;

pub use catalog::CatalogProvider;
pub use http::HttpBackend;
pub use mutator::{is_in_cart, AddPolicy, CartMutator};
pub use notify::{Notifier, Severity, TracingNotifier};
pub use reconcile::{item_count, reconcile, total_value};
pub use store::{fetch_cart, CartStore};

/// Entry point for a storefront page: catalog, cart refresh and cart edits.
///
/// The token is an explicit argument on every call; nothing about the user
/// is remembered between calls.
pub struct Storefront<S, C, N> {
    store: S,
    catalog: C,
    notifier: N,
}

impl<S, C, N> Storefront<S, C, N>
where
    S: CartStore,
    C: CatalogProvider,
    N: Notifier,
{
    pub fn new(store: S, catalog: C, notifier: N) -> Self {
        Self {
            store,
            catalog,
            notifier,
        }
    }

    pub fn notifier(&self) -> &N {
        &self.notifier
    }

    pub fn mutator(&self) -> CartMutator<'_, S, N> {
        CartMutator::new(&self.store, &self.notifier)
    }

    pub async fn load_catalog(&self) -> Vec<Product> {
        match self.catalog.catalog().await {
            Ok(products) => products,
            Err(error) => {
                warn!(kind = ?error.kind, %error, "storefront: catalog unavailable");
                self.notifier.notify(&error.message, Severity::Error);
                Vec::new()
            }
        }
    }

    pub async fn refresh_cart(&self, token: Option<&str>, catalog: &[Product]) -> Vec<CartItem> {
        let records = fetch_cart(&self.store, &self.notifier, token).await;
        reconcile(records.as_deref(), catalog)
    }

    /// "Add to Cart": one unit, refused if the product is already present.
    pub async fn add_to_cart(
        &self,
        token: Option<&str>,
        items: &[CartItem],
        catalog: &[Product],
        product_id: &ProductId,
    ) -> Result<Vec<CartItem>, Rejected> {
        self.mutator()
            .add_or_update(token, items, catalog, product_id, 1, AddPolicy::PreventDuplicate)
            .await
    }

    pub async fn set_quantity(
        &self,
        token: Option<&str>,
        items: &[CartItem],
        catalog: &[Product],
        product_id: &ProductId,
        qty: u32,
    ) -> Result<Vec<CartItem>, Rejected> {
        self.mutator()
            .add_or_update(token, items, catalog, product_id, qty, AddPolicy::AllowUpdate)
            .await
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
