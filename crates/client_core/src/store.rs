use std::num::NonZeroU32;

use async_trait::async_trait;
use reqwest::StatusCode;
use shared::{
    domain::{CartRecord, ProductId},
    error::{CartFetchError, CartFetchErrorKind, CartMutationError, CartMutationErrorKind},
    protocol::UpsertCartRequest,
};
use tracing::{debug, warn};

use crate::{
    http::{error_message, HttpBackend},
    notify::{Notifier, Severity},
};

#[async_trait]
pub trait CartStore: Send + Sync {
    async fn fetch_records(&self, token: &str) -> Result<Vec<CartRecord>, CartFetchError>;

    /// `POST /cart`, setting the quantity of `product_id`. Returns the whole
    /// updated cart.
    async fn upsert_item(
        &self,
        token: &str,
        product_id: &ProductId,
        qty: NonZeroU32,
    ) -> Result<Vec<CartRecord>, CartMutationError>;
}

/// Fetches the cart snapshot, or `None` when there is nothing to show.
///
/// An absent or empty token short-circuits without touching the network.
/// Failures are reported once through `notifier`.
pub async fn fetch_cart<S, N>(
    store: &S,
    notifier: &N,
    token: Option<&str>,
) -> Option<Vec<CartRecord>>
where
    S: CartStore + ?Sized,
    N: Notifier + ?Sized,
{
    let token = token.filter(|token| !token.is_empty())?;
    match store.fetch_records(token).await {
        Ok(records) => Some(records),
        Err(error) => {
            warn!(kind = ?error.kind, %error, "cart: fetch failed");
            notifier.notify(&error.message, Severity::Error);
            None
        }
    }
}

#[async_trait]
impl CartStore for HttpBackend {
    async fn fetch_records(&self, token: &str) -> Result<Vec<CartRecord>, CartFetchError> {
        let url = self.url("cart");
        debug!(%url, "cart: fetching records");

        let response = self
            .http
            .get(&url)
            .bearer_auth(token)
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "cart: backend unreachable");
                CartFetchError::unreachable()
            })?;

        match response.status() {
            StatusCode::OK => response.json::<Vec<CartRecord>>().await.map_err(|error| {
                warn!(%error, "cart: malformed cart payload");
                CartFetchError::unreachable()
            }),
            StatusCode::UNAUTHORIZED => Err(CartFetchError::new(
                CartFetchErrorKind::Unauthorized,
                error_message(response, "Protected route, Oauth2 Bearer token not found").await,
            )),
            StatusCode::BAD_REQUEST => Err(CartFetchError::new(
                CartFetchErrorKind::BadRequest,
                error_message(response, "Bad request").await,
            )),
            status => {
                warn!(status = status.as_u16(), "cart: unexpected fetch status");
                Err(CartFetchError::unreachable())
            }
        }
    }

    async fn upsert_item(
        &self,
        token: &str,
        product_id: &ProductId,
        qty: NonZeroU32,
    ) -> Result<Vec<CartRecord>, CartMutationError> {
        let url = self.url("cart");
        debug!(%url, %product_id, qty = qty.get(), "cart: upserting item");

        let response = self
            .http
            .post(&url)
            .bearer_auth(token)
            .json(&UpsertCartRequest {
                product_id: product_id.clone(),
                qty: qty.get(),
            })
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "cart: backend unreachable");
                CartMutationError::unreachable()
            })?;

        match response.status() {
            StatusCode::OK => response.json::<Vec<CartRecord>>().await.map_err(|error| {
                warn!(%error, "cart: malformed cart payload");
                CartMutationError::unreachable()
            }),
            StatusCode::NOT_FOUND => Err(CartMutationError::new(
                CartMutationErrorKind::ProductNotFound,
                error_message(response, "Product doesn't exist").await,
            )),
            status => {
                warn!(status = status.as_u16(), %product_id, "cart: unexpected upsert status");
                Err(CartMutationError::unreachable())
            }
        }
    }
}
