use async_trait::async_trait;
use reqwest::StatusCode;
use serde_json::Value;
use shared::{
    domain::Product,
    error::{CatalogError, CatalogErrorKind},
    protocol::SearchQuery,
};
use tracing::{debug, warn};

use crate::http::{error_message, HttpBackend};

#[async_trait]
pub trait CatalogProvider: Send + Sync {
    async fn catalog(&self) -> Result<Vec<Product>, CatalogError>;
}

#[async_trait]
impl CatalogProvider for Vec<Product> {
    async fn catalog(&self) -> Result<Vec<Product>, CatalogError> {
        Ok(self.clone())
    }
}

#[async_trait]
impl CatalogProvider for HttpBackend {
    async fn catalog(&self) -> Result<Vec<Product>, CatalogError> {
        let url = self.url("products");
        debug!(%url, "catalog: fetching products");

        let response = self.http.get(&url).send().await.map_err(|error| {
            warn!(%error, "catalog: backend unreachable");
            CatalogError::unreachable()
        })?;

        let status = response.status();
        if status == StatusCode::OK {
            return response
                .json::<Vec<Value>>()
                .await
                .map(decode_products)
                .map_err(|error| {
                    warn!(%error, "catalog: malformed product payload");
                    CatalogError::unreachable()
                });
        }
        if status.is_server_error() {
            return Err(CatalogError::new(
                CatalogErrorKind::ServerError,
                error_message(
                    response,
                    "Something went wrong. Check the backend console for more details",
                )
                .await,
            ));
        }

        warn!(status = status.as_u16(), "catalog: unexpected status");
        Err(CatalogError::unreachable())
    }
}

impl HttpBackend {
    /// `GET /products/search?value=<text>`. A 404 means nothing matched.
    pub async fn search_products(&self, text: &str) -> Result<Vec<Product>, CatalogError> {
        let url = self.url("products/search");
        debug!(%url, query = text, "catalog: searching products");

        let response = self
            .http
            .get(&url)
            .query(&SearchQuery {
                value: text.to_string(),
            })
            .send()
            .await
            .map_err(|error| {
                warn!(%error, "catalog: backend unreachable");
                CatalogError::unreachable()
            })?;

        match response.status() {
            StatusCode::OK => response
                .json::<Vec<Value>>()
                .await
                .map(decode_products)
                .map_err(|error| {
                    warn!(%error, "catalog: malformed search payload");
                    CatalogError::unreachable()
                }),
            StatusCode::NOT_FOUND => Ok(Vec::new()),
            status if status.is_server_error() => Err(CatalogError::new(
                CatalogErrorKind::ServerError,
                error_message(
                    response,
                    "Something went wrong. Check the backend console for more details",
                )
                .await,
            )),
            status => {
                warn!(status = status.as_u16(), "catalog: unexpected search status");
                Err(CatalogError::unreachable())
            }
        }
    }
}

/// Decodes a listing entry by entry, skipping the ones that do not parse.
fn decode_products(values: Vec<Value>) -> Vec<Product> {
    values
        .into_iter()
        .filter_map(|value| match serde_json::from_value::<Product>(value) {
            Ok(product) => Some(product),
            Err(error) => {
                warn!(%error, "catalog: skipping malformed product");
                None
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn malformed_entries_are_skipped_not_fatal() {
        let products = decode_products(vec![
            json!({"_id": "a", "name": "Ball", "cost": 100, "rating": 4}),
            json!({"_id": "b", "cost": 10}),
            json!("not a product"),
            json!({"_id": "c", "name": "Cap", "cost": null}),
        ]);
        let ids: Vec<&str> = products.iter().map(|p| p.id.as_str()).collect();
        assert_eq!(ids, vec!["a", "c"]);
        assert_eq!(products[1].cost, 0.0);
    }
}
