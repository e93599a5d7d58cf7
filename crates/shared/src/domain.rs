use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ProductId(pub String);

impl ProductId {
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ProductId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ProductId {
    fn from(value: &str) -> Self {
        Self(value.to_string())
    }
}

impl From<String> for ProductId {
    fn from(value: String) -> Self {
        Self(value)
    }
}

/// A purchasable product as listed by `GET /products`.
///
/// The backend names the identifier `_id`; `id` is accepted on input as well.
/// Missing or null fields decode as zero/empty. A rating outside 0..=5 is
/// rounded and clamped.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    #[serde(rename = "_id", alias = "id")]
    pub id: ProductId,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
}

fn null_as_zero<'de, D: Deserializer<'de>>(deserializer: D) -> Result<f64, D::Error> {
    Ok(Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0))
}

fn null_as_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(Option::<String>::deserialize(deserializer)?.unwrap_or_default())
}

fn lenient_rating<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u8, D::Error> {
    let raw = Option::<f64>::deserialize(deserializer)?.unwrap_or(0.0);
    if !raw.is_finite() {
        return Ok(0);
    }
    Ok(raw.round().clamp(0.0, 5.0) as u8)
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartRecord {
    pub product_id: ProductId,
    pub qty: u32,
}

impl CartRecord {
    pub fn new(product_id: impl Into<ProductId>, qty: u32) -> Self {
        Self {
            product_id: product_id.into(),
            qty,
        }
    }
}

/// A cart record enriched with the display fields of its product.
///
/// Always derived from a `(CartRecord, Product)` pair; never sent back to the
/// backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CartItem {
    pub product_id: ProductId,
    pub qty: u32,
    pub name: String,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub category: String,
    #[serde(default, deserialize_with = "null_as_zero")]
    pub cost: f64,
    #[serde(default, deserialize_with = "lenient_rating")]
    pub rating: u8,
    #[serde(default, deserialize_with = "null_as_empty")]
    pub image: String,
}

impl CartItem {
    pub fn from_parts(record: &CartRecord, product: &Product) -> Self {
        Self {
            product_id: record.product_id.clone(),
            qty: record.qty,
            name: product.name.clone(),
            category: product.category.clone(),
            cost: product.cost,
            rating: product.rating,
            image: product.image.clone(),
        }
    }

    /// `cost * qty`, with a non-finite cost counted as zero.
    pub fn line_total(&self) -> f64 {
        if self.cost.is_finite() {
            self.cost * f64::from(self.qty)
        } else {
            0.0
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Session {
    pub token: String,
    pub username: String,
    #[serde(default)]
    pub balance: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_decodes_backend_listing() {
        let raw = r#"{
            "name": "iPhone XR",
            "category": "Phones",
            "cost": 100,
            "rating": 4,
            "image": "https://i.imgur.com/lulqWzW.jpg",
            "_id": "v4sLtEcMpzabRyfx"
        }"#;
        let product: Product = serde_json::from_str(raw).expect("decode");
        assert_eq!(product.id, ProductId::from("v4sLtEcMpzabRyfx"));
        assert_eq!(product.cost, 100.0);
        assert_eq!(product.rating, 4);
    }

    #[test]
    fn product_defaults_missing_cost_to_zero() {
        let product: Product =
            serde_json::from_str(r#"{"id":"p9","name":"Mystery"}"#).expect("decode");
        assert_eq!(product.cost, 0.0);
        assert_eq!(product.rating, 0);
        assert!(product.image.is_empty());
    }


    #[test]
    fn product_tolerates_null_and_out_of_range_fields() {
        let raw = r#"[
            {"_id": "a", "name": "Ball", "category": "Sports", "cost": 100, "rating": 4, "image": "u"},
            {"_id": "b", "name": "Bat", "category": null, "cost": null, "rating": 4.6, "image": null},
            {"_id": "c", "name": "Cap", "cost": 12.5, "rating": 17}
        ]"#;
        let products: Vec<Product> = serde_json::from_str(raw).expect("decode");
        assert_eq!(products.len(), 3);
        assert_eq!(products[0].cost, 100.0);
        assert_eq!(products[1].cost, 0.0);
        assert_eq!(products[1].rating, 5);
        assert!(products[1].category.is_empty());
        assert!(products[1].image.is_empty());
        assert_eq!(products[2].rating, 5);
    }
    #[test]
    fn cart_record_uses_camel_case_wire_names() {
        let record: CartRecord =
            serde_json::from_str(r#"{"productId":"KCRwjF7lN97HnEaY","qty":3}"#).expect("decode");
        assert_eq!(record, CartRecord::new("KCRwjF7lN97HnEaY", 3));
        assert_eq!(
            serde_json::to_value(&record).expect("encode"),
            serde_json::json!({"productId": "KCRwjF7lN97HnEaY", "qty": 3})
        );
    }

    #[test]
    fn cart_item_copies_product_fields() {
        let product = Product {
            id: "p1".into(),
            name: "Ball".into(),
            category: "Sports".into(),
            cost: 100.0,
            rating: 4,
            image: "u".into(),
        };
        let item = CartItem::from_parts(&CartRecord::new("p1", 2), &product);
        assert_eq!(item.name, "Ball");
        assert_eq!(item.category, "Sports");
        assert_eq!(item.line_total(), 200.0);
    }
}
