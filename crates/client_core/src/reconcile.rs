use std::collections::HashMap;

use shared::domain::{CartItem, CartRecord, Product, ProductId};

/// Merges server cart records with the catalog into display-ready items.
///
/// Record order is preserved. Records whose product is missing from
/// `catalog` are dropped, and `None` (no token, failed fetch) yields an empty
/// cart. When the catalog lists an id twice the first entry wins.
pub fn reconcile(records: Option<&[CartRecord]>, catalog: &[Product]) -> Vec<CartItem> {
    let Some(records) = records else {
        return Vec::new();
    };

    let mut index: HashMap<&ProductId, &Product> = HashMap::with_capacity(catalog.len());
    for product in catalog {
        index.entry(&product.id).or_insert(product);
    }

    records
        .iter()
        .filter_map(|record| {
            index
                .get(&record.product_id)
                .map(|product| CartItem::from_parts(record, product))
        })
        .collect()
}

pub fn total_value(items: &[CartItem]) -> f64 {
    items.iter().map(CartItem::line_total).sum()
}

pub fn item_count(items: &[CartItem]) -> u64 {
    items.iter().map(|item| u64::from(item.qty)).sum()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: &str, name: &str, cost: f64) -> Product {
        Product {
            id: id.into(),
            name: name.to_string(),
            category: "Sports".to_string(),
            cost,
            rating: 4,
            image: format!("https://img.example/{id}.jpg"),
        }
    }

    fn item(cost: f64, qty: u32) -> CartItem {
        CartItem {
            product_id: "p".into(),
            qty,
            name: "p".to_string(),
            category: String::new(),
            cost,
            rating: 0,
            image: String::new(),
        }
    }

    #[test]
    fn missing_snapshot_yields_empty_cart() {
        assert!(reconcile(None, &[product("p1", "Ball", 100.0)]).is_empty());
    }

    #[test]
    fn preserves_record_order_and_drops_orphans() {
        let catalog = vec![
            product("a", "Apple", 10.0),
            product("b", "Bat", 20.0),
            product("c", "Cap", 30.0),
        ];
        let records = vec![
            CartRecord::new("c", 1),
            CartRecord::new("ghost", 4),
            CartRecord::new("a", 2),
        ];

        let items = reconcile(Some(records.as_slice()), &catalog);
        let ids: Vec<&str> = items.iter().map(|i| i.product_id.as_str()).collect();
        assert_eq!(ids, vec!["c", "a"]);
        assert_eq!(items[0].name, "Cap");
        assert_eq!(items[1].qty, 2);
        assert_eq!(items[1].image, "https://img.example/a.jpg");
    }

    #[test]
    fn orphan_only_cart_against_empty_catalog_is_empty() {
        let records = vec![CartRecord::new("X", 1)];
        assert!(reconcile(Some(records.as_slice()), &[]).is_empty());
    }

    #[test]
    fn repeated_reconciliation_is_stable() {
        let catalog = vec![product("a", "Apple", 10.0), product("b", "Bat", 20.0)];
        let records = vec![CartRecord::new("b", 3), CartRecord::new("a", 1)];

        let first = reconcile(Some(records.as_slice()), &catalog);
        let second = reconcile(Some(records.as_slice()), &catalog);
        assert_eq!(first, second);
    }

    #[test]
    fn first_catalog_entry_wins_on_duplicate_ids() {
        let catalog = vec![product("a", "First", 1.0), product("a", "Second", 2.0)];
        let items = reconcile(Some(&[CartRecord::new("a", 1)][..]), &catalog);
        assert_eq!(items.len(), 1);
        assert_eq!(items[0].name, "First");
    }

    #[test]
    fn total_value_sums_cost_times_quantity() {
        assert_eq!(total_value(&[]), 0.0);
        assert_eq!(total_value(&[item(100.0, 2), item(50.0, 1)]), 250.0);
    }

    #[test]
    fn total_value_ignores_non_finite_costs() {
        assert_eq!(total_value(&[item(f64::NAN, 3), item(40.0, 1)]), 40.0);
        assert_eq!(total_value(&[item(f64::INFINITY, 1)]), 0.0);
    }

    #[test]
    fn item_count_sums_quantities() {
        assert_eq!(item_count(&[]), 0);
        assert_eq!(item_count(&[item(1.0, 2), item(1.0, 5)]), 7);
    }
}
