use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::types::{PriceTier, ProductId};

/// Catalog product as fetched from the table store. Immutable for the order
/// flow; the renderer only ever reads it.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub description: String,
    /// Ordered list of colors the product is offered in.
    pub colors: Vec<String>,
    pub price1: f64,
    pub price2: f64,
    pub image_urls: Vec<String>,
    pub updated_at: NaiveDateTime,
}

impl Product {
    /// Unit price for the given tier.
    pub fn unit_price(&self, tier: PriceTier) -> f64 {
        match tier {
            PriceTier::Price1 => self.price1,
            PriceTier::Price2 => self.price2,
        }
    }
}

/// Payload for inserting or refreshing a catalog row.
#[derive(Clone, Debug, Deserialize)]
pub struct NewProduct {
    pub id: ProductId,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub colors: Vec<String>,
    pub price1: f64,
    pub price2: f64,
    pub image_urls: Vec<String>,
}

impl NewProduct {
    #[must_use]
    pub fn new(
        id: ProductId,
        name: String,
        brand: String,
        description: String,
        colors: Vec<String>,
        price1: f64,
        price2: f64,
        image_urls: Vec<String>,
    ) -> Self {
        Self {
            id,
            name: name.trim().to_string(),
            brand: brand.trim().to_string(),
            description: description.trim().to_string(),
            colors: colors
                .into_iter()
                .map(|c| c.trim().to_string())
                .filter(|c| !c.is_empty())
                .collect(),
            price1: price1.max(0.0),
            price2: price2.max(0.0),
            image_urls,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(price1: f64, price2: f64) -> Product {
        Product {
            id: ProductId::new("rec1").unwrap(),
            name: "Morral".into(),
            brand: "Andino".into(),
            description: String::new(),
            colors: vec!["Negro".into()],
            price1,
            price2,
            image_urls: vec![],
            updated_at: chrono::NaiveDateTime::default(),
        }
    }

    #[test]
    fn unit_price_selects_tier_field() {
        let p = product(1000.0, 1200.0);
        assert_eq!(p.unit_price(PriceTier::Price1), 1000.0);
        assert_eq!(p.unit_price(PriceTier::Price2), 1200.0);
    }

    #[test]
    fn new_product_normalizes_text_fields() {
        let p = NewProduct::new(
            ProductId::new("rec1").unwrap(),
            " Morral ".into(),
            " Andino ".into(),
            "".into(),
            vec![" Negro ".into(), "  ".into()],
            -5.0,
            10.0,
            vec![],
        );
        assert_eq!(p.name, "Morral");
        assert_eq!(p.brand, "Andino");
        assert_eq!(p.colors, vec!["Negro".to_string()]);
        assert_eq!(p.price1, 0.0);
    }
}
