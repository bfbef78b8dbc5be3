use chrono::NaiveDateTime;
use diesel::prelude::*;

use crate::domain::product::{NewProduct as DomainNewProduct, Product as DomainProduct};
use crate::domain::types::ProductId;

#[derive(Debug, Clone, Identifiable, Queryable)]
#[diesel(table_name = crate::schema::products)]
/// Diesel model for [`crate::domain::product::Product`]. List fields are
/// stored as JSON text.
pub struct Product {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub colors: String,
    pub price1: f64,
    pub price2: f64,
    pub image_urls: String,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable, AsChangeset)]
#[diesel(table_name = crate::schema::products)]
/// Insertable/upsertable form of [`Product`].
pub struct NewProduct {
    pub id: String,
    pub name: String,
    pub brand: String,
    pub description: String,
    pub colors: String,
    pub price1: f64,
    pub price2: f64,
    pub image_urls: String,
    pub updated_at: NaiveDateTime,
}

fn decode_list(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn encode_list(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

impl From<Product> for DomainProduct {
    fn from(product: Product) -> Self {
        Self {
            // Row ids come from the domain layer and are always non-empty.
            id: ProductId::new(product.id)
                .unwrap_or_else(|_| ProductId::new("-").expect("literal id is non-empty")),
            name: product.name,
            brand: product.brand,
            description: product.description,
            colors: decode_list(&product.colors),
            price1: product.price1,
            price2: product.price2,
            image_urls: decode_list(&product.image_urls),
            updated_at: product.updated_at,
        }
    }
}

impl NewProduct {
    pub fn from_domain(product: &DomainNewProduct, updated_at: NaiveDateTime) -> Self {
        Self {
            id: product.id.as_str().to_string(),
            name: product.name.clone(),
            brand: product.brand.clone(),
            description: product.description.clone(),
            colors: encode_list(&product.colors),
            price1: product.price1,
            price2: product.price2,
            image_urls: encode_list(&product.image_urls),
            updated_at,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn product_into_domain_decodes_lists() {
        let db = Product {
            id: "rec1".into(),
            name: "Morral".into(),
            brand: "Andino".into(),
            description: "".into(),
            colors: r#"["Negro","Azul"]"#.into(),
            price1: 1000.0,
            price2: 1200.0,
            image_urls: "not json".into(),
            updated_at: NaiveDateTime::default(),
        };
        let domain: DomainProduct = db.into();
        assert_eq!(domain.colors, vec!["Negro".to_string(), "Azul".to_string()]);
        assert!(domain.image_urls.is_empty());
    }

    #[test]
    fn new_product_encodes_lists() {
        let domain = DomainNewProduct::new(
            ProductId::new("rec1").unwrap(),
            "Morral".into(),
            "Andino".into(),
            String::new(),
            vec!["Negro".into()],
            1.0,
            2.0,
            vec![],
        );
        let row = NewProduct::from_domain(&domain, NaiveDateTime::default());
        assert_eq!(row.colors, r#"["Negro"]"#);
        assert_eq!(row.image_urls, "[]");
    }
}
