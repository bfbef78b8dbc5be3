use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

use crate::domain::client::ClientRecord;
use crate::domain::product::Product;
use crate::domain::types::{PriceTier, Quantity};

/// One cart line: a resolved product with the chosen quantity, color and
/// price tier. Consumed read-only by the renderer.
#[derive(Clone, Debug, PartialEq)]
pub struct LineItem {
    pub product: Product,
    pub quantity: Quantity,
    /// One of the product's colors, or empty when no color applies.
    pub color: String,
    pub tier: PriceTier,
}

impl LineItem {
    /// Unit price according to this line's tier.
    pub fn unit_price(&self) -> f64 {
        self.product.unit_price(self.tier)
    }
}

/// Everything the document renderer needs for one order.
#[derive(Clone, Debug)]
pub struct OrderInput {
    pub client: ClientRecord,
    pub items: Vec<LineItem>,
    /// Order-level tier; used for the totals box accent and the summary line.
    pub tier: PriceTier,
    pub comment: String,
}

/// Ledger entry appended after a document was stored.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct OrderRecord {
    pub id: i32,
    pub client_name: String,
    pub details: String,
    pub document_url: String,
    pub document_name: String,
    pub delivered_to: Vec<String>,
    pub read_by: Vec<String>,
    pub total: i64,
    pub item_count: i32,
    pub created_at: NaiveDateTime,
}

/// Payload for appending a ledger entry.
#[derive(Clone, Debug, PartialEq)]
pub struct NewOrderRecord {
    pub client_name: String,
    pub details: String,
    pub document_url: String,
    pub document_name: String,
    pub delivered_to: Vec<String>,
    pub read_by: Vec<String>,
    pub total: i64,
    pub item_count: i32,
    pub created_at: NaiveDateTime,
}
