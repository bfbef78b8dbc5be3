use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::domain::order::{NewOrderRecord as DomainNewOrder, OrderRecord as DomainOrder};

#[derive(Debug, Clone, Identifiable, Queryable, Serialize)]
#[diesel(table_name = crate::schema::orders)]
/// Diesel model for [`crate::domain::order::OrderRecord`]. Marker lists are
/// stored as JSON text.
pub struct Order {
    pub id: i32,
    pub client_name: String,
    pub details: String,
    pub document_url: String,
    pub document_name: String,
    pub delivered_to: String,
    pub read_by: String,
    pub total: i64,
    pub item_count: i32,
    pub created_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::orders)]
/// Insertable form of [`Order`].
pub struct NewOrder {
    pub client_name: String,
    pub details: String,
    pub document_url: String,
    pub document_name: String,
    pub delivered_to: String,
    pub read_by: String,
    pub total: i64,
    pub item_count: i32,
    pub created_at: NaiveDateTime,
}

fn decode_markers(raw: &str) -> Vec<String> {
    serde_json::from_str(raw).unwrap_or_default()
}

fn encode_markers(values: &[String]) -> String {
    serde_json::to_string(values).unwrap_or_else(|_| "[]".to_string())
}

impl From<Order> for DomainOrder {
    fn from(order: Order) -> Self {
        Self {
            id: order.id,
            client_name: order.client_name,
            details: order.details,
            document_url: order.document_url,
            document_name: order.document_name,
            delivered_to: decode_markers(&order.delivered_to),
            read_by: decode_markers(&order.read_by),
            total: order.total,
            item_count: order.item_count,
            created_at: order.created_at,
        }
    }
}

impl From<&DomainNewOrder> for NewOrder {
    fn from(order: &DomainNewOrder) -> Self {
        Self {
            client_name: order.client_name.clone(),
            details: order.details.clone(),
            document_url: order.document_url.clone(),
            document_name: order.document_name.clone(),
            delivered_to: encode_markers(&order.delivered_to),
            read_by: encode_markers(&order.read_by),
            total: order.total,
            item_count: order.item_count,
            created_at: order.created_at,
        }
    }
}
