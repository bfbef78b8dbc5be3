use serde::Deserialize;

use crate::domain::client::ClientRecord;
use crate::domain::types::PriceTier;

/// JSON body accepted by the order submission endpoint.
#[derive(Debug, Deserialize)]
pub struct OrderPayload {
    #[serde(default)]
    pub client: ClientPayload,
    pub items: Vec<ItemPayload>,
    pub price_tier: PriceTier,
    #[serde(default)]
    pub comment: String,
}

/// Client fields as posted by the form; anything missing defaults to empty.
#[derive(Debug, Default, Deserialize)]
pub struct ClientPayload {
    #[serde(default)]
    pub company_name: String,
    #[serde(default)]
    pub identification: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub surname: String,
    #[serde(default)]
    pub phone: String,
    #[serde(default)]
    pub address: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub department: String,
}

#[derive(Debug, Deserialize)]
pub struct ItemPayload {
    pub product_id: String,
    pub quantity: u32,
    #[serde(default)]
    pub color: String,
    /// Per-line override; falls back to the order-level tier.
    #[serde(default)]
    pub price_tier: Option<PriceTier>,
}

impl From<ClientPayload> for ClientRecord {
    fn from(payload: ClientPayload) -> Self {
        Self {
            company_name: payload.company_name,
            identification: payload.identification,
            name: payload.name,
            surname: payload.surname,
            phone: payload.phone,
            address: payload.address,
            city: payload.city,
            department: payload.department,
            comment: String::new(),
        }
    }
}
