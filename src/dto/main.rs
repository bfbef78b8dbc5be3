use serde::{Deserialize, Serialize};

use crate::domain::client::Client;
use crate::domain::order::OrderRecord;
use crate::domain::product::Product;
use crate::pagination::Paginated;

/// Query parameters accepted by the catalog index page.
#[derive(Debug, Default, Deserialize)]
pub struct IndexQuery {
    /// Optional search string entered by the user.
    pub q: Option<String>,
    /// Optional brand filter selected from the brand chips.
    pub brand: Option<String>,
}

/// Query parameters accepted by the client directory page.
#[derive(Debug, Default, Deserialize)]
pub struct ClientsQuery {
    pub q: Option<String>,
    pub page: Option<usize>,
}

/// Query parameters accepted by the order ledger page.
#[derive(Debug, Default, Deserialize)]
pub struct OrdersQuery {
    pub page: Option<usize>,
}

/// Products of one brand, in display order.
#[derive(Debug, Serialize)]
pub struct BrandGroup {
    pub brand: String,
    pub products: Vec<Product>,
}

/// Data required to render the catalog index template.
#[derive(Debug, Serialize)]
pub struct CatalogPageData {
    pub groups: Vec<BrandGroup>,
    /// Every brand in the catalog with its product count.
    pub brands: Vec<(String, usize)>,
    pub total: usize,
    pub search_query: Option<String>,
    pub selected_brand: Option<String>,
}

/// Data required to render the client directory template.
pub struct DirectoryPageData {
    pub clients: Paginated<Client>,
    pub search_query: Option<String>,
}

/// Data required to render the order ledger template.
pub struct OrdersPageData {
    pub orders: Paginated<OrderRecord>,
}
