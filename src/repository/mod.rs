use crate::db::DbPool;
use crate::domain::{
    client::{Client, NewClient},
    notification::{EmailMessage, QueuedEmail},
    order::{NewOrderRecord, OrderRecord},
    product::{NewProduct, Product},
    types::ProductId,
};
use crate::repository::errors::RepositoryResult;

pub mod client;
pub mod errors;
pub mod order;
pub mod outbox;
pub mod product;

#[derive(Debug, Clone)]
pub struct Pagination {
    pub page: usize,
    pub per_page: usize,
}

#[derive(Debug, Clone, Default)]
pub struct ProductListQuery {
    pub search: Option<String>,
    pub brand: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ProductListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn brand(mut self, brand: impl Into<String>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct ClientListQuery {
    pub search: Option<String>,
    pub pagination: Option<Pagination>,
}

impl ClientListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn search(mut self, term: impl Into<String>) -> Self {
        self.search = Some(term.into());
        self
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct OrderListQuery {
    pub pagination: Option<Pagination>,
}

impl OrderListQuery {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn paginate(mut self, page: usize, per_page: usize) -> Self {
        self.pagination = Some(Pagination { page, per_page });
        self
    }
}

pub trait ProductReader {
    fn get_product_by_id(&self, id: &ProductId) -> RepositoryResult<Option<Product>>;
    fn list_products(&self, query: ProductListQuery) -> RepositoryResult<(usize, Vec<Product>)>;
}

pub trait ProductWriter {
    /// Inserts or refreshes catalog rows keyed by id; returns the number of
    /// rows written.
    fn upsert_products(&self, products: &[NewProduct]) -> RepositoryResult<usize>;
}

pub trait ClientReader {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>>;
    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)>;
}

pub trait ClientWriter {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize>;
}

pub trait OrderReader {
    fn list_orders(&self, query: OrderListQuery) -> RepositoryResult<(usize, Vec<OrderRecord>)>;
}

pub trait OrderWriter {
    fn create_order(&self, order: &NewOrderRecord) -> RepositoryResult<OrderRecord>;
}

pub trait OutboxWriter {
    /// Queues a notification email for the external emailer worker.
    fn enqueue_email(&self, message: &EmailMessage) -> RepositoryResult<i32>;
}

pub trait OutboxReader {
    fn list_pending_emails(&self) -> RepositoryResult<Vec<QueuedEmail>>;
}

#[derive(Clone)]
/// Diesel-backed implementation of every repository trait.
pub struct DieselRepository {
    pool: DbPool,
}

impl DieselRepository {
    pub fn new(pool: DbPool) -> Self {
        Self { pool }
    }

    pub(crate) fn conn(&self) -> RepositoryResult<crate::db::DbConnection> {
        Ok(self.pool.get()?)
    }
}
