pub mod client;
pub mod notification;
pub mod order;
pub mod product;
pub mod types;
