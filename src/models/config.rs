//! Configuration model loaded from external sources.

use serde::Deserialize;

#[derive(Clone, Debug, Deserialize)]
/// Basic configuration shared across handlers. Built once at startup and
/// passed into constructors; there is no ambient configuration state.
pub struct ServerConfig {
    pub domain: String,
    pub address: String,
    pub port: u16,
    pub database_url: String,
    pub templates_dir: String,
    pub secret: String,
    /// Directory where rendered order documents are written.
    pub documents_dir: String,
    /// Public URL prefix under which `documents_dir` is served.
    pub documents_base_url: String,
    /// Capability flag: when false the notification sink is never invoked.
    pub notifications_enabled: bool,
    /// Addresses that receive the order notification email.
    pub order_recipients: Vec<String>,
}
