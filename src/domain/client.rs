use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Default display name used when an order carries no company name.
pub const DEFAULT_CLIENT_NAME: &str = "Cliente";

/// Client contact record. Every field is a plain string and an empty string
/// means "not provided" — no format validation is applied at this layer.
#[derive(Clone, Debug, Default, Serialize, Deserialize, PartialEq)]
pub struct ClientRecord {
    pub company_name: String,
    pub identification: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub department: String,
    pub comment: String,
}

impl ClientRecord {
    /// Name shown in ledger entries and the generated file name: the company
    /// when present, then the contact name, then a fixed placeholder.
    pub fn display_name(&self) -> &str {
        if !self.company_name.is_empty() {
            &self.company_name
        } else if !self.name.is_empty() {
            &self.name
        } else {
            DEFAULT_CLIENT_NAME
        }
    }

    /// Given name and surname joined with a space, trimmed.
    pub fn full_name(&self) -> String {
        format!("{} {}", self.name, self.surname).trim().to_string()
    }
}

/// Stored directory entry.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Client {
    pub id: i32,
    pub record: ClientRecord,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

/// Payload for inserting a directory entry. Construction trims every field;
/// anything missing stays the empty string so the mapping from arbitrary
/// import rows is total.
#[derive(Clone, Debug, Default, Deserialize, PartialEq)]
pub struct NewClient {
    pub company_name: String,
    pub identification: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub department: String,
    pub comment: String,
}

impl NewClient {
    #[must_use]
    pub fn new(record: ClientRecord) -> Self {
        Self {
            company_name: record.company_name.trim().to_string(),
            identification: record.identification.trim().to_string(),
            name: record.name.trim().to_string(),
            surname: record.surname.trim().to_string(),
            phone: record.phone.trim().to_string(),
            address: record.address.trim().to_string(),
            city: record.city.trim().to_string(),
            department: record.department.trim().to_string(),
            comment: record.comment.trim().to_string(),
        }
    }

    /// Key used for import de-duplication: the legal identification when
    /// present, otherwise company plus contact name, lower-cased.
    pub fn dedup_key(&self) -> String {
        if !self.identification.is_empty() {
            self.identification.to_lowercase()
        } else {
            format!("{}|{} {}", self.company_name, self.name, self.surname).to_lowercase()
        }
    }
}
