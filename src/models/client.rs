use chrono::NaiveDateTime;
use diesel::prelude::*;
use serde::Serialize;

use crate::domain::client::{
    Client as DomainClient, ClientRecord, NewClient as DomainNewClient,
};

#[derive(Debug, Clone, Identifiable, Queryable, Serialize)]
#[diesel(table_name = crate::schema::clients)]
/// Diesel model for [`crate::domain::client::Client`].
pub struct Client {
    pub id: i32,
    pub company_name: String,
    pub identification: String,
    pub name: String,
    pub surname: String,
    pub phone: String,
    pub address: String,
    pub city: String,
    pub department: String,
    pub comment: String,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

#[derive(Insertable)]
#[diesel(table_name = crate::schema::clients)]
/// Insertable form of [`Client`].
pub struct NewClient<'a> {
    pub company_name: &'a str,
    pub identification: &'a str,
    pub name: &'a str,
    pub surname: &'a str,
    pub phone: &'a str,
    pub address: &'a str,
    pub city: &'a str,
    pub department: &'a str,
    pub comment: &'a str,
    pub created_at: NaiveDateTime,
    pub updated_at: NaiveDateTime,
}

impl From<Client> for DomainClient {
    fn from(client: Client) -> Self {
        Self {
            id: client.id,
            record: ClientRecord {
                company_name: client.company_name,
                identification: client.identification,
                name: client.name,
                surname: client.surname,
                phone: client.phone,
                address: client.address,
                city: client.city,
                department: client.department,
                comment: client.comment,
            },
            created_at: client.created_at,
            updated_at: client.updated_at,
        }
    }
}

impl<'a> NewClient<'a> {
    pub fn from_domain(client: &'a DomainNewClient, now: NaiveDateTime) -> Self {
        Self {
            company_name: &client.company_name,
            identification: &client.identification,
            name: &client.name,
            surname: &client.surname,
            phone: &client.phone,
            address: &client.address,
            city: &client.city,
            department: &client.department,
            comment: &client.comment,
            created_at: now,
            updated_at: now,
        }
    }
}
