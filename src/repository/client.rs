use chrono::Utc;
use diesel::prelude::*;

use crate::domain::client::{Client, NewClient};
use crate::repository::errors::RepositoryResult;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter, DieselRepository};

fn filtered(
    query: &ClientListQuery,
) -> crate::schema::clients::BoxedQuery<'static, diesel::sqlite::Sqlite> {
    use crate::schema::clients;

    let mut filtered = clients::table.into_boxed();
    if let Some(term) = &query.search {
        let pattern = format!("%{term}%");
        filtered = filtered.filter(
            clients::company_name
                .like(pattern.clone())
                .or(clients::identification.like(pattern.clone()))
                .or(clients::name.like(pattern.clone()))
                .or(clients::surname.like(pattern.clone()))
                .or(clients::phone.like(pattern.clone()))
                .or(clients::city.like(pattern)),
        );
    }
    filtered
}

impl ClientReader for DieselRepository {
    fn get_client_by_id(&self, id: i32) -> RepositoryResult<Option<Client>> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let client = clients::table
            .find(id)
            .first::<DbClient>(&mut conn)
            .optional()?;

        Ok(client.map(Into::into))
    }

    fn list_clients(&self, query: ClientListQuery) -> RepositoryResult<(usize, Vec<Client>)> {
        use crate::models::client::Client as DbClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;

        let total: i64 = filtered(&query).count().get_result(&mut conn)?;

        let mut select = filtered(&query).order(clients::id.asc());
        if let Some(pagination) = &query.pagination {
            let page = pagination.page.max(1) as i64;
            let per_page = pagination.per_page as i64;
            select = select.limit(per_page).offset((page - 1) * per_page);
        }

        let items = select
            .load::<DbClient>(&mut conn)?
            .into_iter()
            .map(Into::into)
            .collect::<Vec<Client>>();

        Ok((total as usize, items))
    }
}

impl ClientWriter for DieselRepository {
    fn create_clients(&self, new_clients: &[NewClient]) -> RepositoryResult<usize> {
        use crate::models::client::NewClient as DbNewClient;
        use crate::schema::clients;

        let mut conn = self.conn()?;
        let now = Utc::now().naive_utc();
        let insertables: Vec<DbNewClient> = new_clients
            .iter()
            .map(|c| DbNewClient::from_domain(c, now))
            .collect();
        let affected = diesel::insert_into(clients::table)
            .values(&insertables)
            .execute(&mut conn)?;

        Ok(affected)
    }
}
