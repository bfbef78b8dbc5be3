use std::collections::HashSet;

use validator::Validate;

use crate::domain::client::NewClient;
use crate::dto::main::{ClientsQuery, DirectoryPageData};
use crate::forms::clients::AddClientForm;
use crate::pagination::Paginated;
use crate::repository::{ClientListQuery, ClientReader, ClientWriter};
use crate::routes::DEFAULT_ITEMS_PER_PAGE;
use crate::services::{ServiceError, ServiceResult};

/// Result of a spreadsheet import run.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct ImportStats {
    pub imported: usize,
    pub skipped: usize,
}

/// Loads the client directory for the `/clients` page.
pub fn load_directory<R>(repo: &R, query: ClientsQuery) -> ServiceResult<DirectoryPageData>
where
    R: ClientReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let search_query = query
        .q
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());

    let mut list_query = ClientListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE);
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }

    let (total, clients) = repo.list_clients(list_query).map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(DirectoryPageData {
        clients: Paginated::new(clients, page, total_pages),
        search_query,
    })
}

/// Validates the add-client form and persists a new directory entry.
pub fn add_client<R>(repo: &R, form: AddClientForm) -> ServiceResult<()>
where
    R: ClientWriter + ?Sized,
{
    if let Err(err) = form.validate() {
        log::error!("Failed to validate form: {err}");
        return Err(ServiceError::Form("Formulario inválido".to_string()));
    }

    let new_client = form.into_new_client();

    repo.create_clients(&[new_client]).map_err(|err| {
        log::error!("Failed to add a client: {err}");
        ServiceError::from(err)
    })?;

    Ok(())
}

/// Imports coerced spreadsheet rows, skipping duplicates in a single pass.
/// A row is a duplicate of an earlier row or an existing directory entry
/// when its key matches; the first occurrence wins.
pub fn import_clients<R>(repo: &R, rows: Vec<NewClient>) -> ServiceResult<ImportStats>
where
    R: ClientReader + ClientWriter + ?Sized,
{
    let (_, existing) = repo
        .list_clients(ClientListQuery::new())
        .map_err(ServiceError::from)?;

    let mut seen: HashSet<String> = existing
        .into_iter()
        .map(|client| NewClient::new(client.record).dedup_key())
        .collect();

    let mut stats = ImportStats::default();
    let mut fresh = Vec::new();
    for row in rows {
        if seen.insert(row.dedup_key()) {
            fresh.push(row);
        } else {
            stats.skipped += 1;
        }
    }

    if !fresh.is_empty() {
        stats.imported = repo.create_clients(&fresh).map_err(|err| {
            log::error!("Failed to add clients: {err}");
            ServiceError::from(err)
        })?;
    }

    Ok(stats)
}
