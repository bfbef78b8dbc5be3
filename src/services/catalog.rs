use crate::domain::product::{NewProduct, Product};
use crate::dto::main::{BrandGroup, CatalogPageData, IndexQuery};
use crate::repository::{ProductListQuery, ProductReader, ProductWriter};
use crate::services::{ServiceError, ServiceResult};

/// Loads the catalog for the index page: filtered product groups plus the
/// full brand list for the filter chips. The catalog is drained in one call;
/// no partial-page state leaks to the order flow.
pub fn load_catalog<R>(repo: &R, query: IndexQuery) -> ServiceResult<CatalogPageData>
where
    R: ProductReader + ?Sized,
{
    let search_query = query
        .q
        .map(|s| s.trim().to_string())
        .filter(|s| !s.is_empty());
    let selected_brand = query.brand.filter(|s| !s.is_empty());

    let (_, all_products) = repo
        .list_products(ProductListQuery::new())
        .map_err(ServiceError::from)?;
    let brands = brand_counts(&all_products);

    let mut list_query = ProductListQuery::new();
    if let Some(term) = &search_query {
        list_query = list_query.search(term.clone());
    }
    if let Some(brand) = &selected_brand {
        list_query = list_query.brand(brand.clone());
    }

    let (total, products) = repo.list_products(list_query).map_err(ServiceError::from)?;

    Ok(CatalogPageData {
        groups: group_by_brand(products),
        brands,
        total,
        search_query,
        selected_brand,
    })
}

/// Upserts a batch of catalog rows, returning the number written.
pub fn import_products<R>(repo: &R, products: &[NewProduct]) -> ServiceResult<usize>
where
    R: ProductWriter + ?Sized,
{
    repo.upsert_products(products).map_err(|err| {
        log::error!("Failed to upsert products: {err}");
        ServiceError::from(err)
    })
}

fn brand_counts(products: &[Product]) -> Vec<(String, usize)> {
    let mut counts: Vec<(String, usize)> = Vec::new();
    for product in products {
        match counts.iter_mut().find(|(brand, _)| brand == &product.brand) {
            Some((_, count)) => *count += 1,
            None => counts.push((product.brand.clone(), 1)),
        }
    }
    counts.sort_by(|a, b| a.0.to_lowercase().cmp(&b.0.to_lowercase()));
    counts
}

/// Splits an already brand-ordered product list into per-brand groups.
fn group_by_brand(products: Vec<Product>) -> Vec<BrandGroup> {
    let mut groups: Vec<BrandGroup> = Vec::new();
    for product in products {
        match groups.last_mut() {
            Some(group) if group.brand == product.brand => group.products.push(product),
            _ => groups.push(BrandGroup {
                brand: product.brand.clone(),
                products: vec![product],
            }),
        }
    }
    groups
}
