use actix_web::{HttpResponse, Responder, get, web};
use log::error;
use serde::Deserialize;

use crate::repository::{DieselRepository, ProductListQuery, ProductReader};

#[derive(Deserialize)]
struct ApiV1ProductsQueryParams {
    query: Option<String>,
    brand: Option<String>,
}

#[get("/v1/products")]
pub async fn api_v1_products(
    params: web::Query<ApiV1ProductsQueryParams>,
    repo: web::Data<DieselRepository>,
) -> impl Responder {
    let mut query = ProductListQuery::new();
    if let Some(term) = params.query.as_deref().map(str::trim).filter(|s| !s.is_empty()) {
        query = query.search(term);
    }
    if let Some(brand) = params.brand.as_deref().filter(|s| !s.is_empty()) {
        query = query.brand(brand);
    }

    match repo.list_products(query) {
        Ok((_, products)) => HttpResponse::Ok().json(products),
        Err(e) => {
            error!("Failed to list products: {e}");
            HttpResponse::InternalServerError().finish()
        }
    }
}
