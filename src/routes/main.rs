use actix_multipart::form::MultipartForm;
use actix_web::{Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use log::error;
use tera::Tera;

use crate::dto::main::IndexQuery;
use crate::forms::products::UploadProductsForm;
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::catalog as catalog_service;

#[get("/")]
pub async fn show_index(
    params: web::Query<IndexQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let mut context = base_context(&flash_messages, "index");

    match catalog_service::load_catalog(repo.get_ref(), params.into_inner()) {
        Ok(page) => {
            context.insert("groups", &page.groups);
            context.insert("brands", &page.brands);
            context.insert("total", &page.total);
            if let Some(term) = &page.search_query {
                context.insert("search_query", term);
            }
            if let Some(brand) = &page.selected_brand {
                context.insert("selected_brand", brand);
            }
        }
        Err(e) => {
            // No automatic retry: the page shows the failure and a manual
            // reload affordance.
            error!("Failed to load catalog: {e}");
            context.insert("catalog_error", &true);
        }
    }

    render_template(&tera, "main/index.html", &context)
}

#[post("/products/upload")]
pub async fn products_upload(
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadProductsForm>,
) -> impl Responder {
    let products = match form.parse() {
        Ok(products) => products,
        Err(err) => {
            FlashMessage::error(format!("Error al leer el catálogo: {err}")).send();
            return redirect("/");
        }
    };

    match catalog_service::import_products(repo.get_ref(), &products) {
        Ok(written) => {
            FlashMessage::success(format!("Catálogo actualizado: {written} productos.")).send();
        }
        Err(err) => {
            error!("Failed to import products: {err}");
            FlashMessage::error("Error al actualizar el catálogo".to_string()).send();
        }
    }

    redirect("/")
}
