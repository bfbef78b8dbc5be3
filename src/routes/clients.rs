use actix_multipart::form::MultipartForm;
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::{FlashMessage, IncomingFlashMessages};
use log::error;
use tera::Tera;

use crate::dto::main::ClientsQuery;
use crate::forms::clients::{AddClientForm, UploadClientsForm};
use crate::repository::DieselRepository;
use crate::routes::{base_context, redirect, render_template};
use crate::services::clients as client_service;
use crate::services::ServiceError;

#[get("/clients")]
pub async fn show_clients(
    params: web::Query<ClientsQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = match client_service::load_directory(repo.get_ref(), params.into_inner()) {
        Ok(page) => page,
        Err(e) => {
            error!("Failed to list clients: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "clients");
    context.insert("clients", &page.clients);
    if let Some(term) = &page.search_query {
        context.insert("search_query", term);
    }

    render_template(&tera, "clients/index.html", &context)
}

#[post("/client/add")]
pub async fn add_client(
    repo: web::Data<DieselRepository>,
    web::Form(form): web::Form<AddClientForm>,
) -> impl Responder {
    match client_service::add_client(repo.get_ref(), form) {
        Ok(()) => {
            FlashMessage::success("Cliente agregado.".to_string()).send();
        }
        Err(ServiceError::Form(message)) => {
            FlashMessage::error(message).send();
        }
        Err(err) => {
            error!("Failed to add a client: {err}");
            FlashMessage::error("Error al agregar el cliente".to_string()).send();
        }
    }
    redirect("/clients")
}

#[post("/clients/upload")]
pub async fn clients_upload(
    repo: web::Data<DieselRepository>,
    MultipartForm(form): MultipartForm<UploadClientsForm>,
) -> impl Responder {
    let rows = match form.parse() {
        Ok(rows) => rows,
        Err(err) => {
            FlashMessage::error(format!("Error al leer el archivo: {err}")).send();
            return redirect("/clients");
        }
    };

    match client_service::import_clients(repo.get_ref(), rows) {
        Ok(stats) => {
            FlashMessage::success(format!(
                "Clientes importados: {}, omitidos: {}.",
                stats.imported, stats.skipped
            ))
            .send();
        }
        Err(err) => {
            error!("Failed to import clients: {err}");
            FlashMessage::error("Error al importar clientes".to_string()).send();
        }
    }

    redirect("/clients")
}
