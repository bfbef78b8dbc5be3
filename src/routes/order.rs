use actix_web::http::header::{ContentDisposition, DispositionParam, DispositionType};
use actix_web::{HttpResponse, Responder, get, post, web};
use actix_web_flash_messages::IncomingFlashMessages;
use log::error;
use serde_json::json;
use tera::Tera;

use crate::dto::main::OrdersQuery;
use crate::dto::order::OrderPayload;
use crate::models::config::ServerConfig;
use crate::repository::DieselRepository;
use crate::routes::{base_context, render_template};
use crate::services::order as order_service;
use crate::services::ServiceError;
use crate::sinks::document::FsDocumentStore;
use crate::sinks::email::OutboxNotifier;

#[post("/order")]
pub async fn submit_order(
    payload: web::Json<OrderPayload>,
    repo: web::Data<DieselRepository>,
    documents: web::Data<FsDocumentStore>,
    server_config: web::Data<ServerConfig>,
) -> impl Responder {
    let notifier = OutboxNotifier::new(repo.get_ref().clone());

    let outcome = order_service::submit_order(
        repo.get_ref(),
        documents.get_ref(),
        &notifier,
        server_config.notifications_enabled,
        &server_config.order_recipients,
        payload.into_inner(),
    );

    match outcome {
        Ok(outcome) => {
            let mut response = HttpResponse::Ok();
            response.content_type("application/pdf");
            response.insert_header(ContentDisposition {
                disposition: DispositionType::Attachment,
                parameters: vec![DispositionParam::Filename(
                    outcome.rendered.file_name.clone(),
                )],
            });
            if let Some(document) = &outcome.document {
                response.insert_header(("X-Document-Url", document.url.as_str()));
                response.insert_header(("X-Document-Id", document.id.as_str()));
            }
            response.body(outcome.rendered.bytes)
        }
        Err(err @ (ServiceError::Form(_) | ServiceError::NotFound(_))) => {
            HttpResponse::BadRequest().json(json!({ "error": err.to_string() }))
        }
        Err(err) => {
            error!("Failed to submit order: {err}");
            HttpResponse::InternalServerError()
                .json(json!({ "error": "Error al generar el pedido. Por favor intente de nuevo." }))
        }
    }
}

#[get("/orders")]
pub async fn show_orders(
    params: web::Query<OrdersQuery>,
    repo: web::Data<DieselRepository>,
    flash_messages: IncomingFlashMessages,
    tera: web::Data<Tera>,
) -> impl Responder {
    let page = match order_service::load_ledger(repo.get_ref(), params.into_inner()) {
        Ok(page) => page,
        Err(e) => {
            error!("Failed to list orders: {e}");
            return HttpResponse::InternalServerError().finish();
        }
    };

    let mut context = base_context(&flash_messages, "orders");
    context.insert("orders", &page.orders);

    render_template(&tera, "orders/index.html", &context)
}
