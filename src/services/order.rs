use chrono::Utc;

use crate::domain::client::ClientRecord;
use crate::domain::notification::{EmailAttachment, EmailMessage};
use crate::domain::order::{LineItem, NewOrderRecord, OrderInput};
use crate::domain::types::{PriceTier, ProductId, Quantity};
use crate::dto::main::{OrdersPageData, OrdersQuery};
use crate::dto::order::OrderPayload;
use crate::pagination::Paginated;
use crate::renderer::{self, RenderedOrder, format};
use crate::repository::{OrderListQuery, OrderReader, OrderWriter, ProductReader};
use crate::routes::DEFAULT_ITEMS_PER_PAGE;
use crate::sinks::{DocumentStore, NotificationSink, StoredDocument};
use crate::services::{ServiceError, ServiceResult};

/// What the submission handler gets back: the rendered document always, the
/// stored-document handle and ledger id only when those sinks succeeded.
#[derive(Debug)]
pub struct OrderOutcome {
    pub rendered: RenderedOrder,
    pub document: Option<StoredDocument>,
    pub order_id: Option<i32>,
}

/// Runs the full submission flow: resolve cart lines against the catalog,
/// render the document, then drive the sinks best-effort. Sink failures are
/// logged and never unwind the completed render; the ledger is only written
/// when the document store succeeded.
pub fn submit_order<R, D, N>(
    repo: &R,
    documents: &D,
    notifier: &N,
    notifications_enabled: bool,
    recipients: &[String],
    payload: OrderPayload,
) -> ServiceResult<OrderOutcome>
where
    R: ProductReader + OrderWriter + ?Sized,
    D: DocumentStore + ?Sized,
    N: NotificationSink + ?Sized,
{
    let order = resolve_order(repo, payload)?;
    let rendered = renderer::render(&order)?;

    let document = match documents.store(&rendered.bytes, &rendered.file_name) {
        Ok(stored) => Some(stored),
        Err(err) => {
            log::error!("Failed to store order document: {err}");
            None
        }
    };

    let order_id = document.as_ref().and_then(|stored| {
        let record = NewOrderRecord {
            client_name: order.client.display_name().to_string(),
            details: order_details(&order.client, order.tier, rendered.total, &order.comment),
            document_url: stored.url.clone(),
            document_name: rendered.file_name.clone(),
            delivered_to: recipients.to_vec(),
            read_by: Vec::new(),
            total: rendered.total,
            item_count: rendered.item_count as i32,
            created_at: Utc::now().naive_utc(),
        };
        match repo.create_order(&record) {
            Ok(created) => Some(created.id),
            Err(err) => {
                log::error!("Failed to append order ledger record: {err}");
                None
            }
        }
    });

    if notifications_enabled {
        let message = notification_email(&order, &rendered, document.as_ref(), recipients);
        if let Err(err) = notifier.send(&message) {
            log::error!("Failed to queue order notification: {err}");
        }
    }

    Ok(OrderOutcome {
        rendered,
        document,
        order_id,
    })
}

/// Loads the order ledger for the `/orders` page.
pub fn load_ledger<R>(repo: &R, query: OrdersQuery) -> ServiceResult<OrdersPageData>
where
    R: OrderReader + ?Sized,
{
    let page = query.page.unwrap_or(1);
    let (total, orders) = repo
        .list_orders(OrderListQuery::new().paginate(page, DEFAULT_ITEMS_PER_PAGE))
        .map_err(ServiceError::from)?;
    let total_pages = total.div_ceil(DEFAULT_ITEMS_PER_PAGE);

    Ok(OrdersPageData {
        orders: Paginated::new(orders, page, total_pages),
    })
}

/// Resolves payload lines against the catalog. Unknown products and zero
/// quantities reject the whole submission before anything is rendered.
fn resolve_order<R>(repo: &R, payload: OrderPayload) -> ServiceResult<OrderInput>
where
    R: ProductReader + ?Sized,
{
    let mut items = Vec::with_capacity(payload.items.len());
    for item in &payload.items {
        let id = ProductId::new(item.product_id.as_str())
            .map_err(|_| ServiceError::Form("Referencia de producto vacía".to_string()))?;
        let quantity = Quantity::new(item.quantity)
            .map_err(|_| ServiceError::Form("La cantidad debe ser mayor que cero".to_string()))?;
        let product = repo
            .get_product_by_id(&id)?
            .ok_or_else(|| ServiceError::NotFound(format!("producto {id}")))?;

        items.push(LineItem {
            product,
            quantity,
            color: item.color.trim().to_string(),
            tier: item.price_tier.unwrap_or(payload.price_tier),
        });
    }

    Ok(OrderInput {
        client: payload.client.into(),
        items,
        tier: payload.price_tier,
        comment: payload.comment,
    })
}

/// Human-readable one-liner stored in the ledger.
pub fn order_details(client: &ClientRecord, tier: PriceTier, total: i64, comment: &str) -> String {
    let company = if client.company_name.is_empty() {
        "N/A"
    } else {
        &client.company_name
    };
    let comment = if comment.trim().is_empty() {
        "N/A"
    } else {
        comment
    };
    format!(
        "Cliente: {company} | Total: {} | Tipo: {} | Comentario: {comment}",
        format::group_thousands(total),
        tier.label()
    )
}

fn notification_email(
    order: &OrderInput,
    rendered: &RenderedOrder,
    document: Option<&StoredDocument>,
    recipients: &[String],
) -> EmailMessage {
    let client_name = tera::escape_html(order.client.display_name());
    let mut body = format!(
        "<h2>Nuevo pedido de {client_name}</h2>\
         <p>Tipo: {} &middot; Artículos: {} &middot; Total: ${}</p>",
        order.tier.label(),
        rendered.item_count,
        format::group_thousands(rendered.total),
    );
    if !order.comment.trim().is_empty() {
        // Strip any markup before the comment lands in an HTML body.
        body.push_str(&format!(
            "<p>Comentario: {}</p>",
            ammonia::clean(&order.comment)
        ));
    }
    if let Some(stored) = document {
        let url = tera::escape_html(&stored.url);
        body.push_str(&format!("<p><a href=\"{url}\">Descargar PDF</a></p>"));
    }

    EmailMessage {
        recipients: recipients.to_vec(),
        subject: format!("Nuevo pedido de {}", order.client.display_name()),
        html_body: body,
        attachment: Some(EmailAttachment {
            file_name: rendered.file_name.clone(),
            bytes: rendered.bytes.clone(),
        }),
    }
}
