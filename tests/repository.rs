use chrono::Utc;

use quickorder::domain::client::{ClientRecord, NewClient};
use quickorder::domain::notification::{EmailAttachment, EmailMessage};
use quickorder::domain::order::NewOrderRecord;
use quickorder::domain::product::NewProduct;
use quickorder::domain::types::ProductId;
use quickorder::repository::{
    ClientListQuery, ClientReader, ClientWriter, DieselRepository, OrderListQuery, OrderReader,
    OrderWriter, OutboxReader, OutboxWriter, ProductListQuery, ProductReader, ProductWriter,
};

mod common;

fn new_product(id: &str, brand: &str, name: &str, price1: f64, price2: f64) -> NewProduct {
    NewProduct::new(
        ProductId::new(id).unwrap(),
        name.to_string(),
        brand.to_string(),
        format!("{name} de {brand}"),
        vec!["Negro".into(), "Azul".into()],
        price1,
        price2,
        vec![],
    )
}

#[test]
fn test_product_repository_upsert_and_list() {
    let test_db = common::TestDb::new("test_product_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let batch = vec![
        new_product("rec1", "Cumbre", "Bolso", 50000.0, 45000.0),
        new_product("rec2", "Andino", "Morral", 89500.0, 79500.0),
    ];
    assert_eq!(repo.upsert_products(&batch).unwrap(), 2);

    // Listing is ordered by brand then name.
    let (total, products) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(products[0].brand, "Andino");
    assert_eq!(products[1].brand, "Cumbre");
    assert_eq!(products[0].colors, vec!["Negro", "Azul"]);

    // Upserting the same id refreshes the row instead of duplicating it.
    let updated = vec![new_product("rec2", "Andino", "Morral", 99000.0, 89000.0)];
    repo.upsert_products(&updated).unwrap();
    let (total, _) = repo.list_products(ProductListQuery::new()).unwrap();
    assert_eq!(total, 2);

    let morral = repo
        .get_product_by_id(&ProductId::new("rec2").unwrap())
        .unwrap()
        .unwrap();
    assert_eq!(morral.price1, 99000.0);

    assert!(
        repo.get_product_by_id(&ProductId::new("missing").unwrap())
            .unwrap()
            .is_none()
    );
}

#[test]
fn test_product_repository_search_and_filter() {
    let test_db = common::TestDb::new("test_product_search.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    repo.upsert_products(&[
        new_product("rec1", "Cumbre", "Bolso", 1.0, 1.0),
        new_product("rec2", "Andino", "Morral", 1.0, 1.0),
        new_product("rec3", "Andino", "Canguro", 1.0, 1.0),
    ])
    .unwrap();

    let (total, items) = repo
        .list_products(ProductListQuery::new().search("Morral"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].name, "Morral");

    let (total, items) = repo
        .list_products(ProductListQuery::new().brand("Andino"))
        .unwrap();
    assert_eq!(total, 2);
    assert!(items.iter().all(|p| p.brand == "Andino"));

    let (total, page) = repo
        .list_products(ProductListQuery::new().paginate(1, 2))
        .unwrap();
    assert_eq!(total, 3);
    assert_eq!(page.len(), 2);
}

#[test]
fn test_client_repository_create_and_search() {
    let test_db = common::TestDb::new("test_client_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let clients = vec![
        NewClient::new(ClientRecord {
            company_name: "Acme".into(),
            identification: "900123".into(),
            name: "Ana".into(),
            surname: "Mora".into(),
            phone: "555".into(),
            city: "Medellín".into(),
            ..ClientRecord::default()
        }),
        NewClient::new(ClientRecord {
            company_name: "Beta".into(),
            name: "Luis".into(),
            ..ClientRecord::default()
        }),
    ];
    assert_eq!(repo.create_clients(&clients).unwrap(), 2);

    let (total, items) = repo.list_clients(ClientListQuery::new()).unwrap();
    assert_eq!(total, 2);
    assert_eq!(items[0].record.company_name, "Acme");

    let fetched = repo.get_client_by_id(items[0].id).unwrap().unwrap();
    assert_eq!(fetched.record.identification, "900123");

    let (total, items) = repo
        .list_clients(ClientListQuery::new().search("Luis"))
        .unwrap();
    assert_eq!(total, 1);
    assert_eq!(items[0].record.company_name, "Beta");

    let (total, _) = repo
        .list_clients(ClientListQuery::new().search("nadie"))
        .unwrap();
    assert_eq!(total, 0);
}

#[test]
fn test_order_repository_append_and_list() {
    let test_db = common::TestDb::new("test_order_repository.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let record = NewOrderRecord {
        client_name: "Acme".into(),
        details: "Cliente: Acme | Total: 45.000 | Tipo: Precio 2 | Comentario: N/A".into(),
        document_url: "http://localhost/docs/abc.pdf".into(),
        document_name: "Acme - 01.01.2026_10.00.pdf".into(),
        delivered_to: vec!["pedidos@example.com".into()],
        read_by: vec![],
        total: 45000,
        item_count: 3,
        created_at: Utc::now().naive_utc(),
    };

    let created = repo.create_order(&record).unwrap();
    assert_eq!(created.client_name, "Acme");
    assert_eq!(created.delivered_to, vec!["pedidos@example.com"]);
    assert_eq!(created.total, 45000);

    let (total, orders) = repo.list_orders(OrderListQuery::new()).unwrap();
    assert_eq!(total, 1);
    assert_eq!(orders[0].id, created.id);
    assert_eq!(orders[0].read_by, Vec::<String>::new());
}

#[test]
fn test_outbox_roundtrip() {
    let test_db = common::TestDb::new("test_outbox.db");
    let repo = DieselRepository::new(test_db.pool().clone());

    let message = EmailMessage {
        recipients: vec!["pedidos@example.com".into()],
        subject: "Nuevo pedido de Acme".into(),
        html_body: "<h2>Nuevo pedido</h2>".into(),
        attachment: Some(EmailAttachment {
            file_name: "Acme - 01.01.2026_10.00.pdf".into(),
            bytes: b"%PDF-1.4".to_vec(),
        }),
    };

    let id = repo.enqueue_email(&message).unwrap();
    assert!(id > 0);

    let pending = repo.list_pending_emails().unwrap();
    assert_eq!(pending.len(), 1);
    assert_eq!(pending[0].message, message);
    assert!(pending[0].sent_at.is_none());
}
