use chrono::{NaiveDate, NaiveDateTime};

use quickorder::domain::client::ClientRecord;
use quickorder::domain::order::{LineItem, OrderInput};
use quickorder::domain::product::Product;
use quickorder::domain::types::{PriceTier, ProductId, Quantity};
use quickorder::renderer::{self, format};

const GREEN_FILL: &str = "0.000 0.502 0.000 rg";
const BLUE_FILL: &str = "0.000 0.478 1.000 rg";

/// Items that fit on a single page together with the client panel and the
/// totals box, given the renderer's layout constants.
const SINGLE_PAGE_CAPACITY: usize = 12;

fn product(id: &str, brand: &str, name: &str, price1: f64, price2: f64) -> Product {
    Product {
        id: ProductId::new(id).unwrap(),
        name: name.into(),
        brand: brand.into(),
        description: String::new(),
        colors: vec!["Negro".into()],
        price1,
        price2,
        image_urls: vec![],
        updated_at: NaiveDateTime::default(),
    }
}

fn line(product: Product, quantity: u32, tier: PriceTier) -> LineItem {
    LineItem {
        product,
        quantity: Quantity::new(quantity).unwrap(),
        color: "Negro".into(),
        tier,
    }
}

fn order(items: Vec<LineItem>, tier: PriceTier) -> OrderInput {
    OrderInput {
        client: ClientRecord {
            company_name: "Acme".into(),
            ..ClientRecord::default()
        },
        items,
        tier,
        comment: String::new(),
    }
}

fn noon() -> NaiveDateTime {
    NaiveDate::from_ymd_opt(2026, 3, 9)
        .unwrap()
        .and_hms_opt(12, 0, 0)
        .unwrap()
}

fn text_of(bytes: &[u8]) -> String {
    String::from_utf8_lossy(bytes).into_owned()
}

fn count_occurrences(haystack: &str, needle: &str) -> usize {
    haystack.matches(needle).count()
}

#[test]
fn rows_are_sorted_by_brand_then_name_case_insensitively() {
    let items = vec![
        line(product("r1", "zeta", "lona", 10.0, 10.0), 1, PriceTier::Price1),
        line(product("r2", "Alfa", "viaje", 10.0, 10.0), 1, PriceTier::Price1),
        line(product("r3", "alfa", "bolso", 10.0, 10.0), 1, PriceTier::Price1),
        line(product("r4", "Beta", "morral", 10.0, 10.0), 1, PriceTier::Price1),
    ];
    let rendered = renderer::render_at(&order(items, PriceTier::Price1), noon()).unwrap();
    let text = text_of(&rendered.bytes);

    let bolso = text.find("bolso").unwrap();
    let viaje = text.find("viaje").unwrap();
    let morral = text.find("morral").unwrap();
    let lona = text.find("lona").unwrap();
    assert!(bolso < viaje, "alfa/bolso must precede Alfa/viaje");
    assert!(viaje < morral, "Alfa must precede Beta");
    assert!(morral < lona, "Beta must precede zeta");
}

#[test]
fn row_order_is_independent_of_insertion_order() {
    let forward = vec![
        line(product("r1", "Alfa", "bolso", 10.0, 10.0), 1, PriceTier::Price1),
        line(product("r2", "Beta", "morral", 10.0, 10.0), 1, PriceTier::Price1),
    ];
    let mut reversed = forward.clone();
    reversed.reverse();

    let a = renderer::render_at(&order(forward, PriceTier::Price1), noon()).unwrap();
    let b = renderer::render_at(&order(reversed, PriceTier::Price1), noon()).unwrap();
    assert_eq!(a.bytes, b.bytes);
}

#[test]
fn grand_total_sums_rounded_subtotals() {
    // Exact subtotals 100.4 and 200.4: rounded-then-summed gives 300,
    // summed-then-rounded would give 301.
    let items = vec![
        line(product("r1", "A", "a", 100.4, 0.0), 1, PriceTier::Price1),
        line(product("r2", "B", "b", 200.4, 0.0), 1, PriceTier::Price1),
    ];
    let rendered = renderer::render_at(&order(items, PriceTier::Price1), noon()).unwrap();
    assert_eq!(rendered.total, 300);
    assert_ne!(rendered.total, format::round_amount(100.4 + 200.4));
}

#[test]
fn unit_price_and_subtotal_round_independently() {
    // Unit 10.6 displays as 11, yet the subtotal for 3 units is
    // round(31.8) = 32, not 11 * 3.
    let items = vec![line(product("r1", "A", "a", 10.6, 0.0), 3, PriceTier::Price1)];
    let rendered = renderer::render_at(&order(items, PriceTier::Price1), noon()).unwrap();
    let text = text_of(&rendered.bytes);

    assert!(text.contains("($11) Tj"));
    assert!(text.contains("($32) Tj"));
    assert_eq!(rendered.total, 32);
}

#[test]
fn item_count_is_the_exact_sum_of_quantities() {
    let items = vec![
        line(product("r1", "A", "a", 10.9, 0.0), 7, PriceTier::Price1),
        line(product("r2", "B", "b", 10.1, 0.0), 5, PriceTier::Price1),
    ];
    let rendered = renderer::render_at(&order(items, PriceTier::Price1), noon()).unwrap();
    assert_eq!(rendered.item_count, 12);
    let text = text_of(&rendered.bytes);
    assert!(text.contains("(12) Tj"));
}

#[test]
fn currency_cells_use_dot_grouping() {
    let items = vec![line(
        product("r1", "A", "a", 1234567.0, 0.0),
        1,
        PriceTier::Price1,
    )];
    let rendered = renderer::render_at(&order(items, PriceTier::Price1), noon()).unwrap();
    let text = text_of(&rendered.bytes);

    // Unit price, subtotal and grand total all carry the grouped figure.
    assert_eq!(count_occurrences(&text, "($1.234.567) Tj"), 3);
    assert_eq!(rendered.total, 1234567);
}

#[test]
fn formatting_is_a_pure_function() {
    assert_eq!(format::currency(1234567.0), "1.234.567");
    assert_eq!(format::currency(1234567.0), format::currency(1234567.0));
}

#[test]
fn full_page_stays_on_one_page_and_one_more_overflows() {
    let full: Vec<LineItem> = (0..SINGLE_PAGE_CAPACITY)
        .map(|i| {
            line(
                product(&format!("r{i}"), "Marca", &format!("prod{i:02}"), 10.0, 10.0),
                1,
                PriceTier::Price1,
            )
        })
        .collect();

    let rendered = renderer::render_at(&order(full.clone(), PriceTier::Price1), noon()).unwrap();
    assert_eq!(rendered.page_count, 1);
    assert_eq!(
        count_occurrences(&text_of(&rendered.bytes), "DISTRINARANJOS"),
        1
    );

    let mut overflowing = full;
    overflowing.push(line(
        product("extra", "Marca", "prod99", 10.0, 10.0),
        1,
        PriceTier::Price1,
    ));
    let rendered =
        renderer::render_at(&order(overflowing, PriceTier::Price1), noon()).unwrap();
    assert_eq!(rendered.page_count, 2);
    // The header is redrawn on the continuation page.
    let text = text_of(&rendered.bytes);
    assert_eq!(count_occurrences(&text, "DISTRINARANJOS"), 2);
    assert!(text.contains("/Count 2"));
}

#[test]
fn empty_item_list_renders_a_single_page_draft() {
    let rendered = renderer::render_at(&order(vec![], PriceTier::Price2), noon()).unwrap();
    assert_eq!(rendered.page_count, 1);
    assert_eq!(rendered.total, 0);
    assert_eq!(rendered.item_count, 0);

    let text = text_of(&rendered.bytes);
    assert!(text.starts_with("%PDF-1.4"));
    assert!(text.contains("Total Cantidad:"));
    assert!(text.contains("($0) Tj"));
}

#[test]
fn tier_selection_changes_figures_and_accent_only() {
    let build = |tier| {
        order(
            vec![
                line(product("r1", "A", "a", 1000.0, 2000.0), 2, tier),
                line(product("r2", "B", "b", 500.0, 700.0), 1, tier),
            ],
            tier,
        )
    };

    let tier1 = renderer::render_at(&build(PriceTier::Price1), noon()).unwrap();
    let tier2 = renderer::render_at(&build(PriceTier::Price2), noon()).unwrap();

    assert_eq!(tier1.total, 2500);
    assert_eq!(tier2.total, 4700);
    assert_eq!(tier1.item_count, tier2.item_count);

    let text1 = text_of(&tier1.bytes);
    let text2 = text_of(&tier2.bytes);

    assert!(text1.contains(GREEN_FILL));
    assert!(!text1.contains(BLUE_FILL));
    assert!(text2.contains(BLUE_FILL));
    assert!(!text2.contains(GREEN_FILL));

    // Same row ordering under both tiers.
    let order1 = (text1.find("(A \\(a\\))").unwrap(), text1.find("(B \\(b\\))").unwrap());
    let order2 = (text2.find("(A \\(a\\))").unwrap(), text2.find("(B \\(b\\))").unwrap());
    assert!(order1.0 < order1.1);
    assert!(order2.0 < order2.1);
}
