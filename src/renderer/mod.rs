//! Order document renderer.
//!
//! Turns a client record, a list of cart lines and a free-text comment into
//! a paginated PDF order document plus a suggested file name. Layout is a
//! greedy, single-pass affair: a vertical cursor walks down the page and any
//! block that would cross the bottom content limit opens a new page with a
//! redrawn header. Committed blocks never move.

pub mod format;
mod writer;

use chrono::{Local, NaiveDateTime};
use thiserror::Error;

use crate::domain::client::{ClientRecord, DEFAULT_CLIENT_NAME};
use crate::domain::order::{LineItem, OrderInput};
use crate::domain::types::PriceTier;
use crate::renderer::writer::{Font, PdfWriter, Rgb};

// Letter-size page, 72 pt per inch.
const PAGE_WIDTH: f64 = 612.0;
const PAGE_HEIGHT: f64 = 792.0;
const MARGIN: f64 = 50.0;
/// Blocks may not start below this line; crossing it opens a new page.
const CONTENT_BOTTOM: f64 = PAGE_HEIGHT - 100.0;
/// Cursor position right below a freshly drawn page header.
const TOP_OF_CONTENT: f64 = 95.0;

const CLIENT_PANEL_REQUIRED: f64 = 150.0;
const CLIENT_PANEL_HEIGHT: f64 = 140.0;
const CLIENT_PANEL_ADVANCE: f64 = 170.0;
const TABLE_HEADER_REQUIRED: f64 = 50.0;
const TABLE_HEADER_HEIGHT: f64 = 30.0;
const TABLE_HEADER_ADVANCE: f64 = 40.0;
const ROW_HEIGHT: f64 = 25.0;
const TOTALS_REQUIRED: f64 = 80.0;
const TOTALS_BOX_WIDTH: f64 = 200.0;
const TOTALS_BOX_HEIGHT: f64 = 55.0;

const COMPANY_TITLE: &str = "DISTRINARANJOS S.A.S.";

const INK: Rgb = Rgb::new(51, 51, 51);
const HEADER_GRAY: Rgb = Rgb::new(77, 77, 77);
const LABEL_GRAY: Rgb = Rgb::new(100, 100, 100);
const PANEL_FILL: Rgb = Rgb::new(245, 245, 245);
const TOTALS_FILL: Rgb = Rgb::new(240, 240, 240);
const BORDER: Rgb = Rgb::new(200, 200, 200);
const BLACK: Rgb = Rgb::new(0, 0, 0);
const RED: Rgb = Rgb::new(255, 0, 0);
const DATE_BROWN: Rgb = Rgb::new(128, 80, 0);
const PHONE_BLUE: Rgb = Rgb::new(0, 122, 255);
/// Accent for figures priced at tier 1.
const TIER1_ACCENT: Rgb = Rgb::new(0, 128, 0);
/// Accent for figures priced at tier 2.
const TIER2_ACCENT: Rgb = Rgb::new(0, 122, 255);

/// Table column left edges: reference, color, quantity, price, subtotal.
const COLUMN_X: [f64; 5] = [
    MARGIN + 10.0,
    MARGIN + 220.0,
    MARGIN + 300.0,
    MARGIN + 380.0,
    MARGIN + 460.0,
];

/// Rendering failed outright; no partial output is produced.
#[derive(Debug, Error)]
pub enum RenderError {
    #[error("color {color:?} is not offered by product {product}")]
    UnknownColor { product: String, color: String },
    #[error("product {0} carries a non-finite price")]
    InvalidPrice(String),
}

/// Finished document plus the figures computed while laying it out.
#[derive(Clone, Debug)]
pub struct RenderedOrder {
    pub bytes: Vec<u8>,
    pub file_name: String,
    /// Sum of per-line subtotals, each rounded before summing.
    pub total: i64,
    /// Exact sum of quantities.
    pub item_count: u32,
    pub page_count: usize,
}

const fn tier_accent(tier: PriceTier) -> Rgb {
    match tier {
        PriceTier::Price1 => TIER1_ACCENT,
        PriceTier::Price2 => TIER2_ACCENT,
    }
}

/// Renders an order using the current local time for the document date and
/// the generated file name.
pub fn render(order: &OrderInput) -> Result<RenderedOrder, RenderError> {
    render_at(order, Local::now().naive_local())
}

/// Renders an order with a caller-supplied timestamp.
pub fn render_at(
    order: &OrderInput,
    rendered_at: NaiveDateTime,
) -> Result<RenderedOrder, RenderError> {
    for item in &order.items {
        if !item.unit_price().is_finite() {
            return Err(RenderError::InvalidPrice(item.product.id.to_string()));
        }
        if !item.color.is_empty() && !item.product.colors.contains(&item.color) {
            return Err(RenderError::UnknownColor {
                product: item.product.id.to_string(),
                color: item.color.clone(),
            });
        }
    }

    // Presentation order: brand then name, case-insensitive, stable.
    let mut sorted: Vec<&LineItem> = order.items.iter().collect();
    sorted.sort_by(|a, b| {
        let brand = a
            .product
            .brand
            .to_lowercase()
            .cmp(&b.product.brand.to_lowercase());
        brand.then_with(|| {
            a.product
                .name
                .to_lowercase()
                .cmp(&b.product.name.to_lowercase())
        })
    });

    let total: i64 = sorted
        .iter()
        .map(|item| format::round_amount(item.unit_price() * f64::from(item.quantity.get())))
        .sum();
    let item_count: u32 = sorted.iter().map(|item| item.quantity.get()).sum();

    let mut page = Painter::new(rendered_at);
    page.header();
    page.client_panel(&order.client, &order.comment);
    page.table_header();
    let mut shaded = false;
    for item in &sorted {
        page.row(item, shaded);
        shaded = !shaded;
    }
    page.totals_box(order.tier, total, item_count);

    let file_name = file_name(&order.client, rendered_at);
    let title = file_name.trim_end_matches(".pdf").to_string();
    let page_count = page.writer.page_count();
    let bytes = page.writer.finish(&title, rendered_at);

    Ok(RenderedOrder {
        bytes,
        file_name,
        total,
        item_count,
        page_count,
    })
}

/// `{company or placeholder} - {DD}.{MM}.{YYYY}_{HH}.{MM}.pdf`. Two orders
/// for the same company within one minute produce the same name; stored
/// documents stay distinct because the document store keys by id.
fn file_name(client: &ClientRecord, rendered_at: NaiveDateTime) -> String {
    let company = if client.company_name.is_empty() {
        DEFAULT_CLIENT_NAME
    } else {
        &client.company_name
    };
    format!("{company} - {}.pdf", rendered_at.format("%d.%m.%Y_%H.%M"))
}

/// Approximate advance width of Helvetica text, used for right alignment.
fn text_width(text: &str, size: f64) -> f64 {
    text.chars().count() as f64 * size * 0.5
}

struct Painter {
    writer: PdfWriter,
    y: f64,
    rendered_at: NaiveDateTime,
}

impl Painter {
    fn new(rendered_at: NaiveDateTime) -> Self {
        let mut writer = PdfWriter::new(PAGE_WIDTH, PAGE_HEIGHT);
        writer.begin_page();
        Self {
            writer,
            y: 0.0,
            rendered_at,
        }
    }

    /// Opens a new page (with a redrawn header) when the next block would
    /// cross the bottom content limit.
    fn ensure_room(&mut self, required: f64) {
        if self.y + required > CONTENT_BOTTOM {
            self.writer.begin_page();
            self.header();
        }
    }

    fn header(&mut self) {
        let y = 15.0;
        self.writer
            .text(MARGIN + 10.0, y + 20.0, 14.0, Font::Bold, INK, COMPANY_TITLE);

        let order_label = "Pedido";
        self.writer.text(
            PAGE_WIDTH - MARGIN - text_width(order_label, 11.0),
            y + 20.0,
            11.0,
            Font::Bold,
            HEADER_GRAY,
            order_label,
        );

        let invoice = format!("INV-{}-001", self.rendered_at.format("%Y%m%d"));
        self.writer.text(
            PAGE_WIDTH - MARGIN - text_width(&invoice, 9.0),
            y + 35.0,
            9.0,
            Font::Regular,
            HEADER_GRAY,
            &invoice,
        );

        let date = self.rendered_at.format("%d/%m/%Y").to_string();
        self.writer.text(
            PAGE_WIDTH - MARGIN - text_width(&date, 8.0),
            y + 50.0,
            8.0,
            Font::Regular,
            DATE_BROWN,
            &date,
        );

        let time = self.rendered_at.format("%H:%M").to_string();
        self.writer.text(
            PAGE_WIDTH - MARGIN - text_width(&time, 8.0),
            y + 65.0,
            8.0,
            Font::Regular,
            DATE_BROWN,
            &time,
        );

        self.writer
            .line(MARGIN, 85.0, PAGE_WIDTH - MARGIN, 85.0, BORDER);
        self.y = TOP_OF_CONTENT;
    }

    fn client_panel(&mut self, client: &ClientRecord, comment: &str) {
        self.ensure_room(CLIENT_PANEL_REQUIRED);
        let y = self.y;

        let panel_width = PAGE_WIDTH - MARGIN * 2.0 - 20.0;
        let client_width = panel_width * 0.6;
        let comment_width = panel_width * 0.4;
        let comment_x = MARGIN + client_width + 20.0;

        self.writer
            .fill_rect(MARGIN, y, client_width, CLIENT_PANEL_HEIGHT, PANEL_FILL);
        self.writer
            .stroke_rect(MARGIN, y, client_width, CLIENT_PANEL_HEIGHT, BORDER);
        self.writer
            .text(MARGIN + 10.0, y + 15.0, 12.0, Font::Bold, BLACK, "CLIENTE:");

        // Fixed slots; empty fields are skipped but keep their position.
        if !client.company_name.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 35.0,
                10.0,
                Font::Bold,
                RED,
                &client.company_name,
            );
        }
        if !client.identification.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 50.0,
                10.0,
                Font::Regular,
                LABEL_GRAY,
                &client.identification,
            );
        }
        let full_name = client.full_name();
        if !full_name.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 65.0,
                10.0,
                Font::Regular,
                LABEL_GRAY,
                &full_name,
            );
        }
        if !client.phone.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 80.0,
                10.0,
                Font::Regular,
                PHONE_BLUE,
                &client.phone,
            );
        }
        if !client.address.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 95.0,
                10.0,
                Font::Regular,
                DATE_BROWN,
                &client.address,
            );
        }
        if !client.city.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 110.0,
                10.0,
                Font::Regular,
                DATE_BROWN,
                &client.city,
            );
        }
        if !client.department.is_empty() {
            self.writer.text(
                MARGIN + 10.0,
                y + 125.0,
                10.0,
                Font::Regular,
                DATE_BROWN,
                &client.department,
            );
        }

        self.writer
            .fill_rect(comment_x, y, comment_width, CLIENT_PANEL_HEIGHT, PANEL_FILL);
        self.writer
            .stroke_rect(comment_x, y, comment_width, CLIENT_PANEL_HEIGHT, BORDER);
        self.writer.text(
            comment_x + 10.0,
            y + 15.0,
            12.0,
            Font::Bold,
            BLACK,
            "COMENTARIO:",
        );

        if comment.trim().is_empty() {
            self.writer
                .text(comment_x + 10.0, y + 35.0, 10.0, Font::Regular, LABEL_GRAY, "N/A");
        } else {
            // Seven 15 pt slots fit inside the panel; the rest is clipped.
            for (i, line) in comment.lines().take(7).enumerate() {
                self.writer.text(
                    comment_x + 10.0,
                    y + 35.0 + 15.0 * i as f64,
                    10.0,
                    Font::Regular,
                    LABEL_GRAY,
                    line,
                );
            }
        }

        self.y += CLIENT_PANEL_ADVANCE;
    }

    fn table_header(&mut self) {
        self.ensure_room(TABLE_HEADER_REQUIRED);
        let y = self.y;

        self.writer.fill_rect(
            MARGIN,
            y,
            PAGE_WIDTH - MARGIN * 2.0,
            TABLE_HEADER_HEIGHT,
            PANEL_FILL,
        );
        self.writer
            .text(COLUMN_X[0], y + 15.0, 12.0, Font::Bold, LABEL_GRAY, "Referencia");
        self.writer
            .text(COLUMN_X[1] + 20.0, y + 15.0, 12.0, Font::Bold, LABEL_GRAY, "Color");
        self.writer
            .text(COLUMN_X[2], y + 15.0, 12.0, Font::Bold, LABEL_GRAY, "Cantidad");
        self.writer
            .text(COLUMN_X[3], y + 15.0, 12.0, Font::Bold, LABEL_GRAY, "Precio");
        self.writer
            .text(COLUMN_X[4], y + 15.0, 12.0, Font::Bold, LABEL_GRAY, "Subtotal");

        self.y += TABLE_HEADER_ADVANCE;
    }

    fn row(&mut self, item: &LineItem, shaded: bool) {
        self.ensure_room(ROW_HEIGHT);
        let y = self.y;

        if shaded {
            self.writer.fill_rect(
                MARGIN,
                y - 5.0,
                PAGE_WIDTH - MARGIN * 2.0,
                ROW_HEIGHT,
                PANEL_FILL,
            );
        }

        let reference = format!("{} ({})", item.product.brand, item.product.name);
        self.writer
            .text(COLUMN_X[0], y + 8.0, 9.0, Font::Regular, BLACK, &reference);
        self.writer
            .text(COLUMN_X[1] + 20.0, y + 8.0, 9.0, Font::Regular, BLACK, &item.color);
        self.writer.text(
            COLUMN_X[2] + 20.0,
            y + 8.0,
            9.0,
            Font::Regular,
            tier_accent(item.tier),
            &item.quantity.to_string(),
        );

        // The displayed unit price and the displayed subtotal are rounded
        // independently of one another.
        let price = format!("${}", format::currency(item.unit_price()));
        self.writer
            .text(COLUMN_X[3], y + 8.0, 9.0, Font::Regular, BLACK, &price);
        let subtotal = format!(
            "${}",
            format::currency(item.unit_price() * f64::from(item.quantity.get()))
        );
        self.writer
            .text(COLUMN_X[4], y + 8.0, 9.0, Font::Regular, BLACK, &subtotal);

        self.y += ROW_HEIGHT;
    }

    fn totals_box(&mut self, tier: PriceTier, total: i64, item_count: u32) {
        self.ensure_room(TOTALS_REQUIRED);

        let box_x = PAGE_WIDTH - MARGIN - TOTALS_BOX_WIDTH;
        let box_y = self.y + 20.0;

        self.writer
            .fill_rect(box_x, box_y, TOTALS_BOX_WIDTH, TOTALS_BOX_HEIGHT, TOTALS_FILL);
        self.writer
            .stroke_rect(box_x, box_y, TOTALS_BOX_WIDTH, TOTALS_BOX_HEIGHT, BORDER);

        let accent = tier_accent(tier);
        self.writer
            .text(box_x + 15.0, box_y + 15.0, 12.0, Font::Bold, accent, "Total Cantidad:");
        self.writer.text(
            box_x + TOTALS_BOX_WIDTH - 80.0,
            box_y + 15.0,
            12.0,
            Font::Bold,
            accent,
            &item_count.to_string(),
        );

        self.writer.line(
            box_x + 15.0,
            box_y + 28.0,
            box_x + TOTALS_BOX_WIDTH - 15.0,
            box_y + 28.0,
            BORDER,
        );

        self.writer
            .text(box_x + 15.0, box_y + 40.0, 12.0, Font::Bold, RED, "Total Precio:");
        self.writer.text(
            box_x + TOTALS_BOX_WIDTH - 80.0,
            box_y + 40.0,
            12.0,
            Font::Bold,
            RED,
            &format!("${}", format::group_thousands(total)),
        );
    }
}
