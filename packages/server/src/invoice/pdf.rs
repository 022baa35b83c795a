//! Single-page A4 invoice rendered with lopdf.
//!
//! Text-only composition: the listing thumbnail is referenced by URL in the
//! source data but is not fetched or embedded, so rendering performs no I/O.

use anyhow::{Context, Result};
use listing::format_usd;
use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

use super::InvoiceData;

const PAGE_WIDTH: f64 = 595.0;
const PAGE_HEIGHT: f64 = 842.0;
const MARGIN: f64 = 40.0;
const RIGHT_EDGE: f64 = PAGE_WIDTH - MARGIN;
const COLUMN_X: f64 = 320.0;

/// Descriptions longer than this are clamped with a trailing ellipsis.
const DESCRIPTION_LIMIT: usize = 800;

const REGULAR: &str = "F1";
const BOLD: &str = "F2";

pub struct InvoicePdf;

impl InvoicePdf {
    /// Render the invoice as PDF bytes.
    pub fn render(data: &InvoiceData<'_>) -> Result<Vec<u8>> {
        let mut page = PageBuilder::new();
        layout(&mut page, data);

        let content = Content {
            operations: page.operations,
        };

        let mut doc = Document::with_version("1.5");
        let pages_id = doc.new_object_id();

        let regular_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica",
        });
        let bold_font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => "Helvetica-Bold",
        });
        let resources_id = doc.add_object(dictionary! {
            "Font" => dictionary! {
                REGULAR => regular_font_id,
                BOLD => bold_font_id,
            },
        });

        let content_id = doc.add_object(Stream::new(
            dictionary! {},
            content.encode().context("encode invoice content stream")?,
        ));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });

        let pages = dictionary! {
            "Type" => "Pages",
            "Kids" => vec![page_id.into()],
            "Count" => 1,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
        };
        doc.objects.insert(pages_id, Object::Dictionary(pages));

        let catalog_id = doc.add_object(dictionary! {
            "Type" => "Catalog",
            "Pages" => pages_id,
        });
        doc.trailer.set("Root", catalog_id);
        doc.compress();

        let mut bytes = Vec::new();
        doc.save_to(&mut bytes)
            .context("serialize invoice document")?;

        Ok(bytes)
    }
}

fn layout(page: &mut PageBuilder, data: &InvoiceData<'_>) {
    let listing = &data.listing.record;
    let price = format_usd(data.listing.price_number);

    // Header
    page.advance(24.0);
    page.text_at(BOLD, 26.0, MARGIN, page.y, "INVOICE");
    page.text_at(
        BOLD,
        11.0,
        COLUMN_X,
        page.y + 12.0,
        &format!("Invoice #: {}", data.invoice_number),
    );
    page.text_at(
        REGULAR,
        9.0,
        COLUMN_X,
        page.y,
        &format!("Date: {}", data.date),
    );
    page.text_at(
        REGULAR,
        9.0,
        COLUMN_X,
        page.y - 12.0,
        &format!("Order #: {}", data.id.short_code()),
    );
    page.line(REGULAR, 9.0, "Garage Technologies, Inc.");
    page.line(REGULAR, 9.0, "www.shopgarage.com");
    page.rule(1.5);

    // Seller and buyer columns
    page.advance(20.0);
    let top = page.y;
    let buyer = data.buyer.cloned().unwrap_or_default();

    let mut left = top;
    page.text_at(BOLD, 11.0, MARGIN, left, "SELLER");
    left -= 14.0;
    page.text_at(BOLD, 9.0, MARGIN, left, "Garage Technologies, Inc.");
    left -= 12.0;
    page.text_at(REGULAR, 9.0, MARGIN, left, "Phone: (201) 293-7164");
    left -= 12.0;
    page.text_at(REGULAR, 9.0, MARGIN, left, "Email: support@shopgarage.com");
    left -= 12.0;
    page.text_at(REGULAR, 9.0, MARGIN, left, "Website: www.shopgarage.com");
    left -= 12.0;
    if let Some(name) = listing.seller.as_ref().and_then(|s| s.name.as_deref()) {
        page.text_at(REGULAR, 9.0, MARGIN, left, &format!("Listed by: {name}"));
        left -= 12.0;
    }

    let mut right = top;
    page.text_at(BOLD, 11.0, COLUMN_X, right, "BILL TO");
    right -= 14.0;
    let bill_to = [
        buyer.name.as_deref().unwrap_or("[Buyer Name]"),
        buyer.company.as_deref().unwrap_or("[Company/Department]"),
        buyer.address1.as_deref().unwrap_or("[Address Line 1]"),
        buyer.address2.as_deref().unwrap_or("[Address Line 2]"),
        buyer.city_state_zip.as_deref().unwrap_or("[City, State ZIP]"),
        buyer.phone.as_deref().unwrap_or("[Phone]"),
        buyer.email.as_deref().unwrap_or("[Email]"),
    ];
    for entry in bill_to {
        page.text_at(REGULAR, 9.0, COLUMN_X, right, entry);
        right -= 12.0;
    }

    page.y = left.min(right);
    page.rule(0.75);

    // Vehicle identification
    page.line(BOLD, 11.0, "VEHICLE IDENTIFICATION");
    page.advance(4.0);
    page.line(REGULAR, 7.0, "VEHICLE TITLE");
    page.line(BOLD, 10.0, &listing.title);
    if let Some(location) = listing.location.as_deref() {
        page.advance(4.0);
        page.line(REGULAR, 7.0, "LOCATION");
        page.line(REGULAR, 9.0, location);
    }
    page.rule(0.75);

    // Description
    if let Some(description) = listing.description.as_deref() {
        page.line(BOLD, 11.0, "VEHICLE DESCRIPTION & FEATURES");
        page.advance(2.0);
        for row in wrap(&clamp_description(description), 105) {
            page.line(REGULAR, 8.0, &row);
        }
        page.rule(0.75);
    }

    // Payment breakdown
    page.line(BOLD, 11.0, "PAYMENT BREAKDOWN");
    page.advance(4.0);
    page.line(BOLD, 9.0, "Description");
    page.text_right(BOLD, 9.0, RIGHT_EDGE, page.y, "Amount");
    let rows: [(&str, &str); 4] = [
        ("Vehicle Purchase Price", price.as_str()),
        ("Sales Tax (if applicable)", "-"),
        ("Delivery/Transportation", "-"),
        ("Documentation Fees", "-"),
    ];
    for (label, amount) in rows {
        page.line(REGULAR, 9.0, label);
        page.text_right(REGULAR, 9.0, RIGHT_EDGE, page.y, amount);
    }
    page.advance(8.0);
    page.line(BOLD, 12.0, "TOTAL DUE");
    page.text_right(BOLD, 12.0, RIGHT_EDGE, page.y, &price);
    page.rule(1.5);

    // Terms
    page.line(BOLD, 11.0, "TERMS AND CONDITIONS");
    page.advance(2.0);
    let terms = [
        "Payment Terms: Net 30 days. Payment via wire transfer preferred. Wire transfer \
         instructions will be provided upon request.",
        "Delivery Terms: Delivery/pickup arrangements to be coordinated between buyer and \
         seller. All transportation costs are the responsibility of the buyer unless \
         otherwise specified.",
        "Warranty: Vehicle sold \"AS IS, WHERE IS\" with no warranties expressed or implied. \
         Buyer acknowledges inspection of vehicle and acceptance of condition.",
        "Title Transfer: Title transfer will be completed upon receipt of full payment. All \
         applicable documentation and registration materials will be provided.",
        "Disclaimers: Seller makes no representations or warranties regarding the condition, \
         merchantability, or fitness for a particular purpose of the vehicle. Buyer assumes \
         all risks associated with the purchase and use of the vehicle.",
    ];
    for term in terms {
        for row in wrap(term, 120) {
            page.line(REGULAR, 7.0, &row);
        }
        page.advance(3.0);
    }

    // Signatures
    page.advance(28.0);
    let signature_y = page.y;
    page.stroke_line(0.75, MARGIN, signature_y, MARGIN + 220.0, signature_y);
    page.stroke_line(0.75, COLUMN_X, signature_y, COLUMN_X + 220.0, signature_y);
    page.text_at(REGULAR, 8.0, MARGIN, signature_y - 12.0, "Seller Signature");
    page.text_at(
        REGULAR,
        8.0,
        MARGIN,
        signature_y - 24.0,
        "Garage Technologies, Inc.",
    );
    page.text_at(REGULAR, 8.0, COLUMN_X, signature_y - 12.0, "Buyer Signature");
    page.text_at(REGULAR, 8.0, COLUMN_X, signature_y - 24.0, "Date: ____________");
    page.y = signature_y - 24.0;

    // Footer
    page.rule(0.75);
    page.line(
        REGULAR,
        7.0,
        &format!(
            "This invoice was generated on {}. For questions or support, contact \
             (201) 293-7164 or support@withgarage.com",
            data.date
        ),
    );
    page.line(
        REGULAR,
        7.0,
        &format!("Listing ID: {} | Source: {}", data.id, data.source_url),
    );
}

struct PageBuilder {
    operations: Vec<Operation>,
    y: f64,
}

impl PageBuilder {
    fn new() -> Self {
        Self {
            operations: Vec::new(),
            y: PAGE_HEIGHT - MARGIN,
        }
    }

    fn advance(&mut self, dy: f64) {
        self.y -= dy;
    }

    /// Absolute-positioned text run.
    fn text_at(&mut self, font: &str, size: f64, x: f64, y: f64, text: &str) {
        self.operations.push(Operation::new("BT", vec![]));
        self.operations
            .push(Operation::new("Tf", vec![font.into(), size.into()]));
        self.operations
            .push(Operation::new("Td", vec![x.into(), y.into()]));
        self.operations.push(Operation::new(
            "Tj",
            vec![Object::string_literal(sanitize(text))],
        ));
        self.operations.push(Operation::new("ET", vec![]));
    }

    /// Advance the cursor one line and draw at the left margin.
    fn line(&mut self, font: &str, size: f64, text: &str) {
        self.advance(size + 4.0);
        self.text_at(font, size, MARGIN, self.y, text);
    }

    /// Right-aligned text. Helvetica has no embedded metrics here, so the
    /// width is approximated at half the font size per character.
    fn text_right(&mut self, font: &str, size: f64, right: f64, y: f64, text: &str) {
        let width = size * 0.5 * text.chars().count() as f64;
        self.text_at(font, size, right - width, y, text);
    }

    /// Full-width horizontal rule below the current cursor.
    fn rule(&mut self, width: f64) {
        self.advance(12.0);
        self.stroke_line(width, MARGIN, self.y, RIGHT_EDGE, self.y);
    }

    fn stroke_line(&mut self, width: f64, x1: f64, y1: f64, x2: f64, y2: f64) {
        self.operations
            .push(Operation::new("w", vec![width.into()]));
        self.operations
            .push(Operation::new("m", vec![x1.into(), y1.into()]));
        self.operations
            .push(Operation::new("l", vec![x2.into(), y2.into()]));
        self.operations.push(Operation::new("S", vec![]));
    }
}

/// Clamp a description to [`DESCRIPTION_LIMIT`] characters, ellipsized.
fn clamp_description(description: &str) -> String {
    if description.chars().count() > DESCRIPTION_LIMIT {
        let clamped: String = description.chars().take(DESCRIPTION_LIMIT - 3).collect();
        format!("{clamped}...")
    } else {
        description.to_string()
    }
}

/// Greedy word wrap at `max_chars` columns.
fn wrap(text: &str, max_chars: usize) -> Vec<String> {
    let mut rows = Vec::new();
    let mut row = String::new();

    for word in text.split_whitespace() {
        if !row.is_empty() && row.chars().count() + word.chars().count() + 1 > max_chars {
            rows.push(std::mem::take(&mut row));
        }
        if !row.is_empty() {
            row.push(' ');
        }
        row.push_str(word);
    }
    if !row.is_empty() {
        rows.push(row);
    }

    rows
}

/// Keep text representable in the standard Helvetica encoding.
fn sanitize(text: &str) -> String {
    text.chars()
        .map(|c| match c {
            '\n' | '\r' | '\t' => ' ',
            c if (c as u32) < 256 => c,
            _ => '?',
        })
        .collect()
}
