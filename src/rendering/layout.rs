/// Block layout for the quote document.
///
/// Stacks blocks vertically with simple margins and padding, the same
/// way a narrow print stylesheet would: title, issuer block, recipient
/// block, item table, totals, notes. Column alignment inside the table
/// relies on the fixed glyph advance of the raster font.
use crate::model::{format_amount, Quote};
use crate::rendering::raster::{GLYPH_ADVANCE, LINE_HEIGHT};
use crate::Viewport;

#[derive(Debug, Clone, PartialEq)]
pub struct Rect {
    pub x: i32,
    pub y: i32,
    pub width: u32,
    pub height: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct BoxModel {
    pub margin: u32,
    pub border: u32,
    pub padding: u32,
}

#[derive(Debug, Clone, PartialEq)]
pub struct LayoutBox {
    pub rect: Rect,
    pub box_model: BoxModel,
}

impl LayoutBox {
    pub fn content_width(&self) -> u32 {
        let total = self.box_model.margin + self.box_model.border + self.box_model.padding;
        self.rect.width.saturating_sub(total)
    }
}

/// What a layout node represents; paint picks colors and backgrounds
/// based on this.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum NodeKind {
    /// Document title, rendered at double scale
    Title,
    /// Section heading (issuer name, "To:", "Notes")
    Heading,
    /// Plain wrapped text
    Text,
    /// Item table column header, drawn over a light background
    TableHead,
    /// One item row
    TableRow,
    /// Subtotal / labor line, right-aligned
    TotalsRow,
    /// Final total, drawn over a light background
    GrandTotalRow,
    /// Horizontal rule
    Rule,
}

#[derive(Debug, Clone)]
pub struct LayoutNode {
    pub lb: LayoutBox,
    pub text: String,
    pub kind: NodeKind,
    pub scale: u32,
}

const PAGE_MARGIN: u32 = 8;

// Item table column widths in characters
const COL_INDEX: usize = 3;
const COL_QTY: usize = 7;
const COL_UNIT: usize = 11;
const COL_TOTAL: usize = 11;

/// Compute the block layout for the quote at the given viewport width.
/// Blocks that overflow the viewport bottom are still laid out; the
/// rasterizer clips them.
pub fn layout_quote(quote: &Quote, viewport: Viewport) -> Vec<LayoutNode> {
    let page_width = viewport.width;
    let width = page_width.saturating_sub(PAGE_MARGIN * 2);
    let mut nodes = Vec::new();
    let mut y = PAGE_MARGIN;

    let mut push = |nodes: &mut Vec<LayoutNode>,
                    y: &mut u32,
                    text: String,
                    kind: NodeKind,
                    scale: u32,
                    padding: u32,
                    margin: u32| {
        let height = match kind {
            NodeKind::Rule => 1 + padding * 2,
            _ => {
                let lines = (text.lines().count() as u32).max(1);
                lines * LINE_HEIGHT * scale + padding * 2
            }
        };
        let lb = LayoutBox {
            rect: Rect {
                x: PAGE_MARGIN as i32,
                y: *y as i32,
                width,
                height,
            },
            box_model: BoxModel {
                margin,
                border: 0,
                padding,
            },
        };
        *y += height + margin;
        nodes.push(LayoutNode {
            lb,
            text,
            kind,
            scale,
        });
    };

    // Characters that fit on one body line inside block padding
    let body_padding = 4u32;
    let content_w = width.saturating_sub(body_padding * 2);
    let chars_per_line = if content_w >= GLYPH_ADVANCE {
        (content_w / GLYPH_ADVANCE) as usize
    } else {
        1
    };

    push(
        &mut nodes,
        &mut y,
        "QUOTATION".to_string(),
        NodeKind::Title,
        2,
        PAGE_MARGIN,
        PAGE_MARGIN,
    );

    if !quote.issuer_name.trim().is_empty() {
        push(
            &mut nodes,
            &mut y,
            quote.issuer_name.trim().to_string(),
            NodeKind::Heading,
            1,
            body_padding,
            2,
        );
    }
    if !quote.issuer_address.trim().is_empty() {
        push(
            &mut nodes,
            &mut y,
            wrap_text(&quote.issuer_address, chars_per_line).join("\n"),
            NodeKind::Text,
            1,
            body_padding,
            2,
        );
    }
    push(
        &mut nodes,
        &mut y,
        format!("No: {}    Date: {}", quote.quote_id, quote.issue_date),
        NodeKind::Text,
        1,
        body_padding,
        6,
    );

    push(&mut nodes, &mut y, String::new(), NodeKind::Rule, 1, 0, 6);

    push(
        &mut nodes,
        &mut y,
        format!("To: {}", quote.recipient_name.trim()),
        NodeKind::Heading,
        1,
        body_padding,
        2,
    );
    if !quote.recipient_address.trim().is_empty() {
        push(
            &mut nodes,
            &mut y,
            wrap_text(&quote.recipient_address, chars_per_line).join("\n"),
            NodeKind::Text,
            1,
            body_padding,
            6,
        );
    }

    // Item table: header, rule, one row per item, rule
    let desc_w = chars_per_line.saturating_sub(COL_INDEX + COL_QTY + COL_UNIT + COL_TOTAL + 4).max(4);
    push(
        &mut nodes,
        &mut y,
        table_row("#", "Description", "Qty", "Unit", "Total", desc_w),
        NodeKind::TableHead,
        1,
        body_padding,
        0,
    );
    push(&mut nodes, &mut y, String::new(), NodeKind::Rule, 1, 0, 0);
    for (index, item) in quote.items.iter().enumerate() {
        push(
            &mut nodes,
            &mut y,
            table_row(
                &(index + 1).to_string(),
                &item.description,
                &format_quantity(item.quantity),
                &format_amount(item.unit_price),
                &format_amount(item.line_total()),
                desc_w,
            ),
            NodeKind::TableRow,
            1,
            body_padding,
            0,
        );
    }
    push(&mut nodes, &mut y, String::new(), NodeKind::Rule, 1, 0, 6);

    push(
        &mut nodes,
        &mut y,
        totals_line("Subtotal", quote.subtotal(), chars_per_line),
        NodeKind::TotalsRow,
        1,
        body_padding,
        0,
    );
    push(
        &mut nodes,
        &mut y,
        totals_line("Labor", quote.labor_charge, chars_per_line),
        NodeKind::TotalsRow,
        1,
        body_padding,
        0,
    );
    push(
        &mut nodes,
        &mut y,
        totals_line("Grand total", quote.grand_total(), chars_per_line),
        NodeKind::GrandTotalRow,
        1,
        body_padding,
        6,
    );

    if !quote.notes.trim().is_empty() {
        push(
            &mut nodes,
            &mut y,
            "Notes".to_string(),
            NodeKind::Heading,
            1,
            body_padding,
            2,
        );
        push(
            &mut nodes,
            &mut y,
            wrap_text(&quote.notes, chars_per_line).join("\n"),
            NodeKind::Text,
            1,
            body_padding,
            6,
        );
    }

    nodes
}

/// Format one item-table line with fixed-width columns.
fn table_row(index: &str, desc: &str, qty: &str, unit: &str, total: &str, desc_w: usize) -> String {
    format!(
        "{index:<iw$} {desc:<dw$} {qty:>qw$} {unit:>uw$} {total:>tw$}",
        iw = COL_INDEX,
        dw = desc_w,
        desc = truncate_chars(desc, desc_w),
        qw = COL_QTY,
        uw = COL_UNIT,
        tw = COL_TOTAL,
    )
}

/// Right-align a totals label/amount pair on the full line width.
fn totals_line(label: &str, amount: f64, chars_per_line: usize) -> String {
    let cell = format!("{} {:>12}", label, format_amount(amount));
    format!("{cell:>w$}", w = chars_per_line.max(cell.chars().count()))
}

/// Quantities display without a fraction when they are whole numbers.
fn format_quantity(quantity: f64) -> String {
    if quantity.fract() == 0.0 && quantity.abs() < 1e15 {
        format!("{}", quantity as i64)
    } else {
        format!("{}", quantity)
    }
}

fn truncate_chars(text: &str, max_chars: usize) -> String {
    text.chars().take(max_chars).collect()
}

/// Word-wrap text to the given line width, preserving embedded newlines
/// (addresses and notes render like `white-space: pre-line`).
pub fn wrap_text(text: &str, chars_per_line: usize) -> Vec<String> {
    let limit = chars_per_line.max(1);
    let mut lines = Vec::new();
    for source_line in text.lines() {
        let mut cur = String::new();
        for word in source_line.split_whitespace() {
            if cur.chars().count() + word.chars().count() + 1 > limit && !cur.is_empty() {
                lines.push(cur);
                cur = word.to_string();
            } else {
                if !cur.is_empty() {
                    cur.push(' ');
                }
                cur.push_str(word);
            }
        }
        lines.push(cur);
    }
    if lines.is_empty() {
        lines.push(String::new());
    }
    lines
}
