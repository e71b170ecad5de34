//! Quote model: header fields, line items, and derived totals.
//!
//! This module is pure data and derivation. It has no dependency on the
//! rendering pipeline or any I/O so the totals contract can be tested in
//! isolation. Totals are always recomputed from current state; nothing
//! here caches a sum.

use serde::{Deserialize, Serialize};

use crate::error::{Error, Result};

/// Fallback quantity when the user types something that is not a number.
pub const DEFAULT_QUANTITY: f64 = 1.0;
/// Fallback unit price when the user types something that is not a number.
pub const DEFAULT_UNIT_PRICE: f64 = 0.0;

/// One billable row of the quote.
///
/// A line item has no identity beyond its position in `Quote::items`;
/// insertion order is display order and duplicate descriptions are fine.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LineItem {
    pub description: String,
    pub quantity: f64,
    pub unit_price: f64,
}

impl Default for LineItem {
    fn default() -> Self {
        Self {
            description: String::new(),
            quantity: DEFAULT_QUANTITY,
            unit_price: DEFAULT_UNIT_PRICE,
        }
    }
}

impl LineItem {
    pub fn new(description: impl Into<String>, quantity: f64, unit_price: f64) -> Self {
        Self {
            description: description.into(),
            quantity: sanitize_quantity(quantity),
            unit_price: sanitize_price(unit_price),
        }
    }

    /// `quantity * unit_price`, at full precision.
    pub fn line_total(&self) -> f64 {
        self.quantity * self.unit_price
    }
}

/// A single edit to one field of a line item.
///
/// Replaces a loosely-typed field selector with one explicit variant per
/// editable field, so an edit cannot name a field that does not exist.
#[derive(Debug, Clone, PartialEq)]
pub enum ItemEdit {
    Description(String),
    Quantity(f64),
    UnitPrice(f64),
}

impl ItemEdit {
    /// Build a quantity edit from raw user input, applying the
    /// fallback-on-invalid-input policy (invalid text becomes `1`).
    pub fn quantity_input(raw: &str) -> Self {
        ItemEdit::Quantity(coerce_quantity(raw))
    }

    /// Build a unit-price edit from raw user input (invalid text becomes `0`).
    pub fn unit_price_input(raw: &str) -> Self {
        ItemEdit::UnitPrice(coerce_price(raw))
    }
}

/// Text-valued quote fields addressable by the editing surface.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum QuoteField {
    IssuerName,
    IssuerAddress,
    RecipientName,
    RecipientAddress,
    QuoteId,
    IssueDate,
    Notes,
}

/// The complete document being composed.
///
/// Exactly one `Quote` exists per editing session; it lives as long as
/// the session and is never persisted by the engine itself.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Quote {
    pub issuer_name: String,
    pub issuer_address: String,
    #[serde(default)]
    pub recipient_name: String,
    #[serde(default)]
    pub recipient_address: String,
    pub quote_id: String,
    pub issue_date: String,
    #[serde(default)]
    pub items: Vec<LineItem>,
    #[serde(default)]
    pub labor_charge: f64,
    #[serde(default)]
    pub notes: String,
}

impl Default for Quote {
    fn default() -> Self {
        Self {
            issuer_name: "Your Company".to_string(),
            issuer_address: "Company address".to_string(),
            recipient_name: String::new(),
            recipient_address: String::new(),
            quote_id: "Q-2024001".to_string(),
            issue_date: chrono::Local::now().format("%Y-%m-%d").to_string(),
            items: vec![LineItem::default()],
            labor_charge: 0.0,
            notes: "Thank you for your business".to_string(),
        }
    }
}

impl Quote {
    /// Append a new line item with default values. No upper bound.
    pub fn add_item(&mut self) {
        self.items.push(LineItem::default());
    }

    /// Replace one field of the item at `index`.
    ///
    /// The index must name an existing row; anything else is a contract
    /// violation and is rejected rather than corrupting state.
    pub fn edit_item(&mut self, index: usize, edit: ItemEdit) -> Result<()> {
        let len = self.items.len();
        let item = self
            .items
            .get_mut(index)
            .ok_or(Error::ItemIndex { index, len })?;
        match edit {
            ItemEdit::Description(text) => item.description = text,
            ItemEdit::Quantity(q) => item.quantity = sanitize_quantity(q),
            ItemEdit::UnitPrice(p) => item.unit_price = sanitize_price(p),
        }
        Ok(())
    }

    /// Delete the item at `index`, shifting later rows up by one.
    /// Removing the last remaining row is permitted.
    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        let len = self.items.len();
        if index >= len {
            return Err(Error::ItemIndex { index, len });
        }
        self.items.remove(index);
        Ok(())
    }

    /// Set a text-valued field by tag.
    pub fn set_field(&mut self, field: QuoteField, value: impl Into<String>) {
        let value = value.into();
        match field {
            QuoteField::IssuerName => self.issuer_name = value,
            QuoteField::IssuerAddress => self.issuer_address = value,
            QuoteField::RecipientName => self.recipient_name = value,
            QuoteField::RecipientAddress => self.recipient_address = value,
            QuoteField::QuoteId => self.quote_id = value,
            QuoteField::IssueDate => self.issue_date = value,
            QuoteField::Notes => self.notes = value,
        }
    }

    /// Set the flat labor/service charge. Non-finite or negative values
    /// fall back to the price default.
    pub fn set_labor_charge(&mut self, amount: f64) {
        self.labor_charge = sanitize_price(amount);
    }

    /// Sum of all line totals, excluding the labor charge.
    pub fn subtotal(&self) -> f64 {
        self.items.iter().map(LineItem::line_total).sum()
    }

    /// Subtotal plus labor charge.
    pub fn grand_total(&self) -> f64 {
        self.subtotal() + self.labor_charge
    }
}

fn sanitize_quantity(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        DEFAULT_QUANTITY
    }
}

fn sanitize_price(value: f64) -> f64 {
    if value.is_finite() && value >= 0.0 {
        value
    } else {
        DEFAULT_UNIT_PRICE
    }
}

/// Parse a quantity typed by the user; invalid input becomes `1`.
pub fn coerce_quantity(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(sanitize_quantity)
        .unwrap_or(DEFAULT_QUANTITY)
}

/// Parse a unit price or labor charge typed by the user; invalid input
/// becomes `0`.
pub fn coerce_price(input: &str) -> f64 {
    input
        .trim()
        .parse::<f64>()
        .map(sanitize_price)
        .unwrap_or(DEFAULT_UNIT_PRICE)
}

/// Format a monetary value for display with exactly two fraction digits.
/// Only the rendered string is rounded; stored values keep full precision.
pub fn format_amount(value: f64) -> String {
    format!("{:.2}", value)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn line_total_is_quantity_times_price() {
        let item = LineItem::new("widget", 3.0, 12.5);
        assert_eq!(item.line_total(), 37.5);
        assert_eq!(LineItem::new("free", 0.0, 100.0).line_total(), 0.0);
        assert_eq!(LineItem::new("zero", 4.0, 0.0).line_total(), 0.0);
    }

    #[test]
    fn grand_total_is_subtotal_plus_labor() {
        let mut quote = Quote {
            items: vec![
                LineItem::new("A", 2.0, 100.0),
                LineItem::new("B", 1.0, 50.0),
            ],
            ..Quote::default()
        };
        quote.set_labor_charge(30.0);
        assert_eq!(quote.subtotal(), 250.0);
        assert_eq!(quote.grand_total(), 280.0);
    }

    #[test]
    fn empty_quote_totals_are_zero() {
        let quote = Quote {
            items: Vec::new(),
            labor_charge: 0.0,
            ..Quote::default()
        };
        assert_eq!(quote.subtotal(), 0.0);
        assert_eq!(quote.grand_total(), 0.0);
    }

    #[test]
    fn subtotal_is_order_independent() {
        let mut quote = Quote {
            items: vec![
                LineItem::new("A", 2.0, 100.0),
                LineItem::new("B", 1.0, 50.0),
                LineItem::new("C", 3.0, 7.25),
            ],
            ..Quote::default()
        };
        let before = quote.subtotal();
        quote.items.reverse();
        assert_eq!(quote.subtotal(), before);
    }

    #[test]
    fn add_then_remove_restores_sequence() {
        let mut quote = Quote::default();
        quote
            .edit_item(0, ItemEdit::Description("only".into()))
            .unwrap();
        let before = quote.items.clone();
        quote.add_item();
        quote.remove_item(quote.items.len() - 1).unwrap();
        assert_eq!(quote.items, before);
    }

    #[test]
    fn edit_touches_only_the_named_row() {
        let mut quote = Quote {
            items: vec![
                LineItem::new("A", 1.0, 1.0),
                LineItem::new("B", 2.0, 2.0),
                LineItem::new("C", 3.0, 3.0),
            ],
            ..Quote::default()
        };
        quote.edit_item(1, ItemEdit::UnitPrice(99.0)).unwrap();
        assert_eq!(quote.items[0], LineItem::new("A", 1.0, 1.0));
        assert_eq!(quote.items[1].unit_price, 99.0);
        assert_eq!(quote.items[2], LineItem::new("C", 3.0, 3.0));
    }

    #[test]
    fn out_of_range_index_is_rejected() {
        let mut quote = Quote::default();
        assert!(matches!(
            quote.edit_item(5, ItemEdit::Quantity(1.0)),
            Err(Error::ItemIndex { index: 5, len: 1 })
        ));
        assert!(quote.remove_item(1).is_err());
        // State untouched by the rejected operations
        assert_eq!(quote.items.len(), 1);
    }

    #[test]
    fn removing_the_last_row_is_permitted() {
        let mut quote = Quote::default();
        quote.remove_item(0).unwrap();
        assert!(quote.items.is_empty());
    }

    #[test]
    fn invalid_quantity_input_falls_back_to_one() {
        assert_eq!(coerce_quantity(""), 1.0);
        assert_eq!(coerce_quantity("abc"), 1.0);
        assert_eq!(coerce_quantity("-3"), 1.0);
        assert_eq!(coerce_quantity("NaN"), 1.0);
        assert_eq!(coerce_quantity("4"), 4.0);
        assert_eq!(coerce_quantity(" 2.5 "), 2.5);
        assert_eq!(coerce_quantity("0"), 0.0);
    }

    #[test]
    fn invalid_price_input_falls_back_to_zero() {
        assert_eq!(coerce_price(""), 0.0);
        assert_eq!(coerce_price("abc"), 0.0);
        assert_eq!(coerce_price("-10"), 0.0);
        assert_eq!(coerce_price("19.99"), 19.99);
    }

    #[test]
    fn item_edit_input_constructors_apply_coercion() {
        assert_eq!(ItemEdit::quantity_input("oops"), ItemEdit::Quantity(1.0));
        assert_eq!(ItemEdit::unit_price_input("12.5"), ItemEdit::UnitPrice(12.5));
    }

    #[test]
    fn display_rounding_does_not_touch_stored_values() {
        let item = LineItem::new("thirds", 3.0, 1.0 / 3.0);
        assert_eq!(format_amount(item.line_total()), "1.00");
        // Stored precision is untouched by formatting
        assert!(item.unit_price > 0.333 && item.unit_price < 0.334);
    }

    #[test]
    fn quote_round_trips_through_json() {
        let quote = Quote::default();
        let json = serde_json::to_string(&quote).unwrap();
        let back: Quote = serde_json::from_str(&json).unwrap();
        assert_eq!(back, quote);
    }
}
