//! Integration tests for the editing session and totals contract

use quoteforge::model::{ItemEdit, LineItem, QuoteField};
use quoteforge::{RenderConfig, Session, Viewport};

fn test_config() -> RenderConfig {
    RenderConfig {
        viewport: Viewport {
            width: 400,
            height: 600,
        },
        scale: 1,
        ..Default::default()
    }
}

#[test]
fn session_starts_with_one_default_row() {
    let session = Session::new(test_config()).expect("Failed to create session");
    let quote = session.quote();
    assert_eq!(quote.items.len(), 1);
    assert_eq!(quote.items[0].description, "");
    assert_eq!(quote.items[0].quantity, 1.0);
    assert_eq!(quote.items[0].unit_price, 0.0);
    assert_eq!(quote.quote_id, "Q-2024001");
}

#[test]
fn full_editing_flow_derives_the_expected_totals() {
    let mut session = Session::new(test_config()).expect("Failed to create session");

    session
        .edit_item(0, ItemEdit::Description("Design work".into()))
        .unwrap();
    session.edit_item(0, ItemEdit::Quantity(2.0)).unwrap();
    session.edit_item(0, ItemEdit::UnitPrice(100.0)).unwrap();
    session.add_item();
    session
        .edit_item(1, ItemEdit::Description("Materials".into()))
        .unwrap();
    session.edit_item(1, ItemEdit::UnitPrice(50.0)).unwrap();
    session.set_labor_charge(30.0);

    let quote = session.quote();
    assert_eq!(quote.subtotal(), 250.0);
    assert_eq!(quote.grand_total(), 280.0);
}

#[test]
fn typed_input_flows_through_the_coercion_policy() {
    let mut session = Session::new(test_config()).expect("Failed to create session");

    session
        .edit_item(0, ItemEdit::quantity_input("abc"))
        .unwrap();
    assert_eq!(session.quote().items[0].quantity, 1.0);

    session
        .edit_item(0, ItemEdit::unit_price_input(""))
        .unwrap();
    assert_eq!(session.quote().items[0].unit_price, 0.0);

    session
        .edit_item(0, ItemEdit::quantity_input("3"))
        .unwrap();
    session
        .edit_item(0, ItemEdit::unit_price_input("9.5"))
        .unwrap();
    assert_eq!(session.quote().items[0].line_total(), 28.5);
}

#[test]
fn removing_rows_shifts_later_rows_up() {
    let mut session = Session::new(test_config()).expect("Failed to create session");
    session.add_item();
    session.add_item();
    session
        .edit_item(2, ItemEdit::Description("last".into()))
        .unwrap();

    session.remove_item(0).unwrap();
    assert_eq!(session.quote().items.len(), 2);
    assert_eq!(session.quote().items[1].description, "last");

    session.remove_item(0).unwrap();
    session.remove_item(0).unwrap();
    assert!(session.quote().items.is_empty());
    assert_eq!(session.quote().grand_total(), 0.0);
}

#[test]
fn header_fields_are_set_by_tag() {
    let mut session = Session::new(test_config()).expect("Failed to create session");
    session.set_field(QuoteField::IssuerName, "Studio North");
    session.set_field(QuoteField::RecipientName, "ACME Pty Ltd");
    session.set_field(QuoteField::QuoteId, "Q-2024042");
    session.set_field(QuoteField::IssueDate, "2024-06-01");
    session.set_field(QuoteField::Notes, "Net 30");

    let quote = session.quote();
    assert_eq!(quote.issuer_name, "Studio North");
    assert_eq!(quote.recipient_name, "ACME Pty Ltd");
    assert_eq!(quote.quote_id, "Q-2024042");
    assert_eq!(quote.issue_date, "2024-06-01");
    assert_eq!(quote.notes, "Net 30");
}

#[test]
fn totals_are_recomputed_not_cached() {
    let mut session = Session::new(test_config()).expect("Failed to create session");
    session.edit_item(0, ItemEdit::Quantity(2.0)).unwrap();
    session.edit_item(0, ItemEdit::UnitPrice(10.0)).unwrap();
    assert_eq!(session.quote().grand_total(), 20.0);

    session.edit_item(0, ItemEdit::UnitPrice(15.0)).unwrap();
    assert_eq!(session.quote().grand_total(), 30.0);

    session.set_labor_charge(5.0);
    assert_eq!(session.quote().grand_total(), 35.0);
}

#[test]
fn fixture_quote_loads_and_totals_match() {
    let text = std::fs::read_to_string("tests/fixtures/quote1.json").expect("read fixture");
    let quote: quoteforge::Quote = serde_json::from_str(&text).expect("parse fixture");
    assert_eq!(quote.items.len(), 2);
    assert_eq!(quote.subtotal(), 250.0);
    assert_eq!(quote.grand_total(), 280.0);

    let session = Session::with_quote(test_config(), quote).expect("Failed to create session");
    assert_eq!(session.quote().quote_id, "Q-2024001");
}

#[test]
fn duplicate_descriptions_are_permitted() {
    let mut session = Session::new(test_config()).expect("Failed to create session");
    session
        .edit_item(0, ItemEdit::Description("Labor".into()))
        .unwrap();
    session.add_item();
    session
        .edit_item(1, ItemEdit::Description("Labor".into()))
        .unwrap();
    let items: Vec<&LineItem> = session.quote().items.iter().collect();
    assert_eq!(items[0].description, items[1].description);
}
