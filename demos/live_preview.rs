//! Watch the totals update as edits flow through the session, the way
//! the original form's preview pane tracked every keystroke.
//!
//! Run with: `cargo run --example live_preview`

use quoteforge::model::{format_amount, ItemEdit, QuoteField};
use quoteforge::{RenderConfig, Session};

fn main() -> anyhow::Result<()> {
    let mut session = Session::new(RenderConfig::default())?;

    session.on_change(|quote| {
        println!(
            "preview: {} rows, subtotal {}, grand total {}",
            quote.items.len(),
            format_amount(quote.subtotal()),
            format_amount(quote.grand_total()),
        );
    });

    session.set_field(QuoteField::RecipientName, "ACME Pty Ltd");
    session.edit_item(0, ItemEdit::Description("Consulting".into()))?;
    session.edit_item(0, ItemEdit::quantity_input("3"))?;
    session.edit_item(0, ItemEdit::unit_price_input("120"))?;
    session.add_item();
    session.edit_item(1, ItemEdit::Description("Travel".into()))?;
    session.edit_item(1, ItemEdit::unit_price_input("45.50"))?;
    session.set_labor_charge_input("80");

    // Typos fall back silently instead of breaking the preview
    session.edit_item(1, ItemEdit::quantity_input("two"))?;

    session.mount();
    if let Some(shot) = session.capture()? {
        println!(
            "capture: {}x{} px, data URL {} chars",
            shot.width,
            shot.height,
            shot.to_data_url().len()
        );
    }

    Ok(())
}
