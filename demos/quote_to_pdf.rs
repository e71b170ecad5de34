//! Compose a small quote and export it as PDF and PNG.
//!
//! Run with: `cargo run --example quote_to_pdf`

use quoteforge::model::{ItemEdit, QuoteField};
use quoteforge::{RenderConfig, Session};

fn main() -> anyhow::Result<()> {
    let mut session = Session::new(RenderConfig::default())?;

    session.set_field(QuoteField::IssuerName, "Studio North");
    session.set_field(QuoteField::IssuerAddress, "12 Harbor Lane\nPortsmouth");
    session.set_field(QuoteField::RecipientName, "ACME Pty Ltd");
    session.set_field(QuoteField::RecipientAddress, "45 Market Street\nSpringfield");

    session.edit_item(0, ItemEdit::Description("Design work".into()))?;
    session.edit_item(0, ItemEdit::Quantity(2.0))?;
    session.edit_item(0, ItemEdit::UnitPrice(100.0))?;
    session.add_item();
    session.edit_item(1, ItemEdit::Description("Materials".into()))?;
    session.edit_item(1, ItemEdit::UnitPrice(50.0))?;
    session.set_labor_charge(30.0);

    println!("Subtotal:    {:>10.2}", session.quote().subtotal());
    println!("Labor:       {:>10.2}", session.quote().labor_charge);
    println!("Grand total: {:>10.2}", session.quote().grand_total());

    session.mount();

    #[cfg(feature = "pdf")]
    if let Some(path) = quoteforge::export::pdf::export_pdf(&session)? {
        println!("Wrote {}", path.display());
    }
    if let Some(path) = quoteforge::export::png::export_png(&session)? {
        println!("Wrote {}", path.display());
    }

    Ok(())
}
