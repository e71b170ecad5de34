//! Editing session: the explicit state container standing in for the
//! original page's reactive view.
//!
//! One `Session` owns one `Quote` for its whole lifetime. All mutations
//! flow through the session, which notifies registered change observers
//! after each write; the pure derivation logic stays in `model`. There
//! is a single logical writer, so no locking is involved.

use std::sync::Arc;

use log::debug;

use crate::error::Result;
use crate::model::{coerce_price, ItemEdit, Quote, QuoteField};
use crate::rendering::{self, Screenshot};
use crate::RenderConfig;

type ChangeCallback = Arc<dyn Fn(&Quote) + Send + Sync>;

pub struct Session {
    quote: Quote,
    config: RenderConfig,
    mounted: bool,
    on_change: Vec<ChangeCallback>,
}

impl Session {
    /// Create a session around the default quote.
    pub fn new(config: RenderConfig) -> Result<Self> {
        Self::with_quote(config, Quote::default())
    }

    /// Create a session around an existing quote (e.g. loaded from a file).
    pub fn with_quote(config: RenderConfig, quote: Quote) -> Result<Self> {
        config.validate()?;
        Ok(Self {
            quote,
            config,
            mounted: false,
            on_change: Vec::new(),
        })
    }

    /// Read-only view of the current quote.
    pub fn quote(&self) -> &Quote {
        &self.quote
    }

    pub fn config(&self) -> &RenderConfig {
        &self.config
    }

    /// Register a callback invoked after every mutation, with the quote
    /// in its new state. This is how a preview stays current.
    pub fn on_change<F>(&mut self, cb: F)
    where
        F: Fn(&Quote) + Send + Sync + 'static,
    {
        self.on_change.push(Arc::new(cb));
    }

    /// Remove all previously registered change callbacks.
    pub fn clear_on_change(&mut self) {
        self.on_change.clear();
    }

    fn notify(&self) {
        for cb in &self.on_change {
            cb(&self.quote);
        }
    }

    // --- Editing operations (each notifies observers on success) ---

    pub fn add_item(&mut self) {
        self.quote.add_item();
        self.notify();
    }

    pub fn edit_item(&mut self, index: usize, edit: ItemEdit) -> Result<()> {
        self.quote.edit_item(index, edit)?;
        self.notify();
        Ok(())
    }

    pub fn remove_item(&mut self, index: usize) -> Result<()> {
        self.quote.remove_item(index)?;
        self.notify();
        Ok(())
    }

    pub fn set_field(&mut self, field: QuoteField, value: impl Into<String>) {
        self.quote.set_field(field, value);
        self.notify();
    }

    pub fn set_labor_charge(&mut self, amount: f64) {
        self.quote.set_labor_charge(amount);
        self.notify();
    }

    /// Set the labor charge from raw user input, with the same silent
    /// fallback as line-item prices.
    pub fn set_labor_charge_input(&mut self, raw: &str) {
        self.quote.set_labor_charge(coerce_price(raw));
        self.notify();
    }

    // --- Render surface ---

    /// Attach the render surface. Until this is called there is nothing
    /// to capture and exports are guarded no-ops.
    pub fn mount(&mut self) {
        self.mounted = true;
        debug!("render surface mounted ({}x{} @{}x)",
            self.config.viewport.width, self.config.viewport.height, self.config.scale);
    }

    pub fn is_mounted(&self) -> bool {
        self.mounted
    }

    /// Rasterize the current quote. Returns `None` when no surface is
    /// mounted, so callers inherit the guarded no-op behavior.
    pub fn capture(&self) -> Result<Option<Screenshot>> {
        if !self.mounted {
            debug!("capture requested before mount; ignoring");
            return Ok(None);
        }
        rendering::render_quote(&self.quote, &self.config).map(Some)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    fn test_config() -> RenderConfig {
        RenderConfig {
            viewport: crate::Viewport {
                width: 320,
                height: 480,
            },
            scale: 1,
            ..Default::default()
        }
    }

    #[test]
    fn observers_fire_after_each_mutation() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut session = Session::new(test_config()).unwrap();
        let seen = counter.clone();
        session.on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });

        session.add_item();
        session.set_field(QuoteField::RecipientName, "ACME");
        session.set_labor_charge(10.0);
        session.edit_item(0, ItemEdit::Quantity(2.0)).unwrap();
        session.remove_item(1).unwrap();
        assert_eq!(counter.load(Ordering::SeqCst), 5);
    }

    #[test]
    fn observer_sees_current_state() {
        let mut session = Session::new(test_config()).unwrap();
        session.on_change(|quote| {
            assert_eq!(quote.recipient_name, "ACME Pty Ltd");
        });
        session.set_field(QuoteField::RecipientName, "ACME Pty Ltd");
    }

    #[test]
    fn rejected_edit_does_not_notify() {
        let counter = Arc::new(AtomicUsize::new(0));
        let mut session = Session::new(test_config()).unwrap();
        let seen = counter.clone();
        session.on_change(move |_| {
            seen.fetch_add(1, Ordering::SeqCst);
        });
        assert!(session.edit_item(9, ItemEdit::Quantity(1.0)).is_err());
        assert_eq!(counter.load(Ordering::SeqCst), 0);
    }

    #[test]
    fn capture_before_mount_is_a_silent_noop() {
        let session = Session::new(test_config()).unwrap();
        assert!(session.capture().unwrap().is_none());
    }

    #[test]
    fn capture_after_mount_reflects_latest_edits() {
        let mut session = Session::new(test_config()).unwrap();
        session.mount();
        let before = session.capture().unwrap().expect("mounted capture");
        session.set_field(QuoteField::RecipientName, "Changed Recipient");
        let after = session.capture().unwrap().expect("mounted capture");
        assert_ne!(before.png_data, after.png_data);
    }

    #[test]
    fn labor_charge_input_uses_price_fallback() {
        let mut session = Session::new(test_config()).unwrap();
        session.set_labor_charge_input("not a number");
        assert_eq!(session.quote().labor_charge, 0.0);
        session.set_labor_charge_input("42.5");
        assert_eq!(session.quote().labor_charge, 42.5);
    }

    #[test]
    fn invalid_config_is_rejected_at_construction() {
        let config = RenderConfig {
            scale: 0,
            ..Default::default()
        };
        assert!(Session::new(config).is_err());
    }
}
