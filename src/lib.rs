//! QuoteForge Headless Quote Engine
//!
//! A headless engine for composing a price quote and producing rendered
//! outputs. One editing session holds one quote (header fields, ordered
//! line items, labor charge, notes), derives totals on demand, renders
//! the document to a deterministic raster surface, and exports the
//! capture as a single-page PDF or a standalone PNG named after the
//! quote identifier.
//!
//! # Example
//!
//! ```no_run
//! use quoteforge::{RenderConfig, Session, Viewport};
//! use quoteforge::model::{ItemEdit, QuoteField};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let config = RenderConfig {
//!     viewport: Viewport { width: 794, height: 1123 },
//!     ..Default::default()
//! };
//!
//! let mut session = Session::new(config)?;
//! session.set_field(QuoteField::RecipientName, "ACME Pty Ltd");
//! session.edit_item(0, ItemEdit::Description("Consulting".into()))?;
//! session.edit_item(0, ItemEdit::UnitPrice(120.0))?;
//! session.mount();
//!
//! let path = quoteforge::export::png::export_png(&session)?;
//! println!("Exported: {:?}", path);
//! # Ok(())
//! # }
//! ```

use std::path::PathBuf;

pub mod error;
pub use error::{Error, Result};

pub mod model;
pub mod session;

// Rendering pipeline: layout -> display list -> raster capture
pub mod rendering;

// Exporters (PDF support is feature-gated)
pub mod export;

// Async-friendly editing API (worker-backed abstraction)
pub mod async_api;

// Re-export the main handles at the crate root for ergonomic use
pub use async_api::Editor;
pub use model::{ItemEdit, LineItem, Quote, QuoteField};
pub use session::Session;

/// Configuration for the render surface and export targets
///
/// The defaults approximate an A4 sheet at 96 dpi, captured at double
/// resolution the way the original export path rasterized its preview.
///
/// # Examples
///
/// ```
/// let cfg = quoteforge::RenderConfig::default();
/// assert_eq!(cfg.scale, 2);
/// ```
#[derive(Debug, Clone)]
pub struct RenderConfig {
    /// Layout dimensions of the document surface, in pixels
    pub viewport: Viewport,
    /// Capture supersampling factor applied on top of the viewport
    pub scale: u32,
    /// Directory export artifacts are written into
    pub output_dir: PathBuf,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            viewport: Viewport::default(),
            scale: 2,
            output_dir: PathBuf::from("."),
        }
    }
}

impl RenderConfig {
    pub(crate) fn validate(&self) -> Result<()> {
        if self.viewport.width == 0 || self.viewport.height == 0 {
            return Err(Error::Config("viewport must have a nonzero area".into()));
        }
        if self.scale == 0 {
            return Err(Error::Config("scale must be at least 1".into()));
        }
        let bytes = self.viewport.width as u64
            * self.viewport.height as u64
            * self.scale as u64
            * self.scale as u64
            * 4;
        if bytes > rendering::raster::MAX_SURFACE_BYTES {
            return Err(Error::Config(format!(
                "viewport {}x{} at scale {} exceeds the capture size limit",
                self.viewport.width, self.viewport.height, self.scale
            )));
        }
        Ok(())
    }
}

/// Document surface dimensions
#[derive(Debug, Clone, Copy)]
pub struct Viewport {
    pub width: u32,
    pub height: u32,
}

impl Default for Viewport {
    fn default() -> Self {
        // A4 at 96 dpi
        Self {
            width: 794,
            height: 1123,
        }
    }
}

/// Create a new editing session with the given configuration.
pub fn new_session(config: RenderConfig) -> Result<Session> {
    Session::new(config)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = RenderConfig::default();
        assert_eq!(config.viewport.width, 794);
        assert_eq!(config.viewport.height, 1123);
        assert_eq!(config.scale, 2);
    }

    #[test]
    fn test_viewport() {
        let viewport = Viewport {
            width: 640,
            height: 900,
        };
        assert_eq!(viewport.width, 640);
        assert_eq!(viewport.height, 900);
    }

    #[test]
    fn zero_scale_fails_validation() {
        let config = RenderConfig {
            scale: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn oversized_viewport_fails_validation() {
        let config = RenderConfig {
            viewport: Viewport {
                width: 40000,
                height: 40000,
            },
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
