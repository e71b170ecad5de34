//! Rendering pipeline: quote -> block layout -> display list -> raster.
//!
//! This is the in-process stand-in for the browser's visual tree. The
//! pipeline is deterministic: the same quote and config always produce
//! byte-identical PNG output, which is what the golden tests rely on.

pub mod layout;
pub mod paint;
pub mod raster;

use base64::Engine as _;
use log::debug;

use crate::error::Result;
use crate::model::Quote;
use crate::RenderConfig;

/// A rasterized capture of the rendered quote document.
#[derive(Debug, Clone)]
pub struct Screenshot {
    pub width: u32,
    pub height: u32,
    pub png_data: Vec<u8>,
}

impl Screenshot {
    /// Encode the capture as a `data:image/png;base64,...` URL.
    pub fn to_data_url(&self) -> String {
        format!(
            "data:image/png;base64,{}",
            base64::engine::general_purpose::STANDARD.encode(&self.png_data)
        )
    }
}

/// Run the full pipeline for the current quote state.
pub fn render_quote(quote: &Quote, config: &RenderConfig) -> Result<Screenshot> {
    let nodes = layout::layout_quote(quote, config.viewport);
    let commands = paint::build_display_list(&nodes, config.viewport);
    debug!(
        "render: {} layout nodes, {} paint commands",
        nodes.len(),
        commands.len()
    );
    raster::rasterize(&commands, config.viewport, config.scale)
}
