//! PDF export: embed the rendered capture as a single image spanning
//! the width of an A4 page.
//!
//! The capture is decoded back to pixels and written as a DeviceRGB
//! image XObject with a grayscale soft mask for the alpha channel. The
//! image is scaled to the page width; if the document is taller than
//! one page the height is clamped and the bottom is truncated. That
//! truncation is inherited behavior, not a bug fix target.

use std::path::PathBuf;

use log::info;
use pdf_writer::{Content, Name, Pdf, Rect, Ref};

use crate::error::{Error, Result};
use crate::export::artifact_path;
use crate::rendering::Screenshot;
use crate::session::Session;

/// A4 page size in PostScript points.
pub const A4_WIDTH_PT: f32 = 595.28;
pub const A4_HEIGHT_PT: f32 = 841.89;

const IMAGE_NAME: Name<'static> = Name(b"Im1");

/// Capture the rendered quote and write `<quote_id>.pdf` into the
/// configured output directory. Returns `Ok(None)` when no render
/// surface is mounted.
pub fn export_pdf(session: &Session) -> Result<Option<PathBuf>> {
    let Some(shot) = session.capture()? else {
        return Ok(None);
    };
    let bytes = pdf_from_screenshot(&shot)?;
    let path = artifact_path(
        &session.config().output_dir,
        &session.quote().quote_id,
        "pdf",
    )?;
    std::fs::write(&path, &bytes)?;
    info!("exported {} ({} bytes)", path.display(), bytes.len());
    Ok(Some(path))
}

/// Build a one-page A4 PDF around a capture.
pub fn pdf_from_screenshot(shot: &Screenshot) -> Result<Vec<u8>> {
    let image = image::load_from_memory(&shot.png_data)
        .map_err(|e| Error::Export(format!("cannot decode capture: {}", e)))?;
    let rgba = image.to_rgba8();
    let (width, height) = rgba.dimensions();
    if width == 0 || height == 0 {
        return Err(Error::Export("capture has zero area".into()));
    }

    // Split RGBA into an RGB stream and a gray alpha stream for the SMask
    let raw = rgba.into_raw();
    let mut rgb = Vec::with_capacity((width * height * 3) as usize);
    let mut alpha = Vec::with_capacity((width * height) as usize);
    for chunk in raw.chunks_exact(4) {
        rgb.push(chunk[0]);
        rgb.push(chunk[1]);
        rgb.push(chunk[2]);
        alpha.push(chunk[3]);
    }

    let catalog_id = Ref::new(1);
    let page_tree_id = Ref::new(2);
    let page_id = Ref::new(3);
    let content_id = Ref::new(4);
    let image_id = Ref::new(5);
    let smask_id = Ref::new(6);

    let mut pdf = Pdf::new();
    pdf.catalog(catalog_id).pages(page_tree_id);
    pdf.pages(page_tree_id).kids([page_id]).count(1);

    {
        let mut smask = pdf.image_xobject(smask_id, &alpha);
        smask.width(width as i32);
        smask.height(height as i32);
        smask.color_space().device_gray();
        smask.bits_per_component(8);
    }
    {
        let mut xobject = pdf.image_xobject(image_id, &rgb);
        xobject.width(width as i32);
        xobject.height(height as i32);
        xobject.color_space().device_rgb();
        xobject.bits_per_component(8);
        xobject.s_mask(smask_id);
    }

    // Span the page width; clamp the height to one page
    let (image_width, image_height) = fit_to_page(width, height);

    let mut content = Content::new();
    content.save_state();
    content.transform([
        image_width,
        0.0,
        0.0,
        image_height,
        0.0,
        A4_HEIGHT_PT - image_height,
    ]);
    content.x_object(IMAGE_NAME);
    content.restore_state();
    pdf.stream(content_id, &content.finish());

    {
        let mut page = pdf.page(page_id);
        page.media_box(Rect::new(0.0, 0.0, A4_WIDTH_PT, A4_HEIGHT_PT));
        page.parent(page_tree_id);
        page.contents(content_id);
        let mut resources = page.resources();
        resources.x_objects().pair(IMAGE_NAME, image_id);
    }

    Ok(pdf.finish())
}

/// Placement of the capture on the page, in points. Width always spans
/// the page; height follows the aspect ratio, clamped to the page.
fn fit_to_page(pixel_width: u32, pixel_height: u32) -> (f32, f32) {
    let ratio = pixel_width as f32 / pixel_height as f32;
    let mut image_height = A4_WIDTH_PT / ratio;
    if image_height > A4_HEIGHT_PT {
        image_height = A4_HEIGHT_PT;
    }
    (A4_WIDTH_PT, image_height)
}
