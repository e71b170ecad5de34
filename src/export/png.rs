//! PNG export: the capture already is a PNG, so this writes it out
//! under the quote's name.

use std::path::PathBuf;

use log::info;

use crate::error::Result;
use crate::export::artifact_path;
use crate::session::Session;

/// Capture the rendered quote and write `<quote_id>.png` into the
/// configured output directory. Returns `Ok(None)` when no render
/// surface is mounted.
pub fn export_png(session: &Session) -> Result<Option<PathBuf>> {
    let Some(shot) = session.capture()? else {
        return Ok(None);
    };
    let path = artifact_path(
        &session.config().output_dir,
        &session.quote().quote_id,
        "png",
    )?;
    std::fs::write(&path, &shot.png_data)?;
    info!(
        "exported {} ({}x{}, {} bytes)",
        path.display(),
        shot.width,
        shot.height,
        shot.png_data.len()
    );
    Ok(Some(path))
}
