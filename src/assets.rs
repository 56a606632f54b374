/*!
 * Companion assets written next to a reel.
 *
 * Text-profile reels ship the embedded font resource, image-profile reels
 * reference a transparent PNG placeholder named after its UUID.
 */

use anyhow::{anyhow, Context, Result};
use image::{ImageFormat, Rgba, RgbaImage};
use std::path::{Path, PathBuf};
use uuid::Uuid;

use crate::dcst::FONT_ID;
use crate::file_utils::FileManager;

/// Width and height of the placeholder raster
pub const PLACEHOLDER_SIZE: u32 = 128;

/// Write a fully transparent PNG named `<image id>.png` into `dir`
pub fn write_placeholder_png(dir: &Path, image_id: &Uuid) -> Result<PathBuf> {
    FileManager::ensure_dir(dir)?;

    let image = RgbaImage::from_pixel(PLACEHOLDER_SIZE, PLACEHOLDER_SIZE, Rgba([0, 0, 0, 0]));
    let path = dir.join(format!("{}.png", image_id));
    image
        .save_with_format(&path, ImageFormat::Png)
        .with_context(|| format!("Failed to write placeholder image: {:?}", path))?;

    Ok(path)
}

/// Default font resource: `resources/font/<font id>` next to the install prefix
///
/// The executable is expected in `<prefix>/bin`, so the prefix is the parent of
/// its directory.
pub fn default_font_path() -> Result<PathBuf> {
    let exe = std::env::current_exe().context("Unable to locate the running executable")?;
    let prefix = exe
        .parent()
        .and_then(Path::parent)
        .ok_or_else(|| anyhow!("Unable to resolve default font resource from {:?}", exe))?;

    Ok(prefix.join("resources").join("font").join(FONT_ID))
}

/// Copy the font resource into the output directory
pub fn copy_font(font: &Path, output_dir: &Path) -> Result<PathBuf> {
    FileManager::copy_into_dir(font, output_dir)
}
