use crate::draw::model::Stroke;
use crate::draw::render::{render_strokes_to_rgba, RenderSettings};
use anyhow::{anyhow, bail, Context, Result};
use base64::{engine::general_purpose, Engine as _};
use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

pub const EXPORT_FILE_NAME: &str = "image.png";
pub const EXPORT_SUBDIR: &str = "exports";
const PNG_DATA_URI_PREFIX: &str = "data:image/png;base64,";

/// Rasterizes `strokes` and encodes the pixels as PNG.
pub fn encode_png(strokes: &[Stroke], settings: RenderSettings, size: (u32, u32)) -> Result<Vec<u8>> {
    let (width, height) = size;
    if width == 0 || height == 0 {
        bail!("cannot export an empty {width}x{height} canvas");
    }
    let pixels = render_strokes_to_rgba(strokes, settings, size);
    let img = image::RgbaImage::from_raw(width, height, pixels)
        .ok_or_else(|| anyhow!("pixel buffer does not match {width}x{height}"))?;
    let mut png = Vec::new();
    img.write_to(&mut Cursor::new(&mut png), image::ImageOutputFormat::Png)
        .context("encode canvas as png")?;
    Ok(png)
}

pub fn png_data_uri(png: &[u8]) -> String {
    format!("{PNG_DATA_URI_PREFIX}{}", general_purpose::STANDARD.encode(png))
}

pub fn exe_relative_export_folder_from_path(exe_path: &Path) -> Result<PathBuf> {
    let parent = exe_path
        .parent()
        .ok_or_else(|| anyhow!("executable path has no parent: {}", exe_path.display()))?;
    Ok(parent.join(EXPORT_SUBDIR))
}

/// Configured folder, else the download folder, else next to the executable.
pub fn resolve_export_folder(configured: Option<&str>) -> Result<PathBuf> {
    if let Some(dir) = configured.map(str::trim).filter(|dir| !dir.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(downloads) = dirs_next::download_dir() {
        return Ok(downloads);
    }
    let exe_path = std::env::current_exe().context("resolve current executable")?;
    exe_relative_export_folder_from_path(&exe_path)
}

/// A written export and the same image as a `data:` URI.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CanvasExport {
    pub path: PathBuf,
    pub data_uri: String,
}

/// Writes `image.png` into `output_dir`, replacing an earlier export.
pub fn export_png_to_folder(
    strokes: &[Stroke],
    settings: RenderSettings,
    size: (u32, u32),
    output_dir: &Path,
) -> Result<CanvasExport> {
    let png = encode_png(strokes, settings, size)?;
    fs::create_dir_all(output_dir)
        .with_context(|| format!("create export folder {}", output_dir.display()))?;
    let path = output_dir.join(EXPORT_FILE_NAME);
    fs::write(&path, &png).with_context(|| format!("write export {}", path.display()))?;
    tracing::info!(path = %path.display(), strokes = strokes.len(), "exported canvas");
    Ok(CanvasExport {
        path,
        data_uri: png_data_uri(&png),
    })
}
