//! Native icon container output.
//!
//! `.ico` sources are copied byte for byte. Raster sources are decoded and
//! re-encoded as a multi-resolution ICO with the standard Windows frame sizes:
//! - 16, 24: title bars and small toolbar icons
//! - 32, 48: Explorer standard and large views
//! - 64, 128, 256: extra large and high-DPI views

use anyhow::{Context, Result};
use ico::{IconDir, IconDirEntry, IconImage, ResourceType};
use image::imageops::FilterType;
use image::DynamicImage;
use std::fs::{self, File};
use std::io::BufWriter;
use std::path::Path;

/// Frame sizes written into generated containers.
pub const ICO_FRAME_SIZES: [u32; 7] = [16, 24, 32, 48, 64, 128, 256];

/// How the container at the destination was produced.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IconOutput {
    Copied,
    Converted { frames: usize },
}

/// Frame sizes for a source whose largest side is `source_side`.
///
/// Frames larger than the source are skipped to avoid upscaling, but the
/// smallest frame is always kept so the container is never empty.
pub fn frame_sizes_for(source_side: u32) -> Vec<u32> {
    let sizes: Vec<u32> = ICO_FRAME_SIZES
        .iter()
        .copied()
        .filter(|&s| s <= source_side)
        .collect();
    if sizes.is_empty() {
        vec![ICO_FRAME_SIZES[0]]
    } else {
        sizes
    }
}

fn is_ico(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("ico"))
}

/// Writes `src` to `dest` as a native icon container.
pub fn write_app_icon(src: &Path, dest: &Path) -> Result<IconOutput> {
    if let Some(parent) = dest.parent() {
        fs::create_dir_all(parent)?;
    }
    if is_ico(src) {
        fs::copy(src, dest)
            .with_context(|| format!("copy {} to {}", src.display(), dest.display()))?;
        return Ok(IconOutput::Copied);
    }
    let img = image::open(src).with_context(|| format!("open icon {}", src.display()))?;
    let frames = encode_ico(&img, dest)?;
    Ok(IconOutput::Converted { frames })
}

/// Encodes `img` into an ICO file at `dest`; returns the number of frames.
pub fn encode_ico(img: &DynamicImage, dest: &Path) -> Result<usize> {
    let mut icon_dir = IconDir::new(ResourceType::Icon);
    let sizes = frame_sizes_for(img.width().max(img.height()));

    for &size in &sizes {
        let rgba = img
            .resize_exact(size, size, FilterType::Lanczos3)
            .to_rgba8();
        let icon_image = IconImage::from_rgba_data(size, size, rgba.into_raw());
        let entry = IconDirEntry::encode(&icon_image)
            .with_context(|| format!("encode {size}x{size} frame"))?;
        icon_dir.add_entry(entry);
        tracing::trace!("added {}x{} frame", size, size);
    }

    let file = File::create(dest).with_context(|| format!("create {}", dest.display()))?;
    icon_dir
        .write(BufWriter::new(file))
        .with_context(|| format!("write {}", dest.display()))?;
    Ok(sizes.len())
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{ImageFormat, Rgba, RgbaImage};

    fn write_png(path: &Path, side: u32) {
        let img = RgbaImage::from_pixel(side, side, Rgba([200, 40, 40, 255]));
        DynamicImage::ImageRgba8(img)
            .save_with_format(path, ImageFormat::Png)
            .unwrap();
    }

    #[test]
    fn frame_sizes_skip_upscaling() {
        assert_eq!(frame_sizes_for(48), vec![16, 24, 32, 48]);
        assert_eq!(frame_sizes_for(1024), ICO_FRAME_SIZES.to_vec());
        assert_eq!(frame_sizes_for(8), vec![16]);
    }

    #[test]
    fn png_converted_to_multi_frame_ico() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("icon-64.png");
        let dest = dir.path().join("out").join("app.ico");
        write_png(&src, 64);

        let out = write_app_icon(&src, &dest).unwrap();
        assert_eq!(out, IconOutput::Converted { frames: 5 });

        let parsed = IconDir::read(File::open(&dest).unwrap()).unwrap();
        let mut widths: Vec<u32> = parsed.entries().iter().map(|e| e.width()).collect();
        widths.sort_unstable();
        assert_eq!(widths, vec![16, 24, 32, 48, 64]);
    }

    #[test]
    fn ico_copied_verbatim() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("given.ICO");
        fs::write(&src, b"not really an icon").unwrap();
        let dest = dir.path().join("app.ico");
        assert_eq!(write_app_icon(&src, &dest).unwrap(), IconOutput::Copied);
        assert_eq!(fs::read(&dest).unwrap(), b"not really an icon");
    }

    #[test]
    fn unreadable_raster_is_error() {
        let dir = tempfile::tempdir().unwrap();
        let src = dir.path().join("broken.png");
        fs::write(&src, b"garbage").unwrap();
        assert!(write_app_icon(&src, &dir.path().join("app.ico")).is_err());
    }
}
