//! Source image decoding and mosaic export

use crate::io::error::{MosaicError, Result, file_system_error};
use image::{DynamicImage, ImageFormat, ImageReader, RgbaImage};
use std::path::Path;

/// Decode the source photograph at `path` into RGBA pixels
///
/// The format is sniffed from the file contents rather than the extension.
///
/// # Errors
///
/// Returns `MosaicError::SourceImage` if the file cannot be opened or is not
/// a decodable image
pub fn load_source_image(path: &Path) -> Result<RgbaImage> {
    let source_error = |source: image::ImageError| MosaicError::SourceImage {
        path: path.to_path_buf(),
        source,
    };

    let reader = ImageReader::open(path)
        .and_then(ImageReader::with_guessed_format)
        .map_err(|e| source_error(image::ImageError::IoError(e)))?;
    let decoded = reader.decode().map_err(source_error)?;
    Ok(decoded.to_rgba8())
}

/// Write the mosaic to `output_path`, choosing the encoder from its extension
///
/// JPEG has no alpha channel, so JPEG output is flattened to RGB first.
///
/// # Errors
///
/// Returns an error if:
/// - The parent directory cannot be created
/// - The extension does not name a supported format
/// - The image cannot be encoded or written
pub fn save_mosaic(image: &RgbaImage, output_path: &Path) -> Result<()> {
    let export_error = |source: image::ImageError| MosaicError::ImageExport {
        path: output_path.to_path_buf(),
        source,
    };

    let format = ImageFormat::from_path(output_path).map_err(export_error)?;

    if let Some(parent) = output_path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent)
            .map_err(|e| file_system_error(parent, "create directory", e))?;
    }

    let result = if format == ImageFormat::Jpeg {
        DynamicImage::ImageRgba8(image.clone())
            .to_rgb8()
            .save_with_format(output_path, format)
    } else {
        image.save_with_format(output_path, format)
    };

    result.map_err(export_error)?;
    log::info!(
        "wrote {}x{} mosaic to '{}'",
        image.width(),
        image.height(),
        output_path.display()
    );
    Ok(())
}
