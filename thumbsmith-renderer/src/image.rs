//! Image loading utilities.
//!
//! Supports loading images from raw bytes and base64-encoded data URIs, and
//! encoding raw bytes back into embeddable data URIs.

use base64::Engine;
use thumbsmith_core::{ImageAsset, ImageFormat};

use crate::error::{RenderError, RenderResult};

/// Decoded image data.
#[derive(Debug, Clone)]
pub struct Bitmap {
    /// Width in pixels.
    pub width: u32,
    /// Height in pixels.
    pub height: u32,
    /// RGBA pixel data (4 bytes per pixel).
    pub data: Vec<u8>,
    /// Original format of the image.
    pub format: ImageFormat,
}

/// Detect an image format from magic bytes.
#[must_use]
pub fn detect_format(data: &[u8]) -> Option<ImageFormat> {
    // PNG: 89 50 4E 47
    if data.starts_with(&[0x89, 0x50, 0x4E, 0x47]) {
        return Some(ImageFormat::Png);
    }

    // JPEG: FF D8 FF
    if data.starts_with(&[0xFF, 0xD8, 0xFF]) {
        return Some(ImageFormat::Jpeg);
    }

    // WebP: RIFF....WEBP
    if data.len() >= 12 && &data[0..4] == b"RIFF" && &data[8..12] == b"WEBP" {
        return Some(ImageFormat::WebP);
    }

    // SVG documents start as XML text
    if data.starts_with(b"<svg") || data.starts_with(b"<?xml") {
        return Some(ImageFormat::Svg);
    }

    None
}

/// Decode an image from raw bytes.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable raster image.
pub fn load_image_from_bytes(data: &[u8]) -> RenderResult<Bitmap> {
    let format = detect_format(data).unwrap_or(ImageFormat::Png);

    let img = image::load_from_memory(data)
        .map_err(|e| RenderError::Resource(format!("Failed to decode image: {e}")))?;

    let rgba = img.to_rgba8();
    let (width, height) = rgba.dimensions();

    Ok(Bitmap {
        width,
        height,
        data: rgba.into_raw(),
        format,
    })
}

/// Decode an image from a base64 data URI.
///
/// Supports formats like: `data:image/png;base64,iVBORw0KGgo...`
///
/// # Errors
///
/// Returns an error if the data URI is malformed or the image cannot be
/// decoded.
pub fn load_image_from_data_uri(uri: &str) -> RenderResult<Bitmap> {
    load_image_from_bytes(&decode_data_uri(uri)?)
}

/// Extract the raw bytes of a base64 data URI.
///
/// # Errors
///
/// Returns an error if the URI has no `data:` scheme, no payload, or
/// invalid base64.
pub fn decode_data_uri(uri: &str) -> RenderResult<Vec<u8>> {
    let rest = uri
        .strip_prefix("data:")
        .ok_or_else(|| RenderError::Resource("Not a data URI".to_string()))?;

    let comma = rest
        .find(',')
        .ok_or_else(|| RenderError::Resource("Invalid data URI: missing comma".to_string()))?;
    let (metadata, payload) = rest.split_at(comma);
    let payload = &payload[1..];

    if metadata.contains(";base64") {
        base64::engine::general_purpose::STANDARD
            .decode(payload)
            .map_err(|e| RenderError::Resource(format!("Failed to decode base64: {e}")))
    } else {
        Err(RenderError::Resource(
            "Unsupported data URI encoding".to_string(),
        ))
    }
}

/// Encode raw image bytes as a base64 data URI, detecting the MIME type
/// from magic bytes.
#[must_use]
pub fn encode_data_uri(data: &[u8]) -> String {
    let mime = detect_format(data).map_or("application/octet-stream", ImageFormat::mime);
    let payload = base64::engine::general_purpose::STANDARD.encode(data);
    format!("data:{mime};base64,{payload}")
}

/// Build an [`ImageAsset`] from decoded bytes, capturing the natural size.
///
/// This is the bridge a host crosses once its (asynchronous) decode has
/// finished: the resulting asset is what the editor integrates.
///
/// # Errors
///
/// Returns an error if the bytes are not a decodable raster image.
#[allow(clippy::cast_precision_loss)]
pub fn asset_from_bytes(src: impl Into<String>, data: &[u8]) -> RenderResult<ImageAsset> {
    let bitmap = load_image_from_bytes(data)?;
    Ok(ImageAsset::new(
        src,
        bitmap.format,
        bitmap.width as f32,
        bitmap.height as f32,
    ))
}

#[cfg(test)]
mod tests {
    use super::*;

    // 1x1 red pixel PNG
    const RED_DOT: &str = "iVBORw0KGgoAAAANSUhEUgAAAAEAAAABCAYAAAAfFcSJAAAADUlEQVR42mP8z8DwHwAFBQIAX8jx0gAAAABJRU5ErkJggg==";

    #[test]
    fn test_detect_format() {
        assert_eq!(
            detect_format(&[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A]),
            Some(ImageFormat::Png)
        );
        assert_eq!(
            detect_format(&[0xFF, 0xD8, 0xFF, 0xE0]),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            detect_format(b"RIFF\x00\x00\x00\x00WEBP"),
            Some(ImageFormat::WebP)
        );
        assert_eq!(detect_format(b"<svg xmlns="), Some(ImageFormat::Svg));
        assert_eq!(detect_format(b"plain text"), None);
    }

    #[test]
    fn test_data_uri_round_trip() {
        let uri = format!("data:image/png;base64,{RED_DOT}");
        let bitmap = load_image_from_data_uri(&uri).expect("decode");
        assert_eq!(bitmap.width, 1);
        assert_eq!(bitmap.height, 1);
        assert_eq!(bitmap.format, ImageFormat::Png);

        let bytes = decode_data_uri(&uri).expect("payload");
        assert_eq!(encode_data_uri(&bytes), uri);
    }

    #[test]
    fn test_invalid_data_uri() {
        assert!(load_image_from_data_uri("not a data uri").is_err());
        assert!(load_image_from_data_uri("data:image/png").is_err());
    }

    #[test]
    fn test_asset_from_bytes_captures_size() {
        let bytes = decode_data_uri(&format!("data:image/png;base64,{RED_DOT}")).expect("bytes");
        let asset = asset_from_bytes("dot.png", &bytes).expect("asset");
        assert!((asset.width - 1.0).abs() < f32::EPSILON);
        assert!((asset.height - 1.0).abs() < f32::EPSILON);
        assert_eq!(asset.format, ImageFormat::Png);
    }
}
