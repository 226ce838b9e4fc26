//! Product photo and logo encoding for table cells.
//!
//! Uploaded images are shrunk to fit a 300×300 box, re-encoded as PNG and
//! stored as standard base64 text. The empty string is the "no image"
//! sentinel and must be checked by callers before [`decode`].

use crate::error::CodecError;
use base64::{Engine as _, engine::general_purpose};
use image::{DynamicImage, GenericImageView, ImageOutputFormat};
use std::io::Cursor;

/// Longest side of a stored thumbnail, in pixels
pub const MAX_THUMBNAIL_SIDE: u32 = 300;

/// Turn an uploaded image into cell text
///
/// Returns an empty string (no image) when the upload cannot be decoded.
pub fn encode(raw_image_bytes: &[u8]) -> String {
    let img = match image::load_from_memory(raw_image_bytes) {
        Ok(img) => img,
        Err(e) => {
            log::warn!("Discarding undecodable image upload: {}", e);
            return String::new();
        }
    };

    let thumb = fit_within(img, MAX_THUMBNAIL_SIDE);
    let mut buffer = Cursor::new(Vec::new());
    if let Err(e) = thumb.write_to(&mut buffer, ImageOutputFormat::Png) {
        log::warn!("Failed to re-encode image as PNG: {}", e);
        return String::new();
    }
    general_purpose::STANDARD.encode(buffer.into_inner())
}

/// Cell text back to PNG bytes
///
/// # Errors
/// * `CodecError::InvalidEncoding` if the text is not base64; the empty
///   sentinel is also rejected
pub fn decode(text: &str) -> Result<Vec<u8>, CodecError> {
    if text.is_empty() {
        return Err(CodecError::InvalidEncoding("empty image sentinel".to_string()));
    }
    general_purpose::STANDARD
        .decode(text.trim())
        .map_err(|e| CodecError::InvalidEncoding(e.to_string()))
}

/// Decode cell text all the way to pixels
pub fn decode_image(text: &str) -> Result<DynamicImage, CodecError> {
    let bytes = decode(text)?;
    image::load_from_memory(&bytes).map_err(|e| CodecError::InvalidEncoding(e.to_string()))
}

/// Shrink so that the longest side is at most `max_side`, keeping aspect
///
/// Images already inside the box are returned untouched.
pub fn fit_within(img: DynamicImage, max_side: u32) -> DynamicImage {
    let (w, h) = img.dimensions();
    if w <= max_side && h <= max_side {
        return img;
    }
    img.thumbnail(max_side, max_side)
}
