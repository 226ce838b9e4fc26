//! Printable product labels.
//!
//! A label is a fixed layout on a white canvas:
//!
//! ```text
//! +------------------------------+
//! |           [logo]             |
//! |        Product name          |
//! |   ||| || |||| | ||| || |||   |
//! +------------------------------+
//! ```
//!
//! The barcode is Code 128 (character set B). Anything that does not fit the
//! canvas is clipped; only unsupported barcode characters are an error.

use crate::config::AppConfig;
use crate::error::LabelError;
use barcoders::sym::code128::Code128;
use image::imageops::{self, FilterType};
use image::{DynamicImage, ImageOutputFormat, Rgb, RgbImage, Rgba, RgbaImage};
use plotters::prelude::*;
use std::io::Cursor;
use std::path::Path;

pub const DEFAULT_WIDTH: u32 = 300;
pub const DEFAULT_HEIGHT: u32 = 200;

const BORDER: u32 = 2;
const LOGO_SIDE: u32 = 50;
const TOP_PADDING: u32 = 6;
const NAME_MAX_CHARS: usize = 20;
const FONT_SIZE: u32 = 18;
// Rough advance of one glyph at FONT_SIZE, used for centring
const CHAR_WIDTH_ESTIMATE: u32 = 9;
const BARCODE_MARGIN: u32 = 10;
const BARCODE_BAND: u32 = 80;

const WHITE_PX: Rgb<u8> = Rgb([255, 255, 255]);
const BLACK_PX: Rgb<u8> = Rgb([0, 0, 0]);

/// Renders labels, optionally branded with a logo
#[derive(Clone, Default)]
pub struct LabelRenderer {
    logo: Option<DynamicImage>,
}

impl LabelRenderer {
    pub fn new(logo: Option<DynamicImage>) -> Self {
        Self { logo }
    }

    /// Renderer using the configured logo, if the file exists and decodes
    pub fn from_config(config: &AppConfig) -> Self {
        let logo = config.logo().and_then(|path| match load_logo(path) {
            Ok(img) => Some(img),
            Err(e) => {
                log::warn!("Ignoring logo {}: {}", path.display(), e);
                None
            }
        });
        Self::new(logo)
    }

    /// Compose a `width × height` label
    ///
    /// # Errors
    /// * `LabelError::EncodingUnsupported` if `barcode_value` is empty or has
    ///   characters outside printable ASCII
    pub fn render(
        &self,
        barcode_value: &str,
        product_name: &str,
        width: u32,
        height: u32,
    ) -> Result<RgbImage, LabelError> {
        let modules = encode_code128(barcode_value)?;

        let mut canvas = RgbImage::from_pixel(width, height, WHITE_PX);
        if width == 0 || height == 0 {
            return Ok(canvas);
        }
        draw_border(&mut canvas);

        let mut cursor = BORDER + TOP_PADDING;
        if let Some(logo) = &self.logo {
            paste_logo(&mut canvas, logo, cursor);
            cursor += LOGO_SIDE + 4;
        }

        draw_name(&mut canvas, product_name, cursor);
        cursor += FONT_SIZE + 8;

        let band = BARCODE_BAND.min(height.saturating_sub(cursor + BORDER + 4));
        draw_barcode(&mut canvas, &modules, cursor, band);

        Ok(canvas)
    }

    /// Render and encode as PNG for download
    pub fn render_png(
        &self,
        barcode_value: &str,
        product_name: &str,
        width: u32,
        height: u32,
    ) -> Result<Vec<u8>, LabelError> {
        let label = self.render(barcode_value, product_name, width, height)?;
        let mut buffer = Cursor::new(Vec::new());
        DynamicImage::ImageRgb8(label)
            .write_to(&mut buffer, ImageOutputFormat::Png)
            .map_err(|e| LabelError::Encode(e.to_string()))?;
        Ok(buffer.into_inner())
    }
}

pub fn load_logo(path: &Path) -> Result<DynamicImage, LabelError> {
    Ok(image::open(path)?)
}

/// Bar/space modules (1 = bar) for `value` in Code 128 set B
pub fn encode_code128(value: &str) -> Result<Vec<u8>, LabelError> {
    let supported = !value.is_empty() && value.chars().all(|c| (' '..='~').contains(&c));
    if !supported {
        return Err(LabelError::EncodingUnsupported(value.to_string()));
    }
    // 'Ɓ' selects character set B
    let barcode = Code128::new(format!("Ɓ{}", value))
        .map_err(|_| LabelError::EncodingUnsupported(value.to_string()))?;
    Ok(barcode.encode())
}

/// First `NAME_MAX_CHARS` characters of a product name
pub fn truncate_name(name: &str) -> String {
    name.trim().chars().take(NAME_MAX_CHARS).collect()
}

fn draw_border(canvas: &mut RgbImage) {
    let (w, h) = canvas.dimensions();
    for y in 0..h {
        for x in 0..w {
            let edge = x < BORDER || y < BORDER || x + BORDER >= w || y + BORDER >= h;
            if edge {
                canvas.put_pixel(x, y, BLACK_PX);
            }
        }
    }
}

fn paste_logo(canvas: &mut RgbImage, logo: &DynamicImage, top: u32) {
    let logo = logo
        .resize_exact(LOGO_SIDE, LOGO_SIDE, FilterType::Triangle)
        .to_rgba8();
    // Flatten transparency onto white before pasting on the RGB canvas
    let mut flat = RgbaImage::from_pixel(LOGO_SIDE, LOGO_SIDE, Rgba([255, 255, 255, 255]));
    imageops::overlay(&mut flat, &logo, 0, 0);
    let flat = DynamicImage::ImageRgba8(flat).to_rgb8();

    let x = (i64::from(canvas.width()) - i64::from(LOGO_SIDE)) / 2;
    imageops::overlay(canvas, &flat, x, i64::from(top));
}

fn draw_name(canvas: &mut RgbImage, product_name: &str, top: u32) {
    let name = truncate_name(product_name);
    if name.is_empty() {
        return;
    }
    let (w, h) = canvas.dimensions();
    let estimated = CHAR_WIDTH_ESTIMATE * name.chars().count() as u32;
    let x = w.saturating_sub(estimated) / 2;

    let buffer: &mut [u8] = canvas;
    let root = BitMapBackend::with_buffer(buffer, (w, h)).into_drawing_area();
    let style = ("sans-serif", f64::from(FONT_SIZE)).into_font().color(&BLACK);
    if let Err(e) = root.draw_text(&name, &style, (x as i32, top as i32)) {
        log::warn!("Label text for {:?} not drawn: {}", name, e);
        return;
    }
    if let Err(e) = root.present() {
        log::warn!("Label text for {:?} not drawn: {}", name, e);
    }
}

fn draw_barcode(canvas: &mut RgbImage, modules: &[u8], top: u32, band: u32) {
    let (w, h) = canvas.dimensions();
    if modules.is_empty() || band == 0 {
        return;
    }
    let available = w.saturating_sub(2 * BARCODE_MARGIN);
    let module_width = (available / modules.len() as u32).max(1);
    let total = module_width * modules.len() as u32;
    let left = if total <= available {
        (w - total) / 2
    } else {
        BARCODE_MARGIN
    };

    let x_limit = w.saturating_sub(BORDER);
    let y_limit = (top + band).min(h.saturating_sub(BORDER));
    for (i, &module) in modules.iter().enumerate() {
        if module == 0 {
            continue;
        }
        let x0 = left + i as u32 * module_width;
        for x in x0..(x0 + module_width).min(x_limit) {
            for y in top..y_limit {
                canvas.put_pixel(x, y, BLACK_PX);
            }
        }
    }
}
