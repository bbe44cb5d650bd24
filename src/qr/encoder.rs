use std::io::Cursor;

use image::{GrayImage, ImageFormat, Luma};
use qrcode::{Color, QrCode};

use super::error::{QrError, Result};

/// Renders a payload as a QR code PNG
pub trait QrEncoder: Send + Sync {
    /// Encode `data` into a square PNG roughly `size` pixels wide
    fn encode_png(&self, data: &str, size: u32) -> Result<Vec<u8>>;
}

/// PNG encoder backed by the `qrcode` crate.
///
/// The symbol plus its quiet zone is scaled to fill exactly `size × size`
/// pixels. When `size` is smaller than the symbol, one pixel per module is
/// used instead.
#[derive(Debug, Clone, Copy)]
pub struct PngQrEncoder {
    margin: u32,
}

impl PngQrEncoder {
    pub fn new(margin: u32) -> Self {
        Self { margin }
    }

    pub fn render(&self, data: &str, size: u32) -> Result<GrayImage> {
        let code = QrCode::new(data.as_bytes()).map_err(|e| QrError::Encode(e.to_string()))?;

        let modules = code.width() as u32;
        let total = modules + 2 * self.margin;
        let side = size.max(total);

        let img = GrayImage::from_fn(side, side, |x, y| {
            let mx = (x as u64 * total as u64 / side as u64) as u32;
            let my = (y as u64 * total as u64 / side as u64) as u32;

            let in_symbol = (self.margin..self.margin + modules).contains(&mx)
                && (self.margin..self.margin + modules).contains(&my);
            let is_dark = in_symbol
                && code[((mx - self.margin) as usize, (my - self.margin) as usize)] == Color::Dark;

            Luma([if is_dark { 0u8 } else { 255u8 }])
        });

        Ok(img)
    }
}

impl Default for PngQrEncoder {
    fn default() -> Self {
        Self::new(1)
    }
}

impl QrEncoder for PngQrEncoder {
    fn encode_png(&self, data: &str, size: u32) -> Result<Vec<u8>> {
        let img = self.render(data, size)?;

        let mut png_bytes = Vec::new();
        img.write_to(&mut Cursor::new(&mut png_bytes), ImageFormat::Png)?;

        Ok(png_bytes)
    }
}
