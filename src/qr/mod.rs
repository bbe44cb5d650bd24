//! QR code rendering and batch packaging
//!
//! The symbol encoding itself comes from the `qrcode` crate; this module
//! only scales it to a PNG of the requested size and bundles batches.

mod bundle;
mod encoder;
mod error;

pub use bundle::{batch_file_name, png_data_url, zip_pngs};
pub use encoder::{PngQrEncoder, QrEncoder};
pub use error::{QrError, Result};
