use thiserror::Error;

#[derive(Debug, Error)]
pub enum QrError {
    #[error("QR code generation failed: {0}")]
    Encode(String),

    #[error("PNG encoding failed: {0}")]
    Image(#[from] image::ImageError),

    #[error("ZIP archive failed: {0}")]
    Archive(#[from] zip::result::ZipError),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, QrError>;
