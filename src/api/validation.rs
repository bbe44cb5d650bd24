use thiserror::Error;

use crate::config::QrConfig;

#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum QrRequestError {
    #[error("URL parameter is required")]
    MissingUrl,
    #[error("URLs are required and must be an array")]
    MissingUrls,
    #[error("Maximum {0} QR codes per request")]
    TooManyUrls(usize),
    #[error("Size must be between {min} and {max} pixels")]
    SizeOutOfRange { min: u32, max: u32 },
}

/// Resolve the requested QR size: absent means the configured default,
/// anything not an integer within `[min_size, max_size]` is rejected
pub fn qr_size(raw: Option<&str>, limits: &QrConfig) -> Result<u32, QrRequestError> {
    let out_of_range = QrRequestError::SizeOutOfRange {
        min: limits.min_size,
        max: limits.max_size,
    };

    let Some(raw) = raw else {
        return Ok(limits.default_size);
    };

    let size: u32 = raw.trim().parse().map_err(|_| out_of_range.clone())?;
    if !(limits.min_size..=limits.max_size).contains(&size) {
        return Err(out_of_range);
    }

    Ok(size)
}

pub fn qr_url(url: Option<String>) -> Result<String, QrRequestError> {
    url.filter(|u| !u.is_empty())
        .ok_or(QrRequestError::MissingUrl)
}

/// Non-empty URL list, capped at `max` when given
pub fn qr_urls(urls: Option<Vec<String>>, max: Option<usize>) -> Result<Vec<String>, QrRequestError> {
    let urls = urls
        .filter(|u| !u.is_empty())
        .ok_or(QrRequestError::MissingUrls)?;

    if let Some(max) = max {
        if urls.len() > max {
            return Err(QrRequestError::TooManyUrls(max));
        }
    }

    Ok(urls)
}
