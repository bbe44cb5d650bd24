use super::models::Config;
use thiserror::Error;

/// Longest print job retention accepted from configuration (30 days)
pub const MAX_TTL_SECS: u64 = 30 * 24 * 60 * 60;

#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("print job TTL must be positive")]
    ZeroTtl,

    #[error("print job TTL of {0}s exceeds the 30 day maximum")]
    TtlTooLong(u64),

    #[error("sweep interval must be positive")]
    ZeroSweepInterval,

    #[error("public_base_url must be an http(s) URL, got '{0}'")]
    InvalidBaseUrl(String),

    #[error("max_payload_bytes must be positive")]
    ZeroPayloadLimit,

    #[error("QR sizes must satisfy min ({min}) <= default ({default}) <= max ({max})")]
    InvalidQrSizes { min: u32, default: u32, max: u32 },

    #[error("QR max_batch must be positive")]
    ZeroMaxBatch,
}

/// Validate the entire configuration
pub fn validate(config: &Config) -> Result<(), ValidationError> {
    validate_server(config)?;
    validate_print_jobs(config)?;
    validate_qr(config)?;
    Ok(())
}

fn validate_server(config: &Config) -> Result<(), ValidationError> {
    let url = &config.server.public_base_url;
    if !url.starts_with("http://") && !url.starts_with("https://") {
        return Err(ValidationError::InvalidBaseUrl(url.clone()));
    }

    if config.server.max_payload_bytes == 0 {
        return Err(ValidationError::ZeroPayloadLimit);
    }

    Ok(())
}

fn validate_print_jobs(config: &Config) -> Result<(), ValidationError> {
    if config.print_jobs.ttl_secs == 0 {
        return Err(ValidationError::ZeroTtl);
    }

    if config.print_jobs.ttl_secs > MAX_TTL_SECS {
        return Err(ValidationError::TtlTooLong(config.print_jobs.ttl_secs));
    }

    if config.print_jobs.sweep_interval_secs == 0 {
        return Err(ValidationError::ZeroSweepInterval);
    }

    Ok(())
}

fn validate_qr(config: &Config) -> Result<(), ValidationError> {
    let qr = &config.qr;
    if !(qr.min_size <= qr.default_size && qr.default_size <= qr.max_size) {
        return Err(ValidationError::InvalidQrSizes {
            min: qr.min_size,
            default: qr.default_size,
            max: qr.max_size,
        });
    }

    if qr.max_batch == 0 {
        return Err(ValidationError::ZeroMaxBatch);
    }

    Ok(())
}
