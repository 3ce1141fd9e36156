//! Request image parsing: data URLs and bare base64.
//!
//! Fetching remote images over HTTP is an external collaborator's job and
//! happens before this service is called; the API therefore accepts the
//! image inline, either as a `data:` URL or as bare base64, and answers
//! remote URLs with an explicit, actionable error.

use base64::{engine::general_purpose, Engine as _};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum SourceError {
    #[error("remote URL fetching is not supported; supply a data: URL or base64-encoded image bytes")]
    RemoteUrl,

    #[error("data URL does not contain an image (media type: {0})")]
    NotAnImage(String),

    #[error("data URL has no comma-separated payload")]
    MissingPayload,

    #[error("invalid base64 image data: {0}")]
    InvalidBase64(#[from] base64::DecodeError),
}

/// Decode the `image` field of a request into raw image-file bytes.
pub fn image_bytes_from_field(value: &str) -> Result<Vec<u8>, SourceError> {
    let value = value.trim();
    if value.starts_with("http://") || value.starts_with("https://") {
        return Err(SourceError::RemoteUrl);
    }
    if let Some(rest) = value.strip_prefix("data:") {
        let (media, payload) = rest.split_once(',').ok_or(SourceError::MissingPayload)?;
        if !media.contains("image/") {
            return Err(SourceError::NotAnImage(media.to_string()));
        }
        return Ok(general_purpose::STANDARD.decode(payload)?);
    }
    Ok(general_purpose::STANDARD.decode(value)?)
}
