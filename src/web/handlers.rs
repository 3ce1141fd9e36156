//! HTTP handlers: thin I/O plumbing around the decode engine.
//!
//! Each engine error kind maps to its own status and message so a caller
//! can tell "not a steganographic image" apart from "corrupted payload";
//! nothing here ever turns a failed decode into a 2xx.

use axum::{
    extract::State,
    http::{header, StatusCode},
    response::IntoResponse,
    Json,
};
use base64::{engine::general_purpose, Engine as _};
use log::{error, info, warn};
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use uuid::Uuid;

use crate::grid::PixelGrid;
use crate::stego::sniff::{content_type_for, extension_for};
use crate::stego::{embed, DecodeError, PayloadTag};
use crate::web::source::image_bytes_from_field;
use crate::web::AppState;

#[derive(Debug, Deserialize)]
pub struct DecodeRequest {
    /// The carrier image: a `data:` URL or bare base64 bytes.
    pub image: String,
    /// Optional stem for the recovered file's name; cosmetic only, the
    /// engine ignores it.
    pub filename: Option<String>,
}

#[derive(Debug, Deserialize)]
pub struct EncodeRequest {
    pub image: String,
    /// Base64-encoded payload bytes to hide.
    pub payload: String,
    /// Optional type label to record in the header tag.
    pub type_tag: Option<String>,
}

#[derive(Serialize)]
pub struct DecodeResponse {
    pub success: bool,
    pub file_type: String,
    pub file_size: usize,
    pub file_data: String,
    pub filename: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct EncodeResponse {
    pub success: bool,
    pub image: String,
    pub message: String,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub success: bool,
    pub error: String,
}

type ErrorReply = (StatusCode, Json<ErrorResponse>);

fn reject(status: StatusCode, message: String) -> ErrorReply {
    (
        status,
        Json(ErrorResponse {
            success: false,
            error: message,
        }),
    )
}

fn status_for(err: &DecodeError) -> StatusCode {
    match err {
        DecodeError::UnsupportedImage(_) => StatusCode::UNPROCESSABLE_ENTITY,
        // The image is readable but carries no coherent payload from this
        // scheme; kept at 404 for parity with the pre-existing API.
        DecodeError::OutOfBounds { .. }
        | DecodeError::MalformedHeader(_)
        | DecodeError::TruncatedPayload { .. }
        | DecodeError::ChecksumMismatch { .. } => StatusCode::NOT_FOUND,
    }
}

pub async fn health_check() -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "service": "stegoscope",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// Shared front half of every endpoint: inline image bytes → pixel grid.
fn load_grid(
    state: &AppState,
    image_field: &str,
    request_id: &str,
) -> Result<PixelGrid, ErrorReply> {
    let bytes = image_bytes_from_field(image_field).map_err(|e| {
        warn!("[{}] rejected image source: {}", request_id, e);
        reject(StatusCode::BAD_REQUEST, e.to_string())
    })?;

    if bytes.len() > state.max_image_bytes {
        return Err(reject(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "image is {} bytes, above the configured limit of {}",
                bytes.len(),
                state.max_image_bytes
            ),
        ));
    }

    if matches!(image::guess_format(&bytes), Ok(image::ImageFormat::Jpeg)) {
        warn!(
            "[{}] carrier arrived as JPEG; lossy compression usually destroys LSB data",
            request_id
        );
    }

    PixelGrid::from_image_bytes(&bytes).map_err(|e| {
        warn!("[{}] undecodable image bytes: {}", request_id, e);
        reject(
            StatusCode::UNSUPPORTED_MEDIA_TYPE,
            format!("could not decode the supplied bytes as an image: {}", e),
        )
    })
}

pub async fn decode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecodeRequest>,
) -> Result<impl IntoResponse, ErrorReply> {
    let request_id = short_id();
    let grid = load_grid(&state, &req.image, &request_id)?;
    info!(
        "[{}] decoding {}x{} image",
        request_id,
        grid.width(),
        grid.height()
    );

    let result = state.engine.decode(&grid).map_err(|e| {
        error!("[{}] decode failed: {}", request_id, e);
        reject(status_for(&e), e.to_string())
    })?;

    let stem = req
        .filename
        .unwrap_or_else(|| format!("decoded_{}", request_id));
    let filename = format!("{}.{}", stem, extension_for(result.detected_type));
    info!(
        "[{}] recovered {} bytes of {} as {}",
        request_id, result.size, result.detected_type, filename
    );

    Ok((
        StatusCode::OK,
        Json(DecodeResponse {
            success: true,
            file_type: result.detected_type.to_string(),
            file_size: result.size,
            file_data: general_purpose::STANDARD.encode(&result.payload),
            filename,
            message: format!("{} file extracted successfully", result.detected_type),
        }),
    ))
}

/// Same pipeline as [`decode_handler`], but answers with the raw payload
/// bytes instead of a JSON envelope.
pub async fn decode_direct_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<DecodeRequest>,
) -> Result<impl IntoResponse, ErrorReply> {
    let request_id = short_id();
    let grid = load_grid(&state, &req.image, &request_id)?;

    let result = state.engine.decode(&grid).map_err(|e| {
        error!("[{}] decode failed: {}", request_id, e);
        reject(status_for(&e), e.to_string())
    })?;

    let stem = req
        .filename
        .unwrap_or_else(|| format!("decoded_{}", request_id));
    let filename = format!("{}.{}", stem, extension_for(result.detected_type));
    info!(
        "[{}] streaming {} bytes of {} as {}",
        request_id, result.size, result.detected_type, filename
    );

    Ok((
        StatusCode::OK,
        [
            (
                header::CONTENT_TYPE,
                content_type_for(result.detected_type).to_string(),
            ),
            (
                header::CONTENT_DISPOSITION,
                format!("attachment; filename=\"{}\"", filename),
            ),
        ],
        result.payload,
    ))
}

pub async fn encode_handler(
    State(state): State<Arc<AppState>>,
    Json(req): Json<EncodeRequest>,
) -> Result<impl IntoResponse, ErrorReply> {
    let request_id = short_id();

    let carrier = image_bytes_from_field(&req.image).map_err(|e| {
        warn!("[{}] rejected carrier source: {}", request_id, e);
        reject(StatusCode::BAD_REQUEST, e.to_string())
    })?;
    if carrier.len() > state.max_image_bytes {
        return Err(reject(
            StatusCode::PAYLOAD_TOO_LARGE,
            format!(
                "carrier is {} bytes, above the configured limit of {}",
                carrier.len(),
                state.max_image_bytes
            ),
        ));
    }

    let payload = general_purpose::STANDARD.decode(&req.payload).map_err(|e| {
        reject(
            StatusCode::BAD_REQUEST,
            format!("invalid base64 payload: {}", e),
        )
    })?;

    let tag = match req.type_tag.as_deref() {
        None => PayloadTag::Unknown,
        Some(label) => PayloadTag::from_label(label).ok_or_else(|| {
            reject(
                StatusCode::BAD_REQUEST,
                format!("unrecognized type tag: {}", label),
            )
        })?,
    };

    let png = embed(&carrier, &payload, tag, state.engine.config()).map_err(|e| {
        error!("[{}] embed failed: {}", request_id, e);
        let status = match e.downcast_ref::<DecodeError>() {
            Some(DecodeError::UnsupportedImage(_)) => StatusCode::UNPROCESSABLE_ENTITY,
            Some(_) => StatusCode::BAD_REQUEST,
            None => StatusCode::UNSUPPORTED_MEDIA_TYPE,
        };
        reject(status, e.to_string())
    })?;

    info!(
        "[{}] embedded {} payload bytes into stego PNG of {} bytes",
        request_id,
        payload.len(),
        png.len()
    );

    Ok((
        StatusCode::OK,
        Json(EncodeResponse {
            success: true,
            image: format!(
                "data:image/png;base64,{}",
                general_purpose::STANDARD.encode(&png)
            ),
            message: format!("payload embedded ({} bytes hidden)", payload.len()),
        }),
    ))
}

fn short_id() -> String {
    Uuid::new_v4().simple().to_string()[..8].to_string()
}
