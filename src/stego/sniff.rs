//! # Payload Type Sniffing
//!
//! Classifies an extracted payload by its magic bytes. The signature set is
//! a static table checked in priority order, so classification is
//! deterministic and easy to extend.
//!
//! Sniffing never fails: an unrecognized payload is a legitimate outcome
//! (the hidden file may simply be a format we do not know) and classifies
//! as the generic `"binary"` label. Sniffing is also advisory only — when
//! the header carries a recognized type tag, that tag wins.

/// How many leading bytes a secondary marker may appear within.
const MARKER_WINDOW: usize = 20;

/// Label returned when nothing in the table matches.
pub const GENERIC_LABEL: &str = "binary";

struct Signature {
    prefix: &'static [u8],
    /// Secondary marker required within the first [`MARKER_WINDOW`] bytes;
    /// disambiguates container formats that share a prefix (RIFF).
    marker: Option<&'static [u8]>,
    label: &'static str,
}

/// Checked top to bottom; order matters where prefixes overlap, and the
/// weakest prefix (`BM`) sits last.
const SIGNATURES: &[Signature] = &[
    Signature { prefix: b"\x89PNG\r\n\x1a\n", marker: None, label: "png" },
    Signature { prefix: b"\xFF\xD8\xFF", marker: None, label: "jpeg" },
    Signature { prefix: b"GIF87a", marker: None, label: "gif" },
    Signature { prefix: b"GIF89a", marker: None, label: "gif" },
    Signature { prefix: b"RIFF", marker: Some(b"WEBP"), label: "webp" },
    Signature { prefix: b"RIFF", marker: Some(b"AVI "), label: "avi" },
    Signature { prefix: b"RIFF", marker: Some(b"WAVE"), label: "wav" },
    Signature { prefix: b"II*\x00", marker: None, label: "tiff" },
    Signature { prefix: b"MM\x00*", marker: None, label: "tiff" },
    Signature { prefix: b"\x00\x00\x01\x00", marker: None, label: "ico" },
    Signature { prefix: b"\x1A\x45\xDF\xA3", marker: None, label: "mkv" },
    Signature { prefix: b"%PDF", marker: None, label: "pdf" },
    Signature { prefix: b"ID3", marker: None, label: "mp3" },
    Signature { prefix: b"\xFF\xFB", marker: None, label: "mp3" },
    Signature { prefix: b"BM", marker: None, label: "bmp" },
];

/// Classify `data` by its leading bytes. Returns the best-matching label or
/// [`GENERIC_LABEL`] when nothing matches.
pub fn sniff(data: &[u8]) -> &'static str {
    // ISO base-media containers (MP4/MOV) carry their magic at offset 4.
    if data.len() >= 12 && &data[4..8] == b"ftyp" {
        return if data[8..12].starts_with(b"qt") {
            "mov"
        } else {
            "mp4"
        };
    }

    let window = &data[..data.len().min(MARKER_WINDOW)];
    for sig in SIGNATURES {
        if !data.starts_with(sig.prefix) {
            continue;
        }
        match sig.marker {
            None => return sig.label,
            Some(marker) => {
                if window.windows(marker.len()).any(|chunk| chunk == marker) {
                    return sig.label;
                }
            }
        }
    }
    GENERIC_LABEL
}

/// File extension for a type label, used when naming the recovered file.
pub fn extension_for(label: &str) -> &'static str {
    match label {
        "png" => "png",
        "jpeg" => "jpg",
        "gif" => "gif",
        "webp" => "webp",
        "bmp" => "bmp",
        "tiff" => "tiff",
        "ico" => "ico",
        "mp4" => "mp4",
        "avi" => "avi",
        "mkv" => "mkv",
        "mov" => "mov",
        "mp3" => "mp3",
        "wav" => "wav",
        "pdf" => "pdf",
        _ => "bin",
    }
}

/// MIME type for a type label, used by the direct download response.
pub fn content_type_for(label: &str) -> &'static str {
    match label {
        "png" => "image/png",
        "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "tiff" => "image/tiff",
        "ico" => "image/x-icon",
        "mp4" => "video/mp4",
        "avi" => "video/x-msvideo",
        "mkv" => "video/x-matroska",
        "mov" => "video/quicktime",
        "mp3" => "audio/mpeg",
        "wav" => "audio/wav",
        "pdf" => "application/pdf",
        _ => "application/octet-stream",
    }
}
