//! Accepted upload formats and limits.
//!
//! The client validates images before they go on the wire: the extension
//! and the file's magic bytes must both identify one of the accepted
//! formats, and the file must fit the upload cap.

use std::path::Path;

/// Upload size cap (10 MiB).
pub const MAX_UPLOAD_BYTES: u64 = 10 * 1024 * 1024;

const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF];
const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A];
// TIFF headers carry a byte-order mark, so there are two valid prefixes.
const TIFF_MAGIC_LE: &[u8] = &[0x49, 0x49, 0x2A, 0x00];
const TIFF_MAGIC_BE: &[u8] = &[0x4D, 0x4D, 0x00, 0x2A];

/// Image formats accepted for screening uploads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Jpeg,
    Png,
    Tiff,
}

impl ImageFormat {
    /// Identify a format from a file extension (case-insensitive).
    pub fn from_extension(ext: &str) -> Option<ImageFormat> {
        match ext.to_ascii_lowercase().as_str() {
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "png" => Some(ImageFormat::Png),
            "tif" | "tiff" => Some(ImageFormat::Tiff),
            _ => None,
        }
    }

    /// Identify a format from a path's extension.
    pub fn from_path(path: &Path) -> Option<ImageFormat> {
        path.extension()
            .and_then(|e| e.to_str())
            .and_then(ImageFormat::from_extension)
    }

    /// Identify a format from leading file bytes.
    pub fn sniff(bytes: &[u8]) -> Option<ImageFormat> {
        if bytes.starts_with(JPEG_MAGIC) {
            Some(ImageFormat::Jpeg)
        } else if bytes.starts_with(PNG_MAGIC) {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(TIFF_MAGIC_LE) || bytes.starts_with(TIFF_MAGIC_BE) {
            Some(ImageFormat::Tiff)
        } else {
            None
        }
    }

    /// MIME type sent with the multipart upload.
    pub fn mime_type(self) -> &'static str {
        match self {
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Png => "image/png",
            ImageFormat::Tiff => "image/tiff",
        }
    }
}
