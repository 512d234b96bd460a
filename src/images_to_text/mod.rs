//! Turns an uploaded document into raw text for the text parser.
//!
//! Actual OCR and PDF text extraction happen in an [`OcrBackend`]; this module
//! only validates the MIME type and routes the bytes.

mod ocr;

pub use ocr::GoogleVisionBackend;

use async_trait::async_trait;
use log::debug;

use crate::error::ImportError;

/// Document types the import path accepts.
pub const ACCEPTED_MIME_TYPES: &[&str] = &[
    "text/plain",
    "application/pdf",
    "image/jpeg",
    "image/png",
    "image/gif",
    "image/webp",
    "image/bmp",
    "image/tiff",
];

/// External text-extraction service (OCR engine, PDF text layer, ...).
#[async_trait]
pub trait OcrBackend: Send + Sync {
    fn supports(&self, mime: &str) -> bool;

    async fn extract_text(&self, bytes: &[u8], mime: &str) -> Result<String, ImportError>;
}

/// Text that was already extracted upstream: the bytes are decoded as UTF-8.
#[derive(Debug, Default, Clone, Copy)]
pub struct PlainTextBackend;

#[async_trait]
impl OcrBackend for PlainTextBackend {
    fn supports(&self, mime: &str) -> bool {
        mime == "text/plain"
    }

    async fn extract_text(&self, bytes: &[u8], _mime: &str) -> Result<String, ImportError> {
        String::from_utf8(bytes.to_vec())
            .map_err(|e| ImportError::InvalidInput(format!("text is not valid UTF-8: {}", e)))
    }
}

/// Lower-cased MIME essence: `"Image/JPEG; q=1"` becomes `"image/jpeg"`.
pub fn normalize_mime(mime: &str) -> String {
    let essence = mime.split(';').next().unwrap_or_default().trim().to_lowercase();
    match essence.as_str() {
        "image/jpg" | "image/pjpeg" => "image/jpeg".to_string(),
        _ => essence,
    }
}

/// Extracts text from `bytes`.
///
/// Plain text never needs a backend. Everything else goes to `backend`, and
/// a type the backend cannot read is reported as unsupported rather than
/// attempted.
pub async fn extract(
    bytes: &[u8],
    mime: &str,
    backend: Option<&dyn OcrBackend>,
) -> Result<String, ImportError> {
    let mime = normalize_mime(mime);
    if !ACCEPTED_MIME_TYPES.contains(&mime.as_str()) {
        return Err(ImportError::UnsupportedMediaType(mime));
    }
    if bytes.is_empty() {
        return Err(ImportError::InvalidInput("document is empty".to_string()));
    }

    let plain = PlainTextBackend;
    let backend: &dyn OcrBackend = match backend {
        Some(backend) if backend.supports(&mime) => backend,
        _ if plain.supports(&mime) => &plain,
        _ => {
            return Err(ImportError::UnsupportedMediaType(format!(
                "{} (no text extraction backend configured for it)",
                mime
            )))
        }
    };

    debug!("Extracting text from {} bytes of {}", bytes.len(), mime);
    backend.extract_text(bytes, &mime).await
}

#[cfg(test)]
mod tests {
    use super::*;

    struct FixedBackend;

    #[async_trait]
    impl OcrBackend for FixedBackend {
        fn supports(&self, mime: &str) -> bool {
            mime.starts_with("image/")
        }

        async fn extract_text(&self, _bytes: &[u8], _mime: &str) -> Result<String, ImportError> {
            Ok("Toast\nIngredients:\n1 slice bread".to_string())
        }
    }

    #[test]
    fn test_normalize_mime() {
        assert_eq!(normalize_mime("Image/JPG"), "image/jpeg");
        assert_eq!(normalize_mime("text/plain; charset=utf-8"), "text/plain");
    }

    #[tokio::test]
    async fn test_plain_text_needs_no_backend() {
        let text = extract(b"Soup\n", "text/plain", None).await.unwrap();
        assert_eq!(text, "Soup\n");
    }

    #[tokio::test]
    async fn test_image_goes_to_backend() {
        let text = extract(b"\x89PNG", "image/png", Some(&FixedBackend as &dyn OcrBackend))
            .await
            .unwrap();
        assert!(text.starts_with("Toast"));
    }

    #[tokio::test]
    async fn test_rejections() {
        let err = extract(b"x", "application/zip", None).await.unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedMediaType(_)));

        let err = extract(b"%PDF", "application/pdf", Some(&FixedBackend as &dyn OcrBackend))
            .await
            .unwrap_err();
        assert!(matches!(err, ImportError::UnsupportedMediaType(_)));

        let err = extract(b"", "text/plain", None).await.unwrap_err();
        assert!(matches!(err, ImportError::InvalidInput(_)));
    }
}
