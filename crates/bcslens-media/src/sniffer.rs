//! Content sniffing: determine a buffer's true MIME type from magic bytes,
//! independent of filename, extension, or client-declared Content-Type.

use crate::error::MediaError;
use crate::policy::{normalize_mime, UploadPolicy};

/// Detect the MIME type of a buffer from its leading bytes.
///
/// Returns `None` for an empty buffer or when no known signature matches —
/// distinct from "wrong type", which is a cross-check concern.
pub fn detect(buffer: &[u8]) -> Option<&'static str> {
    if buffer.is_empty() {
        return None;
    }
    infer::get(buffer).map(|kind| kind.mime_type())
}

/// Outcome of the declared-vs-detected cross-check.
#[derive(Debug, Clone)]
pub struct ValidationVerdict {
    pub detected_mime: Option<String>,
    pub declared_mime: String,
    pub matched: bool,
}

impl ValidationVerdict {
    /// Cross-check a buffer against the client's declared MIME type.
    ///
    /// The upload is acceptable only when detection succeeded, the detected
    /// type is itself in the allowed set, and it equals the declared type
    /// after normalization. A valid image of a different type than declared
    /// is a mismatch even when both types are individually allowed.
    pub fn cross_check(buffer: &[u8], declared_mime: &str, policy: &UploadPolicy) -> Self {
        let declared = normalize_mime(declared_mime);
        let detected = detect(buffer).map(normalize_mime);

        let matched = match detected.as_deref() {
            Some(d) => policy.is_allowed_content_type(d) && d == declared,
            None => false,
        };

        ValidationVerdict {
            detected_mime: detected,
            declared_mime: declared,
            matched,
        }
    }

    /// Convert a failed verdict into its rejection reason.
    pub fn into_rejection(self) -> MediaError {
        match self.detected_mime {
            None => MediaError::UndeterminedContent,
            Some(detected) => MediaError::ContentMismatch {
                declared: self.declared_mime,
                detected,
            },
        }
    }
}

/// MIME type to serve for a stored asset, derived from its safelisted
/// extension.
pub fn content_type_for_extension(extension: &str) -> Option<&'static str> {
    match extension {
        "jpg" | "jpeg" => Some("image/jpeg"),
        "png" => Some("image/png"),
        "gif" => Some("image/gif"),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const JPEG_MAGIC: &[u8] = &[0xFF, 0xD8, 0xFF, 0xE0, 0x00, 0x10, 0x4A, 0x46, 0x49, 0x46, 0x00];
    const PNG_MAGIC: &[u8] = &[0x89, 0x50, 0x4E, 0x47, 0x0D, 0x0A, 0x1A, 0x0A, 0x00, 0x00];
    const GIF_MAGIC: &[u8] = b"GIF89a\x01\x00\x01\x00";

    fn test_policy() -> UploadPolicy {
        UploadPolicy::new(
            5 * 1024 * 1024,
            vec!["jpg".into(), "jpeg".into(), "png".into(), "gif".into()],
            vec!["image/jpeg".into(), "image/png".into(), "image/gif".into()],
        )
    }

    #[test]
    fn test_detect_known_signatures() {
        assert_eq!(detect(JPEG_MAGIC), Some("image/jpeg"));
        assert_eq!(detect(PNG_MAGIC), Some("image/png"));
        assert_eq!(detect(GIF_MAGIC), Some("image/gif"));
    }

    #[test]
    fn test_detect_empty_and_garbage() {
        assert_eq!(detect(&[]), None);
        assert_eq!(detect(b"not an image at all"), None);
    }

    #[test]
    fn test_cross_check_match() {
        let verdict = ValidationVerdict::cross_check(JPEG_MAGIC, "image/jpeg", &test_policy());
        assert!(verdict.matched);
        assert_eq!(verdict.detected_mime.as_deref(), Some("image/jpeg"));
    }

    #[test]
    fn test_cross_check_jpg_alias_matches_jpeg_content() {
        let verdict = ValidationVerdict::cross_check(JPEG_MAGIC, "image/jpg", &test_policy());
        assert!(verdict.matched);
    }

    #[test]
    fn test_cross_check_mismatch_between_allowed_types() {
        // JPEG bytes declared as PNG: both types allowed, still rejected
        let verdict = ValidationVerdict::cross_check(JPEG_MAGIC, "image/png", &test_policy());
        assert!(!verdict.matched);
        assert!(matches!(
            verdict.into_rejection(),
            MediaError::ContentMismatch { .. }
        ));
    }

    #[test]
    fn test_cross_check_undetermined() {
        let verdict = ValidationVerdict::cross_check(b"plain text", "image/png", &test_policy());
        assert!(!verdict.matched);
        assert!(matches!(
            verdict.into_rejection(),
            MediaError::UndeterminedContent
        ));
    }

    #[test]
    fn test_cross_check_detected_type_outside_safelist() {
        // A real PDF signature: detection succeeds but the type is not allowed
        let pdf = b"%PDF-1.4\n%\xE2\xE3\xCF\xD3";
        let verdict = ValidationVerdict::cross_check(pdf, "application/pdf", &test_policy());
        assert!(!verdict.matched);
    }

    #[test]
    fn test_content_type_for_extension() {
        assert_eq!(content_type_for_extension("jpg"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("jpeg"), Some("image/jpeg"));
        assert_eq!(content_type_for_extension("png"), Some("image/png"));
        assert_eq!(content_type_for_extension("gif"), Some("image/gif"));
        assert_eq!(content_type_for_extension("exe"), None);
    }
}
