//! Upload policy: declarative limits and allow-lists.

use crate::error::MediaError;

/// Normalize a MIME type: strip parameters (`image/png; charset=utf-8` ->
/// `image/png`), lower-case, and fold the vendor alias `image/jpg` into
/// `image/jpeg`.
pub fn normalize_mime(content_type: &str) -> String {
    let base = content_type
        .split(';')
        .next()
        .map(|s| s.trim())
        .unwrap_or(content_type)
        .to_lowercase();
    if base == "image/jpg" {
        "image/jpeg".to_string()
    } else {
        base
    }
}

/// Declarative upload limits, checked before any content inspection.
///
/// Checks short-circuit on the first failure so the caller can produce a
/// specific rejection reason. The single-file rule is enforced where the
/// multipart body is read; everything else lives here.
#[derive(Debug, Clone)]
pub struct UploadPolicy {
    max_file_size: usize,
    allowed_extensions: Vec<String>,
    allowed_content_types: Vec<String>,
}

impl UploadPolicy {
    pub fn new(
        max_file_size: usize,
        allowed_extensions: Vec<String>,
        allowed_content_types: Vec<String>,
    ) -> Self {
        Self {
            max_file_size,
            allowed_extensions,
            allowed_content_types: allowed_content_types
                .into_iter()
                .map(|ct| normalize_mime(&ct))
                .collect(),
        }
    }

    pub fn max_file_size(&self) -> usize {
        self.max_file_size
    }

    pub fn allowed_extensions(&self) -> &[String] {
        &self.allowed_extensions
    }

    pub fn allowed_content_types(&self) -> &[String] {
        &self.allowed_content_types
    }

    /// Run all policy checks in order: size cap, extension safelist,
    /// declared-MIME safelist. First failure wins.
    pub fn check(
        &self,
        size_bytes: usize,
        declared_mime: &str,
        declared_ext: &str,
    ) -> Result<(), MediaError> {
        self.check_size(size_bytes)?;
        self.check_extension(declared_ext)?;
        self.check_content_type(declared_mime)?;
        Ok(())
    }

    pub fn check_size(&self, size_bytes: usize) -> Result<(), MediaError> {
        if size_bytes > self.max_file_size {
            return Err(MediaError::FileTooLarge {
                size: size_bytes,
                max: self.max_file_size,
            });
        }
        Ok(())
    }

    pub fn check_extension(&self, extension: &str) -> Result<(), MediaError> {
        let extension = extension.to_lowercase();
        if !self.allowed_extensions.contains(&extension) {
            return Err(MediaError::InvalidExtension {
                extension,
                allowed: self.allowed_extensions.clone(),
            });
        }
        Ok(())
    }

    pub fn check_content_type(&self, content_type: &str) -> Result<(), MediaError> {
        let normalized = normalize_mime(content_type);
        if !self.allowed_content_types.contains(&normalized) {
            return Err(MediaError::InvalidContentType {
                content_type: content_type.to_string(),
                allowed: self.allowed_content_types.clone(),
            });
        }
        Ok(())
    }

    /// Whether a detected MIME type is acceptable for storage.
    pub fn is_allowed_content_type(&self, content_type: &str) -> bool {
        self.allowed_content_types
            .contains(&normalize_mime(content_type))
    }
}
