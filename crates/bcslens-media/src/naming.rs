//! Storage identifier generation and retrieval-name guarding.
//!
//! A [`SafeName`] can only be obtained from [`generate_identifier`] (upload
//! path) or [`SafeName::parse`] (retrieval path), so anything holding one has
//! already passed the format gate.

use std::fmt;
use std::sync::LazyLock;

use rand::RngCore;
use regex::Regex;

use crate::error::MediaError;

/// Identifiers are exactly 32 lowercase hex characters (128 random bits)
/// followed by a safelisted image extension. Retrieval only ever accepts
/// names this service generated.
static NAME_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[a-f0-9]{32}\.(jpg|jpeg|png|gif)$").expect("identifier pattern is valid")
});

/// A filename that is safe to hand to the storage gateway: either freshly
/// generated or validated against the identifier pattern.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SafeName(String);

impl SafeName {
    /// Validate a client-supplied filename for retrieval.
    ///
    /// Steps, all required: strip any directory component; reject null bytes
    /// and parent-directory sequences in the raw input as malicious (these
    /// get their own rejection so attack probes are distinguishable from
    /// client bugs in the logs); require the remaining base name to match the
    /// identifier pattern exactly.
    pub fn parse(input: &str) -> Result<Self, MediaError> {
        if input.contains('\0') || input.contains("..") {
            return Err(MediaError::MaliciousName(input.replace('\0', "\\0")));
        }

        let base = input
            .rsplit(['/', '\\'])
            .next()
            .unwrap_or(input);

        if !NAME_PATTERN.is_match(base) {
            return Err(MediaError::InvalidNameFormat(base.to_string()));
        }

        Ok(SafeName(base.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// The safelisted extension, without the dot.
    pub fn extension(&self) -> &str {
        self.0.rsplit('.').next().unwrap_or("")
    }

    pub fn into_string(self) -> String {
        self.0
    }
}

impl fmt::Display for SafeName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Generate an unguessable storage identifier.
///
/// 128 bits from the thread-local CSPRNG, hex-encoded, joined with a
/// lower-cased extension that must be a member of the allowed set — the
/// extension is the only client-influenced part, and only via that set
/// membership. Collisions are left to the gateway's exclusive-create write.
pub fn generate_identifier(
    original_ext: &str,
    allowed_extensions: &[String],
) -> Result<SafeName, MediaError> {
    let ext = original_ext.to_lowercase();
    if !allowed_extensions.contains(&ext) {
        return Err(MediaError::InvalidExtension {
            extension: ext,
            allowed: allowed_extensions.to_vec(),
        });
    }

    let mut token = [0u8; 16];
    rand::rng().fill_bytes(&mut token);

    Ok(SafeName(format!("{}.{}", hex::encode(token), ext)))
}
