//! Portable sync codes for moving a configuration between devices.
//!
//! A sync code is a single line of URL-safe text:
//!
//! ```text
//! PW1.<checksum>.<payload>
//! ```
//!
//! - `PW1` names the format version
//! - `payload` is the JSON configuration in unpadded URL-safe base64
//! - `checksum` is the first 8 hex digits of the payload JSON's SHA-256
//!
//! Codes contain no whitespace or control characters, so they survive being
//! pasted into a plain text field. Decoding ignores any ASCII whitespace the
//! field adds (line wrapping, surrounding blanks).

use crate::error::DecodeError;
use crate::models::SiteConfiguration;
use base64::engine::general_purpose::URL_SAFE_NO_PAD;
use base64::Engine as _;
use sha2::{Digest, Sha256};
use std::collections::HashSet;

/// Leading marker of every sync code.
pub const PREFIX: &str = "PW";
/// Format version written by [`encode`].
pub const VERSION: &str = "1";
const CHECKSUM_LEN: usize = 8;

/// Serializes a configuration into a sync code.
///
/// # Errors
///
/// Only if JSON serialization fails, which the configuration types never
/// trigger in practice.
pub fn encode(config: &SiteConfiguration) -> Result<String, serde_json::Error> {
    let json = serde_json::to_vec(config)?;
    Ok(format!(
        "{PREFIX}{VERSION}.{}.{}",
        checksum(&json),
        URL_SAFE_NO_PAD.encode(&json)
    ))
}

/// Parses a sync code back into a configuration.
///
/// # Errors
///
/// Returns a [`DecodeError`] naming the first check the text failed: prefix,
/// version, layout, base64, checksum, then JSON shape and section id
/// uniqueness.
pub fn decode(code: &str) -> Result<SiteConfiguration, DecodeError> {
    let cleaned: String = code.chars().filter(|c| !c.is_ascii_whitespace()).collect();

    let Some(rest) = cleaned.strip_prefix(PREFIX) else {
        return Err(DecodeError::MissingPrefix);
    };

    let mut parts = rest.splitn(3, '.');
    let (Some(version), Some(expected), Some(payload)) = (parts.next(), parts.next(), parts.next())
    else {
        return Err(DecodeError::Malformed("expected three dot-separated parts"));
    };

    if version != VERSION {
        return Err(DecodeError::UnsupportedVersion(version.to_string()));
    }
    if expected.len() != CHECKSUM_LEN || !expected.chars().all(|c| c.is_ascii_hexdigit()) {
        return Err(DecodeError::Malformed("checksum must be 8 hex digits"));
    }
    if payload.is_empty() {
        return Err(DecodeError::Malformed("empty payload"));
    }

    let json = URL_SAFE_NO_PAD
        .decode(payload)
        .map_err(|e| DecodeError::InvalidBase64(e.to_string()))?;

    let actual = checksum(&json);
    if !actual.eq_ignore_ascii_case(expected) {
        return Err(DecodeError::ChecksumMismatch {
            expected: expected.to_lowercase(),
            actual,
        });
    }

    let config: SiteConfiguration = serde_json::from_slice(&json)
        .map_err(|e| DecodeError::InvalidConfiguration(e.to_string()))?;
    validate(&config)?;
    Ok(config)
}

/// First [`CHECKSUM_LEN`] hex digits of the SHA-256 of `bytes`.
fn checksum(bytes: &[u8]) -> String {
    Sha256::digest(bytes)
        .iter()
        .take(CHECKSUM_LEN / 2)
        .map(|b| format!("{b:02x}"))
        .collect()
}

/// Structural checks serde cannot express.
fn validate(config: &SiteConfiguration) -> Result<(), DecodeError> {
    let mut section_ids = HashSet::new();
    for section in &config.sections {
        if section.id.is_empty() || !section_ids.insert(section.id.as_str()) {
            return Err(DecodeError::InvalidConfiguration(format!(
                "duplicate or empty section id '{}'",
                section.id
            )));
        }
        let mut element_ids = HashSet::new();
        for element in &section.elements {
            if element.id.is_empty() || !element_ids.insert(element.id.as_str()) {
                return Err(DecodeError::InvalidConfiguration(format!(
                    "duplicate or empty element id '{}' in section '{}'",
                    element.id, section.id
                )));
            }
        }
    }
    Ok(())
}
