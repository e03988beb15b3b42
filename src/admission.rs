//! Client-side upload admission checks.
//!
//! These run synchronously before any transport is involved; a rejected
//! file never starts an analysis session.

use crate::error::{Result, ScopeError};

/// Maximum accepted upload size in megabytes
pub const MAX_UPLOAD_MB: u64 = 100;

const MAX_UPLOAD_BYTES: u64 = MAX_UPLOAD_MB * 1024 * 1024;

/// Whether a file name carries the `.apk` suffix (case-insensitive)
#[must_use]
pub fn is_apk_name(name: &str) -> bool {
    name.to_lowercase().ends_with(".apk")
}

/// Validate a selected file before upload.
///
/// Checks run in order: a file must be selected, it must be named with an
/// `.apk` suffix, and it must not exceed [`MAX_UPLOAD_MB`]. Each failure
/// carries the exact user-facing message.
pub fn validate_upload(file_name: Option<&str>, size_bytes: u64) -> Result<()> {
    let name = file_name.ok_or(ScopeError::NoFileSelected)?;

    if !is_apk_name(name) {
        return Err(ScopeError::NotAnApk {
            name: name.to_string(),
        });
    }

    if size_bytes > MAX_UPLOAD_BYTES {
        return Err(ScopeError::FileTooLarge {
            size: size_bytes,
            limit_mb: MAX_UPLOAD_MB,
        });
    }

    Ok(())
}
