//! Photo attachment rules and storage-path derivation.

use crate::error::CoreError;
use crate::types::UserId;

/// Extensions the report form accepts for photo attachments.
pub const SUPPORTED_PHOTO_EXTENSIONS: &[&str] = &["png", "jpg", "jpeg", "webp", "gif"];

/// Maximum accepted photo size in bytes (5 MiB).
pub const MAX_PHOTO_BYTES: usize = 5 * 1024 * 1024;

/// Lowercased extension of an uploaded filename. A name with no dot at all
/// has no extension.
pub fn photo_extension(filename: &str) -> Option<String> {
    let (_, ext) = filename.rsplit_once('.')?;
    if ext.is_empty() {
        None
    } else {
        Some(ext.to_lowercase())
    }
}

/// Validate an uploaded photo's filename and size, returning the
/// normalized extension to store it under.
pub fn validate_photo(filename: &str, size_bytes: usize) -> Result<String, CoreError> {
    let ext = photo_extension(filename).unwrap_or_default();
    if !SUPPORTED_PHOTO_EXTENSIONS.contains(&ext.as_str()) {
        return Err(CoreError::Validation(format!(
            "Unsupported photo format '.{ext}'. Supported: .png, .jpg, .jpeg, .webp, .gif"
        )));
    }
    if size_bytes > MAX_PHOTO_BYTES {
        return Err(CoreError::Validation(format!(
            "Photo exceeds maximum size of {} bytes (got {})",
            MAX_PHOTO_BYTES, size_bytes
        )));
    }
    Ok(ext)
}

/// Object path for a stored photo: namespaced by uploader, named by upload
/// time so repeated uploads from the same user never collide.
pub fn storage_path(user_id: &UserId, uploaded_at_millis: i64, ext: &str) -> String {
    format!("{user_id}/{uploaded_at_millis}.{ext}")
}

/// Content type to send when storing a photo with the given extension.
pub fn content_type_for(ext: &str) -> &'static str {
    match ext {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "webp" => "image/webp",
        "gif" => "image/gif",
        _ => "application/octet-stream",
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
