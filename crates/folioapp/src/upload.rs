//! Checks run on an image before it is previewed.

use thiserror::Error;

pub const DEFAULT_MAX_UPLOAD_BYTES: u64 = 5 * 1024 * 1024;

const KB: u64 = 1024;
const MB: u64 = 1024 * 1024;

#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UploadError {
    #[error("The file must be at most {}", format_limit(*.max_bytes))]
    TooLarge { size: u64, max_bytes: u64 },
    #[error("Please select image files only")]
    NotAnImage { mime: String },
}

/// Size is checked before type, matching what the user fixes first.
pub fn check_image_upload(size: u64, mime: &str, max_bytes: u64) -> Result<(), UploadError> {
    if size > max_bytes {
        return Err(UploadError::TooLarge { size, max_bytes });
    }
    if !mime.starts_with("image/") {
        return Err(UploadError::NotAnImage {
            mime: mime.to_string(),
        });
    }
    Ok(())
}

/// Whole megabytes print as `5MB`; smaller limits fall back to KB or bytes.
fn format_limit(bytes: u64) -> String {
    if bytes >= MB {
        if bytes % MB == 0 {
            format!("{}MB", bytes / MB)
        } else {
            format!("{:.1}MB", bytes as f64 / MB as f64)
        }
    } else if bytes >= KB {
        if bytes % KB == 0 {
            format!("{}KB", bytes / KB)
        } else {
            format!("{:.1}KB", bytes as f64 / KB as f64)
        }
    } else {
        format!("{} bytes", bytes)
    }
}

/// Best guess at a MIME type from a file name, for hosts without one.
pub fn mime_from_extension(name: &str) -> &'static str {
    let ext = name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "svg" => "image/svg+xml",
        "pdf" => "application/pdf",
        "txt" => "text/plain",
        _ => "application/octet-stream",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_small_images() {
        assert!(check_image_upload(1024, "image/png", DEFAULT_MAX_UPLOAD_BYTES).is_ok());
        assert!(check_image_upload(DEFAULT_MAX_UPLOAD_BYTES, "image/jpeg", DEFAULT_MAX_UPLOAD_BYTES).is_ok());
    }

    #[test]
    fn rejects_large_files_first() {
        let err = check_image_upload(DEFAULT_MAX_UPLOAD_BYTES + 1, "text/plain", DEFAULT_MAX_UPLOAD_BYTES)
            .unwrap_err();
        assert!(matches!(err, UploadError::TooLarge { .. }));
        assert_eq!(err.to_string(), "The file must be at most 5MB");
    }

    #[test]
    fn small_limits_keep_their_size_in_the_message() {
        let message = |max: u64| check_image_upload(max + 1, "image/png", max).unwrap_err().to_string();
        assert_eq!(message(512 * 1024), "The file must be at most 512KB");
        assert_eq!(message(1536 * 1024), "The file must be at most 1.5MB");
        assert_eq!(message(1500), "The file must be at most 1.5KB");
        assert_eq!(message(100), "The file must be at most 100 bytes");
    }

    #[test]
    fn rejects_non_images() {
        let err = check_image_upload(10, "application/pdf", DEFAULT_MAX_UPLOAD_BYTES).unwrap_err();
        assert_eq!(err.to_string(), "Please select image files only");
    }

    #[test]
    fn guesses_mime_from_name() {
        assert_eq!(mime_from_extension("me.PNG"), "image/png");
        assert_eq!(mime_from_extension("cv.pdf"), "application/pdf");
        assert_eq!(mime_from_extension("README"), "application/octet-stream");
    }
}
