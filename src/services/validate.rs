use crate::error::ApiError;

/// Maximum accepted upload size: 10 MiB
pub const MAX_UPLOAD_SIZE: usize = 10 * 1024 * 1024;

/// MIME types accepted for upload: common images, PDF, Word/Excel, plain
/// text and CSV
pub const ALLOWED_MIME_TYPES: &[&str] = &[
    "image/jpeg",
    "image/jpg",
    "image/png",
    "image/gif",
    "image/webp",
    "application/pdf",
    "application/msword",
    "application/vnd.openxmlformats-officedocument.wordprocessingml.document",
    "application/vnd.ms-excel",
    "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet",
    "text/plain",
    "text/csv",
];

pub fn is_allowed_mime_type(mimetype: &str) -> bool {
    ALLOWED_MIME_TYPES.contains(&mimetype)
}

/// Validate an upload before any backend write happens.
///
/// A part without a content type is treated as `application/octet-stream`
/// upstream and lands here as a disallowed type.
pub fn validate_upload(mimetype: &str, size: usize) -> Result<(), ApiError> {
    if !is_allowed_mime_type(mimetype) {
        return Err(ApiError::FileTypeNotAllowed);
    }
    if size > MAX_UPLOAD_SIZE {
        return Err(ApiError::FileTooLarge);
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_common_document_types() {
        assert!(is_allowed_mime_type("image/png"));
        assert!(is_allowed_mime_type("application/pdf"));
        assert!(is_allowed_mime_type("text/csv"));
        assert!(is_allowed_mime_type(
            "application/vnd.openxmlformats-officedocument.spreadsheetml.sheet"
        ));
    }

    #[test]
    fn rejects_archives_and_binaries() {
        assert!(!is_allowed_mime_type("application/zip"));
        assert!(!is_allowed_mime_type("application/octet-stream"));
        assert!(!is_allowed_mime_type("video/mp4"));
    }

    #[test]
    fn rejects_oversize_payload() {
        let err = validate_upload("image/png", MAX_UPLOAD_SIZE + 1).unwrap_err();
        assert!(matches!(err, ApiError::FileTooLarge));
    }

    #[test]
    fn accepts_payload_at_the_limit() {
        assert!(validate_upload("image/png", MAX_UPLOAD_SIZE).is_ok());
    }

    #[test]
    fn type_check_runs_before_size_check() {
        let err = validate_upload("application/zip", MAX_UPLOAD_SIZE + 1).unwrap_err();
        assert!(matches!(err, ApiError::FileTypeNotAllowed));
    }
}
