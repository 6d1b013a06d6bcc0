use base64::{engine::general_purpose, Engine as _};

/// Uploaded binaries are embedded inline into document string fields, so
/// they are capped hard rather than streamed to object storage.
pub const MAX_INLINE_BYTES: usize = 1_000_000;

#[derive(Debug, Clone, PartialEq)]
pub enum UploadError {
    TooLarge { size: usize },
}

impl std::fmt::Display for UploadError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            UploadError::TooLarge { size } => write!(
                f,
                "File is {} bytes, the inline limit is {} bytes",
                size, MAX_INLINE_BYTES
            ),
        }
    }
}

impl std::error::Error for UploadError {}

/// Encodes raw file bytes as a `data:` URI suitable for embedding into a
/// document field. Rejects anything over [`MAX_INLINE_BYTES`].
pub fn inline_data_uri(content_type: &str, bytes: &[u8]) -> Result<String, UploadError> {
    if bytes.len() > MAX_INLINE_BYTES {
        return Err(UploadError::TooLarge { size: bytes.len() });
    }

    let encoded = general_purpose::STANDARD.encode(bytes);
    Ok(format!("data:{};base64,{}", content_type, encoded))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_small_file_becomes_data_uri() {
        let uri = inline_data_uri("image/png", b"png-bytes").unwrap();

        assert!(uri.starts_with("data:image/png;base64,"));
        let payload = uri.strip_prefix("data:image/png;base64,").unwrap();
        let decoded = general_purpose::STANDARD.decode(payload).unwrap();
        assert_eq!(decoded, b"png-bytes");
    }

    #[test]
    fn test_file_at_cap_is_accepted() {
        let bytes = vec![0u8; MAX_INLINE_BYTES];
        assert!(inline_data_uri("application/pdf", &bytes).is_ok());
    }

    #[test]
    fn test_file_over_cap_is_rejected() {
        let bytes = vec![0u8; MAX_INLINE_BYTES + 1];
        let err = inline_data_uri("application/pdf", &bytes).unwrap_err();
        assert_eq!(
            err,
            UploadError::TooLarge {
                size: MAX_INLINE_BYTES + 1
            }
        );
    }
}
