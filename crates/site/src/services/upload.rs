//! Image uploads from the content form.
//!
//! Uploaded images are embedded into the content record as a base64
//! `data:` URL rather than written to disk.

use base64::Engine as _;
use base64::engine::general_purpose::STANDARD;
use thiserror::Error;

/// Largest accepted upload, in bytes.
pub const MAX_IMAGE_BYTES: usize = 5_000_000;

/// Reasons an upload is rejected.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum UploadError {
    /// The file is not an image.
    #[error("please upload an image file")]
    NotAnImage,

    /// The file exceeds [`MAX_IMAGE_BYTES`].
    #[error("image must be less than 5MB")]
    TooLarge,
}

/// Validate an uploaded image and encode it as a data URL.
///
/// # Errors
///
/// Returns `UploadError::NotAnImage` unless `content_type` is `image/*`, and
/// `UploadError::TooLarge` when `bytes` exceeds [`MAX_IMAGE_BYTES`].
pub fn image_data_url(content_type: &str, bytes: &[u8]) -> Result<String, UploadError> {
    let mime = content_type.trim();
    let is_image = mime
        .split_once('/')
        .is_some_and(|(top, sub)| top.eq_ignore_ascii_case("image") && !sub.is_empty());
    if !is_image {
        return Err(UploadError::NotAnImage);
    }
    if bytes.len() > MAX_IMAGE_BYTES {
        return Err(UploadError::TooLarge);
    }

    Ok(format!("data:{mime};base64,{}", STANDARD.encode(bytes)))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;

    #[test]
    fn test_encodes_png() {
        let url = image_data_url("image/png", b"\x89PNG").unwrap();
        assert_eq!(url, "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn test_rejects_non_images() {
        assert_eq!(
            image_data_url("application/pdf", b"%PDF"),
            Err(UploadError::NotAnImage)
        );
        assert_eq!(image_data_url("image/", b"x"), Err(UploadError::NotAnImage));
        assert_eq!(image_data_url("", b"x"), Err(UploadError::NotAnImage));
    }

    #[test]
    fn test_size_limit_is_inclusive() {
        let at_limit = vec![0u8; MAX_IMAGE_BYTES];
        assert!(image_data_url("image/jpeg", &at_limit).is_ok());

        let over = vec![0u8; MAX_IMAGE_BYTES + 1];
        assert_eq!(image_data_url("image/jpeg", &over), Err(UploadError::TooLarge));
    }
}
