//! Upload validation for clothing images
//!
//! Only JPEG and PNG files are accepted. A file is checked three ways before
//! it reaches the registry: by extension, by magic bytes, and by fully
//! decoding it with the `image` crate so corrupt uploads are rejected early.

use crate::error::{Result, WardrobeError};

use image::GenericImageView;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::Path;

/// Supported image formats
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ImageFormat {
    /// PNG image
    Png,
    /// JPEG image
    Jpeg,
}

impl ImageFormat {
    /// Returns the MIME type for this image format
    ///
    /// # Examples
    ///
    /// ```
    /// use wardrobe::stylist::ImageFormat;
    ///
    /// assert_eq!(ImageFormat::Png.mime_type(), "image/png");
    /// assert_eq!(ImageFormat::Jpeg.mime_type(), "image/jpeg");
    /// ```
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
        }
    }

    /// Maps a file extension to a format, case-insensitively
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            _ => None,
        }
    }

    /// Detects the format from the leading magic bytes
    pub fn from_magic(bytes: &[u8]) -> Option<Self> {
        if bytes.starts_with(b"\x89PNG") {
            Some(ImageFormat::Png)
        } else if bytes.starts_with(b"\xff\xd8\xff") {
            Some(ImageFormat::Jpeg)
        } else {
            None
        }
    }
}

impl fmt::Display for ImageFormat {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ImageFormat::Png => write!(f, "PNG"),
            ImageFormat::Jpeg => write!(f, "JPEG"),
        }
    }
}

/// Metadata of a validated image
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImageMetadata {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Image format
    pub format: ImageFormat,
}

/// Checks whether a path has an accepted image extension
///
/// # Examples
///
/// ```
/// use wardrobe::stylist::image::is_accepted_image;
/// use std::path::Path;
///
/// assert!(is_accepted_image(Path::new("hoodie.PNG")));
/// assert!(is_accepted_image(Path::new("jeans.jpeg")));
/// assert!(!is_accepted_image(Path::new("socks.gif")));
/// ```
pub fn is_accepted_image(path: &Path) -> bool {
    path.extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .is_some()
}

/// Validates an upload and returns its metadata
///
/// # Arguments
///
/// * `name` - Display name of the upload, used for extension checks and errors
/// * `bytes` - Raw file contents
/// * `max_bytes` - Per-file size limit
///
/// # Errors
///
/// Returns `WardrobeError::Upload` if the extension is not accepted, the file
/// is empty or too large, the content does not match the extension, or the
/// image fails to decode
pub fn validate_image(name: &str, bytes: &[u8], max_bytes: usize) -> Result<ImageMetadata> {
    let declared = Path::new(name)
        .extension()
        .and_then(|ext| ext.to_str())
        .and_then(ImageFormat::from_extension)
        .ok_or_else(|| WardrobeError::upload(name, "unsupported file type (expected .jpg, .jpeg or .png)"))?;

    if bytes.is_empty() {
        return Err(WardrobeError::upload(name, "file is empty").into());
    }

    if bytes.len() > max_bytes {
        return Err(WardrobeError::upload(
            name,
            format!("file is {} bytes, limit is {} bytes", bytes.len(), max_bytes),
        )
        .into());
    }

    let detected = ImageFormat::from_magic(bytes)
        .ok_or_else(|| WardrobeError::upload(name, "content is not a JPEG or PNG image"))?;

    if detected != declared {
        return Err(WardrobeError::upload(
            name,
            format!("extension says {} but content is {}", declared, detected),
        )
        .into());
    }

    let decoded = image::load_from_memory(bytes)
        .map_err(|e| WardrobeError::upload(name, format!("image decoding failed: {}", e)))?;
    let (width, height) = decoded.dimensions();

    Ok(ImageMetadata {
        width,
        height,
        format: detected,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{jpeg_bytes, png_bytes};

    const LIMIT: usize = 10 * 1024 * 1024;

    #[test]
    fn test_is_accepted_image_extensions() {
        assert!(is_accepted_image(Path::new("a.png")));
        assert!(is_accepted_image(Path::new("a.jpg")));
        assert!(is_accepted_image(Path::new("a.JPEG")));
        assert!(!is_accepted_image(Path::new("a.webp")));
        assert!(!is_accepted_image(Path::new("no_extension")));
    }

    #[test]
    fn test_from_magic() {
        assert_eq!(ImageFormat::from_magic(b"\x89PNG\r\n\x1a\n"), Some(ImageFormat::Png));
        assert_eq!(ImageFormat::from_magic(b"\xff\xd8\xff\xe0"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_magic(b"GIF89a"), None);
    }

    #[test]
    fn test_validate_png() {
        let meta = validate_image("tee.png", &png_bytes(4, 3), LIMIT).unwrap();
        assert_eq!(meta.format, ImageFormat::Png);
        assert_eq!((meta.width, meta.height), (4, 3));
    }

    #[test]
    fn test_validate_jpeg() {
        let meta = validate_image("coat.jpg", &jpeg_bytes(8, 8), LIMIT).unwrap();
        assert_eq!(meta.format, ImageFormat::Jpeg);
        assert_eq!(meta.width, 8);
    }

    #[test]
    fn test_validate_rejects_unsupported_extension() {
        let err = validate_image("scarf.gif", &png_bytes(2, 2), LIMIT).unwrap_err();
        assert!(err.to_string().contains("unsupported file type"));
    }

    #[test]
    fn test_validate_rejects_oversized() {
        let bytes = png_bytes(2, 2);
        let err = validate_image("tee.png", &bytes, 8).unwrap_err();
        assert!(err.to_string().contains("limit is 8 bytes"));
    }

    #[test]
    fn test_validate_rejects_mismatched_content() {
        let err = validate_image("tee.jpg", &png_bytes(2, 2), LIMIT).unwrap_err();
        assert!(err.to_string().contains("content is PNG"));
    }

    #[test]
    fn test_validate_rejects_corrupt_image() {
        let mut bytes = png_bytes(2, 2);
        bytes.truncate(12);
        let err = validate_image("tee.png", &bytes, LIMIT).unwrap_err();
        assert!(matches!(
            err.downcast_ref::<WardrobeError>(),
            Some(WardrobeError::Upload { .. })
        ));
    }

    #[test]
    fn test_validate_rejects_empty() {
        let err = validate_image("tee.png", &[], LIMIT).unwrap_err();
        assert!(err.to_string().contains("file is empty"));
    }
}
