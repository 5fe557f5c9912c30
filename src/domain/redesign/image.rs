//! Room image value object.
//!
//! Images travel as raw bytes inside the pipeline and as base64 data URLs
//! (`data:<mime>;base64,<payload>`) whenever they are persisted or sent over
//! the wire.

use base64::{engine::general_purpose::STANDARD, Engine as _};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::path::Path;

use crate::domain::foundation::ValidationError;

/// Accepted upload formats.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Webp,
}

impl ImageFormat {
    pub fn mime_type(&self) -> &'static str {
        match self {
            ImageFormat::Png => "image/png",
            ImageFormat::Jpeg => "image/jpeg",
            ImageFormat::Webp => "image/webp",
        }
    }

    /// Resolves a MIME type such as `image/jpeg` (parameters are ignored).
    pub fn from_mime(mime: &str) -> Option<Self> {
        let essence = mime.split(';').next().unwrap_or_default().trim();
        match essence.to_ascii_lowercase().as_str() {
            "image/png" => Some(ImageFormat::Png),
            "image/jpeg" | "image/jpg" => Some(ImageFormat::Jpeg),
            "image/webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Resolves a file extension (`png`, `jpg`, `jpeg`, `webp`).
    pub fn from_extension(ext: &str) -> Option<Self> {
        match ext.trim_start_matches('.').to_ascii_lowercase().as_str() {
            "png" => Some(ImageFormat::Png),
            "jpg" | "jpeg" => Some(ImageFormat::Jpeg),
            "webp" => Some(ImageFormat::Webp),
            _ => None,
        }
    }

    /// Resolves an upload by MIME type first, then by the extension of its
    /// file name. Browsers send `application/octet-stream` for some files.
    pub fn from_upload(mime: &str, filename: Option<&str>) -> Option<Self> {
        Self::from_mime(mime).or_else(|| {
            filename
                .and_then(|name| Path::new(name).extension())
                .and_then(|ext| ext.to_str())
                .and_then(Self::from_extension)
        })
    }
}

/// An encoded image (original upload or synthesized result).
#[derive(Clone, PartialEq, Eq)]
pub struct RoomImage {
    format: ImageFormat,
    bytes: Vec<u8>,
}

impl RoomImage {
    /// Wraps raw bytes. Empty payloads are rejected.
    pub fn new(format: ImageFormat, bytes: Vec<u8>) -> Result<Self, ValidationError> {
        if bytes.is_empty() {
            return Err(ValidationError::empty_field("image"));
        }
        Ok(Self { format, bytes })
    }

    /// Builds an image from a MIME type and a base64 payload.
    pub fn from_base64(mime: &str, payload: &str) -> Result<Self, ValidationError> {
        Self::from_upload(mime, None, payload)
    }

    /// Builds an uploaded image, falling back to the file extension when the
    /// MIME type is not one of the accepted formats.
    pub fn from_upload(
        mime: &str,
        filename: Option<&str>,
        payload: &str,
    ) -> Result<Self, ValidationError> {
        let format = ImageFormat::from_upload(mime, filename).ok_or_else(|| {
            ValidationError::invalid_format("image", format!("unsupported type '{}'", mime))
        })?;
        let bytes = STANDARD
            .decode(payload.trim())
            .map_err(|e| ValidationError::invalid_format("image", e.to_string()))?;
        Self::new(format, bytes)
    }

    /// Parses a `data:<mime>;base64,<payload>` URL.
    pub fn from_data_url(url: &str) -> Result<Self, ValidationError> {
        let rest = url
            .strip_prefix("data:")
            .ok_or_else(|| ValidationError::invalid_format("image", "missing data: prefix"))?;
        let (mime, payload) = rest
            .split_once(";base64,")
            .ok_or_else(|| ValidationError::invalid_format("image", "not a base64 data URL"))?;
        Self::from_base64(mime, payload)
    }

    pub fn format(&self) -> ImageFormat {
        self.format
    }

    pub fn mime_type(&self) -> &'static str {
        self.format.mime_type()
    }

    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }

    pub fn to_data_url(&self) -> String {
        format!("data:{};base64,{}", self.mime_type(), self.to_base64())
    }

    /// Rejects payloads above `max_bytes`.
    pub fn ensure_within(&self, max_bytes: u64) -> Result<(), ValidationError> {
        let actual = self.bytes.len() as u64;
        if actual > max_bytes {
            return Err(ValidationError::too_large("image", max_bytes, actual));
        }
        Ok(())
    }
}

// Payloads can be megabytes; keep logs readable.
impl fmt::Debug for RoomImage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("RoomImage")
            .field("format", &self.format)
            .field("len", &self.bytes.len())
            .finish()
    }
}

impl Serialize for RoomImage {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_data_url())
    }
}

impl<'de> Deserialize<'de> for RoomImage {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let url = String::deserialize(deserializer)?;
        RoomImage::from_data_url(&url).map_err(serde::de::Error::custom)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png() -> RoomImage {
        RoomImage::new(ImageFormat::Png, vec![0x89, b'P', b'N', b'G']).unwrap()
    }

    #[test]
    fn rejects_empty_payload() {
        assert!(RoomImage::new(ImageFormat::Jpeg, vec![]).is_err());
    }

    #[test]
    fn data_url_has_mime_prefix() {
        assert_eq!(png().to_data_url(), "data:image/png;base64,iVBORw==");
    }

    #[test]
    fn parses_data_url_back() {
        let image = RoomImage::from_data_url("data:image/webp;base64,AQID").unwrap();
        assert_eq!(image.format(), ImageFormat::Webp);
        assert_eq!(image.bytes(), &[1, 2, 3]);
    }

    #[test]
    fn rejects_unsupported_mime() {
        let err = RoomImage::from_base64("image/gif", "AQID").unwrap_err();
        assert!(err.to_string().contains("unsupported type"));
    }

    #[test]
    fn rejects_malformed_data_url() {
        assert!(RoomImage::from_data_url("image/png;base64,AQID").is_err());
        assert!(RoomImage::from_data_url("data:image/png,AQID").is_err());
        assert!(RoomImage::from_data_url("data:image/png;base64,@@@").is_err());
    }

    #[test]
    fn format_resolution_accepts_upload_extensions() {
        assert_eq!(ImageFormat::from_extension("JPG"), Some(ImageFormat::Jpeg));
        assert_eq!(ImageFormat::from_extension(".webp"), Some(ImageFormat::Webp));
        assert_eq!(ImageFormat::from_extension("bmp"), None);
        assert_eq!(ImageFormat::from_mime("image/jpeg; q=0.9"), Some(ImageFormat::Jpeg));
    }

    #[test]
    fn upload_falls_back_to_file_extension() {
        let image =
            RoomImage::from_upload("application/octet-stream", Some("living-room.JPEG"), "AQID")
                .unwrap();
        assert_eq!(image.format(), ImageFormat::Jpeg);

        assert!(RoomImage::from_upload("application/octet-stream", Some("room.gif"), "AQID").is_err());
        assert!(RoomImage::from_upload("application/octet-stream", Some("room"), "AQID").is_err());
        assert!(RoomImage::from_upload("", None, "AQID").is_err());
    }

    #[test]
    fn declared_mime_wins_over_extension() {
        let image = RoomImage::from_upload("image/png", Some("photo.jpg"), "AQID").unwrap();
        assert_eq!(image.format(), ImageFormat::Png);
    }

    #[test]
    fn size_limit_is_enforced() {
        let image = png();
        assert!(image.ensure_within(4).is_ok());
        assert!(image.ensure_within(3).is_err());
    }

    #[test]
    fn debug_omits_payload() {
        let rendered = format!("{:?}", png());
        assert!(rendered.contains("len: 4"));
        assert!(!rendered.contains("137"));
    }

    #[test]
    fn serializes_as_data_url_string() {
        let json = serde_json::to_string(&png()).unwrap();
        assert_eq!(json, "\"data:image/png;base64,iVBORw==\"");
        let back: RoomImage = serde_json::from_str(&json).unwrap();
        assert_eq!(back, png());
    }
}
