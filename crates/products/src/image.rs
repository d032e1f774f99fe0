//! Image selection checks and upload response decoding.

use serde::{Deserialize, Serialize};
use thiserror::Error;

use content_admin_core::ValueObject;

/// Largest accepted upload, inclusive.
pub const MAX_IMAGE_BYTES: usize = 5 * 1024 * 1024;

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum ImageError {
    #[error("Please select a valid image file")]
    NotAnImage { mime_type: String },

    #[error("Image size must be less than 5MB")]
    TooLarge { size: usize },
}

/// A file the user picked for upload.
#[derive(Clone, PartialEq, Eq)]
pub struct ImageSelection {
    pub file_name: String,
    pub mime_type: String,
    pub bytes: Vec<u8>,
}

impl core::fmt::Debug for ImageSelection {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("ImageSelection")
            .field("file_name", &self.file_name)
            .field("mime_type", &self.mime_type)
            .field("size", &self.bytes.len())
            .finish()
    }
}

impl ImageSelection {
    pub fn new(file_name: impl Into<String>, mime_type: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self {
            file_name: file_name.into(),
            mime_type: mime_type.into(),
            bytes,
        }
    }

    /// Build a selection from a file name, guessing the MIME type from its extension.
    pub fn from_file_name(file_name: impl Into<String>, bytes: Vec<u8>) -> Self {
        let file_name = file_name.into();
        let mime_type = mime_type_for(&file_name).to_string();
        Self { file_name, mime_type, bytes }
    }

    pub fn size(&self) -> usize {
        self.bytes.len()
    }

    /// Type check first, then size.
    pub fn validate(&self) -> Result<(), ImageError> {
        if !self.mime_type.to_ascii_lowercase().starts_with("image/") {
            return Err(ImageError::NotAnImage {
                mime_type: self.mime_type.clone(),
            });
        }
        if self.size() > MAX_IMAGE_BYTES {
            return Err(ImageError::TooLarge { size: self.size() });
        }
        Ok(())
    }
}

/// MIME type for common image extensions; anything else is `application/octet-stream`.
pub fn mime_type_for(file_name: &str) -> &'static str {
    let ext = file_name
        .rsplit_once('.')
        .map(|(_, ext)| ext.to_ascii_lowercase())
        .unwrap_or_default();
    match ext.as_str() {
        "png" => "image/png",
        "jpg" | "jpeg" => "image/jpeg",
        "gif" => "image/gif",
        "webp" => "image/webp",
        "bmp" => "image/bmp",
        "svg" => "image/svg+xml",
        _ => "application/octet-stream",
    }
}

/// Payload of `POST /products/upload-image`.
///
/// The endpoint has reported the key and URL under different names, so all
/// of them are accepted and resolved by [`ImageUploadResponse::resolve`].
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ImageUploadResponse {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
}

impl ImageUploadResponse {
    /// Key: `key`, then `imageKey`. URL: `imageUrl`, then `url`.
    /// Missing values resolve to empty strings.
    pub fn resolve(&self) -> UploadedImage {
        let pick = |a: &Option<String>, b: &Option<String>| {
            a.as_deref()
                .filter(|s| !s.is_empty())
                .or(b.as_deref().filter(|s| !s.is_empty()))
                .unwrap_or_default()
                .to_string()
        };
        UploadedImage {
            key: pick(&self.key, &self.image_key),
            url: pick(&self.image_url, &self.url),
        }
    }
}

/// A stored image: the key to reference it by and a URL to preview it.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UploadedImage {
    pub key: String,
    pub url: String,
}

impl ValueObject for UploadedImage {}

impl UploadedImage {
    pub fn has_key(&self) -> bool {
        !self.key.is_empty()
    }

    pub fn has_url(&self) -> bool {
        !self.url.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn rejects_non_images() {
        let selection = ImageSelection::new("notes.txt", "text/plain", vec![1, 2, 3]);
        assert_eq!(
            selection.validate(),
            Err(ImageError::NotAnImage { mime_type: "text/plain".into() })
        );
        assert_eq!(
            selection.validate().unwrap_err().to_string(),
            "Please select a valid image file"
        );
    }

    #[test]
    fn size_limit_is_inclusive() {
        let at_limit = ImageSelection::new("a.png", "image/png", vec![0; MAX_IMAGE_BYTES]);
        assert_eq!(at_limit.validate(), Ok(()));

        let over = ImageSelection::new("a.png", "image/png", vec![0; MAX_IMAGE_BYTES + 1]);
        assert_eq!(
            over.validate(),
            Err(ImageError::TooLarge { size: MAX_IMAGE_BYTES + 1 })
        );
    }

    #[test]
    fn type_is_checked_before_size() {
        let big_pdf = ImageSelection::new("a.pdf", "application/pdf", vec![0; MAX_IMAGE_BYTES + 1]);
        assert!(matches!(big_pdf.validate(), Err(ImageError::NotAnImage { .. })));
    }

    #[test]
    fn mime_type_is_guessed_from_extension() {
        assert_eq!(ImageSelection::from_file_name("Logo.JPG", vec![]).mime_type, "image/jpeg");
        assert_eq!(mime_type_for("archive.tar.gz"), "application/octet-stream");
        assert_eq!(mime_type_for("no-extension"), "application/octet-stream");
    }

    #[test]
    fn upload_response_prefers_key_and_image_url() {
        let response: ImageUploadResponse = serde_json::from_value(json!({
            "imageKey": "old-key",
            "key": "new-key",
            "url": "http://cdn/old",
            "imageUrl": "http://cdn/new"
        }))
        .unwrap();
        assert_eq!(
            response.resolve(),
            UploadedImage { key: "new-key".into(), url: "http://cdn/new".into() }
        );
    }

    #[test]
    fn upload_response_falls_back_to_alternate_names() {
        let response: ImageUploadResponse =
            serde_json::from_value(json!({ "imageKey": "k", "url": "u" })).unwrap();
        let image = response.resolve();
        assert_eq!(image.key, "k");
        assert_eq!(image.url, "u");

        let empty = ImageUploadResponse::default().resolve();
        assert!(!empty.has_key());
        assert!(!empty.has_url());
    }
}
