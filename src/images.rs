//! Image loading and data-URI embedding.
//!
//! Accepted payloads are PNG, JPEG, GIF, and WebP. Type detection reads magic
//! bytes so misnamed files still embed correctly; nothing here decodes or
//! re-encodes pixel data.

use anyhow::{Context, Result};
use base64::{engine::general_purpose::STANDARD as BASE64, Engine as _};
use std::path::{Path, PathBuf};

/// Raw image bytes with the sniffed MIME type.
#[derive(Debug, Clone)]
pub struct ImagePayload {
    pub bytes: Vec<u8>,
    pub mime: &'static str,
}

impl ImagePayload {
    pub fn base64_data(&self) -> String {
        BASE64.encode(&self.bytes)
    }

    pub fn data_uri(&self) -> String {
        format!("data:{};base64,{}", self.mime, self.base64_data())
    }
}

/// A caller-supplied image, ready to embed in the final document.
#[derive(Debug, Clone)]
pub struct ProvidedImage {
    pub id: String,
    pub data_uri: String,
}

/// Read an image file and sniff its MIME type.
pub fn load_image(path: &Path) -> Result<ImagePayload> {
    let bytes = std::fs::read(path).with_context(|| format!("read image {}", path.display()))?;
    let mime = sniff_mime(&bytes);
    Ok(ImagePayload { bytes, mime })
}

/// Load caller images in argument order, assigning stable `user_image_<n>` ids.
pub fn load_provided_images(paths: &[PathBuf]) -> Result<Vec<ProvidedImage>> {
    let mut provided = Vec::with_capacity(paths.len());
    for (index, path) in paths.iter().enumerate() {
        let payload = load_image(path)?;
        provided.push(ProvidedImage {
            id: format!("user_image_{index}"),
            data_uri: payload.data_uri(),
        });
    }
    Ok(provided)
}

/// Detect the image type from magic bytes. Unknown payloads fall back to PNG.
pub fn sniff_mime(bytes: &[u8]) -> &'static str {
    if bytes.starts_with(&[0x89, b'P', b'N', b'G']) {
        "image/png"
    } else if bytes.starts_with(&[0xFF, 0xD8, 0xFF]) {
        "image/jpeg"
    } else if bytes.starts_with(b"GIF8") {
        "image/gif"
    } else if bytes.len() >= 12 && &bytes[0..4] == b"RIFF" && &bytes[8..12] == b"WEBP" {
        "image/webp"
    } else {
        "image/png"
    }
}

/// Synthetic provided-image records for tests.
#[cfg(test)]
pub(crate) fn test_provided(count: usize) -> Vec<ProvidedImage> {
    (0..count)
        .map(|index| ProvidedImage {
            id: format!("user_image_{index}"),
            data_uri: format!("data:image/png;base64,IMG{index}"),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sniff_known_magic_bytes() {
        assert_eq!(sniff_mime(&[0x89, b'P', b'N', b'G', 0x0D, 0x0A]), "image/png");
        assert_eq!(sniff_mime(&[0xFF, 0xD8, 0xFF, 0xE0]), "image/jpeg");
        assert_eq!(sniff_mime(b"GIF89a"), "image/gif");
        assert_eq!(sniff_mime(b"RIFF\x00\x00\x00\x00WEBPVP8 "), "image/webp");
    }

    #[test]
    fn sniff_unknown_falls_back_to_png() {
        assert_eq!(sniff_mime(b"not an image"), "image/png");
        assert_eq!(sniff_mime(&[]), "image/png");
    }

    #[test]
    fn data_uri_carries_mime_and_base64() {
        let payload = ImagePayload {
            bytes: vec![0xFF, 0xD8, 0xFF, 0xE0],
            mime: "image/jpeg",
        };
        let uri = payload.data_uri();
        assert!(uri.starts_with("data:image/jpeg;base64,"));
        assert_eq!(uri, format!("data:image/jpeg;base64,{}", payload.base64_data()));
    }

    #[test]
    fn provided_images_get_ordered_ids() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let first = dir.path().join("a.png");
        let second = dir.path().join("b.jpg");
        std::fs::write(&first, [0x89, b'P', b'N', b'G', 0x0D, 0x0A, 0x1A, 0x0A]).expect("write png");
        std::fs::write(&second, [0xFF, 0xD8, 0xFF, 0xE0]).expect("write jpeg");

        let provided = load_provided_images(&[first, second]).expect("load provided images");
        assert_eq!(provided.len(), 2);
        assert_eq!(provided[0].id, "user_image_0");
        assert_eq!(provided[1].id, "user_image_1");
        assert!(provided[0].data_uri.starts_with("data:image/png;base64,"));
        assert!(provided[1].data_uri.starts_with("data:image/jpeg;base64,"));
    }

    #[test]
    fn load_image_reports_missing_file() {
        let dir = tempfile::tempdir().expect("create temp dir");
        let missing = dir.path().join("missing.png");
        let error = load_image(&missing).expect_err("missing file should fail");
        assert!(error.to_string().contains("read image"));
    }
}
