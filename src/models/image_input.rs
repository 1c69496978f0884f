use std::io::Cursor;
use std::path::Path;

use base64::{engine::general_purpose::STANDARD, Engine};
use image::ImageReader;
use crate::errors::CityScanError;
use tracing::debug;

/// A decoded-enough image: raw bytes plus the format sniffed from content.
/// Shared read-only by every specialist call of one analysis.
#[derive(Debug, Clone)]
pub struct ImageInput {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub width: u32,
    pub height: u32,
}

impl ImageInput {
    /// Read and validate an image from disk.
    pub async fn load(path: &Path) -> Result<Self, CityScanError> {
        let bytes = match tokio::fs::read(path).await {
            Ok(bytes) => bytes,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(CityScanError::ImageLoad(format!(
                    "File not found at {}",
                    path.display()
                )));
            }
            Err(e) => {
                return Err(CityScanError::ImageLoad(format!(
                    "Failed to load image at {}: {}",
                    path.display(),
                    e
                )));
            }
        };

        let image = Self::from_bytes(bytes).map_err(|reason| {
            CityScanError::ImageLoad(format!("Failed to load image at {}: {}", path.display(), reason))
        })?;
        debug!(
            path = %path.display(),
            mime = image.mime_type,
            width = image.width,
            height = image.height,
            "Image loaded"
        );
        Ok(image)
    }

    /// Sniff the format and read the header dimensions.
    pub fn from_bytes(bytes: Vec<u8>) -> Result<Self, String> {
        let reader = ImageReader::new(Cursor::new(bytes.as_slice()))
            .with_guessed_format()
            .map_err(|e| e.to_string())?;
        let format = reader
            .format()
            .ok_or_else(|| "unrecognized image format".to_string())?;
        let (width, height) = reader.into_dimensions().map_err(|e| e.to_string())?;

        Ok(Self {
            mime_type: format.to_mime_type(),
            bytes,
            width,
            height,
        })
    }

    pub fn to_base64(&self) -> String {
        STANDARD.encode(&self.bytes)
    }
}
