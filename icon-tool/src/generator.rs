use anyhow::{Context, Result};
use png_encoder::{encode_icon, IconStyle};
use sha2::{Digest, Sha256};
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use tokio::fs;

/// What was written for one icon
#[derive(Debug, Clone)]
pub struct GeneratedIcon {
    pub path: PathBuf,
    pub width: u32,
    pub height: u32,
    pub bytes: usize,
    pub sha256: String,
    pub elapsed: Duration,
}

/// Paints icons in a fixed style and writes them as PNG files
#[derive(Debug, Clone, Default)]
pub struct IconGenerator {
    style: IconStyle,
}

impl IconGenerator {
    pub fn new(style: IconStyle) -> Self {
        Self { style }
    }

    /// Encode a `width`x`height` icon to PNG bytes
    pub fn render(&self, width: u32, height: u32) -> Result<Vec<u8>> {
        encode_icon(width, height, &self.style)
            .with_context(|| format!("Failed to encode {}x{} icon", width, height))
    }

    /// Render an icon and write it to `path`, replacing any existing file.
    ///
    /// The parent directory must already exist.
    pub async fn generate(&self, width: u32, height: u32, path: &Path) -> Result<GeneratedIcon> {
        let started = Instant::now();
        let png = self.render(width, height)?;

        fs::write(path, &png)
            .await
            .with_context(|| format!("Failed to write icon: {:?}", path))?;

        Ok(GeneratedIcon {
            path: path.to_path_buf(),
            width,
            height,
            bytes: png.len(),
            sha256: hex::encode(Sha256::digest(&png)),
            elapsed: started.elapsed(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use png_encoder::{decode, PngError, Rgba, ICON_BLUE};

    #[tokio::test]
    async fn test_generate_192_is_readable() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("icon-192.png");

        let icon = IconGenerator::default()
            .generate(192, 192, &path)
            .await
            .unwrap();
        assert_eq!(icon.path, path);
        assert_eq!(icon.sha256.len(), 64);

        let bytes = std::fs::read(&path).unwrap();
        assert_eq!(bytes.len(), icon.bytes);

        let decoded = decode(&bytes).unwrap();
        assert_eq!(decoded.pixels.uniform_color(), Some(ICON_BLUE));

        let img = image::open(&path).unwrap().to_rgba8();
        assert_eq!(img.dimensions(), (192, 192));
        assert!(img.pixels().all(|px| px.0 == [33, 150, 243, 255]));
    }

    #[tokio::test]
    async fn test_generate_overwrites_existing_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("t.png");
        std::fs::write(&path, b"not a png").unwrap();

        IconGenerator::default().generate(4, 4, &path).await.unwrap();

        let decoded = decode(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!((decoded.header.width, decoded.header.height), (4, 4));
    }

    #[tokio::test]
    async fn test_missing_directory_is_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("missing").join("icon.png");

        let err = IconGenerator::default()
            .generate(16, 16, &path)
            .await
            .unwrap_err();
        let io = err.root_cause().downcast_ref::<std::io::Error>().unwrap();
        assert_eq!(io.kind(), std::io::ErrorKind::NotFound);
    }

    #[tokio::test]
    async fn test_zero_size_is_rejected_before_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("zero.png");

        let err = IconGenerator::default()
            .generate(0, 192, &path)
            .await
            .unwrap_err();
        assert!(matches!(
            err.downcast_ref::<PngError>(),
            Some(PngError::InvalidDimensions { width: 0, height: 192 })
        ));
        assert!(!path.exists());
    }

    #[tokio::test]
    async fn test_custom_style() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("green.png");
        let green = Rgba::new(0, 200, 0, 255);

        IconGenerator::new(IconStyle::solid(green))
            .generate(8, 2, &path)
            .await
            .unwrap();

        let decoded = decode(&std::fs::read(&path).unwrap()).unwrap();
        assert_eq!(decoded.pixels.uniform_color(), Some(green));
    }
}
