use std::fs;
use std::io::Cursor;
use std::path::{Path, PathBuf};

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use image::{DynamicImage, ImageFormat};
use thiserror::Error;

#[derive(Error, Debug)]
pub enum FaceImageError {
    #[error("failed to read {path}: {source}")]
    Read {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to decode {path}: {source}")]
    Decode {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },
    #[error("failed to encode face image: {0}")]
    Encode(#[source] image::ImageError),
}

const DATA_URL_PREFIX: &str = "data:image/jpeg;base64,";

/// Loads an image file of any supported format and returns it as a JPEG
/// `data:` URL suitable for the `image` field of a new face.
pub fn encode_data_url(path: &Path) -> Result<String, FaceImageError> {
    let bytes = fs::read(path).map_err(|e| FaceImageError::Read {
        path: path.to_path_buf(),
        source: e,
    })?;
    let decoded = image::load_from_memory(&bytes).map_err(|e| FaceImageError::Decode {
        path: path.to_path_buf(),
        source: e,
    })?;

    // JPEG has no alpha channel
    let rgb = DynamicImage::ImageRgb8(decoded.to_rgb8());
    let mut jpeg = Cursor::new(Vec::new());
    rgb.write_to(&mut jpeg, ImageFormat::Jpeg)
        .map_err(FaceImageError::Encode)?;

    Ok(format!("{DATA_URL_PREFIX}{}", STANDARD.encode(jpeg.into_inner())))
}

#[cfg(test)]
mod tests {
    use super::*;
    use image::{GenericImageView, Rgb, RgbImage, Rgba, RgbaImage};
    use tempfile::TempDir;

    fn decode_payload(data_url: &str) -> DynamicImage {
        let payload = data_url.strip_prefix(DATA_URL_PREFIX).unwrap();
        let bytes = STANDARD.decode(payload).unwrap();
        image::load_from_memory_with_format(&bytes, ImageFormat::Jpeg).unwrap()
    }

    #[test]
    fn test_png_is_reencoded_as_jpeg() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("face.png");
        RgbImage::from_pixel(16, 12, Rgb([200, 40, 40]))
            .save(&path)
            .unwrap();

        let url = encode_data_url(&path).unwrap();
        assert!(url.starts_with("data:image/jpeg;base64,"));
        assert_eq!(decode_payload(&url).dimensions(), (16, 12));
    }

    #[test]
    fn test_alpha_is_dropped() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("face.png");
        RgbaImage::from_pixel(4, 4, Rgba([10, 20, 30, 128]))
            .save(&path)
            .unwrap();

        let url = encode_data_url(&path).unwrap();
        assert_eq!(decode_payload(&url).dimensions(), (4, 4));
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let err = encode_data_url(&tmp.path().join("nope.jpg")).unwrap_err();
        assert!(matches!(err, FaceImageError::Read { .. }));
    }

    #[test]
    fn test_non_image_is_decode_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("notes.txt");
        fs::write(&path, b"definitely not pixels").unwrap();
        let err = encode_data_url(&path).unwrap_err();
        assert!(matches!(err, FaceImageError::Decode { .. }));
    }
}
