use std::path::Path;

use crate::shared::frame::Frame;

/// Decodes an uploaded image from its raw bytes into an RGB24 [`Frame`].
///
/// The container format is guessed from the bytes; undecodable input
/// surfaces as the `image` crate's error, which callers map to their
/// "invalid image" result.
pub fn decode_image_bytes(bytes: &[u8]) -> Result<Frame, image::ImageError> {
    let decoded = image::load_from_memory(bytes)?;
    Ok(to_frame(decoded))
}

/// Decodes an image file on disk into an RGB24 [`Frame`].
pub fn decode_image_file(path: &Path) -> Result<Frame, image::ImageError> {
    let decoded = image::open(path)?;
    Ok(to_frame(decoded))
}

fn to_frame(decoded: image::DynamicImage) -> Frame {
    let rgb = decoded.to_rgb8();
    let (width, height) = rgb.dimensions();
    Frame::new(rgb.into_raw(), width, height, 0)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn png_bytes(width: u32, height: u32, pixel: [u8; 3]) -> Vec<u8> {
        let mut img = image::RgbImage::new(width, height);
        for px in img.pixels_mut() {
            *px = image::Rgb(pixel);
        }
        let mut bytes = Vec::new();
        img.write_to(
            &mut std::io::Cursor::new(&mut bytes),
            image::ImageFormat::Png,
        )
        .unwrap();
        bytes
    }

    #[test]
    fn test_decode_png_bytes() {
        let bytes = png_bytes(4, 3, [10, 20, 30]);
        let frame = decode_image_bytes(&bytes).unwrap();
        assert_eq!(frame.width(), 4);
        assert_eq!(frame.height(), 3);
        assert_eq!(frame.index(), 0);
        assert_eq!(&frame.data()[..3], &[10, 20, 30]);
    }

    #[test]
    fn test_decode_garbage_bytes_fails() {
        assert!(decode_image_bytes(b"not an image at all").is_err());
    }

    #[test]
    fn test_decode_empty_bytes_fails() {
        assert!(decode_image_bytes(&[]).is_err());
    }

    #[test]
    fn test_decode_image_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("test.png");
        std::fs::write(&path, png_bytes(2, 2, [200, 100, 50])).unwrap();

        let frame = decode_image_file(&path).unwrap();
        assert_eq!(frame.width(), 2);
        assert_eq!(frame.height(), 2);
        assert_eq!(&frame.data()[..3], &[200, 100, 50]);
    }

    #[test]
    fn test_decode_missing_file_fails() {
        assert!(decode_image_file(Path::new("/nonexistent/test.png")).is_err());
    }
}
