//! Image codec capability and the `image`-crate-backed default.

use std::path::Path;

use image::imageops::FilterType;
use image::RgbImage;

use crate::error::{FieldError, FieldResult};

/// A decoded image: top-left-origin RGBA8 pixels, row-major.
#[derive(Debug, Clone)]
pub struct DecodedImage {
    /// Width in pixels.
    pub width: usize,
    /// Height in pixels.
    pub height: usize,
    /// RGBA8 pixel data, `width * height * 4` bytes.
    pub pixels: Vec<u8>,
}

/// Capability for decoding and encoding raster images.
///
/// The pipeline uses this to read the destination texture (for its
/// resolution) and to persist the grayscale artifacts. Injected so tests
/// can observe encodes without a filesystem and so callers can swap in
/// their own formats.
pub trait ImageCodec {
    /// Decode an image file to top-left-origin RGBA8 pixels.
    ///
    /// # Errors
    ///
    /// Decode failures, including unreadable files.
    fn decode_rgba(&self, path: &Path) -> FieldResult<DecodedImage>;

    /// Encode RGB8 pixels (`width * height * 3` bytes, row-major from the
    /// top-left) to an image file, optionally resizing to
    /// `resize_to = (width, height)` first.
    ///
    /// # Errors
    ///
    /// Encode failures, including mismatched pixel buffer sizes.
    fn encode_rgb(
        &self,
        path: &Path,
        width: usize,
        height: usize,
        pixels: &[u8],
        resize_to: Option<(usize, usize)>,
    ) -> FieldResult<()>;
}

/// [`ImageCodec`] backed by the `image` crate.
///
/// Decodes every format the crate supports; the encoded format follows
/// the output path's extension.
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageCodec;

#[allow(clippy::cast_possible_truncation)]
// Truncation: image dimensions are bounded well below u32::MAX
impl ImageCodec for FileImageCodec {
    fn decode_rgba(&self, path: &Path) -> FieldResult<DecodedImage> {
        let decoded = image::open(path)?.to_rgba8();
        Ok(DecodedImage {
            width: decoded.width() as usize,
            height: decoded.height() as usize,
            pixels: decoded.into_raw(),
        })
    }

    fn encode_rgb(
        &self,
        path: &Path,
        width: usize,
        height: usize,
        pixels: &[u8],
        resize_to: Option<(usize, usize)>,
    ) -> FieldResult<()> {
        let buffer = RgbImage::from_raw(width as u32, height as u32, pixels.to_vec()).ok_or(
            FieldError::InvalidDimensions {
                width,
                height,
                expected: width * height * 3,
                got: pixels.len(),
            },
        )?;

        match resize_to {
            Some((target_width, target_height))
                if (target_width, target_height) != (width, height) =>
            {
                let resized = image::imageops::resize(
                    &buffer,
                    target_width as u32,
                    target_height as u32,
                    FilterType::Triangle,
                );
                resized.save(path)?;
            }
            _ => buffer.save(path)?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn gradient_rgb(width: usize, height: usize) -> Vec<u8> {
        let mut pixels = Vec::with_capacity(width * height * 3);
        for y in 0..height {
            for x in 0..width {
                #[allow(clippy::cast_possible_truncation)]
                let value = ((x + y) * 8) as u8;
                pixels.extend_from_slice(&[value, value, value]);
            }
        }
        pixels
    }

    #[test]
    fn encode_decode_round_trip() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("gray.png");
        let codec = FileImageCodec;

        let pixels = gradient_rgb(8, 4);
        assert!(codec.encode_rgb(&path, 8, 4, &pixels, None).is_ok());

        let decoded = codec.decode_rgba(&path);
        let Ok(decoded) = decoded else {
            panic!("decode should succeed");
        };
        assert_eq!((decoded.width, decoded.height), (8, 4));
        // top-left origin: first RGBA pixel matches first RGB pixel
        assert_eq!(&decoded.pixels[0..3], &pixels[0..3]);
        assert_eq!(decoded.pixels[3], 255);
    }

    #[test]
    fn encode_with_resize_changes_dimensions() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("resized.png");
        let codec = FileImageCodec;

        let pixels = gradient_rgb(8, 8);
        assert!(codec
            .encode_rgb(&path, 8, 8, &pixels, Some((4, 2)))
            .is_ok());

        let decoded = codec.decode_rgba(&path);
        assert!(decoded.is_ok_and(|d| (d.width, d.height) == (4, 2)));
    }

    #[test]
    fn mismatched_buffer_is_rejected() {
        let Ok(dir) = tempfile::tempdir() else {
            panic!("tempdir");
        };
        let path = dir.path().join("bad.png");
        let result = FileImageCodec.encode_rgb(&path, 4, 4, &[0u8; 10], None);
        assert!(matches!(result, Err(FieldError::InvalidDimensions { .. })));
    }

    #[test]
    fn decode_missing_file_is_recoverable() {
        let result = FileImageCodec.decode_rgba(Path::new("no_such_image_9876.png"));
        assert!(result.is_err());
    }
}
