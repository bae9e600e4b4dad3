//! Image detection and sizing for embedded pictures.

use deck_core::{Emu, Error, PictureSpec, Result};
use image::ImageReader;
use std::io::Cursor;

/// Image formats that can be embedded in a slide.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ImageFormat {
    Png,
    Jpeg,
    Gif,
    Bmp,
}

impl ImageFormat {
    /// MIME type used in `[Content_Types].xml`.
    pub fn mime_type(&self) -> &'static str {
        match self {
            Self::Png => "image/png",
            Self::Jpeg => "image/jpeg",
            Self::Gif => "image/gif",
            Self::Bmp => "image/bmp",
        }
    }

    /// File extension for the media part.
    pub fn extension(&self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Jpeg => "jpeg",
            Self::Gif => "gif",
            Self::Bmp => "bmp",
        }
    }

    /// Map a decoder format onto one a slide can embed.
    pub fn from_image_format(format: image::ImageFormat) -> Option<Self> {
        match format {
            image::ImageFormat::Png => Some(Self::Png),
            image::ImageFormat::Jpeg => Some(Self::Jpeg),
            image::ImageFormat::Gif => Some(Self::Gif),
            image::ImageFormat::Bmp => Some(Self::Bmp),
            _ => None,
        }
    }

    /// Detect image format from magic bytes.
    pub fn detect_from_bytes(bytes: &[u8]) -> Option<Self> {
        image::guess_format(bytes).ok().and_then(Self::from_image_format)
    }
}

/// Read pixel dimensions from an image header without decoding pixels.
pub fn image_size(bytes: &[u8]) -> Option<(u32, u32)> {
    let reader = ImageReader::new(Cursor::new(bytes)).with_guessed_format().ok()?;
    match reader.into_dimensions() {
        Ok((w, h)) if w > 0 && h > 0 => Some((w, h)),
        Ok(_) => None,
        Err(e) => {
            log::debug!("Could not read image dimensions: {}", e);
            None
        }
    }
}

/// A picture loaded from disk, ready to embed.
#[derive(Debug, Clone)]
pub struct Picture {
    pub data: Vec<u8>,
    pub format: ImageFormat,
    pub left: Emu,
    pub top: Emu,
    pub width: Emu,
    pub height: Emu,

    /// Source file name, used as the shape description.
    pub description: String,
}

impl Picture {
    /// Load the picture a spec points at.
    ///
    /// Returns `Ok(None)` when the file does not exist. An existing file that
    /// is not a recognised image is an error.
    pub fn load(spec: &PictureSpec) -> Result<Option<Self>> {
        if !spec.path.exists() {
            log::warn!("Image not found, leaving slide without picture: {}", spec.path.display());
            return Ok(None);
        }

        let data = std::fs::read(&spec.path)?;
        let description = spec
            .path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();

        Self::from_bytes(data, spec, description).map(Some)
    }

    /// Build a picture from bytes already in memory.
    pub fn from_bytes(data: Vec<u8>, spec: &PictureSpec, description: String) -> Result<Self> {
        let unsupported = |reason: &str| Error::UnsupportedImage {
            path: spec.path.display().to_string(),
            reason: reason.to_string(),
        };

        let format =
            ImageFormat::detect_from_bytes(&data).ok_or_else(|| unsupported("unknown image format"))?;
        let (px_w, px_h) =
            image_size(&data).ok_or_else(|| unsupported("could not read image dimensions"))?;

        let height = spec.height.get();
        let width = (height as f64 * px_w as f64 / px_h as f64).round() as i64;

        log::debug!(
            "Loaded {:?} image {}x{} px from {}",
            format,
            px_w,
            px_h,
            spec.path.display()
        );

        Ok(Self {
            data,
            format,
            left: spec.left,
            top: spec.top,
            width: Emu(width),
            height: spec.height,
            description,
        })
    }
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;
    use image::{ImageBuffer, Rgb};

    /// Encode a blank image of the given size.
    pub(crate) fn encoded_image(width: u32, height: u32, format: image::ImageFormat) -> Vec<u8> {
        let img: ImageBuffer<Rgb<u8>, Vec<u8>> = ImageBuffer::new(width, height);
        let mut bytes = Cursor::new(Vec::new());
        img.write_to(&mut bytes, format).unwrap();
        bytes.into_inner()
    }

    pub(crate) fn png_bytes(width: u32, height: u32) -> Vec<u8> {
        encoded_image(width, height, image::ImageFormat::Png)
    }

    #[test]
    fn test_detect_format() {
        assert_eq!(ImageFormat::detect_from_bytes(&png_bytes(1, 1)), Some(ImageFormat::Png));
        assert_eq!(
            ImageFormat::detect_from_bytes(&encoded_image(4, 4, image::ImageFormat::Jpeg)),
            Some(ImageFormat::Jpeg)
        );
        assert_eq!(
            ImageFormat::detect_from_bytes(&encoded_image(4, 4, image::ImageFormat::Bmp)),
            Some(ImageFormat::Bmp)
        );
        assert_eq!(ImageFormat::detect_from_bytes(b"not an image"), None);
    }

    #[test]
    fn test_png_size() {
        assert_eq!(image_size(&png_bytes(192, 108)), Some((192, 108)));
    }

    #[test]
    fn test_jpeg_size() {
        let jpeg = encoded_image(64, 48, image::ImageFormat::Jpeg);
        assert_eq!(image_size(&jpeg), Some((64, 48)));
    }

    #[test]
    fn test_bmp_size() {
        let bmp = encoded_image(30, 20, image::ImageFormat::Bmp);
        assert_eq!(image_size(&bmp), Some((30, 20)));
    }

    #[test]
    fn test_truncated_png() {
        assert_eq!(image_size(&png_bytes(10, 10)[..12]), None);
    }

    #[test]
    fn test_width_follows_aspect_ratio() {
        let spec = PictureSpec::new(
            "shot.png",
            Emu::from_inches(1.0),
            Emu::from_inches(1.5),
            Emu::from_inches(5.0),
        );
        let pic = Picture::from_bytes(png_bytes(160, 100), &spec, "shot.png".into()).unwrap();
        assert_eq!(pic.width, Emu::from_inches(8.0));
        assert_eq!(pic.height, Emu::from_inches(5.0));
        assert_eq!(pic.format, ImageFormat::Png);
    }

    #[test]
    fn test_missing_file_is_skipped() {
        let spec = PictureSpec::new(
            "/definitely/not/here.png",
            Emu(0),
            Emu(0),
            Emu::from_inches(1.0),
        );
        assert!(Picture::load(&spec).unwrap().is_none());
    }

    #[test]
    fn test_unrecognised_bytes_error() {
        let spec = PictureSpec::new("notes.txt", Emu(0), Emu(0), Emu::from_inches(1.0));
        let err = Picture::from_bytes(b"hello".to_vec(), &spec, String::new()).unwrap_err();
        assert!(matches!(err, Error::UnsupportedImage { .. }));
    }
}
