//! Icons for menu entries and tray icons.
//!
//! [`Icon`] is decoded RGBA pixel data. Loading from disk goes through the
//! [`ImageLoader`] trait so hosts can substitute their own resource lookup;
//! [`FileImageLoader`] decodes files with the `image` crate.

use std::fmt;
use std::path::Path;
use std::sync::Arc;

use horizon_menus_core::logging::targets;

/// Errors produced while loading or constructing an icon.
#[derive(Debug, thiserror::Error)]
pub enum ImageLoadError {
    /// The file could not be opened or decoded.
    #[error("image decode failed: {0}")]
    Decode(#[from] image::ImageError),

    /// The pixel buffer does not match the stated dimensions.
    #[error("RGBA buffer of {len} bytes does not match {width}x{height}")]
    InvalidDimensions { width: u32, height: u32, len: usize },
}

/// A decoded RGBA image.
///
/// Clones share the pixel buffer.
#[derive(Clone, PartialEq, Eq)]
pub struct Icon {
    rgba: Arc<[u8]>,
    width: u32,
    height: u32,
}

impl Icon {
    /// Create an icon from RGBA pixel data (4 bytes per pixel).
    ///
    /// # Errors
    ///
    /// Returns an error if the data size doesn't match `width * height * 4`.
    pub fn from_rgba(rgba: Vec<u8>, width: u32, height: u32) -> Result<Self, ImageLoadError> {
        let expected = width as usize * height as usize * 4;
        if rgba.len() != expected {
            return Err(ImageLoadError::InvalidDimensions {
                width,
                height,
                len: rgba.len(),
            });
        }
        Ok(Self {
            rgba: rgba.into(),
            width,
            height,
        })
    }

    /// Width in pixels.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Height in pixels.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Raw RGBA pixel data.
    pub fn rgba(&self) -> &[u8] {
        &self.rgba
    }
}

impl fmt::Debug for Icon {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Icon")
            .field("width", &self.width)
            .field("height", &self.height)
            .finish_non_exhaustive()
    }
}

/// Loads displayable images by path.
pub trait ImageLoader {
    /// Load and decode the image at `path`.
    fn load(&self, path: &Path) -> Result<Icon, ImageLoadError>;
}

impl<T: ImageLoader + ?Sized> ImageLoader for &T {
    fn load(&self, path: &Path) -> Result<Icon, ImageLoadError> {
        (**self).load(path)
    }
}

/// Decodes image files from the local filesystem.
///
/// The format is detected from the file contents and extension (PNG, ICO,
/// BMP and the other formats enabled in the `image` crate).
#[derive(Debug, Clone, Copy, Default)]
pub struct FileImageLoader;

impl ImageLoader for FileImageLoader {
    fn load(&self, path: &Path) -> Result<Icon, ImageLoadError> {
        let decoded = image::open(path)?.into_rgba8();
        let (width, height) = decoded.dimensions();
        tracing::trace!(
            target: targets::TRAY,
            path = %path.display(),
            width,
            height,
            "decoded image"
        );
        Icon::from_rgba(decoded.into_raw(), width, height)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_icon_from_rgba() {
        let icon = Icon::from_rgba(vec![255; 2 * 3 * 4], 2, 3).unwrap();
        assert_eq!(icon.width(), 2);
        assert_eq!(icon.height(), 3);
        assert_eq!(icon.rgba().len(), 24);
    }

    #[test]
    fn test_icon_from_rgba_invalid() {
        let result = Icon::from_rgba(vec![0; 10], 32, 32);
        assert!(matches!(
            result,
            Err(ImageLoadError::InvalidDimensions { len: 10, .. })
        ));
    }

    #[test]
    fn test_file_loader_reads_png() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("tray.png");
        image::RgbaImage::from_pixel(4, 4, image::Rgba([10, 20, 30, 255]))
            .save(&path)
            .unwrap();

        let icon = FileImageLoader.load(&path).unwrap();
        assert_eq!((icon.width(), icon.height()), (4, 4));
        assert_eq!(&icon.rgba()[..4], &[10, 20, 30, 255]);
    }

    #[test]
    fn test_file_loader_missing_file() {
        let dir = tempfile::tempdir().unwrap();
        let result = FileImageLoader.load(&dir.path().join("missing.png"));
        assert!(matches!(result, Err(ImageLoadError::Decode(_))));
    }
}
