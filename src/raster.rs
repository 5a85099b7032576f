use crate::error::{CleanupError, Result};
use image::{DynamicImage, GrayImage, Luma, Rgba, RgbaImage};

/// Number of channels in every raster handled by the engine (R, G, B, A)
pub const CHANNELS: usize = 4;

/// 8-bit RGBA raster, row-major, channel order R, G, B, A
///
/// Dimensions are fixed at construction. Filters either return a new raster
/// or mutate one in place; they never change its shape.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Raster {
    image: RgbaImage,
}

impl Raster {
    /// Fully transparent black raster
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            image: RgbaImage::new(width, height),
        }
    }

    pub fn from_pixel(width: u32, height: u32, pixel: [u8; 4]) -> Self {
        Self {
            image: RgbaImage::from_pixel(width, height, Rgba(pixel)),
        }
    }

    /// Wrap a packed RGBA buffer. The buffer must hold exactly `width * height * 4` bytes.
    pub fn from_raw(width: u32, height: u32, data: Vec<u8>) -> Result<Self> {
        Self::from_raw_channels(width, height, CHANNELS, data)
    }

    /// Wrap a packed buffer with an explicit channel count
    ///
    /// Anything other than four interleaved channels is rejected; RGB or
    /// grayscale buffers are never padded with a synthetic alpha channel.
    pub fn from_raw_channels(
        width: u32,
        height: u32,
        channels: usize,
        data: Vec<u8>,
    ) -> Result<Self> {
        if channels != CHANNELS {
            return Err(CleanupError::invalid_format(format!(
                "expected {} channels (RGBA), got {}",
                CHANNELS, channels
            )));
        }

        let expected = (width as usize)
            .checked_mul(height as usize)
            .and_then(|n| n.checked_mul(CHANNELS))
            .ok_or_else(|| {
                CleanupError::invalid_format(format!("{}x{} raster is too large", width, height))
            })?;

        if data.len() != expected {
            return Err(CleanupError::invalid_format(format!(
                "{}x{} RGBA raster needs {} bytes, buffer has {}",
                width,
                height,
                expected,
                data.len()
            )));
        }

        let image = RgbaImage::from_raw(width, height, data).ok_or_else(|| {
            CleanupError::invalid_format(format!("buffer does not fit {}x{}", width, height))
        })?;

        Ok(Self { image })
    }

    /// Accept a decoded image only if it already is 8-bit RGBA
    pub fn from_dynamic(image: DynamicImage) -> Result<Self> {
        match image {
            DynamicImage::ImageRgba8(image) => Ok(Self { image }),
            other => Err(CleanupError::invalid_format(format!(
                "expected 8-bit RGBA image, got {:?}",
                other.color()
            ))),
        }
    }

    pub fn width(&self) -> u32 {
        self.image.width()
    }

    pub fn height(&self) -> u32 {
        self.image.height()
    }

    pub fn dimensions(&self) -> (u32, u32) {
        self.image.dimensions()
    }

    pub fn pixel_count(&self) -> usize {
        self.width() as usize * self.height() as usize
    }

    /// Pixel at (x, y). Panics when out of bounds, like `ImageBuffer::get_pixel`.
    pub fn pixel(&self, x: u32, y: u32) -> [u8; 4] {
        self.image.get_pixel(x, y).0
    }

    pub fn as_raw(&self) -> &[u8] {
        self.image.as_raw()
    }

    pub(crate) fn samples_mut(&mut self) -> &mut [u8] {
        &mut self.image
    }

    pub fn as_image(&self) -> &RgbaImage {
        &self.image
    }

    pub fn into_image(self) -> RgbaImage {
        self.image
    }

    pub fn into_dynamic(self) -> DynamicImage {
        DynamicImage::ImageRgba8(self.image)
    }

    /// Alpha channel as a grayscale image, for inspecting the matte
    pub fn alpha_matte(&self) -> GrayImage {
        GrayImage::from_fn(self.width(), self.height(), |x, y| {
            Luma([self.image.get_pixel(x, y)[3]])
        })
    }

    /// Number of soft edge pixels (0 < alpha < 255)
    pub fn soft_edge_count(&self) -> usize {
        self.image
            .pixels()
            .filter(|p| p[3] > 0 && p[3] < 255)
            .count()
    }
}

impl From<RgbaImage> for Raster {
    fn from(image: RgbaImage) -> Self {
        Self { image }
    }
}

impl From<Raster> for RgbaImage {
    fn from(raster: Raster) -> Self {
        raster.image
    }
}
