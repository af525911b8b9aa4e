use image::{DynamicImage, RgbImage, RgbaImage};
use serde::{Deserialize, Serialize};
use crate::error::{Result, VbError};

/// Pixel layouts a [`VbFrame`] can carry.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum PixelFormat {
    Rgb8,
    Rgba8,
    #[default] Bgra8,
    /// 8-bit Y plane followed by an interleaved half-resolution CbCr plane, full range.
    Nv12,
}

impl PixelFormat {
    /// Bytes per pixel for packed formats, `None` for planar ones.
    pub fn bytes_per_pixel(&self) -> Option<usize> {
        match self {
            PixelFormat::Rgb8 => Some(3),
            PixelFormat::Rgba8 | PixelFormat::Bgra8 => Some(4),
            PixelFormat::Nv12 => None,
        }
    }

    pub fn buffer_len(&self, width: u32, height: u32) -> usize {
        let (w, h) = (width as usize, height as usize);
        match self.bytes_per_pixel() {
            Some(bpp) => w * h * bpp,
            None => w * h + 2 * w.div_ceil(2) * h.div_ceil(2),
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            PixelFormat::Rgb8 => "RGB8",
            PixelFormat::Rgba8 => "RGBA8",
            PixelFormat::Bgra8 => "BGRA8",
            PixelFormat::Nv12 => "NV12",
        }
    }
}

/// Owned camera or model-input frame.
#[derive(Debug, Clone, PartialEq)]
pub struct VbFrame {
    width: u32,
    height: u32,
    format: PixelFormat,
    data: Vec<u8>,
}

impl VbFrame {
    /// Wraps a pixel buffer, checking its length against `format`.
    pub fn new(width: u32, height: u32, format: PixelFormat, data: Vec<u8>) -> Result<Self> {
        let expected = format.buffer_len(width, height);
        if data.len() != expected {
            return Err(VbError::conversion(format!(
                "{} buffer of {}x{} needs {} bytes, got {}",
                format.as_str(), width, height, expected, data.len()
            )));
        }
        Ok(Self { width, height, format, data })
    }

    /// A frame filled with one packed pixel value. Planar formats are zero filled.
    pub fn filled(width: u32, height: u32, format: PixelFormat, pixel: &[u8]) -> Result<Self> {
        let data = match format.bytes_per_pixel() {
            Some(bpp) if pixel.len() == bpp => pixel.repeat(width as usize * height as usize),
            Some(bpp) => {
                return Err(VbError::conversion(format!(
                    "fill pixel has {} bytes, {} needs {}", pixel.len(), format.as_str(), bpp
                )))
            }
            None => vec![0u8; format.buffer_len(width, height)],
        };
        Self::new(width, height, format, data)
    }

    pub fn width(&self) -> u32 {
        self.width
    }

    pub fn height(&self) -> u32 {
        self.height
    }

    pub fn dimensions(&self) -> (u32, u32) {
        (self.width, self.height)
    }

    pub fn format(&self) -> PixelFormat {
        self.format
    }

    pub fn as_bytes(&self) -> &[u8] {
        &self.data
    }

    pub fn into_raw(self) -> Vec<u8> {
        self.data
    }

    /// Packed pixel at `(x, y)`. `None` outside the frame or for planar formats.
    pub fn pixel(&self, x: u32, y: u32) -> Option<&[u8]> {
        let bpp = self.format.bytes_per_pixel()?;
        if x >= self.width || y >= self.height {
            return None;
        }
        let start = (y as usize * self.width as usize + x as usize) * bpp;
        self.data.get(start..start + bpp)
    }

    /// Converts to an RGBA image for drawing or saving.
    pub fn to_rgba_image(&self) -> Result<RgbaImage> {
        let rgba = crate::image_ops::to_packed(self, PixelFormat::Rgba8)?;
        RgbaImage::from_raw(self.width, self.height, rgba)
            .ok_or_else(|| VbError::conversion("RGBA buffer does not match frame size"))
    }
}

impl From<RgbImage> for VbFrame {
    fn from(image: RgbImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgb8,
            data: image.into_raw(),
        }
    }
}

impl From<RgbaImage> for VbFrame {
    fn from(image: RgbaImage) -> Self {
        let (width, height) = image.dimensions();
        Self {
            width,
            height,
            format: PixelFormat::Rgba8,
            data: image.into_raw(),
        }
    }
}

impl From<DynamicImage> for VbFrame {
    fn from(image: DynamicImage) -> Self {
        Self::from(image.to_rgba8())
    }
}
