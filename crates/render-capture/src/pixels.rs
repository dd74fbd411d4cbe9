use crate::device::PixelFormat;

/// CPU-side pixel rectangle produced by a read-back.
#[derive(Clone, Debug)]
pub struct PixelBuffer {
    /// Width and height in pixels.
    pub size: [u32; 2],

    /// Channel data, tightly packed rows.
    pub data: PixelData,
}

/// Raw channel data at one of the two supported bit depths.
#[derive(Clone, Debug)]
pub enum PixelData {
    /// 8 bits per channel RGBA.
    Rgba8(Box<[u8]>),

    /// 32-bit float per channel RGBA.
    RgbaF32(Box<[f32]>),
}

impl PixelBuffer {
    /// The bit depth of the data.
    pub fn format(&self) -> PixelFormat {
        match self.data {
            PixelData::Rgba8(_) => PixelFormat::Rgba8,
            PixelData::RgbaF32(_) => PixelFormat::RgbaF32,
        }
    }

    /// Number of pixels in the rectangle.
    pub fn pixel_count(&self) -> usize {
        self.size[0] as usize * self.size[1] as usize
    }
}
