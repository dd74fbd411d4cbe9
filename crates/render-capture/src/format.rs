use crate::device::PixelFormat;

/// On-disk image format of a capture.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum OutputFormat {
    /// Standard 8-bit raster with alpha.
    Png,

    /// Floating-point HDR raster.
    Exr,
}

impl OutputFormat {
    /// The read-back depth this format encodes from.
    ///
    /// PNG always goes through 8-bit channels, EXR always through 32-bit
    /// floats; the two are never mixed.
    pub const fn pixel_format(self) -> PixelFormat {
        match self {
            Self::Png => PixelFormat::Rgba8,
            Self::Exr => PixelFormat::RgbaF32,
        }
    }

    /// File extension without the dot.
    pub const fn extension(self) -> &'static str {
        match self {
            Self::Png => "png",
            Self::Exr => "exr",
        }
    }
}
