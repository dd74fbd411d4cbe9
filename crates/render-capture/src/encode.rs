use std::io::Cursor;

use image::{
    ExtendedColorType, ImageEncoder, ImageError,
    codecs::{openexr::OpenExrEncoder, png::PngEncoder},
};
use thiserror::Error;

use crate::{
    device::PixelFormat,
    format::OutputFormat,
    pixels::{PixelBuffer, PixelData},
};

/// Encode a read-back pixel rectangle into the bytes of an image file.
///
/// The buffer's bit depth must match the depth `format` implies.
pub fn encode(pixels: &PixelBuffer, format: OutputFormat) -> Result<Vec<u8>, EncodeError> {
    let [width, height] = pixels.size;
    if width == 0 || height == 0 {
        return Err(EncodeError::EmptyTarget(width, height));
    }

    let mut bytes = Vec::new();

    match (format, &pixels.data) {
        (OutputFormat::Png, PixelData::Rgba8(data)) => {
            let encoder = PngEncoder::new(&mut bytes);
            encoder.write_image(data, width, height, ExtendedColorType::Rgba8)?;
        }

        (OutputFormat::Exr, PixelData::RgbaF32(data)) => {
            let encoder = OpenExrEncoder::new(Cursor::new(&mut bytes));
            encoder.write_image(
                bytemuck::cast_slice(data.as_ref()),
                width,
                height,
                ExtendedColorType::Rgba32F,
            )?;
        }

        (format, _) => {
            return Err(EncodeError::DepthMismatch {
                requested: format,
                actual: pixels.format(),
            });
        }
    }

    Ok(bytes)
}

/// Encoding error variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum EncodeError {
    /// The render target had a zero dimension.
    #[error("Cannot encode an empty {0}x{1} render target.")]
    EmptyTarget(u32, u32),

    /// The buffer's bit depth does not belong to the requested format.
    #[error("{actual:?} pixel data cannot be encoded as {requested:?}.")]
    DepthMismatch {
        /// The format that was asked for.
        requested: OutputFormat,
        /// The depth the buffer actually has.
        actual: PixelFormat,
    },

    /// The encoder rejected the buffer.
    #[error("Failed to encode the capture:\n{0}")]
    Image(#[from] ImageError),
}
