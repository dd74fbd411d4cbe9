use render_capture::{PixelBuffer, PixelData, PreviewMaterial};

const GAMMA_EXPONENT: f32 = 1.0 / 2.2;

/// Gamma-encodes linear color channels for display, leaving alpha
/// untouched.
#[derive(Clone, Copy, Debug, Default)]
pub struct LinearToGamma;

impl PreviewMaterial for LinearToGamma {
    fn apply(&self, pixels: &mut PixelBuffer) {
        match &mut pixels.data {
            PixelData::Rgba8(data) => {
                for pixel in data.chunks_exact_mut(4) {
                    for value in &mut pixel[..3] {
                        let linear = f32::from(*value) / 255.0;
                        *value = (linear.powf(GAMMA_EXPONENT) * 255.0).round() as u8;
                    }
                }
            }

            PixelData::RgbaF32(data) => {
                for pixel in data.chunks_exact_mut(4) {
                    for value in &mut pixel[..3] {
                        *value = value.max(0.0).powf(GAMMA_EXPONENT);
                    }
                }
            }
        }
    }
}
