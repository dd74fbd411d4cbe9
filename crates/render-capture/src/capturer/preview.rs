use crate::{
    active_slot::ActiveTargetGuard,
    device::{DeviceError, RenderDevice},
    pixels::PixelBuffer,
};

use super::{CaptureSource, RenderCapturer};

impl<S: CaptureSource> RenderCapturer<S> {
    /// Read the internal render target back for preview.
    ///
    /// Reads at the target's own depth and applies the source's preview
    /// material if it has one. Returns `Ok(None)` while no render target
    /// exists. The active slot is restored before returning.
    pub fn preview_frame(
        &mut self,
        device: &mut S::Device,
    ) -> Result<Option<PixelBuffer>, DeviceError> {
        let Some(target) = self.target.as_ref() else {
            return Ok(None);
        };

        let mut pixels = {
            let mut slot = ActiveTargetGuard::save(device);
            slot.activate(target.id());
            slot.device().read_back(target.format())?
        };

        if let Some(material) = self.source.preview_material() {
            material.apply(&mut pixels);
        }

        Ok(Some(pixels))
    }
}
