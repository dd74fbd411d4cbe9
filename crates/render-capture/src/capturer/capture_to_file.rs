use core::error::Error;
use std::{
    fs, io,
    path::{Path, PathBuf},
};

use thiserror::Error as ThisError;
use tracing::warn;
use utilities::StageTimer;

use crate::{
    active_slot::ActiveTargetGuard,
    device::{DeviceError, RenderDevice},
    encode::{EncodeError, encode},
    format::OutputFormat,
};

use super::{CaptureSource, RenderCapturer};

impl<S: CaptureSource> RenderCapturer<S> {
    /// Capture the render target's contents into an image file at `path`.
    ///
    /// Refreshes the render target through the source, binds it to the
    /// device's active slot, reads the full pixel rectangle back at the
    /// depth `format` implies, encodes it, and writes the bytes to `path`.
    /// The previously active slot is restored and the temporary pixel
    /// buffer is released whether or not any stage fails.
    ///
    /// Failures never propagate: a message is recorded instead,
    /// retrievable through
    /// [`last_error_message`](Self::last_error_message), so a driver
    /// looping over many frames can continue past a failed one and decide
    /// for itself whether to abort the batch.
    ///
    /// Calling this before the begin protocol has completed is a caller
    /// error and is not detected: the read observes whatever the source
    /// last rendered.
    pub fn capture_to_file(&mut self, device: &mut S::Device, path: &Path, format: OutputFormat) {
        self.last_error = None;

        if let Err(error) = self.write_frame(device, path, format) {
            warn!("{error}");
            self.last_error = Some(error.to_string());
        }
    }

    fn write_frame(
        &mut self,
        device: &mut S::Device,
        path: &Path,
        format: OutputFormat,
    ) -> Result<(), CaptureError<S::Error>> {
        let mut timer = StageTimer::start("capture_to_file");
        let mut slot = ActiveTargetGuard::save(device);

        let target = self
            .source
            .update_render_target(slot.device(), self.target.take())
            .map_err(CaptureError::UpdateTarget)?;
        slot.activate(target.id());
        self.target = Some(target);

        let pixels = slot
            .device()
            .read_back(format.pixel_format())
            .map_err(CaptureError::ReadBack)?;
        timer.stage("read back");

        let bytes = encode(&pixels, format)?;
        timer.stage("encode");

        fs::write(path, &bytes).map_err(|source| CaptureError::WriteFile {
            path: path.to_path_buf(),
            source,
        })?;
        timer.stage("write");

        Ok(())
    }
}

/// Capture pipeline error variants.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum CaptureError<E: Error> {
    /// The source failed to produce a render target.
    #[error("Failed to update the render target:\n{0}")]
    UpdateTarget(E),

    /// The device failed to read the target back.
    #[error("Failed to read back the render target:\n{0}")]
    ReadBack(#[source] DeviceError),

    /// The pixel buffer could not be encoded.
    #[error(transparent)]
    Encode(#[from] EncodeError),

    /// The encoded bytes could not be written to disk.
    #[error("Failed to write the capture to {path:?}:\n{source}")]
    WriteFile {
        /// Destination that could not be written.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },
}
