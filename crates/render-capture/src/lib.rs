//! # Render Capture
//! Core capture protocol: the host-device seam, render-target lifecycle,
//! the multi-tick begin-capture state machine, and the capture-to-file
//! pipeline.
//!

pub use active_slot::ActiveTargetGuard;
pub use capturer::{
    CaptureError, CaptureSource, CaptureStep, PreviewMaterial, RenderCapturer, SessionState,
};
pub use device::{DeviceError, PixelFormat, RenderDevice, TargetDescriptor, TargetId};
pub use encode::{EncodeError, encode};
pub use format::OutputFormat;
pub use pixels::{PixelBuffer, PixelData};
pub use target::RenderTarget;

mod active_slot;
mod capturer;
mod device;
mod encode;
mod format;
mod pixels;
mod target;
