mod begin_capture;
mod capture_to_file;
mod preview;

use core::error::Error;

use crate::{device::RenderDevice, pixels::PixelBuffer, target::RenderTarget};

pub use capture_to_file::CaptureError;

/// Result of one step of the begin-capture protocol.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CaptureStep {
    /// The render target is not ready yet; step again next tick.
    Pending,

    /// The render target is valid and ready to be read.
    Ready,
}

/// Where a capturer is in its capture session.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SessionState {
    /// No session; no render target is owned.
    Idle,

    /// The begin protocol is running; the render target exists but must
    /// not be read yet.
    Preparing,

    /// The begin protocol completed; the render target may be read.
    Ready,
}

/// The per-source capability set behind [`RenderCapturer`].
///
/// A capture source knows whether its render source can currently produce
/// a valid frame, how to size and refresh the render target, and how to
/// tell when the host renderer has finished drawing into it. Everything
/// else (session state, the active-slot discipline, encoding, error
/// recording) is shared and lives on [`RenderCapturer`].
pub trait CaptureSource {
    /// The host device this source renders through.
    type Device: RenderDevice;

    /// Source-specific failure type.
    type Error: Error;

    /// Whether the render source can currently produce a valid frame.
    ///
    /// Pure readiness query with no side effects; safe to call every tick.
    fn can_capture(&self, device: &Self::Device) -> bool;

    /// Produce or resize the render target to the source's current
    /// dimensions and refresh its contents.
    ///
    /// Must be idempotent when the dimensions are unchanged. On error any
    /// previously owned target has been released.
    fn update_render_target(
        &mut self,
        device: &mut Self::Device,
        current: Option<RenderTarget>,
    ) -> Result<RenderTarget, Self::Error>;

    /// Advance the preparation protocol by one step.
    ///
    /// Called once per tick. The render pass is scheduled asynchronously
    /// by the host, so implementations poll its readiness signal rather
    /// than assuming completion within a fixed number of ticks, and
    /// report [`CaptureStep::Ready`] once `target` is guaranteed valid.
    fn begin_step(
        &mut self,
        device: &mut Self::Device,
        target: &RenderTarget,
    ) -> Result<CaptureStep, Self::Error>;

    /// Material applied to preview read-backs.
    ///
    /// The default is a pass-through.
    fn preview_material(&self) -> Option<&dyn PreviewMaterial> {
        None
    }
}

/// In-place pixel transform applied when previewing the internal render
/// target.
pub trait PreviewMaterial {
    /// Transform `pixels` in place.
    fn apply(&self, pixels: &mut PixelBuffer);
}

/// Coordinates one render source through the capture protocol:
/// readiness query, multi-tick preparation, capture to file, cleanup.
pub struct RenderCapturer<S: CaptureSource> {
    source: S,
    target: Option<RenderTarget>,
    state: SessionState,
    last_error: Option<String>,
}

impl<S: CaptureSource> RenderCapturer<S> {
    /// Wrap a capture source.
    pub fn new(source: S) -> Self {
        Self {
            source,
            target: None,
            state: SessionState::Idle,
            last_error: None,
        }
    }

    /// Whether the source can currently produce a valid frame.
    pub fn can_capture(&self, device: &S::Device) -> bool {
        self.source.can_capture(device)
    }

    /// The current session state.
    pub fn state(&self) -> SessionState {
        self.state
    }

    /// Whether the begin protocol has completed.
    pub fn is_ready(&self) -> bool {
        self.state == SessionState::Ready
    }

    /// The internal render target, for inspection and preview.
    ///
    /// Ownership stays with the capturer.
    pub fn internal_target(&self) -> Option<&RenderTarget> {
        self.target.as_ref()
    }

    /// The error recorded by the most recent failed
    /// [`capture_to_file`](Self::capture_to_file).
    ///
    /// Holds one message at a time; each new attempt overwrites it.
    pub fn last_error_message(&self) -> Option<&str> {
        self.last_error.as_deref()
    }

    /// The wrapped source.
    pub fn source(&self) -> &S {
        &self.source
    }

    /// The wrapped source, mutably.
    pub fn source_mut(&mut self) -> &mut S {
        &mut self.source
    }

    /// Release the render target and return to [`SessionState::Idle`].
    ///
    /// Idempotent and callable from any state, including when no capture
    /// ever began.
    pub fn end_capture(&mut self, device: &mut S::Device) {
        if let Some(target) = self.target.take() {
            target.release(device);
        }
        self.state = SessionState::Idle;
    }
}
