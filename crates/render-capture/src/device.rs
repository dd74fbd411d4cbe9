use thiserror::Error;

use crate::pixels::PixelBuffer;

/// Opaque handle to a device-owned render target.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct TargetId(u64);

impl TargetId {
    /// Wrap a raw device handle.
    pub const fn new(raw: u64) -> Self {
        Self(raw)
    }

    /// The raw device handle.
    pub const fn raw(self) -> u64 {
        self.0
    }
}

/// Bit depth of a pixel rectangle, used both as target storage and as the
/// depth requested for a read-back.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum PixelFormat {
    /// 8 bits per channel RGBA.
    Rgba8,

    /// 32-bit float per channel RGBA.
    RgbaF32,
}

impl PixelFormat {
    /// Bytes one pixel occupies at this depth.
    pub const fn bytes_per_pixel(self) -> usize {
        match self {
            Self::Rgba8 => 4,
            Self::RgbaF32 => 16,
        }
    }
}

/// Size and storage format a render target should have.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TargetDescriptor {
    /// Width and height in pixels.
    pub size: [u32; 2],

    /// Storage format.
    pub format: PixelFormat,
}

/// The host renderer's surface for render-target management and pixel
/// read-back.
///
/// The device has a single active slot shared by every consumer; the
/// read-back primitive always reads the target bound to it. Anything that
/// rebinds the slot must restore it, see
/// [`ActiveTargetGuard`](crate::ActiveTargetGuard).
pub trait RenderDevice {
    /// Allocate a new render target.
    fn create_target(&mut self, descriptor: TargetDescriptor) -> Result<TargetId, DeviceError>;

    /// Release a render target. Unknown handles are ignored.
    fn release_target(&mut self, target: TargetId);

    /// The target currently bound to the active slot.
    fn active_target(&self) -> Option<TargetId>;

    /// Bind a target to the active slot, or clear the slot.
    fn set_active_target(&mut self, target: Option<TargetId>);

    /// Read the full pixel rectangle of the active target at the requested
    /// depth.
    fn read_back(&mut self, format: PixelFormat) -> Result<PixelBuffer, DeviceError>;
}

/// Render device error variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum DeviceError {
    /// The handle does not name a live target on this device.
    #[error("Render target {0:?} is not owned by this device.")]
    UnknownTarget(TargetId),

    /// The device could not allocate a target of the requested size.
    #[error("Failed to allocate a {0}x{1} render target.")]
    Allocation(u32, u32),

    /// A read-back was requested while nothing was bound to the active
    /// slot.
    #[error("No render target is bound to the active slot.")]
    NoActiveTarget,

    /// The backend failed to read pixels back.
    #[error("Failed to read back pixels:\n{0}")]
    ReadBack(String),
}
