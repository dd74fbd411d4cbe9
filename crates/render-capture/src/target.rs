use tracing::debug;

use crate::device::{DeviceError, PixelFormat, RenderDevice, TargetDescriptor, TargetId};

/// A render target owned by one capturer.
///
/// Created lazily on first use, replaced when the wanted descriptor
/// changes, and released explicitly: the owner must call
/// [`release`](Self::release) on every exit path.
#[derive(Debug)]
pub struct RenderTarget {
    id: TargetId,
    descriptor: TargetDescriptor,
}

impl RenderTarget {
    /// Make `current` match `wanted`.
    ///
    /// Reuses the existing handle when the descriptor is unchanged,
    /// otherwise releases it and allocates a fresh target.
    pub fn ensure<D: RenderDevice>(
        device: &mut D,
        current: Option<Self>,
        wanted: TargetDescriptor,
    ) -> Result<Self, DeviceError> {
        if let Some(target) = current {
            if target.descriptor == wanted {
                return Ok(target);
            }

            debug!(
                "Replacing render target {:?}: {:?} -> {:?}",
                target.id, target.descriptor, wanted
            );
            target.release(device);
        }

        let id = device.create_target(wanted)?;
        Ok(Self {
            id,
            descriptor: wanted,
        })
    }

    /// Return the target to the device.
    pub fn release<D: RenderDevice>(self, device: &mut D) {
        device.release_target(self.id);
    }

    /// The device handle.
    pub fn id(&self) -> TargetId {
        self.id
    }

    /// Width and height in pixels.
    pub fn size(&self) -> [u32; 2] {
        self.descriptor.size
    }

    /// Storage format.
    pub fn format(&self) -> PixelFormat {
        self.descriptor.format
    }

    /// The full descriptor.
    pub fn descriptor(&self) -> TargetDescriptor {
        self.descriptor
    }
}
