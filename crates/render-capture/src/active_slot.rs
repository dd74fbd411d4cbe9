use crate::device::{RenderDevice, TargetId};

/// Scoped access to the device-wide active render-target slot.
///
/// Snapshots the slot on construction and restores it when dropped, so
/// other consumers of the slot are undisturbed no matter how the scope
/// exits.
pub struct ActiveTargetGuard<'a, D: RenderDevice> {
    device: &'a mut D,
    saved: Option<TargetId>,
}

impl<'a, D: RenderDevice> ActiveTargetGuard<'a, D> {
    /// Snapshot the current active slot.
    pub fn save(device: &'a mut D) -> Self {
        let saved = device.active_target();
        Self { device, saved }
    }

    /// Bind `target` to the active slot for the rest of the scope.
    pub fn activate(&mut self, target: TargetId) {
        self.device.set_active_target(Some(target));
    }

    /// The guarded device.
    pub fn device(&mut self) -> &mut D {
        self.device
    }
}

impl<D: RenderDevice> Drop for ActiveTargetGuard<'_, D> {
    fn drop(&mut self) {
        self.device.set_active_target(self.saved);
    }
}
