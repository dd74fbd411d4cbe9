use std::collections::HashMap;

use render_capture::{
    DeviceError, PixelBuffer, PixelData, PixelFormat, RenderDevice, TargetDescriptor, TargetId,
};
use tracing::debug;

/// One draw into a render target.
#[derive(Clone, Debug)]
pub enum RenderPass {
    /// Fill with a constant color.
    Clear([f32; 4]),

    /// Blend left-to-right between two colors.
    Gradient {
        /// Color of the leftmost column.
        left: [f32; 4],
        /// Color of the rightmost column.
        right: [f32; 4],
    },
}

impl RenderPass {
    fn rasterize(&self, size: [u32; 2]) -> Box<[f32]> {
        let width = size[0] as usize;
        let height = size[1] as usize;
        let mut pixels = vec![0.0; width * height * 4];

        match *self {
            Self::Clear(color) => {
                for pixel in pixels.chunks_exact_mut(4) {
                    pixel.copy_from_slice(&color);
                }
            }

            Self::Gradient { left, right } => {
                for y in 0..height {
                    for x in 0..width {
                        let t = if width > 1 {
                            x as f32 / (width - 1) as f32
                        } else {
                            0.0
                        };

                        let offset = (y * width + x) * 4;
                        for channel in 0..4 {
                            pixels[offset + channel] =
                                left[channel] + (right[channel] - left[channel]) * t;
                        }
                    }
                }
            }
        }

        pixels.into_boxed_slice()
    }
}

struct SoftwareTarget {
    descriptor: TargetDescriptor,
    pixels: Box<[f32]>,
    pending: Option<PendingPass>,
    rendered: bool,
}

struct PendingPass {
    pass: RenderPass,
    remaining_ticks: u32,
}

/// CPU-resident stand-in for the host renderer.
///
/// Targets are blocks of f32 RGBA pixels. Scheduled passes complete a
/// configurable number of [`tick`](Self::tick)s after submission, the way
/// a host engine schedules rendering asynchronously within its frame loop.
pub struct SoftwareDevice {
    targets: HashMap<TargetId, SoftwareTarget>,
    next_target: u64,
    active: Option<TargetId>,
    pass_latency: u32,
}

impl SoftwareDevice {
    /// A device whose scheduled passes complete on the next tick.
    pub fn new() -> Self {
        Self::with_pass_latency(1)
    }

    /// A device whose scheduled passes complete `latency` ticks after
    /// submission.
    pub fn with_pass_latency(latency: u32) -> Self {
        Self {
            targets: HashMap::new(),
            next_target: 1,
            active: None,
            pass_latency: latency.max(1),
        }
    }

    /// Advance the frame loop by one tick, progressing scheduled passes.
    pub fn tick(&mut self) {
        for (id, target) in &mut self.targets {
            if let Some(mut pending) = target.pending.take() {
                if pending.remaining_ticks > 1 {
                    pending.remaining_ticks -= 1;
                    target.pending = Some(pending);
                } else {
                    debug!("Render pass into {id:?} completed");
                    target.pixels = pending.pass.rasterize(target.descriptor.size);
                    target.rendered = true;
                }
            }
        }
    }

    /// Queue a pass the way the host schedules rendering; it completes
    /// once the device's pass latency has elapsed.
    pub fn schedule_pass(&mut self, target: TargetId, pass: RenderPass) -> Result<(), DeviceError> {
        let latency = self.pass_latency;
        let slot = self
            .targets
            .get_mut(&target)
            .ok_or(DeviceError::UnknownTarget(target))?;

        slot.pending = Some(PendingPass {
            pass,
            remaining_ticks: latency,
        });
        Ok(())
    }

    /// Execute a pass immediately, outside the scheduled frame loop.
    pub fn render_now(&mut self, target: TargetId, pass: &RenderPass) -> Result<(), DeviceError> {
        let slot = self
            .targets
            .get_mut(&target)
            .ok_or(DeviceError::UnknownTarget(target))?;

        slot.pixels = pass.rasterize(slot.descriptor.size);
        slot.rendered = true;
        slot.pending = None;
        Ok(())
    }

    /// Whether a pass is queued for the target.
    pub fn pass_scheduled(&self, target: TargetId) -> bool {
        self.targets
            .get(&target)
            .is_some_and(|slot| slot.pending.is_some())
    }

    /// Whether the target holds completed render output.
    pub fn pass_complete(&self, target: TargetId) -> bool {
        self.targets
            .get(&target)
            .is_some_and(|slot| slot.pending.is_none() && slot.rendered)
    }

    /// Number of live targets.
    pub fn target_count(&self) -> usize {
        self.targets.len()
    }
}

impl Default for SoftwareDevice {
    fn default() -> Self {
        Self::new()
    }
}

impl RenderDevice for SoftwareDevice {
    fn create_target(&mut self, descriptor: TargetDescriptor) -> Result<TargetId, DeviceError> {
        let id = TargetId::new(self.next_target);
        self.next_target += 1;

        let pixel_count = descriptor.size[0] as usize * descriptor.size[1] as usize;
        self.targets.insert(
            id,
            SoftwareTarget {
                descriptor,
                pixels: vec![0.0; pixel_count * 4].into_boxed_slice(),
                pending: None,
                rendered: false,
            },
        );

        debug!(
            "Created render target {id:?} ({}x{} {:?})",
            descriptor.size[0], descriptor.size[1], descriptor.format
        );
        Ok(id)
    }

    fn release_target(&mut self, target: TargetId) {
        if self.targets.remove(&target).is_some() {
            debug!("Released render target {target:?}");
        }

        if self.active == Some(target) {
            self.active = None;
        }
    }

    fn active_target(&self) -> Option<TargetId> {
        self.active
    }

    fn set_active_target(&mut self, target: Option<TargetId>) {
        self.active = target;
    }

    fn read_back(&mut self, format: PixelFormat) -> Result<PixelBuffer, DeviceError> {
        let active = self.active.ok_or(DeviceError::NoActiveTarget)?;
        let target = self
            .targets
            .get(&active)
            .ok_or(DeviceError::UnknownTarget(active))?;

        let data = match format {
            PixelFormat::Rgba8 => PixelData::Rgba8(
                target
                    .pixels
                    .iter()
                    .map(|value| (value.clamp(0.0, 1.0) * 255.0).round() as u8)
                    .collect(),
            ),

            PixelFormat::RgbaF32 => PixelData::RgbaF32(target.pixels.clone()),
        };

        Ok(PixelBuffer {
            size: target.descriptor.size,
            data,
        })
    }
}
