use render_capture::{
    CaptureSource, CaptureStep, DeviceError, PixelFormat, PreviewMaterial, RenderTarget,
    TargetDescriptor,
};
use thiserror::Error;
use tracing::debug;

use crate::{
    device::{RenderPass, SoftwareDevice},
    material::LinearToGamma,
};

/// Procedural image a [`SceneSource`] renders.
#[derive(Clone, Debug)]
pub struct Scene {
    /// Output dimensions in pixels.
    pub size: [u32; 2],

    /// Render target storage format.
    pub format: PixelFormat,

    /// The draw producing the image.
    pub pass: RenderPass,
}

/// Capture source backed by the software rasterizer.
///
/// Reports not-ready until a scene is set. Fresh render targets gain valid
/// contents through the host-scheduled pass driven by the begin protocol;
/// once a session is live, each capture re-renders the scene
/// synchronously.
pub struct SceneSource {
    scene: Option<Scene>,
    preview: Option<LinearToGamma>,
}

impl SceneSource {
    /// A source with no scene yet.
    pub fn empty() -> Self {
        Self {
            scene: None,
            preview: None,
        }
    }

    /// A source rendering `scene`.
    pub fn new(scene: Scene) -> Self {
        Self {
            scene: Some(scene),
            preview: None,
        }
    }

    /// Gamma-encode preview read-backs.
    pub fn with_gamma_preview(mut self) -> Self {
        self.preview = Some(LinearToGamma);
        self
    }

    /// Replace or remove the scene.
    pub fn set_scene(&mut self, scene: Option<Scene>) {
        self.scene = scene;
    }

    /// The current scene.
    pub fn scene(&self) -> Option<&Scene> {
        self.scene.as_ref()
    }
}

impl CaptureSource for SceneSource {
    type Device = SoftwareDevice;
    type Error = SceneSourceError;

    fn can_capture(&self, _device: &SoftwareDevice) -> bool {
        self.scene.is_some()
    }

    fn update_render_target(
        &mut self,
        device: &mut SoftwareDevice,
        current: Option<RenderTarget>,
    ) -> Result<RenderTarget, SceneSourceError> {
        let Some(scene) = self.scene.as_ref() else {
            if let Some(target) = current {
                target.release(device);
            }
            return Err(SceneSourceError::SceneRemoved);
        };

        let descriptor = TargetDescriptor {
            size: scene.size,
            format: scene.format,
        };
        let target = RenderTarget::ensure(device, current, descriptor)?;

        // A fresh target has no valid contents until the host's scheduled
        // pass lands; only refresh targets that have rendered before.
        if device.pass_complete(target.id()) {
            if let Err(error) = device.render_now(target.id(), &scene.pass) {
                target.release(device);
                return Err(error.into());
            }
        }

        Ok(target)
    }

    fn begin_step(
        &mut self,
        device: &mut SoftwareDevice,
        target: &RenderTarget,
    ) -> Result<CaptureStep, SceneSourceError> {
        if device.pass_complete(target.id()) {
            return Ok(CaptureStep::Ready);
        }

        if !device.pass_scheduled(target.id()) {
            let Some(scene) = self.scene.as_ref() else {
                return Err(SceneSourceError::SceneRemoved);
            };

            device.schedule_pass(target.id(), scene.pass.clone())?;
            debug!("Scheduled scene pass into {:?}", target.id());
        }

        Ok(CaptureStep::Pending)
    }

    fn preview_material(&self) -> Option<&dyn PreviewMaterial> {
        self.preview
            .as_ref()
            .map(|material| material as &dyn PreviewMaterial)
    }
}

/// Scene source error variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum SceneSourceError {
    /// The scene was removed while a capture session was active.
    #[error("The scene was removed while a capture session was active.")]
    SceneRemoved,

    /// The software device rejected an operation.
    #[error(transparent)]
    Device(#[from] DeviceError),
}
