//! # Software Render Provider
//! CPU implementation of the capture seams: a render device with
//! tick-scheduled passes and a scene-backed capture source. Serves
//! headless capture and the workspace's tests.
//!

pub use device::{RenderPass, SoftwareDevice};
pub use material::LinearToGamma;
pub use scene::{Scene, SceneSource, SceneSourceError};

mod device;
mod material;
mod scene;
