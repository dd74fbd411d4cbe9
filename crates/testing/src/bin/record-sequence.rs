//! Records a short HDR gradient sequence through the software backend.

use mimalloc::MiMalloc;
use render_capture::{OutputFormat, PixelFormat, RenderCapturer};
use sequence_recorder::{RecorderConfig, SequenceRecorder};
use software_render_provider::{RenderPass, Scene, SceneSource, SoftwareDevice};
use tracing::{error, info};

#[global_allocator]
static GLOBAL: MiMalloc = MiMalloc;

fn main() {
    testing::init_logger();

    let mut device = SoftwareDevice::with_pass_latency(2);
    let source = SceneSource::new(Scene {
        size: [320, 180],
        format: PixelFormat::RgbaF32,
        pass: RenderPass::Gradient {
            left: [0.0, 0.05, 0.1, 1.0],
            right: [2.5, 1.25, 0.5, 1.0],
        },
    })
    .with_gamma_preview();
    let mut capturer = RenderCapturer::new(source);

    let config = RecorderConfig {
        output_dir: testing::session_dir("captures"),
        format: OutputFormat::Exr,
        ..RecorderConfig::default()
    };
    let mut recorder = SequenceRecorder::new(config);

    match recorder.record(&mut capturer, &mut device, 24, |device| device.tick()) {
        Ok(report) => info!(
            "Wrote {} frames ({} failed)",
            report.written.len(),
            report.failures.len()
        ),

        Err(report_error) => {
            error!("{report_error}");
            std::process::exit(1);
        }
    }
}
