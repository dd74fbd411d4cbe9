//! Tests for the capture-to-file pipeline against the software backend.
//!

use image::DynamicImage;
use rand::Rng;
use render_capture::{
    CaptureStep, OutputFormat, PixelFormat, RenderCapturer, RenderDevice, SessionState,
    TargetDescriptor,
};
use software_render_provider::{RenderPass, Scene, SceneSource, SoftwareDevice};

fn scene(size: [u32; 2], format: PixelFormat, pass: RenderPass) -> Scene {
    Scene { size, format, pass }
}

fn drive_to_ready(capturer: &mut RenderCapturer<SceneSource>, device: &mut SoftwareDevice) {
    let mut step = capturer.begin_capture(device).unwrap();
    while step == CaptureStep::Pending {
        device.tick();
        step = capturer.step(device).unwrap();
    }
}

#[test]
fn standard_capture_produces_a_decodable_png() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-standard-png");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [64, 64],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.25, 0.5, 0.75, 1.0]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    let path = dir.join("frame.png");
    capturer.capture_to_file(&mut device, &path, OutputFormat::Png);

    assert_eq!(capturer.last_error_message(), None);
    assert!(std::fs::metadata(&path).unwrap().len() > 0);

    let decoded = image::open(&path).unwrap();
    assert_eq!(decoded.width(), 64);
    assert_eq!(decoded.height(), 64);

    let DynamicImage::ImageRgba8(decoded) = decoded else {
        panic!("expected an 8-bit RGBA image");
    };
    assert_eq!(decoded.get_pixel(32, 32).0, [64, 128, 191, 255]);

    capturer.end_capture(&mut device);
}

#[test]
fn hdr_capture_round_trips_float_values() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-hdr-exr");

    let color = [0.1, 1.5, 2.0, 1.0];
    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [32, 16],
        PixelFormat::RgbaF32,
        RenderPass::Clear(color),
    )));
    drive_to_ready(&mut capturer, &mut device);

    let path = dir.join("frame.exr");
    capturer.capture_to_file(&mut device, &path, OutputFormat::Exr);
    assert_eq!(capturer.last_error_message(), None);

    let decoded = image::open(&path).unwrap().into_rgba32f();
    assert_eq!(decoded.dimensions(), (32, 16));
    assert_eq!(decoded.get_pixel(16, 8).0, color);

    capturer.end_capture(&mut device);
}

#[test]
fn random_hdr_color_round_trips_through_exr() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-random-exr");

    let mut rng = rand::rng();
    let color = [
        rng.random_range(0.0_f32..4.0),
        rng.random_range(0.0_f32..4.0),
        rng.random_range(0.0_f32..4.0),
        1.0,
    ];

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [8, 8],
        PixelFormat::RgbaF32,
        RenderPass::Clear(color),
    )));
    drive_to_ready(&mut capturer, &mut device);

    let path = dir.join("frame.exr");
    capturer.capture_to_file(&mut device, &path, OutputFormat::Exr);
    assert_eq!(capturer.last_error_message(), None);

    let decoded = image::open(&path).unwrap().into_rgba32f();
    assert_eq!(decoded.get_pixel(0, 0).0, color);

    capturer.end_capture(&mut device);
}

#[test]
fn unwritable_path_records_an_error_mentioning_the_path() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-unwritable");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [16, 16],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    let path = dir.join("no-such-dir").join("frame.png");
    capturer.capture_to_file(&mut device, &path, OutputFormat::Png);

    let message = capturer.last_error_message().expect("an error is recorded");
    assert!(message.contains("no-such-dir"));
    assert!(!path.exists());

    capturer.end_capture(&mut device);
}

#[test]
fn active_slot_is_restored_after_success_and_failure() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-slot-restore");

    let mut device = SoftwareDevice::new();
    let other = device
        .create_target(TargetDescriptor {
            size: [2, 2],
            format: PixelFormat::Rgba8,
        })
        .unwrap();
    device.set_active_target(Some(other));

    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [16, 16],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);
    assert_eq!(device.active_target(), Some(other));

    capturer.capture_to_file(&mut device, &dir.join("frame.png"), OutputFormat::Png);
    assert_eq!(capturer.last_error_message(), None);
    assert_eq!(device.active_target(), Some(other));

    capturer.capture_to_file(
        &mut device,
        &dir.join("no-such-dir").join("frame.png"),
        OutputFormat::Png,
    );
    assert!(capturer.last_error_message().is_some());
    assert_eq!(device.active_target(), Some(other));

    capturer.end_capture(&mut device);
}

#[test]
fn consecutive_failures_keep_only_the_latest_message() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-error-overwrite");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [8, 8],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    capturer.capture_to_file(
        &mut device,
        &dir.join("first-missing").join("frame.png"),
        OutputFormat::Png,
    );
    capturer.capture_to_file(
        &mut device,
        &dir.join("second-missing").join("frame.png"),
        OutputFormat::Png,
    );

    let message = capturer.last_error_message().expect("an error is recorded");
    assert!(message.contains("second-missing"));
    assert!(!message.contains("first-missing"));

    capturer.end_capture(&mut device);
}

#[test]
fn success_clears_the_recorded_error() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-error-clear");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [8, 8],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    capturer.capture_to_file(
        &mut device,
        &dir.join("missing").join("frame.png"),
        OutputFormat::Png,
    );
    assert!(capturer.last_error_message().is_some());

    capturer.capture_to_file(&mut device, &dir.join("frame.png"), OutputFormat::Png);
    assert_eq!(capturer.last_error_message(), None);

    capturer.end_capture(&mut device);
}

#[test]
fn zero_size_target_records_an_encoding_error() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-zero-size");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [0, 4],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));

    let path = dir.join("frame.png");
    capturer.capture_to_file(&mut device, &path, OutputFormat::Png);

    let message = capturer.last_error_message().expect("an error is recorded");
    assert!(message.contains("empty"));
    assert!(!path.exists());

    capturer.end_capture(&mut device);
}

#[test]
fn capture_repeats_while_ready() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-repeat");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [8, 8],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    for frame in 0..3 {
        let path = dir.join(format!("frame_{frame}.png"));
        capturer.capture_to_file(&mut device, &path, OutputFormat::Png);
        assert_eq!(capturer.last_error_message(), None);
        assert!(path.exists());
    }

    assert_eq!(capturer.state(), SessionState::Ready);
    assert_eq!(device.target_count(), 1);

    capturer.end_capture(&mut device);
    assert_eq!(device.target_count(), 0);
}

#[test]
fn target_resizes_when_the_scene_grows() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-resize");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [4, 4],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    capturer.capture_to_file(&mut device, &dir.join("small.png"), OutputFormat::Png);
    assert_eq!(capturer.internal_target().unwrap().size(), [4, 4]);

    capturer.source_mut().set_scene(Some(scene(
        [8, 8],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    capturer.capture_to_file(&mut device, &dir.join("large.png"), OutputFormat::Png);

    assert_eq!(capturer.last_error_message(), None);
    assert_eq!(capturer.internal_target().unwrap().size(), [8, 8]);
    assert_eq!(device.target_count(), 1);

    let decoded = image::open(dir.join("large.png")).unwrap();
    assert_eq!(decoded.width(), 8);

    capturer.end_capture(&mut device);
}

#[test]
fn scene_removed_mid_session_records_an_error() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-scene-removed");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [8, 8],
        PixelFormat::Rgba8,
        RenderPass::Clear([0.5; 4]),
    )));
    drive_to_ready(&mut capturer, &mut device);

    capturer.source_mut().set_scene(None);
    capturer.capture_to_file(&mut device, &dir.join("frame.png"), OutputFormat::Png);

    let message = capturer.last_error_message().expect("an error is recorded");
    assert!(message.contains("scene was removed"));
    assert!(capturer.internal_target().is_none());
    assert_eq!(device.target_count(), 0);

    capturer.end_capture(&mut device);
}

#[test]
fn capture_before_ready_reads_unrendered_content() {
    test_helper::init_logger();
    let dir = test_helper::scratch_dir("capture-before-ready");

    let mut device = SoftwareDevice::new();
    let mut capturer = RenderCapturer::new(SceneSource::new(scene(
        [4, 4],
        PixelFormat::Rgba8,
        RenderPass::Clear([1.0; 4]),
    )));

    // Caller error by contract: the read observes whatever the target
    // holds, here the unrendered zero fill.
    let path = dir.join("stale.png");
    capturer.capture_to_file(&mut device, &path, OutputFormat::Png);
    assert_eq!(capturer.last_error_message(), None);

    let decoded = image::open(&path).unwrap().into_rgba8();
    assert_eq!(decoded.get_pixel(0, 0).0, [0, 0, 0, 0]);

    capturer.end_capture(&mut device);
}
