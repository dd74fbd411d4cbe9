use core::error::Error;
use std::{fs, io, path::PathBuf};

use render_capture::{CaptureSource, CaptureStep, RenderCapturer};
use thiserror::Error as ThisError;
use tracing::{debug, info, warn};
use utilities::StageTimer;

use crate::config::RecorderConfig;

/// Writes numbered frame files by driving a capturer through the capture
/// protocol once per host tick.
pub struct SequenceRecorder {
    config: RecorderConfig,
    next_frame: u32,
}

impl SequenceRecorder {
    /// A recorder starting at frame zero.
    pub fn new(config: RecorderConfig) -> Self {
        Self {
            config,
            next_frame: 0,
        }
    }

    /// The settings in use.
    pub fn config(&self) -> &RecorderConfig {
        &self.config
    }

    /// The number the next captured frame receives.
    pub fn next_frame(&self) -> u32 {
        self.next_frame
    }

    /// The file a frame number is written to.
    pub fn frame_path(&self, frame: u32) -> PathBuf {
        let digits = self.config.frame_digits;
        let extension = self.config.format.extension();
        self.config
            .output_dir
            .join(format!(
                "{}_{frame:0digits$}.{extension}",
                self.config.base_name
            ))
    }

    /// Capture `frames` sequential frame files.
    ///
    /// Checks source readiness, drives the begin protocol to completion
    /// (advancing the host with `tick` between steps, however many the
    /// host needs), then captures one file per frame. A failed frame does not
    /// abort the batch; it is collected in the report for the caller to
    /// act on. The capture session is ended on every exit path.
    pub fn record<S, F>(
        &mut self,
        capturer: &mut RenderCapturer<S>,
        device: &mut S::Device,
        frames: u32,
        mut tick: F,
    ) -> Result<RecordReport, RecordError<S::Error>>
    where
        S: CaptureSource,
        F: FnMut(&mut S::Device),
    {
        if !capturer.can_capture(device) {
            return Err(RecordError::SourceNotReady);
        }

        fs::create_dir_all(&self.config.output_dir).map_err(|source| RecordError::CreateDir {
            path: self.config.output_dir.clone(),
            source,
        })?;

        let mut timer = StageTimer::start("record");

        let mut step = match capturer.begin_capture(device) {
            Ok(step) => step,
            Err(error) => {
                capturer.end_capture(device);
                return Err(RecordError::Begin(error));
            }
        };
        while step == CaptureStep::Pending {
            tick(device);
            step = match capturer.step(device) {
                Ok(step) => step,
                Err(error) => {
                    capturer.end_capture(device);
                    return Err(RecordError::Begin(error));
                }
            };
        }
        timer.stage("prepare");

        info!(
            "Recording {frames} frames into {:?}",
            self.config.output_dir
        );

        let mut report = RecordReport {
            written: Vec::new(),
            failures: Vec::new(),
        };

        for _ in 0..frames {
            let frame = self.next_frame;
            let path = self.frame_path(frame);
            capturer.capture_to_file(device, &path, self.config.format);

            match capturer.last_error_message() {
                Some(message) => {
                    warn!("Frame {frame} failed: {message}");
                    report.failures.push(FrameFailure {
                        frame,
                        message: message.to_owned(),
                    });
                }

                None => {
                    debug!("Frame {frame} written to {path:?}");
                    report.written.push(path);
                }
            }

            self.next_frame += 1;
            tick(device);
        }
        timer.stage("capture");

        capturer.end_capture(device);
        Ok(report)
    }
}

/// Outcome of a recording batch.
#[derive(Debug)]
pub struct RecordReport {
    /// Paths written, in frame order.
    pub written: Vec<PathBuf>,

    /// Frames that recorded an error instead of a file.
    pub failures: Vec<FrameFailure>,
}

/// A frame that failed to capture.
#[derive(Debug)]
pub struct FrameFailure {
    /// The frame number.
    pub frame: u32,

    /// The recorded error message.
    pub message: String,
}

/// Recording error variants.
#[derive(Debug, ThisError)]
#[non_exhaustive]
pub enum RecordError<E: Error> {
    /// The capture source cannot currently produce a valid frame.
    #[error("The capture source is not ready.")]
    SourceNotReady,

    /// The output directory could not be created.
    #[error("Failed to create the output directory {path:?}:\n{source}")]
    CreateDir {
        /// The directory.
        path: PathBuf,

        /// Underlying I/O error.
        source: io::Error,
    },

    /// The begin-capture protocol failed.
    #[error("Failed to prepare the capture session:\n{0}")]
    Begin(E),
}
