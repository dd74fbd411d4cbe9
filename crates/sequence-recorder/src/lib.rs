//! # Sequence Recorder
//! Drives a capturer through the capture protocol once per host tick to
//! write numbered frame files, with TOML-backed user settings.
//!

pub use config::{ConfigError, RecorderConfig};
pub use recorder::{FrameFailure, RecordError, RecordReport, SequenceRecorder};

mod config;
mod recorder;
