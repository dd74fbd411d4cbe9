//! Internal binaries for exercising the capture pipeline end to end.

use std::path::PathBuf;

use chrono::Local;
use tracing::subscriber::set_global_default;
use tracing_subscriber::{filter::LevelFilter, layer::SubscriberExt};

/// Install the logger for the smoke binaries.
pub fn init_logger() {
    let filter = tracing_subscriber::filter::Targets::new().with_default(LevelFilter::DEBUG);

    let std_logger = tracing_subscriber::fmt::layer().with_target(false);

    let collector = tracing_subscriber::registry().with(std_logger).with(filter);

    let _ = set_global_default(collector);
}

/// A timestamped session directory under `base`.
pub fn session_dir(base: &str) -> PathBuf {
    PathBuf::from(base).join(format!("session {}", Local::now().format("%F %H-%M-%S")))
}
