//! Shared support for the workspace's tests.

use std::{env, fs, path::PathBuf};

use tracing::subscriber::set_global_default;
use tracing_subscriber::{filter::LevelFilter, fmt::format::FmtSpan, layer::SubscriberExt};

/// Install the test logger.
///
/// Safe to call from every test in a binary; only the first call installs
/// a subscriber.
pub fn init_logger() {
    let filter = tracing_subscriber::filter::Targets::new().with_default(LevelFilter::DEBUG);

    let std_logger = tracing_subscriber::fmt::layer()
        .with_span_events(FmtSpan::CLOSE)
        .with_ansi(false)
        .with_target(false)
        .without_time();

    let collector = tracing_subscriber::registry().with(std_logger).with(filter);

    let _ = set_global_default(collector);
}

/// A fresh scratch directory for a test that writes files.
///
/// Emptied first if a previous run left it behind.
pub fn scratch_dir(name: &str) -> PathBuf {
    let dir = env::temp_dir().join("render-sequence-tests").join(name);
    if dir.exists() {
        fs::remove_dir_all(&dir).unwrap();
    }
    fs::create_dir_all(&dir).unwrap();
    dir
}
