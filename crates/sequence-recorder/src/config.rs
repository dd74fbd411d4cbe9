use std::{
    fs, io,
    path::{Path, PathBuf},
};

use render_capture::OutputFormat;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// User settings for sequence recording.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct RecorderConfig {
    /// Directory the frame files are written into.
    pub output_dir: PathBuf,

    /// File name stem shared by every frame.
    pub base_name: String,

    /// On-disk image format.
    pub format: OutputFormat,

    /// Zero-padded digits in the frame number.
    pub frame_digits: usize,
}

impl RecorderConfig {
    /// Load the configuration from `path`.
    ///
    /// Returns `Ok(None)` when no file exists yet.
    pub fn try_load(path: &Path) -> Result<Option<Self>, ConfigError> {
        let contents = match fs::read_to_string(path) {
            Ok(contents) => contents,
            Err(error) if error.kind() == io::ErrorKind::NotFound => return Ok(None),
            Err(error) => return Err(ConfigError::Io(error)),
        };

        let config = toml::from_str(&contents)?;
        Ok(Some(config))
    }

    /// Write the configuration to `path`.
    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let toml_string = toml::to_string_pretty(self)?;
        fs::write(path, toml_string.as_bytes())?;
        Ok(())
    }
}

impl Default for RecorderConfig {
    fn default() -> Self {
        Self {
            output_dir: PathBuf::from("captures"),
            base_name: String::from("frame"),
            format: OutputFormat::Png,
            frame_digits: 4,
        }
    }
}

/// Configuration error variants.
#[derive(Debug, Error)]
#[non_exhaustive]
pub enum ConfigError {
    /// The file could not be read or written.
    #[error("Failed to access the recorder configuration:\n{0}")]
    Io(#[from] io::Error),

    /// The file is not valid configuration TOML.
    #[error("Failed to parse the recorder configuration:\n{0}")]
    Parse(#[from] toml::de::Error),

    /// The configuration could not be serialized.
    #[error("Failed to serialize the recorder configuration:\n{0}")]
    Serialize(#[from] toml::ser::Error),
}
