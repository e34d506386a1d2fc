use std::io;
use std::path::PathBuf;

use thiserror::Error;

/// Failures surfaced by the writers, the probe and the analysis stages.
///
/// Every file-related variant carries the offending path so the operator can
/// tell which output was lost.
#[derive(Debug, Error)]
pub enum ToneError {
    #[error("couldn't open file {} for writing", .path.display())]
    Open {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't write to file {}", .path.display())]
    Write {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("couldn't read back WAV file {}", .path.display())]
    Probe {
        path: PathBuf,
        #[source]
        source: hound::Error,
    },

    #[error("couldn't save image {}", .path.display())]
    Image {
        path: PathBuf,
        #[source]
        source: image::ImageError,
    },

    #[error("FFT size must be at least 2, got {0}")]
    InvalidFftSize(usize),
}

impl ToneError {
    /// Path of the file the error refers to, if any.
    pub fn path(&self) -> Option<&std::path::Path> {
        match self {
            ToneError::Open { path, .. }
            | ToneError::Write { path, .. }
            | ToneError::Probe { path, .. }
            | ToneError::Image { path, .. } => Some(path.as_path()),
            ToneError::InvalidFftSize(_) => None,
        }
    }
}

pub type Result<T> = std::result::Result<T, ToneError>;
