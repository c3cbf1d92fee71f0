//! Custom error types for the I/O module.

use crate::error::SimmError;
use std::path::Path;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum IoError {
    #[error("line of at least {found} bytes exceeds the maximum allowed length of {limit} bytes")]
    LineTooLong { limit: usize, found: usize },

    #[error("line is not valid UTF-8")]
    InvalidUtf8(#[from] std::string::FromUtf8Error),

    #[error("{0}")]
    StdIo(#[from] std::io::Error),
}

impl IoError {
    /// Attach the stream name and line number this failure occurred at.
    pub fn interrupted(self, path: &Path, line: u64) -> SimmError {
        SimmError::InputReadInterrupted {
            path: path.to_path_buf(),
            line,
            reason: self.to_string(),
        }
    }
}

pub type Result<T> = std::result::Result<T, IoError>;
