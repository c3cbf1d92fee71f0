//! Bounded line sources for the matcher's inputs.
//!
//! A `LineSource` yields one UTF-8 line at a time without its terminator.
//! Failures to open are reported up front as `InputUnavailable`; failures
//! after that are yielded once as `InputReadInterrupted` and end the stream.

pub mod error;

use crate::error::{Result, SimmError};
use crate::io::error::IoError;
use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::{Path, PathBuf};
use tracing::{debug, trace, warn};

/// Path that selects standard input instead of a file.
pub const STDIN_PATH: &str = "-";

/// Whether `path` selects standard input.
pub fn is_stdin(path: &Path) -> bool {
    path.as_os_str() == STDIN_PATH
}

/// Defines the resource limits for line sources.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IoLimits {
    /// Longest accepted line in bytes, terminator excluded.
    pub max_line_bytes: usize,
}

impl Default for IoLimits {
    fn default() -> Self {
        Self {
            max_line_bytes: 1024 * 1024, // 1 MiB
        }
    }
}

/// A lazy, fused sequence of lines read from a file, stdin or any reader.
pub struct LineSource {
    path: PathBuf,
    reader: Box<dyn BufRead>,
    limits: IoLimits,
    line: u64,
    done: bool,
    buf: Vec<u8>,
}

impl LineSource {
    /// Opens `path` for line reading; `-` selects standard input.
    ///
    /// Standard input stays locked for the life of the returned source, so
    /// at most one open source may read from it.
    pub fn open<P: AsRef<Path>>(path: P, limits: IoLimits) -> Result<Self> {
        let path = path.as_ref();
        if is_stdin(path) {
            debug!("Reading lines from stdin");
            let stdin = std::io::stdin().lock();
            return Ok(Self::from_reader("<stdin>", stdin, limits));
        }

        let file = File::open(path).map_err(|source| {
            warn!(path = %path.display(), error = %source, "Cannot open input");
            SimmError::InputUnavailable {
                path: path.to_path_buf(),
                source,
            }
        })?;
        debug!(
            path = %path.display(),
            max_line_bytes = limits.max_line_bytes,
            "Opened input for line reading"
        );
        Ok(Self::from_reader(path, BufReader::new(file), limits))
    }

    /// Wraps an arbitrary buffered reader. `name` is only used in errors and logs.
    pub fn from_reader<P, R>(name: P, reader: R, limits: IoLimits) -> Self
    where
        P: Into<PathBuf>,
        R: BufRead + 'static,
    {
        Self {
            path: name.into(),
            reader: Box::new(reader),
            limits,
            line: 0,
            done: false,
            buf: Vec::new(),
        }
    }

    /// Name of the underlying stream.
    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Number of lines yielded so far.
    pub fn lines_read(&self) -> u64 {
        self.line
    }

    fn read_line(&mut self) -> std::result::Result<Option<String>, IoError> {
        self.buf.clear();
        // Room for the longest accepted line plus a "\r\n" terminator.
        let cap = (self.limits.max_line_bytes as u64).saturating_add(2);
        let n = (&mut self.reader).take(cap).read_until(b'\n', &mut self.buf)?;
        if n == 0 {
            return Ok(None);
        }

        if self.buf.last() == Some(&b'\n') {
            self.buf.pop();
        }
        if self.buf.last() == Some(&b'\r') {
            self.buf.pop();
        }
        if self.buf.len() > self.limits.max_line_bytes {
            return Err(IoError::LineTooLong {
                limit: self.limits.max_line_bytes,
                found: self.buf.len(),
            });
        }

        let line = String::from_utf8(std::mem::take(&mut self.buf))?;
        Ok(Some(line))
    }
}

impl Iterator for LineSource {
    type Item = Result<String>;

    fn next(&mut self) -> Option<Self::Item> {
        if self.done {
            return None;
        }
        match self.read_line() {
            Ok(Some(line)) => {
                self.line += 1;
                trace!(path = %self.path.display(), line = self.line, "Read line");
                Some(Ok(line))
            }
            Ok(None) => {
                self.done = true;
                debug!(path = %self.path.display(), lines = self.line, "End of input");
                None
            }
            Err(e) => {
                self.done = true;
                warn!(
                    path = %self.path.display(),
                    line = self.line + 1,
                    error = %e,
                    "Input read interrupted"
                );
                Some(Err(e.interrupted(&self.path, self.line + 1)))
            }
        }
    }
}

impl std::iter::FusedIterator for LineSource {}
