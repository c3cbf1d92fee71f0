//! Common test utilities and helpers.
#![allow(dead_code)]

pub mod test_utils;

use std::path::{Path, PathBuf};

/// Test helper for checking if sample files exist
pub fn sample_file_exists<P: AsRef<Path>>(relative_path: P) -> bool {
    sample_file_path(relative_path).exists()
}

/// Get the full path to a sample file
pub fn sample_file_path<P: AsRef<Path>>(relative_path: P) -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR"))
        .join("samples")
        .join(relative_path)
}

/// Common test data and constants
pub mod test_data {
    /// Source names for the sample run
    pub const SAMPLE_SOURCE: &str = "names/test_strings.txt";

    /// Reference names, with one duplicate line
    pub const SAMPLE_TARGET: &str = "names/ref_strings.txt";
}
