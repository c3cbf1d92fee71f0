//! Shared helpers for building on-disk inputs and running the matcher.

use simmstring::{CsvSink, IoLimits, LineSource, MatchConfig, Matcher, TargetSet};
use std::io::Write;
use std::path::Path;
use tempfile::NamedTempFile;

/// Creates a temporary file with the given content.
pub fn create_temp_file(content: &[u8]) -> NamedTempFile {
    let mut temp_file = NamedTempFile::new().unwrap();
    temp_file.write_all(content).unwrap();
    temp_file
}

/// Creates a temporary file holding `lines`, each terminated by `\n`.
pub fn create_lines_file(lines: &[&str]) -> NamedTempFile {
    let mut content = String::new();
    for line in lines {
        content.push_str(line);
        content.push('\n');
    }
    create_temp_file(content.as_bytes())
}

/// Runs a full source/target match over files and returns the CSV text.
pub fn run_csv<P: AsRef<Path>, Q: AsRef<Path>>(source: P, target: Q, cfg: MatchConfig) -> String {
    let targets =
        TargetSet::try_build(LineSource::open(target, IoLimits::default()).unwrap()).unwrap();
    let sources = LineSource::open(source, IoLimits::default()).unwrap();
    let matcher = Matcher::new(cfg, targets).unwrap();
    let mut sink = CsvSink::new(Vec::new(), false).unwrap();
    matcher.run(sources, &mut sink).unwrap();
    String::from_utf8(sink.into_inner().unwrap()).unwrap()
}
