//! Record sinks: serialization of ranked matches.

use crate::error::Result;
use crate::matching::SimilarityPair;
use crate::rank::format_score;
use serde::{Deserialize, Serialize};
use std::io::Write;

/// Column names written when a CSV header is requested.
pub const CSV_HEADER: [&str; 3] = ["source", "target", "score"];

/// Serialized layout of the output stream.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, clap::ValueEnum)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Csv,
    Jsonl,
}

/// Consumer of the ordered record stream.
pub trait RecordSink {
    fn write(&mut self, pair: &SimilarityPair) -> Result<()>;

    /// Flush anything buffered. Called once, also after a failed run.
    fn finish(&mut self) -> Result<()>;
}

impl<S: RecordSink + ?Sized> RecordSink for Box<S> {
    fn write(&mut self, pair: &SimilarityPair) -> Result<()> {
        (**self).write(pair)
    }

    fn finish(&mut self) -> Result<()> {
        (**self).finish()
    }
}

/// `source,target,score` rows; fields are quoted only when needed.
pub struct CsvSink<W: Write> {
    writer: csv::Writer<W>,
}

impl<W: Write> CsvSink<W> {
    pub fn new(out: W, header: bool) -> Result<Self> {
        let mut writer = csv::WriterBuilder::new()
            .has_headers(false)
            .quote_style(csv::QuoteStyle::Necessary)
            .from_writer(out);
        if header {
            writer.write_record(CSV_HEADER)?;
        }
        Ok(Self { writer })
    }

    /// Flush and hand back the underlying writer.
    pub fn into_inner(self) -> Result<W> {
        self.writer
            .into_inner()
            .map_err(|e| crate::error::SimmError::Output(e.into_error()))
    }
}

impl<W: Write> RecordSink for CsvSink<W> {
    fn write(&mut self, pair: &SimilarityPair) -> Result<()> {
        let score = format_score(pair.score());
        self.writer
            .write_record([pair.source(), pair.target(), score.as_str()])?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.writer.flush()?;
        Ok(())
    }
}

/// One JSON object per line.
pub struct JsonLinesSink<W: Write> {
    out: W,
}

impl<W: Write> JsonLinesSink<W> {
    pub fn new(out: W) -> Self {
        Self { out }
    }

    pub fn into_inner(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out)
    }
}

impl<W: Write> RecordSink for JsonLinesSink<W> {
    fn write(&mut self, pair: &SimilarityPair) -> Result<()> {
        serde_json::to_writer(&mut self.out, pair)?;
        self.out.write_all(b"\n")?;
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.out.flush()?;
        Ok(())
    }
}

/// Build the sink for `format` over `out`.
pub fn make_sink<W: Write + 'static>(
    format: OutputFormat,
    out: W,
    header: bool,
) -> Result<Box<dyn RecordSink>> {
    Ok(match format {
        OutputFormat::Csv => Box::new(CsvSink::new(out, header)?),
        OutputFormat::Jsonl => Box::new(JsonLinesSink::new(out)),
    })
}

/// Collects pairs in memory.
#[derive(Debug, Default)]
pub struct VecSink {
    pub pairs: Vec<SimilarityPair>,
    pub finished: bool,
}

impl RecordSink for VecSink {
    fn write(&mut self, pair: &SimilarityPair) -> Result<()> {
        self.pairs.push(pair.clone());
        Ok(())
    }

    fn finish(&mut self) -> Result<()> {
        self.finished = true;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn csv_of(pairs: &[SimilarityPair], header: bool) -> String {
        let mut sink = CsvSink::new(Vec::new(), header).unwrap();
        for p in pairs {
            sink.write(p).unwrap();
        }
        sink.finish().unwrap();
        String::from_utf8(sink.into_inner().unwrap()).unwrap()
    }

    #[test]
    fn csv_plain_rows() {
        let out = csv_of(&[SimilarityPair::new("martha", "marhta", 0.5)], false);
        assert_eq!(out, "martha,marhta,0.5\n");
    }

    #[test]
    fn csv_header_and_exact_score() {
        let out = csv_of(&[SimilarityPair::new("a", "a", 1.0)], true);
        assert_eq!(out, "source,target,score\na,a,1\n");
    }

    #[test]
    fn csv_escapes_delimiters_and_quotes() {
        let out = csv_of(&[SimilarityPair::new("a,a", "say \"hi\"", 0.25)], false);
        assert_eq!(out, "\"a,a\",\"say \"\"hi\"\"\",0.25\n");
    }

    #[test]
    fn csv_escapes_embedded_newline() {
        let out = csv_of(&[SimilarityPair::new("x\ny", "z", 0.75)], false);
        assert_eq!(out, "\"x\ny\",z,0.75\n");
    }

    #[test]
    fn jsonl_rows() {
        let mut sink = JsonLinesSink::new(Vec::new());
        sink.write(&SimilarityPair::new("a", "b", 0.5)).unwrap();
        sink.write(&SimilarityPair::new("a", "c", 0.25)).unwrap();
        let out = String::from_utf8(sink.into_inner().unwrap()).unwrap();
        let lines: Vec<serde_json::Value> = out
            .lines()
            .map(|l| serde_json::from_str(l).unwrap())
            .collect();
        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0]["source"], "a");
        assert_eq!(lines[0]["target"], "b");
        assert_eq!(lines[1]["score"], 0.25);
    }

    #[test]
    fn vec_sink_collects() {
        let mut sink = VecSink::default();
        sink.write(&SimilarityPair::new("a", "b", 0.1)).unwrap();
        sink.finish().unwrap();
        assert_eq!(sink.pairs.len(), 1);
        assert!(sink.finished);
    }
}
