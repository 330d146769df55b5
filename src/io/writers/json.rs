use crate::io::output::{OutputWriter, WriterOptions};
use crate::scoring::ScoreReport;
use crate::similarity::SimilarityReport;
use crate::surge::SurgeReport;
use serde::Serialize;
use std::io::Write;

/// Pretty JSON. Output is deterministic: no timestamps, stable key order.
pub struct JsonWriter<W: Write> {
    writer: W,
    options: WriterOptions,
}

impl<W: Write> JsonWriter<W> {
    pub fn new(writer: W, options: WriterOptions) -> Self {
        Self { writer, options }
    }

    fn emit<T: Serialize>(&mut self, value: &T) -> anyhow::Result<()> {
        let json = serde_json::to_string_pretty(value)?;
        self.writer.write_all(json.as_bytes())?;
        self.writer.write_all(b"\n")?;
        self.writer.flush()?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for JsonWriter<W> {
    fn write_scores(&mut self, report: &ScoreReport<'_>) -> anyhow::Result<()> {
        match self.options.top {
            Some(_) => {
                let mut shown = report.clone();
                shown.entries.truncate(self.options.visible(&report.entries));
                self.emit(&shown)
            }
            None => self.emit(report),
        }
    }

    fn write_similar(&mut self, report: &SimilarityReport<'_>) -> anyhow::Result<()> {
        match self.options.top {
            Some(_) => {
                let mut shown = report.clone();
                shown.results.truncate(self.options.visible(&report.results));
                self.emit(&shown)
            }
            None => self.emit(report),
        }
    }

    fn write_surge(&mut self, report: &SurgeReport) -> anyhow::Result<()> {
        self.emit(report)
    }
}
