use crate::io::writers::{JsonWriter, MarkdownWriter, TerminalWriter};
use crate::scoring::ScoreReport;
use crate::similarity::SimilarityReport;
use crate::surge::SurgeReport;
use clap::ValueEnum;
use std::io::Write;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, ValueEnum)]
pub enum OutputFormat {
    Json,
    Markdown,
    #[default]
    Terminal,
}

/// Presentation knobs shared by all writers.
#[derive(Debug, Clone, Copy, Default)]
pub struct WriterOptions {
    /// Limit displayed rows; the computation itself is never truncated
    pub top: Option<usize>,
    /// 0 = summary table, 1+ = per-dimension breakdown
    pub verbosity: u8,
}

impl WriterOptions {
    pub fn visible<T>(&self, rows: &[T]) -> usize {
        self.top.map_or(rows.len(), |top| top.min(rows.len()))
    }
}

pub trait OutputWriter {
    fn write_scores(&mut self, report: &ScoreReport<'_>) -> anyhow::Result<()>;

    fn write_similar(&mut self, report: &SimilarityReport<'_>) -> anyhow::Result<()>;

    fn write_surge(&mut self, report: &SurgeReport) -> anyhow::Result<()>;
}

pub fn create_writer<'w>(
    format: OutputFormat,
    options: WriterOptions,
    out: Box<dyn Write + 'w>,
) -> Box<dyn OutputWriter + 'w> {
    match format {
        OutputFormat::Json => Box::new(JsonWriter::new(out, options)),
        OutputFormat::Markdown => Box::new(MarkdownWriter::new(out, options)),
        OutputFormat::Terminal => Box::new(TerminalWriter::new(out, options)),
    }
}
