use crate::core::Metric;
use crate::formatting::{format_dollars, format_percent};
use crate::io::output::{OutputWriter, WriterOptions};
use crate::scoring::{ScoreReport, ScoredEntity};
use crate::similarity::{MatchFactor, SimilarityCandidate, SimilarityReport};
use crate::surge::{SurgeCategory, SurgeRecord, SurgeReport};
use chrono::Utc;
use std::io::Write;

pub struct MarkdownWriter<W: Write> {
    writer: W,
    options: WriterOptions,
}

impl<W: Write> MarkdownWriter<W> {
    pub fn new(writer: W, options: WriterOptions) -> Self {
        Self { writer, options }
    }

    fn write_header(&mut self, title: &str, methodology_version: Option<&str>) -> anyhow::Result<()> {
        writeln!(self.writer, "# {}", title)?;
        writeln!(self.writer)?;
        writeln!(
            self.writer,
            "Generated: {}",
            Utc::now().format("%Y-%m-%d %H:%M:%S UTC")
        )?;
        if let Some(version) = methodology_version {
            writeln!(self.writer, "Methodology: {}", version)?;
        }
        writeln!(self.writer)?;
        Ok(())
    }

    fn write_score_row(&mut self, entry: &ScoredEntity<'_>) -> anyhow::Result<()> {
        writeln!(
            self.writer,
            "| {} | {} | {} | {} | {} |",
            entry.rank,
            escape(&entry.entity.name),
            entry.composite,
            entry.tier.label(),
            format_dollars(entry.entity.metric(Metric::TotalSpend))
        )?;
        Ok(())
    }

    fn write_breakdown(&mut self, report: &ScoreReport<'_>, shown: usize) -> anyhow::Result<()> {
        writeln!(self.writer, "## Score Breakdown")?;
        writeln!(self.writer)?;
        for entry in &report.entries[..shown] {
            writeln!(self.writer, "### {}. {}", entry.rank, escape(&entry.entity.name))?;
            writeln!(self.writer)?;
            writeln!(self.writer, "| Dimension | Raw | Normalized | Weight | Contribution |")?;
            writeln!(self.writer, "|-----------|-----|------------|--------|--------------|")?;
            for (metric, dimension) in &entry.dimensions {
                writeln!(
                    self.writer,
                    "| {} | {} | {} | {:.2} | {:.1} |",
                    metric.label(),
                    dimension.raw,
                    dimension.normalized,
                    dimension.weight,
                    dimension.contribution
                )?;
            }
            writeln!(self.writer)?;
        }
        Ok(())
    }

    fn write_candidate_row(&mut self, candidate: &SimilarityCandidate<'_>) -> anyhow::Result<()> {
        let reasons: Vec<String> = candidate.factors.iter().map(describe_factor).collect();
        writeln!(
            self.writer,
            "| {} | {:.2} | {} |",
            escape(&candidate.entity.name),
            candidate.score,
            reasons.join("; ")
        )?;
        Ok(())
    }

    fn write_surge_bucket(
        &mut self,
        category: SurgeCategory,
        records: &[SurgeRecord],
    ) -> anyhow::Result<()> {
        let shown = self.options.visible(records);
        writeln!(self.writer, "## {} ({})", title_case(category.label()), records.len())?;
        writeln!(self.writer)?;
        if records.is_empty() {
            writeln!(self.writer, "_None._")?;
            writeln!(self.writer)?;
            return Ok(());
        }
        writeln!(self.writer, "| Code | Name | Prior | Current | Change | Count change |")?;
        writeln!(self.writer, "|------|------|-------|---------|--------|--------------|")?;
        for record in &records[..shown] {
            writeln!(
                self.writer,
                "| {} | {} | {} | {} | {} | {} |",
                record.code,
                escape(record.name.as_deref().unwrap_or("")),
                format_dollars(record.prior_value),
                format_dollars(record.current_value),
                format_percent(record.percent_change),
                format_percent(record.count_percent_change)
            )?;
        }
        writeln!(self.writer)?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for MarkdownWriter<W> {
    fn write_scores(&mut self, report: &ScoreReport<'_>) -> anyhow::Result<()> {
        self.write_header(
            &format!("Influence Scores: {}", report.scheme),
            Some(&report.methodology_version),
        )?;
        writeln!(
            self.writer,
            "Cohort: {} of {} {} records.",
            report.cohort_size, report.population, report.entity_kind
        )?;
        writeln!(self.writer)?;
        writeln!(self.writer, "> {}", report.note)?;
        writeln!(self.writer)?;

        writeln!(self.writer, "| Rank | Name | Score | Tier | Spend |")?;
        writeln!(self.writer, "|------|------|-------|------|-------|")?;
        let shown = self.options.visible(&report.entries);
        for entry in &report.entries[..shown] {
            self.write_score_row(entry)?;
        }
        writeln!(self.writer)?;

        if self.options.verbosity > 0 {
            self.write_breakdown(report, shown)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_similar(&mut self, report: &SimilarityReport<'_>) -> anyhow::Result<()> {
        self.write_header("Similar Entities", Some(&report.methodology_version))?;
        let shown = self.options.visible(&report.results);
        for related in &report.results[..shown] {
            writeln!(self.writer, "## {}", escape(&related.target.name))?;
            writeln!(self.writer)?;
            if related.similar.is_empty() {
                writeln!(self.writer, "_No similar {} records._", report.entity_kind)?;
                writeln!(self.writer)?;
                continue;
            }
            writeln!(self.writer, "| Name | Score | Shared |")?;
            writeln!(self.writer, "|------|-------|--------|")?;
            for candidate in &related.similar {
                self.write_candidate_row(candidate)?;
            }
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_surge(&mut self, report: &SurgeReport) -> anyhow::Result<()> {
        let title = match &report.context {
            Some(context) => format!("Surge Report: {}", context),
            None => "Surge Report".to_string(),
        };
        self.write_header(&title, None)?;
        writeln!(
            self.writer,
            "Thresholds: surging >= {}%, growing >= {}%, stable >= {}%",
            report.thresholds.surging(),
            report.thresholds.growing(),
            report.thresholds.stable_floor()
        )?;
        writeln!(self.writer)?;

        for category in SurgeCategory::ALL {
            self.write_surge_bucket(category, report.bucket(category))?;
        }

        if !report.excluded.is_empty() {
            let codes: Vec<&str> = report.excluded.iter().map(|e| e.code.as_str()).collect();
            writeln!(self.writer, "Excluded (incomplete or no activity): {}", codes.join(", "))?;
            writeln!(self.writer)?;
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn describe_factor(factor: &MatchFactor) -> String {
    match factor {
        MatchFactor::SameGeography { state, .. } => format!("same state ({})", state),
        MatchFactor::SharedIssues { codes, .. } => format!("issues: {}", codes.join(", ")),
    }
}

fn escape(text: &str) -> String {
    text.replace('|', "\\|")
}

fn title_case(label: &str) -> String {
    let mut chars = label.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::surge::{classify, PeriodPair, SurgeThresholds};

    #[test]
    fn surge_report_lists_every_bucket() {
        let report = classify(
            &[
                PeriodPair::new("TAX", 100.0, 300.0).with_name("Taxation"),
                PeriodPair::new("ENV", 0.0, 40.0),
            ],
            &SurgeThresholds::issue_momentum(),
        )
        .with_context("issue_momentum");

        let mut buffer = Vec::new();
        MarkdownWriter::new(&mut buffer, WriterOptions::default())
            .write_surge(&report)
            .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("# Surge Report: issue_momentum"));
        assert!(text.contains("## Surging (1)"));
        assert!(text.contains("| TAX | Taxation | $100 | $300 | +200.0% | n/a |"));
        assert!(text.contains("## New-entrant (1)"));
        assert!(text.contains("## Declining (0)"));
    }

    #[test]
    fn pipes_in_names_are_escaped() {
        assert_eq!(escape("A | B"), "A \\| B");
    }
}
