use crate::core::Metric;
use crate::formatting::{format_dollars, format_percent, surge_color, tier_color};
use crate::io::output::{OutputWriter, WriterOptions};
use crate::scoring::{ScoreReport, ScoredEntity};
use crate::similarity::{MatchFactor, SimilarityReport};
use crate::surge::{SurgeCategory, SurgeRecord, SurgeReport};
use colored::*;
use comfy_table::presets::UTF8_FULL_CONDENSED;
use comfy_table::{Cell, CellAlignment, ContentArrangement, Table};
use std::io::Write;

/// Human-readable tables. Colors follow the global `colored` override.
pub struct TerminalWriter<W: Write> {
    writer: W,
    options: WriterOptions,
}

impl<W: Write> TerminalWriter<W> {
    pub fn new(writer: W, options: WriterOptions) -> Self {
        Self { writer, options }
    }

    fn heading(&mut self, title: &str) -> anyhow::Result<()> {
        writeln!(self.writer)?;
        writeln!(self.writer, "{}", title.bold().cyan())?;
        writeln!(self.writer, "{}", "─".repeat(title.chars().count()).cyan())?;
        Ok(())
    }

    fn write_breakdown(&mut self, entry: &ScoredEntity<'_>) -> anyhow::Result<()> {
        let mut table = new_table(&["Dimension", "Raw", "Cohort max", "Normalized", "Weight", "Points"]);
        for (metric, dimension) in &entry.dimensions {
            table.add_row(vec![
                Cell::new(metric.label()),
                numeric(format_raw(*metric, dimension.raw)),
                numeric(format_raw(*metric, dimension.cohort_max)),
                numeric(dimension.normalized.to_string()),
                numeric(format!("{:.2}", dimension.weight)),
                numeric(format!("{:.1}", dimension.contribution)),
            ]);
        }
        writeln!(
            self.writer,
            "\n{}. {} ({})",
            entry.rank,
            entry.entity.name.bold(),
            entry.composite
        )?;
        writeln!(self.writer, "{table}")?;
        Ok(())
    }

    fn write_bucket(&mut self, category: SurgeCategory, records: &[SurgeRecord]) -> anyhow::Result<()> {
        let label = format!("{} ({})", category.label().to_uppercase(), records.len());
        writeln!(self.writer, "\n{}", label.color(surge_color(category)).bold())?;
        if records.is_empty() {
            return Ok(());
        }

        let mut table = new_table(&["Code", "Name", "Prior", "Current", "Change", "Count change"]);
        for record in &records[..self.options.visible(records)] {
            table.add_row(vec![
                Cell::new(&record.code),
                Cell::new(record.name.as_deref().unwrap_or("")),
                numeric(format_dollars(record.prior_value)),
                numeric(format_dollars(record.current_value)),
                numeric(format_percent(record.percent_change)),
                numeric(format_percent(record.count_percent_change)),
            ]);
        }
        writeln!(self.writer, "{table}")?;
        Ok(())
    }
}

impl<W: Write> OutputWriter for TerminalWriter<W> {
    fn write_scores(&mut self, report: &ScoreReport<'_>) -> anyhow::Result<()> {
        self.heading(&format!(
            "INFLUENCE SCORES · {} · methodology {}",
            report.scheme, report.methodology_version
        ))?;
        writeln!(
            self.writer,
            "Cohort: {} of {} {} records",
            report.cohort_size, report.population, report.entity_kind
        )?;

        let counts: Vec<String> = report
            .tier_counts()
            .into_iter()
            .map(|(tier, count)| format!("{} {}", tier.label().color(tier_color(tier)), count))
            .collect();
        writeln!(self.writer, "Tiers: {}", counts.join("  "))?;

        let shown = self.options.visible(&report.entries);
        let mut table = new_table(&["#", "Name", "Score", "Tier", "Spend"]);
        for entry in &report.entries[..shown] {
            table.add_row(vec![
                numeric(entry.rank.to_string()),
                Cell::new(&entry.entity.name),
                numeric(entry.composite.to_string()),
                Cell::new(entry.tier.short_label()),
                numeric(format_dollars(entry.entity.metric(Metric::TotalSpend))),
            ]);
        }
        writeln!(self.writer, "{table}")?;

        if self.options.verbosity > 0 {
            for entry in &report.entries[..shown] {
                self.write_breakdown(entry)?;
            }
        }

        writeln!(self.writer, "\n{}", report.note.dimmed())?;
        self.writer.flush()?;
        Ok(())
    }

    fn write_similar(&mut self, report: &SimilarityReport<'_>) -> anyhow::Result<()> {
        self.heading(&format!(
            "SIMILAR {} RECORDS · methodology {}",
            report.entity_kind.to_string().to_uppercase(),
            report.methodology_version
        ))?;

        let shown = self.options.visible(&report.results);
        for related in &report.results[..shown] {
            writeln!(
                self.writer,
                "\n{} ({})",
                related.target.name.bold(),
                related.target.id
            )?;
            if related.similar.is_empty() {
                writeln!(self.writer, "  {}", "no entity shares a state or issue".dimmed())?;
                continue;
            }

            let mut table = new_table(&["Name", "Score", "Why"]);
            for candidate in &related.similar {
                let why: Vec<String> = candidate.factors.iter().map(explain).collect();
                table.add_row(vec![
                    Cell::new(&candidate.entity.name),
                    numeric(format!("{:.2}", candidate.score)),
                    Cell::new(why.join("; ")),
                ]);
            }
            writeln!(self.writer, "{table}")?;
        }
        self.writer.flush()?;
        Ok(())
    }

    fn write_surge(&mut self, report: &SurgeReport) -> anyhow::Result<()> {
        let title = match &report.context {
            Some(context) => format!("SURGE · {}", context),
            None => "SURGE".to_string(),
        };
        self.heading(&title)?;
        writeln!(
            self.writer,
            "surging ≥ {}%  growing ≥ {}%  stable ≥ {}%",
            report.thresholds.surging(),
            report.thresholds.growing(),
            report.thresholds.stable_floor()
        )?;

        for category in SurgeCategory::ALL {
            self.write_bucket(category, report.bucket(category))?;
        }

        if !report.excluded.is_empty() {
            writeln!(
                self.writer,
                "\n{} {} record(s) excluded",
                "⚠".yellow(),
                report.excluded.len()
            )?;
            if self.options.verbosity > 0 {
                for excluded in &report.excluded {
                    writeln!(self.writer, "  {} ({:?})", excluded.code, excluded.reason)?;
                }
            }
        }
        self.writer.flush()?;
        Ok(())
    }
}

fn new_table(header: &[&str]) -> Table {
    let mut table = Table::new();
    table
        .load_preset(UTF8_FULL_CONDENSED)
        .set_content_arrangement(ContentArrangement::Dynamic)
        .set_header(header.to_vec());
    table
}

fn numeric(text: impl ToString) -> Cell {
    Cell::new(text.to_string()).set_alignment(CellAlignment::Right)
}

fn format_raw(metric: Metric, value: f64) -> String {
    match metric {
        Metric::TotalSpend => format_dollars(value),
        _ => format!("{}", value),
    }
}

fn explain(factor: &MatchFactor) -> String {
    match factor {
        MatchFactor::SameGeography { state, weight } => format!("same state {} (+{})", state, weight),
        MatchFactor::SharedIssues { codes, weight } => {
            format!("{} (+{:.2})", codes.join(", "), weight)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::{EntityKind, ScorableEntity};
    use crate::scoring::{ScoringEngine, ScoringScheme, TierLadder};

    #[test]
    fn verbose_scores_include_breakdown() {
        colored::control::set_override(false);
        let entities = vec![
            ScorableEntity::new("acme", "Acme Corp", EntityKind::Client)
                .with_metric(Metric::TotalSpend, 2_000_000.0)
                .with_metric(Metric::FilingCount, 40.0),
            ScorableEntity::new("zeta", "Zeta LLC", EntityKind::Client)
                .with_metric(Metric::TotalSpend, 500_000.0),
        ];
        let engine = ScoringEngine::new(ScoringScheme::client_influence(), TierLadder::default());
        let report = ScoreReport::build(&engine, "2024.1", &entities);

        let mut buffer = Vec::new();
        TerminalWriter::new(
            &mut buffer,
            WriterOptions {
                top: None,
                verbosity: 1,
            },
        )
        .write_scores(&report)
        .unwrap();
        let text = String::from_utf8(buffer).unwrap();

        assert!(text.contains("Acme Corp"));
        assert!(text.contains("$2,000,000"));
        assert!(text.contains("Cohort max"));
        assert!(text.contains(report.note));
    }
}
