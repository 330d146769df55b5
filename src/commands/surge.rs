use super::{emit, load_methodology};
use crate::cli::SurgeArgs;
use crate::data::{load_period_pairs_file, DatasetSource, JsonDirectorySource};
use crate::observability::{set_current_dataset, set_phase, PipelinePhase};
use crate::surge::{classify, PeriodPair};
use anyhow::Result;
use std::path::Path;

pub fn handle_surge(config: Option<&Path>, args: SurgeArgs, verbosity: u8) -> Result<()> {
    let methodology = load_methodology(config)?;
    let thresholds = methodology.surge_thresholds(&args.context)?;

    let dataset = args.dataset.as_deref().unwrap_or(&args.context);
    let pairs = load_pairs(&args.input, dataset)?;

    let report = {
        let _phase = set_phase(PipelinePhase::SurgeClassification);
        classify(&pairs, &thresholds).with_context(args.context.clone())
    };
    if !report.excluded.is_empty() {
        tracing::info!(
            excluded = report.excluded.len(),
            "records excluded from surge classification"
        );
    }

    emit(&args.output, verbosity, |writer| writer.write_surge(&report))
}

fn load_pairs(input: &Path, dataset: &str) -> Result<Vec<PeriodPair>> {
    let _phase = set_phase(PipelinePhase::DatasetLoading);
    if input.is_dir() {
        let _dataset = set_current_dataset(format!("{}/{}", input.display(), dataset));
        Ok(JsonDirectorySource::new(input)?.period_pairs(dataset)?)
    } else {
        let _dataset = set_current_dataset(input.display().to_string());
        Ok(load_period_pairs_file(input)?)
    }
}
