use super::{emit, load_entities, load_methodology};
use crate::cli::ScoreArgs;
use crate::observability::{set_phase, PipelinePhase};
use crate::scoring::ScoreReport;
use anyhow::Result;
use std::path::Path;

pub fn handle_score(config: Option<&Path>, args: ScoreArgs, verbosity: u8) -> Result<()> {
    let methodology = load_methodology(config)?;

    let scheme = match &args.scheme {
        Some(name) => methodology.scheme(name)?,
        None => methodology.scheme_for(args.kind)?,
    };
    let scheme = match args.cohort {
        Some(size) => scheme.clone().with_cohort_size(Some(size))?,
        None => scheme.clone(),
    };

    let entities = load_entities(&args.data, scheme.entity_kind())?;
    let engine = methodology.scoring_engine(&scheme);

    let report = {
        let _phase = set_phase(PipelinePhase::Scoring);
        ScoreReport::build(&engine, methodology.version(), &entities)
    };
    tracing::info!(
        scheme = %report.scheme,
        population = report.population,
        cohort = report.cohort_size,
        "scoring complete"
    );

    emit(&args.output, verbosity, |writer| writer.write_scores(&report))
}
