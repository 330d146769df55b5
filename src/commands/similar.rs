use super::{emit, load_entities, load_methodology};
use crate::cli::SimilarArgs;
use crate::core::ScorableEntity;
use crate::errors::Error;
use crate::observability::{set_phase, PipelinePhase};
use crate::similarity::SimilarityReport;
use anyhow::Result;
use std::path::Path;

pub fn handle_similar(config: Option<&Path>, args: SimilarArgs, verbosity: u8) -> Result<()> {
    let methodology = load_methodology(config)?;
    let engine = methodology.similarity();
    let k = args.limit.unwrap_or_else(|| engine.top_k());

    let pool = load_entities(&args.data, args.kind)?;

    let report = {
        let _phase = set_phase(PipelinePhase::Similarity);
        if args.all {
            SimilarityReport::for_pool(engine, methodology.version(), args.kind, &pool, k)
        } else {
            let targets = resolve_targets(&pool, &args.entity)?;
            SimilarityReport::for_targets(engine, methodology.version(), args.kind, &targets, &pool, k)
        }
    };

    emit(&args.output, verbosity, |writer| writer.write_similar(&report))
}

/// Look up each requested id; any unknown id fails the command.
fn resolve_targets<'a>(pool: &'a [ScorableEntity], ids: &[String]) -> Result<Vec<&'a ScorableEntity>> {
    ids.iter()
        .map(|id| {
            pool.iter()
                .find(|entity| entity.id.as_str() == id.trim())
                .ok_or_else(|| anyhow::Error::from(Error::EntityNotFound(id.clone())))
        })
        .collect()
}
