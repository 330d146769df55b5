//! CLI command implementations.
//!
//! - **score**: rank a dataset's entities by influence
//! - **similar**: related-entity lists for chosen targets or a whole dataset
//! - **surge**: bucket period-over-period change
//! - **init**: write the default configuration
//! - **validate-config**: report every configuration problem
//!
//! Every computing command loads and validates the configuration first; an
//! invalid methodology stops the run before any dataset is read.

pub mod init;
pub mod score;
pub mod similar;
pub mod surge;
pub mod validate;

pub use init::init_config;
pub use score::handle_score;
pub use similar::handle_similar;
pub use surge::handle_surge;
pub use validate::validate_config_file;

use crate::cli::OutputArgs;
use crate::config::{load_config, validate_config_result, Methodology};
use crate::core::{EntityKind, ScorableEntity};
use crate::data::{DatasetSource, JsonDirectorySource};
use crate::io::{create_writer, open_output, OutputWriter, WriterOptions};
use crate::observability::{set_current_dataset, set_phase, PipelinePhase};
use anyhow::{Context, Result};
use std::path::Path;

/// Load the configuration (explicit or discovered) and validate it.
pub fn load_methodology(config: Option<&Path>) -> Result<Methodology> {
    let _phase = set_phase(PipelinePhase::ConfigLoading);
    let raw = load_config(config)?;
    let methodology = validate_config_result(&raw)?;
    tracing::info!(
        version = methodology.version(),
        schemes = methodology.schemes().len(),
        "methodology loaded"
    );
    Ok(methodology)
}

/// Entities of one kind from a dataset directory.
pub fn load_entities(data: &Path, kind: EntityKind) -> Result<Vec<ScorableEntity>> {
    let _phase = set_phase(PipelinePhase::DatasetLoading);
    let _dataset = set_current_dataset(format!("{}/{}", data.display(), kind.dataset_key()));
    let source = JsonDirectorySource::new(data)?;
    let entities = source
        .entities(kind)
        .with_context(|| format!("Failed to load {} dataset", kind.dataset_key()))?;
    if entities.is_empty() {
        tracing::warn!(%kind, "dataset contains no usable records");
    }
    Ok(entities)
}

/// Open the requested sink and hand a writer to `write`.
pub fn emit(
    args: &OutputArgs,
    verbosity: u8,
    write: impl FnOnce(&mut dyn OutputWriter) -> Result<()>,
) -> Result<()> {
    let _phase = set_phase(PipelinePhase::OutputGeneration);
    if args.output.is_some() {
        colored::control::set_override(false);
    }
    let out = open_output(args.output.as_deref())?;
    let options = WriterOptions {
        top: args.top,
        verbosity,
    };
    let mut writer = create_writer(args.format, options, out);
    write(writer.as_mut())
}
