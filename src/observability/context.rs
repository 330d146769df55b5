//! Thread-local context tracking for crash reports.
//!
//! Records which pipeline phase, dataset and entity the current thread is
//! working on. Guards restore the previous context on drop, so contexts nest.
//! Each rayon worker has its own context.

use std::cell::RefCell;
use std::fmt;

thread_local! {
    static CURRENT_CONTEXT: RefCell<RunContext> = const { RefCell::new(RunContext::new()) };
}

/// What lobbymap was doing when something went wrong.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RunContext {
    pub phase: Option<PipelinePhase>,
    /// Dataset key or file being processed
    pub dataset: Option<String>,
    /// Entity id currently in focus
    pub entity: Option<String>,
}

impl RunContext {
    #[must_use]
    pub const fn new() -> Self {
        Self {
            phase: None,
            dataset: None,
            entity: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PipelinePhase {
    ConfigLoading,
    DatasetLoading,
    Scoring,
    Similarity,
    SurgeClassification,
    OutputGeneration,
}

impl fmt::Display for PipelinePhase {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::ConfigLoading => write!(f, "config_loading"),
            Self::DatasetLoading => write!(f, "dataset_loading"),
            Self::Scoring => write!(f, "scoring"),
            Self::Similarity => write!(f, "similarity"),
            Self::SurgeClassification => write!(f, "surge_classification"),
            Self::OutputGeneration => write!(f, "output_generation"),
        }
    }
}

/// Restores the previous context on drop.
pub struct ContextGuard {
    previous: RunContext,
}

impl Drop for ContextGuard {
    fn drop(&mut self) {
        CURRENT_CONTEXT.with(|ctx| {
            *ctx.borrow_mut() = self.previous.clone();
        });
    }
}

fn update(apply: impl FnOnce(&mut RunContext)) -> ContextGuard {
    CURRENT_CONTEXT.with(|ctx| {
        let previous = ctx.borrow().clone();
        apply(&mut *ctx.borrow_mut());
        ContextGuard { previous }
    })
}

/// Set the current phase until the guard drops.
#[must_use]
pub fn set_phase(phase: PipelinePhase) -> ContextGuard {
    update(|ctx| ctx.phase = Some(phase))
}

#[must_use]
pub fn set_current_dataset(dataset: impl Into<String>) -> ContextGuard {
    let dataset = dataset.into();
    update(|ctx| ctx.dataset = Some(dataset))
}

#[must_use]
pub fn set_current_entity(id: impl Into<String>) -> ContextGuard {
    let id = id.into();
    update(|ctx| ctx.entity = Some(id))
}

/// Snapshot of this thread's context, read by the panic hook.
#[must_use]
pub fn get_current_context() -> RunContext {
    CURRENT_CONTEXT.with(|ctx| ctx.borrow().clone())
}

pub fn reset_context() {
    CURRENT_CONTEXT.with(|ctx| {
        *ctx.borrow_mut() = RunContext::new();
    });
}
