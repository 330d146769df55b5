//! Observability: log setup, crash reports and context tracking.
//!
//! Install the panic hook and subscriber at startup:
//!
//! ```ignore
//! use lobbymap::observability::{init_tracing, install_panic_hook};
//!
//! fn main() {
//!     install_panic_hook();
//!     init_tracing(0);
//! }
//! ```
//!
//! Track context while processing, so a crash report can say where it
//! happened:
//!
//! ```ignore
//! use lobbymap::observability::{set_current_dataset, set_phase, PipelinePhase};
//!
//! let _phase = set_phase(PipelinePhase::Scoring);
//! let _dataset = set_current_dataset("clients");
//! ```

pub mod context;
pub mod panic_hook;
pub mod tracing;

pub use context::{
    get_current_context, reset_context, set_current_dataset, set_current_entity, set_phase,
    ContextGuard, PipelinePhase, RunContext,
};
pub use panic_hook::install_panic_hook;
pub use self::tracing::{default_level, init_tracing, LOG_ENV};
