//! Core entity model shared by the scoring, similarity and surge components.
//!
//! Everything in here is plain data. Records are built once at the dataset
//! boundary (see [`crate::data`]) and are only ever read by the engines.

pub mod entity;
pub mod metric;

pub use entity::{EntityId, EntityKind, ScorableEntity};
pub use metric::Metric;
