//! Scent-field propagation engine for Spoor.
//!
//! [`ScentGrid`] owns a cost field, the per-cell scent state and a set of
//! moving targets. One [`step()`](ScentGrid::step) moves every target one
//! cell toward its attractor, re-seeds the field at the target positions and
//! runs a single synchronous, randomized propagation sweep over the whole
//! grid. The result is an approximate, organic-looking wavefront, not an
//! exact shortest-path solution.
//!
//! Progress is driven either manually, by the [`TickScheduler`] (elapsed
//! time to whole ticks, with a catch-up cap), or by the [`RealtimeDriver`]
//! which runs the scheduler on a background thread and publishes an
//! immutable [`FieldSnapshot`] after every poll.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod brush;
pub mod config;
pub(crate) mod field;
pub mod grid;
pub mod metrics;
pub mod motion;
pub mod realtime;
pub mod schedule;
pub mod snapshot;
pub(crate) mod sweep;
pub mod views;

pub use brush::{quantized_speed, Brush};
pub use config::{ConfigError, DriverConfig, GridConfig, SimParams, MIN_PERIOD};
pub use grid::ScentGrid;
pub use metrics::StepMetrics;
pub use motion::TargetPair;
pub use realtime::{DriverError, RealtimeDriver, SnapshotSlot};
pub use schedule::TickScheduler;
pub use snapshot::FieldSnapshot;
pub use views::{CellProbe, GridView, Shade};
