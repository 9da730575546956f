//! Spoor: stochastic scent-field propagation on 2D cost grids.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all Spoor sub-crates. For most users, adding `spoor` as a single
//! dependency is sufficient.
//!
//! Moving targets leave a scent that spreads over a grid of per-cell
//! traversal speeds. Every cell remembers how old the scent reaching it is
//! and which neighbour it came from, so following the directions leads back
//! toward a target along an approximately fastest path.
//!
//! # Quick start
//!
//! ```rust
//! use spoor::prelude::*;
//!
//! let mut grid = ScentGrid::new(GridConfig::new(32, 32).with_seed(42)).unwrap();
//! grid.fill_speed(1.0);
//! grid.paint(Position::new(16, 16), Brush::Square3, 0.0);
//! grid.add_target(Position::new(4, 4), Position::new(28, 28));
//!
//! for _ in 0..10 {
//!     grid.step();
//! }
//! assert_eq!(grid.tick_id(), TickId(10));
//! assert_eq!(grid.targets(), vec![Position::new(14, 14)]);
//!
//! let view = grid.view();
//! assert_eq!(view.intensity_map().len(), 32 * 32);
//! assert_eq!(view.speed(-1, 0), -1.0);
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `spoor-core` | Positions, cell state, ids, the `Tickable` trait |
//! | [`space`] | `spoor-space` | Grid dimensions and connectivity schemes |
//! | [`engine`] | `spoor-engine` | The scent grid, views, scheduler and realtime driver |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, ids and traits (`spoor-core`).
pub use spoor_core as types;

/// Grid dimensions and connectivity schemes (`spoor-space`).
///
/// [`space::GridDims`] handles bounds and flat indexing;
/// [`space::Neighbourhood`] holds the ordered offsets of a
/// [`space::Connectivity`].
pub use spoor_space as space;

/// The scent-field engine (`spoor-engine`).
///
/// [`engine::ScentGrid`] for manual stepping, [`engine::TickScheduler`] for
/// wall-clock pacing and [`engine::RealtimeDriver`] for background ticking.
pub use spoor_engine as engine;

/// Common imports for typical Spoor usage.
///
/// ```rust
/// use spoor::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use spoor_core::{Cell, CellState, ObserverId, Position, TargetId, TickId, Tickable};

    // Space
    pub use spoor_space::{Connectivity, GridDims, Neighbourhood};

    // Configuration and errors
    pub use spoor_engine::{ConfigError, DriverConfig, DriverError, GridConfig, SimParams};

    // Engine
    pub use spoor_engine::{
        quantized_speed, Brush, FieldSnapshot, GridView, RealtimeDriver, ScentGrid, StepMetrics,
        TickScheduler,
    };
}
