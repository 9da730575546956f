//! Core types and traits for the Spoor scent-field simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the vocabulary shared by the spatial layer and the engine: grid
//! positions, the per-cell propagation state, strongly typed ids, and
//! the [`Tickable`] trait that tick drivers are written against.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cell;
pub mod id;
pub mod position;
pub mod traits;

pub use cell::{Cell, CellState};
pub use id::{ObserverId, TargetId, TickId};
pub use position::Position;
pub use traits::Tickable;
