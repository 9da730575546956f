//! Spatial data structures for Spoor simulations.
//!
//! Two pieces make up the space a scent field lives in:
//!
//! - [`GridDims`]: a rectangular `width x height` lattice with row-major
//!   flat indexing, bounds checks and border tests.
//! - [`Neighbourhood`]: the active [`Connectivity`] scheme, an ordered table
//!   of neighbour offsets with their precomputed Euclidean lengths.
//!
//! Offsets are absorbing at the edges: a neighbour outside the grid simply
//! does not exist.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod connectivity;
pub mod error;
pub mod grid2d;

pub use connectivity::{Connectivity, Neighbourhood, Offset};
pub use error::SpaceError;
pub use grid2d::GridDims;
