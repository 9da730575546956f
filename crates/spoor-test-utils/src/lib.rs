//! Test utilities for Spoor development.
//!
//! - [`Terrain`]: ASCII cost-field fixtures.
//! - [`CountingTicker`]: a [`Tickable`] that only counts its ticks, for
//!   scheduler tests that should not depend on the engine.

#![forbid(unsafe_code)]
#![allow(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]

pub mod terrain;

pub use terrain::Terrain;

use spoor_core::Tickable;

/// Counts ticks at a fixed period.
#[derive(Clone, Debug)]
pub struct CountingTicker {
    period: f64,
    ticks: u64,
}

impl CountingTicker {
    pub fn new(period: f64) -> Self {
        Self { period, ticks: 0 }
    }

    pub fn ticks(&self) -> u64 {
        self.ticks
    }

    pub fn set_period(&mut self, period: f64) {
        self.period = period;
    }
}

impl Tickable for CountingTicker {
    fn period(&self) -> f64 {
        self.period
    }

    fn tick(&mut self) {
        self.ticks += 1;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn counts_ticks() {
        let mut t = CountingTicker::new(0.5);
        t.tick();
        t.tick();
        assert_eq!(t.ticks(), 2);
        assert_eq!(t.period(), 0.5);
    }
}
