//! Benchmark profiles for the Spoor scent-field engine.
//!
//! - [`reference_profile`]: 100x100 maze (10K cells) with four targets
//! - [`stress_profile`]: 316x316 maze (~100K cells) with sixteen targets
//! - [`target_pairs`]: deterministic target/attractor placement via seed

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use spoor_core::Position;
use spoor_engine::{GridConfig, ScentGrid};
use spoor_space::Connectivity;

/// Wall probability used by the profiles.
pub const WALL_PROBABILITY: f32 = 0.3;

/// 100x100 random maze, 8-neighbour, four targets.
pub fn reference_profile(seed: u64) -> ScentGrid {
    profile(100, 100, 4, Connectivity::Octile8, seed)
}

/// 316x316 random maze, 8-neighbour, sixteen targets.
pub fn stress_profile(seed: u64) -> ScentGrid {
    profile(316, 316, 16, Connectivity::Octile8, seed)
}

/// A `width x height` random maze with `n` targets.
///
/// Panics on a zero dimension.
pub fn profile(width: u32, height: u32, n: u16, connectivity: Connectivity, seed: u64) -> ScentGrid {
    let config = GridConfig::new(width, height)
        .with_connectivity(connectivity)
        .with_seed(seed);
    let mut grid = ScentGrid::new(config).unwrap_or_else(|e| panic!("bad profile: {e}"));
    for (target, attractor) in target_pairs(width, height, n, seed) {
        grid.add_target(target, attractor);
    }
    grid.randomize(WALL_PROBABILITY);
    grid
}

/// Generate `n` deterministic target/attractor pairs inside the border.
///
/// Uses a simple multiplicative hash of the seed so profiles do not depend
/// on the engine's random stream.
pub fn target_pairs(width: u32, height: u32, n: u16, seed: u64) -> Vec<(Position, Position)> {
    let inner_w = u64::from(width.saturating_sub(2).max(1));
    let inner_h = u64::from(height.saturating_sub(2).max(1));
    let coord = |k: u64| {
        let h = k.wrapping_mul(6364136223846793005).wrapping_add(1442695040888963407);
        let x = 1 + ((h >> 33) % inner_w) as i32;
        let y = 1 + ((h >> 13) % inner_h) as i32;
        Position::new(x, y)
    };
    (0..u64::from(n))
        .map(|i| {
            let base = seed.wrapping_add(i.wrapping_mul(2));
            (coord(base), coord(base.wrapping_add(1)))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn pairs_are_deterministic_and_inside() {
        let a = target_pairs(100, 100, 8, 42);
        let b = target_pairs(100, 100, 8, 42);
        assert_eq!(a, b);
        for (t, g) in a {
            for p in [t, g] {
                assert!((1..99).contains(&p.x) && (1..99).contains(&p.y), "{p}");
            }
        }
    }

    #[test]
    fn reference_profile_shape() {
        let mut grid = reference_profile(1);
        assert_eq!((grid.width(), grid.height()), (100, 100));
        assert_eq!(grid.targets().len(), 4);
        grid.step();
        assert!(grid.last_metrics().sources >= 1);
    }

    #[test]
    fn tiny_profile_does_not_panic() {
        let grid = profile(2, 2, 3, Connectivity::Orthogonal4, 0);
        assert_eq!(grid.targets().len(), 3);
    }
}
