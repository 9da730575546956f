//! Per-step timing and occupancy counters.

/// Counters collected during one [`ScentGrid::step`](crate::ScentGrid::step).
#[derive(Clone, Debug, Default, PartialEq)]
pub struct StepMetrics {
    /// Wall time of the propagation sweep, in microseconds.
    pub sweep_us: u64,
    /// Wall time of the whole step including observers, in microseconds.
    pub total_us: u64,
    /// Non-empty cells after the step, sources included.
    pub active_cells: usize,
    /// Distinct cells occupied by a target after the step.
    pub sources: usize,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_is_zeroed() {
        let m = StepMetrics::default();
        assert_eq!(m.sweep_us, 0);
        assert_eq!(m.total_us, 0);
        assert_eq!(m.active_cells, 0);
        assert_eq!(m.sources, 0);
    }
}
