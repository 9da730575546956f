//! Core abstraction traits.

/// Something that advances in fixed-size ticks.
///
/// Tick drivers (the wall-clock scheduler, test harnesses, deterministic
/// replays) are written against this trait rather than against the engine,
/// so cadence is decoupled from what is being ticked.
pub trait Tickable {
    /// Seconds of simulated time covered by one [`tick`](Tickable::tick).
    ///
    /// Must be finite and positive.
    fn period(&self) -> f64;

    /// Execute exactly one tick.
    fn tick(&mut self);
}
