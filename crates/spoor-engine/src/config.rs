//! Simulation parameters, grid and driver configuration, and error types.
//!
//! [`GridConfig`] is the builder-input for [`ScentGrid::new`](crate::ScentGrid::new);
//! [`validate()`](GridConfig::validate) checks structural invariants once at
//! construction. After that, parameter writes go through the clamping
//! setters on [`SimParams`] and never fail.

use std::error::Error;
use std::fmt;
use std::time::Duration;

use spoor_space::{Connectivity, GridDims, SpaceError};
use tracing::warn;

/// Smallest accepted tick period, in seconds.
pub const MIN_PERIOD: f64 = 1e-3;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating configuration.
#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// Grid dimensions were rejected.
    Space(SpaceError),
    /// `period` is NaN, infinite, zero, or negative.
    InvalidPeriod {
        /// The invalid value.
        value: f64,
    },
    /// `fade_time` or `flow_time` is NaN, infinite, or negative.
    InvalidTime {
        /// Which parameter.
        name: &'static str,
        /// The invalid value.
        value: f32,
    },
    /// The driver poll interval is zero.
    InvalidPollInterval,
    /// A background thread could not be spawned.
    ThreadSpawnFailed {
        /// Description of the failure.
        reason: String,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Space(e) => write!(f, "space: {e}"),
            Self::InvalidPeriod { value } => {
                write!(f, "period must be finite and positive, got {value}")
            }
            Self::InvalidTime { name, value } => {
                write!(f, "{name} must be finite and non-negative, got {value}")
            }
            Self::InvalidPollInterval => write!(f, "poll_interval must be non-zero"),
            Self::ThreadSpawnFailed { reason } => write!(f, "thread spawn failed: {reason}"),
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Space(e) => Some(e),
            _ => None,
        }
    }
}

impl From<SpaceError> for ConfigError {
    fn from(e: SpaceError) -> Self {
        Self::Space(e)
    }
}

// ── SimParams ──────────────────────────────────────────────────────

/// Timing parameters of the propagation.
///
/// `flow_time <= fade_time` always holds: writing one of them past the
/// other drags the other along.
#[derive(Clone, Debug, PartialEq)]
pub struct SimParams {
    period: f64,
    fade_time: f32,
    flow_time: f32,
}

impl Default for SimParams {
    fn default() -> Self {
        Self {
            period: 0.1,
            fade_time: 100.0,
            flow_time: 100.0,
        }
    }
}

impl SimParams {
    /// Create validated parameters.
    ///
    /// `flow_time` is applied last, so a `flow_time` above `fade_time`
    /// raises `fade_time` to match.
    pub fn new(period: f64, fade_time: f32, flow_time: f32) -> Result<Self, ConfigError> {
        if !period.is_finite() || period <= 0.0 {
            return Err(ConfigError::InvalidPeriod { value: period });
        }
        check_time("fade_time", fade_time)?;
        check_time("flow_time", flow_time)?;
        let mut params = Self {
            period: period.max(MIN_PERIOD),
            fade_time,
            flow_time: 0.0,
        };
        params.set_flow_time(flow_time);
        Ok(params)
    }

    /// Seconds of simulated time per tick.
    pub fn period(&self) -> f64 {
        self.period
    }

    /// Age after which a cell's scent is forgotten.
    pub fn fade_time(&self) -> f32 {
        self.fade_time
    }

    /// Maximum age of a neighbour that may still be inherited from.
    pub fn flow_time(&self) -> f32 {
        self.flow_time
    }

    /// Set the tick period, clamped to at least [`MIN_PERIOD`].
    /// Non-finite values are ignored.
    pub fn set_period(&mut self, period: f64) {
        if !period.is_finite() {
            warn!(period, "ignoring non-finite period");
            return;
        }
        self.period = period.max(MIN_PERIOD);
    }

    /// Set the fade time (negative clamps to 0). Lowers `flow_time` if it
    /// would exceed the new fade time. NaN is ignored.
    pub fn set_fade_time(&mut self, fade_time: f32) {
        if fade_time.is_nan() {
            warn!("ignoring NaN fade_time");
            return;
        }
        self.fade_time = fade_time.max(0.0);
        if self.flow_time > self.fade_time {
            self.flow_time = self.fade_time;
        }
    }

    /// Set the flow time (negative clamps to 0). Raises `fade_time` if the
    /// new flow time exceeds it. NaN is ignored.
    pub fn set_flow_time(&mut self, flow_time: f32) {
        if flow_time.is_nan() {
            warn!("ignoring NaN flow_time");
            return;
        }
        self.flow_time = flow_time.max(0.0);
        if self.flow_time > self.fade_time {
            self.fade_time = self.flow_time;
        }
    }
}

fn check_time(name: &'static str, value: f32) -> Result<(), ConfigError> {
    if !value.is_finite() || value < 0.0 {
        return Err(ConfigError::InvalidTime { name, value });
    }
    Ok(())
}

// ── GridConfig ─────────────────────────────────────────────────────

/// Everything needed to construct a [`ScentGrid`](crate::ScentGrid).
#[derive(Clone, Debug)]
pub struct GridConfig {
    /// Number of columns.
    pub width: u32,
    /// Number of rows.
    pub height: u32,
    /// Initial connectivity scheme.
    pub connectivity: Connectivity,
    /// Timing parameters.
    pub params: SimParams,
    /// Seed for the engine's random stream.
    pub seed: u64,
}

impl GridConfig {
    /// A config with default connectivity, parameters and seed 0.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            connectivity: Connectivity::default(),
            params: SimParams::default(),
            seed: 0,
        }
    }

    /// Builder-style connectivity override.
    pub fn with_connectivity(mut self, connectivity: Connectivity) -> Self {
        self.connectivity = connectivity;
        self
    }

    /// Builder-style parameter override.
    pub fn with_params(mut self, params: SimParams) -> Self {
        self.params = params;
        self
    }

    /// Builder-style seed override.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = seed;
        self
    }

    /// Check structural invariants and return the validated dimensions.
    pub fn validate(&self) -> Result<GridDims, ConfigError> {
        let dims = GridDims::new(self.width, self.height)?;
        let p = &self.params;
        if !p.period.is_finite() || p.period <= 0.0 {
            return Err(ConfigError::InvalidPeriod { value: p.period });
        }
        check_time("fade_time", p.fade_time)?;
        check_time("flow_time", p.flow_time)?;
        Ok(dims)
    }
}

// ── DriverConfig ───────────────────────────────────────────────────

/// Configuration for [`RealtimeDriver`](crate::RealtimeDriver).
#[derive(Clone, Debug)]
pub struct DriverConfig {
    /// Most ticks executed per poll, however long the previous pause was.
    /// 0 disables the cap. Default: 10.
    pub max_ticks_per_poll: u32,
    /// Pause between polls. `None` pauses for one grid period.
    pub poll_interval: Option<Duration>,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_ticks_per_poll: 10,
            poll_interval: None,
        }
    }
}

impl DriverConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.poll_interval == Some(Duration::ZERO) {
            return Err(ConfigError::InvalidPollInterval);
        }
        Ok(())
    }
}
