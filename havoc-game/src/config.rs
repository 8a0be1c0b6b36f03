//! Shift tuning configuration shared by both presentation variants.
//!
//! Every constant the two original front ends disagreed on (timer length,
//! increments, fatigue rate, hazard odds) lives here as a named field, so
//! a continuous and a step-based presentation layer can drive one core.
use serde::{Deserialize, Serialize};
use thiserror::Error;

const fn default_tick_hz() -> u32 {
    60
}

const fn default_time_limit_ticks() -> u32 {
    60 * 60
}

const fn default_base_increment() -> f32 {
    2.0
}

const fn default_heavy_increment() -> f32 {
    0.5
}

const fn default_fatigue_per_tick() -> f32 {
    0.15
}

const fn default_fatigue_limit() -> f32 {
    250.0
}

const fn default_rest_recovery() -> f32 {
    100.0
}

const fn default_stress_spike() -> f32 {
    20.0
}

const fn default_stress_decay() -> f32 {
    0.5
}

const fn default_hazard_chance() -> f32 {
    0.01
}

const fn default_bolt_count() -> usize {
    6
}

const fn default_shift_reset_bolts() -> usize {
    2
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftConfig {
    /// Simulation ticks per displayed second (1 for the step-based variant)
    #[serde(default = "default_tick_hz")]
    pub tick_hz: u32,
    /// Shift length in ticks; the timer loss fires when it runs out
    #[serde(default = "default_time_limit_ticks")]
    pub time_limit_ticks: u32,
    /// Progress added per tighten on a normal bolt
    #[serde(default = "default_base_increment")]
    pub base_increment: f32,
    /// Progress added per tighten on a heavy bolt
    #[serde(default = "default_heavy_increment")]
    pub heavy_increment: f32,
    /// Fatigue accrued every tick
    #[serde(default = "default_fatigue_per_tick")]
    pub fatigue_per_tick: f32,
    /// Fatigue at or above this value ends the shift
    #[serde(default = "default_fatigue_limit")]
    pub fatigue_limit: f32,
    /// Fatigue removed by one rest action
    #[serde(default = "default_rest_recovery")]
    pub rest_recovery: f32,
    /// Stress level set by a stress-spike hazard
    #[serde(default = "default_stress_spike")]
    pub stress_spike: f32,
    /// Stress shed per tick with an idle pointer
    #[serde(default = "default_stress_decay")]
    pub stress_decay: f32,
    /// Probability of a hazard roll per tick
    #[serde(default = "default_hazard_chance")]
    pub hazard_chance: f32,
    /// Bolts created at shift start
    #[serde(default = "default_bolt_count")]
    pub bolt_count: usize,
    /// Bolts reset by one shift-change hazard
    #[serde(default = "default_shift_reset_bolts")]
    pub shift_reset_bolts: usize,
    /// Whether an open distraction popup blocks tightening
    #[serde(default)]
    pub distraction_blocks_work: bool,
}

impl Default for ShiftConfig {
    fn default() -> Self {
        Self::realtime()
    }
}

impl ShiftConfig {
    /// Tuning for the continuous mouse-driven variant: a 60 second shift
    /// at 60 ticks per second, small per-tick increments.
    #[must_use]
    pub const fn realtime() -> Self {
        Self {
            tick_hz: default_tick_hz(),
            time_limit_ticks: default_time_limit_ticks(),
            base_increment: default_base_increment(),
            heavy_increment: default_heavy_increment(),
            fatigue_per_tick: default_fatigue_per_tick(),
            fatigue_limit: default_fatigue_limit(),
            rest_recovery: default_rest_recovery(),
            stress_spike: default_stress_spike(),
            stress_decay: default_stress_decay(),
            hazard_chance: default_hazard_chance(),
            bolt_count: default_bolt_count(),
            shift_reset_bolts: default_shift_reset_bolts(),
            distraction_blocks_work: false,
        }
    }

    /// Tuning for the step-based button-driven variant: one tick per
    /// player action, chunky increments, an open popup blocks work.
    #[must_use]
    pub const fn turn_based() -> Self {
        Self {
            tick_hz: 1,
            time_limit_ticks: 48,
            base_increment: 25.0,
            heavy_increment: 10.0,
            fatigue_per_tick: 4.0,
            fatigue_limit: 100.0,
            rest_recovery: 30.0,
            stress_spike: 20.0,
            stress_decay: 5.0,
            hazard_chance: 0.25,
            bolt_count: 6,
            shift_reset_bolts: 2,
            distraction_blocks_work: true,
        }
    }

    /// Shift length in display seconds.
    #[must_use]
    pub fn time_limit_secs(&self) -> f32 {
        crate::numbers::clamp_f64_to_f32(f64::from(self.time_limit_ticks) / f64::from(self.tick_hz))
    }

    /// Check the configuration for values the engine cannot run with.
    ///
    /// # Errors
    ///
    /// Returns the first violated constraint.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.tick_hz == 0 {
            return Err(ConfigError::ZeroCount { field: "tick_hz" });
        }
        if self.time_limit_ticks == 0 {
            return Err(ConfigError::ZeroCount {
                field: "time_limit_ticks",
            });
        }
        if self.bolt_count == 0 {
            return Err(ConfigError::ZeroCount { field: "bolt_count" });
        }
        for (field, value) in [
            ("base_increment", self.base_increment),
            ("heavy_increment", self.heavy_increment),
            ("fatigue_limit", self.fatigue_limit),
        ] {
            if value <= 0.0 {
                return Err(ConfigError::NonPositive { field, value });
            }
        }
        for (field, value) in [
            ("fatigue_per_tick", self.fatigue_per_tick),
            ("rest_recovery", self.rest_recovery),
            ("stress_spike", self.stress_spike),
            ("stress_decay", self.stress_decay),
        ] {
            if value < 0.0 {
                return Err(ConfigError::MinViolation {
                    field,
                    min: 0.0,
                    value,
                });
            }
        }
        if !(0.0..=1.0).contains(&self.hazard_chance) {
            return Err(ConfigError::RangeViolation {
                field: "hazard_chance",
                min: 0.0,
                max: 1.0,
                value: self.hazard_chance,
            });
        }
        if self.heavy_increment > self.base_increment {
            return Err(ConfigError::HeavyIncrementExceedsBase {
                heavy: self.heavy_increment,
                base: self.base_increment,
            });
        }
        Ok(())
    }
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum ConfigError {
    #[error("{field} must be non-zero")]
    ZeroCount { field: &'static str },
    #[error("{field} must be positive (got {value:.2})")]
    NonPositive { field: &'static str, value: f32 },
    #[error("{field} must be at least {min:.2} (got {value:.2})")]
    MinViolation {
        field: &'static str,
        min: f32,
        value: f32,
    },
    #[error("{field} must be between {min:.2} and {max:.2} (got {value:.2})")]
    RangeViolation {
        field: &'static str,
        min: f32,
        max: f32,
        value: f32,
    },
    #[error("heavy increment {heavy:.2} exceeds base increment {base:.2}")]
    HeavyIncrementExceedsBase { heavy: f32, base: f32 },
}
