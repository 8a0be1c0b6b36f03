//! Disruption status flags that gate or distort player actions.
use serde::{Deserialize, Serialize};

/// Independent status modifiers applied by hazards and cleared by their
/// designated player actions. One record per session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Disruptions {
    /// Blocks all tightening until the toolbox is visited
    #[serde(default)]
    pub tool_broken: bool,
    /// Phone popup; blocks tightening in the step-based variant
    #[serde(default)]
    pub distraction: bool,
    /// Boss demanding a sign-off; refusing clears, signing loses
    #[serde(default)]
    pub boss_pressure: bool,
    /// Shortcut temptation; declining clears, taking it loses
    #[serde(default)]
    pub norms_pressure: bool,
    /// Narrowed view until the player scans
    #[serde(default)]
    pub tunnel_vision: bool,
    /// Input jitter magnitude; decays while the pointer is idle
    #[serde(default)]
    pub stress: f32,
}

impl Disruptions {
    #[must_use]
    pub fn is_stressed(&self) -> bool {
        self.stress > 0.0
    }

    /// Shed stress for one idle tick, flooring at zero.
    pub fn decay_stress(&mut self, step: f32) {
        if step <= 0.0 || !self.is_stressed() {
            return;
        }
        self.stress = (self.stress - step).max(0.0);
    }
}
