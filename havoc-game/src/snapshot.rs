//! Read-only per-step view handed to presentation layers.
use serde::{Deserialize, Serialize};

use crate::bolt::Bolt;
use crate::ending::Ending;
use crate::session::ShiftPhase;

/// Display projection of one bolt.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BoltView {
    pub progress: f32,
    pub mystery: bool,
    pub heavy: bool,
    pub fixed: bool,
    pub decoy: bool,
}

impl From<&Bolt> for BoltView {
    fn from(bolt: &Bolt) -> Self {
        Self {
            progress: bolt.progress,
            mystery: bolt.mystery,
            heavy: bolt.heavy,
            fixed: bolt.is_fixed(),
            decoy: bolt.decoy,
        }
    }
}

/// Everything a front end needs to draw one frame or form render.
///
/// Log entries are most-recent-first and capped by the session.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSnapshot {
    pub phase: ShiftPhase,
    pub ending: Option<Ending>,
    pub remaining_secs: f32,
    pub fatigue: f32,
    pub stress: f32,
    pub tool_broken: bool,
    pub distraction: bool,
    pub boss_pressure: bool,
    pub norms_pressure: bool,
    pub tunnel_vision: bool,
    pub bolts: Vec<BoltView>,
    pub logs: Vec<String>,
}

impl ShiftSnapshot {
    /// Count of bolts currently fixed, for HUD display.
    #[must_use]
    pub fn bolts_fixed(&self) -> usize {
        self.bolts.iter().filter(|bolt| bolt.fixed).count()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn bolt_view_reports_fixed_from_progress() {
        let bolt = Bolt {
            progress: 100.0,
            decoy: true,
            ..Bolt::default()
        };
        let view = BoltView::from(&bolt);
        assert!(view.fixed);
        assert!(view.decoy);
    }
}
