//! Bolt work items and their creation-time quirk flags
use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::constants::{BOLT_DECOY_ODDS, BOLT_HEAVY_ODDS, BOLT_MYSTERY_ODDS, BOLT_PROGRESS_MAX};

/// A single unit of maintenance work. Flags are rolled once at creation
/// and only ever cleared afterwards.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
pub struct Bolt {
    /// Work completed on this bolt (percentage 0-100)
    #[serde(default)]
    pub progress: f32,
    /// Needs a manual consult before tightening has any effect
    #[serde(default)]
    pub mystery: bool,
    /// Tightens at the reduced heavy increment
    #[serde(default)]
    pub heavy: bool,
    /// Painted like finished work despite zero progress
    #[serde(default)]
    pub decoy: bool,
}

impl Bolt {
    /// Roll a fresh bolt, drawing each quirk flag independently.
    #[must_use]
    pub fn roll<R: Rng + ?Sized>(rng: &mut R) -> Self {
        Self {
            progress: 0.0,
            mystery: rng.gen_range(0..BOLT_MYSTERY_ODDS) == 0,
            heavy: rng.gen_range(0..BOLT_HEAVY_ODDS) == 0,
            decoy: rng.gen_range(0..BOLT_DECOY_ODDS) == 0,
        }
    }

    #[must_use]
    pub fn is_fixed(&self) -> bool {
        self.progress >= BOLT_PROGRESS_MAX
    }

    /// Whether tightening can currently accomplish anything.
    #[must_use]
    pub fn is_workable(&self) -> bool {
        !self.mystery && !self.is_fixed()
    }

    /// Apply one tightening increment, clamping at exactly 100.
    ///
    /// A mystery or already-fixed bolt is left untouched. The first
    /// interaction with a decoy bolt clears its paint before any progress
    /// lands. Returns true when this call crossed the bolt into fixed.
    pub fn advance(&mut self, amount: f32) -> bool {
        if amount <= 0.0 || !self.is_workable() {
            return false;
        }
        self.decoy = false;
        self.progress = (self.progress + amount).min(BOLT_PROGRESS_MAX);
        self.is_fixed()
    }

    /// Consult the manual. Returns true when the bolt was a mystery and
    /// is now workable; repeated consults are no-ops.
    pub fn reveal(&mut self) -> bool {
        let was_mystery = self.mystery;
        self.mystery = false;
        was_mystery
    }

    /// Shift-change reset: progress back to zero, decoy paint reverted.
    /// The mystery flag stays as rolled.
    pub fn reset(&mut self) {
        self.progress = 0.0;
        self.decoy = false;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::mock::StepRng;

    #[test]
    fn roll_with_zero_stream_sets_every_flag() {
        let mut rng = StepRng::new(0, 0);
        let bolt = Bolt::roll(&mut rng);
        assert!(bolt.mystery);
        assert!(bolt.heavy);
        assert!(bolt.decoy);
        assert!(bolt.progress.abs() < f32::EPSILON);
    }

    #[test]
    fn advance_clamps_at_exactly_one_hundred() {
        let mut bolt = Bolt {
            progress: 90.0,
            ..Bolt::default()
        };
        let fixed = bolt.advance(25.0);
        assert!(fixed);
        assert!((bolt.progress - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn advance_on_fixed_bolt_is_idempotent() {
        let mut bolt = Bolt {
            progress: 100.0,
            ..Bolt::default()
        };
        assert!(!bolt.advance(25.0));
        assert!((bolt.progress - 100.0).abs() < f32::EPSILON);
    }

    #[test]
    fn mystery_bolt_ignores_tightening_until_revealed() {
        let mut bolt = Bolt {
            mystery: true,
            ..Bolt::default()
        };
        assert!(!bolt.advance(25.0));
        assert!(bolt.progress.abs() < f32::EPSILON);

        assert!(bolt.reveal());
        assert!(!bolt.reveal());
        assert!(!bolt.advance(25.0));
        assert!((bolt.progress - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn first_interaction_clears_decoy_paint() {
        let mut bolt = Bolt {
            decoy: true,
            ..Bolt::default()
        };
        bolt.advance(25.0);
        assert!(!bolt.decoy);
        assert!((bolt.progress - 25.0).abs() < f32::EPSILON);
    }

    #[test]
    fn non_positive_increment_does_not_change_state() {
        let mut bolt = Bolt {
            progress: 40.0,
            decoy: true,
            ..Bolt::default()
        };
        assert!(!bolt.advance(0.0));
        assert!(!bolt.advance(-2.0));
        assert!((bolt.progress - 40.0).abs() < f32::EPSILON);
        assert!(bolt.decoy);
    }

    #[test]
    fn reset_reverts_progress_and_decoy_but_not_mystery() {
        let mut bolt = Bolt {
            progress: 100.0,
            mystery: true,
            decoy: true,
            ..Bolt::default()
        };
        bolt.reset();
        assert!(bolt.progress.abs() < f32::EPSILON);
        assert!(!bolt.decoy);
        assert!(bolt.mystery);
        assert!(!bolt.is_fixed());
    }
}
