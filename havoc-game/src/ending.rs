//! Shift endings and the debrief summary.
use serde::{Deserialize, Serialize};

/// Possible shift outcomes, one win and five distinct losses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Ending {
    /// Every bolt fixed before the clock ran out
    Airworthy,
    /// The shift timer expired
    Timeout,
    /// Fatigue reached the limit
    Fatigue,
    /// Answered the phone mid-task
    Distraction,
    /// Signed off unsafe work under boss pressure
    Assertiveness,
    /// Took the tempting shortcut
    Norms,
}

impl Ending {
    #[must_use]
    pub const fn is_win(self) -> bool {
        matches!(self, Self::Airworthy)
    }

    /// Headline translation key for the debrief screen.
    #[must_use]
    pub const fn headline_key(self) -> &'static str {
        match self {
            Self::Airworthy => "result.headline.airworthy",
            Self::Timeout => "result.headline.timeout",
            Self::Fatigue => "result.headline.fatigue",
            Self::Distraction => "result.headline.distraction",
            Self::Assertiveness => "result.headline.assertiveness",
            Self::Norms => "result.headline.norms",
        }
    }
}

impl std::fmt::Display for Ending {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Ending::Airworthy => write!(f, "airworthy"),
            Ending::Timeout => write!(f, "timeout"),
            Ending::Fatigue => write!(f, "fatigue"),
            Ending::Distraction => write!(f, "distraction"),
            Ending::Assertiveness => write!(f, "assertiveness"),
            Ending::Norms => write!(f, "norms"),
        }
    }
}

/// Select the ending based on strict priority order: exhausted clock,
/// then fatigue, then a pending instant-fail choice, then the win.
#[must_use]
pub const fn select_ending(
    time_exhausted: bool,
    fatigued: bool,
    pending_fail: Option<Ending>,
    all_bolts_fixed: bool,
) -> Option<Ending> {
    if time_exhausted {
        return Some(Ending::Timeout);
    }
    if fatigued {
        return Some(Ending::Fatigue);
    }
    if pending_fail.is_some() {
        return pending_fail;
    }
    if all_bolts_fixed {
        return Some(Ending::Airworthy);
    }
    None
}

/// Complete summary of a finished shift for the debrief screen.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShiftSummary {
    pub ending: Ending,
    pub headline: String,
    pub seed_code: String,
    pub seconds_used: i32,
    pub bolts_fixed: usize,
    pub hazards_weathered: u32,
}
