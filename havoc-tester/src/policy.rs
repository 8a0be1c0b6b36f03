//! Scripted player policies driving sessions during logic runs.
use clap::ValueEnum;
use havoc_game::{Intent, ShiftConfig, ShiftSnapshot};

/// How the simulated mechanic behaves during a shift.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum PlayerPolicy {
    /// Clears every disruption promptly, rests ahead of the limit
    Diligent,
    /// Only ever tightens; never rests, never clears anything
    Complacent,
    /// Takes the wrong choice on every popup
    Careless,
}

impl PlayerPolicy {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Diligent => "diligent",
            Self::Complacent => "complacent",
            Self::Careless => "careless",
        }
    }

    /// Choose the next intent for the current frame, or none to idle.
    #[must_use]
    pub fn next_intent(self, snapshot: &ShiftSnapshot, cfg: &ShiftConfig) -> Option<Intent> {
        match self {
            Self::Diligent => diligent(snapshot, cfg),
            Self::Complacent => first_unfixed(snapshot).map(Intent::Tighten),
            Self::Careless => careless(snapshot),
        }
    }
}

fn first_unfixed(snapshot: &ShiftSnapshot) -> Option<usize> {
    snapshot
        .bolts
        .iter()
        .position(|bolt| !bolt.fixed)
}

fn diligent(snapshot: &ShiftSnapshot, cfg: &ShiftConfig) -> Option<Intent> {
    if snapshot.tool_broken {
        return Some(Intent::FixTool);
    }
    if snapshot.distraction {
        return Some(Intent::DismissDistraction);
    }
    if snapshot.boss_pressure {
        return Some(Intent::RefuseBoss);
    }
    if snapshot.norms_pressure {
        return Some(Intent::DeclineShortcut);
    }
    if snapshot.tunnel_vision {
        return Some(Intent::Scan);
    }
    if snapshot.fatigue > cfg.fatigue_limit * 0.8 {
        return Some(Intent::Rest);
    }
    let (index, bolt) = snapshot
        .bolts
        .iter()
        .enumerate()
        .find(|(_, bolt)| !bolt.fixed)?;
    if bolt.mystery {
        return Some(Intent::ConsultManual(index));
    }
    Some(Intent::Tighten(index))
}

fn careless(snapshot: &ShiftSnapshot) -> Option<Intent> {
    if snapshot.distraction {
        return Some(Intent::AnswerPhone);
    }
    if snapshot.boss_pressure {
        return Some(Intent::SignOff);
    }
    if snapshot.norms_pressure {
        return Some(Intent::TakeShortcut);
    }
    first_unfixed(snapshot).map(Intent::Tighten)
}
