//! Seeded shift runs and the loop that drives them.
use anyhow::{Result, bail};
use clap::ValueEnum;
use havoc_game::{Ending, Intent, Session, ShiftConfig, ShiftPhase, TickInput};
use serde::Serialize;

use crate::policy::PlayerPolicy;

/// Which tuning preset the shift runs under.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Variant {
    /// Continuous mouse-driven tuning (60s shift, per-tick increments)
    Realtime,
    /// Step-based button-driven tuning (one tick per action)
    TurnBased,
}

impl Variant {
    #[must_use]
    pub const fn key(self) -> &'static str {
        match self {
            Self::Realtime => "realtime",
            Self::TurnBased => "turn-based",
        }
    }

    #[must_use]
    pub const fn config(self) -> ShiftConfig {
        match self {
            Self::Realtime => ShiftConfig::realtime(),
            Self::TurnBased => ShiftConfig::turn_based(),
        }
    }
}

/// Outcome of one driven shift.
#[derive(Debug, Clone, Serialize)]
pub struct ShiftRecord {
    pub seed: u64,
    pub ending: Ending,
    pub steps: u32,
    pub seconds_used: i32,
    pub bolts_fixed: usize,
    pub hazards_weathered: u32,
}

/// Drive a single seeded session with the given policy until it ends.
///
/// # Errors
///
/// Fails when the session refuses to reach a terminal state within the
/// shift timer plus slack, which would be an engine bug.
pub fn run_shift(policy: PlayerPolicy, variant: Variant, seed: u64) -> Result<ShiftRecord> {
    let cfg = variant.config();
    let mut session = Session::new(cfg, seed)?;
    session.handle(Intent::StartShift);

    let limit = session.cfg.time_limit_ticks + 10;
    let mut steps = 0_u32;
    for _ in 0..limit {
        if session.phase == ShiftPhase::Over {
            break;
        }
        let snapshot = session.snapshot();
        let intent = policy.next_intent(&snapshot, &session.cfg);
        let acted = intent.is_some();
        if let Some(intent) = intent {
            session.handle(intent);
        }
        session.tick(TickInput {
            pointer_idle: !acted,
        });
        steps += 1;
    }

    if session.phase != ShiftPhase::Over {
        bail!(
            "policy {} seed {seed} never reached a terminal state in {limit} steps",
            policy.key()
        );
    }
    let summary = session
        .summary()
        .expect("terminal session always has a summary");
    log::debug!(
        "policy {} seed {seed}: {} after {steps} steps",
        policy.key(),
        summary.ending
    );
    Ok(ShiftRecord {
        seed,
        ending: summary.ending,
        steps,
        seconds_used: summary.seconds_used,
        bolts_fixed: summary.bolts_fixed,
        hazards_weathered: summary.hazards_weathered,
    })
}

/// Run a policy across every seed, `iterations` shifts per seed.
///
/// # Errors
///
/// Propagates the first non-terminating run.
pub fn run_scenario(
    policy: PlayerPolicy,
    variant: Variant,
    seeds: &[u64],
    iterations: u64,
) -> Result<Vec<ShiftRecord>> {
    let mut records = Vec::new();
    for &seed in seeds {
        for round in 0..iterations {
            records.push(run_shift(policy, variant, seed.wrapping_add(round))?);
        }
    }
    Ok(records)
}
