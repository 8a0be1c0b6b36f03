//! Shift session: the owner of one playthrough and its update loop.
//!
//! A continuous front end calls [`Session::tick`] at the configured tick
//! rate and forwards intents as they happen; a step-based front end calls
//! `tick` exactly once after each intent. Both read the same snapshot back.
use rand::seq::index::sample;
use serde::{Deserialize, Serialize};
use smallvec::SmallVec;

use crate::bolt::Bolt;
use crate::config::{ConfigError, ShiftConfig};
use crate::constants::{
    LOG_BOLT_FIXED, LOG_BOSS_REFUSED, LOG_MANUAL_CONSULTED, LOG_POPUP_BOSS, LOG_POPUP_DISMISSED,
    LOG_POPUP_DISTRACTION, LOG_POPUP_NORMS, LOG_RESTED, LOG_SHIFT_AIRWORTHY, LOG_SHIFT_CHANGE,
    LOG_SHIFT_LOST_PREFIX, LOG_SHIFT_START, LOG_SHORTCUT_DECLINED, LOG_STRESS_SPIKE,
    LOG_TOOL_BROKEN, LOG_TOOL_REPLACED, LOG_TUNNEL_CLEARED, LOG_TUNNEL_VISION, SHIFT_LOG_CAP,
};
use crate::disruption::Disruptions;
use crate::ending::{Ending, ShiftSummary, select_ending};
use crate::hazard::{HazardContext, HazardKind, catalog, roll_hazard};
use crate::numbers::{clamp_f64_to_f32, round_f32_to_i32};
use crate::rng::RngBundle;
use crate::seed::encode_friendly;
use crate::snapshot::{BoltView, ShiftSnapshot};

/// Bolts stored inline; a default shift never touches the heap for them.
pub type BoltSet = SmallVec<[Bolt; 6]>;

/// Coarse lifecycle state of a session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase")]
pub enum ShiftPhase {
    /// Title screen; no shift underway
    #[default]
    Splash,
    /// Shift in progress, intents and ticks apply
    Running,
    /// Terminal; only a restart is accepted
    Over,
}

/// Discrete player intents forwarded by a presentation layer.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Intent {
    Tighten(usize),
    ConsultManual(usize),
    Rest,
    FixTool,
    DismissDistraction,
    /// Wrong distraction choice; instant loss
    AnswerPhone,
    RefuseBoss,
    /// Wrong boss choice; instant loss
    SignOff,
    DeclineShortcut,
    /// Wrong norms choice; instant loss
    TakeShortcut,
    Scan,
    StartShift,
    ReturnToSplash,
}

/// Per-tick observations only the presentation layer can make.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Default)]
pub struct TickInput {
    /// The pointer did not move since the last tick; lets stress decay
    pub pointer_idle: bool,
}

/// One playthrough's complete mutable state, from shift start to terminal
/// outcome. Sole owner of its bolts and disruption record.
#[derive(Debug, Clone)]
pub struct Session {
    pub cfg: ShiftConfig,
    pub seed: u64,
    pub phase: ShiftPhase,
    pub ending: Option<Ending>,
    pub elapsed_ticks: u32,
    pub fatigue: f32,
    pub bolts: BoltSet,
    pub disruptions: Disruptions,
    /// Instant-fail choice recorded for the next terminal evaluation
    pub pending_fail: Option<Ending>,
    pub hazards_seen: u32,
    /// Most-recent-first, capped at five entries
    pub logs: SmallVec<[String; SHIFT_LOG_CAP]>,
    rng: RngBundle,
}

impl Session {
    /// Create a session on the splash screen.
    ///
    /// # Errors
    ///
    /// Returns the first configuration constraint the engine cannot run
    /// with.
    pub fn new(cfg: ShiftConfig, seed: u64) -> Result<Self, ConfigError> {
        cfg.validate()?;
        Ok(Self {
            cfg,
            seed,
            phase: ShiftPhase::Splash,
            ending: None,
            elapsed_ticks: 0,
            fatigue: 0.0,
            bolts: BoltSet::new(),
            disruptions: Disruptions::default(),
            pending_fail: None,
            hazards_seen: 0,
            logs: SmallVec::new(),
            rng: RngBundle::from_user_seed(seed),
        })
    }

    /// Apply one player intent, then evaluate terminal conditions.
    ///
    /// Invalid intents (bad index, wrong phase, status not active) are
    /// no-ops, never errors.
    pub fn handle(&mut self, intent: Intent) {
        match intent {
            Intent::StartShift => {
                if self.phase == ShiftPhase::Splash {
                    self.start_shift();
                }
                return;
            }
            Intent::ReturnToSplash => {
                if self.phase == ShiftPhase::Over {
                    self.return_to_splash();
                }
                return;
            }
            _ => {}
        }
        if self.phase != ShiftPhase::Running {
            return;
        }
        match intent {
            Intent::Tighten(index) => self.tighten(index),
            Intent::ConsultManual(index) => self.consult_manual(index),
            Intent::Rest => {
                self.fatigue = (self.fatigue - self.cfg.rest_recovery).max(0.0);
                self.push_log(LOG_RESTED);
            }
            Intent::FixTool => {
                if self.disruptions.tool_broken {
                    self.disruptions.tool_broken = false;
                    self.push_log(LOG_TOOL_REPLACED);
                }
            }
            Intent::DismissDistraction => {
                if self.disruptions.distraction {
                    self.disruptions.distraction = false;
                    self.push_log(LOG_POPUP_DISMISSED);
                }
            }
            Intent::AnswerPhone => {
                if self.disruptions.distraction {
                    self.disruptions.distraction = false;
                    self.pending_fail = Some(Ending::Distraction);
                }
            }
            Intent::RefuseBoss => {
                if self.disruptions.boss_pressure {
                    self.disruptions.boss_pressure = false;
                    self.push_log(LOG_BOSS_REFUSED);
                }
            }
            Intent::SignOff => {
                if self.disruptions.boss_pressure {
                    self.disruptions.boss_pressure = false;
                    self.pending_fail = Some(Ending::Assertiveness);
                }
            }
            Intent::DeclineShortcut => {
                if self.disruptions.norms_pressure {
                    self.disruptions.norms_pressure = false;
                    self.push_log(LOG_SHORTCUT_DECLINED);
                }
            }
            Intent::TakeShortcut => {
                if self.disruptions.norms_pressure {
                    self.disruptions.norms_pressure = false;
                    self.pending_fail = Some(Ending::Norms);
                }
            }
            Intent::Scan => {
                if self.disruptions.tunnel_vision {
                    self.disruptions.tunnel_vision = false;
                    self.push_log(LOG_TUNNEL_CLEARED);
                }
            }
            Intent::StartShift | Intent::ReturnToSplash => {}
        }
        self.evaluate_end();
    }

    /// Advance the clock one tick: fatigue accrues, stress decays on an
    /// idle pointer, at most one hazard may fire, terminals are checked.
    pub fn tick(&mut self, input: TickInput) {
        if self.phase != ShiftPhase::Running {
            return;
        }
        self.elapsed_ticks = self.elapsed_ticks.saturating_add(1);
        self.fatigue += self.cfg.fatigue_per_tick;
        if input.pointer_idle {
            self.disruptions.decay_stress(self.cfg.stress_decay);
        }

        let ctx = HazardContext::from_disruptions(&self.disruptions, self.bolts.len());
        let picked = {
            let mut rng = self.rng.hazard();
            roll_hazard(catalog(), self.cfg.hazard_chance, &ctx, &mut *rng)
        };
        if let Some(kind) = picked {
            self.apply_hazard(kind);
        }
        self.evaluate_end();
    }

    /// Ticks left before the timer loss fires.
    #[must_use]
    pub const fn remaining_ticks(&self) -> u32 {
        self.cfg.time_limit_ticks.saturating_sub(self.elapsed_ticks)
    }

    /// Read-only projection for the presentation layer.
    #[must_use]
    pub fn snapshot(&self) -> ShiftSnapshot {
        ShiftSnapshot {
            phase: self.phase,
            ending: self.ending,
            remaining_secs: clamp_f64_to_f32(
                f64::from(self.remaining_ticks()) / f64::from(self.cfg.tick_hz),
            ),
            fatigue: self.fatigue,
            stress: self.disruptions.stress,
            tool_broken: self.disruptions.tool_broken,
            distraction: self.disruptions.distraction,
            boss_pressure: self.disruptions.boss_pressure,
            norms_pressure: self.disruptions.norms_pressure,
            tunnel_vision: self.disruptions.tunnel_vision,
            bolts: self.bolts.iter().map(BoltView::from).collect(),
            logs: self.logs.to_vec(),
        }
    }

    /// Debrief summary; present once the session is terminal.
    #[must_use]
    pub fn summary(&self) -> Option<ShiftSummary> {
        let ending = self.ending?;
        let seconds_used = round_f32_to_i32(clamp_f64_to_f32(
            f64::from(self.elapsed_ticks) / f64::from(self.cfg.tick_hz),
        ));
        Some(ShiftSummary {
            ending,
            headline: ending.headline_key().to_string(),
            seed_code: encode_friendly(self.cfg.tick_hz == 1, self.seed),
            seconds_used,
            bolts_fixed: self.bolts.iter().filter(|bolt| bolt.is_fixed()).count(),
            hazards_weathered: self.hazards_seen,
        })
    }

    fn start_shift(&mut self) {
        self.bolts.clear();
        {
            let mut rng = self.rng.bolts();
            for _ in 0..self.cfg.bolt_count {
                self.bolts.push(Bolt::roll(&mut *rng));
            }
        }
        self.disruptions = Disruptions::default();
        self.elapsed_ticks = 0;
        self.fatigue = 0.0;
        self.pending_fail = None;
        self.hazards_seen = 0;
        self.ending = None;
        self.logs.clear();
        self.phase = ShiftPhase::Running;
        self.push_log(LOG_SHIFT_START);
    }

    fn return_to_splash(&mut self) {
        self.bolts.clear();
        self.disruptions = Disruptions::default();
        self.elapsed_ticks = 0;
        self.fatigue = 0.0;
        self.pending_fail = None;
        self.hazards_seen = 0;
        self.ending = None;
        self.logs.clear();
        self.phase = ShiftPhase::Splash;
    }

    fn tighten(&mut self, index: usize) {
        if self.disruptions.tool_broken {
            return;
        }
        if self.cfg.distraction_blocks_work && self.disruptions.distraction {
            return;
        }
        let heavy_increment = self.cfg.heavy_increment;
        let base_increment = self.cfg.base_increment;
        let Some(bolt) = self.bolts.get_mut(index) else {
            return;
        };
        let amount = if bolt.heavy {
            heavy_increment
        } else {
            base_increment
        };
        if bolt.advance(amount) {
            self.push_log(LOG_BOLT_FIXED);
        }
    }

    fn consult_manual(&mut self, index: usize) {
        let Some(bolt) = self.bolts.get_mut(index) else {
            return;
        };
        if bolt.reveal() {
            self.push_log(LOG_MANUAL_CONSULTED);
        }
    }

    fn apply_hazard(&mut self, kind: HazardKind) {
        self.hazards_seen = self.hazards_seen.saturating_add(1);
        match kind {
            HazardKind::ToolBreak => {
                self.disruptions.tool_broken = true;
                self.push_log(LOG_TOOL_BROKEN);
            }
            HazardKind::Distraction => {
                self.disruptions.distraction = true;
                self.push_log(LOG_POPUP_DISTRACTION);
            }
            HazardKind::BossPressure => {
                self.disruptions.boss_pressure = true;
                self.push_log(LOG_POPUP_BOSS);
            }
            HazardKind::Norms => {
                self.disruptions.norms_pressure = true;
                self.push_log(LOG_POPUP_NORMS);
            }
            HazardKind::TunnelVision => {
                self.disruptions.tunnel_vision = true;
                self.push_log(LOG_TUNNEL_VISION);
            }
            HazardKind::ShiftChange => {
                self.reset_random_bolts();
                self.push_log(LOG_SHIFT_CHANGE);
            }
            HazardKind::StressSpike => {
                self.disruptions.stress = self.cfg.stress_spike;
                self.push_log(LOG_STRESS_SPIKE);
            }
        }
    }

    fn reset_random_bolts(&mut self) {
        let amount = self.cfg.shift_reset_bolts.min(self.bolts.len());
        if amount == 0 {
            return;
        }
        let picks = {
            let mut rng = self.rng.sampling();
            sample(&mut *rng, self.bolts.len(), amount)
        };
        for index in picks {
            self.bolts[index].reset();
        }
    }

    /// Terminal evaluation in strict priority order; runs after every
    /// state-mutating step.
    fn evaluate_end(&mut self) {
        if self.phase != ShiftPhase::Running {
            return;
        }
        let time_exhausted = self.remaining_ticks() == 0;
        let fatigued = self.fatigue >= self.cfg.fatigue_limit;
        let all_fixed = !self.bolts.is_empty() && self.bolts.iter().all(Bolt::is_fixed);
        let Some(ending) = select_ending(time_exhausted, fatigued, self.pending_fail, all_fixed)
        else {
            return;
        };
        self.phase = ShiftPhase::Over;
        self.ending = Some(ending);
        if ending.is_win() {
            self.push_log(LOG_SHIFT_AIRWORTHY);
        } else {
            self.push_log(format!("{LOG_SHIFT_LOST_PREFIX}{ending}"));
        }
    }

    fn push_log(&mut self, key: impl Into<String>) {
        self.logs.insert(0, key.into());
        self.logs.truncate(SHIFT_LOG_CAP);
    }
}
