//! Centralized balance and tuning constants for Hangar Havoc game logic.
//!
//! These values define the deterministic math for the core simulation.
//! Keeping them together ensures that gameplay can only be adjusted via
//! code changes reviewed in version control, rather than through external
//! JSON assets.

// Logging keys -------------------------------------------------------------
pub(crate) const LOG_SHIFT_START: &str = "log.shift.start";
pub(crate) const LOG_SHIFT_AIRWORTHY: &str = "log.shift.airworthy";
pub(crate) const LOG_SHIFT_LOST_PREFIX: &str = "log.shift.lost.";
pub(crate) const LOG_TOOL_BROKEN: &str = "log.tool.broken";
pub(crate) const LOG_TOOL_REPLACED: &str = "log.tool.replaced";
pub(crate) const LOG_POPUP_DISTRACTION: &str = "log.popup.distraction";
pub(crate) const LOG_POPUP_BOSS: &str = "log.popup.boss";
pub(crate) const LOG_POPUP_NORMS: &str = "log.popup.norms";
pub(crate) const LOG_POPUP_DISMISSED: &str = "log.popup.dismissed";
pub(crate) const LOG_BOSS_REFUSED: &str = "log.popup.boss-refused";
pub(crate) const LOG_SHORTCUT_DECLINED: &str = "log.popup.shortcut-declined";
pub(crate) const LOG_TUNNEL_VISION: &str = "log.tunnel.on";
pub(crate) const LOG_TUNNEL_CLEARED: &str = "log.tunnel.cleared";
pub(crate) const LOG_SHIFT_CHANGE: &str = "log.shift-change";
pub(crate) const LOG_STRESS_SPIKE: &str = "log.stress.spike";
pub(crate) const LOG_RESTED: &str = "log.rested";
pub(crate) const LOG_MANUAL_CONSULTED: &str = "log.manual.consulted";
pub(crate) const LOG_BOLT_FIXED: &str = "log.bolt.fixed";

// Bolt tuning --------------------------------------------------------------
pub(crate) const BOLT_PROGRESS_MAX: f32 = 100.0;
/// One-in-N odds rolled at bolt creation.
pub(crate) const BOLT_MYSTERY_ODDS: u32 = 6;
pub(crate) const BOLT_HEAVY_ODDS: u32 = 9;
pub(crate) const BOLT_DECOY_ODDS: u32 = 9;

// Hazard tuning ------------------------------------------------------------
/// Fixed budget the hazard roll is drawn against; table weights below the
/// budget leave the remainder as event-free draws.
pub(crate) const HAZARD_ROLL_BUDGET: u32 = 100;

// Session tuning -----------------------------------------------------------
/// Entries retained in the most-recent-first shift log.
pub(crate) const SHIFT_LOG_CAP: usize = 5;
