//! Hazard catalog and the single-event-per-draw selector.
//!
//! The table is data-driven: each entry carries a weight over a fixed roll
//! budget, and the walk visits entries in catalog order so at most one
//! hazard can come out of a draw. Weights below the budget leave the
//! remainder as event-free draws.
use rand::Rng;
use serde::Deserialize;
use std::sync::OnceLock;

use crate::constants::HAZARD_ROLL_BUDGET;
use crate::disruption::Disruptions;

const DEFAULT_HAZARDS_DATA: &str = include_str!("../assets/data/hazards.json");

const fn default_weight() -> u32 {
    1
}

const fn default_roll_budget() -> u32 {
    HAZARD_ROLL_BUDGET
}

/// One human-factors hazard the shift can throw at the player.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum HazardKind {
    ToolBreak,
    Distraction,
    BossPressure,
    Norms,
    TunnelVision,
    ShiftChange,
    StressSpike,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HazardDef {
    pub kind: HazardKind,
    #[serde(default = "default_weight")]
    pub weight: u32,
}

#[derive(Debug, Clone, Deserialize)]
pub struct HazardCatalog {
    #[serde(default = "default_roll_budget")]
    pub roll_budget: u32,
    #[serde(default)]
    pub hazards: Vec<HazardDef>,
}

impl HazardCatalog {
    #[must_use]
    pub fn load_from_static() -> Self {
        serde_json::from_str(DEFAULT_HAZARDS_DATA).unwrap_or_default()
    }
}

impl Default for HazardCatalog {
    fn default() -> Self {
        Self {
            roll_budget: default_roll_budget(),
            hazards: Vec::new(),
        }
    }
}

#[must_use]
pub fn catalog() -> &'static HazardCatalog {
    static CATALOG: OnceLock<HazardCatalog> = OnceLock::new();
    CATALOG.get_or_init(HazardCatalog::load_from_static)
}

/// Preconditions a selected hazard is checked against before it applies.
#[derive(Debug, Clone, Copy)]
pub struct HazardContext {
    pub tool_broken: bool,
    pub distraction: bool,
    pub boss_pressure: bool,
    pub norms_pressure: bool,
    pub tunnel_vision: bool,
    pub stressed: bool,
    pub bolts_present: bool,
}

impl HazardContext {
    #[must_use]
    pub fn from_disruptions(disruptions: &Disruptions, bolt_count: usize) -> Self {
        Self {
            tool_broken: disruptions.tool_broken,
            distraction: disruptions.distraction,
            boss_pressure: disruptions.boss_pressure,
            norms_pressure: disruptions.norms_pressure,
            tunnel_vision: disruptions.tunnel_vision,
            stressed: disruptions.is_stressed(),
            bolts_present: bolt_count > 0,
        }
    }

    /// Whether the hazard may fire right now. A vetoed selection consumes
    /// the draw and produces no event.
    #[must_use]
    pub const fn permits(&self, kind: HazardKind) -> bool {
        match kind {
            HazardKind::ToolBreak => !self.tool_broken,
            HazardKind::Distraction => !self.distraction,
            HazardKind::BossPressure => !self.boss_pressure,
            HazardKind::Norms => !self.norms_pressure,
            HazardKind::TunnelVision => !self.tunnel_vision,
            HazardKind::ShiftChange => self.bolts_present,
            HazardKind::StressSpike => !self.stressed,
        }
    }
}

/// Roll for a disruptive event this tick: first the chance gate, then one
/// weighted walk of the table in fixed order.
pub fn roll_hazard<R>(
    catalog: &HazardCatalog,
    chance: f32,
    ctx: &HazardContext,
    rng: &mut R,
) -> Option<HazardKind>
where
    R: Rng + ?Sized,
{
    let chance = chance.clamp(0.0, 1.0);
    if chance <= 0.0 {
        return None;
    }
    if rng.r#gen::<f32>() >= chance {
        return None;
    }
    select_hazard(catalog, ctx, rng)
}

fn select_hazard<R>(catalog: &HazardCatalog, ctx: &HazardContext, rng: &mut R) -> Option<HazardKind>
where
    R: Rng + ?Sized,
{
    let total_weight: u32 = catalog.hazards.iter().map(|def| def.weight).sum();
    if total_weight == 0 {
        return None;
    }

    // Quiet draws land in the budget remainder past the table.
    let span = total_weight.max(catalog.roll_budget);
    let roll = rng.gen_range(0..span);

    let mut cursor = 0_u32;
    for def in &catalog.hazards {
        cursor = cursor.saturating_add(def.weight);
        if roll < cursor {
            return ctx.permits(def.kind).then_some(def.kind);
        }
    }
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::SeedableRng;
    use rand::rngs::SmallRng;
    use rand::rngs::mock::StepRng;
    use std::collections::HashMap;

    fn permissive_ctx() -> HazardContext {
        HazardContext::from_disruptions(&Disruptions::default(), 6)
    }

    fn single_entry_catalog(kind: HazardKind) -> HazardCatalog {
        HazardCatalog {
            roll_budget: 10,
            hazards: vec![HazardDef { kind, weight: 10 }],
        }
    }

    #[test]
    fn static_catalog_covers_every_hazard_in_order() {
        let catalog = catalog();
        let kinds: Vec<HazardKind> = catalog.hazards.iter().map(|def| def.kind).collect();
        assert_eq!(
            kinds,
            vec![
                HazardKind::ToolBreak,
                HazardKind::Distraction,
                HazardKind::BossPressure,
                HazardKind::Norms,
                HazardKind::TunnelVision,
                HazardKind::ShiftChange,
                HazardKind::StressSpike,
            ]
        );
        let total: u32 = catalog.hazards.iter().map(|def| def.weight).sum();
        assert!(total <= catalog.roll_budget, "weights exceed roll budget");
    }

    #[test]
    fn catalog_defaults_weight_when_missing() {
        let json = r#"{ "hazards": [ { "kind": "tool_break" } ] }"#;
        let catalog: HazardCatalog = serde_json::from_str(json).expect("parse catalog");
        assert_eq!(catalog.roll_budget, HAZARD_ROLL_BUDGET);
        let def = catalog.hazards.first().expect("expected hazard");
        assert_eq!(def.weight, 1);
    }

    #[test]
    fn zero_stream_selects_first_table_entry() {
        let mut rng = StepRng::new(0, 0);
        let picked = roll_hazard(catalog(), 1.0, &permissive_ctx(), &mut rng);
        assert_eq!(picked, Some(HazardKind::ToolBreak));
    }

    #[test]
    fn midpoint_stream_lands_in_quiet_remainder() {
        // 0x8000_0000 maps to roll 50, past the 34 points of table weight.
        let mut rng = StepRng::new(0x8000_0000, 0);
        let picked = roll_hazard(catalog(), 1.0, &permissive_ctx(), &mut rng);
        assert_eq!(picked, None);
    }

    #[test]
    fn precondition_veto_consumes_the_draw() {
        let catalog = single_entry_catalog(HazardKind::ToolBreak);
        let ctx = HazardContext {
            tool_broken: true,
            ..permissive_ctx()
        };
        let mut rng = StepRng::new(0, 0);
        assert_eq!(roll_hazard(&catalog, 1.0, &ctx, &mut rng), None);
    }

    #[test]
    fn shift_change_requires_bolts() {
        let catalog = single_entry_catalog(HazardKind::ShiftChange);
        let ctx = HazardContext {
            bolts_present: false,
            ..permissive_ctx()
        };
        let mut rng = StepRng::new(0, 0);
        assert_eq!(roll_hazard(&catalog, 1.0, &ctx, &mut rng), None);

        let ctx = permissive_ctx();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(
            roll_hazard(&catalog, 1.0, &ctx, &mut rng),
            Some(HazardKind::ShiftChange)
        );
    }

    #[test]
    fn zero_chance_never_rolls() {
        let mut rng = StepRng::new(0, 0);
        assert_eq!(roll_hazard(catalog(), 0.0, &permissive_ctx(), &mut rng), None);
    }

    #[test]
    fn empty_catalog_produces_no_events() {
        let catalog = HazardCatalog::default();
        let mut rng = StepRng::new(0, 0);
        assert_eq!(roll_hazard(&catalog, 1.0, &permissive_ctx(), &mut rng), None);
    }

    #[test]
    fn full_sweep_hits_every_hazard_and_quiet_draws() {
        let mut rng = SmallRng::seed_from_u64(0xD12);
        let ctx = permissive_ctx();
        let mut seen: HashMap<HazardKind, u32> = HashMap::new();
        let mut quiet = 0_u32;
        for _ in 0..10_000 {
            match roll_hazard(catalog(), 1.0, &ctx, &mut rng) {
                Some(kind) => *seen.entry(kind).or_default() += 1,
                None => quiet += 1,
            }
        }
        assert_eq!(seen.len(), 7, "every hazard family should fire");
        assert!(quiet > 5_000, "quiet remainder should dominate the table");
    }
}
