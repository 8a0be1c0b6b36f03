//! Aggregation and rendering of scenario results.
use anyhow::Result;
use colored::Colorize;
use serde::Serialize;
use std::collections::BTreeMap;

use crate::policy::PlayerPolicy;
use crate::scenario::{ShiftRecord, Variant};

#[derive(Debug, Clone, Serialize)]
pub struct ScenarioAggregate {
    pub scenario: String,
    pub variant: String,
    pub runs: usize,
    pub wins: usize,
    pub win_rate: f64,
    pub endings: BTreeMap<String, usize>,
    pub mean_seconds: f64,
    pub mean_hazards: f64,
}

#[must_use]
pub fn aggregate(
    policy: PlayerPolicy,
    variant: Variant,
    records: &[ShiftRecord],
) -> ScenarioAggregate {
    let runs = records.len();
    let wins = records
        .iter()
        .filter(|record| record.ending.is_win())
        .count();
    let mut endings: BTreeMap<String, usize> = BTreeMap::new();
    for record in records {
        *endings.entry(record.ending.to_string()).or_default() += 1;
    }
    let denom = if runs == 0 { 1.0 } else { runs as f64 };
    ScenarioAggregate {
        scenario: policy.key().to_string(),
        variant: variant.key().to_string(),
        runs,
        wins,
        win_rate: wins as f64 / denom,
        endings,
        mean_seconds: records
            .iter()
            .map(|record| f64::from(record.seconds_used))
            .sum::<f64>()
            / denom,
        mean_hazards: records
            .iter()
            .map(|record| f64::from(record.hazards_weathered))
            .sum::<f64>()
            / denom,
    }
}

/// Minimum acceptable win rate per scenario, when one is defined.
#[must_use]
pub fn min_win_rate(scenario: &str) -> Option<f64> {
    match scenario {
        "diligent" => Some(0.75),
        _ => None,
    }
}

/// Collect target violations across all aggregates.
#[must_use]
pub fn validate_targets(aggregates: &[ScenarioAggregate]) -> Vec<String> {
    let mut violations = Vec::new();
    for agg in aggregates {
        if let Some(min) = min_win_rate(&agg.scenario)
            && agg.win_rate < min
        {
            violations.push(format!(
                "{} ({}): win rate {:.2} below target {min:.2}",
                agg.scenario, agg.variant, agg.win_rate
            ));
        }
    }
    violations
}

pub fn render_console(aggregates: &[ScenarioAggregate]) {
    for agg in aggregates {
        let rate = format!("{:5.1}%", agg.win_rate * 100.0);
        let rate = if min_win_rate(&agg.scenario).is_some_and(|min| agg.win_rate < min) {
            rate.red().bold()
        } else {
            rate.green()
        };
        println!(
            "{} [{}] {} wins {}/{} | avg {:.1}s, {:.1} hazards",
            agg.scenario.bold(),
            agg.variant,
            rate,
            agg.wins,
            agg.runs,
            agg.mean_seconds,
            agg.mean_hazards
        );
        for (ending, count) in &agg.endings {
            println!("    {ending:<14} {count}");
        }
    }
}

/// Render all aggregates as a pretty JSON document.
///
/// # Errors
///
/// Returns an error when serialization fails.
pub fn render_json(aggregates: &[ScenarioAggregate]) -> Result<String> {
    Ok(serde_json::to_string_pretty(aggregates)?)
}

#[cfg(test)]
mod tests {
    use super::*;
    use havoc_game::Ending;

    fn record(ending: Ending) -> ShiftRecord {
        ShiftRecord {
            seed: 1,
            ending,
            steps: 100,
            seconds_used: 30,
            bolts_fixed: 6,
            hazards_weathered: 2,
        }
    }

    #[test]
    fn aggregate_counts_wins_and_endings() {
        let records = vec![
            record(Ending::Airworthy),
            record(Ending::Airworthy),
            record(Ending::Fatigue),
            record(Ending::Timeout),
        ];
        let agg = aggregate(PlayerPolicy::Diligent, Variant::Realtime, &records);
        assert_eq!(agg.runs, 4);
        assert_eq!(agg.wins, 2);
        assert!((agg.win_rate - 0.5).abs() < f64::EPSILON);
        assert_eq!(agg.endings.get("airworthy"), Some(&2));
        assert_eq!(agg.endings.get("fatigue"), Some(&1));
    }

    #[test]
    fn diligent_below_target_is_flagged() {
        let records = vec![record(Ending::Fatigue)];
        let agg = aggregate(PlayerPolicy::Diligent, Variant::Realtime, &records);
        let violations = validate_targets(&[agg]);
        assert_eq!(violations.len(), 1);
    }

    #[test]
    fn complacent_runs_have_no_target() {
        let records = vec![record(Ending::Fatigue)];
        let agg = aggregate(PlayerPolicy::Complacent, Variant::Realtime, &records);
        assert!(validate_targets(&[agg]).is_empty());
    }

    #[test]
    fn json_report_round_trips() {
        let agg = aggregate(
            PlayerPolicy::Careless,
            Variant::TurnBased,
            &[record(Ending::Norms)],
        );
        let text = render_json(&[agg]).unwrap();
        assert!(text.contains("\"careless\""));
        assert!(text.contains("\"norms\""));
    }
}
