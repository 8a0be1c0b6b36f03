mod policy;
mod report;
mod scenario;

use anyhow::{Context, Result, bail};
use clap::Parser;
use colored::Colorize;

use policy::PlayerPolicy;
use report::{aggregate, render_console, render_json, validate_targets};
use scenario::{Variant, run_scenario};

const ALL_POLICIES: [PlayerPolicy; 3] = [
    PlayerPolicy::Diligent,
    PlayerPolicy::Complacent,
    PlayerPolicy::Careless,
];

#[derive(Debug, Parser)]
#[command(name = "havoc-tester", version = "0.1.0")]
#[command(about = "Automated logic QA for the Hangar Havoc core engine")]
struct Args {
    /// Scenarios to run (comma-separated, or "all")
    #[arg(long, default_value = "diligent")]
    scenarios: String,

    /// List all available scenarios and exit
    #[arg(long)]
    list_scenarios: bool,

    /// Seeds to run (comma-separated)
    #[arg(long, default_value = "1337")]
    seeds: String,

    /// Number of iterations per scenario and seed
    #[arg(long, default_value_t = 10)]
    iterations: u64,

    /// Tuning preset driving the sessions
    #[arg(long, value_enum, default_value_t = Variant::Realtime)]
    variant: Variant,

    /// Output report format
    #[arg(long, default_value = "console")]
    #[arg(value_parser = ["json", "console"])]
    report: String,
}

fn describe(policy: PlayerPolicy) -> &'static str {
    match policy {
        PlayerPolicy::Diligent => "clears every disruption, rests ahead of the fatigue limit",
        PlayerPolicy::Complacent => "only tightens; never rests or clears anything",
        PlayerPolicy::Careless => "takes the losing choice on every popup",
    }
}

fn parse_scenarios(input: &str) -> Result<Vec<PlayerPolicy>> {
    if input.trim().eq_ignore_ascii_case("all") {
        return Ok(ALL_POLICIES.to_vec());
    }
    let mut policies = Vec::new();
    for token in split_csv(input) {
        let policy = ALL_POLICIES
            .iter()
            .find(|policy| policy.key() == token)
            .copied();
        match policy {
            Some(policy) => policies.push(policy),
            None => bail!("unknown scenario '{token}' (try --list-scenarios)"),
        }
    }
    if policies.is_empty() {
        bail!("no scenarios selected");
    }
    Ok(policies)
}

fn parse_seeds(input: &str) -> Result<Vec<u64>> {
    let seeds: Vec<u64> = split_csv(input)
        .iter()
        .map(|token| {
            token
                .parse::<u64>()
                .with_context(|| format!("invalid seed '{token}'"))
        })
        .collect::<Result<_>>()?;
    if seeds.is_empty() {
        bail!("no seeds provided");
    }
    Ok(seeds)
}

fn split_csv(input: &str) -> Vec<String> {
    input
        .split(',')
        .map(str::trim)
        .filter(|token| !token.is_empty())
        .map(str::to_string)
        .collect()
}

fn main() -> Result<()> {
    env_logger::init();
    let args = Args::parse();

    if args.list_scenarios {
        for policy in ALL_POLICIES {
            println!("{:<12} {}", policy.key().bold(), describe(policy));
        }
        return Ok(());
    }

    let policies = parse_scenarios(&args.scenarios)?;
    let seeds = parse_seeds(&args.seeds)?;

    let mut aggregates = Vec::new();
    for policy in policies {
        log::info!(
            "running scenario {} on {} seed(s), {} iteration(s)",
            policy.key(),
            seeds.len(),
            args.iterations
        );
        let records = run_scenario(policy, args.variant, &seeds, args.iterations)?;
        aggregates.push(aggregate(policy, args.variant, &records));
    }

    match args.report.as_str() {
        "json" => println!("{}", render_json(&aggregates)?),
        _ => render_console(&aggregates),
    }

    let violations = validate_targets(&aggregates);
    if !violations.is_empty() {
        for violation in &violations {
            eprintln!("{}", violation.red());
        }
        bail!("{} playability target(s) violated", violations.len());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn split_csv_trims_and_drops_empties() {
        assert_eq!(split_csv(" a, b ,,c "), vec!["a", "b", "c"]);
        assert!(split_csv(" , ").is_empty());
    }

    #[test]
    fn parse_scenarios_accepts_all_keyword() {
        let policies = parse_scenarios("ALL").unwrap();
        assert_eq!(policies.len(), 3);
    }

    #[test]
    fn parse_scenarios_rejects_unknown_names() {
        assert!(parse_scenarios("diligent,bogus").is_err());
    }

    #[test]
    fn parse_seeds_reads_numbers() {
        assert_eq!(parse_seeds("1, 42").unwrap(), vec![1, 42]);
        assert!(parse_seeds("nope").is_err());
    }
}
