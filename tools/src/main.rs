//! runway-runner: headless runner for the startup metric pipeline.
//!
//! Usage:
//!   runway-runner derive   --input raw.csv --output enriched.csv [--config metrics.json] [--scenario worst] [--summary-json]
//!   runway-runner generate --rows 10000 [--seed 42] --output raw.csv [--profile profile.json]
//!   runway-runner project  --input raw.csv --row 3 [--months 12] [--config metrics.json] [--scenario best]

use anyhow::{anyhow, bail, Context, Result};
use runway_core::{
    dataset::write_raw_inputs,
    projection::{project_cash, DEFAULT_PROJECTION_MONTHS},
    summary::DatasetSummary,
    synthetic::{generate, GeneratorProfile},
    Dataset, MetricPipeline, MetricsConfig, PipelineError, Scenario,
};
use std::{env, fs::File, io::BufWriter};

fn main() -> Result<()> {
    env_logger::init();

    let args: Vec<String> = env::args().collect();
    match args.get(1).map(String::as_str) {
        Some("derive") => run_derive(&args),
        Some("generate") => run_generate(&args),
        Some("project") => run_project(&args),
        Some(other) => bail!("Unknown command '{other}' (expected derive, generate or project)"),
        None => bail!("Missing command (expected derive, generate or project)"),
    }
}

fn run_derive(args: &[String]) -> Result<()> {
    let input = required_arg(args, "--input")?;
    let output = required_arg(args, "--output")?;
    let json = args.iter().any(|a| a == "--summary-json");
    let pipeline = build_pipeline(args)?;

    let dataset =
        Dataset::from_path(input).with_context(|| format!("Cannot load dataset {input}"))?;
    let enriched = pipeline
        .run_dataset(dataset)
        .with_context(|| format!("Cannot derive metrics for {input}"))?;
    enriched
        .write_path(output)
        .with_context(|| format!("Cannot write {output}"))?;

    let summary = DatasetSummary::from_records(&enriched.records(), enriched.risk_range);
    if json {
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!("Runway Twin: metric derivation");
        println!("  input:     {input}");
        println!("  output:    {output}");
        println!("  scenario:  {}", pipeline.scenario());
        println!();
        print_summary(&summary);
    }
    Ok(())
}

fn run_generate(args: &[String]) -> Result<()> {
    let output = required_arg(args, "--output")?;
    let rows = parse_arg(args, "--rows", 10_000usize)?;
    let seed = parse_arg(args, "--seed", 42u64)?;
    let profile = match optional_arg(args, "--profile") {
        Some(path) => {
            let content = std::fs::read_to_string(path)
                .with_context(|| format!("Cannot read profile {path}"))?;
            serde_json::from_str::<GeneratorProfile>(&content)
                .with_context(|| format!("Cannot parse profile {path}"))?
        }
        None => GeneratorProfile::default(),
    };

    let inputs = generate(seed, rows, &profile)?;
    let file = File::create(output).with_context(|| format!("Cannot create {output}"))?;
    write_raw_inputs(BufWriter::new(file), &inputs)?;

    println!("Generated {rows} rows (seed {seed}) -> {output}");
    Ok(())
}

fn run_project(args: &[String]) -> Result<()> {
    let input = required_arg(args, "--input")?;
    let row = parse_arg(args, "--row", 1usize)?;
    let months = parse_arg(args, "--months", DEFAULT_PROJECTION_MONTHS)?;
    let pipeline = build_pipeline(args)?;

    let dataset =
        Dataset::from_path(input).with_context(|| format!("Cannot load dataset {input}"))?;
    let rows = dataset.len();
    let raw = row
        .checked_sub(1)
        .and_then(|i| dataset.rows().get(i))
        .ok_or(PipelineError::RowOutOfRange { row, rows })?;

    let (stressed, local) = pipeline.derive_local(&raw.inputs);
    let projection = project_cash(&local, &stressed, months);

    println!("=== CASH PROJECTION (row {row}, scenario {}) ===", pipeline.scenario());
    for p in &projection.points {
        println!(
            "  M{:<3} | Cash: ${:>14.0} | Revenue: ${:>12.0} | Expenses: ${:>12.0}",
            p.month, p.cash, p.revenue, p.expenses
        );
    }
    match projection.break_even_month {
        Some(m) => println!("  break-even:  month {m}"),
        None => println!("  break-even:  not within {months} months"),
    }
    match projection.cash_out_month {
        Some(m) => println!("  cash out:    month {m}"),
        None => println!("  cash out:    not within {months} months"),
    }
    Ok(())
}

fn build_pipeline(args: &[String]) -> Result<MetricPipeline> {
    let config = match optional_arg(args, "--config") {
        Some(path) => {
            MetricsConfig::load(path).with_context(|| format!("Cannot load config {path}"))?
        }
        None => MetricsConfig::default(),
    };
    let scenario: Scenario = optional_arg(args, "--scenario")
        .map(str::parse::<Scenario>)
        .transpose()?
        .unwrap_or_default();
    Ok(MetricPipeline::new(config)?.with_scenario(scenario))
}

fn print_summary(s: &DatasetSummary) {
    println!("=== RUN SUMMARY ===");
    println!("  rows:             {}", s.rows);
    println!("  break-even:       {}", s.break_even_achieved);
    println!("  collapse <12mo:   {}", s.collapse_within_12_months);
    println!("  safe/warn/crit:   {}/{}/{}", s.safe, s.warning, s.critical);
    if let Some(v) = s.mean_survival_probability {
        println!("  mean survival:    {v:.3}");
    }
    if let (Some(mean), Some(median)) = (s.mean_runway_months, s.median_runway_months) {
        println!("  runway mean/med:  {mean:.1} / {median:.1} months");
    }
    if let Some(r) = s.raw_risk_range {
        println!("  raw risk range:   [{:.4}, {:.4}]", r.min, r.max);
    }
    if s.degenerate_risk_range {
        println!("  (degenerate risk range: every normalized score set to the configured default)");
    }
}

fn optional_arg<'a>(args: &'a [String], flag: &str) -> Option<&'a str> {
    args.windows(2)
        .find(|w| w[0] == flag)
        .map(|w| w[1].as_str())
}

fn required_arg<'a>(args: &'a [String], flag: &str) -> Result<&'a str> {
    optional_arg(args, flag).with_context(|| format!("Missing required argument {flag}"))
}

/// `default` when the flag is absent; an error when its value does not parse.
fn parse_arg<T>(args: &[String], flag: &str, default: T) -> Result<T>
where
    T: std::str::FromStr,
    T::Err: std::fmt::Display,
{
    match optional_arg(args, flag) {
        Some(value) => value
            .parse()
            .map_err(|e| anyhow!("Invalid value '{value}' for {flag}: {e}")),
        None => Ok(default),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn absent_flag_takes_default() {
        let a = args(&["runway-runner", "generate", "--output", "raw.csv"]);
        assert_eq!(parse_arg(&a, "--rows", 10_000usize).unwrap(), 10_000);
    }

    #[test]
    fn present_flag_is_parsed() {
        let a = args(&["runway-runner", "project", "--row", "3", "--months", "24"]);
        assert_eq!(parse_arg(&a, "--row", 1usize).unwrap(), 3);
        assert_eq!(parse_arg(&a, "--months", 12usize).unwrap(), 24);
    }

    #[test]
    fn unparseable_value_is_an_error() {
        let a = args(&["runway-runner", "generate", "--rows", "1O000", "--seed", "-4"]);
        let err = parse_arg(&a, "--rows", 10_000usize).unwrap_err();
        assert!(err.to_string().contains("1O000"), "{err}");
        assert!(parse_arg(&a, "--seed", 42u64).is_err());

        let a = args(&["runway-runner", "project", "--row", "x"]);
        assert!(parse_arg(&a, "--row", 1usize).is_err());
    }
}
