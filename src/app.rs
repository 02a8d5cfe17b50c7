//! Top-level application orchestration.
//!
//! `src/main.rs` is intentionally tiny; this module is the "real main" that:
//! - loads `.env` defaults and parses CLI arguments
//! - runs stability selection or the simulator
//! - prints reports
//! - writes optional exports

use std::str::FromStr;

use clap::Parser;

use crate::cli::{Command, SearchArgs, ShowArgs, SimulateArgs};
use crate::data::{SimulationConfig, simulate_linear_sem};
use crate::domain::{DEFAULT_SEED, StabilityConfig, default_parallelism};
use crate::error::AppError;

pub mod pipeline;

const ENV_SEED: &str = "CSTAR_SEED";
const ENV_PARALLELISM: &str = "CSTAR_PARALLELISM";

/// Entry point for the `cstar` binary.
pub fn run() -> Result<(), AppError> {
    dotenvy::dotenv().ok();
    let cli = crate::cli::Cli::parse();

    match cli.command {
        Command::Search(args) => handle_search(args),
        Command::Simulate(args) => handle_simulate(args),
        Command::Show(args) => handle_show(args),
    }
}

fn handle_search(args: SearchArgs) -> Result<(), AppError> {
    crate::logging::init(args.verbose);

    let config = stability_config_from_args(&args)?;
    let delimiter = parse_delimiter(&args.delimiter)?;
    let run = pipeline::run_search(&args.data, delimiter, &config, args.max_blanket_size)?;

    println!(
        "Loaded {} rows x {} variables from {}",
        run.data.num_rows(),
        run.data.num_columns(),
        args.data.display()
    );
    println!("{}", crate::report::format_run_summary(&run.result, &config));
    println!("{}", crate::report::format_frequency_table(&run.result, args.top));

    if let Some(path) = &args.export {
        crate::io::write_result_json(path, &run.result, &config)?;
        println!("Wrote {}", path.display());
    }

    Ok(())
}

fn handle_simulate(args: SimulateArgs) -> Result<(), AppError> {
    crate::logging::init(false);

    let config = SimulationConfig {
        num_variables: args.variables,
        num_rows: args.rows,
        edge_probability: args.edge_probability,
        seed: args.seed,
        ..SimulationConfig::default()
    };
    let sim = simulate_linear_sem(&config)?;
    crate::io::write_dataset(&args.out, &sim.dataset)?;

    println!(
        "Wrote {} rows x {} variables to {}",
        sim.dataset.num_rows(),
        sim.dataset.num_columns(),
        args.out.display()
    );
    println!("{}", sim.true_graph);
    println!("{}", crate::report::format_true_blankets(&sim.true_graph));
    Ok(())
}

fn handle_show(args: ShowArgs) -> Result<(), AppError> {
    let file = crate::io::read_result_json(&args.result)?;

    let result = match args.pi_threshold {
        Some(pi) => file.result.select_at(pi)?,
        None => file.result,
    };

    println!("Generated: {}", file.generated.to_rfc3339());
    println!("{}", crate::report::format_run_summary(&result, &file.config));
    println!("{}", crate::report::format_frequency_table(&result, args.top));
    Ok(())
}

/// Build a validated `StabilityConfig` from flags, falling back to `.env` /
/// environment values for seed and parallelism.
pub fn stability_config_from_args(args: &SearchArgs) -> Result<StabilityConfig, AppError> {
    let seed = match args.seed {
        Some(seed) => seed,
        None => env_value::<u64>(ENV_SEED)?.unwrap_or(DEFAULT_SEED),
    };
    let parallelism = match args.parallelism {
        Some(p) => p,
        None => env_value::<usize>(ENV_PARALLELISM)?.unwrap_or_else(default_parallelism),
    };

    let config = StabilityConfig {
        percent_subsample_size: args.percent_subsample_size,
        num_subsamples: args.num_subsamples,
        pi_threshold: args.pi_threshold,
        target_name: args.target.clone(),
        penalty_discount: args.penalty_discount,
        verbose: args.verbose,
        seed,
        parallelism,
    };
    config.validate()?;
    Ok(config)
}

fn env_value<T: FromStr>(key: &str) -> Result<Option<T>, AppError> {
    match std::env::var(key) {
        Ok(raw) => raw
            .trim()
            .parse::<T>()
            .map(Some)
            .map_err(|_| AppError::config(format!("Invalid {key}='{raw}' in environment."))),
        Err(_) => Ok(None),
    }
}

/// Accepts a single ASCII character, or `\t` / `tab` for tab.
pub fn parse_delimiter(raw: &str) -> Result<u8, AppError> {
    match raw {
        "\\t" | "tab" | "\t" => Ok(b'\t'),
        s if s.len() == 1 && s.is_ascii() => Ok(s.as_bytes()[0]),
        other => Err(AppError::config(format!(
            "Delimiter must be a single ASCII character, got '{other}'."
        ))),
    }
}
