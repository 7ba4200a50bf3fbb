//! rf-win: evaluate landed grids from the command line
//!
//! Usage:
//!   rf-win eval --request spin.json [--config game.yaml]
//!   rf-win batch --grids grids.jsonl --bet 1.0 [--config game.yaml]
//!   rf-win paytable [--config game.yaml]

use std::fs;
use std::io::{BufRead, BufReader};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result, bail};
use clap::{Parser, Subcommand};

use rf_win_eval::{
    Credits, EngineConfig, Grid, SessionStats, SpinEngine, SpinRequest, WinTierKind,
    evaluate_request_with,
};

#[derive(Parser)]
#[command(name = "rf-win", about = "Slot win evaluation")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate one spin request and print the result as JSON
    Eval {
        /// Request file: {"grid": [[...] x5], "bet_multiplier": 1.0}
        #[arg(short, long)]
        request: PathBuf,
        /// Game configuration (JSON or YAML)
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Evaluate one grid per line and print session statistics
    Batch {
        /// JSON lines file, one reel-major grid per line
        #[arg(short, long)]
        grids: PathBuf,
        /// Bet per line
        #[arg(short, long, default_value_t = 1.0)]
        bet: f64,
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
    /// Print the paytable and paylines
    Paytable {
        #[arg(short, long)]
        config: Option<PathBuf>,
    },
}

fn main() -> Result<()> {
    env_logger::init();
    let cli = Cli::parse();

    match cli.command {
        Commands::Eval { request, config } => eval_request(&request, config.as_deref()),
        Commands::Batch { grids, bet, config } => {
            let engine = SpinEngine::new(load_config(config.as_deref())?);
            run_batch(&engine, &grids, bet)
        }
        Commands::Paytable { config } => {
            print_paytable(&load_config(config.as_deref())?);
            Ok(())
        }
    }
}

fn load_config(path: Option<&Path>) -> Result<EngineConfig> {
    match path {
        Some(path) => EngineConfig::from_file(path)
            .with_context(|| format!("Failed to load config {}", path.display())),
        None => Ok(EngineConfig::standard()),
    }
}

fn eval_request(path: &Path, config: Option<&Path>) -> Result<()> {
    let text = fs::read_to_string(path)
        .with_context(|| format!("Failed to read {}", path.display()))?;
    let request: SpinRequest = serde_json::from_str(&text).context("Malformed spin request")?;
    let result = evaluate_request_with(&request, config)?;

    println!("{}", serde_json::to_string_pretty(&result)?);
    Ok(())
}

/// Parse one JSON lines entry into a grid. Blank lines yield `None`.
fn parse_grid_line(line: &str) -> Result<Option<Grid>> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let reels: Vec<Vec<String>> = serde_json::from_str(line)?;
    Ok(Some(Grid::from_wire(&reels)?))
}

fn run_batch(engine: &SpinEngine, path: &Path, bet: f64) -> Result<()> {
    let bet = Credits::try_from_f64(bet)?;
    let file = fs::File::open(path)
        .with_context(|| format!("Failed to open {}", path.display()))?;

    let mut stats = SessionStats::new();
    for (index, line) in BufReader::new(file).lines().enumerate() {
        let line = line?;
        let Some(grid) = parse_grid_line(&line)
            .with_context(|| format!("{}:{}", path.display(), index + 1))?
        else {
            continue;
        };
        stats.record(&engine.evaluate(&grid, bet)?);
    }

    if stats.total_spins == 0 {
        bail!("No grids in {}", path.display());
    }
    log::info!("Evaluated {} grids from {}", stats.total_spins, path.display());

    print_report(&stats);
    Ok(())
}

fn print_report(stats: &SessionStats) {
    println!("Spins:          {}", stats.total_spins);
    println!("Total staked:   {}", stats.total_staked);
    println!("Total paid:     {}", stats.total_paid);
    println!("RTP:            {:.4}%", stats.rtp());
    println!("Hit frequency:  {:.4}%", stats.hit_frequency());
    println!("Average win:    {:.2}", stats.average_win());
    println!("Max win:        {}", stats.max_win);
    println!("Std deviation:  {:.4}", stats.std_dev());

    println!("\nTiers:");
    for (tier, count) in &stats.tier_counts {
        println!("  {:<14}{}", tier.display_name(), count);
    }

    println!("\nContributions:");
    for row in stats.breakdown() {
        println!("  {:<32}{:>14}  {:>8.4}%", row.combo, row.paid.to_string(), row.rtp_percent);
    }
}

fn print_paytable(config: &EngineConfig) {
    let registry = config.registry();
    println!("{}\n", config.name());

    println!("Line pays (x bet per line, min run {}):", registry.min_run);
    for (symbol, pays) in &registry.line_pays {
        let entries: Vec<String> = pays.iter().map(|(run, pay)| format!("{run}:{pay}")).collect();
        println!("  {:<16}{}", registry.display_name(*symbol), entries.join("  "));
    }

    if !registry.scatter_rules.is_empty() {
        println!("\nScatter pays (x total stake):");
        for rule in &registry.scatter_rules {
            let entries: Vec<String> = rule.pays.iter().map(|(n, pay)| format!("{n}:{pay}")).collect();
            println!("  {:<16}{}", registry.display_name(rule.symbol), entries.join("  "));
        }
    }

    println!("\nWild: {}", registry.display_name(registry.wild));
    match registry.premium_symbol() {
        Some(premium) => println!("All-wild lines pay as: {}", registry.display_name(premium)),
        None => println!("All-wild lines pay nothing"),
    }

    println!("\nPaylines:");
    for line in config.paylines() {
        let rows: Vec<String> = line.rows.iter().map(|r| r.to_string()).collect();
        println!("  {:>2}  [{}]", line.number, rows.join(", "));
    }

    println!("\nTiers (total win / total stake):");
    for threshold in &config.tiers().thresholds {
        println!("  >= {:<6}{}", threshold.multiplier, threshold.tier.display_name());
    }

    println!(
        "  {} and {} override magnitude",
        WinTierKind::Wild.display_name(),
        WinTierKind::SpecialPair.display_name()
    );
}
