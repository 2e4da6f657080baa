//! `augur` — run one invocation, inspect mined rules, or print engine status.
//!
//! Runs without an async runtime: the HTTP adapters and the store's write
//! path block and must not be called from inside one.

use std::path::{Path, PathBuf};
use std::sync::Arc;

use anyhow::{Context, Result};
use chrono::Utc;
use clap::{Parser, Subcommand};
use serde_json::json;

use augur_core::config::AugurConfig;
use augur_core::constants::VERSION;
use augur_core::models::Mode;
use augur_core::traits::IOutcomeStore;
use augur_engine::tracing_setup::init_tracing;
use augur_engine::AugurEngine;
use augur_feed::{HttpAdjudicator, HttpFeed};
use augur_mining::{FeatureExtractor, RuleMiner};
use augur_storage::SqliteStore;

#[derive(Parser)]
#[command(name = "augur")]
#[command(version, about = "Rule-mining forecaster for binary period outcomes", long_about = None)]
struct Cli {
    /// TOML configuration file. Defaults apply when omitted.
    #[arg(short, long, global = true)]
    config: Option<PathBuf>,

    /// Override `storage.db_path`.
    #[arg(long, global = true)]
    db: Option<PathBuf>,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Fetch, resolve, retrain, backfill and forecast once; print the result as JSON.
    Run,
    /// Mine the stored history for one mode and print the ranked rules.
    Mine {
        #[arg(short, long, default_value = "size")]
        mode: Mode,
    },
    /// Print the active formula set and its accuracy per mode.
    Status,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    let mut config = match &cli.config {
        Some(path) => AugurConfig::load(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => AugurConfig::default(),
    };
    if let Some(db) = &cli.db {
        config.storage.db_path = db.display().to_string();
    }
    init_tracing(&config.observability);

    let store = SqliteStore::open_with(Path::new(&config.storage.db_path), &config.storage)
        .with_context(|| format!("opening store {}", config.storage.db_path))?;
    let store: Arc<dyn IOutcomeStore> = Arc::new(store);

    let output = match cli.command {
        Command::Run => run(&config, store)?,
        Command::Mine { mode } => mine(&config, store.as_ref(), mode)?,
        Command::Status => status(store.as_ref())?,
    };
    println!("{}", serde_json::to_string_pretty(&output)?);
    Ok(())
}

fn run(config: &AugurConfig, store: Arc<dyn IOutcomeStore>) -> Result<serde_json::Value> {
    let feed = HttpFeed::new(&config.feed).context("configuring feed")?;
    let mut engine = AugurEngine::new(config, Box::new(feed), store);
    if config.adjudicator.enabled {
        let adjudicator =
            HttpAdjudicator::new(&config.adjudicator).context("configuring adjudicator")?;
        engine = engine.with_adjudicator(Arc::new(adjudicator));
    }

    let result = engine.invoke();
    Ok(json!({
        "result": result,
        "degradations": engine.degradations().events(),
    }))
}

fn mine(config: &AugurConfig, store: &dyn IOutcomeStore, mode: Mode) -> Result<serde_json::Value> {
    let history = store.all_observations().context("reading history")?;
    let seq = FeatureExtractor::new(&config.mining).extract(&history, mode);
    let set = RuleMiner::new(config.mining.clone()).mine_set(&seq, "inspection", Utc::now())?;
    Ok(json!({
        "mode": mode,
        "sequence_length": set.sequence_length,
        "fingerprint": set.fingerprint,
        "families": RuleMiner::family_breakdown(&set.formulas),
        "formulas": set.formulas,
    }))
}

fn status(store: &dyn IOutcomeStore) -> Result<serde_json::Value> {
    let mut modes = Vec::with_capacity(Mode::ALL.len());
    for mode in Mode::ALL {
        let active = store.active_formula_set(mode)?;
        let pending = store.unresolved_predictions(mode)?;
        modes.push(json!({
            "mode": mode,
            "active_set_id": active.as_ref().map(|s| s.id.clone()),
            "rule_count": active.as_ref().map_or(0, |s| s.len()),
            "mined_at": active.as_ref().map(|s| s.mined_at),
            "counters": active.as_ref().map(|s| s.counters),
            "pending_forecasts": pending.iter().map(|r| json!({
                "period_id": r.period_id,
                "predicted": r.predicted,
                "origin": r.origin,
            })).collect::<Vec<_>>(),
        }));
    }
    Ok(json!({ "version": VERSION, "modes": modes }))
}
