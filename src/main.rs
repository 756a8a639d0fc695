//! # carbon-route CLI
//!
//! Command-line interface for the carbon-route library.
//! Plans a carbon-aware delivery route between two Indian districts.

use std::path::PathBuf;

use anyhow::{Context, Result};
use carbon_route::{
    segregation, Grade, LocationQuery, RouteOptimizer, RouteOutcome, RouterConfig,
};
use clap::Parser;
use log::error;

mod cli;

/// Command-line interface for carbon-route
#[derive(Parser)]
#[command(name = "carbon-route")]
#[command(about = "Carbon-aware delivery route optimizer with live road routing")]
#[command(long_about = "Plans a delivery route from a produce source to a buyer:
  carbon-route Nashik Mumbai                       # Road-routed plan, default load
  carbon-route \"Nashik,Maharashtra\" Pune -q 30     # Medium truck
  carbon-route Delhi Mumbai --offline --explain    # Geometric estimates, solver steps
  carbon-route Delhi Bangalore --json              # Machine-readable output

Locations are `district[,state]`. Unknown districts fall back to the state,
then to the national centroid, with a suggestion on stderr.")]
#[command(version = env!("CARBON_ROUTE_VERSION"))]
struct Cli {
    /// Pickup location: district[,state]
    from: String,

    /// Delivery location: district[,state]
    to: String,

    /// Load quantity; chooses the vehicle class
    #[arg(short, long, default_value_t = 10.0)]
    quantity: f64,

    /// Use geometric estimates only, never query the routing service
    #[arg(long)]
    offline: bool,

    /// Print the result as JSON
    #[arg(long)]
    json: bool,

    /// Show the planned stops without routing
    #[arg(long)]
    dry_run: bool,

    /// Produce quality grade (A, B or C) to include its handling profile
    #[arg(short, long)]
    grade: Option<String>,

    /// Show how the solver built the route
    #[arg(long)]
    explain: bool,

    /// JSON configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Base URL of an OSRM-compatible routing service
    #[arg(long)]
    osrm_url: Option<String>,

    /// Timeout for each routing query, in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Maximum number of intermediate hubs
    #[arg(long)]
    max_hubs: Option<usize>,

    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

impl Cli {
    /// Config file first, then flags on top
    fn router_config(&self) -> Result<RouterConfig> {
        let mut config = match &self.config {
            Some(path) => RouterConfig::from_file(path)
                .with_context(|| format!("loading config {}", path.display()))?,
            None => RouterConfig::default(),
        };

        if let Some(url) = &self.osrm_url {
            config.osrm_base_url = url.clone();
        }
        if let Some(secs) = self.timeout {
            config.request_timeout_ms = secs.saturating_mul(1000);
        }
        if let Some(max_hubs) = self.max_hubs {
            config.max_hubs = max_hubs;
        }
        if self.offline {
            config.offline = true;
        }
        Ok(config)
    }
}

#[tokio::main]
async fn main() {
    if let Err(e) = run().await {
        error!("❌ Error: {e:#}");
        std::process::exit(1);
    }
}

async fn run() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging to stderr
    let level = if cli.verbose { "debug" } else { "warn" };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level))
        .target(env_logger::Target::Stderr)
        .init();

    if cli.verbose {
        eprintln!("🌱 carbon-route v{} starting...", env!("CARBON_ROUTE_VERSION"));
    }

    let grade = cli.grade.as_deref().map(str::parse::<Grade>).transpose()?;
    let config = cli.router_config()?;
    let optimizer = RouteOptimizer::with_config(config)?;

    let from = LocationQuery::parse(&cli.from);
    let to = LocationQuery::parse(&cli.to);

    if cli.dry_run {
        let plan = optimizer.plan(&from, &to)?;
        print!("{}", cli::report::PlanReport(&plan));
        return Ok(());
    }

    let outcome = if optimizer.config().offline {
        optimizer.optimize_offline_detailed(&from, &to, cli.quantity)?
    } else {
        route_with_progress(&optimizer, &from, &to, cli.quantity, cli.json).await?
    };

    let grade = grade.map(segregation);

    if cli.json {
        let mut value = serde_json::to_value(&outcome)?;
        if let Some(grade) = &grade {
            value["grade"] = serde_json::to_value(grade)?;
        }
        if !cli.explain {
            if let Some(obj) = value.as_object_mut() {
                obj.remove("steps");
            }
        }
        println!("{}", serde_json::to_string_pretty(&value)?);
    } else {
        let report = cli::report::RouteReport {
            route: &outcome.route,
            metrics: &outcome.metrics,
            grade: grade.as_ref(),
            steps: cli.explain.then_some(outcome.steps.as_slice()),
        };
        print!("{report}");
    }

    Ok(())
}

/// Live routing with a progress bar on stderr
async fn route_with_progress(
    optimizer: &RouteOptimizer,
    from: &LocationQuery,
    to: &LocationQuery,
    quantity: f64,
    quiet: bool,
) -> Result<RouteOutcome> {
    let progress = if quiet {
        None
    } else {
        Some(cli::ProgressManager::new(&format!(
            "🌐 Routing {} → {} via {}",
            from.district,
            to.district,
            optimizer.config().osrm_base_url
        )))
    };

    let outcome = optimizer
        .optimize_detailed(from, to, quantity, progress.as_ref().map(|p| p.callback()))
        .await;

    if let Some(progress) = &progress {
        progress.finish();
    }

    Ok(outcome?)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_flags_override_defaults() {
        let cli = Cli::parse_from([
            "carbon-route",
            "Nashik,Maharashtra",
            "Mumbai",
            "--osrm-url",
            "http://localhost:5000",
            "--timeout",
            "2",
            "--max-hubs",
            "3",
            "--offline",
        ]);
        let config = cli.router_config().unwrap();
        assert_eq!(config.osrm_base_url, "http://localhost:5000");
        assert_eq!(config.request_timeout_ms, 2000);
        assert_eq!(config.max_hubs, 3);
        assert!(config.offline);
        assert_eq!(cli.quantity, 10.0);
    }

    #[test]
    fn test_config_file_then_flags() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("route.json");
        std::fs::write(&path, r#"{"max_hubs": 1, "profile": "truck"}"#).unwrap();

        let cli = Cli::parse_from([
            "carbon-route",
            "Delhi",
            "Mumbai",
            "--config",
            path.to_str().unwrap(),
            "--max-hubs",
            "4",
        ]);
        let config = cli.router_config().unwrap();
        assert_eq!(config.profile, "truck");
        assert_eq!(config.max_hubs, 4);
    }

    #[test]
    fn test_grade_and_quantity_flags() {
        let cli = Cli::parse_from(["carbon-route", "Delhi", "Mumbai", "-q", "60", "-g", "b", "--explain"]);
        assert_eq!(cli.quantity, 60.0);
        assert_eq!(cli.grade.as_deref(), Some("b"));
        assert!(cli.explain);
    }
}
