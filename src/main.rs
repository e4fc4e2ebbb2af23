use anyhow::Context;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use clinic_core::config::{now_from_env_value, seed_path_from_env_value};
use clinic_core::{ClinicStore, CoreConfig, DashboardSummary, NOW_ENV, SEED_FILE_ENV};

/// Main entry point for the clinic dashboard
///
/// Loads the clinic snapshot once and prints the landing-page summary as JSON on stdout.
///
/// # Environment Variables
/// - `CLINIC_SEED_FILE`: YAML seed dataset (default: the built-in data)
/// - `CLINIC_NOW`: pin "now" to a date or date-time (default: the system clock)
/// - `RUST_LOG`: log filter; logs go to stderr
///
/// # Returns
/// * `Ok(())` - If the snapshot loads and the summary is written
/// * `Err(anyhow::Error)` - If configuration or the seed dataset is invalid
fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("clinic_core=info".parse()?),
        )
        .with(tracing_subscriber::fmt::layer().with_writer(std::io::stderr))
        .init();

    let seed_path = seed_path_from_env_value(std::env::var(SEED_FILE_ENV).ok());
    let fixed_now = now_from_env_value(std::env::var(NOW_ENV).ok())
        .with_context(|| format!("{NOW_ENV} is not a valid date"))?;
    let cfg = CoreConfig::new(seed_path, fixed_now)?;

    match cfg.seed_path() {
        Some(path) => tracing::info!("++ Loading clinic seed from {}", path.display()),
        None => tracing::info!("++ Loading built-in clinic seed"),
    }

    let store = ClinicStore::from_config(&cfg).context("failed to load clinic snapshot")?;
    let summary = DashboardSummary::build(&store);

    tracing::info!(
        as_of = %summary.as_of,
        upcoming = summary.upcoming.len(),
        "dashboard summary built"
    );
    println!("{}", serde_json::to_string_pretty(&summary)?);

    Ok(())
}
