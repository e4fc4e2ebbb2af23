mod render;

use chrono::NaiveDate;
use clap::{Parser, Subcommand};
use clinic_core::{
    config::{now_from_env_value, seed_path_from_env_value},
    query::{
        filter_appointments, filter_doctors, filter_patients, medical_history,
        upcoming_appointments,
    },
    ClinicStore, CoreConfig, DashboardSummary, SearchTerm, WeekCursor, WeekScheduleBuilder,
    NOW_ENV, SEED_FILE_ENV,
};
use serde::Serialize;
use tracing_subscriber::{fmt, layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

#[derive(Parser)]
#[command(name = "clinic")]
#[command(about = "Clinic administration dashboard CLI")]
struct Cli {
    /// Seed dataset (YAML). Falls back to CLINIC_SEED_FILE, then the built-in data.
    #[arg(long, global = true)]
    seed: Option<String>,
    /// Pin "now" (YYYY-MM-DD or YYYY-MM-DDTHH:MM). Falls back to CLINIC_NOW.
    #[arg(long, global = true)]
    now: Option<String>,
    /// Print JSON instead of text
    #[arg(long, global = true)]
    json: bool,
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// Headline statistics
    Stats,
    /// List doctors
    Doctors {
        /// Match on name or specialty
        #[arg(long)]
        search: Option<String>,
    },
    /// List patients
    Patients {
        /// Match on name
        #[arg(long)]
        search: Option<String>,
    },
    /// Show one patient with their appointments and records
    Patient {
        /// Patient id
        id: String,
    },
    /// List appointments
    Appointments {
        /// Match on patient name, doctor name or type
        #[arg(long)]
        search: Option<String>,
    },
    /// Medical history, newest first
    History {
        /// Match on patient name, doctor name or diagnosis
        #[arg(long)]
        search: Option<String>,
    },
    /// Next scheduled appointments
    Upcoming,
    /// Weekly schedule
    Schedule {
        /// Any date in the week to show (YYYY-MM-DD). Defaults to today.
        #[arg(long)]
        anchor: Option<String>,
        /// Weeks to move from the anchor (negative goes back)
        #[arg(long, default_value_t = 0, allow_hyphen_values = true)]
        offset: i64,
        /// Match on patient name, doctor name or type
        #[arg(long)]
        search: Option<String>,
    },
    /// Landing-page summary
    Dashboard,
    /// Print the active seed dataset as YAML
    Seed,
}

type CliResult<T> = Result<T, Box<dyn std::error::Error>>;

fn main() -> CliResult<()> {
    tracing_subscriber::registry()
        .with(EnvFilter::from_default_env().add_directive("clinic_core=warn".parse()?))
        .with(fmt::layer().with_writer(std::io::stderr))
        .init();

    let output = run(Cli::parse(), |key| std::env::var(key).ok())?;
    println!("{output}");
    Ok(())
}

/// Execute one invocation and return what should be printed on stdout.
///
/// `env` supplies fallbacks for flags that were not given on the command line.
fn run(cli: Cli, env: impl Fn(&str) -> Option<String>) -> CliResult<String> {
    let seed = seed_path_from_env_value(cli.seed.or_else(|| env(SEED_FILE_ENV)));
    let now = now_from_env_value(cli.now.or_else(|| env(NOW_ENV)))?;
    tracing::debug!(?seed, ?now, "resolved cli configuration");
    let cfg = CoreConfig::new(seed, now)?;

    let Some(command) = cli.command else {
        return Ok("Use 'clinic --help' for commands.".to_string());
    };

    if let Commands::Seed = command {
        let yaml = cfg.load_dataset()?.render()?;
        return Ok(yaml.trim_end().to_string());
    }

    let store = ClinicStore::from_config(&cfg)?;
    let json = cli.json;

    let output = match command {
        Commands::Stats => {
            let stats = store.stats();
            emit(json, &stats, || render::stats(&stats))?
        }
        Commands::Doctors { search } => {
            let doctors = filter_doctors(store.doctors(), &SearchTerm::from(search.as_deref()));
            emit(json, &doctors, || {
                lines(doctors.iter().map(|d| render::doctor(d)), "No doctors found.")
            })?
        }
        Commands::Patients { search } => {
            let term = SearchTerm::from(search.as_deref());
            let patients = filter_patients(store.patients(), &term);
            emit(json, &patients, || {
                lines(patients.iter().map(|p| render::patient(p)), "No patients found.")
            })?
        }
        Commands::Patient { id } => {
            let detail = store.patient_detail(&id);
            match &detail {
                Some(detail) => emit(json, detail, || render::patient_detail(detail))?,
                None => emit(json, &detail, || format!("Patient '{id}' not found."))?,
            }
        }
        Commands::Appointments { search } => {
            let views = filter_appointments(&store, &SearchTerm::from(search.as_deref()));
            emit(json, &views, || {
                lines(views.iter().map(render::appointment), "No appointments found.")
            })?
        }
        Commands::History { search } => {
            let history = medical_history(&store, &SearchTerm::from(search.as_deref()));
            emit(json, &history, || {
                lines(history.iter().map(render::record), "No medical records found.")
            })?
        }
        Commands::Upcoming => {
            let views: Vec<_> = upcoming_appointments(store.appointments(), store.now())
                .into_iter()
                .filter_map(|a| store.resolve_appointment(a))
                .collect();
            emit(json, &views, || {
                lines(views.iter().map(render::appointment), "No upcoming appointments")
            })?
        }
        Commands::Schedule {
            anchor,
            offset,
            search,
        } => {
            let anchor = match anchor {
                Some(raw) => NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
                    .map_err(|e| format!("Invalid --anchor '{raw}': {e}"))?,
                None => store.today(),
            };
            let cursor = WeekCursor::new(anchor)
                .and_then(|cursor| cursor.shifted(offset))
                .ok_or_else(|| format!("Invalid --offset {offset}: week is out of range"))?;
            let week = WeekScheduleBuilder::new(&store)
                .with_search(SearchTerm::from(search.as_deref()))
                .build(cursor);
            emit(json, &week, || render::schedule(&week))?
        }
        Commands::Dashboard => {
            let summary = DashboardSummary::build(&store);
            emit(json, &summary, || render::dashboard(&summary))?
        }
        Commands::Seed => String::new(),
    };

    Ok(output)
}

/// `value` as pretty JSON, or the text produced by `text`.
fn emit<T, F>(json: bool, value: &T, text: F) -> Result<String, serde_json::Error>
where
    T: Serialize + ?Sized,
    F: FnOnce() -> String,
{
    if json {
        serde_json::to_string_pretty(value)
    } else {
        Ok(text())
    }
}

fn lines(rows: impl Iterator<Item = String>, empty: &str) -> String {
    let rows: Vec<String> = rows.collect();
    if rows.is_empty() {
        empty.to_string()
    } else {
        rows.join("\n")
    }
}
