//! # Clinic Core
//!
//! Core logic for the clinic administration dashboard.
//!
//! This crate contains pure, read-only data operations over an in-memory snapshot:
//! - [`ClinicStore`]: the four record collections, lookups, joins and statistics
//! - [`query`]: case-insensitive search, medical history ordering, upcoming appointments
//! - [`schedule`]: the Monday-start weekly calendar grid
//! - [`dashboard`]: the landing-page summary
//!
//! **No presentation concerns**: formatting for a terminal belongs in `clinic-cli`. The core
//! never reads environment variables; binaries resolve a [`CoreConfig`] at startup and pass it
//! in.

pub mod clock;
pub mod config;
pub mod constants;
pub mod dashboard;
pub mod error;
pub mod query;
pub mod schedule;
pub mod store;

pub use clock::{Clock, FixedClock, SystemClock};
pub use config::CoreConfig;
pub use constants::{DEFAULT_TIME_SLOTS, NOW_ENV, SEED_FILE_ENV, UPCOMING_LIMIT};
pub use dashboard::DashboardSummary;
pub use error::{ClinicError, ClinicResult};
pub use query::SearchTerm;
pub use schedule::{WeekCursor, WeekSchedule, WeekScheduleBuilder};
pub use store::{AppointmentView, ClinicStats, ClinicStore, PatientDetail, RecordView};

// Re-export record types so consumers need only this crate.
pub use clinic_data::{
    Appointment, AppointmentStatus, Doctor, MedicalRecord, Patient, SeedDataset, StatusBadge,
};
pub use clinic_types::{NonEmptyText, Rating};
