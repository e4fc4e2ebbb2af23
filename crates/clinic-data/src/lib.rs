//! Seed dataset wire/boundary support for the clinic dashboard.
//!
//! This crate provides **wire models** and **translation helpers** for the static seed
//! dataset the dashboard is built from:
//! - YAML seed documents (doctors, patients, appointments, medical records)
//! - the domain-level record types every query in `clinic-core` works on
//!
//! The wire model is strict (unknown keys and wrong types are rejected with the failing
//! field path). Foreign keys between collections are deliberately *not* checked here: a
//! dangling `patientId`/`doctorId` is a display concern handled by the store.

pub mod dataset;
pub mod datetime;
pub mod records;

// Re-export facades
pub use dataset::{SeedDataset, DEFAULT_SEED_YAML};

// Re-export public domain-level types
pub use records::{Appointment, AppointmentStatus, Doctor, MedicalRecord, Patient, StatusBadge};

/// Errors returned by the `clinic-data` boundary crate.
#[derive(Debug, thiserror::Error)]
pub enum DataError {
    #[error("invalid input: {0}")]
    InvalidInput(String),

    #[error("invalid YAML: {0}")]
    InvalidYaml(#[from] serde_yaml::Error),

    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    #[error("translation error: {0}")]
    Translation(String),
}

/// Type alias for Results that can fail with a [`DataError`].
pub type DataResult<T> = Result<T, DataError>;
