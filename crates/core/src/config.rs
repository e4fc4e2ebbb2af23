//! Core runtime configuration.
//!
//! This module defines configuration that should be resolved once at process startup and then
//! passed into the store. Binaries read environment variables and CLI flags; the core only
//! ever sees the parsed values, which keeps fixtures and tests independent of the process
//! environment.

use crate::clock::{Clock, FixedClock, SystemClock};
use crate::{ClinicError, ClinicResult};
use chrono::NaiveDateTime;
use clinic_data::SeedDataset;
use std::path::{Path, PathBuf};
use std::sync::Arc;

/// Core configuration resolved at startup.
#[derive(Clone, Debug, Default)]
pub struct CoreConfig {
    seed_path: Option<PathBuf>,
    fixed_now: Option<NaiveDateTime>,
}

impl CoreConfig {
    /// Create a new `CoreConfig`.
    ///
    /// `seed_path` of `None` selects the embedded dataset. `fixed_now` of `None` selects the
    /// system local clock.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::InvalidInput`] if `seed_path` is given but is not a regular file.
    pub fn new(seed_path: Option<PathBuf>, fixed_now: Option<NaiveDateTime>) -> ClinicResult<Self> {
        if let Some(path) = &seed_path {
            if !path.is_file() {
                return Err(ClinicError::InvalidInput(format!(
                    "seed file does not exist or is not a file: {}",
                    path.display()
                )));
            }
        }

        Ok(Self {
            seed_path,
            fixed_now,
        })
    }

    pub fn seed_path(&self) -> Option<&Path> {
        self.seed_path.as_deref()
    }

    pub fn fixed_now(&self) -> Option<NaiveDateTime> {
        self.fixed_now
    }

    /// The clock implied by this configuration.
    pub fn clock(&self) -> Arc<dyn Clock> {
        match self.fixed_now {
            Some(instant) => Arc::new(FixedClock(instant)),
            None => Arc::new(SystemClock),
        }
    }

    /// Load the configured seed dataset.
    ///
    /// # Errors
    ///
    /// Returns [`ClinicError::Data`] if the file cannot be read or fails validation.
    pub fn load_dataset(&self) -> ClinicResult<SeedDataset> {
        let dataset = match &self.seed_path {
            Some(path) => {
                tracing::debug!("loading seed dataset from {}", path.display());
                SeedDataset::load(path)?
            }
            None => {
                tracing::debug!("loading embedded seed dataset");
                SeedDataset::embedded()?
            }
        };
        Ok(dataset)
    }
}

/// Parse the seed path from an optional raw value.
///
/// `None` and empty/whitespace values select the embedded dataset.
pub fn seed_path_from_env_value(value: Option<String>) -> Option<PathBuf> {
    value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
        .map(PathBuf::from)
}

/// Parse a fixed "now" from an optional raw value.
///
/// Accepts the seed date forms (`YYYY-MM-DD`, `YYYY-MM-DDTHH:MM[:SS]`). `None` or an
/// empty/whitespace value means "use the system clock".
///
/// # Errors
///
/// Returns [`ClinicError::InvalidDateTime`] if a non-empty value cannot be parsed.
pub fn now_from_env_value(value: Option<String>) -> ClinicResult<Option<NaiveDateTime>> {
    let value = value
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty());

    value
        .map(|v| clinic_data::datetime::parse_local(&v).ok_or(ClinicError::InvalidDateTime(v)))
        .transpose()
}
