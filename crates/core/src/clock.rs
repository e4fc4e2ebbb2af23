//! Source of "now" for date-sensitive derivations.
//!
//! All dates are naive local date-times in the clinic's single local calendar. The store
//! never calls `Local::now()` directly; it asks the injected [`Clock`], so fixtures and the
//! `CLINIC_NOW` override can pin the current instant.

use chrono::{Local, NaiveDateTime};
use std::fmt;

pub trait Clock: Send + Sync + fmt::Debug {
    /// Current local date-time.
    fn now(&self) -> NaiveDateTime;
}

/// Reads the operating system's local time on every call.
#[derive(Clone, Copy, Debug, Default)]
pub struct SystemClock;

impl Clock for SystemClock {
    fn now(&self) -> NaiveDateTime {
        Local::now().naive_local()
    }
}

/// Always reports the same instant.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FixedClock(pub NaiveDateTime);

impl Clock for FixedClock {
    fn now(&self) -> NaiveDateTime {
        self.0
    }
}
