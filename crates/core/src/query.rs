//! Search, filter and sort helpers behind the dashboard's list views.
//!
//! Search is a case-insensitive substring match. An empty term matches everything. Views that
//! join other collections (medical history, appointment search) drop rows whose patient or
//! doctor does not resolve before matching.

use crate::constants::UPCOMING_LIMIT;
use crate::store::{AppointmentView, ClinicStore, RecordView};
use chrono::{NaiveDate, NaiveDateTime};
use clinic_data::{Appointment, Doctor, Patient};

/// A normalised search term.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct SearchTerm(String);

impl SearchTerm {
    /// Lower-cases `raw`. Whitespace is significant, as typed.
    pub fn new(raw: &str) -> Self {
        Self(raw.to_lowercase())
    }

    /// True if the term is empty or occurs in `field`, ignoring case.
    pub fn matches(&self, field: &str) -> bool {
        self.0.is_empty() || field.to_lowercase().contains(&self.0)
    }

    /// True if the term matches at least one of `fields`.
    pub fn matches_any<'f>(&self, fields: impl IntoIterator<Item = &'f str>) -> bool {
        self.0.is_empty() || fields.into_iter().any(|f| self.matches(f))
    }
}

impl From<&str> for SearchTerm {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl From<Option<&str>> for SearchTerm {
    fn from(raw: Option<&str>) -> Self {
        raw.map(Self::new).unwrap_or_default()
    }
}

/// Doctors whose name or specialty matches.
pub fn filter_doctors<'a>(doctors: &'a [Doctor], term: &SearchTerm) -> Vec<&'a Doctor> {
    doctors
        .iter()
        .filter(|d| term.matches_any([d.name.as_str(), d.specialty.as_str()]))
        .collect()
}

/// Patients whose name matches.
pub fn filter_patients<'a>(patients: &'a [Patient], term: &SearchTerm) -> Vec<&'a Patient> {
    patients
        .iter()
        .filter(|p| term.matches(p.name.as_str()))
        .collect()
}

/// Resolvable appointments whose patient name, doctor name or type matches, in collection
/// order.
pub fn filter_appointments<'a>(
    store: &'a ClinicStore,
    term: &SearchTerm,
) -> Vec<AppointmentView<'a>> {
    store
        .appointments()
        .iter()
        .filter_map(|a| store.resolve_appointment(a))
        .filter(|view| appointment_matches(view, term))
        .collect()
}

pub(crate) fn appointment_matches(view: &AppointmentView<'_>, term: &SearchTerm) -> bool {
    term.matches_any([
        view.patient.name.as_str(),
        view.doctor.name.as_str(),
        view.appointment.kind.as_str(),
    ])
}

/// Medical history: resolvable records whose patient name, doctor name or diagnosis matches,
/// most recent first.
///
/// The sort is stable, so records on the same date keep collection order.
pub fn medical_history<'a>(store: &'a ClinicStore, term: &SearchTerm) -> Vec<RecordView<'a>> {
    let mut history: Vec<RecordView<'a>> = store
        .medical_records()
        .iter()
        .filter_map(|r| store.resolve_record(r))
        .filter(|view| {
            term.matches_any([
                view.patient.name.as_str(),
                view.doctor.name.as_str(),
                view.record.diagnosis.as_str(),
            ])
        })
        .collect();

    history.sort_by(|a, b| b.record.date.cmp(&a.record.date));
    history
}

/// Scheduled appointments at or after `now`, soonest first, at most [`UPCOMING_LIMIT`].
///
/// Comparison is on the full date-time. Truncation happens before any join, so a caller that
/// then drops dangling rows may show fewer entries.
pub fn upcoming_appointments(
    appointments: &[Appointment],
    now: NaiveDateTime,
) -> Vec<&Appointment> {
    let mut upcoming: Vec<&Appointment> = appointments
        .iter()
        .filter(|a| a.status.is_scheduled() && a.date >= now)
        .collect();

    upcoming.sort_by_key(|a| a.date);
    upcoming.truncate(UPCOMING_LIMIT);
    upcoming
}

/// Appointments on one calendar day, in collection order.
pub fn appointments_on(appointments: &[Appointment], day: NaiveDate) -> Vec<&Appointment> {
    appointments.iter().filter(|a| a.date.date() == day).collect()
}
