//! Domain-level clinic records.
//!
//! These are the validated carriers every query in the workspace operates on. They are
//! produced from the seed wire model by [`crate::SeedDataset`] and never mutated after
//! construction.

use chrono::NaiveDateTime;
use clinic_types::{NonEmptyText, Rating};
use serde::Serialize;

// ============================================================================
// Public domain-level types
// ============================================================================

/// A doctor on the clinic roster.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Doctor {
    pub id: NonEmptyText,
    pub name: NonEmptyText,
    pub specialty: NonEmptyText,
    /// Portrait URL; display only, never fetched by the core.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub rating: Rating,
    pub patients_count: u32,
    pub appointments_today: u32,
}

/// A registered patient.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Patient {
    pub id: NonEmptyText,
    pub name: NonEmptyText,
    /// Age in whole years, always positive.
    pub age: u32,
    pub gender: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub image_url: Option<String>,
    pub phone: String,
    pub last_visit: Option<NaiveDateTime>,
    pub next_appointment: Option<NaiveDateTime>,
}

/// A booked appointment.
///
/// `date` carries the calendar day (and optionally a time of day); `time` is the slot
/// label the week grid buckets on. The two are independent in the source data.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Appointment {
    pub id: NonEmptyText,
    pub patient_id: NonEmptyText,
    pub doctor_id: NonEmptyText,
    pub date: NaiveDateTime,
    pub time: NonEmptyText,
    /// Length in minutes, always positive.
    pub duration: u32,
    pub status: AppointmentStatus,
    /// Free-text category such as "Check-up" or "Follow-up".
    #[serde(rename = "type")]
    pub kind: String,
}

/// An entry in a patient's medical history.
#[derive(Clone, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MedicalRecord {
    pub id: NonEmptyText,
    pub patient_id: NonEmptyText,
    pub doctor_id: NonEmptyText,
    pub date: NaiveDateTime,
    pub diagnosis: NonEmptyText,
    pub treatment: String,
    pub notes: String,
}

/// Appointment lifecycle status.
///
/// The known statuses form a closed set. A status string outside it is kept verbatim as
/// [`AppointmentStatus::Unrecognised`]: it is shown with the scheduled badge, but it is not
/// `Scheduled` for filtering.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum AppointmentStatus {
    Scheduled,
    Completed,
    Canceled,
    Unrecognised(String),
}

/// Visual treatment for an appointment status.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum StatusBadge {
    Scheduled,
    Completed,
    Canceled,
}

impl AppointmentStatus {
    /// Parse from wire format string. Never fails.
    pub fn from_wire(s: &str) -> Self {
        match s {
            "scheduled" => AppointmentStatus::Scheduled,
            "completed" => AppointmentStatus::Completed,
            "canceled" => AppointmentStatus::Canceled,
            other => AppointmentStatus::Unrecognised(other.to_string()),
        }
    }

    /// Convert to wire format string.
    pub fn as_wire(&self) -> &str {
        match self {
            AppointmentStatus::Scheduled => "scheduled",
            AppointmentStatus::Completed => "completed",
            AppointmentStatus::Canceled => "canceled",
            AppointmentStatus::Unrecognised(raw) => raw,
        }
    }

    pub fn is_scheduled(&self) -> bool {
        matches!(self, AppointmentStatus::Scheduled)
    }

    /// Badge used when rendering the status. Unknown values fall back to scheduled.
    pub fn badge(&self) -> StatusBadge {
        match self {
            AppointmentStatus::Completed => StatusBadge::Completed,
            AppointmentStatus::Canceled => StatusBadge::Canceled,
            AppointmentStatus::Scheduled | AppointmentStatus::Unrecognised(_) => {
                StatusBadge::Scheduled
            }
        }
    }
}

impl std::fmt::Display for AppointmentStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_wire())
    }
}

impl Serialize for AppointmentStatus {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        serializer.serialize_str(self.as_wire())
    }
}

impl StatusBadge {
    /// Capitalised label, e.g. `Scheduled`.
    pub fn label(self) -> &'static str {
        match self {
            StatusBadge::Scheduled => "Scheduled",
            StatusBadge::Completed => "Completed",
            StatusBadge::Canceled => "Canceled",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn known_statuses_parse() {
        assert_eq!(
            AppointmentStatus::from_wire("scheduled"),
            AppointmentStatus::Scheduled
        );
        assert_eq!(
            AppointmentStatus::from_wire("completed"),
            AppointmentStatus::Completed
        );
        assert_eq!(
            AppointmentStatus::from_wire("canceled"),
            AppointmentStatus::Canceled
        );
    }

    #[test]
    fn unknown_status_keeps_raw_value_and_scheduled_badge() {
        let status = AppointmentStatus::from_wire("no-show");
        assert_eq!(status, AppointmentStatus::Unrecognised("no-show".into()));
        assert_eq!(status.as_wire(), "no-show");
        assert_eq!(status.badge(), StatusBadge::Scheduled);
        assert!(!status.is_scheduled());
    }

    #[test]
    fn status_matching_is_case_sensitive() {
        // "Scheduled" is not the wire spelling; it gets the fallback badge only.
        let status = AppointmentStatus::from_wire("Scheduled");
        assert!(!status.is_scheduled());
        assert_eq!(status.badge(), StatusBadge::Scheduled);
    }

    #[test]
    fn status_serializes_as_wire_string() {
        let json = serde_json::to_string(&AppointmentStatus::Canceled).expect("serialize");
        assert_eq!(json, "\"canceled\"");
        assert_eq!(StatusBadge::Completed.label(), "Completed");
    }
}
