//! Landing-page summary: headline statistics plus the next few appointments.

use crate::query::upcoming_appointments;
use crate::store::{AppointmentView, ClinicStats, ClinicStore};
use chrono::NaiveDateTime;
use serde::Serialize;

#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardSummary<'a> {
    /// The instant the summary was computed for.
    pub as_of: NaiveDateTime,
    pub stats: ClinicStats,
    /// At most five rows. Appointments with a dangling reference are dropped after the
    /// cut-off, so the list can be shorter.
    pub upcoming: Vec<AppointmentView<'a>>,
}

impl<'a> DashboardSummary<'a> {
    pub fn build(store: &'a ClinicStore) -> Self {
        let as_of = store.now();

        let upcoming = upcoming_appointments(store.appointments(), as_of)
            .into_iter()
            .filter_map(|a| store.resolve_appointment(a))
            .collect();

        Self {
            as_of,
            stats: store.stats_on(as_of.date()),
            upcoming,
        }
    }
}
