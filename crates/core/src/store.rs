//! The in-memory clinic snapshot and its derived views.
//!
//! A [`ClinicStore`] owns the four record collections for the whole session. It is built
//! once from a [`SeedDataset`] and never mutated; every lookup and derivation reads the same
//! snapshot and returns a fresh result.
//!
//! ## Lookup misses
//!
//! Lookups return `Option`. A foreign key that does not resolve (a *dangling reference*) is
//! not an error anywhere in this module: joins such as [`ClinicStore::resolve_appointment`]
//! return `None` and callers skip the row.

use crate::clock::Clock;
use crate::config::CoreConfig;
use crate::ClinicResult;
use chrono::{NaiveDate, NaiveDateTime};
use clinic_data::{Appointment, Doctor, MedicalRecord, Patient, SeedDataset};
use serde::Serialize;
use std::sync::Arc;

/// Aggregate counts shown on the dashboard.
///
/// Always computed from the live collections; never cached.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClinicStats {
    pub total_doctors: usize,
    pub total_patients: usize,
    pub total_appointments: usize,
    pub appointments_today: usize,
}

/// An appointment joined with its patient and doctor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct AppointmentView<'a> {
    pub appointment: &'a Appointment,
    pub patient: &'a Patient,
    pub doctor: &'a Doctor,
}

/// A medical record joined with its patient and doctor.
#[derive(Clone, Copy, Debug, PartialEq, Serialize)]
pub struct RecordView<'a> {
    pub record: &'a MedicalRecord,
    pub patient: &'a Patient,
    pub doctor: &'a Doctor,
}

/// Everything a patient detail card shows.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PatientDetail<'a> {
    pub patient: &'a Patient,
    pub appointments: Vec<AppointmentView<'a>>,
    pub medical_records: Vec<RecordView<'a>>,
}

/// How many rows in each collection fail to join.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DanglingReferences {
    pub appointments: usize,
    pub medical_records: usize,
}

impl DanglingReferences {
    pub fn is_empty(&self) -> bool {
        self.appointments == 0 && self.medical_records == 0
    }
}

/// Read-only clinic snapshot.
#[derive(Clone, Debug)]
pub struct ClinicStore {
    doctors: Vec<Doctor>,
    patients: Vec<Patient>,
    appointments: Vec<Appointment>,
    medical_records: Vec<MedicalRecord>,
    clock: Arc<dyn Clock>,
}

impl ClinicStore {
    /// Build a store from a seed dataset and a clock.
    ///
    /// Dangling references are accepted and logged at warn level.
    pub fn new(dataset: SeedDataset, clock: Arc<dyn Clock>) -> Self {
        let SeedDataset {
            doctors,
            patients,
            appointments,
            medical_records,
        } = dataset;

        let store = Self {
            doctors,
            patients,
            appointments,
            medical_records,
            clock,
        };

        tracing::info!(
            doctors = store.doctors.len(),
            patients = store.patients.len(),
            appointments = store.appointments.len(),
            medical_records = store.medical_records.len(),
            "clinic store loaded"
        );

        let dangling = store.dangling_references();
        if !dangling.is_empty() {
            tracing::warn!(
                appointments = dangling.appointments,
                medical_records = dangling.medical_records,
                "seed data has dangling patient/doctor references; affected rows are hidden"
            );
        }

        store
    }

    /// Load the configured dataset and build a store with the configured clock.
    ///
    /// # Errors
    ///
    /// Returns an error if the seed dataset cannot be loaded.
    pub fn from_config(cfg: &CoreConfig) -> ClinicResult<Self> {
        let dataset = cfg.load_dataset()?;
        Ok(Self::new(dataset, cfg.clock()))
    }

    pub fn doctors(&self) -> &[Doctor] {
        &self.doctors
    }

    pub fn patients(&self) -> &[Patient] {
        &self.patients
    }

    pub fn appointments(&self) -> &[Appointment] {
        &self.appointments
    }

    pub fn medical_records(&self) -> &[MedicalRecord] {
        &self.medical_records
    }

    /// Current local date-time according to the injected clock.
    pub fn now(&self) -> NaiveDateTime {
        self.clock.now()
    }

    /// Current local calendar day.
    pub fn today(&self) -> NaiveDate {
        self.now().date()
    }

    pub fn doctor_by_id(&self, id: &str) -> Option<&Doctor> {
        self.doctors.iter().find(|d| d.id.as_str() == id)
    }

    pub fn patient_by_id(&self, id: &str) -> Option<&Patient> {
        self.patients.iter().find(|p| p.id.as_str() == id)
    }

    /// All appointments for `patient_id`, in collection order.
    ///
    /// This filters on the key alone and does not require the patient to exist.
    pub fn patient_appointments(&self, patient_id: &str) -> Vec<&Appointment> {
        self.appointments
            .iter()
            .filter(|a| a.patient_id.as_str() == patient_id)
            .collect()
    }

    /// All medical records for `patient_id`, in collection order.
    pub fn patient_medical_records(&self, patient_id: &str) -> Vec<&MedicalRecord> {
        self.medical_records
            .iter()
            .filter(|r| r.patient_id.as_str() == patient_id)
            .collect()
    }

    /// Statistics for the clock's current day.
    pub fn stats(&self) -> ClinicStats {
        self.stats_on(self.today())
    }

    /// Statistics with "today" pinned to `day`.
    ///
    /// An appointment counts towards `appointments_today` when its date falls on `day`,
    /// whatever its time of day.
    pub fn stats_on(&self, day: NaiveDate) -> ClinicStats {
        ClinicStats {
            total_doctors: self.doctors.len(),
            total_patients: self.patients.len(),
            total_appointments: self.appointments.len(),
            appointments_today: self
                .appointments
                .iter()
                .filter(|a| a.date.date() == day)
                .count(),
        }
    }

    /// Join an appointment with its patient and doctor. `None` if either is missing.
    pub fn resolve_appointment<'a>(
        &'a self,
        appointment: &'a Appointment,
    ) -> Option<AppointmentView<'a>> {
        let patient = self.patient_by_id(appointment.patient_id.as_str())?;
        let doctor = self.doctor_by_id(appointment.doctor_id.as_str())?;
        Some(AppointmentView {
            appointment,
            patient,
            doctor,
        })
    }

    /// Join a medical record with its patient and doctor. `None` if either is missing.
    pub fn resolve_record<'a>(&'a self, record: &'a MedicalRecord) -> Option<RecordView<'a>> {
        let patient = self.patient_by_id(record.patient_id.as_str())?;
        let doctor = self.doctor_by_id(record.doctor_id.as_str())?;
        Some(RecordView {
            record,
            patient,
            doctor,
        })
    }

    /// The patient plus their resolvable appointments and records.
    ///
    /// Returns `None` for an unknown patient. Rows whose doctor is missing are dropped.
    pub fn patient_detail(&self, patient_id: &str) -> Option<PatientDetail<'_>> {
        let patient = self.patient_by_id(patient_id)?;

        let appointments = self
            .patient_appointments(patient_id)
            .into_iter()
            .filter_map(|a| self.resolve_appointment(a))
            .collect();

        let medical_records = self
            .patient_medical_records(patient_id)
            .into_iter()
            .filter_map(|r| self.resolve_record(r))
            .collect();

        Some(PatientDetail {
            patient,
            appointments,
            medical_records,
        })
    }

    pub fn dangling_references(&self) -> DanglingReferences {
        DanglingReferences {
            appointments: self
                .appointments
                .iter()
                .filter(|a| self.resolve_appointment(a).is_none())
                .count(),
            medical_records: self
                .medical_records
                .iter()
                .filter(|r| self.resolve_record(r).is_none())
                .count(),
        }
    }
}


#[cfg(test)]
mod tests {
    use super::fixtures::*;
    use super::*;

    fn store() -> ClinicStore {
        store_at(clinic(), at("2024-06-12", "12:00"))
    }

    #[test]
    fn lookups_find_by_id_and_miss_quietly() {
        let store = store();
        assert_eq!(
            store.doctor_by_id("d2").map(|d| d.name.as_str()),
            Some("Michael Chen")
        );
        assert_eq!(
            store.patient_by_id("p3").map(|p| p.name.as_str()),
            Some("Aisha Patel")
        );
        assert!(store.doctor_by_id("d9").is_none());
        assert!(store.patient_by_id("").is_none());
    }

    #[test]
    fn every_appointment_is_listed_under_its_patient_key() {
        let store = store();
        for appointment in store.appointments() {
            let listed = store.patient_appointments(appointment.patient_id.as_str());
            assert!(
                listed.iter().any(|a| a.id == appointment.id),
                "{} missing from its patient list",
                appointment.id
            );
        }
    }

    #[test]
    fn patient_lists_keep_collection_order() {
        let store = store();
        let ids: Vec<&str> = store
            .patient_appointments("p1")
            .iter()
            .map(|a| a.id.as_str())
            .collect();
        assert_eq!(ids, vec!["a1", "a3"]);

        let ids: Vec<&str> = store
            .patient_medical_records("p1")
            .iter()
            .map(|r| r.id.as_str())
            .collect();
        assert_eq!(ids, vec!["r1", "r2"]);
        assert!(store.patient_medical_records("p3").is_empty());
    }

    #[test]
    fn stats_track_collection_sizes() {
        let store = store();
        let stats = store.stats();
        assert_eq!(stats.total_doctors, store.doctors().len());
        assert_eq!(stats.total_patients, store.patients().len());
        assert_eq!(stats.total_appointments, store.appointments().len());
    }

    #[test]
    fn appointments_today_uses_calendar_day_not_timestamp() {
        // a1 at 00:01 and a2 at 23:59 on 2024-06-12 both count; now is midday.
        let store = store();
        assert_eq!(store.stats().appointments_today, 2);
        assert_eq!(store.stats_on(day("2024-06-14")).appointments_today, 2);
        assert_eq!(store.stats_on(day("2024-06-15")).appointments_today, 0);
    }

    #[test]
    fn stats_serialize_with_dashboard_field_names() {
        let json = serde_json::to_value(store().stats()).expect("serialize stats");
        assert_eq!(json["totalDoctors"], 2);
        assert_eq!(json["totalPatients"], 3);
        assert_eq!(json["totalAppointments"], 5);
        assert_eq!(json["appointmentsToday"], 2);
    }

    #[test]
    fn resolve_drops_dangling_rows() {
        let store = store();
        let by_id = |id: &str| {
            store
                .appointments()
                .iter()
                .find(|a| a.id.as_str() == id)
                .expect("fixture appointment")
        };

        let view = store.resolve_appointment(by_id("a1")).expect("a1 resolves");
        assert_eq!(view.patient.name, "Maria Garcia");
        assert_eq!(view.doctor.name, "Sarah Johnson");

        assert!(store.resolve_appointment(by_id("a4")).is_none(), "dangling patient");
        assert!(store.resolve_appointment(by_id("a5")).is_none(), "dangling doctor");
    }

    #[test]
    fn dangling_references_are_counted() {
        let dangling = store().dangling_references();
        assert_eq!(
            dangling,
            DanglingReferences {
                appointments: 2,
                medical_records: 1,
            }
        );
        assert!(!dangling.is_empty());
    }

    #[test]
    fn patient_detail_joins_and_filters() {
        let store = store();
        let detail = store.patient_detail("p1").expect("p1 exists");
        assert_eq!(detail.patient.id, "p1");
        assert_eq!(detail.appointments.len(), 2);
        assert_eq!(detail.medical_records.len(), 2);

        // p3's only appointment points at a missing doctor.
        let detail = store.patient_detail("p3").expect("p3 exists");
        assert!(detail.appointments.is_empty());
    }

    #[test]
    fn patient_detail_for_unknown_patient_is_none() {
        let store = store();
        assert!(store.patient_detail("p404").is_none());
        // The raw key filter still sees the orphaned appointment.
        assert_eq!(store.patient_appointments("p404").len(), 1);
    }

    #[test]
    fn empty_store_is_valid() {
        let store = store_at(SeedDataset::default(), at("2024-06-12", "12:00"));
        assert_eq!(
            store.stats(),
            ClinicStats {
                total_doctors: 0,
                total_patients: 0,
                total_appointments: 0,
                appointments_today: 0,
            }
        );
        assert!(store.dangling_references().is_empty());
    }
}
