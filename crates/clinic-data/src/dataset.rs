//! Seed dataset wire model and translation helpers.
//!
//! Responsibilities:
//! - Define a strict wire model for the YAML seed document
//! - Translate wire records into validated domain records
//! - Enforce required fields, value ranges and per-collection id uniqueness
//!
//! Notes:
//! - Foreign keys between collections are not checked; dangling references are tolerated
//! - The dataset is read once at startup and never written back

use crate::datetime::{format_local, parse_local};
use crate::records::{Appointment, AppointmentStatus, Doctor, MedicalRecord, Patient};
use crate::{DataError, DataResult};
use chrono::NaiveDateTime;
use clinic_types::{NonEmptyText, Rating};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// Seed dataset shipped with the workspace.
pub const DEFAULT_SEED_YAML: &str = include_str!("../data/default_seed.yaml");

// ============================================================================
// Public SeedDataset operations
// ============================================================================

/// The four record collections the dashboard is built from.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct SeedDataset {
    pub doctors: Vec<Doctor>,
    pub patients: Vec<Patient>,
    pub appointments: Vec<Appointment>,
    pub medical_records: Vec<MedicalRecord>,
}

impl SeedDataset {
    /// Parse a seed dataset from YAML text.
    ///
    /// This uses `serde_path_to_error` to surface a best-effort "path" (e.g.
    /// `appointments[3].duration`) to the failing field when the YAML does not match the
    /// wire schema.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if:
    /// - the YAML does not match the wire schema (unknown keys, wrong types, missing fields),
    /// - a required text field is blank,
    /// - a numeric field is out of range (rating, age, duration),
    /// - a date cannot be parsed,
    /// - an id is repeated within its collection.
    pub fn parse(yaml_text: &str) -> DataResult<Self> {
        let deserializer = serde_yaml::Deserializer::from_str(yaml_text);

        let wire = match serde_path_to_error::deserialize::<_, SeedWire>(deserializer) {
            Ok(parsed) => parsed,
            Err(err) => {
                let path = err.path().to_string();
                let source = err.into_inner();
                let path = if path.is_empty() || path == "." {
                    "<root>"
                } else {
                    path.as_str()
                };
                return Err(DataError::Translation(format!(
                    "Seed schema mismatch at {path}: {source}"
                )));
            }
        };

        wire_to_domain(wire)
    }

    /// Read and parse a seed dataset from a YAML file.
    pub fn load(path: &Path) -> DataResult<Self> {
        let text = std::fs::read_to_string(path)?;
        Self::parse(&text)
    }

    /// The dataset embedded in this crate.
    pub fn embedded() -> DataResult<Self> {
        Self::parse(DEFAULT_SEED_YAML)
    }

    /// Render the dataset as YAML text in seed form.
    ///
    /// # Errors
    ///
    /// Returns [`DataError`] if serialisation fails.
    pub fn render(&self) -> DataResult<String> {
        let wire = domain_to_wire(self);
        serde_yaml::to_string(&wire)
            .map_err(|e| DataError::Translation(format!("Failed to serialise seed dataset: {e}")))
    }
}

// ============================================================================
// Wire types (internal)
// ============================================================================

#[derive(Clone, Debug, Default, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct SeedWire {
    #[serde(default)]
    doctors: Vec<DoctorWire>,
    #[serde(default)]
    patients: Vec<PatientWire>,
    #[serde(default)]
    appointments: Vec<AppointmentWire>,
    #[serde(default)]
    medical_records: Vec<MedicalRecordWire>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct DoctorWire {
    id: String,
    name: String,
    specialty: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    rating: f64,
    #[serde(default)]
    patients_count: u32,
    #[serde(default)]
    appointments_today: u32,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct PatientWire {
    id: String,
    name: String,
    age: u32,
    gender: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    image_url: Option<String>,
    phone: String,
    #[serde(default)]
    last_visit: Option<String>,
    #[serde(default)]
    next_appointment: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct AppointmentWire {
    id: String,
    patient_id: String,
    doctor_id: String,
    date: String,
    time: String,
    duration: u32,
    status: String,
    #[serde(rename = "type")]
    kind: String,
}

#[derive(Clone, Debug, Deserialize, Serialize)]
#[serde(deny_unknown_fields, rename_all = "camelCase")]
struct MedicalRecordWire {
    id: String,
    patient_id: String,
    doctor_id: String,
    date: String,
    diagnosis: String,
    #[serde(default)]
    treatment: String,
    #[serde(default)]
    notes: String,
}

// ============================================================================
// Helper functions (internal)
// ============================================================================

fn required_text(path: &str, value: &str) -> DataResult<NonEmptyText> {
    NonEmptyText::new(value).map_err(|e| DataError::Translation(format!("{path}: {e}")))
}

fn required_date(path: &str, value: &str) -> DataResult<NaiveDateTime> {
    parse_local(value).ok_or_else(|| {
        DataError::Translation(format!(
            "{path}: expected YYYY-MM-DD or YYYY-MM-DDTHH:MM[:SS], got '{value}'"
        ))
    })
}

fn optional_date(path: &str, value: Option<&str>) -> DataResult<Option<NaiveDateTime>> {
    match value.map(str::trim).filter(|v| !v.is_empty()) {
        Some(v) => required_date(path, v).map(Some),
        None => Ok(None),
    }
}

fn positive(path: &str, value: u32) -> DataResult<u32> {
    if value == 0 {
        return Err(DataError::Translation(format!(
            "{path}: must be greater than zero"
        )));
    }
    Ok(value)
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.trim().is_empty())
}

/// Tracks ids already seen in one collection.
struct UniqueIds {
    collection: &'static str,
    seen: HashSet<String>,
}

impl UniqueIds {
    fn new(collection: &'static str) -> Self {
        Self {
            collection,
            seen: HashSet::new(),
        }
    }

    fn claim(&mut self, index: usize, id: &NonEmptyText) -> DataResult<()> {
        if !self.seen.insert(id.as_str().to_owned()) {
            return Err(DataError::InvalidInput(format!(
                "{}[{index}].id: duplicate id '{id}'",
                self.collection
            )));
        }
        Ok(())
    }
}

fn doctor_from_wire(index: usize, wire: DoctorWire) -> DataResult<Doctor> {
    let at = |field: &str| format!("doctors[{index}].{field}");
    let rating = Rating::new(wire.rating)
        .map_err(|e| DataError::Translation(format!("{}: {e}", at("rating"))))?;

    Ok(Doctor {
        id: required_text(&at("id"), &wire.id)?,
        name: required_text(&at("name"), &wire.name)?,
        specialty: required_text(&at("specialty"), &wire.specialty)?,
        image_url: non_blank(wire.image_url),
        rating,
        patients_count: wire.patients_count,
        appointments_today: wire.appointments_today,
    })
}

fn patient_from_wire(index: usize, wire: PatientWire) -> DataResult<Patient> {
    let at = |field: &str| format!("patients[{index}].{field}");

    Ok(Patient {
        id: required_text(&at("id"), &wire.id)?,
        name: required_text(&at("name"), &wire.name)?,
        age: positive(&at("age"), wire.age)?,
        gender: wire.gender.trim().to_owned(),
        image_url: non_blank(wire.image_url),
        phone: wire.phone.trim().to_owned(),
        last_visit: optional_date(&at("lastVisit"), wire.last_visit.as_deref())?,
        next_appointment: optional_date(
            &at("nextAppointment"),
            wire.next_appointment.as_deref(),
        )?,
    })
}

fn appointment_from_wire(index: usize, wire: AppointmentWire) -> DataResult<Appointment> {
    let at = |field: &str| format!("appointments[{index}].{field}");

    Ok(Appointment {
        id: required_text(&at("id"), &wire.id)?,
        patient_id: required_text(&at("patientId"), &wire.patient_id)?,
        doctor_id: required_text(&at("doctorId"), &wire.doctor_id)?,
        date: required_date(&at("date"), &wire.date)?,
        time: required_text(&at("time"), &wire.time)?,
        duration: positive(&at("duration"), wire.duration)?,
        status: AppointmentStatus::from_wire(wire.status.trim()),
        kind: wire.kind.trim().to_owned(),
    })
}

fn record_from_wire(index: usize, wire: MedicalRecordWire) -> DataResult<MedicalRecord> {
    let at = |field: &str| format!("medicalRecords[{index}].{field}");

    Ok(MedicalRecord {
        id: required_text(&at("id"), &wire.id)?,
        patient_id: required_text(&at("patientId"), &wire.patient_id)?,
        doctor_id: required_text(&at("doctorId"), &wire.doctor_id)?,
        date: required_date(&at("date"), &wire.date)?,
        diagnosis: required_text(&at("diagnosis"), &wire.diagnosis)?,
        treatment: wire.treatment,
        notes: wire.notes,
    })
}

/// Convert wire format to domain types, validating every record.
fn wire_to_domain(wire: SeedWire) -> DataResult<SeedDataset> {
    let mut ids = UniqueIds::new("doctors");
    let mut doctors = Vec::with_capacity(wire.doctors.len());
    for (index, item) in wire.doctors.into_iter().enumerate() {
        let doctor = doctor_from_wire(index, item)?;
        ids.claim(index, &doctor.id)?;
        doctors.push(doctor);
    }

    let mut ids = UniqueIds::new("patients");
    let mut patients = Vec::with_capacity(wire.patients.len());
    for (index, item) in wire.patients.into_iter().enumerate() {
        let patient = patient_from_wire(index, item)?;
        ids.claim(index, &patient.id)?;
        patients.push(patient);
    }

    let mut ids = UniqueIds::new("appointments");
    let mut appointments = Vec::with_capacity(wire.appointments.len());
    for (index, item) in wire.appointments.into_iter().enumerate() {
        let appointment = appointment_from_wire(index, item)?;
        ids.claim(index, &appointment.id)?;
        appointments.push(appointment);
    }

    let mut ids = UniqueIds::new("medicalRecords");
    let mut medical_records = Vec::with_capacity(wire.medical_records.len());
    for (index, item) in wire.medical_records.into_iter().enumerate() {
        let record = record_from_wire(index, item)?;
        ids.claim(index, &record.id)?;
        medical_records.push(record);
    }

    Ok(SeedDataset {
        doctors,
        patients,
        appointments,
        medical_records,
    })
}

/// Convert domain types back to wire format.
fn domain_to_wire(data: &SeedDataset) -> SeedWire {
    SeedWire {
        doctors: data
            .doctors
            .iter()
            .map(|d| DoctorWire {
                id: d.id.to_string(),
                name: d.name.to_string(),
                specialty: d.specialty.to_string(),
                image_url: d.image_url.clone(),
                rating: d.rating.value(),
                patients_count: d.patients_count,
                appointments_today: d.appointments_today,
            })
            .collect(),
        patients: data
            .patients
            .iter()
            .map(|p| PatientWire {
                id: p.id.to_string(),
                name: p.name.to_string(),
                age: p.age,
                gender: p.gender.clone(),
                image_url: p.image_url.clone(),
                phone: p.phone.clone(),
                last_visit: p.last_visit.map(format_local),
                next_appointment: p.next_appointment.map(format_local),
            })
            .collect(),
        appointments: data
            .appointments
            .iter()
            .map(|a| AppointmentWire {
                id: a.id.to_string(),
                patient_id: a.patient_id.to_string(),
                doctor_id: a.doctor_id.to_string(),
                date: format_local(a.date),
                time: a.time.to_string(),
                duration: a.duration,
                status: a.status.as_wire().to_string(),
                kind: a.kind.clone(),
            })
            .collect(),
        medical_records: data
            .medical_records
            .iter()
            .map(|r| MedicalRecordWire {
                id: r.id.to_string(),
                patient_id: r.patient_id.to_string(),
                doctor_id: r.doctor_id.to_string(),
                date: format_local(r.date),
                diagnosis: r.diagnosis.to_string(),
                treatment: r.treatment.clone(),
                notes: r.notes.clone(),
            })
            .collect(),
    }
}
