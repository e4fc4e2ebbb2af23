//! Plain-text rendering of the dashboard views.
//!
//! Every function returns a `String` so output can be checked in tests; `main` prints it.

use chrono::NaiveDateTime;
use clinic_core::{
    dashboard::DashboardSummary,
    store::{AppointmentView, ClinicStats, PatientDetail, RecordView},
    Doctor, Patient, WeekSchedule,
};
use std::fmt::Write;

const DATE_FORMAT: &str = "%b %d, %Y";

fn date(value: NaiveDateTime) -> String {
    value.format(DATE_FORMAT).to_string()
}

pub fn stats(stats: &ClinicStats) -> String {
    format!(
        "Total Patients:     {}\nTotal Doctors:      {}\nTotal Appointments: {}\n\
         Today's Appointments: {}\n",
        stats.total_patients,
        stats.total_doctors,
        stats.total_appointments,
        stats.appointments_today
    )
}

pub fn doctor(doctor: &Doctor) -> String {
    format!(
        "{}  {} ({})  rating {}  patients {}  today {}",
        doctor.id,
        doctor.name,
        doctor.specialty,
        doctor.rating,
        doctor.patients_count,
        doctor.appointments_today
    )
}

pub fn patient(patient: &Patient) -> String {
    let last_visit = patient
        .last_visit
        .map(|d| format!("Last visit: {}", date(d)))
        .unwrap_or_else(|| "No previous visits".to_string());
    let next = patient
        .next_appointment
        .map(|d| format!("Next appointment: {}", date(d)))
        .unwrap_or_else(|| "No upcoming appointments".to_string());

    format!(
        "{}  {}  {} y/o {}  {}\n    {}\n    {}",
        patient.id, patient.name, patient.age, patient.gender, patient.phone, last_visit, next
    )
}

/// One appointment row, e.g. `Jun 14, 2024 10:00 AM  Maria Garcia with Dr. Sarah Johnson ...`.
pub fn appointment(view: &AppointmentView<'_>) -> String {
    let a = view.appointment;
    format!(
        "{} {}  {} with Dr. {}  {} • {} min  [{}]",
        date(a.date),
        a.time,
        view.patient.name,
        view.doctor.name,
        a.kind,
        a.duration,
        a.status.badge().label()
    )
}

pub fn record(view: &RecordView<'_>) -> String {
    let r = view.record;
    let mut out = format!(
        "{}  {}  {} / Dr. {} ({})",
        date(r.date),
        r.diagnosis,
        view.patient.name,
        view.doctor.name,
        view.doctor.specialty
    );
    if !r.treatment.is_empty() {
        let _ = write!(out, "\n    Treatment: {}", r.treatment);
    }
    if !r.notes.is_empty() {
        let _ = write!(out, "\n    Notes: {}", r.notes);
    }
    out
}

pub fn patient_detail(detail: &PatientDetail<'_>) -> String {
    let mut out = patient(detail.patient);

    out.push_str("\n\nAppointments:");
    if detail.appointments.is_empty() {
        out.push_str("\n  none");
    }
    for view in &detail.appointments {
        let _ = write!(out, "\n  {}", appointment(view));
    }

    out.push_str("\n\nMedical records:");
    if detail.medical_records.is_empty() {
        out.push_str("\n  none");
    }
    for view in &detail.medical_records {
        let _ = write!(out, "\n  {}", record(view).replace('\n', "\n  "));
    }
    out
}

/// Week grid as a day-by-day listing. Empty slots are omitted; today is starred.
pub fn schedule(week: &WeekSchedule<'_>) -> String {
    let mut out = week.range_label();

    for day in &week.days {
        let marker = if day.is_today { " *" } else { "" };
        let _ = write!(
            out,
            "\n\n{} {}{}",
            day.weekday_label(),
            day.date.format("%-d"),
            marker
        );

        let mut empty = true;
        for cell in &day.cells {
            for view in &cell.appointments {
                empty = false;
                let _ = write!(
                    out,
                    "\n  {}  {} with Dr. {} ({} • {} min) [{}]",
                    cell.label,
                    view.patient.name,
                    view.doctor.name,
                    view.appointment.kind,
                    view.appointment.duration,
                    view.appointment.status.badge().label()
                );
            }
        }
        if empty {
            out.push_str("\n  (no appointments)");
        }
    }
    out
}

pub fn dashboard(summary: &DashboardSummary<'_>) -> String {
    let mut out = format!(
        "Dashboard as of {}\n\n{}",
        summary.as_of.format("%b %d, %Y %H:%M"),
        stats(&summary.stats)
    );
    out.push_str("\nUpcoming Appointments:");
    if summary.upcoming.is_empty() {
        out.push_str("\n  No upcoming appointments");
    }
    for view in &summary.upcoming {
        let _ = write!(out, "\n  {}", appointment(view));
    }
    out
}
