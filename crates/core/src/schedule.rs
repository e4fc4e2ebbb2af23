//! Weekly appointment calendar.
//!
//! The grid covers Monday to Sunday of the anchor date's week and has one row per slot label.
//! A cell holds the appointments whose slot label equals the row label and whose date falls on
//! the column's calendar day; the time-of-day part of the date plays no role. Appointments whose
//! patient or doctor does not resolve are left out of every cell.
//!
//! Navigation is by value: [`WeekCursor::previous`] and [`WeekCursor::next`] move the anchor by
//! seven days and the grid is rebuilt from scratch. Nothing is written back; there is no
//! rescheduling.

use crate::constants::{DAYS_IN_WEEK, DEFAULT_TIME_SLOTS};
use crate::query::{appointment_matches, SearchTerm};
use crate::store::{AppointmentView, ClinicStore};
use chrono::{Datelike, Days, Duration, NaiveDate};
use serde::Serialize;

/// Monday of the week containing `anchor`, or `None` if that falls before the earliest
/// representable date.
pub fn week_start(anchor: NaiveDate) -> Option<NaiveDate> {
    anchor.checked_sub_days(Days::new(u64::from(anchor.weekday().num_days_from_monday())))
}

/// The seven days, Monday first, of the week containing `anchor`.
///
/// `None` if any day of that week is outside the representable calendar.
pub fn week_days(anchor: NaiveDate) -> Option<[NaiveDate; DAYS_IN_WEEK]> {
    let mut day = week_start(anchor)?;
    let mut days = [day; DAYS_IN_WEEK];
    for slot in days.iter_mut().skip(1) {
        day = day.succ_opt()?;
        *slot = day;
    }
    Some(days)
}

/// Which week the calendar shows.
///
/// A cursor always points at a complete Monday-to-Sunday week.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct WeekCursor {
    anchor: NaiveDate,
    days: [NaiveDate; DAYS_IN_WEEK],
}

impl WeekCursor {
    /// `None` if the week around `anchor` runs off either end of the calendar.
    pub fn new(anchor: NaiveDate) -> Option<Self> {
        week_days(anchor).map(|days| Self { anchor, days })
    }

    pub fn anchor(self) -> NaiveDate {
        self.anchor
    }

    pub fn days(self) -> [NaiveDate; DAYS_IN_WEEK] {
        self.days
    }

    pub fn start(self) -> NaiveDate {
        self.days[0]
    }

    pub fn end(self) -> NaiveDate {
        self.days[DAYS_IN_WEEK - 1]
    }

    pub fn previous(self) -> Option<Self> {
        self.shifted(-1)
    }

    pub fn next(self) -> Option<Self> {
        self.shifted(1)
    }

    /// Move the anchor by `weeks` whole weeks (negative goes back).
    ///
    /// `None` if the target week is outside the representable calendar.
    pub fn shifted(self, weeks: i64) -> Option<Self> {
        let delta = Duration::try_weeks(weeks)?;
        Self::new(self.anchor.checked_add_signed(delta)?)
    }
}

/// One cell of the grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct SlotCell<'a> {
    pub label: String,
    pub appointments: Vec<AppointmentView<'a>>,
}

/// One column of the grid.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DaySchedule<'a> {
    pub date: NaiveDate,
    pub is_today: bool,
    pub cells: Vec<SlotCell<'a>>,
}

impl DaySchedule<'_> {
    /// Abbreviated weekday name, e.g. `Mon`.
    pub fn weekday_label(&self) -> String {
        self.date.format("%a").to_string()
    }

    pub fn cell(&self, label: &str) -> Option<&SlotCell<'_>> {
        self.cells.iter().find(|c| c.label == label)
    }
}

/// A fully built week.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WeekSchedule<'a> {
    pub start: NaiveDate,
    pub end: NaiveDate,
    pub slots: Vec<String>,
    pub days: Vec<DaySchedule<'a>>,
}

impl<'a> WeekSchedule<'a> {
    /// Header text such as `Jun 10 - Jun 16, 2024`.
    pub fn range_label(&self) -> String {
        format!(
            "{} - {}",
            self.start.format("%b %-d"),
            self.end.format("%b %-d, %Y")
        )
    }

    pub fn day(&self, date: NaiveDate) -> Option<&DaySchedule<'a>> {
        self.days.iter().find(|d| d.date == date)
    }

    /// The cell at (`date`, `label`), if both are part of this week.
    pub fn cell(&self, date: NaiveDate, label: &str) -> Option<&SlotCell<'a>> {
        self.day(date)?.cells.iter().find(|c| c.label == label)
    }

    /// Number of appointments placed anywhere in the grid.
    pub fn appointment_count(&self) -> usize {
        self.days
            .iter()
            .flat_map(|d| d.cells.iter())
            .map(|c| c.appointments.len())
            .sum()
    }
}

/// Builds [`WeekSchedule`]s from a store.
#[derive(Clone, Debug)]
pub struct WeekScheduleBuilder<'s> {
    store: &'s ClinicStore,
    slots: Vec<String>,
    search: SearchTerm,
}

impl<'s> WeekScheduleBuilder<'s> {
    /// A builder with the default nine hourly slots and no search filter.
    pub fn new(store: &'s ClinicStore) -> Self {
        Self {
            store,
            slots: DEFAULT_TIME_SLOTS.iter().map(|s| s.to_string()).collect(),
            search: SearchTerm::default(),
        }
    }

    /// Replace the slot labels (rows), keeping the given order.
    pub fn with_slots<I, S>(mut self, labels: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.slots = labels.into_iter().map(Into::into).collect();
        self
    }

    /// Only place appointments whose patient name, doctor name or type matches.
    pub fn with_search(mut self, search: SearchTerm) -> Self {
        self.search = search;
        self
    }

    /// Build the grid for the week `cursor` points at.
    pub fn build(&self, cursor: WeekCursor) -> WeekSchedule<'s> {
        let store = self.store;
        let today = store.today();

        let days: Vec<DaySchedule<'s>> = cursor
            .days()
            .into_iter()
            .map(|date| DaySchedule {
                date,
                is_today: date == today,
                cells: self
                    .slots
                    .iter()
                    .map(|label| SlotCell {
                        label: label.clone(),
                        appointments: store
                            .appointments()
                            .iter()
                            .filter(|a| a.time.as_str() == label && a.date.date() == date)
                            .filter_map(|a| store.resolve_appointment(a))
                            .filter(|view| appointment_matches(view, &self.search))
                            .collect(),
                    })
                    .collect(),
            })
            .collect();

        let schedule = WeekSchedule {
            start: cursor.start(),
            end: cursor.end(),
            slots: self.slots.clone(),
            days,
        };

        tracing::debug!(
            week = %schedule.range_label(),
            placed = schedule.appointment_count(),
            "built week schedule"
        );

        schedule
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::fixtures::*;
    use chrono::Weekday;
    use clinic_data::{AppointmentStatus, SeedDataset};

    fn store() -> ClinicStore {
        store_at(clinic(), at("2024-06-12", "12:00"))
    }

    fn week(date: &str) -> WeekCursor {
        WeekCursor::new(day(date)).expect("week within calendar range")
    }

    #[test]
    fn week_starts_on_monday() {
        assert_eq!(week_start(day("2024-06-12")), Some(day("2024-06-10")));
        assert_eq!(week_start(day("2024-06-10")), Some(day("2024-06-10")));
        // Sunday belongs to the week that started six days earlier.
        assert_eq!(week_start(day("2024-06-16")), Some(day("2024-06-10")));
        assert_eq!(week_start(day("2024-06-17")), Some(day("2024-06-17")));
    }

    #[test]
    fn week_days_span_monday_to_sunday() {
        let days = week_days(day("2024-06-12")).expect("week in range");
        assert_eq!(days[0], day("2024-06-10"));
        assert_eq!(days[6], day("2024-06-16"));
        assert!(days.windows(2).all(|w| w[1] == w[0] + Duration::days(1)));
    }

    #[test]
    fn week_days_cross_month_and_year_boundaries() {
        let days = week_days(day("2025-01-01")).expect("week in range");
        assert_eq!(days[0], day("2024-12-30"));
        assert_eq!(days[6], day("2025-01-05"));
    }

    #[test]
    fn cursor_navigation_moves_whole_weeks() {
        let cursor = week("2024-06-12");
        assert_eq!(cursor.start(), day("2024-06-10"));
        assert_eq!(cursor.end(), day("2024-06-16"));

        let next = cursor.next().expect("next week");
        assert_eq!(next.anchor(), day("2024-06-19"));
        assert_eq!(cursor.previous().map(WeekCursor::anchor), Some(day("2024-06-05")));
        assert_eq!(next.previous(), Some(cursor));
        assert_eq!(cursor.shifted(-3).map(WeekCursor::start), Some(day("2024-05-20")));
    }

    #[test]
    fn weeks_beyond_the_calendar_are_rejected() {
        let cursor = week("2024-06-12");
        assert_eq!(cursor.shifted(100_000_000), None);
        assert_eq!(cursor.shifted(-100_000_000), None);
        assert_eq!(cursor.shifted(i64::MAX), None);
        assert_eq!(cursor.shifted(i64::MIN), None);

        // The week of the last representable day only exists if that day is a Sunday.
        assert_eq!(
            WeekCursor::new(NaiveDate::MAX).is_some(),
            NaiveDate::MAX.weekday() == Weekday::Sun
        );
        assert_eq!(
            week_start(NaiveDate::MIN).is_some(),
            NaiveDate::MIN.weekday() == Weekday::Mon
        );

        // Any week ending in the calendar's last seven days has no successor.
        for back in 0..DAYS_IN_WEEK as u64 {
            let anchor = NaiveDate::MAX
                .checked_sub_days(Days::new(back))
                .expect("within calendar");
            if let Some(cursor) = WeekCursor::new(anchor) {
                assert_eq!(cursor.next(), None);
            }
        }
    }

    #[test]
    fn grid_is_seven_by_nine() {
        let store = store();
        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));
        assert_eq!(schedule.days.len(), 7);
        assert!(schedule.days.iter().all(|d| d.cells.len() == 9));
        assert_eq!(schedule.slots.first().map(String::as_str), Some("09:00 AM"));
        assert_eq!(schedule.slots.last().map(String::as_str), Some("05:00 PM"));
        assert_eq!(schedule.days[0].weekday_label(), "Mon");
        assert_eq!(schedule.days[6].weekday_label(), "Sun");
    }

    #[test]
    fn appointment_lands_only_in_its_day_and_slot() {
        let store = store();
        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));
        let friday = day("2024-06-14");

        for d in &schedule.days {
            for cell in &d.cells {
                let has_a3 = cell
                    .appointments
                    .iter()
                    .any(|v| v.appointment.id == "a3");
                let expected = d.date == friday && cell.label == "10:00 AM";
                assert_eq!(has_a3, expected, "{} {}", d.date, cell.label);
            }
        }
    }

    #[test]
    fn time_of_day_does_not_affect_bucketing() {
        // a1 is dated 00:01 but labelled 09:00 AM; a2 is 23:59 labelled 10:00 AM.
        let store = store();
        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));
        let wednesday = day("2024-06-12");

        let nine = schedule.cell(wednesday, "09:00 AM").expect("cell exists");
        assert_eq!(nine.appointments.len(), 1);
        assert_eq!(nine.appointments[0].appointment.id, "a1");

        let ten = schedule.cell(wednesday, "10:00 AM").expect("cell exists");
        assert_eq!(ten.appointments.len(), 1);
        assert_eq!(ten.appointments[0].appointment.id, "a2");
    }

    #[test]
    fn dangling_appointments_are_left_out() {
        let store = store();
        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));

        // a4 shares a3's cell but has no patient; a5 has no doctor.
        let cell = schedule
            .cell(day("2024-06-14"), "10:00 AM")
            .expect("cell exists");
        assert_eq!(cell.appointments.len(), 1);
        assert!(schedule
            .cell(day("2024-06-13"), "11:00 AM")
            .expect("cell exists")
            .appointments
            .is_empty());
        assert_eq!(schedule.appointment_count(), 3);
    }

    #[test]
    fn a_cell_can_hold_many_appointments() {
        let mut dataset = clinic();
        let slot_time = at("2024-06-11", "10:00");
        dataset.appointments = (0..4)
            .map(|i| {
                appointment(
                    &format!("busy{i}"),
                    "p1",
                    "d1",
                    slot_time,
                    "10:00 AM",
                    AppointmentStatus::Scheduled,
                )
            })
            .collect();
        let store = store_at(dataset, at("2024-06-12", "12:00"));

        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));
        let cell = schedule
            .cell(day("2024-06-11"), "10:00 AM")
            .expect("cell exists");
        let ids: Vec<&str> = cell
            .appointments
            .iter()
            .map(|v| v.appointment.id.as_str())
            .collect();
        assert_eq!(ids, vec!["busy0", "busy1", "busy2", "busy3"]);
    }

    #[test]
    fn unlisted_slot_labels_are_never_shown() {
        let mut dataset = clinic();
        dataset.appointments = vec![appointment(
            "early",
            "p1",
            "d1",
            at("2024-06-12", "08:00"),
            "08:00 AM",
            AppointmentStatus::Scheduled,
        )];
        let store = store_at(dataset, at("2024-06-12", "12:00"));

        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));
        assert_eq!(schedule.appointment_count(), 0);

        let schedule = WeekScheduleBuilder::new(&store)
            .with_slots(["08:00 AM"])
            .build(week("2024-06-12"));
        assert_eq!(schedule.appointment_count(), 1);
        assert_eq!(schedule.slots, vec!["08:00 AM".to_string()]);
    }

    #[test]
    fn other_weeks_are_empty_and_rebuilt_from_scratch() {
        let store = store();
        let builder = WeekScheduleBuilder::new(&store);
        let cursor = week("2024-06-12");

        let next = builder.build(cursor.next().expect("next week"));
        assert_eq!(next.start, day("2024-06-17"));
        assert_eq!(next.appointment_count(), 0);

        let back = cursor
            .next()
            .and_then(WeekCursor::previous)
            .expect("round trip");
        let back = builder.build(back);
        assert_eq!(back, builder.build(cursor));
    }

    #[test]
    fn today_column_is_flagged() {
        let store = store();
        let schedule = WeekScheduleBuilder::new(&store).build(week("2024-06-12"));
        let flagged: Vec<NaiveDate> = schedule
            .days
            .iter()
            .filter(|d| d.is_today)
            .map(|d| d.date)
            .collect();
        assert_eq!(flagged, vec![day("2024-06-12")]);

        let next = WeekScheduleBuilder::new(&store).build(week("2024-06-19"));
        assert!(next.days.iter().all(|d| !d.is_today));
    }

    #[test]
    fn search_narrows_the_grid() {
        let store = store();
        let schedule = WeekScheduleBuilder::new(&store)
            .with_search(SearchTerm::new("robert"))
            .build(week("2024-06-12"));
        assert_eq!(schedule.appointment_count(), 1);
        let cell = schedule
            .cell(day("2024-06-12"), "10:00 AM")
            .expect("cell exists");
        assert_eq!(cell.appointments[0].appointment.id, "a2");
    }

    #[test]
    fn range_label_matches_calendar_header() {
        let store = store_at(SeedDataset::default(), at("2024-06-12", "12:00"));
        let builder = WeekScheduleBuilder::new(&store);
        let schedule = builder.build(week("2024-06-12"));
        assert_eq!(schedule.range_label(), "Jun 10 - Jun 16, 2024");

        let schedule = builder.build(week("2025-01-01"));
        assert_eq!(schedule.range_label(), "Dec 30 - Jan 5, 2025");
    }
}
