//! Constants used throughout the clinic core crate.

/// Slot labels of the weekly calendar, in display order.
///
/// Appointments are bucketed by exact string equality against these labels.
pub const DEFAULT_TIME_SLOTS: [&str; 9] = [
    "09:00 AM", "10:00 AM", "11:00 AM", "12:00 PM", "01:00 PM", "02:00 PM", "03:00 PM",
    "04:00 PM", "05:00 PM",
];

/// Maximum number of rows in the dashboard's upcoming appointments list.
pub const UPCOMING_LIMIT: usize = 5;

/// Number of days rendered by the weekly calendar.
pub const DAYS_IN_WEEK: usize = 7;

/// Environment variable naming a seed YAML file to load instead of the embedded dataset.
pub const SEED_FILE_ENV: &str = "CLINIC_SEED_FILE";

/// Environment variable pinning "now" to a fixed local date or date-time.
pub const NOW_ENV: &str = "CLINIC_NOW";
