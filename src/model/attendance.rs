use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use strum_macros::{Display, EnumString};

/// End-of-day marking outcome. Absent until the closing pass runs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, Display, EnumString)]
pub enum DayStatus {
    Present,
    Absent,
}

/// One calendar day inside an employee's attendance record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DayEntry {
    pub date: NaiveDate,
    pub status: Option<DayStatus>,
    pub check_in: Option<NaiveTime>,
    pub check_out: Option<NaiveTime>,
}

impl DayEntry {
    pub fn empty(date: NaiveDate) -> Self {
        Self {
            date,
            status: None,
            check_in: None,
            check_out: None,
        }
    }
}

/// Per-employee attendance document, keyed by the employee id.
/// Entries are kept newest-first: new days are inserted at the front.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AttendanceRecord {
    pub id: String,
    #[serde(rename = "attendance")]
    pub entries: Vec<DayEntry>,
}

impl AttendanceRecord {
    /// A fresh record seeded with a single empty entry for the given day.
    pub fn new(id: &str, date: NaiveDate) -> Self {
        Self {
            id: id.to_string(),
            entries: vec![DayEntry::empty(date)],
        }
    }

    /// First entry matching the given date. At most one is expected per day;
    /// if that invariant is ever broken, first match wins.
    pub fn entry_for(&self, date: NaiveDate) -> Option<&DayEntry> {
        self.entries.iter().find(|e| e.date == date)
    }

    pub fn entry_for_mut(&mut self, date: NaiveDate) -> Option<&mut DayEntry> {
        self.entries.iter_mut().find(|e| e.date == date)
    }
}
