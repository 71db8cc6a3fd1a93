use chrono::Local;
use derive_more::Display;
use tracing::{debug, info};

use crate::journal::Journal;
use crate::model::attendance::{AttendanceRecord, DayEntry, DayStatus};
use crate::repository::Repository;
use crate::store::{ATTENDANCE_COLLECTION, DocumentStore};

/// Rejection reasons for the per-day transitions. The display text is what
/// the operator sees on the console.
#[derive(Debug, Clone, PartialEq, Eq, Display)]
pub enum AttendanceError {
    #[display(fmt = "Employee {} has already checked in today", _0)]
    AlreadyCheckedIn(String),
    #[display(fmt = "Employee {} has already checked out today", _0)]
    AlreadyCheckedOut(String),
    #[display(fmt = "Employee {} has not checked in today", _0)]
    NotCheckedIn(String),
    #[display(fmt = "No attendance entry exists for today; run the start-of-day pass first")]
    NoEntryForToday,
    #[display(fmt = "No attendance record found for employee {}", _0)]
    RecordNotFound(String),
    #[display(fmt = "The attendance store rejected the update, please try again")]
    StoreUnavailable,
}

/// Start-of-day pass: give every attendance record an empty entry for today.
/// Idempotent — a record that already has one is left untouched, without a
/// write. One record failing to persist flips the aggregate result but does
/// not stop the pass.
pub async fn ensure_today_entries<S: DocumentStore>(repo: &Repository<S>) -> bool {
    let today = Local::now().date_naive();
    let Some(docs) = repo.get_all(ATTENDANCE_COLLECTION).await else {
        return false;
    };

    let mut all_ok = true;
    for doc in docs {
        let Some(mut record) = repo.decode::<AttendanceRecord>(&doc) else {
            all_ok = false;
            continue;
        };
        if record.entry_for(today).is_some() {
            continue;
        }
        record.entries.insert(0, DayEntry::empty(today));
        all_ok &= repo.replace(&doc, &record).await;
    }
    all_ok
}

/// Check the employee in for today.
///
/// "Today" is taken at the instant of this call, so a session left open
/// across midnight can find no entry for the new date until the start-of-day
/// pass runs again; that surfaces as `NoEntryForToday`.
pub async fn check_in<S: DocumentStore>(
    repo: &Repository<S>,
    journal: &Journal<'_, S>,
    id: &str,
) -> Result<(), AttendanceError> {
    let (doc, mut record) = repo
        .get_typed::<AttendanceRecord>(ATTENDANCE_COLLECTION, id)
        .await
        .ok_or_else(|| AttendanceError::RecordNotFound(id.to_string()))?;

    let now = Local::now();
    let entry = record
        .entry_for_mut(now.date_naive())
        .ok_or(AttendanceError::NoEntryForToday)?;
    if entry.check_in.is_some() {
        return Err(AttendanceError::AlreadyCheckedIn(id.to_string()));
    }

    entry.check_in = Some(now.time());
    if !repo.replace(&doc, &record).await {
        // Nothing survives in memory; the next attempt re-fetches.
        return Err(AttendanceError::StoreUnavailable);
    }

    info!(employee_id = id, "Checked in");
    journal.append(&format!("Employee checked in: {id}")).await;
    Ok(())
}

/// Check the employee out for today.
///
/// Classification over the first entry matching today, in priority order:
/// neither time set rejects as not-checked-in, check-in only is eligible,
/// both set rejects as already-checked-out. A missing entry falls through to
/// not-checked-in (the initial value below), deliberately: it is the
/// long-standing fallback for a skipped start-of-day pass.
pub async fn check_out<S: DocumentStore>(
    repo: &Repository<S>,
    journal: &Journal<'_, S>,
    id: &str,
) -> Result<(), AttendanceError> {
    let (doc, mut record) = repo
        .get_typed::<AttendanceRecord>(ATTENDANCE_COLLECTION, id)
        .await
        .ok_or_else(|| AttendanceError::RecordNotFound(id.to_string()))?;

    let now = Local::now();
    let today = now.date_naive();

    let mut not_checked_in = true;
    let mut already_checked_out = false;
    for entry in &record.entries {
        if entry.date == today {
            if entry.check_in.is_none() && entry.check_out.is_none() {
                not_checked_in = true;
            } else if entry.check_in.is_some() && entry.check_out.is_none() {
                not_checked_in = false;
            } else if entry.check_in.is_some() && entry.check_out.is_some() {
                already_checked_out = true;
            }
            break;
        }
    }
    if already_checked_out {
        return Err(AttendanceError::AlreadyCheckedOut(id.to_string()));
    }
    if not_checked_in {
        return Err(AttendanceError::NotCheckedIn(id.to_string()));
    }

    if let Some(entry) = record
        .entries
        .iter_mut()
        .find(|e| e.date == today && e.check_in.is_some() && e.check_out.is_none())
    {
        entry.check_out = Some(now.time());
    }
    if !repo.replace(&doc, &record).await {
        return Err(AttendanceError::StoreUnavailable);
    }

    info!(employee_id = id, "Checked out");
    journal.append(&format!("Employee checked out: {id}")).await;
    Ok(())
}

/// End-of-day pass: mark today's entry Present or Absent on every record,
/// depending on whether a check-in happened. Each record persists
/// independently; one failure flips the aggregate result and processing
/// continues with the rest.
pub async fn mark_status_for_today<S: DocumentStore>(repo: &Repository<S>) -> bool {
    let today = Local::now().date_naive();
    let Some(docs) = repo.get_all(ATTENDANCE_COLLECTION).await else {
        return false;
    };

    let mut all_ok = true;
    for doc in docs {
        let Some(mut record) = repo.decode::<AttendanceRecord>(&doc) else {
            all_ok = false;
            continue;
        };
        for entry in record.entries.iter_mut().filter(|e| e.date == today) {
            if entry.check_in.is_some() && entry.status != Some(DayStatus::Present) {
                entry.status = Some(DayStatus::Present);
            } else if entry.check_in.is_none() && entry.status != Some(DayStatus::Absent) {
                entry.status = Some(DayStatus::Absent);
            }
        }
        debug!(employee_id = %record.id, "Marking day status");
        all_ok &= repo.replace(&doc, &record).await;
    }
    all_ok
}
