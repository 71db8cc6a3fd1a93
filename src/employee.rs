use chrono::Local;
use tracing::{info, warn};

use crate::journal::Journal;
use crate::model::attendance::AttendanceRecord;
use crate::model::employee::Employee;
use crate::repository::Repository;
use crate::store::{ATTENDANCE_COLLECTION, DocumentStore, EMPLOYEE_COLLECTION};

/// Validate a candidate before anything is written.
///
/// The id (and the manager's id, when present) must parse as an integer;
/// a parse failure rejects immediately without the uniqueness scan. The scan
/// then compares both id and email against every existing employee. A failed
/// scan rejects the candidate: uniqueness cannot be established, so nothing
/// may be created.
pub async fn validate_new_employee<S: DocumentStore>(
    repo: &Repository<S>,
    candidate: &Employee,
) -> bool {
    if candidate.id.parse::<i64>().is_err() {
        return false;
    }
    if let Some(manager) = &candidate.manager {
        if manager.id.parse::<i64>().is_err() {
            return false;
        }
    }

    let Some(docs) = repo.get_all(EMPLOYEE_COLLECTION).await else {
        warn!(id = %candidate.id, "Employee scan failed, rejecting candidate");
        return false;
    };
    let mut valid = true;
    for doc in &docs {
        let Some(existing) = repo.decode::<Employee>(doc) else {
            continue;
        };
        valid &= existing.id != candidate.id;
        valid &= existing.email != candidate.email;
    }
    valid
}

/// Create the employee document, then seed an attendance record holding one
/// empty entry for today. Callers validate first; each successful step is
/// journaled.
pub async fn add_employee<S: DocumentStore>(
    repo: &Repository<S>,
    journal: &Journal<'_, S>,
    employee: &Employee,
) -> bool {
    if repo
        .create_if_absent(EMPLOYEE_COLLECTION, &employee.id, employee)
        .await
        .is_none()
    {
        return false;
    }
    info!(id = %employee.id, "New employee added");
    journal
        .append(&format!("New employee added: {}", employee.id))
        .await;

    let record = AttendanceRecord::new(&employee.id, Local::now().date_naive());
    if repo
        .create_if_absent(ATTENDANCE_COLLECTION, &employee.id, &record)
        .await
        .is_none()
    {
        return false;
    }
    journal
        .append(&format!("Attendance record created: {}", employee.id))
        .await;
    true
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memstore::MemoryStore;
    use crate::model::employee::Manager;

    fn employee(id: &str, email: &str) -> Employee {
        Employee {
            id: id.to_string(),
            name: format!("Test Employee {id}"),
            email: email.to_string(),
            manager: Some(Manager {
                id: "10000".to_string(),
                name: "Test Manager".to_string(),
                email: "manager@testcompany.com".to_string(),
            }),
        }
    }

    async fn repo() -> Repository<MemoryStore> {
        let repo = Repository::new(MemoryStore::connect("https://store.local:443/", "key"));
        assert!(repo.ensure_collections().await);
        repo
    }

    #[tokio::test]
    async fn numeric_unique_candidate_is_valid() {
        let repo = repo().await;
        assert!(validate_new_employee(&repo, &employee("9999", "e9999@testcompany.com")).await);
    }

    #[tokio::test]
    async fn non_numeric_id_is_rejected_regardless_of_uniqueness() {
        let repo = repo().await;
        assert!(!validate_new_employee(&repo, &employee("abc", "abc@testcompany.com")).await);
    }

    #[tokio::test]
    async fn non_numeric_manager_id_is_rejected() {
        let repo = repo().await;
        let mut candidate = employee("9999", "e9999@testcompany.com");
        candidate.manager.as_mut().expect("manager").id = "one".to_string();
        assert!(!validate_new_employee(&repo, &candidate).await);
    }

    #[tokio::test]
    async fn duplicate_id_or_email_is_rejected() {
        let repo = repo().await;
        let journal = Journal::new(&repo);
        assert!(journal.ensure_log_document().await);
        assert!(add_employee(&repo, &journal, &employee("1", "one@testcompany.com")).await);

        assert!(!validate_new_employee(&repo, &employee("1", "other@testcompany.com")).await);
        assert!(!validate_new_employee(&repo, &employee("2", "one@testcompany.com")).await);
        assert!(validate_new_employee(&repo, &employee("2", "two@testcompany.com")).await);
    }

    #[tokio::test]
    async fn add_employee_seeds_attendance_for_today() {
        let repo = repo().await;
        let journal = Journal::new(&repo);
        assert!(journal.ensure_log_document().await);

        assert!(add_employee(&repo, &journal, &employee("7", "seven@testcompany.com")).await);

        let (_, record) = repo
            .get_typed::<AttendanceRecord>(ATTENDANCE_COLLECTION, "7")
            .await
            .expect("attendance record");
        assert_eq!(record.entries.len(), 1);
        assert_eq!(record.entries[0].date, Local::now().date_naive());
        assert!(record.entries[0].check_in.is_none());
    }
}
