//! Interactive console menu. Deliberately thin: it collects input, calls the
//! attendance and employee operations, and prints their outcomes.

use std::io::{self, Write};

use crate::attendance;
use crate::employee;
use crate::journal::Journal;
use crate::model::employee::{Employee, Manager};
use crate::repository::Repository;
use crate::store::{DocumentStore, EMPLOYEE_COLLECTION};

fn prompt(label: &str) -> String {
    print!("{label}");
    io::stdout().flush().ok();
    let mut buf = String::new();
    io::stdin().read_line(&mut buf).ok();
    buf.trim().to_string()
}

fn prompt_yes_no(label: &str) -> bool {
    loop {
        match prompt(label).to_lowercase().as_str() {
            "y" | "yes" => return true,
            "n" | "no" => return false,
            _ => println!("Invalid input, enter y or n."),
        }
    }
}

/// Main menu loop. Returns when the operator chooses to exit, after the
/// end-of-day status pass has run.
pub async fn main_menu<S: DocumentStore>(repo: &Repository<S>, journal: &Journal<'_, S>) {
    loop {
        println!();
        println!("What would you like to do?");
        println!("1. Add a new employee");
        println!("2. Mark attendance");
        println!("3. Exit");

        match prompt("Enter your choice: ").as_str() {
            "1" => add_employee_menu(repo, journal).await,
            "2" => attendance_menu(repo, journal).await,
            "3" => {
                if !attendance::mark_status_for_today(repo).await {
                    println!("Some attendance statuses could not be saved.");
                }
                return;
            }
            _ => println!("Invalid input, enter 1, 2 or 3."),
        }
    }
}

async fn add_employee_menu<S: DocumentStore>(repo: &Repository<S>, journal: &Journal<'_, S>) {
    loop {
        let candidate = read_employee_details();
        if employee::validate_new_employee(repo, &candidate).await {
            if employee::add_employee(repo, journal, &candidate).await {
                println!("Employee {} added.", candidate.id);
            } else {
                println!("The employee could not be saved, please try again.");
            }
        } else {
            println!("Invalid employee details: the id must be numeric and unused,");
            println!("and the email must not belong to an existing employee.");
        }
        if !prompt_yes_no("Add another employee? (y/n): ") {
            return;
        }
    }
}

fn read_employee_details() -> Employee {
    println!();
    println!("Enter the employee details.");
    let name = prompt("Name: ");
    let id = prompt("Id: ");
    let email = prompt("Email: ");
    let manager = if prompt_yes_no("Does this employee have a manager? (y/n): ") {
        println!("Enter the manager details.");
        Some(Manager {
            name: prompt("Name: "),
            id: prompt("Id: "),
            email: prompt("Email: "),
        })
    } else {
        None
    };
    Employee { id, name, email, manager }
}

async fn attendance_menu<S: DocumentStore>(repo: &Repository<S>, journal: &Journal<'_, S>) {
    let id = prompt("Enter the employee id: ");
    if repo.get_by_id(EMPLOYEE_COLLECTION, &id).await.is_none() {
        println!("No employee found with id {id}.");
        return;
    }

    loop {
        println!("1. Check in");
        println!("2. Check out");
        let result = match prompt("Enter your choice: ").as_str() {
            "1" => attendance::check_in(repo, journal, &id).await,
            "2" => attendance::check_out(repo, journal, &id).await,
            _ => {
                println!("Invalid input, enter 1 or 2.");
                continue;
            }
        };
        match result {
            Ok(()) => println!("Attendance marked for employee {id}."),
            Err(e) => println!("{e}"),
        }
        return;
    }
}
