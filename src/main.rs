mod attendance;
mod cli;
mod config;
mod employee;
mod journal;
mod memstore;
mod model;
mod repository;
mod store;

use dotenvy::dotenv;
use tracing::{info, warn};
use tracing_appender::rolling;

use config::Config;
use journal::Journal;
use memstore::MemoryStore;
use repository::Repository;

#[tokio::main]
async fn main() {
    dotenv().ok();

    let config = Config::from_env();

    // Rolling daily log; console stays reserved for the operator dialog.
    let file_appender = rolling::daily(&config.log_dir, "ams.log");
    let (non_blocking, _guard) = tracing_appender::non_blocking(file_appender);

    tracing_subscriber::fmt()
        .with_writer(non_blocking)
        .with_max_level(tracing::Level::DEBUG)
        .with_ansi(false)
        .with_target(false)
        .with_level(true)
        .pretty()
        .init();

    info!(endpoint = %config.store_endpoint, "Attendance tracker starting...");

    let store = MemoryStore::connect(&config.store_endpoint, &config.store_key);
    let repo = Repository::new(store);

    if !repo.ensure_collections().await {
        eprintln!("Could not reach the attendance store, exiting.");
        return;
    }
    let journal = Journal::new(&repo);
    if !journal.ensure_log_document().await {
        eprintln!("Could not create the log document, exiting.");
        return;
    }

    // Start-of-day pass; check-in/out for today are reachable after this.
    if !attendance::ensure_today_entries(&repo).await {
        warn!("Start-of-day pass left some records without a fresh entry");
        println!("Warning: some attendance records could not be prepared for today.");
    }

    cli::main_menu(&repo, &journal).await;

    info!("Attendance tracker shut down");
}
