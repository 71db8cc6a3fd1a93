use chrono::Local;
use tracing::warn;

use crate::model::log::{LogBook, LogMessage};
use crate::repository::Repository;
use crate::store::{DocumentStore, LOG_COLLECTION};

/// Sink for the running event log. Injected into every state-changing
/// operation and invoked directly after a successful mutation; the old-style
/// handler registration this replaces is gone, so there is nothing to
/// deduplicate.
pub struct Journal<'a, S> {
    repo: &'a Repository<S>,
}

impl<'a, S: DocumentStore> Journal<'a, S> {
    pub fn new(repo: &'a Repository<S>) -> Self {
        Self { repo }
    }

    /// Create the well-known log document once at bootstrap.
    pub async fn ensure_log_document(&self) -> bool {
        self.repo
            .create_if_absent(LOG_COLLECTION, LOG_COLLECTION, &LogBook::empty(LOG_COLLECTION))
            .await
            .is_some()
    }

    /// Prepend a message to the log document. A failing append is isolated:
    /// it is traced as a warning and never fails the calling operation.
    pub async fn append(&self, text: &str) {
        let Some((doc, mut book)) = self
            .repo
            .get_typed::<LogBook>(LOG_COLLECTION, LOG_COLLECTION)
            .await
        else {
            warn!(text, "Log document unavailable, dropping journal entry");
            return;
        };

        book.messages.insert(
            0,
            LogMessage {
                time: Local::now().naive_local(),
                text: text.to_string(),
            },
        );

        if !self.repo.replace(&doc, &book).await {
            warn!(text, "Journal entry could not be persisted");
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::memstore::MemoryStore;

    async fn repo() -> Repository<MemoryStore> {
        let repo = Repository::new(MemoryStore::connect("https://store.local:443/", "key"));
        assert!(repo.ensure_collections().await);
        repo
    }

    async fn read_log(repo: &Repository<MemoryStore>) -> LogBook {
        let (_, book) = repo
            .get_typed::<LogBook>(LOG_COLLECTION, LOG_COLLECTION)
            .await
            .expect("log document");
        book
    }

    #[tokio::test]
    async fn appends_are_newest_first() {
        let repo = repo().await;
        let journal = Journal::new(&repo);
        assert!(journal.ensure_log_document().await);

        journal.append("first").await;
        journal.append("second").await;

        let book = read_log(&repo).await;
        assert_eq!(book.messages.len(), 2);
        assert_eq!(book.messages[0].text, "second");
        assert_eq!(book.messages[1].text, "first");
    }

    #[tokio::test]
    async fn ensure_log_document_is_create_once() {
        let repo = repo().await;
        let journal = Journal::new(&repo);
        assert!(journal.ensure_log_document().await);
        journal.append("kept").await;

        // A second bootstrap must not wipe the accumulated messages.
        assert!(journal.ensure_log_document().await);
        assert_eq!(read_log(&repo).await.messages.len(), 1);
    }

    #[tokio::test]
    async fn append_without_log_document_is_isolated() {
        let repo = repo().await;
        let journal = Journal::new(&repo);

        // No ensure_log_document: the append has nowhere to go and must
        // swallow that rather than panic or surface an error.
        journal.append("lost").await;
    }
}
