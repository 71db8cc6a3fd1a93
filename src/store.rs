use anyhow::Result;
use serde_json::Value;

pub const EMPLOYEE_COLLECTION: &str = "Employees";
pub const ATTENDANCE_COLLECTION: &str = "Attendance";
// The log collection holds exactly one document, which shares its name.
pub const LOG_COLLECTION: &str = "Log";

/// Handle to a fetched document. `etag` is the opaque version identifier
/// captured at fetch time; `replace` is keyed by this handle, so callers must
/// re-fetch before every mutation.
#[derive(Debug, Clone)]
pub struct Document {
    pub collection: String,
    pub id: String,
    pub etag: u64,
    pub body: Value,
}

/// The document-store client contract: id-addressed CRUD within named
/// collections. The store itself is remote and generic; no query language
/// beyond "id equals" and "all documents" is ever issued through this trait.
///
/// Implementations report every transport or serialization problem as an
/// error here; the repository layer is the boundary that absorbs them.
#[allow(async_fn_in_trait)]
pub trait DocumentStore {
    /// Idempotent collection bootstrap.
    async fn get_or_create_collection(&self, name: &str) -> Result<()>;

    /// Point lookup by primary key. `Ok(None)` means not found.
    async fn point_lookup(&self, collection: &str, id: &str) -> Result<Option<Document>>;

    /// Full collection scan. Ordering is store-defined and not stable.
    async fn scan(&self, collection: &str) -> Result<Vec<Document>>;

    /// Create a new document. The body must carry a string `id` field;
    /// an existing document with that id is a conflict, not an overwrite.
    async fn insert(&self, collection: &str, body: Value) -> Result<Document>;

    /// Whole-document overwrite keyed by a previously fetched handle.
    /// Last-writer-wins: no compare-and-swap is performed against `etag`.
    async fn replace(&self, doc: &Document, body: Value) -> Result<()>;
}
