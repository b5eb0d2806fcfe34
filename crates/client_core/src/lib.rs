use async_trait::async_trait;
use shared::{
    domain::{Bill, BillDraft, BillId, FileKey},
    error::ApiError,
    protocol::{BillScope, StoredFile},
};
use uuid::Uuid;

pub mod http;
pub mod memory;
pub mod session;

pub use http::HttpBillStore;
pub use memory::{InMemoryBillStore, StoreCall};
pub use session::{
    clear_session_user, current_session_user, store_session_user, FileSessionStore,
    MemorySessionStore, SessionError, SessionStore,
};

/// Receipt bytes waiting to be pushed to the storage service.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileUpload {
    pub email: String,
    pub file_name: String,
    pub mime_type: Option<String>,
    pub key: FileKey,
    pub bytes: Vec<u8>,
}

/// Remote bill storage as seen by the pages.
#[async_trait]
pub trait BillStore: Send + Sync {
    async fn list_bills(&self, scope: &BillScope) -> Result<Vec<Bill>, ApiError>;
    async fn create_bill(&self, draft: BillDraft) -> Result<Bill, ApiError>;
    async fn update_bill(&self, id: &BillId, draft: BillDraft) -> Result<Bill, ApiError>;
    async fn create_file(&self, upload: FileUpload) -> Result<StoredFile, ApiError>;
}

pub struct MissingBillStore;

#[async_trait]
impl BillStore for MissingBillStore {
    async fn list_bills(&self, _scope: &BillScope) -> Result<Vec<Bill>, ApiError> {
        Err(ApiError::transport("bill storage backend unavailable"))
    }

    async fn create_bill(&self, _draft: BillDraft) -> Result<Bill, ApiError> {
        Err(ApiError::transport("bill storage backend unavailable"))
    }

    async fn update_bill(&self, id: &BillId, _draft: BillDraft) -> Result<Bill, ApiError> {
        Err(ApiError::transport(format!(
            "bill storage backend unavailable for bill {id}"
        )))
    }

    async fn create_file(&self, upload: FileUpload) -> Result<StoredFile, ApiError> {
        Err(ApiError::transport(format!(
            "bill storage backend unavailable for file {}",
            upload.file_name
        )))
    }
}

/// Storage key for a receipt: owner email, a fresh identifier, then the file name.
pub fn file_storage_key(email: &str, file_name: &str) -> FileKey {
    FileKey(format!("{email}/{}-{file_name}", Uuid::new_v4()))
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
