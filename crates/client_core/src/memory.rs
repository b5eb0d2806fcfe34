//! Process-local bill storage, used offline and as the test double for the pages.

use async_trait::async_trait;
use shared::{
    domain::{Bill, BillDraft, BillId},
    error::{ApiError, ErrorCode},
    protocol::{BillScope, StoredFile},
};
use tokio::sync::Mutex;

use crate::{BillStore, FileUpload};

const MEMORY_FILE_HOST: &str = "https://storage.billed.local";

#[derive(Debug, Clone, PartialEq)]
pub enum StoreCall {
    List(BillScope),
    Create(BillDraft),
    Update(BillId),
    CreateFile(FileUpload),
}

#[derive(Default)]
struct MemoryState {
    bills: Vec<Bill>,
    next_id: u64,
    fail_next_list: Option<ApiError>,
    fail_next_create: Option<ApiError>,
    calls: Vec<StoreCall>,
}

#[derive(Default)]
pub struct InMemoryBillStore {
    state: Mutex<MemoryState>,
}

impl InMemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_bills(bills: Vec<Bill>) -> Self {
        Self {
            state: Mutex::new(MemoryState {
                next_id: bills.len() as u64,
                bills,
                ..MemoryState::default()
            }),
        }
    }

    /// The next `list_bills` call fails with `err`; later calls succeed again.
    pub async fn fail_next_list(&self, err: ApiError) {
        self.state.lock().await.fail_next_list = Some(err);
    }

    /// The next `create_bill` call fails with `err`.
    pub async fn fail_next_create(&self, err: ApiError) {
        self.state.lock().await.fail_next_create = Some(err);
    }

    pub async fn calls(&self) -> Vec<StoreCall> {
        self.state.lock().await.calls.clone()
    }

    pub async fn bills(&self) -> Vec<Bill> {
        self.state.lock().await.bills.clone()
    }
}

#[async_trait]
impl BillStore for InMemoryBillStore {
    async fn list_bills(&self, scope: &BillScope) -> Result<Vec<Bill>, ApiError> {
        let mut guard = self.state.lock().await;
        guard.calls.push(StoreCall::List(scope.clone()));
        if let Some(err) = guard.fail_next_list.take() {
            return Err(err);
        }
        Ok(guard
            .bills
            .iter()
            .filter(|bill| scope.email.as_deref().map_or(true, |email| bill.email == email))
            .cloned()
            .collect())
    }

    async fn create_bill(&self, draft: BillDraft) -> Result<Bill, ApiError> {
        let mut guard = self.state.lock().await;
        guard.calls.push(StoreCall::Create(draft.clone()));
        if let Some(err) = guard.fail_next_create.take() {
            return Err(err);
        }
        guard.next_id += 1;
        let bill = Bill::from_draft(BillId(format!("bill-{:04}", guard.next_id)), draft);
        guard.bills.push(bill.clone());
        Ok(bill)
    }

    async fn update_bill(&self, id: &BillId, draft: BillDraft) -> Result<Bill, ApiError> {
        let mut guard = self.state.lock().await;
        guard.calls.push(StoreCall::Update(id.clone()));
        let Some(existing) = guard.bills.iter_mut().find(|bill| &bill.id == id) else {
            return Err(ApiError::new(
                ErrorCode::NotFound,
                format!("bill {id} not found"),
            ));
        };
        let history = std::mem::take(&mut existing.history);
        *existing = Bill::from_draft(id.clone(), draft);
        existing.history = history;
        Ok(existing.clone())
    }

    async fn create_file(&self, upload: FileUpload) -> Result<StoredFile, ApiError> {
        let mut guard = self.state.lock().await;
        let stored = StoredFile {
            file_url: format!("{MEMORY_FILE_HOST}/{}", upload.key),
            key: upload.key.clone(),
        };
        guard.calls.push(StoreCall::CreateFile(upload));
        Ok(stored)
    }
}
