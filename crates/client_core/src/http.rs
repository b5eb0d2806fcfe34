//! reqwest-backed client for the remote bill storage service.

use async_trait::async_trait;
use reqwest::{header, Client, Method, RequestBuilder, Response};
use serde::de::DeserializeOwned;
use shared::{
    domain::{Bill, BillDraft, BillId},
    error::{ApiError, ErrorCode},
    protocol::{BillScope, FileUploadQuery, StoredFile},
};
use tracing::{debug, warn};

use crate::{BillStore, FileUpload};

pub struct HttpBillStore {
    http: Client,
    api_url: String,
    token: Option<String>,
}

impl HttpBillStore {
    pub fn new(api_url: impl Into<String>) -> Self {
        Self {
            http: Client::new(),
            api_url: api_url.into().trim_end_matches('/').to_string(),
            token: None,
        }
    }

    pub fn with_token(mut self, token: Option<String>) -> Self {
        self.token = token.filter(|t| !t.trim().is_empty());
        self
    }

    pub fn api_url(&self) -> &str {
        &self.api_url
    }

    fn request(&self, method: Method, path: &str) -> RequestBuilder {
        let builder = self
            .http
            .request(method, format!("{}/{path}", self.api_url));
        match &self.token {
            Some(token) => builder.bearer_auth(token),
            None => builder,
        }
    }
}

async fn send(builder: RequestBuilder) -> Result<Response, ApiError> {
    let response = builder
        .send()
        .await
        .map_err(|err| ApiError::transport(format!("bill storage unreachable: {err}")))?;
    let status = response.status();
    if !status.is_success() {
        return Err(ApiError::from_status(status.as_u16()));
    }
    Ok(response)
}

async fn send_json<T: DeserializeOwned>(builder: RequestBuilder) -> Result<T, ApiError> {
    send(builder)
        .await?
        .json::<T>()
        .await
        .map_err(|err| ApiError::new(ErrorCode::Internal, format!("malformed response: {err}")))
}

fn validated(bill: Bill) -> Result<Bill, ApiError> {
    bill.validate()
        .map_err(|err| ApiError::new(ErrorCode::Validation, err.to_string()))?;
    Ok(bill)
}

#[async_trait]
impl BillStore for HttpBillStore {
    async fn list_bills(&self, scope: &BillScope) -> Result<Vec<Bill>, ApiError> {
        let raw: Vec<serde_json::Value> =
            send_json(self.request(Method::GET, "bills").query(scope)).await?;
        let total = raw.len();

        let mut bills = Vec::with_capacity(total);
        for value in raw {
            let bill = match serde_json::from_value::<Bill>(value) {
                Ok(bill) => bill,
                Err(err) => {
                    warn!(error = %err, "dropping undecodable bill record");
                    continue;
                }
            };
            match bill.validate() {
                Ok(()) => bills.push(bill),
                Err(err) => warn!(bill_id = %bill.id, error = %err, "dropping invalid bill record"),
            }
        }
        debug!(received = total, kept = bills.len(), "listed bills");
        Ok(bills)
    }

    async fn create_bill(&self, draft: BillDraft) -> Result<Bill, ApiError> {
        let bill: Bill = send_json(self.request(Method::POST, "bills").json(&draft)).await?;
        debug!(bill_id = %bill.id, "created bill");
        validated(bill)
    }

    async fn update_bill(&self, id: &BillId, draft: BillDraft) -> Result<Bill, ApiError> {
        let bill: Bill = send_json(
            self.request(Method::PATCH, &format!("bills/{}", id.as_str()))
                .json(&draft),
        )
        .await?;
        validated(bill)
    }

    async fn create_file(&self, upload: FileUpload) -> Result<StoredFile, ApiError> {
        let query = FileUploadQuery {
            email: upload.email,
            file_name: upload.file_name,
            key: upload.key,
        };
        let content_type = upload
            .mime_type
            .unwrap_or_else(|| "application/octet-stream".to_string());
        let stored: StoredFile = send_json(
            self.request(Method::POST, "bills/files")
                .query(&query)
                .header(header::CONTENT_TYPE, content_type)
                .body(upload.bytes),
        )
        .await?;
        debug!(key = %stored.key, "uploaded receipt");
        Ok(stored)
    }
}
