//! New bill form: receipt attachment and submission.
//!
//! The receipt is validated and kept in memory on selection; it is uploaded only when
//! the form is submitted, right before the bill itself is created.

use std::sync::Arc;

use client_core::{current_session_user, file_storage_key, BillStore, FileUpload, SessionStore};
use shared::{
    domain::{Bill, BillDraft, BillStatus, ExpenseType, SessionUser},
    error::ApiError,
};
use tracing::{info, warn};

use crate::{
    controller::events::OnNavigate, document::Document, error::PortalError, routes::Route,
    ui::DEFAULT_PCT,
};

pub const ACCEPTED_MIME_TYPES: [&str; 2] = ["image/jpeg", "image/png"];
pub const INVALID_FILE_TYPE_ALERT: &str = "Type de fichier non valide (jpeg ou png uniquement)";

/// A file picked in the form's file input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SelectedFile {
    pub name: String,
    pub mime_type: Option<String>,
    pub bytes: Vec<u8>,
}

impl SelectedFile {
    pub fn new(name: impl Into<String>, mime_type: Option<&str>, bytes: Vec<u8>) -> Self {
        Self {
            name: name.into(),
            mime_type: mime_type.map(str::to_string),
            bytes,
        }
    }

    /// Normalized MIME type when the file is a jpeg or png receipt.
    pub fn accepted_mime_type(&self) -> Option<&'static str> {
        let declared = self
            .mime_type
            .as_deref()
            .map(str::trim)
            .filter(|mime| !mime.is_empty())
            .map(str::to_ascii_lowercase);
        let mime = match declared {
            Some(mime) => mime,
            None => mime_guess::from_path(self.name.to_ascii_lowercase())
                .first()?
                .essence_str()
                .to_string(),
        };
        let mime = if mime == "image/jpg" { "image/jpeg" } else { mime.as_str() };
        ACCEPTED_MIME_TYPES.into_iter().find(|accepted| *accepted == mime)
    }
}

/// Form fields exactly as entered.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct NewBillForm {
    pub expense_type: String,
    pub name: String,
    pub date: String,
    pub amount: String,
    pub vat: String,
    pub pct: String,
    pub commentary: String,
}

impl NewBillForm {
    pub fn into_draft(self, email: &str) -> Result<BillDraft, PortalError> {
        let expense_type = ExpenseType::from_label(&self.expense_type).ok_or_else(|| {
            PortalError::InvalidForm(format!("unknown expense type '{}'", self.expense_type))
        })?;
        let date = self.date.trim();
        if date.is_empty() {
            return Err(PortalError::InvalidForm("date is required".into()));
        }
        let amount = parse_amount("amount", &self.amount)?
            .ok_or_else(|| PortalError::InvalidForm("amount is required".into()))?;
        let vat = parse_amount("vat", &self.vat)?.unwrap_or(0.0);
        let pct = self
            .pct
            .trim()
            .parse::<f64>()
            .ok()
            .filter(|pct| pct.is_finite() && *pct > 0.0)
            .unwrap_or(f64::from(DEFAULT_PCT));
        let commentary = Some(self.commentary.trim().to_string()).filter(|c| !c.is_empty());

        Ok(BillDraft {
            email: email.to_string(),
            expense_type,
            name: self.name.trim().to_string(),
            date: date.to_string(),
            amount,
            vat,
            pct: Some(pct),
            commentary,
            file_url: None,
            file_name: None,
            status: BillStatus::Pending,
        })
    }
}

fn parse_amount(field: &str, raw: &str) -> Result<Option<f64>, PortalError> {
    let raw = raw.trim();
    if raw.is_empty() {
        return Ok(None);
    }
    match raw.replace(',', ".").parse::<f64>() {
        Ok(value) if value.is_finite() && value >= 0.0 => Ok(Some(value)),
        _ => Err(PortalError::InvalidForm(format!(
            "{field} must be a non-negative number, got '{raw}'"
        ))),
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum SubmitState {
    Editing,
    Submitting,
    Succeeded(Bill),
    Failed(ApiError),
}

pub struct NewBillController {
    store: Arc<dyn BillStore>,
    session: Arc<dyn SessionStore>,
    on_navigate: OnNavigate,
    attached: Option<FileUpload>,
    state: SubmitState,
}

impl NewBillController {
    pub fn new(
        store: Arc<dyn BillStore>,
        session: Arc<dyn SessionStore>,
        on_navigate: OnNavigate,
    ) -> Self {
        Self {
            store,
            session,
            on_navigate,
            attached: None,
            state: SubmitState::Editing,
        }
    }

    pub fn state(&self) -> &SubmitState {
        &self.state
    }

    pub fn attached_file(&self) -> Option<&FileUpload> {
        self.attached.as_ref()
    }

    fn session_user(&self) -> Result<SessionUser, PortalError> {
        current_session_user(self.session.as_ref())?.ok_or(PortalError::NoSession)
    }

    /// Returns whether the file was kept. Rejected files clear the input and raise one alert.
    pub fn handle_change_file(
        &mut self,
        document: &mut Document,
        file: SelectedFile,
    ) -> Result<bool, PortalError> {
        if matches!(self.state, SubmitState::Failed(_)) {
            self.state = SubmitState::Editing;
        }
        let Some(mime_type) = file.accepted_mime_type() else {
            warn!(file_name = %file.name, mime_type = ?file.mime_type, "rejected receipt file type");
            self.attached = None;
            document.clear_file_input();
            document.alert(INVALID_FILE_TYPE_ALERT);
            return Ok(false);
        };

        let user = self.session_user()?;
        let key = file_storage_key(&user.email, &file.name);
        document.set_file_input(file.name.clone());
        info!(file_name = %file.name, key = %key, "receipt attached");
        self.attached = Some(FileUpload {
            email: user.email,
            file_name: file.name,
            mime_type: Some(mime_type.to_string()),
            key,
            bytes: file.bytes,
        });
        Ok(true)
    }

    /// Uploads the attached receipt, creates the bill, then navigates to the bills page.
    /// Storage failures are returned to the caller, never rendered here.
    pub async fn handle_submit(&mut self, form: NewBillForm) -> Result<Bill, PortalError> {
        let user = self.session_user()?;
        let draft = form.into_draft(&user.email)?;

        self.state = SubmitState::Submitting;
        match self.persist(draft).await {
            Ok(bill) => {
                info!(bill_id = %bill.id, email = %user.email, "bill submitted");
                self.state = SubmitState::Succeeded(bill.clone());
                (self.on_navigate)(Route::Bills.path());
                Ok(bill)
            }
            Err(err) => {
                warn!(error = %err, "bill submission failed");
                self.state = SubmitState::Failed(err.clone());
                Err(err.into())
            }
        }
    }

    async fn persist(&self, mut draft: BillDraft) -> Result<Bill, ApiError> {
        if let Some(upload) = self.attached.clone() {
            let file_name = upload.file_name.clone();
            let stored = self.store.create_file(upload).await?;
            draft.file_url = Some(stored.file_url);
            draft.file_name = Some(file_name);
        }
        self.store.create_bill(draft).await
    }
}

#[cfg(test)]
#[path = "../tests/new_bill_tests.rs"]
mod tests;
