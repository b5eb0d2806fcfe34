//! Bills page: lists the employee's bills, opens the receipt preview and links to the
//! creation form.

use std::sync::Arc;

use client_core::BillStore;
use shared::{
    domain::{Bill, SessionUser},
    error::ApiError,
    protocol::BillScope,
};
use tracing::{debug, warn};
use url::Url;

use crate::{
    controller::events::OnNavigate,
    document::{Document, Modal, ModalImage, NavIcon},
    error::PortalError,
    routes::Route,
    ui::{format, sorted_rows, BillRow, Views},
};

/// Image width used when the stored receipt URL cannot be used.
pub const PLACEHOLDER_IMAGE_WIDTH: u32 = 250;

/// A listed bill decorated for display.
#[derive(Debug, Clone, PartialEq)]
pub struct DisplayBill {
    pub bill: Bill,
    pub sort_key: String,
    pub display_date: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
}

impl DisplayBill {
    pub fn decorate(bill: Bill) -> Self {
        let display_date = match format::format_date(&bill.date) {
            Ok(formatted) => formatted,
            Err(err) => {
                warn!(bill_id = %bill.id, error = %err, "showing unformatted bill date");
                bill.date.clone()
            }
        };
        Self {
            sort_key: bill.normalized_date(),
            display_date,
            status_label: bill.status.label(),
            status_class: format::status_class(bill.status),
            bill,
        }
    }
}

/// The preview affordance of one table row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EyeIcon {
    pub bill_id: Option<String>,
    pub data_bill_url: Option<String>,
}

impl EyeIcon {
    /// An icon not attached to any listed row.
    pub fn new(data_bill_url: impl Into<String>) -> Self {
        Self {
            bill_id: None,
            data_bill_url: Some(data_bill_url.into()),
        }
    }
}

impl From<&BillRow> for EyeIcon {
    fn from(row: &BillRow) -> Self {
        Self {
            bill_id: Some(row.id.clone()),
            data_bill_url: Some(row.file_url.clone()).filter(|url| !url.is_empty()),
        }
    }
}

pub struct BillsController {
    store: Arc<dyn BillStore>,
    user: SessionUser,
    on_navigate: OnNavigate,
    views: Arc<Views>,
    modal_width: u32,
}

impl BillsController {
    pub fn new(
        store: Arc<dyn BillStore>,
        user: SessionUser,
        on_navigate: OnNavigate,
        views: Arc<Views>,
        modal_width: u32,
    ) -> Self {
        Self {
            store,
            user,
            on_navigate,
            views,
            modal_width,
        }
    }

    pub async fn get_bills(&self) -> Result<Vec<DisplayBill>, ApiError> {
        let bills = self
            .store
            .list_bills(&BillScope::owned_by(self.user.email.clone()))
            .await?;
        debug!(count = bills.len(), email = %self.user.email, "loaded bills");
        Ok(bills.into_iter().map(DisplayBill::decorate).collect())
    }

    /// Loads the bills and mounts either the table or the error view.
    /// The mounted table exposes one eye icon per row, in display order.
    pub async fn render(&self, document: &mut Document) -> Result<(), PortalError> {
        let rows = match self.get_bills().await {
            Ok(bills) => sorted_rows(&bills),
            Err(err) => {
                warn!(error = %err, "bill listing failed");
                let markup = self.views.error(Some(NavIcon::Window), &err.to_string())?;
                document.mount(Some(NavIcon::Window), markup);
                return Ok(());
            }
        };
        document.mount(Some(NavIcon::Window), self.views.bills(&rows)?);
        document.set_eye_icons(rows.iter().map(EyeIcon::from).collect());
        Ok(())
    }

    pub fn handle_click_new_bill(&self) {
        (self.on_navigate)(Route::NewBill.path());
    }

    pub fn handle_click_icon_eye(
        &self,
        document: &mut Document,
        icon: &EyeIcon,
    ) -> Result<(), PortalError> {
        let src = icon.data_bill_url.clone().unwrap_or_default();
        let width = if Url::parse(src.trim()).is_ok() {
            self.modal_width / 2
        } else {
            debug!(src = %src, "receipt url unusable; using placeholder width");
            PLACEHOLDER_IMAGE_WIDTH
        };
        let image = ModalImage { src, width };
        let markup = self.views.modal(&image)?;
        document.open_modal(Modal { image, markup });
        Ok(())
    }
}

#[cfg(test)]
#[path = "../tests/bills_tests.rs"]
mod tests;
