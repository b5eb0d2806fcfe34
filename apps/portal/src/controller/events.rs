//! User actions dispatched to the active page, and the navigation callback pages receive.

use std::sync::Arc;

use crate::controller::{bills::EyeIcon, new_bill::{NewBillForm, SelectedFile}};

/// Navigation callback handed to controllers; takes an application path.
pub type OnNavigate = Arc<dyn Fn(&str) + Send + Sync>;

#[derive(Debug, Clone)]
pub enum UiAction {
    SubmitEmployeeLogin { email: String },
    ClickNewBill,
    ClickIconEye(EyeIcon),
    CloseModal,
    SelectFile(SelectedFile),
    SubmitNewBill(NewBillForm),
    Logout,
}

impl UiAction {
    pub fn name(&self) -> &'static str {
        match self {
            UiAction::SubmitEmployeeLogin { .. } => "submit_employee_login",
            UiAction::ClickNewBill => "click_new_bill",
            UiAction::ClickIconEye(_) => "click_icon_eye",
            UiAction::CloseModal => "close_modal",
            UiAction::SelectFile(_) => "select_file",
            UiAction::SubmitNewBill(_) => "submit_new_bill",
            UiAction::Logout => "logout",
        }
    }
}
