//! Page views: pure functions from page data to markup, backed by embedded tera templates.

pub mod format;

use serde::Serialize;
use shared::domain::ExpenseType;
use tera::{Context, Tera};

use crate::{
    controller::{bills::DisplayBill, new_bill::ACCEPTED_MIME_TYPES},
    document::{ModalImage, NavIcon},
};

pub const DEFAULT_PCT: u32 = 20;

const TEMPLATES: [(&str, &str); 7] = [
    ("layout.html", include_str!("../../templates/layout.html")),
    ("loading.html", include_str!("../../templates/loading.html")),
    ("error.html", include_str!("../../templates/error.html")),
    ("modal.html", include_str!("../../templates/modal.html")),
    ("bills.html", include_str!("../../templates/bills.html")),
    ("new_bill.html", include_str!("../../templates/new_bill.html")),
    ("login.html", include_str!("../../templates/login.html")),
];

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct BillRow {
    pub id: String,
    pub expense_type: &'static str,
    pub name: String,
    pub sort_key: String,
    pub display_date: String,
    pub amount: String,
    pub status_label: &'static str,
    pub status_class: &'static str,
    pub file_url: String,
}

impl From<&DisplayBill> for BillRow {
    fn from(value: &DisplayBill) -> Self {
        Self {
            id: value.bill.id.to_string(),
            expense_type: value.bill.expense_type.label(),
            name: value.bill.name.clone(),
            sort_key: value.sort_key.clone(),
            display_date: value.display_date.clone(),
            amount: format::format_amount(value.bill.amount),
            status_label: value.status_label,
            status_class: value.status_class,
            file_url: value.bill.file_url.clone().unwrap_or_default(),
        }
    }
}

/// Rows in display order: most recent normalized date first.
pub fn sorted_rows(bills: &[DisplayBill]) -> Vec<BillRow> {
    let mut rows: Vec<BillRow> = bills.iter().map(BillRow::from).collect();
    rows.sort_by(|a, b| b.sort_key.cmp(&a.sort_key));
    rows
}

pub struct Views {
    tera: Tera,
}

impl Views {
    pub fn new() -> Result<Self, tera::Error> {
        let mut tera = Tera::default();
        tera.add_raw_templates(TEMPLATES)?;
        Ok(Self { tera })
    }

    fn render(&self, name: &str, context: &Context) -> Result<String, tera::Error> {
        self.tera.render(name, context)
    }

    fn page_context(active_icon: Option<NavIcon>) -> Context {
        let mut context = Context::new();
        context.insert(
            "active_icon",
            active_icon.map(NavIcon::as_str).unwrap_or_default(),
        );
        context
    }

    pub fn login(&self) -> Result<String, tera::Error> {
        self.render("login.html", &Context::new())
    }

    pub fn loading(&self, active_icon: Option<NavIcon>) -> Result<String, tera::Error> {
        self.render("loading.html", &Self::page_context(active_icon))
    }

    pub fn error(&self, active_icon: Option<NavIcon>, message: &str) -> Result<String, tera::Error> {
        let mut context = Self::page_context(active_icon);
        context.insert("error", message);
        self.render("error.html", &context)
    }

    /// Expects rows already in display order, see [`sorted_rows`].
    pub fn bills(&self, rows: &[BillRow]) -> Result<String, tera::Error> {
        let mut context = Self::page_context(Some(NavIcon::Window));
        context.insert("rows", rows);
        self.render("bills.html", &context)
    }

    pub fn new_bill(&self) -> Result<String, tera::Error> {
        let mut context = Self::page_context(Some(NavIcon::Mail));
        let kinds: Vec<&str> = ExpenseType::ALL.iter().map(|kind| kind.label()).collect();
        context.insert("expense_types", &kinds);
        context.insert("default_pct", &DEFAULT_PCT);
        context.insert("accept", &ACCEPTED_MIME_TYPES.join(","));
        self.render("new_bill.html", &context)
    }

    pub fn modal(&self, image: &ModalImage) -> Result<String, tera::Error> {
        let mut context = Context::new();
        context.insert("image", image);
        self.render("modal.html", &context)
    }
}

#[cfg(test)]
#[path = "../tests/ui_tests.rs"]
mod tests;
