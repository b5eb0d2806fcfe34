use std::sync::{Arc, Mutex};

use client_core::{InMemoryBillStore, MemorySessionStore};
use shared::domain::{Bill, BillId, BillStatus, ExpenseType, SessionUser};

use crate::{controller::events::OnNavigate, ui::Views, Router, RouterOptions};

pub const EMPLOYEE_EMAIL: &str = "a@a";

fn bill(
    id: &str,
    expense_type: ExpenseType,
    name: &str,
    date: &str,
    amount: f64,
    status: BillStatus,
) -> Bill {
    Bill {
        id: BillId(id.into()),
        email: EMPLOYEE_EMAIL.into(),
        expense_type,
        name: name.into(),
        date: date.into(),
        amount,
        vat: amount / 5.0,
        pct: Some(20.0),
        commentary: None,
        file_url: Some(format!("https://test.storage.tld/v0/b/{id}.jpg")),
        file_name: Some(format!("{id}.jpg")),
        status,
        history: Vec::new(),
    }
}

/// Four bills, deliberately out of date order.
pub fn bills() -> Vec<Bill> {
    vec![
        bill(
            "47qAXb6fIm2zOKkLzMro",
            ExpenseType::Hotel,
            "encore",
            "2004-04-04",
            400.0,
            BillStatus::Pending,
        ),
        bill(
            "BeKy5Mo4jkmdfPGYpTxZ",
            ExpenseType::Transports,
            "test1",
            "2001-01-01",
            100.0,
            BillStatus::Refused,
        ),
        bill(
            "UIUZtnPQvnbFnB0ozvJh",
            ExpenseType::OnlineServices,
            "test3",
            "2003-03-03",
            300.0,
            BillStatus::Accepted,
        ),
        bill(
            "qcCK3SzECmaZAGRrHjaC",
            ExpenseType::Restaurants,
            "test2",
            "2002-02-02",
            200.0,
            BillStatus::Refused,
        ),
    ]
}

pub fn employee_session() -> Arc<MemorySessionStore> {
    Arc::new(
        MemorySessionStore::with_user(&SessionUser::employee(EMPLOYEE_EMAIL)).expect("session"),
    )
}

pub fn views() -> Arc<Views> {
    Arc::new(Views::new().expect("templates"))
}

/// Navigation callback that records every requested path.
pub fn recording_navigator() -> (OnNavigate, Arc<Mutex<Vec<String>>>) {
    let visited = Arc::new(Mutex::new(Vec::new()));
    let sink = Arc::clone(&visited);
    let on_navigate: OnNavigate = Arc::new(move |path: &str| {
        sink.lock().expect("navigation log").push(path.to_string());
    });
    (on_navigate, visited)
}

pub fn router(store: Arc<InMemoryBillStore>, session: Arc<MemorySessionStore>) -> Router {
    Router::new(store, session, views(), RouterOptions::default())
}
