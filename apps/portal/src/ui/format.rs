//! Display formatting for dates, amounts and statuses.

use chrono::Datelike;
use shared::domain::{parse_bill_date, BillStatus, DomainError};

const SHORT_MONTHS: [&str; 12] = [
    "Jan", "Fév", "Mar", "Avr", "Mai", "Jui", "Jui", "Aoû", "Sep", "Oct", "Nov", "Déc",
];

/// `2004-04-04` -> `4 Avr. 04`.
pub fn format_date(raw: &str) -> Result<String, DomainError> {
    let date = parse_bill_date(raw)?;
    let month = SHORT_MONTHS[date.month0() as usize];
    Ok(format!(
        "{} {month}. {:02}",
        date.day(),
        date.year().rem_euclid(100)
    ))
}

pub fn format_amount(amount: f64) -> String {
    if amount.fract() == 0.0 {
        format!("{amount:.0}")
    } else {
        format!("{amount:.2}")
    }
}

pub fn status_class(status: BillStatus) -> &'static str {
    match status {
        BillStatus::Pending => "status-pending",
        BillStatus::Accepted => "status-accepted",
        BillStatus::Refused => "status-refused",
    }
}
