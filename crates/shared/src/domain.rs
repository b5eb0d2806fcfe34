use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use thiserror::Error;

pub const SESSION_USER_KEY: &str = "user";

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(pub String);

        impl $name {
            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl std::fmt::Display for $name {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

id_newtype!(BillId);
id_newtype!(FileKey);

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BillStatus {
    Pending,
    Accepted,
    Refused,
}

impl BillStatus {
    pub fn as_str(self) -> &'static str {
        match self {
            BillStatus::Pending => "pending",
            BillStatus::Accepted => "accepted",
            BillStatus::Refused => "refused",
        }
    }

    /// Localized label shown in the bills table.
    pub fn label(self) -> &'static str {
        match self {
            BillStatus::Pending => "En attente",
            BillStatus::Accepted => "Accepté",
            BillStatus::Refused => "Refusé",
        }
    }

    pub fn can_transition_to(self, next: BillStatus) -> bool {
        matches!(
            (self, next),
            (BillStatus::Pending, BillStatus::Accepted) | (BillStatus::Pending, BillStatus::Refused)
        )
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum ExpenseType {
    #[serde(rename = "Transports")]
    Transports,
    #[serde(rename = "Restaurants et bars")]
    Restaurants,
    #[serde(rename = "Hôtel et logement")]
    Hotel,
    #[serde(rename = "Services en ligne")]
    OnlineServices,
    #[serde(rename = "IT et électronique")]
    Electronics,
    #[serde(rename = "Equipement et matériel")]
    Equipment,
    #[serde(rename = "Fournitures de bureau")]
    OfficeSupplies,
}

impl ExpenseType {
    pub const ALL: [ExpenseType; 7] = [
        ExpenseType::Transports,
        ExpenseType::Restaurants,
        ExpenseType::Hotel,
        ExpenseType::OnlineServices,
        ExpenseType::Electronics,
        ExpenseType::Equipment,
        ExpenseType::OfficeSupplies,
    ];

    pub fn label(self) -> &'static str {
        match self {
            ExpenseType::Transports => "Transports",
            ExpenseType::Restaurants => "Restaurants et bars",
            ExpenseType::Hotel => "Hôtel et logement",
            ExpenseType::OnlineServices => "Services en ligne",
            ExpenseType::Electronics => "IT et électronique",
            ExpenseType::Equipment => "Equipement et matériel",
            ExpenseType::OfficeSupplies => "Fournitures de bureau",
        }
    }

    pub fn from_label(label: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.label().eq_ignore_ascii_case(label.trim()))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StatusChange {
    pub status: BillStatus,
    pub date: NaiveDate,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
}

/// A bill before the storage layer has assigned it an identifier.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BillDraft {
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    pub date: String,
    pub amount: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub vat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub status: BillStatus,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: BillId,
    pub email: String,
    #[serde(rename = "type")]
    pub expense_type: ExpenseType,
    pub name: String,
    /// Raw date as stored remotely; see [`Bill::normalized_date`].
    pub date: String,
    pub amount: f64,
    #[serde(default, deserialize_with = "number_or_string")]
    pub vat: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub pct: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub commentary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub file_name: Option<String>,
    pub status: BillStatus,
    #[serde(default)]
    pub history: Vec<StatusChange>,
}

#[derive(Debug, Clone, PartialEq, Error)]
pub enum DomainError {
    #[error("bill {id} has an empty identifier")]
    MissingId { id: String },
    #[error("bill {id}: {field} must be a non-negative number, got {value}")]
    NegativeAmount {
        id: String,
        field: &'static str,
        value: f64,
    },
    #[error("bill {id}: cannot move from {from} to {to}")]
    InvalidTransition {
        id: String,
        from: &'static str,
        to: &'static str,
    },
    #[error("malformed date '{0}'")]
    MalformedDate(String),
}

impl Bill {
    pub fn from_draft(id: BillId, draft: BillDraft) -> Self {
        Self {
            id,
            email: draft.email,
            expense_type: draft.expense_type,
            name: draft.name,
            date: draft.date,
            amount: draft.amount,
            vat: draft.vat,
            pct: draft.pct,
            commentary: draft.commentary,
            file_url: draft.file_url,
            file_name: draft.file_name,
            status: draft.status,
            history: Vec::new(),
        }
    }

    pub fn parsed_date(&self) -> Result<NaiveDate, DomainError> {
        parse_bill_date(&self.date)
    }

    /// Sortable `YYYY-MM-DD` form of the date, or the raw value when it does not parse.
    pub fn normalized_date(&self) -> String {
        match self.parsed_date() {
            Ok(date) => date.format("%Y-%m-%d").to_string(),
            Err(_) => self.date.clone(),
        }
    }

    pub fn validate(&self) -> Result<(), DomainError> {
        if self.id.0.trim().is_empty() {
            return Err(DomainError::MissingId {
                id: self.id.0.clone(),
            });
        }
        let amounts = [
            ("amount", Some(self.amount)),
            ("vat", Some(self.vat)),
            ("pct", self.pct),
        ];
        for (field, value) in amounts {
            if let Some(value) = value {
                if !value.is_finite() || value < 0.0 {
                    return Err(DomainError::NegativeAmount {
                        id: self.id.0.clone(),
                        field,
                        value,
                    });
                }
            }
        }
        Ok(())
    }

    /// Moves the bill out of `pending`, appending to its history.
    pub fn transition(
        &mut self,
        next: BillStatus,
        date: NaiveDate,
        comment: Option<String>,
    ) -> Result<(), DomainError> {
        if !self.status.can_transition_to(next) {
            return Err(DomainError::InvalidTransition {
                id: self.id.0.clone(),
                from: self.status.as_str(),
                to: next.as_str(),
            });
        }
        self.status = next;
        self.history.push(StatusChange {
            status: next,
            date,
            comment,
        });
        Ok(())
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

// The storage service has historically sent `vat` as a string.
fn number_or_string<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: serde::Deserializer<'de>,
{
    match NumberOrString::deserialize(deserializer)? {
        NumberOrString::Number(value) => Ok(value),
        NumberOrString::Text(text) if text.trim().is_empty() => Ok(0.0),
        NumberOrString::Text(text) => text.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Accepts `YYYY-MM-DD` and full RFC 3339 timestamps.
pub fn parse_bill_date(raw: &str) -> Result<NaiveDate, DomainError> {
    let raw = raw.trim();
    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Ok(date);
    }
    chrono::DateTime::parse_from_rfc3339(raw)
        .map(|dt| dt.date_naive())
        .map_err(|_| DomainError::MalformedDate(raw.to_string()))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UserType {
    Employee,
    Admin,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SessionUser {
    #[serde(rename = "type")]
    pub user_type: UserType,
    pub email: String,
}

impl SessionUser {
    pub fn employee(email: impl Into<String>) -> Self {
        Self {
            user_type: UserType::Employee,
            email: email.into(),
        }
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
