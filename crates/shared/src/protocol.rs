use serde::{Deserialize, Serialize};

use crate::domain::FileKey;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BillScope {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub email: Option<String>,
}

impl BillScope {
    pub fn owned_by(email: impl Into<String>) -> Self {
        Self {
            email: Some(email.into()),
        }
    }

    pub fn all() -> Self {
        Self::default()
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FileUploadQuery {
    pub email: String,
    pub file_name: String,
    pub key: FileKey,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredFile {
    #[serde(rename = "fileUrl")]
    pub file_url: String,
    pub key: FileKey,
}
