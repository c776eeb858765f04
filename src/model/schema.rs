//! Wire payloads for both services

use serde::{Deserialize, Serialize};
use serde_json::Value;

/// `GET /db_tables` success body
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
pub struct TableListResponse {
    pub database_tables: Vec<String>,
}

/// `GET /data/{table}` success body
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
pub struct TableData {
    pub columns: Vec<String>,
    pub rows: Vec<Vec<Value>>,
}

impl TableData {
    /// Every row has exactly one cell per column
    pub fn is_well_formed(&self) -> bool {
        self.rows.iter().all(|row| row.len() == self.columns.len())
    }
}

/// `POST /compile` body, both fields optional on the wire
#[derive(Debug, Clone, PartialEq, Eq, Default, Deserialize)]
pub struct CompileResponse {
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default)]
    pub message: Option<String>,
}

/// Expected shape of an uploaded schema document.
///
/// Only used to describe what the user picked; the compiler service is the
/// one that validates it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TableSchema {
    pub name: String,
    pub columns: Vec<ColumnSchema>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ColumnSchema {
    pub name: String,
    #[serde(rename = "type")]
    pub column_type: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub length: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub nullable: Option<bool>,
}

impl TableSchema {
    /// One-line summary when `document` has the expected shape
    pub fn summarize(document: &Value) -> Option<String> {
        let schema = TableSchema::deserialize(document).ok()?;
        let noun = if schema.columns.len() == 1 { "column" } else { "columns" };
        Some(format!("{} ({} {})", schema.name, schema.columns.len(), noun))
    }
}
