use chrono::{DateTime, Utc};
use mongodb::bson::oid::ObjectId;
use serde::{Deserialize, Serialize};
use std::fmt;

/// Entity kinds that get sequential card IDs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "UPPERCASE")]
pub enum CodeType {
    Farmer,
    Employee,
}

impl CodeType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CodeType::Farmer => "FARMER",
            CodeType::Employee => "EMPLOYEE",
        }
    }

    /// Employee numbering must come from an operator-configured format;
    /// farmer IDs may fall back to the built-in default scheme.
    pub fn requires_configuration(&self) -> bool {
        matches!(self, CodeType::Employee)
    }

    pub fn default_prefix(&self) -> &'static str {
        match self {
            CodeType::Farmer => "FAM",
            CodeType::Employee => "EMP",
        }
    }
}

impl fmt::Display for CodeType {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Operator-configured numbering scheme for one entity type.
/// `current_number` only ever moves forward within the lifetime of a row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CodeFormat {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub code_type: CodeType,
    pub prefix: String,
    pub is_active: bool,
    pub current_number: u32,
    pub updated_at: DateTime<Utc>,
}

/// Issued card record; only consulted for existence of a card_id.
#[derive(Debug, Serialize, Deserialize)]
pub struct IdCard {
    #[serde(rename = "_id", skip_serializing_if = "Option::is_none")]
    pub id: Option<ObjectId>,
    pub card_id: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Deserialize)]
pub struct AllocateIdRequest {
    pub code_type: CodeType,
}

#[derive(Deserialize)]
pub struct CardIdQuery {
    pub card_id: String,
}

#[derive(Deserialize)]
pub struct NameQuery {
    pub name: Option<String>,
}
