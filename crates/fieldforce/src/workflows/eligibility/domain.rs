use std::fmt;

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use super::normalizer::{self, DocumentKind};

/// Canonical person identifier (RUT).
///
/// RUTs arrive with or without thousands dots ("12.345.678-9" vs
/// "12345678-9"); equality is decided on the canonical form so joins never
/// miss on formatting.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(from = "String")]
pub struct PersonId(String);

impl PersonId {
    pub fn new(raw: &str) -> Self {
        let canonical = raw
            .trim()
            .chars()
            .filter(|c| *c != '.')
            .map(|c| c.to_ascii_uppercase())
            .collect();
        Self(canonical)
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

impl From<String> for PersonId {
    fn from(raw: String) -> Self {
        Self::new(&raw)
    }
}

impl From<&str> for PersonId {
    fn from(raw: &str) -> Self {
        Self::new(raw)
    }
}

impl fmt::Display for PersonId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Requirement row as the store returns it; the label is stored as entered.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RequirementRow {
    pub id: u64,
    pub client_id: Option<u64>,
    pub type_label: String,
    pub description: String,
    pub validity_days: Option<u32>,
    pub mandatory: bool,
}

/// Document row as the store returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DocumentRow {
    pub id: u64,
    pub person_id: String,
    pub type_label: String,
    pub expires_on: Option<NaiveDate>,
    pub uploaded_on: Option<NaiveDate>,
}

/// Active-roster row as the store returns it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PersonnelRow {
    pub person_id: String,
    pub display_name: String,
    pub title: String,
}

/// A client's demand, with its label normalized on read.
///
/// Storage-level dedup is not trusted; two differently spelled rows may
/// collapse to the same kind.
#[derive(Debug, Clone, Serialize)]
pub struct Requirement {
    pub id: u64,
    pub client_id: Option<u64>,
    pub raw_label: String,
    pub kind: DocumentKind,
    pub description: String,
    pub validity_days: Option<u32>,
    pub mandatory: bool,
}

impl Requirement {
    pub fn from_row(row: RequirementRow) -> Self {
        let kind = normalizer::normalize(&row.type_label);
        Self {
            id: row.id,
            client_id: row.client_id,
            raw_label: row.type_label,
            kind,
            description: row.description,
            validity_days: row.validity_days,
            mandatory: row.mandatory,
        }
    }

    pub fn is_global(&self) -> bool {
        self.client_id.is_none()
    }
}

/// One credential belonging to one person, kind derived from the raw label.
#[derive(Debug, Clone)]
pub struct Document {
    pub id: u64,
    pub person_id: PersonId,
    pub raw_label: String,
    pub kind: DocumentKind,
    pub expires_on: Option<NaiveDate>,
    pub uploaded_on: Option<NaiveDate>,
}

impl Document {
    /// Rows originate from free-form uploads; one without an owner is unusable.
    pub fn from_row(row: DocumentRow) -> Option<Self> {
        let person_id = PersonId::new(&row.person_id);
        if person_id.is_empty() {
            return None;
        }

        let kind = normalizer::normalize(&row.type_label);
        Some(Self {
            id: row.id,
            person_id,
            raw_label: row.type_label,
            kind,
            expires_on: row.expires_on,
            uploaded_on: row.uploaded_on,
        })
    }
}

/// Which portion of a client's required kinds a person covers.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceState {
    All,
    Some,
    None,
}

impl ComplianceState {
    pub const fn label(self) -> &'static str {
        match self {
            ComplianceState::All => "all",
            ComplianceState::Some => "some",
            ComplianceState::None => "none",
        }
    }
}

/// Per-document line in a gap report.
#[derive(Debug, Clone, Serialize)]
pub struct DocumentStatus {
    pub kind: DocumentKind,
    pub source_label: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub expires_on: Option<NaiveDate>,
    pub expired: bool,
}

/// Classification of one person against one client's requirement set.
///
/// Derived fresh on every query; never persisted.
#[derive(Debug, Clone, Serialize)]
pub struct ComplianceResult {
    pub person_id: PersonId,
    pub state: ComplianceState,
    pub is_fully_compliant: bool,
    pub required_count: usize,
    pub satisfied_count: usize,
    pub missing_kinds: Vec<DocumentKind>,
    pub documents: Vec<DocumentStatus>,
}

/// Roster-scan entry enriched with personnel display fields.
#[derive(Debug, Clone, Serialize)]
pub struct PersonComplianceSummary {
    pub person_id: PersonId,
    pub display_name: String,
    pub title: String,
    pub result: ComplianceResult,
}
