use std::collections::BTreeSet;

use super::domain::{Requirement, RequirementRow};
use super::normalizer::DocumentKind;

/// The de-duplicated set of demands a client places on assigned personnel.
///
/// Raw labels are normalized on read, so two differently spelled rows that
/// mean the same document count once. Only rows flagged mandatory gate
/// assignment; optional rows remain visible for lookups and gap reports.
#[derive(Debug, Clone)]
pub struct RequirementSet {
    requirements: Vec<Requirement>,
    required_kinds: BTreeSet<DocumentKind>,
}

impl RequirementSet {
    pub fn from_rows(rows: Vec<RequirementRow>) -> Self {
        let requirements: Vec<Requirement> = rows.into_iter().map(Requirement::from_row).collect();
        let required_kinds = requirements
            .iter()
            .filter(|req| req.mandatory)
            .map(|req| req.kind)
            .collect();

        Self {
            requirements,
            required_kinds,
        }
    }

    /// True when nothing gates assignment. Callers must report this
    /// explicitly instead of classifying the whole roster as compliant over
    /// an empty set.
    pub fn is_empty(&self) -> bool {
        self.required_kinds.is_empty()
    }

    pub fn required_kinds(&self) -> &BTreeSet<DocumentKind> {
        &self.required_kinds
    }

    pub fn required_count(&self) -> usize {
        self.required_kinds.len()
    }

    pub fn requirements(&self) -> &[Requirement] {
        &self.requirements
    }

    /// Governing requirement for a kind. When a mandatory and an optional row
    /// collapse to the same kind, the mandatory one rules the validity window.
    pub fn requirement_for(&self, kind: DocumentKind) -> Option<&Requirement> {
        self.requirements
            .iter()
            .find(|req| req.kind == kind && req.mandatory)
            .or_else(|| self.requirements.iter().find(|req| req.kind == kind))
    }
}
