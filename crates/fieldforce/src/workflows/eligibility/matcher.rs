use std::collections::{BTreeSet, HashMap};

use chrono::NaiveDate;

use super::domain::{
    ComplianceResult, ComplianceState, Document, DocumentRow, DocumentStatus, PersonId,
};
use super::expiry;
use super::normalizer::DocumentKind;
use super::requirements::RequirementSet;

/// Convert raw document rows, dropping rows without a usable owner.
///
/// Document data originates from free-form uploads; one bad row must not
/// abort a whole batch.
pub(crate) fn parse_documents(rows: Vec<DocumentRow>) -> Vec<Document> {
    rows.into_iter()
        .filter_map(|row| {
            let id = row.id;
            match Document::from_row(row) {
                Some(document) => Some(document),
                None => {
                    tracing::warn!(document_id = id, "skipping document row without an owner");
                    None
                }
            }
        })
        .collect()
}

pub(crate) fn group_by_person(documents: Vec<Document>) -> HashMap<PersonId, Vec<Document>> {
    let mut grouped: HashMap<PersonId, Vec<Document>> = HashMap::new();
    for document in documents {
        grouped
            .entry(document.person_id.clone())
            .or_default()
            .push(document);
    }
    grouped
}

/// Classify one person's documents against a client's requirement set.
///
/// A document satisfies a required kind only when its normalized kind matches
/// and it is not expired as of `today`. Only distinctness of kind matters:
/// several valid documents of one kind still cover exactly one requirement,
/// and valid documents of kinds nobody required inflate nothing.
pub fn classify(
    set: &RequirementSet,
    person_id: &PersonId,
    documents: &[Document],
    today: NaiveDate,
    require_all: bool,
) -> ComplianceResult {
    let mut satisfied: BTreeSet<DocumentKind> = BTreeSet::new();
    let mut summaries = Vec::with_capacity(documents.len());

    for document in documents.iter().filter(|doc| doc.person_id == *person_id) {
        let requirement = set.requirement_for(document.kind);
        let expired = expiry::is_expired(document, requirement, today);
        if !expired {
            satisfied.insert(document.kind);
        }

        summaries.push(DocumentStatus {
            kind: document.kind,
            source_label: document.raw_label.clone(),
            expires_on: expiry::effective_expiry(document, requirement),
            expired,
        });
    }

    let required = set.required_kinds();
    let missing_kinds: Vec<DocumentKind> = required.difference(&satisfied).copied().collect();
    let satisfied_count = required.intersection(&satisfied).count();
    let required_count = required.len();

    let state = if missing_kinds.is_empty() {
        ComplianceState::All
    } else if satisfied_count > 0 {
        ComplianceState::Some
    } else {
        ComplianceState::None
    };

    let is_fully_compliant = if require_all {
        missing_kinds.is_empty()
    } else {
        satisfied_count > 0
    };

    ComplianceResult {
        person_id: person_id.clone(),
        state,
        is_fully_compliant,
        required_count,
        satisfied_count,
        missing_kinds,
        documents: summaries,
    }
}
