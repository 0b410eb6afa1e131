use chrono::NaiveDate;

use super::domain::{ComplianceState, PersonComplianceSummary, PersonId};
use super::matcher;
use super::repository::ComplianceStore;
use super::requirements::RequirementSet;
use super::service::{EligibilityConfig, EligibilityError, ScanOptions};

/// Outcome of a roster scan. A client with no mandatory requirements is
/// reported as such, never silently widened to the whole roster.
#[derive(Debug, Clone)]
pub enum RosterScan {
    NoPrerequisitesDefined,
    Page(Vec<PersonComplianceSummary>),
}

/// Page through the active roster and keep the people whose compliance state
/// matches `keep`.
///
/// The page's documents are fetched in one batch call; the requested limit is
/// clamped to the configured roster ceiling so a single request cannot walk
/// an unbounded roster.
pub(crate) fn scan<S>(
    store: &S,
    client_id: u64,
    keep: ComplianceState,
    options: &ScanOptions,
    limits: &EligibilityConfig,
    today: NaiveDate,
) -> Result<RosterScan, EligibilityError>
where
    S: ComplianceStore + ?Sized,
{
    let rows = store.requirements_for_client(client_id, options.include_global)?;
    let set = RequirementSet::from_rows(rows);
    if set.is_empty() {
        return Ok(RosterScan::NoPrerequisitesDefined);
    }

    let limit = options
        .limit
        .unwrap_or(limits.roster_page_limit)
        .min(limits.roster_page_limit);
    let offset = options.offset.unwrap_or(0);

    let roster = store.active_personnel(limit, offset)?;
    if roster.is_empty() {
        return Ok(RosterScan::Page(Vec::new()));
    }

    let person_ids: Vec<PersonId> = roster
        .iter()
        .map(|row| PersonId::new(&row.person_id))
        .collect();
    let documents = matcher::parse_documents(store.documents_for_persons(&person_ids)?);
    let grouped = matcher::group_by_person(documents);

    let mut matches = Vec::new();
    for (row, person_id) in roster.iter().zip(person_ids) {
        let personal = grouped
            .get(&person_id)
            .map(Vec::as_slice)
            .unwrap_or_default();
        let result = matcher::classify(&set, &person_id, personal, today, true);
        if result.state != keep {
            continue;
        }

        // Roster rows occasionally arrive with a blank name; fall back to the
        // canonical id so the report stays readable.
        let display_name = if row.display_name.trim().is_empty() {
            person_id.as_str().to_string()
        } else {
            row.display_name.clone()
        };

        matches.push(PersonComplianceSummary {
            person_id,
            display_name,
            title: row.title.clone(),
            result,
        });
    }

    Ok(RosterScan::Page(matches))
}
