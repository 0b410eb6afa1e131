use std::sync::Arc;

use chrono::NaiveDate;

use super::domain::{ComplianceResult, ComplianceState, PersonId};
use super::matcher;
use super::repository::{ComplianceStore, StoreError};
use super::requirements::RequirementSet;
use super::scanner::{self, RosterScan};

/// Request-sizing ceilings enforced by the engine itself rather than left to
/// the database.
#[derive(Debug, Clone, Copy)]
pub struct EligibilityConfig {
    pub match_batch_ceiling: usize,
    pub roster_page_limit: usize,
}

impl Default for EligibilityConfig {
    fn default() -> Self {
        Self {
            match_batch_ceiling: 100,
            roster_page_limit: 100,
        }
    }
}

/// Caller-selected matching semantics for a batch match.
#[derive(Debug, Clone, Copy)]
pub struct MatchOptions {
    /// Strict all-required-kinds eligibility when true; any satisfied
    /// required kind suffices when false.
    pub require_all: bool,
    pub include_global: bool,
}

impl Default for MatchOptions {
    fn default() -> Self {
        Self {
            require_all: true,
            include_global: true,
        }
    }
}

/// Paging and scope controls for roster scans.
#[derive(Debug, Clone, Copy)]
pub struct ScanOptions {
    pub include_global: bool,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl Default for ScanOptions {
    fn default() -> Self {
        Self {
            include_global: true,
            limit: None,
            offset: None,
        }
    }
}

/// Batch-match outcome. A client with no mandatory requirements is an
/// explicit signal, not an empty success list.
#[derive(Debug, Clone)]
pub enum MatchOutcome {
    NoPrerequisitesDefined,
    Results(Vec<ComplianceResult>),
}

/// Single-person match outcome. `found` reflects whether any document rows
/// exist for the person; the classification is computed either way.
#[derive(Debug, Clone)]
pub enum SingleMatchOutcome {
    NoPrerequisitesDefined,
    Match { found: bool, result: ComplianceResult },
}

#[derive(Debug, thiserror::Error)]
pub enum EligibilityError {
    #[error("batch of {found} person ids exceeds the ceiling of {max}")]
    PayloadTooLarge { max: usize, found: usize },
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Service facade composing the requirement loader, matcher, and scanner over
/// a storage backend. Stateless per call; expiry is recomputed from dates on
/// every query instead of trusting any stored status column.
pub struct EligibilityService<S> {
    store: Arc<S>,
    config: EligibilityConfig,
}

impl<S> EligibilityService<S>
where
    S: ComplianceStore + 'static,
{
    pub fn new(store: Arc<S>, config: EligibilityConfig) -> Self {
        Self { store, config }
    }

    pub fn config(&self) -> &EligibilityConfig {
        &self.config
    }

    fn load_requirements(
        &self,
        client_id: u64,
        include_global: bool,
    ) -> Result<RequirementSet, EligibilityError> {
        let rows = self
            .store
            .requirements_for_client(client_id, include_global)?;
        Ok(RequirementSet::from_rows(rows))
    }

    /// Classify a batch of people against one client's requirements.
    pub fn match_for_client(
        &self,
        client_id: u64,
        person_ids: &[PersonId],
        options: MatchOptions,
        today: NaiveDate,
    ) -> Result<MatchOutcome, EligibilityError> {
        if person_ids.len() > self.config.match_batch_ceiling {
            return Err(EligibilityError::PayloadTooLarge {
                max: self.config.match_batch_ceiling,
                found: person_ids.len(),
            });
        }

        let set = self.load_requirements(client_id, options.include_global)?;
        if set.is_empty() {
            return Ok(MatchOutcome::NoPrerequisitesDefined);
        }

        let documents = matcher::parse_documents(self.store.documents_for_persons(person_ids)?);
        let grouped = matcher::group_by_person(documents);

        let results = person_ids
            .iter()
            .map(|person_id| {
                let personal = grouped
                    .get(person_id)
                    .map(Vec::as_slice)
                    .unwrap_or_default();
                matcher::classify(&set, person_id, personal, today, options.require_all)
            })
            .collect();

        Ok(MatchOutcome::Results(results))
    }

    /// Classify one person, reporting whether any documents exist at all.
    pub fn match_single_for_client(
        &self,
        client_id: u64,
        person_id: &PersonId,
        include_global: bool,
        today: NaiveDate,
    ) -> Result<SingleMatchOutcome, EligibilityError> {
        let set = self.load_requirements(client_id, include_global)?;
        if set.is_empty() {
            return Ok(SingleMatchOutcome::NoPrerequisitesDefined);
        }

        let documents = matcher::parse_documents(
            self.store
                .documents_for_persons(std::slice::from_ref(person_id))?,
        );
        let found = documents.iter().any(|doc| doc.person_id == *person_id);
        let result = matcher::classify(&set, person_id, &documents, today, true);

        Ok(SingleMatchOutcome::Match { found, result })
    }

    /// Everyone on the current roster page meeting every required kind.
    pub fn scan_fully_compliant(
        &self,
        client_id: u64,
        options: ScanOptions,
        today: NaiveDate,
    ) -> Result<RosterScan, EligibilityError> {
        scanner::scan(
            self.store.as_ref(),
            client_id,
            ComplianceState::All,
            &options,
            &self.config,
            today,
        )
    }

    /// Everyone on the current roster page meeting some, but not all,
    /// required kinds.
    pub fn scan_partially_compliant(
        &self,
        client_id: u64,
        options: ScanOptions,
        today: NaiveDate,
    ) -> Result<RosterScan, EligibilityError> {
        scanner::scan(
            self.store.as_ref(),
            client_id,
            ComplianceState::Some,
            &options,
            &self.config,
            today,
        )
    }
}
