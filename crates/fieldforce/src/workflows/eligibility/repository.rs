use super::domain::{DocumentRow, PersonId, PersonnelRow, RequirementRow};

/// Storage abstraction so the engine can run against SQL in production and an
/// in-memory store in tests and demos. All three operations are reads; the
/// engine never writes.
pub trait ComplianceStore: Send + Sync {
    /// Requirement rows for a client, plus global rows (`client_id` null)
    /// when `include_global` is set.
    fn requirements_for_client(
        &self,
        client_id: u64,
        include_global: bool,
    ) -> Result<Vec<RequirementRow>, StoreError>;

    /// Document rows for the given people, matched punctuation-insensitively
    /// on the person id.
    fn documents_for_persons(&self, person_ids: &[PersonId]) -> Result<Vec<DocumentRow>, StoreError>;

    /// One page of the active-personnel roster.
    fn active_personnel(&self, limit: usize, offset: usize)
        -> Result<Vec<PersonnelRow>, StoreError>;
}

/// Store failures propagate untranslated; retry and user-facing messaging are
/// the caller's concern.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("store unavailable: {0}")]
    Unavailable(String),
    #[error("malformed row: {0}")]
    Malformed(String),
}
