use std::sync::Arc;

use chrono::NaiveDate;

use crate::workflows::eligibility::domain::{
    DocumentRow, PersonId, PersonnelRow, RequirementRow,
};
use crate::workflows::eligibility::repository::{ComplianceStore, StoreError};
use crate::workflows::eligibility::service::{EligibilityConfig, EligibilityService};

pub(super) const CLIENT_ID: u64 = 7;

pub(super) fn today() -> NaiveDate {
    date(2026, 8, 6)
}

pub(super) fn date(year: i32, month: u32, day: u32) -> NaiveDate {
    NaiveDate::from_ymd_opt(year, month, day).expect("valid date")
}

pub(super) fn days_ago(days: i64) -> NaiveDate {
    today() - chrono::Duration::days(days)
}

pub(super) fn days_ahead(days: i64) -> NaiveDate {
    today() + chrono::Duration::days(days)
}

pub(super) fn requirement_row(
    id: u64,
    client_id: Option<u64>,
    label: &str,
    validity_days: Option<u32>,
    mandatory: bool,
) -> RequirementRow {
    RequirementRow {
        id,
        client_id,
        type_label: label.to_string(),
        description: format!("requiere {label}"),
        validity_days,
        mandatory,
    }
}

pub(super) fn document_row(
    id: u64,
    person_id: &str,
    label: &str,
    expires_on: Option<NaiveDate>,
    uploaded_on: Option<NaiveDate>,
) -> DocumentRow {
    DocumentRow {
        id,
        person_id: person_id.to_string(),
        type_label: label.to_string(),
        expires_on,
        uploaded_on,
    }
}

pub(super) fn personnel_row(person_id: &str, display_name: &str, title: &str) -> PersonnelRow {
    PersonnelRow {
        person_id: person_id.to_string(),
        display_name: display_name.to_string(),
        title: title.to_string(),
    }
}

/// Client 7 demands a driver's license (365-day window) and the global
/// safety certificate; the medical certificate row is informational only.
pub(super) fn standard_requirements() -> Vec<RequirementRow> {
    vec![
        requirement_row(1, Some(CLIENT_ID), "Licencia de Conducir", Some(365), true),
        requirement_row(2, None, "Certificado de Seguridad (EPP)", None, true),
        requirement_row(3, Some(CLIENT_ID), "Certificado Médico", Some(180), false),
    ]
}

/// Ana is fully covered, Benito's license lapsed by window, Carla has no
/// documents at all.
pub(super) fn standard_documents() -> Vec<DocumentRow> {
    vec![
        document_row(
            10,
            "12.345.678-5",
            "Licencia De Conducir Clase B",
            Some(days_ahead(120)),
            Some(days_ago(30)),
        ),
        document_row(11, "12.345.678-5", "EPP", None, Some(days_ago(10))),
        document_row(
            12,
            "9.876.543-2",
            "Licencia Conducir",
            None,
            Some(days_ago(400)),
        ),
        document_row(13, "9.876.543-2", "Entrega EPP", None, Some(days_ago(5))),
    ]
}

pub(super) fn standard_personnel() -> Vec<PersonnelRow> {
    vec![
        personnel_row("12345678-5", "Ana Rojas", "Supervisora"),
        personnel_row("9876543-2", "Benito Soto", "Técnico"),
        personnel_row("5555555-5", "Carla Díaz", "Técnico"),
    ]
}

#[derive(Default, Clone)]
pub(super) struct MemoryStore {
    pub(super) requirements: Vec<RequirementRow>,
    pub(super) documents: Vec<DocumentRow>,
    pub(super) personnel: Vec<PersonnelRow>,
}

impl MemoryStore {
    pub(super) fn standard() -> Self {
        Self {
            requirements: standard_requirements(),
            documents: standard_documents(),
            personnel: standard_personnel(),
        }
    }
}

impl ComplianceStore for MemoryStore {
    fn requirements_for_client(
        &self,
        client_id: u64,
        include_global: bool,
    ) -> Result<Vec<RequirementRow>, StoreError> {
        Ok(self
            .requirements
            .iter()
            .filter(|row| {
                row.client_id == Some(client_id) || (include_global && row.client_id.is_none())
            })
            .cloned()
            .collect())
    }

    fn documents_for_persons(
        &self,
        person_ids: &[PersonId],
    ) -> Result<Vec<DocumentRow>, StoreError> {
        Ok(self
            .documents
            .iter()
            .filter(|row| person_ids.contains(&PersonId::new(&row.person_id)))
            .cloned()
            .collect())
    }

    fn active_personnel(
        &self,
        limit: usize,
        offset: usize,
    ) -> Result<Vec<PersonnelRow>, StoreError> {
        Ok(self
            .personnel
            .iter()
            .skip(offset)
            .take(limit)
            .cloned()
            .collect())
    }
}

pub(super) struct UnavailableStore;

impl ComplianceStore for UnavailableStore {
    fn requirements_for_client(
        &self,
        _client_id: u64,
        _include_global: bool,
    ) -> Result<Vec<RequirementRow>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn documents_for_persons(
        &self,
        _person_ids: &[PersonId],
    ) -> Result<Vec<DocumentRow>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }

    fn active_personnel(
        &self,
        _limit: usize,
        _offset: usize,
    ) -> Result<Vec<PersonnelRow>, StoreError> {
        Err(StoreError::Unavailable("database offline".to_string()))
    }
}

pub(super) fn test_config() -> EligibilityConfig {
    EligibilityConfig {
        match_batch_ceiling: 5,
        roster_page_limit: 50,
    }
}

pub(super) fn build_service(store: MemoryStore) -> EligibilityService<MemoryStore> {
    EligibilityService::new(Arc::new(store), test_config())
}
