use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};

use chrono::{Duration, NaiveDate};
use fieldforce::config::EligibilityLimits;
use fieldforce::workflows::eligibility::{
    ComplianceStore, DocumentRow, EligibilityConfig, PersonId, PersonnelRow, RequirementRow,
    StoreError,
};
use metrics_exporter_prometheus::PrometheusHandle;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// In-memory store backing the demo command and route-level tests. The
/// production deployment swaps in a SQL-backed implementation of the same
/// trait.
#[derive(Default, Clone)]
pub(crate) struct InMemoryComplianceStore {
    requirements: Arc<Mutex<Vec<RequirementRow>>>,
    documents: Arc<Mutex<Vec<DocumentRow>>>,
    personnel: Arc<Mutex<Vec<PersonnelRow>>>,
}

impl InMemoryComplianceStore {
    pub(crate) fn seeded(
        requirements: Vec<RequirementRow>,
        documents: Vec<DocumentRow>,
        personnel: Vec<PersonnelRow>,
    ) -> Self {
        Self {
            requirements: Arc::new(Mutex::new(requirements)),
            documents: Arc::new(Mutex::new(documents)),
            personnel: Arc::new(Mutex::new(personnel)),
        }
    }
}

impl ComplianceStore for InMemoryComplianceStore {
    fn requirements_for_client(
        &self,
        client_id: u64,
        include_global: bool,
    ) -> Result<Vec<RequirementRow>, StoreError> {
        let guard = self.requirements.lock().expect("store mutex poisoned");
        Ok(guard
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
        let guard = self.documents.lock().expect("store mutex poisoned");
        Ok(guard
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
        let guard = self.personnel.lock().expect("store mutex poisoned");
        Ok(guard.iter().skip(offset).take(limit).cloned().collect())
    }
}

pub(crate) const DEMO_CLIENT_ID: u64 = 1;

/// Fixture roster for the demo command: one fully covered supervisor, one
/// technician with a lapsed license, one new hire without documents.
pub(crate) fn demo_store(today: NaiveDate) -> InMemoryComplianceStore {
    let requirements = vec![
        RequirementRow {
            id: 1,
            client_id: Some(DEMO_CLIENT_ID),
            type_label: "Licencia de Conducir".to_string(),
            description: "licencia vigente clase B".to_string(),
            validity_days: Some(365),
            mandatory: true,
        },
        RequirementRow {
            id: 2,
            client_id: None,
            type_label: "Certificado de Seguridad (EPP)".to_string(),
            description: "entrega de EPP al día".to_string(),
            validity_days: None,
            mandatory: true,
        },
        RequirementRow {
            id: 3,
            client_id: Some(DEMO_CLIENT_ID),
            type_label: "Certificado Médico".to_string(),
            description: "examen preocupacional".to_string(),
            validity_days: Some(180),
            mandatory: false,
        },
    ];

    let documents = vec![
        DocumentRow {
            id: 10,
            person_id: "12.345.678-5".to_string(),
            type_label: "Licencia De Conducir Clase B".to_string(),
            expires_on: Some(today + Duration::days(120)),
            uploaded_on: Some(today - Duration::days(30)),
        },
        DocumentRow {
            id: 11,
            person_id: "12.345.678-5".to_string(),
            type_label: "EPP".to_string(),
            expires_on: None,
            uploaded_on: Some(today - Duration::days(10)),
        },
        DocumentRow {
            id: 12,
            person_id: "9.876.543-2".to_string(),
            type_label: "Licencia Conducir".to_string(),
            expires_on: None,
            uploaded_on: Some(today - Duration::days(400)),
        },
        DocumentRow {
            id: 13,
            person_id: "9.876.543-2".to_string(),
            type_label: "Entrega EPP".to_string(),
            expires_on: None,
            uploaded_on: Some(today - Duration::days(5)),
        },
    ];

    let personnel = vec![
        PersonnelRow {
            person_id: "12345678-5".to_string(),
            display_name: "Ana Rojas".to_string(),
            title: "Supervisora".to_string(),
        },
        PersonnelRow {
            person_id: "9876543-2".to_string(),
            display_name: "Benito Soto".to_string(),
            title: "Técnico".to_string(),
        },
        PersonnelRow {
            person_id: "5555555-5".to_string(),
            display_name: "Carla Díaz".to_string(),
            title: "Técnico".to_string(),
        },
    ];

    InMemoryComplianceStore::seeded(requirements, documents, personnel)
}

pub(crate) fn eligibility_config(limits: &EligibilityLimits) -> EligibilityConfig {
    EligibilityConfig {
        match_batch_ceiling: limits.match_batch_ceiling,
        roster_page_limit: limits.roster_page_limit,
    }
}

pub(crate) fn parse_date(raw: &str) -> Result<NaiveDate, String> {
    NaiveDate::parse_from_str(raw.trim(), "%Y-%m-%d")
        .map_err(|err| format!("failed to parse '{raw}' as YYYY-MM-DD ({err})"))
}
