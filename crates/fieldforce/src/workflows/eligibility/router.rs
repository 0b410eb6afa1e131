use std::sync::Arc;

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, post},
    Router,
};
use chrono::{Local, NaiveDate};
use serde::Deserialize;
use serde_json::json;

use super::domain::PersonId;
use super::repository::ComplianceStore;
use super::scanner::RosterScan;
use super::service::{
    EligibilityError, EligibilityService, MatchOptions, MatchOutcome, ScanOptions,
    SingleMatchOutcome,
};

/// Router builder exposing the compliance endpoints for one service instance.
pub fn eligibility_router<S>(service: Arc<EligibilityService<S>>) -> Router
where
    S: ComplianceStore + 'static,
{
    Router::new()
        .route(
            "/api/v1/clients/:client_id/compliance/match",
            post(match_handler::<S>),
        )
        .route(
            "/api/v1/clients/:client_id/compliance/people/:person_id",
            get(person_handler::<S>),
        )
        .route(
            "/api/v1/clients/:client_id/compliance/eligible",
            get(eligible_handler::<S>),
        )
        .route(
            "/api/v1/clients/:client_id/compliance/partial",
            get(partial_handler::<S>),
        )
        .with_state(service)
}

#[derive(Debug, Deserialize)]
pub(crate) struct MatchRequest {
    pub(crate) person_ids: Vec<String>,
    #[serde(default = "default_true")]
    pub(crate) require_all: bool,
    #[serde(default = "default_true")]
    pub(crate) include_global: bool,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct ScanQuery {
    pub(crate) limit: Option<usize>,
    pub(crate) offset: Option<usize>,
    #[serde(default = "default_true")]
    pub(crate) include_global: bool,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

#[derive(Debug, Deserialize)]
pub(crate) struct PersonQuery {
    #[serde(default = "default_true")]
    pub(crate) include_global: bool,
    #[serde(default)]
    pub(crate) today: Option<NaiveDate>,
}

fn default_true() -> bool {
    true
}

fn evaluation_date(requested: Option<NaiveDate>) -> NaiveDate {
    requested.unwrap_or_else(|| Local::now().date_naive())
}

fn no_prerequisites_response(client_id: u64) -> Response {
    let payload = json!({
        "client_id": client_id,
        "no_prerequisites": true,
        "message": "no prerequisites defined for this client",
        "results": [],
    });
    (StatusCode::OK, axum::Json(payload)).into_response()
}

fn error_response(error: EligibilityError) -> Response {
    let status = match &error {
        EligibilityError::PayloadTooLarge { .. } => StatusCode::PAYLOAD_TOO_LARGE,
        EligibilityError::Store(_) => StatusCode::INTERNAL_SERVER_ERROR,
    };
    let payload = json!({ "error": error.to_string() });
    (status, axum::Json(payload)).into_response()
}

pub(crate) async fn match_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(client_id): Path<u64>,
    axum::Json(request): axum::Json<MatchRequest>,
) -> Response
where
    S: ComplianceStore + 'static,
{
    let MatchRequest {
        person_ids,
        require_all,
        include_global,
        today,
    } = request;

    let person_ids: Vec<PersonId> = person_ids.iter().map(|raw| PersonId::new(raw)).collect();
    let today = evaluation_date(today);
    let options = MatchOptions {
        require_all,
        include_global,
    };

    match service.match_for_client(client_id, &person_ids, options, today) {
        Ok(MatchOutcome::Results(results)) => {
            let payload = json!({
                "client_id": client_id,
                "evaluated_on": today,
                "results": results,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(MatchOutcome::NoPrerequisitesDefined) => no_prerequisites_response(client_id),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn person_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path((client_id, person_id)): Path<(u64, String)>,
    Query(query): Query<PersonQuery>,
) -> Response
where
    S: ComplianceStore + 'static,
{
    let person_id = PersonId::new(&person_id);
    let today = evaluation_date(query.today);

    match service.match_single_for_client(client_id, &person_id, query.include_global, today) {
        Ok(SingleMatchOutcome::Match { found, result }) => {
            let payload = json!({
                "client_id": client_id,
                "evaluated_on": today,
                "found": found,
                "result": result,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(SingleMatchOutcome::NoPrerequisitesDefined) => no_prerequisites_response(client_id),
        Err(error) => error_response(error),
    }
}

pub(crate) async fn eligible_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(client_id): Path<u64>,
    Query(query): Query<ScanQuery>,
) -> Response
where
    S: ComplianceStore + 'static,
{
    let today = evaluation_date(query.today);
    let options = ScanOptions {
        include_global: query.include_global,
        limit: query.limit,
        offset: query.offset,
    };

    scan_response(
        client_id,
        today,
        service.scan_fully_compliant(client_id, options, today),
    )
}

pub(crate) async fn partial_handler<S>(
    State(service): State<Arc<EligibilityService<S>>>,
    Path(client_id): Path<u64>,
    Query(query): Query<ScanQuery>,
) -> Response
where
    S: ComplianceStore + 'static,
{
    let today = evaluation_date(query.today);
    let options = ScanOptions {
        include_global: query.include_global,
        limit: query.limit,
        offset: query.offset,
    };

    scan_response(
        client_id,
        today,
        service.scan_partially_compliant(client_id, options, today),
    )
}

fn scan_response(
    client_id: u64,
    today: NaiveDate,
    outcome: Result<RosterScan, EligibilityError>,
) -> Response {
    match outcome {
        Ok(RosterScan::Page(people)) => {
            let payload = json!({
                "client_id": client_id,
                "evaluated_on": today,
                "people": people,
            });
            (StatusCode::OK, axum::Json(payload)).into_response()
        }
        Ok(RosterScan::NoPrerequisitesDefined) => no_prerequisites_response(client_id),
        Err(error) => error_response(error),
    }
}
