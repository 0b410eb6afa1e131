use std::sync::Arc;

use super::common::*;
use crate::workflows::eligibility::domain::{ComplianceState, PersonId};
use crate::workflows::eligibility::service::{
    EligibilityError, EligibilityService, MatchOptions, MatchOutcome, SingleMatchOutcome,
};

fn ids(raw: &[&str]) -> Vec<PersonId> {
    raw.iter().map(|value| PersonId::new(value)).collect()
}

#[test]
fn batch_over_the_ceiling_is_rejected_before_the_store_is_touched() {
    // The store would error on any call; the ceiling check must come first.
    let service = EligibilityService::new(Arc::new(UnavailableStore), test_config());
    let person_ids = ids(&["1-9", "2-7", "3-5", "4-3", "5-1", "6-K"]);

    match service.match_for_client(CLIENT_ID, &person_ids, MatchOptions::default(), today()) {
        Err(EligibilityError::PayloadTooLarge { max, found }) => {
            assert_eq!(max, 5);
            assert_eq!(found, 6);
        }
        other => panic!("expected payload too large, got {other:?}"),
    }
}

#[test]
fn match_results_follow_the_requested_order() {
    let service = build_service(MemoryStore::standard());
    let person_ids = ids(&["5555555-5", "12.345.678-5", "9876543-2"]);

    let outcome = service
        .match_for_client(CLIENT_ID, &person_ids, MatchOptions::default(), today())
        .expect("match runs");

    let results = match outcome {
        MatchOutcome::Results(results) => results,
        MatchOutcome::NoPrerequisitesDefined => panic!("requirements exist"),
    };

    assert_eq!(results.len(), 3);
    assert_eq!(results[0].person_id, PersonId::new("5555555-5"));
    assert_eq!(results[0].state, ComplianceState::None);
    assert_eq!(results[1].state, ComplianceState::All);
    assert_eq!(results[2].state, ComplianceState::Some);
}

#[test]
fn require_all_false_accepts_partial_coverage() {
    let service = build_service(MemoryStore::standard());
    let person_ids = ids(&["9876543-2"]);
    let options = MatchOptions {
        require_all: false,
        include_global: true,
    };

    let outcome = service
        .match_for_client(CLIENT_ID, &person_ids, options, today())
        .expect("match runs");

    match outcome {
        MatchOutcome::Results(results) => {
            assert!(results[0].is_fully_compliant);
            assert_eq!(results[0].state, ComplianceState::Some);
        }
        MatchOutcome::NoPrerequisitesDefined => panic!("requirements exist"),
    }
}

#[test]
fn excluding_global_rows_narrows_the_requirement_set() {
    let service = build_service(MemoryStore::standard());
    let person_ids = ids(&["9876543-2"]);
    let options = MatchOptions {
        require_all: true,
        include_global: false,
    };

    let outcome = service
        .match_for_client(CLIENT_ID, &person_ids, options, today())
        .expect("match runs");

    match outcome {
        MatchOutcome::Results(results) => {
            // Only the client-specific license remains, and Benito's lapsed.
            assert_eq!(results[0].required_count, 1);
            assert_eq!(results[0].state, ComplianceState::None);
        }
        MatchOutcome::NoPrerequisitesDefined => panic!("requirements exist"),
    }
}

#[test]
fn client_without_requirements_yields_the_explicit_signal() {
    let store = MemoryStore {
        requirements: Vec::new(),
        ..MemoryStore::standard()
    };
    let service = build_service(store);

    let outcome = service
        .match_for_client(
            CLIENT_ID,
            &ids(&["12345678-5"]),
            MatchOptions::default(),
            today(),
        )
        .expect("match runs");

    assert!(matches!(outcome, MatchOutcome::NoPrerequisitesDefined));
}

#[test]
fn single_match_reports_whether_documents_exist() {
    let service = build_service(MemoryStore::standard());

    let covered = service
        .match_single_for_client(CLIENT_ID, &PersonId::new("12.345.678-5"), true, today())
        .expect("match runs");
    match covered {
        SingleMatchOutcome::Match { found, result } => {
            assert!(found);
            assert_eq!(result.state, ComplianceState::All);
        }
        SingleMatchOutcome::NoPrerequisitesDefined => panic!("requirements exist"),
    }

    let undocumented = service
        .match_single_for_client(CLIENT_ID, &PersonId::new("5555555-5"), true, today())
        .expect("match runs");
    match undocumented {
        SingleMatchOutcome::Match { found, result } => {
            assert!(!found);
            assert_eq!(result.state, ComplianceState::None);
            assert_eq!(result.missing_kinds.len(), 2);
        }
        SingleMatchOutcome::NoPrerequisitesDefined => panic!("requirements exist"),
    }
}

#[test]
fn store_failures_propagate_untranslated() {
    let service = EligibilityService::new(Arc::new(UnavailableStore), test_config());

    match service.match_for_client(CLIENT_ID, &ids(&["1-9"]), MatchOptions::default(), today()) {
        Err(EligibilityError::Store(_)) => {}
        other => panic!("expected store error, got {other:?}"),
    }
}
