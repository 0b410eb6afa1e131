use std::sync::Arc;

use chrono::{Local, NaiveDate};
use clap::Args;
use fieldforce::error::AppError;
use fieldforce::workflows::eligibility::{
    ComplianceStore, EligibilityConfig, EligibilityError, EligibilityService, MatchOptions,
    MatchOutcome, PersonId, RequirementSet, RosterScan, ScanOptions,
};

use crate::infra::{demo_store, parse_date, DEMO_CLIENT_ID};

#[derive(Args, Debug)]
pub(crate) struct DemoArgs {
    /// Evaluation date for the walkthrough (YYYY-MM-DD, defaults to today)
    #[arg(long, value_parser = parse_date)]
    pub(crate) today: Option<NaiveDate>,
    /// Include the per-person document breakdown
    #[arg(long)]
    pub(crate) list_documents: bool,
}

pub(crate) fn run_demo(args: DemoArgs) -> Result<(), AppError> {
    let today = args.today.unwrap_or_else(|| Local::now().date_naive());
    let store = demo_store(today);

    println!("Credential-compliance demo (client {DEMO_CLIENT_ID}, evaluated {today})");

    let rows = store
        .requirements_for_client(DEMO_CLIENT_ID, true)
        .map_err(EligibilityError::from)?;
    let set = RequirementSet::from_rows(rows);

    println!("\nRequirements");
    for requirement in set.requirements() {
        let scope = if requirement.is_global() {
            "global"
        } else {
            "client"
        };
        let gate = if requirement.mandatory {
            "mandatory"
        } else {
            "informational"
        };
        let window = match requirement.validity_days {
            Some(days) => format!(", valid {days} days from upload"),
            None => String::new(),
        };
        println!(
            "- {} -> {} ({scope}, {gate}{window})",
            requirement.raw_label,
            requirement.kind.label()
        );
    }

    let roster = store
        .active_personnel(100, 0)
        .map_err(EligibilityError::from)?;
    let person_ids: Vec<PersonId> = roster
        .iter()
        .map(|row| PersonId::new(&row.person_id))
        .collect();

    let service = EligibilityService::new(Arc::new(store), EligibilityConfig::default());
    let outcome =
        service.match_for_client(DEMO_CLIENT_ID, &person_ids, MatchOptions::default(), today)?;

    println!("\nRoster classification");
    match outcome {
        MatchOutcome::NoPrerequisitesDefined => {
            println!("- no prerequisites defined for this client");
        }
        MatchOutcome::Results(results) => {
            for (row, result) in roster.iter().zip(&results) {
                let missing: Vec<&str> = result
                    .missing_kinds
                    .iter()
                    .map(|kind| kind.label())
                    .collect();
                let gap = if missing.is_empty() {
                    "complete".to_string()
                } else {
                    format!("missing {}", missing.join(", "))
                };
                println!(
                    "- {} ({}): {}/{} required, {}",
                    row.display_name,
                    result.state.label(),
                    result.satisfied_count,
                    result.required_count,
                    gap
                );

                if args.list_documents {
                    for document in &result.documents {
                        let status = if document.expired { "expired" } else { "valid" };
                        let until = match document.expires_on {
                            Some(date) => format!(" until {date}"),
                            None => String::new(),
                        };
                        println!(
                            "    * {} -> {} ({status}{until})",
                            document.source_label,
                            document.kind.label()
                        );
                    }
                }
            }
        }
    }

    let eligible = service.scan_fully_compliant(DEMO_CLIENT_ID, ScanOptions::default(), today)?;
    print_scan("Assignable today", eligible);

    let partial = service.scan_partially_compliant(DEMO_CLIENT_ID, ScanOptions::default(), today)?;
    print_scan("Close the gap", partial);

    Ok(())
}

fn print_scan(heading: &str, scan: RosterScan) {
    println!("\n{heading}");
    match scan {
        RosterScan::NoPrerequisitesDefined => {
            println!("- no prerequisites defined for this client");
        }
        RosterScan::Page(people) if people.is_empty() => println!("- nobody on this page"),
        RosterScan::Page(people) => {
            for person in people {
                println!("- {} ({})", person.display_name, person.title);
            }
        }
    }
}
