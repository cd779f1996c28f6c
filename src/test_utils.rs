use crate::cli::CommandLineArgs;
use crate::dataset::DatasetStore;
use crate::models::*;

use clap::Parser;
use serde_json::{Map, Value};

/// A dataset record with every known field set.
pub(crate) const FULL_RECORD_JSON: &str = r#"{
    "district": "LUCKNOW",
    "no_of_registered": 310000,
    "cumulative_hh_issued_jobcards": 298000,
    "no_of_jobcard_deleted": 1200,
    "no_of_jobcard_included": 4500,
    "employment_demanded_households": 120000,
    "employment_offered_households": 110000,
    "employment_availed_households": 95000,
    "persondays_generated": 4100000,
    "persondays_central_liability": 3900000,
    "families_completed_100_days": 2100,
    "sc_beneficiaries_households": 30000,
    "st_beneficiaries_households": 500,
    "others_beneficiaries_households": 64500,
    "sc_beneficiaries_persons": 41000,
    "st_beneficiaries_persons": 700,
    "disabled_beneficiaries": 350,
    "hh_land_reform_beneficiaries": 80,
    "1_14_days": {"households": 21000},
    "100_days": {"households": 2100},
    "state_name": "UTTAR PRADESH"
}"#;

/// Create the RegionRecord described by [FULL_RECORD_JSON].
pub(crate) fn get_test_full_record() -> RegionRecord {
    let mut other_fields = Map::new();
    other_fields.insert("state_name".to_string(), Value::from("UTTAR PRADESH"));
    RegionRecord {
        district_name: "LUCKNOW".to_string(),
        job_cards_registered: 310000,
        job_cards_issued_cumulative: 298000,
        job_cards_deleted: 1200,
        job_cards_included: 4500,
        employment_demanded_households: 120000,
        employment_offered_households: 110000,
        employment_availed_households: 95000,
        persondays_generated: 4100000,
        persondays_central_liability: 3900000,
        families_completed_100_days: 2100,
        sc_beneficiaries_households: 30000,
        st_beneficiaries_households: 500,
        others_beneficiaries_households: 64500,
        sc_beneficiaries_persons: 41000,
        st_beneficiaries_persons: 700,
        disabled_beneficiaries: 350,
        land_reform_beneficiaries: 80,
        work_duration: WorkDuration {
            days_1_to_14: Some(WorkDurationBucket {
                households: 21000,
                other_fields: Map::new(),
            }),
            days_100: Some(WorkDurationBucket {
                households: 2100,
                other_fields: Map::new(),
            }),
            ..Default::default()
        },
        other_fields,
    }
}

/// Create a RegionRecord with the fields used by aggregation set.
pub(crate) fn get_test_record(
    name: &str,
    availed: u64,
    persondays: u64,
    families_100_days: u64,
) -> RegionRecord {
    RegionRecord {
        employment_availed_households: availed,
        persondays_generated: persondays,
        families_completed_100_days: families_100_days,
        ..RegionRecord::new(name)
    }
}

/// Create a store with three districts A, B and C.
pub(crate) fn get_test_store() -> DatasetStore {
    DatasetStore::from_records(vec![
        get_test_record("A", 100, 5000, 0),
        get_test_record("B", 300, 3000, 0),
        get_test_record("C", 0, 0, 0),
    ])
    .unwrap()
}

/// Create CommandLineArgs with default values.
pub(crate) fn get_test_args() -> CommandLineArgs {
    CommandLineArgs::parse_from(["mgnrega-stats"])
}
