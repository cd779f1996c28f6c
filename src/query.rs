//! Queries over the district dataset
//!
//! Each function here backs exactly one API endpoint. They are pure: no I/O, no interior
//! mutability, and deterministic for a given [DatasetStore].

use crate::dataset::DatasetStore;
use crate::error::StatsError;
use crate::models::{
    normalize_district_name, DistrictSummary, RankingDimension, RegionRecord, StateSummary,
};
use crate::types::Count;

use std::cmp::Reverse;

/// Returns a normalized summary of every district, in dataset order.
pub fn list_districts(store: &DatasetStore) -> Vec<DistrictSummary> {
    store.records().iter().map(DistrictSummary::from).collect()
}

/// Returns the district whose name matches `name`, ignoring case.
///
/// Fails with [StatsError::DistrictNotFound] if there is no such district. The empty string never
/// matches.
pub fn get_district<'a>(
    store: &'a DatasetStore,
    name: &str,
) -> Result<&'a RegionRecord, StatsError> {
    let not_found = || StatsError::DistrictNotFound {
        name: normalize_district_name(name),
    };
    if name.is_empty() {
        return Err(not_found());
    }
    store.find_by_name(name).ok_or_else(not_found)
}

/// Returns state-wide totals over all districts.
pub fn overall_statistics(store: &DatasetStore) -> StateSummary {
    let (households, persondays, families_100_days) = store.records().iter().fold(
        (0, 0, 0),
        |(households, persondays, families_100_days): (Count, Count, Count), record| {
            (
                households.saturating_add(record.employment_availed_households),
                persondays.saturating_add(record.persondays_generated),
                families_100_days.saturating_add(record.families_completed_100_days),
            )
        },
    );
    StateSummary {
        total_districts: store.len(),
        total_households_employed: households,
        total_persondays_generated: persondays,
        total_families_100_days: families_100_days,
        average_days_per_household: rounded_ratio(persondays, households),
    }
}

/// Returns up to `n` districts with the highest value of `dimension`, highest first.
///
/// Districts with equal values keep their dataset order.
pub fn top_districts(
    store: &DatasetStore,
    dimension: RankingDimension,
    n: usize,
) -> Vec<&RegionRecord> {
    let mut ranked: Vec<&RegionRecord> = store.records().iter().collect();
    // sort_by_key is stable.
    ranked.sort_by_key(|record| Reverse(dimension.value_of(record)));
    ranked.truncate(n);
    ranked
}

/// Divide `numerator` by `denominator`, rounding half away from zero.
///
/// Returns 0 when `denominator` is 0.
pub fn rounded_ratio(numerator: Count, denominator: Count) -> Count {
    if denominator == 0 {
        return 0;
    }
    // Widen so that doubling cannot overflow.
    let numerator = numerator as u128;
    let denominator = denominator as u128;
    let rounded = (2 * numerator + denominator) / (2 * denominator);
    // The quotient is at most `numerator`, which came from a Count.
    rounded as Count
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_utils::{self, get_test_record};

    fn names(records: &[&RegionRecord]) -> Vec<String> {
        records.iter().map(|r| r.district_name.clone()).collect()
    }

    #[test]
    fn list_districts_normalizes_fields() {
        let store = DatasetStore::from_records(vec![
            test_utils::get_test_full_record(),
            RegionRecord::new("AGRA"),
        ])
        .unwrap();
        let districts = list_districts(&store);
        assert_eq!(store.len(), districts.len());
        assert_eq!(
            DistrictSummary {
                name: "LUCKNOW".to_string(),
                households_employed: 95000,
                persondays_generated: 4100000,
                families_100_days: 2100,
            },
            districts[0]
        );
        assert_eq!(
            DistrictSummary {
                name: "AGRA".to_string(),
                households_employed: 0,
                persondays_generated: 0,
                families_100_days: 0,
            },
            districts[1]
        );
    }

    #[test]
    fn list_districts_empty() {
        let store = DatasetStore::from_records(vec![]).unwrap();
        assert!(list_districts(&store).is_empty());
    }

    #[test]
    fn list_districts_sentinel() {
        let districts = list_districts(&DatasetStore::sentinel());
        assert_eq!(1, districts.len());
        assert_eq!("SAMPLE", districts[0].name);
    }

    #[test]
    fn get_district_case_insensitive() {
        let store = test_utils::get_test_store();
        let upper = get_district(&store, "B").unwrap();
        let lower = get_district(&store, "b").unwrap();
        assert_eq!(upper, lower);
        assert_eq!("B", upper.district_name);
    }

    #[test]
    fn get_district_returns_full_record() {
        let store = DatasetStore::from_records(vec![test_utils::get_test_full_record()]).unwrap();
        let record = get_district(&store, "Lucknow").unwrap();
        assert_eq!(&test_utils::get_test_full_record(), record);
    }

    #[test]
    fn get_district_not_found() {
        let store = test_utils::get_test_store();
        let error = get_district(&store, "atlantis").unwrap_err();
        assert!(matches!(error, StatsError::DistrictNotFound { name } if name == "ATLANTIS"));
    }

    #[test]
    fn get_district_no_trimming() {
        let store = test_utils::get_test_store();
        assert!(get_district(&store, " A").is_err());
        assert!(get_district(&store, "A ").is_err());
    }

    #[test]
    fn get_district_empty_name() {
        let store = test_utils::get_test_store();
        let error = get_district(&store, "").unwrap_err();
        assert!(matches!(error, StatsError::DistrictNotFound { name } if name.is_empty()));
    }

    #[test]
    fn overall_statistics_example() {
        let store = test_utils::get_test_store();
        assert_eq!(
            StateSummary {
                total_districts: 3,
                total_households_employed: 400,
                total_persondays_generated: 8000,
                total_families_100_days: 0,
                average_days_per_household: 20,
            },
            overall_statistics(&store)
        );
    }

    #[test]
    fn overall_statistics_sentinel() {
        assert_eq!(
            StateSummary {
                total_districts: 1,
                total_households_employed: 0,
                total_persondays_generated: 0,
                total_families_100_days: 0,
                average_days_per_household: 0,
            },
            overall_statistics(&DatasetStore::sentinel())
        );
    }

    #[test]
    fn overall_statistics_empty() {
        let store = DatasetStore::from_records(vec![]).unwrap();
        assert_eq!(StateSummary::default(), overall_statistics(&store));
    }

    #[test]
    fn overall_statistics_families_100_days() {
        let store = DatasetStore::from_records(vec![
            get_test_record("A", 10, 25, 1),
            get_test_record("B", 10, 0, 2),
        ])
        .unwrap();
        let stats = overall_statistics(&store);
        assert_eq!(3, stats.total_families_100_days);
        // 25 / 20 = 1.25
        assert_eq!(1, stats.average_days_per_household);
    }

    #[test]
    fn overall_statistics_saturates() {
        let store = DatasetStore::from_records(vec![
            get_test_record("A", 1, u64::MAX, 0),
            get_test_record("B", 1, 1, 0),
        ])
        .unwrap();
        let stats = overall_statistics(&store);
        assert_eq!(u64::MAX, stats.total_persondays_generated);
        assert_eq!(u64::MAX / 2 + 1, stats.average_days_per_household);
    }

    #[test]
    fn rounded_ratio_half_away_from_zero() {
        assert_eq!(3, rounded_ratio(5, 2));
        assert_eq!(4, rounded_ratio(7, 2));
        assert_eq!(2, rounded_ratio(3, 2));
        assert_eq!(2, rounded_ratio(15, 10));
        assert_eq!(3, rounded_ratio(250, 100));
    }

    #[test]
    fn rounded_ratio_below_and_above_half() {
        // 1.4 and 1.6
        assert_eq!(1, rounded_ratio(7, 5));
        assert_eq!(2, rounded_ratio(8, 5));
    }

    #[test]
    fn rounded_ratio_exact() {
        assert_eq!(20, rounded_ratio(8000, 400));
        assert_eq!(0, rounded_ratio(0, 400));
    }

    #[test]
    fn rounded_ratio_zero_denominator() {
        assert_eq!(0, rounded_ratio(0, 0));
        assert_eq!(0, rounded_ratio(8000, 0));
    }

    #[test]
    fn rounded_ratio_large() {
        assert_eq!(u64::MAX, rounded_ratio(u64::MAX, 1));
        assert_eq!(1, rounded_ratio(u64::MAX, u64::MAX));
    }

    #[test]
    fn top_districts_example() {
        let store = test_utils::get_test_store();
        let top = top_districts(&store, RankingDimension::EmploymentAvailed, 2);
        assert_eq!(vec!["B", "A"], names(&top));
    }

    #[test]
    fn top_districts_stable() {
        let store = DatasetStore::from_records(vec![
            get_test_record("A", 5, 0, 1),
            get_test_record("B", 9, 0, 0),
            get_test_record("C", 5, 0, 1),
            get_test_record("D", 5, 0, 3),
            get_test_record("E", 1, 0, 1),
        ])
        .unwrap();
        let top = top_districts(&store, RankingDimension::EmploymentAvailed, 5);
        assert_eq!(vec!["B", "A", "C", "D", "E"], names(&top));
        let top = top_districts(&store, RankingDimension::HundredDaysCompleted, 5);
        assert_eq!(vec!["D", "A", "C", "E", "B"], names(&top));
    }

    #[test]
    fn top_districts_sorted_descending() {
        let store = DatasetStore::from_records(
            (0..20)
                .map(|i| get_test_record(&format!("D{i}"), (i * 7919) % 13, 0, 0))
                .collect(),
        )
        .unwrap();
        let top = top_districts(&store, RankingDimension::EmploymentAvailed, 20);
        assert_eq!(20, top.len());
        assert!(top
            .windows(2)
            .all(|pair| pair[0].employment_availed_households
                >= pair[1].employment_availed_households));
    }

    #[test]
    fn top_districts_n_larger_than_store() {
        let store = test_utils::get_test_store();
        let top = top_districts(&store, RankingDimension::HundredDaysCompleted, 100);
        assert_eq!(store.len(), top.len());
        // All zero, so dataset order.
        assert_eq!(vec!["A", "B", "C"], names(&top));
    }

    #[test]
    fn top_districts_zero() {
        let store = test_utils::get_test_store();
        assert!(top_districts(&store, RankingDimension::EmploymentAvailed, 0).is_empty());
    }

    #[test]
    fn top_districts_empty_store() {
        let store = DatasetStore::from_records(vec![]).unwrap();
        assert!(top_districts(&store, RankingDimension::EmploymentAvailed, 5).is_empty());
    }
}
