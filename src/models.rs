//! Data types and associated functions and methods

use crate::types::{count, Count};

use serde::{de::Error as _, Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};
use strum_macros::Display;
use validator::Validate;

/// Number of districts returned by a ranking when the caller does not ask for a specific number.
pub const DEFAULT_TOP_N: usize = 5;

/// Name of the placeholder district used when the dataset cannot be loaded.
pub const SENTINEL_DISTRICT: &str = "SAMPLE";

/// MGNREGA statistics for a single district over a reporting period.
///
/// Field names on the wire are those of the published dataset, which the dashboard also relies
/// on. All counts are lenient: absent or malformed values deserialise as 0.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct RegionRecord {
    /// District name. Unique within a dataset, compared in upper case.
    #[serde(rename = "district")]
    pub district_name: String,

    /// Registered job cards
    #[serde(rename = "no_of_registered", default, deserialize_with = "count::deserialize")]
    pub job_cards_registered: Count,
    /// Job cards issued to households, cumulative
    #[serde(
        rename = "cumulative_hh_issued_jobcards",
        default,
        deserialize_with = "count::deserialize"
    )]
    pub job_cards_issued_cumulative: Count,
    /// Job cards deleted
    #[serde(rename = "no_of_jobcard_deleted", default, deserialize_with = "count::deserialize")]
    pub job_cards_deleted: Count,
    /// Job cards included
    #[serde(rename = "no_of_jobcard_included", default, deserialize_with = "count::deserialize")]
    pub job_cards_included: Count,

    /// Households that demanded employment
    #[serde(default, deserialize_with = "count::deserialize")]
    pub employment_demanded_households: Count,
    /// Households that were offered employment
    #[serde(default, deserialize_with = "count::deserialize")]
    pub employment_offered_households: Count,
    /// Households that actually received employment
    #[serde(default, deserialize_with = "count::deserialize")]
    pub employment_availed_households: Count,

    /// Person-days of work generated
    #[serde(default, deserialize_with = "count::deserialize")]
    pub persondays_generated: Count,
    /// Person-days under central government liability
    #[serde(default, deserialize_with = "count::deserialize")]
    pub persondays_central_liability: Count,

    /// Households that completed 100 days of work
    #[serde(default, deserialize_with = "count::deserialize")]
    pub families_completed_100_days: Count,

    /// Scheduled Caste households benefiting
    #[serde(default, deserialize_with = "count::deserialize")]
    pub sc_beneficiaries_households: Count,
    /// Scheduled Tribe households benefiting
    #[serde(default, deserialize_with = "count::deserialize")]
    pub st_beneficiaries_households: Count,
    /// Other households benefiting
    #[serde(default, deserialize_with = "count::deserialize")]
    pub others_beneficiaries_households: Count,
    /// Scheduled Caste persons benefiting
    #[serde(default, deserialize_with = "count::deserialize")]
    pub sc_beneficiaries_persons: Count,
    /// Scheduled Tribe persons benefiting
    #[serde(default, deserialize_with = "count::deserialize")]
    pub st_beneficiaries_persons: Count,
    /// Disabled beneficiaries
    #[serde(default, deserialize_with = "count::deserialize")]
    pub disabled_beneficiaries: Count,
    /// Land reform beneficiary households
    #[serde(
        rename = "hh_land_reform_beneficiaries",
        default,
        deserialize_with = "count::deserialize"
    )]
    pub land_reform_beneficiaries: Count,

    /// Households bucketed by days of work received
    #[serde(flatten)]
    pub work_duration: WorkDuration,

    /// Any other fields present in the dataset, passed through unmodified.
    #[serde(flatten)]
    pub other_fields: Map<String, Value>,
}

impl RegionRecord {
    /// Return a RegionRecord with the given name and all counts zero.
    pub fn new(district_name: impl Into<String>) -> Self {
        RegionRecord {
            district_name: district_name.into(),
            ..Default::default()
        }
    }

    /// District name normalized for lookups.
    pub fn normalized_name(&self) -> String {
        normalize_district_name(&self.district_name)
    }
}

/// Normalize a district name for comparison.
///
/// Upper case only: no trimming, no diacritic folding.
pub fn normalize_district_name(name: &str) -> String {
    name.to_uppercase()
}

/// Households bucketed by the number of days of work they received.
///
/// Buckets are optional and only consumed by the dashboard's duration chart. They are passed
/// through as-is, except that a bucket which is not a JSON object is treated as absent.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WorkDuration {
    #[serde(
        rename = "1_14_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_1_to_14: Option<WorkDurationBucket>,
    #[serde(
        rename = "15_30_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_15_to_30: Option<WorkDurationBucket>,
    #[serde(
        rename = "31_40_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_31_to_40: Option<WorkDurationBucket>,
    #[serde(
        rename = "41_50_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_41_to_50: Option<WorkDurationBucket>,
    #[serde(
        rename = "51_60_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_51_to_60: Option<WorkDurationBucket>,
    #[serde(
        rename = "61_70_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_61_to_70: Option<WorkDurationBucket>,
    #[serde(
        rename = "71_80_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_71_to_80: Option<WorkDurationBucket>,
    #[serde(
        rename = "81_99_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_81_to_99: Option<WorkDurationBucket>,
    #[serde(
        rename = "100_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_100: Option<WorkDurationBucket>,
    #[serde(
        rename = "101_150_days",
        default,
        deserialize_with = "deserialize_bucket",
        skip_serializing_if = "Option::is_none"
    )]
    pub days_101_to_150: Option<WorkDurationBucket>,
}

/// A single work duration bucket
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct WorkDurationBucket {
    /// Households in this bucket
    #[serde(default, deserialize_with = "count::deserialize")]
    pub households: Count,
    /// Other per-bucket fields, e.g. persons
    #[serde(flatten)]
    pub other_fields: Map<String, Value>,
}

/// Deserialise an optional work duration bucket, discarding values that are not objects.
fn deserialize_bucket<'de, D>(deserializer: D) -> Result<Option<WorkDurationBucket>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(value @ Value::Object(_)) => {
            serde_json::from_value(value).map(Some).map_err(D::Error::custom)
        }
        _ => Ok(None),
    }
}

/// Normalized per-district view used by the district list.
#[derive(Clone, Debug, Deserialize, PartialEq, Serialize)]
pub struct DistrictSummary {
    /// District name as it appears in the dataset
    pub name: String,
    /// Households that received employment
    pub households_employed: Count,
    /// Person-days of work generated
    pub persondays_generated: Count,
    /// Households that completed 100 days of work
    pub families_100_days: Count,
}

impl From<&RegionRecord> for DistrictSummary {
    fn from(record: &RegionRecord) -> Self {
        DistrictSummary {
            name: record.district_name.clone(),
            households_employed: record.employment_availed_households,
            persondays_generated: record.persondays_generated,
            families_100_days: record.families_completed_100_days,
        }
    }
}

/// State-wide aggregate statistics. Computed on demand, never stored.
#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
pub struct StateSummary {
    /// Number of districts in the dataset
    pub total_districts: usize,
    /// Sum of households that received employment
    pub total_households_employed: Count,
    /// Sum of person-days generated
    pub total_persondays_generated: Count,
    /// Sum of households that completed 100 days
    pub total_families_100_days: Count,
    /// Person-days per employed household, rounded half away from zero. 0 when no household was
    /// employed.
    pub average_days_per_household: Count,
}

/// Metric by which districts may be ranked
#[derive(Clone, Copy, Debug, Deserialize, Display, Eq, PartialEq)]
pub enum RankingDimension {
    /// Households that received employment
    #[serde(rename = "employment_availed")]
    #[strum(serialize = "employment_availed")]
    EmploymentAvailed,
    /// Households that completed 100 days of work
    #[serde(rename = "100_days_completed")]
    #[strum(serialize = "100_days_completed")]
    HundredDaysCompleted,
}

impl RankingDimension {
    /// Returns the value of this metric for a record.
    pub fn value_of(self, record: &RegionRecord) -> Count {
        match self {
            Self::EmploymentAvailed => record.employment_availed_households,
            Self::HundredDaysCompleted => record.families_completed_100_days,
        }
    }
}

/// Query parameters for district rankings
#[derive(Debug, Deserialize, PartialEq, Validate)]
#[serde(deny_unknown_fields)]
pub struct TopDistrictsQuery {
    /// Ranking metric
    pub by: RankingDimension,
    /// Number of districts to return
    #[serde(default = "default_top_n")]
    #[validate(range(min = 1, message = "n must be greater than 0"))]
    pub n: usize,
}

fn default_top_n() -> usize {
    DEFAULT_TOP_N
}

/// Health check response
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct Health {
    /// Always "OK" while the service is serving
    pub status: String,
    /// Current time, RFC 3339
    pub timestamp: String,
    /// Deployment environment name
    pub environment: String,
    /// Number of districts being served
    pub districts: usize,
    /// Whether the placeholder dataset is being served because loading failed
    pub dataset_fallback: bool,
}

/// Service banner listing the available endpoints
#[derive(Debug, Deserialize, PartialEq, Serialize)]
pub struct ServiceIndex {
    /// Banner message
    pub message: String,
    /// Current time, RFC 3339
    pub timestamp: String,
    /// Endpoint paths and their descriptions
    pub endpoints: Map<String, Value>,
}
