use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::numeric::{NumericField, lenient_id, lenient_opt_int};

/// Employee as listed by the employee service. Source of truth for identity.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct EmployeeRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub age: Option<i64>,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub dept_id: Option<i64>,
    #[serde(default)]
    pub base_salary: Option<NumericField>,
    /// Kept verbatim: the service emits either `YYYY-MM-DD` or an HTTP date.
    #[serde(default)]
    pub hire_date: Option<String>,
}

/// Body of `POST /employees`.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct NewEmployee {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub dept_id: i64,
    pub base_salary: f64,
    #[serde(with = "iso_date")]
    pub hire_date: NaiveDate,
}

/// Body of `PUT /employees/<id>`. Absent fields are left untouched upstream.
#[derive(Clone, Debug, Default, PartialEq, Serialize)]
pub struct EmployeePatch {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub first_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub age: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub dept_id: Option<i64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub base_salary: Option<f64>,
    #[serde(
        skip_serializing_if = "Option::is_none",
        serialize_with = "iso_date::serialize_opt"
    )]
    pub hire_date: Option<NaiveDate>,
}

impl EmployeePatch {
    pub fn is_empty(&self) -> bool {
        self == &EmployeePatch::default()
    }
}

/// Acknowledgement of a create. The service answers `{"id": n}`; richer
/// bodies are accepted and the extra fields ignored.
#[derive(Clone, Debug, PartialEq, Deserialize)]
pub struct CreatedEmployee {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
}

mod iso_date {
    use chrono::NaiveDate;
    use serde::Serializer;

    const FORMAT: &str = "%Y-%m-%d";

    pub fn serialize<S: Serializer>(date: &NaiveDate, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(&date.format(FORMAT))
    }

    pub fn serialize_opt<S: Serializer>(
        date: &Option<NaiveDate>,
        serializer: S,
    ) -> Result<S::Ok, S::Error> {
        match date {
            Some(date) => serialize(date, serializer),
            None => serializer.serialize_none(),
        }
    }
}
