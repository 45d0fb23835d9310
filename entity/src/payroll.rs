use serde::{Deserialize, Serialize};

use crate::numeric::{NumericField, lenient_id, lenient_opt_int};

/// Payroll computation for one employee. `id` aliases the employee id but the
/// payroll service may lag behind the employee store.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct PayrollRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    /// Denormalised `"<first> <last>"`, only used for name matching.
    #[serde(default)]
    pub full_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_opt_int")]
    pub department_id: Option<i64>,
    #[serde(default)]
    pub salaire_brut: Option<NumericField>,
    #[serde(default)]
    pub salaire_net: Option<NumericField>,
    #[serde(default, rename = "CNSS")]
    pub cnss: Option<NumericField>,
    #[serde(default, rename = "IRPP")]
    pub irpp: Option<NumericField>,
    #[serde(default)]
    pub hire_date: Option<String>,
}

/// Response of `GET /calc?id=<id>`.
#[derive(Clone, Debug, Default, PartialEq, Deserialize, Serialize)]
pub struct SalaryQuote {
    #[serde(default)]
    pub brut: Option<NumericField>,
    #[serde(default)]
    pub net: Option<NumericField>,
}
