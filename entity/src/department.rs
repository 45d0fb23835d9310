use serde::{Deserialize, Serialize};

use crate::numeric::lenient_id;

/// Entry of the department directory.
#[derive(Clone, Debug, PartialEq, Deserialize, Serialize)]
pub struct DepartmentRecord {
    #[serde(deserialize_with = "lenient_id")]
    pub id: i64,
    #[serde(default)]
    pub name: Option<String>,
}
