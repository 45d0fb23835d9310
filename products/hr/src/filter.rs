use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::{error::HrError, reconcile::ViewRow};

/// Active department filter.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DeptSelector {
    #[default]
    All,
    Department(i64),
}

impl DeptSelector {
    pub fn matches(&self, row: &ViewRow) -> bool {
        match self {
            DeptSelector::All => true,
            DeptSelector::Department(id) => row.dept_id == Some(*id),
        }
    }
}

impl FromStr for DeptSelector {
    type Err = HrError;

    /// Accepts `all` (any case) or a department id.
    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        let trimmed = raw.trim();
        if trimmed.eq_ignore_ascii_case("all") {
            return Ok(DeptSelector::All);
        }
        trimmed
            .parse::<i64>()
            .map(DeptSelector::Department)
            .map_err(|_| HrError::validation(format!("unknown department selector {raw:?}")))
    }
}

impl fmt::Display for DeptSelector {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            DeptSelector::All => f.write_str("all"),
            DeptSelector::Department(id) => write!(f, "{id}"),
        }
    }
}

/// Keeps the rows of the selected department, newest employee (highest id)
/// first. Rows sharing an id keep their relative order.
pub fn select(mut rows: Vec<ViewRow>, selector: DeptSelector) -> Vec<ViewRow> {
    rows.retain(|row| selector.matches(row));
    rows.sort_by(|a, b| b.id.cmp(&a.id));
    rows
}
