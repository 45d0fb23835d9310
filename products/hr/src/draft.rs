use chrono::NaiveDate;
use entity::{EmployeePatch, NewEmployee, NumericField};
use serde::Deserialize;

use crate::error::{HrError, HrResult};

/// Raw employee form values, before validation. Numbers may be given as
/// numbers or text.
#[derive(Clone, Debug, Default, Deserialize)]
pub struct EmployeeDraft {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<NumericField>,
    pub dept_id: Option<NumericField>,
    pub base_salary: Option<NumericField>,
    pub hire_date: Option<String>,
}

impl EmployeeDraft {
    /// Checks a create form. Names, department, base salary and hire date are
    /// required; age is optional. Reports every missing field at once.
    pub fn validate(&self) -> HrResult<NewEmployee> {
        let first_name = text(&self.first_name);
        let last_name = text(&self.last_name);
        let hire_date = text(&self.hire_date);
        let dept_id = self.dept_id.as_ref().filter(|v| !is_blank(v));
        let base_salary = self.base_salary.as_ref().filter(|v| !is_blank(v));

        let missing: Vec<&str> = [
            ("first_name", first_name.is_none()),
            ("last_name", last_name.is_none()),
            ("dept_id", dept_id.is_none()),
            ("base_salary", base_salary.is_none()),
            ("hire_date", hire_date.is_none()),
        ]
        .into_iter()
        .filter_map(|(field, absent)| absent.then_some(field))
        .collect();
        if !missing.is_empty() {
            return Err(HrError::validation(format!(
                "missing required fields: {}",
                missing.join(", ")
            )));
        }

        let (Some(first_name), Some(last_name), Some(dept_id), Some(base_salary), Some(hire_date)) =
            (first_name, last_name, dept_id, base_salary, hire_date)
        else {
            return Err(HrError::validation("missing required fields"));
        };

        Ok(NewEmployee {
            first_name: first_name.to_string(),
            last_name: last_name.to_string(),
            age: self.age()?,
            dept_id: integer("dept_id", dept_id)?,
            base_salary: salary(base_salary)?,
            hire_date: date(hire_date)?,
        })
    }

    /// Checks an update form: every field optional, blank means untouched,
    /// but at least one field must be set.
    pub fn validate_patch(&self) -> HrResult<EmployeePatch> {
        let patch = EmployeePatch {
            first_name: text(&self.first_name).map(str::to_string),
            last_name: text(&self.last_name).map(str::to_string),
            age: self.age()?,
            dept_id: self
                .dept_id
                .as_ref()
                .filter(|v| !is_blank(v))
                .map(|v| integer("dept_id", v))
                .transpose()?,
            base_salary: self
                .base_salary
                .as_ref()
                .filter(|v| !is_blank(v))
                .map(salary)
                .transpose()?,
            hire_date: text(&self.hire_date).map(date).transpose()?,
        };
        if patch.is_empty() {
            return Err(HrError::validation("no fields to update"));
        }
        Ok(patch)
    }

    fn age(&self) -> HrResult<Option<i64>> {
        self.age
            .as_ref()
            .filter(|v| !is_blank(v))
            .map(|v| integer("age", v))
            .transpose()
    }
}

fn text(value: &Option<String>) -> Option<&str> {
    value.as_deref().map(str::trim).filter(|s| !s.is_empty())
}

fn is_blank(value: &NumericField) -> bool {
    matches!(value, NumericField::Text(s) if s.trim().is_empty())
}

fn integer(field: &str, value: &NumericField) -> HrResult<i64> {
    value
        .as_i64()
        .ok_or_else(|| HrError::validation(format!("{field} must be an integer")))
}

fn salary(value: &NumericField) -> HrResult<f64> {
    value
        .as_f64()
        .filter(|amount| *amount >= 0.0)
        .ok_or_else(|| HrError::validation("base_salary must be a non-negative number"))
}

fn date(value: &str) -> HrResult<NaiveDate> {
    NaiveDate::parse_from_str(value, "%Y-%m-%d")
        .map_err(|_| HrError::validation(format!("hire_date {value:?} is not a YYYY-MM-DD date")))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn complete() -> EmployeeDraft {
        EmployeeDraft {
            first_name: Some("Jane".into()),
            last_name: Some("Doe".into()),
            age: Some("31".into()),
            dept_id: Some(NumericField::from(2_i64)),
            base_salary: Some("2400.50".into()),
            hire_date: Some("2024-03-09".into()),
        }
    }

    fn message(err: HrError) -> String {
        match err {
            HrError::Validation(msg) => msg,
            other => panic!("expected validation failure, got {other:?}"),
        }
    }

    #[test]
    fn complete_draft_coerces_fields() {
        let employee = complete().validate().unwrap();
        assert_eq!(employee.age, Some(31));
        assert_eq!(employee.dept_id, 2);
        assert_eq!(employee.base_salary, 2400.5);
        assert_eq!(
            employee.hire_date,
            NaiveDate::from_ymd_opt(2024, 3, 9).unwrap()
        );
    }

    #[test]
    fn age_is_optional() {
        let draft = EmployeeDraft {
            age: Some("".into()),
            ..complete()
        };
        assert_eq!(draft.validate().unwrap().age, None);
    }

    #[test]
    fn missing_fields_are_listed_together() {
        let draft = EmployeeDraft {
            first_name: Some("   ".into()),
            hire_date: None,
            ..complete()
        };
        let msg = message(draft.validate().unwrap_err());
        assert_eq!(msg, "missing required fields: first_name, hire_date");
    }

    #[test]
    fn non_numeric_salary_is_invalid() {
        let draft = EmployeeDraft {
            base_salary: Some("lots".into()),
            ..complete()
        };
        assert!(message(draft.validate().unwrap_err()).contains("base_salary"));
    }

    #[test]
    fn malformed_date_is_invalid() {
        let draft = EmployeeDraft {
            hire_date: Some("09/03/2024".into()),
            ..complete()
        };
        assert!(message(draft.validate().unwrap_err()).contains("hire_date"));
    }

    #[test]
    fn patch_needs_at_least_one_field() {
        assert_eq!(
            message(EmployeeDraft::default().validate_patch().unwrap_err()),
            "no fields to update"
        );
        let patch = EmployeeDraft {
            dept_id: Some("4".into()),
            ..Default::default()
        }
        .validate_patch()
        .unwrap();
        assert_eq!(patch.dept_id, Some(4));
        assert_eq!(patch.first_name, None);
    }
}
