//! Lookup tables for the reconciliation join.
//!
//! Both indexes are built from a whole collection and never mutated. When
//! two records share an id the one appearing later in the collection wins.

use std::collections::HashMap;

use entity::{DepartmentRecord, PayrollRecord};

/// `department id -> name`, last write wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DepartmentIndex(HashMap<i64, String>);

impl DepartmentIndex {
    pub fn build(departments: &[DepartmentRecord]) -> Self {
        Self(
            departments
                .iter()
                .map(|dept| (dept.id, dept.name.clone().unwrap_or_default()))
                .collect(),
        )
    }

    /// Name of the department, `None` when unknown or blank.
    pub fn name(&self, id: i64) -> Option<&str> {
        self.0
            .get(&id)
            .map(String::as_str)
            .filter(|name| !name.trim().is_empty())
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

/// `employee id -> payroll record`, last write wins.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct PayrollIndex(HashMap<i64, PayrollRecord>);

impl PayrollIndex {
    pub fn build(payroll: &[PayrollRecord]) -> Self {
        Self(
            payroll
                .iter()
                .map(|record| (record.id, record.clone()))
                .collect(),
        )
    }

    pub fn get(&self, employee_id: i64) -> Option<&PayrollRecord> {
        self.0.get(&employee_id)
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use entity::NumericField;

    fn dept(id: i64, name: &str) -> DepartmentRecord {
        DepartmentRecord {
            id,
            name: Some(name.to_string()),
        }
    }

    fn payroll(id: i64, brut: f64) -> PayrollRecord {
        PayrollRecord {
            id,
            full_name: None,
            department_id: None,
            salaire_brut: Some(NumericField::from(brut)),
            salaire_net: None,
            cnss: None,
            irpp: None,
            hire_date: None,
        }
    }

    #[test]
    fn later_departments_override_earlier_ones() {
        let index = DepartmentIndex::build(&[dept(1, "IT"), dept(2, "Sales"), dept(1, "Ops")]);
        assert_eq!(index.len(), 2);
        assert_eq!(index.name(1), Some("Ops"));
        assert_eq!(index.name(2), Some("Sales"));
        assert_eq!(index.name(3), None);
    }

    #[test]
    fn blank_department_names_count_as_missing() {
        let index = DepartmentIndex::build(&[
            dept(1, "  "),
            DepartmentRecord { id: 2, name: None },
        ]);
        assert_eq!(index.name(1), None);
        assert_eq!(index.name(2), None);
    }

    #[test]
    fn later_payroll_records_override_earlier_ones() {
        let index = PayrollIndex::build(&[payroll(5, 100.0), payroll(5, 250.0)]);
        assert_eq!(index.len(), 1);
        let brut = index
            .get(5)
            .and_then(|record| record.salaire_brut.as_ref())
            .and_then(NumericField::as_f64);
        assert_eq!(brut, Some(250.0));
        assert!(index.get(6).is_none());
    }
}
