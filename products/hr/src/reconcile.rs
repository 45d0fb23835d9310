use entity::{EmployeeRecord, NumericField};
use serde::Serialize;

use crate::index::{DepartmentIndex, PayrollIndex};

/// One employee joined with its department and payroll data.
///
/// Amounts are `None` when unknown. Unknown is not zero: it renders as a
/// placeholder and only counts as zero inside totals.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ViewRow {
    pub id: i64,
    pub full_name: String,
    pub age: Option<i64>,
    pub dept_id: Option<i64>,
    pub dept_name: String,
    pub base_salary: Option<f64>,
    pub hire_date: Option<String>,
    pub salaire_brut: Option<f64>,
    pub salaire_net: Option<f64>,
    pub cnss: Option<f64>,
    pub irpp: Option<f64>,
}

/// Produces one row per employee, in employee order. Pure and deterministic.
///
/// Department names fall back to `"Dept <id>"`. Without a payroll record the
/// gross amount falls back to the base salary and the other amounts are
/// unknown; with one, each absent payroll field is unknown on its own.
pub fn reconcile(
    employees: &[EmployeeRecord],
    payroll: &PayrollIndex,
    departments: &DepartmentIndex,
) -> Vec<ViewRow> {
    employees
        .iter()
        .map(|employee| reconcile_one(employee, payroll, departments))
        .collect()
}

fn reconcile_one(
    employee: &EmployeeRecord,
    payroll: &PayrollIndex,
    departments: &DepartmentIndex,
) -> ViewRow {
    let base_salary = amount(&employee.base_salary);
    let (salaire_brut, salaire_net, cnss, irpp) = match payroll.get(employee.id) {
        Some(record) => (
            amount(&record.salaire_brut),
            amount(&record.salaire_net),
            amount(&record.cnss),
            amount(&record.irpp),
        ),
        None => (base_salary, None, None, None),
    };

    ViewRow {
        id: employee.id,
        full_name: full_name(employee),
        age: employee.age,
        dept_id: employee.dept_id,
        dept_name: dept_name(employee.dept_id, departments),
        base_salary,
        hire_date: employee.hire_date.clone(),
        salaire_brut,
        salaire_net,
        cnss,
        irpp,
    }
}

fn amount(field: &Option<NumericField>) -> Option<f64> {
    field.as_ref().and_then(NumericField::as_f64)
}

fn full_name(employee: &EmployeeRecord) -> String {
    format!(
        "{} {}",
        employee.first_name.as_deref().unwrap_or_default(),
        employee.last_name.as_deref().unwrap_or_default()
    )
}

fn dept_name(dept_id: Option<i64>, departments: &DepartmentIndex) -> String {
    match dept_id {
        Some(id) => departments
            .name(id)
            .map(str::to_string)
            .unwrap_or_else(|| format!("Dept {id}")),
        None => "Dept ?".to_string(),
    }
}
