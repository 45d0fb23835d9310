use async_graphql::{InputObject, SimpleObject};
use entity::{DepartmentRecord, NumericField, PayrollRecord};
use platform_api::ApiError;
use products_hr::{DashboardView, EmployeeDraft, EnrichedEmployee, HrError, Totals, ViewRow};

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "ViewRow")]
pub struct ViewRowNode {
    pub id: i64,
    pub full_name: String,
    pub age: Option<i64>,
    pub dept_id: Option<i64>,
    pub dept_name: String,
    pub base_salary: Option<f64>,
    pub hire_date: Option<String>,
    pub salaire_brut: Option<f64>,
    /// `null` when unknown, never zero.
    pub salaire_net: Option<f64>,
    pub cnss: Option<f64>,
    pub irpp: Option<f64>,
}

impl From<ViewRow> for ViewRowNode {
    fn from(row: ViewRow) -> Self {
        Self {
            id: row.id,
            full_name: row.full_name,
            age: row.age,
            dept_id: row.dept_id,
            dept_name: row.dept_name,
            base_salary: row.base_salary,
            hire_date: row.hire_date,
            salaire_brut: row.salaire_brut,
            salaire_net: row.salaire_net,
            cnss: row.cnss,
            irpp: row.irpp,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Totals")]
pub struct TotalsNode {
    pub headcount: usize,
    pub gross_total: f64,
    pub net_total: f64,
}

impl From<Totals> for TotalsNode {
    fn from(totals: Totals) -> Self {
        Self {
            headcount: totals.headcount,
            gross_total: totals.gross_total,
            net_total: totals.net_total,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct DashboardPayload {
    pub rows: Vec<ViewRowNode>,
    pub totals: TotalsNode,
    /// `all` or a department id.
    pub filter: String,
    pub loaded: bool,
    pub stale: bool,
}

impl From<DashboardView> for DashboardPayload {
    fn from(view: DashboardView) -> Self {
        Self {
            rows: view.rows.into_iter().map(ViewRowNode::from).collect(),
            totals: view.totals.into(),
            filter: view.filter.to_string(),
            loaded: view.loaded,
            stale: view.stale,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "Department")]
pub struct DepartmentNode {
    pub id: i64,
    pub name: Option<String>,
}

impl From<DepartmentRecord> for DepartmentNode {
    fn from(record: DepartmentRecord) -> Self {
        Self {
            id: record.id,
            name: record.name,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "PayrollRecord")]
pub struct PayrollNode {
    pub id: i64,
    pub full_name: Option<String>,
    pub salaire_brut: Option<f64>,
    pub salaire_net: Option<f64>,
    pub cnss: Option<f64>,
    pub irpp: Option<f64>,
}

fn amount(field: &Option<NumericField>) -> Option<f64> {
    field.as_ref().and_then(NumericField::as_f64)
}

impl From<PayrollRecord> for PayrollNode {
    fn from(record: PayrollRecord) -> Self {
        Self {
            id: record.id,
            salaire_brut: amount(&record.salaire_brut),
            salaire_net: amount(&record.salaire_net),
            cnss: amount(&record.cnss),
            irpp: amount(&record.irpp),
            full_name: record.full_name,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
#[graphql(name = "SalaryListEntry")]
pub struct SalaryListNode {
    pub id: i64,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub dept_id: Option<i64>,
    pub brut: Option<f64>,
    pub net: Option<f64>,
}

impl From<EnrichedEmployee> for SalaryListNode {
    fn from(entry: EnrichedEmployee) -> Self {
        Self {
            id: entry.employee.id,
            first_name: entry.employee.first_name,
            last_name: entry.employee.last_name,
            dept_id: entry.employee.dept_id,
            brut: entry.brut,
            net: entry.net,
        }
    }
}

#[derive(Clone, Debug, SimpleObject)]
pub struct RefreshPayload {
    /// False when another refresh was already running.
    pub ran: bool,
    pub employees: Option<usize>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct CreateEmployeePayload {
    pub id: Option<i64>,
}

#[derive(Clone, Debug, SimpleObject)]
pub struct ErrorPayload {
    pub code: String,
    pub message: String,
}

impl From<HrError> for ErrorPayload {
    fn from(err: HrError) -> Self {
        let api = ApiError::from(err);
        Self {
            code: api.code().to_string(),
            message: api.to_string(),
        }
    }
}

/// Create/update form. Every field is optional here; required fields are
/// enforced by dashboard validation so all problems are reported together.
#[derive(Clone, Debug, Default, InputObject)]
pub struct EmployeeInput {
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub age: Option<i64>,
    pub dept_id: Option<i64>,
    pub base_salary: Option<f64>,
    /// `YYYY-MM-DD`.
    pub hire_date: Option<String>,
}

impl From<EmployeeInput> for EmployeeDraft {
    fn from(input: EmployeeInput) -> Self {
        Self {
            first_name: input.first_name,
            last_name: input.last_name,
            age: input.age.map(NumericField::from),
            dept_id: input.dept_id.map(NumericField::from),
            base_salary: input.base_salary.map(NumericField::from),
            hire_date: input.hire_date,
        }
    }
}
