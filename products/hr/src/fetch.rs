use entity::{DepartmentRecord, EmployeeRecord, PayrollRecord};
use platform_client::{ClientResult, HrClient};
use tracing::info;

/// The three collections as returned by their services, undefaulted.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct Snapshot {
    pub employees: Vec<EmployeeRecord>,
    pub payroll: Vec<PayrollRecord>,
    pub departments: Vec<DepartmentRecord>,
}

/// Retrieves all three collections concurrently. Succeeds only if every
/// retrieval succeeds; the first failure is returned and the other results
/// are dropped.
pub async fn load_snapshot(client: &HrClient) -> ClientResult<Snapshot> {
    let (employees, payroll, departments) = tokio::try_join!(
        client.list_employees(),
        client.list_payroll(),
        client.list_departments(),
    )?;
    info!(
        employees = employees.len(),
        payroll = payroll.len(),
        departments = departments.len(),
        "snapshot loaded"
    );
    Ok(Snapshot {
        employees,
        payroll,
        departments,
    })
}
