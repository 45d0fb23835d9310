//! HR dashboard core.
//!
//! Joins the employee, payroll and department collections into [`ViewRow`]s,
//! narrows them by department and totals the visible payroll. Every step
//! after the fetch is a pure function; [`Dashboard`] owns the state and
//! invokes them explicitly after each event.

pub mod aggregate;
pub mod dashboard;
pub mod draft;
pub mod enrich;
pub mod error;
pub mod fetch;
pub mod filter;
pub mod index;
pub mod name_match;
pub mod payroll;
pub mod reconcile;

pub use aggregate::{Totals, aggregate};
pub use dashboard::{Dashboard, DashboardView, RefreshOutcome};
pub use draft::EmployeeDraft;
pub use enrich::{DEFAULT_CONCURRENCY, EnrichedEmployee, enrich, salary_list, try_map_bounded};
pub use error::{HrError, HrResult};
pub use fetch::{Snapshot, load_snapshot};
pub use filter::{DeptSelector, select};
pub use index::{DepartmentIndex, PayrollIndex};
pub use name_match::{find_by_name, lookup_by_name};
pub use payroll::{NetBreakdown, net_from_gross};
pub use reconcile::{ViewRow, reconcile};
