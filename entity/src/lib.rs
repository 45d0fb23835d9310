//! Records exchanged with the employee, payroll and department services.
//!
//! The services are schema-less beyond field names. Decoding keeps values as
//! received (numbers may arrive as numeric strings, most fields may be
//! absent); coercion and defaulting belong to the reconciliation layer.

pub mod department;
pub mod employee;
pub mod numeric;
pub mod payroll;

pub use department::DepartmentRecord;
pub use employee::{CreatedEmployee, EmployeePatch, EmployeeRecord, NewEmployee};
pub use numeric::NumericField;
pub use payroll::{PayrollRecord, SalaryQuote};
