//! State owner for the dashboard.
//!
//! Holds the last successfully loaded snapshot, the active department filter
//! and a single error slot. The slot is cleared when an operation starts and
//! filled when it fails; failures never discard the loaded snapshot.

use entity::{DepartmentRecord, PayrollRecord};
use platform_client::HrClient;
use serde::Serialize;
use tokio::sync::{Mutex, RwLock};
use tracing::{info, warn};

use crate::{
    aggregate::{Totals, aggregate},
    draft::EmployeeDraft,
    enrich::{DEFAULT_CONCURRENCY, EnrichedEmployee, salary_list},
    error::{HrError, HrResult},
    fetch::{Snapshot, load_snapshot},
    filter::{DeptSelector, select},
    index::{DepartmentIndex, PayrollIndex},
    name_match,
    reconcile::{ViewRow, reconcile},
};

/// Rows and totals for one filter, computed from the current snapshot.
#[derive(Clone, Debug, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardView {
    pub rows: Vec<ViewRow>,
    pub totals: Totals,
    pub filter: DeptSelector,
    /// A snapshot has been loaded at least once.
    pub loaded: bool,
    /// The latest load attempt failed; rows come from an earlier snapshot.
    pub stale: bool,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RefreshOutcome {
    Loaded { employees: usize },
    /// Another refresh was in flight; this trigger issued no request.
    AlreadyRunning,
}

struct Loaded {
    snapshot: Snapshot,
    departments: DepartmentIndex,
    payroll: PayrollIndex,
}

impl Loaded {
    fn new(snapshot: Snapshot) -> Self {
        Self {
            departments: DepartmentIndex::build(&snapshot.departments),
            payroll: PayrollIndex::build(&snapshot.payroll),
            snapshot,
        }
    }
}

#[derive(Default)]
struct State {
    loaded: Option<Loaded>,
    stale: bool,
    filter: DeptSelector,
    last_error: Option<HrError>,
}

pub struct Dashboard {
    client: HrClient,
    enrich_concurrency: usize,
    state: RwLock<State>,
    loading: Mutex<()>,
}

impl Dashboard {
    pub fn new(client: HrClient) -> Self {
        Self {
            client,
            enrich_concurrency: DEFAULT_CONCURRENCY,
            state: RwLock::new(State::default()),
            loading: Mutex::new(()),
        }
    }

    pub fn with_enrich_concurrency(mut self, concurrency: usize) -> Self {
        self.enrich_concurrency = concurrency.max(1);
        self
    }

    pub fn client(&self) -> &HrClient {
        &self.client
    }

    /// Reloads all three collections. A trigger arriving while a load is in
    /// flight is ignored rather than racing it.
    pub async fn refresh(&self) -> HrResult<RefreshOutcome> {
        let Ok(_guard) = self.loading.try_lock() else {
            info!("refresh already in flight; trigger ignored");
            return Ok(RefreshOutcome::AlreadyRunning);
        };
        self.begin().await;
        self.load().await
    }

    /// Rows and totals under the active filter.
    pub async fn view(&self) -> DashboardView {
        let filter = self.state.read().await.filter;
        self.view_for(filter).await
    }

    /// Rows and totals under `filter`, leaving the active filter untouched.
    pub async fn view_for(&self, filter: DeptSelector) -> DashboardView {
        let state = self.state.read().await;
        let rows = state
            .loaded
            .as_ref()
            .map(|loaded| reconcile(&loaded.snapshot.employees, &loaded.payroll, &loaded.departments))
            .unwrap_or_default();
        let rows = select(rows, filter);
        let totals = aggregate(&rows);
        DashboardView {
            rows,
            totals,
            filter,
            loaded: state.loaded.is_some(),
            stale: state.stale,
        }
    }

    pub async fn filter(&self) -> DeptSelector {
        self.state.read().await.filter
    }

    pub async fn set_filter(&self, filter: DeptSelector) {
        info!(%filter, "department filter changed");
        self.state.write().await.filter = filter;
    }

    /// Departments of the current snapshot, for filter and form choices.
    pub async fn departments(&self) -> Vec<DepartmentRecord> {
        self.state
            .read()
            .await
            .loaded
            .as_ref()
            .map(|loaded| loaded.snapshot.departments.clone())
            .unwrap_or_default()
    }

    pub async fn last_error(&self) -> Option<HrError> {
        self.state.read().await.last_error.clone()
    }

    /// Validates locally, creates the employee, then reloads. Returns the new
    /// id when the service reported one. A failed reload after a successful
    /// create is left in the error slot and does not fail the create.
    pub async fn create_employee(&self, draft: &EmployeeDraft) -> HrResult<Option<i64>> {
        self.begin().await;
        let employee = match draft.validate() {
            Ok(employee) => employee,
            Err(err) => return self.fail(err).await,
        };
        let created = match self.client.create_employee(&employee).await {
            Ok(created) => created.map(|ack| ack.id),
            Err(err) => return self.fail(HrError::mutation("create employee", err)).await,
        };
        info!(id = ?created, "employee created");
        self.reload_after_mutation().await;
        Ok(created)
    }

    pub async fn update_employee(&self, id: i64, draft: &EmployeeDraft) -> HrResult<()> {
        self.begin().await;
        let patch = match draft.validate_patch() {
            Ok(patch) => patch,
            Err(err) => return self.fail(err).await,
        };
        if let Err(err) = self.client.update_employee(id, &patch).await {
            return self.fail(HrError::mutation("update employee", err)).await;
        }
        info!(id, "employee updated");
        self.reload_after_mutation().await;
        Ok(())
    }

    pub async fn delete_employee(&self, id: i64) -> HrResult<()> {
        self.begin().await;
        if let Err(err) = self.client.delete_employee(id).await {
            return self.fail(HrError::mutation("delete employee", err)).await;
        }
        info!(id, "employee deleted");
        self.reload_after_mutation().await;
        Ok(())
    }

    pub async fn lookup_by_name(&self, first: &str, last: &str) -> HrResult<PayrollRecord> {
        self.begin().await;
        match name_match::lookup_by_name(&self.client, first, last).await {
            Ok(record) => Ok(record),
            Err(err) => self.fail(err).await,
        }
    }

    pub async fn salary_list(&self) -> HrResult<Vec<EnrichedEmployee>> {
        self.begin().await;
        match salary_list(&self.client, self.enrich_concurrency).await {
            Ok(list) => Ok(list),
            Err(err) => self.fail(err).await,
        }
    }

    async fn reload_after_mutation(&self) {
        let _guard = self.loading.lock().await;
        // failure is already recorded in the error slot
        let _ = self.load().await;
    }

    async fn load(&self) -> HrResult<RefreshOutcome> {
        match load_snapshot(&self.client).await {
            Ok(snapshot) => {
                let employees = snapshot.employees.len();
                let mut state = self.state.write().await;
                state.loaded = Some(Loaded::new(snapshot));
                state.stale = false;
                Ok(RefreshOutcome::Loaded { employees })
            }
            Err(err) => {
                self.state.write().await.stale = true;
                self.fail(HrError::load(err)).await
            }
        }
    }

    async fn begin(&self) {
        self.state.write().await.last_error = None;
    }

    async fn fail<T>(&self, err: HrError) -> HrResult<T> {
        warn!(error = %err, "dashboard operation failed");
        self.state.write().await.last_error = Some(err.clone());
        Err(err)
    }
}
