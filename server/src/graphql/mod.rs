mod dashboard;

use std::sync::Arc;

use async_graphql::{Context, EmptySubscription, ErrorExtensions, Object, Schema};
use platform_api::{ApiError, internal_error};
use products_hr::{Dashboard, DeptSelector, HrError, RefreshOutcome};
use tracing::instrument;

use dashboard::{
    CreateEmployeePayload, DashboardPayload, DepartmentNode, EmployeeInput, ErrorPayload,
    PayrollNode, RefreshPayload, SalaryListNode,
};

pub type SchemaType = Schema<QueryRoot, MutationRoot, EmptySubscription>;

pub fn build_schema(dashboard: Arc<Dashboard>) -> SchemaType {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(dashboard)
        .finish()
}

fn dashboard<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Arc<Dashboard>> {
    ctx.data::<Arc<Dashboard>>()
        .map_err(|_| internal_error(anyhow::anyhow!("dashboard missing from schema data")))
}

fn api_error(err: HrError) -> async_graphql::Error {
    ApiError::from(err).extend()
}

fn parse_selector(raw: &str) -> async_graphql::Result<DeptSelector> {
    raw.parse::<DeptSelector>().map_err(api_error)
}

#[derive(Default)]
pub struct QueryRoot;

#[Object]
impl QueryRoot {
    /// Rows and totals. `dept` overrides the active filter for this query only.
    #[instrument(name = "graphql.dashboard", skip(self, ctx))]
    async fn dashboard(
        &self,
        ctx: &Context<'_>,
        dept: Option<String>,
    ) -> async_graphql::Result<DashboardPayload> {
        let dashboard = dashboard(ctx)?;
        let view = match dept {
            Some(raw) => dashboard.view_for(parse_selector(&raw)?).await,
            None => dashboard.view().await,
        };
        Ok(view.into())
    }

    #[instrument(name = "graphql.departments", skip_all)]
    async fn departments(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<DepartmentNode>> {
        let departments = dashboard(ctx)?.departments().await;
        Ok(departments.into_iter().map(DepartmentNode::from).collect())
    }

    #[instrument(name = "graphql.payroll_by_name", skip(self, ctx))]
    async fn payroll_by_name(
        &self,
        ctx: &Context<'_>,
        first_name: String,
        last_name: String,
    ) -> async_graphql::Result<PayrollNode> {
        let record = dashboard(ctx)?
            .lookup_by_name(&first_name, &last_name)
            .await
            .map_err(api_error)?;
        Ok(record.into())
    }

    #[instrument(name = "graphql.salary_list", skip_all)]
    async fn salary_list(&self, ctx: &Context<'_>) -> async_graphql::Result<Vec<SalaryListNode>> {
        let list = dashboard(ctx)?.salary_list().await.map_err(api_error)?;
        Ok(list.into_iter().map(SalaryListNode::from).collect())
    }

    #[instrument(name = "graphql.last_error", skip_all)]
    async fn last_error(&self, ctx: &Context<'_>) -> async_graphql::Result<Option<ErrorPayload>> {
        Ok(dashboard(ctx)?.last_error().await.map(ErrorPayload::from))
    }

    async fn version(&self) -> String {
        env!("CARGO_PKG_VERSION").to_string()
    }
}

#[derive(Default)]
pub struct MutationRoot;

#[Object]
impl MutationRoot {
    #[instrument(name = "graphql.refresh", skip_all)]
    async fn refresh(&self, ctx: &Context<'_>) -> async_graphql::Result<RefreshPayload> {
        let outcome = dashboard(ctx)?.refresh().await.map_err(api_error)?;
        Ok(match outcome {
            RefreshOutcome::Loaded { employees } => RefreshPayload {
                ran: true,
                employees: Some(employees),
            },
            RefreshOutcome::AlreadyRunning => RefreshPayload {
                ran: false,
                employees: None,
            },
        })
    }

    #[instrument(name = "graphql.set_filter", skip(self, ctx))]
    async fn set_filter(
        &self,
        ctx: &Context<'_>,
        dept: String,
    ) -> async_graphql::Result<DashboardPayload> {
        let dashboard = dashboard(ctx)?;
        dashboard.set_filter(parse_selector(&dept)?).await;
        Ok(dashboard.view().await.into())
    }

    #[instrument(name = "graphql.create_employee", skip_all)]
    async fn create_employee(
        &self,
        ctx: &Context<'_>,
        input: EmployeeInput,
    ) -> async_graphql::Result<CreateEmployeePayload> {
        let id = dashboard(ctx)?
            .create_employee(&input.into())
            .await
            .map_err(api_error)?;
        Ok(CreateEmployeePayload { id })
    }

    #[instrument(name = "graphql.update_employee", skip(self, ctx, input))]
    async fn update_employee(
        &self,
        ctx: &Context<'_>,
        id: i64,
        input: EmployeeInput,
    ) -> async_graphql::Result<bool> {
        dashboard(ctx)?
            .update_employee(id, &input.into())
            .await
            .map_err(api_error)?;
        Ok(true)
    }

    #[instrument(name = "graphql.delete_employee", skip(self, ctx))]
    async fn delete_employee(&self, ctx: &Context<'_>, id: i64) -> async_graphql::Result<bool> {
        dashboard(ctx)?
            .delete_employee(id)
            .await
            .map_err(api_error)?;
        Ok(true)
    }
}
