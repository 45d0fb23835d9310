use std::future::Future;

use entity::{EmployeeRecord, NumericField};
use futures::{StreamExt, TryStreamExt, stream};
use platform_client::HrClient;
use serde::Serialize;
use tracing::{info, warn};

use crate::error::{HrError, HrResult};

/// Lookups in flight at once when fanning out per employee.
pub const DEFAULT_CONCURRENCY: usize = 8;

/// Employee record with its computed salary merged in.
#[derive(Clone, Debug, PartialEq, Serialize)]
pub struct EnrichedEmployee {
    #[serde(flatten)]
    pub employee: EmployeeRecord,
    pub brut: Option<f64>,
    pub net: Option<f64>,
}

/// Applies `op` to every item with at most `limit` calls in flight.
///
/// Output order follows input order. The first error aborts the whole map:
/// pending calls are dropped and no partial output is returned.
pub async fn try_map_bounded<T, U, E, F, Fut>(items: Vec<T>, limit: usize, op: F) -> Result<Vec<U>, E>
where
    F: FnMut(T) -> Fut,
    Fut: Future<Output = Result<U, E>>,
{
    stream::iter(items)
        .map(op)
        .buffered(limit.max(1))
        .try_collect()
        .await
}

/// Fetches one salary quote per employee and merges `brut`/`net` into a copy
/// of each record. Any failed quote fails the whole enrichment.
pub async fn enrich(
    client: &HrClient,
    employees: Vec<EmployeeRecord>,
    concurrency: usize,
) -> HrResult<Vec<EnrichedEmployee>> {
    let total = employees.len();
    let enriched = try_map_bounded(employees, concurrency, |employee| async move {
        let quote = client.salary_quote(employee.id).await.map_err(|err| {
            warn!(id = employee.id, error = %err, "salary quote failed");
            HrError::unreachable(err)
        })?;
        Ok::<_, HrError>(EnrichedEmployee {
            brut: quote.brut.as_ref().and_then(NumericField::as_f64),
            net: quote.net.as_ref().and_then(NumericField::as_f64),
            employee,
        })
    })
    .await?;
    info!(employees = total, "salary list enriched");
    Ok(enriched)
}

/// Lists employees, then enriches every one of them.
pub async fn salary_list(client: &HrClient, concurrency: usize) -> HrResult<Vec<EnrichedEmployee>> {
    let employees = client
        .list_employees()
        .await
        .map_err(HrError::unreachable)?;
    enrich(client, employees, concurrency).await
}
