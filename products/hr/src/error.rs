use std::sync::Arc;

use platform_client::ClientError;
use thiserror::Error;

pub type HrResult<T> = Result<T, HrError>;

/// Failure of one dashboard operation. Cloneable so the dashboard can keep
/// the most recent one in its error slot while also returning it.
#[derive(Clone, Debug, Error)]
pub enum HrError {
    /// One of the three collections could not be retrieved; nothing was applied.
    #[error("failed to load dashboard data: {0}")]
    Load(Arc<ClientError>),
    /// Rejected locally, no request issued.
    #[error("invalid input: {0}")]
    Validation(String),
    #[error("{action} rejected: {source}")]
    Mutation {
        action: &'static str,
        source: Arc<ClientError>,
    },
    #[error("no payroll record found for {0:?}")]
    NotFound(String),
    #[error("{count} payroll records match {name:?}")]
    Ambiguous { name: String, count: usize },
    #[error("service unreachable: {0}")]
    Unreachable(Arc<ClientError>),
}

impl HrError {
    pub fn load(err: ClientError) -> Self {
        Self::Load(Arc::new(err))
    }

    pub fn mutation(action: &'static str, err: ClientError) -> Self {
        Self::Mutation {
            action,
            source: Arc::new(err),
        }
    }

    pub fn unreachable(err: ClientError) -> Self {
        Self::Unreachable(Arc::new(err))
    }

    pub fn validation(msg: impl Into<String>) -> Self {
        Self::Validation(msg.into())
    }
}
