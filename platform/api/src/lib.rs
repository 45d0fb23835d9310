use std::sync::Arc;

use async_graphql::{Error, ErrorExtensions};
use products_hr::HrError;
use thiserror::Error;

/// Shared GraphQL result type.
pub type ApiResult<T> = Result<T, ApiError>;

#[derive(Debug, Error, Clone)]
pub enum ApiError {
    #[error("dashboard data could not be loaded: {0}")]
    LoadFailed(String),
    #[error("bad request: {0}")]
    InvalidInput(String),
    #[error("{0}")]
    MutationFailed(String),
    #[error("resource not found: {0}")]
    NotFound(String),
    #[error("{0}")]
    Ambiguous(String),
    #[error("upstream service unreachable: {0}")]
    Unreachable(String),
    #[error("internal server error")]
    Internal(Arc<anyhow::Error>),
}

impl ApiError {
    pub fn code(&self) -> &'static str {
        match self {
            ApiError::LoadFailed(_) => "LOAD_FAILED",
            ApiError::InvalidInput(_) => "INVALID_INPUT",
            ApiError::MutationFailed(_) => "MUTATION_FAILED",
            ApiError::NotFound(_) => "NOT_FOUND",
            ApiError::Ambiguous(_) => "AMBIGUOUS",
            ApiError::Unreachable(_) => "UNREACHABLE",
            ApiError::Internal(_) => "INTERNAL",
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self::Internal(Arc::new(err))
    }
}

impl From<anyhow::Error> for ApiError {
    fn from(value: anyhow::Error) -> Self {
        Self::internal(value)
    }
}

impl From<HrError> for ApiError {
    fn from(value: HrError) -> Self {
        match &value {
            HrError::Load(err) => ApiError::LoadFailed(err.to_string()),
            HrError::Validation(msg) => ApiError::InvalidInput(msg.clone()),
            HrError::Mutation { .. } => ApiError::MutationFailed(value.to_string()),
            HrError::NotFound(name) => ApiError::NotFound(name.clone()),
            HrError::Ambiguous { .. } => ApiError::Ambiguous(value.to_string()),
            HrError::Unreachable(err) => ApiError::Unreachable(err.to_string()),
        }
    }
}

impl ErrorExtensions for ApiError {
    fn extend(&self) -> Error {
        let mut err = Error::new(self.to_string());
        err = err.extend_with(|_err, e| {
            e.set("code", self.code());
        });
        if let ApiError::InvalidInput(_) = self {
            err = err.extend_with(|_err, e| {
                e.set("type", "BAD_REQUEST");
            });
        }
        err
    }
}

/// Convert any error into a GraphQL error payload while hiding internals.
pub fn internal_error(err: impl Into<anyhow::Error>) -> Error {
    tracing::error!("internal error surfaced to GraphQL");
    ApiError::internal(err.into()).extend()
}

#[cfg(test)]
mod tests {
    use super::*;
    use async_graphql::Value;

    fn code_of(err: &Error) -> Option<Value> {
        err.extensions
            .as_ref()
            .and_then(|map| map.get("code"))
            .cloned()
    }

    #[test]
    fn internal_errors_are_masked() {
        let err = internal_error(anyhow::anyhow!("boom"));
        assert_eq!(err.message, "internal server error");
        assert_eq!(code_of(&err), Some(Value::from("INTERNAL")));
    }

    #[test]
    fn dashboard_failures_keep_their_class() {
        let validation = ApiError::from(HrError::validation("first and last name are both required"));
        let err = validation.extend();
        assert_eq!(code_of(&err), Some(Value::from("INVALID_INPUT")));
        assert!(err.message.contains("first and last name"));

        let not_found = ApiError::from(HrError::NotFound("Jane Doe".into())).extend();
        assert_eq!(code_of(&not_found), Some(Value::from("NOT_FOUND")));

        let ambiguous = ApiError::from(HrError::Ambiguous {
            name: "Ali Ben Salah".into(),
            count: 2,
        });
        assert_eq!(ambiguous.code(), "AMBIGUOUS");
    }
}
