use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::server::error::error_response;

/// Rejected query configuration.
///
/// Raised before any database request is issued.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum QueryError {
    #[error("Unknown table {0:?}")]
    UnknownTable(String),
    #[error("Unknown column {column:?} on table {table:?}")]
    UnknownColumn { table: String, column: String },
    #[error("Empty column selection for table {0:?}")]
    EmptySelection(String),
    #[error("Invalid value for operator {operator:?}: {reason}")]
    InvalidFilterValue { operator: String, reason: String },
}

impl IntoResponse for QueryError {
    fn into_response(self) -> Response {
        tracing::debug!("Query configuration error: {}", self);

        error_response(StatusCode::BAD_REQUEST, self.to_string())
    }
}
