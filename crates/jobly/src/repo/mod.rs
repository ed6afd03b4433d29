//! Record repositories.
//!
//! Repositories are stateless. Every operation takes a [`GenericClient`](crate::GenericClient),
//! so the same call works on a plain connection, a pooled one or a transaction.
//!
//! Statement construction is kept apart from execution: the `*_statement` functions
//! return a [`Query`] and never touch the database.

pub mod company;
pub mod job;


pub use company::CompanyRepo;
pub use job::JobRepo;

use crate::clause::ClauseFragment;
use crate::error::JoblyError;
use crate::query::{Query, query};

/// `SELECT <columns> FROM <table> [WHERE <filter>] ORDER BY <order_by>`.
///
/// An empty filter drops the `WHERE` entirely.
pub(crate) fn select_filtered(
    columns: &str,
    table: &str,
    filter: ClauseFragment,
    order_by: &str,
) -> Query {
    if filter.is_empty() {
        return query(format!("SELECT {columns} FROM {table} ORDER BY {order_by}"));
    }
    let (clause, values) = filter.into_parts();
    query(format!(
        "SELECT {columns} FROM {table} WHERE {clause} ORDER BY {order_by}"
    ))
    .bind_all(values)
}

pub(crate) fn not_found(entity: &'static str, key: impl std::fmt::Display) -> JoblyError {
    tracing::debug!(target: "jobly.repo", entity, "record not found");
    JoblyError::not_found(format!("No {entity}: {key}"))
}
