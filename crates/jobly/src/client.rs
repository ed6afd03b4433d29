//! Generic client trait for unified database access.

use crate::error::{JoblyError, JoblyResult};
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

/// A trait that unifies database clients and transactions.
///
/// Repository methods accept either a direct connection, a pooled connection or a
/// transaction, so several record operations can be composed inside one transaction.
pub trait GenericClient: Send + Sync {
    /// Execute a query and return all rows.
    fn query(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = JoblyResult<Vec<Row>>> + Send;

    /// Execute a query and return the **first** row.
    ///
    /// Returns `JoblyError::NotFound` if no rows are returned.
    fn query_one(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = JoblyResult<Row>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            rows.into_iter()
                .next()
                .ok_or_else(|| JoblyError::not_found("Expected one row, got none"))
        }
    }

    /// Execute a query and return the first row, if any.
    fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = JoblyResult<Option<Row>>> + Send {
        async move {
            let rows = self.query(sql, params).await?;
            Ok(rows.into_iter().next())
        }
    }

    /// Execute a statement and return the number of affected rows.
    fn execute(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> impl std::future::Future<Output = JoblyResult<u64>> + Send;
}

impl GenericClient for tokio_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        tokio_postgres::Client::query(self, sql, params)
            .await
            .map_err(JoblyError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        tokio_postgres::Client::execute(self, sql, params)
            .await
            .map_err(JoblyError::from_db_error)
    }
}

impl GenericClient for tokio_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        tokio_postgres::Transaction::query(self, sql, params)
            .await
            .map_err(JoblyError::from_db_error)
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        tokio_postgres::Transaction::execute(self, sql, params)
            .await
            .map_err(JoblyError::from_db_error)
    }
}

// ===== deadpool-postgres support =====

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Client {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        // Delegate to the deref target (ClientWrapper / tokio_postgres::Client).
        GenericClient::query(&***self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        GenericClient::execute(&***self, sql, params).await
    }
}

#[cfg(feature = "pool")]
impl GenericClient for deadpool_postgres::Transaction<'_> {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        GenericClient::query(&**self, sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        GenericClient::execute(&**self, sql, params).await
    }
}

// Lets repositories take `&client` where an owned client is expected.
impl<C: GenericClient> GenericClient for &C {
    async fn query(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Vec<Row>> {
        (*self).query(sql, params).await
    }

    async fn query_one(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<Row> {
        (*self).query_one(sql, params).await
    }

    async fn query_opt(
        &self,
        sql: &str,
        params: &[&(dyn ToSql + Sync)],
    ) -> JoblyResult<Option<Row>> {
        (*self).query_opt(sql, params).await
    }

    async fn execute(&self, sql: &str, params: &[&(dyn ToSql + Sync)]) -> JoblyResult<u64> {
        (*self).execute(sql, params).await
    }
}
