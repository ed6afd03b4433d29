//! Pre-numbered SQL statements with bound values

use crate::client::GenericClient;
use crate::error::JoblyResult;
use crate::row::FromRow;
use crate::value::Value;
use tokio_postgres::Row;
use tokio_postgres::types::ToSql;

const MAX_LOGGED_SQL: usize = 200;

/// A SQL statement with `$1, $2, ...` placeholders and the values bound to them.
///
/// Values are always sent as parameters, never spliced into the SQL text.
///
/// # Example
///
/// ```ignore
/// use jobly::query;
///
/// let job: Job = query("SELECT id, title, salary, equity, company_handle FROM jobs WHERE id = $1")
///     .bind(job_id)
///     .fetch_one_as(&conn)
///     .await?;
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct Query {
    sql: String,
    params: Vec<Value>,
}

/// Create a new query with the given SQL
pub fn query(sql: impl Into<String>) -> Query {
    Query {
        sql: sql.into(),
        params: Vec::new(),
    }
}

impl Query {
    /// Bind the next parameter
    pub fn bind(mut self, value: impl Into<Value>) -> Self {
        self.params.push(value.into());
        self
    }

    /// Bind several parameters in order
    pub fn bind_all(mut self, values: impl IntoIterator<Item = Value>) -> Self {
        self.params.extend(values);
        self
    }

    pub fn sql(&self) -> &str {
        &self.sql
    }

    pub fn params(&self) -> &[Value] {
        &self.params
    }

    fn params_ref(&self) -> Vec<&(dyn ToSql + Sync)> {
        self.params.iter().map(|p| p as &(dyn ToSql + Sync)).collect()
    }

    fn trace(&self) {
        tracing::debug!(
            target: "jobly.sql",
            param_count = self.params.len(),
            sql = %truncate_sql(&self.sql, MAX_LOGGED_SQL),
        );
    }

    /// Execute the query and return all rows
    pub async fn fetch_all(&self, conn: &impl GenericClient) -> JoblyResult<Vec<Row>> {
        self.trace();
        conn.query(&self.sql, &self.params_ref()).await
    }

    /// Execute the query and return all rows mapped to type T
    pub async fn fetch_all_as<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<Vec<T>> {
        let rows = self.fetch_all(conn).await?;
        rows.iter().map(T::from_row).collect()
    }

    /// Execute the query and return the first row
    ///
    /// Returns `JoblyError::NotFound` if no rows are returned.
    pub async fn fetch_one(&self, conn: &impl GenericClient) -> JoblyResult<Row> {
        self.trace();
        conn.query_one(&self.sql, &self.params_ref()).await
    }

    /// Execute the query and return the first row mapped to type T
    pub async fn fetch_one_as<T: FromRow>(&self, conn: &impl GenericClient) -> JoblyResult<T> {
        let row = self.fetch_one(conn).await?;
        T::from_row(&row)
    }

    /// Execute the query and return at most one row
    pub async fn fetch_opt(&self, conn: &impl GenericClient) -> JoblyResult<Option<Row>> {
        self.trace();
        conn.query_opt(&self.sql, &self.params_ref()).await
    }

    /// Execute the query and return at most one row mapped to type T
    pub async fn fetch_opt_as<T: FromRow>(
        &self,
        conn: &impl GenericClient,
    ) -> JoblyResult<Option<T>> {
        let row = self.fetch_opt(conn).await?;
        row.as_ref().map(T::from_row).transpose()
    }

    /// Execute the query and return the number of affected rows
    pub async fn execute(&self, conn: &impl GenericClient) -> JoblyResult<u64> {
        self.trace();
        conn.execute(&self.sql, &self.params_ref()).await
    }
}

/// Cut `sql` to at most `max` bytes without splitting a character.
fn truncate_sql(sql: &str, max: usize) -> String {
    if sql.len() <= max {
        return sql.to_string();
    }
    let mut end = max;
    while !sql.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &sql[..end])
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn binds_in_order() {
        let q = query("SELECT * FROM jobs WHERE salary >= $1 AND title ILIKE $2")
            .bind(1000)
            .bind("%dev%");
        assert_eq!(q.params(), &[Value::Int(1000), Value::from("%dev%")]);
    }

    #[test]
    fn bind_all_appends() {
        let q = query("x").bind("a").bind_all(vec![Value::Int(1), Value::Null]);
        assert_eq!(q.params().len(), 3);
        assert_eq!(q.params()[2], Value::Null);
    }

    #[test]
    fn truncate_respects_char_boundary() {
        assert_eq!(truncate_sql("SELECT 1", 200), "SELECT 1");
        assert_eq!(truncate_sql("abcdef", 3), "abc...");
        // 'é' is two bytes; cutting at 2 would split it.
        assert_eq!(truncate_sql("aéb", 2), "a...");
    }
}
