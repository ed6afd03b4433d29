//! Job repository.

use super::{not_found, select_filtered};
use crate::client::GenericClient;
use crate::clause::assign;
use crate::error::JoblyResult;
use crate::model::job::{COLUMNS, FILTERS, SELECT_COLUMNS};
use crate::model::{Job, JobPatch, JobSearch, NewJob};
use crate::query::{Query, query};

/// Job persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct JobRepo;

impl JobRepo {
    pub fn insert_statement(new: &NewJob) -> Query {
        query(format!(
            "INSERT INTO jobs (title, salary, equity, company_handle) \
             VALUES ($1, $2, $3, $4) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(new.title.as_str())
        .bind(new.salary)
        .bind(new.equity)
        .bind(new.company_handle.as_str())
    }

    pub fn find_all_statement() -> Query {
        query(format!("SELECT {SELECT_COLUMNS} FROM jobs ORDER BY title"))
    }

    /// Filtered listing. Falls back to [`find_all_statement`](Self::find_all_statement)
    /// when no filter applies.
    pub fn search_statement(search: &JobSearch) -> JoblyResult<Query> {
        if search.is_empty() {
            return Ok(Self::find_all_statement());
        }
        let fields = search.to_fields();
        FILTERS.check_fields(&fields)?;
        let filter = FILTERS.compose(&fields)?;
        Ok(select_filtered(SELECT_COLUMNS, "jobs", filter, "title"))
    }

    pub fn get_statement(id: i32) -> Query {
        query(format!("SELECT {SELECT_COLUMNS} FROM jobs WHERE id = $1")).bind(id)
    }

    pub fn update_statement(id: i32, patch: &JobPatch) -> JoblyResult<Query> {
        let set = assign::build(&patch.to_fields(), &COLUMNS)?;
        let key = set.next_placeholder();
        let (clause, values) = set.into_parts();
        Ok(query(format!(
            "UPDATE jobs SET {clause} WHERE id = {key} RETURNING {SELECT_COLUMNS}"
        ))
        .bind_all(values)
        .bind(id))
    }

    pub fn remove_statement(id: i32) -> Query {
        query("DELETE FROM jobs WHERE id = $1").bind(id)
    }

    /// Insert a job. A missing company surfaces as
    /// [`JoblyError::ForeignKeyViolation`](crate::JoblyError::ForeignKeyViolation).
    pub async fn create(conn: &impl GenericClient, new: &NewJob) -> JoblyResult<Job> {
        Self::insert_statement(new).fetch_one_as(conn).await
    }

    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<Job>> {
        Self::find_all_statement().fetch_all_as(conn).await
    }

    pub async fn search(conn: &impl GenericClient, search: &JobSearch) -> JoblyResult<Vec<Job>> {
        Self::search_statement(search)?.fetch_all_as(conn).await
    }

    pub async fn get(conn: &impl GenericClient, id: i32) -> JoblyResult<Job> {
        Self::get_statement(id)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| not_found("job", id))
    }

    pub async fn update(conn: &impl GenericClient, id: i32, patch: &JobPatch) -> JoblyResult<Job> {
        Self::update_statement(id, patch)?
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| not_found("job", id))
    }

    pub async fn remove(conn: &impl GenericClient, id: i32) -> JoblyResult<()> {
        match Self::remove_statement(id).execute(conn).await? {
            0 => Err(not_found("job", id)),
            _ => Ok(()),
        }
    }
}
