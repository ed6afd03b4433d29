//! Company repository.

use super::{not_found, select_filtered};
use crate::client::GenericClient;
use crate::clause::assign;
use crate::error::{JoblyError, JoblyResult};
use crate::model::company::{COLUMNS, FILTERS, SELECT_COLUMNS};
use crate::model::{Company, CompanyDetail, CompanyJob, CompanyPatch, CompanySearch, NewCompany};
use crate::query::{Query, query};

const PRIMARY_KEY: &str = "companies_pkey";

/// Company persistence.
#[derive(Debug, Clone, Copy, Default)]
pub struct CompanyRepo;

impl CompanyRepo {
    pub fn exists_statement(handle: &str) -> Query {
        query("SELECT handle FROM companies WHERE handle = $1").bind(handle)
    }

    pub fn insert_statement(new: &NewCompany) -> Query {
        query(format!(
            "INSERT INTO companies (handle, name, description, num_employees, logo_url) \
             VALUES ($1, $2, $3, $4, $5) RETURNING {SELECT_COLUMNS}"
        ))
        .bind(new.handle.as_str())
        .bind(new.name.as_str())
        .bind(new.description.as_str())
        .bind(new.num_employees)
        .bind(new.logo_url.clone())
    }

    pub fn find_all_statement() -> Query {
        query(format!("SELECT {SELECT_COLUMNS} FROM companies ORDER BY name"))
    }

    /// Filtered listing. Falls back to [`find_all_statement`](Self::find_all_statement)
    /// when no filter applies.
    pub fn search_statement(search: &CompanySearch) -> JoblyResult<Query> {
        search.validate()?;
        if search.is_empty() {
            return Ok(Self::find_all_statement());
        }
        let fields = search.to_fields();
        FILTERS.check_fields(&fields)?;
        let filter = FILTERS.compose(&fields)?;
        Ok(select_filtered(SELECT_COLUMNS, "companies", filter, "name"))
    }

    pub fn get_statement(handle: &str) -> Query {
        query(format!("SELECT {SELECT_COLUMNS} FROM companies WHERE handle = $1")).bind(handle)
    }

    pub fn jobs_statement(handle: &str) -> Query {
        query("SELECT id, title, salary, equity FROM jobs WHERE company_handle = $1 ORDER BY id")
            .bind(handle)
    }

    /// `UPDATE companies SET ... WHERE handle = $N+1`, with the handle bound last.
    pub fn update_statement(handle: &str, patch: &CompanyPatch) -> JoblyResult<Query> {
        let set = assign::build(&patch.to_fields(), &COLUMNS)?;
        let key = set.next_placeholder();
        let (clause, values) = set.into_parts();
        Ok(query(format!(
            "UPDATE companies SET {clause} WHERE handle = {key} RETURNING {SELECT_COLUMNS}"
        ))
        .bind_all(values)
        .bind(handle))
    }

    pub fn remove_statement(handle: &str) -> Query {
        query("DELETE FROM companies WHERE handle = $1").bind(handle)
    }

    /// Insert a company. An existing handle is [`JoblyError::Duplicate`].
    pub async fn create(conn: &impl GenericClient, new: &NewCompany) -> JoblyResult<Company> {
        if Self::exists_statement(&new.handle)
            .fetch_opt(conn)
            .await?
            .is_some()
        {
            return Err(duplicate(&new.handle));
        }
        // A concurrent insert of the same handle can still win the race.
        Self::insert_statement(new)
            .fetch_one_as(conn)
            .await
            .map_err(|err| insert_error(err, &new.handle))
    }

    pub async fn find_all(conn: &impl GenericClient) -> JoblyResult<Vec<Company>> {
        Self::find_all_statement().fetch_all_as(conn).await
    }

    pub async fn search(
        conn: &impl GenericClient,
        search: &CompanySearch,
    ) -> JoblyResult<Vec<Company>> {
        Self::search_statement(search)?.fetch_all_as(conn).await
    }

    /// A company together with its jobs.
    pub async fn get(conn: &impl GenericClient, handle: &str) -> JoblyResult<CompanyDetail> {
        let company: Company = Self::get_statement(handle)
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| not_found("company", handle))?;
        let jobs: Vec<CompanyJob> = Self::jobs_statement(handle).fetch_all_as(conn).await?;
        Ok(CompanyDetail { company, jobs })
    }

    pub async fn update(
        conn: &impl GenericClient,
        handle: &str,
        patch: &CompanyPatch,
    ) -> JoblyResult<Company> {
        Self::update_statement(handle, patch)?
            .fetch_opt_as(conn)
            .await?
            .ok_or_else(|| not_found("company", handle))
    }

    pub async fn remove(conn: &impl GenericClient, handle: &str) -> JoblyResult<()> {
        match Self::remove_statement(handle).execute(conn).await? {
            0 => Err(not_found("company", handle)),
            _ => Ok(()),
        }
    }
}

fn duplicate(handle: &str) -> JoblyError {
    JoblyError::Duplicate(format!("Duplicate company: {handle}"))
}

/// Report a primary-key conflict on insert the same way as the existence check.
pub(crate) fn insert_error(err: JoblyError, handle: &str) -> JoblyError {
    if err.is_unique_violation_on(PRIMARY_KEY) {
        duplicate(handle)
    } else {
        err
    }
}
