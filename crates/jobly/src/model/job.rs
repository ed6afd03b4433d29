//! Jobs.

use super::present;
use crate::error::JoblyResult;
use crate::fields::FieldValues;
use crate::filter::FilterSpec;
use crate::row::{FromRow, RowExt};
use crate::translate::{ColumnTable, PredicateTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Assignment table. Job fields share their column names, and `id` /
/// `companyHandle` are never updatable.
pub const COLUMNS: ColumnTable = ColumnTable::new(&[]);

pub const PREDICATES: PredicateTable =
    PredicateTable::new(&[("title", "title ILIKE"), ("minSalary", "salary >=")]);

/// `hasEquity` carries no value: it only toggles `equity > 0`.
pub const FILTERS: FilterSpec = FilterSpec {
    entity: "jobs",
    table: PREDICATES,
    substring_fields: &["title"],
    flags: &[("hasEquity", "equity > 0")],
};

pub(crate) const SELECT_COLUMNS: &str = "id, title, salary, equity, company_handle";

/// A job record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

impl FromRow for Job {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
            company_handle: row.try_get_column("company_handle")?,
        })
    }
}

/// Input for creating a job.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewJob {
    pub title: String,
    #[serde(default)]
    pub salary: Option<i32>,
    #[serde(default)]
    pub equity: Option<Decimal>,
    pub company_handle: String,
}

/// Partial update of a job.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobPatch {
    #[serde(default, deserialize_with = "present")]
    pub title: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub salary: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub equity: Option<Option<Decimal>>,
}

impl JobPatch {
    pub fn to_fields(&self) -> FieldValues {
        let mut fields = FieldValues::new();
        fields
            .insert_opt("title", self.title.clone())
            .insert_opt("salary", self.salary)
            .insert_opt("equity", self.equity);
        fields
    }
}

/// Filters for listing jobs.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct JobSearch {
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub min_salary: Option<i32>,
    /// Only jobs with a non-zero equity share.
    #[serde(default)]
    pub has_equity: Option<bool>,
}

impl JobSearch {
    /// Whether no filter applies. `hasEquity: false` filters nothing.
    pub fn is_empty(&self) -> bool {
        self.title.is_none() && self.min_salary.is_none() && self.has_equity != Some(true)
    }

    pub fn to_fields(&self) -> FieldValues {
        let mut fields = FieldValues::new();
        fields
            .insert_opt("title", self.title.clone())
            .insert_opt("minSalary", self.min_salary)
            .insert_opt("hasEquity", self.has_equity);
        fields
    }
}
