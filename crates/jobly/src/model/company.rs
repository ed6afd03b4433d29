//! Companies.

use super::present;
use crate::error::{JoblyError, JoblyResult};
use crate::fields::FieldValues;
use crate::filter::FilterSpec;
use crate::row::{FromRow, RowExt};
use crate::translate::{ColumnTable, PredicateTable};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use tokio_postgres::Row;

/// Assignment table. `handle` is the key and is never updatable.
pub const COLUMNS: ColumnTable = ColumnTable::new(&[
    ("numEmployees", "num_employees"),
    ("logoUrl", "logo_url"),
]);

pub const PREDICATES: PredicateTable = PredicateTable::new(&[
    ("name", "name ILIKE"),
    ("minEmployees", "num_employees >="),
    ("maxEmployees", "num_employees <="),
]);

pub const FILTERS: FilterSpec = FilterSpec {
    entity: "companies",
    table: PREDICATES,
    substring_fields: &["name"],
    flags: &[],
};

/// Selected columns, in [`Company`] order.
pub(crate) const SELECT_COLUMNS: &str = "handle, name, description, num_employees, logo_url";

/// A company record.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Company {
    pub handle: String,
    pub name: String,
    pub description: String,
    pub num_employees: Option<i32>,
    pub logo_url: Option<String>,
}

impl FromRow for Company {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            handle: row.try_get_column("handle")?,
            name: row.try_get_column("name")?,
            description: row.try_get_column("description")?,
            num_employees: row.try_get_column("num_employees")?,
            logo_url: row.try_get_column("logo_url")?,
        })
    }
}

/// A job as listed under its company (no `companyHandle`).
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyJob {
    pub id: i32,
    pub title: String,
    pub salary: Option<i32>,
    pub equity: Option<Decimal>,
}

impl FromRow for CompanyJob {
    fn from_row(row: &Row) -> JoblyResult<Self> {
        Ok(Self {
            id: row.try_get_column("id")?,
            title: row.try_get_column("title")?,
            salary: row.try_get_column("salary")?,
            equity: row.try_get_column("equity")?,
        })
    }
}

/// A company with its jobs.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CompanyDetail {
    #[serde(flatten)]
    pub company: Company,
    pub jobs: Vec<CompanyJob>,
}

/// Input for creating a company.
#[derive(Debug, Clone, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct NewCompany {
    pub handle: String,
    pub name: String,
    pub description: String,
    #[serde(default)]
    pub num_employees: Option<i32>,
    #[serde(default)]
    pub logo_url: Option<String>,
}

/// Partial update of a company.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanyPatch {
    #[serde(default, deserialize_with = "present")]
    pub name: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub description: Option<String>,
    #[serde(default, deserialize_with = "present")]
    pub num_employees: Option<Option<i32>>,
    #[serde(default, deserialize_with = "present")]
    pub logo_url: Option<Option<String>>,
}

impl CompanyPatch {
    /// Fields to set, in declaration order.
    pub fn to_fields(&self) -> FieldValues {
        let mut fields = FieldValues::new();
        fields
            .insert_opt("name", self.name.clone())
            .insert_opt("description", self.description.clone())
            .insert_opt("numEmployees", self.num_employees)
            .insert_opt("logoUrl", self.logo_url.clone());
        fields
    }
}

/// Filters for listing companies.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", deny_unknown_fields)]
pub struct CompanySearch {
    /// Case-insensitive substring of the name.
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub min_employees: Option<i32>,
    #[serde(default)]
    pub max_employees: Option<i32>,
}

impl CompanySearch {
    /// Cross-field checks that the composition layer does not repeat.
    pub fn validate(&self) -> JoblyResult<()> {
        if let (Some(min), Some(max)) = (self.min_employees, self.max_employees) {
            if min > max {
                return Err(JoblyError::validation(
                    "minEmployees cannot be greater than maxEmployees",
                ));
            }
        }
        Ok(())
    }

    /// Whether no filter applies.
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.min_employees.is_none() && self.max_employees.is_none()
    }

    /// Raw filter values, before wildcard wrapping.
    pub fn to_fields(&self) -> FieldValues {
        let mut fields = FieldValues::new();
        fields
            .insert_opt("name", self.name.clone())
            .insert_opt("minEmployees", self.min_employees)
            .insert_opt("maxEmployees", self.max_employees);
        fields
    }
}
