//! # jobly
//!
//! Data access for companies and jobs on PostgreSQL.
//!
//! ## Features
//!
//! - **Parameter-safe dynamic SQL**: partial updates and filtered searches are built
//!   from ordered field/value input into clause text with `$n` placeholders plus the
//!   values bound to them. Values never reach the SQL text.
//! - **Closed field sets**: request shapes (`CompanyPatch`, `JobSearch`, ...) reject
//!   unknown fields, and every field they emit has a translation table entry.
//! - **Transaction-friendly**: repositories take any [`GenericClient`], including
//!   transactions and pooled connections.
//!
//! ```ignore
//! use jobly::{JobRepo, JobSearch};
//!
//! let search = JobSearch {
//!     min_salary: Some(200_000),
//!     has_equity: Some(true),
//!     ..Default::default()
//! };
//! // SELECT ... FROM jobs WHERE salary >= $1 AND equity > 0 ORDER BY title
//! let jobs = JobRepo::search(&client, &search).await?;
//! ```

pub mod clause;
pub mod client;
pub mod config;
pub mod error;
pub mod fields;
pub mod filter;
pub mod ident;
pub mod model;
pub mod query;
pub mod repo;
pub mod row;
pub mod translate;
pub mod value;

#[cfg(feature = "pool")]
pub mod pool;

#[cfg(feature = "migrate")]
pub mod migrate;

pub use clause::ClauseFragment;
pub use client::GenericClient;
pub use config::DatabaseConfig;
pub use error::{JoblyError, JoblyResult};
pub use fields::FieldValues;
pub use filter::FilterSpec;
pub use ident::Ident;
pub use model::{
    Company, CompanyDetail, CompanyJob, CompanyPatch, CompanySearch, Job, JobPatch, JobSearch,
    NewCompany, NewJob,
};
pub use query::{Query, query};
pub use repo::{CompanyRepo, JobRepo};
pub use row::{FromRow, RowExt};
pub use translate::{ColumnTable, PredicateTable};
pub use value::Value;

#[cfg(feature = "pool")]
pub use pool::{create_pool, create_pool_from_config, create_pool_with_tls};
