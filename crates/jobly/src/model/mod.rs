//! Record kinds, their request shapes, and their translation tables.
//!
//! Each submodule declares, for one record kind:
//!
//! - the record struct(s) returned to callers (`FromRow` + `Serialize`);
//! - `New*` input for inserts, `*Patch` input for partial updates and `*Search`
//!   input for filtered listing. These are the allow-list: serde rejects any other
//!   field name, so only the fields they define ever reach the clause builders;
//! - `COLUMNS`, `PREDICATES` and `FILTERS`, the static tables the clause builders and
//!   the filter composition use.
//!
//! Patch fields backed by nullable columns are `Option<Option<T>>`: absent leaves the
//! column alone, `null` clears it. `NOT NULL` columns are `Option<T>` read through
//! [`present`], so a `null` for them fails deserialization instead of clearing the column.

pub mod company;
pub mod job;

pub use company::{Company, CompanyDetail, CompanyJob, CompanyPatch, CompanySearch, NewCompany};
pub use job::{Job, JobPatch, JobSearch, NewJob};

use serde::{Deserialize, Deserializer};

/// Deserialize a present field as `Some(..)`.
///
/// Used with `#[serde(default)]` so a missing field stays `None`. With `T = Option<U>`
/// an explicit `null` becomes `Some(None)`; with a non-optional `T` it is an error.
pub(crate) fn present<'de, T, D>(de: D) -> Result<Option<T>, D::Error>
where
    T: Deserialize<'de>,
    D: Deserializer<'de>,
{
    T::deserialize(de).map(Some)
}
