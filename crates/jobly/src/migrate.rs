//! Embedded schema migrations via [`refinery`].
//!
//! The `companies` and `jobs` tables ship with the crate under `migrations/`.
//!
//! ```ignore
//! let pool = jobly::create_pool(&std::env::var("DATABASE_URL")?)?;
//! let report = jobly::migrate::run_pool(&pool).await?;
//! ```

use crate::error::JoblyResult;

pub use refinery::Report;

mod embedded {
    refinery::embed_migrations!("./migrations");
}

/// Migrations bundled with this crate, in version order.
pub fn runner() -> refinery::Runner {
    embedded::migrations::runner()
}

/// Apply pending migrations on a single connection.
pub async fn run(client: &mut tokio_postgres::Client) -> JoblyResult<Report> {
    let report = runner().run_async(client).await?;
    for migration in report.applied_migrations() {
        tracing::info!(
            target: "jobly.migrate",
            version = migration.version(),
            name = migration.name(),
            "applied migration"
        );
    }
    Ok(report)
}

/// Acquire a connection from a pool and apply pending migrations on it.
#[cfg(feature = "pool")]
pub async fn run_pool(pool: &deadpool_postgres::Pool) -> JoblyResult<Report> {
    let mut client = pool.get().await?;
    run(&mut client).await
}
