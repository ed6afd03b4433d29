//! Repository round trips against a live database.
//!
//! Runs only when `DATABASE_URL` is set (a `.env` file is honored). Every test works on
//! temporary tables inside a transaction that is rolled back.

use jobly::{
    CompanyPatch, CompanyRepo, CompanySearch, JobPatch, JobRepo, JobSearch, JoblyError,
    JoblyResult, NewCompany, NewJob,
};
use rust_decimal::Decimal;
use tokio_postgres::{Client, NoTls, Transaction};

const SCHEMA: &str = "
CREATE TEMP TABLE companies (
  handle VARCHAR(25) PRIMARY KEY CHECK (handle = lower(handle)),
  name TEXT UNIQUE NOT NULL,
  num_employees INTEGER CHECK (num_employees >= 0),
  description TEXT NOT NULL,
  logo_url TEXT
) ON COMMIT DROP;

CREATE TEMP TABLE jobs (
  id SERIAL PRIMARY KEY,
  title TEXT NOT NULL,
  salary INTEGER CHECK (salary >= 0),
  equity NUMERIC CHECK (equity <= 1.0),
  company_handle VARCHAR(25) NOT NULL REFERENCES companies ON DELETE CASCADE
) ON COMMIT DROP;

INSERT INTO companies (handle, name, num_employees, description, logo_url)
VALUES ('c1', 'C1', 1, 'Desc1', 'http://c1.img'),
       ('c2', 'C2', 2, 'Desc2', 'http://c2.img'),
       ('c3', 'C3', 3, 'Desc3', NULL);

INSERT INTO jobs (title, salary, equity, company_handle)
VALUES ('J1', 100, 0.1, 'c1'),
       ('J2', 200, 0.2, 'c1'),
       ('J3', 300, 0, 'c1'),
       ('J4', NULL, NULL, 'c1');
";

async fn connect(test: &str) -> JoblyResult<Option<Client>> {
    let _ = dotenvy::dotenv();
    let database_url = match std::env::var("DATABASE_URL") {
        Ok(v) => v,
        Err(_) => {
            eprintln!("DATABASE_URL is not set; skipping {test}");
            return Ok(None);
        }
    };

    let (client, connection) = tokio_postgres::connect(&database_url, NoTls)
        .await
        .map_err(JoblyError::from_db_error)?;
    tokio::spawn(async move {
        let _ = connection.await;
    });
    Ok(Some(client))
}

async fn seeded(client: &mut Client) -> JoblyResult<Transaction<'_>> {
    let tx = client.transaction().await.map_err(JoblyError::from_db_error)?;
    tx.batch_execute(SCHEMA)
        .await
        .map_err(JoblyError::from_db_error)?;
    Ok(tx)
}

#[tokio::test]
async fn company_update_and_remove() -> JoblyResult<()> {
    let Some(mut client) = connect("company_update_and_remove").await? else {
        return Ok(());
    };
    let tx = seeded(&mut client).await?;

    let patch: CompanyPatch =
        serde_json::from_str(r#"{"name": "New Label", "logoUrl": null}"#).unwrap();
    let company = CompanyRepo::update(&tx, "c1", &patch).await?;
    assert_eq!(company.name, "New Label");
    assert_eq!(company.logo_url, None);
    assert_eq!(company.num_employees, Some(1));

    let err = CompanyRepo::update(&tx, "nope", &patch).await.unwrap_err();
    assert!(err.is_not_found());

    CompanyRepo::remove(&tx, "c2").await?;
    assert!(CompanyRepo::get(&tx, "c2").await.unwrap_err().is_not_found());

    tx.rollback().await.map_err(JoblyError::from_db_error)?;
    Ok(())
}

#[tokio::test]
async fn company_create_get_and_search() -> JoblyResult<()> {
    let Some(mut client) = connect("company_create_get_and_search").await? else {
        return Ok(());
    };
    let tx = seeded(&mut client).await?;

    let new = NewCompany {
        handle: "new".into(),
        name: "New".into(),
        description: "New Description".into(),
        num_employees: Some(1),
        logo_url: None,
    };
    let created = CompanyRepo::create(&tx, &new).await?;
    assert_eq!(created.handle, "new");
    let err = CompanyRepo::create(&tx, &new).await.unwrap_err();
    assert!(matches!(err, JoblyError::Duplicate(_)));

    let detail = CompanyRepo::get(&tx, "c1").await?;
    assert_eq!(detail.jobs.len(), 4);

    let search = CompanySearch {
        name: Some("c".into()),
        min_employees: Some(2),
        max_employees: Some(3),
    };
    let handles: Vec<String> = CompanyRepo::search(&tx, &search)
        .await?
        .into_iter()
        .map(|c| c.handle)
        .collect();
    assert_eq!(handles, ["c2", "c3"]);

    let all = CompanyRepo::search(&tx, &CompanySearch::default()).await?;
    assert_eq!(all.len(), 4);

    tx.rollback().await.map_err(JoblyError::from_db_error)?;
    Ok(())
}

#[tokio::test]
async fn job_filters_and_updates() -> JoblyResult<()> {
    let Some(mut client) = connect("job_filters_and_updates").await? else {
        return Ok(());
    };
    let tx = seeded(&mut client).await?;

    let search = JobSearch {
        has_equity: Some(true),
        ..Default::default()
    };
    let titles: Vec<String> = JobRepo::search(&tx, &search)
        .await?
        .into_iter()
        .map(|j| j.title)
        .collect();
    assert_eq!(titles, ["J1", "J2"]);

    let search = JobSearch {
        title: Some("j".into()),
        min_salary: Some(150),
        has_equity: Some(true),
    };
    let jobs = JobRepo::search(&tx, &search).await?;
    assert_eq!(jobs.len(), 1);
    assert_eq!(jobs[0].title, "J2");

    let search = JobSearch {
        title: Some("_".into()),
        ..Default::default()
    };
    assert!(JobRepo::search(&tx, &search).await?.is_empty());

    let job = JobRepo::create(
        &tx,
        &NewJob {
            title: "New".into(),
            salary: Some(10),
            equity: Some(Decimal::new(5, 2)),
            company_handle: "c3".into(),
        },
    )
    .await?;
    let patch = JobPatch {
        equity: Some(None),
        ..Default::default()
    };
    let updated = JobRepo::update(&tx, job.id, &patch).await?;
    assert_eq!(updated.equity, None);
    assert_eq!(updated.salary, Some(10));

    JobRepo::remove(&tx, job.id).await?;
    assert!(JobRepo::get(&tx, job.id).await.unwrap_err().is_not_found());

    tx.rollback().await.map_err(JoblyError::from_db_error)?;
    Ok(())
}

#[tokio::test]
async fn job_for_missing_company_is_rejected() -> JoblyResult<()> {
    let Some(mut client) = connect("job_for_missing_company_is_rejected").await? else {
        return Ok(());
    };
    let tx = seeded(&mut client).await?;

    let err = JobRepo::create(
        &tx,
        &NewJob {
            title: "Orphan".into(),
            salary: None,
            equity: None,
            company_handle: "nope".into(),
        },
    )
    .await
    .unwrap_err();
    assert!(matches!(err, JoblyError::ForeignKeyViolation(_)));

    Ok(())
}
