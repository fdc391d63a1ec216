//! Embedded PostgreSQL bootstrap for the Diesel repository suites.
//!
//! Every test gets its own cluster and a uniquely named temporary database
//! migrated with the crate's embedded migrations, so suites never share rows.
//! Raw SQL goes through `postgres` to seed tables the panel never inserts
//! into and to exercise column defaults.

use std::time::Duration;

use admin_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use pg_embedded_setup_unpriv::{TemporaryDatabase, TestCluster};
use postgres::{Client, NoTls};
use tokio::runtime::Runtime;
use uuid::Uuid;

use super::format_postgres_error;

/// Attempts to start the cluster before giving up.
const BOOTSTRAP_ATTEMPTS: u32 = 3;
/// Base delay between attempts; doubles each time.
const BOOTSTRAP_RETRY_DELAY: Duration = Duration::from_millis(500);

/// A migrated database plus the runtime and pool the repositories run on.
///
/// Field order is drop order: connections close before the database is
/// dropped and the cluster stops last.
pub struct EmbeddedDatabase {
    pub pool: DbPool,
    pub runtime: Runtime,
    database_url: String,
    _database: TemporaryDatabase,
    _cluster: TestCluster,
}

impl EmbeddedDatabase {
    pub fn url(&self) -> &str {
        &self.database_url
    }

    /// Run raw SQL outside Diesel.
    pub fn batch_execute(&self, sql: &str) -> Result<(), String> {
        let mut client =
            Client::connect(&self.database_url, NoTls).map_err(|err| format_postgres_error(&err))?;
        client
            .batch_execute(sql)
            .map_err(|err| format_postgres_error(&err))
    }
}

/// Download bundles occasionally fail mid-transfer when suites start in
/// parallel.
fn is_transient_error(err: &str) -> bool {
    let lowered = err.to_lowercase();
    [
        "error decoding response body",
        "connection reset",
        "timed out",
        "temporarily unavailable",
    ]
    .iter()
    .any(|pattern| lowered.contains(pattern))
}

fn start_cluster() -> Result<TestCluster, String> {
    let mut last_error = String::new();
    for attempt in 0..BOOTSTRAP_ATTEMPTS {
        match TestCluster::new() {
            Ok(cluster) => return Ok(cluster),
            Err(err) => {
                last_error = format!("{err:?}");
                if attempt + 1 == BOOTSTRAP_ATTEMPTS || !is_transient_error(&last_error) {
                    break;
                }
                std::thread::sleep(BOOTSTRAP_RETRY_DELAY * (1 << attempt));
            }
        }
    }
    Err(last_error)
}

/// Start a cluster, create a fresh database and apply every migration.
pub fn provision_database() -> Result<EmbeddedDatabase, String> {
    let runtime = Runtime::new().map_err(|err| err.to_string())?;
    let cluster = start_cluster()?;
    let name = format!("admin_test_{}", Uuid::new_v4().simple());
    let database = cluster
        .temporary_database(name.as_str())
        .map_err(|err| format!("create database {name}: {err:?}"))?;
    let database_url = database.url().to_owned();

    runtime
        .block_on(run_pending_migrations(&database_url))
        .map_err(|err| err.to_string())?;

    let config = PoolConfig::new(database_url.as_str())
        .with_max_size(2)
        .with_min_idle(Some(1));
    let pool = runtime
        .block_on(DbPool::new(config))
        .map_err(|err| err.to_string())?;

    Ok(EmbeddedDatabase {
        pool,
        runtime,
        database_url,
        _database: database,
        _cluster: cluster,
    })
}
