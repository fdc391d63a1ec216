//! Backend entry-point: validates configuration, applies migrations and
//! serves the admin panel.

mod server;

use std::net::SocketAddr;

use actix_web::web;
use clap::Parser;
use mockable::{DefaultEnv, Env};
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use admin_backend::inbound::http::health::HealthState;
use admin_backend::inbound::http::session_config::fingerprint::key_fingerprint;
use admin_backend::inbound::http::session_config::{BuildMode, session_settings_from_env};
use admin_backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use server::{ServerConfig, create_server};

const DATABASE_URL_ENV: &str = "DATABASE_URL";
const DEFAULT_DATABASE_URL: &str = "postgres://localhost/admin_panel";

/// Admin panel HTTP server.
#[derive(Debug, Parser)]
#[command(version, about)]
struct Args {
    /// Socket address to listen on.
    #[arg(long, default_value = "0.0.0.0:8080")]
    bind: SocketAddr,
    /// PostgreSQL connection URL; falls back to `DATABASE_URL`.
    #[arg(long)]
    database_url: Option<String>,
}

impl Args {
    fn resolve_database_url<E: Env>(&self, env: &E) -> String {
        if let Some(url) = &self.database_url {
            return url.clone();
        }
        env.string(DATABASE_URL_ENV).unwrap_or_else(|| {
            warn!(
                default = DEFAULT_DATABASE_URL,
                "DATABASE_URL not set; using local default"
            );
            DEFAULT_DATABASE_URL.to_owned()
        })
    }
}

/// Application bootstrap.
#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let args = Args::parse();
    let env = DefaultEnv::new();

    let session = session_settings_from_env(&env, BuildMode::from_debug_assertions())
        .map_err(std::io::Error::other)?;
    info!(
        fingerprint = %key_fingerprint(&session.key),
        "session key loaded"
    );

    let database_url = args.resolve_database_url(&env);
    run_pending_migrations(&database_url)
        .await
        .map_err(std::io::Error::other)?;
    let pool = DbPool::new(PoolConfig::new(database_url))
        .await
        .map_err(std::io::Error::other)?;

    let config = ServerConfig::new(session, args.bind, pool);
    info!(bind = %config.bind_addr(), "starting admin panel server");

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state.clone(), config)?;
    let outcome = server.await;
    health_state.mark_unhealthy();
    outcome
}

#[cfg(test)]
mod tests {
    use super::*;
    use mockable::MockEnv;
    use rstest::rstest;

    fn env_with(url: Option<&'static str>) -> MockEnv {
        let mut env = MockEnv::new();
        env.expect_string()
            .times(0..)
            .returning(move |_| url.map(str::to_owned));
        env
    }

    #[rstest]
    fn defaults_bind_to_all_interfaces() {
        let args = Args::try_parse_from(["admin-backend"]).expect("defaults parse");
        assert_eq!(args.bind, "0.0.0.0:8080".parse().expect("socket address"));
        assert!(args.database_url.is_none());
    }

    #[rstest]
    #[case(Some("postgres://cli/db"), Some("postgres://env/db"), "postgres://cli/db")]
    #[case(None, Some("postgres://env/db"), "postgres://env/db")]
    #[case(None, None, DEFAULT_DATABASE_URL)]
    fn database_url_precedence(
        #[case] flag: Option<&str>,
        #[case] env_url: Option<&'static str>,
        #[case] expected: &str,
    ) {
        let mut argv = vec!["admin-backend"];
        if let Some(url) = flag {
            argv.extend(["--database-url", url]);
        }
        let args = Args::try_parse_from(argv).expect("arguments parse");
        assert_eq!(args.resolve_database_url(&env_with(env_url)), expected);
    }

    #[rstest]
    fn rejects_invalid_bind_address() {
        assert!(Args::try_parse_from(["admin-backend", "--bind", "nowhere"]).is_err());
    }
}
