//! Talfy backend entry-point: loads settings, prepares storage and runs the
//! HTTP server.

mod server;

use actix_web::web;
use ortho_config::OrthoConfig;
use tracing::{info, warn};
use tracing_subscriber::{EnvFilter, fmt};

use talfy::inbound::http::health::HealthState;
use talfy::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use talfy::settings::{BuildMode, TalfySettings};

use server::{ServerConfig, create_server};

fn startup_error(context: &str, err: impl std::fmt::Display) -> std::io::Error {
    std::io::Error::other(format!("{context}: {err}"))
}

async fn connect_database(settings: &TalfySettings, url: &str) -> std::io::Result<DbPool> {
    run_pending_migrations(url)
        .await
        .map_err(|err| startup_error("database migration failed", err))?;
    let config = PoolConfig::new(url)
        .with_max_size(settings.pool_max_size())
        .with_min_idle(Some(settings.pool_min_idle()))
        .with_connection_timeout(settings.pool_connection_timeout());
    DbPool::new(config)
        .await
        .map_err(|err| startup_error("database pool setup failed", err))
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    if let Err(e) = fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .json()
        .try_init()
    {
        warn!(error = %e, "tracing init failed");
    }

    let settings = TalfySettings::load().map_err(|err| startup_error("invalid settings", err))?;
    let mode = BuildMode::from_debug_assertions();
    let key = settings
        .session_key(mode)
        .map_err(|err| startup_error("session key", err))?;
    let same_site = settings
        .same_site(mode)
        .map_err(|err| startup_error("session cookie", err))?;
    let bind_addr = settings
        .bind_addr()
        .map_err(|err| startup_error("bind address", err))?;

    let mut config = ServerConfig::new(key, settings.cookie_secure(), same_site, bind_addr)
        .with_list_page_size(settings.list_page_size());
    if let Some(url) = settings.database_url() {
        config = config.with_db_pool(connect_database(&settings, url).await?);
    }

    let health_state = web::Data::new(HealthState::new());
    let server = create_server(health_state, config)?;
    info!(%bind_addr, "talfy backend listening");
    server.await
}
