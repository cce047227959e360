//! Backend entry-point: migrations, pool, REST endpoints, probes.

use actix_web::{App, HttpServer, web};
use tracing::warn;
use tracing_subscriber::{EnvFilter, fmt};

#[cfg(debug_assertions)]
use actix_web::HttpResponse;
#[cfg(debug_assertions)]
use backend::ApiDoc;
#[cfg(debug_assertions)]
use utoipa::OpenApi;

use backend::Trace;
use backend::inbound::http::health::{self, HealthState};
use backend::outbound::persistence::{DbPool, PoolConfig, run_pending_migrations};
use backend::server::{self, config::ServerConfig};

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

    let config = ServerConfig::from_env().map_err(std::io::Error::other)?;

    run_pending_migrations(config.database_url().to_owned())
        .await
        .map_err(std::io::Error::other)?;

    let pool = DbPool::new(PoolConfig::new(config.database_url()).with_max_size(config.pool_max_size()))
        .await
        .map_err(std::io::Error::other)?;

    let state = web::Data::new(server::build_state(pool));
    let health_state = web::Data::new(HealthState::new());
    // Clone for the server factory so the readiness probe stays reachable.
    let server_health_state = health_state.clone();
    let server = HttpServer::new(move || {
        let app = App::new()
            .app_data(state.clone())
            .app_data(server_health_state.clone())
            .wrap(Trace)
            .configure(server::configure_api)
            .service(health::ready)
            .service(health::live);
        #[cfg(debug_assertions)]
        let app = app.route(
            "/api-docs/openapi.json",
            web::get().to(|| async { HttpResponse::Ok().json(ApiDoc::openapi()) }),
        );
        app
    })
    .bind(config.bind_addr())?;

    health_state.mark_ready();
    server.run().await
}
