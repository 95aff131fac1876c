//! Router assembly and the two tier entry points.

use std::net::SocketAddr;
use std::sync::Arc;
use std::time::Duration;

use axum::{middleware, routing::get, Router};
use tokio::net::TcpListener;
use tower_http::{cors::CorsLayer, trace::TraceLayer};

use crate::config::AppConfig;
use crate::employee::{builtin_roster, load_seed_file, seed_store, EmployeeService, EmployeeStore};
use crate::handlers::{employee, system, AppState, Tier, EMPLOYEE_PREFIX};
use crate::middleware::{basic_auth_middleware, BasicAuth};
use crate::source::{Credentials, EmployeeSource, LocalSource, RemoteSource};

pub fn app(state: AppState, enable_cors: bool) -> Router {
    let router = Router::new()
        // Public
        .route("/", get(system::root))
        .route("/health", get(system::health))
        .route("/actuator/health", get(system::health))
        // Employee directory (basic auth)
        .merge(employee_routes(&state))
        .fallback(system::fallback)
        .with_state(state);

    let router = if enable_cors {
        router.layer(CorsLayer::permissive())
    } else {
        router
    };

    router.layer(TraceLayer::new_for_http())
}

fn employee_routes(state: &AppState) -> Router<AppState> {
    let collection = || {
        get(employee::list)
            .post(employee::create)
            .delete(employee::delete)
    };

    Router::new()
        .route(EMPLOYEE_PREFIX, collection())
        .route(&format!("{}/", EMPLOYEE_PREFIX), collection())
        .route(&format!("{}/highestSalary", EMPLOYEE_PREFIX), get(employee::highest_salary))
        .route(
            &format!("{}/topTenHighestEarningEmployeeNames", EMPLOYEE_PREFIX),
            get(employee::top_ten),
        )
        .route(&format!("{}/search/:text", EMPLOYEE_PREFIX), get(employee::search))
        .route(
            &format!("{}/:id", EMPLOYEE_PREFIX),
            get(employee::get_one).delete(employee::delete_by_id),
        )
        .route_layer(middleware::from_fn_with_state(state.auth.clone(), basic_auth_middleware))
}

/// Store seeded from the configured YAML file, or the built-in roster
pub fn seeded_service(config: &AppConfig) -> anyhow::Result<EmployeeService> {
    let store = Arc::new(EmployeeStore::new(config.employee.email_domain.clone()));
    let roster = match &config.employee.seed_file {
        Some(path) => load_seed_file(path)?,
        None => builtin_roster(),
    };
    let count = seed_store(&store, &roster)?;
    tracing::info!("seeded employee store with {} records", count);
    Ok(EmployeeService::new(store))
}

pub fn server_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let source: Arc<dyn EmployeeSource> = Arc::new(LocalSource::new(seeded_service(config)?));
    Ok(AppState::new(Tier::Server, source, BasicAuth::from_config(&config.security)))
}

/// Proxying when an upstream is configured, self-hosted otherwise
pub fn api_state(config: &AppConfig) -> anyhow::Result<AppState> {
    let source: Arc<dyn EmployeeSource> = match &config.api.upstream_url {
        Some(url) => {
            tracing::info!("api tier proxying to {}", url);
            let credentials = Credentials {
                username: config.security.username.clone(),
                password: config.security.password.clone(),
            };
            Arc::new(RemoteSource::new(
                url,
                Duration::from_secs(config.api.upstream_timeout_secs),
                Some(credentials),
            )?)
        }
        None => {
            tracing::info!("no upstream configured; api tier hosts its own store");
            Arc::new(LocalSource::new(seeded_service(config)?))
        }
    };
    Ok(AppState::new(Tier::Api, source, BasicAuth::from_config(&config.security)))
}

pub async fn bind(host: &str, port: u16) -> anyhow::Result<TcpListener> {
    let bind_addr = format!("{}:{}", host, port);
    let listener = TcpListener::bind(&bind_addr)
        .await
        .map_err(|e| anyhow::anyhow!("failed to bind {}: {}", bind_addr, e))?;
    Ok(listener)
}

pub async fn serve(listener: TcpListener, state: AppState, enable_cors: bool) -> anyhow::Result<()> {
    let addr: SocketAddr = listener.local_addr()?;
    tracing::info!("{} tier listening on http://{}", state.tier.as_str(), addr);
    axum::serve(listener, app(state, enable_cors)).await?;
    Ok(())
}
