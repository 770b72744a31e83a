//! Microblog API Server
//!
//! Profiles, posts, timelines and a follow graph, behind an account context
//! that owns credentials. Uses hexagonal (ports & adapters) architecture for
//! clean separation of concerns.

use std::net::SocketAddr;
use std::sync::Arc;

use anyhow::Context;
use axum::{
    middleware,
    routing::{get, patch, post},
    Json, Router,
};
use sea_orm::Database;
use serde::Serialize;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

mod adapters;
mod app;
mod auth;
mod config;
mod domain;
mod entity;
mod error;
mod handlers;

#[cfg(test)]
mod test_utils;


use adapters::{
    InMemoryAccountRepository, InMemoryPostRepository, InMemoryUserRepository,
    PostgresAccountRepository, PostgresPostRepository, PostgresUserRepository,
};
use app::{AccountCreatedHandler, AccountService, AuthService, BlogService, ProfileService};
use auth::TokenService;
use config::Config;
use domain::ports::{AccountRepository, PostRepository, UserRepository};

/// Application state shared across all handlers
#[derive(Clone)]
pub struct AppState {
    pub blog: Arc<dyn BlogService>,
    pub auth: Arc<dyn AuthService>,
    pub tokens: TokenService,
    pub config: Config,
}

/// Wire the services over one set of repositories
///
/// New accounts reach the profile side through `AccountCreatedHandler`.
pub fn build_state<UR, PR, AR>(
    users: Arc<UR>,
    posts: Arc<PR>,
    accounts: Arc<AR>,
    config: Config,
) -> AppState
where
    UR: UserRepository + 'static,
    PR: PostRepository + 'static,
    AR: AccountRepository + 'static,
{
    let blog: Arc<dyn BlogService> = Arc::new(ProfileService::new(users, posts));
    let events = Arc::new(AccountCreatedHandler::new(blog.clone()));
    let auth: Arc<dyn AuthService> = Arc::new(AccountService::new(accounts, events));

    AppState {
        blog,
        auth,
        tokens: TokenService::new(&config.signing_key, config.token_ttl_secs),
        config,
    }
}

#[derive(Serialize)]
struct HealthResponse {
    status: &'static str,
    version: &'static str,
}

async fn health() -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "ok",
        version: env!("CARGO_PKG_VERSION"),
    })
}

/// Build the HTTP router
pub fn router(state: AppState) -> Router {
    let protected = Router::new()
        .route("/v1/posts", post(handlers::create_post))
        .route("/v1/timeline", get(handlers::get_timeline))
        .route("/v1/users", patch(handlers::edit_profile))
        .route("/v1/users/:username/friends", get(handlers::list_friends))
        .route(
            "/v1/users/:username/followers",
            get(handlers::list_followers)
                .post(handlers::follow)
                .delete(handlers::unfollow),
        )
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            auth::auth_middleware,
        ));

    Router::new()
        // Health check (no auth)
        .route("/health", get(health))
        // Account context (no auth)
        .route("/auth/v1/accounts", post(handlers::register))
        .route("/auth/v1/sessions", post(handlers::login))
        // Public reads
        .route("/v1/posts/:id", get(handlers::get_post))
        .route("/v1/users/:username", get(handlers::get_profile))
        .merge(protected)
        // Middleware
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info,microblog_api=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Microblog API...");

    // Load configuration
    let config = Config::from_env();

    let state = match config.database_url.clone() {
        Some(url) => {
            tracing::info!("Connecting to database...");
            let db = Database::connect(&url)
                .await
                .context("Failed to connect to database")?;
            tracing::info!("Database connected");

            build_state(
                Arc::new(PostgresUserRepository::new(db.clone())),
                Arc::new(PostgresPostRepository::new(db.clone())),
                Arc::new(PostgresAccountRepository::new(db)),
                config.clone(),
            )
        }
        None => {
            tracing::warn!("DATABASE_URL not set, using in-memory storage");
            build_state(
                Arc::new(InMemoryUserRepository::new()),
                Arc::new(InMemoryPostRepository::new()),
                Arc::new(InMemoryAccountRepository::new()),
                config.clone(),
            )
        }
    };

    let app = router(state);

    // Start server
    let addr = SocketAddr::from(([0, 0, 0, 0], config.port));
    tracing::info!(postgres = config.uses_postgres(), "Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .with_context(|| format!("Failed to bind {}", addr))?;
    axum::serve(listener, app)
        .await
        .context("Server error")?;

    Ok(())
}
