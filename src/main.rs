//! Ask Big Sister Backend
//!
//! REST backend for a peer-support Q&A application with SQLite persistence.
//! Users ask questions (optionally anonymous), moderators answer them.

mod api;
mod auth;
mod config;
mod db;
mod errors;
mod models;

use std::sync::Arc;

use axum::{
    middleware,
    routing::{delete, get, post, put},
    Router,
};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

use config::Config;
use db::Repository;
use models::UserRole;

/// Application state shared across all handlers.
#[derive(Clone)]
pub struct AppState {
    pub repo: Arc<Repository>,
    pub config: Arc<Config>,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration
    let config = Config::from_env();

    // Initialize logging
    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&config.log_level));

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .init();

    tracing::info!("Starting Ask Big Sister Backend");
    tracing::info!("Database path: {:?}", config.db_path);
    tracing::info!("Bind address: {}", config.bind_addr);

    // Warn if PSK is not configured
    if config.api_psk.is_none() {
        tracing::warn!("No API PSK configured (BIGSISTER_API_PSK). Gateway authentication is disabled!");
    }

    // Initialize database
    let pool = db::init_database(&config.db_path).await?;
    let repo = Arc::new(Repository::new(pool));

    // Promote the bootstrap admin, if configured. Role assignment otherwise
    // requires an existing admin.
    if let Some(admin) = &config.bootstrap_admin {
        repo.assign_role(admin, UserRole::Admin).await?;
        tracing::info!(user = %admin, "bootstrap admin promoted");
    }

    // Create application state
    let state = AppState {
        repo,
        config: Arc::new(config.clone()),
    };

    // Build router
    let app = create_router(state);

    // Start server
    let listener = tokio::net::TcpListener::bind(&config.bind_addr).await?;
    tracing::info!("Server listening on {}", config.bind_addr);

    axum::serve(listener, app).await?;

    Ok(())
}

/// Create the application router with all routes.
pub fn create_router(state: AppState) -> Router {
    // CORS configuration
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    // Clone PSK for the auth layer
    let psk = state.config.api_psk.clone();

    // API routes
    let api_routes = Router::new()
        // Questions
        .route("/questions", get(api::list_questions))
        .route("/questions", post(api::ask_question))
        .route("/questions/unanswered", get(api::list_unanswered_questions))
        .route("/questions/{id}", get(api::get_question))
        .route("/questions/{id}", delete(api::delete_question))
        .route("/questions/{id}/answer", post(api::answer_question))
        .route("/questions/{id}/report", post(api::report_question))
        .route("/users/{id}/questions", get(api::list_questions_by_user))
        // Reports
        .route("/reports", get(api::list_reports))
        // Profiles
        .route("/profile", get(api::get_caller_profile))
        .route("/profile", put(api::save_caller_profile))
        .route("/users/{id}/profile", get(api::get_user_profile))
        // Roles
        .route("/role", get(api::get_caller_role))
        .route("/is-admin", get(api::is_caller_admin))
        .route("/users/{id}/role", put(api::assign_role))
        // Guidance
        .route("/guidance", get(api::get_guidance_text))
        // Apply gateway auth / identity middleware
        .layer(middleware::from_fn(move |req, next| {
            auth::identity_layer(psk.clone(), req, next)
        }));

    // Health check (no auth required)
    let health_routes = Router::new().route("/health", get(health_check));

    Router::new()
        .nest("/api", api_routes)
        .merge(health_routes)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// Health check endpoint.
async fn health_check() -> &'static str {
    "OK"
}
