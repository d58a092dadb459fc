//! HTTP API Layer
//!
//! This crate exposes the claims adjudication engine over REST using Axum.
//!
//! # Architecture
//!
//! - **Handlers**: claim submission, document fingerprinting, policy view and reload, health
//! - **Middleware**: tracing, audit logging, CORS
//! - **DTOs**: Request/Response data transfer objects
//! - **Error Handling**: Consistent error responses
//!
//! # Example
//!
//! ```rust,ignore
//! use interface_api::{create_router, AppState};
//!
//! let store = PolicyStore::load(&config.policy_file)?;
//! let app = create_router(AppState::new(config, store));
//! axum::serve(listener, app).await?;
//! ```

pub mod config;
pub mod error;
pub mod middleware;
pub mod handlers;
pub mod dto;

use std::sync::Arc;

use axum::{
    Router,
    http::HeaderName,
    routing::{get, post},
    middleware as axum_middleware,
};
use tower::ServiceBuilder;
use tower_http::trace::TraceLayer;
use tower_http::cors::{CorsLayer, Any};
use tower_http::request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer};

use domain_claims::{DuplicateDetector, InMemoryDuplicateRegistry, Narrator, TemplateNarrator};
use domain_policy::PolicyStore;

use crate::config::ApiConfig;
use crate::error::ApiError;
use crate::middleware::audit_middleware;
use crate::handlers::{claims, documents, health, policy};

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    pub config: ApiConfig,
    pub policy: PolicyStore,
    pub duplicates: Arc<dyn DuplicateDetector>,
    pub narrator: Arc<dyn Narrator>,
}

impl AppState {
    /// State with the in-process collaborators
    pub fn new(config: ApiConfig, policy: PolicyStore) -> Self {
        Self {
            config,
            policy,
            duplicates: Arc::new(InMemoryDuplicateRegistry::new()),
            narrator: Arc::new(TemplateNarrator),
        }
    }

    pub fn with_duplicate_detector(mut self, detector: Arc<dyn DuplicateDetector>) -> Self {
        self.duplicates = detector;
        self
    }

    pub fn with_narrator(mut self, narrator: Arc<dyn Narrator>) -> Self {
        self.narrator = narrator;
        self
    }
}

/// Creates the main API router
///
/// # Arguments
///
/// * `state` - Configuration, policy store and collaborators
///
/// # Returns
///
/// Configured Axum router with all routes and middleware
pub fn create_router(state: AppState) -> Router {
    // Public routes
    let public_routes = Router::new()
        .route("/health", get(health::health_check))
        .route("/health/ready", get(health::readiness_check));

    // Claims routes
    let claims_routes = Router::new()
        .route("/submit", post(claims::submit_claim));

    // Document routes
    let document_routes = Router::new()
        .route("/fingerprint", post(documents::fingerprint_document));

    // Policy routes
    let policy_routes = Router::new()
        .route("/", get(policy::get_policy))
        .route("/reload", post(policy::reload_policy));

    // API routes
    let api_routes = Router::new()
        .nest("/claims", claims_routes)
        .nest("/documents", document_routes)
        .nest("/policy", policy_routes)
        .layer(axum_middleware::from_fn(audit_middleware));

    let request_id = HeaderName::from_static("x-request-id");

    // Combine all routes
    Router::new()
        .merge(public_routes)
        .nest("/api/v1", api_routes)
        .fallback(|| async { ApiError::NotFound("no such route".to_string()) })
        .layer(
            ServiceBuilder::new()
                .layer(SetRequestIdLayer::new(request_id.clone(), MakeRequestUuid))
                .layer(TraceLayer::new_for_http())
                .layer(PropagateRequestIdLayer::new(request_id)),
        )
        .layer(
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any),
        )
        .with_state(state)
}
