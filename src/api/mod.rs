//! API handlers for the lending REST endpoints

pub mod books;
pub mod health;
pub mod loans;
pub mod members;
pub mod openapi;

use axum::{
    extract::Path,
    routing::{get, post},
    Json, Router,
};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};
use utoipa::ToSchema;

use crate::{error::AppError, AppState};

/// JSON body extractor whose rejections use the application error shape
pub type ApiJson<T> = WithRejection<Json<T>, AppError>;

/// Path extractor whose rejections use the application error shape
pub type ApiPath<T> = WithRejection<Path<T>, AppError>;

/// Acknowledgement returned by state-changing endpoints
#[derive(Serialize, ToSchema)]
pub struct ActionResponse {
    pub success: bool,
    pub message: String,
}

impl ActionResponse {
    pub fn ok(message: impl Into<String>) -> Json<Self> {
        Json(Self {
            success: true,
            message: message.into(),
        })
    }
}

/// Create the application router with all routes
pub fn create_router(state: AppState) -> Router {
    // Any origin may call the API
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let api = Router::new()
        // Catalog
        .route("/books", get(books::list_books).post(books::add_book))
        // Members
        .route("/login", post(members::login))
        .route("/register", post(members::register))
        .route("/members", get(members::list_members))
        // Lending
        .route("/borrow", post(loans::borrow))
        .route("/return", post(loans::return_book))
        .route("/borrowed/:member_id", get(loans::list_active_borrows))
        .route("/borrowed-all", get(loans::list_all_active_borrows))
        .route("/history/:member_id", get(loans::list_history));

    Router::new()
        .route("/health", get(health::health_check))
        .route("/ready", get(health::readiness_check))
        .nest("/api", api)
        .with_state(state)
        .merge(openapi::create_openapi_router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
}
