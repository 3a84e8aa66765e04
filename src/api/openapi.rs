//! OpenAPI documentation

use axum::Router;
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::api::{books, health, loans, members};

#[derive(OpenApi)]
#[openapi(
    info(
        title = "Lending API",
        version = "0.1.0",
        description = "Book lending REST API: catalog, members, borrowing and returns"
    ),
    paths(
        // Health
        health::health_check,
        health::readiness_check,
        // Books
        books::list_books,
        books::add_book,
        // Members
        members::login,
        members::register,
        members::list_members,
        // Loans
        loans::borrow,
        loans::return_book,
        loans::list_active_borrows,
        loans::list_history,
        loans::list_all_active_borrows,
    ),
    components(
        schemas(
            // Books
            crate::models::book::Book,
            crate::models::book::BookStatus,
            crate::models::book::CreateBook,
            // Members
            crate::models::member::Credentials,
            crate::models::member::RegisterMember,
            crate::models::member::MemberInfo,
            crate::models::member::MemberSummary,
            crate::models::member::Role,
            members::LoginResponse,
            // Loans
            crate::models::borrowing::LoanRequest,
            crate::models::borrowing::ActiveBorrow,
            crate::models::borrowing::HistoryEntry,
            crate::models::borrowing::OutstandingBorrow,
            // Shared
            crate::api::ActionResponse,
            health::HealthResponse,
            crate::error::FailureResponse,
            crate::error::ErrorResponse,
        )
    ),
    tags(
        (name = "health", description = "Health check endpoints"),
        (name = "books", description = "Catalog"),
        (name = "members", description = "Login, registration and member listing"),
        (name = "loans", description = "Borrowing and returns")
    )
)]
pub struct ApiDoc;

/// Create the OpenAPI documentation router
pub fn create_openapi_router() -> Router {
    Router::new()
        .merge(SwaggerUi::new("/swagger-ui").url("/api-docs/openapi.json", ApiDoc::openapi()))
}
