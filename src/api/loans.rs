//! Lending endpoints

use axum::{
    extract::{Path, State},
    Json,
};
use axum_extra::extract::WithRejection;

use crate::{
    error::AppResult,
    models::borrowing::{ActiveBorrow, HistoryEntry, LoanRequest, OutstandingBorrow},
    AppState,
};

use super::{ActionResponse, ApiJson, ApiPath};

/// Borrow a book
#[utoipa::path(
    post,
    path = "/api/borrow",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book borrowed", body = ActionResponse),
        (status = 404, description = "Book or member not found", body = crate::error::FailureResponse),
        (status = 409, description = "Book is not available", body = crate::error::FailureResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn borrow(
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<LoanRequest>,
) -> AppResult<Json<ActionResponse>> {
    state
        .services
        .loans
        .borrow(request.member_id, request.book_id)
        .await?;
    Ok(ActionResponse::ok("Book borrowed"))
}

/// Return a borrowed book
#[utoipa::path(
    post,
    path = "/api/return",
    tag = "loans",
    request_body = LoanRequest,
    responses(
        (status = 200, description = "Book returned", body = ActionResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn return_book(
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<LoanRequest>,
) -> AppResult<Json<ActionResponse>> {
    state
        .services
        .loans
        .return_book(request.member_id, request.book_id)
        .await?;
    Ok(ActionResponse::ok("Book returned"))
}

/// Books a member currently holds
#[utoipa::path(
    get,
    path = "/api/borrowed/{member_id}",
    tag = "loans",
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Open borrowings of the member", body = Vec<ActiveBorrow>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_active_borrows(
    State(state): State<AppState>,
    WithRejection(Path(member_id), _): ApiPath<i32>,
) -> AppResult<Json<Vec<ActiveBorrow>>> {
    let rows = state.services.loans.list_active_borrows(member_id).await?;
    Ok(Json(rows))
}

/// A member's borrowing history, most recent first
#[utoipa::path(
    get,
    path = "/api/history/{member_id}",
    tag = "loans",
    params(
        ("member_id" = i32, Path, description = "Member ID")
    ),
    responses(
        (status = 200, description = "Borrowing history", body = Vec<HistoryEntry>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_history(
    State(state): State<AppState>,
    WithRejection(Path(member_id), _): ApiPath<i32>,
) -> AppResult<Json<Vec<HistoryEntry>>> {
    let rows = state.services.loans.list_history(member_id).await?;
    Ok(Json(rows))
}

/// Every book currently out, with who holds it
#[utoipa::path(
    get,
    path = "/api/borrowed-all",
    tag = "loans",
    responses(
        (status = 200, description = "All open borrowings", body = Vec<OutstandingBorrow>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_all_active_borrows(
    State(state): State<AppState>,
) -> AppResult<Json<Vec<OutstandingBorrow>>> {
    let rows = state.services.loans.list_all_active_borrows().await?;
    Ok(Json(rows))
}
