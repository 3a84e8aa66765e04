//! Member endpoints: login, registration and listing

use axum::{extract::State, Json};
use axum_extra::extract::WithRejection;
use serde::Serialize;
use utoipa::ToSchema;

use crate::{
    error::AppResult,
    models::member::{Credentials, MemberInfo, MemberSummary, RegisterMember},
    AppState,
};

use super::{ActionResponse, ApiJson};

/// Successful login response
#[derive(Serialize, ToSchema)]
pub struct LoginResponse {
    pub success: bool,
    pub user: MemberInfo,
}

/// Log in with username and password
#[utoipa::path(
    post,
    path = "/api/login",
    tag = "members",
    request_body = Credentials,
    responses(
        (status = 200, description = "Login successful", body = LoginResponse),
        (status = 401, description = "Invalid username or password", body = crate::error::FailureResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn login(
    State(state): State<AppState>,
    WithRejection(Json(credentials), _): ApiJson<Credentials>,
) -> AppResult<Json<LoginResponse>> {
    let user = state.services.members.login(&credentials).await?;
    Ok(Json(LoginResponse {
        success: true,
        user,
    }))
}

/// Register a new member
#[utoipa::path(
    post,
    path = "/api/register",
    tag = "members",
    request_body = RegisterMember,
    responses(
        (status = 200, description = "Member registered", body = ActionResponse),
        (status = 400, description = "Missing fields or username already taken", body = crate::error::FailureResponse),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn register(
    State(state): State<AppState>,
    WithRejection(Json(request), _): ApiJson<RegisterMember>,
) -> AppResult<Json<ActionResponse>> {
    state.services.members.register(request).await?;
    Ok(ActionResponse::ok("Registration successful"))
}

/// List all members, newest first
#[utoipa::path(
    get,
    path = "/api/members",
    tag = "members",
    responses(
        (status = 200, description = "All members", body = Vec<MemberSummary>),
        (status = 500, description = "Store failure", body = crate::error::ErrorResponse)
    )
)]
pub async fn list_members(State(state): State<AppState>) -> AppResult<Json<Vec<MemberSummary>>> {
    let members = state.services.members.list_members().await?;
    Ok(Json(members))
}
