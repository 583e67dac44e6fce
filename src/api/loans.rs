//! Loan tracking and renewal endpoints

use axum::{
    extract::{Path, Query, State},
    Json,
};
use chrono::{Local, NaiveDate};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{
    error::AppResult,
    models::book_instance::{BookInstance, BookInstanceDetails},
};

use super::{books::PaginatedResponse, AuthenticatedUser, PageQuery};

/// Reference to the all-borrowed-books collection, returned after a
/// successful renewal so clients know where to navigate next.
pub const ALL_BORROWED_PATH: &str = "/api/v1/loans/borrowed";

/// Renewal form state: the copy plus a proposed due-back date
#[derive(Serialize, ToSchema)]
pub struct RenewalProposal {
    pub copy: BookInstance,
    /// Default proposal, three weeks from today
    pub proposed_due_back: NaiveDate,
}

/// Renew request. When `due_back` is omitted the default proposal is used.
#[derive(Deserialize, ToSchema)]
pub struct RenewRequest {
    pub due_back: Option<NaiveDate>,
}

/// Renew response
#[derive(Serialize, ToSchema)]
pub struct RenewResponse {
    /// Copy ID
    pub id: Uuid,
    /// New due-back date
    pub due_back: NaiveDate,
    /// Where to go next (the all-borrowed-books collection)
    pub redirect: String,
}

/// Copies on loan to the authenticated user, ordered by due date
#[utoipa::path(
    get,
    path = "/loans/my",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "Borrowed copies", body = PaginatedResponse<BookInstanceDetails>),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn my_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookInstanceDetails>>> {
    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(state.config.catalog.page_size)
        .clamp(1, 100);

    let (copies, total) = state
        .services
        .loans
        .my_borrowed(claims.user_id, page, per_page)
        .await?;

    Ok(Json(PaginatedResponse {
        items: copies,
        total,
        page,
        per_page,
    }))
}

/// Every copy currently on loan, ordered by due date
#[utoipa::path(
    get,
    path = "/loans/borrowed",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("page" = Option<i64>, Query, description = "Page number"),
        ("per_page" = Option<i64>, Query, description = "Items per page")
    ),
    responses(
        (status = 200, description = "All borrowed copies", body = PaginatedResponse<BookInstanceDetails>),
        (status = 403, description = "Missing capability")
    )
)]
pub async fn all_borrowed(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Query(query): Query<PageQuery>,
) -> AppResult<Json<PaginatedResponse<BookInstanceDetails>>> {
    claims.require_view_all_borrowed()?;

    let page = query.page.unwrap_or(1).max(1);
    let per_page = query
        .per_page
        .unwrap_or(state.config.catalog.page_size)
        .clamp(1, 100);

    let (copies, total) = state
        .services
        .loans
        .all_borrowed(page, per_page)
        .await?;

    Ok(Json(PaginatedResponse {
        items: copies,
        total,
        page,
        per_page,
    }))
}

/// Get the renewal form state for a copy: the copy and a default proposal
#[utoipa::path(
    get,
    path = "/copies/{id}/renewal",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    responses(
        (status = 200, description = "Renewal proposal", body = RenewalProposal),
        (status = 403, description = "Missing capability"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renewal_proposal(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(copy_id): Path<Uuid>,
) -> AppResult<Json<RenewalProposal>> {
    // Capability check comes before any storage access
    claims.require_mark_returned()?;

    let today = Local::now().date_naive();
    let (copy, proposed_due_back) = state
        .services
        .loans
        .renewal_proposal(copy_id, today)
        .await?;

    Ok(Json(RenewalProposal {
        copy,
        proposed_due_back,
    }))
}

/// Renew a copy, setting its due-back date
#[utoipa::path(
    post,
    path = "/copies/{id}/renew",
    tag = "loans",
    security(("bearer_auth" = [])),
    params(
        ("id" = Uuid, Path, description = "Copy ID")
    ),
    request_body = RenewRequest,
    responses(
        (status = 200, description = "Copy renewed", body = RenewResponse),
        (status = 400, description = "Date outside the renewal window"),
        (status = 403, description = "Missing capability"),
        (status = 404, description = "Copy not found")
    )
)]
pub async fn renew_copy(
    State(state): State<crate::AppState>,
    AuthenticatedUser(claims): AuthenticatedUser,
    Path(copy_id): Path<Uuid>,
    Json(request): Json<RenewRequest>,
) -> AppResult<Json<RenewResponse>> {
    // Capability check comes before any storage access
    claims.require_mark_returned()?;

    let today = Local::now().date_naive();
    let due_back = state
        .services
        .loans
        .renew_copy(copy_id, request.due_back, today)
        .await?;

    Ok(Json(RenewResponse {
        id: copy_id,
        due_back,
        redirect: ALL_BORROWED_PATH.to_string(),
    }))
}
