//! Catalog statistics endpoints

use axum::{extract::State, Json};

use crate::{error::AppResult, services::catalog::CatalogCounts};

use super::AuthenticatedUser;

/// Catalog-wide object counts (the landing-page figures)
#[utoipa::path(
    get,
    path = "/stats",
    tag = "stats",
    security(("bearer_auth" = [])),
    responses(
        (status = 200, description = "Catalog counts", body = CatalogCounts),
        (status = 401, description = "Not authenticated")
    )
)]
pub async fn get_stats(
    State(state): State<crate::AppState>,
    AuthenticatedUser(_claims): AuthenticatedUser,
) -> AppResult<Json<CatalogCounts>> {
    let counts = state.services.catalog.counts().await?;
    Ok(Json(counts))
}
