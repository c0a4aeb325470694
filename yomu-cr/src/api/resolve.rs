//! Resolution and detail endpoints

use axum::{
    extract::{Path, Query, State},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use crate::error::{ApiError, ApiResult};
use crate::models::{CanonicalComic, FirstChapter, SeriesIdentity};
use crate::AppState;

/// Response body for POST /resolve
#[derive(Debug, Serialize)]
pub struct ResolveResponse {
    /// Canonical catalog slug; null when nothing validated
    pub slug: Option<String>,
}

/// POST /resolve
///
/// Runs the full resolution pipeline for the posted identity. Always
/// answers 200; an unresolvable series comes back as `{"slug": null}`.
pub async fn resolve_series(
    State(state): State<AppState>,
    Json(identity): Json<SeriesIdentity>,
) -> ApiResult<Json<ResolveResponse>> {
    if identity.anilist_id <= 0 {
        return Err(ApiError::BadRequest(
            "anilist_id must be a positive id".into(),
        ));
    }

    let slug = state.coordinator.resolve(&identity).await;
    Ok(Json(ResolveResponse { slug }))
}

/// Query parameters for GET /comic/:slug
#[derive(Debug, Deserialize)]
pub struct DetailParams {
    /// Serve merged fields from cache when available (default true)
    pub cache: Option<bool>,
}

/// Response body for GET /comic/:slug
#[derive(Debug, Serialize)]
pub struct DetailResponse {
    pub canonical: Option<CanonicalComic>,
    pub first_chapter: Option<FirstChapter>,
}

/// GET /comic/:slug?cache=<bool>
///
/// Merged record (cached when allowed) plus the always-live first
/// chapter pointer. 404 only when neither is available.
pub async fn comic_detail(
    State(state): State<AppState>,
    Path(slug): Path<String>,
    Query(params): Query<DetailParams>,
) -> ApiResult<Json<DetailResponse>> {
    if slug.trim().is_empty() {
        return Err(ApiError::BadRequest("slug must not be empty".into()));
    }

    let use_cache = params.cache.unwrap_or(true);
    let (canonical, first_chapter) = state.coordinator.detail_with_cache(&slug, use_cache).await;

    if canonical.is_none() && first_chapter.is_none() {
        return Err(ApiError::NotFound(slug));
    }

    Ok(Json(DetailResponse {
        canonical,
        first_chapter,
    }))
}

/// Build resolution routes
pub fn resolve_routes() -> Router<AppState> {
    Router::new()
        .route("/resolve", post(resolve_series))
        .route("/comic/:slug", get(comic_detail))
}
