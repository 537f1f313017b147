use std::sync::Arc;

use axum::{
    extract::{multipart::MultipartRejection, Multipart, State},
    Extension, Json,
};
use vidrelay_core::{AppError, UploadResponse, UploadRouteStatus};

use crate::auth::Bearer;
use crate::error::{ErrorResponse, HttpAppError};
use crate::middleware::RequestId;
use crate::services::upload::{UploadOrchestrator, UploadRequest};
use crate::state::AppState;

#[utoipa::path(
    get,
    path = "/api/upload",
    tag = "upload",
    responses(
        (status = 200, description = "Upload route is reachable", body = UploadRouteStatus)
    )
)]
pub async fn upload_status() -> Json<UploadRouteStatus> {
    Json(UploadRouteStatus::alive())
}

#[utoipa::path(
    post,
    path = "/api/upload",
    tag = "upload",
    request_body(
        content = inline(Object),
        content_type = "multipart/form-data",
        description = "One or more `files` parts, plus optional `title` and `privacy` (public, unlisted, private)"
    ),
    responses(
        (status = 200, description = "Every file was uploaded", body = UploadResponse),
        (status = 400, description = "No files or malformed multipart body", body = ErrorResponse),
        (status = 401, description = "Missing Bearer token or rejected credentials", body = ErrorResponse),
        (status = 413, description = "Request body too large", body = ErrorResponse),
        (status = 500, description = "Remote or internal failure", body = ErrorResponse)
    ),
    security(
        ("bearer_auth" = [])
    )
)]
#[tracing::instrument(skip_all)]
pub async fn upload_videos(
    State(state): State<Arc<AppState>>,
    Extension(request_id): Extension<RequestId>,
    Bearer(token): Bearer,
    multipart: Result<Multipart, MultipartRejection>,
) -> Result<Json<UploadResponse>, HttpAppError> {
    let multipart = multipart.map_err(|rejection| {
        AppError::InvalidInput(format!("Expected multipart/form-data body: {}", rejection.body_text()))
    })?;

    let request = UploadRequest::from_multipart(token, multipart, &state.spool).await?;
    tracing::info!(
        request_id = %request_id.0,
        file_count = request.files.len(),
        privacy = %request.visibility,
        has_title = request.title_override.is_some(),
        "Upload batch received"
    );

    let orchestrator = UploadOrchestrator::new(
        state.video_host.as_ref(),
        state.config.youtube_category_id.clone(),
    );
    let results = orchestrator.run(request).await?;

    Ok(Json(UploadResponse::new(results)))
}
