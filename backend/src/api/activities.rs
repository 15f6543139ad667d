//! Activity API handlers

use crate::api::utils::{PathId, RouterState};
use crate::camp::Activity;
use crate::error::AppError;
use axum::{extract::State, http::StatusCode, response::Json};

/// GET /activities - List all activities
pub async fn list_activities(
    State(db): State<RouterState>,
) -> Result<Json<Vec<Activity>>, AppError> {
    Ok(Json(db.list_activities().await?))
}

/// DELETE /activities/:id - Delete an activity and its signups
pub async fn delete_activity(
    State(db): State<RouterState>,
    PathId(id): PathId<i64>,
) -> Result<StatusCode, AppError> {
    if !db.delete_activity(id).await? {
        return Err(AppError::ActivityNotFound);
    }
    tracing::info!(activity_id = id, "Activity deleted");
    Ok(StatusCode::NO_CONTENT)
}
