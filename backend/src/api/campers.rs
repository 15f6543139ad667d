//! Camper API handlers
//!
//! `POST /campers` reports the specific validation message, while
//! `PATCH /campers/:id` only reports the generic placeholder.

use crate::api::utils::{coerce_int, string_value, JsonBody, JsonObject, PathId, RouterState};
use crate::camp::{Camper, CamperChanges, CamperDetail, NewCamper};
use crate::error::AppError;
use axum::{extract::State, http::StatusCode, response::Json};

/// GET /campers - List all campers without their signups
pub async fn list_campers(
    State(db): State<RouterState>,
) -> Result<Json<Vec<Camper>>, AppError> {
    Ok(Json(db.list_campers().await?))
}

/// GET /campers/:id - Get a camper with nested signups
pub async fn get_camper(
    State(db): State<RouterState>,
    PathId(id): PathId<i64>,
) -> Result<Json<CamperDetail>, AppError> {
    let detail = db
        .get_camper_detail(id)
        .await?
        .ok_or(AppError::CamperNotFound)?;

    Ok(Json(detail))
}

/// POST /campers - Create a camper from `name` and `age`
pub async fn create_camper(
    State(db): State<RouterState>,
    JsonBody(body): JsonBody<JsonObject>,
) -> Result<(StatusCode, Json<CamperDetail>), AppError> {
    let (Some(name), Some(age)) = (body.get("name"), body.get("age")) else {
        return Err(AppError::validation("Missing name or age"));
    };

    let age = coerce_int(age).ok_or_else(|| AppError::validation("Age must be an integer"))?;
    let name = string_value(name).ok_or_else(|| AppError::validation("Name must be a string"))?;
    let new_camper = NewCamper::new(name, age)?;

    let camper = db.create_camper(&new_camper).await?;
    tracing::info!(camper_id = camper.id, "Camper created");

    Ok((
        StatusCode::CREATED,
        Json(CamperDetail {
            camper,
            signups: Vec::new(),
        }),
    ))
}

/// PATCH /campers/:id - Update `name` and/or `age`
pub async fn update_camper(
    State(db): State<RouterState>,
    PathId(id): PathId<i64>,
    payload: Result<JsonBody<JsonObject>, AppError>,
) -> Result<(StatusCode, Json<CamperDetail>), AppError> {
    // A missing camper wins over a bad body
    if db.get_camper(id).await?.is_none() {
        return Err(AppError::CamperNotFound);
    }

    let JsonBody(body) = payload.map_err(|_| AppError::generic_validation())?;
    let changes = parse_changes(&body).ok_or_else(AppError::generic_validation)?;

    let detail = db
        .update_camper(id, &changes)
        .await?
        .ok_or(AppError::CamperNotFound)?;

    Ok((StatusCode::ACCEPTED, Json(detail)))
}

/// DELETE /campers/:id - Delete a camper and its signups
pub async fn delete_camper(
    State(db): State<RouterState>,
    PathId(id): PathId<i64>,
) -> Result<StatusCode, AppError> {
    if !db.delete_camper(id).await? {
        return Err(AppError::CamperNotFound);
    }
    tracing::info!(camper_id = id, "Camper deleted");
    Ok(StatusCode::NO_CONTENT)
}

fn parse_changes(body: &JsonObject) -> Option<CamperChanges> {
    let name = match body.get("name") {
        Some(value) => Some(string_value(value)?),
        None => None,
    };
    let age = match body.get("age") {
        Some(value) => Some(coerce_int(value)?),
        None => None,
    };
    CamperChanges::new(name, age).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().expect("test body must be an object")
    }

    #[test]
    fn test_parse_changes_partial() {
        let changes = parse_changes(&object(json!({ "age": "10" }))).unwrap();
        assert_eq!(changes.age(), Some(10));
        assert_eq!(changes.name(), None);
    }

    #[test]
    fn test_parse_changes_rejects_invalid_fields() {
        assert!(parse_changes(&object(json!({ "name": "" }))).is_none());
        assert!(parse_changes(&object(json!({ "name": null }))).is_none());
        assert!(parse_changes(&object(json!({ "age": 19 }))).is_none());
        assert!(parse_changes(&object(json!({ "age": "old" }))).is_none());
    }

    #[test]
    fn test_parse_changes_ignores_unknown_keys() {
        let changes = parse_changes(&object(json!({ "id": 42 }))).unwrap();
        assert!(changes.is_empty());
    }
}
