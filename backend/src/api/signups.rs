//! Signup API handlers
//!
//! Every failure, including a reference to a missing camper or activity,
//! is reported with the generic validation placeholder.

use crate::api::utils::{coerce_int, JsonBody, JsonObject, RouterState};
use crate::camp::{NewSignup, SignupDetail};
use crate::error::AppError;
use axum::{extract::State, http::StatusCode, response::Json};

/// POST /signups - Sign a camper up for an activity at an hour
pub async fn create_signup(
    State(db): State<RouterState>,
    payload: Result<JsonBody<JsonObject>, AppError>,
) -> Result<(StatusCode, Json<SignupDetail>), AppError> {
    let JsonBody(body) = payload.map_err(|_| AppError::generic_validation())?;
    let new_signup = parse_signup(&body).ok_or_else(AppError::generic_validation)?;

    let signup = db
        .create_signup(&new_signup)
        .await?
        .ok_or_else(AppError::generic_validation)?;
    tracing::info!(
        signup_id = signup.id,
        camper_id = signup.camper_id,
        activity_id = signup.activity_id,
        "Signup created"
    );

    Ok((StatusCode::CREATED, Json(signup)))
}

fn parse_signup(body: &JsonObject) -> Option<NewSignup> {
    let camper_id = coerce_int(body.get("camper_id")?)?;
    let activity_id = coerce_int(body.get("activity_id")?)?;
    let time = coerce_int(body.get("time")?)?;
    NewSignup::new(camper_id, activity_id, time).ok()
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn object(value: serde_json::Value) -> JsonObject {
        value.as_object().cloned().expect("test body must be an object")
    }

    #[test]
    fn test_parse_signup_requires_every_field() {
        assert!(parse_signup(&object(json!({ "camper_id": 1, "activity_id": 2 }))).is_none());
        assert!(parse_signup(&object(json!({ "camper_id": 1, "time": 2 }))).is_none());
        assert!(parse_signup(&object(json!({ "activity_id": 1, "time": 2 }))).is_none());
    }

    #[test]
    fn test_parse_signup_checks_hour() {
        let body = |time: serde_json::Value| {
            object(json!({ "camper_id": 1, "activity_id": 2, "time": time }))
        };
        assert!(parse_signup(&body(json!(-1))).is_none());
        assert!(parse_signup(&body(json!(24))).is_none());
        assert_eq!(parse_signup(&body(json!(0))).unwrap().time(), 0);
        assert_eq!(parse_signup(&body(json!("23"))).unwrap().time(), 23);
    }
}
