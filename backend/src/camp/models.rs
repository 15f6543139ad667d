//! Camp data models
//!
//! Row types read back from the database, plus the validated inputs used
//! to write them.

use crate::camp::validation::{validate_age, validate_name, validate_time, ValidationError};
use serde::Serialize;
use sqlx::FromRow;

/// A camper as listed by `GET /campers` (no signups)
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Camper {
    /// Surrogate key
    pub id: i64,
    /// Display name, never empty
    pub name: String,
    /// Age in years, 8 to 18
    pub age: i64,
}

/// A camper together with every signup it owns
#[derive(Debug, Clone, Serialize)]
pub struct CamperDetail {
    /// The camper row
    #[serde(flatten)]
    pub camper: Camper,
    /// Signups ordered by id
    pub signups: Vec<SignupDetail>,
}

/// A camp activity
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct Activity {
    /// Surrogate key
    pub id: i64,
    /// Activity name
    pub name: String,
    /// Difficulty rating
    pub difficulty: i64,
}

/// A signup with the names of both parents denormalized alongside the keys
#[derive(Debug, Clone, PartialEq, Eq, Serialize, FromRow)]
pub struct SignupDetail {
    /// Surrogate key
    pub id: i64,
    /// Hour of the day, 0 to 23
    pub time: i64,
    /// Owning camper
    pub camper_id: i64,
    /// Owning activity
    pub activity_id: i64,
    /// Name of the activity
    pub activity: String,
    /// Name of the camper
    pub camper: String,
}

/// Validated input for inserting a camper
#[derive(Debug, Clone)]
pub struct NewCamper {
    name: String,
    age: i64,
}

impl NewCamper {
    /// Validate `age` and `name` and build the insert
    pub fn new(name: String, age: i64) -> Result<Self, ValidationError> {
        validate_age(age)?;
        validate_name(&name)?;
        Ok(Self { name, age })
    }

    /// Camper name
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Camper age
    pub fn age(&self) -> i64 {
        self.age
    }
}

/// Validated partial update of a camper; `None` leaves a column untouched
#[derive(Debug, Clone, Default)]
pub struct CamperChanges {
    name: Option<String>,
    age: Option<i64>,
}

impl CamperChanges {
    /// Validate whichever fields are present
    pub fn new(name: Option<String>, age: Option<i64>) -> Result<Self, ValidationError> {
        if let Some(name) = &name {
            validate_name(name)?;
        }
        if let Some(age) = age {
            validate_age(age)?;
        }
        Ok(Self { name, age })
    }

    /// New name, if changing
    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    /// New age, if changing
    pub fn age(&self) -> Option<i64> {
        self.age
    }

    /// True when nothing would change
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.age.is_none()
    }
}

/// Input for inserting an activity
#[derive(Debug, Clone)]
pub struct NewActivity {
    /// Activity name
    pub name: String,
    /// Difficulty rating
    pub difficulty: i64,
}

/// Validated input for inserting a signup
#[derive(Debug, Clone)]
pub struct NewSignup {
    camper_id: i64,
    activity_id: i64,
    time: i64,
}

impl NewSignup {
    /// Validate `time` and build the insert. Parent existence is checked by the store.
    pub fn new(camper_id: i64, activity_id: i64, time: i64) -> Result<Self, ValidationError> {
        validate_time(time)?;
        Ok(Self {
            camper_id,
            activity_id,
            time,
        })
    }

    /// Camper being signed up
    pub fn camper_id(&self) -> i64 {
        self.camper_id
    }

    /// Activity being signed up for
    pub fn activity_id(&self) -> i64 {
        self.activity_id
    }

    /// Hour of the day
    pub fn time(&self) -> i64 {
        self.time
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_camper_validates() {
        assert!(NewCamper::new("Ada".to_string(), 12).is_ok());
        assert_eq!(
            NewCamper::new(String::new(), 12).unwrap_err(),
            ValidationError::EmptyName
        );
        assert_eq!(
            NewCamper::new("Ada".to_string(), 7).unwrap_err(),
            ValidationError::AgeOutOfRange(7)
        );
    }

    #[test]
    fn test_camper_changes_only_checks_present_fields() {
        let changes = CamperChanges::new(None, Some(18)).unwrap();
        assert_eq!(changes.name(), None);
        assert_eq!(changes.age(), Some(18));
        assert!(CamperChanges::new(None, None).unwrap().is_empty());
        assert!(CamperChanges::new(Some(String::new()), None).is_err());
    }

    #[test]
    fn test_camper_detail_serializes_flat_with_signups() {
        let detail = CamperDetail {
            camper: Camper {
                id: 1,
                name: "Ada".to_string(),
                age: 12,
            },
            signups: vec![SignupDetail {
                id: 3,
                time: 9,
                camper_id: 1,
                activity_id: 2,
                activity: "Archery".to_string(),
                camper: "Ada".to_string(),
            }],
        };

        let value = serde_json::to_value(&detail).unwrap();
        assert_eq!(value["id"], 1);
        assert_eq!(value["name"], "Ada");
        assert_eq!(value["age"], 12);
        assert_eq!(value["signups"][0]["activity"], "Archery");
        assert_eq!(value["signups"][0]["camper"], "Ada");
        assert!(value.get("camper").is_none());
    }
}
