//! Camp database operations
//!
//! Handles all database interactions for campers, activities and signups.

use crate::camp::models::{
    Activity, Camper, CamperChanges, CamperDetail, NewActivity, NewCamper, NewSignup,
    SignupDetail,
};
use crate::config::DatabaseConfig;
use crate::error::AppError;
use sqlx::sqlite::{SqliteConnectOptions, SqlitePoolOptions};
use sqlx::{SqliteConnection, SqlitePool};
use std::path::Path;
use std::str::FromStr;
use tracing::{debug, info};

const SIGNUP_DETAIL_SELECT: &str = "SELECT s.id, s.time, s.camper_id, s.activity_id, \
     a.name AS activity, c.name AS camper \
     FROM signups s \
     JOIN activities a ON a.id = s.activity_id \
     JOIN campers c ON c.id = s.camper_id";

fn db_error(context: &'static str) -> impl FnOnce(sqlx::Error) -> AppError {
    move |e| AppError::Internal(anyhow::anyhow!("{}: {}", context, e))
}

/// Database connection pool for camp operations
pub struct CampDb {
    pool: SqlitePool,
}

impl CampDb {
    /// Initialize database connection pool and run migrations
    ///
    /// # Arguments
    /// * `config` - Database URL (or plain file path) and pool size
    ///
    /// # Returns
    /// * `Ok(CampDb)` if successful
    /// * `Err(AppError)` if connection failed
    pub async fn new(config: &DatabaseConfig) -> Result<Self, AppError> {
        // SQLite connection string format: sqlite://path/to/db.db
        let connection_string = if config.url.starts_with("sqlite:") {
            config.url.clone()
        } else {
            format!("sqlite:{}", config.url)
        };

        if !config.is_in_memory() {
            ensure_parent_dir(&connection_string)?;
        }

        let options = SqliteConnectOptions::from_str(&connection_string)
            .map_err(|e| AppError::Internal(anyhow::anyhow!("Invalid database path: {}", e)))?
            .create_if_missing(true)
            .foreign_keys(true);

        // Every connection to :memory: opens its own database, so keep exactly one alive
        let pool_options = if config.is_in_memory() {
            SqlitePoolOptions::new()
                .max_connections(1)
                .idle_timeout(None)
                .max_lifetime(None)
        } else {
            SqlitePoolOptions::new().max_connections(config.max_connections)
        };

        let pool = pool_options
            .connect_with(options)
            .await
            .map_err(db_error("Failed to connect to database"))?;

        info!("Connected to SQLite database at: {}", config.url);

        let db = Self { pool };
        db.run_migrations().await?;

        Ok(db)
    }

    /// Run database migrations
    async fn run_migrations(&self) -> Result<(), AppError> {
        info!("Running database migrations...");

        let migration_sql = include_str!("../../migrations/001_create_camp_tables.sql");

        for statement in split_statements(migration_sql) {
            sqlx::query(&statement)
                .execute(&self.pool)
                .await
                .map_err(|e| {
                    AppError::Internal(anyhow::anyhow!(
                        "Migration failed: {} - Statement: {}",
                        e,
                        statement.chars().take(100).collect::<String>()
                    ))
                })?;
        }

        info!("Database migrations completed successfully");
        Ok(())
    }

    /// Get all campers, ordered by id
    pub async fn list_campers(&self) -> Result<Vec<Camper>, AppError> {
        sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch campers"))
    }

    /// Get a camper by ID
    pub async fn get_camper(&self, id: i64) -> Result<Option<Camper>, AppError> {
        sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch camper"))
    }

    /// Get a camper by ID together with its signups
    pub async fn get_camper_detail(&self, id: i64) -> Result<Option<CamperDetail>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let Some(camper) =
            sqlx::query_as::<_, Camper>("SELECT id, name, age FROM campers WHERE id = ?")
                .bind(id)
                .fetch_optional(&mut *tx)
                .await
                .map_err(db_error("Failed to fetch camper"))?
        else {
            return Ok(None);
        };

        let signups = signups_for_camper(&mut *tx, id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        Ok(Some(CamperDetail { camper, signups }))
    }

    /// Create a new camper
    pub async fn create_camper(&self, camper: &NewCamper) -> Result<Camper, AppError> {
        let created = sqlx::query_as::<_, Camper>(
            "INSERT INTO campers (name, age) VALUES (?, ?) RETURNING id, name, age",
        )
        .bind(camper.name())
        .bind(camper.age())
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create camper"))?;

        debug!("Created camper: {}", created.id);
        Ok(created)
    }

    /// Apply a partial update and read the camper back with its signups
    ///
    /// Returns `None` if the camper does not exist. The update runs first so
    /// the transaction holds the write lock for the read-back.
    pub async fn update_camper(
        &self,
        id: i64,
        changes: &CamperChanges,
    ) -> Result<Option<CamperDetail>, AppError> {
        if changes.is_empty() {
            return self.get_camper_detail(id).await;
        }

        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let Some(camper) = sqlx::query_as::<_, Camper>(
            "UPDATE campers SET name = COALESCE(?, name), age = COALESCE(?, age) \
             WHERE id = ? RETURNING id, name, age",
        )
        .bind(changes.name())
        .bind(changes.age())
        .bind(id)
        .fetch_optional(&mut *tx)
        .await
        .map_err(db_error("Failed to update camper"))?
        else {
            return Ok(None);
        };

        let signups = signups_for_camper(&mut *tx, id).await?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        debug!("Updated camper: {}", id);
        Ok(Some(CamperDetail { camper, signups }))
    }

    /// Delete a camper (cascades to signups)
    ///
    /// Returns `false` if no camper had this id.
    pub async fn delete_camper(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM campers WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete camper"))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!("Deleted camper: {}", id);
        }
        Ok(deleted)
    }

    /// Get all activities, ordered by id
    pub async fn list_activities(&self) -> Result<Vec<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT id, name, difficulty FROM activities ORDER BY id")
            .fetch_all(&self.pool)
            .await
            .map_err(db_error("Failed to fetch activities"))
    }

    /// Get an activity by ID
    pub async fn get_activity(&self, id: i64) -> Result<Option<Activity>, AppError> {
        sqlx::query_as::<_, Activity>("SELECT id, name, difficulty FROM activities WHERE id = ?")
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch activity"))
    }

    /// Create a new activity
    pub async fn create_activity(&self, activity: &NewActivity) -> Result<Activity, AppError> {
        let created = sqlx::query_as::<_, Activity>(
            "INSERT INTO activities (name, difficulty) VALUES (?, ?) RETURNING id, name, difficulty",
        )
        .bind(&activity.name)
        .bind(activity.difficulty)
        .fetch_one(&self.pool)
        .await
        .map_err(db_error("Failed to create activity"))?;

        debug!("Created activity: {}", created.id);
        Ok(created)
    }

    /// Delete an activity (cascades to signups)
    ///
    /// Returns `false` if no activity had this id.
    pub async fn delete_activity(&self, id: i64) -> Result<bool, AppError> {
        let result = sqlx::query("DELETE FROM activities WHERE id = ?")
            .bind(id)
            .execute(&self.pool)
            .await
            .map_err(db_error("Failed to delete activity"))?;

        let deleted = result.rows_affected() > 0;
        if deleted {
            debug!("Deleted activity: {}", id);
        }
        Ok(deleted)
    }

    /// Create a signup
    ///
    /// Returns `None` when the referenced camper or activity does not exist.
    /// The insert must stay the first statement so the transaction takes the
    /// write lock before it reads anything.
    pub async fn create_signup(&self, signup: &NewSignup) -> Result<Option<SignupDetail>, AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        let inserted = sqlx::query_scalar::<_, i64>(
            "INSERT INTO signups (time, camper_id, activity_id) VALUES (?, ?, ?) RETURNING id",
        )
        .bind(signup.time())
        .bind(signup.camper_id())
        .bind(signup.activity_id())
        .fetch_one(&mut *tx)
        .await;

        let id = match inserted {
            Ok(id) => id,
            Err(sqlx::Error::Database(e)) if e.is_foreign_key_violation() => {
                debug!(
                    camper_id = signup.camper_id(),
                    activity_id = signup.activity_id(),
                    "Rejected signup referencing missing camper or activity"
                );
                return Ok(None);
            }
            Err(e) => return Err(db_error("Failed to create signup")(e)),
        };

        let created = sqlx::query_as::<_, SignupDetail>(&format!(
            "{} WHERE s.id = ?",
            SIGNUP_DETAIL_SELECT
        ))
        .bind(id)
        .fetch_one(&mut *tx)
        .await
        .map_err(db_error("Failed to fetch signup"))?;

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        debug!(
            "Created signup {} for camper {} at activity {}",
            created.id, created.camper_id, created.activity_id
        );
        Ok(Some(created))
    }

    /// Get a signup by ID
    pub async fn get_signup(&self, id: i64) -> Result<Option<SignupDetail>, AppError> {
        sqlx::query_as::<_, SignupDetail>(&format!("{} WHERE s.id = ?", SIGNUP_DETAIL_SELECT))
            .bind(id)
            .fetch_optional(&self.pool)
            .await
            .map_err(db_error("Failed to fetch signup"))
    }

    /// Delete every row and reset id sequences
    pub async fn clear_all(&self) -> Result<(), AppError> {
        let mut tx = self
            .pool
            .begin()
            .await
            .map_err(db_error("Failed to begin transaction"))?;

        for statement in [
            "DELETE FROM signups",
            "DELETE FROM campers",
            "DELETE FROM activities",
            "DELETE FROM sqlite_sequence",
        ] {
            sqlx::query(statement)
                .execute(&mut *tx)
                .await
                .map_err(db_error("Failed to clear tables"))?;
        }

        tx.commit()
            .await
            .map_err(db_error("Failed to commit transaction"))?;

        info!("Cleared all camp data");
        Ok(())
    }
}

async fn signups_for_camper(
    conn: &mut SqliteConnection,
    camper_id: i64,
) -> Result<Vec<SignupDetail>, AppError> {
    sqlx::query_as::<_, SignupDetail>(&format!(
        "{} WHERE s.camper_id = ? ORDER BY s.id",
        SIGNUP_DETAIL_SELECT
    ))
    .bind(camper_id)
    .fetch_all(conn)
    .await
    .map_err(db_error("Failed to fetch signups"))
}

/// Create the directory holding a file-backed database
fn ensure_parent_dir(connection_string: &str) -> Result<(), AppError> {
    let path = connection_string
        .trim_start_matches("sqlite:")
        .trim_start_matches("//");
    let path = path.split('?').next().unwrap_or(path);

    if let Some(parent) = Path::new(path).parent() {
        if !parent.as_os_str().is_empty() {
            std::fs::create_dir_all(parent).map_err(|e| {
                AppError::Internal(anyhow::anyhow!("Failed to create db directory: {}", e))
            })?;
        }
    }
    Ok(())
}

/// Strip `--` comments from a migration script and split it into statements
fn split_statements(sql: &str) -> Vec<String> {
    let mut cleaned_sql = String::new();
    for line in sql.lines() {
        let trimmed = line.trim();
        if trimmed.is_empty() || trimmed.starts_with("--") {
            continue;
        }
        let without_comments = match trimmed.find("--") {
            Some(comment_pos) => &trimmed[..comment_pos],
            None => trimmed,
        };
        cleaned_sql.push_str(without_comments.trim());
        cleaned_sql.push(' ');
    }

    cleaned_sql
        .split(';')
        .map(|s| s.trim())
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}
