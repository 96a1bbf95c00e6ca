use anyhow::Result;
use chrono::Utc;
use sqlx::SqlitePool;

use crate::db::models::{Exercise, ExerciseNote, SetEntry, SetRow, Workout};

// Workouts

pub async fn create_workout(pool: &SqlitePool, name: &str) -> Result<Workout> {
    sqlx::query_as::<_, Workout>(
        "INSERT INTO workouts (name, created_at) VALUES (?1, ?2) RETURNING *",
    )
    .bind(name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_workout(pool: &SqlitePool, workout_id: i64) -> Result<Workout> {
    sqlx::query_as::<_, Workout>("SELECT * FROM workouts WHERE id = ?1")
        .bind(workout_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn get_all_workouts(pool: &SqlitePool) -> Result<Vec<Workout>> {
    sqlx::query_as::<_, Workout>("SELECT * FROM workouts ORDER BY created_at ASC, id ASC")
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

pub async fn rename_workout(pool: &SqlitePool, workout_id: i64, name: &str) -> Result<Workout> {
    sqlx::query_as::<_, Workout>("UPDATE workouts SET name = ?1 WHERE id = ?2 RETURNING *")
        .bind(name)
        .bind(workout_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

/// Deletes a workout; exercises, sets, and notes underneath it go with it
/// via the cascading foreign keys.
pub async fn delete_workout(pool: &SqlitePool, workout_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM workouts WHERE id = ?1")
        .bind(workout_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// Exercises

pub async fn create_exercise(pool: &SqlitePool, workout_id: i64, name: &str) -> Result<Exercise> {
    sqlx::query_as::<_, Exercise>(
        "INSERT INTO exercises (workout_id, name, created_at) VALUES (?1, ?2, ?3) RETURNING *",
    )
    .bind(workout_id)
    .bind(name)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<Exercise> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn get_exercises_for_workout(
    pool: &SqlitePool,
    workout_id: i64,
) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>(
        "SELECT * FROM exercises WHERE workout_id = ?1 ORDER BY created_at ASC, id ASC",
    )
    .bind(workout_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_all_exercises(pool: &SqlitePool) -> Result<Vec<Exercise>> {
    sqlx::query_as::<_, Exercise>("SELECT * FROM exercises ORDER BY created_at ASC, id ASC")
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

pub async fn rename_exercise(pool: &SqlitePool, exercise_id: i64, name: &str) -> Result<Exercise> {
    sqlx::query_as::<_, Exercise>("UPDATE exercises SET name = ?1 WHERE id = ?2 RETURNING *")
        .bind(name)
        .bind(exercise_id)
        .fetch_one(pool)
        .await
        .map_err(Into::into)
}

pub async fn delete_exercise(pool: &SqlitePool, exercise_id: i64) -> Result<u64> {
    let result = sqlx::query("DELETE FROM exercises WHERE id = ?1")
        .bind(exercise_id)
        .execute(pool)
        .await?;
    Ok(result.rows_affected())
}

// Notes

pub async fn add_exercise_note(
    pool: &SqlitePool,
    exercise_id: i64,
    note: &str,
) -> Result<ExerciseNote> {
    sqlx::query_as::<_, ExerciseNote>(
        "INSERT INTO exercise_notes (exercise_id, note, created_at) VALUES (?1, ?2, ?3) RETURNING *",
    )
    .bind(exercise_id)
    .bind(note)
    .bind(Utc::now())
    .fetch_one(pool)
    .await
    .map_err(Into::into)
}

/// Notes are append-only history; only the newest one is ever shown.
pub async fn get_latest_note(
    pool: &SqlitePool,
    exercise_id: i64,
) -> Result<Option<ExerciseNote>> {
    sqlx::query_as::<_, ExerciseNote>(
        "SELECT * FROM exercise_notes WHERE exercise_id = ?1
         ORDER BY created_at DESC, id DESC LIMIT 1",
    )
    .bind(exercise_id)
    .fetch_optional(pool)
    .await
    .map_err(Into::into)
}

// Sets

pub async fn get_sets_for_exercise(
    pool: &SqlitePool,
    exercise_id: i64,
    limit: Option<i64>,
) -> Result<Vec<SetRow>> {
    match limit {
        Some(limit) => sqlx::query_as::<_, SetRow>(
            "SELECT * FROM sets WHERE exercise_id = ?1
             ORDER BY created_at DESC, id DESC LIMIT ?2",
        )
        .bind(exercise_id)
        .bind(limit)
        .fetch_all(pool)
        .await
        .map_err(Into::into),
        None => sqlx::query_as::<_, SetRow>(
            "SELECT * FROM sets WHERE exercise_id = ?1 ORDER BY created_at DESC, id DESC",
        )
        .bind(exercise_id)
        .fetch_all(pool)
        .await
        .map_err(Into::into),
    }
}

pub async fn get_sets_for_session(pool: &SqlitePool, session_id: &str) -> Result<Vec<SetRow>> {
    sqlx::query_as::<_, SetRow>(
        "SELECT * FROM sets WHERE session_id = ?1 ORDER BY created_at ASC, id ASC",
    )
    .bind(session_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

/// Every set ever logged for an exercise except the rows of one session.
/// This is the history a current session's sets are compared against for
/// PB detection.
pub async fn get_exercise_history(
    pool: &SqlitePool,
    exercise_id: i64,
    exclude_session_id: &str,
) -> Result<Vec<SetRow>> {
    sqlx::query_as::<_, SetRow>(
        "SELECT * FROM sets WHERE exercise_id = ?1 AND session_id != ?2
         ORDER BY created_at ASC, id ASC",
    )
    .bind(exercise_id)
    .bind(exclude_session_id)
    .fetch_all(pool)
    .await
    .map_err(Into::into)
}

pub async fn get_all_sets(pool: &SqlitePool) -> Result<Vec<SetRow>> {
    sqlx::query_as::<_, SetRow>("SELECT * FROM sets ORDER BY created_at ASC, id ASC")
        .fetch_all(pool)
        .await
        .map_err(Into::into)
}

/// Replaces one exercise's rows for one session with a fresh batch, in a
/// single transaction: latest save wins for the visit, and re-reading the
/// session afterwards yields exactly one row per slot.
pub async fn replace_session_sets(
    pool: &SqlitePool,
    session_id: &str,
    exercise_id: i64,
    workout_id: i64,
    entries: &[SetEntry],
) -> Result<Vec<SetRow>> {
    let mut tx = pool.begin().await?;

    sqlx::query("DELETE FROM sets WHERE session_id = ?1 AND exercise_id = ?2")
        .bind(session_id)
        .bind(exercise_id)
        .execute(&mut *tx)
        .await?;

    let now = Utc::now();
    let mut saved = Vec::with_capacity(entries.len());
    for entry in entries {
        let row = sqlx::query_as::<_, SetRow>(
            "INSERT INTO sets (exercise_id, workout_id, session_id, sets, reps, weight, created_at)
             VALUES (?1, ?2, ?3, ?4, ?5, ?6, ?7) RETURNING *",
        )
        .bind(exercise_id)
        .bind(workout_id)
        .bind(session_id)
        .bind(entry.slot)
        .bind(entry.reps)
        .bind(entry.weight)
        .bind(now)
        .fetch_one(&mut *tx)
        .await?;
        saved.push(row);
    }

    tx.commit().await?;
    Ok(saved)
}
