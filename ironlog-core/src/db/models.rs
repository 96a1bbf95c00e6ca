use chrono::{DateTime, Utc};
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Workout {
    pub id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct Exercise {
    pub id: i64,
    pub workout_id: i64,
    pub name: String,
    pub created_at: DateTime<Utc>,
}

/// One logged reps/weight entry. The store column for the slot index is
/// named `sets`; slot 0 is the warm-up slot when warm-up is enabled for
/// the owning exercise.
#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct SetRow {
    pub id: i64,
    pub exercise_id: i64,
    pub workout_id: i64,
    pub session_id: String,
    #[sqlx(rename = "sets")]
    pub slot: i64,
    pub reps: i64,
    pub weight: f64,
    pub created_at: DateTime<Utc>,
}

impl fmt::Display for SetRow {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}kg x {} reps", self.weight, self.reps)
    }
}

#[derive(Debug, Clone, sqlx::FromRow, Serialize)]
pub struct ExerciseNote {
    pub id: i64,
    pub exercise_id: i64,
    pub note: String,
    pub created_at: DateTime<Utc>,
}

/// Input value for one slot of an exercise visit, as supplied by the
/// presentation layer before a save.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SetEntry {
    pub slot: i64,
    pub reps: i64,
    pub weight: f64,
}

/// The single best set of a collection: highest weight, ties broken by
/// reps. Never persisted; recomputed on demand.
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct BestSet {
    pub weight: f64,
    pub reps: i64,
}

impl fmt::Display for BestSet {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{:.1}kg x {} reps", self.weight, self.reps)
    }
}

/// Renders an optional best set, with an explicit placeholder for "no
/// sets yet" so an absent best never reads as a zero-value one.
pub fn format_best(best: Option<&BestSet>) -> String {
    match best {
        Some(b) => b.to_string(),
        None => "—".to_string(),
    }
}
