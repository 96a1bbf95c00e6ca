//! Finish-workout reporting and session history reconstruction.

use crate::db::operations::{
    get_all_exercises, get_all_sets, get_all_workouts, get_exercise, get_exercise_history,
    get_sets_for_session,
};
use crate::session::history::{group_into_sessions, session_date_label};
use crate::session::pb::{is_new_personal_best, is_warmup, working_sets};
use crate::session::session::Session;
use anyhow::Result;
use chrono::{DateTime, Utc};
use log::info;
use serde::Serialize;
use std::collections::HashMap;

/// Summary returned when a run ends: how many exercises were visited and
/// which of them set a new personal best.
#[derive(Debug, Clone, Serialize)]
pub struct WorkoutReport {
    pub exercises_completed: usize,
    pub pb_count: usize,
    pub pb_exercises: Vec<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct SetDisplay {
    pub slot: i64,
    pub reps: i64,
    pub weight: f64,
    pub warmup: bool,
}

#[derive(Debug, Clone, Serialize)]
pub struct ExerciseBreakdown {
    pub exercise_id: i64,
    pub exercise_name: String,
    pub new_pb: bool,
    pub sets: Vec<SetDisplay>,
}

/// One reconstructed session for the history page, most recent first.
#[derive(Debug, Clone, Serialize)]
pub struct SessionSummary {
    pub session_id: String,
    pub workout_name: String,
    pub label: String,
    pub started_at: DateTime<Utc>,
    pub pb_count: usize,
    pub exercises: Vec<ExerciseBreakdown>,
}

impl Session {
    /// Ends the current run and reports which exercises set a personal
    /// best. A run with nothing saved is fine: zero PBs, not an error.
    pub async fn finish_workout(&self) -> Result<WorkoutReport> {
        let run = {
            let ctx = self.context.lock().await;
            ctx.active()
                .cloned()
                .ok_or_else(|| anyhow::anyhow!("No active workout to finish"))?
        };

        let session_rows = get_sets_for_session(&self.db_pool, &run.session_id).await?;
        let mut pb_exercises = Vec::new();

        for &exercise_id in run.visited() {
            let config = self.exercise_config(exercise_id).await;
            let mine: Vec<_> = session_rows
                .iter()
                .filter(|r| r.exercise_id == exercise_id)
                .cloned()
                .collect();
            let current = working_sets(&mine, &config);

            let history = get_exercise_history(&self.db_pool, exercise_id, &run.session_id).await?;
            let past = working_sets(&history, &config);

            if is_new_personal_best(&current, &past) {
                let name = match get_exercise(&self.db_pool, exercise_id).await {
                    Ok(exercise) => exercise.name,
                    Err(_) => "Unknown".to_string(),
                };
                pb_exercises.push(name);
            }
        }

        self.context.lock().await.end();
        info!(
            "Finished session {}: {} exercises, {} PBs",
            run.session_id,
            run.visited().len(),
            pb_exercises.len()
        );

        Ok(WorkoutReport {
            exercises_completed: run.visited().len(),
            pb_count: pb_exercises.len(),
            pb_exercises,
        })
    }

    /// Rebuilds every logged session from the full set stream, labeled
    /// and ordered for the history page. A session's PB flags compare its
    /// sets against all rows outside that session, so an old record that
    /// was since surpassed no longer reads as one.
    pub async fn session_history(&self) -> Result<Vec<SessionSummary>> {
        let rows = get_all_sets(&self.db_pool).await?;
        let exercises = get_all_exercises(&self.db_pool).await?;
        let workouts = get_all_workouts(&self.db_pool).await?;

        let exercise_names: HashMap<i64, String> =
            exercises.into_iter().map(|e| (e.id, e.name)).collect();
        let workout_names: HashMap<i64, String> =
            workouts.into_iter().map(|w| (w.id, w.name)).collect();

        let groups = group_into_sessions(&rows);
        let now = Utc::now();
        let ctx = self.context.lock().await;

        let mut summaries = Vec::with_capacity(groups.len());
        for group in groups {
            let mut breakdown = Vec::with_capacity(group.sets_by_exercise.len());
            let mut pb_count = 0;

            for (exercise_id, collapsed) in &group.sets_by_exercise {
                let config = ctx.config(*exercise_id);
                let current = working_sets(collapsed, &config);
                let others: Vec<_> = rows
                    .iter()
                    .filter(|r| {
                        r.exercise_id == *exercise_id && r.session_id != group.session_id
                    })
                    .cloned()
                    .collect();
                let past = working_sets(&others, &config);

                let new_pb = is_new_personal_best(&current, &past);
                if new_pb {
                    pb_count += 1;
                }

                let sets = collapsed
                    .iter()
                    .map(|r| SetDisplay {
                        slot: r.slot,
                        reps: r.reps,
                        weight: r.weight,
                        warmup: is_warmup(r.slot, &config),
                    })
                    .collect();

                breakdown.push(ExerciseBreakdown {
                    exercise_id: *exercise_id,
                    exercise_name: exercise_names
                        .get(exercise_id)
                        .cloned()
                        .unwrap_or_else(|| "Unknown".to_string()),
                    new_pb,
                    sets,
                });
            }

            summaries.push(SessionSummary {
                label: session_date_label(group.started_at, now),
                workout_name: workout_names
                    .get(&group.workout_id)
                    .cloned()
                    .unwrap_or_else(|| "Unknown".to_string()),
                session_id: group.session_id,
                started_at: group.started_at,
                pb_count,
                exercises: breakdown,
            });
        }

        Ok(summaries)
    }
}
