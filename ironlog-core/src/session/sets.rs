use crate::db::models::{BestSet, Exercise, ExerciseNote, SetEntry, SetRow};
use crate::db::operations::{
    add_exercise_note, get_exercise, get_exercise_history, get_latest_note, get_sets_for_exercise,
    replace_session_sets,
};
use crate::session::context::ExerciseConfig;
use crate::session::history::collapse_slots;
use crate::session::pb::{best_set, is_new_personal_best, working_sets};
use crate::session::session::{Session, validate_name};
use anyhow::Result;
use log::info;
use serde::Serialize;
use std::collections::HashSet;

/// Result of saving one exercise visit.
#[derive(Debug, Clone, Serialize)]
pub struct SaveOutcome {
    pub saved: usize,
    /// Whether this visit set a new personal best against every other
    /// session ever logged for the exercise.
    pub new_pb: bool,
}

/// Everything the exercise detail page needs: the most recent entry per
/// slot for prefill, the newest note, and the all-time best.
#[derive(Debug, Clone)]
pub struct ExerciseOverview {
    pub exercise: Exercise,
    pub config: ExerciseConfig,
    pub recent_sets: Vec<SetRow>,
    pub latest_note: Option<String>,
    pub best_ever: Option<BestSet>,
}

fn validate_entries(entries: &[SetEntry]) -> Result<()> {
    let mut slots = HashSet::new();
    for entry in entries {
        if entry.slot < 0 {
            return Err(anyhow::anyhow!("Slot index must not be negative"));
        }
        if entry.reps < 0 {
            return Err(anyhow::anyhow!("Reps must not be negative"));
        }
        if !entry.weight.is_finite() || entry.weight < 0.0 {
            return Err(anyhow::anyhow!("Weight must be a non-negative number"));
        }
        if !slots.insert(entry.slot) {
            return Err(anyhow::anyhow!("Duplicate slot {} in save", entry.slot));
        }
    }
    Ok(())
}

impl Session {
    /// Saves the entries of one exercise visit for the current run,
    /// replacing whatever the run had already stored for this exercise
    /// (latest save wins), then checks the visit against the exercise's
    /// history for a new personal best.
    ///
    /// Saving an empty slice clears the visit and reports no PB.
    pub async fn save_exercise_sets(
        &self,
        exercise_id: i64,
        entries: &[SetEntry],
    ) -> Result<SaveOutcome> {
        let (session_id, workout_id, config) = {
            let ctx = self.context.lock().await;
            let run = ctx
                .active()
                .ok_or_else(|| anyhow::anyhow!("No active workout session"))?;
            (
                run.session_id.clone(),
                run.workout_id,
                ctx.config(exercise_id),
            )
        };
        validate_entries(entries)?;

        let saved = replace_session_sets(
            &self.db_pool,
            &session_id,
            exercise_id,
            workout_id,
            entries,
        )
        .await?;
        self.context.lock().await.mark_visited(exercise_id);

        let history = get_exercise_history(&self.db_pool, exercise_id, &session_id).await?;
        let current = working_sets(&saved, &config);
        let past = working_sets(&history, &config);
        let new_pb = is_new_personal_best(&current, &past);
        if new_pb {
            info!("New personal best on exercise {}", exercise_id);
        }

        Ok(SaveOutcome {
            saved: saved.len(),
            new_pb,
        })
    }

    /// Loads the detail view for an exercise: last values per slot, the
    /// newest note, and the all-time best working set.
    pub async fn exercise_overview(&self, exercise_id: i64) -> Result<ExerciseOverview> {
        let exercise = get_exercise(&self.db_pool, exercise_id).await?;
        let config = self.exercise_config(exercise_id).await;

        // A few sessions worth of rows is plenty to find the most recent
        // entry for every visible slot.
        let window = config.total_slots() * 4;
        let recent = get_sets_for_exercise(&self.db_pool, exercise_id, Some(window)).await?;
        let mut recent_sets = collapse_slots(&recent);
        recent_sets.retain(|r| r.slot < config.total_slots());

        let all = get_sets_for_exercise(&self.db_pool, exercise_id, None).await?;
        let best_ever = best_set(&working_sets(&all, &config));
        let latest_note = get_latest_note(&self.db_pool, exercise_id)
            .await?
            .map(|n| n.note);

        Ok(ExerciseOverview {
            exercise,
            config,
            recent_sets,
            latest_note,
            best_ever,
        })
    }

    /// The all-time best working set for an exercise, shown next to its
    /// name in listings.
    pub async fn personal_best(&self, exercise_id: i64) -> Result<Option<BestSet>> {
        let config = self.exercise_config(exercise_id).await;
        let all = get_sets_for_exercise(&self.db_pool, exercise_id, None).await?;
        Ok(best_set(&working_sets(&all, &config)))
    }

    pub async fn save_note(&self, exercise_id: i64, note: &str) -> Result<ExerciseNote> {
        let note = validate_name(note)?;
        add_exercise_note(&self.db_pool, exercise_id, note).await
    }
}
