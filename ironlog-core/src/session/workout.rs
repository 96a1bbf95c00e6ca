//! Workout and exercise management operations.

use crate::db::models::{Exercise, Workout};
use crate::db::operations::{
    create_exercise, create_workout, delete_exercise, delete_workout, get_all_workouts,
    get_exercise, get_exercises_for_workout, get_workout, rename_exercise, rename_workout,
};
use crate::session::context::ExerciseConfig;
use crate::session::session::{Session, validate_name};
use anyhow::Result;
use log::{info, warn};

impl Session {
    pub async fn create_workout(&self, name: &str) -> Result<Workout> {
        let name = validate_name(name)?;
        create_workout(&self.db_pool, name).await
    }

    pub async fn rename_workout(&self, workout_id: i64, name: &str) -> Result<Workout> {
        let name = validate_name(name)?;
        rename_workout(&self.db_pool, workout_id, name).await
    }

    /// Deletes a workout and everything logged under it.
    pub async fn delete_workout(&self, workout_id: i64) -> Result<u64> {
        let removed = delete_workout(&self.db_pool, workout_id).await?;
        let mut ctx = self.context.lock().await;
        if ctx.active().map(|run| run.workout_id) == Some(workout_id) {
            warn!("Deleted workout {} had a run in progress", workout_id);
            ctx.end();
        }
        Ok(removed)
    }

    pub async fn list_workouts(&self) -> Result<Vec<Workout>> {
        get_all_workouts(&self.db_pool).await
    }

    /// Adds an exercise to a workout and remembers its slot configuration
    /// for the rest of the process lifetime.
    pub async fn add_exercise(
        &self,
        workout_id: i64,
        name: &str,
        config: ExerciseConfig,
    ) -> Result<Exercise> {
        let name = validate_name(name)?;
        if config.set_count < 1 {
            return Err(anyhow::anyhow!("Set count must be at least 1"));
        }
        let _ = get_workout(&self.db_pool, workout_id).await?;
        let exercise = create_exercise(&self.db_pool, workout_id, name).await?;
        self.context.lock().await.set_config(exercise.id, config);
        Ok(exercise)
    }

    pub async fn rename_exercise(&self, exercise_id: i64, name: &str) -> Result<Exercise> {
        let name = validate_name(name)?;
        rename_exercise(&self.db_pool, exercise_id, name).await
    }

    pub async fn delete_exercise(&self, exercise_id: i64) -> Result<u64> {
        let removed = delete_exercise(&self.db_pool, exercise_id).await?;
        self.context.lock().await.forget_config(exercise_id);
        Ok(removed)
    }

    pub async fn list_exercises(&self, workout_id: i64) -> Result<Vec<Exercise>> {
        get_exercises_for_workout(&self.db_pool, workout_id).await
    }

    pub async fn get_exercise(&self, exercise_id: i64) -> Result<Exercise> {
        get_exercise(&self.db_pool, exercise_id).await
    }

    /// Starts a run through a workout's exercises. All sets saved until
    /// the run finishes share the returned session id. A run already in
    /// progress is dropped.
    pub async fn begin_workout(&self, workout_id: i64) -> Result<String> {
        let workout = get_workout(&self.db_pool, workout_id).await?;
        let mut ctx = self.context.lock().await;
        if ctx.active().is_some() {
            warn!("Starting a new run while another was in progress");
        }
        let session_id = ctx.begin(workout_id);
        info!("Started session {} for workout {}", session_id, workout.name);
        Ok(session_id)
    }

    /// Drops the current run without a report. Already-saved sets stay in
    /// the store.
    pub async fn abandon_workout(&self) -> Result<()> {
        let run = self.context.lock().await.end();
        match run {
            Some(run) => {
                info!("Abandoned session {}", run.session_id);
                Ok(())
            }
            None => Err(anyhow::anyhow!("No active workout session")),
        }
    }
}
