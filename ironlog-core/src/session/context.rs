use std::collections::HashMap;
use uuid::Uuid;

/// Per-exercise slot configuration, chosen when the exercise is added and
/// held only in process memory. After a restart every exercise falls back
/// to the default below, so slot 0 reads as warm-up again regardless of
/// the original choice.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ExerciseConfig {
    pub set_count: u32,
    pub has_warmup: bool,
}

impl Default for ExerciseConfig {
    fn default() -> Self {
        Self {
            set_count: 3,
            has_warmup: true,
        }
    }
}

impl ExerciseConfig {
    /// Number of entry slots an exercise visit presents, warm-up included.
    pub fn total_slots(&self) -> i64 {
        self.set_count as i64 + if self.has_warmup { 1 } else { 0 }
    }
}

/// One in-progress run through a workout's exercises. All sets logged
/// during the run share the generated session id.
#[derive(Debug, Clone)]
pub struct ActiveRun {
    pub session_id: String,
    pub workout_id: i64,
    visited: Vec<i64>,
}

impl ActiveRun {
    fn new(workout_id: i64) -> Self {
        Self {
            session_id: Uuid::new_v4().to_string(),
            workout_id,
            visited: Vec::new(),
        }
    }

    /// Exercise ids saved during this run, in first-visit order.
    pub fn visited(&self) -> &[i64] {
        &self.visited
    }

    fn mark_visited(&mut self, exercise_id: i64) {
        if !self.visited.contains(&exercise_id) {
            self.visited.push(exercise_id);
        }
    }
}

/// The engine's only mutable state: exercise configurations for the life
/// of the process and the current run, if any. Owned by [`Session`] behind
/// a mutex; everything else the engine computes is derived from fetched
/// rows.
///
/// [`Session`]: crate::session::Session
#[derive(Debug, Default)]
pub struct SessionContext {
    configs: HashMap<i64, ExerciseConfig>,
    active: Option<ActiveRun>,
}

impl SessionContext {
    pub fn config(&self, exercise_id: i64) -> ExerciseConfig {
        self.configs
            .get(&exercise_id)
            .copied()
            .unwrap_or_default()
    }

    pub fn set_config(&mut self, exercise_id: i64, config: ExerciseConfig) {
        self.configs.insert(exercise_id, config);
    }

    pub fn forget_config(&mut self, exercise_id: i64) {
        self.configs.remove(&exercise_id);
    }

    pub fn active(&self) -> Option<&ActiveRun> {
        self.active.as_ref()
    }

    /// Starts a fresh run with a new session id, replacing any run still
    /// in progress.
    pub fn begin(&mut self, workout_id: i64) -> String {
        let run = ActiveRun::new(workout_id);
        let session_id = run.session_id.clone();
        self.active = Some(run);
        session_id
    }

    pub fn end(&mut self) -> Option<ActiveRun> {
        self.active.take()
    }

    pub fn mark_visited(&mut self, exercise_id: i64) {
        if let Some(run) = self.active.as_mut() {
            run.mark_visited(exercise_id);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_config_is_three_sets_with_warmup() {
        let ctx = SessionContext::default();
        let config = ctx.config(42);
        assert_eq!(config.set_count, 3);
        assert!(config.has_warmup);
        assert_eq!(config.total_slots(), 4);
    }

    #[test]
    fn begin_replaces_previous_run() {
        let mut ctx = SessionContext::default();
        let first = ctx.begin(1);
        ctx.mark_visited(10);
        let second = ctx.begin(2);
        assert_ne!(first, second);
        let run = ctx.active().unwrap();
        assert_eq!(run.workout_id, 2);
        assert!(run.visited().is_empty());
    }

    #[test]
    fn visited_keeps_first_visit_order_without_duplicates() {
        let mut ctx = SessionContext::default();
        ctx.begin(1);
        ctx.mark_visited(7);
        ctx.mark_visited(3);
        ctx.mark_visited(7);
        assert_eq!(ctx.active().unwrap().visited(), &[7, 3]);
    }
}
