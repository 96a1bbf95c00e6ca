use crate::db;
use crate::session::context::{ExerciseConfig, SessionContext};
use anyhow::Result;
use sqlx::SqlitePool;
use tokio::sync::Mutex;

/// Handle over the store and the ephemeral engine state. One of these
/// lives for the duration of the process; the presentation layer calls
/// its methods and renders whatever comes back.
pub struct Session {
    pub db_pool: SqlitePool,
    pub(crate) context: Mutex<SessionContext>,
}

impl Session {
    pub async fn new(db_path: &str) -> Result<Self> {
        let pool = db::connect(db_path).await?;
        Ok(Self {
            db_pool: pool,
            context: Mutex::new(SessionContext::default()),
        })
    }

    /// Wraps an existing pool, running migrations if needed.
    pub async fn with_pool(pool: SqlitePool) -> Result<Self> {
        db::init_database(&pool).await?;
        Ok(Self {
            db_pool: pool,
            context: Mutex::new(SessionContext::default()),
        })
    }

    pub async fn in_memory() -> Result<Self> {
        let pool = db::connect_in_memory().await?;
        Ok(Self {
            db_pool: pool,
            context: Mutex::new(SessionContext::default()),
        })
    }

    pub async fn active_session_id(&self) -> Option<String> {
        self.context
            .lock()
            .await
            .active()
            .map(|run| run.session_id.clone())
    }

    pub async fn exercise_config(&self, exercise_id: i64) -> ExerciseConfig {
        self.context.lock().await.config(exercise_id)
    }

    pub async fn set_exercise_config(
        &self,
        exercise_id: i64,
        config: ExerciseConfig,
    ) -> Result<()> {
        if config.set_count < 1 {
            return Err(anyhow::anyhow!("Set count must be at least 1"));
        }
        self.context.lock().await.set_config(exercise_id, config);
        Ok(())
    }
}

/// Rejects blank user-supplied names before anything reaches the store.
pub(crate) fn validate_name(name: &str) -> Result<&str> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(anyhow::anyhow!("Name must not be empty"));
    }
    Ok(trimmed)
}
