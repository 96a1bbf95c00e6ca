//! End-to-end engine flows: begin a run, save visits, detect PBs, finish
//! with a report, and rebuild history.

use ironlog::db::models::{SetEntry, format_best};
use ironlog::session::{ExerciseConfig, Session};

fn entry(slot: i64, reps: i64, weight: f64) -> SetEntry {
    SetEntry { slot, reps, weight }
}

async fn session_with_exercise() -> (Session, i64, i64) {
    let session = Session::in_memory().await.unwrap();
    let workout = session.create_workout("Push").await.unwrap();
    let exercise = session
        .add_exercise(workout.id, "Bench Press", ExerciseConfig::default())
        .await
        .unwrap();
    (session, workout.id, exercise.id)
}

#[tokio::test]
async fn first_visit_is_a_first_time_record() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    let outcome = session
        .save_exercise_sets(
            exercise_id,
            &[entry(0, 10, 20.0), entry(1, 8, 50.0), entry(2, 8, 50.0)],
        )
        .await
        .unwrap();
    assert_eq!(outcome.saved, 3);
    assert!(outcome.new_pb);

    let report = session.finish_workout().await.unwrap();
    assert_eq!(report.exercises_completed, 1);
    assert_eq!(report.pb_count, 1);
    assert_eq!(report.pb_exercises, vec!["Bench Press".to_string()]);
}

#[tokio::test]
async fn weaker_follow_up_session_is_not_a_record() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(1, 8, 60.0)])
        .await
        .unwrap();
    session.finish_workout().await.unwrap();

    session.begin_workout(workout_id).await.unwrap();
    let outcome = session
        .save_exercise_sets(exercise_id, &[entry(1, 12, 55.0)])
        .await
        .unwrap();
    assert!(!outcome.new_pb);

    let report = session.finish_workout().await.unwrap();
    assert_eq!(report.pb_count, 0);
    assert!(report.pb_exercises.is_empty());
}

#[tokio::test]
async fn extra_rep_at_equal_weight_is_a_record() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(1, 5, 50.0)])
        .await
        .unwrap();
    session.finish_workout().await.unwrap();

    session.begin_workout(workout_id).await.unwrap();
    let outcome = session
        .save_exercise_sets(exercise_id, &[entry(1, 5, 50.0), entry(2, 6, 50.0)])
        .await
        .unwrap();
    assert!(outcome.new_pb);
}

#[tokio::test]
async fn heavy_warmup_sets_no_records_and_no_best() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(0, 5, 100.0), entry(1, 8, 50.0)])
        .await
        .unwrap();
    session.finish_workout().await.unwrap();

    let best = session.personal_best(exercise_id).await.unwrap().unwrap();
    assert_eq!(best.weight, 50.0);

    // Beating only the warm-up is still a record against the 50kg best.
    session.begin_workout(workout_id).await.unwrap();
    let outcome = session
        .save_exercise_sets(exercise_id, &[entry(1, 8, 60.0)])
        .await
        .unwrap();
    assert!(outcome.new_pb);
}

#[tokio::test]
async fn finishing_an_empty_run_reports_zero_pbs() {
    let (session, workout_id, _) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    let report = session.finish_workout().await.unwrap();
    assert_eq!(report.exercises_completed, 0);
    assert_eq!(report.pb_count, 0);

    assert!(session.finish_workout().await.is_err());
}

#[tokio::test]
async fn resaving_a_visit_recomputes_against_history_only() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(1, 8, 60.0)])
        .await
        .unwrap();

    // Correcting the visit downward: the 60kg row from this same session
    // is replaced, not treated as history to beat.
    let outcome = session
        .save_exercise_sets(exercise_id, &[entry(1, 8, 40.0)])
        .await
        .unwrap();
    assert!(outcome.new_pb);

    let report = session.finish_workout().await.unwrap();
    assert_eq!(report.pb_count, 1);
}

#[tokio::test]
async fn saves_require_an_active_run() {
    let (session, _, exercise_id) = session_with_exercise().await;
    let err = session
        .save_exercise_sets(exercise_id, &[entry(1, 8, 50.0)])
        .await
        .unwrap_err();
    assert!(err.to_string().contains("No active workout"));
}

#[tokio::test]
async fn invalid_input_is_rejected_before_any_write() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    assert!(session.create_workout("   ").await.is_err());
    assert!(
        session
            .add_exercise(
                workout_id,
                "Curls",
                ExerciseConfig {
                    set_count: 0,
                    has_warmup: false
                }
            )
            .await
            .is_err()
    );

    session.begin_workout(workout_id).await.unwrap();
    let session_id = session.active_session_id().await.unwrap();

    assert!(
        session
            .save_exercise_sets(exercise_id, &[entry(1, -3, 50.0)])
            .await
            .is_err()
    );
    assert!(
        session
            .save_exercise_sets(exercise_id, &[entry(1, 8, 50.0), entry(1, 9, 55.0)])
            .await
            .is_err()
    );

    // Nothing was written by the rejected saves.
    let rows = ironlog::db::operations::get_sets_for_session(&session.db_pool, &session_id)
        .await
        .unwrap();
    assert!(rows.is_empty());
}

#[tokio::test]
async fn overview_prefills_latest_values_and_note() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(0, 10, 20.0), entry(1, 8, 50.0)])
        .await
        .unwrap();
    session.save_note(exercise_id, "slow negatives").await.unwrap();
    session.finish_workout().await.unwrap();

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(1, 9, 52.5)])
        .await
        .unwrap();
    session.finish_workout().await.unwrap();

    let overview = session.exercise_overview(exercise_id).await.unwrap();
    let slots: Vec<(i64, f64)> = overview
        .recent_sets
        .iter()
        .map(|r| (r.slot, r.weight))
        .collect();
    // Slot 1 comes from the newer session, slot 0 from the older one.
    assert_eq!(slots, vec![(0, 20.0), (1, 52.5)]);
    assert_eq!(overview.latest_note.as_deref(), Some("slow negatives"));
    assert_eq!(overview.best_ever.unwrap().weight, 52.5);
}

#[tokio::test]
async fn absent_best_renders_as_placeholder() {
    let (session, _, exercise_id) = session_with_exercise().await;
    let best = session.personal_best(exercise_id).await.unwrap();
    assert_eq!(format_best(best.as_ref()), "—");
}

#[tokio::test]
async fn history_orders_sessions_and_tracks_surpassed_records() {
    let (session, workout_id, exercise_id) = session_with_exercise().await;

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(1, 8, 50.0)])
        .await
        .unwrap();
    let first_session = session.active_session_id().await.unwrap();
    session.finish_workout().await.unwrap();

    session.begin_workout(workout_id).await.unwrap();
    session
        .save_exercise_sets(exercise_id, &[entry(0, 10, 20.0), entry(1, 8, 60.0)])
        .await
        .unwrap();
    let second_session = session.active_session_id().await.unwrap();
    session.finish_workout().await.unwrap();

    let history = session.session_history().await.unwrap();
    assert_eq!(history.len(), 2);
    assert_eq!(history[0].session_id, second_session);
    assert_eq!(history[1].session_id, first_session);
    assert_eq!(history[0].label, "Today");
    assert_eq!(history[0].workout_name, "Push");

    // The newer 60kg session holds the record; the older 50kg one was
    // surpassed and no longer reads as a PB.
    assert_eq!(history[0].pb_count, 1);
    assert_eq!(history[1].pb_count, 0);

    let breakdown = &history[0].exercises[0];
    assert_eq!(breakdown.exercise_name, "Bench Press");
    assert!(breakdown.new_pb);
    assert!(breakdown.sets[0].warmup);
    assert!(!breakdown.sets[1].warmup);
}
