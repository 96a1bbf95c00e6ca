//! Best-set selection and personal-best detection.
//!
//! All functions here are pure: they take rows already fetched from the
//! store and compute derived facts. Warm-up rows (slot 0 with warm-up
//! enabled) never participate; callers filter through [`working_sets`]
//! before comparing.

use crate::db::models::{BestSet, SetRow};
use crate::session::context::ExerciseConfig;

/// A set is a warm-up iff it sits in slot 0 and the owning exercise has
/// warm-up enabled. Warm-ups are persisted and displayed but excluded
/// from every best-set and PB computation.
pub fn is_warmup(slot: i64, config: &ExerciseConfig) -> bool {
    slot == 0 && config.has_warmup
}

/// Filters a collection down to the sets that count: everything that is
/// not a warm-up under the given configuration.
pub fn working_sets(sets: &[SetRow], config: &ExerciseConfig) -> Vec<SetRow> {
    sets.iter()
        .filter(|s| !is_warmup(s.slot, config))
        .cloned()
        .collect()
}

fn beats(weight: f64, reps: i64, best: &BestSet) -> bool {
    weight > best.weight || (weight == best.weight && reps > best.reps)
}

/// The single best set of a collection: highest weight, ties broken by
/// higher reps. Beyond weight and reps the first occurrence wins, so the
/// result is deterministic for any input order. Empty input means there
/// is no best, which is distinct from a zero-value one.
pub fn best_set(sets: &[SetRow]) -> Option<BestSet> {
    let mut best: Option<BestSet> = None;
    for set in sets {
        match best {
            Some(ref b) if !beats(set.weight, set.reps, b) => {}
            _ => {
                best = Some(BestSet {
                    weight: set.weight,
                    reps: set.reps,
                })
            }
        }
    }
    best
}

/// Whether the sets just logged for one exercise contain a new personal
/// best against that exercise's history (all other sessions, warm-ups
/// already excluded on both sides).
///
/// An empty history makes any non-empty current visit a first-time
/// record. Otherwise a single current set beating the best historical
/// set is enough, strictly on weight or on reps at equal weight. The
/// comparison is always against the one best historical set, never
/// slot by slot.
pub fn is_new_personal_best(current: &[SetRow], history: &[SetRow]) -> bool {
    if current.is_empty() {
        return false;
    }
    match best_set(history) {
        None => true,
        Some(prev) => current.iter().any(|s| beats(s.weight, s.reps, &prev)),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn row(slot: i64, reps: i64, weight: f64) -> SetRow {
        SetRow {
            id: slot + 1,
            exercise_id: 1,
            workout_id: 1,
            session_id: "s-1".to_string(),
            slot,
            reps,
            weight,
            created_at: Utc.with_ymd_and_hms(2026, 5, 2, 10, 0, 0).unwrap(),
        }
    }

    fn warmup_config() -> ExerciseConfig {
        ExerciseConfig {
            set_count: 3,
            has_warmup: true,
        }
    }

    #[test]
    fn best_of_empty_is_none() {
        assert_eq!(best_set(&[]), None);
    }

    #[test]
    fn best_prefers_weight_then_reps() {
        let sets = vec![row(1, 10, 60.0), row(2, 4, 80.0), row(3, 6, 80.0)];
        let best = best_set(&sets).unwrap();
        assert_eq!(best.weight, 80.0);
        assert_eq!(best.reps, 6);
    }

    #[test]
    fn equal_weight_and_reps_keeps_first_occurrence() {
        let mut first = row(1, 8, 40.0);
        first.id = 100;
        let mut second = row(2, 8, 40.0);
        second.id = 200;
        let best = best_set(&[first, second]).unwrap();
        // The winner carries the first row's values; identical by design,
        // but the fold must not have replaced it.
        assert_eq!(best, BestSet { weight: 40.0, reps: 8 });
        let sets = vec![row(1, 8, 40.0), row(2, 9, 40.0)];
        assert_eq!(best_set(&sets).unwrap().reps, 9);
    }

    #[test]
    fn warmup_excluded_even_when_heaviest() {
        let config = warmup_config();
        let sets = vec![row(0, 5, 120.0), row(1, 8, 60.0), row(2, 7, 62.5)];
        let working = working_sets(&sets, &config);
        assert_eq!(working.len(), 2);
        let best = best_set(&working).unwrap();
        assert_eq!(best.weight, 62.5);
    }

    #[test]
    fn slot_zero_counts_when_warmup_disabled() {
        let config = ExerciseConfig {
            set_count: 3,
            has_warmup: false,
        };
        let sets = vec![row(0, 5, 120.0), row(1, 8, 60.0)];
        let working = working_sets(&sets, &config);
        assert_eq!(working.len(), 2);
        assert_eq!(best_set(&working).unwrap().weight, 120.0);
    }

    #[test]
    fn empty_history_means_first_time_record() {
        assert!(is_new_personal_best(&[row(1, 5, 50.0)], &[]));
    }

    #[test]
    fn empty_current_is_never_a_record() {
        assert!(!is_new_personal_best(&[], &[]));
        assert!(!is_new_personal_best(&[], &[row(1, 5, 50.0)]));
    }

    #[test]
    fn reps_tiebreak_beats_equal_weight_history() {
        // history 50x5; current 50x5 and 50x6: the second set wins on reps.
        let history = vec![row(1, 5, 50.0)];
        let current = vec![row(1, 5, 50.0), row(2, 6, 50.0)];
        assert!(is_new_personal_best(&current, &history));
    }

    #[test]
    fn volume_never_beats_weight() {
        // 90x10 moves more total weight than 100x3 but is not a PB.
        let history = vec![row(1, 3, 100.0)];
        let current = vec![row(1, 10, 90.0)];
        assert!(!is_new_personal_best(&current, &history));
    }

    #[test]
    fn matching_the_best_is_not_a_record() {
        let history = vec![row(1, 5, 50.0)];
        let current = vec![row(1, 5, 50.0), row(2, 4, 50.0), row(3, 8, 45.0)];
        assert!(!is_new_personal_best(&current, &history));
    }

    #[test]
    fn comparison_is_against_single_best_not_per_slot() {
        // Slot 2 of history is weak; beating it alone is not enough while
        // slot 1 still holds the overall best.
        let history = vec![row(1, 5, 100.0), row(2, 5, 60.0)];
        let current = vec![row(1, 5, 70.0), row(2, 5, 70.0)];
        assert!(!is_new_personal_best(&current, &history));
    }

    #[test]
    fn spec_slot_scenario() {
        // Warm-up enabled, slots [0,1,2,3], weights [20,40,40,35], reps
        // [10,8,8,6]: the best working set is 40x8, first of the tie.
        let config = warmup_config();
        let sets = vec![
            row(0, 10, 20.0),
            row(1, 8, 40.0),
            row(2, 8, 40.0),
            row(3, 6, 35.0),
        ];
        let best = best_set(&working_sets(&sets, &config)).unwrap();
        assert_eq!(best, BestSet { weight: 40.0, reps: 8 });
    }
}
