//! Session reconstruction from the unordered set stream, plus date
//! labeling for history display.

use chrono::{DateTime, Utc};
use chrono_tz::Tz;
use std::collections::HashMap;

use crate::db::models::SetRow;

/// Calendar dates for history labels are bucketed in this zone, not the
/// viewer's local one.
pub const DISPLAY_TZ: Tz = chrono_tz::Europe::London;

/// All rows of one training session, partitioned per exercise with slot
/// duplicates already collapsed.
#[derive(Debug, Clone)]
pub struct SessionGroup {
    pub session_id: String,
    pub workout_id: i64,
    pub started_at: DateTime<Utc>,
    /// `(exercise_id, rows)` in first-logged order; rows sorted by slot.
    pub sets_by_exercise: Vec<(i64, Vec<SetRow>)>,
}

/// Collapses duplicate `(exercise, slot)` rows to the most recent by
/// creation time, returning rows sorted by slot. The save path's
/// delete-then-reinsert should make duplicates impossible, but readers
/// tolerate them anyway.
pub fn collapse_slots(rows: &[SetRow]) -> Vec<SetRow> {
    let mut by_slot: HashMap<i64, SetRow> = HashMap::new();
    for row in rows {
        match by_slot.get(&row.slot) {
            Some(existing) if (existing.created_at, existing.id) >= (row.created_at, row.id) => {}
            _ => {
                by_slot.insert(row.slot, row.clone());
            }
        }
    }
    let mut out: Vec<SetRow> = by_slot.into_values().collect();
    out.sort_by_key(|r| r.slot);
    out
}

/// Partitions an unordered stream of rows into session buckets keyed by
/// `session_id`, then by exercise within each bucket. Sessions come back
/// most recent first, ordered by their earliest row.
pub fn group_into_sessions(rows: &[SetRow]) -> Vec<SessionGroup> {
    let mut buckets: HashMap<String, Vec<SetRow>> = HashMap::new();
    for row in rows {
        buckets
            .entry(row.session_id.clone())
            .or_default()
            .push(row.clone());
    }

    let mut groups: Vec<SessionGroup> = Vec::with_capacity(buckets.len());
    for (session_id, mut bucket) in buckets {
        bucket.sort_by_key(|r| (r.created_at, r.id));
        let started_at = bucket[0].created_at;
        let workout_id = bucket[0].workout_id;

        let mut exercise_order: Vec<i64> = Vec::new();
        let mut by_exercise: HashMap<i64, Vec<SetRow>> = HashMap::new();
        for row in bucket {
            if !exercise_order.contains(&row.exercise_id) {
                exercise_order.push(row.exercise_id);
            }
            by_exercise.entry(row.exercise_id).or_default().push(row);
        }

        let sets_by_exercise = exercise_order
            .into_iter()
            .map(|exercise_id| {
                let collapsed = collapse_slots(&by_exercise[&exercise_id]);
                (exercise_id, collapsed)
            })
            .collect();

        groups.push(SessionGroup {
            session_id,
            workout_id,
            started_at,
            sets_by_exercise,
        });
    }

    groups.sort_by(|a, b| {
        b.started_at
            .cmp(&a.started_at)
            .then_with(|| b.session_id.cmp(&a.session_id))
    });
    groups
}

/// Maps a timestamp to "Today", "Yesterday", or a `DD Mon YYYY` string.
/// Both timestamps are converted into [`DISPLAY_TZ`] before comparing
/// calendar dates, so labels stay correct across midnight and DST
/// boundaries where naive offset arithmetic drifts a day.
pub fn session_date_label(ts: DateTime<Utc>, now: DateTime<Utc>) -> String {
    let date = ts.with_timezone(&DISPLAY_TZ).date_naive();
    let today = now.with_timezone(&DISPLAY_TZ).date_naive();

    if date == today {
        "Today".to_string()
    } else if today.pred_opt() == Some(date) {
        "Yesterday".to_string()
    } else {
        ts.with_timezone(&DISPLAY_TZ).format("%d %b %Y").to_string()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn at(secs: i64) -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2026, 5, 2, 10, 0, 0).unwrap() + chrono::Duration::seconds(secs)
    }

    fn row(id: i64, session: &str, exercise_id: i64, slot: i64, secs: i64) -> SetRow {
        SetRow {
            id,
            exercise_id,
            workout_id: 1,
            session_id: session.to_string(),
            slot,
            reps: 8,
            weight: 40.0,
            created_at: at(secs),
        }
    }

    #[test]
    fn collapse_keeps_latest_row_per_slot() {
        let rows = vec![
            row(1, "s-1", 1, 1, 0),
            row(2, "s-1", 1, 1, 30),
            row(3, "s-1", 1, 2, 10),
        ];
        let collapsed = collapse_slots(&rows);
        assert_eq!(collapsed.len(), 2);
        assert_eq!(collapsed[0].id, 2);
        assert_eq!(collapsed[1].id, 3);
    }

    #[test]
    fn collapse_sorts_by_slot() {
        let rows = vec![row(1, "s-1", 1, 3, 0), row(2, "s-1", 1, 0, 5)];
        let slots: Vec<i64> = collapse_slots(&rows).iter().map(|r| r.slot).collect();
        assert_eq!(slots, vec![0, 3]);
    }

    #[test]
    fn sessions_come_back_most_recent_first() {
        let rows = vec![
            row(1, "older", 1, 1, 0),
            row(2, "newer", 1, 1, 3600),
            row(3, "older", 2, 1, 60),
        ];
        let groups = group_into_sessions(&rows);
        assert_eq!(groups.len(), 2);
        assert_eq!(groups[0].session_id, "newer");
        assert_eq!(groups[1].session_id, "older");
        assert_eq!(groups[1].started_at, at(0));
    }

    #[test]
    fn exercises_keep_first_logged_order() {
        let rows = vec![
            row(1, "s-1", 9, 1, 0),
            row(2, "s-1", 4, 1, 10),
            row(3, "s-1", 9, 2, 20),
        ];
        let groups = group_into_sessions(&rows);
        let ids: Vec<i64> = groups[0]
            .sets_by_exercise
            .iter()
            .map(|(id, _)| *id)
            .collect();
        assert_eq!(ids, vec![9, 4]);
    }

    #[test]
    fn label_today_yesterday_and_older() {
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap();
        let today = Utc.with_ymd_and_hms(2026, 1, 15, 9, 30, 0).unwrap();
        let yesterday = Utc.with_ymd_and_hms(2026, 1, 14, 12, 0, 0).unwrap();
        let older = Utc.with_ymd_and_hms(2025, 12, 31, 12, 0, 0).unwrap();

        assert_eq!(session_date_label(today, now), "Today");
        assert_eq!(session_date_label(yesterday, now), "Yesterday");
        assert_eq!(session_date_label(older, now), "31 Dec 2025");
    }

    #[test]
    fn midnight_in_display_zone_is_still_today() {
        // Exactly midnight in London (GMT in January); a UTC-date reading
        // would agree here, but the label must come from the zone-aware
        // date either way.
        let now = Utc.with_ymd_and_hms(2026, 1, 15, 18, 0, 0).unwrap();
        let midnight = Utc.with_ymd_and_hms(2026, 1, 15, 0, 0, 0).unwrap();
        assert_eq!(session_date_label(midnight, now), "Today");
    }

    #[test]
    fn bst_evening_utc_rolls_into_the_next_london_day() {
        // 23:30 UTC on 29 Mar 2026 is 00:30 BST on 30 Mar in London. With
        // the viewer checking later on the 30th, the label is "Today";
        // bucketing by the raw UTC date would have said "Yesterday".
        let ts = Utc.with_ymd_and_hms(2026, 3, 29, 23, 30, 0).unwrap();
        let now = Utc.with_ymd_and_hms(2026, 3, 30, 10, 0, 0).unwrap();
        assert_eq!(session_date_label(ts, now), "Today");
    }
}
