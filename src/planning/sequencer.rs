//! Session ordering.

use crate::models::{Cycle, Session};

/// Sorts sessions chronologically and renumbers them.
///
/// Sessions are ordered by ascending date; sessions on the same date keep
/// the order of their current numbers. Numbers are reassigned densely from
/// 1, and only the last session is flagged evaluation-due. Calling it on
/// its own output changes nothing.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::{Session, Slot};
/// use gradebook_engine::planning::normalize;
/// use chrono::{NaiveDate, NaiveTime};
///
/// let at = |d| Slot::new(
///     NaiveDate::from_ymd_opt(2025, 9, d).unwrap(),
///     NaiveTime::from_hms_opt(8, 0, 0).unwrap(),
/// );
/// let sessions = vec![
///     Session::new("b", "cy1", 1, at(15), ""),
///     Session::new("a", "cy1", 2, at(8), ""),
/// ];
///
/// let sorted = normalize(sessions);
/// assert_eq!(sorted[0].id, "a");
/// assert_eq!(sorted[0].number, 1);
/// assert!(sorted[1].evaluation_due);
/// ```
pub fn normalize(mut sessions: Vec<Session>) -> Vec<Session> {
    sessions.sort_by(|a, b| a.date.cmp(&b.date).then(a.number.cmp(&b.number)));

    let last = sessions.len().saturating_sub(1);
    for (index, session) in sessions.iter_mut().enumerate() {
        session.number = index as u32 + 1;
        session.evaluation_due = index == last;
    }
    sessions
}

/// Normalizes a cycle's sessions in place.
pub fn normalize_cycle(cycle: &mut Cycle) {
    cycle.sessions = normalize(std::mem::take(&mut cycle.sessions));
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::Slot;
    use chrono::{Days, NaiveDate, NaiveTime};
    use proptest::prelude::*;

    fn session(id: &str, number: u32, day: u32) -> Session {
        let date = NaiveDate::from_ymd_opt(2025, 9, day).unwrap();
        let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
        Session::new(id, "cy1", number, Slot::new(date, time), "")
    }

    #[test]
    fn test_empty_list_stays_empty() {
        assert!(normalize(Vec::new()).is_empty());
    }

    #[test]
    fn test_single_session_is_evaluation_due() {
        let sorted = normalize(vec![session("a", 7, 1)]);
        assert_eq!(sorted[0].number, 1);
        assert!(sorted[0].evaluation_due);
    }

    #[test]
    fn test_same_date_ties_keep_number_order() {
        let sorted = normalize(vec![
            session("second", 2, 8),
            session("first", 1, 8),
            session("zero", 5, 1),
        ]);
        let ids: Vec<&str> = sorted.iter().map(|s| s.id.as_str()).collect();
        assert_eq!(ids, vec!["zero", "first", "second"]);
    }

    #[test]
    fn test_stale_evaluation_flag_is_cleared() {
        let mut early = session("a", 1, 1);
        early.evaluation_due = true;
        let sorted = normalize(vec![early, session("b", 2, 8)]);

        assert!(!sorted[0].evaluation_due);
        assert!(sorted[1].evaluation_due);
    }

    fn sessions_strategy() -> impl Strategy<Value = Vec<Session>> {
        proptest::collection::vec((0u64..120, 0u32..20), 0..25).prop_map(|raw| {
            let base = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap();
            let time = NaiveTime::from_hms_opt(8, 0, 0).unwrap();
            raw.into_iter()
                .enumerate()
                .map(|(i, (offset, number))| {
                    let date = base.checked_add_days(Days::new(offset)).unwrap();
                    Session::new(format!("s{}", i), "cy1", number, Slot::new(date, time), "")
                })
                .collect()
        })
    }

    proptest! {
        #[test]
        fn prop_normalize_is_idempotent(sessions in sessions_strategy()) {
            let once = normalize(sessions);
            let twice = normalize(once.clone());
            prop_assert_eq!(once, twice);
        }

        #[test]
        fn prop_numbers_dense_and_dates_ascending(sessions in sessions_strategy()) {
            let sorted = normalize(sessions);
            for (index, session) in sorted.iter().enumerate() {
                prop_assert_eq!(session.number as usize, index + 1);
            }
            for pair in sorted.windows(2) {
                prop_assert!(pair[0].date <= pair[1].date);
            }
            let flagged = sorted.iter().filter(|s| s.evaluation_due).count();
            prop_assert_eq!(flagged, usize::from(!sorted.is_empty()));
        }
    }
}
