//! Absence-driven rescheduling and its reversal.
//!
//! Sessions falling inside an approved absence are moved, one by one in
//! chronological order, to the next free slot of the class's weekly pattern
//! strictly after their current date. Every move is recorded in the
//! session's provenance chain, which is what [`reverse`] undoes.

use std::collections::HashSet;
use std::fmt;

use chrono::NaiveDate;
use serde::Serialize;
use tracing::{debug, warn};

use super::sequencer::normalize_cycle;
use super::slots::{DEFAULT_HORIZON_WEEKS, SlotGenerator};
use crate::error::EngineResult;
use crate::models::{Cycle, DateWindow, Session, Slot, TeacherAbsence, WeeklySlot};

/// Why a session could not be moved.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum UnplacedReason {
    /// The class has no weekly slot to draw candidates from.
    NoWeeklySchedule,
    /// Every candidate within the search horizon was blocked or occupied.
    HorizonExhausted,
}

impl fmt::Display for UnplacedReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            UnplacedReason::NoWeeklySchedule => write!(f, "no weekly schedule"),
            UnplacedReason::HorizonExhausted => write!(f, "search horizon exhausted"),
        }
    }
}

/// Picks the slot an impacted session moves to.
pub trait RescheduleStrategy {
    /// Returns the first acceptable slot strictly after `after`.
    ///
    /// A slot is acceptable when its date is outside every `blocked` window
    /// and it is not in `occupied`.
    fn next_slot(
        &self,
        after: NaiveDate,
        patterns: &[WeeklySlot],
        blocked: &[DateWindow],
        occupied: &HashSet<Slot>,
    ) -> Result<Slot, UnplacedReason>;
}

/// Walks the class's weekly slots from the day after the session and takes
/// the first free one.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NextFreeSlot {
    /// How many calendar weeks to search before giving up.
    pub horizon_weeks: u32,
}

impl Default for NextFreeSlot {
    fn default() -> Self {
        Self {
            horizon_weeks: DEFAULT_HORIZON_WEEKS,
        }
    }
}

impl RescheduleStrategy for NextFreeSlot {
    fn next_slot(
        &self,
        after: NaiveDate,
        patterns: &[WeeklySlot],
        blocked: &[DateWindow],
        occupied: &HashSet<Slot>,
    ) -> Result<Slot, UnplacedReason> {
        if patterns.is_empty() {
            return Err(UnplacedReason::NoWeeklySchedule);
        }
        let start = after.succ_opt().ok_or(UnplacedReason::HorizonExhausted)?;

        SlotGenerator::new(start, patterns)
            .with_horizon(self.horizon_weeks)
            .find(|slot| {
                !occupied.contains(slot) && !blocked.iter().any(|w| w.contains(slot.date))
            })
            .ok_or(UnplacedReason::HorizonExhausted)
    }
}

/// One session moved by a reschedule pass.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct MovedSession {
    /// The moved session.
    pub session_id: String,
    /// Slot before the move.
    pub from: Slot,
    /// Slot after the move.
    pub to: Slot,
}

/// One impacted session left in place.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UnplacedSession {
    /// The session that stayed.
    pub session_id: String,
    /// Its unchanged date.
    pub date: NaiveDate,
    /// Why no slot was found.
    pub reason: UnplacedReason,
}

/// Result of rescheduling one cycle against one absence.
#[derive(Debug, Clone)]
pub struct RescheduleOutcome {
    /// The cycle after the pass, normalized.
    pub cycle: Cycle,
    /// Number of sessions that moved.
    pub moved_count: usize,
    /// Every move, in chronological order of the original dates.
    pub moves: Vec<MovedSession>,
    /// Impacted sessions that could not be moved.
    pub unplaced: Vec<UnplacedSession>,
}

impl RescheduleOutcome {
    /// Returns true when the pass changed the cycle's dates.
    pub fn changed(&self) -> bool {
        self.moved_count > 0
    }
}

/// Reschedules cycles with a strategy and a set of extra blocked windows.
///
/// The absence being processed is always blocked. Extra windows cover the
/// other approved absences, so a session is never moved into one of them.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::DateWindow;
/// use gradebook_engine::planning::Rescheduler;
/// use chrono::NaiveDate;
///
/// let holiday = DateWindow::new(
///     NaiveDate::from_ymd_opt(2025, 11, 6).unwrap(),
///     NaiveDate::from_ymd_opt(2025, 11, 6).unwrap(),
/// ).unwrap();
/// let rescheduler = Rescheduler::new().with_horizon(104).block(holiday);
/// assert_eq!(rescheduler.blocked().len(), 1);
/// ```
#[derive(Debug, Clone, Default)]
pub struct Rescheduler<S = NextFreeSlot> {
    strategy: S,
    blocked: Vec<DateWindow>,
}

impl Rescheduler<NextFreeSlot> {
    /// Creates a rescheduler using [`NextFreeSlot`] with the default horizon.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets the search horizon in weeks.
    pub fn with_horizon(mut self, weeks: u32) -> Self {
        self.strategy.horizon_weeks = weeks;
        self
    }
}

impl<S: RescheduleStrategy> Rescheduler<S> {
    /// Creates a rescheduler with a custom strategy.
    pub fn with_strategy(strategy: S) -> Self {
        Self {
            strategy,
            blocked: Vec::new(),
        }
    }

    /// Adds a window no session may be moved into.
    pub fn block(mut self, window: DateWindow) -> Self {
        self.blocked.push(window);
        self
    }

    /// Adds several blocked windows.
    pub fn block_all(mut self, windows: impl IntoIterator<Item = DateWindow>) -> Self {
        self.blocked.extend(windows);
        self
    }

    /// The extra blocked windows.
    pub fn blocked(&self) -> &[DateWindow] {
        &self.blocked
    }

    /// Moves every session of `cycle` impacted by `absence`.
    ///
    /// A session is impacted when its date lies in the absence window, it is
    /// not locked and this absence has not already moved it. Running the
    /// same absence twice therefore moves nothing the second time.
    ///
    /// Sessions that cannot be placed stay where they are and are listed in
    /// [`RescheduleOutcome::unplaced`]. An absence whose dates are inverted
    /// is an `InvalidDateRange` error.
    pub fn reschedule(
        &self,
        mut cycle: Cycle,
        absence: &TeacherAbsence,
        patterns: &[WeeklySlot],
    ) -> EngineResult<RescheduleOutcome> {
        let window = absence.window()?;
        normalize_cycle(&mut cycle);

        let impacted: Vec<usize> = cycle
            .sessions
            .iter()
            .enumerate()
            .filter(|(_, s)| window.contains(s.date) && !s.locked && !s.was_moved_by(&absence.id))
            .map(|(index, _)| index)
            .collect();

        if impacted.is_empty() {
            return Ok(RescheduleOutcome {
                cycle,
                moved_count: 0,
                moves: Vec::new(),
                unplaced: Vec::new(),
            });
        }

        // Home slots of moved sessions stay reserved so undoing their moves
        // never lands on a slot taken in the meantime.
        let mut occupied: HashSet<Slot> = cycle
            .sessions
            .iter()
            .enumerate()
            .filter(|(index, _)| !impacted.contains(index))
            .map(|(_, s)| s.slot())
            .chain(cycle.sessions.iter().filter_map(Session::home_slot))
            .collect();

        let mut blocked = Vec::with_capacity(self.blocked.len() + 1);
        blocked.push(window);
        blocked.extend(self.blocked.iter().copied());

        let mut moves = Vec::new();
        let mut unplaced = Vec::new();

        for index in impacted {
            let session = &mut cycle.sessions[index];
            match self
                .strategy
                .next_slot(session.date, patterns, &blocked, &occupied)
            {
                Ok(to) => {
                    let from = session.slot();
                    session.apply_move(&absence.id, to);
                    occupied.insert(to);
                    debug!(
                        cycle_id = %cycle.id,
                        session_id = %session.id,
                        from = %from.date,
                        to = %to.date,
                        "Session rescheduled"
                    );
                    moves.push(MovedSession {
                        session_id: session.id.clone(),
                        from,
                        to,
                    });
                }
                Err(reason) => {
                    warn!(
                        cycle_id = %cycle.id,
                        session_id = %session.id,
                        date = %session.date,
                        reason = %reason,
                        "Session could not be rescheduled"
                    );
                    unplaced.push(UnplacedSession {
                        session_id: session.id.clone(),
                        date: session.date,
                        reason,
                    });
                }
            }
        }

        normalize_cycle(&mut cycle);

        Ok(RescheduleOutcome {
            cycle,
            moved_count: moves.len(),
            moves,
            unplaced,
        })
    }
}

/// Reschedules a cycle with the default strategy and no extra blocked windows.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::{AbsenceDraft, AbsenceKind, Cycle, Level, Session, Slot,
///     TeacherAbsence, WeeklySlot};
/// use gradebook_engine::planning::{generate_slots, reschedule};
/// use chrono::{NaiveDate, NaiveTime, Utc, Weekday};
///
/// let day = |d| NaiveDate::from_ymd_opt(2025, 9, d).unwrap();
/// let patterns = vec![WeeklySlot::new(Weekday::Mon, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), 60)];
/// let sessions = generate_slots(day(1), 4, &patterns)
///     .into_iter()
///     .enumerate()
///     .map(|(i, slot)| Session::new(format!("s{}", i + 1), "cy1", i as u32 + 1, slot, ""))
///     .collect();
/// let cycle = Cycle {
///     id: "cy1".into(), class_id: "tc-a".into(), class_name: "TC A".into(),
///     level: Level::CommonCore, activity: "Athletisme".into(), module: 1, semester: 1,
///     planned_sessions: 4, sessions, status: Default::default(), updated_at: None,
/// };
/// let draft = AbsenceDraft { start_date: day(8), end_date: day(8), kind: AbsenceKind::Illness, reason: String::new() };
/// let absence = TeacherAbsence::from_draft("abs-1", draft, Utc::now()).unwrap();
///
/// let outcome = reschedule(cycle, &absence, &patterns).unwrap();
/// assert_eq!(outcome.moved_count, 1);
/// assert_eq!(outcome.moves[0].to.date, day(29));
/// ```
pub fn reschedule(
    cycle: Cycle,
    absence: &TeacherAbsence,
    patterns: &[WeeklySlot],
) -> EngineResult<RescheduleOutcome> {
    Rescheduler::new().reschedule(cycle, absence, patterns)
}

/// Undoes every move `absence_id` made in `cycle`, in place.
///
/// Returns the number of sessions whose provenance referenced the absence.
pub fn reverse_in_place(cycle: &mut Cycle, absence_id: &str) -> usize {
    let restored = cycle
        .sessions
        .iter_mut()
        .map(|session| session.revert_move(absence_id))
        .filter(|reverted| *reverted)
        .count();

    if restored > 0 {
        debug!(cycle_id = %cycle.id, absence_id, restored, "Reversed absence moves");
    }
    normalize_cycle(cycle);
    restored
}

/// Undoes every move `absence_id` made in `cycle`.
///
/// Running it again on the result changes nothing.
pub fn reverse(mut cycle: Cycle, absence_id: &str) -> Cycle {
    reverse_in_place(&mut cycle, absence_id);
    cycle
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::EngineError;
    use crate::models::{AbsenceDraft, AbsenceKind, CycleStatus, Level, Session};
    use crate::planning::generate_slots;
    use chrono::{Days, NaiveTime, Utc, Weekday};
    use proptest::prelude::*;

    fn date(m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, m, d).unwrap()
    }

    fn eight() -> NaiveTime {
        NaiveTime::from_hms_opt(8, 0, 0).unwrap()
    }

    fn mondays() -> Vec<WeeklySlot> {
        vec![WeeklySlot::new(Weekday::Mon, eight(), 60)]
    }

    fn create_test_cycle(start: NaiveDate, count: usize, patterns: &[WeeklySlot]) -> Cycle {
        let sessions = generate_slots(start, count, patterns)
            .into_iter()
            .enumerate()
            .map(|(i, slot)| {
                Session::new(format!("s{}", i + 1), "cy1", i as u32 + 1, slot, "Relais")
            })
            .collect();

        let mut cycle = Cycle {
            id: "cy1".to_string(),
            class_id: "class-tc-a".to_string(),
            class_name: "TC A".to_string(),
            level: Level::CommonCore,
            activity: "Athletisme".to_string(),
            module: 1,
            semester: 1,
            planned_sessions: count as u32,
            sessions,
            status: CycleStatus::Planned,
            updated_at: None,
        };
        normalize_cycle(&mut cycle);
        cycle
    }

    fn create_test_absence(id: &str, start: NaiveDate, end: NaiveDate) -> TeacherAbsence {
        let draft = AbsenceDraft {
            start_date: start,
            end_date: end,
            kind: AbsenceKind::Illness,
            reason: "grippe".to_string(),
        };
        TeacherAbsence::from_draft(id, draft, Utc::now()).unwrap()
    }

    fn dates(cycle: &Cycle) -> Vec<NaiveDate> {
        cycle.sessions.iter().map(|s| s.date).collect()
    }

    /// Four Mondays from 2025-09-01, absence on the 8th only.
    #[test]
    fn test_scenario_single_day_absence_moves_to_next_free_monday() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 8));

        let outcome = reschedule(cycle, &absence, &mondays()).unwrap();

        assert_eq!(outcome.moved_count, 1);
        assert!(outcome.unplaced.is_empty());
        assert_eq!(
            dates(&outcome.cycle),
            vec![date(9, 1), date(9, 15), date(9, 22), date(9, 29)]
        );
        let numbers: Vec<u32> = outcome.cycle.sessions.iter().map(|s| s.number).collect();
        assert_eq!(numbers, vec![1, 2, 3, 4]);

        let moved = outcome.cycle.session("s2").unwrap();
        assert_eq!(moved.absence_origin_id(), Some("abs-1"));
        assert_eq!(moved.original_date(), Some(date(9, 8)));
        assert!(moved.evaluation_due);
    }

    #[test]
    fn test_no_impacted_sessions_leaves_cycle_unchanged() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let absence = create_test_absence("abs-1", date(9, 9), date(9, 12));

        let outcome = reschedule(cycle.clone(), &absence, &mondays()).unwrap();

        assert_eq!(outcome.moved_count, 0);
        assert!(!outcome.changed());
        assert_eq!(outcome.cycle, cycle);
    }

    /// Approving the same absence twice.
    #[test]
    fn test_scenario_second_pass_moves_nothing() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 8));

        let first = reschedule(cycle, &absence, &mondays()).unwrap();
        let second = reschedule(first.cycle.clone(), &absence, &mondays()).unwrap();

        assert_eq!(second.moved_count, 0);
        assert_eq!(second.cycle, first.cycle);
    }

    #[test]
    fn test_locked_sessions_never_move() {
        let mut cycle = create_test_cycle(date(9, 1), 4, &mondays());
        cycle.sessions[1].lock();
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 8));

        let outcome = reschedule(cycle, &absence, &mondays()).unwrap();

        assert_eq!(outcome.moved_count, 0);
        assert_eq!(outcome.cycle.sessions[1].date, date(9, 8));
    }

    #[test]
    fn test_multi_week_absence_moves_sessions_past_the_window() {
        let cycle = create_test_cycle(date(9, 1), 5, &mondays());
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 21));

        let outcome = reschedule(cycle, &absence, &mondays()).unwrap();

        assert_eq!(outcome.moved_count, 2);
        assert_eq!(
            dates(&outcome.cycle),
            vec![date(9, 1), date(9, 22), date(9, 29), date(10, 6), date(10, 13)]
        );
        assert_eq!(outcome.moves[0].from.date, date(9, 8));
        assert_eq!(outcome.moves[0].to.date, date(10, 6));
        assert_eq!(outcome.moves[1].to.date, date(10, 13));
    }

    #[test]
    fn test_missing_schedule_reports_unplaced() {
        let cycle = create_test_cycle(date(9, 1), 3, &mondays());
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 8));

        let outcome = reschedule(cycle.clone(), &absence, &[]).unwrap();

        assert_eq!(outcome.moved_count, 0);
        assert_eq!(outcome.unplaced.len(), 1);
        assert_eq!(outcome.unplaced[0].session_id, "s2");
        assert_eq!(outcome.unplaced[0].reason, UnplacedReason::NoWeeklySchedule);
        assert_eq!(outcome.cycle, cycle);
    }

    #[test]
    fn test_exhausted_horizon_reports_unplaced() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 8));
        // Next three Mondays: two occupied, one blocked.
        let holiday = DateWindow::new(date(9, 29), date(9, 29)).unwrap();

        let outcome = Rescheduler::new()
            .with_horizon(3)
            .block(holiday)
            .reschedule(cycle, &absence, &mondays())
            .unwrap();

        assert_eq!(outcome.moved_count, 0);
        assert_eq!(outcome.unplaced[0].reason, UnplacedReason::HorizonExhausted);
    }

    #[test]
    fn test_extra_blocked_windows_are_skipped() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 8));
        let other = DateWindow::new(date(9, 29), date(10, 3)).unwrap();

        let outcome = Rescheduler::new()
            .block(other)
            .reschedule(cycle, &absence, &mondays())
            .unwrap();

        assert_eq!(outcome.moves[0].to.date, date(10, 6));
    }

    #[test]
    fn test_session_without_time_uses_default_slot_for_collisions() {
        let patterns = vec![WeeklySlot::new(Weekday::Mon, crate::models::DEFAULT_SLOT_TIME, 60)];
        let mut cycle = create_test_cycle(date(9, 1), 3, &patterns);
        for session in &mut cycle.sessions {
            session.time = None;
        }
        let absence = create_test_absence("abs-1", date(9, 1), date(9, 1));

        let outcome = reschedule(cycle, &absence, &patterns).unwrap();

        // 09-08 and 09-15 are taken at the default time.
        assert_eq!(outcome.moves[0].to.date, date(9, 22));
    }

    #[test]
    fn test_second_pattern_offers_an_earlier_slot() {
        let patterns = vec![
            WeeklySlot::new(Weekday::Mon, eight(), 60),
            WeeklySlot::new(Weekday::Thu, NaiveTime::from_hms_opt(14, 0, 0).unwrap(), 60),
        ];
        let cycle = create_test_cycle(date(9, 1), 4, &patterns);
        // Sessions: 09-01 Mon, 09-04 Thu, 09-08 Mon, 09-11 Thu.
        let absence = create_test_absence("abs-1", date(9, 4), date(9, 4));

        let outcome = reschedule(cycle, &absence, &patterns).unwrap();

        assert_eq!(outcome.moves[0].to.date, date(9, 15));
        assert_eq!(outcome.cycle.sessions.last().unwrap().id, "s2");
    }

    /// Deleting an approved absence restores the sessions.
    #[test]
    fn test_scenario_reverse_restores_original_dates() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let before = cycle.clone();
        let absence = create_test_absence("abs-1", date(9, 8), date(9, 15));

        let outcome = reschedule(cycle, &absence, &mondays()).unwrap();
        assert_eq!(outcome.moved_count, 2);

        let restored = reverse(outcome.cycle, "abs-1");
        assert_eq!(restored, before);
        assert!(restored.sessions.iter().all(|s| !s.is_rescheduled()));

        let again = reverse(restored.clone(), "abs-1");
        assert_eq!(again, restored);
    }

    #[test]
    fn test_reverse_only_touches_its_own_absence() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let first = create_test_absence("abs-1", date(9, 8), date(9, 8));
        let second = create_test_absence("abs-2", date(9, 15), date(9, 15));

        let cycle = reschedule(cycle, &first, &mondays()).unwrap().cycle;
        let mut cycle = reschedule(cycle, &second, &mondays()).unwrap().cycle;
        let restored = reverse_in_place(&mut cycle, "abs-1");

        assert_eq!(restored, 1);
        assert!(cycle.sessions.iter().any(|s| s.was_moved_by("abs-2")));
        assert!(!cycle.sessions.iter().any(|s| s.was_moved_by("abs-1")));
    }

    #[test]
    fn test_chained_moves_unwind_in_any_order() {
        let cycle = create_test_cycle(date(9, 1), 2, &mondays());
        let before = cycle.clone();
        let first = create_test_absence("abs-a", date(9, 8), date(9, 8));
        // s2 lands on 09-15, then a second absence covers that day.
        let second = create_test_absence("abs-b", date(9, 15), date(9, 15));

        let cycle = reschedule(cycle, &first, &mondays()).unwrap().cycle;
        let outcome = Rescheduler::new()
            .block(first.window().unwrap())
            .reschedule(cycle, &second, &mondays())
            .unwrap();
        assert_eq!(outcome.moved_count, 1);
        assert_eq!(outcome.cycle.session("s2").unwrap().date, date(9, 22));

        let cycle = reverse(outcome.cycle, "abs-a");
        assert_eq!(cycle.session("s2").unwrap().date, date(9, 22));
        let cycle = reverse(cycle, "abs-b");
        assert_eq!(cycle, before);
    }

    #[test]
    fn test_inverted_absence_is_an_error() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let mut absence = create_test_absence("abs-1", date(9, 8), date(9, 8));
        absence.end_date = date(9, 1);

        let result = reschedule(cycle, &absence, &mondays());
        assert!(matches!(result, Err(EngineError::InvalidDateRange { .. })));
    }

    #[test]
    fn test_home_slot_of_moved_session_stays_reserved() {
        let cycle = create_test_cycle(date(9, 1), 4, &mondays());
        let first = create_test_absence("abs-a", date(9, 8), date(9, 8));
        let second = create_test_absence("abs-b", date(9, 29), date(9, 29));
        let third = create_test_absence("abs-c", date(9, 1), date(9, 1));

        // s2: 09-08 -> 09-29 -> 10-06, then abs-a is withdrawn.
        let cycle = reschedule(cycle, &first, &mondays()).unwrap().cycle;
        let cycle = Rescheduler::new()
            .block(first.window().unwrap())
            .reschedule(cycle, &second, &mondays())
            .unwrap()
            .cycle;
        let cycle = reverse(cycle, "abs-a");
        assert_eq!(
            cycle.session("s2").unwrap().home_slot(),
            Some(Slot::new(date(9, 8), eight()))
        );

        // 09-08 is free on the calendar but s2 still returns there.
        let outcome = Rescheduler::new()
            .block(second.window().unwrap())
            .reschedule(cycle, &third, &mondays())
            .unwrap();
        assert_eq!(outcome.moves[0].to.date, date(10, 13));

        let cycle = reverse(outcome.cycle, "abs-b");
        let slots: HashSet<Slot> = cycle.sessions.iter().map(|s| s.slot()).collect();
        assert_eq!(slots.len(), 4);
    }

    fn window_strategy() -> impl Strategy<Value = (u64, u64, usize)> {
        (0u64..70, 0u64..21, 1usize..12)
    }

    proptest! {
        #[test]
        fn prop_no_collisions_and_window_cleared((offset, length, count) in window_strategy()) {
            let patterns = vec![
                WeeklySlot::new(Weekday::Mon, eight(), 60),
                WeeklySlot::new(Weekday::Wed, NaiveTime::from_hms_opt(10, 0, 0).unwrap(), 60),
            ];
            let cycle = create_test_cycle(date(9, 1), count, &patterns);
            let start = date(9, 1).checked_add_days(Days::new(offset)).unwrap();
            let end = start.checked_add_days(Days::new(length)).unwrap();
            let absence = create_test_absence("abs-p", start, end);

            let outcome = reschedule(cycle, &absence, &patterns).unwrap();

            let slots: HashSet<Slot> = outcome.cycle.sessions.iter().map(|s| s.slot()).collect();
            prop_assert_eq!(slots.len(), outcome.cycle.sessions.len());
            for session in &outcome.cycle.sessions {
                prop_assert!(!absence.window().unwrap().contains(session.date));
            }
            prop_assert_eq!(outcome.cycle.sessions.len(), count);
        }

        #[test]
        fn prop_reverse_undoes_reschedule((offset, length, count) in window_strategy()) {
            let cycle = create_test_cycle(date(9, 1), count, &mondays());
            let start = date(9, 1).checked_add_days(Days::new(offset)).unwrap();
            let end = start.checked_add_days(Days::new(length)).unwrap();
            let absence = create_test_absence("abs-p", start, end);

            let outcome = reschedule(cycle.clone(), &absence, &mondays()).unwrap();
            let second = reschedule(outcome.cycle.clone(), &absence, &mondays()).unwrap();
            prop_assert_eq!(second.moved_count, 0);

            let restored = reverse(outcome.cycle, &absence.id);
            prop_assert_eq!(&restored, &cycle);
            prop_assert_eq!(reverse(restored.clone(), &absence.id), restored);
        }
    }
}
