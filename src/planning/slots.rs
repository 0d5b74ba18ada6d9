//! Slot generation from weekly patterns.
//!
//! A [`SlotGenerator`] walks the calendar one week at a time. Each pattern
//! contributes one slot per week, starting from the first occurrence of its
//! weekday on or after the start date, so every week's slots fall within a
//! seven-day window and merging reduces to sorting one week at a time.

use std::collections::VecDeque;

use chrono::{Datelike, Days, NaiveDate, NaiveTime};

use crate::models::{Slot, WeeklySlot};

/// Number of calendar weeks a generator walks before giving up (about ten years).
pub const DEFAULT_HORIZON_WEEKS: u32 = 520;

/// Lazy, ordered sequence of slots produced by a set of weekly patterns.
///
/// Slots come out in ascending `(date, time)` order. The generator is a pure
/// function of its inputs: building a new one with the same start date and
/// patterns replays the same sequence.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::WeeklySlot;
/// use gradebook_engine::planning::SlotGenerator;
/// use chrono::{NaiveDate, NaiveTime, Weekday};
///
/// let patterns = vec![
///     WeeklySlot::new(Weekday::Thu, NaiveTime::from_hms_opt(10, 0, 0).unwrap(), 60),
///     WeeklySlot::new(Weekday::Mon, NaiveTime::from_hms_opt(8, 0, 0).unwrap(), 60),
/// ];
/// let start = NaiveDate::from_ymd_opt(2025, 9, 1).unwrap(); // a Monday
/// let dates: Vec<_> = SlotGenerator::new(start, &patterns)
///     .take(3)
///     .map(|slot| slot.date.to_string())
///     .collect();
///
/// assert_eq!(dates, ["2025-09-01", "2025-09-04", "2025-09-08"]);
/// ```
#[derive(Debug, Clone)]
pub struct SlotGenerator {
    firsts: Vec<(NaiveDate, NaiveTime)>,
    week: u32,
    horizon_weeks: u32,
    buffer: VecDeque<Slot>,
}

impl SlotGenerator {
    /// Creates a generator over `patterns` starting at `start` (inclusive).
    pub fn new(start: NaiveDate, patterns: &[WeeklySlot]) -> Self {
        let firsts = patterns
            .iter()
            .filter_map(|pattern| {
                let offset = (7 + pattern.weekday.num_days_from_monday()
                    - start.weekday().num_days_from_monday())
                    % 7;
                start
                    .checked_add_days(Days::new(u64::from(offset)))
                    .map(|date| (date, pattern.start))
            })
            .collect();

        Self {
            firsts,
            week: 0,
            horizon_weeks: DEFAULT_HORIZON_WEEKS,
            buffer: VecDeque::new(),
        }
    }

    /// Caps the walk at `weeks` calendar weeks.
    pub fn with_horizon(mut self, weeks: u32) -> Self {
        self.horizon_weeks = weeks;
        self
    }

    fn fill_next_week(&mut self) -> bool {
        while self.buffer.is_empty() {
            if self.firsts.is_empty() || self.week >= self.horizon_weeks {
                return false;
            }

            let shift = Days::new(u64::from(self.week) * 7);
            let mut week: Vec<Slot> = self
                .firsts
                .iter()
                .filter_map(|(first, time)| {
                    first
                        .checked_add_days(shift)
                        .map(|date| Slot::new(date, *time))
                })
                .collect();
            week.sort();
            week.dedup();

            self.week += 1;
            if week.is_empty() {
                // The calendar ran out.
                self.week = self.horizon_weeks;
                return false;
            }
            self.buffer.extend(week);
        }
        true
    }
}

impl Iterator for SlotGenerator {
    type Item = Slot;

    fn next(&mut self) -> Option<Slot> {
        if !self.fill_next_week() {
            return None;
        }
        self.buffer.pop_front()
    }
}

/// Returns the first `count` slots produced by `patterns` from `start` onwards.
///
/// The result is shorter than `count` only when there are no patterns or the
/// default horizon runs out.
///
/// # Arguments
///
/// * `start` - First date a slot may fall on
/// * `count` - Number of slots wanted
/// * `patterns` - The class's weekly slots
pub fn generate_slots(start: NaiveDate, count: usize, patterns: &[WeeklySlot]) -> Vec<Slot> {
    SlotGenerator::new(start, patterns).take(count).collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Weekday;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    fn time(h: u32, m: u32) -> NaiveTime {
        NaiveTime::from_hms_opt(h, m, 0).unwrap()
    }

    #[test]
    fn test_single_pattern_yields_weekly_slots() {
        let patterns = vec![WeeklySlot::new(Weekday::Mon, time(8, 0), 60)];
        let slots = generate_slots(date(2025, 9, 1), 4, &patterns);

        let dates: Vec<NaiveDate> = slots.iter().map(|s| s.date).collect();
        assert_eq!(
            dates,
            vec![
                date(2025, 9, 1),
                date(2025, 9, 8),
                date(2025, 9, 15),
                date(2025, 9, 22)
            ]
        );
        assert!(slots.iter().all(|s| s.time == time(8, 0)));
    }

    #[test]
    fn test_first_occurrence_is_on_or_after_start() {
        // 2025-09-03 is a Wednesday; the next Monday is the 8th.
        let patterns = vec![WeeklySlot::new(Weekday::Mon, time(8, 0), 60)];
        let slots = generate_slots(date(2025, 9, 3), 1, &patterns);
        assert_eq!(slots[0].date, date(2025, 9, 8));
    }

    #[test]
    fn test_patterns_merge_in_chronological_order() {
        let patterns = vec![
            WeeklySlot::new(Weekday::Fri, time(14, 0), 60),
            WeeklySlot::new(Weekday::Tue, time(10, 0), 60),
        ];
        // Start on a Wednesday: Friday comes before next Tuesday.
        let slots = generate_slots(date(2025, 9, 3), 4, &patterns);

        assert_eq!(
            slots,
            vec![
                Slot::new(date(2025, 9, 5), time(14, 0)),
                Slot::new(date(2025, 9, 9), time(10, 0)),
                Slot::new(date(2025, 9, 12), time(14, 0)),
                Slot::new(date(2025, 9, 16), time(10, 0)),
            ]
        );
    }

    #[test]
    fn test_same_day_ties_break_by_start_time() {
        let patterns = vec![
            WeeklySlot::new(Weekday::Mon, time(15, 0), 60),
            WeeklySlot::new(Weekday::Mon, time(8, 0), 60),
        ];
        let slots = generate_slots(date(2025, 9, 1), 2, &patterns);
        assert_eq!(slots[0].time, time(8, 0));
        assert_eq!(slots[1].time, time(15, 0));
    }

    #[test]
    fn test_no_patterns_yields_nothing() {
        assert!(generate_slots(date(2025, 9, 1), 10, &[]).is_empty());
    }

    #[test]
    fn test_horizon_caps_the_sequence() {
        let patterns = vec![WeeklySlot::new(Weekday::Mon, time(8, 0), 60)];
        let slots: Vec<Slot> = SlotGenerator::new(date(2025, 9, 1), &patterns)
            .with_horizon(3)
            .collect();
        assert_eq!(slots.len(), 3);
    }

    #[test]
    fn test_generator_is_restartable() {
        let patterns = vec![
            WeeklySlot::new(Weekday::Wed, time(9, 0), 60),
            WeeklySlot::new(Weekday::Sat, time(11, 0), 60),
        ];
        let first = generate_slots(date(2025, 10, 1), 12, &patterns);
        let second = generate_slots(date(2025, 10, 1), 12, &patterns);
        assert_eq!(first, second);
    }

    #[test]
    fn test_default_horizon_is_520_weeks() {
        let patterns = vec![WeeklySlot::new(Weekday::Mon, time(8, 0), 60)];
        let count = SlotGenerator::new(date(2025, 9, 1), &patterns).count();
        assert_eq!(count, DEFAULT_HORIZON_WEEKS as usize);
    }
}
