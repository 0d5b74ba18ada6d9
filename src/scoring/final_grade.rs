//! Weighted final grade calculation.
//!
//! The final grade is the weighted mean of the level's dimensions on a 0-20
//! scale, rounded to the nearest half point. All arithmetic is exact
//! (`rust_decimal`), so 10.25 always rounds to 10.5 and never to 10.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::Serialize;

use super::coefficients::{WEIGHT_TOTAL, coefficients};
use crate::models::{Dimension, Dims, Level};

/// Highest possible raw score and grade.
pub fn max_grade() -> Decimal {
    Decimal::new(20, 0)
}

fn clamp_grade(value: Decimal) -> Decimal {
    value.max(Decimal::ZERO).min(max_grade())
}

/// Rounds a grade to the nearest half point, halves rounding up.
///
/// The grade is clamped to [0, 20] before and after rounding.
///
/// # Example
///
/// ```
/// use gradebook_engine::scoring::round_to_half;
/// use rust_decimal::Decimal;
/// use std::str::FromStr;
///
/// let dec = |s| Decimal::from_str(s).unwrap();
/// assert_eq!(round_to_half(dec("10.4")), dec("10.5"));
/// assert_eq!(round_to_half(dec("10.25")), dec("10.5"));
/// assert_eq!(round_to_half(dec("10.24")), dec("10"));
/// assert_eq!(round_to_half(dec("23")), dec("20"));
/// ```
pub fn round_to_half(grade: Decimal) -> Decimal {
    let two = Decimal::from(2);
    let doubled = (clamp_grade(grade) * two)
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero);
    clamp_grade(doubled / two).normalize()
}

/// How one dimension contributed to a final grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct DimensionContribution {
    /// The dimension.
    pub dimension: Dimension,
    /// Raw score after clamping to [0, 20].
    pub raw: Decimal,
    /// Weight in percent.
    pub weight: u32,
    /// `raw * weight / 100`.
    pub weighted: Decimal,
}

/// The full working of a final grade.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct GradeBreakdown {
    /// Level whose table was used.
    pub level: Level,
    /// One entry per weighted dimension, in table order.
    pub contributions: Vec<DimensionContribution>,
    /// Weighted mean before rounding.
    pub raw_grade: Decimal,
    /// Rounded final grade.
    pub final_grade: Decimal,
}

/// Computes a final grade together with its per-dimension working.
///
/// Dimensions outside the level's table are ignored; missing ones count as 0.
pub fn grade_breakdown(level: Level, dims: &Dims) -> GradeBreakdown {
    let hundred = Decimal::from(WEIGHT_TOTAL);

    let contributions: Vec<DimensionContribution> = coefficients(level)
        .iter()
        .map(|w| {
            let raw = clamp_grade(dims.get(w.dimension));
            DimensionContribution {
                dimension: w.dimension,
                raw,
                weight: w.percent,
                weighted: raw * Decimal::from(w.percent) / hundred,
            }
        })
        .collect();

    let total: Decimal = contributions
        .iter()
        .map(|c| c.raw * Decimal::from(c.weight))
        .sum();
    let raw_grade = clamp_grade(total / hundred);

    GradeBreakdown {
        level,
        contributions,
        raw_grade,
        final_grade: round_to_half(raw_grade),
    }
}

/// Computes the final grade on 20 for a student of `level`.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::{Dimension, Dims, Level};
/// use gradebook_engine::scoring::compute_final_grade;
/// use rust_decimal::Decimal;
///
/// let dims = Dims::new()
///     .with(Dimension::Motor, Decimal::from(10))
///     .with(Dimension::Behaviour, Decimal::from(10))
///     .with(Dimension::Knowledge, Decimal::from(10));
/// assert_eq!(compute_final_grade(Level::CommonCore, &dims), Decimal::from(10));
/// ```
pub fn compute_final_grade(level: Level, dims: &Dims) -> Decimal {
    grade_breakdown(level, dims).final_grade
}
