//! Evaluation dimensions and student evaluation records.

use std::collections::BTreeMap;

use chrono::NaiveDate;
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use super::Level;
use crate::scoring::compute_final_grade;

/// A graded dimension of a PE evaluation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Dimension {
    /// Motor skill (motricité).
    #[serde(alias = "motricite")]
    Motor,
    /// Tactical skill.
    #[serde(alias = "tactique")]
    Tactical,
    /// Behaviour and attitude (comportement).
    #[serde(alias = "comportement")]
    Behaviour,
    /// Conceptual and procedural knowledge (connaissances).
    #[serde(alias = "connaissances")]
    Knowledge,
    /// Personal project.
    #[serde(alias = "projet")]
    Project,
}

impl std::fmt::Display for Dimension {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Dimension::Motor => write!(f, "motor"),
            Dimension::Tactical => write!(f, "tactical"),
            Dimension::Behaviour => write!(f, "behaviour"),
            Dimension::Knowledge => write!(f, "knowledge"),
            Dimension::Project => write!(f, "project"),
        }
    }
}

/// Sparse raw scores per dimension, each on a 0-20 scale.
///
/// A missing dimension reads as zero.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::{Dimension, Dims};
/// use rust_decimal::Decimal;
///
/// let dims = Dims::new().with(Dimension::Motor, Decimal::from(14));
/// assert_eq!(dims.get(Dimension::Motor), Decimal::from(14));
/// assert_eq!(dims.get(Dimension::Project), Decimal::ZERO);
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Dims(BTreeMap<Dimension, Decimal>);

impl Dims {
    /// Creates an empty score set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns the set with `dimension` scored `value`.
    pub fn with(mut self, dimension: Dimension, value: Decimal) -> Self {
        self.0.insert(dimension, value);
        self
    }

    /// Sets one dimension.
    pub fn set(&mut self, dimension: Dimension, value: Decimal) {
        self.0.insert(dimension, value);
    }

    /// The raw score for `dimension`, zero when absent.
    pub fn get(&self, dimension: Dimension) -> Decimal {
        self.0.get(&dimension).copied().unwrap_or(Decimal::ZERO)
    }

    /// Iterates over the scored dimensions.
    pub fn iter(&self) -> impl Iterator<Item = (Dimension, Decimal)> + '_ {
        self.0.iter().map(|(d, v)| (*d, *v))
    }
}

/// A student's evaluation for one cycle.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Evaluation {
    /// Unique identifier.
    pub id: String,
    /// The evaluated student.
    pub student_id: String,
    /// The cycle being evaluated.
    pub cycle_id: String,
    /// Raw scores.
    pub dims: Dims,
    /// Weighted final grade on 20.
    pub final_grade: Decimal,
    /// Teacher comment.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub comment: Option<String>,
    /// Day of the evaluation.
    pub evaluated_on: NaiveDate,
}

impl Evaluation {
    /// Creates an evaluation, computing the final grade for the student's level.
    pub fn new(
        id: impl Into<String>,
        student_id: impl Into<String>,
        cycle_id: impl Into<String>,
        level: Level,
        dims: Dims,
        evaluated_on: NaiveDate,
    ) -> Self {
        let final_grade = compute_final_grade(level, &dims);
        Self {
            id: id.into(),
            student_id: student_id.into(),
            cycle_id: cycle_id.into(),
            dims,
            final_grade,
            comment: None,
            evaluated_on,
        }
    }
}

/// Adds `evaluation`, replacing any earlier one for the same student and cycle.
pub fn upsert_evaluation(evaluations: &mut Vec<Evaluation>, evaluation: Evaluation) {
    evaluations
        .retain(|e| !(e.student_id == evaluation.student_id && e.cycle_id == evaluation.cycle_id));
    evaluations.push(evaluation);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    fn dec(s: &str) -> Decimal {
        Decimal::from_str(s).unwrap()
    }

    fn today() -> NaiveDate {
        NaiveDate::from_ymd_opt(2025, 12, 15).unwrap()
    }

    #[test]
    fn test_dims_deserialize_with_legacy_keys() {
        let dims: Dims =
            serde_json::from_str(r#"{"motricite":"12.5","comportement":"14"}"#).unwrap();
        assert_eq!(dims.get(Dimension::Motor), dec("12.5"));
        assert_eq!(dims.get(Dimension::Behaviour), dec("14"));
        assert_eq!(dims.get(Dimension::Knowledge), Decimal::ZERO);
    }

    #[test]
    fn test_evaluation_computes_final_grade() {
        let dims = Dims::new()
            .with(Dimension::Motor, dec("10"))
            .with(Dimension::Behaviour, dec("10"))
            .with(Dimension::Knowledge, dec("10"));
        let evaluation = Evaluation::new("ev1", "eleve-01", "cy1", Level::CommonCore, dims, today());
        assert_eq!(evaluation.final_grade, dec("10"));
    }

    #[test]
    fn test_upsert_replaces_same_student_and_cycle() {
        let mut evaluations = Vec::new();
        let low = Dims::new().with(Dimension::Motor, dec("4"));
        let high = Dims::new().with(Dimension::Motor, dec("18"));

        upsert_evaluation(
            &mut evaluations,
            Evaluation::new("ev1", "eleve-01", "cy1", Level::CommonCore, low.clone(), today()),
        );
        upsert_evaluation(
            &mut evaluations,
            Evaluation::new("ev2", "eleve-02", "cy1", Level::CommonCore, low, today()),
        );
        upsert_evaluation(
            &mut evaluations,
            Evaluation::new("ev3", "eleve-01", "cy1", Level::CommonCore, high, today()),
        );

        assert_eq!(evaluations.len(), 2);
        let ids: Vec<&str> = evaluations.iter().map(|e| e.id.as_str()).collect();
        assert_eq!(ids, vec!["ev2", "ev3"]);
    }
}
