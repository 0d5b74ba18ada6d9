//! Grading: coefficient tables, weighted final grades and assessment rubrics.

mod coefficients;
mod final_grade;
mod rubric;

pub use coefficients::{WEIGHT_TOTAL, Weight, applies_to, coefficients};
pub use final_grade::{
    DimensionContribution, GradeBreakdown, compute_final_grade, grade_breakdown, max_grade,
    round_to_half,
};
pub use rubric::{ActivityFamily, Criterion, rubric, rubric_total};
