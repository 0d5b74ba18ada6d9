//! Level-specific coefficient tables.
//!
//! Each level grades a fixed subset of dimensions. The tables are declared
//! statically per [`Level`] and every table sums to [`WEIGHT_TOTAL`].

use serde::Serialize;

use crate::models::{Dimension, Level};

/// Sum of the weights of every level's table.
pub const WEIGHT_TOTAL: u32 = 100;

/// The weight of one dimension, in percent.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Weight {
    /// The weighted dimension.
    pub dimension: Dimension,
    /// Share of the final grade, in percent.
    pub percent: u32,
}

const fn weight(dimension: Dimension, percent: u32) -> Weight {
    Weight { dimension, percent }
}

const COMMON_CORE: [Weight; 3] = [
    weight(Dimension::Motor, 60),
    weight(Dimension::Behaviour, 20),
    weight(Dimension::Knowledge, 20),
];

const FIRST_YEAR: [Weight; 4] = [
    weight(Dimension::Motor, 50),
    weight(Dimension::Tactical, 30),
    weight(Dimension::Behaviour, 10),
    weight(Dimension::Knowledge, 10),
];

const SECOND_YEAR: [Weight; 4] = [
    weight(Dimension::Project, 40),
    weight(Dimension::Tactical, 30),
    weight(Dimension::Behaviour, 20),
    weight(Dimension::Knowledge, 10),
];

/// Returns the coefficient table for a level.
///
/// # Example
///
/// ```
/// use gradebook_engine::models::{Dimension, Level};
/// use gradebook_engine::scoring::coefficients;
///
/// let table = coefficients(Level::CommonCore);
/// assert_eq!(table[0].dimension, Dimension::Motor);
/// assert_eq!(table[0].percent, 60);
/// ```
pub fn coefficients(level: Level) -> &'static [Weight] {
    match level {
        Level::CommonCore => &COMMON_CORE,
        Level::FirstYear => &FIRST_YEAR,
        Level::SecondYear => &SECOND_YEAR,
    }
}

/// Returns true if `dimension` counts towards the grade at `level`.
pub fn applies_to(level: Level, dimension: Dimension) -> bool {
    coefficients(level).iter().any(|w| w.dimension == dimension)
}
