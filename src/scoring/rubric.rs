//! Assessment rubrics per activity family.
//!
//! Each family lists its criteria with the points each level allots. A
//! criterion may be split into sub-criteria, in which case only the
//! sub-criteria carry points. Every level's rubric totals 20 points.

use serde::{Deserialize, Serialize};

use crate::models::Level;

/// Family of activities sharing one assessment rubric.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ActivityFamily {
    /// Track and field.
    Athletics,
    /// Football, basketball, handball, volleyball.
    TeamSports,
    /// Gymnastics.
    Gymnastics,
}

impl ActivityFamily {
    /// Every family.
    pub const ALL: [ActivityFamily; 3] = [
        ActivityFamily::Athletics,
        ActivityFamily::TeamSports,
        ActivityFamily::Gymnastics,
    ];

    /// Maps a free-text activity name to its family.
    ///
    /// Unrecognised names fall back to athletics.
    ///
    /// # Example
    ///
    /// ```
    /// use gradebook_engine::scoring::ActivityFamily;
    ///
    /// assert_eq!(ActivityFamily::resolve("Football"), ActivityFamily::TeamSports);
    /// assert_eq!(ActivityFamily::resolve("Gymnastique au sol"), ActivityFamily::Gymnastics);
    /// assert_eq!(ActivityFamily::resolve("Course de vitesse"), ActivityFamily::Athletics);
    /// ```
    pub fn resolve(activity: &str) -> Self {
        let name = activity.trim().to_lowercase();
        if name.contains("gym") {
            return ActivityFamily::Gymnastics;
        }
        let team_markers = ["foot", "collect", "basket", "hand", "volley"];
        if team_markers.iter().any(|m| name.contains(m)) {
            return ActivityFamily::TeamSports;
        }
        ActivityFamily::Athletics
    }
}

/// One assessment criterion.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Criterion {
    /// Short code (e.g. "A1").
    pub id: &'static str,
    /// What is assessed.
    pub title: &'static str,
    /// Points for TC, first year, second year.
    points: [u32; 3],
    /// Sub-criteria, when the criterion is split.
    pub sub_criteria: &'static [Criterion],
}

impl Criterion {
    /// Points this criterion is worth at `level`, sub-criteria included.
    pub fn points(&self, level: Level) -> u32 {
        if self.sub_criteria.is_empty() {
            self.points[level_index(level)]
        } else {
            self.sub_criteria.iter().map(|c| c.points(level)).sum()
        }
    }
}

fn level_index(level: Level) -> usize {
    match level {
        Level::CommonCore => 0,
        Level::FirstYear => 1,
        Level::SecondYear => 2,
    }
}

const KNOWLEDGE: Criterion = Criterion {
    id: "D",
    title: "Conceptual and procedural knowledge",
    points: [3, 3, 3],
    sub_criteria: &[],
};

const ATTITUDE: Criterion = Criterion {
    id: "E",
    title: "Behavioural knowledge (attitudes)",
    points: [5, 4, 3],
    sub_criteria: &[],
};

const ATHLETICS: [Criterion; 4] = [
    Criterion {
        id: "A1",
        title: "Motor skill (product)",
        points: [6, 7, 7],
        sub_criteria: &[],
    },
    Criterion {
        id: "A2",
        title: "Motor behaviour (performance)",
        points: [6, 6, 7],
        sub_criteria: &[],
    },
    KNOWLEDGE,
    ATTITUDE,
];

const TEAM_SPORTS: [Criterion; 3] = [
    Criterion {
        id: "B1",
        title: "Sporting capacity and motor skill",
        points: [0, 0, 0],
        sub_criteria: &[
            Criterion {
                id: "B1a",
                title: "individual",
                points: [6, 6, 7],
                sub_criteria: &[],
            },
            Criterion {
                id: "B1b",
                title: "collective",
                points: [6, 7, 7],
                sub_criteria: &[],
            },
        ],
    },
    KNOWLEDGE,
    ATTITUDE,
];

const GYMNASTICS: [Criterion; 3] = [
    Criterion {
        id: "C1",
        title: "Sporting capacity and motor skill",
        points: [12, 13, 14],
        sub_criteria: &[],
    },
    KNOWLEDGE,
    ATTITUDE,
];

/// The rubric criteria of an activity family.
pub fn rubric(family: ActivityFamily) -> &'static [Criterion] {
    match family {
        ActivityFamily::Athletics => &ATHLETICS,
        ActivityFamily::TeamSports => &TEAM_SPORTS,
        ActivityFamily::Gymnastics => &GYMNASTICS,
    }
}

/// Total points of a family's rubric at `level`.
pub fn rubric_total(family: ActivityFamily, level: Level) -> u32 {
    rubric(family).iter().map(|c| c.points(level)).sum()
}
