//! Breadth classification.
//!
//! Buckets a student's courses into the four breadth categories. Humanities
//! and social sciences membership is counted directly; subjects appearing in
//! both pure and applied sciences are set aside and distributed afterward.
//! Classification is independent of the major's rule tree.

use serde::Serialize;
use std::collections::BTreeMap;

use crate::domain::{BreadthCategory, BreadthConfig, CourseCode};
use tracing::debug;

/// Communication "List I" courses, which never count toward breadth or
/// depth regardless of configuration.
const LIST_ONE_EXCLUSIONS: [&str; 7] = [
    "COMMST 100",
    "COMMST 223",
    "ENGL 109",
    "ENGL 129R",
    "EMLS 129R",
    "EMLS 101R",
    "EMLS 102R",
];

/// Whether the course is on the hardcoded communication List I.
pub(crate) fn is_list_one_exclusion(code: &CourseCode) -> bool {
    let canonical = code.to_string();
    LIST_ONE_EXCLUSIONS.contains(&canonical.as_str())
}

/// The status of one breadth category.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryStatus {
    /// The category.
    pub category: BreadthCategory,
    /// Courses credited to the category, in input order.
    pub taken: Vec<CourseCode>,
    /// How many courses the category requires.
    pub needed: usize,
    /// Whether the category requirement is met.
    pub met: bool,
    /// A one-line progress string for display.
    pub status: String,
}

/// The outcome of breadth classification.
#[derive(Debug, Clone, Serialize)]
pub struct BreadthOutcome {
    /// Whether all four categories are satisfied.
    pub satisfied: bool,
    /// Per-category statuses, in reporting order.
    pub categories: Vec<CategoryStatus>,
    /// The per-category status strings joined with `" | "`.
    pub description: String,
}

/// Classifies the student's courses into breadth categories.
#[must_use]
pub fn classify(config: &BreadthConfig, courses: &[CourseCode]) -> BreadthOutcome {
    let mut taken: BTreeMap<BreadthCategory, Vec<CourseCode>> = BreadthCategory::ALL
        .iter()
        .map(|&category| (category, Vec::new()))
        .collect();
    let mut overlap: Vec<CourseCode> = Vec::new();

    for code in courses {
        let subject = code.subject();
        if config.is_excluded(subject) {
            debug!(%code, "excluded subject skipped");
            continue;
        }
        if is_list_one_exclusion(code) {
            debug!(%code, "communication List I course skipped");
            continue;
        }

        let pure = config
            .subjects(BreadthCategory::PureSciences)
            .contains(subject);
        let applied = config
            .subjects(BreadthCategory::AppliedSciences)
            .contains(subject);

        if config
            .subjects(BreadthCategory::Humanities)
            .contains(subject)
        {
            taken
                .entry(BreadthCategory::Humanities)
                .or_default()
                .push(code.clone());
        }
        if config
            .subjects(BreadthCategory::SocialSciences)
            .contains(subject)
        {
            taken
                .entry(BreadthCategory::SocialSciences)
                .or_default()
                .push(code.clone());
        }

        if pure && applied {
            overlap.push(code.clone());
        } else if pure {
            taken
                .entry(BreadthCategory::PureSciences)
                .or_default()
                .push(code.clone());
        } else if applied {
            taken
                .entry(BreadthCategory::AppliedSciences)
                .or_default()
                .push(code.clone());
        }
    }

    // Overlap courses fill pure sciences first, then applied; once both are
    // satisfied the excess still lands in applied.
    for code in overlap {
        let pure_len = taken[&BreadthCategory::PureSciences].len();
        let target = if pure_len < BreadthCategory::PureSciences.required_count() {
            BreadthCategory::PureSciences
        } else {
            BreadthCategory::AppliedSciences
        };
        taken.entry(target).or_default().push(code);
    }

    let categories: Vec<CategoryStatus> = BreadthCategory::ALL
        .iter()
        .map(|&category| {
            let taken = taken.remove(&category).unwrap_or_default();
            let needed = category.required_count();
            let met = taken.len() >= needed;
            let status = if met {
                format!("{category} satisfied ({}/{needed})", taken.len())
            } else {
                format!(
                    "{category} in progress ({}/{needed}, need {} more)",
                    taken.len(),
                    needed - taken.len()
                )
            };
            CategoryStatus {
                category,
                taken,
                needed,
                met,
                status,
            }
        })
        .collect();

    let satisfied = categories.iter().all(|status| status.met);
    let description = categories
        .iter()
        .map(|status| status.status.as_str())
        .collect::<Vec<_>>()
        .join(" | ");

    BreadthOutcome {
        satisfied,
        categories,
        description,
    }
}
