//! Depth (subject concentration) analysis.
//!
//! A student demonstrates depth in one of two ways, checked in order:
//!
//! 1. at least three courses in one breadth-eligible subject, one of them
//!    at the 300 level or above, or
//! 2. a prerequisite chain of three distinct courses within one
//!    breadth-eligible subject.
//!
//! Both checks are greedy: the first qualifying subject (and for option 2,
//! the first chain found) wins. Subjects with no breadth eligibility can
//! never demonstrate depth, no matter how many courses they hold.

use std::collections::{BTreeMap, BTreeSet, HashMap};

use nonempty::NonEmpty;
use serde::ser::{Serialize, SerializeMap, Serializer};
use tracing::debug;

use crate::{
    domain::{BreadthConfig, CourseCode, Subject},
    engine::{breadth::is_list_one_exclusion, prereq::PrereqGraph},
};

/// Minimum course count for the course-count test.
const MIN_SUBJECT_COURSES: usize = 3;

/// Minimum course number counting as upper-level.
const UPPER_LEVEL: u16 = 300;

/// Required length of a prerequisite chain, start course included.
const CHAIN_LENGTH: usize = 3;

/// The outcome of depth analysis.
#[derive(Debug, Clone)]
pub enum DepthOutcome {
    /// Option 1: enough courses in one subject, one of them upper-level.
    CourseCount {
        /// The concentrating subject.
        subject: Subject,
        /// The subject's courses, in input order.
        courses: Vec<CourseCode>,
    },
    /// Option 2: a prerequisite chain within one subject.
    PrereqChain {
        /// The concentrating subject.
        subject: Subject,
        /// The chain, from the most advanced course down its
        /// prerequisites.
        chain: NonEmpty<CourseCode>,
    },
    /// Neither option holds for any eligible subject.
    NotDemonstrated,
}

impl DepthOutcome {
    /// Whether depth is demonstrated.
    #[must_use]
    pub const fn is_satisfied(&self) -> bool {
        !matches!(self, Self::NotDemonstrated)
    }

    /// Which option succeeded, if any.
    #[must_use]
    pub const fn option(&self) -> Option<u8> {
        match self {
            Self::CourseCount { .. } => Some(1),
            Self::PrereqChain { .. } => Some(2),
            Self::NotDemonstrated => None,
        }
    }
}

impl Serialize for DepthOutcome {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Self::CourseCount { subject, courses } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("option", &1)?;
                map.serialize_entry("subject", subject)?;
                map.serialize_entry("courses", courses)?;
                map.end()
            }
            Self::PrereqChain { subject, chain } => {
                let mut map = serializer.serialize_map(Some(4))?;
                map.serialize_entry("ok", &true)?;
                map.serialize_entry("option", &2)?;
                map.serialize_entry("subject", subject)?;
                map.serialize_entry("chain", &chain.iter().collect::<Vec<_>>())?;
                map.end()
            }
            Self::NotDemonstrated => {
                let mut map = serializer.serialize_map(Some(1))?;
                map.serialize_entry("ok", &false)?;
                map.end()
            }
        }
    }
}

/// Analyzes the student's courses for subject concentration.
#[must_use]
pub fn analyze(
    config: &BreadthConfig,
    graph: &PrereqGraph,
    courses: &[CourseCode],
) -> DepthOutcome {
    // Pre-filter mirrors breadth: drop excluded subjects and List I
    // courses, then group by subject in input order, deduplicated.
    let mut by_subject: BTreeMap<Subject, Vec<CourseCode>> = BTreeMap::new();
    let mut seen: BTreeSet<CourseCode> = BTreeSet::new();

    for code in courses {
        if is_list_one_exclusion(code) {
            debug!(%code, "communication List I course skipped");
            continue;
        }
        if config.is_excluded(code.subject()) {
            debug!(%code, "excluded subject skipped");
            continue;
        }
        if !seen.insert(code.clone()) {
            continue;
        }
        by_subject
            .entry(code.subject().clone())
            .or_default()
            .push(code.clone());
    }

    // Option 1: course count and level. First qualifying subject wins.
    for (subject, group) in &by_subject {
        if !config.is_eligible(subject) {
            debug!(%subject, "subject not breadth-eligible");
            continue;
        }
        if group.len() >= MIN_SUBJECT_COURSES
            && group.iter().any(|code| code.number() >= UPPER_LEVEL)
        {
            return DepthOutcome::CourseCount {
                subject: subject.clone(),
                courses: group.clone(),
            };
        }
    }

    // Option 2: prerequisite chain.
    for (subject, group) in &by_subject {
        if !config.is_eligible(subject) {
            continue;
        }

        let pool: HashMap<String, CourseCode> = group
            .iter()
            .map(|code| (code.key(), code.clone()))
            .collect();

        for start in group {
            let mut path = vec![start.clone()];
            if extend_chain(graph, &pool, &mut path) {
                if let Some(chain) = NonEmpty::from_vec(path) {
                    return DepthOutcome::PrereqChain {
                        subject: subject.clone(),
                        chain,
                    };
                }
            }
        }
    }

    DepthOutcome::NotDemonstrated
}

/// Depth-first extension of `path` along recorded prerequisites, restricted
/// to `pool` (the current subject group). Courses already on the path are
/// skipped so chains always contain distinct courses.
fn extend_chain(
    graph: &PrereqGraph,
    pool: &HashMap<String, CourseCode>,
    path: &mut Vec<CourseCode>,
) -> bool {
    if path.len() == CHAIN_LENGTH {
        return true;
    }
    let Some(current) = path.last().cloned() else {
        return false;
    };

    for prereq_key in graph.prerequisites(&current.key()) {
        let Some(prereq) = pool.get(prereq_key) else {
            continue;
        };
        if path.contains(prereq) {
            continue;
        }
        path.push(prereq.clone());
        if extend_chain(graph, pool, path) {
            return true;
        }
        path.pop();
    }

    false
}
