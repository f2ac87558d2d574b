use std::collections::HashMap;

use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::domain::CourseCode;

/// A catalog entry: a course code and its title.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Course {
    /// The normalized course code.
    pub code: CourseCode,
    /// The course title. Rule documents occasionally omit it.
    #[serde(default)]
    pub title: String,
}

impl Course {
    /// Construct a course from a code and title.
    #[must_use]
    pub const fn new(code: CourseCode, title: String) -> Self {
        Self { code, title }
    }
}

/// The course catalog: an immutable, insertion-ordered snapshot of every
/// offered course.
///
/// Loaded once per process and shared read-only across evaluations. Range
/// resolution iterates the catalog in load order, which makes resolver
/// output deterministic.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    courses: Vec<Course>,
    index: HashMap<String, usize>,
}

impl Catalog {
    /// Builds a catalog from an iterator of courses.
    ///
    /// Duplicate codes keep the first occurrence.
    #[must_use]
    pub fn from_courses(courses: impl IntoIterator<Item = Course>) -> Self {
        let mut catalog = Self::default();
        for course in courses {
            let key = course.code.key();
            if catalog.index.contains_key(&key) {
                debug!(code = %course.code, "duplicate catalog entry skipped");
                continue;
            }
            catalog.index.insert(key, catalog.courses.len());
            catalog.courses.push(course);
        }
        catalog
    }

    /// The number of courses in the catalog.
    #[must_use]
    pub fn len(&self) -> usize {
        self.courses.len()
    }

    /// Whether the catalog holds no courses.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.courses.is_empty()
    }

    /// Whether the catalog contains the given code.
    #[must_use]
    pub fn contains(&self, code: &CourseCode) -> bool {
        self.index.contains_key(&code.key())
    }

    /// Looks up a course by code.
    #[must_use]
    pub fn get(&self, code: &CourseCode) -> Option<&Course> {
        self.index.get(&code.key()).map(|&i| &self.courses[i])
    }

    /// Iterates courses in load order.
    pub fn iter(&self) -> impl Iterator<Item = &Course> {
        self.courses.iter()
    }

    /// Returns the codes from `codes` that are absent from the catalog.
    ///
    /// This is the up-front existence check run over a student's course
    /// list; the caller decides whether absent codes abort the evaluation.
    #[must_use]
    pub fn missing(&self, codes: &[CourseCode]) -> Vec<CourseCode> {
        codes
            .iter()
            .filter(|code| !self.contains(code))
            .cloned()
            .collect()
    }
}

impl<'a> IntoIterator for &'a Catalog {
    type Item = &'a Course;
    type IntoIter = std::slice::Iter<'a, Course>;

    fn into_iter(self) -> Self::IntoIter {
        self.courses.iter()
    }
}
