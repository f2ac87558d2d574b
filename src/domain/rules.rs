//! The declarative requirement rule language.
//!
//! One [`MajorRules`] document exists per major. Requirement lists are
//! heterogeneous trees of [`Requirement`] variants, discriminated by a
//! `type` tag in the JSON. Unknown tags fail deserialization, so malformed
//! rule documents are rejected at load time rather than mid-evaluation.

use std::collections::{BTreeMap, BTreeSet};

use serde::{Deserialize, Serialize};

use crate::domain::{Course, CourseCode};

/// A single requirement node in a major's rule tree.
#[derive(Debug, Clone, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum Requirement {
    /// Every listed course must be completed.
    AllRequired(CourseList),
    /// At least one listed course must be completed.
    OneRequired(CourseList),
    /// At least `count` courses drawn from range/pattern specifications.
    RangeRequired(RangeSpec),
    /// At least `count` courses, optionally with specific codes that must
    /// be among them.
    NRequired(RangeSpec),
    /// A choice between nested requirement groups; satisfied when any one
    /// group is fully satisfied.
    OneGroupRequired(GroupSpec),
}

impl Requirement {
    /// The discriminant tag for this requirement.
    #[must_use]
    pub const fn kind(&self) -> RequirementKind {
        match self {
            Self::AllRequired(_) => RequirementKind::AllRequired,
            Self::OneRequired(_) => RequirementKind::OneRequired,
            Self::RangeRequired(_) => RequirementKind::RangeRequired,
            Self::NRequired(_) => RequirementKind::NRequired,
            Self::OneGroupRequired(_) => RequirementKind::OneGroupRequired,
        }
    }
}

/// The closed set of requirement tags, as they appear in rule documents.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum RequirementKind {
    /// `all_required`
    AllRequired,
    /// `one_required`
    OneRequired,
    /// `range_required`
    RangeRequired,
    /// `n_required`
    NRequired,
    /// `one_group_required`
    OneGroupRequired,
}

impl RequirementKind {
    /// The tag string used in rule documents.
    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::AllRequired => "all_required",
            Self::OneRequired => "one_required",
            Self::RangeRequired => "range_required",
            Self::NRequired => "n_required",
            Self::OneGroupRequired => "one_group_required",
        }
    }
}

impl std::fmt::Display for RequirementKind {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A plain course-list requirement payload (`all_required`/`one_required`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CourseList {
    /// Override for the generated description.
    #[serde(default)]
    pub description: Option<String>,
    /// The candidate courses, in declaration order.
    #[serde(default)]
    pub courses: Vec<Course>,
}

/// A range-based requirement payload (`range_required`/`n_required`).
///
/// Candidate courses come from four mechanisms, any of which may be absent:
/// explicit `courses`, numeric `range` spans, `level_ranges`/`patterns`
/// hundred-blocks, and bare-prefix `category_ranges`.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct RangeSpec {
    /// Override for the generated description.
    #[serde(default)]
    pub description: Option<String>,
    /// Explicit candidate courses, included verbatim.
    #[serde(default)]
    pub courses: Vec<Course>,
    /// How many candidate courses must be taken.
    #[serde(default)]
    pub count: usize,
    /// Codes that must appear among the taken courses (`n_required` only).
    #[serde(default)]
    pub required: Vec<CourseCode>,
    /// Numeric spans: either a single code (`"MATH135"`) or a
    /// `"START-END"` span sharing one subject prefix
    /// (`"MATH135-MATH138"`).
    #[serde(default)]
    pub range: Vec<String>,
    /// Hundred-block tokens: `"AFM3"` means AFM 300–399; a bare prefix
    /// means any course with that prefix.
    #[serde(default)]
    pub level_ranges: Vec<String>,
    /// Alternate encoding of `level_ranges`; both are honored.
    #[serde(default)]
    pub patterns: Vec<String>,
    /// Bare subject prefixes; a match requires a digit immediately after
    /// the prefix.
    #[serde(default)]
    pub category_ranges: Vec<String>,
}

/// A grouped-choice requirement payload (`one_group_required`).
#[derive(Debug, Clone, Default, Deserialize)]
pub struct GroupSpec {
    /// Override for the generated description.
    #[serde(default)]
    pub description: Option<String>,
    /// The nested alternatives.
    #[serde(default)]
    pub groups: Vec<Requirement>,
}

/// A per-major rule document.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct MajorRules {
    /// Courses that can never count toward any requirement of this major.
    #[serde(default)]
    pub excluded_courses: Vec<Course>,
    /// Core course requirements.
    #[serde(default)]
    pub required_courses: Vec<Requirement>,
    /// Elective requirements.
    #[serde(default)]
    pub elective_requirement: Vec<Requirement>,
    /// Additional (faculty/program) requirements.
    #[serde(default)]
    pub additional_requirement: Vec<Requirement>,
    /// The named-list communication requirement, if the major has one.
    #[serde(default)]
    pub communication_requirement: Option<CommunicationRules>,
    /// Pointer to the shared breadth configuration document.
    #[serde(default)]
    pub breadth_requirement: Option<ExternalSource>,
    /// Pointer to the depth requirement description document.
    #[serde(default)]
    pub depth_requirement: Option<ExternalSource>,
}

impl MajorRules {
    /// The excluded course codes as a set, for exclusion filtering.
    #[must_use]
    pub fn excluded_codes(&self) -> BTreeSet<CourseCode> {
        self.excluded_courses
            .iter()
            .map(|course| course.code.clone())
            .collect()
    }
}

/// A reference to an external description document by filename.
#[derive(Debug, Clone, Deserialize)]
pub struct ExternalSource {
    /// The referenced filename, relative to the requirements directory.
    pub source: String,
}

/// The communication requirement: named course lists plus count-threshold
/// options across them.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CommunicationRules {
    /// The ways the requirement can be satisfied.
    #[serde(default)]
    pub options: Vec<CommunicationOption>,
    /// Named course lists (e.g. `"list_1"`, `"list_2"`), keyed by name.
    #[serde(flatten)]
    pub lists: BTreeMap<String, CourseList>,
}

/// One way of satisfying the communication requirement.
#[derive(Debug, Clone, Deserialize)]
pub struct CommunicationOption {
    /// Human-readable description of the option.
    #[serde(default)]
    pub description: Option<String>,
    /// Per-list count thresholds that must all hold.
    #[serde(default)]
    pub requires: Vec<ListThreshold>,
}

/// A count threshold against one named communication list.
#[derive(Debug, Clone, Deserialize)]
pub struct ListThreshold {
    /// The name of the list.
    pub list: String,
    /// How many courses from that list must be taken.
    pub count: usize,
}
