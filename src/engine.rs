//! The requirement evaluation engine.
//!
//! An evaluation is a pure function of the major's rule document, the
//! student's normalized course list, and the shared read-only data (catalog,
//! breadth configuration, prerequisite graph). The walk threads a single
//! mutable consumed-course set through every requirement list, so a course
//! credited to one requirement can never be credited to a sibling evaluated
//! later in the same pass.

/// Breadth classification.
pub mod breadth;
/// Depth (subject concentration) analysis.
pub mod depth;
/// The prerequisite graph.
pub mod prereq;
/// Course range resolution.
pub mod range;

use std::collections::{BTreeMap, BTreeSet};

use serde::Serialize;
use tracing::{debug, instrument};

use crate::domain::{
    Catalog, Course, CourseCode, MajorRules, Requirement, RequirementKind,
    breadth::BreadthConfig,
    rules::{CommunicationRules, CourseList, GroupSpec, RangeSpec},
};
use breadth::BreadthOutcome;
use depth::DepthOutcome;
use prereq::PrereqGraph;

/// Advisory note attached to breadth results.
const BREADTH_NOTE: &str =
    "Breadth is assessed across all completed courses; confirm category assignments with an academic advisor.";

/// Advisory note attached to depth results.
const DEPTH_NOTE: &str =
    "Depth requires concentration in a single breadth-eligible subject; confirm with an academic advisor.";

/// The outcome of one requirement node.
#[derive(Debug, Clone, Serialize)]
pub struct EvaluationResult {
    /// Human-readable description of the requirement.
    pub description: String,
    /// The requirement's tag.
    #[serde(rename = "type")]
    pub kind: RequirementKind,
    /// Candidate courses the student has taken (and that were not already
    /// consumed by an earlier requirement).
    pub courses_taken: Vec<Course>,
    /// Candidate courses the student has not taken.
    pub courses_remaining: Vec<Course>,
    /// Whether the requirement is satisfied.
    pub met: bool,
}

/// Progress against one named communication list.
#[derive(Debug, Clone, Serialize)]
pub struct ListProgress {
    /// The list's description, if the document provides one.
    pub description: Option<String>,
    /// List courses the student has taken.
    pub courses_taken: Vec<Course>,
    /// List courses the student has not taken.
    pub courses_remaining: Vec<Course>,
}

/// Progress against one communication option.
#[derive(Debug, Clone, Serialize)]
pub struct OptionProgress {
    /// The option's description, if the document provides one.
    pub description: Option<String>,
    /// Whether every list threshold of the option holds.
    pub met: bool,
}

/// Progress against the communication requirement.
#[derive(Debug, Clone, Serialize)]
pub struct CommunicationProgress {
    /// Per-list progress, keyed by list name.
    pub lists: BTreeMap<String, ListProgress>,
    /// Per-option results; the requirement is satisfiable through any one.
    pub options: Vec<OptionProgress>,
}

impl CommunicationProgress {
    /// Whether at least one option is met (or no options are defined).
    #[must_use]
    pub fn met(&self) -> bool {
        self.options.is_empty() || self.options.iter().any(|option| option.met)
    }
}

/// A breadth result together with its advisory note.
#[derive(Debug, Clone, Serialize)]
pub struct BreadthReport {
    /// Fixed advisory note for the presentation layer.
    pub note: String,
    /// The classification outcome.
    pub result: BreadthOutcome,
}

/// A depth result together with its advisory note.
#[derive(Debug, Clone, Serialize)]
pub struct DepthReport {
    /// Fixed advisory note for the presentation layer.
    pub note: String,
    /// The analysis outcome.
    pub result: DepthOutcome,
}

/// The full evaluation of a student's progress against one major.
#[derive(Debug, Clone, Serialize)]
pub struct MajorProgress {
    /// The major identifier the evaluation ran against.
    pub program: String,
    /// Results for the core course requirements.
    pub required_courses: Vec<EvaluationResult>,
    /// Results for the elective requirements.
    pub elective_requirement: Vec<EvaluationResult>,
    /// Results for the additional requirements.
    pub additional_requirement: Vec<EvaluationResult>,
    /// Communication requirement progress, when the major defines one.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub communication_requirement: Option<CommunicationProgress>,
    /// Breadth classification, when the major requires it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub breadth_requirement: Option<BreadthReport>,
    /// Depth analysis, when the major requires it.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub depth_requirement: Option<DepthReport>,
}

impl MajorProgress {
    /// Whether every evaluated requirement is satisfied.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        let lists = [
            &self.required_courses,
            &self.elective_requirement,
            &self.additional_requirement,
        ];
        lists
            .into_iter()
            .all(|results| results.iter().all(|result| result.met))
            && self
                .communication_requirement
                .as_ref()
                .is_none_or(CommunicationProgress::met)
            && self
                .breadth_requirement
                .as_ref()
                .is_none_or(|report| report.result.satisfied)
            && self
                .depth_requirement
                .as_ref()
                .is_none_or(|report| report.result.is_satisfied())
    }
}

/// The requirement evaluator.
///
/// Borrows the shared read-only data; one instance can serve any number of
/// sequential or concurrent evaluations.
#[derive(Debug, Clone, Copy)]
pub struct Evaluator<'a> {
    catalog: &'a Catalog,
    breadth: &'a BreadthConfig,
    prereqs: &'a PrereqGraph,
}

impl<'a> Evaluator<'a> {
    /// Creates an evaluator over the shared data.
    #[must_use]
    pub const fn new(
        catalog: &'a Catalog,
        breadth: &'a BreadthConfig,
        prereqs: &'a PrereqGraph,
    ) -> Self {
        Self {
            catalog,
            breadth,
            prereqs,
        }
    }

    /// Evaluates a student's course list against a major's rule document.
    ///
    /// `courses` is assumed normalized (the presentation layer uppercases
    /// and trims entries before parsing them into [`CourseCode`]s).
    #[instrument(skip_all, fields(program, courses = courses.len()))]
    #[must_use]
    pub fn evaluate(
        &self,
        program: &str,
        rules: &MajorRules,
        courses: &[CourseCode],
    ) -> MajorProgress {
        let excluded = rules.excluded_codes();
        let student: BTreeSet<CourseCode> = courses.iter().cloned().collect();
        let mut consumed: BTreeSet<CourseCode> = BTreeSet::new();

        let required_courses =
            self.evaluate_list(&rules.required_courses, &student, &mut consumed, &excluded);
        let elective_requirement = self.evaluate_list(
            &rules.elective_requirement,
            &student,
            &mut consumed,
            &excluded,
        );
        let additional_requirement = self.evaluate_list(
            &rules.additional_requirement,
            &student,
            &mut consumed,
            &excluded,
        );

        let communication_requirement = rules
            .communication_requirement
            .as_ref()
            .map(|communication| evaluate_communication(communication, &student, &excluded));

        let breadth_requirement = rules.breadth_requirement.as_ref().map(|_| BreadthReport {
            note: BREADTH_NOTE.to_string(),
            result: breadth::classify(self.breadth, courses),
        });

        let depth_requirement = rules.depth_requirement.as_ref().map(|_| DepthReport {
            note: DEPTH_NOTE.to_string(),
            result: depth::analyze(self.breadth, self.prereqs, courses),
        });

        MajorProgress {
            program: program.to_string(),
            required_courses,
            elective_requirement,
            additional_requirement,
            communication_requirement,
            breadth_requirement,
            depth_requirement,
        }
    }

    fn evaluate_list(
        &self,
        requirements: &[Requirement],
        student: &BTreeSet<CourseCode>,
        consumed: &mut BTreeSet<CourseCode>,
        excluded: &BTreeSet<CourseCode>,
    ) -> Vec<EvaluationResult> {
        requirements
            .iter()
            .map(|requirement| self.evaluate_requirement(requirement, student, consumed, excluded))
            .collect()
    }

    fn evaluate_requirement(
        &self,
        requirement: &Requirement,
        student: &BTreeSet<CourseCode>,
        consumed: &mut BTreeSet<CourseCode>,
        excluded: &BTreeSet<CourseCode>,
    ) -> EvaluationResult {
        let kind = requirement.kind();
        match requirement {
            Requirement::AllRequired(list) => {
                let candidates = filter_excluded(&list.courses, excluded);
                let (taken, remaining) = split_taken(&candidates, student, consumed);
                let met = remaining.is_empty();
                consume(consumed, &taken);
                EvaluationResult {
                    description: describe_course_list(list, "Complete all of"),
                    kind,
                    courses_taken: taken,
                    courses_remaining: remaining,
                    met,
                }
            }
            Requirement::OneRequired(list) => {
                let candidates = filter_excluded(&list.courses, excluded);
                let (taken, remaining) = split_taken(&candidates, student, consumed);
                let met = !taken.is_empty();
                consume(consumed, &taken);
                EvaluationResult {
                    description: describe_course_list(list, "Complete one of"),
                    kind,
                    courses_taken: taken,
                    courses_remaining: remaining,
                    met,
                }
            }
            Requirement::RangeRequired(spec) | Requirement::NRequired(spec) => {
                let candidates = self.range_candidates(spec, excluded);
                let (matched, remaining) = split_taken(&candidates, student, consumed);

                let mut met = matched.len() >= spec.count;
                if kind == RequirementKind::NRequired {
                    met = met
                        && spec
                            .required
                            .iter()
                            .all(|code| matched.iter().any(|course| &course.code == code));
                }

                // Count-bounded requirements credit only the first `count`
                // matches; the surplus stays available to later siblings
                // and is never reported as taken here.
                let taken: Vec<Course> = matched.into_iter().take(spec.count).collect();
                consume(consumed, &taken);
                EvaluationResult {
                    description: describe_range(spec),
                    kind,
                    courses_taken: taken,
                    courses_remaining: remaining,
                    met,
                }
            }
            Requirement::OneGroupRequired(group) => {
                self.evaluate_group(group, kind, student, consumed, excluded)
            }
        }
    }

    /// Evaluates each subgroup as a singleton requirement, sharing the
    /// consumed set so subgroups cannot double-count across each other.
    /// The group is met when any one subgroup is met with nothing
    /// remaining.
    fn evaluate_group(
        &self,
        group: &GroupSpec,
        kind: RequirementKind,
        student: &BTreeSet<CourseCode>,
        consumed: &mut BTreeSet<CourseCode>,
        excluded: &BTreeSet<CourseCode>,
    ) -> EvaluationResult {
        let results = self.evaluate_list(&group.groups, student, consumed, excluded);

        let met = results
            .iter()
            .any(|result| result.met && result.courses_remaining.is_empty());

        let mut taken: Vec<Course> = Vec::new();
        let mut remaining: Vec<Course> = Vec::new();
        let mut seen_taken: BTreeSet<CourseCode> = BTreeSet::new();
        let mut seen_remaining: BTreeSet<CourseCode> = BTreeSet::new();
        let mut descriptions: Vec<String> = Vec::new();

        for result in results {
            descriptions.push(result.description);
            for course in result.courses_taken {
                if seen_taken.insert(course.code.clone()) {
                    taken.push(course);
                }
            }
            for course in result.courses_remaining {
                if seen_remaining.insert(course.code.clone()) {
                    remaining.push(course);
                }
            }
        }

        let description = if descriptions.is_empty() {
            group
                .description
                .clone()
                .unwrap_or_else(|| "Complete one of the following options".to_string())
        } else {
            descriptions.join(" or ")
        };

        EvaluationResult {
            description,
            kind,
            courses_taken: taken,
            courses_remaining: remaining,
            met,
        }
    }

    /// Builds the candidate list for a range-type requirement: explicit
    /// courses first, then resolver matches, then any `required` codes not
    /// already present, deduplicated by code.
    fn range_candidates(&self, spec: &RangeSpec, excluded: &BTreeSet<CourseCode>) -> Vec<Course> {
        let mut candidates: Vec<Course> = Vec::new();
        let mut seen: BTreeSet<CourseCode> = BTreeSet::new();

        for course in &spec.courses {
            if excluded.contains(&course.code) || !seen.insert(course.code.clone()) {
                continue;
            }
            candidates.push(course.clone());
        }

        for course in range::resolve(self.catalog, spec, excluded) {
            if seen.insert(course.code.clone()) {
                candidates.push(course);
            }
        }

        for code in &spec.required {
            if excluded.contains(code) || !seen.insert(code.clone()) {
                continue;
            }
            match self.catalog.get(code) {
                Some(course) => candidates.push(course.clone()),
                None => debug!(%code, "required course not in catalog"),
            }
        }

        candidates
    }
}

/// Evaluates the communication requirement: per-list progress plus
/// count-threshold options. Lists never consume courses.
fn evaluate_communication(
    rules: &CommunicationRules,
    student: &BTreeSet<CourseCode>,
    excluded: &BTreeSet<CourseCode>,
) -> CommunicationProgress {
    let lists: BTreeMap<String, ListProgress> = rules
        .lists
        .iter()
        .map(|(name, list)| {
            let candidates = filter_excluded(&list.courses, excluded);
            let (courses_taken, courses_remaining) =
                split_taken(&candidates, student, &BTreeSet::new());
            (
                name.clone(),
                ListProgress {
                    description: list.description.clone(),
                    courses_taken,
                    courses_remaining,
                },
            )
        })
        .collect();

    let options = rules
        .options
        .iter()
        .map(|option| {
            let met = option.requires.iter().all(|threshold| {
                lists
                    .get(&threshold.list)
                    .is_some_and(|list| list.courses_taken.len() >= threshold.count)
            });
            OptionProgress {
                description: option.description.clone(),
                met,
            }
        })
        .collect();

    CommunicationProgress { lists, options }
}

fn filter_excluded(courses: &[Course], excluded: &BTreeSet<CourseCode>) -> Vec<Course> {
    courses
        .iter()
        .filter(|course| !excluded.contains(&course.code))
        .cloned()
        .collect()
}

/// Splits candidates into (taken, remaining). Taken excludes courses the
/// walk has already consumed; remaining only reflects what the student has
/// not completed, independent of consumption.
fn split_taken(
    candidates: &[Course],
    student: &BTreeSet<CourseCode>,
    consumed: &BTreeSet<CourseCode>,
) -> (Vec<Course>, Vec<Course>) {
    let taken = candidates
        .iter()
        .filter(|course| student.contains(&course.code) && !consumed.contains(&course.code))
        .cloned()
        .collect();
    let remaining = candidates
        .iter()
        .filter(|course| !student.contains(&course.code))
        .cloned()
        .collect();
    (taken, remaining)
}

/// Marks taken courses as consumed.
fn consume(consumed: &mut BTreeSet<CourseCode>, taken: &[Course]) {
    for course in taken {
        consumed.insert(course.code.clone());
    }
}

fn describe_course_list(list: &CourseList, verb: &str) -> String {
    list.description.clone().unwrap_or_else(|| {
        let codes = list
            .courses
            .iter()
            .map(|course| course.code.to_string())
            .collect::<Vec<_>>()
            .join(", ");
        format!("{verb} {codes}")
    })
}

fn describe_range(spec: &RangeSpec) -> String {
    if let Some(description) = &spec.description {
        return description.clone();
    }

    let sources = if spec.range.is_empty() {
        spec.courses
            .iter()
            .map(|course| course.code.to_string())
            .collect::<Vec<_>>()
            .join(", ")
    } else {
        spec.range.join(", ")
    };

    let mut description = format!("Complete {} from {sources}", spec.count);

    let prefixes: Vec<&str> = spec
        .level_ranges
        .iter()
        .chain(&spec.patterns)
        .chain(&spec.category_ranges)
        .map(String::as_str)
        .collect();
    if !prefixes.is_empty() {
        description.push_str(&format!(
            ", or any course starting with {}",
            prefixes.join(" or ")
        ));
    }

    if !spec.required.is_empty() {
        let required = spec
            .required
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join(", ");
        description.push_str(&format!(" (including {required})"));
    }

    description
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let courses = [
            "MATH 106", "MATH 135", "MATH 136", "MATH 137", "MATH 138", "MATH 237", "MATH 239",
            "AFM 101", "AFM 341", "AFM 391", "CS 115", "CS 116", "CS 135", "ECON 101", "ECON 102",
            "ENGL 109", "ENGL 210E", "PHIL 145", "PSYCH 101", "STAT 230", "STAT 231", "PHYS 121",
        ];
        Catalog::from_courses(
            courses
                .iter()
                .map(|code| Course::new(code.parse().unwrap(), String::new())),
        )
    }

    fn breadth_config() -> BreadthConfig {
        serde_json::from_str(
            r#"{
                "humanities": ["ENGL", "PHIL"],
                "social_sciences": ["ECON", "PSYCH"],
                "pure_sciences": ["MATH", "PHYS"],
                "applied_sciences": ["CS", "STAT"],
                "excluded_subjects": ["PD"]
            }"#,
        )
        .unwrap()
    }

    fn codes(input: &[&str]) -> Vec<CourseCode> {
        input.iter().map(|c| c.parse().unwrap()).collect()
    }

    fn taken_codes(result: &EvaluationResult) -> Vec<String> {
        result
            .courses_taken
            .iter()
            .map(|c| c.code.to_string())
            .collect()
    }

    fn rules(doc: &str) -> MajorRules {
        serde_json::from_str(doc).unwrap()
    }

    fn evaluate(rules_doc: &str, student: &[&str]) -> MajorProgress {
        let catalog = catalog();
        let breadth = breadth_config();
        let prereqs = PrereqGraph::default();
        let evaluator = Evaluator::new(&catalog, &breadth, &prereqs);
        evaluator.evaluate("test-major", &rules(rules_doc), &codes(student))
    }

    #[test]
    fn all_required_met_when_nothing_remains() {
        let doc = r#"{
            "required_courses": [
                {"type": "all_required", "courses": [
                    {"code": "MATH 135"}, {"code": "MATH 137"}
                ]}
            ]
        }"#;

        let progress = evaluate(doc, &["MATH 135", "MATH 137"]);
        let result = &progress.required_courses[0];
        assert!(result.met);
        assert!(result.courses_remaining.is_empty());
        assert_eq!(result.description, "Complete all of MATH 135, MATH 137");

        let partial = evaluate(doc, &["MATH 135"]);
        let result = &partial.required_courses[0];
        assert!(!result.met);
        assert_eq!(
            result.courses_remaining[0].code,
            "MATH 137".parse().unwrap()
        );
    }

    #[test]
    fn one_required_needs_a_single_course() {
        let doc = r#"{
            "required_courses": [
                {"type": "one_required", "courses": [
                    {"code": "CS 115"}, {"code": "CS 135"}
                ]}
            ]
        }"#;

        let progress = evaluate(doc, &["CS 135"]);
        assert!(progress.required_courses[0].met);
        assert_eq!(
            progress.required_courses[0].description,
            "Complete one of CS 115, CS 135"
        );

        let progress = evaluate(doc, &["ECON 101"]);
        assert!(!progress.required_courses[0].met);
    }

    #[test]
    fn range_required_counts_taken_in_range() {
        let doc = r#"{
            "required_courses": [
                {"type": "range_required", "count": 2, "range": ["MATH135-MATH138"]}
            ]
        }"#;

        let progress = evaluate(doc, &["MATH 135", "MATH 138", "ECON 101"]);
        let result = &progress.required_courses[0];
        assert!(result.met);
        assert_eq!(taken_codes(result), ["MATH 135", "MATH 138"]);

        let progress = evaluate(doc, &["MATH 135"]);
        assert!(!progress.required_courses[0].met);
    }

    #[test]
    fn n_required_also_needs_the_required_codes() {
        let doc = r#"{
            "required_courses": [
                {"type": "n_required", "count": 2,
                 "range": ["MATH135-MATH239"],
                 "required": ["MATH 237"]}
            ]
        }"#;

        // Two courses in range, but MATH 237 missing.
        let progress = evaluate(doc, &["MATH 135", "MATH 136"]);
        assert!(!progress.required_courses[0].met);

        let progress = evaluate(doc, &["MATH 135", "MATH 237"]);
        assert!(progress.required_courses[0].met);
    }

    #[test]
    fn consumption_prevents_double_counting() {
        let doc = r#"{
            "required_courses": [
                {"type": "all_required", "courses": [{"code": "MATH 135"}]},
                {"type": "one_required", "courses": [
                    {"code": "MATH 135"}, {"code": "MATH 136"}
                ]}
            ]
        }"#;

        let progress = evaluate(doc, &["MATH 135"]);
        assert!(progress.required_courses[0].met);
        // MATH 135 was consumed by the first requirement; the second sees
        // nothing taken.
        assert!(!progress.required_courses[1].met);
        assert!(progress.required_courses[1].courses_taken.is_empty());
    }

    #[test]
    fn count_bounded_consumption_leaves_surplus_available() {
        let doc = r#"{
            "required_courses": [
                {"type": "range_required", "count": 1, "range": ["MATH135-MATH138"]},
                {"type": "one_required", "courses": [{"code": "MATH 138"}]}
            ]
        }"#;

        // The range requirement takes both courses but only consumes the
        // first `count`; MATH 138 stays available to the sibling.
        let progress = evaluate(doc, &["MATH 135", "MATH 138"]);
        assert!(progress.required_courses[0].met);
        assert!(progress.required_courses[1].met);
    }

    #[test]
    fn taken_union_has_no_duplicates_across_requirements() {
        let doc = r#"{
            "required_courses": [
                {"type": "range_required", "count": 2, "range": ["MATH135-MATH138"]},
                {"type": "range_required", "count": 2, "range": ["MATH106-MATH239"]}
            ]
        }"#;

        let progress = evaluate(doc, &["MATH 135", "MATH 136", "MATH 137", "MATH 138"]);
        let mut all_taken: Vec<String> = progress
            .required_courses
            .iter()
            .flat_map(|result| taken_codes(result))
            .collect();
        let total = all_taken.len();
        all_taken.sort();
        all_taken.dedup();
        assert_eq!(all_taken.len(), total);
    }

    #[test]
    fn excluded_courses_never_appear() {
        let doc = r#"{
            "excluded_courses": [{"code": "MATH 137"}],
            "required_courses": [
                {"type": "range_required", "count": 2, "range": ["MATH135-MATH138"]}
            ]
        }"#;

        let progress = evaluate(doc, &["MATH 135", "MATH 137"]);
        let result = &progress.required_courses[0];
        assert!(!result.met);
        assert_eq!(taken_codes(result), ["MATH 135"]);
        assert!(
            result
                .courses_remaining
                .iter()
                .all(|course| course.code != "MATH 137".parse().unwrap())
        );
    }

    #[test]
    fn group_met_by_one_fully_satisfied_subgroup() {
        let doc = r#"{
            "required_courses": [
                {"type": "one_group_required", "groups": [
                    {"type": "all_required", "courses": [{"code": "STAT 230"}]},
                    {"type": "all_required", "courses": [
                        {"code": "ECON 101"}, {"code": "ECON 102"}
                    ]}
                ]}
            ]
        }"#;

        // Subgroup A fully met, subgroup B partially met.
        let progress = evaluate(doc, &["STAT 230", "ECON 101"]);
        let result = &progress.required_courses[0];
        assert!(result.met);
        assert_eq!(taken_codes(result), ["STAT 230", "ECON 101"]);
        assert_eq!(
            result.description,
            "Complete all of STAT 230 or Complete all of ECON 101, ECON 102"
        );

        // Neither subgroup fully met.
        let progress = evaluate(doc, &["ECON 101"]);
        assert!(!progress.required_courses[0].met);
    }

    #[test]
    fn groups_share_consumption() {
        let doc = r#"{
            "required_courses": [
                {"type": "one_group_required", "groups": [
                    {"type": "one_required", "courses": [{"code": "MATH 135"}]},
                    {"type": "one_required", "courses": [{"code": "MATH 135"}]}
                ]}
            ]
        }"#;

        let progress = evaluate(doc, &["MATH 135"]);
        let result = &progress.required_courses[0];
        // The course is credited once; the merged taken list holds it once.
        assert_eq!(taken_codes(result), ["MATH 135"]);
        assert!(result.met);
    }

    #[test]
    fn communication_options_check_list_thresholds() {
        let doc = r#"{
            "communication_requirement": {
                "list_1": {"description": "List I", "courses": [
                    {"code": "ENGL 109"}, {"code": "ENGL 210E"}
                ]},
                "list_2": {"description": "List II", "courses": [
                    {"code": "PHIL 145"}
                ]},
                "options": [
                    {"description": "Two from List I",
                     "requires": [{"list": "list_1", "count": 2}]},
                    {"description": "One from each list",
                     "requires": [{"list": "list_1", "count": 1},
                                   {"list": "list_2", "count": 1}]}
                ]
            }
        }"#;

        let progress = evaluate(doc, &["ENGL 109", "PHIL 145"]);
        let communication = progress.communication_requirement.unwrap();
        assert!(!communication.options[0].met);
        assert!(communication.options[1].met);
        assert!(communication.met());

        let list_one = &communication.lists["list_1"];
        assert_eq!(list_one.courses_taken.len(), 1);
        assert_eq!(list_one.courses_remaining.len(), 1);
    }

    #[test]
    fn breadth_and_depth_reports_carry_notes() {
        let doc = r#"{
            "breadth_requirement": {"source": "breadth.json"},
            "depth_requirement": {"source": "depth.json"}
        }"#;

        let progress = evaluate(doc, &["ENGL 210E", "PHIL 145", "ECON 101", "PSYCH 101",
                                        "MATH 135", "CS 115"]);

        let breadth = progress.breadth_requirement.unwrap();
        assert!(breadth.result.satisfied);
        assert!(!breadth.note.is_empty());

        let depth = progress.depth_requirement.unwrap();
        assert!(!depth.result.is_satisfied());
        assert!(!depth.note.is_empty());
    }

    #[test]
    fn evaluation_is_idempotent() {
        let doc = r#"{
            "required_courses": [
                {"type": "range_required", "count": 2, "range": ["MATH135-MATH138"]},
                {"type": "one_required", "courses": [{"code": "CS 115"}]}
            ],
            "breadth_requirement": {"source": "breadth.json"}
        }"#;

        let student = ["MATH 135", "MATH 136", "CS 115"];
        let first = serde_json::to_value(evaluate(doc, &student)).unwrap();
        let second = serde_json::to_value(evaluate(doc, &student)).unwrap();
        assert_eq!(first, second);
    }

    #[test]
    fn generated_range_description_mentions_prefixes_and_required() {
        let doc = r#"{
            "required_courses": [
                {"type": "n_required", "count": 3,
                 "range": ["MATH135-MATH138"],
                 "level_ranges": ["AFM3"],
                 "required": ["MATH 137"]}
            ]
        }"#;

        let progress = evaluate(doc, &[]);
        assert_eq!(
            progress.required_courses[0].description,
            "Complete 3 from MATH135-MATH138, or any course starting with AFM3 (including MATH 137)"
        );
    }

    #[test]
    fn is_complete_requires_every_section() {
        let doc = r#"{
            "required_courses": [
                {"type": "all_required", "courses": [{"code": "MATH 135"}]}
            ]
        }"#;

        assert!(evaluate(doc, &["MATH 135"]).is_complete());
        assert!(!evaluate(doc, &[]).is_complete());
    }
}
