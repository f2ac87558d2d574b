//! Course range resolution.
//!
//! Expands the four candidate mechanisms of a [`RangeSpec`] (numeric
//! `range` spans, `level_ranges`/`patterns` hundred-blocks, bare-prefix
//! `category_ranges`, and explicit `courses`) against the catalog into a
//! single ordered, deduplicated, exclusion-filtered course list.

use std::collections::BTreeSet;

use tracing::debug;

use crate::domain::{Catalog, Course, CourseCode, rules::RangeSpec};

/// A parsed `range` entry.
enum SpanToken {
    /// A dash-free entry: an exact catalog lookup.
    Exact(CourseCode),
    /// A `"START-END"` span sharing one subject prefix.
    Numeric { prefix: String, start: u16, end: u16 },
}

/// A parsed `level_ranges`/`patterns` entry: a prefix with an optional
/// hundred-block window.
struct BlockToken {
    prefix: String,
    window: Option<(u16, u16)>,
}

/// Resolves a range specification into candidate courses.
///
/// Matches are collected range entries first, then level/pattern blocks,
/// then category prefixes, then explicit courses, each internally in
/// catalog iteration order. The concatenation is deduplicated by code
/// (first occurrence wins) and filtered against `excluded`. Tokens that do
/// not parse are skipped.
#[must_use]
pub fn resolve(catalog: &Catalog, spec: &RangeSpec, excluded: &BTreeSet<CourseCode>) -> Vec<Course> {
    let mut matches: Vec<&Course> = Vec::new();

    for token in &spec.range {
        match parse_span(token) {
            Some(SpanToken::Exact(code)) => matches.extend(catalog.get(&code)),
            Some(SpanToken::Numeric { prefix, start, end }) => {
                matches.extend(catalog.iter().filter(|course| {
                    course.code.to_string().starts_with(&prefix)
                        && (start..=end).contains(&course.code.number())
                }));
            }
            None => debug!(%token, "unresolvable range entry skipped"),
        }
    }

    for token in spec.level_ranges.iter().chain(&spec.patterns) {
        let Some(block) = parse_block(token) else {
            debug!(%token, "unresolvable level range skipped");
            continue;
        };
        matches.extend(catalog.iter().filter(|course| {
            course.code.to_string().starts_with(&block.prefix)
                && block
                    .window
                    .is_none_or(|(low, high)| (low..=high).contains(&course.code.number()))
        }));
    }

    for prefix in &spec.category_ranges {
        let prefix = prefix.trim().to_uppercase();
        if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
            debug!(token = %prefix, "unresolvable category range skipped");
            continue;
        }
        // Match on the space-stripped key and require a digit right after
        // the prefix, so "CS" cannot match CSE courses.
        matches.extend(catalog.iter().filter(|course| {
            let key = course.code.key();
            key.starts_with(&prefix)
                && key[prefix.len()..]
                    .chars()
                    .next()
                    .is_some_and(|c| c.is_ascii_digit())
        }));
    }

    matches.extend(&spec.courses);

    let mut seen = BTreeSet::new();
    matches
        .into_iter()
        .filter(|course| !excluded.contains(&course.code) && seen.insert(course.code.clone()))
        .cloned()
        .collect()
}

fn parse_span(token: &str) -> Option<SpanToken> {
    let token = token.trim();
    let Some((start, end)) = token.split_once('-') else {
        return token.parse().ok().map(SpanToken::Exact);
    };

    let prefix: String = start
        .trim()
        .chars()
        .take_while(char::is_ascii_alphabetic)
        .collect::<String>()
        .to_uppercase();
    if prefix.is_empty() {
        return None;
    }

    Some(SpanToken::Numeric {
        prefix,
        start: embedded_number(start)?,
        end: embedded_number(end)?,
    })
}

/// The first contiguous digit run in the token.
fn embedded_number(token: &str) -> Option<u16> {
    let digits: String = token
        .chars()
        .skip_while(|c| !c.is_ascii_digit())
        .take_while(char::is_ascii_digit)
        .collect();
    digits.parse().ok()
}

fn parse_block(token: &str) -> Option<BlockToken> {
    let token = token.trim().to_uppercase();

    let (prefix, window) = match token.chars().last() {
        Some(last) if last.is_ascii_digit() => {
            let hundreds = u16::try_from(last.to_digit(10)?).ok()?;
            let low = hundreds * 100;
            (token[..token.len() - 1].to_string(), Some((low, low + 99)))
        }
        Some(_) => (token, None),
        None => return None,
    };

    if prefix.is_empty() || !prefix.chars().all(|c| c.is_ascii_uppercase()) {
        return None;
    }

    Some(BlockToken { prefix, window })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn catalog() -> Catalog {
        let courses = [
            ("MATH 106", "Applied Linear Algebra 1"),
            ("MATH 135", "Algebra"),
            ("MATH 136", "Linear Algebra 1"),
            ("MATH 137", "Calculus 1"),
            ("MATH 138", "Calculus 2"),
            ("MATH 235", "Linear Algebra 2"),
            ("AFM 101", "Financial Accounting"),
            ("AFM 341", "AIS"),
            ("AFM 391", "Intermediate Financial Accounting"),
            ("CS 115", "Intro to CS 1"),
            ("CS 116", "Intro to CS 2"),
            ("CSE 101", "Society and Computing"),
            ("ECON 101", "Microeconomics"),
        ];
        Catalog::from_courses(
            courses
                .iter()
                .map(|(code, title)| Course::new(code.parse().unwrap(), (*title).to_string())),
        )
    }

    fn codes(courses: &[Course]) -> Vec<String> {
        courses.iter().map(|c| c.code.to_string()).collect()
    }

    #[test]
    fn numeric_span_is_inclusive_and_ordered() {
        let spec = RangeSpec {
            range: vec!["MATH135-MATH138".to_string()],
            ..RangeSpec::default()
        };

        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(
            codes(&resolved),
            ["MATH 135", "MATH 136", "MATH 137", "MATH 138"]
        );
    }

    #[test]
    fn dash_free_entry_is_an_exact_lookup() {
        let spec = RangeSpec {
            range: vec!["ECON101".to_string(), "ECON 999".to_string()],
            ..RangeSpec::default()
        };

        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(codes(&resolved), ["ECON 101"]);
    }

    #[test]
    fn overlapping_level_range_deduplicates() {
        let spec = RangeSpec {
            range: vec!["MATH135-MATH138".to_string()],
            level_ranges: vec!["MATH1".to_string()],
            ..RangeSpec::default()
        };

        // MATH 135..138 are also matched by the MATH1 block; the span
        // occurrence wins and MATH 106 joins from the block.
        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(
            codes(&resolved),
            ["MATH 135", "MATH 136", "MATH 137", "MATH 138", "MATH 106"]
        );
    }

    #[test]
    fn level_range_selects_a_hundred_block() {
        let spec = RangeSpec {
            level_ranges: vec!["AFM3".to_string()],
            ..RangeSpec::default()
        };

        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(codes(&resolved), ["AFM 341", "AFM 391"]);
    }

    #[test]
    fn bare_prefix_matches_every_level() {
        let spec = RangeSpec {
            patterns: vec!["AFM".to_string()],
            ..RangeSpec::default()
        };

        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(codes(&resolved), ["AFM 101", "AFM 341", "AFM 391"]);
    }

    #[test]
    fn category_prefix_requires_following_digit() {
        let spec = RangeSpec {
            category_ranges: vec!["CS".to_string()],
            ..RangeSpec::default()
        };

        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(codes(&resolved), ["CS 115", "CS 116"]);
    }

    #[test]
    fn explicit_courses_come_last_and_pass_exclusion() {
        let spec = RangeSpec {
            range: vec!["MATH135-MATH136".to_string()],
            courses: vec![
                Course::new("ECON 101".parse().unwrap(), String::new()),
                Course::new("MATH 135".parse().unwrap(), String::new()),
            ],
            ..RangeSpec::default()
        };

        let excluded: BTreeSet<CourseCode> = ["ECON 101".parse().unwrap()].into();
        let resolved = resolve(&catalog(), &spec, &excluded);
        assert_eq!(codes(&resolved), ["MATH 135", "MATH 136"]);
    }

    #[test]
    fn excluded_codes_never_resolve() {
        let spec = RangeSpec {
            range: vec!["MATH135-MATH138".to_string()],
            ..RangeSpec::default()
        };

        let excluded: BTreeSet<CourseCode> = ["MATH 137".parse().unwrap()].into();
        let resolved = resolve(&catalog(), &spec, &excluded);
        assert_eq!(codes(&resolved), ["MATH 135", "MATH 136", "MATH 138"]);
    }

    #[test]
    fn malformed_tokens_are_ignored() {
        let spec = RangeSpec {
            range: vec!["-".to_string(), "135-138".to_string(), "MATH135".to_string()],
            level_ranges: vec![String::new(), "1MATH".to_string()],
            category_ranges: vec!["42".to_string()],
            ..RangeSpec::default()
        };

        let resolved = resolve(&catalog(), &spec, &BTreeSet::new());
        assert_eq!(codes(&resolved), ["MATH 135"]);
    }
}
