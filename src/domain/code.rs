use std::{fmt, str::FromStr, sync::LazyLock};

use non_empty_string::NonEmptyString;
use regex::Regex;

/// A validated subject prefix: the leading alphabetic portion of a course
/// code (e.g. `MATH`).
///
/// Subjects contain only uppercase ASCII letters.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct Subject(NonEmptyString);

impl Subject {
    /// Creates a new `Subject` from a string.
    ///
    /// # Errors
    ///
    /// Returns `InvalidSubjectError` if the string is empty or contains
    /// characters other than uppercase letters (A-Z).
    pub fn new(s: String) -> Result<Self, InvalidSubjectError> {
        let non_empty =
            NonEmptyString::new(s.clone()).map_err(|_| InvalidSubjectError(s.clone()))?;

        if !s.chars().all(|c| c.is_ascii_uppercase()) {
            return Err(InvalidSubjectError(s));
        }

        Ok(Self(non_empty))
    }

    /// Returns the string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl TryFrom<&str> for Subject {
    type Error = InvalidSubjectError;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::new(value.to_string())
    }
}

impl AsRef<str> for Subject {
    fn as_ref(&self) -> &str {
        self.0.as_str()
    }
}

impl fmt::Display for Subject {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl FromStr for Subject {
    type Err = InvalidSubjectError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::new(s.to_string())
    }
}

impl serde::Serialize for Subject {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> serde::Deserialize<'de> for Subject {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        Self::new(s).map_err(serde::de::Error::custom)
    }
}

/// Error returned when a string is not a valid subject prefix.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("Invalid subject '{0}': must be non-empty and contain only uppercase letters (A-Z)")]
pub struct InvalidSubjectError(String);

/// Matches `SUBJECT NNN[SUFFIX]` with optional whitespace and leading zeros.
///
/// Catalog rows, scraped documents, and user input carry codes in several
/// shapes (`"MATH 237"`, `"math237"`, `"CS 007"`); this accepts all of
/// them after uppercasing.
static CODE_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^([A-Z]{2,10})\s*0*([0-9]{1,3})([A-Z]{0,2})$").expect("pattern is valid")
});

/// A normalized course code.
///
/// Format: `{SUBJECT} {NUMBER}{SUFFIX}`, where:
/// - `SUBJECT` is an uppercase alphabetic prefix (e.g. `MATH`, `COMMST`)
/// - `NUMBER` is the course number with leading zeros stripped (e.g. `237`)
/// - `SUFFIX` is an optional trailing letter pair (e.g. the `R` in `ENGL
///   129R`)
///
/// The canonical form uses a single space (`"MATH 237"`); [`Self::key`]
/// yields the space-stripped form (`"MATH237"`) used as a prerequisite-graph
/// node key. Codes compare case-insensitively because parsing uppercases the
/// input.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord)]
pub struct CourseCode {
    subject: Subject,
    number: u16,
    suffix: String,
}

impl CourseCode {
    /// The subject prefix of this code.
    #[must_use]
    pub const fn subject(&self) -> &Subject {
        &self.subject
    }

    /// The course number, which doubles as the course level (`237` is a
    /// 200-level course).
    #[must_use]
    pub const fn number(&self) -> u16 {
        self.number
    }

    /// The trailing letter suffix, possibly empty.
    #[must_use]
    pub fn suffix(&self) -> &str {
        &self.suffix
    }

    /// The space-stripped form used as a graph-node key, e.g. `"MATH237"`.
    #[must_use]
    pub fn key(&self) -> String {
        format!("{}{}{}", self.subject, self.number, self.suffix)
    }
}

impl fmt::Display for CourseCode {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} {}{}", self.subject, self.number, self.suffix)
    }
}

/// Errors that can occur when parsing a course code.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum Error {
    /// The string does not match the `SUBJECT NNN[SUFFIX]` pattern.
    #[error("Invalid course code: {0}")]
    Syntax(String),
}

impl FromStr for CourseCode {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let normalized = s.trim().to_uppercase();
        let captures = CODE_PATTERN
            .captures(&normalized)
            .ok_or_else(|| Error::Syntax(s.to_string()))?;

        let subject = Subject::new(captures[1].to_string())
            .map_err(|_| Error::Syntax(s.to_string()))?;
        let number = captures[2]
            .parse()
            .map_err(|_| Error::Syntax(s.to_string()))?;
        let suffix = captures[3].to_string();

        Ok(Self {
            subject,
            number,
            suffix,
        })
    }
}

impl TryFrom<&str> for CourseCode {
    type Error = Error;

    fn try_from(value: &str) -> Result<Self, Self::Error> {
        Self::from_str(value)
    }
}

impl serde::Serialize for CourseCode {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

impl<'de> serde::Deserialize<'de> for CourseCode {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let s = <String as serde::Deserialize>::deserialize(deserializer)?;
        s.parse().map_err(serde::de::Error::custom)
    }
}
