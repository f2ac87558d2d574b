use std::collections::BTreeSet;

use serde::{Deserialize, Serialize};

use crate::domain::Subject;

/// The four breadth categories, in reporting order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BreadthCategory {
    /// Humanities.
    Humanities,
    /// Social sciences.
    SocialSciences,
    /// Pure sciences.
    PureSciences,
    /// Applied sciences.
    AppliedSciences,
}

impl BreadthCategory {
    /// Every category, in reporting order.
    pub const ALL: [Self; 4] = [
        Self::Humanities,
        Self::SocialSciences,
        Self::PureSciences,
        Self::AppliedSciences,
    ];

    /// How many courses the category requires.
    #[must_use]
    pub const fn required_count(self) -> usize {
        match self {
            Self::Humanities | Self::SocialSciences => 2,
            Self::PureSciences | Self::AppliedSciences => 1,
        }
    }

    /// The label used in configuration documents and status strings.
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Humanities => "humanities",
            Self::SocialSciences => "social_sciences",
            Self::PureSciences => "pure_sciences",
            Self::AppliedSciences => "applied_sciences",
        }
    }
}

impl std::fmt::Display for BreadthCategory {
    fn fmt(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// The shared breadth configuration document: one subject set per category,
/// plus subjects excluded from breadth and depth entirely.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct BreadthConfig {
    #[serde(default)]
    humanities: BTreeSet<Subject>,
    #[serde(default)]
    social_sciences: BTreeSet<Subject>,
    #[serde(default)]
    pure_sciences: BTreeSet<Subject>,
    #[serde(default)]
    applied_sciences: BTreeSet<Subject>,
    #[serde(default)]
    excluded_subjects: BTreeSet<Subject>,
}

impl BreadthConfig {
    /// The subject set for a category.
    #[must_use]
    pub const fn subjects(&self, category: BreadthCategory) -> &BTreeSet<Subject> {
        match category {
            BreadthCategory::Humanities => &self.humanities,
            BreadthCategory::SocialSciences => &self.social_sciences,
            BreadthCategory::PureSciences => &self.pure_sciences,
            BreadthCategory::AppliedSciences => &self.applied_sciences,
        }
    }

    /// Whether the subject is excluded from breadth and depth analysis.
    #[must_use]
    pub fn is_excluded(&self, subject: &Subject) -> bool {
        self.excluded_subjects.contains(subject)
    }

    /// Whether the subject appears in at least one category set.
    ///
    /// Only breadth-eligible subjects can demonstrate depth.
    #[must_use]
    pub fn is_eligible(&self, subject: &Subject) -> bool {
        BreadthCategory::ALL
            .iter()
            .any(|&category| self.subjects(category).contains(subject))
    }
}
