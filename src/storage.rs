//! Filesystem loading for the audit data directory.
//!
//! A data root has the layout the upstream pipeline produces:
//!
//! ```text
//! <root>/course-data/courses.json    catalog snapshot
//! <root>/course-data/prereqs.json    prerequisite scrape
//! <root>/requirements/breadth.json   shared breadth configuration
//! <root>/requirements/<major>.json   one rule document per major
//! ```
//!
//! Everything is loaded once by [`DataDir::open`] and is immutable
//! thereafter; evaluations borrow the loaded documents read-only.

use std::{
    collections::BTreeMap,
    io,
    path::{Path, PathBuf},
};

use rayon::iter::{IntoParallelIterator, ParallelIterator};
use serde::Deserialize;
use tracing::{debug, instrument, warn};
use walkdir::WalkDir;

use crate::{
    domain::{BreadthConfig, Catalog, Course, CourseCode, MajorRules},
    engine::{
        Evaluator,
        prereq::{PrereqGraph, ScrapeDocument},
    },
};

/// File stems under `requirements/` that are not major rule documents.
const NON_MAJOR_STEMS: [&str; 2] = ["breadth", "depth"];

/// Errors that can occur while loading the data directory.
#[derive(Debug, thiserror::Error)]
pub enum LoadError {
    /// A document could not be read.
    #[error("failed to read {path}")]
    Io {
        /// The document path.
        path: PathBuf,
        /// The underlying I/O error.
        #[source]
        source: io::Error,
    },
    /// A document could not be parsed.
    #[error("failed to parse {path}")]
    Parse {
        /// The document path.
        path: PathBuf,
        /// The underlying parse error.
        #[source]
        source: serde_json::Error,
    },
}

/// A catalog row as persisted; codes are validated during conversion so a
/// handful of unparseable rows cannot reject the whole snapshot.
#[derive(Debug, Deserialize)]
struct CatalogRecord {
    code: String,
    #[serde(default)]
    title: String,
}

/// The loaded, immutable audit data: catalog, breadth configuration,
/// prerequisite graph, and per-major rule documents.
#[derive(Debug)]
pub struct DataDir {
    root: PathBuf,
    catalog: Catalog,
    breadth: BreadthConfig,
    prereqs: PrereqGraph,
    majors: BTreeMap<String, MajorRules>,
}

impl DataDir {
    /// Opens a data root and loads every document.
    ///
    /// Major rule documents are discovered by scanning `requirements/` for
    /// `.json` files and parsed in parallel; the file stem is the major
    /// identifier.
    ///
    /// # Errors
    ///
    /// Returns a [`LoadError`] when any document cannot be read or parsed.
    #[instrument]
    pub fn open(root: PathBuf) -> Result<Self, LoadError> {
        let records: Vec<CatalogRecord> = read_json(&root.join("course-data/courses.json"))?;
        let catalog = Catalog::from_courses(records.into_iter().filter_map(|record| {
            match record.code.parse::<CourseCode>() {
                Ok(code) => Some(Course::new(code, record.title)),
                Err(_) => {
                    warn!(code = %record.code, "unparseable catalog row skipped");
                    None
                }
            }
        }));
        debug!(courses = catalog.len(), "catalog loaded");

        let scrape: ScrapeDocument = read_json(&root.join("course-data/prereqs.json"))?;
        let prereqs = PrereqGraph::from_scrape(&scrape);
        debug!(nodes = prereqs.len(), "prerequisite graph built");

        let breadth: BreadthConfig = read_json(&root.join("requirements/breadth.json"))?;

        let major_paths: Vec<PathBuf> = WalkDir::new(root.join("requirements"))
            .into_iter()
            .filter_map(Result::ok)
            .filter(|entry| entry.file_type().is_file())
            .map(walkdir::DirEntry::into_path)
            .filter(|path| {
                path.extension().is_some_and(|ext| ext == "json")
                    && path
                        .file_stem()
                        .and_then(|stem| stem.to_str())
                        .is_some_and(|stem| !NON_MAJOR_STEMS.contains(&stem))
            })
            .collect();

        let majors: BTreeMap<String, MajorRules> = major_paths
            .into_par_iter()
            .map(|path| {
                let rules: MajorRules = read_json(&path)?;
                let stem = path
                    .file_stem()
                    .and_then(|stem| stem.to_str())
                    .unwrap_or_default()
                    .to_string();
                Ok((stem, rules))
            })
            .collect::<Result<_, LoadError>>()?;
        debug!(majors = majors.len(), "rule documents loaded");

        Ok(Self {
            root,
            catalog,
            breadth,
            prereqs,
            majors,
        })
    }

    /// The data root this directory was opened from.
    #[must_use]
    pub fn root(&self) -> &Path {
        &self.root
    }

    /// The loaded catalog.
    #[must_use]
    pub const fn catalog(&self) -> &Catalog {
        &self.catalog
    }

    /// The loaded breadth configuration.
    #[must_use]
    pub const fn breadth(&self) -> &BreadthConfig {
        &self.breadth
    }

    /// The prerequisite graph built from the scrape document.
    #[must_use]
    pub const fn prereqs(&self) -> &PrereqGraph {
        &self.prereqs
    }

    /// The rule document for a major, if one was loaded.
    #[must_use]
    pub fn major(&self, id: &str) -> Option<&MajorRules> {
        self.majors.get(id)
    }

    /// The loaded major identifiers, sorted.
    pub fn majors(&self) -> impl Iterator<Item = &str> {
        self.majors.keys().map(String::as_str)
    }

    /// An evaluator borrowing this directory's shared data.
    #[must_use]
    pub const fn evaluator(&self) -> Evaluator<'_> {
        Evaluator::new(&self.catalog, &self.breadth, &self.prereqs)
    }
}

fn read_json<T: serde::de::DeserializeOwned>(path: &Path) -> Result<T, LoadError> {
    let content = std::fs::read_to_string(path).map_err(|source| LoadError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&content).map_err(|source| LoadError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

#[cfg(test)]
mod tests {
    use std::fs;

    use super::*;

    fn write_data_dir(root: &Path) {
        fs::create_dir_all(root.join("course-data")).unwrap();
        fs::create_dir_all(root.join("requirements")).unwrap();

        fs::write(
            root.join("course-data/courses.json"),
            r#"[
                {"code": "MATH 135", "title": "Algebra"},
                {"code": "MATH 136", "title": "Linear Algebra 1"},
                {"code": "not a code", "title": "Junk row"},
                {"code": "CS 115", "title": "Intro to CS"}
            ]"#,
        )
        .unwrap();

        fs::write(
            root.join("course-data/prereqs.json"),
            r#"{
                "MATH 136": {
                    "prereq_text": "MATH 135 required.",
                    "prereq_codes": ["MATH 135"],
                    "scraped_at": "2024-11-03T04:12:00Z",
                    "source": "https://example.test/MATH136"
                }
            }"#,
        )
        .unwrap();

        fs::write(
            root.join("requirements/breadth.json"),
            r#"{
                "humanities": ["ENGL"],
                "social_sciences": ["ECON"],
                "pure_sciences": ["MATH"],
                "applied_sciences": ["CS"],
                "excluded_subjects": []
            }"#,
        )
        .unwrap();

        fs::write(
            root.join("requirements/mathematics.json"),
            r#"{
                "required_courses": [
                    {"type": "all_required", "courses": [
                        {"code": "MATH 135", "title": "Algebra"}
                    ]}
                ]
            }"#,
        )
        .unwrap();
    }

    #[test]
    fn open_loads_every_document() {
        let tmp = tempfile::tempdir().unwrap();
        write_data_dir(tmp.path());

        let data = DataDir::open(tmp.path().to_path_buf()).unwrap();

        // The junk catalog row is dropped, not fatal.
        assert_eq!(data.catalog().len(), 3);
        assert_eq!(data.prereqs().prerequisites("MATH136"), ["MATH135"]);
        assert_eq!(data.majors().collect::<Vec<_>>(), ["mathematics"]);
        assert!(data.major("mathematics").is_some());
        assert!(data.major("underwater-basketry").is_none());
    }

    #[test]
    fn breadth_document_is_not_a_major() {
        let tmp = tempfile::tempdir().unwrap();
        write_data_dir(tmp.path());

        let data = DataDir::open(tmp.path().to_path_buf()).unwrap();
        assert!(data.major("breadth").is_none());
    }

    #[test]
    fn missing_catalog_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();

        let error = DataDir::open(tmp.path().to_path_buf()).unwrap_err();
        assert!(matches!(error, LoadError::Io { .. }));
    }

    #[test]
    fn malformed_rule_document_is_fatal() {
        let tmp = tempfile::tempdir().unwrap();
        write_data_dir(tmp.path());
        fs::write(
            tmp.path().join("requirements/broken.json"),
            r#"{"required_courses": [{"type": "two_required"}]}"#,
        )
        .unwrap();

        let error = DataDir::open(tmp.path().to_path_buf()).unwrap_err();
        assert!(matches!(error, LoadError::Parse { .. }));
    }

    #[test]
    fn end_to_end_evaluation_through_data_dir() {
        let tmp = tempfile::tempdir().unwrap();
        write_data_dir(tmp.path());

        let data = DataDir::open(tmp.path().to_path_buf()).unwrap();
        let rules = data.major("mathematics").unwrap();
        let courses = vec!["MATH 135".parse().unwrap()];
        let progress = data.evaluator().evaluate("mathematics", rules, &courses);

        assert!(progress.is_complete());
    }
}
