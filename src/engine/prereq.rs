//! The prerequisite graph and the scraped document it is built from.
//!
//! Scrape entries are keyed by raw course code and carry the extracted
//! prerequisite codes alongside provenance fields. Only `prereq_codes`
//! feeds the graph; entries whose codes fail normalization are skipped.
//! A course absent from the graph has no known prerequisites; absence is
//! never an error.

use std::collections::{BTreeMap, HashMap};

use chrono::{DateTime, Utc};
use petgraph::{algo::is_cyclic_directed, graph::DiGraph, graph::NodeIndex};
use serde::Deserialize;
use tracing::{debug, warn};

use crate::domain::CourseCode;

/// One scraped prerequisite record.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct ScrapedPrereq {
    /// The free-text prerequisite description, as scraped.
    #[serde(default)]
    pub prereq_text: Option<String>,
    /// Course codes extracted from the text.
    #[serde(default)]
    pub prereq_codes: Vec<String>,
    /// When the record was scraped.
    #[serde(default)]
    pub scraped_at: Option<DateTime<Utc>>,
    /// The page the record was scraped from.
    #[serde(default)]
    pub source: Option<String>,
}

/// The persisted scrape result: raw course code → scraped record.
///
/// A `BTreeMap` so graph construction order (and therefore stored
/// prerequisite order) is deterministic.
pub type ScrapeDocument = BTreeMap<String, ScrapedPrereq>;

/// A directed graph from course to prerequisite, keyed by the
/// space-stripped code form (`"MATH237"`).
#[derive(Debug, Default)]
pub struct PrereqGraph {
    graph: DiGraph<String, ()>,
    nodes: HashMap<String, NodeIndex>,
}

impl PrereqGraph {
    /// Builds the graph from a scrape document.
    ///
    /// Keys and prerequisite codes that fail normalization are skipped.
    #[must_use]
    pub fn from_scrape(document: &ScrapeDocument) -> Self {
        let mut graph = Self::default();

        for (raw_code, record) in document {
            let Ok(code) = raw_code.parse::<CourseCode>() else {
                debug!(code = %raw_code, "unparseable scrape key skipped");
                continue;
            };

            let prereqs = record.prereq_codes.iter().filter_map(|raw| {
                raw.parse::<CourseCode>()
                    .inspect_err(|_| debug!(code = %raw, "unparseable prerequisite skipped"))
                    .ok()
            });
            graph.insert(&code, prereqs);
        }

        if graph.is_cyclic() {
            warn!("scraped prerequisite data contains cycles");
        }

        graph
    }

    /// Records the prerequisites of a course, in order.
    ///
    /// Repeated prerequisites are recorded once.
    pub fn insert(
        &mut self,
        course: &CourseCode,
        prereqs: impl IntoIterator<Item = CourseCode>,
    ) {
        let from = self.node(course.key());
        for prereq in prereqs {
            let to = self.node(prereq.key());
            self.graph.update_edge(from, to, ());
        }
    }

    /// The recorded prerequisites of the course with the given node key,
    /// in the order they were recorded.
    ///
    /// An unknown key yields an empty list: missing entries mean "no known
    /// prerequisites".
    #[must_use]
    pub fn prerequisites(&self, key: &str) -> Vec<&str> {
        let Some(&index) = self.nodes.get(key) else {
            return Vec::new();
        };

        // petgraph iterates neighbors most-recent-first; reverse to restore
        // the scraped order the chain search depends on.
        let mut prereqs: Vec<&str> = self
            .graph
            .neighbors(index)
            .map(|neighbor| self.graph[neighbor].as_str())
            .collect();
        prereqs.reverse();
        prereqs
    }

    /// Whether the graph has a node for the given key.
    #[must_use]
    pub fn contains(&self, key: &str) -> bool {
        self.nodes.contains_key(key)
    }

    /// The number of courses in the graph (as course or prerequisite).
    #[must_use]
    pub fn len(&self) -> usize {
        self.graph.node_count()
    }

    /// Whether the graph is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.graph.node_count() == 0
    }

    /// Whether the scraped data contains a prerequisite cycle.
    #[must_use]
    pub fn is_cyclic(&self) -> bool {
        is_cyclic_directed(&self.graph)
    }

    fn node(&mut self, key: String) -> NodeIndex {
        if let Some(&index) = self.nodes.get(&key) {
            return index;
        }
        let index = self.graph.add_node(key.clone());
        self.nodes.insert(key, index);
        index
    }
}
