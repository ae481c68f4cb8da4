//! Run configuration: per-source paths and switches, per-sink switches and
//! the checkpoint cadence.
//!
//! Options are resolved once at start-up and passed by reference through the
//! whole run. Names without an entry fall back to enabled with no path.

use std::collections::BTreeMap;
use std::num::NonZeroU64;

use camino::{Utf8Path, Utf8PathBuf};
use serde::{Deserialize, Serialize};

static DEFAULT_SOURCE: SourceOptions = SourceOptions {
    path: None,
    enabled: true,
};

static DEFAULT_SINK: SinkOptions = SinkOptions { enabled: true };

/// Settings for a single source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SourceOptions {
    /// File to read; list sources ignore it.
    pub path: Option<Utf8PathBuf>,
    /// Whether the source produces records.
    pub enabled: bool,
}

impl Default for SourceOptions {
    fn default() -> Self {
        DEFAULT_SOURCE.clone()
    }
}

/// Settings for a single sink.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct SinkOptions {
    /// Whether the sink sets up, writes and commits.
    pub enabled: bool,
}

impl Default for SinkOptions {
    fn default() -> Self {
        DEFAULT_SINK.clone()
    }
}

/// Configuration for a whole graph run.
///
/// ```
/// use geonames_core::PipelineOptions;
///
/// let options: PipelineOptions = serde_json::from_str(
///     r#"{"sources": {"shape": {"enabled": false}}, "checkpoint_threshold": 500}"#,
/// )
/// .expect("valid options");
/// assert!(!options.source("shape").enabled);
/// assert!(options.sink("boundary").enabled);
/// assert_eq!(options.checkpoint_threshold.map(|n| n.get()), Some(500));
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct PipelineOptions {
    /// Per-source settings keyed by source name.
    pub sources: BTreeMap<String, SourceOptions>,
    /// Per-sink settings keyed by sink name.
    pub sinks: BTreeMap<String, SinkOptions>,
    /// Overrides every pipeline's own checkpoint threshold.
    pub checkpoint_threshold: Option<NonZeroU64>,
}

impl PipelineOptions {
    /// Settings for `name`, falling back to the defaults.
    #[must_use]
    pub fn source(&self, name: &str) -> &SourceOptions {
        self.sources.get(name).unwrap_or(&DEFAULT_SOURCE)
    }

    /// Settings for `name`, falling back to the defaults.
    #[must_use]
    pub fn sink(&self, name: &str) -> &SinkOptions {
        self.sinks.get(name).unwrap_or(&DEFAULT_SINK)
    }

    /// Disable a source.
    #[must_use]
    pub fn disable_source(mut self, name: impl Into<String>) -> Self {
        self.sources.entry(name.into()).or_default().enabled = false;
        self
    }

    /// Disable a sink.
    #[must_use]
    pub fn disable_sink(mut self, name: impl Into<String>) -> Self {
        self.sinks.entry(name.into()).or_default().enabled = false;
        self
    }

    /// Point a source at a file.
    #[must_use]
    pub fn with_source_path(mut self, name: impl Into<String>, path: impl AsRef<Utf8Path>) -> Self {
        self.sources.entry(name.into()).or_default().path = Some(path.as_ref().to_path_buf());
        self
    }

    /// Override the checkpoint cadence for every pipeline.
    #[must_use]
    pub fn with_checkpoint_threshold(mut self, threshold: NonZeroU64) -> Self {
        self.checkpoint_threshold = Some(threshold);
        self
    }

    /// Layer `other` on top of `self`.
    ///
    /// Entries in `other` replace switches; a source path is only replaced
    /// when `other` supplies one, so a file that merely disables a source
    /// keeps the default path.
    #[must_use]
    pub fn overlay(mut self, other: Self) -> Self {
        for (name, source) in other.sources {
            let entry = self.sources.entry(name).or_default();
            entry.enabled = source.enabled;
            if source.path.is_some() {
                entry.path = source.path;
            }
        }
        self.sinks.extend(other.sinks);
        if other.checkpoint_threshold.is_some() {
            self.checkpoint_threshold = other.checkpoint_threshold;
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    fn unknown_names_default_to_enabled() {
        let options = PipelineOptions::default();
        assert_eq!(options.source("anything"), &SourceOptions::default());
        assert!(options.source("anything").enabled);
        assert!(options.source("anything").path.is_none());
        assert!(options.sink("anything").enabled);
    }

    #[rstest]
    fn builders_record_switches_and_paths() {
        let options = PipelineOptions::default()
            .with_source_path("hierarchy", "data/hierarchy.txt")
            .disable_source("shape")
            .disable_sink("boundary");

        assert_eq!(
            options.source("hierarchy").path.as_deref(),
            Some(Utf8Path::new("data/hierarchy.txt"))
        );
        assert!(!options.source("shape").enabled);
        assert!(!options.sink("boundary").enabled);
    }

    #[rstest]
    fn overlay_keeps_paths_unless_replaced() {
        let base = PipelineOptions::default()
            .with_source_path("shape", "data/shapes_all_low.txt")
            .with_source_path("hierarchy", "data/hierarchy.txt");
        let file: PipelineOptions = serde_json::from_str(
            r#"{
                "sources": {
                    "shape": {"enabled": false},
                    "hierarchy": {"path": "other/hierarchy.txt"}
                },
                "sinks": {"wikidata": {"enabled": false}}
            }"#,
        )
        .expect("parse options");

        let merged = base.overlay(file);

        assert!(!merged.source("shape").enabled);
        assert_eq!(
            merged.source("shape").path.as_deref(),
            Some(Utf8Path::new("data/shapes_all_low.txt"))
        );
        assert_eq!(
            merged.source("hierarchy").path.as_deref(),
            Some(Utf8Path::new("other/hierarchy.txt"))
        );
        assert!(merged.source("hierarchy").enabled);
        assert!(!merged.sink("wikidata").enabled);
        assert_eq!(merged.checkpoint_threshold, None);
    }

    #[rstest]
    fn zero_threshold_is_rejected() {
        let parsed = serde_json::from_str::<PipelineOptions>(r#"{"checkpoint_threshold": 0}"#);
        assert!(parsed.is_err());
    }
}
