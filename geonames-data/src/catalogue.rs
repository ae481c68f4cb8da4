//! Default dump paths, known names and the ordered catalogue graph.

use camino::Utf8Path;
use geonames_core::{Pipeline, PipelineGraph, PipelineOptions};
use log::debug;

use crate::{sinks, sources};

/// Default location of each file-backed dump, relative to the data directory.
pub const DEFAULT_PATHS: [(&str, &str); 10] = [
    ("alternate_name", "alt-names/alternateNamesV2.txt"),
    ("country_info", "countryInfo.txt"),
    ("feature_code", "featureCodes_en.txt"),
    ("geoname_all_countries", "allCountries.txt"),
    ("geoname_no_country", "no-country.txt"),
    ("hierarchy", "hierarchy.txt"),
    ("iso_language", "iso-languagecodes.txt"),
    ("shape", "shapes_all_low.txt"),
    ("time_zone", "timeZones.txt"),
    ("user_tag", "userTags.txt"),
];

/// Every source the catalogue reads.
pub const SOURCE_NAMES: [&str; 12] = [
    "alternate_name",
    "continent",
    "country_info",
    "feature_class",
    "feature_code",
    "geoname_all_countries",
    "geoname_no_country",
    "hierarchy",
    "iso_language",
    "shape",
    "time_zone",
    "user_tag",
];

/// Every sink the catalogue writes through.
pub const SINK_NAMES: [&str; 24] = [
    "abbreviation",
    "admin_code",
    "airport_code",
    "alternate_country_code",
    "alternate_name",
    "boundary",
    "continent",
    "country",
    "country_code",
    "country_language",
    "country_neighbor",
    "currency",
    "feature_class",
    "feature_code",
    "geoname",
    "hierarchy",
    "language_code",
    "location",
    "postal_code",
    "postal_code_spec",
    "time_zone",
    "user_link",
    "user_tag",
    "wikidata",
];

/// Whether `name` is one of [`SOURCE_NAMES`].
#[must_use]
pub fn is_known_source(name: &str) -> bool {
    SOURCE_NAMES.contains(&name)
}

/// Whether `name` is one of [`SINK_NAMES`].
#[must_use]
pub fn is_known_sink(name: &str) -> bool {
    SINK_NAMES.contains(&name)
}

/// Options pointing every file-backed source at its default path under
/// `data_dir`.
///
/// ```
/// use camino::Utf8Path;
/// use geonames_data::default_options;
///
/// let options = default_options(Utf8Path::new("/srv/geonames"));
/// assert_eq!(
///     options.source("country_info").path.as_deref(),
///     Some(Utf8Path::new("/srv/geonames/countryInfo.txt")),
/// );
/// assert_eq!(options.source("continent").path, None);
/// ```
#[must_use]
pub fn default_options(data_dir: &Utf8Path) -> PipelineOptions {
    DEFAULT_PATHS
        .into_iter()
        .fold(PipelineOptions::default(), |options, (source, path)| {
            options.with_source_path(source, data_dir.join(path))
        })
}

/// Build the full load in dependency order.
///
/// Each pipeline only writes rows whose foreign keys point at tables filled
/// by an earlier pipeline. Bordering countries are resolved through both the
/// country and place tables, so the country dump is read a second time once
/// places are loaded; both readings share the `country_info` source options.
#[must_use]
pub fn build_graph() -> PipelineGraph {
    let graph = PipelineGraph::new()
        .with_pipeline(Pipeline::new(sources::continent()).with_sink(sinks::continent()))
        .with_pipeline(Pipeline::new(sources::feature_class()).with_sink(sinks::feature_class()))
        .with_pipeline(Pipeline::new(sources::feature_code()).with_sink(sinks::feature_code()))
        .with_pipeline(Pipeline::new(sources::iso_language()).with_sink(sinks::language_code()))
        .with_pipeline(
            Pipeline::new(sources::country_info())
                .with_sink(sinks::country_code())
                .with_sink(sinks::currency())
                .with_sink(sinks::postal_code_spec())
                .with_sink(sinks::country())
                .with_sink(sinks::country_language()),
        )
        .with_pipeline(Pipeline::new(sources::time_zone()).with_sink(sinks::time_zone()))
        .with_pipeline(
            Pipeline::new(sources::geoname_all_countries())
                .with_sink(sinks::location())
                .with_sink(sinks::geoname())
                .with_sink(sinks::admin_code())
                .with_sink(sinks::alternate_country_code()),
        )
        .with_pipeline(
            Pipeline::new(sources::geoname_no_country())
                .with_sink(sinks::location())
                .with_sink(sinks::geoname()),
        )
        .with_pipeline(Pipeline::new(sources::hierarchy()).with_sink(sinks::hierarchy()))
        .with_pipeline(
            Pipeline::new(sources::country_info()).with_sink(sinks::country_neighbor()),
        )
        .with_pipeline(
            Pipeline::new(sources::alternate_name())
                .with_sink(sinks::alternate_name())
                .with_sink(sinks::abbreviation())
                .with_sink(sinks::airport_code())
                .with_sink(sinks::postal_code())
                .with_sink(sinks::user_link())
                .with_sink(sinks::wikidata()),
        )
        .with_pipeline(Pipeline::new(sources::shape()).with_sink(sinks::boundary()))
        .with_pipeline(Pipeline::new(sources::user_tag()).with_sink(sinks::user_tag()));
    debug!("built catalogue graph:\n{}", graph.describe());
    graph
}

#[cfg(test)]
mod tests {
    use super::*;
    use geonames_core::RunPipeline;
    use rstest::rstest;

    #[rstest]
    fn graph_runs_in_dependency_order() {
        assert_eq!(
            build_graph().names(),
            [
                "continent",
                "feature_class",
                "feature_code",
                "iso_language",
                "country_info",
                "time_zone",
                "geoname_all_countries",
                "geoname_no_country",
                "hierarchy",
                "country_info",
                "alternate_name",
                "shape",
                "user_tag",
            ]
        );
    }

    #[rstest]
    fn every_file_source_has_a_default_path() {
        for (source, _) in DEFAULT_PATHS {
            assert!(is_known_source(source), "{source} is not a catalogue source");
        }
        let options = default_options(Utf8Path::new("data"));
        assert_eq!(options.sources.len(), DEFAULT_PATHS.len());
        assert_eq!(
            options.source("alternate_name").path.as_deref(),
            Some(Utf8Path::new("data/alt-names/alternateNamesV2.txt"))
        );
    }

    #[rstest]
    #[case("country_neighbor", true)]
    #[case("geoname", true)]
    #[case("neighbours", false)]
    fn sink_names_are_recognised(#[case] name: &str, #[case] known: bool) {
        assert_eq!(is_known_sink(name), known);
    }

    #[rstest]
    fn known_sinks_cover_the_graph() {
        let description = build_graph().describe();
        for sink in SINK_NAMES {
            assert!(description.contains(sink), "{sink} is not wired into the graph");
        }
    }

    #[rstest]
    fn neighbours_read_the_country_dump_again() {
        let pipeline = Pipeline::new(sources::country_info()).with_sink(sinks::country_neighbor());
        assert_eq!(pipeline.name(), "country_info");
        assert_eq!(pipeline.describe(), "country_info -> [country_neighbor]");
    }
}
