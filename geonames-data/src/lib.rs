//! The GeoNames gazetteer catalogue.
//!
//! Typed records for every dump, the column layout of each source, the
//! SQLite tables they land in, the sinks that route records into those
//! tables and the dependency-ordered [`PipelineGraph`](geonames_core::PipelineGraph)
//! that loads the lot.
//!
//! ```no_run
//! use camino::Utf8Path;
//! use geonames_core::{Store, StorePragmas};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let store = Store::open(Utf8Path::new("geonames.sqlite"))?;
//! store.apply_pragmas(&StorePragmas::default())?;
//! let options = geonames_data::default_options(Utf8Path::new("data"));
//! let report = geonames_data::build_graph().run(&store, &options)?;
//! store.vacuum()?;
//! println!("{} pipelines loaded", report.pipelines.len());
//! # Ok(())
//! # }
//! ```

mod catalogue;
pub mod records;
pub mod sinks;
pub mod sources;
pub mod tables;

pub use catalogue::{
    DEFAULT_PATHS, SINK_NAMES, SOURCE_NAMES, build_graph, default_options, is_known_sink,
    is_known_source,
};
