//! Typed records for every gazetteer dump.
//!
//! Each record validates one [`RawRow`]. Empty columns read as absent,
//! comma lists become ordered vectors without repeats, and the dumps'
//! sentinel values (`0` numeric codes, `-9999` elevations) become `None`.

mod alternate_name;
mod country_info;
mod feature_code;
mod geoname;
mod iso_language;
mod time_zone;
pub mod validators;

use geonames_core::{RawRow, Record, RecordError};

pub use alternate_name::{AIRPORT_CODE_TYPES, AlternateName};
pub use country_info::CountryInfo;
pub use feature_code::{FeatureCode, NULL_FEATURE};
pub use geoname::Geoname;
pub use iso_language::IsoLanguage;
pub use time_zone::TimeZone;

/// A continent and the gazetteer entry describing it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Continent {
    /// Gazetteer identifier.
    pub geoname_id: i64,
    /// Two-letter continent code.
    pub code: String,
}

impl Record for Continent {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            geoname_id: row.parse("geoname_id")?,
            code: row.required("code")?.to_owned(),
        })
    }
}

/// One of the nine feature classes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureClass {
    /// Class letter.
    pub id: String,
    /// Class name.
    pub name: String,
    /// Examples of the class.
    pub description: String,
}

impl Record for FeatureClass {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            id: row.required("id")?.to_owned(),
            name: row.required("name")?.to_owned(),
            description: row.required("description")?.to_owned(),
        })
    }
}

/// Kind of hierarchy link that attaches places to administrative parents.
pub const ADMINISTRATIVE_LINK: &str = "ADM";

/// One line of `hierarchy.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hierarchy {
    /// Parent place.
    pub parent_id: i64,
    /// Child place.
    pub child_id: i64,
    /// Link type; `ADM` for administrative parents.
    pub kind: Option<String>,
}

impl Hierarchy {
    /// Whether the link is administrative.
    #[must_use]
    pub fn is_administrative(&self) -> bool {
        self.kind.as_deref() == Some(ADMINISTRATIVE_LINK)
    }
}

impl Record for Hierarchy {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            parent_id: row.parse("parent_id")?,
            child_id: row.parse("child_id")?,
            kind: row.text("type").map(str::to_owned),
        })
    }
}

/// One line of `shapes_all_low.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Shape {
    /// Place the outline belongs to.
    pub geoname_id: i64,
    /// GeoJSON geometry, stored verbatim.
    pub geojson: String,
}

impl Record for Shape {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            geoname_id: row.parse("geoname_id")?,
            geojson: row.required("geojson")?.to_owned(),
        })
    }
}

/// One line of `userTags.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserTag {
    /// Tagged place.
    pub geoname_id: i64,
    /// Free-form tag.
    pub tag: String,
}

impl Record for UserTag {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            geoname_id: row.parse("geoname_id")?,
            tag: row.required("tag")?.to_owned(),
        })
    }
}
