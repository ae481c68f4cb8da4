//! Column layouts and reading rules for each dump.

use geonames_core::{FileSource, ListSource, RawRow, Source};

use crate::records::{
    AlternateName, Continent, CountryInfo, FeatureClass, FeatureCode, Geoname, Hierarchy,
    IsoLanguage, Shape, TimeZone, UserTag,
};

/// Field size limit for the shape dump, whose GeoJSON cells are large.
pub const SHAPE_FIELD_SIZE_LIMIT: usize = 1_000_000;

/// Columns of `alternateNamesV2.txt`.
pub const ALTERNATE_NAME_FIELDS: &[&str] = &[
    "alternate_name_id",
    "geoname_id",
    "iso_language",
    "alternate_name",
    "preferred",
    "short",
    "colloquial",
    "historic",
    "from_period",
    "to_period",
];

/// Columns of `countryInfo.txt`.
pub const COUNTRY_INFO_FIELDS: &[&str] = &[
    "alpha2",
    "alpha3",
    "numeric",
    "fips_code",
    "name",
    "capital",
    "area",
    "population",
    "continent_code",
    "tld",
    "currency_code",
    "currency_name",
    "phone",
    "postal_code_format",
    "postal_code_regex",
    "languages",
    "geoname_id",
    "neighbors",
    "equivalent_fips_code",
];

/// Columns of `featureCodes_en.txt`.
pub const FEATURE_CODE_FIELDS: &[&str] = &["class_and_code", "name", "description"];

/// Columns of `allCountries.txt`.
pub const GEONAME_FIELDS: &[&str] = &[
    "geoname_id",
    "name",
    "ascii_name",
    "alternate_names",
    "latitude",
    "longitude",
    "feature_class",
    "feature_code",
    "country_code",
    "country_code2",
    "admin1_code",
    "admin2_code",
    "admin3_code",
    "admin4_code",
    "population",
    "digital_elevation_model",
    "elevation",
    "timezone",
    "last_modified",
];

/// Columns of `no-country.txt`; the first admin column holds a FIPS code.
pub const GEONAME_NO_COUNTRY_FIELDS: &[&str] = &[
    "geoname_id",
    "name",
    "ascii_name",
    "alternate_names",
    "latitude",
    "longitude",
    "feature_class",
    "feature_code",
    "country_code",
    "country_code2",
    "fips_code",
    "admin2_code",
    "admin3_code",
    "admin4_code",
    "population",
    "digital_elevation_model",
    "elevation",
    "timezone",
    "last_modified",
];

/// Columns of `hierarchy.txt`.
pub const HIERARCHY_FIELDS: &[&str] = &["parent_id", "child_id", "type"];

/// Columns of `iso-languagecodes.txt`.
pub const ISO_LANGUAGE_FIELDS: &[&str] = &["code3", "code2", "code1", "name"];

/// Columns of `shapes_all_low.txt`.
pub const SHAPE_FIELDS: &[&str] = &["geoname_id", "geojson"];

/// Columns of `timeZones.txt`.
pub const TIME_ZONE_FIELDS: &[&str] = &[
    "country_code_alpha2",
    "name",
    "gmt_offset",
    "dst_offset",
    "raw_offset",
];

/// Columns of `userTags.txt`.
pub const USER_TAG_FIELDS: &[&str] = &["geoname_id", "tag"];

const CONTINENTS: [(&str, &str); 7] = [
    ("6255146", "AF"),
    ("6255147", "AS"),
    ("6255148", "EU"),
    ("6255149", "NA"),
    ("6255150", "SA"),
    ("6255151", "OC"),
    ("6255152", "AN"),
];

const FEATURE_CLASSES: [(&str, &str, &str); 9] = [
    ("A", "Administrative boundary features", "Country, state, region, etc."),
    ("H", "Hydrographic features", "Stream, lake, etc."),
    ("L", "Area features", "Parks, area, etc."),
    ("P", "Populated place features", "City, village, etc."),
    ("R", "Road features", "Road, railroad, etc."),
    ("S", "Spot features", "Spot, building, farm, etc."),
    ("T", "Hypsographic features", "Mountain, hill, rock, etc."),
    ("U", "Undersea features", "Banks, knoll, etc."),
    ("V", "Vegetation features", "Forest, heath, etc."),
];

/// Alternate names, codes and links.
#[must_use]
pub fn alternate_name() -> Source<AlternateName> {
    FileSource::new("alternate_name", ALTERNATE_NAME_FIELDS).into()
}

/// The seven continents.
#[must_use]
pub fn continent() -> Source<Continent> {
    let rows = CONTINENTS
        .into_iter()
        .map(|(geoname_id, code)| RawRow::from_pairs(&[("geoname_id", geoname_id), ("code", code)]))
        .collect();
    ListSource::new("continent", rows).into()
}

/// Country metadata; the file opens with `#` comment lines.
#[must_use]
pub fn country_info() -> Source<CountryInfo> {
    FileSource::new("country_info", COUNTRY_INFO_FIELDS)
        .skip_comments()
        .into()
}

/// The nine feature classes.
#[must_use]
pub fn feature_class() -> Source<FeatureClass> {
    let rows = FEATURE_CLASSES
        .into_iter()
        .map(|(id, name, description)| {
            RawRow::from_pairs(&[("id", id), ("name", name), ("description", description)])
        })
        .collect();
    ListSource::new("feature_class", rows).into()
}

/// Feature code descriptions.
#[must_use]
pub fn feature_code() -> Source<FeatureCode> {
    FileSource::new("feature_code", FEATURE_CODE_FIELDS).into()
}

/// Places with a country.
#[must_use]
pub fn geoname_all_countries() -> Source<Geoname> {
    FileSource::new("geoname_all_countries", GEONAME_FIELDS).into()
}

/// Places outside any country, such as oceans.
#[must_use]
pub fn geoname_no_country() -> Source<Geoname> {
    FileSource::new("geoname_no_country", GEONAME_NO_COUNTRY_FIELDS).into()
}

/// Parent and child links between places.
#[must_use]
pub fn hierarchy() -> Source<Hierarchy> {
    FileSource::new("hierarchy", HIERARCHY_FIELDS).into()
}

/// ISO 639 language codes; the file has a header line.
#[must_use]
pub fn iso_language() -> Source<IsoLanguage> {
    FileSource::new("iso_language", ISO_LANGUAGE_FIELDS)
        .skip_header()
        .into()
}

/// Simplified boundary outlines.
#[must_use]
pub fn shape() -> Source<Shape> {
    FileSource::new("shape", SHAPE_FIELDS)
        .skip_header()
        .field_size_limit(SHAPE_FIELD_SIZE_LIMIT)
        .into()
}

/// Time zones and their offsets.
#[must_use]
pub fn time_zone() -> Source<TimeZone> {
    FileSource::new("time_zone", TIME_ZONE_FIELDS)
        .skip_header()
        .into()
}

/// User-supplied tags.
#[must_use]
pub fn user_tag() -> Source<UserTag> {
    FileSource::new("user_tag", USER_TAG_FIELDS).into()
}

#[cfg(test)]
mod tests {
    use super::*;
    use geonames_core::SourceOptions;
    use rstest::rstest;

    #[rstest]
    fn continents_are_built_in() {
        let continents: Vec<_> = continent()
            .produce(&SourceOptions::default())
            .expect("list source")
            .collect::<Result<_, _>>()
            .expect("valid continents");
        assert_eq!(continents.len(), 7);
        assert_eq!(continents[6].code, "AN");
        assert_eq!(continents[6].row_num, 7);
    }

    #[rstest]
    fn feature_classes_are_built_in() {
        let classes: Vec<_> = feature_class()
            .produce(&SourceOptions::default())
            .expect("list source")
            .collect::<Result<_, _>>()
            .expect("valid classes");
        let ids: Vec<_> = classes.iter().map(|class| class.id.as_str()).collect();
        assert_eq!(ids, ["A", "H", "L", "P", "R", "S", "T", "U", "V"]);
    }

    #[rstest]
    fn layouts_match_their_dumps() {
        assert_eq!(GEONAME_FIELDS.len(), 19);
        assert_eq!(GEONAME_NO_COUNTRY_FIELDS.len(), GEONAME_FIELDS.len());
        assert_eq!(COUNTRY_INFO_FIELDS.len(), 19);
        assert_eq!(ALTERNATE_NAME_FIELDS.len(), 10);
    }
}
