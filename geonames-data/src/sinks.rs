//! Sinks routing each record type into its tables.
//!
//! Rows from the alternate names and user tag dumps may reference places
//! that are missing from the place dumps; those sinks skip foreign key
//! violations. Place, location and language sinks skip duplicates because
//! the dumps overlap.

use geonames_core::{Flatten, FlattenMode, Params, Sink, recovery};

use crate::records::{
    AlternateName, Continent, CountryInfo, FeatureClass, FeatureCode, Geoname, Hierarchy,
    IsoLanguage, Shape, TimeZone, UserTag,
};
use crate::tables;

/// Legacy alpha-2 code still used by the place dumps for Great Britain.
const LEGACY_UNITED_KINGDOM: &str = "UK";
const UNITED_KINGDOM: &str = "GB";

fn country_alpha2(code: &str) -> String {
    if code == LEGACY_UNITED_KINGDOM {
        UNITED_KINGDOM.to_owned()
    } else {
        code.to_owned()
    }
}

fn level(index: usize) -> i64 {
    i64::try_from(index).map_or(i64::MAX, |index| index + 1)
}

#[must_use]
pub fn abbreviation() -> Sink<AlternateName> {
    Sink::record("abbreviation", tables::ABBREVIATION, |name: &AlternateName| {
        Params::new()
            .with("id", name.alternate_name_id)
            .with("geoname_id", name.geoname_id)
            .with("name", name.alternate_name.clone())
    })
    .with_predicate(AlternateName::is_abbreviation)
    .with_error_handler(recovery::ignore_foreign_key_violation)
}

/// One row for the first present administrative code, numbered by level.
#[must_use]
pub fn admin_code() -> Sink<Geoname> {
    let codes = Flatten::new(
        "admin_codes",
        Geoname::admin_codes,
        |place: &Geoname, code: &Option<String>, index| {
            Params::new()
                .with("geoname_id", place.geoname_id)
                .with("code", code.clone())
                .with("level", level(index))
        },
    )
    .with_field_predicate(|_, code| code.is_some())
    .with_mode(FlattenMode::FirstMatch);
    Sink::flatten("admin_code", tables::ADMIN_CODE, codes)
}

#[must_use]
pub fn airport_code() -> Sink<AlternateName> {
    Sink::record("airport_code", tables::AIRPORT_CODE, |name: &AlternateName| {
        Params::new()
            .with("id", name.alternate_name_id)
            .with("geoname_id", name.geoname_id)
            .with("type", name.iso_language.clone())
            .with("code", name.alternate_name.clone())
    })
    .with_predicate(AlternateName::is_airport_code)
    .with_error_handler(recovery::ignore_foreign_key_violation)
}

/// Alternate country codes, with the legacy `UK` mapped to `GB`.
#[must_use]
pub fn alternate_country_code() -> Sink<Geoname> {
    let codes = Flatten::new(
        "alternate_country_codes",
        Geoname::alternate_country_codes,
        |place: &Geoname, code: &String, _| {
            Params::new()
                .with("geoname_id", place.geoname_id)
                .with("country_code_alpha2", country_alpha2(code))
        },
    )
    .with_mode(FlattenMode::FirstMatch);
    Sink::flatten("alternate_country_code", tables::ALTERNATE_COUNTRY_CODE, codes)
}

/// English and unlabelled names only.
#[must_use]
pub fn alternate_name() -> Sink<AlternateName> {
    Sink::record("alternate_name", tables::ALTERNATE_NAME, |name: &AlternateName| {
        Params::new()
            .with("id", name.alternate_name_id)
            .with("geoname_id", name.geoname_id)
            .with("language_code", name.iso_language.clone())
            .with("name", name.alternate_name.clone())
            .with("preferred", name.preferred)
            .with("short", name.short)
            .with("colloquial", name.colloquial)
            .with("historic", name.historic)
            .with("from_period", name.from_period.clone())
            .with("to_period", name.to_period.clone())
    })
    .with_predicate(AlternateName::is_english_or_unlabelled)
    .with_error_handler(recovery::ignore_foreign_key_violation)
}

#[must_use]
pub fn boundary() -> Sink<Shape> {
    Sink::record("boundary", tables::BOUNDARY, |shape: &Shape| {
        Params::new()
            .with("id", shape.geoname_id)
            .with("geojson", shape.geojson.clone())
    })
}

#[must_use]
pub fn continent() -> Sink<Continent> {
    Sink::record("continent", tables::CONTINENT, |continent: &Continent| {
        Params::new()
            .with("id", continent.geoname_id)
            .with("code", continent.code.clone())
    })
}

#[must_use]
pub fn country() -> Sink<CountryInfo> {
    Sink::record("country", tables::COUNTRY, |country: &CountryInfo| {
        Params::new()
            .with("id", country.geoname_id)
            .with("country_code_alpha2", country.alpha2.clone())
            .with("name", country.name.clone())
            .with("capital", country.capital.clone())
            .with("area", country.area)
            .with("population", country.population)
            .with("continent_code", country.continent_code.clone())
            .with("currency_code", country.currency_code.clone())
            .with("tld", country.tld.clone())
            .with("phone", country.phone.clone())
            .with("postal_code_format", country.postal_code_format.clone())
            .with("postal_code_regex", country.postal_code_regex.clone())
    })
}

#[must_use]
pub fn country_code() -> Sink<CountryInfo> {
    Sink::record("country_code", tables::COUNTRY_CODE, |country: &CountryInfo| {
        Params::new()
            .with("alpha2", country.alpha2.clone())
            .with("alpha3", country.alpha3.clone())
            .with("numeric", country.numeric)
    })
}

/// The first spoken language of each country.
#[must_use]
pub fn country_language() -> Sink<CountryInfo> {
    let languages = Flatten::new(
        "languages_with_country_code",
        CountryInfo::languages_with_country_code,
        |country: &CountryInfo, (language, alpha2): &(String, Option<String>), _| {
            Params::new()
                .with("country_id", country.geoname_id)
                .with("language_code", language.clone())
                .with("country_code_alpha2", alpha2.clone())
        },
    )
    .with_mode(FlattenMode::FirstMatch);
    Sink::flatten("country_language", tables::COUNTRY_LANGUAGE, languages)
        .with_predicate(|country| !country.languages.is_empty())
}

/// The first bordering country of each country.
///
/// Neighbours are looked up through the country table, so this sink must
/// run after every country and place has been loaded.
#[must_use]
pub fn country_neighbor() -> Sink<CountryInfo> {
    let neighbors = Flatten::new(
        "neighbors",
        |country: &CountryInfo| country.neighbors.clone(),
        |country: &CountryInfo, alpha2: &String, _| {
            Params::new()
                .with("country_id", country.geoname_id)
                .with("neighbor_country_code_alpha2", alpha2.clone())
        },
    )
    .with_mode(FlattenMode::FirstMatch);
    Sink::flatten("country_neighbor", tables::COUNTRY_NEIGHBOR, neighbors)
        .with_predicate(|country| !country.neighbors.is_empty())
}

#[must_use]
pub fn currency() -> Sink<CountryInfo> {
    Sink::record("currency", tables::CURRENCY, |country: &CountryInfo| {
        Params::new()
            .with("code", country.currency_code.clone())
            .with("name", country.currency_name.clone())
    })
}

#[must_use]
pub fn feature_class() -> Sink<FeatureClass> {
    Sink::record("feature_class", tables::FEATURE_CLASS, |class: &FeatureClass| {
        Params::new()
            .with("id", class.id.clone())
            .with("name", class.name.clone())
            .with("description", class.description.clone())
    })
}

/// Every feature code except the `null` placeholder.
#[must_use]
pub fn feature_code() -> Sink<FeatureCode> {
    Sink::record("feature_code", tables::FEATURE_CODE, |feature: &FeatureCode| {
        Params::new()
            .with("id", feature.code().to_owned())
            .with("class", feature.class().to_owned())
            .with("name", feature.name.clone())
            .with("description", feature.description.clone())
    })
    .with_predicate(|feature| !feature.is_null())
}

#[must_use]
pub fn geoname() -> Sink<Geoname> {
    Sink::record("geoname", tables::GEONAME, |place: &Geoname| {
        Params::new()
            .with("id", place.geoname_id)
            .with("name", place.name.clone())
            .with("latitude", place.latitude)
            .with("longitude", place.longitude)
            .with("feature_class", place.feature_class.clone())
            .with("feature_code", place.feature_code.clone())
            .with("country_code", place.country_code.clone())
            .with("population", place.population)
            .with("elevation", place.elevation)
            .with("last_modified", place.last_modified.clone())
    })
    .with_error_handler(recovery::ignore_unique_violation)
}

/// Administrative parent links.
#[must_use]
pub fn hierarchy() -> Sink<Hierarchy> {
    Sink::record("hierarchy", tables::HIERARCHY, |link: &Hierarchy| {
        Params::new()
            .with("id", link.child_id)
            .with("parent_id", link.parent_id)
    })
    .with_predicate(Hierarchy::is_administrative)
}

/// Language codes; a missing three- or two-letter code borrows the other.
#[must_use]
pub fn language_code() -> Sink<IsoLanguage> {
    Sink::record("language_code", tables::LANGUAGE_CODE, |language: &IsoLanguage| {
        Params::new()
            .with("code3", language.code3.clone().or_else(|| language.code2.clone()))
            .with("code2", language.code2.clone().or_else(|| language.code3.clone()))
            .with("code1", language.code1.clone())
            .with("name", language.name.clone())
    })
    .with_error_handler(recovery::ignore_unique_violation)
}

#[must_use]
pub fn location() -> Sink<Geoname> {
    Sink::record("location", tables::LOCATION, |place: &Geoname| {
        Params::new()
            .with("id", place.geoname_id)
            .with("latitude", place.latitude)
            .with("longitude", place.longitude)
    })
    .with_error_handler(recovery::ignore_unique_violation)
}

#[must_use]
pub fn postal_code() -> Sink<AlternateName> {
    Sink::record("postal_code", tables::POSTAL_CODE, |name: &AlternateName| {
        Params::new()
            .with("id", name.alternate_name_id)
            .with("geoname_id", name.geoname_id)
            .with("code", name.alternate_name.clone())
    })
    .with_predicate(AlternateName::is_postal_code)
    .with_error_handler(recovery::ignore_foreign_key_violation)
}

#[must_use]
pub fn postal_code_spec() -> Sink<CountryInfo> {
    Sink::record("postal_code_spec", tables::POSTAL_CODE_SPEC, |country: &CountryInfo| {
        Params::new()
            .with("format", country.postal_code_format.clone())
            .with("regex", country.postal_code_regex.clone())
    })
}

#[must_use]
pub fn time_zone() -> Sink<TimeZone> {
    Sink::record("time_zone", tables::TIME_ZONE, |zone: &TimeZone| {
        Params::new()
            .with("name", zone.name.clone())
            .with("country_code_alpha2", zone.country_code_alpha2.clone())
            .with("gmt_offset", zone.gmt_offset)
            .with("dst_offset", zone.dst_offset)
            .with("raw_offset", zone.raw_offset)
    })
}

#[must_use]
pub fn user_link() -> Sink<AlternateName> {
    Sink::record("user_link", tables::USER_LINK, |name: &AlternateName| {
        Params::new()
            .with("id", name.alternate_name_id)
            .with("geoname_id", name.geoname_id)
            .with("link", name.alternate_name.clone())
    })
    .with_predicate(AlternateName::is_link)
    .with_error_handler(recovery::ignore_foreign_key_violation)
}

#[must_use]
pub fn user_tag() -> Sink<UserTag> {
    Sink::record("user_tag", tables::USER_TAG, |tag: &UserTag| {
        Params::new()
            .with("geoname_id", tag.geoname_id)
            .with("tag", tag.tag.clone())
    })
    .with_error_handler(recovery::ignore_foreign_key_violation)
}

#[must_use]
pub fn wikidata() -> Sink<AlternateName> {
    Sink::record("wikidata", tables::WIKIDATA, |name: &AlternateName| {
        Params::new()
            .with("id", name.alternate_name_id)
            .with("geoname_id", name.geoname_id)
            .with("wikidata_id", name.alternate_name.clone())
    })
    .with_predicate(AlternateName::is_wikidata_id)
    .with_error_handler(recovery::ignore_foreign_key_violation)
}
