use geonames_core::{RawRow, Record, RecordError};

use super::validators::{LATITUDE, LONGITUDE, bounded, comma_list, elevation};

/// One line of `allCountries.txt` or `no-country.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct Geoname {
    /// Gazetteer identifier.
    pub geoname_id: i64,
    /// Name in UTF-8.
    pub name: String,
    /// Name in plain ASCII.
    pub ascii_name: Option<String>,
    /// Other names, first-seen order.
    pub alternate_names: Vec<String>,
    /// WGS84 latitude in degrees.
    pub latitude: f64,
    /// WGS84 longitude in degrees.
    pub longitude: f64,
    /// Feature class letter.
    pub feature_class: Option<String>,
    /// Feature code within the class.
    pub feature_code: Option<String>,
    /// ISO 3166 alpha-2 code.
    pub country_code: Option<String>,
    /// Alternate alpha-2 codes.
    pub country_code2: Vec<String>,
    /// First-order administrative division.
    pub admin1_code: Option<String>,
    /// Second-order administrative division.
    pub admin2_code: Option<String>,
    /// Third-order administrative division.
    pub admin3_code: Option<String>,
    /// Fourth-order administrative division.
    pub admin4_code: Option<String>,
    /// Population.
    pub population: i64,
    /// Digital elevation model value.
    pub digital_elevation_model: Option<String>,
    /// Elevation in metres; `None` when unknown.
    pub elevation: Option<i64>,
    /// IANA time zone identifier.
    pub timezone: Option<String>,
    /// Date of last modification.
    pub last_modified: String,
}

impl Geoname {
    /// Administrative codes from level 1 to level 4.
    #[must_use]
    pub fn admin_codes(&self) -> Vec<Option<String>> {
        vec![
            self.admin1_code.clone(),
            self.admin2_code.clone(),
            self.admin3_code.clone(),
            self.admin4_code.clone(),
        ]
    }

    /// Alternate country codes other than the primary one.
    #[must_use]
    pub fn alternate_country_codes(&self) -> Vec<String> {
        self.country_code2
            .iter()
            .filter(|code| self.country_code.as_deref() != Some(code.as_str()))
            .cloned()
            .collect()
    }

    /// Alternate names other than the primary and ASCII names.
    #[must_use]
    pub fn extra_names(&self) -> Vec<String> {
        self.alternate_names
            .iter()
            .filter(|name| **name != self.name && self.ascii_name.as_ref() != Some(*name))
            .cloned()
            .collect()
    }
}

impl Record for Geoname {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            geoname_id: row.parse("geoname_id")?,
            name: row.required("name")?.to_owned(),
            ascii_name: row.text("ascii_name").map(str::to_owned),
            alternate_names: comma_list(row.text("alternate_names")),
            latitude: bounded(row, "latitude", LATITUDE)?,
            longitude: bounded(row, "longitude", LONGITUDE)?,
            feature_class: row.text("feature_class").map(str::to_owned),
            feature_code: row.text("feature_code").map(str::to_owned),
            country_code: row.text("country_code").map(str::to_owned),
            country_code2: comma_list(row.text("country_code2")),
            admin1_code: row.text("admin1_code").map(str::to_owned),
            admin2_code: row.text("admin2_code").map(str::to_owned),
            admin3_code: row.text("admin3_code").map(str::to_owned),
            admin4_code: row.text("admin4_code").map(str::to_owned),
            population: row.parse("population")?,
            digital_elevation_model: row.text("digital_elevation_model").map(str::to_owned),
            elevation: elevation(row, "elevation")?,
            timezone: row.text("timezone").map(str::to_owned),
            last_modified: row.required("last_modified")?.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn london(latitude: &str, country_code2: &str) -> Result<Geoname, RecordError> {
        Geoname::from_raw_row(&RawRow::from_pairs(&[
            ("geoname_id", "2643743"),
            ("name", "London"),
            ("ascii_name", "London"),
            ("alternate_names", "London,Londres,Lundun,London"),
            ("latitude", latitude),
            ("longitude", "-0.12574"),
            ("feature_class", "P"),
            ("feature_code", "PPLC"),
            ("country_code", "GB"),
            ("country_code2", country_code2),
            ("admin1_code", "ENG"),
            ("admin2_code", ""),
            ("admin3_code", "GLA"),
            ("population", "8961989"),
            ("elevation", "-9999"),
            ("last_modified", "2023-01-02"),
        ]))
    }

    #[rstest]
    fn parses_a_populated_place() {
        let place = london("51.50853", "").expect("valid row");
        assert_eq!(place.elevation, None);
        assert_eq!(place.admin4_code, None);
        assert_eq!(
            place.admin_codes(),
            vec![Some("ENG".to_owned()), None, Some("GLA".to_owned()), None]
        );
        assert_eq!(place.extra_names(), vec!["Londres", "Lundun"]);
    }

    #[rstest]
    fn alternate_country_codes_exclude_the_primary() {
        let place = london("51.50853", "GB,UK,IE").expect("valid row");
        assert_eq!(place.alternate_country_codes(), vec!["UK", "IE"]);
    }

    #[rstest]
    #[case("91")]
    #[case("-90.1")]
    fn latitude_out_of_range_is_rejected(#[case] latitude: &str) {
        let err = london(latitude, "").expect_err("latitude out of range");
        assert!(matches!(err, RecordError::OutOfRange { field: "latitude", .. }));
    }
}
