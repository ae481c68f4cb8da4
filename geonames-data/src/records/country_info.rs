use geonames_core::{RawRow, Record, RecordError};

use super::validators::{comma_list, fixed_length, nonzero, top_level_domain};

/// One line of `countryInfo.txt`.
#[derive(Debug, Clone, PartialEq)]
pub struct CountryInfo {
    /// ISO 3166 alpha-2 code.
    pub alpha2: String,
    /// ISO 3166 alpha-3 code.
    pub alpha3: String,
    /// ISO 3166 numeric code; `None` when the dump says `0`.
    pub numeric: Option<i64>,
    /// FIPS 10-4 code.
    pub fips_code: Option<String>,
    /// English country name.
    pub name: String,
    /// Capital city.
    pub capital: Option<String>,
    /// Area in square kilometres.
    pub area: f64,
    /// Population.
    pub population: i64,
    /// Two-letter continent code.
    pub continent_code: String,
    /// Top-level domain, including the leading dot.
    pub tld: Option<String>,
    /// ISO 4217 currency code.
    pub currency_code: Option<String>,
    /// Currency name.
    pub currency_name: Option<String>,
    /// International dialling prefix.
    pub phone: Option<String>,
    /// Postal code format mask.
    pub postal_code_format: Option<String>,
    /// Postal code regular expression.
    pub postal_code_regex: Option<String>,
    /// Spoken languages, optionally suffixed with a country (`en-GB`).
    pub languages: Vec<String>,
    /// Gazetteer identifier of the country itself.
    pub geoname_id: i64,
    /// Alpha-2 codes of bordering countries.
    pub neighbors: Vec<String>,
    /// Equivalent FIPS code.
    pub equivalent_fips_code: Option<String>,
}

impl CountryInfo {
    /// Split each language into its code and optional country code.
    ///
    /// ```
    /// use geonames_core::{RawRow, Record};
    /// use geonames_data::records::CountryInfo;
    ///
    /// let row = RawRow::from_pairs(&[
    ///     ("alpha2", "GB"), ("alpha3", "GBR"), ("numeric", "826"),
    ///     ("name", "United Kingdom"), ("area", "244820"), ("population", "66488991"),
    ///     ("continent_code", "EU"), ("languages", "en-GB,gd"), ("geoname_id", "2635167"),
    /// ]);
    /// let country = CountryInfo::from_raw_row(&row).expect("valid row");
    /// assert_eq!(
    ///     country.languages_with_country_code(),
    ///     vec![("en".to_owned(), Some("GB".to_owned())), ("gd".to_owned(), None)],
    /// );
    /// ```
    #[must_use]
    pub fn languages_with_country_code(&self) -> Vec<(String, Option<String>)> {
        self.languages
            .iter()
            .map(|language| match language.split_once('-') {
                Some((code, country)) => (code.to_owned(), Some(country.to_owned())),
                None => (language.clone(), None),
            })
            .collect()
    }
}

impl Record for CountryInfo {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            alpha2: fixed_length(row, "alpha2", 2)?,
            alpha3: fixed_length(row, "alpha3", 3)?,
            numeric: nonzero(row, "numeric")?,
            fips_code: row.text("fips_code").map(str::to_owned),
            name: row.required("name")?.to_owned(),
            capital: row.text("capital").map(str::to_owned),
            area: row.parse("area")?,
            population: row.parse("population")?,
            continent_code: row.required("continent_code")?.to_owned(),
            tld: top_level_domain(row, "tld")?,
            currency_code: row.text("currency_code").map(str::to_owned),
            currency_name: row.text("currency_name").map(str::to_owned),
            phone: row.text("phone").map(str::to_owned),
            postal_code_format: row.text("postal_code_format").map(str::to_owned),
            postal_code_regex: row.text("postal_code_regex").map(str::to_owned),
            languages: comma_list(row.text("languages")),
            geoname_id: row.parse("geoname_id")?,
            neighbors: comma_list(row.text("neighbors")),
            equivalent_fips_code: row.text("equivalent_fips_code").map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::{fixture, rstest};

    #[fixture]
    fn row() -> RawRow {
        RawRow::from_pairs(&[
            ("alpha2", "AQ"),
            ("alpha3", "ATA"),
            ("numeric", "0"),
            ("fips_code", "AY"),
            ("name", "Antarctica"),
            ("capital", ""),
            ("area", "1.4e7"),
            ("population", "0"),
            ("continent_code", "AN"),
            ("tld", ".aq"),
            ("currency_code", ""),
            ("currency_name", ""),
            ("phone", ""),
            ("postal_code_format", ""),
            ("postal_code_regex", ""),
            ("languages", ""),
            ("geoname_id", "6697173"),
            ("neighbors", ""),
            ("equivalent_fips_code", ""),
        ])
    }

    #[rstest]
    fn empty_columns_become_absent(row: RawRow) {
        let country = CountryInfo::from_raw_row(&row).expect("valid row");
        assert_eq!(country.numeric, None);
        assert_eq!(country.capital, None);
        assert_eq!(country.currency_code, None);
        assert!(country.languages.is_empty());
        assert!(country.neighbors.is_empty());
        assert!(country.languages_with_country_code().is_empty());
    }

    #[rstest]
    #[case("ATA", "ATA")]
    #[case("AQ", "AT")]
    fn code_lengths_are_enforced(#[case] alpha2: &str, #[case] alpha3: &str) {
        let row = RawRow::from_pairs(&[("alpha2", alpha2), ("alpha3", alpha3)]);
        let err = CountryInfo::from_raw_row(&row).expect_err("wrong length");
        assert!(matches!(err, RecordError::InvalidLength { .. }));
    }

    #[rstest]
    fn malformed_domains_are_rejected() {
        let row = RawRow::from_pairs(&[
            ("alpha2", "GB"),
            ("alpha3", "GBR"),
            ("numeric", "826"),
            ("name", "United Kingdom"),
            ("area", "244820"),
            ("population", "66488991"),
            ("continent_code", "EU"),
            ("tld", "uk"),
            ("geoname_id", "2635167"),
        ]);
        let err = CountryInfo::from_raw_row(&row).expect_err("tld needs a dot");
        assert!(matches!(err, RecordError::InvalidPattern { field: "tld", .. }));
    }
}
