use geonames_core::{RawRow, Record, RecordError};

use super::validators::iso_639_2;

/// One line of `iso-languagecodes.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IsoLanguage {
    /// ISO 639-3 code.
    pub code3: Option<String>,
    /// ISO 639-2 code, normalised to the terminology variant.
    pub code2: Option<String>,
    /// ISO 639-1 code.
    pub code1: Option<String>,
    /// English language name.
    pub name: String,
}

impl Record for IsoLanguage {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            code3: row.text("code3").map(str::to_owned),
            code2: row.text("code2").map(iso_639_2).filter(|code| !code.is_empty()),
            code1: row.text("code1").map(str::to_owned),
            name: row.required("name")?.to_owned(),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("fra", "fre / fra", Some("fra"))]
    #[case("", "ang", Some("ang"))]
    #[case("xyz", "", None)]
    fn normalises_code2(#[case] code3: &str, #[case] code2: &str, #[case] expected: Option<&str>) {
        let language = IsoLanguage::from_raw_row(&RawRow::from_pairs(&[
            ("code3", code3),
            ("code2", code2),
            ("code1", ""),
            ("name", "Some language"),
        ]))
        .expect("valid row");
        assert_eq!(language.code2.as_deref(), expected);
        assert_eq!(language.code1, None);
    }
}
