//! Field conversions shared by the gazetteer records.

use geonames_core::{RawRow, RecordError};

/// Sentinel the dumps use for an unknown elevation.
pub const ELEVATION_UNKNOWN: &str = "-9999";

/// Inclusive latitude bounds in degrees.
pub const LATITUDE: (f64, f64) = (-90.0, 90.0);
/// Inclusive longitude bounds in degrees.
pub const LONGITUDE: (f64, f64) = (-180.0, 180.0);
/// Inclusive UTC offset bounds in hours.
pub const UTC_OFFSET: (f64, f64) = (-12.0, 14.0);

/// Split a comma-separated list, dropping empty items and repeats while
/// keeping first-seen order.
pub fn comma_list(value: Option<&str>) -> Vec<String> {
    let mut items: Vec<String> = Vec::new();
    for item in value.unwrap_or_default().split(',') {
        if !item.is_empty() && !items.iter().any(|seen| seen == item) {
            items.push(item.to_owned());
        }
    }
    items
}

/// `0`/`1` style flag; an empty field reads as `false`.
pub fn flag(row: &RawRow, field: &'static str) -> Result<bool, RecordError> {
    Ok(row.parse_optional::<i64>(field)?.is_some_and(|value| value != 0))
}

/// Optional integer where zero means "unknown".
pub fn nonzero(row: &RawRow, field: &'static str) -> Result<Option<i64>, RecordError> {
    let value: i64 = row.parse(field)?;
    Ok((value != 0).then_some(value))
}

/// Optional integer where [`ELEVATION_UNKNOWN`] means "unknown".
pub fn elevation(row: &RawRow, field: &'static str) -> Result<Option<i64>, RecordError> {
    match row.text(field) {
        Some(ELEVATION_UNKNOWN) | None => Ok(None),
        Some(_) => row.parse_optional(field),
    }
}

/// Required number within inclusive `bounds`.
pub fn bounded(
    row: &RawRow,
    field: &'static str,
    (min, max): (f64, f64),
) -> Result<f64, RecordError> {
    let value: f64 = row.parse(field)?;
    if (min..=max).contains(&value) {
        Ok(value)
    } else {
        Err(RecordError::OutOfRange {
            field,
            value,
            min,
            max,
        })
    }
}

/// Required text of exactly `expected` characters.
pub fn fixed_length(
    row: &RawRow,
    field: &'static str,
    expected: usize,
) -> Result<String, RecordError> {
    let value = row.required(field)?;
    if value.chars().count() == expected {
        Ok(value.to_owned())
    } else {
        Err(RecordError::InvalidLength {
            field,
            value: value.to_owned(),
            expected,
        })
    }
}

/// Optional top-level domain such as `.uk`: a dot followed by word
/// characters.
pub fn top_level_domain(row: &RawRow, field: &'static str) -> Result<Option<String>, RecordError> {
    let Some(value) = row.text(field) else {
        return Ok(None);
    };
    let well_formed = value
        .strip_prefix('.')
        .and_then(|rest| rest.chars().next())
        .is_some_and(|first| first.is_alphanumeric() || first == '_');
    if well_formed {
        Ok(Some(value.to_owned()))
    } else {
        Err(RecordError::InvalidPattern {
            field,
            value: value.to_owned(),
            expected: "a top-level domain like .uk",
        })
    }
}

/// ISO 639-2 cell: `"fre / fra*"` style pairs keep the last code without
/// markers.
pub fn iso_639_2(value: &str) -> String {
    match value.rsplit_once('/') {
        Some((_, last)) => last.trim_matches([' ', '*']).to_owned(),
        None => value.to_owned(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case(None, &[])]
    #[case(Some("en-GB,cy-GB,gd"), &["en-GB", "cy-GB", "gd"])]
    #[case(Some("IE,,IE,FR,"), &["IE", "FR"])]
    fn comma_lists_drop_blanks_and_repeats(#[case] raw: Option<&str>, #[case] expected: &[&str]) {
        assert_eq!(comma_list(raw), expected);
    }

    #[rstest]
    #[case("", false)]
    #[case("0", false)]
    #[case("1", true)]
    fn flags_read_integers(#[case] raw: &str, #[case] expected: bool) {
        let row = RawRow::from_pairs(&[("preferred", raw)]);
        assert_eq!(flag(&row, "preferred"), Ok(expected));
    }

    #[rstest]
    fn flags_reject_text() {
        let row = RawRow::from_pairs(&[("preferred", "yes")]);
        assert!(flag(&row, "preferred").is_err());
    }

    #[rstest]
    #[case("0", None)]
    #[case("826", Some(826))]
    fn zero_means_unknown(#[case] raw: &str, #[case] expected: Option<i64>) {
        let row = RawRow::from_pairs(&[("numeric", raw)]);
        assert_eq!(nonzero(&row, "numeric"), Ok(expected));
    }

    #[rstest]
    #[case("-9999", None)]
    #[case("", None)]
    #[case("-5000", Some(-5000))]
    fn elevation_sentinel_means_unknown(#[case] raw: &str, #[case] expected: Option<i64>) {
        let row = RawRow::from_pairs(&[("elevation", raw)]);
        assert_eq!(elevation(&row, "elevation"), Ok(expected));
    }

    #[rstest]
    #[case("90", true)]
    #[case("-90.0", true)]
    #[case("90.5", false)]
    fn latitude_is_bounded(#[case] raw: &str, #[case] valid: bool) {
        let row = RawRow::from_pairs(&[("latitude", raw)]);
        assert_eq!(bounded(&row, "latitude", LATITUDE).is_ok(), valid);
    }

    #[rstest]
    fn out_of_range_reports_bounds() {
        let row = RawRow::from_pairs(&[("gmt_offset", "15")]);
        assert_eq!(
            bounded(&row, "gmt_offset", UTC_OFFSET),
            Err(RecordError::OutOfRange {
                field: "gmt_offset",
                value: 15.0,
                min: -12.0,
                max: 14.0,
            })
        );
    }

    #[rstest]
    #[case("GB", true)]
    #[case("GBR", false)]
    #[case("", false)]
    fn fixed_length_counts_characters(#[case] raw: &str, #[case] valid: bool) {
        let row = RawRow::from_pairs(&[("alpha2", raw)]);
        assert_eq!(fixed_length(&row, "alpha2", 2).is_ok(), valid);
    }

    #[rstest]
    #[case("", Ok(None))]
    #[case(".uk", Ok(Some(".uk".to_owned())))]
    #[case("uk", Err(()))]
    #[case(".", Err(()))]
    fn domains_start_with_a_dot(#[case] raw: &str, #[case] expected: Result<Option<String>, ()>) {
        let row = RawRow::from_pairs(&[("tld", raw)]);
        assert_eq!(top_level_domain(&row, "tld").map_err(|_| ()), expected);
    }

    #[rstest]
    #[case("eng", "eng")]
    #[case("fre / fra", "fra")]
    #[case("chi / zho*", "zho")]
    fn iso_639_2_keeps_the_terminology_code(#[case] raw: &str, #[case] expected: &str) {
        assert_eq!(iso_639_2(raw), expected);
    }
}
