use geonames_core::{RawRow, Record, RecordError};

use super::validators::{UTC_OFFSET, bounded, fixed_length};

/// One line of `timeZones.txt`. Offsets are hours from UTC.
#[derive(Debug, Clone, PartialEq)]
pub struct TimeZone {
    /// Alpha-2 code of the owning country.
    pub country_code_alpha2: String,
    /// IANA identifier, e.g. `Europe/London`.
    pub name: String,
    /// Offset on 1 January.
    pub gmt_offset: f64,
    /// Offset on 1 July.
    pub dst_offset: f64,
    /// Offset ignoring daylight saving.
    pub raw_offset: f64,
}

impl Record for TimeZone {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            country_code_alpha2: fixed_length(row, "country_code_alpha2", 2)?,
            name: row.required("name")?.to_owned(),
            gmt_offset: bounded(row, "gmt_offset", UTC_OFFSET)?,
            dst_offset: bounded(row, "dst_offset", UTC_OFFSET)?,
            raw_offset: bounded(row, "raw_offset", UTC_OFFSET)?,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn zone(gmt: &str) -> Result<TimeZone, RecordError> {
        TimeZone::from_raw_row(&RawRow::from_pairs(&[
            ("country_code_alpha2", "KI"),
            ("name", "Pacific/Kiritimati"),
            ("gmt_offset", gmt),
            ("dst_offset", "14.0"),
            ("raw_offset", "14.0"),
        ]))
    }

    #[rstest]
    fn accepts_the_widest_offset() {
        assert_eq!(zone("14.0").expect("valid row").raw_offset, 14.0);
    }

    #[rstest]
    fn rejects_offsets_beyond_fourteen_hours() {
        assert!(matches!(
            zone("14.5"),
            Err(RecordError::OutOfRange { field: "gmt_offset", .. })
        ));
    }
}
