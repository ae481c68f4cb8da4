use geonames_core::{RawRow, Record, RecordError};

use super::validators::flag;

/// Pseudo-language labels marking an airport code rather than a name.
pub const AIRPORT_CODE_TYPES: [&str; 5] = ["iata", "icao", "faac", "tcid", "unlc"];

/// One line of `alternateNamesV2.txt`.
///
/// The `iso_language` column doubles as a type tag: besides language codes
/// it carries labels such as `abbr`, `post` or `wkdt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AlternateName {
    /// Row identifier.
    pub alternate_name_id: i64,
    /// Place the name belongs to.
    pub geoname_id: i64,
    /// Language code or type tag.
    pub iso_language: Option<String>,
    /// The name, code or link itself.
    pub alternate_name: String,
    /// Officially preferred name.
    pub preferred: bool,
    /// Short form, e.g. "California" for "State of California".
    pub short: bool,
    /// Colloquial or slang term.
    pub colloquial: bool,
    /// Historic name no longer in use.
    pub historic: bool,
    /// Start of the period the name was used.
    pub from_period: Option<String>,
    /// End of the period the name was used.
    pub to_period: Option<String>,
}

impl AlternateName {
    fn tagged(&self, tag: &str) -> bool {
        self.iso_language.as_deref() == Some(tag)
    }

    /// Airport code (IATA, ICAO, FAA, TCID or UN/LOCODE).
    #[must_use]
    pub fn is_airport_code(&self) -> bool {
        self.iso_language
            .as_deref()
            .is_some_and(|tag| AIRPORT_CODE_TYPES.contains(&tag))
    }

    /// A name in a language, or with no language at all, rather than one of
    /// the longer type tags.
    #[must_use]
    pub fn is_alternate_name(&self) -> bool {
        self.iso_language
            .as_deref()
            .is_none_or(|tag| tag.chars().count() <= 3)
    }

    /// English or language-less names.
    #[must_use]
    pub fn is_english_or_unlabelled(&self) -> bool {
        self.iso_language
            .as_deref()
            .is_none_or(|tag| tag.eq_ignore_ascii_case("en"))
    }

    /// Abbreviation.
    #[must_use]
    pub fn is_abbreviation(&self) -> bool {
        self.tagged("abbr")
    }

    /// Wikidata entity identifier.
    #[must_use]
    pub fn is_wikidata_id(&self) -> bool {
        self.tagged("wkdt")
    }

    /// Web link, usually to Wikipedia.
    #[must_use]
    pub fn is_link(&self) -> bool {
        self.tagged("link")
    }

    /// Postal code.
    #[must_use]
    pub fn is_postal_code(&self) -> bool {
        self.tagged("post")
    }
}

impl Record for AlternateName {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        Ok(Self {
            alternate_name_id: row.parse("alternate_name_id")?,
            geoname_id: row.parse("geoname_id")?,
            iso_language: row.text("iso_language").map(str::to_owned),
            alternate_name: row.required("alternate_name")?.to_owned(),
            preferred: flag(row, "preferred")?,
            short: flag(row, "short")?,
            colloquial: flag(row, "colloquial")?,
            historic: flag(row, "historic")?,
            from_period: row.text("from_period").map(str::to_owned),
            to_period: row.text("to_period").map(str::to_owned),
        })
    }
}
