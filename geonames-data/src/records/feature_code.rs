use geonames_core::{RawRow, Record, RecordError};

/// Placeholder row for features without a class.
pub const NULL_FEATURE: &str = "null";

/// One line of `featureCodes_en.txt`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FeatureCode {
    /// Class and code joined by a dot, e.g. `P.PPLC`, or `null`.
    pub class_and_code: String,
    /// Short description.
    pub name: String,
    /// Long description.
    pub description: Option<String>,
}

impl FeatureCode {
    /// Whether this is the placeholder row.
    #[must_use]
    pub fn is_null(&self) -> bool {
        self.class_and_code == NULL_FEATURE
    }

    /// Class letter, e.g. `P`.
    #[must_use]
    pub fn class(&self) -> &str {
        self.split().0
    }

    /// Code within the class, e.g. `PPLC`.
    #[must_use]
    pub fn code(&self) -> &str {
        self.split().1
    }

    fn split(&self) -> (&str, &str) {
        self.class_and_code
            .split_once('.')
            .unwrap_or((self.class_and_code.as_str(), ""))
    }
}

impl Record for FeatureCode {
    fn from_raw_row(row: &RawRow) -> Result<Self, RecordError> {
        let class_and_code = row.required("class_and_code")?;
        if class_and_code != NULL_FEATURE && !class_and_code.contains('.') {
            return Err(RecordError::InvalidPattern {
                field: "class_and_code",
                value: class_and_code.to_owned(),
                expected: "a class and code such as P.PPL",
            });
        }
        Ok(Self {
            class_and_code: class_and_code.to_owned(),
            name: row.required("name")?.to_owned(),
            description: row.text("description").map(str::to_owned),
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn feature(class_and_code: &str) -> Result<FeatureCode, RecordError> {
        FeatureCode::from_raw_row(&RawRow::from_pairs(&[
            ("class_and_code", class_and_code),
            ("name", "capital of a political entity"),
            ("description", ""),
        ]))
    }

    #[rstest]
    fn splits_class_and_code() {
        let feature = feature("P.PPLC").expect("valid row");
        assert_eq!((feature.class(), feature.code()), ("P", "PPLC"));
        assert_eq!(feature.description, None);
        assert!(!feature.is_null());
    }

    #[rstest]
    fn accepts_the_null_placeholder() {
        assert!(feature("null").expect("valid row").is_null());
    }

    #[rstest]
    fn rejects_codes_without_a_class() {
        assert!(matches!(
            feature("PPLC"),
            Err(RecordError::InvalidPattern { field: "class_and_code", .. })
        ));
    }
}
