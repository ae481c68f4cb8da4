//! Named statement parameters produced by sink transforms.

pub use rusqlite::types::Value;

/// Ordered mapping of `:name` placeholders to SQLite values.
///
/// Names may be given with or without the leading `:`; they are stored in
/// the prefixed form SQLite reports for named placeholders.
///
/// # Examples
///
/// ```
/// use geonames_core::{Params, Value};
///
/// let params = Params::new()
///     .with("id", 6_255_148_i64)
///     .with("code", "EU".to_owned())
///     .with("note", None::<String>);
/// assert_eq!(params.get(":code"), Some(&Value::Text("EU".into())));
/// assert_eq!(params.get("note"), Some(&Value::Null));
/// assert_eq!(params.len(), 3);
/// ```
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Params {
    entries: Vec<(String, Value)>,
}

impl Params {
    /// Create an empty parameter set.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            entries: Vec::new(),
        }
    }

    /// Builder form of [`Params::insert`].
    #[must_use]
    pub fn with(mut self, name: &str, value: impl Into<Value>) -> Self {
        self.insert(name, value);
        self
    }

    /// Bind `value` to `name`, replacing any earlier binding.
    pub fn insert(&mut self, name: &str, value: impl Into<Value>) {
        let key = placeholder(name);
        let value = value.into();
        match self.entries.iter_mut().find(|(existing, _)| *existing == key) {
            Some(entry) => entry.1 = value,
            None => self.entries.push((key, value)),
        }
    }

    /// Look up the value bound to `name`.
    #[must_use]
    pub fn get(&self, name: &str) -> Option<&Value> {
        let bare = name.strip_prefix(':').unwrap_or(name);
        self.entries
            .iter()
            .find(|(key, _)| key.strip_prefix(':') == Some(bare))
            .map(|(_, value)| value)
    }

    /// Number of bound parameters.
    #[must_use]
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Whether no parameters are bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Iterate over `(name, value)` pairs in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (&str, &Value)> {
        self.entries
            .iter()
            .map(|(key, value)| (key.as_str(), value))
    }
}

fn placeholder(name: &str) -> String {
    if name.starts_with(':') {
        name.to_owned()
    } else {
        format!(":{name}")
    }
}
