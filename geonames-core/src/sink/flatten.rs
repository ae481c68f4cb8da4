//! Flattening: turning a collection on one record into table rows.

use crate::params::Params;

/// How many accepted elements of a collection are written per record.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum FlattenMode {
    /// Only the first element the field predicate accepts.
    #[default]
    FirstMatch,
    /// Every element the field predicate accepts.
    EveryMatch,
}

/// Element-type-erased view of a [`Flatten`] used by [`Sink`](crate::Sink).
pub trait FlattenField<R> {
    /// Name of the flattened collection, for diagnostics.
    fn field_name(&self) -> &'static str;

    /// Write selection policy.
    fn mode(&self) -> FlattenMode;

    /// Parameters for every element that will be written, in order.
    fn params(&self, record: &R) -> Vec<Params>;
}

type Elements<R, E> = Box<dyn Fn(&R) -> Vec<E>>;
type FieldPredicate<R, E> = Box<dyn Fn(&R, &E) -> bool>;
type ElementTransform<R, E> = Box<dyn Fn(&R, &E, usize) -> Params>;

/// Flattening rule over elements of type `E` drawn from records of type `R`.
///
/// Element indices passed to the transform are positions in the original
/// collection, counted before the field predicate filters anything.
///
/// ```
/// use geonames_core::{Flatten, FlattenField, Params, Value};
///
/// let levels = Flatten::new(
///     "levels",
///     |levels: &Vec<i64>| levels.clone(),
///     |_, level, index| {
///         Params::new()
///             .with("level", *level)
///             .with("index", i64::try_from(index).expect("small index"))
///     },
/// )
/// .with_field_predicate(|_, level| *level > 0);
///
/// let params = levels.params(&vec![0, 5, 7]);
/// assert_eq!(params.len(), 1);
/// assert_eq!(params[0].get("level"), Some(&Value::Integer(5)));
/// assert_eq!(params[0].get("index"), Some(&Value::Integer(1)));
/// ```
pub struct Flatten<R, E> {
    field_name: &'static str,
    elements: Elements<R, E>,
    field_predicate: Option<FieldPredicate<R, E>>,
    transform: ElementTransform<R, E>,
    mode: FlattenMode,
}

impl<R, E> Flatten<R, E> {
    /// Flatten the collection returned by `elements`, transforming each
    /// written element with its index.
    #[must_use]
    pub fn new(
        field_name: &'static str,
        elements: impl Fn(&R) -> Vec<E> + 'static,
        transform: impl Fn(&R, &E, usize) -> Params + 'static,
    ) -> Self {
        Self {
            field_name,
            elements: Box::new(elements),
            field_predicate: None,
            transform: Box::new(transform),
            mode: FlattenMode::default(),
        }
    }

    /// Skip elements for which `predicate` is false.
    #[must_use]
    pub fn with_field_predicate(mut self, predicate: impl Fn(&R, &E) -> bool + 'static) -> Self {
        self.field_predicate = Some(Box::new(predicate));
        self
    }

    /// Choose how many accepted elements are written.
    #[must_use]
    pub fn with_mode(mut self, mode: FlattenMode) -> Self {
        self.mode = mode;
        self
    }

    fn accepts(&self, record: &R, element: &E) -> bool {
        self.field_predicate
            .as_ref()
            .is_none_or(|predicate| predicate(record, element))
    }
}

impl<R, E> FlattenField<R> for Flatten<R, E> {
    fn field_name(&self) -> &'static str {
        self.field_name
    }

    fn mode(&self) -> FlattenMode {
        self.mode
    }

    fn params(&self, record: &R) -> Vec<Params> {
        let accepted = (self.elements)(record)
            .into_iter()
            .enumerate()
            .filter(|(_, element)| self.accepts(record, element))
            .map(|(index, element)| (self.transform)(record, &element, index));
        match self.mode {
            FlattenMode::FirstMatch => accepted.take(1).collect(),
            FlattenMode::EveryMatch => accepted.collect(),
        }
    }
}
