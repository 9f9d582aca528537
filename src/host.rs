//! The contract between a [`DateField`](crate::DateField) and the form that owns it.

use crate::calendar::CalendarDate;
use crate::part::{Component, RawPart};
use serde::Serialize;

/// A date-like value a field can assemble and read components back from.
pub trait AssembledDate: Sized {
    /// Converts a validated calendar date, or `None` if this type cannot
    /// represent it.
    fn from_calendar(date: CalendarDate) -> Option<Self>;

    /// The numeric day, month or year of this date.
    fn component(&self, component: Component) -> i64;
}

impl AssembledDate for CalendarDate {
    fn from_calendar(date: CalendarDate) -> Option<Self> {
        Some(date)
    }

    fn component(&self, component: Component) -> i64 {
        match component {
            Component::Day => i64::from(self.day().get()),
            Component::Month => i64::from(self.month().get()),
            Component::Year => self.year(),
        }
    }
}

#[cfg(feature = "chrono")]
impl AssembledDate for chrono::NaiveDate {
    fn from_calendar(date: CalendarDate) -> Option<Self> {
        let year = i32::try_from(date.year()).ok()?;
        Self::from_ymd_opt(
            year,
            u32::from(date.month().get()),
            u32::from(date.day().get()),
        )
    }

    fn component(&self, component: Component) -> i64 {
        use chrono::Datelike;

        match component {
            Component::Day => i64::from(Datelike::day(self)),
            Component::Month => i64::from(Datelike::month(self)),
            Component::Year => i64::from(Datelike::year(self)),
        }
    }
}

/// Storage and error collection a form exposes to its date fields.
///
/// `target` selects the entity holding the composite date: `None` is the
/// host itself, `Some(name)` a nested record reachable from it.
pub trait DateHost {
    type Date: AssembledDate;

    fn date(&self, target: Option<&str>, attribute: &str) -> Option<Self::Date>;

    fn set_date(&mut self, target: Option<&str>, attribute: &str, value: Option<Self::Date>);

    /// Whether the entity `target` selects exists and can hold a date.
    fn has_target(&self, _target: Option<&str>) -> bool {
        true
    }

    /// Raw component stored under `attribute` (e.g. `birth_day`).
    fn part(&self, attribute: &str) -> Option<RawPart>;

    fn set_part(&mut self, attribute: &str, value: Option<RawPart>);

    fn errors(&self) -> &ValidationErrors;

    fn errors_mut(&mut self) -> &mut ValidationErrors;
}

/// A single `(attribute, message)` failure.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationError {
    pub attribute: String,
    pub message:   String,
}

impl ValidationError {
    /// `"Date of birth is not a valid date"`
    pub fn full_message(&self) -> String {
        format!("{} {}", humanize(&self.attribute), self.message)
    }
}

/// Validation failures collected during one validation cycle, in the order
/// they were reported.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct ValidationErrors {
    errors: Vec<ValidationError>,
}

impl ValidationErrors {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, attribute: impl Into<String>, message: impl Into<String>) {
        self.errors.push(ValidationError {
            attribute: attribute.into(),
            message:   message.into(),
        });
    }

    pub fn clear(&mut self) {
        self.errors.clear();
    }

    pub fn is_empty(&self) -> bool {
        self.errors.is_empty()
    }

    pub fn len(&self) -> usize {
        self.errors.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = &ValidationError> {
        self.errors.iter()
    }

    /// Messages reported against `attribute`, without the attribute prefix.
    pub fn messages_for(&self, attribute: &str) -> Vec<&str> {
        self.errors
            .iter()
            .filter(|e| e.attribute == attribute)
            .map(|e| e.message.as_str())
            .collect()
    }

    pub fn full_messages(&self) -> Vec<String> {
        self.errors.iter().map(ValidationError::full_message).collect()
    }
}

/// `date_of_birth` -> `Date of birth`, `owner_id` -> `Owner`
fn humanize(attribute: &str) -> String {
    let base = attribute.strip_suffix("_id").unwrap_or(attribute);
    let spaced = base.replace('_', " ").trim().to_lowercase();

    let mut chars = spaced.chars();
    chars.next().map_or_else(String::new, |first| {
        first.to_uppercase().chain(chars).collect()
    })
}
