//! An in-memory host for date fields: a root record, named nested records,
//! submitted parts and the current cycle's errors.

use crate::calendar::CalendarDate;
use crate::host::{AssembledDate, DateHost, ValidationErrors};
use crate::part::RawPart;
use log::warn;
use std::collections::BTreeMap;

/// An entity owning composite date attributes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Record<D> {
    dates: BTreeMap<String, D>,
}

impl<D> Default for Record<D> {
    fn default() -> Self {
        Self {
            dates: BTreeMap::new(),
        }
    }
}

impl<D> Record<D> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn date(&self, attribute: &str) -> Option<&D> {
        self.dates.get(attribute)
    }

    pub fn set_date(&mut self, attribute: &str, value: Option<D>) {
        match value {
            Some(value) => {
                self.dates.insert(attribute.to_owned(), value);
            },
            None => {
                self.dates.remove(attribute);
            },
        }
    }
}

/// A form wrapping a model record and, optionally, nested records that date
/// fields can target with `on`.
#[derive(Debug, Clone)]
pub struct Form<D = CalendarDate> {
    model:  Record<D>,
    nested: BTreeMap<String, Record<D>>,
    parts:  BTreeMap<String, RawPart>,
    errors: ValidationErrors,
}

impl<D> Default for Form<D> {
    fn default() -> Self {
        Self::new(Record::default())
    }
}

impl<D> Form<D> {
    pub fn new(model: Record<D>) -> Self {
        Self {
            model,
            nested: BTreeMap::new(),
            parts: BTreeMap::new(),
            errors: ValidationErrors::default(),
        }
    }

    /// Adds a nested record reachable as `name`.
    #[must_use]
    pub fn with_nested(mut self, name: impl Into<String>, record: Record<D>) -> Self {
        self.nested.insert(name.into(), record);
        self
    }

    pub const fn model(&self) -> &Record<D> {
        &self.model
    }

    pub const fn model_mut(&mut self) -> &mut Record<D> {
        &mut self.model
    }

    pub fn nested(&self, name: &str) -> Option<&Record<D>> {
        self.nested.get(name)
    }

    pub fn nested_mut(&mut self, name: &str) -> Option<&mut Record<D>> {
        self.nested.get_mut(name)
    }

    /// Human-formatted messages from the last validation cycle.
    pub fn full_messages(&self) -> Vec<String> {
        self.errors.full_messages()
    }

    fn record(&self, target: Option<&str>) -> Option<&Record<D>> {
        match target {
            None => Some(&self.model),
            Some(name) => self.nested.get(name),
        }
    }
}

impl<D: AssembledDate + Clone> DateHost for Form<D> {
    type Date = D;

    fn date(&self, target: Option<&str>, attribute: &str) -> Option<D> {
        self.record(target)?.date(attribute).cloned()
    }

    fn set_date(&mut self, target: Option<&str>, attribute: &str, value: Option<D>) {
        let record = match target {
            None => Some(&mut self.model),
            Some(name) => self.nested.get_mut(name),
        };
        match record {
            Some(record) => record.set_date(attribute, value),
            None => warn!(
                "dropping write to {attribute}: no nested record {}",
                target.unwrap_or_default()
            ),
        }
    }

    fn has_target(&self, target: Option<&str>) -> bool {
        self.record(target).is_some()
    }

    fn part(&self, attribute: &str) -> Option<RawPart> {
        self.parts.get(attribute).cloned()
    }

    fn set_part(&mut self, attribute: &str, value: Option<RawPart>) {
        match value {
            Some(value) => {
                self.parts.insert(attribute.to_owned(), value);
            },
            None => {
                self.parts.remove(attribute);
            },
        }
    }

    fn errors(&self) -> &ValidationErrors {
        &self.errors
    }

    fn errors_mut(&mut self) -> &mut ValidationErrors {
        &mut self.errors
    }
}
