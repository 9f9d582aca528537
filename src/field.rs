use crate::calendar::{CalendarDate, CalendarError};
use crate::consts::{DISCARDED_PART_VALUE, INVALID_DATE_MESSAGE};
use crate::host::{AssembledDate, DateHost};
use crate::part::{self, Component, RawPart};
use log::{debug, trace};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Gate deciding, against the host's current state, whether a field validates.
pub type Condition<H> = Box<dyn Fn(&H) -> bool>;

/// Declarative options for a [`DateField`], loadable from any serde format.
///
/// ```json
/// { "as": "birth", "discard_day": true, "on": "profile" }
/// ```
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct FieldOptions {
    /// Prefix for the component attributes instead of the field name.
    #[serde(rename = "as")]
    pub alias:         Option<String>,
    pub discard_day:   bool,
    pub discard_month: bool,
    pub discard_year:  bool,
    /// Nested record that owns the composite date.
    pub on:            Option<String>,
}

/// What a field's validation hook did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Outcome {
    /// The condition resolved false; nothing was checked or reported.
    Skipped,
    Valid,
    /// An error was added to the host.
    Invalid,
}

/// A date attribute submitted as separate day, month and year parts.
///
/// The field owns no values. Raw parts live in the host under
/// `{key}_day`, `{key}_month` and `{key}_year`; the assembled date lives in
/// the host (or one of its nested records) under `name`.
pub struct DateField<H> {
    name:      String,
    key:       String,
    target:    Option<String>,
    discarded: [bool; 3],
    condition: Option<Condition<H>>,
}

impl<H> fmt::Debug for DateField<H> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("DateField")
            .field("name", &self.name)
            .field("key", &self.key)
            .field("target", &self.target)
            .field("discarded", &self.discarded)
            .field("conditional", &self.condition.is_some())
            .finish()
    }
}

impl<H> DateField<H> {
    pub fn new(name: impl Into<String>) -> Self {
        let name = name.into();
        Self {
            key: name.clone(),
            name,
            target: None,
            discarded: [false; 3],
            condition: None,
        }
    }

    pub fn from_options(name: impl Into<String>, options: FieldOptions) -> Self {
        let mut field = Self::new(name);
        if let Some(alias) = options.alias {
            field = field.alias(alias);
        }
        if let Some(target) = options.on {
            field = field.on(target);
        }
        let flags = [
            (Component::Day, options.discard_day),
            (Component::Month, options.discard_month),
            (Component::Year, options.discard_year),
        ];
        for (component, discard) in flags {
            if discard {
                field = field.discard(component);
            }
        }
        field
    }

    /// Names the component attributes `{alias}_day` etc. The composite
    /// date and error messages keep the field name.
    #[must_use]
    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.key = alias.into();
        self
    }

    /// Pins `component` to 1 instead of reading it from input.
    #[must_use]
    pub fn discard(mut self, component: Component) -> Self {
        self.discarded[component.index()] = true;
        self
    }

    /// Reads and writes the composite date on the nested record `target`.
    #[must_use]
    pub fn on(mut self, target: impl Into<String>) -> Self {
        self.target = Some(target.into());
        self
    }

    /// Runs [`DateField::validate`] only while `condition` holds.
    #[must_use]
    pub fn validate_if(mut self, condition: impl Fn(&H) -> bool + 'static) -> Self {
        self.condition = Some(Box::new(condition));
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    pub fn target(&self) -> Option<&str> {
        self.target.as_deref()
    }

    pub const fn is_discarded(&self, component: Component) -> bool {
        self.discarded[component.index()]
    }

    pub const fn is_conditional(&self) -> bool {
        self.condition.is_some()
    }

    /// Host attribute holding the raw `component`.
    pub fn part_attribute(&self, component: Component) -> String {
        component.attribute(&self.key)
    }

    /// Which component, if any, `attribute` names for this field.
    pub fn component_for(&self, attribute: &str) -> Option<Component> {
        Component::from_attribute(&self.key, attribute)
    }
}

impl<H: DateHost> DateField<H> {
    /// Current value of `component`.
    ///
    /// Discarded components are always 1. Otherwise an assembled composite
    /// date wins over the raw stored part.
    pub fn component(&self, host: &H, component: Component) -> Option<RawPart> {
        if self.is_discarded(component) {
            return Some(RawPart::Int(DISCARDED_PART_VALUE));
        }
        match host.date(self.target(), &self.name) {
            Some(date) => Some(RawPart::Int(date.component(component))),
            None => host.part(&self.part_attribute(component)),
        }
    }

    /// `component` coerced to an integer; absent is 0.
    pub fn component_value(&self, host: &H, component: Component) -> i64 {
        part::coerce(self.component(host, component).as_ref())
    }

    /// Stores a raw part and assembles the date once all parts are present.
    pub fn set_component(&self, host: &mut H, component: Component, value: Option<RawPart>) {
        host.set_part(&self.part_attribute(component), value);

        if self.parts_present(host) {
            self.assemble(host);
        }
    }

    /// Whether day, month and year are all present.
    ///
    /// Clears the composite date first, whenever the target record exists, so
    /// the getters read the raw parts instead of a previously assembled value.
    pub fn parts_present(&self, host: &mut H) -> bool {
        if host.has_target(self.target()) {
            host.set_date(self.target(), &self.name, None);
        }

        let host: &H = host;
        Component::ALL.into_iter().all(|component| {
            self.component(host, component)
                .is_some_and(|part| part.is_present())
        })
    }

    /// The date the current parts describe.
    ///
    /// # Errors
    /// Returns `CalendarError` when the parts do not form a calendar date.
    pub fn calendar_date(&self, host: &H) -> Result<CalendarDate, CalendarError> {
        CalendarDate::new(
            self.component_value(host, Component::Year),
            self.component_value(host, Component::Month),
            self.component_value(host, Component::Day),
        )
    }

    /// The composite value the current parts assemble into.
    ///
    /// `None` when the parts are not a calendar date, when the host's date
    /// type cannot hold it, or when the target record does not exist.
    pub fn assembled(&self, host: &H) -> Option<H::Date> {
        if !host.has_target(self.target()) {
            debug!(
                "{}: no record {} to hold the date",
                self.name,
                self.target().unwrap_or_default()
            );
            return None;
        }

        match self.calendar_date(host) {
            Ok(date) => {
                let value = H::Date::from_calendar(date);
                if value.is_none() {
                    debug!("{}: {date} is not representable by the composite type", self.name);
                }
                value
            },
            Err(err) => {
                debug!("{}: {err}", self.name);
                None
            },
        }
    }

    /// Whether the parts form a date the host can store.
    pub fn is_valid_date(&self, host: &H) -> bool {
        self.assembled(host).is_some()
    }

    /// Writes the assembled date to the host; does nothing for an invalid one.
    pub fn assemble(&self, host: &mut H) {
        if let Some(value) = self.assembled(host) {
            debug!("{}: assembled date", self.name);
            host.set_date(self.target(), &self.name, Some(value));
        }
    }

    /// Validation hook run by the host's validation pass.
    pub fn validate(&self, host: &mut H) -> Outcome {
        if let Some(condition) = &self.condition {
            if !condition(&*host) {
                trace!("{}: condition not met, skipping validation", self.name);
                return Outcome::Skipped;
            }
        }

        if self.is_valid_date(host) {
            Outcome::Valid
        } else {
            host.errors_mut().add(self.name.clone(), INVALID_DATE_MESSAGE);
            Outcome::Invalid
        }
    }
}
