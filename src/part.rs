//! Raw day/month/year values as a form submits them.

use crate::consts::PART_SEPARATOR;
use crate::prelude::*;
use serde::{Deserialize, Serialize};

/// One of the three slots a multi-part date is split into.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Display)]
pub enum Component {
    #[display(fmt = "day")]
    Day,
    #[display(fmt = "month")]
    Month,
    #[display(fmt = "year")]
    Year,
}

impl Component {
    /// Every component, in the order setters are exposed.
    pub const ALL: [Self; 3] = [Self::Day, Self::Month, Self::Year];

    /// Attribute name a host stores this component under: `{key}_{component}`.
    pub fn attribute(self, key: &str) -> String {
        format!("{key}{PART_SEPARATOR}{self}")
    }

    /// Inverse of [`Component::attribute`].
    pub fn from_attribute(key: &str, attribute: &str) -> Option<Self> {
        let suffix = attribute
            .strip_prefix(key)?
            .strip_prefix(PART_SEPARATOR)?;
        Self::ALL.into_iter().find(|c| c.to_string() == suffix)
    }

    pub(crate) const fn index(self) -> usize {
        match self {
            Self::Day => 0,
            Self::Month => 1,
            Self::Year => 2,
        }
    }
}

/// A submitted component before numeric coercion.
///
/// Deserializes from either a JSON number or a string, which is how select
/// boxes and query strings tend to deliver them.
#[derive(Debug, Clone, PartialEq, Eq, Hash, From, Serialize, Deserialize)]
#[serde(untagged)]
pub enum RawPart {
    Int(i64),
    Text(String),
}

impl From<i32> for RawPart {
    fn from(value: i32) -> Self {
        Self::Int(i64::from(value))
    }
}

impl From<&str> for RawPart {
    fn from(value: &str) -> Self {
        Self::Text(value.to_owned())
    }
}

impl RawPart {
    /// Blank text counts as not submitted.
    pub fn is_present(&self) -> bool {
        match self {
            Self::Int(_) => true,
            Self::Text(text) => !text.trim().is_empty(),
        }
    }

    /// Integer value used for calendar checks.
    ///
    /// Text yields its leading (optionally signed) run of digits, so `"07"`
    /// is 7, `"12th"` is 12 and `"abc"` is 0.
    pub fn coerce(&self) -> i64 {
        match self {
            Self::Int(value) => *value,
            Self::Text(text) => leading_integer(text),
        }
    }
}

/// Coerces an optional raw part; absent resolves to zero.
pub fn coerce(part: Option<&RawPart>) -> i64 {
    part.map_or(0, RawPart::coerce)
}

fn leading_integer(text: &str) -> i64 {
    let text = text.trim_start();
    let (negative, digits) = match text.as_bytes().first() {
        Some(b'-') => (true, &text[1..]),
        Some(b'+') => (false, &text[1..]),
        _ => (false, text),
    };

    let magnitude = digits
        .bytes()
        .take_while(u8::is_ascii_digit)
        .fold(0_i64, |acc, b| {
            acc.saturating_mul(10).saturating_add(i64::from(b - b'0'))
        });

    if negative { -magnitude } else { magnitude }
}
