//! Assemble a calendar date from day, month and year submitted as separate
//! form fields, and validate it before it reaches the owning record.
//!
//! ```
//! use multi_part_date::{CalendarDate, DateField, Form, FormSchema, RawPart};
//!
//! let mut schema = FormSchema::new();
//! schema.declare(DateField::new("date_of_birth")).unwrap();
//!
//! let mut form: Form = Form::default();
//! let params = [
//!     ("date_of_birth_month", Some(RawPart::Int(12))),
//!     ("date_of_birth_day", Some(RawPart::from("25"))),
//!     ("date_of_birth_year", Some(RawPart::Int(2000))),
//! ];
//!
//! assert!(schema.validate(&mut form, params));
//! assert_eq!(
//!     form.model().date("date_of_birth"),
//!     Some(&CalendarDate::new(2000, 12, 25).unwrap())
//! );
//! ```

mod calendar;
mod consts;
mod field;
mod form;
mod host;
mod part;
mod prelude;
mod schema;

pub use calendar::{CalendarDate, CalendarError, Day, Month, days_in_month, is_leap_year, is_valid_date};
pub use consts::*;
pub use field::{Condition, DateField, FieldOptions, Outcome};
pub use form::{Form, Record};
pub use host::{AssembledDate, DateHost, ValidationError, ValidationErrors};
pub use part::{Component, RawPart};
pub use schema::{DeclarationError, FormSchema};
