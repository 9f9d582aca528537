use crate::field::{DateField, Outcome};
use crate::host::DateHost;
use crate::part::{Component, RawPart};
use log::trace;

/// Mistakes in a form's date field declarations.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum DeclarationError {
    #[error("Date field name must not be empty")]
    EmptyName,

    #[error("Alias for date field {0} must not be empty")]
    EmptyAlias(String),

    #[error("Target record for date field {0} must not be empty")]
    EmptyTarget(String),

    #[error("Date field {0} is already declared")]
    DuplicateField(String),

    /// Two fields would read and write the same host attribute.
    #[error("Attribute {attribute} of date field {field} is already used by {owner}")]
    AttributeConflict {
        field:     String,
        attribute: String,
        owner:     String,
    },
}

/// The date fields declared on a form, in declaration order.
#[derive(Debug)]
pub struct FormSchema<H> {
    fields: Vec<DateField<H>>,
}

impl<H> Default for FormSchema<H> {
    fn default() -> Self {
        Self { fields: Vec::new() }
    }
}

impl<H> FormSchema<H> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Registers a field after checking it against those already declared.
    ///
    /// # Errors
    /// Returns `DeclarationError` for empty names, aliases or targets, a
    /// repeated field name, or a component attribute another field claims.
    pub fn declare(&mut self, field: DateField<H>) -> Result<&mut Self, DeclarationError> {
        if field.name().is_empty() {
            return Err(DeclarationError::EmptyName);
        }
        if field.key().is_empty() {
            return Err(DeclarationError::EmptyAlias(field.name().to_owned()));
        }
        if field.target().is_some_and(str::is_empty) {
            return Err(DeclarationError::EmptyTarget(field.name().to_owned()));
        }
        if self.field(field.name()).is_some() {
            return Err(DeclarationError::DuplicateField(field.name().to_owned()));
        }

        for existing in &self.fields {
            if existing.component_for(field.name()).is_some() {
                return Err(DeclarationError::AttributeConflict {
                    field:     field.name().to_owned(),
                    attribute: field.name().to_owned(),
                    owner:     existing.name().to_owned(),
                });
            }
            for component in Component::ALL {
                let attribute = field.part_attribute(component);
                if existing.component_for(&attribute).is_some() || existing.name() == attribute {
                    return Err(DeclarationError::AttributeConflict {
                        field: field.name().to_owned(),
                        attribute,
                        owner: existing.name().to_owned(),
                    });
                }
            }
            if field.component_for(existing.name()).is_some() {
                return Err(DeclarationError::AttributeConflict {
                    field:     field.name().to_owned(),
                    attribute: existing.name().to_owned(),
                    owner:     existing.name().to_owned(),
                });
            }
        }

        self.fields.push(field);
        Ok(self)
    }

    pub fn fields(&self) -> &[DateField<H>] {
        &self.fields
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    pub fn field(&self, name: &str) -> Option<&DateField<H>> {
        self.fields.iter().find(|f| f.name() == name)
    }

    /// The field and component a submitted attribute such as `birth_day` feeds.
    pub fn find_part(&self, attribute: &str) -> Option<(&DateField<H>, Component)> {
        self.fields
            .iter()
            .find_map(|f| f.component_for(attribute).map(|c| (f, c)))
    }
}

impl<H: DateHost> FormSchema<H> {
    /// Feeds submitted parameters, in order, to the matching component
    /// setters. Parameters no field claims are ignored.
    pub fn submit<I, K>(&self, host: &mut H, params: I)
    where
        I: IntoIterator<Item = (K, Option<RawPart>)>,
        K: AsRef<str>,
    {
        for (attribute, value) in params {
            let attribute = attribute.as_ref();
            match self.find_part(attribute) {
                Some((field, component)) => field.set_component(host, component, value),
                None => trace!("ignoring unknown parameter {attribute}"),
            }
        }
    }

    /// Runs every field's validation hook against a fresh error collection.
    /// Returns whether the host ended up without errors.
    pub fn run_validations(&self, host: &mut H) -> bool {
        host.errors_mut().clear();

        let invalid = self
            .fields
            .iter()
            .filter(|field| field.validate(host) == Outcome::Invalid)
            .count();
        trace!("validated {} date fields, {invalid} invalid", self.fields.len());

        host.errors().is_empty()
    }

    /// Submits `params` and validates, like a form's `validate(params)`.
    pub fn validate<I, K>(&self, host: &mut H, params: I) -> bool
    where
        I: IntoIterator<Item = (K, Option<RawPart>)>,
        K: AsRef<str>,
    {
        self.submit(host, params);
        self.run_validations(host)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::form::Form;

    #[test]
    fn test_declare_keeps_order() {
        let mut schema: FormSchema<Form> = FormSchema::new();
        assert!(schema.is_empty());

        schema
            .declare(DateField::new("date_of_birth"))
            .unwrap()
            .declare(DateField::new("date_of_marriage").alias("married"))
            .unwrap();

        let names: Vec<&str> = schema.fields().iter().map(DateField::name).collect();
        assert_eq!(names, vec!["date_of_birth", "date_of_marriage"]);
        assert_eq!(schema.len(), 2);
        assert!(schema.field("date_of_marriage").is_some());
        assert!(schema.field("married").is_none());
    }

    #[test]
    fn test_find_part() {
        let mut schema: FormSchema<Form> = FormSchema::new();
        schema.declare(DateField::new("date_of_birth").alias("birth")).unwrap();

        let (field, component) = schema.find_part("birth_month").unwrap();
        assert_eq!(field.name(), "date_of_birth");
        assert_eq!(component, Component::Month);
        assert!(schema.find_part("date_of_birth_month").is_none());
        assert!(schema.find_part("birth").is_none());
    }

    #[test]
    fn test_declaration_errors() {
        let mut schema: FormSchema<Form> = FormSchema::new();
        schema.declare(DateField::new("birth")).unwrap();

        let cases = [
            (DateField::new(""), DeclarationError::EmptyName),
            (
                DateField::new("started_on").alias(""),
                DeclarationError::EmptyAlias("started_on".into()),
            ),
            (
                DateField::new("started_on").on(""),
                DeclarationError::EmptyTarget("started_on".into()),
            ),
            (
                DateField::new("birth"),
                DeclarationError::DuplicateField("birth".into()),
            ),
            (
                DateField::new("date_of_birth").alias("birth"),
                DeclarationError::AttributeConflict {
                    field:     "date_of_birth".into(),
                    attribute: "birth_day".into(),
                    owner:     "birth".into(),
                },
            ),
            (
                DateField::new("birth_day"),
                DeclarationError::AttributeConflict {
                    field:     "birth_day".into(),
                    attribute: "birth_day".into(),
                    owner:     "birth".into(),
                },
            ),
        ];

        for (field, expected) in cases {
            let name = field.name().to_owned();
            assert_eq!(schema.declare(field).err(), Some(expected), "declaring {name:?}");
        }
        assert_eq!(schema.len(), 1);
    }

    #[test]
    fn test_declaration_error_messages() {
        let err = DeclarationError::DuplicateField("date_of_birth".into());
        assert_eq!(err.to_string(), "Date field date_of_birth is already declared");
    }

    #[test]
    fn test_submit_ignores_unknown_parameters() {
        let mut schema: FormSchema<Form> = FormSchema::new();
        schema.declare(DateField::new("date_of_birth")).unwrap();
        let mut form = Form::default();

        schema.submit(&mut form, vec![("utf8", Some(RawPart::from("✓")))]);
        assert_eq!(form.part("utf8"), None);
    }
}
