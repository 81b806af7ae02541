//! Declarative field validation for the order form.
//!
//! The schema maps each field name to an ordered list of rules. Values are
//! trimmed before evaluation and the first failing rule decides the message.

use super::errors::{ValidationError, ValidationResult};
use super::models::{Field, FormValues, Size};
use std::collections::BTreeMap;

pub const FULL_NAME_MIN: usize = 3;
pub const FULL_NAME_MAX: usize = 20;

pub const FULL_NAME_REQUIRED: &str = "Full name is required";
pub const FULL_NAME_TOO_SHORT: &str = "full name must be at least 3 characters";
pub const FULL_NAME_TOO_LONG: &str = "full name must be at most 20 characters";
pub const SIZE_REQUIRED: &str = "Size is required";
pub const SIZE_INCORRECT: &str = "size must be S or M or L";

/// A single constraint attached to a field.
#[derive(Debug, Clone)]
pub enum Rule {
    Required { message: String },
    MinLength { min: usize, message: String },
    MaxLength { max: usize, message: String },
    OneOf { allowed: Vec<String>, message: String },
}

impl Rule {
    /// Checks an already trimmed value.
    fn check(&self, field: &str, value: &str) -> ValidationResult {
        let length = value.chars().count();
        match self {
            Rule::Required { message } if value.is_empty() => Err(ValidationError::Required {
                field: field.to_string(),
                message: message.clone(),
            }),
            Rule::MinLength { min, message } if length < *min => Err(ValidationError::TooShort {
                field: field.to_string(),
                min: *min,
                message: message.clone(),
            }),
            Rule::MaxLength { max, message } if length > *max => Err(ValidationError::TooLong {
                field: field.to_string(),
                max: *max,
                message: message.clone(),
            }),
            Rule::OneOf { allowed, message } if !allowed.iter().any(|a| a == value) => {
                Err(ValidationError::NotAllowed {
                    field: field.to_string(),
                    message: message.clone(),
                })
            }
            _ => Ok(()),
        }
    }
}

/// Evaluates form values against a per-field rule schema.
///
/// # Examples
///
/// ```
/// use bloom_pizza::domain::ValidationEngine;
///
/// let engine = ValidationEngine::order_form();
/// assert!(engine.validate_field("fullName", "Jane Doe").is_ok());
/// assert_eq!(
///     engine.validate_field("size", "XL").unwrap_err().to_string(),
///     "size must be S or M or L"
/// );
/// ```
#[derive(Debug, Clone)]
pub struct ValidationEngine {
    schema: BTreeMap<String, Vec<Rule>>,
}

impl Default for ValidationEngine {
    fn default() -> Self {
        Self::order_form()
    }
}

impl ValidationEngine {
    pub fn new(schema: BTreeMap<String, Vec<Rule>>) -> Self {
        Self { schema }
    }

    /// Schema of the pizza order form.
    pub fn order_form() -> Self {
        let mut schema = BTreeMap::new();
        schema.insert(
            Field::FullName.name().to_string(),
            vec![
                // Length comes first, so an empty name reports the min-length message
                Rule::MinLength { min: FULL_NAME_MIN, message: FULL_NAME_TOO_SHORT.to_string() },
                Rule::MaxLength { max: FULL_NAME_MAX, message: FULL_NAME_TOO_LONG.to_string() },
                Rule::Required { message: FULL_NAME_REQUIRED.to_string() },
            ],
        );
        schema.insert(
            Field::Size.name().to_string(),
            vec![
                Rule::Required { message: SIZE_REQUIRED.to_string() },
                Rule::OneOf {
                    allowed: Size::ALL.iter().map(|s| s.code().to_string()).collect(),
                    message: SIZE_INCORRECT.to_string(),
                },
            ],
        );
        Self::new(schema)
    }

    /// Validates one field's value. Fields missing from the schema fail as required.
    pub fn validate_field(&self, field: &str, value: &str) -> ValidationResult {
        let Some(rules) = self.schema.get(field) else {
            return Err(ValidationError::Required {
                field: field.to_string(),
                message: format!("{field} is required"),
            });
        };

        let trimmed = value.trim();
        rules.iter().try_for_each(|rule| rule.check(field, trimmed))
    }

    /// Whether every field in the schema passes for `values`.
    pub fn validate_all(&self, values: &FormValues) -> bool {
        self.schema.keys().all(|name| {
            let value = name
                .parse::<Field>()
                .ok()
                .and_then(|field| values.text(field));
            match value {
                Some(value) => self.validate_field(name, value).is_ok(),
                None => false,
            }
        })
    }
}
