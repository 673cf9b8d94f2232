//! Field validation.
//!
//! Checks run in a fixed order and stop at the first failure:
//! 1. Required fields must not be blank (whitespace-only counts as blank)
//! 2. Non-empty email fields must look like `local@domain.tld`
//! 3. Non-empty URL fields must parse as an absolute URL
//!
//! Optional email and URL fields are never validated while empty.

use once_cell::sync::Lazy;
use regex::Regex;
use thiserror::Error;
use url::Url;

use crate::model::{Field, FieldKind};

static EMAIL_SHAPE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"));

/// Outcome of a passing check.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verdict {
    Valid,
}

/// Why a field failed. The `Display` text is what the user sees next to the input.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    #[error("This field is required.")]
    RequiredFieldEmpty,
    #[error("Please enter a valid email address.")]
    InvalidEmailFormat,
    #[error("Please enter a valid URL.")]
    InvalidUrlFormat,
}

/// Validates a single field against its declared constraints.
///
/// # Examples
/// ```
/// use folioapp::model::Field;
/// use folioapp::validation::{validate, ValidationError, Verdict};
///
/// assert_eq!(validate(&Field::email("email").with_value("a@b.com")), Ok(Verdict::Valid));
/// assert_eq!(validate(&Field::email("email")), Ok(Verdict::Valid));
/// assert_eq!(
///     validate(&Field::email("email").required()),
///     Err(ValidationError::RequiredFieldEmpty)
/// );
/// assert_eq!(
///     validate(&Field::url("site").with_value("example.com")),
///     Err(ValidationError::InvalidUrlFormat)
/// );
/// ```
pub fn validate(field: &Field) -> Result<Verdict, ValidationError> {
    if field.required && field.value.trim().is_empty() {
        return Err(ValidationError::RequiredFieldEmpty);
    }

    if field.value.is_empty() {
        return Ok(Verdict::Valid);
    }

    match field.kind {
        FieldKind::Email if !is_email(&field.value) => Err(ValidationError::InvalidEmailFormat),
        FieldKind::Url if !is_absolute_url(&field.value) => Err(ValidationError::InvalidUrlFormat),
        _ => Ok(Verdict::Valid),
    }
}

pub fn is_email(value: &str) -> bool {
    EMAIL_SHAPE.is_match(value)
}

pub fn is_absolute_url(value: &str) -> bool {
    Url::parse(value).is_ok()
}

/// One failing field, by name, in document order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FieldFailure {
    pub name: String,
    pub error: ValidationError,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FormCheck {
    pub failures: Vec<FieldFailure>,
}

impl FormCheck {
    pub fn is_valid(&self) -> bool {
        self.failures.is_empty()
    }

    /// The field that should receive focus after a failed submit.
    pub fn first_invalid(&self) -> Option<&str> {
        self.failures.first().map(|f| f.name.as_str())
    }
}

/// Validates every field and collects all failures in order.
pub fn check_form(fields: &[Field]) -> FormCheck {
    let failures = fields
        .iter()
        .filter_map(|field| {
            validate(field).err().map(|error| FieldFailure {
                name: field.name.clone(),
                error,
            })
        })
        .collect();
    FormCheck { failures }
}

/// True only if every field passes.
pub fn validate_form(fields: &[Field]) -> bool {
    fields.iter().all(|field| validate(field).is_ok())
}
