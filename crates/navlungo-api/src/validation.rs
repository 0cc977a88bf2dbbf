//! Validation of loosely typed request payloads.
//!
//! A [`Schema`] reads its fields out of a JSON object through [`Fields`], which
//! records every violation it meets instead of stopping at the first one.
//! Value constraints (e-mail format, numeric bounds, non-empty lists) are
//! checked as each field is decoded, so they are reported alongside missing
//! or mistyped siblings in the same [`RequestValidationError`].

use std::fmt::{Display, Formatter};
use std::str::FromStr;

use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::{Map, Value};
use strum::VariantNames;
use thiserror::Error;
use validator::{ValidateEmail, ValidateRange};

/// Path reported when the payload itself is not a JSON object.
pub const ROOT_FIELD: &str = "$";

#[derive(Debug, Clone, PartialEq)]
pub enum ViolationKind {
    Missing,
    InvalidType(String),
    UnknownVariant {
        value: String,
        allowed: &'static [&'static str],
    },
    RequiredWhen(String),
    NotAllowedWhen(String),
    Constraint {
        code: String,
        message: Option<String>,
    },
}

impl Display for ViolationKind {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            ViolationKind::Missing => write!(f, "field is required"),
            ViolationKind::InvalidType(message) => write!(f, "{message}"),
            ViolationKind::UnknownVariant { value, allowed } => {
                write!(f, "`{value}` is not one of [{}]", allowed.join(", "))
            }
            ViolationKind::RequiredWhen(condition) => write!(f, "required when {condition}"),
            ViolationKind::NotAllowedWhen(condition) => {
                write!(f, "not allowed when {condition}")
            }
            ViolationKind::Constraint {
                message: Some(message),
                ..
            } => write!(f, "{message}"),
            ViolationKind::Constraint {
                code,
                message: None,
            } => write!(f, "failed `{code}` constraint"),
        }
    }
}

impl ViolationKind {
    fn constraint(code: &str, message: impl Into<String>) -> Self {
        ViolationKind::Constraint {
            code: code.to_string(),
            message: Some(message.into()),
        }
    }
}

/// A single offending field, addressed by its dotted path (`posts[0].post.desi`).
#[derive(Debug, Clone, PartialEq)]
pub struct FieldViolation {
    pub field: String,
    pub kind: ViolationKind,
}

impl Display for FieldViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}: {}", self.field, self.kind)
    }
}

#[derive(Error, Debug, Clone, PartialEq)]
#[error("Invalid {schema} request: {}", join_violations(.violations))]
pub struct RequestValidationError {
    pub schema: &'static str,
    pub violations: Vec<FieldViolation>,
}

impl RequestValidationError {
    /// First violation reported for the given field path, if any.
    pub fn field(&self, path: &str) -> Option<&FieldViolation> {
        self.violations.iter().find(|v| v.field == path)
    }

    pub fn fields(&self) -> impl Iterator<Item = &str> {
        self.violations.iter().map(|v| v.field.as_str())
    }
}

fn join_violations(violations: &[FieldViolation]) -> String {
    violations
        .iter()
        .map(ToString::to_string)
        .collect::<Vec<_>>()
        .join("; ")
}

/// A request shape that can be read out of an untyped JSON object.
pub trait Schema: Sized + Serialize {
    /// Name used in error messages.
    const NAME: &'static str;

    /// Reads every field, recording violations in `fields`.
    ///
    /// Implementations must read all of their fields before combining the
    /// results, so that one call reports every violation in the object.
    fn read(fields: &mut Fields<'_>) -> Option<Self>;

    /// Validates `value` into a typed request.
    fn from_value(value: &Value) -> Result<Self, RequestValidationError> {
        let mut violations = Vec::new();

        let parsed = match value.as_object() {
            Some(object) => Self::read(&mut Fields::new(object, &mut violations)),
            None => {
                violations.push(FieldViolation {
                    field: ROOT_FIELD.to_string(),
                    kind: ViolationKind::InvalidType(format!(
                        "expected an object, found {}",
                        describe(value)
                    )),
                });
                None
            }
        };

        match parsed {
            Some(request) if violations.is_empty() => Ok(request),
            _ => Err(RequestValidationError {
                schema: Self::NAME,
                violations,
            }),
        }
    }
}

/// Field reader over one JSON object.
///
/// `null` is treated the same as an absent key.
pub struct Fields<'a> {
    object: &'a Map<String, Value>,
    prefix: String,
    violations: &'a mut Vec<FieldViolation>,
}

impl<'a> Fields<'a> {
    pub fn new(object: &'a Map<String, Value>, violations: &'a mut Vec<FieldViolation>) -> Self {
        Self {
            object,
            prefix: String::new(),
            violations,
        }
    }

    pub fn is_present(&self, name: &str) -> bool {
        self.get(name).is_some()
    }

    pub fn violate(&mut self, name: &str, kind: ViolationKind) {
        let field = self.path(name);
        self.violations.push(FieldViolation { field, kind });
    }

    pub fn required<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        match self.get(name) {
            Some(value) => self.decode(name, value),
            None => {
                self.violate(name, ViolationKind::Missing);
                None
            }
        }
    }

    pub fn optional<T: DeserializeOwned>(&mut self, name: &str) -> Option<T> {
        let value = self.get(name)?;
        self.decode(name, value)
    }

    /// Reads an optional e-mail address, checking its format when present.
    pub fn optional_email(&mut self, name: &str) -> Option<String> {
        let email: String = self.optional(name)?;
        if !email.validate_email() {
            self.violate(
                name,
                ViolationKind::constraint("email", "must be a valid e-mail address"),
            );
        }
        Some(email)
    }

    /// Reads a required number that must lie within the inclusive bounds.
    ///
    /// A value outside the bounds is still returned so the caller can keep
    /// reading; the violation is recorded.
    pub fn required_in_range<T>(&mut self, name: &str, min: Option<T>, max: Option<T>) -> Option<T>
    where
        T: DeserializeOwned + ValidateRange<T> + Display + Copy,
    {
        let value = self.required(name)?;
        self.check_range(name, value, min, max);
        Some(value)
    }

    pub fn optional_in_range<T>(&mut self, name: &str, min: Option<T>, max: Option<T>) -> Option<T>
    where
        T: DeserializeOwned + ValidateRange<T> + Display + Copy,
    {
        let value = self.optional(name)?;
        self.check_range(name, value, min, max);
        Some(value)
    }

    /// Reads a closed enumeration by its symbolic name. Matching is case-sensitive.
    pub fn one_of<E>(&mut self, name: &str) -> Option<E>
    where
        E: FromStr + VariantNames,
    {
        let Some(value) = self.get(name) else {
            self.violate(name, ViolationKind::Missing);
            return None;
        };
        let Some(text) = value.as_str() else {
            self.violate(
                name,
                ViolationKind::InvalidType(format!(
                    "expected one of [{}], found {}",
                    E::VARIANTS.join(", "),
                    describe(value)
                )),
            );
            return None;
        };

        match text.parse::<E>() {
            Ok(variant) => Some(variant),
            Err(_) => {
                self.violate(
                    name,
                    ViolationKind::UnknownVariant {
                        value: text.to_string(),
                        allowed: E::VARIANTS,
                    },
                );
                None
            }
        }
    }

    pub fn nested<S: Schema>(&mut self, name: &str) -> Option<S> {
        let Some(value) = self.get(name) else {
            self.violate(name, ViolationKind::Missing);
            return None;
        };
        let path = self.path(name);
        self.read_object(path, value)
    }

    pub fn optional_nested<S: Schema>(&mut self, name: &str) -> Option<S> {
        let value = self.get(name)?;
        let path = self.path(name);
        self.read_object(path, value)
    }

    /// Reads an array of objects. Every item is read, even after a failing one.
    pub fn list<S: Schema>(&mut self, name: &str) -> Option<Vec<S>> {
        let Some(value) = self.get(name) else {
            self.violate(name, ViolationKind::Missing);
            return None;
        };
        let Some(items) = value.as_array() else {
            self.violate(
                name,
                ViolationKind::InvalidType(format!(
                    "expected an array, found {}",
                    describe(value)
                )),
            );
            return None;
        };

        let path = self.path(name);
        let items: Vec<Option<S>> = items
            .iter()
            .enumerate()
            .map(|(index, item)| self.read_object(format!("{path}[{index}]"), item))
            .collect();

        items.into_iter().collect()
    }

    /// Same as [`Fields::list`], rejecting an empty array.
    pub fn non_empty_list<S: Schema>(&mut self, name: &str) -> Option<Vec<S>> {
        let items = self.list(name)?;
        if items.is_empty() {
            self.violate(
                name,
                ViolationKind::constraint("length", "at least one item is required"),
            );
        }
        Some(items)
    }

    fn get(&self, name: &str) -> Option<&'a Value> {
        self.object.get(name).filter(|value| !value.is_null())
    }

    fn path(&self, name: &str) -> String {
        format!("{}{name}", self.prefix)
    }

    fn decode<T: DeserializeOwned>(&mut self, name: &str, value: &Value) -> Option<T> {
        match T::deserialize(value) {
            Ok(decoded) => Some(decoded),
            Err(error) => {
                self.violate(name, ViolationKind::InvalidType(error.to_string()));
                None
            }
        }
    }

    fn check_range<T>(&mut self, name: &str, value: T, min: Option<T>, max: Option<T>)
    where
        T: ValidateRange<T> + Display + Copy,
    {
        if value.validate_range(min, max, None, None) {
            return;
        }
        let message = match (min, max) {
            (Some(min), Some(max)) => format!("must be between {min} and {max}"),
            (Some(min), None) => format!("must be at least {min}"),
            (None, Some(max)) => format!("must be at most {max}"),
            (None, None) => "is out of range".to_string(),
        };
        self.violate(name, ViolationKind::constraint("range", message));
    }

    fn read_object<S: Schema>(&mut self, path: String, value: &Value) -> Option<S> {
        match value.as_object() {
            Some(object) => {
                let mut nested = Fields {
                    object,
                    prefix: format!("{path}."),
                    violations: &mut *self.violations,
                };
                S::read(&mut nested)
            }
            None => {
                self.violations.push(FieldViolation {
                    field: path,
                    kind: ViolationKind::InvalidType(format!(
                        "expected an object, found {}",
                        describe(value)
                    )),
                });
                None
            }
        }
    }
}

fn describe(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "a boolean",
        Value::Number(_) => "a number",
        Value::String(_) => "a string",
        Value::Array(_) => "an array",
        Value::Object(_) => "an object",
    }
}
