//! Configuration validation

use crate::LockgroupError;
use std::ops::RangeInclusive;

/// One rejected configuration value
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    /// Value is required but blank
    #[error("{field} is required")]
    Required {
        /// Dotted path of the offending field
        field: String,
    },
    /// Number outside its inclusive bounds
    #[error("{field} must be within {min}..={max}, got {actual}")]
    OutOfRange {
        /// Dotted path of the offending field
        field: String,
        /// Inclusive lower bound
        min: usize,
        /// Inclusive upper bound
        max: usize,
        /// Configured value
        actual: usize,
    },
    /// Value failed a field-specific rule
    #[error("{field}: {reason}")]
    Rejected {
        /// Dotted path of the offending field
        field: String,
        /// Rule that was broken
        reason: String,
    },
}

/// Collects every failure across sections before reporting
#[derive(Debug, Default)]
pub struct ConfigValidator {
    errors: Vec<ValidationError>,
}

impl ConfigValidator {
    /// Create an empty validator
    pub fn new() -> Self {
        Self::default()
    }

    /// Checks scoped to one `[section]`; failures land in this validator
    pub fn section<'a>(&'a mut self, name: &'a str) -> SectionValidator<'a> {
        SectionValidator {
            name,
            errors: &mut self.errors,
        }
    }

    /// Failures collected so far
    pub fn errors(&self) -> &[ValidationError] {
        &self.errors
    }

    /// `Ok` when nothing failed, otherwise one config error naming every failure
    pub fn finish(self) -> Result<(), LockgroupError> {
        if self.errors.is_empty() {
            return Ok(());
        }
        let message = self
            .errors
            .iter()
            .map(ToString::to_string)
            .collect::<Vec<_>>()
            .join("; ");
        Err(LockgroupError::config(message))
    }
}

/// Field checks within one configuration section
pub struct SectionValidator<'a> {
    name: &'a str,
    errors: &'a mut Vec<ValidationError>,
}

impl SectionValidator<'_> {
    fn field(&self, field: &str) -> String {
        format!("{}.{field}", self.name)
    }

    /// Reject a blank value
    pub fn require(&mut self, field: &str, value: &str) -> &mut Self {
        if value.trim().is_empty() {
            let field = self.field(field);
            self.errors.push(ValidationError::Required { field });
        }
        self
    }

    /// Reject a number outside `bounds`
    pub fn within(
        &mut self,
        field: &str,
        value: usize,
        bounds: RangeInclusive<usize>,
    ) -> &mut Self {
        if !bounds.contains(&value) {
            let field = self.field(field);
            self.errors.push(ValidationError::OutOfRange {
                field,
                min: *bounds.start(),
                max: *bounds.end(),
                actual: value,
            });
        }
        self
    }

    /// Reject when `holds` is false
    pub fn check(&mut self, field: &str, holds: bool, reason: &str) -> &mut Self {
        if !holds {
            let field = self.field(field);
            self.errors.push(ValidationError::Rejected {
                field,
                reason: reason.to_string(),
            });
        }
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn field_names_carry_their_section() {
        let mut validator = ConfigValidator::new();
        validator.section("registry").require("terminals_path", "  ");
        assert_eq!(
            validator.errors(),
            &[ValidationError::Required {
                field: "registry.terminals_path".to_string()
            }]
        );
    }

    #[test]
    fn every_failure_is_reported() {
        let mut validator = ConfigValidator::new();
        validator
            .section("keypad")
            .within("max_length", 0, 1..=64)
            .check("terminator", false, "cannot be whitespace");
        validator.section("audit").require("log_path", "");

        assert_eq!(validator.errors().len(), 3);
        let message = validator.finish().unwrap_err().to_string();
        assert!(message.contains("keypad.max_length must be within 1..=64, got 0"));
        assert!(message.contains("keypad.terminator: cannot be whitespace"));
        assert!(message.contains("audit.log_path is required"));
    }

    #[test]
    fn clean_validator_finishes_ok() {
        let mut validator = ConfigValidator::new();
        validator
            .section("keypad")
            .require("terminator", "#")
            .within("max_length", 15, 1..=64);
        assert!(validator.finish().is_ok());
    }
}
