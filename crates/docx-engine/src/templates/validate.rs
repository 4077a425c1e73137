//! Required-field validation

use issue_types::{DocumentData, DocumentField};
use serde::Serialize;

use super::registry::DocumentTemplate;
use crate::errors::ValidationError;

/// Outcome of checking a payload against a template
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ValidationReport {
    pub valid: bool,
    /// Missing fields in the template's declared order
    pub missing_fields: Vec<DocumentField>,
}

impl ValidationReport {
    pub fn into_result(self, template_id: &str) -> Result<(), ValidationError> {
        if self.valid {
            Ok(())
        } else {
            Err(ValidationError {
                template_id: template_id.to_string(),
                missing_fields: self.missing_fields,
            })
        }
    }
}

/// Check `data` against the template's required fields. Pure; the issue
/// list is never required.
pub fn validate(template: &DocumentTemplate, data: &DocumentData) -> ValidationReport {
    let missing_fields: Vec<DocumentField> = template
        .required_fields
        .iter()
        .copied()
        .filter(|field| !data.has_field(*field))
        .collect();

    ValidationReport {
        valid: missing_fields.is_empty(),
        missing_fields,
    }
}
