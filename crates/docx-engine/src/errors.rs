//! Error types for validation, tree building, and packaging

use issue_types::DocumentField;
use thiserror::Error;

/// Required fields missing from the generation payload
#[derive(Error, Debug, Clone, PartialEq, Eq)]
#[error("Missing required fields for '{template_id}': {}", field_list(.missing_fields))]
pub struct ValidationError {
    pub template_id: String,
    /// In the template's declared order
    pub missing_fields: Vec<DocumentField>,
}

impl ValidationError {
    /// Wire names of the missing fields
    pub fn field_names(&self) -> Vec<String> {
        self.missing_fields
            .iter()
            .map(|field| field.name().to_string())
            .collect()
    }
}

fn field_list(fields: &[DocumentField]) -> String {
    fields
        .iter()
        .map(|field| field.name())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Tree construction invariant violated. Indicates a registry or caller
/// integrity bug, never bad user input.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum BuildError {
    #[error("Field '{field}' is required by '{template_id}' but was absent at build time")]
    MissingField {
        template_id: String,
        field: DocumentField,
    },
}

/// Failure while rendering the tree to a package
#[derive(Error, Debug)]
pub enum SerializationError {
    #[error("Table {table} has no rows")]
    EmptyTable { table: usize },

    #[error("Row {row} of table {table} has no cells")]
    EmptyRow { table: usize, row: usize },

    #[error("Cell in row {row} of table {table} spans zero columns")]
    ZeroColumnSpan { table: usize, row: usize },

    #[error("Row {row} of table {table} covers {found} grid columns, expected {expected}")]
    RaggedTable {
        table: usize,
        row: usize,
        expected: u32,
        found: u32,
    },

    #[error("Row {row} of table {table} spans {found} grid columns, at most {max} allowed")]
    TooManyColumns {
        table: usize,
        row: usize,
        found: u64,
        max: u32,
    },

    #[error("Cell widths in row {row} of table {table} sum to {total}%, expected 100%")]
    WidthMismatch { table: usize, row: usize, total: u32 },

    #[error("Width of {0}% is out of range")]
    InvalidPercent(u8),

    #[error("Character U+{0:04X} cannot be represented in XML")]
    InvalidCharacter(u32),

    #[error("Zip packaging failed: {0}")]
    Package(#[from] zip::result::ZipError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Everything `generate` can fail with
#[derive(Error, Debug)]
pub enum GenerateError {
    #[error("Template not found: {0}")]
    TemplateNotFound(String),

    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error("Build failed: {0}")]
    Build(#[from] BuildError),

    #[error("Serialization failed: {0}")]
    Serialization(#[from] SerializationError),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_validation_error_lists_fields_in_order() {
        let err = ValidationError {
            template_id: "patrol-record".to_string(),
            missing_fields: vec![DocumentField::ProjectName, DocumentField::InspectorName],
        };
        assert_eq!(
            err.to_string(),
            "Missing required fields for 'patrol-record': projectName, inspectorName"
        );
        assert_eq!(err.field_names(), vec!["projectName", "inspectorName"]);
    }

    #[test]
    fn test_generate_error_wraps_validation_transparently() {
        let err: GenerateError = ValidationError {
            template_id: "supervision-notice-template1".to_string(),
            missing_fields: vec![DocumentField::Subject],
        }
        .into();
        assert!(err.to_string().ends_with(": subject"));
    }

    #[test]
    fn test_invalid_character_formats_codepoint() {
        let err = SerializationError::InvalidCharacter(0x0B);
        assert_eq!(err.to_string(), "Character U+000B cannot be represented in XML");
    }
}
