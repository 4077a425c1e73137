//! WordprocessingML document generation for site issue reports
//!
//! This crate turns a [`DocumentData`] payload into a `.docx` package:
//! - Template registry (patrol record and two supervision notice layouts)
//! - Required-field validation
//! - Document tree construction
//! - OOXML packaging (zip container with the minimal part set)
//!
//! The usual entry point is [`generate`]; hosts that need reproducible
//! output pass their own [`BuildContext`] to [`generate_with`].

pub mod errors;
pub mod generate;
pub mod package;
pub mod templates;
pub mod tree;

pub use errors::{BuildError, GenerateError, SerializationError, ValidationError};
pub use generate::{generate, generate_with, validate_for, GeneratedDocument};
pub use package::{serialize, DocxPackage, PackageWriter, DOCX_MIME_TYPE};
pub use templates::{
    get_template, list_templates, validate, BuildContext, DocumentTemplate, TemplateInfo,
    TemplateKind, ValidationReport,
};
pub use tree::Section;

pub use issue_types::{DocumentData, DocumentField, Issue, IssueStatus};
