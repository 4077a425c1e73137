//! Template registry, field validation and the per-template tree builders

pub mod context;
pub mod layout;
pub mod patrol_record;
pub mod registry;
pub mod supervision_notice;
pub mod validate;

pub use context::{BuildContext, DOCUMENT_NUMBER_PREFIX};
pub use registry::{get_template, list_templates, DocumentTemplate, TemplateInfo, TemplateKind};
pub use supervision_notice::NoticeStyle;
pub use validate::{validate, ValidationReport};
