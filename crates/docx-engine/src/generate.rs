//! End-to-end generation: lookup, validate, build, serialize

use chrono::{DateTime, FixedOffset, Local};
use issue_types::DocumentData;
use tracing::{debug, info, warn};

use crate::errors::GenerateError;
use crate::package::{suggested_filename, PackageWriter};
use crate::templates::{get_template, validate, BuildContext, DocumentTemplate, ValidationReport};

/// A generated `.docx` ready to hand to the caller
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedDocument {
    pub bytes: Vec<u8>,
    pub mime_type: &'static str,
    pub suggested_filename: String,
}

impl GeneratedDocument {
    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Hand off the bytes together with the filename
    pub fn into_parts(self) -> (Vec<u8>, &'static str, String) {
        (self.bytes, self.mime_type, self.suggested_filename)
    }
}

impl DocumentTemplate {
    /// Validate, build and package `data` with this template.
    ///
    /// No bytes are produced unless validation passes.
    pub fn generate(
        &self,
        data: &DocumentData,
        ctx: &mut BuildContext<'_>,
    ) -> Result<GeneratedDocument, GenerateError> {
        let report = validate(self, data);
        if !report.valid {
            warn!(
                "Validation failed for {}: missing {:?}",
                self.id(),
                report.missing_fields
            );
        }
        report.into_result(self.id())?;

        let section = self.build(data, ctx)?;
        debug!(
            "Built {} with {} blocks for {} issues",
            self.id(),
            section.children.len(),
            data.issues.len()
        );

        let package = PackageWriter::new()
            .title(self.name)
            .created(ctx.now().naive_utc())
            .write(&section)?;

        info!("Generated {} ({} bytes)", self.id(), package.len());

        Ok(GeneratedDocument {
            mime_type: package.mime_type(),
            bytes: package.into_bytes(),
            suggested_filename: suggested_filename(self.name, ctx.now().naive_local()),
        })
    }
}

/// Generate a document using thread randomness and the local clock
pub fn generate(template_id: &str, data: &DocumentData) -> Result<GeneratedDocument, GenerateError> {
    let mut rng = rand::thread_rng();
    let now: DateTime<FixedOffset> = Local::now().into();
    let mut ctx = BuildContext::new(&mut rng, now);
    generate_with(template_id, data, &mut ctx)
}

/// Generate a document with explicit randomness and clock
pub fn generate_with(
    template_id: &str,
    data: &DocumentData,
    ctx: &mut BuildContext<'_>,
) -> Result<GeneratedDocument, GenerateError> {
    get_template(template_id)?.generate(data, ctx)
}

/// Check `data` against a template without generating anything
pub fn validate_for(
    template_id: &str,
    data: &DocumentData,
) -> Result<ValidationReport, GenerateError> {
    Ok(validate(get_template(template_id)?, data))
}
