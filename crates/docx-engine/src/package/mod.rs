//! WordprocessingML packaging
//!
//! Turns a [`Section`] into a `.docx` zip archive. The archive is built in
//! memory and handed to the caller as an owned [`DocxPackage`].

pub mod output;
pub mod parts;
pub mod xml;

pub use output::{suggested_filename, DOCX_EXTENSION, DOCX_MIME_TYPE};
pub use parts::PackageMetadata;
pub use xml::render_document_xml;

use std::io::{Cursor, Write};

use chrono::NaiveDateTime;
use tracing::debug;
use zip::write::FileOptions;
use zip::{CompressionMethod, ZipWriter};

use crate::errors::SerializationError;
use crate::tree::Section;

/// A finished `.docx` archive. Owns its bytes; `into_bytes` hands them off.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DocxPackage {
    bytes: Vec<u8>,
}

impl DocxPackage {
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    pub fn into_bytes(self) -> Vec<u8> {
        self.bytes
    }

    pub fn len(&self) -> usize {
        self.bytes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    pub fn mime_type(&self) -> &'static str {
        DOCX_MIME_TYPE
    }
}

/// Serialize with default metadata (no title, no timestamps)
pub fn serialize(section: &Section) -> Result<DocxPackage, SerializationError> {
    PackageWriter::new().write(section)
}

/// Configurable serializer
#[derive(Debug, Clone, Default)]
pub struct PackageWriter {
    metadata: PackageMetadata,
}

impl PackageWriter {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.metadata.title = Some(title.into());
        self
    }

    pub fn creator(mut self, creator: impl Into<String>) -> Self {
        self.metadata.creator = creator.into();
        self
    }

    pub fn created(mut self, at: NaiveDateTime) -> Self {
        self.metadata.created = Some(at);
        self
    }

    /// Render every part and zip them. Zip entries carry a fixed timestamp,
    /// so the same tree and metadata always give the same bytes.
    pub fn write(&self, section: &Section) -> Result<DocxPackage, SerializationError> {
        let document = render_document_xml(section)?;
        let core = parts::core_properties(&self.metadata)?;

        let entries: [(&str, String); 8] = [
            (parts::CONTENT_TYPES_PATH, parts::content_types()),
            (parts::ROOT_RELS_PATH, parts::root_rels()),
            (parts::CORE_PROPS_PATH, core),
            (parts::APP_PROPS_PATH, parts::app_properties()),
            (parts::DOCUMENT_PATH, document),
            (parts::DOCUMENT_RELS_PATH, parts::document_rels()),
            (parts::STYLES_PATH, parts::styles()),
            (parts::SETTINGS_PATH, parts::settings()),
        ];

        let options = FileOptions::default().compression_method(CompressionMethod::Deflated);
        let mut zip = ZipWriter::new(Cursor::new(Vec::new()));
        for (path, content) in &entries {
            zip.start_file(*path, options)?;
            zip.write_all(content.as_bytes())?;
        }
        let bytes = zip.finish()?.into_inner();

        debug!(
            "Packaged {} blocks into {} bytes",
            section.children.len(),
            bytes.len()
        );

        Ok(DocxPackage { bytes })
    }
}
