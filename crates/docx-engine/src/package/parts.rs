//! Fixed package parts: manifest, relationships, styles, settings, properties

use chrono::NaiveDateTime;

use super::xml::{escape, W_NS, XML_DECLARATION};
use crate::errors::SerializationError;

pub(crate) const CONTENT_TYPES_PATH: &str = "[Content_Types].xml";
pub(crate) const ROOT_RELS_PATH: &str = "_rels/.rels";
pub(crate) const DOCUMENT_PATH: &str = "word/document.xml";
pub(crate) const DOCUMENT_RELS_PATH: &str = "word/_rels/document.xml.rels";
pub(crate) const STYLES_PATH: &str = "word/styles.xml";
pub(crate) const SETTINGS_PATH: &str = "word/settings.xml";
pub(crate) const CORE_PROPS_PATH: &str = "docProps/core.xml";
pub(crate) const APP_PROPS_PATH: &str = "docProps/app.xml";

const RELS_NS: &str = "http://schemas.openxmlformats.org/package/2006/relationships";
const REL_BASE: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

pub(crate) fn content_types() -> String {
    format!(
        "{}<Types xmlns=\"http://schemas.openxmlformats.org/package/2006/content-types\">\
<Default Extension=\"rels\" ContentType=\"application/vnd.openxmlformats-package.relationships+xml\"/>\
<Default Extension=\"xml\" ContentType=\"application/xml\"/>\
<Override PartName=\"/{}\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.document.main+xml\"/>\
<Override PartName=\"/{}\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.styles+xml\"/>\
<Override PartName=\"/{}\" ContentType=\"application/vnd.openxmlformats-officedocument.wordprocessingml.settings+xml\"/>\
<Override PartName=\"/{}\" ContentType=\"application/vnd.openxmlformats-package.core-properties+xml\"/>\
<Override PartName=\"/{}\" ContentType=\"application/vnd.openxmlformats-officedocument.extended-properties+xml\"/>\
</Types>",
        XML_DECLARATION, DOCUMENT_PATH, STYLES_PATH, SETTINGS_PATH, CORE_PROPS_PATH, APP_PROPS_PATH
    )
}

pub(crate) fn root_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
<Relationship Id=\"rId1\" Type=\"{base}/officeDocument\" Target=\"{}\"/>\
<Relationship Id=\"rId2\" Type=\"http://schemas.openxmlformats.org/package/2006/relationships/metadata/core-properties\" Target=\"{}\"/>\
<Relationship Id=\"rId3\" Type=\"{base}/extended-properties\" Target=\"{}\"/>\
</Relationships>",
        XML_DECLARATION,
        RELS_NS,
        DOCUMENT_PATH,
        CORE_PROPS_PATH,
        APP_PROPS_PATH,
        base = REL_BASE,
    )
}

/// Targets are relative to `word/`
pub(crate) fn document_rels() -> String {
    format!(
        "{}<Relationships xmlns=\"{}\">\
<Relationship Id=\"rId1\" Type=\"{base}/styles\" Target=\"styles.xml\"/>\
<Relationship Id=\"rId2\" Type=\"{base}/settings\" Target=\"settings.xml\"/>\
</Relationships>",
        XML_DECLARATION,
        RELS_NS,
        base = REL_BASE,
    )
}

/// Document defaults: Times New Roman for Latin text, SimSun for East Asian
/// text, 12pt body. The heading uses SimHei.
pub(crate) fn styles() -> String {
    format!(
        "{}<w:styles xmlns:w=\"{}\">\
<w:docDefaults>\
<w:rPrDefault><w:rPr>\
<w:rFonts w:ascii=\"Times New Roman\" w:hAnsi=\"Times New Roman\" w:eastAsia=\"宋体\" w:cs=\"Times New Roman\"/>\
<w:sz w:val=\"24\"/><w:szCs w:val=\"24\"/>\
<w:lang w:val=\"en-US\" w:eastAsia=\"zh-CN\" w:bidi=\"ar-SA\"/>\
</w:rPr></w:rPrDefault>\
<w:pPrDefault><w:pPr><w:spacing w:after=\"0\" w:line=\"360\" w:lineRule=\"auto\"/></w:pPr></w:pPrDefault>\
</w:docDefaults>\
<w:style w:type=\"paragraph\" w:default=\"1\" w:styleId=\"Normal\"><w:name w:val=\"Normal\"/><w:qFormat/></w:style>\
<w:style w:type=\"paragraph\" w:styleId=\"Heading1\"><w:name w:val=\"heading 1\"/><w:basedOn w:val=\"Normal\"/><w:next w:val=\"Normal\"/><w:qFormat/>\
<w:pPr><w:keepNext/><w:outlineLvl w:val=\"0\"/></w:pPr>\
<w:rPr><w:rFonts w:eastAsia=\"黑体\"/><w:b/><w:bCs/><w:sz w:val=\"36\"/><w:szCs w:val=\"36\"/></w:rPr></w:style>\
<w:style w:type=\"table\" w:default=\"1\" w:styleId=\"TableNormal\"><w:name w:val=\"Normal Table\"/>\
<w:tblPr><w:tblInd w:w=\"0\" w:type=\"dxa\"/><w:tblCellMar>\
<w:top w:w=\"0\" w:type=\"dxa\"/><w:left w:w=\"108\" w:type=\"dxa\"/><w:bottom w:w=\"0\" w:type=\"dxa\"/><w:right w:w=\"108\" w:type=\"dxa\"/>\
</w:tblCellMar></w:tblPr></w:style>\
</w:styles>",
        XML_DECLARATION, W_NS
    )
}

pub(crate) fn settings() -> String {
    format!(
        "{}<w:settings xmlns:w=\"{}\">\
<w:defaultTabStop w:val=\"420\"/>\
<w:characterSpacingControl w:val=\"compressPunctuation\"/>\
<w:compat><w:compatSetting w:name=\"compatibilityMode\" w:uri=\"http://schemas.microsoft.com/office/word\" w:val=\"15\"/></w:compat>\
</w:settings>",
        XML_DECLARATION, W_NS
    )
}

/// Properties written to `docProps/core.xml`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PackageMetadata {
    pub title: Option<String>,
    pub creator: String,
    /// Omitted from the package when `None`
    pub created: Option<NaiveDateTime>,
}

impl Default for PackageMetadata {
    fn default() -> Self {
        Self {
            title: None,
            creator: "docx-engine".to_string(),
            created: None,
        }
    }
}

pub(crate) fn core_properties(metadata: &PackageMetadata) -> Result<String, SerializationError> {
    let mut out = format!(
        "{}<cp:coreProperties \
xmlns:cp=\"http://schemas.openxmlformats.org/package/2006/metadata/core-properties\" \
xmlns:dc=\"http://purl.org/dc/elements/1.1/\" \
xmlns:dcterms=\"http://purl.org/dc/terms/\" \
xmlns:dcmitype=\"http://purl.org/dc/dcmitype/\" \
xmlns:xsi=\"http://www.w3.org/2001/XMLSchema-instance\">",
        XML_DECLARATION
    );

    if let Some(title) = &metadata.title {
        out.push_str(&format!("<dc:title>{}</dc:title>", escape(title)?));
    }
    out.push_str(&format!(
        "<dc:creator>{}</dc:creator>",
        escape(&metadata.creator)?
    ));
    if let Some(created) = metadata.created {
        let stamp = created.format("%Y-%m-%dT%H:%M:%SZ");
        out.push_str(&format!(
            "<dcterms:created xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:created>\
<dcterms:modified xsi:type=\"dcterms:W3CDTF\">{stamp}</dcterms:modified>"
        ));
    }

    out.push_str("</cp:coreProperties>");
    Ok(out)
}

pub(crate) fn app_properties() -> String {
    format!(
        "{}<Properties xmlns=\"http://schemas.openxmlformats.org/officeDocument/2006/extended-properties\" \
xmlns:vt=\"http://schemas.openxmlformats.org/officeDocument/2006/docPropsVTypes\">\
<Application>docx-engine</Application><DocSecurity>0</DocSecurity>\
</Properties>",
        XML_DECLARATION
    )
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    #[test]
    fn test_content_types_cover_every_part() {
        let manifest = content_types();
        for path in [
            DOCUMENT_PATH,
            STYLES_PATH,
            SETTINGS_PATH,
            CORE_PROPS_PATH,
            APP_PROPS_PATH,
        ] {
            assert!(
                manifest.contains(&format!("PartName=\"/{}\"", path)),
                "manifest is missing {}",
                path
            );
        }
        assert!(manifest.contains("Extension=\"rels\""));
    }

    #[test]
    fn test_root_rels_point_at_main_document() {
        let rels = root_rels();
        assert!(rels.contains(
            "Type=\"http://schemas.openxmlformats.org/officeDocument/2006/relationships/officeDocument\" Target=\"word/document.xml\""
        ));
    }

    #[test]
    fn test_core_properties_escape_title() {
        let metadata = PackageMetadata {
            title: Some("A & B".to_string()),
            created: NaiveDate::from_ymd_opt(2025, 4, 18)
                .unwrap()
                .and_hms_opt(8, 0, 0),
            ..PackageMetadata::default()
        };
        let core = core_properties(&metadata).unwrap();
        assert!(core.contains("<dc:title>A &amp; B</dc:title>"));
        assert!(core.contains(">2025-04-18T08:00:00Z</dcterms:created>"));
    }

    #[test]
    fn test_core_properties_without_timestamp() {
        let core = core_properties(&PackageMetadata::default()).unwrap();
        assert!(!core.contains("dcterms:created"));
        assert!(core.contains("<dc:creator>docx-engine</dc:creator>"));
    }

    #[test]
    fn test_styles_define_heading_style() {
        let styles = styles();
        assert!(styles.contains("w:styleId=\"Heading1\""));
        assert!(styles.contains("w:eastAsia=\"宋体\""));
    }
}
