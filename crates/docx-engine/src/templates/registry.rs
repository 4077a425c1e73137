//! Template registry and metadata

use issue_types::{DocumentData, DocumentField};
use serde::{Deserialize, Serialize};

use super::context::BuildContext;
use super::supervision_notice::NoticeStyle;
use super::{patrol_record, supervision_notice};
use crate::errors::{BuildError, GenerateError};
use crate::tree::Section;

/// The closed set of document templates
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum TemplateKind {
    PatrolRecord,
    SupervisionNoticeTemplate1,
    SupervisionNoticeTemplate2,
}

impl TemplateKind {
    pub const ALL: [TemplateKind; 3] = [
        TemplateKind::PatrolRecord,
        TemplateKind::SupervisionNoticeTemplate1,
        TemplateKind::SupervisionNoticeTemplate2,
    ];

    pub fn id(&self) -> &'static str {
        match self {
            TemplateKind::PatrolRecord => "patrol-record",
            TemplateKind::SupervisionNoticeTemplate1 => "supervision-notice-template1",
            TemplateKind::SupervisionNoticeTemplate2 => "supervision-notice-template2",
        }
    }

    /// Registry entry for this kind
    pub fn template(&self) -> &'static DocumentTemplate {
        match self {
            TemplateKind::PatrolRecord => &TEMPLATES[0],
            TemplateKind::SupervisionNoticeTemplate1 => &TEMPLATES[1],
            TemplateKind::SupervisionNoticeTemplate2 => &TEMPLATES[2],
        }
    }
}

impl std::fmt::Display for TemplateKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.id())
    }
}

impl std::str::FromStr for TemplateKind {
    type Err = GenerateError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        TemplateKind::ALL
            .iter()
            .copied()
            .find(|kind| kind.id() == s)
            .ok_or_else(|| GenerateError::TemplateNotFound(s.to_string()))
    }
}

/// A registered generation recipe
#[derive(Debug, PartialEq, Eq)]
pub struct DocumentTemplate {
    pub kind: TemplateKind,
    /// Display name; also the stem of the suggested filename
    pub name: &'static str,
    pub description: &'static str,
    pub preview: Option<&'static str>,
    /// Fields that must be present, in reporting order
    pub required_fields: &'static [DocumentField],
    /// Fields the template reads when present
    pub optional_fields: &'static [DocumentField],
}

const PATROL_REQUIRED: &[DocumentField] = &[
    DocumentField::ProjectName,
    DocumentField::InspectionLocation,
    DocumentField::InspectionStartDate,
    DocumentField::InspectionEndDate,
    DocumentField::InspectorName,
];

const NOTICE_REQUIRED: &[DocumentField] = &[
    DocumentField::ProjectName,
    DocumentField::RecipientName,
    DocumentField::Subject,
    DocumentField::NoticeContent,
    DocumentField::SupervisorName,
];

static TEMPLATES: [DocumentTemplate; 3] = [
    DocumentTemplate {
        kind: TemplateKind::PatrolRecord,
        name: "工程质量安全巡查记录表",
        description: "现场巡查记录：巡查时间、部位、人员及发现问题清单",
        preview: Some("/previews/patrol-record.png"),
        required_fields: PATROL_REQUIRED,
        optional_fields: &[DocumentField::Findings],
    },
    DocumentTemplate {
        kind: TemplateKind::SupervisionNoticeTemplate1,
        name: "监理通知单（样式一）",
        description: "项目监理机构向施工单位下发的监理通知单，标准版式",
        preview: Some("/previews/supervision-notice-template1.png"),
        required_fields: NOTICE_REQUIRED,
        optional_fields: &[DocumentField::NoticeDate],
    },
    DocumentTemplate {
        kind: TemplateKind::SupervisionNoticeTemplate2,
        name: "监理通知单（样式二）",
        description: "监理通知单紧凑版式，内容与样式一一致",
        preview: Some("/previews/supervision-notice-template2.png"),
        required_fields: NOTICE_REQUIRED,
        optional_fields: &[DocumentField::NoticeDate],
    },
];

impl DocumentTemplate {
    pub fn id(&self) -> &'static str {
        self.kind.id()
    }

    /// Build the document tree. Callers must validate `data` first; a
    /// missing required field surfaces as [`BuildError::MissingField`].
    pub fn build(
        &self,
        data: &DocumentData,
        ctx: &mut BuildContext<'_>,
    ) -> Result<Section, BuildError> {
        match self.kind {
            TemplateKind::PatrolRecord => patrol_record::build(self, data),
            TemplateKind::SupervisionNoticeTemplate1 => {
                supervision_notice::build(self, data, ctx, &NoticeStyle::STANDARD)
            }
            // Same content as template 1, different presentation
            TemplateKind::SupervisionNoticeTemplate2 => {
                supervision_notice::build(self, data, ctx, &NoticeStyle::COMPACT)
            }
        }
    }

    pub fn info(&self) -> TemplateInfo {
        TemplateInfo {
            id: self.id().to_string(),
            name: self.name.to_string(),
            description: self.description.to_string(),
            preview: self.preview.map(str::to_string),
            required_fields: field_names(self.required_fields),
            optional_fields: field_names(self.optional_fields),
        }
    }
}

fn field_names(fields: &[DocumentField]) -> Vec<String> {
    fields.iter().map(|field| field.name().to_string()).collect()
}

/// Information about an available template
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateInfo {
    pub id: String,
    pub name: String,
    pub description: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub preview: Option<String>,
    pub required_fields: Vec<String>,
    pub optional_fields: Vec<String>,
}

/// List all available templates, in registry order
pub fn list_templates() -> Vec<TemplateInfo> {
    TEMPLATES.iter().map(DocumentTemplate::info).collect()
}

/// Look up a template by id. Unknown ids are an error, never a fallback.
pub fn get_template(id: &str) -> Result<&'static DocumentTemplate, GenerateError> {
    id.parse::<TemplateKind>().map(|kind| kind.template())
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn test_list_templates_order() {
        let ids: Vec<String> = list_templates().into_iter().map(|t| t.id).collect();
        assert_eq!(
            ids,
            vec![
                "patrol-record",
                "supervision-notice-template1",
                "supervision-notice-template2"
            ]
        );
    }

    #[test]
    fn test_kind_template_round_trip() {
        for kind in TemplateKind::ALL {
            assert_eq!(kind.template().kind, kind);
            assert_eq!(get_template(kind.id()).unwrap().kind, kind);
        }
    }

    #[test]
    fn test_serde_ids_match_registry_ids() {
        for kind in TemplateKind::ALL {
            let json = serde_json::to_string(&kind).unwrap();
            assert_eq!(json, format!("\"{}\"", kind.id()));
        }
    }

    #[test]
    fn test_unknown_template_is_not_found() {
        let result = get_template("not-a-real-id");
        assert!(matches!(
            result,
            Err(GenerateError::TemplateNotFound(ref id)) if id == "not-a-real-id"
        ));
    }

    #[test]
    fn test_lookup_is_exact() {
        assert!(get_template("Patrol-Record").is_err());
        assert!(get_template(" patrol-record").is_err());
        assert!(get_template("").is_err());
    }

    #[test]
    fn test_notice_templates_share_required_fields() {
        let one = TemplateKind::SupervisionNoticeTemplate1.template();
        let two = TemplateKind::SupervisionNoticeTemplate2.template();
        assert_eq!(one.required_fields, two.required_fields);
        assert_ne!(one.name, two.name);
    }

    #[test]
    fn test_patrol_required_fields() {
        let info = TemplateKind::PatrolRecord.template().info();
        assert_eq!(
            info.required_fields,
            vec![
                "projectName",
                "inspectionLocation",
                "inspectionStartDate",
                "inspectionEndDate",
                "inspectorName"
            ]
        );
        assert_eq!(info.optional_fields, vec!["findings"]);
    }

    #[test]
    fn test_every_template_requires_project_name() {
        for template in TEMPLATES.iter() {
            assert!(!template.required_fields.is_empty());
            assert!(template.required_fields.contains(&DocumentField::ProjectName));
        }
    }
}
