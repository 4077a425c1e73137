//! Document generation payload
//!
//! `DocumentData` is the flat record a caller fills in before asking for a
//! document. Every template reads a subset of it; which fields are mandatory
//! is declared by the template, not here.

use chrono::{DateTime, NaiveDate};
use serde::{de, Deserialize, Deserializer, Serialize};

use crate::types::Issue;

/// Named fields of [`DocumentData`] that a template may require
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub enum DocumentField {
    ProjectName,
    InspectionLocation,
    InspectionStartDate,
    InspectionEndDate,
    InspectorName,
    Findings,
    NoticeContent,
    SupervisorName,
    NoticeDate,
    RecipientName,
    Subject,
}

impl DocumentField {
    pub const ALL: [DocumentField; 11] = [
        DocumentField::ProjectName,
        DocumentField::InspectionLocation,
        DocumentField::InspectionStartDate,
        DocumentField::InspectionEndDate,
        DocumentField::InspectorName,
        DocumentField::Findings,
        DocumentField::NoticeContent,
        DocumentField::SupervisorName,
        DocumentField::NoticeDate,
        DocumentField::RecipientName,
        DocumentField::Subject,
    ];

    /// Wire name of the field (matches the JSON key)
    pub fn name(&self) -> &'static str {
        match self {
            DocumentField::ProjectName => "projectName",
            DocumentField::InspectionLocation => "inspectionLocation",
            DocumentField::InspectionStartDate => "inspectionStartDate",
            DocumentField::InspectionEndDate => "inspectionEndDate",
            DocumentField::InspectorName => "inspectorName",
            DocumentField::Findings => "findings",
            DocumentField::NoticeContent => "noticeContent",
            DocumentField::SupervisorName => "supervisorName",
            DocumentField::NoticeDate => "noticeDate",
            DocumentField::RecipientName => "recipientName",
            DocumentField::Subject => "subject",
        }
    }

    /// Date fields are checked for presence only
    pub fn is_date(&self) -> bool {
        matches!(
            self,
            DocumentField::InspectionStartDate
                | DocumentField::InspectionEndDate
                | DocumentField::NoticeDate
        )
    }
}

impl std::fmt::Display for DocumentField {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.name())
    }
}

impl std::str::FromStr for DocumentField {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        DocumentField::ALL
            .iter()
            .copied()
            .find(|field| field.name() == s)
            .ok_or_else(|| format!("Unknown document field: {}", s))
    }
}

/// Generation request payload
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DocumentData {
    /// Issues in the order they should appear in the document
    #[serde(default, deserialize_with = "null_as_default")]
    pub issues: Vec<Issue>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub project_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspection_location: Option<String>,
    #[serde(
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub inspection_start_date: Option<NaiveDate>,
    #[serde(
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub inspection_end_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub inspector_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub findings: Option<String>,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notice_content: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub supervisor_name: Option<String>,
    #[serde(
        default,
        deserialize_with = "flexible_date",
        skip_serializing_if = "Option::is_none"
    )]
    pub notice_date: Option<NaiveDate>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub recipient_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub subject: Option<String>,
}

impl DocumentData {
    /// Whether `field` counts as supplied: text must be non-empty, dates
    /// only need to be present.
    pub fn has_field(&self, field: DocumentField) -> bool {
        if field.is_date() {
            self.date(field).is_some()
        } else {
            self.text(field).is_some()
        }
    }

    /// Non-empty value of a text field. Date fields always yield `None`.
    pub fn text(&self, field: DocumentField) -> Option<&str> {
        let value = match field {
            DocumentField::ProjectName => Some(self.project_name.as_str()),
            DocumentField::InspectionLocation => self.inspection_location.as_deref(),
            DocumentField::InspectorName => self.inspector_name.as_deref(),
            DocumentField::Findings => self.findings.as_deref(),
            DocumentField::NoticeContent => self.notice_content.as_deref(),
            DocumentField::SupervisorName => self.supervisor_name.as_deref(),
            DocumentField::RecipientName => self.recipient_name.as_deref(),
            DocumentField::Subject => self.subject.as_deref(),
            DocumentField::InspectionStartDate
            | DocumentField::InspectionEndDate
            | DocumentField::NoticeDate => None,
        };
        value.filter(|s| !s.is_empty())
    }

    /// Value of a date field. Text fields always yield `None`.
    pub fn date(&self, field: DocumentField) -> Option<NaiveDate> {
        match field {
            DocumentField::InspectionStartDate => self.inspection_start_date,
            DocumentField::InspectionEndDate => self.inspection_end_date,
            DocumentField::NoticeDate => self.notice_date,
            _ => None,
        }
    }
}

fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Accepts `YYYY-MM-DD` or an RFC 3339 timestamp; empty string and null are
/// treated as absent.
fn flexible_date<'de, D>(deserializer: D) -> Result<Option<NaiveDate>, D::Error>
where
    D: Deserializer<'de>,
{
    let raw: Option<String> = Option::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(s) => parse_date(s)
            .map(Some)
            .ok_or_else(|| de::Error::custom(format!("invalid date '{}'", s))),
    }
}

fn parse_date(s: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(s, "%Y-%m-%d")
        .ok()
        .or_else(|| DateTime::parse_from_rfc3339(s).ok().map(|dt| dt.date_naive()))
}
