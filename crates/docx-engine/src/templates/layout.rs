//! Layout pieces shared by the form templates

use chrono::{Datelike, NaiveDate};
use issue_types::{DocumentData, DocumentField, Issue};

use super::registry::DocumentTemplate;
use crate::errors::BuildError;
use crate::tree::{
    Alignment, Block, Border, Borders, HeadingLevel, Paragraph, Spacing, TableCell, TextRun, Width,
};

/// Every form table cell is boxed with a single black 1pt line
pub const FORM_BORDERS: Borders = Borders::all(Border::SINGLE_BLACK_1PT);

/// Footnote size in half-points (10.5pt, 五号)
const FOOTNOTE_SIZE: u32 = 21;

/// Centered level-1 heading
pub fn title(text: &str, size: Option<u32>) -> Paragraph {
    let paragraph = Paragraph::new(text)
        .heading(HeadingLevel::H1)
        .align(Alignment::Center)
        .spacing(Spacing::new(0, 240))
        .bold();
    match size {
        Some(half_points) => paragraph.size(half_points),
        None => paragraph,
    }
}

/// Bold caption cell
pub fn label_cell(text: &str, percent: u8) -> TableCell {
    TableCell::new(vec![Paragraph::new(text)
        .bold()
        .align(Alignment::Center)
        .into()])
    .width(Width::Percent(percent))
    .borders(FORM_BORDERS)
}

pub fn text_cell(text: &str, percent: u8) -> TableCell {
    runs_cell(vec![TextRun::new(text)], percent)
}

pub fn runs_cell(runs: Vec<TextRun>, percent: u8) -> TableCell {
    TableCell::new(vec![Paragraph::from_runs(runs).into()])
        .width(Width::Percent(percent))
        .borders(FORM_BORDERS)
}

pub fn block_cell(children: Vec<Block>, percent: u8) -> TableCell {
    TableCell::new(children)
        .width(Width::Percent(percent))
        .borders(FORM_BORDERS)
}

/// `2025 年 04 月 18 日`: year, month and day as separate runs with the
/// 年/月/日 connectors between them
pub fn date_runs(date: NaiveDate) -> Vec<TextRun> {
    vec![
        TextRun::new(date.year().to_string()),
        TextRun::new(" 年 "),
        TextRun::new(format!("{:02}", date.month())),
        TextRun::new(" 月 "),
        TextRun::new(format!("{:02}", date.day())),
        TextRun::new(" 日"),
    ]
}

/// `1. <description>` per issue, in input order
pub fn issue_paragraphs(issues: &[Issue]) -> Vec<Paragraph> {
    issues
        .iter()
        .enumerate()
        .map(|(i, issue)| Paragraph::new(format!("{}. {}", i + 1, issue.description)))
        .collect()
}

/// Bold caption run followed by free text
pub fn captioned(caption: &str, text: &str) -> Paragraph {
    Paragraph::from_runs(vec![TextRun::new(caption).bold(), TextRun::new(text)])
}

/// Right-aligned signature lines: one `role：name` line per signer, then the
/// date line
pub fn signature_block(signers: &[(&str, &str)], date: NaiveDate) -> Vec<Paragraph> {
    let mut lines: Vec<Paragraph> = signers
        .iter()
        .map(|(role, name)| {
            Paragraph::new(format!("{}：{}", role, name))
                .align(Alignment::Right)
                .spacing(Spacing::new(120, 0))
        })
        .collect();

    let mut runs = vec![TextRun::new("日期：")];
    runs.extend(date_runs(date));
    lines.push(
        Paragraph::from_runs(runs)
            .align(Alignment::Right)
            .spacing(Spacing::new(120, 0)),
    );
    lines
}

pub fn footnote(text: &str) -> Paragraph {
    Paragraph::new(text)
        .size(FOOTNOTE_SIZE)
        .spacing(Spacing::new(120, 0))
}

/// Value of a required text field, or a build error if validation was
/// skipped
pub fn require_text<'d>(
    template: &DocumentTemplate,
    data: &'d DocumentData,
    field: DocumentField,
) -> Result<&'d str, BuildError> {
    data.text(field).ok_or_else(|| missing(template, field))
}

pub fn require_date(
    template: &DocumentTemplate,
    data: &DocumentData,
    field: DocumentField,
) -> Result<NaiveDate, BuildError> {
    data.date(field).ok_or_else(|| missing(template, field))
}

fn missing(template: &DocumentTemplate, field: DocumentField) -> BuildError {
    BuildError::MissingField {
        template_id: template.id().to_string(),
        field,
    }
}
