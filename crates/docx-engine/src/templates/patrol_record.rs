//! Patrol record (巡查记录表)

use issue_types::{DocumentData, DocumentField};

use super::layout::{
    block_cell, captioned, date_runs, footnote, issue_paragraphs, label_cell, require_date,
    require_text, runs_cell, signature_block, text_cell, title,
};
use super::registry::DocumentTemplate;
use crate::errors::BuildError;
use crate::tree::{Block, Paragraph, Section, Table, TableRow, TextRun};

pub const TITLE: &str = "工程质量安全巡查记录表";

/// Copies and distribution of the printed form
pub const FOOTNOTE: &str =
    "注：本表一式三份，由巡查单位填写，建设单位、监理单位、施工单位各存一份。";

pub fn build(template: &DocumentTemplate, data: &DocumentData) -> Result<Section, BuildError> {
    let project = require_text(template, data, DocumentField::ProjectName)?;
    let location = require_text(template, data, DocumentField::InspectionLocation)?;
    let start = require_date(template, data, DocumentField::InspectionStartDate)?;
    let end = require_date(template, data, DocumentField::InspectionEndDate)?;
    let inspector = require_text(template, data, DocumentField::InspectorName)?;

    let mut section = Section::new();
    section.push(title(TITLE, None));

    let mut period = date_runs(start);
    period.push(TextRun::new(" 至 "));
    period.extend(date_runs(end));

    section.push(Table::new(vec![
        TableRow::new(vec![
            label_cell("工程名称", 20),
            text_cell(project, 30),
            label_cell("巡查部位", 20),
            text_cell(location, 30),
        ]),
        TableRow::new(vec![
            label_cell("巡查时间", 20),
            runs_cell(period, 80).span(3),
        ]),
        TableRow::new(vec![
            label_cell("巡查人员", 20),
            text_cell(inspector, 80).span(3),
        ]),
    ]));

    let mut findings: Vec<Block> = vec![Paragraph::new("巡查发现问题：").bold().into()];
    findings.extend(issue_paragraphs(&data.issues).into_iter().map(Block::from));
    if let Some(text) = data.text(DocumentField::Findings) {
        findings.push(captioned("巡查意见：", text).into());
    }
    section.push(Table::new(vec![TableRow::new(vec![block_cell(findings, 100)])]));

    section.extend(signature_block(&[("巡查人", inspector)], end));
    section.push(footnote(FOOTNOTE));

    Ok(section)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::templates::TemplateKind;
    use chrono::NaiveDate;
    use issue_types::Issue;
    use pretty_assertions::assert_eq;

    fn patrol_data() -> DocumentData {
        DocumentData {
            project_name: "东方明珠二期工程".to_string(),
            inspection_location: Some("3号楼东侧脚手架".to_string()),
            inspection_start_date: NaiveDate::from_ymd_opt(2025, 4, 1),
            inspection_end_date: NaiveDate::from_ymd_opt(2025, 4, 18),
            inspector_name: Some("李工".to_string()),
            issues: vec![Issue::new("连墙件缺失"), Issue::new("安全网破损")],
            ..DocumentData::default()
        }
    }

    fn template() -> &'static DocumentTemplate {
        TemplateKind::PatrolRecord.template()
    }

    #[test]
    fn test_patrol_record_text() {
        let section = build(template(), &patrol_data()).unwrap();
        let text = section.plain_text();
        let lines: Vec<&str> = text.lines().collect();

        assert_eq!(lines[0], TITLE);
        assert!(lines.contains(&"2025 年 04 月 01 日 至 2025 年 04 月 18 日"));
        assert!(lines.contains(&"1. 连墙件缺失"));
        assert!(lines.contains(&"2. 安全网破损"));
        assert!(lines.contains(&"巡查人：李工"));
        assert!(lines.contains(&"日期：2025 年 04 月 18 日"));
        assert_eq!(lines.last(), Some(&FOOTNOTE));
    }

    #[test]
    fn test_findings_follow_issue_list() {
        let data = DocumentData {
            findings: Some("限期三日内整改完毕".to_string()),
            ..patrol_data()
        };
        let text = build(template(), &data).unwrap().plain_text();
        let issue = text.find("2. 安全网破损").unwrap();
        let findings = text.find("巡查意见：限期三日内整改完毕").unwrap();
        assert!(issue < findings);
        // The issue list is still there
        assert!(text.contains("1. 连墙件缺失"));
    }

    #[test]
    fn test_empty_findings_are_skipped() {
        let data = DocumentData {
            findings: Some(String::new()),
            ..patrol_data()
        };
        let text = build(template(), &data).unwrap().plain_text();
        assert!(!text.contains("巡查意见"));
    }

    #[test]
    fn test_zero_issues_keeps_structure() {
        let data = DocumentData {
            issues: vec![],
            ..patrol_data()
        };
        let section = build(template(), &data).unwrap();
        let with_issues = build(template(), &patrol_data()).unwrap();
        assert_eq!(section.children.len(), with_issues.children.len());
        assert!(section.plain_text().contains("巡查发现问题："));
    }

    #[test]
    fn test_metadata_rows_sum_to_full_width() {
        let section = build(template(), &patrol_data()).unwrap();
        let Block::Table(table) = &section.children[1] else {
            panic!("expected metadata table");
        };
        for row in &table.rows {
            let total: u32 = row
                .cells
                .iter()
                .map(|cell| match cell.width {
                    crate::tree::Width::Percent(p) => u32::from(p),
                    crate::tree::Width::Auto => 0,
                })
                .sum();
            assert_eq!(total, 100);
            assert_eq!(row.grid_span(), 4);
        }
    }

    #[test]
    fn test_unvalidated_data_fails_fast() {
        let data = DocumentData {
            inspector_name: None,
            ..patrol_data()
        };
        let err = build(template(), &data).unwrap_err();
        assert_eq!(
            err,
            BuildError::MissingField {
                template_id: "patrol-record".to_string(),
                field: DocumentField::InspectorName,
            }
        );
    }
}
