//! Supervision notice (监理通知单)
//!
//! Both notice templates carry the same text in the same block order. They
//! differ only in the presentation attributes held by [`NoticeStyle`].

use issue_types::{DocumentData, DocumentField};

use super::context::BuildContext;
use super::layout::{
    block_cell, footnote, issue_paragraphs, label_cell, require_text, signature_block, text_cell,
    title,
};
use super::registry::DocumentTemplate;
use crate::errors::BuildError;
use crate::tree::{Alignment, Block, Paragraph, Section, Spacing, Table, TableRow, Width};

pub const TITLE: &str = "监理通知单";

pub const FOOTNOTE: &str = "注：本表一式三份，项目监理机构、建设单位、施工单位各一份。";

/// Layout knobs that tell the notice variants apart
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct NoticeStyle {
    /// Title font size in half-points
    pub title_size: u32,
    pub number_alignment: Alignment,
    pub table_width: Width,
}

impl NoticeStyle {
    /// 二号 title, number flush right, full-width table
    pub const STANDARD: NoticeStyle = NoticeStyle {
        title_size: 44,
        number_alignment: Alignment::Right,
        table_width: Width::Percent(100),
    };

    /// 三号 title, number flush left, slightly narrower table
    pub const COMPACT: NoticeStyle = NoticeStyle {
        title_size: 32,
        number_alignment: Alignment::Left,
        table_width: Width::Percent(90),
    };
}

pub fn build(
    template: &DocumentTemplate,
    data: &DocumentData,
    ctx: &mut BuildContext<'_>,
    style: &NoticeStyle,
) -> Result<Section, BuildError> {
    let project = require_text(template, data, DocumentField::ProjectName)?;
    let recipient = require_text(template, data, DocumentField::RecipientName)?;
    let subject = require_text(template, data, DocumentField::Subject)?;
    let content = require_text(template, data, DocumentField::NoticeContent)?;
    let supervisor = require_text(template, data, DocumentField::SupervisorName)?;
    let date = data
        .date(DocumentField::NoticeDate)
        .unwrap_or_else(|| ctx.today());

    let mut section = Section::new();
    section.push(title(TITLE, Some(style.title_size)));
    section.push(
        Paragraph::new(format!("编号：{}", ctx.document_number()))
            .align(style.number_alignment)
            .spacing(Spacing::new(0, 120)),
    );

    let mut body: Vec<Block> = vec![Paragraph::new("内容：").bold().into()];
    body.extend(issue_paragraphs(&data.issues).into_iter().map(Block::from));
    body.push(Paragraph::new(content).spacing(Spacing::new(120, 0)).into());
    body.push(
        Paragraph::new("项目监理机构（盖章）")
            .align(Alignment::Right)
            .spacing(Spacing::new(240, 0))
            .into(),
    );
    body.extend(
        signature_block(&[("总监理工程师/专业监理工程师", supervisor)], date)
            .into_iter()
            .map(Block::from),
    );

    section.push(
        Table::new(vec![
            TableRow::new(vec![label_cell("工程名称", 20), text_cell(project, 80)]),
            TableRow::new(vec![
                label_cell("致", 20),
                text_cell(&format!("{}（施工项目经理部）", recipient), 80),
            ]),
            TableRow::new(vec![label_cell("事由", 20), text_cell(subject, 80)]),
            TableRow::new(vec![block_cell(body, 100).span(2)]),
        ])
        .width(style.table_width),
    );
    section.push(footnote(FOOTNOTE));

    Ok(section)
}
