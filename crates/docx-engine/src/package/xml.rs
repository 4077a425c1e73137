//! Document tree to WordprocessingML (`word/document.xml`)
//!
//! Nodes are written in tree order; nothing is reordered or merged. Any
//! structure that would make an invalid part is reported instead of being
//! patched over, except for the two empty paragraphs the schema demands
//! (empty cells and cells ending in a nested table).

use crate::errors::SerializationError;
use crate::tree::{
    Alignment, Block, Border, Borders, Paragraph, Section, Table, TableCell, TextRun, Width,
};

pub(crate) const XML_DECLARATION: &str =
    "<?xml version=\"1.0\" encoding=\"UTF-8\" standalone=\"yes\"?>\r\n";

pub(crate) const W_NS: &str = "http://schemas.openxmlformats.org/wordprocessingml/2006/main";
const R_NS: &str = "http://schemas.openxmlformats.org/officeDocument/2006/relationships";

/// A4 portrait, in twentieths of a point
pub const PAGE_WIDTH: u32 = 11906;
pub const PAGE_HEIGHT: u32 = 16838;
pub const MARGIN_SIDE: u32 = 1800;
pub const MARGIN_TOP_BOTTOM: u32 = 1440;
pub const CONTENT_WIDTH: u32 = PAGE_WIDTH - 2 * MARGIN_SIDE;

/// Basis points per 100%
const FULL: u32 = 10_000;

/// Widest grid Word will open
pub const MAX_COLUMNS: u32 = 63;

/// Render the main document part for `section`
pub fn render_document_xml(section: &Section) -> Result<String, SerializationError> {
    let mut writer = BodyWriter::default();
    writer.out.push_str(XML_DECLARATION);
    writer.out.push_str(&format!(
        "<w:document xmlns:w=\"{}\" xmlns:r=\"{}\"><w:body>",
        W_NS, R_NS
    ));

    for block in &section.children {
        writer.block(block, CONTENT_WIDTH)?;
    }

    writer.out.push_str(&format!(
        "<w:sectPr><w:pgSz w:w=\"{}\" w:h=\"{}\"/><w:pgMar w:top=\"{tb}\" w:right=\"{side}\" w:bottom=\"{tb}\" w:left=\"{side}\" w:header=\"851\" w:footer=\"992\" w:gutter=\"0\"/></w:sectPr>",
        PAGE_WIDTH,
        PAGE_HEIGHT,
        tb = MARGIN_TOP_BOTTOM,
        side = MARGIN_SIDE,
    ));
    writer.out.push_str("</w:body></w:document>");

    Ok(writer.out)
}

#[derive(Default)]
struct BodyWriter {
    out: String,
    /// Running table counter, for error messages
    tables: usize,
}

impl BodyWriter {
    fn block(&mut self, block: &Block, available: u32) -> Result<(), SerializationError> {
        match block {
            Block::Paragraph(paragraph) => self.paragraph(paragraph),
            Block::Table(table) => self.table(table, available),
        }
    }

    fn paragraph(&mut self, paragraph: &Paragraph) -> Result<(), SerializationError> {
        self.out.push_str("<w:p>");

        let has_props = paragraph.heading.is_some()
            || !paragraph.spacing.is_zero()
            || paragraph.alignment != Alignment::Left;
        if has_props {
            self.out.push_str("<w:pPr>");
            if let Some(level) = paragraph.heading {
                self.out
                    .push_str(&format!("<w:pStyle w:val=\"{}\"/>", level.style_id()));
            }
            if !paragraph.spacing.is_zero() {
                self.out.push_str(&format!(
                    "<w:spacing w:before=\"{}\" w:after=\"{}\"/>",
                    paragraph.spacing.before, paragraph.spacing.after
                ));
            }
            if paragraph.alignment != Alignment::Left {
                self.out.push_str(&format!(
                    "<w:jc w:val=\"{}\"/>",
                    paragraph.alignment.ooxml_value()
                ));
            }
            self.out.push_str("</w:pPr>");
        }

        for run in &paragraph.runs {
            self.run(run)?;
        }

        self.out.push_str("</w:p>");
        Ok(())
    }

    fn run(&mut self, run: &TextRun) -> Result<(), SerializationError> {
        self.out.push_str("<w:r>");

        if run.bold || run.size.is_some() {
            self.out.push_str("<w:rPr>");
            if run.bold {
                self.out.push_str("<w:b/><w:bCs/>");
            }
            if let Some(size) = run.size {
                self.out.push_str(&format!(
                    "<w:sz w:val=\"{size}\"/><w:szCs w:val=\"{size}\"/>"
                ));
            }
            self.out.push_str("</w:rPr>");
        }

        // A lone CR breaks the line like LF
        let text = run.text.replace("\r\n", "\n");
        for (i, line) in text.split(&['\n', '\r'][..]).enumerate() {
            if i > 0 {
                self.out.push_str("<w:br/>");
            }
            self.out.push_str("<w:t xml:space=\"preserve\">");
            escape_into(line, &mut self.out)?;
            self.out.push_str("</w:t>");
        }

        self.out.push_str("</w:r>");
        Ok(())
    }

    fn table(&mut self, table: &Table, available: u32) -> Result<(), SerializationError> {
        let index = self.tables;
        self.tables += 1;

        let grid = grid_columns(table, index)?;
        let table_twips = scale(available, table.width)?;
        let column_twips: Vec<u32> = grid.iter().map(|bp| table_twips * bp / FULL).collect();

        self.out.push_str("<w:tbl><w:tblPr>");
        self.out.push_str(&width_element("w:tblW", table.width, table_twips));
        self.out.push_str("<w:tblLayout w:type=\"fixed\"/></w:tblPr><w:tblGrid>");
        for twips in &column_twips {
            self.out.push_str(&format!("<w:gridCol w:w=\"{}\"/>", twips));
        }
        self.out.push_str("</w:tblGrid>");

        for row in &table.rows {
            self.out.push_str("<w:tr>");
            let mut column = 0usize;
            for cell in &row.cells {
                let span = cell.column_span as usize;
                let cell_twips: u32 = column_twips[column..column + span].iter().sum();
                self.cell(cell, cell_twips)?;
                column += span;
            }
            self.out.push_str("</w:tr>");
        }

        self.out.push_str("</w:tbl>");
        Ok(())
    }

    fn cell(&mut self, cell: &TableCell, cell_twips: u32) -> Result<(), SerializationError> {
        self.out.push_str("<w:tc><w:tcPr>");
        self.out.push_str(&width_element("w:tcW", cell.width, cell_twips));
        if cell.column_span > 1 {
            self.out
                .push_str(&format!("<w:gridSpan w:val=\"{}\"/>", cell.column_span));
        }
        if !cell.borders.is_empty() {
            self.out.push_str(&borders_element(&cell.borders));
        }
        self.out.push_str("<w:vAlign w:val=\"center\"/></w:tcPr>");

        for block in &cell.children {
            self.block(block, cell_twips)?;
        }
        // A cell must end with a paragraph
        if !matches!(cell.children.last(), Some(Block::Paragraph(_))) {
            self.out.push_str("<w:p/>");
        }

        self.out.push_str("</w:tc>");
        Ok(())
    }
}

/// Column widths in basis points, summing to 10000.
///
/// The grid comes from the first row that has one cell per column and only
/// percentage widths; without such a row the columns are split evenly.
fn grid_columns(table: &Table, index: usize) -> Result<Vec<u32>, SerializationError> {
    if table.rows.is_empty() {
        return Err(SerializationError::EmptyTable { table: index });
    }

    for (row_index, row) in table.rows.iter().enumerate() {
        if row.cells.is_empty() {
            return Err(SerializationError::EmptyRow {
                table: index,
                row: row_index,
            });
        }
        if row.cells.iter().any(|cell| cell.column_span == 0) {
            return Err(SerializationError::ZeroColumnSpan {
                table: index,
                row: row_index,
            });
        }
        let found: u64 = row
            .cells
            .iter()
            .map(|cell| u64::from(cell.column_span))
            .sum();
        if found > u64::from(MAX_COLUMNS) {
            return Err(SerializationError::TooManyColumns {
                table: index,
                row: row_index,
                found,
                max: MAX_COLUMNS,
            });
        }

        let mut total = 0u32;
        let mut all_percent = true;
        for cell in &row.cells {
            match cell.width {
                Width::Percent(p) if p > 100 => return Err(SerializationError::InvalidPercent(p)),
                Width::Percent(p) => total += u32::from(p),
                Width::Auto => all_percent = false,
            }
        }
        if all_percent && total != 100 {
            return Err(SerializationError::WidthMismatch {
                table: index,
                row: row_index,
                total,
            });
        }
    }

    let columns = table
        .rows
        .iter()
        .map(|row| row.grid_span())
        .max()
        .unwrap_or(1);

    for (row_index, row) in table.rows.iter().enumerate() {
        let found = row.grid_span();
        if found != columns {
            return Err(SerializationError::RaggedTable {
                table: index,
                row: row_index,
                expected: columns,
                found,
            });
        }
    }

    let finest = table.rows.iter().find(|row| {
        row.cells.len() as u32 == columns
            && row.cells.iter().all(|cell| matches!(cell.width, Width::Percent(_)))
    });

    let grid = match finest {
        Some(row) => row
            .cells
            .iter()
            .map(|cell| match cell.width {
                Width::Percent(p) => u32::from(p) * 100,
                Width::Auto => 0,
            })
            .collect(),
        None => {
            let share = FULL / columns;
            let mut grid = vec![share; columns as usize];
            if let Some(last) = grid.last_mut() {
                *last += FULL - share * columns;
            }
            grid
        }
    };

    Ok(grid)
}

fn scale(available: u32, width: Width) -> Result<u32, SerializationError> {
    match width {
        Width::Auto => Ok(available),
        Width::Percent(p) if p > 100 => Err(SerializationError::InvalidPercent(p)),
        Width::Percent(p) => Ok(available * u32::from(p) / 100),
    }
}

/// `w:tblW` / `w:tcW`. Percentages are written in fiftieths of a percent.
fn width_element(tag: &str, width: Width, twips: u32) -> String {
    match width {
        Width::Percent(p) => format!("<{} w:w=\"{}\" w:type=\"pct\"/>", tag, u32::from(p) * 50),
        Width::Auto if tag == "w:tblW" => format!("<{} w:w=\"0\" w:type=\"auto\"/>", tag),
        Width::Auto => format!("<{} w:w=\"{}\" w:type=\"dxa\"/>", tag, twips),
    }
}

fn borders_element(borders: &Borders) -> String {
    let mut out = String::from("<w:tcBorders>");
    let sides = [
        ("top", borders.top),
        ("left", borders.left),
        ("bottom", borders.bottom),
        ("right", borders.right),
    ];
    for (side, border) in sides {
        if let Some(Border { style, size, color }) = border {
            out.push_str(&format!(
                "<w:{} w:val=\"{}\" w:sz=\"{}\" w:space=\"0\" w:color=\"{}\"/>",
                side,
                style.ooxml_value(),
                size,
                color
            ));
        }
    }
    out.push_str("</w:tcBorders>");
    out
}

/// Escape text for element or attribute content, rejecting characters
/// XML 1.0 cannot carry
pub(crate) fn escape_into(text: &str, out: &mut String) -> Result<(), SerializationError> {
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            '\t' | '\n' | '\r' => out.push(c),
            c if (c as u32) < 0x20 || c == '\u{FFFE}' || c == '\u{FFFF}' => {
                return Err(SerializationError::InvalidCharacter(c as u32));
            }
            c => out.push(c),
        }
    }
    Ok(())
}

pub(crate) fn escape(text: &str) -> Result<String, SerializationError> {
    let mut out = String::with_capacity(text.len());
    escape_into(text, &mut out)?;
    Ok(out)
}
