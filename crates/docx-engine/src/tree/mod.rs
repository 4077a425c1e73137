//! Document tree: the structure built by templates before packaging
//!
//! The tree is strictly nested and every parent owns its children, so plain
//! `Vec`s are enough. A [`Section`] holds [`Block`]s; a block is either a
//! [`Paragraph`] of [`TextRun`]s or a [`Table`] whose cells hold blocks again.

pub mod style;

pub use style::{Alignment, Border, BorderStyle, Borders, Spacing, Width};

use serde::Serialize;

/// Top-level container of a generated document
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Section {
    pub children: Vec<Block>,
}

impl Section {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn push(&mut self, block: impl Into<Block>) {
        self.children.push(block.into());
    }

    pub fn extend<I, B>(&mut self, blocks: I)
    where
        I: IntoIterator<Item = B>,
        B: Into<Block>,
    {
        self.children.extend(blocks.into_iter().map(Into::into));
    }

    /// Text of every paragraph in document order, one line per paragraph.
    /// Table cells are walked row by row.
    pub fn plain_text(&self) -> String {
        let mut lines = Vec::new();
        for block in &self.children {
            block.collect_lines(&mut lines);
        }
        lines.join("\n")
    }
}

/// Block-level node
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Block {
    Paragraph(Paragraph),
    Table(Table),
}

impl Block {
    fn collect_lines(&self, lines: &mut Vec<String>) {
        match self {
            Block::Paragraph(paragraph) => lines.push(paragraph.text()),
            Block::Table(table) => {
                for row in &table.rows {
                    for cell in &row.cells {
                        for block in &cell.children {
                            block.collect_lines(lines);
                        }
                    }
                }
            }
        }
    }
}

impl From<Paragraph> for Block {
    fn from(paragraph: Paragraph) -> Self {
        Block::Paragraph(paragraph)
    }
}

impl From<Table> for Block {
    fn from(table: Table) -> Self {
        Block::Table(table)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum HeadingLevel {
    H1,
}

impl HeadingLevel {
    /// Style id defined in `word/styles.xml`
    pub fn style_id(&self) -> &'static str {
        match self {
            HeadingLevel::H1 => "Heading1",
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Paragraph {
    pub runs: Vec<TextRun>,
    pub heading: Option<HeadingLevel>,
    pub alignment: Alignment,
    pub spacing: Spacing,
}

impl Paragraph {
    /// Paragraph holding a single run of plain text
    pub fn new(text: impl Into<String>) -> Self {
        Self::from_runs(vec![TextRun::new(text)])
    }

    pub fn from_runs(runs: Vec<TextRun>) -> Self {
        Self {
            runs,
            ..Self::default()
        }
    }

    /// Paragraph with no runs
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn heading(mut self, level: HeadingLevel) -> Self {
        self.heading = Some(level);
        self
    }

    pub fn align(mut self, alignment: Alignment) -> Self {
        self.alignment = alignment;
        self
    }

    pub fn spacing(mut self, spacing: Spacing) -> Self {
        self.spacing = spacing;
        self
    }

    /// Mark every run bold
    pub fn bold(mut self) -> Self {
        for run in &mut self.runs {
            run.bold = true;
        }
        self
    }

    /// Set the font size of every run, in half-points
    pub fn size(mut self, half_points: u32) -> Self {
        for run in &mut self.runs {
            run.size = Some(half_points);
        }
        self
    }

    pub fn text(&self) -> String {
        self.runs.iter().map(|run| run.text.as_str()).collect()
    }
}

/// Styled inline text. Line breaks inside `text` are kept as breaks.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TextRun {
    pub text: String,
    pub bold: bool,
    /// Font size in half-points; `None` uses the document default
    pub size: Option<u32>,
}

impl TextRun {
    pub fn new(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            ..Self::default()
        }
    }

    pub fn bold(mut self) -> Self {
        self.bold = true;
        self
    }

    pub fn size(mut self, half_points: u32) -> Self {
        self.size = Some(half_points);
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct Table {
    pub rows: Vec<TableRow>,
    pub width: Width,
}

impl Table {
    pub fn new(rows: Vec<TableRow>) -> Self {
        Self {
            rows,
            width: Width::Percent(100),
        }
    }

    pub fn width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct TableRow {
    pub cells: Vec<TableCell>,
}

impl TableRow {
    pub fn new(cells: Vec<TableCell>) -> Self {
        Self { cells }
    }

    /// Total number of grid columns this row covers, saturating at
    /// `u32::MAX`
    pub fn grid_span(&self) -> u32 {
        self.cells
            .iter()
            .fold(0u32, |total, cell| total.saturating_add(cell.column_span))
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TableCell {
    pub children: Vec<Block>,
    pub width: Width,
    pub column_span: u32,
    pub borders: Borders,
}

impl Default for TableCell {
    fn default() -> Self {
        Self {
            children: Vec::new(),
            width: Width::Auto,
            column_span: 1,
            borders: Borders::none(),
        }
    }
}

impl TableCell {
    pub fn new(children: Vec<Block>) -> Self {
        Self {
            children,
            ..Self::default()
        }
    }

    /// Cell holding one plain paragraph
    pub fn text(text: impl Into<String>) -> Self {
        Self::new(vec![Paragraph::new(text).into()])
    }

    pub fn width(mut self, width: Width) -> Self {
        self.width = width;
        self
    }

    pub fn span(mut self, columns: u32) -> Self {
        self.column_span = columns;
        self
    }

    pub fn borders(mut self, borders: Borders) -> Self {
        self.borders = borders;
        self
    }
}
