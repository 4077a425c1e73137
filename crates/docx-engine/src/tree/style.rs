//! Layout attributes carried by document tree nodes

use serde::Serialize;

/// Horizontal paragraph alignment
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Alignment {
    #[default]
    Left,
    Center,
    Right,
    Justify,
}

impl Alignment {
    /// Value of `w:jc/@w:val`
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            Alignment::Left => "left",
            Alignment::Center => "center",
            Alignment::Right => "right",
            Alignment::Justify => "both",
        }
    }
}

/// Paragraph spacing in twentieths of a point
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Spacing {
    pub before: u32,
    pub after: u32,
}

impl Spacing {
    pub const fn new(before: u32, after: u32) -> Self {
        Self { before, after }
    }

    pub fn is_zero(&self) -> bool {
        self.before == 0 && self.after == 0
    }
}

/// Width policy for tables and cells
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum Width {
    #[default]
    Auto,
    /// Whole percent of the containing width (0-100)
    Percent(u8),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum BorderStyle {
    #[default]
    Single,
    Double,
    Dashed,
    None,
}

impl BorderStyle {
    pub fn ooxml_value(&self) -> &'static str {
        match self {
            BorderStyle::Single => "single",
            BorderStyle::Double => "double",
            BorderStyle::Dashed => "dashed",
            BorderStyle::None => "nil",
        }
    }
}

/// One border line. `size` is in eighths of a point.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Border {
    pub style: BorderStyle,
    pub size: u8,
    /// RGB hex without the leading `#`
    pub color: &'static str,
}

impl Border {
    /// Single black 1pt line used by every form table
    pub const SINGLE_BLACK_1PT: Border = Border {
        style: BorderStyle::Single,
        size: 8,
        color: "000000",
    };
}

/// Cell borders, one per side. `None` leaves the side to the table default.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
pub struct Borders {
    pub top: Option<Border>,
    pub left: Option<Border>,
    pub bottom: Option<Border>,
    pub right: Option<Border>,
}

impl Borders {
    pub const fn none() -> Self {
        Self {
            top: None,
            left: None,
            bottom: None,
            right: None,
        }
    }

    pub const fn all(border: Border) -> Self {
        Self {
            top: Some(border),
            left: Some(border),
            bottom: Some(border),
            right: Some(border),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.top.is_none() && self.left.is_none() && self.bottom.is_none() && self.right.is_none()
    }
}
