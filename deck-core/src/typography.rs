//! Text styling vocabulary.

use serde::{Deserialize, Serialize};

/// A font family and style pair.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct FontName {
    /// Family name, e.g. `Inter`.
    pub family: String,
    /// Style name within the family, e.g. `Bold Italic`.
    pub style: String,
}

impl FontName {
    /// Create a font name.
    #[must_use]
    pub fn new(family: impl Into<String>, style: impl Into<String>) -> Self {
        Self {
            family: family.into(),
            style: style.into(),
        }
    }
}

/// Horizontal text alignment.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TextAlignHorizontal {
    #[default]
    Left,
    Center,
    Right,
    Justified,
}

/// Vertical text alignment within the text box.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TextAlignVertical {
    #[default]
    Top,
    Center,
    Bottom,
}

/// Case transform applied when rendering.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TextCase {
    #[default]
    Original,
    Upper,
    Lower,
    Title,
    SmallCaps,
    SmallCapsForced,
}

/// Line decoration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[allow(missing_docs)]
pub enum TextDecoration {
    #[default]
    None,
    Underline,
    Strikethrough,
}

/// How the text box reacts to its content.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TextAutoResize {
    /// Fixed box.
    #[default]
    None,
    /// Grows in both directions.
    WidthAndHeight,
    /// Fixed width, grows vertically.
    Height,
    /// Fixed box, overflow truncated with an ellipsis.
    Truncate,
}
