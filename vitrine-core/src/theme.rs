//! Theme configuration
//!
//! Widget-set styling, stored on-device as postcard-serialized binary
//! data so a product can persist a customized look.

use crate::color::Color;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

/// Default row height for item-based widgets
pub const DEFAULT_ITEM_HEIGHT: u16 = 16;

/// Default content margin inside widget borders
pub const DEFAULT_MARGIN: u16 = 3;

/// Default scrollbar width
pub const DEFAULT_SCROLLBAR_WIDTH: u16 = 8;

/// Widget-set styling
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
#[cfg_attr(feature = "serde", derive(Serialize, Deserialize))]
pub struct Theme {
    /// Widget background
    pub background: Color,
    /// Normal text color
    pub foreground: Color,
    /// Selected-row background when the widget is focused
    pub selection_bg: Color,
    /// Selected-row text when the widget is focused
    pub selection_fg: Color,
    /// Selected-row background when the widget is not focused
    pub inactive_bg: Color,
    /// Border color
    pub border: Color,
    /// Focus ring color
    pub focus: Color,
    /// Row height for item-based widgets
    pub item_height: u16,
    /// Content margin inside borders
    pub margin: u16,
    /// Scrollbar width
    pub scrollbar_width: u16,
}

impl Default for Theme {
    fn default() -> Self {
        Self {
            background: Color::WHITE,
            foreground: Color::BLACK,
            selection_bg: Color::SELECTION,
            selection_fg: Color::WHITE,
            inactive_bg: Color::DARK_GRAY,
            border: Color::BLACK,
            focus: Color::FOCUS,
            item_height: DEFAULT_ITEM_HEIGHT,
            margin: DEFAULT_MARGIN,
            scrollbar_width: DEFAULT_SCROLLBAR_WIDTH,
        }
    }
}

impl Theme {
    /// Full row pitch: item height plus the 1px separators above and below
    pub const fn row_pitch(&self) -> u16 {
        self.item_height + 2
    }
}

/// Errors from theme persistence
#[cfg(feature = "serde")]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ThemeError {
    /// Buffer too small for the encoded theme
    BufferTooSmall,
    /// Stored bytes are not a valid theme
    Corrupted,
}

#[cfg(feature = "serde")]
impl Theme {
    /// Serialize into a byte buffer; returns the encoded slice
    pub fn encode<'a>(&self, buffer: &'a mut [u8]) -> Result<&'a [u8], ThemeError> {
        postcard::to_slice(self, buffer)
            .map(|s| &*s)
            .map_err(|_| ThemeError::BufferTooSmall)
    }

    /// Deserialize from stored bytes
    pub fn decode(bytes: &[u8]) -> Result<Self, ThemeError> {
        postcard::from_bytes(bytes).map_err(|_| ThemeError::Corrupted)
    }
}
