//! Widget base state
//!
//! Every widget embeds a `WidgetCore` carrying its extent, flags and
//! border style, and implements the `Widget` trait over it.

use bitflags::bitflags;

use vitrine_core::{Event, Rect};
use vitrine_draw::{BorderStyle, DrawContext, DrawError};

bitflags! {
    /// Widget state flags
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    pub struct WidgetFlags: u8 {
        /// Widget can take keyboard focus
        const FOCUSABLE = 1 << 0;
        /// Widget currently has keyboard focus
        const FOCUSED = 1 << 1;
        /// Widget is not drawn and receives no input
        const HIDDEN = 1 << 2;
    }
}

/// State shared by all widgets
#[derive(Debug, Clone, Copy)]
pub struct WidgetCore {
    rect: Rect,
    flags: WidgetFlags,
    border: BorderStyle,
}

impl WidgetCore {
    /// Create widget state covering `rect` with a simple border
    pub const fn new(rect: Rect) -> Self {
        Self {
            rect,
            flags: WidgetFlags::empty(),
            border: BorderStyle::Simple,
        }
    }

    /// Replace the border style
    pub fn set_border(&mut self, border: BorderStyle) {
        self.border = border;
    }

    /// Border style
    pub const fn border(&self) -> BorderStyle {
        self.border
    }

    /// Widget extent in screen coordinates
    pub const fn rect(&self) -> Rect {
        self.rect
    }

    /// Move/resize the widget
    pub fn set_rect(&mut self, rect: Rect) {
        self.rect = rect;
    }

    /// Extent inside the border
    pub fn content_rect(&self) -> Rect {
        self.rect.inflate(-(self.border.width() as i16))
    }

    /// Mark the widget as able to take focus
    pub fn set_focusable(&mut self, focusable: bool) {
        self.flags.set(WidgetFlags::FOCUSABLE, focusable);
    }

    /// Whether the widget can take focus
    pub fn is_focusable(&self) -> bool {
        self.flags.contains(WidgetFlags::FOCUSABLE)
    }

    /// Give or take keyboard focus; no-op when not focusable
    pub fn set_focused(&mut self, focused: bool) {
        if self.is_focusable() {
            self.flags.set(WidgetFlags::FOCUSED, focused);
        }
    }

    /// Whether the widget has keyboard focus
    pub fn is_focused(&self) -> bool {
        self.flags.contains(WidgetFlags::FOCUSED)
    }

    /// Hide the widget
    pub fn hide(&mut self) {
        self.flags.insert(WidgetFlags::HIDDEN);
    }

    /// Show the widget
    pub fn show(&mut self) {
        self.flags.remove(WidgetFlags::HIDDEN);
    }

    /// Whether the widget is hidden
    pub fn is_hidden(&self) -> bool {
        self.flags.contains(WidgetFlags::HIDDEN)
    }
}

/// Common widget interface
pub trait Widget {
    /// Shared widget state
    fn core(&self) -> &WidgetCore;

    /// Shared widget state, mutable
    fn core_mut(&mut self) -> &mut WidgetCore;

    /// React to an event, drawing through `dc` as needed
    ///
    /// Returns `true` when the event was consumed.
    fn handle_event<D: DrawContext>(
        &mut self,
        event: &Event,
        dc: &mut D,
    ) -> Result<bool, DrawError>;
}
