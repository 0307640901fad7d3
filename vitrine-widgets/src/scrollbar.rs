//! Vertical scrollbar
//!
//! Tracks a window of `page_step` items over a `range` of items and
//! draws a proportional thumb. Mouse handling returns the new value to
//! the owning widget instead of calling back into it; the owner applies
//! the scroll and repaints.

use vitrine_core::{Color, Event, Point, Rect, Theme};
use vitrine_draw::{DrawContext, DrawError};

use crate::widget::{Widget, WidgetCore};

/// Minimum thumb height in pixels, so it stays grabbable
const MIN_THUMB: u16 = 6;

/// Vertical scrollbar widget
#[derive(Debug, Clone)]
pub struct ScrollBar {
    core: WidgetCore,
    theme: Theme,
    range: usize,
    page_step: usize,
    line_step: usize,
    value: usize,
}

impl ScrollBar {
    /// Create a scrollbar covering `rect`
    pub fn new(rect: Rect, theme: Theme) -> Self {
        Self {
            core: WidgetCore::new(rect),
            theme,
            range: 0,
            page_step: 1,
            line_step: 1,
            value: 0,
        }
    }

    /// Total number of items
    pub fn range(&self) -> usize {
        self.range
    }

    /// Items visible per page
    pub fn page_step(&self) -> usize {
        self.page_step
    }

    /// Items moved per line scroll
    pub fn line_step(&self) -> usize {
        self.line_step
    }

    /// Index of the first visible item
    pub fn value(&self) -> usize {
        self.value
    }

    /// Largest representable value
    pub fn max_value(&self) -> usize {
        self.range.saturating_sub(self.page_step)
    }

    /// Set the total item count; clamps the value
    pub fn set_range(&mut self, range: usize) {
        self.range = range;
        self.value = self.value.min(self.max_value());
    }

    /// Set the page size; clamps the value
    pub fn set_page_step(&mut self, page_step: usize) {
        self.page_step = page_step.max(1);
        self.value = self.value.min(self.max_value());
    }

    /// Set the line-scroll step
    pub fn set_line_step(&mut self, line_step: usize) {
        self.line_step = line_step.max(1);
    }

    /// Set the first visible item, clamped to the valid range
    pub fn set_value(&mut self, value: usize) {
        self.value = value.min(self.max_value());
    }

    /// Thumb extent within the track
    fn thumb_rect(&self) -> Rect {
        let track = self.core.content_rect();
        if self.range <= self.page_step || track.is_empty() {
            return track;
        }

        let h = ((track.h as usize * self.page_step / self.range) as u16)
            .clamp(MIN_THUMB.min(track.h), track.h);
        let span = (track.h - h) as usize;
        let y = track.y + (span * self.value / self.max_value()) as i16;
        Rect::new(track.x, y, track.w, h)
    }

    /// Draw track and thumb
    pub fn draw<D: DrawContext>(&self, dc: &mut D) -> Result<(), DrawError> {
        if self.core.is_hidden() {
            return Ok(());
        }
        let rect = self.core.rect();
        dc.draw_border(rect, self.core.border(), self.theme.border)?;
        dc.fill_rect(self.core.content_rect(), Color::LIGHT_GRAY)?;
        dc.fill_rect(self.thumb_rect(), Color::DARK_GRAY)
    }

    /// Page up/down from a click on the track
    ///
    /// Returns the new value when the click changed it.
    pub fn handle_mouse(&mut self, pos: Point) -> Option<usize> {
        if self.core.is_hidden() || !self.core.rect().contains(pos) {
            return None;
        }

        let thumb = self.thumb_rect();
        let old = self.value;
        if pos.y < thumb.y {
            self.value = self.value.saturating_sub(self.page_step);
        } else if pos.y >= thumb.bottom() {
            self.value = (self.value + self.page_step).min(self.max_value());
        }

        (self.value != old).then_some(self.value)
    }
}

impl Widget for ScrollBar {
    fn core(&self) -> &WidgetCore {
        &self.core
    }

    fn core_mut(&mut self) -> &mut WidgetCore {
        &mut self.core
    }

    fn handle_event<D: DrawContext>(
        &mut self,
        event: &Event,
        dc: &mut D,
    ) -> Result<bool, DrawError> {
        match event {
            Event::Paint => {
                self.draw(dc)?;
                Ok(true)
            }
            Event::Mouse(m) if m.is_down() => {
                if self.handle_mouse(m.pos).is_some() {
                    self.draw(dc)?;
                    return Ok(true);
                }
                Ok(self.core.rect().contains(m.pos))
            }
            _ => Ok(false),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use vitrine_draw::FrameDc;

    fn bar() -> ScrollBar {
        let mut sb = ScrollBar::new(Rect::new(0, 0, 8, 100), Theme::default());
        sb.set_range(20);
        sb.set_page_step(5);
        sb
    }

    #[test]
    fn test_value_clamped() {
        let mut sb = bar();
        sb.set_value(100);
        assert_eq!(sb.value(), 15);
        sb.set_range(4);
        assert_eq!(sb.value(), 0);
    }

    #[test]
    fn test_page_down_up() {
        let mut sb = bar();
        // Click at the very bottom of the track: below the thumb
        assert_eq!(sb.handle_mouse(Point::new(4, 98)), Some(5));
        assert_eq!(sb.handle_mouse(Point::new(4, 98)), Some(10));
        // Click at the top: above the thumb now
        assert_eq!(sb.handle_mouse(Point::new(4, 2)), Some(5));
        assert_eq!(sb.handle_mouse(Point::new(4, 2)), Some(0));
        // Already at the top: no change
        assert_eq!(sb.handle_mouse(Point::new(4, 2)), None);
    }

    #[test]
    fn test_click_outside_ignored() {
        let mut sb = bar();
        assert_eq!(sb.handle_mouse(Point::new(50, 50)), None);
    }

    #[test]
    fn test_thumb_fills_track_when_content_fits() {
        let mut sb = bar();
        sb.set_range(3);
        assert_eq!(sb.thumb_rect(), sb.core().content_rect());
    }

    #[test]
    fn test_thumb_proportional() {
        let sb = bar();
        let track = sb.core().content_rect();
        let thumb = sb.thumb_rect();
        assert!(thumb.h >= MIN_THUMB);
        assert!(thumb.h < track.h);
        assert_eq!(thumb.y, track.y);
    }

    #[test]
    fn test_draw_smoke() {
        let sb = bar();
        let mut dc: FrameDc<16, 128> = FrameDc::new();
        sb.draw(&mut dc).unwrap();
    }

    #[test]
    fn test_widget_event_paging() {
        use vitrine_core::{Event, MouseEvent};

        let mut sb = bar();
        let mut dc: FrameDc<16, 128> = FrameDc::new();
        assert!(sb.handle_event(&Event::Paint, &mut dc).unwrap());

        let click = Event::Mouse(MouseEvent::left_down(Point::new(4, 98)));
        assert!(sb.handle_event(&click, &mut dc).unwrap());
        assert_eq!(sb.value(), 5);

        // Release edges are not consumed
        let up = Event::Mouse(MouseEvent::left_up(Point::new(4, 98)));
        assert!(!sb.handle_event(&up, &mut dc).unwrap());
    }
}
