//! List-box widget
//!
//! A single-column list with keyboard and mouse selection, an attached
//! vertical scrollbar and optional multi-select marking. Items live in a
//! fixed-capacity vector owned by the widget; the scroll window
//! (`first_visible`, `items_per_page`) and the selection (`current`,
//! `previous`) index into it.
//!
//! Redraw strategy: full `draw` only when the visible window moves;
//! selection changes repaint just the previous and current rows
//! (`update`), which keeps the panel from flickering on navigation.

use heapless::{String, Vec};

use vitrine_core::{ButtonAction, Event, Key, Point, Rect, Theme};
use vitrine_draw::{Bitmap, DrawContext, DrawError, GLYPH_HEIGHT, GLYPH_WIDTH};

use crate::scrollbar::ScrollBar;
use crate::widget::{Widget, WidgetCore};

/// Maximum item label length
pub const MAX_ITEM_NAME: usize = 32;

/// Multi-select mark, 8x8, LSB leftmost per row
const MARK_GLYPH: [u8; 8] = [
    0b0000_0000,
    0b0100_0000,
    0b0010_0000,
    0b0001_0000,
    0b0000_1010,
    0b0000_0100,
    0b0000_0000,
    0b0000_0000,
];

/// One list entry
#[derive(Debug, Clone)]
pub struct ListItem<'a> {
    /// Display label
    pub name: String<MAX_ITEM_NAME>,
    /// Optional icon drawn left of the label
    pub image: Option<Bitmap<'a>>,
    /// Multi-select mark
    pub marked: bool,
}

impl<'a> ListItem<'a> {
    /// Create an item from a label, truncating to `MAX_ITEM_NAME`
    pub fn new(name: &str) -> Self {
        let mut s = String::new();
        for ch in name.chars() {
            if s.push(ch).is_err() {
                break;
            }
        }
        Self {
            name: s,
            image: None,
            marked: false,
        }
    }

    /// Attach an icon
    pub fn with_image(mut self, image: Bitmap<'a>) -> Self {
        self.image = Some(image);
        self
    }
}

/// List-box errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ListBoxError {
    /// More items than the widget's capacity
    CapacityExceeded,
    /// Item index past the end
    InvalidIndex,
    /// Redraw failed
    Draw(DrawError),
}

impl From<DrawError> for ListBoxError {
    fn from(e: DrawError) -> Self {
        ListBoxError::Draw(e)
    }
}

/// Selection hook: index and item that became current
pub type ItemHook<'a> = fn(usize, &ListItem<'a>);

/// Scroll hook: new first visible index
pub type ScrollHook = fn(usize);

/// List-box widget with capacity for `N` items
pub struct ListBox<'a, const N: usize> {
    core: WidgetCore,
    theme: Theme,
    items: Vec<ListItem<'a>, N>,
    /// Index of the topmost visible item
    first_visible: usize,
    /// Selected item
    current: usize,
    /// Previously selected item, for partial repaint
    previous: usize,
    /// Rows that fit in the widget extent
    items_per_page: usize,
    multi_select: bool,
    scrollbar: ScrollBar,
    on_item: Option<ItemHook<'a>>,
    on_scroll: Option<ScrollHook>,
}

impl<'a, const N: usize> ListBox<'a, N> {
    /// Create an empty list box covering `rect`
    pub fn new(rect: Rect, theme: Theme) -> Self {
        let mut core = WidgetCore::new(rect);
        core.set_focusable(true);

        let items_per_page = (core.content_rect().h / theme.row_pitch()) as usize;
        let mut scrollbar = ScrollBar::new(Self::scrollbar_rect_for(&core, &theme), theme);
        scrollbar.core_mut().hide();

        Self {
            core,
            theme,
            items: Vec::new(),
            first_visible: 0,
            current: 0,
            previous: 0,
            items_per_page,
            multi_select: false,
            scrollbar,
            on_item: None,
            on_scroll: None,
        }
    }

    /// Number of items
    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// True when the list holds no items
    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Selected index (meaningless while empty)
    pub fn current(&self) -> usize {
        self.current
    }

    /// Index of the topmost visible item
    pub fn first_visible(&self) -> usize {
        self.first_visible
    }

    /// Rows that fit in the widget extent
    pub fn items_per_page(&self) -> usize {
        self.items_per_page
    }

    /// Item at `index`
    pub fn item(&self, index: usize) -> Option<&ListItem<'a>> {
        self.items.get(index)
    }

    /// The attached scrollbar
    pub fn scrollbar(&self) -> &ScrollBar {
        &self.scrollbar
    }

    /// Enable or disable multi-select marking
    pub fn set_multi_select(&mut self, enabled: bool) {
        self.multi_select = enabled;
    }

    /// Register the selection hook
    pub fn set_on_item(&mut self, hook: ItemHook<'a>) {
        self.on_item = Some(hook);
    }

    /// Register the scroll hook
    pub fn set_on_scroll(&mut self, hook: ScrollHook) {
        self.on_scroll = Some(hook);
    }

    /// Replace the whole item set and reset selection and scroll window
    pub fn set_items(&mut self, items: &[ListItem<'a>]) -> Result<(), ListBoxError> {
        if items.len() > N {
            return Err(ListBoxError::CapacityExceeded);
        }
        self.items.clear();
        for item in items {
            // Capacity checked above
            let _ = self.items.push(item.clone());
        }
        self.first_visible = 0;
        self.current = 0;
        self.previous = 0;
        self.update_scrollbar();
        Ok(())
    }

    /// Append one item, redrawing when visible
    pub fn add_item<D: DrawContext>(
        &mut self,
        item: ListItem<'a>,
        dc: &mut D,
    ) -> Result<(), ListBoxError> {
        self.items
            .push(item)
            .map_err(|_| ListBoxError::CapacityExceeded)?;
        self.update_scrollbar();
        if !self.core.is_hidden() {
            self.draw(dc)?;
        }
        Ok(())
    }

    /// Remove the item at `index`, redrawing when visible
    ///
    /// Selection and scroll window are re-clamped so they stay inside
    /// the shortened list.
    pub fn delete_item<D: DrawContext>(
        &mut self,
        index: usize,
        dc: &mut D,
    ) -> Result<(), ListBoxError> {
        if index >= self.items.len() {
            return Err(ListBoxError::InvalidIndex);
        }
        self.items.remove(index);

        if self.items.is_empty() {
            self.first_visible = 0;
            self.current = 0;
            self.previous = 0;
        } else {
            let last = self.items.len() - 1;
            self.current = self.current.min(last);
            self.previous = self.previous.min(last);
            self.clamp_window();
        }

        self.update_scrollbar();
        if !self.core.is_hidden() {
            self.draw(dc)?;
        }
        Ok(())
    }

    /// Move the selection and scroll window so `index` is visible
    pub fn select<D: DrawContext>(&mut self, index: usize, dc: &mut D) -> Result<(), DrawError> {
        if index >= self.items.len() {
            return Ok(());
        }

        let page = self.items_per_page;
        if self.items.len() > page && page > 0 {
            if index + page > self.items.len() {
                self.first_visible = self.items.len() - page;
            } else {
                self.first_visible = index;
            }
        } else {
            self.first_visible = 0;
        }
        self.current = index;
        self.previous = index;
        self.scrollbar.set_value(self.first_visible);
        self.draw(dc)
    }

    /// Give or take keyboard focus, repainting the selected row
    pub fn set_focused<D: DrawContext>(
        &mut self,
        focused: bool,
        dc: &mut D,
    ) -> Result<(), DrawError> {
        self.core.set_focused(focused);
        if !self.core.is_hidden() && !self.items.is_empty() {
            self.update(dc)?;
        }
        Ok(())
    }

    /// Scrollbar extent along the right inner edge
    fn scrollbar_rect_for(core: &WidgetCore, theme: &Theme) -> Rect {
        let rect = core.rect();
        let bw = core.border().width();
        Rect::new(
            rect.right() - (bw + theme.scrollbar_width) as i16,
            rect.y + bw as i16,
            theme.scrollbar_width,
            rect.h.saturating_sub(bw * 2),
        )
    }

    /// Row area: content rect minus the scrollbar when shown
    fn items_area(&self) -> Rect {
        let mut area = self.core.content_rect();
        if !self.scrollbar.core().is_hidden() {
            area.w = area.w.saturating_sub(self.theme.scrollbar_width);
        }
        area
    }

    /// Pull the scroll window back over the selection after a mutation
    fn clamp_window(&mut self) {
        let len = self.items.len();
        if len == 0 {
            self.first_visible = 0;
            return;
        }
        let page = self.items_per_page;
        if page == 0 {
            self.first_visible = self.first_visible.min(len - 1);
            return;
        }
        self.first_visible = self.first_visible.min(len.saturating_sub(page));
        if self.current < self.first_visible {
            self.first_visible = self.current;
        } else if self.current >= self.first_visible + page {
            self.first_visible = self.current + 1 - page;
        }
    }

    /// Re-sync scrollbar range and visibility with the item count
    fn update_scrollbar(&mut self) {
        let len = self.items.len();
        if len > self.items_per_page && self.items_per_page > 0 {
            self.scrollbar.core_mut().show();
            self.scrollbar.set_line_step(1);
            self.scrollbar.set_page_step(self.items_per_page);
            self.scrollbar.set_range(len);
            self.scrollbar.set_value(self.first_visible);
        } else {
            self.scrollbar.core_mut().hide();
        }
    }

    /// Paint one row: background, icon, label, multi-select mark
    fn draw_row<D: DrawContext>(
        &self,
        dc: &mut D,
        slot: usize,
        index: usize,
    ) -> Result<(), DrawError> {
        let area = self.items_area();
        let pitch = self.theme.row_pitch();
        let rect = area.row(slot as u16 * pitch, pitch);
        if rect.is_empty() {
            return Ok(());
        }
        let Some(item) = self.items.get(index) else {
            return Ok(());
        };

        let selected = index == self.current;
        let focused = self.core.is_focused();
        let (bg, fg) = if selected {
            if focused {
                (self.theme.selection_bg, self.theme.selection_fg)
            } else {
                (self.theme.inactive_bg, self.theme.foreground)
            }
        } else {
            (self.theme.background, self.theme.foreground)
        };

        dc.fill_rect(rect, bg)?;
        if selected && focused {
            dc.draw_focus_rect(rect, self.theme.focus)?;
        }

        let mut x = rect.x + self.theme.margin as i16;
        if let Some(image) = &item.image {
            let y = rect.y + (rect.h.saturating_sub(image.height()) / 2) as i16;
            dc.blit(image, Point::new(x, y))?;
            x += image.width() as i16 + 2;
        }

        let text_y = rect.y + (rect.h.saturating_sub(GLYPH_HEIGHT) / 2) as i16;
        dc.draw_text(Point::new(x, text_y), item.name.as_str(), fg)?;

        if self.multi_select && item.marked {
            let mark_x = rect.right() - (self.theme.margin + GLYPH_WIDTH) as i16;
            draw_mark(dc, Point::new(mark_x, text_y), fg)?;
        }
        Ok(())
    }

    /// Full repaint: border, background, visible rows, scrollbar
    pub fn draw<D: DrawContext>(&self, dc: &mut D) -> Result<(), DrawError> {
        if self.core.is_hidden() {
            return Ok(());
        }

        let rect = self.core.rect();
        dc.draw_border(rect, self.core.border(), self.theme.border)?;
        dc.fill_rect(self.core.content_rect(), self.theme.background)?;

        for slot in 0..self.items_per_page {
            let index = self.first_visible + slot;
            if index >= self.items.len() {
                break;
            }
            self.draw_row(dc, slot, index)?;
        }

        self.scrollbar.draw(dc)
    }

    /// Repaint only the rows the last selection change touched
    pub fn update<D: DrawContext>(&self, dc: &mut D) -> Result<(), DrawError> {
        if self.core.is_hidden() || self.items.is_empty() {
            return Ok(());
        }

        let window = self.first_visible..self.first_visible + self.items_per_page;
        if self.previous != self.current && window.contains(&self.previous) {
            self.draw_row(dc, self.previous - self.first_visible, self.previous)?;
        }
        if window.contains(&self.current) {
            self.draw_row(dc, self.current - self.first_visible, self.current)?;
        }
        Ok(())
    }

    fn on_mouse<D: DrawContext>(
        &mut self,
        pos: Point,
        action: ButtonAction,
        dc: &mut D,
    ) -> Result<bool, DrawError> {
        if !self.core.rect().contains(pos) {
            return Ok(false);
        }

        // Clicks on the scrollbar page the window without moving the selection
        if !self.scrollbar.core().is_hidden() && self.scrollbar.core().rect().contains(pos) {
            if action == ButtonAction::Down {
                if let Some(first) = self.scrollbar.handle_mouse(pos) {
                    self.first_visible = first;
                    self.draw(dc)?;
                    if let Some(hook) = self.on_scroll {
                        hook(first);
                    }
                }
            }
            return Ok(true);
        }

        let newly_focused = !self.core.is_focused();
        self.core.set_focused(true);

        let area = self.items_area();
        if self.items.is_empty() || pos.y < area.y {
            return Ok(true);
        }

        let slot = ((pos.y - area.y) as u16 / self.theme.row_pitch()) as usize;
        let index = self.first_visible + slot;
        if slot < self.items_per_page && index < self.items.len() {
            match action {
                ButtonAction::Down => {
                    self.previous = self.current;
                    self.current = index;
                    if let Some(hook) = self.on_item {
                        hook(index, &self.items[index]);
                    }
                    self.update(dc)?;
                    self.scrollbar.set_value(self.first_visible);
                }
                ButtonAction::Up => self.update(dc)?,
            }
        } else if newly_focused {
            self.update(dc)?;
        }
        Ok(true)
    }

    fn on_key<D: DrawContext>(&mut self, key: Key, dc: &mut D) -> Result<bool, DrawError> {
        match key {
            Key::Up => {
                if self.current > 0 {
                    self.previous = self.current;
                    self.current -= 1;
                    if self.current < self.first_visible {
                        self.first_visible = self.current;
                        self.draw(dc)?;
                    } else {
                        self.update(dc)?;
                    }
                    self.scrollbar.set_value(self.first_visible);
                    if let Some(hook) = self.on_scroll {
                        hook(self.first_visible);
                    }
                }
                Ok(true)
            }
            Key::Down => {
                if self.current + 1 < self.items.len() {
                    self.previous = self.current;
                    self.current += 1;
                    if self.items_per_page > 0
                        && self.current >= self.first_visible + self.items_per_page
                    {
                        self.first_visible += 1;
                        self.draw(dc)?;
                    } else {
                        self.update(dc)?;
                    }
                    self.scrollbar.set_value(self.first_visible);
                    if let Some(hook) = self.on_scroll {
                        hook(self.first_visible);
                    }
                }
                Ok(true)
            }
            Key::Enter => {
                if let Some(hook) = self.on_item {
                    hook(self.current, &self.items[self.current]);
                }
                if self.multi_select {
                    self.items[self.current].marked = true;
                    self.update(dc)?;
                }
                Ok(true)
            }
            Key::Back => {
                if self.multi_select {
                    self.items[self.current].marked = false;
                    self.update(dc)?;
                }
                Ok(true)
            }
            _ => Ok(false),
        }
    }
}

impl<'a, const N: usize> Widget for ListBox<'a, N> {
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
        if self.core.is_hidden() {
            return Ok(false);
        }

        match event {
            Event::Paint => {
                self.draw(dc)?;
                Ok(true)
            }
            Event::Resize(size) => {
                let rect = self.core.rect();
                self.core.set_rect(Rect::new(rect.x, rect.y, size.w, size.h));
                self.items_per_page =
                    (self.core.content_rect().h / self.theme.row_pitch()) as usize;
                self.scrollbar
                    .core_mut()
                    .set_rect(Self::scrollbar_rect_for(&self.core, &self.theme));
                self.clamp_window();
                self.update_scrollbar();
                Ok(true)
            }
            Event::Mouse(m) => self.on_mouse(m.pos, m.action, dc),
            Event::Key(k) => {
                if !k.is_down() || self.items.is_empty() {
                    return Ok(false);
                }
                self.on_key(k.key, dc)
            }
        }
    }
}

/// Paint the 8x8 multi-select mark
fn draw_mark<D: DrawContext>(dc: &mut D, at: Point, color: vitrine_core::Color) -> Result<(), DrawError> {
    for (row, bits) in MARK_GLYPH.iter().enumerate() {
        for col in 0..8i16 {
            if (bits >> col) & 1 == 1 {
                dc.draw_pixel(Point::new(at.x + col, at.y + row as i16), color)?;
            }
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::sync::atomic::{AtomicUsize, Ordering};
    use vitrine_core::{KeyEvent, MouseEvent};
    use vitrine_draw::FrameDc;

    type TestDc = FrameDc<128, 128>;

    /// 100x60 box, default theme: 58px content, 18px rows -> 3 per page
    fn listbox() -> ListBox<'static, 8> {
        ListBox::new(Rect::new(0, 0, 100, 60), Theme::default())
    }

    fn fill(lb: &mut ListBox<'static, 8>, names: &[&str]) {
        let mut items: Vec<ListItem<'static>, 8> = Vec::new();
        for name in names {
            items.push(ListItem::new(name)).unwrap();
        }
        lb.set_items(&items).unwrap();
    }

    fn key_down(lb: &mut ListBox<'static, 8>, key: Key, dc: &mut TestDc) -> bool {
        lb.handle_event(&Event::Key(KeyEvent::down(key)), dc).unwrap()
    }

    #[test]
    fn test_items_per_page_from_extent() {
        let lb = listbox();
        assert_eq!(lb.items_per_page(), 3);
    }

    #[test]
    fn test_set_items_resets_selection() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c", "d"]);
        key_down(&mut lb, Key::Down, &mut dc);
        assert_eq!(lb.current(), 1);

        fill(&mut lb, &["x", "y"]);
        assert_eq!(lb.len(), 2);
        assert_eq!(lb.current(), 0);
        assert_eq!(lb.first_visible(), 0);
    }

    #[test]
    fn test_set_items_capacity() {
        let mut lb: ListBox<'static, 2> = ListBox::new(Rect::new(0, 0, 100, 60), Theme::default());
        let items = [ListItem::new("a"), ListItem::new("b"), ListItem::new("c")];
        assert_eq!(lb.set_items(&items), Err(ListBoxError::CapacityExceeded));
        // Failed replace leaves the widget untouched
        assert_eq!(lb.len(), 0);
    }

    #[test]
    fn test_add_item_shows_scrollbar() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c"]);
        assert!(lb.scrollbar().core().is_hidden());

        lb.add_item(ListItem::new("d"), &mut dc).unwrap();
        assert!(!lb.scrollbar().core().is_hidden());
        assert_eq!(lb.scrollbar().range(), 4);
        assert_eq!(lb.scrollbar().page_step(), 3);
    }

    #[test]
    fn test_add_item_capacity() {
        let mut lb: ListBox<'static, 1> = ListBox::new(Rect::new(0, 0, 100, 60), Theme::default());
        let mut dc = TestDc::new();
        lb.add_item(ListItem::new("a"), &mut dc).unwrap();
        assert_eq!(
            lb.add_item(ListItem::new("b"), &mut dc),
            Err(ListBoxError::CapacityExceeded)
        );
    }

    #[test]
    fn test_key_navigation_and_edge_scroll() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c", "d", "e"]);

        // Walk to the bottom of the page
        key_down(&mut lb, Key::Down, &mut dc);
        key_down(&mut lb, Key::Down, &mut dc);
        assert_eq!(lb.current(), 2);
        assert_eq!(lb.first_visible(), 0);

        // Next step crosses the page edge and scrolls by one
        key_down(&mut lb, Key::Down, &mut dc);
        assert_eq!(lb.current(), 3);
        assert_eq!(lb.first_visible(), 1);
        assert_eq!(lb.scrollbar().value(), 1);

        key_down(&mut lb, Key::Down, &mut dc);
        assert_eq!(lb.current(), 4);
        assert_eq!(lb.first_visible(), 2);

        // Down at the last item is a no-op
        key_down(&mut lb, Key::Down, &mut dc);
        assert_eq!(lb.current(), 4);

        // Walk back up; scrolls at the top edge
        key_down(&mut lb, Key::Up, &mut dc);
        key_down(&mut lb, Key::Up, &mut dc);
        assert_eq!(lb.current(), 2);
        assert_eq!(lb.first_visible(), 2);
        key_down(&mut lb, Key::Up, &mut dc);
        assert_eq!(lb.current(), 1);
        assert_eq!(lb.first_visible(), 1);
    }

    #[test]
    fn test_mouse_selects_row() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c"]);

        let consumed = lb
            .handle_event(
                &Event::Mouse(MouseEvent::left_down(Point::new(10, 20))),
                &mut dc,
            )
            .unwrap();
        assert!(consumed);
        assert_eq!(lb.current(), 1);
        assert!(lb.core().is_focused());
    }

    #[test]
    fn test_mouse_outside_ignored() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a"]);
        let consumed = lb
            .handle_event(
                &Event::Mouse(MouseEvent::left_down(Point::new(110, 20))),
                &mut dc,
            )
            .unwrap();
        assert!(!consumed);
        assert_eq!(lb.current(), 0);
    }

    #[test]
    fn test_delete_clamps_selection() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c", "d"]);
        lb.select(3, &mut dc).unwrap();
        assert_eq!(lb.first_visible(), 1);

        lb.delete_item(3, &mut dc).unwrap();
        assert_eq!(lb.len(), 3);
        assert_eq!(lb.current(), 2);
        assert!(lb.first_visible() <= lb.current());
        // Back to a single page: scrollbar hides
        assert!(lb.scrollbar().core().is_hidden());
    }

    #[test]
    fn test_delete_to_empty() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a"]);
        lb.delete_item(0, &mut dc).unwrap();
        assert!(lb.is_empty());
        assert_eq!(lb.current(), 0);
        assert_eq!(lb.delete_item(0, &mut dc), Err(ListBoxError::InvalidIndex));
    }

    #[test]
    fn test_select_scrolls_to_index() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c", "d", "e", "f"]);

        lb.select(5, &mut dc).unwrap();
        assert_eq!(lb.current(), 5);
        assert_eq!(lb.first_visible(), 3);

        lb.select(1, &mut dc).unwrap();
        assert_eq!(lb.first_visible(), 1);

        // Out-of-range selection is ignored
        lb.select(20, &mut dc).unwrap();
        assert_eq!(lb.current(), 1);
    }

    #[test]
    fn test_on_item_hook() {
        static HITS: AtomicUsize = AtomicUsize::new(0);
        fn hook(_index: usize, _item: &ListItem<'_>) {
            HITS.fetch_add(1, Ordering::Relaxed);
        }

        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b"]);
        lb.set_on_item(hook);

        key_down(&mut lb, Key::Enter, &mut dc);
        lb.handle_event(
            &Event::Mouse(MouseEvent::left_down(Point::new(10, 20))),
            &mut dc,
        )
        .unwrap();
        assert_eq!(HITS.load(Ordering::Relaxed), 2);
    }

    #[test]
    fn test_multi_select_mark_and_unmark() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b"]);
        lb.set_multi_select(true);

        key_down(&mut lb, Key::Enter, &mut dc);
        assert!(lb.item(0).unwrap().marked);

        key_down(&mut lb, Key::Back, &mut dc);
        assert!(!lb.item(0).unwrap().marked);
    }

    #[test]
    fn test_key_ignored_when_empty() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        assert!(!key_down(&mut lb, Key::Down, &mut dc));
        assert!(!key_down(&mut lb, Key::Enter, &mut dc));
    }

    #[test]
    fn test_resize_recomputes_page() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["a", "b", "c", "d", "e"]);
        lb.select(4, &mut dc).unwrap();

        lb.handle_event(&Event::Resize(vitrine_core::Size::new(100, 42)), &mut dc)
            .unwrap();
        assert_eq!(lb.items_per_page(), 2);
        // Selection stays visible after the window shrinks
        assert!(lb.first_visible() <= lb.current());
        assert!(lb.current() < lb.first_visible() + lb.items_per_page());
    }

    #[test]
    fn test_draw_smoke() {
        let mut lb = listbox();
        let mut dc = TestDc::new();
        fill(&mut lb, &["alpha", "beta", "gamma", "delta"]);
        lb.handle_event(&Event::Paint, &mut dc).unwrap();
        // Background shows inside the content area
        assert_eq!(dc.pixel(50, 56), Some(vitrine_core::Color::WHITE));
    }
}

#[cfg(test)]
mod invariants {
    use super::*;
    use proptest::prelude::*;
    use vitrine_core::{KeyEvent, MouseEvent};
    use vitrine_draw::FrameDc;

    /// One scripted user/API action against the list box
    #[derive(Debug, Clone)]
    enum Op {
        Add,
        Delete(usize),
        KeyUp,
        KeyDown,
        Select(usize),
        Click(i16),
    }

    fn op() -> impl Strategy<Value = Op> {
        prop_oneof![
            Just(Op::Add),
            (0usize..16).prop_map(Op::Delete),
            Just(Op::KeyUp),
            Just(Op::KeyDown),
            (0usize..16).prop_map(Op::Select),
            (0i16..64).prop_map(Op::Click),
        ]
    }

    proptest! {
        #[test]
        fn selection_and_window_stay_in_bounds(ops in prop::collection::vec(op(), 1..64)) {
            let mut lb: ListBox<'static, 12> =
                ListBox::new(Rect::new(0, 0, 100, 60), Theme::default());
            let mut dc: FrameDc<128, 128> = FrameDc::new();

            for op in ops {
                match op {
                    Op::Add => {
                        let _ = lb.add_item(ListItem::new("item"), &mut dc);
                    }
                    Op::Delete(i) => {
                        let _ = lb.delete_item(i, &mut dc);
                    }
                    Op::KeyUp => {
                        let _ = lb.handle_event(&Event::Key(KeyEvent::down(Key::Up)), &mut dc);
                    }
                    Op::KeyDown => {
                        let _ = lb.handle_event(&Event::Key(KeyEvent::down(Key::Down)), &mut dc);
                    }
                    Op::Select(i) => {
                        let _ = lb.select(i, &mut dc);
                    }
                    Op::Click(y) => {
                        let _ = lb.handle_event(
                            &Event::Mouse(MouseEvent::left_down(Point::new(10, y))),
                            &mut dc,
                        );
                    }
                }

                if lb.is_empty() {
                    prop_assert_eq!(lb.current(), 0);
                    prop_assert_eq!(lb.first_visible(), 0);
                } else {
                    prop_assert!(lb.current() < lb.len());
                    prop_assert!(lb.first_visible() < lb.len());
                    // Scrollbar agrees with the scroll window whenever shown
                    if !lb.scrollbar().core().is_hidden() {
                        prop_assert_eq!(lb.scrollbar().range(), lb.len());
                    }
                }
            }
        }
    }
}
