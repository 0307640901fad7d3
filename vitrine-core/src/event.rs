//! Input and dispatch events
//!
//! Everything a widget can be asked to react to flows through the
//! `Event` enum. Input drivers produce `Mouse`/`Key` events, the render
//! loop produces `Paint`, and layout changes produce `Resize`. Dispatch
//! is single-threaded: events are queued by producers and drained by the
//! owning loop, which hands them to widgets one at a time.

use heapless::Deque;

use crate::geometry::{Point, Size};

/// Mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MouseButton {
    Left,
    Right,
    Middle,
}

/// Press/release edge for mouse buttons
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ButtonAction {
    Down,
    Up,
}

/// A mouse button event at a screen position
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MouseEvent {
    pub pos: Point,
    pub button: MouseButton,
    pub action: ButtonAction,
}

impl MouseEvent {
    /// Left-button press at a position
    pub const fn left_down(pos: Point) -> Self {
        Self {
            pos,
            button: MouseButton::Left,
            action: ButtonAction::Down,
        }
    }

    /// Left-button release at a position
    pub const fn left_up(pos: Point) -> Self {
        Self {
            pos,
            button: MouseButton::Left,
            action: ButtonAction::Up,
        }
    }

    /// Returns true for a press edge
    pub fn is_down(&self) -> bool {
        self.action == ButtonAction::Down
    }
}

/// Navigation keys understood by the widget set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Key {
    Up,
    Down,
    Left,
    Right,
    Enter,
    Back,
    Escape,
}

/// Press/release edge for keys
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum KeyAction {
    Down,
    Up,
}

/// A key event
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct KeyEvent {
    pub key: Key,
    pub action: KeyAction,
}

impl KeyEvent {
    /// Key press
    pub const fn down(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Down,
        }
    }

    /// Key release
    pub const fn up(key: Key) -> Self {
        Self {
            key,
            action: KeyAction::Up,
        }
    }

    /// Returns true for a press edge
    pub fn is_down(&self) -> bool {
        self.action == KeyAction::Down
    }

    /// Vertical navigation delta (-1 for Up, +1 for Down, 0 otherwise)
    pub fn vertical_delta(&self) -> i8 {
        match self.key {
            Key::Up => -1,
            Key::Down => 1,
            _ => 0,
        }
    }
}

/// An event delivered to a widget
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Event {
    /// Redraw everything
    Paint,
    /// The widget extent changed
    Resize(Size),
    /// Mouse button activity
    Mouse(MouseEvent),
    /// Key activity
    Key(KeyEvent),
}

impl Event {
    /// Returns true if this event carries user input
    pub fn is_input(&self) -> bool {
        matches!(self, Event::Mouse(_) | Event::Key(_))
    }
}

/// Fixed-capacity event FIFO
///
/// Producers (input drivers, timers) push; the dispatch loop pops.
/// A full queue drops the newest event and counts the loss instead of
/// blocking - the dispatch model has nothing to block on.
#[derive(Debug)]
pub struct EventQueue<const N: usize> {
    queue: Deque<Event, N>,
    dropped: u32,
}

impl<const N: usize> Default for EventQueue<N> {
    fn default() -> Self {
        Self::new()
    }
}

impl<const N: usize> EventQueue<N> {
    /// Create an empty queue
    pub fn new() -> Self {
        Self {
            queue: Deque::new(),
            dropped: 0,
        }
    }

    /// Enqueue an event; returns false (and counts it) when full
    pub fn push(&mut self, event: Event) -> bool {
        match self.queue.push_back(event) {
            Ok(()) => true,
            Err(_) => {
                self.dropped = self.dropped.saturating_add(1);
                false
            }
        }
    }

    /// Dequeue the oldest pending event
    pub fn pop(&mut self) -> Option<Event> {
        self.queue.pop_front()
    }

    /// Number of pending events
    pub fn len(&self) -> usize {
        self.queue.len()
    }

    /// True when no events are pending
    pub fn is_empty(&self) -> bool {
        self.queue.is_empty()
    }

    /// Events lost to overflow since creation
    pub fn dropped(&self) -> u32 {
        self.dropped
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_vertical_delta() {
        assert_eq!(KeyEvent::down(Key::Up).vertical_delta(), -1);
        assert_eq!(KeyEvent::down(Key::Down).vertical_delta(), 1);
        assert_eq!(KeyEvent::down(Key::Enter).vertical_delta(), 0);
    }

    #[test]
    fn test_is_input() {
        assert!(Event::Key(KeyEvent::down(Key::Enter)).is_input());
        assert!(Event::Mouse(MouseEvent::left_down(Point::new(0, 0))).is_input());
        assert!(!Event::Paint.is_input());
        assert!(!Event::Resize(Size::new(10, 10)).is_input());
    }

    #[test]
    fn test_queue_fifo() {
        let mut q: EventQueue<4> = EventQueue::new();
        assert!(q.push(Event::Paint));
        assert!(q.push(Event::Key(KeyEvent::down(Key::Down))));
        assert_eq!(q.len(), 2);
        assert_eq!(q.pop(), Some(Event::Paint));
        assert_eq!(q.pop(), Some(Event::Key(KeyEvent::down(Key::Down))));
        assert!(q.pop().is_none());
    }

    #[test]
    fn test_queue_overflow_drops() {
        let mut q: EventQueue<2> = EventQueue::new();
        assert!(q.push(Event::Paint));
        assert!(q.push(Event::Paint));
        assert!(!q.push(Event::Paint));
        assert_eq!(q.dropped(), 1);
        assert_eq!(q.len(), 2);
    }
}
