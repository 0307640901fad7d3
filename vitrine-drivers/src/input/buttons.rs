//! Button pad input driver
//!
//! Decodes a small set of navigation buttons into key events: per-button
//! debouncing, press/release edges and auto-repeat on the arrow keys.
//!
//! The pad is polled with a millisecond timestamp from whatever clock
//! the platform has; it keeps no time source of its own. Call `poll`
//! every few milliseconds and feed the returned events into the
//! toolkit's event queue.

use embedded_hal::digital::InputPin;

use vitrine_core::{Key, KeyEvent};

/// Debounce interval
pub const DEBOUNCE_MS: u32 = 20;

/// Hold time before auto-repeat starts
pub const REPEAT_DELAY_MS: u32 = 400;

/// Interval between auto-repeat events
pub const REPEAT_INTERVAL_MS: u32 = 100;

/// Per-button debounce state
#[derive(Debug, Clone, Copy)]
struct ButtonState {
    /// Debounced level (true = pressed)
    stable: bool,
    /// Raw level being debounced
    candidate: bool,
    /// When the candidate level was first seen
    candidate_since: u32,
    /// When the stable press started
    pressed_at: u32,
    /// Last repeat emission
    last_repeat: u32,
}

impl ButtonState {
    const fn new() -> Self {
        Self {
            stable: false,
            candidate: false,
            candidate_since: 0,
            pressed_at: 0,
            last_repeat: 0,
        }
    }
}

/// Keys that auto-repeat while held
fn repeats(key: Key) -> bool {
    matches!(key, Key::Up | Key::Down | Key::Left | Key::Right)
}

/// Debounced button pad over `N` active-low inputs
pub struct ButtonPad<P, const N: usize> {
    pins: [P; N],
    keys: [Key; N],
    state: [ButtonState; N],
}

impl<P: InputPin, const N: usize> ButtonPad<P, N> {
    /// Create a pad from input pins and the keys they map to
    pub fn new(pins: [P; N], keys: [Key; N]) -> Self {
        Self {
            pins,
            keys,
            state: [ButtonState::new(); N],
        }
    }

    /// Sample the pins and return at most one key event
    ///
    /// `now_ms` is a monotonic millisecond timestamp; wrap-around is
    /// handled. Should be called every few milliseconds.
    pub fn poll(&mut self, now_ms: u32) -> Option<KeyEvent> {
        for i in 0..N {
            // Active low; a read error counts as released
            let raw = self.pins[i].is_low().unwrap_or(false);
            let key = self.keys[i];
            let st = &mut self.state[i];

            if raw != st.candidate {
                st.candidate = raw;
                st.candidate_since = now_ms;
            } else if raw != st.stable
                && now_ms.wrapping_sub(st.candidate_since) >= DEBOUNCE_MS
            {
                st.stable = raw;
                if raw {
                    st.pressed_at = now_ms;
                    st.last_repeat = now_ms;
                    return Some(KeyEvent::down(key));
                }
                return Some(KeyEvent::up(key));
            }

            if st.stable
                && repeats(key)
                && now_ms.wrapping_sub(st.pressed_at) >= REPEAT_DELAY_MS
                && now_ms.wrapping_sub(st.last_repeat) >= REPEAT_INTERVAL_MS
            {
                st.last_repeat = now_ms;
                return Some(KeyEvent::down(key));
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use core::cell::Cell;
    use core::convert::Infallible;
    use std::rc::Rc;
    use vitrine_core::KeyAction;

    /// Test pin whose level the test can flip after the pad owns it
    #[derive(Clone)]
    struct FakePin(Rc<Cell<bool>>);

    impl FakePin {
        fn released() -> Self {
            FakePin(Rc::new(Cell::new(false)))
        }

        fn press(&self) {
            self.0.set(true);
        }

        fn release(&self) {
            self.0.set(false);
        }
    }

    impl embedded_hal::digital::ErrorType for FakePin {
        type Error = Infallible;
    }

    impl InputPin for FakePin {
        fn is_high(&mut self) -> Result<bool, Self::Error> {
            Ok(!self.0.get())
        }

        fn is_low(&mut self) -> Result<bool, Self::Error> {
            Ok(self.0.get())
        }
    }

    fn pad() -> (ButtonPad<FakePin, 2>, FakePin, FakePin) {
        let up = FakePin::released();
        let enter = FakePin::released();
        let pad = ButtonPad::new([up.clone(), enter.clone()], [Key::Up, Key::Enter]);
        (pad, up, enter)
    }

    #[test]
    fn test_press_needs_debounce() {
        let (mut pad, up, _) = pad();
        up.press();
        assert_eq!(pad.poll(0), None);
        assert_eq!(pad.poll(10), None);
        assert_eq!(pad.poll(20), Some(KeyEvent::down(Key::Up)));
        // No second edge while held (before repeat kicks in)
        assert_eq!(pad.poll(30), None);
    }

    #[test]
    fn test_release_edge() {
        let (mut pad, up, _) = pad();
        up.press();
        pad.poll(0);
        pad.poll(25);
        up.release();
        pad.poll(30);
        assert_eq!(pad.poll(55), Some(KeyEvent::up(Key::Up)));
    }

    #[test]
    fn test_glitch_rejected() {
        let (mut pad, up, _) = pad();
        up.press();
        assert_eq!(pad.poll(0), None);
        // Bounces back before the debounce interval elapses
        up.release();
        assert_eq!(pad.poll(5), None);
        assert_eq!(pad.poll(100), None);
    }

    #[test]
    fn test_auto_repeat_arrows_only() {
        let (mut pad, up, enter) = pad();
        up.press();
        pad.poll(0);
        assert_eq!(pad.poll(20), Some(KeyEvent::down(Key::Up)));

        // Held: repeats after the delay, then at the repeat interval
        assert_eq!(pad.poll(300), None);
        assert_eq!(pad.poll(420), Some(KeyEvent::down(Key::Up)));
        assert_eq!(pad.poll(480), None);
        assert_eq!(pad.poll(520), Some(KeyEvent::down(Key::Up)));

        up.release();
        assert_eq!(pad.poll(521), None);
        assert_eq!(pad.poll(545).map(|e| e.action), Some(KeyAction::Up));

        // Enter never repeats
        enter.press();
        pad.poll(600);
        assert_eq!(pad.poll(620), Some(KeyEvent::down(Key::Enter)));
        assert_eq!(pad.poll(2000), None);
    }
}
