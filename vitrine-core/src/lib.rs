//! Shared foundation types for the Vitrine GUI toolkit
//!
//! This crate contains everything the widget set and the drawing layer
//! agree on but that depends on no hardware:
//!
//! - Pixel geometry (`Point`, `Size`, `Rect`)
//! - RGB565 color with the toolkit palette
//! - The input/event model and the fixed-capacity event queue
//! - Theme configuration (persisted as postcard binary)

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod color;
pub mod event;
pub mod geometry;
pub mod theme;

// Re-export key types
pub use color::Color;
pub use event::{ButtonAction, Event, EventQueue, Key, KeyAction, KeyEvent, MouseButton, MouseEvent};
pub use geometry::{Point, Rect, Size};
pub use theme::Theme;
