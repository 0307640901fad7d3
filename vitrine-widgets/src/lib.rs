//! Widget set for the Vitrine GUI toolkit
//!
//! Widgets are plain structs that own their state and draw through a
//! `DrawContext`. There is no dynamic widget tree and no type registry:
//! composition is ordinary struct ownership (the list box owns its
//! scrollbar), and construction is an ordinary `new` function.
//!
//! Event flow is single-threaded: the owner hands each `Event` to a
//! widget's `handle_event`, which reacts, redraws what changed, and
//! reports whether it consumed the event.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod listbox;
pub mod scrollbar;
pub mod widget;

// Re-export key types
pub use listbox::{ListBox, ListBoxError, ListItem, MAX_ITEM_NAME};
pub use scrollbar::ScrollBar;
pub use widget::{Widget, WidgetCore, WidgetFlags};
