//! Hardware drivers for the Vitrine GUI toolkit
//!
//! The toolkit itself never touches hardware: widgets draw into a
//! `FrameDc`, input arrives as `Event`s. The drivers here sit at those
//! two seams - a display panel that a finished frame is flushed to, and
//! an input device that produces key events.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
extern crate std;

pub mod display;
pub mod input;

// Re-export key types
pub use display::st7735::{St7735, St7735Error};
pub use input::buttons::ButtonPad;
