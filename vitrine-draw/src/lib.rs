//! Drawing layer for the Vitrine GUI toolkit
//!
//! This crate provides:
//! - `DrawContext` - the device-context trait every widget draws through
//! - `FrameDc` - an owned RGB565 framebuffer implementing `DrawContext`
//! - `Bitmap` - borrowed pixel data widgets can paste into a context
//!
//! # Architecture
//!
//! Widgets never talk to display hardware. They draw into a `DrawContext`;
//! a panel driver (see `vitrine-drivers`) then pushes the finished frame
//! to the glass. Contexts that render directly to a remote display can
//! implement the same trait and report communication failures through
//! `DrawError`.

#![no_std]
#![deny(unsafe_code)]

pub mod bitmap;
pub mod context;
pub mod frame;

// Re-export key types
pub use bitmap::Bitmap;
pub use context::{BorderStyle, DrawContext, DrawError, GLYPH_HEIGHT, GLYPH_WIDTH};
pub use frame::FrameDc;
