//! Input device drivers

pub mod buttons;
