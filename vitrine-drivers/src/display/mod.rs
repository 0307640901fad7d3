//! Display panel drivers

pub mod st7735;
