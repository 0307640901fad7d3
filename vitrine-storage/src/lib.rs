//! Storage glue for Vitrine appliances
//!
//! A device showing a UI usually also exposes its storage over USB mass
//! storage. This crate provides the pieces between those worlds:
//!
//! - `BlockDevice` - sector-addressed trait a storage driver implements
//! - `MediumAccess` - the medium-access layer a mass-storage class
//!   driver calls into (init/read/write/status per logical unit)
//! - `RamDisk` - an in-memory block device for host tests and demos
//!
//! Everything here is synchronous: the mass-storage class driver calls
//! in from its own dispatch context and expects the transfer to be
//! complete on return.

#![no_std]
#![deny(unsafe_code)]

#[cfg(test)]
#[macro_use]
extern crate std;

pub mod block;
pub mod medium;
pub mod ramdisk;

// Re-export key types
pub use block::{BlockDevice, BlockError, BlockGeometry};
pub use medium::{MediumAccess, MediumError, MediumInfo, MAX_LUN};
pub use ramdisk::RamDisk;
