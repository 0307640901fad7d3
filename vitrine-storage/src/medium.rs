//! Medium-access layer
//!
//! The fixed contract a USB mass-storage class driver expects from the
//! storage side: initialize a logical unit, transfer data at a byte
//! offset, poll unit status, report capacity. One logical unit (0) is
//! supported and maps to a single `BlockDevice`; every other unit
//! number fails.
//!
//! The class driver works in byte offsets, devices in block addresses.
//! The shim validates alignment and range here so drivers below only
//! ever see whole-block transfers inside the medium.

use crate::block::{BlockDevice, BlockError};

/// Number of supported logical units
pub const MAX_LUN: u8 = 1;

/// Medium-access errors
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum MediumError {
    /// Logical unit number out of range
    InvalidLun,
    /// Unit exists but the medium is not ready
    NotReady,
    /// Offset or length is not a whole number of blocks
    Unaligned,
    /// Transfer extends past the end of the medium
    OutOfRange,
    /// Device-level failure
    Io,
}

impl From<BlockError> for MediumError {
    fn from(e: BlockError) -> Self {
        match e {
            BlockError::Io => MediumError::Io,
            BlockError::OutOfRange => MediumError::OutOfRange,
            BlockError::Unaligned => MediumError::Unaligned,
            BlockError::NotReady => MediumError::NotReady,
        }
    }
}

/// Capacity report for a logical unit
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub struct MediumInfo {
    /// Bytes per block
    pub block_size: u32,
    /// Total addressable blocks
    pub block_count: u32,
}

impl MediumInfo {
    /// Total medium size in bytes
    pub const fn memory_size(&self) -> u64 {
        self.block_size as u64 * self.block_count as u64
    }
}

/// Medium-access shim over a single block device
#[derive(Debug)]
pub struct MediumAccess<D: BlockDevice> {
    device: D,
}

impl<D: BlockDevice> MediumAccess<D> {
    /// Wrap a block device as logical unit 0
    pub fn new(device: D) -> Self {
        Self { device }
    }

    /// Access the underlying device
    pub fn device(&self) -> &D {
        &self.device
    }

    /// Unwrap the underlying device
    pub fn into_inner(self) -> D {
        self.device
    }

    /// Initialize a logical unit
    pub fn init(&mut self, lun: u8) -> Result<(), MediumError> {
        self.status(lun)
    }

    /// Poll unit status
    pub fn status(&self, lun: u8) -> Result<(), MediumError> {
        if lun >= MAX_LUN {
            return Err(MediumError::InvalidLun);
        }
        if !self.device.is_ready() {
            return Err(MediumError::NotReady);
        }
        Ok(())
    }

    /// Capacity of a logical unit
    pub fn info(&self, lun: u8) -> Result<MediumInfo, MediumError> {
        self.status(lun)?;
        let geo = self.device.geometry();
        Ok(MediumInfo {
            block_size: geo.block_size,
            block_count: geo.block_count,
        })
    }

    /// Read `buf.len()` bytes starting at byte `offset`
    pub fn read(&mut self, lun: u8, offset: u64, buf: &mut [u8]) -> Result<(), MediumError> {
        let lba = self.check_transfer(lun, offset, buf.len())?;
        self.device.read_blocks(lba, buf)?;
        Ok(())
    }

    /// Write `buf.len()` bytes starting at byte `offset`
    pub fn write(&mut self, lun: u8, offset: u64, buf: &[u8]) -> Result<(), MediumError> {
        let lba = self.check_transfer(lun, offset, buf.len())?;
        self.device.write_blocks(lba, buf)?;
        Ok(())
    }

    /// Validate a byte-addressed transfer and convert to a block address
    fn check_transfer(&self, lun: u8, offset: u64, len: usize) -> Result<u32, MediumError> {
        self.status(lun)?;

        let geo = self.device.geometry();
        let block_size = geo.block_size as u64;
        if block_size == 0 {
            return Err(MediumError::Io);
        }
        if offset % block_size != 0 || len as u64 % block_size != 0 {
            return Err(MediumError::Unaligned);
        }

        let lba = offset / block_size;
        let blocks = len as u64 / block_size;
        if lba + blocks > geo.block_count as u64 {
            return Err(MediumError::OutOfRange);
        }
        Ok(lba as u32)
    }
}


#[cfg(test)]
mod address_math {
    use super::*;
    use crate::ramdisk::RamDisk;
    use proptest::prelude::*;

    proptest! {
        /// A transfer is accepted exactly when it is block-aligned and
        /// fits inside the medium.
        #[test]
        fn check_transfer_consistent(offset in 0u64..8192, len in 0usize..8192) {
            let m = MediumAccess::new(RamDisk::<8>::new());
            let result = m.check_transfer(0, offset, len);

            let aligned = offset % 512 == 0 && len % 512 == 0;
            let in_range = offset as u128 + len as u128 <= 8 * 512;

            match result {
                Ok(lba) => {
                    prop_assert!(aligned && in_range);
                    prop_assert_eq!(lba as u64, offset / 512);
                }
                Err(MediumError::Unaligned) => prop_assert!(!aligned),
                Err(MediumError::OutOfRange) => prop_assert!(aligned && !in_range),
                Err(e) => prop_assert!(false, "unexpected error {:?}", e),
            }
        }
    }
}
