use super::header::{pack, pad, Header};
use crate::Error;
use deku::prelude::*;
use std::fmt;

/// Raw length of a current record.
pub const GCIS_LEN: usize = 57;
/// The record is zero-padded up to this length before the page fill.
pub const GCIS_RESERVED_LEN: usize = 80;

/// Current chip information structure. No terminator, the bytes after the
/// record up to [`GCIS_RESERVED_LEN`] are reserved and written as zero.
#[derive(Debug, Clone, PartialEq, Eq, Default, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Gcis {
    pub header: Header,
}

impl Gcis {
    /// Decodes the first [`GCIS_LEN`] bytes of `data`. The reserved region
    /// and page fill are not inspected.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        if data.len() < GCIS_LEN {
            return Err(Error::TruncatedInput {
                need: GCIS_LEN,
                have: data.len(),
            });
        }
        let (_, gcis) = Gcis::from_bytes((&data[..GCIS_LEN], 0))?;
        Ok(gcis)
    }

    pub fn encode(&self) -> Vec<u8> {
        let mut data = pack(self);
        pad(&mut data, GCIS_RESERVED_LEN, 0x00);
        pad(&mut data, self.header.page_bytes as usize, 0xff);
        data
    }

    pub fn validate(&self) -> Result<(), Error> {
        self.header.validate()
    }

    pub fn block_size(&self) -> u32 {
        self.header.block_size()
    }

    pub fn device_size(&self) -> u64 {
        self.header.device_size()
    }
}

impl fmt::Display for Gcis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let header = &self.header;
        let block_size = header.block_size() as u64;
        header.fmt_geometry(f)?;
        for (name, pba) in [
            ("uboot", header.uboot_pba),
            ("bl0", header.bl0_pba),
            ("bl1", header.bl1_pba),
        ]
        .iter()
        {
            writeln!(f, "{} pba: {:#x} ({:#x})", name, pba, *pba as u64 * block_size)?;
        }
        header.fmt_modes(f)
    }
}
