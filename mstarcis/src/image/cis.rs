use super::header::{pack, pad, Header};
use crate::Error;
use deku::prelude::*;
use std::fmt;

/// Raw length of a legacy record, terminator included.
pub const CIS_LEN: usize = 58;

/// Legacy chip information structure, ends with a terminator byte.
#[derive(Debug, Clone, PartialEq, Eq, Default, DekuRead, DekuWrite)]
#[deku(endian = "little")]
pub struct Cis {
    pub header: Header,
    // zero in every image seen so far
    pub terminator: u8,
}

impl Cis {
    /// Decodes the first [`CIS_LEN`] bytes of `data`. Field values are not
    /// checked, the magic included.
    pub fn decode(data: &[u8]) -> Result<Self, Error> {
        if data.len() < CIS_LEN {
            return Err(Error::TruncatedInput {
                need: CIS_LEN,
                have: data.len(),
            });
        }
        let (_, cis) = Cis::from_bytes((&data[..CIS_LEN], 0))?;
        Ok(cis)
    }

    /// Packs the record and fills up to `page_bytes` with `0xff`.
    pub fn encode(&self) -> Vec<u8> {
        let mut data = pack(self);
        pad(&mut data, self.header.page_bytes as usize, 0xff);
        data
    }
}

impl fmt::Display for Cis {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        self.header.fmt_geometry(f)?;
        writeln!(f, "uboot pba: {:#x}", self.header.uboot_pba)?;
        writeln!(f, "bl0 pba: {:#x}", self.header.bl0_pba)?;
        writeln!(f, "bl1 pba: {:#x}", self.header.bl1_pba)?;
        self.header.fmt_modes(f)
    }
}
