mod cis;
mod gcis;
mod header;

pub use cis::{Cis, CIS_LEN};
pub use gcis::{Gcis, GCIS_LEN, GCIS_RESERVED_LEN};
pub use header::{Header, ID_LEN, MAGIC};

use crate::Error;
use std::{fmt, str::FromStr};

#[derive(Debug, Copy, Clone, PartialEq, Eq)]
pub enum Layout {
    /// Legacy revision, with terminator byte.
    Cis,
    /// Current revision, with reserved region.
    Gcis,
}

impl Layout {
    pub fn raw_len(self) -> usize {
        match self {
            Layout::Cis => CIS_LEN,
            Layout::Gcis => GCIS_LEN,
        }
    }
}

impl FromStr for Layout {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "cis" => Ok(Layout::Cis),
            "gcis" => Ok(Layout::Gcis),
            _ => Err(Error::UnknownLayout(s.to_string())),
        }
    }
}

impl fmt::Display for Layout {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Layout::Cis => "CIS",
            Layout::Gcis => "GCIS",
        })
    }
}

/// A chip information structure of either layout.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ChipInfo {
    Cis(Cis),
    Gcis(Gcis),
}

impl ChipInfo {
    pub fn new(layout: Layout) -> Self {
        match layout {
            Layout::Cis => ChipInfo::Cis(Cis::default()),
            Layout::Gcis => ChipInfo::Gcis(Gcis::default()),
        }
    }

    pub fn decode(layout: Layout, data: &[u8]) -> Result<Self, Error> {
        Ok(match layout {
            Layout::Cis => ChipInfo::Cis(Cis::decode(data)?),
            Layout::Gcis => ChipInfo::Gcis(Gcis::decode(data)?),
        })
    }

    /// Decodes the structure stored at `offset` inside a flash image.
    pub fn read_from(layout: Layout, image: &[u8], offset: usize) -> Result<Self, Error> {
        let need = offset.saturating_add(layout.raw_len());
        if image.len() < need {
            return Err(Error::TruncatedInput {
                need,
                have: image.len(),
            });
        }
        log::trace!("Decode {} at {:#x}", layout, offset);
        Self::decode(layout, &image[offset..])
    }

    pub fn encode(&self) -> Vec<u8> {
        match self {
            ChipInfo::Cis(cis) => cis.encode(),
            ChipInfo::Gcis(gcis) => gcis.encode(),
        }
    }

    pub fn layout(&self) -> Layout {
        match self {
            ChipInfo::Cis(_) => Layout::Cis,
            ChipInfo::Gcis(_) => Layout::Gcis,
        }
    }

    pub fn header(&self) -> &Header {
        match self {
            ChipInfo::Cis(cis) => &cis.header,
            ChipInfo::Gcis(gcis) => &gcis.header,
        }
    }

    pub fn header_mut(&mut self) -> &mut Header {
        match self {
            ChipInfo::Cis(cis) => &mut cis.header,
            ChipInfo::Gcis(gcis) => &mut gcis.header,
        }
    }
}

impl fmt::Display for ChipInfo {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ChipInfo::Cis(cis) => fmt::Display::fmt(cis, f),
            ChipInfo::Gcis(gcis) => fmt::Display::fmt(gcis, f),
        }
    }
}
