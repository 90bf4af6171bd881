use crate::Error;
use byteorder::{ByteOrder, LittleEndian};
use deku::prelude::*;
use std::fmt;

pub const MAGIC: &[u8; 16] = b"MSTARSEMIUSFDCIS";
pub const ID_LEN: usize = 15;

pub const DEFAULT_ID: &[u8] = &[0xee, 0xee, 0x01, 0x00, 0x06];
pub const DEFAULT_SPARE_SIZE: u16 = 64;
pub const DEFAULT_PAGE_SIZE: u16 = 2048;
pub const DEFAULT_BLOCK_PAGES: u16 = 64;
pub const DEFAULT_SECTOR_SIZE: u16 = 512;
pub const DEFAULT_BLOCKS: u16 = 1024;
pub const DEFAULT_CLOCK_CONFIG: u8 = 0x36;

/// Fields shared by every CIS revision, in wire order.
///
/// All fields are plain values. Nothing is checked when they are written,
/// see [`Header::validate`] for the one check the format defines.
#[derive(Debug, Clone, PartialEq, Eq, DekuRead, DekuWrite)]
#[deku(endian = "endian", ctx = "endian: deku::ctx::Endian")]
pub struct Header {
    pub magic: [u8; 16],
    pub id_len: u8,
    pub id: [u8; ID_LEN],
    pub spare_bytes: u16,
    pub page_bytes: u16,
    pub block_pages: u16,
    pub block_count: u16,
    pub sector_bytes: u16,
    pub plane_count: u8,
    /// Unknown meaning, round-tripped as is.
    pub wrap_config: u8,
    /// Unknown meaning, round-tripped as is.
    pub riu_read: u8,
    /// Unknown meaning, round-tripped as is.
    pub clock_config: u8,
    pub uboot_pba: u8,
    pub bl0_pba: u8,
    pub bl1_pba: u8,
    pub hash_pba0: [u8; 3],
    pub hash_pba1: [u8; 3],
    pub read_mode: u8,
    pub write_mode: u8,
}

impl Default for Header {
    fn default() -> Self {
        let mut header = Header {
            magic: *MAGIC,
            id_len: 0,
            id: [0; ID_LEN],
            spare_bytes: DEFAULT_SPARE_SIZE,
            page_bytes: DEFAULT_PAGE_SIZE,
            block_pages: DEFAULT_BLOCK_PAGES,
            block_count: DEFAULT_BLOCKS,
            sector_bytes: DEFAULT_SECTOR_SIZE,
            plane_count: 0,
            wrap_config: 0,
            riu_read: 0,
            clock_config: DEFAULT_CLOCK_CONFIG,
            uboot_pba: 0,
            bl0_pba: 0,
            bl1_pba: 0,
            hash_pba0: [0; 3],
            hash_pba1: [0; 3],
            read_mode: 0,
            write_mode: 0,
        };
        header.set_id(DEFAULT_ID);
        header
    }
}

impl Header {
    /// Replaces the id, keeping at most 15 bytes.
    pub fn set_id(&mut self, id: &[u8]) {
        let len = id.len().min(ID_LEN);
        if len < id.len() {
            log::warn!("id is {} bytes long, truncated to {}", id.len(), ID_LEN);
        }
        self.id = [0; ID_LEN];
        self.id[..len].copy_from_slice(&id[..len]);
        self.id_len = len as u8;
    }

    /// The meaningful prefix of `id`.
    pub fn id_bytes(&self) -> &[u8] {
        &self.id[..(self.id_len as usize).min(ID_LEN)]
    }

    pub fn has_valid_magic(&self) -> bool {
        &self.magic == MAGIC
    }

    pub fn block_size(&self) -> u32 {
        self.page_bytes as u32 * self.block_pages as u32
    }

    pub fn device_size(&self) -> u64 {
        self.block_count as u64 * self.block_size() as u64
    }

    /// Advisory, nothing in the codec calls it.
    pub fn validate(&self) -> Result<(), Error> {
        if self.page_bytes == 0 {
            return Err(Error::InvalidGeometry);
        }
        Ok(())
    }

    pub fn is_valid(&self) -> bool {
        self.validate().is_ok()
    }

    pub fn hash_pba0(&self) -> u32 {
        LittleEndian::read_u24(&self.hash_pba0)
    }

    pub fn hash_pba1(&self) -> u32 {
        LittleEndian::read_u24(&self.hash_pba1)
    }

    pub(crate) fn fmt_geometry(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let id = self
            .id_bytes()
            .iter()
            .map(|b| format!("{:02x}", b))
            .collect::<String>();

        writeln!(f, "Header: {}", String::from_utf8_lossy(&self.magic))?;
        writeln!(f, "ID: {} ({} bytes)", id, self.id_len)?;
        writeln!(f, "Spare byte count: {}", self.spare_bytes)?;
        writeln!(f, "Page byte count: {}", self.page_bytes)?;
        writeln!(
            f,
            "Block size: {} bytes ({} pages)",
            self.block_size(),
            self.block_pages
        )?;
        writeln!(
            f,
            "Device capacity: {} bytes ({} blocks)",
            self.device_size(),
            self.block_count
        )?;
        writeln!(f, "Sector byte count: {}", self.sector_bytes)?;
        writeln!(f, "Plane count: {}", self.plane_count)?;
        writeln!(f, "Wrap config: {:#x}", self.wrap_config)?;
        writeln!(f, "RIU read: {:#x}", self.riu_read)?;
        writeln!(f, "Clock config: {:#x}", self.clock_config)
    }

    pub(crate) fn fmt_modes(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "Hash pba0: {:#08x}", self.hash_pba0())?;
        writeln!(f, "Hash pba1: {:#08x}", self.hash_pba1())?;
        writeln!(f, "Read mode: {:#x}", self.read_mode)?;
        writeln!(f, "Write mode: {:#x}", self.write_mode)
    }
}

/// Serializes a fixed-size record.
pub(crate) fn pack<T: DekuContainerWrite>(record: &T) -> Vec<u8> {
    // only fixed-width integers and arrays, writing cannot fail
    record
        .to_bytes()
        .expect("fixed-size record failed to serialize")
}

/// Right-pads `data` with `fill` up to `len`, never truncating.
pub(crate) fn pad(data: &mut Vec<u8>, len: usize, fill: u8) {
    if data.len() < len {
        data.resize(len, fill);
    }
}
