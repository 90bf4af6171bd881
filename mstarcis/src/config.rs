use crate::{image::Header, Error};
use byteorder::{ByteOrder, LittleEndian};
use serde::Deserialize;
use std::{fs, path::Path};

#[derive(Debug, Deserialize, Default, Clone)]
pub struct HeaderCfgFile {
    #[serde(rename = "CIS", default)]
    pub header_cfg: HeaderCfg,
}

impl HeaderCfgFile {
    pub fn parse(text: &str) -> Result<Self, Error> {
        Ok(toml::from_str(text)?)
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, Error> {
        let text = fs::read_to_string(path)?;
        Self::parse(&text)
    }
}

/// Header overrides. Missing keys keep the value already in the header.
#[derive(Debug, Deserialize, Default, Clone)]
#[serde(deny_unknown_fields)]
pub struct HeaderCfg {
    pub id: Option<Vec<u8>>,
    pub spare_bytes: Option<u16>,
    pub page_bytes: Option<u16>,
    pub block_pages: Option<u16>,
    pub block_count: Option<u16>,
    pub sector_bytes: Option<u16>,
    pub plane_count: Option<u8>,
    pub wrap_config: Option<u8>,
    pub riu_read: Option<u8>,
    pub clock_config: Option<u8>,
    pub uboot_pba: Option<u8>,
    pub bl0_pba: Option<u8>,
    pub bl1_pba: Option<u8>,
    pub hash_pba0: Option<u32>,
    pub hash_pba1: Option<u32>,
    pub read_mode: Option<u8>,
    pub write_mode: Option<u8>,
}

macro_rules! apply_fields(
    ($cfg: expr, $header: expr, $($field: ident),*) => (
        $(
            if let Some(value) = $cfg.$field {
                $header.$field = value;
            }
        )*
    );
);

impl HeaderCfg {
    pub fn apply(&self, header: &mut Header) -> Result<(), Error> {
        if let Some(id) = &self.id {
            header.set_id(id);
        }
        apply_fields!(
            self,
            header,
            spare_bytes,
            page_bytes,
            block_pages,
            block_count,
            sector_bytes,
            plane_count,
            wrap_config,
            riu_read,
            clock_config,
            uboot_pba,
            bl0_pba,
            bl1_pba,
            read_mode,
            write_mode
        );
        if let Some(hash) = self.hash_pba0 {
            write_u24(&mut header.hash_pba0, hash)?;
        }
        if let Some(hash) = self.hash_pba1 {
            write_u24(&mut header.hash_pba1, hash)?;
        }
        Ok(())
    }
}

fn write_u24(buf: &mut [u8; 3], value: u32) -> Result<(), Error> {
    if value >= 1 << 24 {
        return Err(Error::HashOutOfRange(value));
    }
    LittleEndian::write_u24(buf, value);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn overrides_only_given_fields() {
        let HeaderCfgFile { header_cfg } = HeaderCfgFile::parse(
            r#"
            [CIS]
            id = [0x98, 0xf1]
            page_bytes = 4096
            block_pages = 128
            uboot_pba = 10
            hash_pba1 = 0x030201
            "#,
        )
        .unwrap();

        let mut header = Header::default();
        header_cfg.apply(&mut header).unwrap();

        assert_eq!(header.id_bytes(), &[0x98, 0xf1]);
        assert_eq!(header.page_bytes, 4096);
        assert_eq!(header.block_pages, 128);
        assert_eq!(header.uboot_pba, 10);
        assert_eq!(header.hash_pba1, [0x01, 0x02, 0x03]);
        assert_eq!(header.hash_pba0, [0; 3]);
        assert_eq!(header.spare_bytes, 64);
        assert_eq!(header.clock_config, 0x36);
    }

    #[test]
    fn empty_file_keeps_defaults() {
        let HeaderCfgFile { header_cfg } = HeaderCfgFile::parse("").unwrap();
        let mut header = Header::default();
        header_cfg.apply(&mut header).unwrap();
        assert_eq!(header, Header::default());
    }

    #[test]
    fn rejects_wide_hash() {
        let HeaderCfgFile { header_cfg } =
            HeaderCfgFile::parse("[CIS]\nhash_pba0 = 0x1000000\n").unwrap();
        assert!(matches!(
            header_cfg.apply(&mut Header::default()),
            Err(Error::HashOutOfRange(0x1000000))
        ));
    }

    #[test]
    fn rejects_bad_toml() {
        assert!(matches!(
            HeaderCfgFile::parse("[CIS]\npage_bytes = 70000\n"),
            Err(Error::TomlError(_))
        ));
        assert!(matches!(
            HeaderCfgFile::parse("[CIS]\npage_size = 2048\n"),
            Err(Error::TomlError(_))
        ));
    }
}
