mod config;
mod error;
mod image;

pub use config::{HeaderCfg, HeaderCfgFile};
pub use error::Error;
pub use image::{
    ChipInfo, Cis, Gcis, Header, Layout, CIS_LEN, GCIS_LEN, GCIS_RESERVED_LEN, ID_LEN, MAGIC,
};
