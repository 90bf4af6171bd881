use thiserror::Error;

#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("IO error: {0}")]
    IO(#[from] std::io::Error),
    #[error("Truncated input: need {need} bytes, got {have}")]
    TruncatedInput { need: usize, have: usize },
    #[error("Page byte count is not set")]
    InvalidGeometry,
    #[error("Unknown header layout: {0}")]
    UnknownLayout(String),
    #[error("hash pba {0:#x} does not fit in 24 bits")]
    HashOutOfRange(u32),
    #[error("Parse error")]
    ParseError(#[from] deku::error::DekuError),
    #[error("Parse toml error")]
    TomlError(#[from] toml::de::Error),
}
