use env_logger::Env;
use main_error::MainError;
use mstarcis::{ChipInfo, Error, HeaderCfgFile, Layout};
use std::fs::{read, write};
use std::path::PathBuf;
use structopt::StructOpt;

#[derive(StructOpt)]
struct DumpOpt {
    /// Flash image
    #[structopt(parse(from_os_str))]
    image: PathBuf,
    /// Offset of the header inside the image
    #[structopt(short, long, parse(try_from_str = parse_int::parse), default_value = "0")]
    offset: usize,
    /// Header layout, cis or gcis
    #[structopt(short, long, default_value = "gcis")]
    layout: Layout,
}

#[derive(StructOpt)]
struct CreateOpt {
    /// Output file
    #[structopt(parse(from_os_str))]
    output: PathBuf,
    /// Header layout, cis or gcis
    #[structopt(short, long, default_value = "gcis")]
    layout: Layout,
    /// Path to a header config toml
    #[structopt(short, long, parse(from_os_str))]
    config: Option<PathBuf>,
}

#[derive(StructOpt)]
enum Opt {
    /// Print the header found in a flash image
    Dump(DumpOpt),
    /// Write a page sized header blob
    Create(CreateOpt),
}

fn warn_if_invalid(info: &ChipInfo) {
    let header = info.header();
    if !header.has_valid_magic() {
        log::warn!("Unexpected header magic: {:x?}", header.magic);
    }
    if let Err(e) = header.validate() {
        log::warn!("{}", e);
    }
}

fn dump(opt: DumpOpt) -> Result<(), Error> {
    let image = read(&opt.image)?;
    log::debug!("Read {} bytes from {}", image.len(), opt.image.display());

    let info = ChipInfo::read_from(opt.layout, &image, opt.offset)?;
    warn_if_invalid(&info);
    print!("{}", info);

    Ok(())
}

fn create(opt: CreateOpt) -> Result<(), Error> {
    let mut info = ChipInfo::new(opt.layout);
    if let Some(path) = &opt.config {
        let HeaderCfgFile { header_cfg } = HeaderCfgFile::load(path)?;
        header_cfg.apply(info.header_mut())?;
    }
    warn_if_invalid(&info);

    let data = info.encode();
    write(&opt.output, &data)?;
    log::info!(
        "Wrote {} header ({} bytes) to {}",
        info.layout(),
        data.len(),
        opt.output.display()
    );

    Ok(())
}

#[paw::main]
fn main(args: Opt) -> Result<(), MainError> {
    env_logger::Builder::from_env(Env::default().default_filter_or("mstarcis=info"))
        .format_timestamp(None)
        .init();

    match args {
        Opt::Dump(opt) => dump(opt)?,
        Opt::Create(opt) => create(opt)?,
    };

    Ok(())
}
