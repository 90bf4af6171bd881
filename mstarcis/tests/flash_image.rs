use mstarcis::{ChipInfo, Error, Gcis, HeaderCfgFile, Layout, GCIS_RESERVED_LEN, MAGIC};

const CFG: &str = r#"
[CIS]
id = [0x2c, 0xda, 0x90, 0x95, 0x06]
spare_bytes = 224
page_bytes = 4096
block_pages = 64
block_count = 4096
uboot_pba = 10
bl0_pba = 4
bl1_pba = 6
"#;

fn flash_image(page: &[u8], copies: usize) -> Vec<u8> {
    let mut image = Vec::new();
    for _ in 0..copies {
        image.extend_from_slice(page);
    }
    // boot code after the header pages
    image.extend(std::iter::repeat(0x5a).take(0x800));
    image
}

#[test]
fn create_then_dump() {
    let HeaderCfgFile { header_cfg } = HeaderCfgFile::parse(CFG).unwrap();
    let mut info = ChipInfo::new(Layout::Gcis);
    header_cfg.apply(info.header_mut()).unwrap();

    let page = info.encode();
    assert_eq!(page.len(), 4096);
    assert_eq!(&page[..16], MAGIC);
    assert!(page[GCIS_RESERVED_LEN..].iter().all(|&b| b == 0xff));

    let image = flash_image(&page, 2);
    let second = ChipInfo::read_from(Layout::Gcis, &image, 4096).unwrap();
    assert_eq!(second, info);

    let header = second.header();
    assert_eq!(header.block_size(), 262144);
    assert_eq!(header.device_size(), 1073741824);
    assert!(header.is_valid());

    let text = second.to_string();
    assert!(text.contains("ID: 2cda909506 (5 bytes)\n"));
    assert!(text.contains("uboot pba: 0xa (0x280000)\n"));
}

#[test]
fn legacy_image() {
    let mut info = ChipInfo::new(Layout::Cis);
    info.header_mut().plane_count = 2;
    let image = flash_image(&info.encode(), 1);

    let decoded = ChipInfo::read_from(Layout::Cis, &image, 0).unwrap();
    assert_eq!(decoded.layout(), Layout::Cis);
    assert_eq!(decoded.header().plane_count, 2);
    assert!(decoded.to_string().contains("Plane count: 2\n"));
}

#[test]
fn header_without_page_size() {
    let HeaderCfgFile { header_cfg } = HeaderCfgFile::parse("[CIS]\npage_bytes = 0\n").unwrap();
    let mut gcis = Gcis::default();
    header_cfg.apply(&mut gcis.header).unwrap();

    let data = gcis.encode();
    assert_eq!(data.len(), GCIS_RESERVED_LEN);
    assert!(matches!(gcis.validate(), Err(Error::InvalidGeometry)));
    assert_eq!(Gcis::decode(&data).unwrap(), gcis);
}

#[test]
fn short_image() {
    let image = vec![0u8; 64];
    assert!(matches!(
        ChipInfo::read_from(Layout::Gcis, &image, 16),
        Err(Error::TruncatedInput { need: 73, have: 64 })
    ));
}
