// FormatCode parsing / display and the owned Container type.

use mam::container::{encode, Container, FormatCode};
use mam::MamError;

#[test]
fn format_code_names() {
    assert_eq!("lznt1".parse::<FormatCode>().unwrap(), FormatCode::LZNT1);
    assert_eq!("XPRESS".parse::<FormatCode>().unwrap(), FormatCode::XPRESS);
    assert_eq!("xpress-huff".parse::<FormatCode>().unwrap(), FormatCode::XPRESS_HUFF);
    assert_eq!("0x04".parse::<FormatCode>().unwrap(), FormatCode::XPRESS_HUFF);
    assert_eq!("2".parse::<FormatCode>().unwrap(), FormatCode::LZNT1);
    assert!("lz4".parse::<FormatCode>().is_err());
    assert!("0x100".parse::<FormatCode>().is_err());
}

#[test]
fn format_code_from_byte() {
    assert_eq!(FormatCode::from(4u8), FormatCode::XPRESS_HUFF);
    assert_eq!(FormatCode::XPRESS_HUFF.as_u8(), 4);
    assert_eq!(FormatCode(0x42).name(), None);
}

#[test]
fn platform_default_is_served_somewhere() {
    let d = FormatCode::platform_default();
    if cfg!(windows) {
        assert_eq!(d, FormatCode::XPRESS_HUFF);
    } else {
        assert_eq!(d, FormatCode::LZNT1);
    }
    assert_eq!(FormatCode::default(), d);
}

#[test]
fn container_from_bytes_validates() {
    let good = encode(b"xyz", 3, FormatCode::LZNT1).into_bytes();
    let c = Container::from_bytes(good.clone()).unwrap();
    assert_eq!(c.as_bytes(), &good[..]);
    assert_eq!(c.payload(), b"xyz");
    assert_eq!(c.uncompressed_size(), 3);
    assert_eq!(c.format(), FormatCode::LZNT1);
    assert_eq!(c.len(), 11);

    assert!(matches!(
        Container::from_bytes(b"MAX\x02\x00\x00\x00\x00".to_vec()),
        Err(MamError::Format { .. })
    ));
    assert!(matches!(
        Container::from_bytes(Vec::new()),
        Err(MamError::TruncatedInput { len: 0 })
    ));
}

#[test]
fn container_view_borrows_payload() {
    let c = encode(b"payload", 7, FormatCode::XPRESS);
    let v = c.view();
    assert_eq!(v.payload.as_ptr(), c.payload().as_ptr());
    assert_eq!(v.format, FormatCode::XPRESS);
}
