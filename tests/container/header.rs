// Container header layout: encode, decode and the rejection rules.

use mam::config::HEADER_SIZE;
use mam::container::{decode, encode, peek_header, FormatCode};
use mam::MamError;

// ─────────────────────────────────────────────────────────────────────────────
// Encode / decode
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn header_fields_survive_encode_decode() {
    let payload = [0xAAu8, 0xBB, 0xCC, 0xDD, 0xEE];
    for format in [
        FormatCode::NONE,
        FormatCode::LZNT1,
        FormatCode::XPRESS,
        FormatCode::XPRESS_HUFF,
        FormatCode(0xFF),
    ] {
        for size in [0u32, 1, 1300, u32::MAX] {
            let c = encode(&payload, size, format);
            let v = decode(c.as_bytes()).unwrap();
            assert_eq!(v.format, format);
            assert_eq!(v.uncompressed_size, size);
            assert_eq!(v.payload, &payload);
        }
    }
}

#[test]
fn size_field_is_little_endian() {
    let c = encode(&[], 1300, FormatCode::XPRESS_HUFF);
    assert_eq!(c.as_bytes(), b"MAM\x04\x14\x05\x00\x00");
}

#[test]
fn header_only_buffer_decodes_to_empty_payload() {
    let v = decode(b"MAM\x02\x00\x00\x00\x00").unwrap();
    assert!(v.payload.is_empty());
    assert_eq!(v.uncompressed_size, 0);
}

#[test]
fn decode_does_not_validate_format_byte() {
    let v = decode(b"MAM\x7F\x01\x00\x00\x00z").unwrap();
    assert_eq!(v.format, FormatCode(0x7F));
    assert_eq!(v.payload, b"z");
}

// ─────────────────────────────────────────────────────────────────────────────
// Rejection
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn every_short_buffer_is_truncated() {
    let full = b"MAM\x04\x00\x00\x00";
    for len in 0..HEADER_SIZE {
        let buf = &full[..len.min(full.len())];
        match decode(buf) {
            Err(MamError::TruncatedInput { len: got }) => assert_eq!(got, buf.len()),
            other => panic!("len {len}: expected TruncatedInput, got {other:?}"),
        }
    }
}

#[test]
fn truncation_is_checked_before_magic() {
    assert!(matches!(decode(b"MA"), Err(MamError::TruncatedInput { len: 2 })));
    assert!(matches!(decode(b"XYZ"), Err(MamError::TruncatedInput { len: 3 })));
}

#[test]
fn wrong_tag_is_format_error_whatever_the_format_byte() {
    for tag in [b"MEM", b"mam", b"MAm", b"\0\0\0", b"PK\x03"] {
        for format in [0x00u8, 0x04, 0xFF] {
            let mut buf = tag.to_vec();
            buf.push(format);
            buf.extend_from_slice(&[0, 0, 0, 0, 1, 2, 3]);
            match decode(&buf) {
                Err(MamError::Format { found }) => assert_eq!(&found, tag),
                other => panic!("{tag:?}: expected Format, got {other:?}"),
            }
        }
    }
}

#[test]
fn decode_leaves_source_untouched() {
    let c = encode(b"abc", 3, FormatCode::LZNT1);
    let before = c.as_bytes().to_vec();
    let _ = decode(c.as_bytes()).unwrap();
    assert_eq!(c.as_bytes(), &before[..]);
}

// ─────────────────────────────────────────────────────────────────────────────
// peek_header
// ─────────────────────────────────────────────────────────────────────────────

#[test]
fn peek_reads_only_the_header() {
    let c = encode(&[9u8; 100], 4096, FormatCode::LZNT1);
    let mut cursor = std::io::Cursor::new(c.as_bytes().to_vec());
    let info = peek_header(&mut cursor).unwrap();
    assert_eq!(info.format, FormatCode::LZNT1);
    assert_eq!(info.uncompressed_size, 4096);
    assert_eq!(cursor.position(), HEADER_SIZE as u64);
}

#[test]
fn peek_short_reader_is_truncated() {
    let mut cursor = std::io::Cursor::new(b"MAM\x04".to_vec());
    assert!(matches!(
        peek_header(&mut cursor),
        Err(MamError::TruncatedInput { len: 4 })
    ));
}

#[test]
fn peek_bad_tag_is_format_error() {
    let mut cursor = std::io::Cursor::new(b"ZIP\x04\x00\x00\x00\x00".to_vec());
    assert!(matches!(peek_header(&mut cursor), Err(MamError::Format { .. })));
}
