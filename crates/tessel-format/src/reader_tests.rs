use super::*;
use crate::BinaryWriter;

#[test]
fn reads_what_writer_wrote() {
    for endian in [Endian::Big, Endian::Little] {
        let mut w = BinaryWriter::new(endian);
        w.write_i8(-5);
        w.write_u16(513);
        w.write_i32(-70000);
        w.write_i64(i64::MIN);
        w.write_f32(2.5);
        w.write_cstr("tail");

        let bytes = w.into_bytes();
        let mut r = ByteReader::new(&bytes, endian);
        assert_eq!(r.read_i8().unwrap(), -5);
        assert_eq!(r.read_u16().unwrap(), 513);
        assert_eq!(r.read_i32().unwrap(), -70000);
        assert_eq!(r.read_i64().unwrap(), i64::MIN);
        assert_eq!(r.read_f32().unwrap(), 2.5);
        assert_eq!(r.read_cstr().unwrap(), "tail");
        assert!(r.is_at_end());
    }
}

#[test]
fn big_endian_bytes() {
    let bytes = [0x00, 0x00, 0x00, 0x66];
    let mut r = ByteReader::new(&bytes, Endian::Big);

    assert_eq!(r.read_u32().unwrap(), 102);
}

#[test]
fn truncated_read_reports_position() {
    let bytes = [1, 2, 3];
    let mut r = ByteReader::new(&bytes, Endian::Big);
    r.read_u8().unwrap();

    assert_eq!(
        r.read_u32(),
        Err(FormatError::Truncated {
            offset: 1,
            needed: 4,
            available: 2
        })
    );
    // Failed reads don't consume.
    assert_eq!(r.position(), 1);
    assert_eq!(r.remaining(), 2);
}

#[test]
fn cstr_without_terminator() {
    let mut r = ByteReader::new(b"abc", Endian::Big);
    assert_eq!(
        r.read_cstr(),
        Err(FormatError::MissingTerminator { offset: 0 })
    );
}

#[test]
fn cstr_invalid_utf8() {
    let mut r = ByteReader::new(&[0xFF, 0xFE, 0], Endian::Big);
    assert_eq!(r.read_cstr(), Err(FormatError::InvalidUtf8 { offset: 0 }));
}

#[test]
fn seek_within_bounds() {
    let mut r = ByteReader::new(&[0, 0, 0, 7], Endian::Big);
    r.seek(3).unwrap();
    assert_eq!(r.read_u8().unwrap(), 7);
    assert!(r.seek(5).is_err());
}
