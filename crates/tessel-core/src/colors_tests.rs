use crate::Colors;

#[test]
fn paint_wraps_role() {
    let c = Colors::ON;
    assert_eq!(c.paint(c.number, 42), "\x1b[32m42\x1b[0m");
    assert_eq!(c.paint(c.ty, "'Point'"), "\x1b[36m'Point'\x1b[0m");
}

#[test]
fn off_is_plain_text() {
    let c = Colors::new(false);
    assert!(!c.is_enabled());
    assert_eq!(c.paint(c.flags, "INPUT|POD"), "INPUT|POD");
}
