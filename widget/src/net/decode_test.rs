use super::*;

#[test]
fn ascii_passes_through() {
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"Hi there"), "Hi there");
    assert_eq!(decoder.finish(), "");
}

#[test]
fn multibyte_split_across_chunks() {
    // "é" is 0xC3 0xA9.
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"caf\xC3"), "caf");
    assert_eq!(decoder.push(b"\xA9!"), "é!");
}

#[test]
fn four_byte_char_split_three_ways() {
    let bytes = "🎓".as_bytes();
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(&bytes[..1]), "");
    assert_eq!(decoder.push(&bytes[1..3]), "");
    assert_eq!(decoder.push(&bytes[3..]), "🎓");
}

#[test]
fn invalid_byte_becomes_replacement() {
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"a\xFFb"), "a\u{FFFD}b");
}

#[test]
fn truncated_tail_flushed_as_replacement() {
    let mut decoder = Utf8StreamDecoder::new();
    assert_eq!(decoder.push(b"ok\xE2\x82"), "ok");
    assert_eq!(decoder.finish(), "\u{FFFD}");
    assert_eq!(decoder.finish(), "");
}
