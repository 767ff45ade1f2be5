//! Percent Encoding
//!
//! Encode sets and the percent-encode/decode primitives used by the parser,
//! the host parser and `application/x-www-form-urlencoded`.

use percent_encoding::{AsciiSet, CONTROLS, NON_ALPHANUMERIC};

/// C0 controls, DEL and everything outside ASCII
pub const SIMPLE_SET: &AsciiSet = CONTROLS;

/// Simple set + space, `"`, `#`, `<`, `>`, `?`, `` ` ``, `{`, `}`
pub const DEFAULT_SET: &AsciiSet = &SIMPLE_SET
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>')
    .add(b'?')
    .add(b'`')
    .add(b'{')
    .add(b'}');

/// Default set + `/`, `:`, `;`, `=`, `@`, `[`, `\`, `]`, `^`, `|`
pub const USERINFO_SET: &AsciiSet = &DEFAULT_SET
    .add(b'/')
    .add(b':')
    .add(b';')
    .add(b'=')
    .add(b'@')
    .add(b'[')
    .add(b'\\')
    .add(b']')
    .add(b'^')
    .add(b'|');

/// Simple set + space, `"`, `<`, `>`, `` ` ``
pub const FRAGMENT_SET: &AsciiSet = &SIMPLE_SET
    .add(b' ')
    .add(b'"')
    .add(b'<')
    .add(b'>')
    .add(b'`');

/// Bytes below 0x21 or above 0x7E, `"`, `#`, `<`, `>`
const QUERY_SET: &AsciiSet = &CONTROLS
    .add(b' ')
    .add(b'"')
    .add(b'#')
    .add(b'<')
    .add(b'>');

/// Query set + `'`, used for special schemes
const SPECIAL_QUERY_SET: &AsciiSet = &QUERY_SET.add(b'\'');

/// Bytes left alone by `application/x-www-form-urlencoded`: alphanumerics and `*-._`
const FORM_URLENCODED_SET: &AsciiSet = &NON_ALPHANUMERIC
    .remove(b'*')
    .remove(b'-')
    .remove(b'.')
    .remove(b'_');

/// Named encode set
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EncodeSet {
    Simple,
    Default,
    Userinfo,
    Fragment,
}

impl EncodeSet {
    fn ascii_set(self) -> &'static AsciiSet {
        match self {
            EncodeSet::Simple => SIMPLE_SET,
            EncodeSet::Default => DEFAULT_SET,
            EncodeSet::Userinfo => USERINFO_SET,
            EncodeSet::Fragment => FRAGMENT_SET,
        }
    }

    /// Whether `c` gets percent-encoded under this set
    pub fn contains(self, c: char) -> bool {
        let mut buf = [0u8; 4];
        let s: &str = c.encode_utf8(&mut buf);
        percent_encoding::utf8_percent_encode(s, self.ascii_set()).next() != Some(s)
    }
}

/// Percent-encode a single byte as `%XX` (uppercase hex)
pub fn percent_encode_byte(byte: u8) -> &'static str {
    percent_encoding::percent_encode_byte(byte)
}

/// UTF-8 percent-encode one code point
pub fn utf8_percent_encode(c: char, set: EncodeSet) -> String {
    let mut out = String::new();
    push_utf8_percent_encoded(&mut out, c, set);
    out
}

/// UTF-8 percent-encode one code point onto `out`
pub fn push_utf8_percent_encoded(out: &mut String, c: char, set: EncodeSet) {
    let mut buf = [0u8; 4];
    out.extend(percent_encoding::utf8_percent_encode(c.encode_utf8(&mut buf), set.ascii_set()));
}

/// UTF-8 percent-encode a whole string
pub fn utf8_percent_encode_str(input: &str, set: EncodeSet) -> String {
    percent_encoding::utf8_percent_encode(input, set.ascii_set()).to_string()
}

/// Percent-encode already encoded query bytes onto `out`
pub(crate) fn push_query_bytes(out: &mut String, bytes: &[u8], special: bool) {
    let set = if special { SPECIAL_QUERY_SET } else { QUERY_SET };
    out.extend(percent_encoding::percent_encode(bytes, set));
}

/// Percent-decode a byte sequence
///
/// A `%` not followed by two hex digits is kept as is.
pub fn percent_decode(input: &[u8]) -> Vec<u8> {
    percent_encoding::percent_decode(input).collect()
}

/// Percent-decode and UTF-8 decode, replacing invalid sequences
pub fn percent_decode_str(input: &str) -> String {
    String::from_utf8_lossy(&percent_decode(input.as_bytes())).into_owned()
}

/// `application/x-www-form-urlencoded` byte serializer
pub(crate) fn form_urlencode(out: &mut String, input: &str) {
    for chunk in percent_encoding::utf8_percent_encode(input, FORM_URLENCODED_SET) {
        if chunk == "%20" {
            out.push('+');
        } else {
            out.push_str(chunk);
        }
    }
}

/// `application/x-www-form-urlencoded` name/value decoder (`+` is a space)
pub(crate) fn form_urldecode(input: &str) -> String {
    let bytes: Vec<u8> = input
        .bytes()
        .map(|b| if b == b'+' { b' ' } else { b })
        .collect();
    String::from_utf8_lossy(&percent_decode(&bytes)).into_owned()
}

/// Whether `input` starts with `%` followed by two hex digits
pub(crate) fn starts_with_percent_escape(input: &[char]) -> bool {
    matches!(input, ['%', a, b, ..] if a.is_ascii_hexdigit() && b.is_ascii_hexdigit())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_percent_encode_byte() {
        assert_eq!(percent_encode_byte(0x0A), "%0A");
        assert_eq!(percent_encode_byte(0xFF), "%FF");
    }

    #[test]
    fn test_encode_sets_nest() {
        for c in ['\u{0}', '\u{1F}', '\u{7F}', 'é'] {
            assert!(EncodeSet::Simple.contains(c));
            assert!(EncodeSet::Default.contains(c));
            assert!(EncodeSet::Userinfo.contains(c));
        }
        assert!(!EncodeSet::Simple.contains(' '));
        assert!(EncodeSet::Default.contains(' '));
        assert!(!EncodeSet::Default.contains('@'));
        assert!(EncodeSet::Userinfo.contains('@'));
        assert!(EncodeSet::Userinfo.contains('|'));
        assert!(!EncodeSet::Userinfo.contains('a'));
    }

    #[test]
    fn test_utf8_percent_encode() {
        assert_eq!(utf8_percent_encode('a', EncodeSet::Default), "a");
        assert_eq!(utf8_percent_encode(' ', EncodeSet::Default), "%20");
        assert_eq!(utf8_percent_encode('€', EncodeSet::Simple), "%E2%82%AC");
        assert_eq!(utf8_percent_encode(':', EncodeSet::Userinfo), "%3A");
        assert_eq!(utf8_percent_encode_str("a b?", EncodeSet::Default), "a%20b%3F");
    }

    #[test]
    fn test_code_point_and_string_encoding_agree() {
        let sets = [
            EncodeSet::Simple,
            EncodeSet::Default,
            EncodeSet::Userinfo,
            EncodeSet::Fragment,
        ];
        let code_points = (0u8..=0x7F).map(char::from).chain(['é', '€', '\u{10FFFF}']);
        for c in code_points {
            for set in sets {
                let single = utf8_percent_encode(c, set);
                assert_eq!(single, utf8_percent_encode_str(&c.to_string(), set), "{c:?} {set:?}");
                assert_eq!(set.contains(c), single != c.to_string(), "{c:?} {set:?}");
            }
        }
        assert!(EncodeSet::Fragment.contains('`'));
        assert!(!EncodeSet::Fragment.contains('#'));
        assert!(!EncodeSet::Default.contains('%'));
    }

    #[test]
    fn test_percent_decode_passthrough() {
        assert_eq!(percent_decode(b"%41%zz%4"), b"A%zz%4".to_vec());
        assert_eq!(percent_decode(b"100%"), b"100%".to_vec());
        assert_eq!(percent_decode_str("caf%C3%A9"), "café");
    }

    #[test]
    fn test_query_bytes() {
        let mut out = String::new();
        push_query_bytes(&mut out, "a b'\"#<>é".as_bytes(), true);
        assert_eq!(out, "a%20b%27%22%23%3C%3E%C3%A9");

        let mut out = String::new();
        push_query_bytes(&mut out, b"it's", false);
        assert_eq!(out, "it's");
    }

    #[test]
    fn test_form_urlencoded() {
        let mut out = String::new();
        form_urlencode(&mut out, "a b&c=d*-._~");
        assert_eq!(out, "a+b%26c%3Dd*-._%7E");
        assert_eq!(form_urldecode("a+b%2Bc"), "a b+c");
    }

    #[test]
    fn test_starts_with_percent_escape() {
        let chars: Vec<char> = "%2e".chars().collect();
        assert!(starts_with_percent_escape(&chars));
        let chars: Vec<char> = "%g1".chars().collect();
        assert!(!starts_with_percent_escape(&chars));
    }
}
