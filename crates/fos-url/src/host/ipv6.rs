//! IPv6 host parsing and serialization

use crate::error::ParseError;

/// Parse the text between `[` and `]`
pub fn parse_ipv6(input: &str) -> Result<[u16; 8], ParseError> {
    let input: Vec<char> = input.chars().collect();
    let at = |i: usize| input.get(i).copied();

    let mut address = [0u16; 8];
    let mut piece_index = 0usize;
    let mut compress: Option<usize> = None;
    let mut pointer = 0usize;

    if at(pointer) == Some(':') {
        if at(pointer + 1) != Some(':') {
            return Err(ParseError::InvalidIpv6Address);
        }
        pointer += 2;
        piece_index += 1;
        compress = Some(piece_index);
    }

    while let Some(c) = at(pointer) {
        if piece_index == 8 {
            return Err(ParseError::InvalidIpv6Address);
        }
        if c == ':' {
            if compress.is_some() {
                return Err(ParseError::InvalidIpv6Address);
            }
            pointer += 1;
            piece_index += 1;
            compress = Some(piece_index);
            continue;
        }

        let mut value = 0u16;
        let mut length = 0usize;
        while length < 4 {
            match at(pointer).and_then(|c| c.to_digit(16)) {
                Some(digit) => {
                    value = value * 0x10 + digit as u16;
                    pointer += 1;
                    length += 1;
                }
                None => break,
            }
        }

        match at(pointer) {
            Some('.') => {
                if length == 0 || piece_index > 6 {
                    return Err(ParseError::InvalidIpv6Address);
                }
                pointer -= length;
                parse_ipv4_tail(&input[pointer..], &mut address, piece_index)?;
                piece_index += 2;
                break;
            }
            Some(':') => {
                pointer += 1;
                if at(pointer).is_none() {
                    return Err(ParseError::InvalidIpv6Address);
                }
            }
            Some(_) => return Err(ParseError::InvalidIpv6Address),
            None => {}
        }

        address[piece_index] = value;
        piece_index += 1;
    }

    match compress {
        Some(compress) => {
            // Shift the pieces parsed after `::` to the end of the address.
            let mut swaps = piece_index - compress;
            piece_index = 7;
            while piece_index != 0 && swaps > 0 {
                address.swap(piece_index, compress + swaps - 1);
                piece_index -= 1;
                swaps -= 1;
            }
        }
        None if piece_index != 8 => return Err(ParseError::InvalidIpv6Address),
        None => {}
    }

    Ok(address)
}

/// Dotted IPv4 suffix filling `address[piece_index..piece_index + 2]`
fn parse_ipv4_tail(
    input: &[char],
    address: &mut [u16; 8],
    mut piece_index: usize,
) -> Result<(), ParseError> {
    let mut pointer = 0usize;
    let mut numbers_seen = 0;

    while pointer < input.len() {
        if numbers_seen > 0 {
            if input[pointer] == '.' && numbers_seen < 4 {
                pointer += 1;
            } else {
                return Err(ParseError::InvalidIpv6Address);
            }
        }

        let mut ipv4_piece: Option<u16> = None;
        while let Some(digit) = input.get(pointer).and_then(|c| c.to_digit(10)) {
            ipv4_piece = match ipv4_piece {
                None => Some(digit as u16),
                Some(0) => return Err(ParseError::InvalidIpv6Address),
                Some(piece) => Some(piece * 10 + digit as u16),
            };
            if ipv4_piece > Some(255) {
                return Err(ParseError::InvalidIpv6Address);
            }
            pointer += 1;
        }
        let Some(piece) = ipv4_piece else {
            return Err(ParseError::InvalidIpv6Address);
        };

        address[piece_index] = address[piece_index] * 0x100 + piece;
        numbers_seen += 1;
        if numbers_seen == 2 || numbers_seen == 4 {
            piece_index += 1;
        }
    }

    if numbers_seen != 4 {
        return Err(ParseError::InvalidIpv6Address);
    }
    Ok(())
}

/// First longest run of two or more zero pieces, as `(start, len)`
fn longest_zero_run(pieces: &[u16; 8]) -> Option<(usize, usize)> {
    let mut best: Option<(usize, usize)> = None;
    let mut i = 0;
    while i < 8 {
        if pieces[i] != 0 {
            i += 1;
            continue;
        }
        let start = i;
        while i < 8 && pieces[i] == 0 {
            i += 1;
        }
        let len = i - start;
        if len >= 2 && best.is_none_or(|(_, best_len)| len > best_len) {
            best = Some((start, len));
        }
    }
    best
}

/// Serialize without brackets
pub fn serialize_ipv6(pieces: &[u16; 8]) -> String {
    let mut out = String::with_capacity(39);
    let compress = longest_zero_run(pieces);

    let mut i = 0;
    while i < 8 {
        if let Some((start, len)) = compress {
            if i == start {
                out.push_str(if i == 0 { "::" } else { ":" });
                i += len;
                continue;
            }
        }
        out.push_str(&format!("{:x}", pieces[i]));
        if i != 7 {
            out.push(':');
        }
        i += 1;
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_loopback() {
        let pieces = parse_ipv6("::1").unwrap();
        assert_eq!(pieces, [0, 0, 0, 0, 0, 0, 0, 1]);
        assert_eq!(serialize_ipv6(&pieces), "::1");
    }

    #[test]
    fn test_unspecified() {
        let pieces = parse_ipv6("::").unwrap();
        assert_eq!(pieces, [0; 8]);
        assert_eq!(serialize_ipv6(&pieces), "::");
    }

    #[test]
    fn test_compression_in_middle() {
        let pieces = parse_ipv6("2001:DB8::1").unwrap();
        assert_eq!(pieces, [0x2001, 0xdb8, 0, 0, 0, 0, 0, 1]);
        assert_eq!(serialize_ipv6(&pieces), "2001:db8::1");
    }

    #[test]
    fn test_trailing_compression() {
        let pieces = parse_ipv6("1:2::").unwrap();
        assert_eq!(pieces, [1, 2, 0, 0, 0, 0, 0, 0]);
        assert_eq!(serialize_ipv6(&pieces), "1:2::");
    }

    #[test]
    fn test_only_first_longest_run_compressed() {
        let pieces = parse_ipv6("1:0:0:2:0:0:3:4").unwrap();
        assert_eq!(serialize_ipv6(&pieces), "1::2:0:0:3:4");
        let pieces = parse_ipv6("1:0:0:2::3:4").unwrap();
        assert_eq!(serialize_ipv6(&pieces), "1::2:0:0:3:4");
        let pieces = parse_ipv6("1:0:0:2:0:0:0:3").unwrap();
        assert_eq!(serialize_ipv6(&pieces), "1:0:0:2::3");
        let pieces = parse_ipv6("1:0:2:3:4:5:6:7").unwrap();
        assert_eq!(serialize_ipv6(&pieces), "1:0:2:3:4:5:6:7");
    }

    #[test]
    fn test_embedded_ipv4() {
        let pieces = parse_ipv6("::ffff:192.168.0.1").unwrap();
        assert_eq!(pieces, [0, 0, 0, 0, 0, 0xffff, 0xc0a8, 0x0001]);
        assert_eq!(serialize_ipv6(&pieces), "::ffff:c0a8:1");
    }

    #[test]
    fn test_invalid() {
        for input in [
            "",
            ":1",
            "1:::2",
            "1::2::3",
            "1:2:3:4:5:6:7",
            "1:2:3:4:5:6:7:8:9",
            "12345::",
            "1:",
            "g::",
            "::1.2.3",
            "::1.2.3.4.5",
            "::01.2.3.4",
            "::256.2.3.4",
            "1:2:3:4:5:6:7:1.2.3.4",
        ] {
            assert!(parse_ipv6(input).is_err(), "{input:?} should fail");
        }
    }
}
