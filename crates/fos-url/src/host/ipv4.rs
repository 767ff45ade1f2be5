//! IPv4 host parsing
//!
//! Accepts the legacy forms browsers accept: fewer than four parts, hex
//! (`0x`) and octal (`0`) parts, and a single trailing dot.

use crate::error::ParseError;

/// Outcome of trying to read a host as an IPv4 address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Ipv4Parse {
    /// Not numeric, treat the input as a domain
    NotIpv4,
    Address(u32),
}

/// Parse one part, honouring radix prefixes
///
/// Returns `None` for non-numeric content. Overlong numbers saturate so the
/// range checks in [`parse_ipv4`] reject them.
fn parse_ipv4_number(input: &str) -> Option<u64> {
    let is_hex = input.starts_with("0x") || input.starts_with("0X");
    let (digits, radix) = if input.len() >= 2 && is_hex {
        (&input[2..], 16)
    } else if input.len() >= 2 && input.starts_with('0') {
        (&input[1..], 8)
    } else {
        (input, 10)
    };

    let mut value = 0u64;
    for c in digits.chars() {
        let digit = c.to_digit(radix)?;
        value = value.saturating_mul(u64::from(radix)).saturating_add(u64::from(digit));
    }
    Some(value)
}

/// Parse a (domain-to-ASCII'd) host as IPv4
pub fn parse_ipv4(input: &str) -> Result<Ipv4Parse, ParseError> {
    let mut parts: Vec<&str> = input.split('.').collect();
    if parts.last() == Some(&"") && parts.len() > 1 {
        parts.pop();
    }
    if parts.len() > 4 {
        return Ok(Ipv4Parse::NotIpv4);
    }

    let mut numbers = Vec::with_capacity(parts.len());
    for part in &parts {
        if part.is_empty() {
            return Ok(Ipv4Parse::NotIpv4);
        }
        match parse_ipv4_number(part) {
            Some(n) => numbers.push(n),
            None => return Ok(Ipv4Parse::NotIpv4),
        }
    }

    let Some((&last, leading)) = numbers.split_last() else {
        return Ok(Ipv4Parse::NotIpv4);
    };
    if leading.iter().any(|&n| n > 255) {
        return Err(ParseError::InvalidIpv4Address);
    }
    if last >= 256u64.pow(5 - numbers.len() as u32) {
        return Err(ParseError::InvalidIpv4Address);
    }

    let mut ipv4 = last;
    for (i, &n) in leading.iter().enumerate() {
        ipv4 += n * 256u64.pow(3 - i as u32);
    }
    // Range checks above bound the sum below 2^32.
    Ok(Ipv4Parse::Address(ipv4 as u32))
}

/// Dotted-decimal serialization, most significant octet first
pub fn serialize_ipv4(address: u32) -> String {
    let [a, b, c, d] = address.to_be_bytes();
    format!("{a}.{b}.{c}.{d}")
}
