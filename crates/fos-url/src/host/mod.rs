//! Host parsing
//!
//! Dispatches between bracketed IPv6, opaque hosts of non-special schemes,
//! and domains (which may turn out to be IPv4 addresses).

mod ipv4;
mod ipv6;

use std::fmt;

use crate::error::ParseError;
use crate::idna;
use crate::percent::{self, EncodeSet};

pub use ipv4::{Ipv4Parse, parse_ipv4, serialize_ipv4};
pub use ipv6::{parse_ipv6, serialize_ipv6};

/// Parsed host
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Host {
    /// ASCII domain name
    Domain(String),
    /// IPv4 address
    Ipv4(u32),
    /// IPv6 address as eight 16-bit pieces
    Ipv6([u16; 8]),
    /// Percent-encoded host of a non-special scheme
    Opaque(String),
    /// Explicitly empty host (e.g. `file://localhost/`)
    Empty,
}

impl Host {
    /// Parse a host string
    ///
    /// `is_opaque` is set for non-special schemes.
    pub fn parse(input: &str, is_opaque: bool) -> Result<Self, ParseError> {
        if let Some(rest) = input.strip_prefix('[') {
            let Some(inner) = rest.strip_suffix(']') else {
                return Err(ParseError::InvalidIpv6Address);
            };
            return parse_ipv6(inner).map(Host::Ipv6);
        }

        if is_opaque {
            return parse_opaque_host(input);
        }

        let domain = percent::percent_decode_str(input);
        let ascii_domain = idna::domain_to_ascii(&domain)?;
        if ascii_domain.chars().any(is_forbidden_domain_code_point) {
            return Err(ParseError::InvalidDomainCharacter);
        }

        match parse_ipv4(&ascii_domain)? {
            Ipv4Parse::Address(address) => Ok(Host::Ipv4(address)),
            Ipv4Parse::NotIpv4 => Ok(Host::Domain(ascii_domain)),
        }
    }

    /// Whether this is the explicitly empty host
    pub fn is_empty(&self) -> bool {
        matches!(self, Host::Empty)
    }

    /// Serialize the host (IPv6 in brackets)
    pub fn serialize(&self) -> String {
        match self {
            Host::Domain(domain) => domain.clone(),
            Host::Ipv4(address) => serialize_ipv4(*address),
            Host::Ipv6(pieces) => format!("[{}]", serialize_ipv6(pieces)),
            Host::Opaque(host) => host.clone(),
            Host::Empty => String::new(),
        }
    }
}

impl fmt::Display for Host {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize())
    }
}

fn parse_opaque_host(input: &str) -> Result<Host, ParseError> {
    if input.is_empty() {
        return Ok(Host::Empty);
    }
    if input.chars().any(is_forbidden_host_code_point) {
        return Err(ParseError::InvalidDomainCharacter);
    }
    Ok(Host::Opaque(percent::utf8_percent_encode_str(input, EncodeSet::Default)))
}

/// C0 controls, space, `#`, `/`, `:`, `?`, `@`, `[`, `\`, `]`
pub(crate) fn is_forbidden_host_code_point(c: char) -> bool {
    c <= ' ' || matches!(c, '#' | '/' | ':' | '?' | '@' | '[' | '\\' | ']')
}

/// Forbidden host code points plus `%` and DEL
fn is_forbidden_domain_code_point(c: char) -> bool {
    is_forbidden_host_code_point(c) || c == '%' || c == '\u{7F}'
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_domain() {
        assert_eq!(Host::parse("EXAMPLE.com", false), Ok(Host::Domain("example.com".into())));
        assert_eq!(Host::parse("ex%41mple.com", false), Ok(Host::Domain("example.com".into())));
    }

    #[test]
    fn test_parse_ipv4_host() {
        assert_eq!(Host::parse("127.0.0.1", false), Ok(Host::Ipv4(0x7F00_0001)));
        assert_eq!(Host::parse("0x7F.1", false), Ok(Host::Ipv4(0x7F00_0001)));
        assert_eq!(Host::parse("1.2.3.999", false), Err(ParseError::InvalidIpv4Address));
    }

    #[test]
    fn test_parse_ipv6_host() {
        let host = Host::parse("[2001:DB8::1]", false).unwrap();
        assert_eq!(host.serialize(), "[2001:db8::1]");
        assert_eq!(Host::parse("[::1", false), Err(ParseError::InvalidIpv6Address));
        assert_eq!(Host::parse("[::1]x", false), Err(ParseError::InvalidIpv6Address));
    }

    #[test]
    fn test_forbidden_domain_characters() {
        assert_eq!(Host::parse("exa mple", false), Err(ParseError::InvalidDomainCharacter));
        assert_eq!(Host::parse("a%25b", false), Err(ParseError::InvalidDomainCharacter));
        assert_eq!(Host::parse("a%2Fb", false), Err(ParseError::InvalidDomainCharacter));
    }

    #[test]
    fn test_opaque_host() {
        assert_eq!(Host::parse("Ex{a}mple", true), Ok(Host::Opaque("Ex%7Ba%7Dmple".into())));
        assert_eq!(Host::parse("%41", true), Ok(Host::Opaque("%41".into())));
        assert_eq!(Host::parse("", true), Ok(Host::Empty));
        assert_eq!(Host::parse("a b", true), Err(ParseError::InvalidDomainCharacter));
        assert_eq!(Host::parse("1.2.3.999", true), Ok(Host::Opaque("1.2.3.999".into())));
    }

    #[test]
    fn test_idn_host() {
        assert_eq!(Host::parse("bücher.de", false), Ok(Host::Domain("xn--bcher-kva.de".into())));
    }
}
