//! fOS URL - URL Parsing and Serialization
//!
//! A state-machine URL parser with relative resolution, host parsing
//! (domains, IPv4, IPv6, opaque hosts), canonical serialization and a
//! `URLSearchParams` view bound to a URL's query.
//!
//! ```
//! use fos_url::Url;
//!
//! let url = Url::parse_with_base("../x?y=1", "http://example.com/a/b/").unwrap();
//! assert_eq!(url.href(), "http://example.com/a/x?y=1");
//! url.search_params().append("z", "2 3");
//! assert_eq!(url.search(), "?y=1&z=2+3");
//! ```

mod error;
mod host;
mod idna;
mod origin;
mod parser;
mod percent;
mod record;
mod search_params;
mod serializer;
mod url;

pub use error::{ParseError, SyntaxViolation, UrlError};
pub use host::{Host, Ipv4Parse, parse_ipv4, parse_ipv6, serialize_ipv4, serialize_ipv6};
pub use idna::{domain_to_ascii, domain_to_unicode};
pub use origin::Origin;
pub use parser::{EncodingOverride, ParseOptions, State, ViolationFn};
pub use percent::{
    DEFAULT_SET, EncodeSet, FRAGMENT_SET, SIMPLE_SET, USERINFO_SET, percent_decode,
    percent_decode_str, percent_encode_byte, push_utf8_percent_encoded, utf8_percent_encode,
    utf8_percent_encode_str,
};
pub use record::{Path, SPECIAL_SCHEMES, UrlRecord, default_port, is_special};
pub use search_params::UrlSearchParams;
pub use url::Url;

/// Parse `input`, resolving it against `base` when given
pub fn parse(input: &str, base: Option<&UrlRecord>) -> Result<UrlRecord, ParseError> {
    ParseOptions::new().base_url(base).parse(input)
}

/// Serialize a record, optionally without its fragment
pub fn serialize(url: &UrlRecord, exclude_fragment: bool) -> String {
    serializer::serialize(url, exclude_fragment)
}
