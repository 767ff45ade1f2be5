//! URL record
//!
//! The structured form of a parsed URL. A record is produced by the basic
//! parser and mutated in place by the component setters of [`crate::Url`].

use std::fmt;
use std::str::FromStr;

use crate::error::ParseError;
use crate::host::Host;
use crate::origin::Origin;
use crate::parser::ParseOptions;
use crate::serializer;

/// Schemes with authority parsing and (mostly) default ports
pub const SPECIAL_SCHEMES: [&str; 7] = ["ftp", "file", "gopher", "http", "https", "ws", "wss"];

/// Whether `scheme` is special
pub fn is_special(scheme: &str) -> bool {
    SPECIAL_SCHEMES.contains(&scheme)
}

/// Default port for a scheme
pub fn default_port(scheme: &str) -> Option<u16> {
    match scheme {
        "ftp" => Some(21),
        "http" | "ws" => Some(80),
        "https" | "wss" => Some(443),
        _ => None,
    }
}

/// URL path
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub enum Path {
    /// Segments of a hierarchical path
    List(Vec<String>),
    /// Unsegmented path of a cannot-be-a-base URL
    Opaque(String),
}

impl Default for Path {
    fn default() -> Self {
        Path::List(Vec::new())
    }
}

impl Path {
    /// Segments, empty for an opaque path
    pub fn segments(&self) -> &[String] {
        match self {
            Path::List(segments) => segments,
            Path::Opaque(_) => &[],
        }
    }

    /// Serialized path as used by `pathname`
    pub fn serialize(&self) -> String {
        match self {
            Path::Opaque(path) => path.clone(),
            Path::List(segments) => format!("/{}", segments.join("/")),
        }
    }

    /// Mutable segment list, replacing an opaque path with an empty list
    pub(crate) fn list_mut(&mut self) -> &mut Vec<String> {
        if let Path::Opaque(_) = self {
            *self = Path::List(Vec::new());
        }
        match self {
            Path::List(segments) => segments,
            Path::Opaque(_) => unreachable!("opaque path replaced above"),
        }
    }
}

/// Parsed URL record
#[derive(Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct UrlRecord {
    /// Lowercase ASCII scheme, without the trailing `:`
    pub scheme: String,
    pub username: String,
    pub password: Option<String>,
    pub host: Option<Host>,
    /// Never the scheme's default port
    pub port: Option<u16>,
    pub path: Path,
    /// `None` when absent, `Some("")` for a bare `?`
    pub query: Option<String>,
    /// `None` when absent, `Some("")` for a bare `#`
    pub fragment: Option<String>,
}

impl UrlRecord {
    /// Parse an absolute URL
    pub fn parse(input: &str) -> Result<Self, ParseError> {
        ParseOptions::new().parse(input)
    }

    /// Resolve `input` against this record
    pub fn join(&self, input: &str) -> Result<Self, ParseError> {
        ParseOptions::new().base_url(Some(self)).parse(input)
    }

    /// Whether the scheme is special
    pub fn is_special(&self) -> bool {
        is_special(&self.scheme)
    }

    /// Whether the path is opaque, so the URL cannot resolve relative input
    pub fn cannot_be_a_base_url(&self) -> bool {
        matches!(self.path, Path::Opaque(_))
    }

    /// Whether a non-empty username or password is present
    pub fn includes_credentials(&self) -> bool {
        !self.username.is_empty() || self.password.as_deref().is_some_and(|p| !p.is_empty())
    }

    /// Username, password and port only apply to URLs with a real host
    pub fn cannot_have_credentials_or_port(&self) -> bool {
        self.host.as_ref().is_none_or(Host::is_empty)
            || self.cannot_be_a_base_url()
            || self.scheme == "file"
    }

    /// Port, or the scheme's default
    pub fn port_or_default(&self) -> Option<u16> {
        self.port.or_else(|| default_port(&self.scheme))
    }

    /// Serialize to a string
    pub fn serialize(&self, exclude_fragment: bool) -> String {
        serializer::serialize(self, exclude_fragment)
    }

    /// Origin of this URL
    pub fn origin(&self) -> Origin {
        Origin::of(self)
    }

    /// Remove the last path segment
    ///
    /// A normalized Windows drive letter that is the only segment of a
    /// `file:` path is kept.
    pub(crate) fn shorten_path(&mut self) {
        let is_file = self.scheme == "file";
        if let Path::List(segments) = &mut self.path {
            if is_file && segments.len() == 1 && is_normalized_windows_drive_letter(&segments[0]) {
                return;
            }
            segments.pop();
        }
    }
}

impl fmt::Display for UrlRecord {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.serialize(false))
    }
}

impl FromStr for UrlRecord {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        UrlRecord::parse(s)
    }
}

#[cfg(feature = "serde")]
impl serde::Serialize for UrlRecord {
    fn serialize<S: serde::Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&UrlRecord::serialize(self, false))
    }
}

#[cfg(feature = "serde")]
impl<'de> serde::Deserialize<'de> for UrlRecord {
    fn deserialize<D: serde::Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let href = String::deserialize(deserializer)?;
        UrlRecord::parse(&href).map_err(serde::de::Error::custom)
    }
}

/// Two code points: ASCII alpha followed by `:` or `|`
pub(crate) fn is_windows_drive_letter(s: &str) -> bool {
    let mut chars = s.chars();
    matches!(
        (chars.next(), chars.next(), chars.next()),
        (Some(a), Some(':' | '|'), None) if a.is_ascii_alphabetic()
    )
}

/// Windows drive letter ending in `:`
pub(crate) fn is_normalized_windows_drive_letter(s: &str) -> bool {
    is_windows_drive_letter(s) && s.ends_with(':')
}

/// Whether `input` starts with a drive letter followed by EOF, `/`, `\`, `?` or `#`
pub(crate) fn starts_with_windows_drive_letter(input: &[char]) -> bool {
    match input {
        [a, ':' | '|'] => a.is_ascii_alphabetic(),
        [a, ':' | '|', next, ..] => {
            a.is_ascii_alphabetic() && matches!(next, '/' | '\\' | '?' | '#')
        }
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_ports() {
        assert_eq!(default_port("http"), Some(80));
        assert_eq!(default_port("wss"), Some(443));
        assert_eq!(default_port("ftp"), Some(21));
        assert_eq!(default_port("file"), None);
        assert_eq!(default_port("gopher"), None);
    }

    #[test]
    fn test_special_schemes() {
        assert!(is_special("gopher"));
        assert!(is_special("file"));
        assert!(!is_special("mailto"));
        assert!(!is_special("HTTP"));
    }

    #[test]
    fn test_windows_drive_letters() {
        assert!(is_windows_drive_letter("C:"));
        assert!(is_windows_drive_letter("c|"));
        assert!(!is_windows_drive_letter("C:/"));
        assert!(!is_windows_drive_letter("1:"));
        assert!(is_normalized_windows_drive_letter("C:"));
        assert!(!is_normalized_windows_drive_letter("C|"));

        let chars: Vec<char> = "C:/temp".chars().collect();
        assert!(starts_with_windows_drive_letter(&chars));
        let chars: Vec<char> = "C:x".chars().collect();
        assert!(!starts_with_windows_drive_letter(&chars));
    }

    #[test]
    fn test_shorten_path_keeps_drive_letter() {
        let mut record = UrlRecord {
            scheme: "file".into(),
            path: Path::List(vec!["C:".into()]),
            ..Default::default()
        };
        record.shorten_path();
        assert_eq!(record.path.segments(), ["C:"]);

        record.scheme = "http".into();
        record.shorten_path();
        assert!(record.path.segments().is_empty());
    }

    #[test]
    fn test_credentials_guard() {
        let record = UrlRecord::parse("http://h/").unwrap();
        assert!(!record.cannot_have_credentials_or_port());
        let record = UrlRecord::parse("mailto:a@b").unwrap();
        assert!(record.cannot_have_credentials_or_port());
        let record = UrlRecord::parse("file:///tmp").unwrap();
        assert!(record.cannot_have_credentials_or_port());
    }
}
