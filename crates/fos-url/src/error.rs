//! URL parse errors and syntax violations

use std::fmt;

/// URL parse failure
///
/// Returned by the basic parser when the input is structurally invalid.
/// Component setters swallow these; only URL construction surfaces them.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, thiserror::Error)]
pub enum ParseError {
    #[error("empty host")]
    EmptyHost,

    #[error("invalid international domain name")]
    IdnaError,

    #[error("invalid port number")]
    InvalidPort,

    #[error("invalid IPv4 address")]
    InvalidIpv4Address,

    #[error("invalid IPv6 address")]
    InvalidIpv6Address,

    #[error("invalid domain character")]
    InvalidDomainCharacter,

    #[error("invalid scheme")]
    InvalidScheme,

    #[error("relative URL without a base")]
    RelativeUrlWithoutBase,

    #[error("relative URL with a cannot-be-a-base base")]
    RelativeUrlWithCannotBeABaseBase,
}

/// Error raised by the `Url` constructor and `href` setter
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum UrlError {
    #[error("Invalid URL {input:?}: {source}")]
    InvalidUrl {
        input: String,
        #[source]
        source: ParseError,
    },

    #[error("Invalid base URL {input:?}: {source}")]
    InvalidBase {
        input: String,
        #[source]
        source: ParseError,
    },
}

impl UrlError {
    /// The underlying parse failure
    pub fn parse_error(&self) -> ParseError {
        match self {
            UrlError::InvalidUrl { source, .. } | UrlError::InvalidBase { source, .. } => *source,
        }
    }
}

/// Non-fatal syntax violation noticed while parsing
///
/// These never abort a parse. They are reported through the
/// syntax-violation callback of [`crate::ParseOptions`] and as `tracing` events.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum SyntaxViolation {
    Backslash,
    C0SpaceIgnored,
    EmbeddedCredentials,
    ExpectedDoubleSlash,
    ExpectedFileDoubleSlash,
    FileWithHostAndWindowsDrive,
    NonUrlCodePoint,
    NullInFragment,
    PercentDecode,
    TabOrNewlineIgnored,
    UnencodedAtSign,
}

impl SyntaxViolation {
    /// Human readable description
    pub fn description(&self) -> &'static str {
        match self {
            SyntaxViolation::Backslash => "backslash",
            SyntaxViolation::C0SpaceIgnored => {
                "leading or trailing control or space character are ignored in URLs"
            }
            SyntaxViolation::EmbeddedCredentials => {
                "embedding authentication information (username or password) \
                 in an URL is not recommended"
            }
            SyntaxViolation::ExpectedDoubleSlash => "expected //",
            SyntaxViolation::ExpectedFileDoubleSlash => "expected // after file:",
            SyntaxViolation::FileWithHostAndWindowsDrive => {
                "file: with host and Windows drive letter"
            }
            SyntaxViolation::NonUrlCodePoint => "non-URL code point",
            SyntaxViolation::NullInFragment => "NULL character in URL fragment identifier",
            SyntaxViolation::PercentDecode => "expected 2 hex digits after %",
            SyntaxViolation::TabOrNewlineIgnored => "tabs or newlines are ignored in URLs",
            SyntaxViolation::UnencodedAtSign => "unencoded @ sign in username or password",
        }
    }
}

impl fmt::Display for SyntaxViolation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}
